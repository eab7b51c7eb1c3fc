//! Port interfaces for the application layer
//!
//! Ports define the contract between the signup flow (use cases) and the
//! outside world: remote endpoints, localization, navigation, notices and
//! draft persistence. Implementations live in `eco-infra` or in the binary.

mod auth;
mod clock;
pub mod draft;
pub mod errors;
mod navigation;
mod notification;
mod registration;
mod signup_event_port;
mod translator;

pub use auth::AuthPort;
pub use clock::ClockPort;
pub use draft::SignupDraftPort;
pub use errors::GatewayError;
pub use navigation::NavigationPort;
pub use notification::NotificationPort;
pub use registration::RegistrationPort;
pub use signup_event_port::SignupEventPort;
pub use translator::TranslatorPort;
