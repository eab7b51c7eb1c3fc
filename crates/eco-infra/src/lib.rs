pub mod config;
pub mod draft_store;
pub mod http;
pub mod i18n;
pub mod time;

pub use draft_store::FileSignupDraftRepository;
pub use http::{HttpAuthGateway, HttpRegistrationGateway};
pub use i18n::CatalogTranslator;
pub use time::SystemClock;
