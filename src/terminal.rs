//! Terminal adapters for the navigation, notification and state-change ports.

use std::sync::Mutex;

use async_trait::async_trait;
use eco_core::ports::{NavigationPort, NotificationPort, SignupEventPort};
use eco_core::signup::{Notice, RegistrationState, StepSequencer};
use tracing::debug;

/// Prints notices and navigation targets, and remembers them for the run summary.
#[derive(Debug, Default)]
pub struct TerminalUi {
    routes: Mutex<Vec<String>>,
    notices: Mutex<Vec<Notice>>,
}

impl TerminalUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last route the flow navigated to, if any.
    pub fn last_route(&self) -> Option<String> {
        self.routes.lock().ok().and_then(|r| r.last().cloned())
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().map(|n| n.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl NavigationPort for TerminalUi {
    async fn navigate(&self, route: &str) -> anyhow::Result<()> {
        println!("-> {route}");
        self.routes
            .lock()
            .map_err(|_| anyhow::anyhow!("route log poisoned"))?
            .push(route.to_string());
        Ok(())
    }
}

#[async_trait]
impl NotificationPort for TerminalUi {
    async fn notify(&self, notice: &Notice, message: &str) {
        if notice.is_error() {
            eprintln!("[error] {message}");
        } else {
            println!("[ok] {message}");
        }
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice.clone());
        }
    }
}

#[async_trait]
impl SignupEventPort for TerminalUi {
    async fn emit_state_changed(&self, state: &RegistrationState) {
        let (current, total) = StepSequencer::progress(state);
        debug!(
            step = %state.current_step(),
            current,
            total,
            status = ?state.submission_status,
            "signup state changed"
        );
    }
}
