use std::sync::{Arc, OnceLock};

use eco_core::{RegistrationState, SignupSessionId};
use tokio::sync::Mutex;

/// Shared signup context containing state and dispatch lock.
///
/// One context exists per signup session. It is shared between
/// `SignupOrchestrator` and whoever renders the flow.
///
/// ## Lock Ordering
/// When acquiring both locks, acquire `dispatch_lock` first, then `state`.
/// - `dispatch_lock`: Used only for `dispatch` operations to serialize concurrent calls.
/// - `state`: Used for both reading (`get_state`) and writing (during `dispatch`).
pub struct SignupContext {
    session_id: SignupSessionId,
    /// Id carried over from a resumed draft; wins over `session_id` once set.
    resumed_session_id: OnceLock<SignupSessionId>,
    /// Current registration state.
    state: Mutex<RegistrationState>,
    /// Serializes dispatch calls so a repeated "Next" cannot submit twice.
    /// Only acquired during `dispatch`, NOT during `get_state`.
    dispatch_lock: Mutex<()>,
}

impl SignupContext {
    /// Creates a new SignupContext with the given initial state.
    pub fn new(initial_state: RegistrationState) -> Self {
        Self {
            session_id: SignupSessionId::new(),
            resumed_session_id: OnceLock::new(),
            state: Mutex::new(initial_state),
            dispatch_lock: Mutex::new(()),
        }
    }

    /// Returns the context wrapped in Arc for shared ownership.
    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn session_id(&self) -> &SignupSessionId {
        self.resumed_session_id.get().unwrap_or(&self.session_id)
    }

    /// Continues the session a draft was saved under. Only the first call has an effect.
    pub fn resume_session(&self, session_id: SignupSessionId) {
        let _ = self.resumed_session_id.set(session_id);
    }

    /// Returns a snapshot of the current state.
    ///
    /// This is a lightweight read operation that does NOT acquire `dispatch_lock`.
    pub async fn get_state(&self) -> RegistrationState {
        self.state.lock().await.clone()
    }

    /// Acquires the dispatch lock for serializing concurrent dispatch calls.
    ///
    /// Returns a guard that releases the lock when dropped.
    pub async fn acquire_dispatch_lock(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }

    /// Updates the state to the given value.
    ///
    /// This should only be called after acquiring `dispatch_lock`.
    pub async fn set_state(&self, state: RegistrationState) {
        let mut guard = self.state.lock().await;
        *guard = state;
    }
}

impl Default for SignupContext {
    fn default() -> Self {
        Self::new(RegistrationState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resumed_session_id_replaces_fresh_one_once() {
        let context = SignupContext::default();
        let fresh = context.session_id().clone();

        context.resume_session(SignupSessionId::from("draft-session".to_string()));
        context.resume_session(SignupSessionId::from("later".to_string()));

        assert_ne!(context.session_id(), &fresh);
        assert_eq!(context.session_id().as_str(), "draft-session");
    }
}
