//! Request-time access gate: settings → cookie → token → decision.

pub mod cookie;
pub mod router;
pub mod token;

pub use cookie::{AUTH_COOKIE_NAME, extract_cookie};
pub use router::{Decision, Redirect, RequestRouter};
pub use token::{TokenValidator, Verdict};

use thiserror::Error;
use tracing::error;

use crate::edge::{EdgeEvent, EdgeRequest, EventError, HandlerOutput};
use crate::services::settings::{SettingsError, SettingsProvider};

/// Invocation-level failures. Token outcomes are never errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Event(#[from] EventError),
}

#[derive(Debug, Clone)]
pub struct EdgeGate {
    router: RequestRouter,
}

impl Default for EdgeGate {
    fn default() -> Self {
        Self::new(RequestRouter::new(
            TokenValidator::default(),
            AUTH_COOKIE_NAME,
        ))
    }
}

impl EdgeGate {
    pub fn new(router: RequestRouter) -> Self {
        Self { router }
    }

    pub fn router(&self) -> &RequestRouter {
        &self.router
    }

    /// Load settings, then decide.
    ///
    /// If the settings cannot be loaded no decision is made: passing through
    /// would bypass authentication and redirecting has no target.
    pub fn handle(
        &self,
        provider: &dyn SettingsProvider,
        request: EdgeRequest,
        now: i64,
    ) -> Result<Decision, SettingsError> {
        let settings = provider.load().inspect_err(|err| {
            error!(error = %err, "gate settings unavailable; refusing to decide");
        })?;

        Ok(self
            .router
            .decide(request, &settings.secret, &settings.portal_url, now))
    }

    /// Full viewer-request invocation: unwrap the event, decide, and shape the
    /// output for the edge.
    pub fn handle_event(
        &self,
        provider: &dyn SettingsProvider,
        event: EdgeEvent,
        now: i64,
    ) -> Result<HandlerOutput, GateError> {
        let request = event.into_request()?;
        let decision = self.handle(provider, request, now)?;
        Ok(decision.into())
    }
}
