//! Parameter store interface used to resolve gate settings.
use thiserror::Error;

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Settings resolution errors.
///
/// Every variant is fatal for the invocation: the gate never guesses a
/// secret or a portal URL.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("missing parameter: {0}")]
    Missing(String),
    #[error("invalid parameter: {0}")]
    Invalid(String),
    #[error("parameter store error: {0}")]
    Backend(String),
}

/// A hierarchical key/value parameter service (`/apps/<app>/<name>`).
///
/// Returns:
/// - `Ok(Some(value))` if the parameter exists
/// - `Ok(None)` if it does not
/// - `Err(_)` if the backend could not answer
pub trait ParameterStore: Send + Sync {
    // Backend name, for logging.
    fn backend_name(&self) -> &'static str;

    fn get_parameter(&self, name: &str) -> SettingsResult<Option<String>>;
}
