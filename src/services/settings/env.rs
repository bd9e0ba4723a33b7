use crate::services::settings::client::{ParameterStore, SettingsError, SettingsResult};

/// Parameter store backed by process environment variables.
///
/// A parameter path maps to an env var by dropping the leading `/`,
/// upper-casing, and replacing every non-alphanumeric byte with `_`:
/// `/apps/cf-lambda-geo-auth/jwt-secret` → `APPS_CF_LAMBDA_GEO_AUTH_JWT_SECRET`.
///
/// Values are read on every call; nothing is cached.
#[derive(Clone, Debug, Default)]
pub struct EnvParameterStore;

impl EnvParameterStore {
    pub fn new() -> Self {
        Self
    }

    pub fn var_name(parameter: &str) -> String {
        parameter
            .trim_start_matches('/')
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect()
    }
}

impl ParameterStore for EnvParameterStore {
    fn backend_name(&self) -> &'static str {
        "env"
    }

    fn get_parameter(&self, name: &str) -> SettingsResult<Option<String>> {
        let var = Self::var_name(name);
        match std::env::var(&var) {
            Ok(value) => Ok(Some(value)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(std::env::VarError::NotUnicode(_)) => Err(SettingsError::Invalid(name.to_string())),
        }
    }
}
