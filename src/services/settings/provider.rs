//! Settings the gate needs per invocation: the token signing secret and the
//! authentication portal URL.

use std::fmt;

use tracing::error;
use url::Url;

use crate::services::settings::client::{ParameterStore, SettingsError, SettingsResult};

pub const DEFAULT_PARAMETER_PREFIX: &str = "/apps/cf-lambda-geo-auth";

const JWT_SECRET_PARAMETER: &str = "jwt-secret";
const AUTH_URL_PARAMETER: &str = "auth-url";

/// Symmetric key for token signature verification.
///
/// Key material is not printable via Debug.
#[derive(Clone, PartialEq, Eq)]
pub struct JwtSecret(Vec<u8>);

impl JwtSecret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JwtSecret([REDACTED])")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GateSettings {
    pub secret: JwtSecret,
    pub portal_url: String,
}

impl GateSettings {
    /// Validates both values. An empty secret or a portal URL that is not an
    /// absolute http(s) URL is rejected.
    pub fn new(secret: JwtSecret, portal_url: impl Into<String>) -> SettingsResult<Self> {
        let portal_url = portal_url.into();

        if secret.is_empty() {
            return Err(SettingsError::Missing(JWT_SECRET_PARAMETER.to_string()));
        }
        if portal_url.trim().is_empty() {
            return Err(SettingsError::Missing(AUTH_URL_PARAMETER.to_string()));
        }
        match Url::parse(&portal_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
            _ => return Err(SettingsError::Invalid(AUTH_URL_PARAMETER.to_string())),
        }

        Ok(Self { secret, portal_url })
    }
}

/// Source of [`GateSettings`], consulted once per invocation.
///
/// Implementations must fail rather than return partial or default values.
pub trait SettingsProvider: Send + Sync {
    fn load(&self) -> SettingsResult<GateSettings>;
}

/// Fixed settings, validated up front.
#[derive(Clone, Debug)]
pub struct StaticSettingsProvider {
    settings: GateSettings,
}

impl StaticSettingsProvider {
    pub fn new(settings: GateSettings) -> Self {
        Self { settings }
    }
}

impl SettingsProvider for StaticSettingsProvider {
    fn load(&self) -> SettingsResult<GateSettings> {
        Ok(self.settings.clone())
    }
}

/// Resolves `{prefix}/jwt-secret` and `{prefix}/auth-url` from a [`ParameterStore`].
#[derive(Clone, Debug)]
pub struct ParameterStoreProvider<S> {
    store: S,
    secret_name: String,
    portal_url_name: String,
}

impl<S: ParameterStore> ParameterStoreProvider<S> {
    pub fn new(store: S) -> Self {
        Self::with_prefix(store, DEFAULT_PARAMETER_PREFIX)
    }

    pub fn with_prefix(store: S, prefix: &str) -> Self {
        let prefix = prefix.trim_end_matches('/');
        Self {
            store,
            secret_name: format!("{prefix}/{JWT_SECRET_PARAMETER}"),
            portal_url_name: format!("{prefix}/{AUTH_URL_PARAMETER}"),
        }
    }

    pub fn secret_name(&self) -> &str {
        &self.secret_name
    }

    pub fn portal_url_name(&self) -> &str {
        &self.portal_url_name
    }

    fn required(&self, name: &str) -> SettingsResult<String> {
        match self.store.get_parameter(name) {
            Ok(Some(value)) if !value.is_empty() => Ok(value),
            Ok(_) => {
                error!(
                    backend = self.store.backend_name(),
                    parameter = name,
                    "required parameter is missing"
                );
                Err(SettingsError::Missing(name.to_string()))
            }
            Err(err) => {
                error!(
                    backend = self.store.backend_name(),
                    parameter = name,
                    error = %err,
                    "parameter lookup failed"
                );
                Err(err)
            }
        }
    }
}

impl<S: ParameterStore> SettingsProvider for ParameterStoreProvider<S> {
    fn load(&self) -> SettingsResult<GateSettings> {
        let secret = self.required(&self.secret_name)?;
        let portal_url = self.required(&self.portal_url_name)?;

        GateSettings::new(JwtSecret::new(secret), portal_url).map_err(|err| match err {
            // Report the full parameter path rather than the short name.
            SettingsError::Invalid(_) => SettingsError::Invalid(self.portal_url_name.clone()),
            other => other,
        })
    }
}
