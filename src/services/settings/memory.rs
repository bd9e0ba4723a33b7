use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::services::settings::client::{ParameterStore, SettingsError, SettingsResult};

/// Map-backed parameter store.
///
/// Cheap to clone; clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct InMemoryParameterStore {
    params: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.put(name, value);
        self
    }

    pub fn put(&self, name: impl Into<String>, value: impl Into<String>) {
        // Poisoning is ignored: entries are plain strings.
        let mut params = self.params.write().unwrap_or_else(|e| e.into_inner());
        params.insert(name.into(), value.into());
    }

    pub fn remove(&self, name: &str) -> Option<String> {
        let mut params = self.params.write().unwrap_or_else(|e| e.into_inner());
        params.remove(name)
    }
}

impl ParameterStore for InMemoryParameterStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn get_parameter(&self, name: &str) -> SettingsResult<Option<String>> {
        let params = self
            .params
            .read()
            .map_err(|e| SettingsError::Backend(e.to_string()))?;
        Ok(params.get(name).cloned())
    }
}
