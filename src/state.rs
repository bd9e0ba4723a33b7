/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - gate: EdgeGate, settings: SettingsProvider
 * - Clone 前提で持つ (内部は Arc)
 */
use std::fmt;
use std::sync::Arc;

use crate::services::gate::EdgeGate;
use crate::services::settings::SettingsProvider;

#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<EdgeGate>,
    pub settings: Arc<dyn SettingsProvider>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The provider may hold key material.
        f.debug_struct("AppState")
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(gate: EdgeGate, settings: Arc<dyn SettingsProvider>) -> Self {
        Self {
            gate: Arc::new(gate),
            settings,
        }
    }
}
