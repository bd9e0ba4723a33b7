pub mod client;
pub mod env;
pub mod memory;
pub mod provider;

pub use client::{ParameterStore, SettingsError, SettingsResult};
pub use env::EnvParameterStore;
pub use memory::InMemoryParameterStore;
pub use provider::{
    DEFAULT_PARAMETER_PREFIX, GateSettings, JwtSecret, ParameterStoreProvider, SettingsProvider,
    StaticSettingsProvider,
};
