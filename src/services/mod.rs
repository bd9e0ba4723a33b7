pub mod gate;
pub mod settings;
