//! Installation settings (`config.toml`).

pub mod settings;

pub use settings::{KdfChoice, Settings};
