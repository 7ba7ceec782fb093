//! Cross-cutting types shared by all layers

pub mod errors;
pub mod shutdown;

pub use errors::{EngineError, EngineResult};
