// src/connectors/mod.rs - Connector entry point

pub mod traits;

// Re-export the core trait
pub use traits::*;

pub mod hyperliquid;
