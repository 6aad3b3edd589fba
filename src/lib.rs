// Define modules
pub mod app;
pub mod config;
pub mod connectors;
pub mod display;
pub mod scanner;
pub mod types;

// Re-export key components for easier usage
pub use app::{App, ButtonState, DisplaySnapshot, SpinOutcome, ViewState};
pub use config::{get_config, Config};
pub use connectors::hyperliquid::{HyperliquidConfig, HyperliquidRestClient};
pub use connectors::InfoSource;
pub use scanner::{CycleOutcome, DemoDisasters, DisasterScanner, DisasterSelector, FallbackProvider, PositionFetcher};
pub use types::{AppError, DisasterPosition};
