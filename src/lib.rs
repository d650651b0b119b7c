// rustwipe - scheduled wipe automation for LGSM-managed Rust game servers
//
// This is the library crate containing the scheduling decision, file sweeping,
// and config-generation logic. The binary crate (main.rs) provides the CLI
// entry point.

pub mod cli;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;

// Re-export commonly used types for convenience
pub use error::WipeError;
pub use models::{WipeCadence, WipeEvent, WipeRequest};
pub use services::wipe::WipeOutcome;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
