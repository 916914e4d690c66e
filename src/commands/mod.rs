pub mod analyze;
pub mod serve;

// Re-export command functions for convenience
pub use analyze::{analyze, OutputFormat};
pub use serve::serve;
