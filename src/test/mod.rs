// Test-only helpers
pub mod utils;
