pub mod error;
pub mod security;

// Re-export all modules
pub use security::*;
