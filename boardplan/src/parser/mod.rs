pub mod schema;

// Re-export for convenience
pub use schema::*;
