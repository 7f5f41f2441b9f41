pub mod record_store;
pub mod record_writer;

// Re-exports
pub use record_store::*;
pub use record_writer::*;
