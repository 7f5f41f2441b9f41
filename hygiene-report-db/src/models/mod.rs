pub mod activity;
pub mod department;
pub mod employee;
pub mod identifiable;
pub mod scan_record;

// Re-exports
pub use activity::*;
pub use department::*;
pub use employee::*;
pub use identifiable::*;
pub use scan_record::*;
