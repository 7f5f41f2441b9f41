pub mod aggregate;
pub mod filter;
pub mod service;
pub mod view;


// Re-exports
pub use aggregate::*;
pub use filter::*;
pub use service::*;
pub use view::*;
