pub mod criteria;
pub mod input;
pub mod zone;

pub use criteria::*;
pub use input::*;
pub use zone::*;
