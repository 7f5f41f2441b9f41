pub mod reference;
pub mod scan;
