pub mod clock;
pub mod repository;
pub mod sheet_repositories;
pub mod sheet_store;
pub mod utils;
pub mod workbook;

pub use clock::{Clock, ManualClock, SystemClock};
pub use sheet_repositories::SheetRepositories;
pub use sheet_store::SheetStore;
pub use workbook::{Cell, SharedWorkbook, Workbook, Worksheet};

#[cfg(test)]
pub mod test_helper;
