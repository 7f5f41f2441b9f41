pub mod factory;
pub mod scan_record_repository;

pub use factory::{ScanRepoFactory, ScanRepositories};
pub use scan_record_repository::ScanRecordRepositoryImpl;
