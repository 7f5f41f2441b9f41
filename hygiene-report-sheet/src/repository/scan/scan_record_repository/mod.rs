pub mod repo_impl;
pub mod create;
pub mod list_all;
pub mod patch;

#[cfg(test)]
pub mod test_utils;

pub use repo_impl::ScanRecordRepositoryImpl;
