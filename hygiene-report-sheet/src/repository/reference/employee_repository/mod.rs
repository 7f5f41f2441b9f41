pub mod repo_impl;
pub mod create;
pub mod list_all;

#[cfg(test)]
pub mod test_utils;

pub use repo_impl::EmployeeRepositoryImpl;
