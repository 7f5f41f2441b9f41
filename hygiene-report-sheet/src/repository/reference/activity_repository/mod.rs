pub mod repo_impl;
pub mod list_all;

pub use repo_impl::ActivityRepositoryImpl;
