pub mod activity_repository;
pub mod department_repository;
pub mod employee_repository;
pub mod factory;

pub use activity_repository::ActivityRepositoryImpl;
pub use department_repository::DepartmentRepositoryImpl;
pub use employee_repository::EmployeeRepositoryImpl;
pub use factory::{ReferenceRepoFactory, ReferenceRepositories};
