pub mod contact_repo;
pub mod repository_error;
