pub mod repository;
pub mod service;

pub use repository::{CategoryRepository, ProductRepository, RepoError, RepoResult};
pub use service::{CategoryService, ProductService};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Resource not found. Id {0}")]
    NotFound(i64),
    #[error("Repository failure: {0}")]
    Repository(#[from] RepoError),
}

pub type CoreResult<T> = Result<T, CoreError>;
