use async_trait::async_trait;
use course_catalog::{Category, NewCategory, NewProduct, Product};

pub type RepoError = Box<dyn std::error::Error + Send + Sync>;
pub type RepoResult<T> = Result<T, RepoError>;

/// Repository trait for product catalog access
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_all(&self) -> RepoResult<Vec<Product>>;

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Product>>;

    async fn insert(&self, product: &NewProduct) -> RepoResult<Product>;

    /// Returns false when no product has `product.id`
    async fn update(&self, product: &Product) -> RepoResult<bool>;

    async fn delete_by_id(&self, id: i64) -> RepoResult<bool>;

    async fn count(&self) -> RepoResult<u64>;
}

/// Repository trait for category access
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_all(&self) -> RepoResult<Vec<Category>>;

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Category>>;

    async fn insert(&self, category: &NewCategory) -> RepoResult<Category>;
}
