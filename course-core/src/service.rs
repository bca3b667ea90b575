use std::sync::Arc;

use course_catalog::{Category, Product};
use tracing::debug;

use crate::repository::{CategoryRepository, ProductRepository};
use crate::{CoreError, CoreResult};

/// Read access to the product catalog
#[derive(Clone)]
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    /// All stored products, in whatever order the repository yields them
    pub async fn find_all(&self) -> CoreResult<Vec<Product>> {
        let products = self.repository.find_all().await?;
        debug!("Loaded {} products", products.len());
        Ok(products)
    }

    /// Fails with `CoreError::NotFound` when no product has this id
    pub async fn find_by_id(&self, id: i64) -> CoreResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(CoreError::NotFound(id))
    }
}

#[derive(Clone)]
pub struct CategoryService {
    repository: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    pub async fn find_all(&self) -> CoreResult<Vec<Category>> {
        Ok(self.repository.find_all().await?)
    }

    pub async fn find_by_id(&self, id: i64) -> CoreResult<Category> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(CoreError::NotFound(id))
    }
}
