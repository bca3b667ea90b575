use std::collections::BTreeMap;

use async_trait::async_trait;
use course_catalog::{Category, NewCategory, NewProduct, Product};
use course_core::repository::{CategoryRepository, ProductRepository, RepoResult};
use tokio::sync::RwLock;

#[derive(Default)]
struct CatalogState {
    products: BTreeMap<i64, Product>,
    categories: BTreeMap<i64, Category>,
    last_product_id: i64,
    last_category_id: i64,
}

impl CatalogState {
    fn resolve_categories(&self, ids: &[i64]) -> RepoResult<Vec<Category>> {
        let mut resolved = Vec::with_capacity(ids.len());
        for id in ids {
            let category = self
                .categories
                .get(id)
                .ok_or_else(|| format!("Unknown category id {}", id))?;
            if !resolved.contains(category) {
                resolved.push(category.clone());
            }
        }
        resolved.sort_by_key(|c: &Category| c.id);
        Ok(resolved)
    }
}

/// In-memory catalog store backing both repositories.
///
/// Ids are assigned from per-table counters starting at 1 and are never reused.
#[derive(Default)]
pub struct InMemoryCatalog {
    state: RwLock<CatalogState>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryCatalog {
    async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let state = self.state.read().await;
        Ok(state.products.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Product>> {
        let state = self.state.read().await;
        Ok(state.products.get(&id).cloned())
    }

    async fn insert(&self, product: &NewProduct) -> RepoResult<Product> {
        product.validate()?;

        let mut state = self.state.write().await;
        let categories = state.resolve_categories(&product.category_ids)?;

        state.last_product_id += 1;
        let id = state.last_product_id;
        let stored = product.clone().into_product(id, categories);
        state.products.insert(id, stored.clone());

        Ok(stored)
    }

    async fn update(&self, product: &Product) -> RepoResult<bool> {
        product.validate()?;

        let mut state = self.state.write().await;
        if !state.products.contains_key(&product.id) {
            return Ok(false);
        }

        let categories = state.resolve_categories(&product.category_ids())?;
        let mut stored = product.clone();
        stored.categories = categories;
        state.products.insert(product.id, stored);

        Ok(true)
    }

    async fn delete_by_id(&self, id: i64) -> RepoResult<bool> {
        let mut state = self.state.write().await;
        Ok(state.products.remove(&id).is_some())
    }

    async fn count(&self) -> RepoResult<u64> {
        let state = self.state.read().await;
        Ok(state.products.len() as u64)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCatalog {
    async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let state = self.state.read().await;
        Ok(state.categories.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Category>> {
        let state = self.state.read().await;
        Ok(state.categories.get(&id).cloned())
    }

    async fn insert(&self, category: &NewCategory) -> RepoResult<Category> {
        let mut state = self.state.write().await;
        state.last_category_id += 1;
        let stored = Category::new(state.last_category_id, category.name.clone());
        state.categories.insert(stored.id, stored.clone());
        Ok(stored)
    }
}
