use std::sync::Arc;

use course_core::{CategoryRepository, CategoryService, ProductRepository, ProductService};
use course_store::app_config::{DatabaseConfig, StorageBackend};
use course_store::{DbClient, InMemoryCatalog, StoreCategoryRepository, StoreProductRepository};

#[derive(Clone)]
pub struct AppState {
    pub products: ProductService,
    pub categories: CategoryService,
}

impl AppState {
    pub fn new(
        product_repo: Arc<dyn ProductRepository>,
        category_repo: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            products: ProductService::new(product_repo),
            categories: CategoryService::new(category_repo),
        }
    }

    /// Wire repositories for the configured backend, migrating and seeding as configured
    pub async fn from_config(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let (product_repo, category_repo): (Arc<dyn ProductRepository>, Arc<dyn CategoryRepository>) =
            match config.backend {
                StorageBackend::Memory => {
                    tracing::info!("Using in-memory catalog");
                    let catalog = Arc::new(InMemoryCatalog::new());
                    let products: Arc<dyn ProductRepository> = catalog.clone();
                    let categories: Arc<dyn CategoryRepository> = catalog;
                    (products, categories)
                }
                StorageBackend::Postgres => {
                    let db = DbClient::from_config(config).await?;
                    if config.run_migrations {
                        db.migrate().await?;
                    }
                    let products: Arc<dyn ProductRepository> =
                        Arc::new(StoreProductRepository::new(db.pool.clone()));
                    let categories: Arc<dyn CategoryRepository> =
                        Arc::new(StoreCategoryRepository::new(db.pool));
                    (products, categories)
                }
            };

        if config.seed {
            course_store::seed_catalog(product_repo.as_ref(), category_repo.as_ref())
                .await
                .map_err(|e| anyhow::anyhow!("Failed to seed catalog: {}", e))?;
        }

        Ok(Self::new(product_repo, category_repo))
    }
}
