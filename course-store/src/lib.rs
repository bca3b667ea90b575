pub mod app_config;
pub mod database;
pub mod catalog_repo;
pub mod memory;
pub mod seed;

pub use database::DbClient;
pub use catalog_repo::{StoreCategoryRepository, StoreProductRepository};
pub use memory::InMemoryCatalog;
pub use seed::seed_catalog;
