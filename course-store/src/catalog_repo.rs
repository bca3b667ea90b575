use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool};
use course_catalog::{Category, NewCategory, NewProduct, Product};
use course_core::repository::{CategoryRepository, ProductRepository, RepoResult};

pub struct StoreProductRepository {
    pool: PgPool,
}

impl StoreProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal structs for type-safe querying
#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: String,
    price: f64,
    img_url: Option<String>,
}

impl ProductRow {
    fn into_product(self, categories: Vec<Category>) -> Product {
        Product {
            id: self.id,
            name: self.name,
            description: self.description,
            price: self.price,
            img_url: self.img_url,
            categories,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category { id: row.id, name: row.name }
    }
}

#[derive(sqlx::FromRow)]
struct ProductCategoryRow {
    product_id: i64,
    category_id: i64,
    category_name: String,
}

/// Categories of each listed product, keyed by product id
async fn load_categories<'e, E>(
    executor: E,
    product_ids: &[i64],
) -> Result<HashMap<i64, Vec<Category>>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let rows: Vec<ProductCategoryRow> = sqlx::query_as(
        r#"
        SELECT pc.product_id, c.id AS category_id, c.name AS category_name
        FROM product_categories pc
        JOIN categories c ON c.id = pc.category_id
        WHERE pc.product_id = ANY($1)
        ORDER BY pc.product_id, c.id
        "#,
    )
    .bind(product_ids)
    .fetch_all(executor)
    .await?;

    let mut by_product: HashMap<i64, Vec<Category>> = HashMap::new();
    for row in rows {
        by_product
            .entry(row.product_id)
            .or_default()
            .push(Category::new(row.category_id, row.category_name));
    }
    Ok(by_product)
}

async fn link_categories<'e, E>(executor: E, product_id: i64, category_ids: &[i64]) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    if category_ids.is_empty() {
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO product_categories (product_id, category_id)
        SELECT $1, UNNEST($2::BIGINT[])
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(product_id)
    .bind(category_ids)
    .execute(executor)
    .await?;

    Ok(())
}

#[async_trait]
impl ProductRepository for StoreProductRepository {
    async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            "SELECT id, name, description, price, img_url FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut categories = load_categories(&self.pool, &ids).await?;

        let products = rows
            .into_iter()
            .map(|row| {
                let linked = categories.remove(&row.id).unwrap_or_default();
                row.into_product(linked)
            })
            .collect();

        Ok(products)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Product>> {
        let row: Option<ProductRow> = sqlx::query_as(
            "SELECT id, name, description, price, img_url FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let linked = load_categories(&self.pool, &[id])
            .await?
            .remove(&id)
            .unwrap_or_default();

        Ok(Some(row.into_product(linked)))
    }

    async fn insert(&self, product: &NewProduct) -> RepoResult<Product> {
        product.validate()?;

        let mut tx = self.pool.begin().await?;

        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO products (name, description, price, img_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.img_url.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        link_categories(&mut *tx, id, &product.category_ids).await?;
        let linked = load_categories(&mut *tx, &[id])
            .await?
            .remove(&id)
            .unwrap_or_default();

        tx.commit().await?;

        Ok(product.clone().into_product(id, linked))
    }

    async fn update(&self, product: &Product) -> RepoResult<bool> {
        product.validate()?;

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $1, description = $2, price = $3, img_url = $4
            WHERE id = $5
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.img_url.as_deref())
        .bind(product.id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query("DELETE FROM product_categories WHERE product_id = $1")
            .bind(product.id)
            .execute(&mut *tx)
            .await?;
        link_categories(&mut *tx, product.id, &product.category_ids()).await?;

        tx.commit().await?;
        Ok(true)
    }

    async fn delete_by_id(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> RepoResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count as u64)
    }
}

pub struct StoreCategoryRepository {
    pool: PgPool,
}

impl StoreCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for StoreCategoryRepository {
    async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let rows: Vec<CategoryRow> = sqlx::query_as("SELECT id, name FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Category>> {
        let row: Option<CategoryRow> = sqlx::query_as("SELECT id, name FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Category::from))
    }

    async fn insert(&self, category: &NewCategory) -> RepoResult<Category> {
        let row: CategoryRow = sqlx::query_as("INSERT INTO categories (name) VALUES ($1) RETURNING id, name")
            .bind(&category.name)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }
}
