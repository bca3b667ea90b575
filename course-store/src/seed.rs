use course_catalog::{NewCategory, NewProduct};
use course_core::repository::{CategoryRepository, ProductRepository, RepoResult};
use tracing::info;

/// Insert the sample catalog unless products already exist.
///
/// Returns the number of products inserted.
pub async fn seed_catalog(
    products: &dyn ProductRepository,
    categories: &dyn CategoryRepository,
) -> RepoResult<usize> {
    if products.count().await? > 0 {
        info!("Catalog already populated, skipping seed");
        return Ok(0);
    }

    let electronics = categories.insert(&NewCategory::new("Electronics")).await?;
    let books = categories.insert(&NewCategory::new("Books")).await?;
    let computers = categories.insert(&NewCategory::new("Computers")).await?;

    let samples = vec![
        NewProduct::new(
            "The Lord of the Rings",
            "Lorem ipsum dolor sit amet, consectetur.",
            90.5,
        )
        .in_category(books.id),
        NewProduct::new("Smart TV", "Nulla eu imperdiet purus. Maecenas ante.", 2190.0)
            .in_category(electronics.id)
            .in_category(computers.id),
        NewProduct::new("Macbook Pro", "Nam eleifend maximus tortor, at mollis.", 1250.0)
            .in_category(computers.id),
        NewProduct::new("PC Gamer", "Donec aliquet odio ac rhoncus cursus.", 1200.0)
            .in_category(computers.id),
        NewProduct::new("Rails for Dummies", "Cras fringilla convallis sem vel faucibus.", 100.99)
            .in_category(books.id),
    ];

    let total = samples.len();
    for sample in &samples {
        products.insert(sample).await?;
    }

    info!("Seeded catalog with {} products", total);
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryCatalog;

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let catalog = InMemoryCatalog::new();

        assert_eq!(seed_catalog(&catalog, &catalog).await.unwrap(), 5);
        assert_eq!(seed_catalog(&catalog, &catalog).await.unwrap(), 0);

        assert_eq!(ProductRepository::count(&catalog).await.unwrap(), 5);
        assert_eq!(CategoryRepository::find_all(&catalog).await.unwrap().len(), 3);

        let tv = ProductRepository::find_by_id(&catalog, 2).await.unwrap().unwrap();
        assert_eq!(tv.name, "Smart TV");
        assert_eq!(tv.category_ids(), vec![1, 3]);
    }
}
