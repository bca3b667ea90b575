use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Core product structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub img_url: Option<String>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Product {
    pub fn belongs_to(&self, category_id: i64) -> bool {
        self.categories.iter().any(|c| c.id == category_id)
    }

    pub fn category_ids(&self) -> Vec<i64> {
        self.categories.iter().map(|c| c.id).collect()
    }

    pub fn validate(&self) -> Result<(), ProductError> {
        validate_fields(&self.name, self.price)
    }
}

fn validate_fields(name: &str, price: f64) -> Result<(), ProductError> {
    if name.trim().is_empty() {
        return Err(ProductError::EmptyName);
    }
    if !price.is_finite() || price < 0.0 {
        return Err(ProductError::InvalidPrice(price));
    }
    Ok(())
}

/// A product that has not been persisted yet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub img_url: Option<String>,
    #[serde(default)]
    pub category_ids: Vec<i64>,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
            img_url: None,
            category_ids: Vec::new(),
        }
    }

    pub fn with_img_url(mut self, img_url: impl Into<String>) -> Self {
        self.img_url = Some(img_url.into());
        self
    }

    pub fn in_category(mut self, category_id: i64) -> Self {
        if !self.category_ids.contains(&category_id) {
            self.category_ids.push(category_id);
        }
        self
    }

    /// Check the fields storage cannot enforce on its own
    pub fn validate(&self) -> Result<(), ProductError> {
        validate_fields(&self.name, self.price)
    }

    /// Attach the storage-assigned id and resolved categories
    pub fn into_product(self, id: i64, categories: Vec<Category>) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            img_url: self.img_url,
            categories,
        }
    }
}

/// Product-related errors
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ProductError {
    #[error("Product name must not be empty")]
    EmptyName,

    #[error("Invalid product price: {0}")]
    InvalidPrice(f64),
}
