pub mod product;
pub mod category;

pub use product::{Product, NewProduct, ProductError};
pub use category::{Category, NewCategory};
