//! Product catalog module.
//!
//! The catalog is owned outside the cart: the store only ever sees the
//! [`CartItem`](crate::cart::CartItem)s that [`Product::configure`] builds.

mod product;
mod schema;
mod tailoring;

pub use product::{Category, Product};
pub use schema::{CustomizationSchema, OptionKind, OptionSpec};
pub use tailoring::StaticCatalog;

use crate::error::CommerceError;
use crate::ids::ProductId;

/// Source of immutable product records.
pub trait CatalogProvider {
    /// All products, in display order.
    fn products(&self) -> &[Product];

    fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products().iter().find(|p| &p.id == id)
    }

    fn by_category(&self, category: Category) -> Vec<&Product> {
        self.products()
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// Like [`CatalogProvider::product`] but with a not-found error.
    fn require(&self, id: &ProductId) -> Result<&Product, CommerceError> {
        self.product(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }
}
