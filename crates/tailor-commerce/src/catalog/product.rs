//! Catalog product types.

use crate::cart::CartItem;
use crate::catalog::CustomizationSchema;
use crate::customization::Customization;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Product category, one per storefront tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Suits,
    Shirts,
    Pants,
    /// African fabrics and styles.
    AfricanWear,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Suits,
        Category::Shirts,
        Category::Pants,
        Category::AfricanWear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Suits => "suits",
            Category::Shirts => "shirts",
            Category::Pants => "pants",
            Category::AfricanWear => "african_wear",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Suits => "Suits",
            Category::Shirts => "Shirts",
            Category::Pants => "Pants",
            Category::AfricanWear => "African Wear",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "suits" | "suit" => Some(Category::Suits),
            "shirts" | "shirt" => Some(Category::Shirts),
            "pants" | "trousers" => Some(Category::Pants),
            "african_wear" | "african" => Some(Category::AfricanWear),
            _ => None,
        }
    }
}

/// A product in the catalog. Immutable from the cart's point of view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    /// Unit price.
    pub price: Money,
    /// Size labels offered. Empty means the product is not sized.
    pub sizes: Vec<String>,
    /// Image reference.
    pub image: String,
    pub description: Option<String>,
    /// Options the shopper may configure; `None` for fixed products.
    pub customization: Option<CustomizationSchema>,
}

impl Product {
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        category: Category,
        price: Money,
    ) -> Self {
        let id = id.into();
        Self {
            image: format!("{}.jpg", id),
            id,
            name: name.into(),
            category,
            price,
            sizes: Vec::new(),
            description: None,
            customization: None,
        }
    }

    pub fn with_sizes(mut self, sizes: &[&str]) -> Self {
        self.sizes = sizes.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_schema(mut self, schema: CustomizationSchema) -> Self {
        self.customization = Some(schema);
        self
    }

    pub fn is_customizable(&self) -> bool {
        self.customization
            .as_ref()
            .is_some_and(|schema| !schema.options.is_empty())
    }

    /// Match a size label case-insensitively, returning the catalog spelling.
    pub fn find_size(&self, size: &str) -> Option<&str> {
        let wanted = size.trim();
        self.sizes
            .iter()
            .find(|s| s.eq_ignore_ascii_case(wanted))
            .map(String::as_str)
    }

    /// Turn detail-screen selections into a cart candidate.
    ///
    /// Sized products need a size. Selections are checked against the schema
    /// and laid over its defaults.
    pub fn configure(
        &self,
        size: Option<&str>,
        selections: &Customization,
        quantity: i64,
    ) -> Result<CartItem, CommerceError> {
        let size = match (self.sizes.is_empty(), size) {
            (true, _) => None,
            (false, None) => return Err(CommerceError::MissingSelection("size".to_string())),
            (false, Some(s)) if s.trim().is_empty() => {
                return Err(CommerceError::MissingSelection("size".to_string()))
            }
            (false, Some(s)) => Some(self.find_size(s).ok_or_else(|| {
                CommerceError::ValidationError(format!(
                    "size '{}' is not available for {} (choose from {})",
                    s,
                    self.name,
                    self.sizes.join(", ")
                ))
            })?),
        };

        let customization = match &self.customization {
            Some(schema) => schema.resolve(selections)?,
            None if selections.is_empty() => Customization::new(),
            None => {
                return Err(CommerceError::ValidationError(format!(
                    "{} cannot be customized",
                    self.name
                )))
            }
        };

        let mut item = CartItem::new(self.name.clone(), self.price)
            .with_quantity(quantity)
            .with_customization(customization)
            .with_product(self.id.clone())
            .with_image(self.image.clone());

        if let Some(size) = size {
            item = item
                .with_size(size)
                .with_display_key(format!("{}-{}", self.id, size));
        } else {
            item = item.with_display_key(self.id.to_string());
        }

        Ok(item)
    }
}
