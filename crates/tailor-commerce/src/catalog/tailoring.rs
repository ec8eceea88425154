//! The built-in tailoring catalog.

use crate::catalog::{CatalogProvider, Category, CustomizationSchema, OptionSpec, Product};
use crate::money::{Currency, Money};

const GARMENT_SIZES: &[&str] = &["XS", "S", "M", "L", "XL", "XXL"];
const SUIT_SIZES: &[&str] = &["36R", "38R", "40R", "42R", "44R", "46R", "40L", "42L"];
const WAIST_SIZES: &[&str] = &["28", "30", "32", "34", "36", "38", "40"];
const FABRIC_LENGTHS: &[&str] = &["2yd", "4yd", "6yd"];

/// An in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The storefront's standard range, priced in `currency`.
    pub fn tailoring(currency: Currency) -> Self {
        let price = |dollars: i64, cents: i64| Money::new(dollars * 100 + cents, currency);

        Self::new(vec![
            Product::new("suit-navy", "Navy Suit", Category::Suits, price(299, 0))
                .with_sizes(SUIT_SIZES)
                .with_description("Two-piece suit cut to your measurements.")
                .with_schema(suit_schema()),
            Product::new("suit-charcoal", "Charcoal Suit", Category::Suits, price(329, 0))
                .with_sizes(SUIT_SIZES)
                .with_description("Year-round worsted wool in charcoal grey.")
                .with_schema(suit_schema()),
            Product::new("suit-tuxedo", "Midnight Tuxedo", Category::Suits, price(449, 0))
                .with_sizes(SUIT_SIZES)
                .with_description("Satin-faced evening suit.")
                .with_schema(suit_schema()),
            Product::new("shirt-oxford", "Oxford Shirt", Category::Shirts, price(59, 99))
                .with_sizes(GARMENT_SIZES)
                .with_schema(shirt_schema()),
            Product::new("shirt-poplin", "Poplin Dress Shirt", Category::Shirts, price(69, 99))
                .with_sizes(GARMENT_SIZES)
                .with_schema(shirt_schema()),
            Product::new("pants-chino", "Tailored Chinos", Category::Pants, price(79, 0))
                .with_sizes(WAIST_SIZES)
                .with_schema(pants_schema()),
            Product::new("pants-wool", "Wool Trousers", Category::Pants, price(119, 0))
                .with_sizes(WAIST_SIZES)
                .with_schema(pants_schema()),
            Product::new("african-agbada", "Agbada Set", Category::AfricanWear, price(249, 0))
                .with_sizes(GARMENT_SIZES)
                .with_description("Three-piece flowing robe set.")
                .with_schema(african_style_schema()),
            Product::new("african-dashiki", "Dashiki", Category::AfricanWear, price(49, 99))
                .with_sizes(GARMENT_SIZES)
                .with_schema(african_style_schema()),
            Product::new("fabric-kente", "Kente Cloth", Category::AfricanWear, price(89, 0))
                .with_sizes(FABRIC_LENGTHS)
                .with_description("Hand-woven kente, sold by length."),
            Product::new("fabric-ankara", "Ankara Print", Category::AfricanWear, price(24, 50))
                .with_sizes(FABRIC_LENGTHS)
                .with_description("Wax-print cotton, sold by length."),
            Product::new("accessory-tie", "Silk Tie", Category::Suits, price(35, 0)),
        ])
    }
}

impl CatalogProvider for StaticCatalog {
    fn products(&self) -> &[Product] {
        &self.products
    }
}

fn suit_schema() -> CustomizationSchema {
    CustomizationSchema::new(vec![
        OptionSpec::choice(
            "fabric",
            "Fabric",
            &["wool", "wool_blend", "linen", "cotton", "velvet"],
            "wool",
        ),
        OptionSpec::choice("lapel", "Lapel style", &["notch", "peak", "shawl"], "notch"),
        OptionSpec::count("buttons", "Buttons", 1, 3, 2),
        OptionSpec::choice("vents", "Vents", &["none", "single", "double"], "double"),
        OptionSpec::toggle("functionalButtonholes", "Functional buttonholes", false),
        OptionSpec::toggle("monogram.enabled", "Monogram", false),
        OptionSpec::toggle("pleatedPants", "Pleated pants", false),
        OptionSpec::toggle("cuffedHem", "Cuffed hem", false),
        OptionSpec::toggle("suspenderButtons", "Suspender buttons", false),
        OptionSpec::toggle("phonePocket", "Phone pocket", false),
    ])
}

fn shirt_schema() -> CustomizationSchema {
    CustomizationSchema::new(vec![
        OptionSpec::choice(
            "collar",
            "Collar",
            &["spread", "button_down", "cutaway", "mandarin"],
            "spread",
        ),
        OptionSpec::choice("cuff", "Cuff", &["barrel", "french"], "barrel"),
        OptionSpec::choice("fit", "Fit", &["classic", "slim"], "classic"),
        OptionSpec::toggle("monogram.enabled", "Monogram", false),
    ])
}

fn pants_schema() -> CustomizationSchema {
    CustomizationSchema::new(vec![
        OptionSpec::toggle("pleatedPants", "Pleats", false),
        OptionSpec::toggle("cuffedHem", "Cuffed hem", false),
        OptionSpec::toggle("suspenderButtons", "Suspender buttons", false),
        OptionSpec::toggle("phonePocket", "Phone pocket", false),
    ])
}

fn african_style_schema() -> CustomizationSchema {
    CustomizationSchema::new(vec![
        OptionSpec::choice(
            "fabric",
            "Fabric",
            &["ankara", "kente", "aso_oke", "adire", "brocade"],
            "ankara",
        ),
        OptionSpec::choice("embroidery", "Embroidery", &["none", "neckline", "full"], "none"),
        OptionSpec::toggle("matchingCap", "Matching cap", false),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customization::Customization;
    use crate::ids::ProductId;

    #[test]
    fn test_every_category_is_stocked() {
        let catalog = StaticCatalog::tailoring(Currency::USD);
        for category in Category::ALL {
            assert!(!catalog.by_category(category).is_empty(), "{:?}", category);
        }
    }

    #[test]
    fn test_product_ids_are_unique() {
        let catalog = StaticCatalog::tailoring(Currency::USD);
        let mut ids: Vec<_> = catalog.products().iter().map(|p| p.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), catalog.products().len());
    }

    #[test]
    fn test_suit_schema_covers_tailoring_options() {
        let catalog = StaticCatalog::tailoring(Currency::USD);
        let suit = catalog.require(&ProductId::new("suit-navy")).unwrap();
        let schema = suit.customization.as_ref().unwrap();
        for key in [
            "fabric",
            "lapel",
            "buttons",
            "vents",
            "functionalButtonholes",
            "monogram.enabled",
            "pleatedPants",
            "cuffedHem",
            "suspenderButtons",
            "phonePocket",
        ] {
            assert!(schema.option(key).is_some(), "missing {}", key);
        }

        let item = suit
            .configure(Some("40R"), &Customization::new().with("lapel", "peak"), 1)
            .unwrap();
        assert_eq!(item.unit_price, Money::new(29900, Currency::USD));
    }

    #[test]
    fn test_missing_product() {
        let catalog = StaticCatalog::tailoring(Currency::USD);
        assert!(catalog.require(&ProductId::new("hat")).is_err());
    }
}
