//! Commerce core for the tailoring storefront.
//!
//! - **Cart**: the [`CartStore`](cart::CartStore), which merges configured
//!   items into lines and derives totals
//! - **Customization**: option values with order-independent structural equality
//! - **Catalog**: suits, shirts, pants and African wear, with option schemas
//! - **Tracking**: read-only order lookup against the fulfillment pipeline
//!
//! # Example
//!
//! ```
//! use tailor_commerce::prelude::*;
//!
//! let catalog = StaticCatalog::tailoring(Currency::USD);
//! let suit = catalog.require(&ProductId::new("suit-navy")).unwrap();
//!
//! let cart = CartStore::new();
//! let picked = Customization::new().with("lapel", "peak");
//! cart.add_item(suit.configure(Some("40R"), &picked, 1).unwrap()).unwrap();
//! cart.add_item(suit.configure(Some("40R"), &picked, 2).unwrap()).unwrap();
//!
//! assert_eq!(cart.line_count(), 1);
//! assert_eq!(cart.compute_total().display(), "$897.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod customization;
pub mod tracking;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{
        AddOutcome, CartConfig, CartItem, CartLine, CartPricing, CartSnapshot, CartStore,
        CheckoutSummary, LinePricing, PriceMergePolicy,
    };

    // Customization
    pub use crate::customization::{Customization, OptionValue};

    // Catalog
    pub use crate::catalog::{
        CatalogProvider, Category, CustomizationSchema, OptionKind, OptionSpec, Product,
        StaticCatalog,
    };

    // Tracking
    pub use crate::tracking::{
        normalize_order_number, OrderStage, OrderTracker, StageState, TrackedOrder, ORDER_STAGES,
    };
}
