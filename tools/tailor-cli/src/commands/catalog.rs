//! Catalog listing.

use anyhow::{bail, Result};
use tailor_commerce::catalog::{CatalogProvider, Category};

use super::CatalogArgs;
use crate::context::Context;

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let categories: Vec<Category> = match args.category.as_deref() {
        Some(raw) => match Category::from_str(raw) {
            Some(category) => vec![category],
            None => bail!(
                "Unknown category '{}'. Choose from: suits, shirts, pants, african",
                raw
            ),
        },
        None => Category::ALL.to_vec(),
    };

    if ctx.output.is_json() {
        let products: Vec<_> = categories
            .iter()
            .flat_map(|c| ctx.catalog.by_category(*c))
            .collect();
        ctx.output.json(&products);
        return Ok(());
    }

    let widths = [18, 22, 10, 6];
    for category in categories {
        let products = ctx.catalog.by_category(category);
        if products.is_empty() {
            continue;
        }

        ctx.output.header(category.display_name());
        ctx.output.table_row(&["ID", "NAME", "PRICE", "CUSTOM"], &widths);
        for product in products {
            let price = product.price.display();
            let custom = if product.is_customizable() { "yes" } else { "" };
            ctx.output
                .table_row(&[product.id.as_str(), product.name.as_str(), price.as_str(), custom], &widths);
        }
    }

    println!();
    ctx.output
        .info("Run `tailor show <id>` for sizes and options, `tailor shop` to start shopping.");
    Ok(())
}
