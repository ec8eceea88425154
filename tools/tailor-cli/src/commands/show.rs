//! Product detail view.

use anyhow::Result;
use tailor_commerce::catalog::CatalogProvider;
use tailor_commerce::ProductId;

use super::ShowArgs;
use crate::context::Context;

/// Run the show command.
pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let product = ctx.catalog.require(&ProductId::new(args.product.trim()))?;

    if ctx.output.is_json() {
        ctx.output.json(product);
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("ID", product.id.as_str());
    ctx.output.kv("Category", product.category.display_name());
    ctx.output.kv("Price", &product.price.display());
    if let Some(description) = &product.description {
        ctx.output.kv("About", description);
    }
    if !product.sizes.is_empty() {
        ctx.output.kv("Sizes", &product.sizes.join(", "));
    }

    match &product.customization {
        Some(schema) if !schema.options.is_empty() => {
            ctx.output.header("Options");
            let widths = [24, 24, 34, 8];
            ctx.output.table_row(&["KEY", "OPTION", "VALUES", "DEFAULT"], &widths);
            for option in &schema.options {
                let values = option.kind.describe();
                let default = option.default.to_string();
                ctx.output.table_row(
                    &[
                        option.key.as_str(),
                        option.label.as_str(),
                        values.as_str(),
                        default.as_str(),
                    ],
                    &widths,
                );
            }
            println!();
            ctx.output.info(&format!(
                "In `tailor shop`: add {} --size <size> --opt key=value",
                product.id
            ));
        }
        _ => ctx.output.info("This product is sold as-is."),
    }

    Ok(())
}
