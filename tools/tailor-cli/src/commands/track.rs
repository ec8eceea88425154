//! Order tracking command.

use anyhow::Result;
use tailor_commerce::CommerceError;

use super::TrackArgs;
use crate::context::Context;

/// Run the track command.
pub async fn run(args: TrackArgs, ctx: &Context) -> Result<()> {
    let order = match ctx.tracker.lookup(&args.order) {
        Ok(order) => order,
        Err(CommerceError::OrderNotFound(number)) => {
            ctx.output.warn(&format!(
                "Order {} not found. Please check the number and try again.",
                number
            ));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if ctx.output.is_json() {
        let stages: Vec<_> = order
            .stages()
            .into_iter()
            .map(|(stage, state)| serde_json::json!({ "stage": stage, "state": state }))
            .collect();
        ctx.output
            .json(&serde_json::json!({ "order": order, "stages": stages }));
        return Ok(());
    }

    ctx.output.header(&format!("Order {}", order.order_number));
    ctx.output.kv("Customer", &order.customer);
    ctx.output.kv("Items", &order.items.join(", "));
    ctx.output
        .kv("Placed", &order.placed_on.format("%b %d, %Y").to_string());
    ctx.output.kv(
        "Estimated delivery",
        &order.estimated_delivery.format("%b %d, %Y").to_string(),
    );
    if let Some(stage) = order.current_stage() {
        ctx.output
            .kv("Status", &format!("{} - {}", stage.title, stage.description));
    }

    println!();
    for (stage, state) in order.stages() {
        ctx.output.stage(stage.title, state);
    }

    Ok(())
}
