//! Interactive shopping session.
//!
//! One cart lives for the length of the session. Each input line is parsed
//! with clap, so `help` and `<command> --help` behave like the top-level CLI.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use anyhow::{bail, Context as _, Result};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use console::{style, Term};
use dialoguer::Confirm;
use tailor_commerce::cart::{AddOutcome, CartStore};
use tailor_commerce::catalog::CatalogProvider;
use tailor_commerce::customization::{Customization, OptionValue};
use tailor_commerce::{CommerceError, LineItemId, ProductId};

use super::ShopArgs;
use crate::context::Context;
use crate::output::truncate;

#[derive(Parser, Debug)]
#[command(name = "shop", no_binary_name = true, disable_version_flag = true)]
struct ShopLine {
    #[command(subcommand)]
    command: ShopCommand,
}

#[derive(Subcommand, Debug)]
enum ShopCommand {
    /// Add a product to the cart
    Add {
        /// Product ID (see `tailor catalog`)
        product: String,

        /// Size label
        #[arg(short, long)]
        size: Option<String>,

        /// Customization option, repeatable (e.g. --opt lapel=peak)
        #[arg(short, long = "opt", value_name = "KEY=VALUE", value_parser = parse_option)]
        opt: Vec<(String, OptionValue)>,

        /// Quantity
        #[arg(short, long, default_value_t = 1)]
        qty: i64,
    },

    /// Remove a line by position or line ID
    #[command(alias = "rm")]
    Remove { line: String },

    /// Set a line's quantity (0 removes it)
    Qty { line: String, quantity: i64 },

    /// Empty the cart
    Clear,

    /// Show the cart
    #[command(alias = "ls")]
    Cart,

    /// Show the cart total
    Total,

    /// Place the order
    Checkout {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

enum Flow {
    Continue,
    Quit,
}

/// Run the shop command.
pub async fn run(args: ShopArgs, ctx: &Context) -> Result<()> {
    let mut input: Box<dyn BufRead> = match &args.script {
        Some(path) => {
            let path = ctx.resolve_path(path);
            let file = File::open(&path)
                .with_context(|| format!("Failed to open script: {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    let session = Session {
        ctx,
        cart: ctx.new_cart(),
        interactive: args.script.is_none() && Term::stdout().is_term() && !ctx.output.is_json(),
        auto_confirm: args.yes,
    };
    let mut updates = session.cart.subscribe();

    if session.interactive {
        ctx.output.header("Tailor Shop");
        ctx.output
            .info("Type `help` for commands, `quit` to leave.");
    }

    let mut buf = String::new();
    loop {
        if session.interactive {
            print!("{} ", style("›").cyan());
            io::stdout().flush()?;
        }

        buf.clear();
        if input.read_line(&mut buf).context("Failed to read command")? == 0 {
            break;
        }
        let line = buf.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let command = match ShopLine::try_parse_from(line.split_whitespace()) {
            Ok(parsed) => parsed.command,
            Err(err) => {
                session.usage(err);
                continue;
            }
        };

        match session.execute(command) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => ctx.output.error(&format!("{:#}", e)),
        }

        if updates.has_changed().unwrap_or(false) {
            let snapshot = updates.borrow_and_update().clone();
            tracing::debug!(
                version = snapshot.version,
                lines = snapshot.len(),
                "Cart snapshot published"
            );
            ctx.output.cart_badge(snapshot.item_count(), &snapshot.total);
        }
    }

    if !session.cart.is_empty() {
        ctx.output.warn(&format!(
            "Leaving with {} item(s) in the cart. Carts are not saved.",
            session.cart.item_count()
        ));
    }

    Ok(())
}

struct Session<'a> {
    ctx: &'a Context,
    cart: CartStore,
    interactive: bool,
    auto_confirm: bool,
}

impl Session<'_> {
    fn execute(&self, command: ShopCommand) -> Result<Flow> {
        match command {
            ShopCommand::Add {
                product,
                size,
                opt,
                qty,
            } => self.add(&product, size.as_deref(), opt, qty)?,
            ShopCommand::Remove { line } => self.remove(&line)?,
            ShopCommand::Qty { line, quantity } => self.set_quantity(&line, quantity)?,
            ShopCommand::Clear => {
                self.cart.clear();
                self.ctx.output.success("Cart cleared");
            }
            ShopCommand::Cart => self.show_cart(),
            ShopCommand::Total => self.show_total(),
            ShopCommand::Checkout { yes } => self.checkout(yes)?,
            ShopCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn usage(&self, err: clap::Error) {
        match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                print!("{}", err);
            }
            _ => self.ctx.output.error(err.to_string().trim_end()),
        }
    }

    fn add(
        &self,
        product_id: &str,
        size: Option<&str>,
        options: Vec<(String, OptionValue)>,
        quantity: i64,
    ) -> Result<()> {
        let product = self.ctx.catalog.require(&ProductId::new(product_id))?;
        let selections: Customization = options.into_iter().collect();
        let item = product.configure(size, &selections, quantity)?;

        let spinner = self.ctx.output.spinner("Adding to cart...");
        let added = self.cart.add_item(item);
        spinner.finish_and_clear();

        match added? {
            AddOutcome::Added { .. } => self
                .ctx
                .output
                .success(&format!("Added {} to your cart", product.name)),
            AddOutcome::Merged { quantity, .. } => self.ctx.output.success(&format!(
                "Same {} already in your cart; quantity is now {}",
                product.name, quantity
            )),
        }
        Ok(())
    }

    /// Accept a 1-based cart position or a raw line ID.
    fn resolve_line(&self, raw: &str) -> Result<LineItemId> {
        let lines = self.cart.lines();
        if let Ok(position) = raw.parse::<usize>() {
            return match position.checked_sub(1).and_then(|i| lines.get(i)) {
                Some(line) => Ok(line.id.clone()),
                None => bail!("No line {} in the cart ({} lines)", position, lines.len()),
            };
        }
        Ok(LineItemId::new(raw))
    }

    fn remove(&self, raw: &str) -> Result<()> {
        let line_id = self.resolve_line(raw)?;
        if self.cart.remove_item(&line_id) {
            self.ctx.output.success("Removed from cart");
        } else {
            self.ctx
                .output
                .warn(&format!("No cart line with ID {}", line_id));
        }
        Ok(())
    }

    fn set_quantity(&self, raw: &str, quantity: i64) -> Result<()> {
        let line_id = self.resolve_line(raw)?;
        if self.cart.update_quantity(&line_id, quantity)? {
            self.ctx.output.success("Quantity updated");
        } else {
            self.ctx
                .output
                .warn(&format!("No cart line with ID {}", line_id));
        }
        Ok(())
    }

    fn show_cart(&self) {
        let snapshot = self.cart.snapshot();

        if self.ctx.output.is_json() {
            self.ctx.output.json(&snapshot);
            return;
        }

        if snapshot.is_empty() {
            self.ctx
                .output
                .info("Your cart is empty. Browse with `tailor catalog`.");
            return;
        }

        self.ctx.output.header("Your Cart");
        let widths = [3, 20, 8, 36, 4, 10, 10];
        self.ctx.output.table_row(
            &["#", "ITEM", "SIZE", "OPTIONS", "QTY", "PRICE", "SUBTOTAL"],
            &widths,
        );
        for (i, line) in snapshot.lines.iter().enumerate() {
            let position = (i + 1).to_string();
            let options = truncate(&line.customization.to_string(), 36);
            let quantity = line.quantity.to_string();
            let price = line.unit_price.display();
            let subtotal = line
                .line_total()
                .map(|m| m.display())
                .unwrap_or_default();
            self.ctx.output.table_row(
                &[
                    position.as_str(),
                    line.name.as_str(),
                    line.size.as_deref().unwrap_or("-"),
                    options.as_str(),
                    quantity.as_str(),
                    price.as_str(),
                    subtotal.as_str(),
                ],
                &widths,
            );
        }
        println!();
        self.ctx.output.kv("Total", &snapshot.total.display());
    }

    fn show_total(&self) {
        let total = self.cart.compute_total();
        if self.ctx.output.is_json() {
            self.ctx.output.json(&serde_json::json!({
                "total": total.display_amount(),
                "currency": total.currency.code(),
                "items": self.cart.item_count(),
            }));
            return;
        }
        self.ctx.output.kv("Total", &total.display());
    }

    fn checkout(&self, yes: bool) -> Result<()> {
        if self.cart.is_empty() {
            return Err(CommerceError::EmptyCart.into());
        }

        if self.interactive && !yes && !self.auto_confirm {
            let total = self.cart.compute_total();
            let confirmed = Confirm::new()
                .with_prompt(format!("Place order for {}?", total.display()))
                .default(true)
                .interact()?;

            if !confirmed {
                self.ctx.output.warn("Checkout cancelled");
                return Ok(());
            }
        }

        let summary = self.cart.checkout()?;

        if self.ctx.output.is_json() {
            self.ctx.output.json(&summary);
            return Ok(());
        }

        self.ctx
            .output
            .success(&format!("Order {} placed", summary.order_id));
        self.ctx.output.kv("Items", &summary.item_count.to_string());
        self.ctx.output.kv("Total", &summary.total.display());
        self.ctx.output.kv(
            "Placed",
            &summary.placed_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        );
        self.ctx.output.info(
            "No payment is taken here; a tailor will contact you to confirm measurements.",
        );
        Ok(())
    }
}

fn parse_option(raw: &str) -> Result<(String, OptionValue), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err("option key is empty".to_string());
    }
    Ok((key.to_string(), OptionValue::parse_literal(value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TailorConfig;
    use crate::output::Output;
    use tailor_commerce::catalog::StaticCatalog;
    use tailor_commerce::tracking::OrderTracker;
    use tailor_commerce::Currency;

    fn context() -> Context {
        let config = TailorConfig::default();
        Context {
            catalog: StaticCatalog::tailoring(Currency::USD),
            tracker: OrderTracker::sample(),
            config,
            config_path: None,
            output: Output::new(false, true),
            cwd: std::env::temp_dir(),
        }
    }

    fn parse(line: &str) -> ShopCommand {
        ShopLine::try_parse_from(line.split_whitespace())
            .unwrap()
            .command
    }

    #[test]
    fn test_parse_add() {
        match parse("add suit-navy --size 40R --opt lapel=peak -o monogram.enabled=true --qty 2") {
            ShopCommand::Add {
                product,
                size,
                opt,
                qty,
            } => {
                assert_eq!(product, "suit-navy");
                assert_eq!(size.as_deref(), Some("40R"));
                assert_eq!(qty, 2);
                assert_eq!(opt.len(), 2);
                assert_eq!(opt[1], ("monogram.enabled".to_string(), OptionValue::Flag(true)));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!(ShopLine::try_parse_from("add suit-navy --opt lapel".split_whitespace()).is_err());
        assert!(ShopLine::try_parse_from("dance".split_whitespace()).is_err());
        assert!(matches!(parse("exit"), ShopCommand::Quit));
        assert!(matches!(parse("ls"), ShopCommand::Cart));
    }

    #[test]
    fn test_parse_option() {
        assert_eq!(
            parse_option("buttons=3").unwrap(),
            ("buttons".to_string(), OptionValue::Number(3.0))
        );
        assert!(parse_option("=peak").is_err());
        assert!(parse_option("peak").is_err());
    }

    #[test]
    fn test_session_merges_and_removes() {
        let ctx = context();
        let session = Session {
            ctx: &ctx,
            cart: ctx.new_cart(),
            interactive: false,
            auto_confirm: true,
        };

        let run = |line: &str| session.execute(parse(line)).unwrap();
        run("add suit-navy --size 40R --opt lapel=peak");
        run("add suit-navy --size 40r --opt lapel=peak --qty 2");
        run("add shirt-oxford --size M");
        assert_eq!(session.cart.line_count(), 2);
        assert_eq!(session.cart.item_count(), 4);

        run("qty 2 3");
        assert_eq!(session.cart.lines()[1].quantity, 3);

        run("remove 1");
        assert_eq!(session.cart.line_count(), 1);
        assert_eq!(session.cart.lines()[0].name, "Oxford Shirt");

        assert!(session.execute(parse("remove 9")).is_err());
        run("remove not-a-line");
        assert_eq!(session.cart.line_count(), 1);
    }

    #[test]
    fn test_session_rejects_invalid_selection() {
        let ctx = context();
        let session = Session {
            ctx: &ctx,
            cart: ctx.new_cart(),
            interactive: false,
            auto_confirm: true,
        };

        assert!(session.execute(parse("add suit-navy")).is_err());
        assert!(session
            .execute(parse("add suit-navy --size 40R --opt lapel=wide"))
            .is_err());
        assert!(session.execute(parse("add hat --size M")).is_err());
        assert!(session.cart.is_empty());
    }

    #[test]
    fn test_session_checkout_clears_cart() {
        let ctx = context();
        let session = Session {
            ctx: &ctx,
            cart: ctx.new_cart(),
            interactive: false,
            auto_confirm: false,
        };

        assert!(session.execute(parse("checkout")).is_err());
        assert!(session
            .execute(parse("add fabric-kente --size 6-yards"))
            .is_err());
        session.execute(parse("add fabric-kente --size 6YD")).unwrap();
        session.execute(parse("add accessory-tie")).unwrap();
        assert_eq!(session.cart.compute_total().amount_cents, 12400);
        session.execute(parse("checkout")).unwrap();
        assert!(session.cart.is_empty());

        assert!(matches!(
            session.execute(parse("quit")).unwrap(),
            Flow::Quit
        ));
    }
}
