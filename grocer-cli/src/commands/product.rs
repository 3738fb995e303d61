//! Product commands - search, register, assign to a warehouse

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use grocer_core::domain::{AssignmentForm, ProductForm};
use grocer_core::{LogEvent, LoggingService, Product};
use serde_json::json;

use super::{field_with_default, get_context, log_event, optional_field, required_field};
use crate::output;

#[derive(Subcommand)]
pub enum ProductCommands {
    /// Search products by name (blank lists everything)
    Search {
        /// Product name or part of it
        term: Option<String>,
        /// Only show products in stock
        #[arg(long)]
        in_stock: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Register a new product
    Register {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        manufacturer: Option<String>,
        /// Initial quantity (defaults to 0)
        #[arg(long)]
        quantity: Option<String>,
        #[arg(long)]
        base_price: Option<String>,
        /// Absolute URL of a product image
        #[arg(long)]
        image_url: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Stock a product in a warehouse
    Assign {
        /// Warehouse ID (UUID)
        #[arg(long)]
        warehouse_id: Option<String>,
        /// Product ID (UUID)
        #[arg(long)]
        product_id: Option<String>,
        #[arg(long)]
        base_price: Option<String>,
        /// Discount percentage (0-100)
        #[arg(long)]
        discount: Option<String>,
        #[arg(long)]
        quantity: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(logger: &Option<LoggingService>, command: ProductCommands) -> Result<()> {
    match command {
        ProductCommands::Search { term, in_stock, json } => {
            run_search(logger, term, in_stock, json)
        }
        ProductCommands::Register {
            name,
            manufacturer,
            quantity,
            base_price,
            image_url,
            json,
        } => {
            let form = ProductForm {
                product_name: required_field(name, "Product name")?,
                manufacturer_name: required_field(manufacturer, "Manufacturer")?,
                quantity: optional_field(quantity, "Quantity (default 0)")?,
                base_price: required_field(base_price, "Base price")?,
                product_image_link: optional_field(image_url, "Image URL (optional)")?,
            };
            run_register(logger, form, json)
        }
        ProductCommands::Assign {
            warehouse_id,
            product_id,
            base_price,
            discount,
            quantity,
            json,
        } => {
            let form = AssignmentForm {
                warehouse_id: required_field(warehouse_id, "Warehouse ID")?,
                product_id: required_field(product_id, "Product ID")?,
                base_price: required_field(base_price, "Base price")?,
                discount: field_with_default(discount, "Discount %", "0")?,
                total_quantity: required_field(quantity, "Total quantity")?,
            };
            run_assign(logger, form, json)
        }
    }
}

fn stock_label(product: &Product) -> String {
    if product.in_stock() {
        format!("{} left", product.total_quantity)
    } else {
        "Out of stock".red().to_string()
    }
}

fn run_search(
    logger: &Option<LoggingService>,
    term: Option<String>,
    in_stock: bool,
    json: bool,
) -> Result<()> {
    let ctx = get_context(logger)?;
    let term = term.unwrap_or_default();

    let mut products = output::with_spinner("Searching...", json, || {
        ctx.catalog_service.search(&term)
    })?;
    if in_stock {
        products.retain(Product::in_stock);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&products)?);
        return Ok(());
    }

    if products.is_empty() {
        println!("No products found.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Product", "Manufacturer", "Price", "Stock", "Product ID"]);
    for product in &products {
        let price = if product.has_discount() {
            format!(
                "{} ({} -{}%)",
                output::format_price(product.discounted_price()),
                output::format_price(product.base_price).dimmed(),
                product.effective_discount().normalize()
            )
        } else {
            output::format_price(product.base_price)
        };
        table.add_row(vec![
            product.product_name.clone(),
            product.manufacturer_name.clone(),
            price,
            stock_label(product),
            product.pid.clone(),
        ]);
    }
    println!("{}", table);
    println!("{} product(s)", products.len());
    Ok(())
}

fn run_register(logger: &Option<LoggingService>, form: ProductForm, json: bool) -> Result<()> {
    let ctx = get_context(logger)?;

    output::with_spinner("Registering product...", json, || {
        ctx.catalog_service.register_product(&form)
    })?;
    log_event(logger, LogEvent::new("product_registered").with_command("product register"));

    if json {
        println!("{}", json!({ "registered": true, "productName": form.product_name.trim() }));
    } else {
        output::success(&format!("Product '{}' registered.", form.product_name.trim()));
    }
    Ok(())
}

fn run_assign(logger: &Option<LoggingService>, form: AssignmentForm, json: bool) -> Result<()> {
    let ctx = get_context(logger)?;

    output::with_spinner("Assigning product...", json, || {
        ctx.catalog_service.assign_to_warehouse(&form)
    })?;
    log_event(logger, LogEvent::new("product_assigned").with_command("product assign"));

    if json {
        println!(
            "{}",
            json!({
                "assigned": true,
                "warehouseId": form.warehouse_id.trim(),
                "productId": form.product_id.trim(),
            })
        );
    } else {
        output::success("Product assigned to warehouse.");
    }
    Ok(())
}
