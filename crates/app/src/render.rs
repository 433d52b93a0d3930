//! Text rendering of menus, carts and orders.

use std::{io, ops::Range};

use mesa::{
    cart::Cart,
    catalog::{Catalog, Category, CategoryId, Promotion},
    orders::Order,
    prices::Price,
};
use rusty_money::iso::Currency;
use tabled::{
    Table,
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

/// Rendering Errors
#[derive(Debug, Error)]
pub enum RenderError {
    /// Output could not be written
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

fn finish(builder: Builder, amounts: Range<usize>) -> Table {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(amounts), Alignment::right());

    table
}

fn category_name<'a>(catalog: &'a Catalog, id: Option<&CategoryId>) -> &'a str {
    id.and_then(|id| catalog.categories.iter().find(|category| &category.id == id))
        .map_or("", |category| category.name.as_str())
}

/// Write the menu: the featured promotion, then every product.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn write_menu(
    mut out: impl io::Write,
    catalog: &Catalog,
    currency: &'static Currency,
) -> Result<(), RenderError> {
    if let Some(promotion) = catalog.active_promotion() {
        writeln!(out, "{}", promotion_banner(promotion))?;
    }

    if catalog.products.is_empty() {
        writeln!(out, "The menu is empty.")?;
        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Id", "Product", "Category", "Price", "Available"]);

    for product in &catalog.products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            category_name(catalog, product.category_id.as_ref()).to_string(),
            product.price.format(currency),
            yes_no(product.is_available).to_string(),
        ]);
    }

    writeln!(out, "{}", finish(builder, 3..4))?;

    Ok(())
}

fn promotion_banner(promotion: &Promotion) -> String {
    match &promotion.subtitle {
        Some(subtitle) => format!("★ {}: {subtitle}", promotion.title),
        None => format!("★ {}", promotion.title),
    }
}

/// Write the category list.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn write_categories(mut out: impl io::Write, categories: &[Category]) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Name", "Description", "Active"]);

    for category in categories {
        builder.push_record([
            category.id.to_string(),
            category.name.clone(),
            category.description.clone().unwrap_or_default(),
            yes_no(category.is_active).to_string(),
        ]);
    }

    writeln!(out, "{}", finish(builder, 0..1))?;

    Ok(())
}

/// Write the promotion list.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn write_promotions(
    mut out: impl io::Write,
    promotions: &[Promotion],
) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Title", "Valid Until", "Active", "Image"]);

    for promotion in promotions {
        builder.push_record([
            promotion.id.to_string(),
            promotion.title.clone(),
            promotion.valid_until.clone().unwrap_or_default(),
            yes_no(promotion.is_active).to_string(),
            promotion.image.clone().unwrap_or_default(),
        ]);
    }

    writeln!(out, "{}", finish(builder, 0..1))?;

    Ok(())
}

/// Write the cart lines and total.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn write_cart(
    mut out: impl io::Write,
    cart: &Cart,
    currency: &'static Currency,
) -> Result<(), RenderError> {
    if cart.is_empty() {
        writeln!(out, "The cart is empty.")?;
        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Product", "Qty", "Unit Price", "Line Total"]);

    for line in cart.lines() {
        builder.push_record([
            line.name.clone(),
            line.quantity().to_string(),
            line.unit_price.format(currency),
            line.line_total().format(currency),
        ]);
    }

    writeln!(out, "{}", finish(builder, 1..4))?;
    writeln!(
        out,
        " Items: {}  Total: {}",
        cart.item_count(),
        cart.total().format(currency)
    )?;

    Ok(())
}

/// Write a summary row per order.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn write_orders(
    mut out: impl io::Write,
    orders: &[Order],
    currency: &'static Currency,
) -> Result<(), RenderError> {
    if orders.is_empty() {
        writeln!(out, "No orders.")?;
        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Id", "Customer", "Phone", "Total", "Payment", "Status", "Created"]);

    for order in orders {
        builder.push_record([
            order.id.to_string(),
            format!("{} {}", order.customer.first_name, order.customer.last_name),
            order.customer.phone.clone(),
            order.total.format(currency),
            order.payment_method.to_string(),
            order.status.to_string(),
            order.created_at.clone().unwrap_or_default(),
        ]);
    }

    writeln!(out, "{}", finish(builder, 3..4))?;

    Ok(())
}

/// Write one order with its lines.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn write_order(
    mut out: impl io::Write,
    order: &Order,
    currency: &'static Currency,
) -> Result<(), RenderError> {
    writeln!(out, "Order {} ({})", order.id, order.status)?;
    writeln!(
        out,
        "Customer: {} {} · {}",
        order.customer.first_name, order.customer.last_name, order.customer.phone
    )?;

    if let Some(address) = &order.address {
        writeln!(out, "Address: {address}")?;
    }

    writeln!(out, "Payment: {}", order.payment_method)?;

    let mut builder = Builder::default();

    builder.push_record(["Product", "Qty", "Price", "Line Total"]);

    for line in &order.items {
        builder.push_record([
            line.name.clone(),
            line.quantity.to_string(),
            line.price.format(currency),
            line.price.times(line.quantity).format(currency),
        ]);
    }

    writeln!(out, "{}", finish(builder, 1..4))?;

    let subtotal: Price = order.items.iter().map(|line| line.price.times(line.quantity)).sum();

    if subtotal != order.total {
        writeln!(out, " Subtotal: {}", subtotal.format(currency))?;
    }

    writeln!(out, " Total: {}", order.total.format(currency))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use mesa::{
        catalog::{Product, ProductId, PromotionId},
        orders::{Customer, OrderId, OrderLine, OrderStatus, PaymentMethod},
    };
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;

    fn product(id: i64, name: &str, price: i64) -> Product {
        Product {
            id: ProductId::from(id),
            name: name.to_string(),
            description: None,
            price: Price::from(price),
            image: None,
            category_id: Some(CategoryId::from(1)),
            is_active: true,
            is_available: true,
        }
    }

    fn render(write: impl FnOnce(&mut Vec<u8>) -> Result<(), RenderError>) -> TestResult<String> {
        let mut out = Vec::new();

        write(&mut out)?;

        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn menu_lists_products_under_their_category() -> TestResult {
        let catalog = Catalog {
            categories: vec![Category {
                id: CategoryId::from(1),
                name: "Pizzas".to_string(),
                description: None,
                is_active: true,
            }],
            products: vec![product(7, "Muzzarella", 9500)],
            promotions: vec![Promotion {
                id: PromotionId::from(1),
                title: "2x1 los martes".to_string(),
                subtitle: Some("Solo pizzas".to_string()),
                description: None,
                image: None,
                is_active: true,
                valid_until: None,
                button_text: None,
                button_link: None,
            }],
        };

        let output = render(|out| write_menu(out, &catalog, iso::ARS))?;

        assert!(output.contains("★ 2x1 los martes: Solo pizzas"), "{output}");
        assert!(output.contains("Muzzarella"), "{output}");
        assert!(output.contains("Pizzas"), "{output}");

        Ok(())
    }

    #[test]
    fn empty_cart_says_so() -> TestResult {
        let output = render(|out| write_cart(out, &Cart::new(), iso::ARS))?;

        assert_eq!(output, "The cart is empty.\n");

        Ok(())
    }

    #[test]
    fn cart_shows_quantities_and_item_count() -> TestResult {
        let mut cart = Cart::new();
        let empanada = product(1, "Empanada", 800);

        cart.add_item(&empanada);
        cart.add_item(&empanada);
        cart.add_item(&product(2, "Flan", 1500));

        let output = render(|out| write_cart(out, &cart, iso::ARS))?;

        assert!(output.contains("Empanada"), "{output}");
        assert!(output.contains("Items: 3"), "{output}");

        Ok(())
    }

    #[test]
    fn order_detail_shows_surcharge_as_subtotal_difference() -> TestResult {
        let order = Order {
            id: OrderId::from("ord-9"),
            customer: Customer {
                first_name: "Ana".to_string(),
                last_name: "Pérez".to_string(),
                phone: "1155551234".to_string(),
            },
            items: vec![OrderLine {
                product_id: ProductId::from(1),
                name: "Empanada".to_string(),
                price: Price::from(800),
                quantity: 2,
            }],
            total: Price::from(1602),
            payment_method: PaymentMethod::Transfer,
            address: Some("Calle 123".to_string()),
            status: OrderStatus::Preparing,
            created_at: None,
        };

        let output = render(|out| write_order(out, &order, iso::ARS))?;

        assert!(output.starts_with("Order ord-9 (preparing)"), "{output}");
        assert!(output.contains("Address: Calle 123"), "{output}");
        assert!(output.contains("Subtotal:"), "{output}");

        Ok(())
    }
}
