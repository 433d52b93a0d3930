use std::{io, path::PathBuf, str::FromStr};

use clap::Args;
use mesa::{
    catalog::ProductId,
    checkout::{CheckoutForm, prepare},
    orders::PaymentMethod,
};
use mesa_app::{render, store::StoreError};

use super::Context;

/// One `--item` value: a product id with an optional `xN` quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ItemSpec {
    product_id: ProductId,
    quantity: i64,
}

impl FromStr for ItemSpec {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        // Text ids may contain an `x`; only a numeric suffix is a quantity.
        let (id, quantity) = value
            .rsplit_once('x')
            .filter(|(id, _)| !id.is_empty())
            .and_then(|(id, quantity)| Some((id, quantity.parse::<i64>().ok()?)))
            .unwrap_or((value, 1));

        if quantity < 1 {
            return Err(format!("quantity must be at least 1 in {value:?}"));
        }

        let Ok(product_id) = id.parse::<ProductId>();

        Ok(Self {
            product_id,
            quantity,
        })
    }
}

#[derive(Debug, Args)]
pub(crate) struct OrderArgs {
    /// Read the menu from a YAML file instead of the server
    #[arg(long, env = "MENU_FILE")]
    menu: Option<PathBuf>,

    /// Product to order, as `ID` or `IDxQUANTITY`; repeatable
    #[arg(long = "item", required = true)]
    items: Vec<ItemSpec>,

    /// Customer first name
    #[arg(long)]
    first_name: String,

    /// Customer last name
    #[arg(long)]
    last_name: String,

    /// Contact phone
    #[arg(long)]
    phone: String,

    /// Delivery address
    #[arg(long, default_value = "")]
    address: String,

    /// Payment method (cash, transfer)
    #[arg(long, default_value = "cash")]
    payment: PaymentMethod,

    /// Validate and show the order without sending it
    #[arg(long)]
    dry_run: bool,
}

impl OrderArgs {
    fn form(&self) -> CheckoutForm {
        CheckoutForm {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            payment_method: self.payment,
        }
    }
}

fn fill_cart(context: &Context, items: &[ItemSpec]) -> Result<(), String> {
    for item in items {
        let product = context
            .store
            .with_state(|state| state.catalog.product(&item.product_id).cloned())
            .ok_or_else(|| format!("product {} is not on the menu", item.product_id))?;

        if !product.is_available {
            return Err(format!("{} is not available", product.name));
        }

        let quantity = context
            .store
            .with_state(|state| state.cart.get(&item.product_id).map(|line| line.quantity()))
            .map_or(0, i64::from)
            + item.quantity;

        context.store.add_to_cart(product);
        context
            .store
            .update_cart_item(item.product_id.clone(), quantity);
    }

    Ok(())
}

fn describe(error: StoreError) -> String {
    match error {
        StoreError::Checkout(errors) => errors
            .iter()
            .map(|error| format!("{}: {error}", error.field()))
            .collect::<Vec<_>>()
            .join("\n"),
        other => format!("failed to place order: {other}"),
    }
}

pub(crate) async fn run(context: &Context, args: OrderArgs) -> Result<(), String> {
    context.load_catalog(args.menu.as_deref()).await?;

    fill_cart(context, &args.items)?;

    let store = &context.store;
    let mut out = io::stdout().lock();

    store.open_cart().map_err(|error| error.to_string())?;
    render::write_cart(&mut out, &store.state().cart, context.currency)
        .map_err(|error| error.to_string())?;

    store
        .proceed_to_checkout()
        .map_err(|error| error.to_string())?;

    let form = args.form();

    if args.dry_run {
        let draft = store
            .with_state(|state| prepare(&state.cart, &form, store.checkout_policy()))
            .map_err(|errors| describe(StoreError::Checkout(errors)))?;

        println!("order is valid; total {}", draft.total.format(context.currency));

        return store.close().map_err(|error| error.to_string());
    }

    let order = store.place_order(&form).await.map_err(describe)?;

    render::write_order(&mut out, &order, context.currency).map_err(|error| error.to_string())?;

    store
        .acknowledge_order()
        .map_err(|error| error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_without_quantity_orders_one() {
        assert_eq!(
            "12".parse::<ItemSpec>(),
            Ok(ItemSpec {
                product_id: ProductId::from(12),
                quantity: 1,
            })
        );
    }

    #[test]
    fn item_with_quantity_and_text_id() {
        assert_eq!(
            "abc12x3".parse::<ItemSpec>(),
            Ok(ItemSpec {
                product_id: ProductId::from("abc12"),
                quantity: 3,
            })
        );
    }

    #[test]
    fn text_id_containing_x_is_not_split() {
        assert_eq!(
            "wax".parse::<ItemSpec>(),
            Ok(ItemSpec {
                product_id: ProductId::from("wax"),
                quantity: 1,
            })
        );
        assert_eq!(
            "boxx2".parse::<ItemSpec>(),
            Ok(ItemSpec {
                product_id: ProductId::from("box"),
                quantity: 2,
            })
        );
    }

    #[test]
    fn zero_or_negative_quantity_is_rejected() {
        assert!("12x0".parse::<ItemSpec>().is_err(), "zero quantity");
        assert!("12x-3".parse::<ItemSpec>().is_err(), "negative quantity");
    }
}
