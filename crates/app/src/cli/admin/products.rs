use std::{io, path::PathBuf};

use clap::{ArgAction, Args, Subcommand};
use mesa::{
    catalog::{Catalog, CategoryId, ProductId},
    prices::Price,
};
use mesa_app::{
    api::{ImageUpload, ProductFilter, ProductInput},
    render,
};
use rust_decimal::Decimal;

use crate::cli::Context;

#[derive(Debug, Args)]
pub(crate) struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// List products
    List {
        /// Only products in this category
        #[arg(long)]
        category: Option<CategoryId>,

        /// Include hidden and unavailable products
        #[arg(long)]
        all: bool,
    },

    /// Create a product
    Create(ProductArgs),

    /// Replace a product
    Update {
        /// Product id
        id: ProductId,

        #[command(flatten)]
        product: ProductArgs,
    },

    /// Delete a product
    Delete {
        /// Product id
        id: ProductId,
    },

    /// Show or hide a product
    Toggle {
        /// Product id
        id: ProductId,
    },
}

#[derive(Debug, Args)]
struct ProductArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Description
    #[arg(long)]
    description: Option<String>,

    /// Unit price
    #[arg(long)]
    price: Decimal,

    /// Owning category
    #[arg(long)]
    category: CategoryId,

    /// List the product on the menu
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    active: bool,

    /// Allow the product to be ordered
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    available: bool,

    /// Image file to upload
    #[arg(long)]
    image: Option<PathBuf>,
}

impl ProductArgs {
    async fn into_input(self) -> Result<ProductInput, String> {
        let image = match &self.image {
            Some(path) => Some(
                ImageUpload::read(path)
                    .await
                    .map_err(|error| format!("failed to read {}: {error}", path.display()))?,
            ),
            None => None,
        };

        Ok(ProductInput {
            name: self.name,
            description: self.description,
            price: Price::new(self.price),
            category_id: self.category,
            is_active: self.active,
            is_available: self.available,
            image,
        })
    }
}

pub(crate) async fn run(context: &Context, command: ProductsCommand) -> Result<(), String> {
    let store = &context.store;

    match command.command {
        ProductsSubcommand::List { category, all } => {
            let products = store
                .load_products(ProductFilter {
                    category,
                    active: !all,
                    available: !all,
                })
                .await
                .map_err(|error| format!("failed to list products: {error}"))?;

            let catalog = Catalog {
                products,
                ..store.state().catalog
            };

            render::write_menu(io::stdout().lock(), &catalog, context.currency)
                .map_err(|error| error.to_string())?;
        }
        ProductsSubcommand::Create(args) => {
            let product = store
                .create_product(args.into_input().await?)
                .await
                .map_err(|error| format!("failed to create product: {error}"))?;

            println!("product_id: {}", product.id);
        }
        ProductsSubcommand::Update { id, product } => {
            store
                .update_product(id, product.into_input().await?)
                .await
                .map_err(|error| format!("failed to update product: {error}"))?;
        }
        ProductsSubcommand::Delete { id } => {
            store
                .delete_product(id)
                .await
                .map_err(|error| format!("failed to delete product: {error}"))?;
        }
        ProductsSubcommand::Toggle { id } => {
            store
                .toggle_product(id)
                .await
                .map_err(|error| format!("failed to toggle product: {error}"))?;
        }
    }

    if let Some(message) = store.state().ui.success() {
        println!("{message}");
    }

    Ok(())
}
