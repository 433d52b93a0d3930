use std::{io, path::PathBuf};

use clap::Args;
use mesa::catalog::CategoryId;
use mesa_app::{api::ProductFilter, render};

use super::Context;

#[derive(Debug, Args)]
pub(crate) struct MenuArgs {
    /// Read the menu from a YAML file instead of the server
    #[arg(long, env = "MENU_FILE")]
    menu: Option<PathBuf>,

    /// Only show products in this category
    #[arg(long)]
    category: Option<CategoryId>,
}

pub(crate) async fn run(context: &Context, args: MenuArgs) -> Result<(), String> {
    context.load_catalog(args.menu.as_deref()).await?;

    let mut catalog = context.store.state().catalog;

    if let Some(category) = &args.category {
        catalog.products = if args.menu.is_some() {
            catalog.products_in(category).cloned().collect()
        } else {
            context
                .store
                .load_products(ProductFilter {
                    category: Some(category.clone()),
                    ..ProductFilter::default()
                })
                .await
                .map_err(|error| format!("failed to load products: {error}"))?
        };
    }

    render::write_menu(io::stdout().lock(), &catalog, context.currency)
        .map_err(|error| error.to_string())
}
