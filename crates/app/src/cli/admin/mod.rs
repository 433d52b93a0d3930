use clap::{Args, Subcommand};

use super::Context;

mod categories;
mod orders;
mod products;
mod promotions;

#[derive(Debug, Args)]
pub(crate) struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Debug, Subcommand)]
enum AdminSubcommand {
    /// Review and progress orders
    Orders(orders::OrdersCommand),

    /// Manage menu categories
    Categories(categories::CategoriesCommand),

    /// Manage menu products
    Products(products::ProductsCommand),

    /// Manage promotional flyers
    Promotions(promotions::PromotionsCommand),
}

pub(crate) async fn run(context: &Context, command: AdminCommand) -> Result<(), String> {
    context.require_session().await?;

    match command.command {
        AdminSubcommand::Orders(command) => orders::run(context, command).await,
        AdminSubcommand::Categories(command) => categories::run(context, command).await,
        AdminSubcommand::Products(command) => products::run(context, command).await,
        AdminSubcommand::Promotions(command) => promotions::run(context, command).await,
    }
}
