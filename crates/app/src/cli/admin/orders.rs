use std::io;

use clap::{Args, Subcommand};
use mesa::orders::{OrderId, OrderStatus};
use mesa_app::{api::OrderFilter, render};

use crate::cli::Context;

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List orders, newest first
    List(ListOrdersArgs),

    /// Show one order
    Show {
        /// Order id
        id: OrderId,
    },

    /// Move an order to a new status
    Status {
        /// Order id
        id: OrderId,

        /// New status (pending, preparing, ready, delivered)
        status: OrderStatus,
    },
}

#[derive(Debug, Args)]
struct ListOrdersArgs {
    /// Only orders with this status
    #[arg(long)]
    status: Option<OrderStatus>,

    /// Page size
    #[arg(long, default_value_t = 50)]
    limit: u32,

    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    page: u32,
}

pub(crate) async fn run(context: &Context, command: OrdersCommand) -> Result<(), String> {
    let store = &context.store;

    match command.command {
        OrdersSubcommand::List(args) => {
            let page = store
                .load_orders(OrderFilter {
                    status: args.status,
                    limit: args.limit,
                    page: args.page,
                })
                .await
                .map_err(|error| format!("failed to list orders: {error}"))?;

            render::write_orders(io::stdout().lock(), &page.items, context.currency)
                .map_err(|error| error.to_string())?;

            if let Some(pagination) = page.pagination {
                println!(
                    "page {} of {} ({} orders)",
                    pagination.page, pagination.pages, pagination.total
                );
            }

            Ok(())
        }
        OrdersSubcommand::Show { id } => {
            let order = store
                .get_order(id)
                .await
                .map_err(|error| format!("failed to fetch order: {error}"))?;

            render::write_order(io::stdout().lock(), &order, context.currency)
                .map_err(|error| error.to_string())
        }
        OrdersSubcommand::Status { id, status } => {
            let order = store
                .update_order_status(id, status)
                .await
                .map_err(|error| format!("failed to update order: {error}"))?;

            println!("order {} is now {}", order.id, order.status);

            Ok(())
        }
    }
}
