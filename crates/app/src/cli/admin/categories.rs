use std::io;

use clap::{ArgAction, Args, Subcommand};
use mesa::catalog::CategoryId;
use mesa_app::{api::CategoryInput, render};

use crate::cli::Context;

#[derive(Debug, Args)]
pub(crate) struct CategoriesCommand {
    #[command(subcommand)]
    command: CategoriesSubcommand,
}

#[derive(Debug, Subcommand)]
enum CategoriesSubcommand {
    /// List categories
    List {
        /// Include inactive categories
        #[arg(long)]
        all: bool,
    },

    /// Create a category
    Create(CategoryArgs),

    /// Replace a category
    Update {
        /// Category id
        id: CategoryId,

        #[command(flatten)]
        category: CategoryArgs,
    },

    /// Delete a category
    Delete {
        /// Category id
        id: CategoryId,
    },

    /// Show or hide a category
    Toggle {
        /// Category id
        id: CategoryId,
    },
}

#[derive(Debug, Args)]
struct CategoryArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Description
    #[arg(long)]
    description: Option<String>,

    /// Show the category on the menu
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    active: bool,
}

impl From<CategoryArgs> for CategoryInput {
    fn from(args: CategoryArgs) -> Self {
        CategoryInput {
            name: args.name,
            description: args.description,
            is_active: args.active,
        }
    }
}

pub(crate) async fn run(context: &Context, command: CategoriesCommand) -> Result<(), String> {
    let store = &context.store;

    match command.command {
        CategoriesSubcommand::List { all } => {
            let categories = store
                .load_categories(!all)
                .await
                .map_err(|error| format!("failed to list categories: {error}"))?;

            render::write_categories(io::stdout().lock(), &categories)
                .map_err(|error| error.to_string())?;
        }
        CategoriesSubcommand::Create(args) => {
            let category = store
                .create_category(args.into())
                .await
                .map_err(|error| format!("failed to create category: {error}"))?;

            println!("category_id: {}", category.id);
        }
        CategoriesSubcommand::Update { id, category } => {
            store
                .update_category(id, category.into())
                .await
                .map_err(|error| format!("failed to update category: {error}"))?;
        }
        CategoriesSubcommand::Delete { id } => {
            store
                .delete_category(id)
                .await
                .map_err(|error| format!("failed to delete category: {error}"))?;
        }
        CategoriesSubcommand::Toggle { id } => {
            store
                .toggle_category(id)
                .await
                .map_err(|error| format!("failed to toggle category: {error}"))?;
        }
    }

    if let Some(message) = store.state().ui.success() {
        println!("{message}");
    }

    Ok(())
}
