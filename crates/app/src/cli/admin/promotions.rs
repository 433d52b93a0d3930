use std::{io, path::PathBuf};

use clap::{ArgAction, Args, Subcommand};
use mesa::catalog::PromotionId;
use mesa_app::{
    api::{ImageUpload, PromotionInput},
    render,
};

use crate::cli::Context;

#[derive(Debug, Args)]
pub(crate) struct PromotionsCommand {
    #[command(subcommand)]
    command: PromotionsSubcommand,
}

#[derive(Debug, Subcommand)]
enum PromotionsSubcommand {
    /// List promotions
    List {
        /// Include inactive promotions
        #[arg(long)]
        all: bool,
    },

    /// Show the promotion currently featured on the menu
    Current,

    /// Create a promotion
    Create(PromotionArgs),

    /// Replace a promotion
    Update {
        /// Promotion id
        id: PromotionId,

        #[command(flatten)]
        promotion: PromotionArgs,
    },

    /// Delete a promotion
    Delete {
        /// Promotion id
        id: PromotionId,
    },

    /// Show or hide a promotion
    Toggle {
        /// Promotion id
        id: PromotionId,
    },
}

#[derive(Debug, Args)]
struct PromotionArgs {
    /// Headline
    #[arg(long)]
    title: String,

    /// Secondary headline
    #[arg(long)]
    subtitle: Option<String>,

    /// Body text
    #[arg(long)]
    description: Option<String>,

    /// Last valid day (YYYY-MM-DD)
    #[arg(long)]
    valid_until: Option<String>,

    /// Call to action label
    #[arg(long)]
    button_text: Option<String>,

    /// Call to action target
    #[arg(long)]
    button_link: Option<String>,

    /// Show the promotion
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    active: bool,

    /// Image file to upload
    #[arg(long)]
    image: Option<PathBuf>,
}

impl PromotionArgs {
    async fn into_input(self) -> Result<PromotionInput, String> {
        let image = match &self.image {
            Some(path) => Some(
                ImageUpload::read(path)
                    .await
                    .map_err(|error| format!("failed to read {}: {error}", path.display()))?,
            ),
            None => None,
        };

        Ok(PromotionInput {
            title: self.title,
            subtitle: self.subtitle,
            description: self.description,
            valid_until: self.valid_until,
            button_text: self.button_text,
            button_link: self.button_link,
            is_active: self.active,
            image,
        })
    }
}

pub(crate) async fn run(context: &Context, command: PromotionsCommand) -> Result<(), String> {
    let store = &context.store;

    match command.command {
        PromotionsSubcommand::List { all } => {
            let promotions = store
                .load_promotions(!all)
                .await
                .map_err(|error| format!("failed to list promotions: {error}"))?;

            render::write_promotions(io::stdout().lock(), &promotions)
                .map_err(|error| error.to_string())?;
        }
        PromotionsSubcommand::Current => {
            let promotion = store
                .load_current_promotion()
                .await
                .map_err(|error| format!("failed to fetch promotion: {error}"))?;

            match promotion {
                Some(promotion) => render::write_promotions(io::stdout().lock(), &[promotion])
                    .map_err(|error| error.to_string())?,
                None => println!("no promotion is featured"),
            }
        }
        PromotionsSubcommand::Create(args) => {
            let promotion = store
                .create_promotion(args.into_input().await?)
                .await
                .map_err(|error| format!("failed to create promotion: {error}"))?;

            println!("promotion_id: {}", promotion.id);
        }
        PromotionsSubcommand::Update { id, promotion } => {
            store
                .update_promotion(id, promotion.into_input().await?)
                .await
                .map_err(|error| format!("failed to update promotion: {error}"))?;
        }
        PromotionsSubcommand::Delete { id } => {
            store
                .delete_promotion(id)
                .await
                .map_err(|error| format!("failed to delete promotion: {error}"))?;
        }
        PromotionsSubcommand::Toggle { id } => {
            store
                .toggle_promotion(id)
                .await
                .map_err(|error| format!("failed to toggle promotion: {error}"))?;
        }
    }

    if let Some(message) = store.state().ui.success() {
        println!("{message}");
    }

    Ok(())
}
