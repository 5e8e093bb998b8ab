use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use storefront_lib::validation::CategoryDraft;
use storefront_lib::{Categories, Client};

use super::ListArgs;
use crate::output::{print_category_options, OutputFormat};

/// Route of the categories list view.
pub const ROUTE: &str = "/categorias";

#[derive(Args)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    pub command: CategoryCommand,
}

#[derive(Subcommand)]
pub enum CategoryCommand {
    /// List categories
    List(ListArgs),
    /// Create a category
    Create {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[command(flatten)]
        view: ListArgs,
    },
    /// Edit a category of the current list view
    Edit {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[command(flatten)]
        view: ListArgs,
    },
    /// Delete a category
    Delete {
        #[arg(long)]
        id: String,
        #[command(flatten)]
        view: ListArgs,
    },
    /// Activate or deactivate a category
    ToggleStatus {
        #[arg(long)]
        id: String,
        /// The category is currently inactive
        #[arg(long)]
        inactive: bool,
        #[command(flatten)]
        view: ListArgs,
    },
    /// Upload a new category image
    ChangeImage {
        #[arg(long)]
        id: String,
        #[arg(long)]
        file: PathBuf,
        #[command(flatten)]
        view: ListArgs,
    },
    /// Print the options of the product category selector
    Options,
}

pub async fn run(args: &CategoriesArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    match &args.command {
        CategoryCommand::List(view) => super::list::<Categories>(client, ROUTE, view, format).await,
        CategoryCommand::Create {
            name,
            description,
            view,
        } => {
            let draft = CategoryDraft {
                name: name.clone(),
                description: description.clone(),
            };
            super::create::<Categories>(client, ROUTE, draft, view, format).await
        }
        CategoryCommand::Edit {
            id,
            name,
            description,
            view,
        } => {
            let change = |draft: &mut CategoryDraft| {
                if let Some(name) = name {
                    draft.name = name.clone();
                }
                if let Some(description) = description {
                    draft.description = description.clone();
                }
            };
            super::edit::<Categories>(client, ROUTE, id, change, view, format).await
        }
        CategoryCommand::Delete { id, view } => {
            super::delete::<Categories>(client, ROUTE, id, view, format).await
        }
        CategoryCommand::ToggleStatus { id, inactive, view } => {
            super::toggle_status::<Categories>(client, ROUTE, id, *inactive, view, format).await
        }
        CategoryCommand::ChangeImage { id, file, view } => {
            super::change_image::<Categories>(client, ROUTE, id, file, view, format).await
        }
        CategoryCommand::Options => {
            let options = client.list_category_options().await?;
            print_category_options(&options, format)
        }
    }
}
