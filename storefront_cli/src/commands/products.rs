use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use storefront_lib::validation::ProductDraft;
use storefront_lib::{Client, Products};

use super::ListArgs;
use crate::output::OutputFormat;

/// Route of the products list view.
pub const ROUTE: &str = "/produtos";

#[derive(Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductCommand,
}

/// Form fields. Numbers are taken as typed, e.g. `--price "R$ 12,90"`.
#[derive(Args, Clone, Debug, Default)]
pub struct ProductFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Price, masked ("R$ 1.234,56") or plain ("1234.56")
    #[arg(long)]
    pub price: Option<String>,
    #[arg(long)]
    pub stock: Option<String>,
    /// Category id, see `categories options`
    #[arg(long)]
    pub category_id: Option<String>,
    #[arg(long)]
    pub sku: Option<String>,
    /// Weight in kilograms
    #[arg(long)]
    pub weight: Option<String>,
    #[arg(long)]
    pub dimensions: Option<String>,
    /// Show the product as featured
    #[arg(long)]
    pub featured: Option<bool>,
}

impl ProductFields {
    fn apply(&self, draft: &mut ProductDraft) {
        if let Some(name) = &self.name {
            draft.name = name.clone();
        }
        if let Some(description) = &self.description {
            draft.description = description.clone();
        }
        if let Some(price) = &self.price {
            draft.price = price.clone();
        }
        if let Some(stock) = &self.stock {
            draft.stock_quantity = stock.clone();
        }
        if let Some(category_id) = &self.category_id {
            draft.category_id = Some(category_id.clone());
        }
        if let Some(sku) = &self.sku {
            draft.sku = Some(sku.clone());
        }
        if let Some(weight) = &self.weight {
            draft.weight = Some(weight.clone());
        }
        if let Some(dimensions) = &self.dimensions {
            draft.dimensions = Some(dimensions.clone());
        }
        if let Some(featured) = self.featured {
            draft.is_featured = featured;
        }
    }
}

#[derive(Subcommand)]
pub enum ProductCommand {
    /// List products
    List(ListArgs),
    /// Create a product
    Create {
        #[command(flatten)]
        fields: ProductFields,
        #[command(flatten)]
        view: ListArgs,
    },
    /// Edit a product of the current list view
    Edit {
        #[arg(long)]
        id: String,
        #[command(flatten)]
        fields: ProductFields,
        #[command(flatten)]
        view: ListArgs,
    },
    /// Delete a product
    Delete {
        #[arg(long)]
        id: String,
        #[command(flatten)]
        view: ListArgs,
    },
    /// Activate or deactivate a product
    ToggleStatus {
        #[arg(long)]
        id: String,
        /// The product is currently inactive
        #[arg(long)]
        inactive: bool,
        #[command(flatten)]
        view: ListArgs,
    },
    /// Upload a new product image
    ChangeImage {
        #[arg(long)]
        id: String,
        #[arg(long)]
        file: PathBuf,
        #[command(flatten)]
        view: ListArgs,
    },
}

pub async fn run(args: &ProductsArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    match &args.command {
        ProductCommand::List(view) => super::list::<Products>(client, ROUTE, view, format).await,
        ProductCommand::Create { fields, view } => {
            let mut draft = ProductDraft::default();
            fields.apply(&mut draft);
            super::create::<Products>(client, ROUTE, draft, view, format).await
        }
        ProductCommand::Edit { id, fields, view } => {
            let change = |draft: &mut ProductDraft| fields.apply(draft);
            super::edit::<Products>(client, ROUTE, id, change, view, format).await
        }
        ProductCommand::Delete { id, view } => {
            super::delete::<Products>(client, ROUTE, id, view, format).await
        }
        ProductCommand::ToggleStatus { id, inactive, view } => {
            super::toggle_status::<Products>(client, ROUTE, id, *inactive, view, format).await
        }
        ProductCommand::ChangeImage { id, file, view } => {
            super::change_image::<Products>(client, ROUTE, id, file, view, format).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_only_override_given_values() {
        let mut draft = ProductDraft {
            name: "Suco de uva".to_string(),
            price: "R$ 12,90".to_string(),
            ..ProductDraft::default()
        };
        let fields = ProductFields {
            price: Some("R$ 14,50".to_string()),
            featured: Some(true),
            ..ProductFields::default()
        };
        fields.apply(&mut draft);
        assert_eq!(draft.name, "Suco de uva");
        assert_eq!(draft.price, "R$ 14,50");
        assert!(draft.is_featured);
        assert_eq!(draft.sku, None);
    }
}
