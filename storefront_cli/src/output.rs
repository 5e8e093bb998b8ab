use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use storefront_lib::types::{Category, CategoryOption, EntitySummary, Product};
use storefront_lib::validation::format_price;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

/// Rows that know how to print themselves in every output format.
pub trait Render: Sized {
    fn render(items: &[Self], format: &OutputFormat) -> Result<()>;
}

#[derive(Tabled, Serialize)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Nome")]
    #[serde(rename = "Nome")]
    name: String,
    #[tabled(rename = "Descrição")]
    #[serde(rename = "Descrição")]
    description: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Imagem")]
    #[serde(rename = "Imagem")]
    image: String,
    #[tabled(rename = "Atualizada em")]
    #[serde(rename = "Atualizada em")]
    updated_at: String,
}

#[derive(Tabled, Serialize)]
struct ProductRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Nome")]
    #[serde(rename = "Nome")]
    name: String,
    #[tabled(rename = "Preço")]
    #[serde(rename = "Preço")]
    price: String,
    #[tabled(rename = "Estoque")]
    #[serde(rename = "Estoque")]
    stock: i64,
    #[tabled(rename = "SKU")]
    #[serde(rename = "SKU")]
    sku: String,
    #[tabled(rename = "Categoria")]
    #[serde(rename = "Categoria")]
    category: String,
    #[tabled(rename = "Destaque")]
    #[serde(rename = "Destaque")]
    featured: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
}

#[derive(Tabled, Serialize)]
struct OptionRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Nome")]
    #[serde(rename = "Nome")]
    name: String,
}

// -- Row builders --

fn build_category_rows(categories: &[Category]) -> Vec<CategoryRow> {
    categories
        .iter()
        .map(|c| CategoryRow {
            id: c.id.clone(),
            name: c.name.clone(),
            description: c.description.clone(),
            status: c.status().to_string(),
            image: c.image.clone().unwrap_or_default(),
            updated_at: c.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        })
        .collect()
}

fn build_product_rows(products: &[Product]) -> Vec<ProductRow> {
    products
        .iter()
        .map(|p| ProductRow {
            id: p.id.clone(),
            name: p.name.clone(),
            price: format_price(p.price),
            stock: p.stock_quantity,
            sku: p.sku.clone().unwrap_or_default(),
            category: p.category_id.clone().unwrap_or_default(),
            featured: if p.is_featured { "sim" } else { "não" }.to_string(),
            status: p.status().to_string(),
        })
        .collect()
}

fn build_option_rows(options: &[CategoryOption]) -> Vec<OptionRow> {
    options
        .iter()
        .map(|o| OptionRow {
            id: o.id.clone(),
            name: o.name.clone(),
        })
        .collect()
}

// -- Shared printers --

fn print_rows<T: Tabled + Serialize, D: Serialize>(
    rows: Vec<T>,
    data: &D,
    format: &OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => write_json(std::io::stdout().lock(), data)?,
    }
    Ok(())
}

/// Pretty JSON followed by a newline; the shape is described by
/// `schema/*.schema.json`.
fn write_json<W: Write, T: Serialize>(mut out: W, data: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, data)?;
    writeln!(out)?;
    Ok(())
}

impl Render for Category {
    fn render(items: &[Self], format: &OutputFormat) -> Result<()> {
        print_rows(build_category_rows(items), &items, format)
    }
}

impl Render for Product {
    fn render(items: &[Self], format: &OutputFormat) -> Result<()> {
        print_rows(build_product_rows(items), &items, format)
    }
}

pub fn print_category_options(options: &[CategoryOption], format: &OutputFormat) -> Result<()> {
    print_rows(build_option_rows(options), &options, format)
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
