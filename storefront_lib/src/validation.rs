//! Input sanitisation and the client-side schemas that gate submissions.

use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;
use storefront_api::types::{CategoryPayload, EntitySummary, Product, ProductPayload};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::AdminError;

pub const MAX_SEARCH_LENGTH: usize = 100;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, AdminError> {
    if input.len() > max_len {
        return Err(AdminError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(AdminError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate search text. Blank input means "no search" rather than an error.
pub fn validate_search(input: &str) -> Result<Option<String>, AdminError> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    sanitize_text(input, MAX_SEARCH_LENGTH).map(Some)
}

/// Parses the currency-masked price input.
///
/// Input carrying the `R$` prefix or a decimal comma follows the Brazilian
/// mask (`R$ 1.234,56`, `1234,5`), where dots group thousands. Otherwise a
/// single dot is a decimal point (`1.234` is 1.234), and only a repeated
/// grouping such as `1.234.567` reads as thousands. Blank input is zero, which
/// the schema then rejects.
pub fn parse_price(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    let (prefixed, unprefixed) = match trimmed.strip_prefix("R$") {
        Some(rest) => (true, rest.trim()),
        None => (false, trimmed),
    };
    if unprefixed.is_empty() {
        return Some(0.0);
    }

    if !prefixed && !unprefixed.contains(',') {
        let plain = Regex::new(r"^\d+(?:\.\d+)?$").ok()?;
        if plain.is_match(unprefixed) {
            return unprefixed.parse::<f64>().ok();
        }
    }

    let masked = Regex::new(r"^(\d{1,3}(?:\.\d{3})+|\d+)(?:,(\d{1,2}))?$").ok()?;
    let cap = masked.captures(unprefixed)?;
    let integer = cap[1].replace('.', "");
    let number = match cap.get(2) {
        Some(fraction) => format!("{}.{}", integer, fraction.as_str()),
        None => integer,
    };
    number.parse::<f64>().ok()
}

/// Field-scoped validation messages, keyed by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message unless the field already has one.
    pub fn insert(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn merge(&mut self, errors: &ValidationErrors) {
        for (field, list) in errors.field_errors() {
            if let Some(message) = list.iter().find_map(|e| e.message.as_ref()) {
                self.insert(&field.to_string(), message);
            }
        }
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

/// Which category schema applies. Editing adds upper bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaMode {
    Create,
    Edit,
}

/// Category form contents as typed by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub description: String,
}

impl CategoryDraft {
    /// Seeds an edit form from the row being edited.
    pub fn from_entity(entity: &impl EntitySummary) -> Self {
        Self {
            name: entity.name().to_string(),
            description: entity.description().to_string(),
        }
    }

    pub fn validate(&self, mode: SchemaMode) -> Result<CategoryPayload, FieldErrors> {
        let payload = CategoryPayload {
            name: self.name.clone(),
            description: self.description.clone(),
        };
        let result = match mode {
            SchemaMode::Create => NewCategoryForm::from(&payload).validate(),
            SchemaMode::Edit => EditCategoryForm::from(&payload).validate(),
        };
        let mut errors = FieldErrors::new();
        if let Err(e) = result {
            errors.merge(&e);
        }
        errors.into_result().map(|()| payload)
    }
}

#[derive(Validate)]
struct NewCategoryForm {
    #[validate(length(min = 3, message = "Nome obrigatório."))]
    name: String,
    #[validate(length(min = 5, message = "Descrição obrigatória."))]
    description: String,
}

impl From<&CategoryPayload> for NewCategoryForm {
    fn from(payload: &CategoryPayload) -> Self {
        Self {
            name: payload.name.clone(),
            description: payload.description.clone(),
        }
    }
}

#[derive(Validate)]
struct EditCategoryForm {
    #[validate(
        length(min = 3, message = "Nome obrigatório."),
        custom(function = "name_within_limit")
    )]
    name: String,
    #[validate(
        length(min = 5, message = "Descrição obrigatória."),
        custom(function = "description_within_limit")
    )]
    description: String,
}

impl From<&CategoryPayload> for EditCategoryForm {
    fn from(payload: &CategoryPayload) -> Self {
        Self {
            name: payload.name.clone(),
            description: payload.description.clone(),
        }
    }
}

fn name_within_limit(name: &str) -> Result<(), ValidationError> {
    max_chars(name, 255, "Nome muito longo.")
}

fn description_within_limit(description: &str) -> Result<(), ValidationError> {
    max_chars(description, 510, "Descrição muito longa.")
}

fn max_chars(value: &str, max: usize, message: &'static str) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::new("length").with_message(message.into()));
    }
    Ok(())
}

/// Product form contents as typed by the user. Numeric fields stay text until
/// validation so masked input survives a failed submit untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    /// Currency-masked price, e.g. `R$ 12,90`.
    pub price: String,
    pub stock_quantity: String,
    pub category_id: Option<String>,
    pub sku: Option<String>,
    pub weight: Option<String>,
    pub dimensions: Option<String>,
    pub is_featured: bool,
}

impl ProductDraft {
    /// Seeds an edit form from the product being edited.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: format_price(product.price),
            stock_quantity: product.stock_quantity.to_string(),
            category_id: product.category_id.clone(),
            sku: product.sku.clone(),
            weight: product.weight.map(|w| w.to_string()),
            dimensions: product.dimensions.clone(),
            is_featured: product.is_featured,
        }
    }

    pub fn validate(&self) -> Result<ProductPayload, FieldErrors> {
        let mut errors = FieldErrors::new();

        let price = parse_price(&self.price).unwrap_or_else(|| {
            errors.insert("price", "Preço inválido.");
            f64::NAN
        });
        let stock_quantity = self.parse_stock(&mut errors);
        let weight = match self.weight.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match raw.replace(',', ".").parse::<f64>() {
                Ok(w) if w.is_finite() => Some(w),
                _ => {
                    errors.insert("weight", "Peso inválido.");
                    None
                }
            },
        };
        let dimensions = self
            .dimensions
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        let form = ProductForm {
            name: self.name.clone(),
            description: self.description.clone(),
            price,
            stock_quantity,
            category_id: self.category_id.clone(),
            sku: self.sku.clone(),
        };
        if let Err(e) = form.validate() {
            errors.merge(&e);
        }
        errors.into_result()?;

        Ok(ProductPayload {
            name: form.name,
            description: form.description,
            price: form.price,
            stock_quantity: form.stock_quantity,
            category_id: form.category_id,
            sku: form.sku,
            weight,
            dimensions,
            is_featured: Some(self.is_featured),
        })
    }

    fn parse_stock(&self, errors: &mut FieldErrors) -> i64 {
        let raw = self.stock_quantity.trim();
        if let Ok(quantity) = raw.parse::<i64>() {
            return quantity;
        }
        errors.insert("stock_quantity", "Quantidade deve ser um número inteiro.");
        0
    }
}

#[derive(Validate)]
struct ProductForm {
    #[validate(length(min = 3, message = "Nome obrigatório."))]
    name: String,
    #[validate(length(min = 5, message = "Descrição obrigatória."))]
    description: String,
    #[validate(range(exclusive_min = 0.0, message = "Preço deve ser maior que zero."))]
    price: f64,
    #[validate(range(min = 1, message = "Quantidade deve ser maior que zero."))]
    stock_quantity: i64,
    #[validate(length(min = 1, message = "Categoria obrigatória."))]
    category_id: Option<String>,
    #[validate(length(min = 1, message = "SKU obrigatório."))]
    sku: Option<String>,
}

/// Renders a price the way the currency mask displays it: `R$ 1.234,50`.
pub fn format_price(price: f64) -> String {
    let cents = (price * 100.0).round() as i64;
    let integer = (cents / 100).abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let sign = if cents < 0 { "-" } else { "" };
    format!("R$ {}{},{:02}", sign, grouped, (cents % 100).abs())
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
