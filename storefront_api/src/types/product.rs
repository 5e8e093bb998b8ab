//! Product types returned by and sent to the `products/*` endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::entity::{EntityId, EntitySummary};

/// A product row as returned by `products/list`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: EntityId,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// Set when the product was deactivated; `None` means active.
    #[serde(default)]
    pub disabled_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,

    pub name: String,

    pub description: String,

    #[serde(default)]
    pub image: Option<String>,

    /// Unit price. Decimal columns may arrive as JSON strings.
    #[serde(deserialize_with = "number_or_string")]
    pub price: f64,

    pub stock_quantity: i64,

    #[serde(default)]
    pub category_id: Option<EntityId>,

    #[serde(default)]
    pub sku: Option<String>,

    /// Weight in kilograms.
    #[serde(default, deserialize_with = "optional_number_or_string")]
    pub weight: Option<f64>,

    /// Free-form `LxAxP` dimensions.
    #[serde(default)]
    pub dimensions: Option<String>,

    #[serde(default)]
    pub is_featured: bool,
}

impl EntitySummary for Product {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
    fn disabled_at(&self) -> Option<DateTime<Utc>> {
        self.disabled_at
    }
    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

/// JSON body of `products/create` and `products/edit`. Optional fields that
/// were left blank are omitted.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock_quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

impl NumberOrString {
    fn into_f64<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            NumberOrString::Number(n) => Ok(n),
            NumberOrString::String(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("invalid number {:?}", s))),
        }
    }
}

fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    NumberOrString::deserialize(deserializer)?.into_f64()
}

fn optional_number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<NumberOrString>::deserialize(deserializer)?
        .map(NumberOrString::into_f64)
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_accepts_decimal_strings() {
        let json = serde_json::json!({
            "id": "p1",
            "name": "Cadeira",
            "description": "Cadeira de madeira",
            "price": "199.90",
            "stock_quantity": 3,
            "weight": "4.5"
        });
        let product: Product = serde_json::from_value(json).unwrap();
        assert_eq!(product.price, 199.90);
        assert_eq!(product.weight, Some(4.5));
        assert!(!product.is_featured);
        assert!(product.disabled_at.is_none());
    }

    #[test]
    fn payload_omits_blank_optionals() {
        let payload = ProductPayload {
            name: "Mesa".to_string(),
            description: "Mesa de jantar".to_string(),
            price: 10.0,
            stock_quantity: 2,
            category_id: None,
            sku: Some("MS-1".to_string()),
            weight: None,
            dimensions: None,
            is_featured: None,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "Mesa",
                "description": "Mesa de jantar",
                "price": 10.0,
                "stock_quantity": 2,
                "sku": "MS-1"
            })
        );
    }
}
