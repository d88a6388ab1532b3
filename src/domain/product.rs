use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Backend-assigned identifier of a product (`item_id` on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Price as the backend reported it.
///
/// The text is kept verbatim for display; [`Price::amount`] gives the numeric
/// value used for billing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Price(String);

impl Price {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the price, or `None` when the text is not a finite number.
    pub fn amount(&self) -> Option<f64> {
        self.0.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Price(text),
            Raw::Number(number) => Price(number_text(&number)),
        })
    }
}

/// Text of a JSON number as a browser would show it: `2.0` becomes `2`.
/// Outside the range browsers print in plain notation the JSON text is kept.
fn number_text(number: &serde_json::Number) -> String {
    match number.as_f64() {
        Some(v) if number.is_f64() && v == 0.0 => "0".to_string(),
        Some(v) if number.is_f64() && (1e-6..1e21).contains(&v.abs()) => v.to_string(),
        _ => number.to_string(),
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A catalog entry as returned by `GET /items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "item_id")]
    pub id: ProductId,
    #[serde(rename = "item")]
    pub name: String,
    pub price: Price,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

impl Product {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        price: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: ProductId(id),
            name: name.into(),
            price: Price::new(price),
            description: description.into(),
        }
    }
}

/// Point-in-time snapshot of the backend's product collection, in backend order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductList(Vec<Product>);

impl ProductList {
    pub fn new(products: Vec<Product>) -> Self {
        Self(products)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.0.iter()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.0.iter().find(|p| p.id == id)
    }
}

impl From<Vec<Product>> for ProductList {
    fn from(products: Vec<Product>) -> Self {
        Self(products)
    }
}

impl<'a> IntoIterator for &'a ProductList {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The three mutable fields of a product, as sent in `POST /items` and
/// `PUT /items/{item_id}` bodies. Also backs the add and edit forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductDraft {
    #[serde(rename = "item")]
    pub name: String,
    pub price: String,
    pub description: String,
}

impl ProductDraft {
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            description: description.into(),
        }
    }
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.as_str().to_string(),
            description: product.description.clone(),
        }
    }
}
