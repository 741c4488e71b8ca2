//! Raw catalog record as returned by the pricing API.
//!
//! Every field the normalizer relies on is optional here. Presence is
//! checked through the accessors below, which turn a missing or mistyped
//! value into [`AppError::MalformedRecord`] instead of a generic decode
//! failure. Unknown fields are kept so a record survives a dump round trip.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AppError, Result};

/// Record identifier used when the SKU itself is missing.
const UNKNOWN_SKU: &str = "<unknown sku>";

/// One catalog record: a SKU's attributes plus its pricing terms.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawProduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<Terms>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Product section of a record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Pricing terms, keyed by purchase model.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Terms {
    /// Term id -> term record, in document order
    #[serde(rename = "OnDemand", default, skip_serializing_if = "Option::is_none")]
    pub on_demand: Option<Map<String, Value>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One term record under `terms.OnDemand`.
#[derive(Debug, Clone, Deserialize)]
pub struct Term {
    #[serde(rename = "effectiveDate")]
    pub effective_date: Option<String>,

    /// Dimension id -> price dimension, in document order
    #[serde(rename = "priceDimensions")]
    pub price_dimensions: Option<Map<String, Value>>,
}

/// One price dimension inside a term.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceDimension {
    pub unit: Option<String>,

    /// Currency code -> price, in document order
    #[serde(rename = "pricePerUnit")]
    pub price_per_unit: Option<Map<String, Value>>,
}

impl RawProduct {
    /// Decode a record from an untyped JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        let id = value
            .pointer("/product/sku")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_SKU)
            .to_string();
        serde_json::from_value(value).map_err(|e| AppError::malformed(id, e))
    }

    /// SKU used to identify the record in errors.
    pub fn id(&self) -> &str {
        self.product
            .as_ref()
            .and_then(|p| p.sku.as_deref())
            .unwrap_or(UNKNOWN_SKU)
    }

    fn attributes(&self) -> Result<&Map<String, Value>> {
        self.product
            .as_ref()
            .and_then(|p| p.attributes.as_ref())
            .ok_or_else(|| AppError::malformed(self.id(), "missing product.attributes"))
    }

    /// Required attribute as text.
    ///
    /// Numbers and booleans are rendered as their JSON text.
    pub fn attr(&self, key: &str) -> Result<String> {
        match self.optional_attr(key)? {
            Some(value) => Ok(value),
            None => Err(AppError::malformed(
                self.id(),
                format!("missing attribute '{key}'"),
            )),
        }
    }

    /// Optional attribute as text.
    ///
    /// Only a missing key is absent; an explicit `null` is malformed.
    pub fn optional_attr(&self, key: &str) -> Result<Option<String>> {
        match self.attributes()?.get(key) {
            None => Ok(None),
            Some(Value::Null) => Err(AppError::malformed(
                self.id(),
                format!("attribute '{key}' is null"),
            )),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(Some(v.to_string())),
            Some(_) => Err(AppError::malformed(
                self.id(),
                format!("attribute '{key}' is not a scalar"),
            )),
        }
    }

    /// First on-demand term in document order.
    pub fn first_on_demand_term(&self) -> Result<Term> {
        let terms = self
            .terms
            .as_ref()
            .and_then(|t| t.on_demand.as_ref())
            .ok_or_else(|| AppError::malformed(self.id(), "missing terms.OnDemand"))?;
        let (term_id, value) = terms
            .iter()
            .next()
            .ok_or_else(|| AppError::malformed(self.id(), "terms.OnDemand is empty"))?;

        serde_json::from_value(value.clone())
            .map_err(|e| AppError::malformed(self.id(), format!("term {term_id}: {e}")))
    }
}

impl Term {
    /// First price dimension in document order.
    pub fn first_price_dimension(&self, id: &str) -> Result<PriceDimension> {
        let dimensions = self
            .price_dimensions
            .as_ref()
            .ok_or_else(|| AppError::malformed(id, "term has no priceDimensions"))?;
        let (dimension_id, value) = dimensions
            .iter()
            .next()
            .ok_or_else(|| AppError::malformed(id, "term has no price dimensions"))?;

        serde_json::from_value(value.clone()).map_err(|e| {
            AppError::malformed(id, format!("price dimension {dimension_id}: {e}"))
        })
    }
}

impl PriceDimension {
    /// Billing unit of the dimension, e.g. `Hrs`.
    pub fn unit(&self, id: &str) -> Result<&str> {
        self.unit
            .as_deref()
            .ok_or_else(|| AppError::malformed(id, "price dimension has no unit"))
    }

    /// First currency and its price, parsed as a number.
    pub fn first_price(&self, id: &str) -> Result<(String, f64)> {
        let (currency, value) = self
            .price_per_unit
            .as_ref()
            .and_then(|prices| prices.iter().next())
            .ok_or_else(|| AppError::malformed(id, "price dimension has no pricePerUnit"))?;

        let price = match value {
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
        .ok_or_else(|| {
            AppError::malformed(id, format!("unparsable {currency} price: {value}"))
        })?;

        Ok((currency.clone(), price))
    }
}
