use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Document type tag the remote store uses for inventory records.
pub const RECORD_TYPE: &str = "stockItem";

/// Threshold applied when a form does not set one.
pub const DEFAULT_MIN_QUANTITY: u32 = 5;

fn default_min_quantity() -> u32 {
    DEFAULT_MIN_QUANTITY
}

/// Product family an inventory record belongs to.
///
/// Serialized with the display name stored in the remote documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Electricité")]
    Electricite,
    Consommables,
    Visseries,
    Plats,
    #[serde(rename = "Cornières")]
    Cornieres,
    Finissions,
    Autres,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Electricite,
        Category::Consommables,
        Category::Visseries,
        Category::Plats,
        Category::Cornieres,
        Category::Finissions,
        Category::Autres,
    ];

    /// Name as stored in the remote documents.
    pub fn label(self) -> &'static str {
        match self {
            Category::Electricite => "Electricité",
            Category::Consommables => "Consommables",
            Category::Visseries => "Visseries",
            Category::Plats => "Plats",
            Category::Cornieres => "Cornières",
            Category::Finissions => "Finissions",
            Category::Autres => "Autres",
        }
    }

    /// ASCII spelling accepted on the command line.
    fn ascii_name(self) -> &'static str {
        match self {
            Category::Electricite => "electricite",
            Category::Consommables => "consommables",
            Category::Visseries => "visseries",
            Category::Plats => "plats",
            Category::Cornieres => "cornieres",
            Category::Finissions => "finissions",
            Category::Autres => "autres",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Case-insensitive, with or without accents.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.label().to_lowercase() == wanted || c.ascii_name() == wanted)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// One inventory item as held by the remote store.
///
/// `id`, `created_at` and `updated_at` are assigned by the store and are
/// never part of a client payload; see [`NewRecord`] and [`RecordPatch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "_updatedAt")]
    pub updated_at: DateTime<Utc>,
    pub name: String,
    #[serde(default)]
    pub sku: String,
    pub category: Category,
    pub quantity: u32,
    #[serde(default = "default_min_quantity")]
    pub min_quantity: u32,
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Record {
    /// The client-editable part of this record.
    pub fn editable(&self) -> NewRecord {
        NewRecord {
            name: self.name.clone(),
            sku: self.sku.clone(),
            category: self.category,
            quantity: self.quantity,
            min_quantity: self.min_quantity,
            price: self.price,
            supplier: self.supplier.clone(),
            description: self.description.clone(),
        }
    }
}

/// Payload for creating a record: every editable field, no system field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecord {
    pub name: String,
    pub sku: String,
    pub category: Category,
    pub quantity: u32,
    pub min_quantity: u32,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial update. `None` leaves a field untouched.
///
/// For `supplier` and `description`, `Some("")` clears the field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RecordPatch {
    pub fn quantity(quantity: u32) -> Self {
        Self {
            quantity: Some(quantity),
            ..Self::default()
        }
    }

    /// Splits the patch into the fields to set and the optional fields to
    /// remove, keyed by their document names.
    pub fn set_and_unset(&self) -> (Map<String, Value>, Vec<String>) {
        let mut set = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        let mut unset = Vec::new();
        for key in ["supplier", "description"] {
            if matches!(set.get(key), Some(Value::String(s)) if s.is_empty()) {
                set.remove(key);
                unset.push(key.to_string());
            }
        }
        strip_system_fields(&mut set);
        (set, unset)
    }

    /// Applies the patch to a local copy, mirroring what the store does.
    pub fn apply_to(&self, record: &mut Record) {
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(sku) = &self.sku {
            record.sku = sku.clone();
        }
        if let Some(category) = self.category {
            record.category = category;
        }
        if let Some(quantity) = self.quantity {
            record.quantity = quantity;
        }
        if let Some(min_quantity) = self.min_quantity {
            record.min_quantity = min_quantity;
        }
        if let Some(price) = self.price {
            record.price = price;
        }
        if let Some(supplier) = &self.supplier {
            record.supplier = non_empty(supplier);
        }
        if let Some(description) = &self.description {
            record.description = non_empty(description);
        }
    }
}

impl From<NewRecord> for RecordPatch {
    /// A patch that overwrites every editable field, clearing absent
    /// optional ones.
    fn from(payload: NewRecord) -> Self {
        Self {
            name: Some(payload.name),
            sku: Some(payload.sku),
            category: Some(payload.category),
            quantity: Some(payload.quantity),
            min_quantity: Some(payload.min_quantity),
            price: Some(payload.price),
            supplier: Some(payload.supplier.unwrap_or_default()),
            description: Some(payload.description.unwrap_or_default()),
        }
    }
}

/// Removes store-owned keys (`_id`, `_type`, `_createdAt`, ...) from a
/// document body.
pub fn strip_system_fields(document: &mut Map<String, Value>) {
    document.retain(|key, _| !key.starts_with('_'));
}

pub(crate) fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
