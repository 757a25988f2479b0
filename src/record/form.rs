//! Create/edit form model and its validation.

use std::collections::BTreeMap;
use std::fmt;

use super::types::{non_empty, Category, NewRecord, Record, DEFAULT_MIN_QUANTITY};

/// Whether a submitted form creates a record or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

/// Form fields that carry a validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Sku,
    Category,
    Quantity,
    MinQuantity,
    Price,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Sku => "sku",
            Field::Category => "category",
            Field::Quantity => "quantity",
            Field::MinQuantity => "minQuantity",
            Field::Price => "price",
        }
    }
}

/// Field-level validation failures, ordered by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, String>,
}

impl FieldErrors {
    fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field.as_str(), message)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Raw form input, before validation.
///
/// Numbers are signed so that out-of-range input can be reported instead of
/// being rejected at parse time.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordForm {
    pub name: String,
    pub sku: String,
    pub category: Option<Category>,
    pub quantity: i64,
    pub min_quantity: i64,
    pub price: f64,
    pub supplier: String,
    pub description: String,
}

impl Default for RecordForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            sku: String::new(),
            category: None,
            quantity: 0,
            min_quantity: i64::from(DEFAULT_MIN_QUANTITY),
            price: 0.0,
            supplier: String::new(),
            description: String::new(),
        }
    }
}

impl RecordForm {
    /// Prefills the form for editing an existing record.
    pub fn from_record(record: &Record) -> Self {
        Self {
            name: record.name.clone(),
            sku: record.sku.clone(),
            category: Some(record.category),
            quantity: i64::from(record.quantity),
            min_quantity: i64::from(record.min_quantity),
            price: record.price,
            supplier: record.supplier.clone().unwrap_or_default(),
            description: record.description.clone().unwrap_or_default(),
        }
    }

    /// Checks every rule and builds the write payload.
    ///
    /// Reports all failing fields at once rather than stopping at the first.
    pub fn validate(&self) -> Result<NewRecord, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert(Field::Name, "is required");
        }
        let sku = self.sku.trim();
        if sku.is_empty() {
            errors.insert(Field::Sku, "is required");
        }
        if self.category.is_none() {
            errors.insert(Field::Category, "is required");
        }
        let quantity = count(self.quantity, Field::Quantity, &mut errors);
        let min_quantity = count(self.min_quantity, Field::MinQuantity, &mut errors);
        if !self.price.is_finite() {
            errors.insert(Field::Price, "must be a number");
        } else if self.price < 0.0 {
            errors.insert(Field::Price, "must not be negative");
        }

        match (self.category, quantity, min_quantity) {
            (Some(category), Some(quantity), Some(min_quantity)) if errors.is_empty() => {
                Ok(NewRecord {
                    name: name.to_string(),
                    sku: sku.to_string(),
                    category,
                    quantity,
                    min_quantity,
                    price: self.price,
                    supplier: non_empty(&self.supplier),
                    description: non_empty(&self.description),
                })
            }
            _ => Err(errors),
        }
    }
}

fn count(value: i64, field: Field, errors: &mut FieldErrors) -> Option<u32> {
    if value < 0 {
        errors.insert(field, "must not be negative");
        return None;
    }
    match u32::try_from(value) {
        Ok(v) => Some(v),
        Err(_) => {
            errors.insert(field, "is too large");
            None
        }
    }
}
