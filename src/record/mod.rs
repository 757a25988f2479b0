//! Inventory record schema.
//!
//! Records mirror the documents held by the remote store. Client payloads
//! ([`NewRecord`], [`RecordPatch`]) carry editable fields only; identity and
//! timestamps belong to the store.

mod form;
mod types;

pub use form::{Field, FieldErrors, FormMode, RecordForm};
pub use types::{
    strip_system_fields, Category, NewRecord, Record, RecordPatch, UnknownCategory,
    DEFAULT_MIN_QUANTITY, RECORD_TYPE,
};
