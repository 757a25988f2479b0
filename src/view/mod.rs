//! Derived view logic.
//!
//! Pure functions over the current record list: status buckets, tallies,
//! status filtering and text rendering. Nothing here mutates state or
//! performs I/O.

mod filter;
mod format;
mod status;

pub use filter::{filter_by_status, StatusFilter, UnknownFilter};
pub use format::{format_date, format_price, render_detail, render_stats, render_table};
pub use status::{
    counts_by_status, inventory_value, status_from_levels, status_of, stock_value,
    StatusCounts, StockStatus,
};

#[cfg(test)]
pub(crate) fn test_record(id: &str, quantity: u32, min_quantity: u32) -> crate::record::Record {
    use chrono::{TimeZone, Utc};

    let created = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    crate::record::Record {
        id: id.to_string(),
        created_at: created,
        updated_at: created,
        name: format!("Item {id}"),
        sku: format!("SKU-{id}"),
        category: crate::record::Category::Autres,
        quantity,
        min_quantity,
        price: 1.0,
        supplier: None,
        description: None,
    }
}
