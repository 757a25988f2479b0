use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::status::{status_of, StockStatus};
use crate::record::Record;

/// Status quick filter applied to the displayed list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    #[default]
    All,
    InStock,
    LowStock,
    OutOfStock,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::InStock,
        StatusFilter::LowStock,
        StatusFilter::OutOfStock,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::InStock => "in-stock",
            StatusFilter::LowStock => "low-stock",
            StatusFilter::OutOfStock => "out-of-stock",
        }
    }

    pub fn matches(self, status: StockStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::InStock => status == StockStatus::Normal,
            StatusFilter::LowStock => status == StockStatus::Low,
            StatusFilter::OutOfStock => status == StockStatus::Rupture,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown filter '{0}' (expected all, in-stock, low-stock or out-of-stock)")]
pub struct UnknownFilter(pub String);

impl FromStr for StatusFilter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "all" => Ok(StatusFilter::All),
            "instock" => Ok(StatusFilter::InStock),
            "lowstock" => Ok(StatusFilter::LowStock),
            "outofstock" => Ok(StatusFilter::OutOfStock),
            _ => Err(UnknownFilter(s.to_string())),
        }
    }
}

/// Records matching `filter`, in their original order.
pub fn filter_by_status(items: &[Record], filter: StatusFilter) -> Vec<Record> {
    if filter == StatusFilter::All {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|record| filter.matches(status_of(record)))
        .cloned()
        .collect()
}
