//! Stock inventory management over a hosted document store.
//!
//! - [`record`]: the record schema and form validation
//! - [`remote`]: the store client
//! - [`inventory`]: the state store driving the list view
//! - [`view`]: status buckets, filtering and rendering

pub mod config;
pub mod inventory;
pub mod logging;
pub mod mvi;
pub mod record;
pub mod remote;
pub mod view;
