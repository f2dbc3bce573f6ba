//! # Maitred Store
//!
//! Data Store Gateway: filtered create/read/update operations against the
//! remote `reservations` and `subscribers` collections, spoken over a
//! query-parameter-based REST protocol (equality predicates, multi-field
//! ordering, return-representation writes).
//!
//! The store is the sole source of truth for both collections; this crate
//! holds no state beyond an HTTP client with bounded timeouts.

mod rest;

pub use rest::RestStore;
