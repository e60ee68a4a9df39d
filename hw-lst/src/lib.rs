//! Core types and source loading for land-surface-temperature heat-wave
//! detection.
//!
//! Everything downstream of this crate works on already-normalized
//! [`reading::Reading`] records; column sniffing, date parsing and
//! caching of raw tables stay here.

pub mod cache;
pub mod error;
pub mod event;
pub mod filter;
pub mod percentile;
pub mod reading;
pub mod region;
pub mod schema;
pub mod source;
pub mod summary;

pub use error::{LstError, Result};
