//! Heat-wave detection over land-surface-temperature series.
//!
//! The pipeline is pure: readings in, per-region events and summaries out.
//!
//! 1. [`calibration`] turns a distribution of readings into a percentile
//!    threshold.
//! 2. [`extraction`] finds maximal runs of readings at or above the
//!    threshold and keeps those lasting at least
//!    [`hw_lst::event::MIN_EVENT_DURATION`] readings.
//! 3. [`aggregation`] rolls the events of a region into a summary.
//!
//! [`pipeline::run`] applies the month/year filters and drives the three
//! steps for every region.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use hw_data::{aggregation::summarize, extraction::extract_events};
//! use hw_lst::reading::Reading;
//!
//! let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
//! let series: Vec<Reading> = [5.0, 6.0, 10.0, 11.0, 12.0, 6.0]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, v)| Reading::new("Pajeú", start + chrono::Duration::days(i as i64), *v))
//!     .collect();
//!
//! let events = extract_events(&series, 9.0);
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].duration, 3);
//!
//! let summary = summarize("Pajeú", &events);
//! assert_eq!(summary.max_duration, 3);
//! ```

pub mod aggregation;
pub mod calibration;
pub mod config;
pub mod extraction;
pub mod indicators;
pub mod pipeline;
pub mod seasonality;
