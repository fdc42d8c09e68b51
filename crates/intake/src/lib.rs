//! Headless intake form engine.
//!
//! [`FormController`](controller::FormController) owns the record, runs the
//! submit lifecycle and drives the debounced birthplace autocomplete in
//! [`suggestions`]. Renderers observe it through the [`bus`] and the
//! [`view`] snapshot.

pub mod bus;
pub mod config;
pub mod controller;
pub mod suggestions;
pub mod telemetry;
pub mod view;
