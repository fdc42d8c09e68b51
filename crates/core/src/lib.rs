//! Domain model for the Naamkaran customer intake form.
//!
//! Holds the form record, its field catalogue, the dependent-field
//! transition table, the paid-service price list, and the pure validation
//! rules. Nothing in this crate performs I/O.

pub mod error;
pub mod fields;
pub mod pricing;
pub mod record;
pub mod transitions;
pub mod types;
pub mod validation;
