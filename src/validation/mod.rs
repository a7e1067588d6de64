//! # Validation Module
//!
//! Plan-time checks for declared resource configuration. `data_json` is the
//! only field with content rules: it must decode to a JSON object, and its
//! stored form is the canonical serialization produced here.

pub mod data_json;

pub use data_json::{
    canonical_json_string, canonicalize_data_json, normalize_data_json, validate_data_json,
};
