//! rawcol - strict, deterministic validation of raw column declarations
//!
//! A column document is decoded to raw records, each record is dispatched
//! to its variant by the `type` key, every field is checked against its
//! rule, and the collection is checked for unique names.

pub mod cli;
pub mod observability;
pub mod schema;
