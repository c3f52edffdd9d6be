//! strictrec - A strict, deterministic record validation engine
//!
//! Schemas describe a record's fields (type, range, length, membership,
//! optionality) plus cross-field business rules; the validator produces
//! either an immutable validated instance or exactly one structured error.

pub mod catalog;
pub mod schema;
