//! Request validation
//!
//! A declarative schema layer checked against incoming JSON bodies before a
//! service is invoked. Schemas are built from reusable validator closures;
//! failures produce a structured list of field-level errors and the request
//! never reaches the data layer.

pub mod extractor;
pub mod schema;
pub mod validators;

pub use extractor::{Validate, ValidatedJson};
pub use schema::Schema;
