// Validation of assembled blocks

pub mod validation;

pub use validation::{BlockValidator, ValidationConfig};
