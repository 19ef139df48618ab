// Product dataset loading

pub mod csv;
pub mod error;
pub mod markup;

pub use crate::csv::{load_products, load_products_from_str, InputOptions, LoadReport, SkippedRow};
pub use error::LoadError;
