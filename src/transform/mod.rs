pub mod error;
pub mod transformer;
