pub mod error;
pub mod loader;
pub mod queries;
pub(crate) mod schema;
