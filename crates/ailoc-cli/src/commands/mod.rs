pub mod missing;
pub mod schema;
pub mod translate;
