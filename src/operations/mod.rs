pub mod join;
pub mod label;
pub mod offset;
pub mod query;
pub mod transform;
