pub mod json;
pub mod memory;
