pub mod build;
pub mod map;
