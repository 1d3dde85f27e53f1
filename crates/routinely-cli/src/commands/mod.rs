pub mod config;
pub mod refine;
pub mod simulate;
pub mod validate;
