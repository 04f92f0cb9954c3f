pub mod config;
pub mod polars;
