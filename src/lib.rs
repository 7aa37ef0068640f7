pub mod config;
pub mod descriptor;
pub mod errors;
pub mod index;
pub mod output;
pub mod resolution;
pub mod types;
