pub mod collector;
pub mod commands;
pub mod composer;
pub mod error;
pub mod product;
pub mod runtime;

pub use error::InfoError;
