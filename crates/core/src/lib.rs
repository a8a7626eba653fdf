#![forbid(unsafe_code)]

pub mod config;
pub mod dom;
pub mod error;
pub mod model;
pub mod page;

pub use error::Error;
