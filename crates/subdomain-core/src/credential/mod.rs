//! API key handling

mod resolver;
mod types;

pub use resolver::{resolve_key, store_key};
pub use types::*;
