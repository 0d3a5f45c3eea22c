//! Client for the remote subdomain API

mod http;
mod traits;
mod types;

pub use http::ApiClient;
pub use traits::SubdomainApi;
pub use types::{Envelope, SubdomainRecord, SubdomainSpec};
