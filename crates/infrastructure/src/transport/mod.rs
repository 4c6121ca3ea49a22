//! Client side bindings of the endpoint layer.

mod http_client;

pub use http_client::{HttpClient, HttpOperation};
