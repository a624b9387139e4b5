//! HTTP adapter for the remote shortening service.

mod shorten_client;

pub use shorten_client::{HttpShortenClient, SHORTEN_PATH};
