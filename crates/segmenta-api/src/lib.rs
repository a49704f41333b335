// segmenta-api: Async Rust client for the campaigns REST backend

pub mod client;
pub mod collection;
pub mod error;
pub mod transport;

pub use client::ResourceClient;
pub use collection::Collection;
pub use error::Error;
pub use transport::TransportConfig;
