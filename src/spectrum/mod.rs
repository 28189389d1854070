pub mod client;
pub mod connection;
pub mod target;
pub mod types;

pub use client::{SpectrumApi, SpectrumClient};
pub use connection::build_http_client;
pub use target::Target;
