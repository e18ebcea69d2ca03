pub mod config;
pub mod okx;

pub use config::{AppConfig, ConfigError, Credentials};
pub use okx::{OkxRestClient, RequestSigner, SignedRequest};
