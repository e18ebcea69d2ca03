mod exchange_gateway;

pub use exchange_gateway::{CredentialStatus, ExchangeGateway};
