uniffi::setup_scaffolding!();

pub mod common;
pub mod config;
pub mod envelope;
pub mod error;
pub mod gateway;
pub mod logging;

pub use common::*;
pub use config::GatewayConfig;
pub use envelope::*;
pub use error::*;
pub use gateway::RequestGateway;
pub use logging::init_logging;
