//! Controller errors.
//!
//! Only setup and teardown can fail. Faults inside a cycle are absorbed,
//! logged and reported through [`sumo_common::error::CycleFault`].

use sumo_common::config::ConfigError;
use sumo_common::error::DriverError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControllerError {
    /// Configuration could not be loaded or failed validation.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Platform init or shutdown failed.
    #[error("driver error: {0}")]
    Driver(#[from] DriverError),
}
