use crate::core::catalog::CatalogError;
use crate::engine::config::ConfigError;
use crate::workflows::drop::PayloadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Payload(#[from] PayloadError),
}
