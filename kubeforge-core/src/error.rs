use thiserror::Error;

#[derive(Error, Debug)]
pub enum KubeforgeError {
    #[error("{message}")]
    Validation { message: String },

    #[error("the Kubernetes version '{version}' is not compatible with the container runtime versions supported by this release; choose a supported Kubernetes version")]
    UnsupportedVersion { version: String },

    #[error("Template error: {message}")]
    Template { message: String },

    #[error("Serialization operation '{operation}' failed")]
    Serialization {
        operation: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid cluster definition: {message}")]
    InvalidDefinition { message: String },

    #[error("Artifact error: {message}")]
    Artifact { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

pub type Result<T> = std::result::Result<T, KubeforgeError>;
pub type KubeforgeResult<T> = std::result::Result<T, KubeforgeError>;
