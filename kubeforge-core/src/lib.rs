pub mod definition;
pub mod error;
pub mod naming;
pub mod topology;
pub mod types;
pub mod versions;

pub use error::{KubeforgeError, KubeforgeResult, Result};
pub use topology::{role_counts, validate_topology};
pub use versions::{cri_version_for, resolve_cri_version, SUPPORTED_KUBERNETES_VERSIONS};

// Re-export the data model at the crate root for convenience
pub use types::*;
