//! Kubernetes / container-runtime version compatibility
//!
//! Every release of the provisioning playbooks is validated against a fixed
//! set of Kubernetes package versions, and each of those maps to exactly one
//! CRI-O minor version. Anything outside the table is rejected up front so a
//! bad pairing never reaches the generated manifests.

use crate::error::{KubeforgeError, KubeforgeResult};

/// Kubernetes package versions this release knows how to provision, paired
/// with the short label shown in user-facing listings.
pub const SUPPORTED_KUBERNETES_VERSIONS: &[(&str, &str)] =
    &[("1.28.4-1.1", "1.28.4"), ("1.28.2-00", "1.28.2")];

/// Look up the CRI-O version matching a Kubernetes package version.
///
/// Returns `None` when the version is not covered by the compatibility
/// table.
pub fn cri_version_for(kubernetes_version: &str) -> Option<&'static str> {
    match kubernetes_version {
        "1.28.2-00" | "1.28.4-1.1" => Some("1.28"),
        _ => None,
    }
}

/// Resolve the CRI-O version for a Kubernetes package version, failing with
/// [`KubeforgeError::UnsupportedVersion`] when the table has no entry.
pub fn resolve_cri_version(kubernetes_version: &str) -> KubeforgeResult<&'static str> {
    cri_version_for(kubernetes_version).ok_or_else(|| KubeforgeError::UnsupportedVersion {
        version: kubernetes_version.to_string(),
    })
}

/// True when the Kubernetes package version is covered by the table.
pub fn is_supported(kubernetes_version: &str) -> bool {
    cri_version_for(kubernetes_version).is_some()
}
