pub mod bundle;
pub mod descriptor;
pub mod manifest;
pub mod sink;

pub use bundle::{write_bundle, BundleSummary};
pub use descriptor::{ClusterDescriptor, NodeEntry};
pub use manifest::{NodeManifest, NodeVarsGenerator};
pub use sink::{ArtifactSink, DirSink, MemorySink, TarGzSink};

// Re-export core types for convenience
pub use kubeforge_core::error::{KubeforgeError, KubeforgeResult};
pub use kubeforge_core::types::ClusterDefinition;
