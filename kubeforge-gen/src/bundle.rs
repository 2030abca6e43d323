//! Bundle assembly pipeline
//!
//! One call takes a cluster definition through validation, version
//! resolution, and rendering, then stages the descriptor and every node
//! manifest into an [`ArtifactSink`] and finalizes it. Nothing reaches the
//! sink unless the definition passes every check first.

use tracing::info;

use kubeforge_core::error::KubeforgeResult;
use kubeforge_core::naming;
use kubeforge_core::topology::{role_counts, validate_topology};
use kubeforge_core::types::ClusterDefinition;
use kubeforge_core::versions::resolve_cri_version;

use crate::descriptor::ClusterDescriptor;
use crate::manifest::NodeVarsGenerator;
use crate::sink::ArtifactSink;

/// What a bundle run produced, for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct BundleSummary {
    pub cluster_name: String,
    pub descriptor_file: String,
    pub manifest_files: Vec<String>,
    pub master_count: usize,
    pub worker_count: usize,
    pub cri_version: String,
}

/// Validate a definition and write its full bundle into `sink`.
///
/// The descriptor is staged first, then one manifest per node in definition
/// order. The sink is finalized before returning.
pub fn write_bundle(
    definition: &ClusterDefinition,
    sink: &mut dyn ArtifactSink,
) -> KubeforgeResult<BundleSummary> {
    validate_topology(&definition.nodes)?;
    let cri_version = resolve_cri_version(&definition.cluster.kubernetes_version)?;

    let generator = NodeVarsGenerator::new()?;
    let manifests = generator.generate(definition, cri_version)?;

    let descriptor = ClusterDescriptor::build(definition, cri_version);
    let descriptor_json = descriptor.to_json_pretty()?;

    let descriptor_file = naming::descriptor_file_name(&definition.cluster.name);
    sink.add_file(&descriptor_file, descriptor_json.as_bytes())?;

    let mut manifest_files = Vec::with_capacity(manifests.len());
    for manifest in &manifests {
        sink.add_file(&manifest.file_name, manifest.content.as_bytes())?;
        manifest_files.push(manifest.file_name.clone());
    }

    sink.finish()?;

    let (master_count, worker_count) = role_counts(&definition.nodes);
    info!(
        "Bundle generated for cluster {}: {} manifests, {} masters, {} workers",
        definition.cluster.name,
        manifest_files.len(),
        master_count,
        worker_count
    );

    Ok(BundleSummary {
        cluster_name: definition.cluster.name.clone(),
        descriptor_file,
        manifest_files,
        master_count,
        worker_count,
        cri_version: cri_version.to_string(),
    })
}
