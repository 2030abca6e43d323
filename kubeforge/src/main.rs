use std::path::{Path, PathBuf};

use clap::Parser;

use kubeforge_core::error::{KubeforgeError, KubeforgeResult};
use kubeforge_core::naming;
use kubeforge_core::topology::{role_counts, validate_topology};
use kubeforge_core::types::ClusterDefinition;
use kubeforge_core::versions::{
    cri_version_for, resolve_cri_version, SUPPORTED_KUBERNETES_VERSIONS,
};
use kubeforge_gen::sink::TarGzSink;
use kubeforge_gen::write_bundle;

mod form;

#[derive(Parser)]
#[command(name = "kubeforge")]
#[command(about = "Kubernetes cluster provisioning bundle generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Generate the provisioning bundle for a cluster definition
    Generate {
        /// Cluster definition file (TOML, YAML, or JSON)
        #[arg(long)]
        cluster: String,

        /// Directory the archive is written into
        #[arg(long, default_value = ".", conflicts_with = "output")]
        output_dir: String,

        /// Exact archive path, overriding the derived name
        #[arg(long)]
        output: Option<String>,
    },
    /// Validate a cluster definition without writing anything
    Check {
        /// Cluster definition file (TOML, YAML, or JSON)
        #[arg(long)]
        cluster: String,
    },
    /// Create a cluster definition file interactively
    Init {
        /// Definition file to write
        #[arg(long, default_value = "cluster.toml")]
        output: String,
    },
    /// List supported Kubernetes versions
    Versions,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> KubeforgeResult<()> {
    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(
        "kubeforge=info"
            .parse()
            .map_err(|e| KubeforgeError::Internal {
                message: format!("Invalid log directive: {}", e),
            })?,
    );

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            cluster,
            output_dir,
            output,
        } => handle_generate(&cluster, &output_dir, output.as_deref()),
        Commands::Check { cluster } => handle_check(&cluster),
        Commands::Init { output } => handle_init(&output),
        Commands::Versions => {
            handle_versions();
            Ok(())
        }
    }
}

fn handle_generate(
    cluster_file: &str,
    output_dir: &str,
    output: Option<&str>,
) -> KubeforgeResult<()> {
    let definition = ClusterDefinition::load_from_file(cluster_file)?;

    let archive_path = match output {
        Some(path) => PathBuf::from(path),
        None => Path::new(output_dir).join(naming::archive_file_name(&definition.cluster.name)),
    };
    tracing::debug!("Writing bundle archive to {:?}", archive_path);

    let mut sink = TarGzSink::new(&archive_path);
    let summary = write_bundle(&definition, &mut sink)?;

    println!(
        "Successfully generated bundle for cluster '{}'",
        summary.cluster_name
    );
    println!("  Archive: {}", archive_path.display());
    println!("  Descriptor: {}", summary.descriptor_file);
    println!("  Manifests: {}", summary.manifest_files.len());
    println!(
        "  Nodes: {} masters, {} workers",
        summary.master_count, summary.worker_count
    );
    println!(
        "  Kubernetes {} / CRI-O {}",
        definition.cluster.kubernetes_version, summary.cri_version
    );

    Ok(())
}

fn handle_check(cluster_file: &str) -> KubeforgeResult<()> {
    let definition = ClusterDefinition::load_from_file(cluster_file)?;
    validate_topology(&definition.nodes)?;
    let cri_version = resolve_cri_version(&definition.cluster.kubernetes_version)?;
    let (masters, workers) = role_counts(&definition.nodes);

    println!("Cluster '{}' is ready to generate", definition.cluster.name);
    println!("  Nodes: {} masters, {} workers", masters, workers);
    println!(
        "  Kubernetes {} / CRI-O {}",
        definition.cluster.kubernetes_version, cri_version
    );

    Ok(())
}

fn handle_init(output: &str) -> KubeforgeResult<()> {
    let definition = form::collect_definition()?;
    definition.save_to_file(output)?;

    let (masters, workers) = role_counts(&definition.nodes);
    println!("Cluster definition written to {}", output);
    println!("  Nodes: {} masters, {} workers", masters, workers);
    if let Err(e) = validate_topology(&definition.nodes) {
        eprintln!("Warning: {}", e);
    }
    println!(
        "Generate the bundle with: kubeforge generate --cluster {}",
        output
    );

    Ok(())
}

fn handle_versions() {
    println!("Supported Kubernetes versions:");
    for (version, label) in SUPPORTED_KUBERNETES_VERSIONS {
        let cri = cri_version_for(version).unwrap_or("-");
        println!("  - {} (package {}, CRI-O {})", label, version, cri);
    }
}
