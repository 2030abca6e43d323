//! Interactive cluster definition form
//!
//! Terminal rendition of the cluster creation form: the cluster section is
//! prompted once, then nodes are added in a loop until the operator stops.
//! The result is an ordinary cluster definition, ready for `generate`.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Password, Select};

use kubeforge_core::error::{KubeforgeError, KubeforgeResult};
use kubeforge_core::types::{
    ClusterConfig, ClusterDefinition, CriOs, NodeConfig, NodeRole, PortsEnv, PortsPolicy,
};
use kubeforge_core::versions::SUPPORTED_KUBERNETES_VERSIONS;

fn prompt_err(e: dialoguer::Error) -> KubeforgeError {
    KubeforgeError::Internal {
        message: format!("Prompt failed: {}", e),
    }
}

/// Run the interactive form and return the collected definition.
pub fn collect_definition() -> KubeforgeResult<ClusterDefinition> {
    let theme = ColorfulTheme::default();

    println!("Cluster settings");
    let cluster = collect_cluster(&theme)?;

    println!();
    let mut nodes = Vec::new();
    loop {
        nodes.push(collect_node(&theme, nodes.len() + 1)?);

        let more = Confirm::with_theme(&theme)
            .with_prompt("Add another node?")
            .default(true)
            .interact()
            .map_err(prompt_err)?;
        if !more {
            break;
        }
    }

    Ok(ClusterDefinition { cluster, nodes })
}

fn collect_cluster(theme: &ColorfulTheme) -> KubeforgeResult<ClusterConfig> {
    let name: String = Input::with_theme(theme)
        .with_prompt("Cluster name")
        .interact_text()
        .map_err(prompt_err)?;

    let storj_secret: String = Input::with_theme(theme)
        .with_prompt("Storj export (access grant)")
        .interact_text()
        .map_err(prompt_err)?;

    let storj_bucket: String = Input::with_theme(theme)
        .with_prompt("Storj bucket")
        .interact_text()
        .map_err(prompt_err)?;

    let pod_cidr: String = Input::with_theme(theme)
        .with_prompt("Pod CIDR")
        .interact_text()
        .map_err(prompt_err)?;

    let version_labels: Vec<&str> = SUPPORTED_KUBERNETES_VERSIONS
        .iter()
        .map(|(_, label)| *label)
        .collect();
    let version_idx = Select::with_theme(theme)
        .with_prompt("K8s version")
        .items(&version_labels)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    let kubernetes_version = SUPPORTED_KUBERNETES_VERSIONS[version_idx].0.to_string();

    let os_choices = [CriOs::XUbuntu2204];
    let os_labels = ["Ubuntu Server 22.04"];
    let os_idx = Select::with_theme(theme)
        .with_prompt("OS")
        .items(&os_labels)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    let cri_os = os_choices[os_idx].clone();

    let env_choices = [PortsEnv::Prod, PortsEnv::Dev];
    let env_labels = ["prod", "dev"];
    let env_idx = Select::with_theme(theme)
        .with_prompt("Ports env")
        .items(&env_labels)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    let ports_env = env_choices[env_idx].clone();

    let project_git_path: String = Input::with_theme(theme)
        .with_prompt("Project git path")
        .interact_text()
        .map_err(prompt_err)?;

    Ok(ClusterConfig {
        name,
        storj_bucket,
        storj_secret,
        pod_cidr,
        kubernetes_version,
        cri_os,
        ports_env,
        project_git_path,
    })
}

fn collect_node(theme: &ColorfulTheme, index: usize) -> KubeforgeResult<NodeConfig> {
    println!("Node {}", index);

    let ansible_host: String = Input::with_theme(theme)
        .with_prompt("SSH endpoint")
        .interact_text()
        .map_err(prompt_err)?;

    let hostname: String = Input::with_theme(theme)
        .with_prompt("Hostname")
        .interact_text()
        .map_err(prompt_err)?;

    let node_ip: String = Input::with_theme(theme)
        .with_prompt("IP")
        .interact_text()
        .map_err(prompt_err)?;

    let physical_env: String = Input::with_theme(theme)
        .with_prompt("Physical environment")
        .interact_text()
        .map_err(prompt_err)?;

    let role_choices = [NodeRole::Master, NodeRole::Worker];
    let role_labels = ["master", "worker"];
    let role_idx = Select::with_theme(theme)
        .with_prompt("Node type")
        .items(&role_labels)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    let role = role_choices[role_idx].clone();

    let ssh_user: String = Input::with_theme(theme)
        .with_prompt("SSH username")
        .interact_text()
        .map_err(prompt_err)?;

    let ssh_password: String = Password::with_theme(theme)
        .with_prompt("SSH password")
        .interact()
        .map_err(prompt_err)?;

    let ssh_key_path: String = Input::with_theme(theme)
        .with_prompt("SSH key path")
        .interact_text()
        .map_err(prompt_err)?;

    let required_ports = Confirm::with_theme(theme)
        .with_prompt("Require network ports configuration?")
        .default(true)
        .interact()
        .map_err(prompt_err)?;

    let ports_choices = [
        PortsPolicy::Master,
        PortsPolicy::Worker,
        PortsPolicy::Both,
        PortsPolicy::All,
    ];
    let ports_labels = ["master", "worker", "both", "all"];
    let ports_idx = Select::with_theme(theme)
        .with_prompt("Network ports to open")
        .items(&ports_labels)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    let open_ports = ports_choices[ports_idx].clone();

    Ok(NodeConfig {
        ansible_host,
        hostname,
        ssh_user,
        ssh_password,
        ssh_key_path,
        node_ip,
        physical_env,
        role,
        required_ports,
        open_ports,
    })
}
