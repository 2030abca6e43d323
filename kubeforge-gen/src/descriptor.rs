//! Cluster descriptor document
//!
//! The descriptor is the single JSON file the provisioning entrypoint reads:
//! the full node list plus the first master's manifest path and SSH password
//! hoisted to the top level, so the entrypoint can reach the control plane
//! without scanning the node list itself.
//!
//! Field order below is the wire order the provisioning scripts were written
//! against. Do not reorder.

use serde::{Deserialize, Serialize};

use kubeforge_core::error::{KubeforgeError, KubeforgeResult};
use kubeforge_core::naming;
use kubeforge_core::types::{ClusterDefinition, NodeConfig, NodeRole};

/// One node as the provisioning entrypoint sees it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeEntry {
    pub node_type: String,
    pub ssh_user_password: String,
    pub path_vars_ansible_file: String,
    pub hostname: String,
    pub ip: String,
    pub physical_env: String,
    pub ssh_username: String,
    pub ssh_key_path: String,
    pub net_ports_conf: String,
    pub ports_open_method: String,
    pub ansible_host: String,
}

impl NodeEntry {
    pub fn from_node(cluster_name: &str, node: &NodeConfig) -> Self {
        Self {
            node_type: node.role.to_string(),
            ssh_user_password: node.ssh_password.clone(),
            path_vars_ansible_file: naming::group_vars_path(cluster_name, &node.hostname),
            hostname: node.hostname.clone(),
            ip: node.node_ip.clone(),
            physical_env: node.physical_env.clone(),
            ssh_username: node.ssh_user.clone(),
            ssh_key_path: node.ssh_key_path.clone(),
            net_ports_conf: node.required_ports.to_string(),
            ports_open_method: node.open_ports.to_string(),
            ansible_host: node.ansible_host.clone(),
        }
    }
}

/// The cluster descriptor document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClusterDescriptor {
    pub path_vars_file_master_node_ansible: String,
    pub ssh_user_password_master_node: String,
    pub cluster_name: String,
    pub storj_bucket_name: String,
    pub storj_export: String,
    pub kubeconfig_setup: String,
    pub pod_cidr: String,
    pub k8s_version: String,
    pub cri_version: String,
    pub cri_os: String,
    pub ports_env: String,
    pub project_git_path: String,
    pub nodes_to_configure: Vec<NodeEntry>,
    pub nodes_to_add: Vec<NodeEntry>,
}

impl ClusterDescriptor {
    /// Build the descriptor for a cluster definition.
    ///
    /// The first master in the node list supplies the top-level manifest
    /// path and SSH password. Callers are expected to have validated the
    /// topology already; without a master both hoisted fields come out
    /// empty.
    pub fn build(definition: &ClusterDefinition, cri_version: &str) -> Self {
        let cluster = &definition.cluster;

        let first_master = definition
            .nodes
            .iter()
            .find(|node| node.role == NodeRole::Master);
        let (master_hostname, master_password) = match first_master {
            Some(node) => (node.hostname.as_str(), node.ssh_password.as_str()),
            None => ("", ""),
        };

        Self {
            path_vars_file_master_node_ansible: naming::group_vars_path(
                &cluster.name,
                master_hostname,
            ),
            ssh_user_password_master_node: master_password.to_string(),
            cluster_name: cluster.name.clone(),
            storj_bucket_name: cluster.storj_bucket.clone(),
            storj_export: cluster.storj_secret.clone(),
            kubeconfig_setup: "true".to_string(),
            pod_cidr: cluster.pod_cidr.clone(),
            k8s_version: cluster.kubernetes_version.clone(),
            cri_version: cri_version.to_string(),
            cri_os: cluster.cri_os.to_string(),
            ports_env: cluster.ports_env.to_string(),
            project_git_path: cluster.project_git_path.clone(),
            nodes_to_configure: definition
                .nodes
                .iter()
                .map(|node| NodeEntry::from_node(&cluster.name, node))
                .collect(),
            nodes_to_add: Vec::new(),
        }
    }

    /// Serialize as the pretty-printed JSON the provisioning scripts consume.
    pub fn to_json_pretty(&self) -> KubeforgeResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| KubeforgeError::Serialization {
            operation: "serialize cluster descriptor".to_string(),
            source: Box::new(e),
        })
    }
}
