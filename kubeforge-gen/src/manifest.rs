//! Per-node Ansible variable manifest generation
//!
//! Each node in a cluster definition gets one `group_vars` YAML file rendered
//! from a fixed template. Every manifest embeds a JSON table of all hostnames
//! and IPs in the cluster, escaped so the provisioning scripts can splice it
//! into shell commands verbatim.

use serde::Serialize;
use tera::{Context, Tera};
use tracing::debug;

use kubeforge_core::error::{KubeforgeError, KubeforgeResult};
use kubeforge_core::naming;
use kubeforge_core::types::{ClusterConfig, ClusterDefinition, NodeConfig};

/// One rendered node manifest, named and ready for an artifact sink.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeManifest {
    pub file_name: String,
    pub content: String,
}

#[derive(Serialize)]
struct HostTableEntry<'a> {
    hostname: &'a str,
    ip: &'a str,
}

#[derive(Serialize)]
struct HostTable<'a> {
    hostnames: Vec<HostTableEntry<'a>>,
}

pub struct NodeVarsGenerator {
    tera: Tera,
}

impl NodeVarsGenerator {
    pub fn new() -> KubeforgeResult<Self> {
        let mut tera = Tera::default();

        // The template ships inside the binary so generation never depends on
        // a checkout layout.
        let template_content = include_str!("../templates/node_vars.yml");
        tera.add_raw_template("node_vars.yml", template_content)
            .map_err(|e| KubeforgeError::Template {
                message: format!("Failed to add template: {}", e),
            })?;

        Ok(Self { tera })
    }

    /// Build the escaped JSON host table embedded in every manifest.
    ///
    /// The table always covers the full node list, masters included. The
    /// init scripts on each node expect to see the whole cluster, so this
    /// must not be narrowed to workers.
    pub fn host_table_json(nodes: &[NodeConfig]) -> KubeforgeResult<String> {
        let table = HostTable {
            hostnames: nodes
                .iter()
                .map(|node| HostTableEntry {
                    hostname: &node.hostname,
                    ip: &node.node_ip,
                })
                .collect(),
        };

        let json = serde_json::to_string(&table).map_err(|e| KubeforgeError::Serialization {
            operation: "serialize host table".to_string(),
            source: Box::new(e),
        })?;

        // Each quote gains three leading backslashes so the value survives
        // both YAML parsing and the shell interpolation done by the
        // provisioning scripts.
        Ok(json.replace('"', r#"\\\""#))
    }

    /// Render the variables manifest for a single node.
    pub fn render(
        &self,
        cluster: &ClusterConfig,
        node: &NodeConfig,
        cri_version: &str,
        host_table: &str,
    ) -> KubeforgeResult<String> {
        let mut context = Context::new();

        context.insert("ansible_host", &node.ansible_host);
        context.insert("node_name", &node.hostname);
        context.insert("node_ssh_user", &node.ssh_user);
        context.insert("ssh_private_key_path", &node.ssh_key_path);
        context.insert("storj_secret", &cluster.storj_secret);
        context.insert("storj_bucket", &cluster.storj_bucket);
        context.insert("cluster_name", &cluster.name);

        context.insert("k8s_version", &cluster.kubernetes_version);
        context.insert("cri_version", cri_version);
        context.insert("cri_os", &cluster.cri_os.to_string());
        context.insert("required_ports", &node.required_ports.to_string());
        context.insert(
            "open_ports_for_master_or_worker",
            &node.open_ports.to_string(),
        );
        context.insert("json_hostnames", host_table);

        context.insert("node_type", &node.role.to_string());
        context.insert("node_ip", &node.node_ip);
        context.insert("pod_cidr", &cluster.pod_cidr);

        context.insert("env", &cluster.ports_env.to_string());
        context.insert("local_path_git", &cluster.project_git_path);

        self.tera
            .render("node_vars.yml", &context)
            .map_err(|e| KubeforgeError::Template {
                message: format!("Failed to render node variables template: {}", e),
            })
    }

    /// Render one manifest per node, in definition order.
    pub fn generate(
        &self,
        definition: &ClusterDefinition,
        cri_version: &str,
    ) -> KubeforgeResult<Vec<NodeManifest>> {
        let host_table = Self::host_table_json(&definition.nodes)?;

        let mut manifests = Vec::with_capacity(definition.nodes.len());
        for node in &definition.nodes {
            let content = self.render(&definition.cluster, node, cri_version, &host_table)?;
            let file_name = naming::manifest_file_name(&node.hostname);

            debug!(
                "Node variables manifest created for {}: {}/{}",
                node.hostname,
                definition.cluster.project_git_path,
                naming::group_vars_path(&definition.cluster.name, &node.hostname)
            );

            manifests.push(NodeManifest { file_name, content });
        }

        Ok(manifests)
    }
}
