use serde::{Deserialize, Serialize};

/// Cluster-wide settings shared by every generated manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClusterConfig {
    pub name: String,
    pub storj_bucket: String,
    pub storj_secret: String,
    pub pod_cidr: String,
    /// Kubernetes package version identifier (e.g. "1.28.4-1.1").
    /// Kept as a free string so unsupported values reach the
    /// compatibility check instead of failing at parse time.
    pub kubernetes_version: String,
    pub cri_os: CriOs,
    pub ports_env: PortsEnv,
    /// Checkout of the playbook repository; used to report where the
    /// generated inventory files are meant to land.
    pub project_git_path: String,
}

/// A single machine participating in the cluster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeConfig {
    /// SSH endpoint Ansible connects to (address or host alias).
    pub ansible_host: String,
    pub hostname: String,
    pub ssh_user: String,
    pub ssh_password: String,
    pub ssh_key_path: String,
    pub node_ip: String,
    pub physical_env: String,
    pub role: NodeRole,
    /// Whether the firewall setup play should run for this node.
    pub required_ports: bool,
    pub open_ports: PortsPolicy,
}

/// The loadable input document: cluster settings plus the ordered node
/// list. Node order is user-entry order and only affects file naming.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClusterDefinition {
    pub cluster: ClusterConfig,
    pub nodes: Vec<NodeConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Master,
    Worker,
}

impl std::fmt::Display for NodeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeRole::Master => write!(f, "master"),
            NodeRole::Worker => write!(f, "worker"),
        }
    }
}

/// Which port set the firewall play opens on a node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum PortsPolicy {
    Master,
    Worker,
    Both,
    All,
}

impl std::fmt::Display for PortsPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortsPolicy::Master => write!(f, "master"),
            PortsPolicy::Worker => write!(f, "worker"),
            PortsPolicy::Both => write!(f, "both"),
            PortsPolicy::All => write!(f, "all"),
        }
    }
}

/// OS flavor the container runtime packages are built for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum CriOs {
    #[serde(rename = "xUbuntu_22.04")]
    XUbuntu2204,
}

impl std::fmt::Display for CriOs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CriOs::XUbuntu2204 => write!(f, "xUbuntu_22.04"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum PortsEnv {
    Prod,
    Dev,
}

impl std::fmt::Display for PortsEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortsEnv::Prod => write!(f, "prod"),
            PortsEnv::Dev => write!(f, "dev"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serialization_is_lowercase() {
        assert_eq!(serde_json::to_string(&NodeRole::Master).unwrap(), "\"master\"");
        assert_eq!(serde_json::to_string(&NodeRole::Worker).unwrap(), "\"worker\"");
    }

    #[test]
    fn test_cri_os_wire_format() {
        assert_eq!(
            serde_json::to_string(&CriOs::XUbuntu2204).unwrap(),
            "\"xUbuntu_22.04\""
        );
        assert_eq!(CriOs::XUbuntu2204.to_string(), "xUbuntu_22.04");
    }

    #[test]
    fn test_ports_policy_display_matches_serde() {
        for policy in [
            PortsPolicy::Master,
            PortsPolicy::Worker,
            PortsPolicy::Both,
            PortsPolicy::All,
        ] {
            let wire = serde_json::to_string(&policy).unwrap();
            assert_eq!(wire, format!("\"{}\"", policy));
        }
    }
}
