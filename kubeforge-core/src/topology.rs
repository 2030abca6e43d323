//! Minimal topology checks for a submitted node list.
//!
//! A cluster definition is usable by the creation playbooks only when it
//! carries at least one master and at least one worker. Nothing else is
//! checked here: IP formats, hostnames and port values are passed through
//! verbatim.

use crate::error::{KubeforgeError, KubeforgeResult};
use crate::types::{NodeConfig, NodeRole};

/// Number of masters and workers in a node list, in that order.
pub fn role_counts(nodes: &[NodeConfig]) -> (usize, usize) {
    let masters = nodes.iter().filter(|n| n.role == NodeRole::Master).count();
    let workers = nodes.iter().filter(|n| n.role == NodeRole::Worker).count();
    (masters, workers)
}

/// Check that the node list forms a minimal valid topology.
pub fn validate_topology(nodes: &[NodeConfig]) -> KubeforgeResult<()> {
    let (masters, workers) = role_counts(nodes);

    if masters < 1 || workers < 1 {
        return Err(KubeforgeError::Validation {
            message: "Please provide at least one master and one worker node.".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PortsPolicy;

    fn test_node(hostname: &str, role: NodeRole) -> NodeConfig {
        NodeConfig {
            ansible_host: format!("{}.lan", hostname),
            hostname: hostname.to_string(),
            ssh_user: "ubuntu".to_string(),
            ssh_password: "secret".to_string(),
            ssh_key_path: "/home/ubuntu/.ssh/id_rsa".to_string(),
            node_ip: "10.0.0.1".to_string(),
            physical_env: "rack-1".to_string(),
            role,
            required_ports: true,
            open_ports: PortsPolicy::Both,
        }
    }

    #[test]
    fn test_empty_list_fails() {
        let err = validate_topology(&[]).unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_masters_only_fails() {
        let nodes = vec![
            test_node("m1", NodeRole::Master),
            test_node("m2", NodeRole::Master),
        ];
        let err = validate_topology(&nodes).unwrap_err();
        assert!(err.to_string().contains("at least one master and one worker"));
    }

    #[test]
    fn test_workers_only_fails() {
        let nodes = vec![test_node("w1", NodeRole::Worker)];
        assert!(validate_topology(&nodes).is_err());
    }

    #[test]
    fn test_one_of_each_succeeds() {
        let nodes = vec![
            test_node("m1", NodeRole::Master),
            test_node("w1", NodeRole::Worker),
        ];
        validate_topology(&nodes).unwrap();
        assert_eq!(role_counts(&nodes), (1, 1));
    }

    #[test]
    fn test_larger_mixed_cluster_succeeds() {
        let nodes = vec![
            test_node("m1", NodeRole::Master),
            test_node("m2", NodeRole::Master),
            test_node("w1", NodeRole::Worker),
            test_node("w2", NodeRole::Worker),
            test_node("w3", NodeRole::Worker),
        ];
        validate_topology(&nodes).unwrap();
        assert_eq!(role_counts(&nodes), (2, 3));
    }
}
