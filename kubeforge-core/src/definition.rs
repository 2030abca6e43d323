//! Cluster definition file loading and saving
//!
//! A cluster definition is the on-disk input to generation: one
//! [`ClusterConfig`] plus the list of [`NodeConfig`] entries. Definitions are
//! accepted in TOML, YAML, or JSON, dispatched on the file extension, so the
//! same definition can be kept next to whichever tooling produced it.

use std::path::Path;

use tracing::debug;

use crate::error::{KubeforgeError, KubeforgeResult};
use crate::types::ClusterDefinition;

impl ClusterDefinition {
    /// Load a cluster definition from a TOML, YAML, or JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KubeforgeResult<Self> {
        let path = path.as_ref();
        debug!("Loading cluster definition from {:?}", path);

        let content =
            std::fs::read_to_string(path).map_err(|e| KubeforgeError::InvalidDefinition {
                message: format!("Failed to read cluster definition: {} (path: {:?})", e, path),
            })?;

        match extension_of(path) {
            "toml" => toml::from_str(&content).map_err(|e| KubeforgeError::InvalidDefinition {
                message: format!("Failed to parse TOML cluster definition: {}", e),
            }),
            "yaml" | "yml" => {
                serde_yaml::from_str(&content).map_err(|e| KubeforgeError::InvalidDefinition {
                    message: format!("Failed to parse YAML cluster definition: {}", e),
                })
            }
            "json" => {
                serde_json::from_str(&content).map_err(|e| KubeforgeError::InvalidDefinition {
                    message: format!("Failed to parse JSON cluster definition: {}", e),
                })
            }
            other => Err(KubeforgeError::InvalidDefinition {
                message: format!("Unsupported cluster definition format: {:?}", other),
            }),
        }
    }

    /// Write the cluster definition to a TOML, YAML, or JSON file, creating
    /// parent directories as needed.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> KubeforgeResult<()> {
        let path = path.as_ref();
        debug!("Saving cluster definition to {:?}", path);

        let content = match extension_of(path) {
            "toml" => {
                toml::to_string_pretty(self).map_err(|e| KubeforgeError::Serialization {
                    operation: "serialize TOML cluster definition".to_string(),
                    source: Box::new(e),
                })?
            }
            "yaml" | "yml" => {
                serde_yaml::to_string(self).map_err(|e| KubeforgeError::Serialization {
                    operation: "serialize YAML cluster definition".to_string(),
                    source: Box::new(e),
                })?
            }
            "json" => {
                serde_json::to_string_pretty(self).map_err(|e| KubeforgeError::Serialization {
                    operation: "serialize JSON cluster definition".to_string(),
                    source: Box::new(e),
                })?
            }
            other => {
                return Err(KubeforgeError::InvalidDefinition {
                    message: format!("Unsupported cluster definition format: {:?}", other),
                })
            }
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn extension_of(path: &Path) -> &str {
    path.extension().and_then(|ext| ext.to_str()).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClusterConfig, CriOs, NodeConfig, NodeRole, PortsEnv, PortsPolicy};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn test_definition() -> ClusterDefinition {
        ClusterDefinition {
            cluster: ClusterConfig {
                name: "staging-cluster".to_string(),
                storj_bucket: "cluster-backups".to_string(),
                storj_secret: "access-grant".to_string(),
                pod_cidr: "10.217.0.0/16".to_string(),
                kubernetes_version: "1.28.2-00".to_string(),
                cri_os: CriOs::XUbuntu2204,
                ports_env: PortsEnv::Dev,
                project_git_path: "/opt/provisioning".to_string(),
            },
            nodes: vec![
                NodeConfig {
                    ansible_host: "master01.lan".to_string(),
                    hostname: "master01".to_string(),
                    ssh_user: "ubuntu".to_string(),
                    ssh_password: "hunter2".to_string(),
                    ssh_key_path: "/home/ubuntu/.ssh/id_rsa".to_string(),
                    node_ip: "192.168.1.10".to_string(),
                    physical_env: "rack-1".to_string(),
                    role: NodeRole::Master,
                    required_ports: true,
                    open_ports: PortsPolicy::Master,
                },
                NodeConfig {
                    ansible_host: "worker01.lan".to_string(),
                    hostname: "worker01".to_string(),
                    ssh_user: "ubuntu".to_string(),
                    ssh_password: "hunter2".to_string(),
                    ssh_key_path: "/home/ubuntu/.ssh/id_rsa".to_string(),
                    node_ip: "192.168.1.20".to_string(),
                    physical_env: "rack-1".to_string(),
                    role: NodeRole::Worker,
                    required_ports: false,
                    open_ports: PortsPolicy::Worker,
                },
            ],
        }
    }

    #[test]
    fn test_toml_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cluster.toml");

        let definition = test_definition();
        definition.save_to_file(&path).unwrap();

        let loaded = ClusterDefinition::load_from_file(&path).unwrap();
        assert_eq!(loaded, definition);
    }

    #[test]
    fn test_yaml_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cluster.yml");

        let definition = test_definition();
        definition.save_to_file(&path).unwrap();

        let loaded = ClusterDefinition::load_from_file(&path).unwrap();
        assert_eq!(loaded, definition);
    }

    #[test]
    fn test_json_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cluster.json");

        let definition = test_definition();
        definition.save_to_file(&path).unwrap();

        let loaded = ClusterDefinition::load_from_file(&path).unwrap();
        assert_eq!(loaded, definition);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cluster.ini");
        std::fs::write(&path, "cluster = nope").unwrap();

        let err = ClusterDefinition::load_from_file(&path).unwrap_err();
        match err {
            KubeforgeError::InvalidDefinition { message } => {
                assert!(message.contains("Unsupported cluster definition format"));
            }
            other => panic!("expected InvalidDefinition, got: {:?}", other),
        }
    }

    #[test]
    fn test_missing_field_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cluster.toml");
        std::fs::write(&path, "[cluster]\nname = \"only-a-name\"\n").unwrap();

        let err = ClusterDefinition::load_from_file(&path).unwrap_err();
        match err {
            KubeforgeError::InvalidDefinition { message } => {
                assert!(message.contains("Failed to parse TOML cluster definition"));
            }
            other => panic!("expected InvalidDefinition, got: {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = ClusterDefinition::load_from_file("/nonexistent/cluster.toml").unwrap_err();
        match err {
            KubeforgeError::InvalidDefinition { message } => {
                assert!(message.contains("Failed to read cluster definition"));
            }
            other => panic!("expected InvalidDefinition, got: {:?}", other),
        }
    }
}
