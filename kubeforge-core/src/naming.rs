//! File and path naming for generated artifacts
//!
//! Ansible inventory layouts are picky about identifiers, so every name that
//! ends up on disk goes through the same substitution: dashes become
//! underscores. The substitution is applied to the fully formatted name, not
//! to the individual parts, so two inputs that only differ by `-` vs `_`
//! collapse to the same file name.

/// Directory that node variable files are installed under, relative to the
/// playbook checkout on the control host.
pub const GROUP_VARS_DIR: &str = "ansible/k8s_cluster_creation/inventory/group_vars";

/// Replace every `-` with `_`, the substitution applied to all generated
/// artifact names.
pub fn ansible_safe_name(name: &str) -> String {
    name.replace('-', "_")
}

/// File name of the per-node variables manifest for a host.
pub fn manifest_file_name(hostname: &str) -> String {
    ansible_safe_name(&format!("{}.yml", hostname))
}

/// File name of the cluster descriptor document.
pub fn descriptor_file_name(cluster_name: &str) -> String {
    ansible_safe_name(&format!("{}.json", cluster_name))
}

/// File name of the bundle archive holding the descriptor and manifests.
pub fn archive_file_name(cluster_name: &str) -> String {
    ansible_safe_name(&format!("{}.tar.gz", cluster_name))
}

/// Path a node's variables file will occupy inside the playbook inventory
/// once installed on the control host.
pub fn group_vars_path(cluster_name: &str, hostname: &str) -> String {
    ansible_safe_name(&format!("{}/{}/{}.yml", GROUP_VARS_DIR, cluster_name, hostname))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashes_become_underscores() {
        assert_eq!(ansible_safe_name("node-a-1"), "node_a_1");
        assert_eq!(ansible_safe_name("plain"), "plain");
    }

    #[test]
    fn test_manifest_file_name() {
        assert_eq!(manifest_file_name("node-a"), "node_a.yml");
        assert_eq!(manifest_file_name("master01"), "master01.yml");
    }

    #[test]
    fn test_descriptor_file_name() {
        assert_eq!(descriptor_file_name("my-cluster"), "my_cluster.json");
    }

    #[test]
    fn test_archive_file_name() {
        assert_eq!(archive_file_name("my-cluster"), "my_cluster.tar.gz");
    }

    #[test]
    fn test_group_vars_path_substitutes_whole_path() {
        assert_eq!(
            group_vars_path("my-cluster", "node-a"),
            "ansible/k8s_cluster_creation/inventory/group_vars/my_cluster/node_a.yml"
        );
    }

    #[test]
    fn test_dashed_and_underscored_names_collapse() {
        assert_eq!(manifest_file_name("node-a"), manifest_file_name("node_a"));
    }
}
