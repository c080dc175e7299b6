use crate::descriptor::PluginDescriptor;
use crate::error::{PluginError, Result};
use crate::{io, paths};
use crate::types::Target;
use crate::version::{self, display_version, PluginVersionSpec, ResolveOptions};
use semver::{BuildMetadata, Version};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// PluginSource
// ---------------------------------------------------------------------------

/// Where published plugin versions and their descriptors come from.
pub trait PluginSource {
    /// Every published concrete version of `name` for `target`.
    fn versions(&self, name: &str, target: Target) -> Result<Vec<Version>>;

    /// The descriptor of one concrete version.
    fn descriptor(&self, name: &str, target: Target, version: &Version) -> Result<PluginDescriptor>;
}

// ---------------------------------------------------------------------------
// Inventory document
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginInventoryEntry {
    pub name: String,
    #[serde(default)]
    pub target: Target,
    pub version: String,
    #[serde(default)]
    pub context_scoped: bool,
    /// Descriptor file, relative to the inventory file.
    pub descriptor: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupMember {
    pub name: String,
    #[serde(default)]
    pub target: Target,
    /// `None` selects the latest stable version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<PluginVersionSpec>,
    #[serde(default = "default_mandatory")]
    pub mandatory: bool,
}

fn default_mandatory() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginGroup {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub plugins: Vec<GroupMember>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InventoryDocument {
    #[serde(default)]
    pub plugins: Vec<PluginInventoryEntry>,
    #[serde(default)]
    pub groups: Vec<PluginGroup>,
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

/// A local, read-only inventory backed by `.plugtree/inventory.yaml`.
#[derive(Debug, Clone)]
pub struct Inventory {
    base_dir: PathBuf,
    entries: Vec<(PluginInventoryEntry, Version)>,
    groups: Vec<PluginGroup>,
}

impl Inventory {
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::inventory_path(root);
        let document: InventoryDocument = io::load_state(&path)?;
        let base_dir = path.parent().unwrap_or(root).to_path_buf();
        Self::from_document(base_dir, document)
    }

    /// Parse every version and enforce (name, target, version) uniqueness.
    /// Build metadata does not distinguish versions.
    pub fn from_document(base_dir: PathBuf, document: InventoryDocument) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(document.plugins.len());
        for entry in document.plugins {
            let version = version::parse_version(&entry.version)?;
            let mut precedence = version.clone();
            precedence.build = BuildMetadata::EMPTY;
            let key = (entry.name.clone(), entry.target, precedence);
            if !seen.insert(key) {
                return Err(PluginError::DuplicateInventoryEntry(format!(
                    "{}@{} ({})",
                    entry.name,
                    display_version(&version),
                    entry.target
                )));
            }
            entries.push((entry, version));
        }

        let mut group_names = HashSet::new();
        for group in &document.groups {
            if !group_names.insert(group.name.as_str()) {
                return Err(PluginError::DuplicateInventoryEntry(format!(
                    "group {}",
                    group.name
                )));
            }
        }

        Ok(Self {
            base_dir,
            entries,
            groups: document.groups,
        })
    }

    pub fn entries(&self) -> impl Iterator<Item = &PluginInventoryEntry> {
        self.entries.iter().map(|(entry, _)| entry)
    }

    pub fn entry(&self, name: &str, target: Target, version: &Version) -> Option<&PluginInventoryEntry> {
        self.entries
            .iter()
            .find(|(e, v)| e.name == name && e.target == target && v == version)
            .map(|(e, _)| e)
    }

    pub fn groups(&self) -> &[PluginGroup] {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Result<&PluginGroup> {
        self.groups
            .iter()
            .find(|g| g.name == name)
            .ok_or_else(|| PluginError::GroupNotFound(name.to_string()))
    }
}

impl PluginSource for Inventory {
    fn versions(&self, name: &str, target: Target) -> Result<Vec<Version>> {
        Ok(self
            .entries
            .iter()
            .filter(|(e, _)| e.name == name && e.target == target)
            .map(|(_, v)| v.clone())
            .collect())
    }

    fn descriptor(&self, name: &str, target: Target, version: &Version) -> Result<PluginDescriptor> {
        let entry = self.entry(name, target, version).ok_or_else(|| {
            PluginError::PluginNotFound(format!("{name}@{} ({target})", display_version(version)))
        })?;
        let path = self.base_dir.join(&entry.descriptor);
        debug!(plugin = name, path = %path.display(), "loading descriptor");
        let descriptor = PluginDescriptor::load(&path)?;

        let mismatch = |reason: String| PluginError::DescriptorMismatch {
            plugin: name.to_string(),
            reason,
        };
        if descriptor.name != name {
            return Err(mismatch(format!("descriptor is named '{}'", descriptor.name)));
        }
        if descriptor.target != target {
            return Err(mismatch(format!("descriptor targets {}", descriptor.target)));
        }
        if &descriptor.parsed_version()? != version {
            return Err(mismatch(format!("descriptor is version {}", descriptor.version)));
        }
        Ok(descriptor)
    }
}

// ---------------------------------------------------------------------------
// Resolution against a source
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedPlugin {
    pub name: String,
    pub target: Target,
    pub version: Version,
}

/// Resolve `spec` (or the latest stable version when `None`) for one plugin.
pub fn resolve_plugin(
    source: &dyn PluginSource,
    name: &str,
    target: Target,
    spec: Option<&PluginVersionSpec>,
    options: ResolveOptions,
) -> Result<ResolvedPlugin> {
    let candidates = source.versions(name, target)?;
    if candidates.is_empty() {
        return Err(PluginError::PluginNotFound(format!("{name} ({target})")));
    }

    let resolved = match spec {
        Some(spec) => version::resolve(spec, &candidates, options).ok(),
        None => version::latest(&candidates, options),
    };
    let version = resolved.ok_or_else(|| PluginError::VersionNotFound {
        name: name.to_string(),
        target: target.to_string(),
        spec: spec.map(ToString::to_string).unwrap_or_else(|| "latest".to_string()),
    })?;

    debug!(plugin = name, %target, version = %version, "resolved plugin version");
    Ok(ResolvedPlugin {
        name: name.to_string(),
        target,
        version,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedMember {
    pub name: String,
    pub target: Target,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupResolution {
    pub resolved: Vec<ResolvedPlugin>,
    pub skipped: Vec<SkippedMember>,
}

/// Resolve every member of a group. A mandatory member that cannot be
/// resolved fails the whole group; optional members are skipped.
pub fn resolve_group(
    source: &dyn PluginSource,
    group: &PluginGroup,
    options: ResolveOptions,
) -> Result<GroupResolution> {
    let mut out = GroupResolution::default();
    for member in &group.plugins {
        match resolve_plugin(source, &member.name, member.target, member.version.as_ref(), options) {
            Ok(resolved) => out.resolved.push(resolved),
            Err(e) if member.mandatory => {
                return Err(PluginError::GroupMemberUnresolved {
                    group: group.name.clone(),
                    plugin: member.name.clone(),
                    reason: e.to_string(),
                });
            }
            Err(e) => {
                warn!(group = %group.name, plugin = %member.name, error = %e, "skipping optional group member");
                out.skipped.push(SkippedMember {
                    name: member.name.clone(),
                    target: member.target,
                    reason: e.to_string(),
                });
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    /// In-memory source: (name, target) -> versions.
    #[derive(Default)]
    struct MapSource(HashMap<(String, Target), Vec<Version>>);

    impl MapSource {
        fn with(mut self, name: &str, target: Target, versions: &[&str]) -> Self {
            let parsed = versions
                .iter()
                .map(|v| version::parse_version(v).unwrap())
                .collect();
            self.0.insert((name.to_string(), target), parsed);
            self
        }
    }

    impl PluginSource for MapSource {
        fn versions(&self, name: &str, target: Target) -> Result<Vec<Version>> {
            Ok(self
                .0
                .get(&(name.to_string(), target))
                .cloned()
                .unwrap_or_default())
        }

        fn descriptor(&self, name: &str, target: Target, version: &Version) -> Result<PluginDescriptor> {
            Ok(PluginDescriptor::new(name, target, display_version(version)))
        }
    }

    fn spec(raw: &str) -> PluginVersionSpec {
        PluginVersionSpec::parse(raw).unwrap()
    }

    #[test]
    fn resolve_plugin_shorthand() {
        let source = MapSource::default().with("cluster", Target::Kubernetes, &["v1.0.0", "v1.0.3", "v1.1.0"]);
        let got = resolve_plugin(
            &source,
            "cluster",
            Target::Kubernetes,
            Some(&spec("v1.0")),
            ResolveOptions::default(),
        )
        .unwrap();
        assert_eq!(got.version, Version::new(1, 0, 3));
    }

    #[test]
    fn resolve_plugin_defaults_to_latest() {
        let source = MapSource::default().with("cluster", Target::Global, &["v1.0.0", "v2.0.0", "v3.0.0-rc.1"]);
        let got = resolve_plugin(&source, "cluster", Target::Global, None, ResolveOptions::default())
            .unwrap();
        assert_eq!(got.version, Version::new(2, 0, 0));
    }

    #[test]
    fn resolve_plugin_version_not_found() {
        let source = MapSource::default().with("cluster", Target::Global, &["v1.0.0"]);
        let err = resolve_plugin(
            &source,
            "cluster",
            Target::Global,
            Some(&spec("v2")),
            ResolveOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PluginError::VersionNotFound { ref spec, .. } if spec == "v2"));
    }

    #[test]
    fn resolve_plugin_unknown_target_is_not_found() {
        let source = MapSource::default().with("cluster", Target::Global, &["v1.0.0"]);
        let err = resolve_plugin(&source, "cluster", Target::Kubernetes, None, ResolveOptions::default())
            .unwrap_err();
        assert!(matches!(err, PluginError::PluginNotFound(_)));
    }

    fn group(members: Vec<GroupMember>) -> PluginGroup {
        PluginGroup {
            name: "vmware-tkg/default".to_string(),
            description: None,
            plugins: members,
        }
    }

    fn member(name: &str, version: Option<&str>, mandatory: bool) -> GroupMember {
        GroupMember {
            name: name.to_string(),
            target: Target::Global,
            version: version.map(spec),
            mandatory,
        }
    }

    #[test]
    fn group_skips_optional_failures() {
        let source = MapSource::default().with("cluster", Target::Global, &["v1.2.0", "v1.2.5"]);
        let g = group(vec![
            member("cluster", Some("v1.2"), true),
            member("telemetry", None, false),
        ]);
        let out = resolve_group(&source, &g, ResolveOptions::default()).unwrap();
        assert_eq!(out.resolved.len(), 1);
        assert_eq!(out.resolved[0].version, Version::new(1, 2, 5));
        assert_eq!(out.skipped.len(), 1);
        assert_eq!(out.skipped[0].name, "telemetry");
    }

    #[test]
    fn group_fails_on_mandatory_member() {
        let source = MapSource::default().with("cluster", Target::Global, &["v1.2.0"]);
        let g = group(vec![member("cluster", Some("v2"), true)]);
        let err = resolve_group(&source, &g, ResolveOptions::default()).unwrap_err();
        assert!(matches!(err, PluginError::GroupMemberUnresolved { .. }));
    }

    const INVENTORY: &str = r#"
plugins:
  - name: cluster
    target: kubernetes
    version: v1.0.0
    descriptor: descriptors/cluster-1.0.0.yaml
  - name: cluster
    target: kubernetes
    version: v1.1.0
    context_scoped: true
    descriptor: descriptors/cluster-1.1.0.yaml
groups:
  - name: vmware-tkg/default
    plugins:
      - name: cluster
        target: kubernetes
        version: v1
"#;

    fn write_inventory(dir: &TempDir) {
        let base = dir.path().join(".plugtree");
        std::fs::create_dir_all(base.join("descriptors")).unwrap();
        std::fs::write(base.join("inventory.yaml"), INVENTORY).unwrap();
        std::fs::write(
            base.join("descriptors/cluster-1.1.0.yaml"),
            "name: cluster\ntarget: kubernetes\nversion: v1.1.0\n",
        )
        .unwrap();
        std::fs::write(
            base.join("descriptors/cluster-1.0.0.yaml"),
            "name: cluster\ntarget: kubernetes\nversion: v1.0.1\n",
        )
        .unwrap();
    }

    #[test]
    fn local_inventory_lists_and_loads() {
        let dir = TempDir::new().unwrap();
        write_inventory(&dir);
        let inv = Inventory::load(dir.path()).unwrap();

        let versions = inv.versions("cluster", Target::Kubernetes).unwrap();
        assert_eq!(versions.len(), 2);
        assert!(inv.versions("cluster", Target::Global).unwrap().is_empty());

        let d = inv
            .descriptor("cluster", Target::Kubernetes, &Version::new(1, 1, 0))
            .unwrap();
        assert_eq!(d.version, "v1.1.0");
        assert!(inv
            .entry("cluster", Target::Kubernetes, &Version::new(1, 1, 0))
            .unwrap()
            .context_scoped);

        let out = resolve_group(&inv, inv.group("vmware-tkg/default").unwrap(), ResolveOptions::default())
            .unwrap();
        assert_eq!(out.resolved[0].version, Version::new(1, 1, 0));
    }

    #[test]
    fn descriptor_version_mismatch_is_reported() {
        let dir = TempDir::new().unwrap();
        write_inventory(&dir);
        let inv = Inventory::load(dir.path()).unwrap();
        let err = inv
            .descriptor("cluster", Target::Kubernetes, &Version::new(1, 0, 0))
            .unwrap_err();
        assert!(matches!(err, PluginError::DescriptorMismatch { .. }));
    }

    #[test]
    fn duplicate_entries_rejected() {
        let entry = PluginInventoryEntry {
            name: "cluster".to_string(),
            target: Target::Global,
            version: "v1.0.0".to_string(),
            context_scoped: false,
            descriptor: PathBuf::from("a.yaml"),
        };
        let mut dup = entry.clone();
        dup.version = "1.0.0".to_string();
        let doc = InventoryDocument {
            plugins: vec![entry, dup],
            groups: Vec::new(),
        };
        let err = Inventory::from_document(PathBuf::from("."), doc).unwrap_err();
        assert!(matches!(err, PluginError::DuplicateInventoryEntry(_)));
    }

    #[test]
    fn entries_differing_only_in_build_metadata_rejected() {
        let entry = PluginInventoryEntry {
            name: "cluster".to_string(),
            target: Target::Global,
            version: "v1.0.0+a".to_string(),
            context_scoped: false,
            descriptor: PathBuf::from("a.yaml"),
        };
        let mut other = entry.clone();
        other.version = "v1.0.0+b".to_string();
        other.descriptor = PathBuf::from("b.yaml");
        let doc = InventoryDocument {
            plugins: vec![entry, other],
            groups: Vec::new(),
        };
        let err = Inventory::from_document(PathBuf::from("."), doc).unwrap_err();
        assert!(matches!(err, PluginError::DuplicateInventoryEntry(_)));
    }

    #[test]
    fn same_version_different_target_is_fine() {
        let entry = PluginInventoryEntry {
            name: "cluster".to_string(),
            target: Target::Global,
            version: "v1.0.0".to_string(),
            context_scoped: false,
            descriptor: PathBuf::from("a.yaml"),
        };
        let mut other = entry.clone();
        other.target = Target::MissionControl;
        let doc = InventoryDocument {
            plugins: vec![entry, other],
            groups: Vec::new(),
        };
        assert!(Inventory::from_document(PathBuf::from("."), doc).is_ok());
    }

    #[test]
    fn missing_group_is_error() {
        let inv = Inventory::from_document(PathBuf::from("."), InventoryDocument::default()).unwrap();
        assert!(matches!(inv.group("nope"), Err(PluginError::GroupNotFound(_))));
    }
}
