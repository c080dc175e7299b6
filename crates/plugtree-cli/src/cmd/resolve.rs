use crate::output::print_json;
use anyhow::Context;
use plugtree_core::config::Config;
use plugtree_core::inventory::{resolve_plugin, Inventory};
use plugtree_core::types::Target;
use plugtree_core::version::{display_version, PluginVersionSpec};
use std::path::Path;

pub fn run(
    root: &Path,
    name: &str,
    spec: &PluginVersionSpec,
    target: Target,
    json: bool,
) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let inventory = Inventory::load(root).context("failed to load inventory")?;

    let resolved = resolve_plugin(&inventory, name, target, Some(spec), config.resolution)?;
    let version = display_version(&resolved.version);

    if json {
        print_json(&serde_json::json!({
            "name": resolved.name,
            "target": resolved.target,
            "spec": spec,
            "version": version,
        }))?;
    } else {
        println!("{name} ({target}) {spec} -> {version}");
    }
    Ok(())
}
