use crate::output::print_json;
use anyhow::Context;
use plugtree_core::config::Config;
use plugtree_core::installed::InstalledPlugins;
use plugtree_core::inventory::{resolve_plugin, Inventory, PluginSource};
use plugtree_core::types::Target;
use plugtree_core::version::{display_version, PluginVersionSpec};
use std::path::Path;
use tracing::info;

// ---------------------------------------------------------------------------
// install
// ---------------------------------------------------------------------------

pub fn install(
    root: &Path,
    name: &str,
    spec: Option<&PluginVersionSpec>,
    target: Target,
    json: bool,
) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let inventory = Inventory::load(root).context("failed to load inventory")?;
    let mut installed = InstalledPlugins::load(root).context("failed to load installed.yaml")?;

    let resolved = resolve_plugin(&inventory, name, target, spec, config.resolution)?;
    let descriptor = inventory
        .descriptor(name, target, &resolved.version)
        .with_context(|| format!("failed to load descriptor for {name}"))?;

    let context_scoped = inventory
        .entry(name, target, &resolved.version)
        .map(|e| e.context_scoped)
        .unwrap_or(false);
    let version = display_version(&resolved.version);
    let previous = installed.install(descriptor, context_scoped);
    installed.save(root).context("failed to write installed.yaml")?;
    info!(plugin = name, %target, %version, "plugin installed");

    if json {
        print_json(&serde_json::json!({
            "name": name,
            "target": target,
            "version": version,
            "previous": previous,
        }))?;
    } else {
        match previous {
            Some(prev) if prev != version => {
                println!("Updated {name} ({target}): {prev} -> {version}")
            }
            Some(_) => println!("Reinstalled {name} {version} ({target})"),
            None => println!("Installed {name} {version} ({target})"),
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// uninstall
// ---------------------------------------------------------------------------

pub fn uninstall(root: &Path, name: &str, target: Option<Target>, json: bool) -> anyhow::Result<()> {
    let mut installed = InstalledPlugins::load(root).context("failed to load installed.yaml")?;
    let removed = installed.uninstall(name, target)?;
    installed.save(root).context("failed to write installed.yaml")?;
    info!(plugin = name, target = %removed.target, "plugin uninstalled");

    if json {
        print_json(&serde_json::json!({
            "name": removed.name,
            "target": removed.target,
            "version": removed.version,
        }))?;
    } else {
        println!(
            "Uninstalled {} {} ({})",
            removed.name, removed.version, removed.target
        );
    }
    Ok(())
}
