use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use plugtree_core::config::Config;
use plugtree_core::installed::InstalledPlugins;
use plugtree_core::inventory::{resolve_group, Inventory, PluginSource};
use plugtree_core::version::display_version;
use std::path::Path;

#[derive(Subcommand)]
pub enum GroupSubcommand {
    /// List plugin groups in the inventory
    List,

    /// Resolve and install every member of a group
    Install {
        /// Group name
        name: String,
    },
}

pub fn run(root: &Path, subcmd: GroupSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        GroupSubcommand::List => list(root, json),
        GroupSubcommand::Install { name } => install(root, &name, json),
    }
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let inventory = Inventory::load(root).context("failed to load inventory")?;
    let groups = inventory.groups();

    if json {
        return print_json(&groups);
    }
    if groups.is_empty() {
        println!("No plugin groups.");
        return Ok(());
    }

    let rows = groups
        .iter()
        .map(|g| {
            vec![
                g.name.clone(),
                g.plugins.len().to_string(),
                g.description.clone().unwrap_or_default(),
            ]
        })
        .collect();
    print_table(&["NAME", "PLUGINS", "DESCRIPTION"], rows);
    Ok(())
}

fn install(root: &Path, name: &str, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let inventory = Inventory::load(root).context("failed to load inventory")?;
    let mut installed = InstalledPlugins::load(root).context("failed to load installed.yaml")?;

    let group = inventory.group(name)?;
    let resolution = resolve_group(&inventory, group, config.resolution)?;

    // Load every descriptor before touching installed state so a bad member
    // leaves nothing half-installed.
    let mut descriptors = Vec::with_capacity(resolution.resolved.len());
    for plugin in &resolution.resolved {
        let descriptor = inventory
            .descriptor(&plugin.name, plugin.target, &plugin.version)
            .with_context(|| format!("failed to load descriptor for {}", plugin.name))?;
        let context_scoped = inventory
            .entry(&plugin.name, plugin.target, &plugin.version)
            .map(|e| e.context_scoped)
            .unwrap_or(false);
        descriptors.push((descriptor, context_scoped));
    }
    for (descriptor, context_scoped) in descriptors {
        installed.install(descriptor, context_scoped);
    }
    installed.save(root).context("failed to write installed.yaml")?;

    if json {
        return print_json(&resolution);
    }
    for plugin in &resolution.resolved {
        println!(
            "Installed {} {} ({})",
            plugin.name,
            display_version(&plugin.version),
            plugin.target
        );
    }
    for skipped in &resolution.skipped {
        println!("[warning] skipped {} ({}): {}", skipped.name, skipped.target, skipped.reason);
    }
    Ok(())
}
