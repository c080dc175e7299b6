use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use plugtree_core::builder::TreeBuilder;
use plugtree_core::config::Config;
use plugtree_core::installed::InstalledPlugins;
use plugtree_core::inventory::Inventory;
use plugtree_core::types::ContextType;
use std::path::Path;

#[derive(Subcommand)]
pub enum PluginSubcommand {
    /// List installed plugins and whether they are active in the current context
    List,

    /// List every plugin version published in the inventory
    Available,
}

pub fn run(
    root: &Path,
    subcmd: PluginSubcommand,
    context: Option<ContextType>,
    json: bool,
) -> anyhow::Result<()> {
    match subcmd {
        PluginSubcommand::List => list(root, context, json),
        PluginSubcommand::Available => available(root, json),
    }
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

fn list(root: &Path, context: Option<ContextType>, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let installed = InstalledPlugins::load(root).context("failed to load installed.yaml")?;
    let out = TreeBuilder::from_config(&config, context).build(installed.descriptors());

    if json {
        let value: Vec<_> = installed
            .plugins
            .iter()
            .zip(&out.plugins)
            .map(|(record, status)| {
                serde_json::json!({
                    "name": status.name,
                    "target": status.target,
                    "version": status.version,
                    "active": status.active,
                    "context_scoped": record.context_scoped,
                    "installed_at": record.installed_at,
                })
            })
            .collect();
        return print_json(&value);
    }
    if out.plugins.is_empty() {
        println!("No plugins installed.");
        return Ok(());
    }

    let rows = installed
        .plugins
        .iter()
        .zip(&out.plugins)
        .map(|(record, status)| {
            vec![
                status.name.clone(),
                status.target.to_string(),
                status.version.clone(),
                if status.active { "active" } else { "inactive" }.to_string(),
                if record.context_scoped { "yes" } else { "" }.to_string(),
                record.installed_at.format("%Y-%m-%d %H:%M").to_string(),
            ]
        })
        .collect();
    print_table(
        &["NAME", "TARGET", "VERSION", "STATUS", "CONTEXT-SCOPED", "INSTALLED"],
        rows,
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// available
// ---------------------------------------------------------------------------

fn available(root: &Path, json: bool) -> anyhow::Result<()> {
    let inventory = Inventory::load(root).context("failed to load inventory")?;
    let entries: Vec<_> = inventory.entries().collect();

    if json {
        return print_json(&entries);
    }
    if entries.is_empty() {
        println!("Inventory is empty.");
        return Ok(());
    }

    let rows = entries
        .iter()
        .map(|e| {
            vec![
                e.name.clone(),
                e.target.to_string(),
                e.version.clone(),
                if e.context_scoped { "yes" } else { "" }.to_string(),
            ]
        })
        .collect();
    print_table(&["NAME", "TARGET", "VERSION", "CONTEXT-SCOPED"], rows);
    Ok(())
}
