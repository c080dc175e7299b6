use anyhow::Context;
use plugtree_core::config::Config;
use plugtree_core::installed::InstalledPlugins;
use plugtree_core::inventory::InventoryDocument;
use plugtree_core::{io, paths};
use std::path::Path;

pub fn run(root: &Path) -> anyhow::Result<()> {
    println!("Initializing plugtree in: {}", root.display());

    // 1. Directory layout
    for p in [paths::plugtree_dir(root), paths::descriptors_dir(root)] {
        io::ensure_dir(&p).with_context(|| format!("failed to create {}", p.display()))?;
    }

    // 2. State files, each left alone when present
    let created = io::seed_state(&paths::config_path(root), &Config::default())
        .context("failed to write config.yaml")?;
    report(created, paths::CONFIG_FILE);

    let created = io::seed_state(&paths::inventory_path(root), &InventoryDocument::default())
        .context("failed to write inventory.yaml")?;
    report(created, paths::INVENTORY_FILE);

    let created = io::seed_state(&paths::installed_path(root), &InstalledPlugins::new())
        .context("failed to write installed.yaml")?;
    report(created, paths::INSTALLED_FILE);

    println!("\nplugtree initialized successfully.");
    println!(
        "Next: add plugins to {} and run 'plugtree install <name>'",
        paths::INVENTORY_FILE
    );
    Ok(())
}

fn report(created: bool, file: &str) {
    if created {
        println!("  created: {file}");
    } else {
        println!("  exists:  {file}");
    }
}
