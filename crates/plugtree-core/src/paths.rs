use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const PLUGTREE_DIR: &str = ".plugtree";
pub const DESCRIPTORS_DIR: &str = ".plugtree/descriptors";

pub const CONFIG_FILE: &str = ".plugtree/config.yaml";
pub const INVENTORY_FILE: &str = ".plugtree/inventory.yaml";
pub const INSTALLED_FILE: &str = ".plugtree/installed.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn plugtree_dir(root: &Path) -> PathBuf {
    root.join(PLUGTREE_DIR)
}

pub fn descriptors_dir(root: &Path) -> PathBuf {
    root.join(DESCRIPTORS_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn inventory_path(root: &Path) -> PathBuf {
    root.join(INVENTORY_FILE)
}

pub fn installed_path(root: &Path) -> PathBuf {
    root.join(INSTALLED_FILE)
}
