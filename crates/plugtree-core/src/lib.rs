pub mod builder;
pub mod command_map;
pub mod command_path;
pub mod command_tree;
pub mod config;
pub mod context;
pub mod descriptor;
pub mod diagnostic;
pub mod error;
pub mod installed;
pub mod inventory;
pub mod io;
pub mod paths;
pub mod types;
pub mod version;

pub use error::{PluginError, Result};
