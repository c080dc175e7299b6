pub mod config;
pub mod group;
pub mod init;
pub mod install;
pub mod plugin;
pub mod resolve;
pub mod tree;
