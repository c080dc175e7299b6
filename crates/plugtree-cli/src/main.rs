mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, group::GroupSubcommand, plugin::PluginSubcommand};
use plugtree_core::types::{ContextType, Target};
use plugtree_core::version::PluginVersionSpec;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "plugtree",
    about = "Resolve plugin versions and inspect the merged command tree of a plugin-based CLI",
    version
)]
struct Cli {
    /// Workspace root (default: auto-detect from .plugtree/)
    #[arg(long, global = true, env = "PLUGTREE_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Active context type (kubernetes, mission-control, tanzu); overrides config
    #[arg(long, global = true, env = "PLUGTREE_CONTEXT_TYPE")]
    context_type: Option<ContextType>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create .plugtree/ with a default config, an empty inventory and no installed plugins
    Init,

    /// Resolve a version spec (v1, v1.2 or v1.2.3) against the inventory
    Resolve {
        /// Plugin name
        name: String,
        /// Version spec
        spec: PluginVersionSpec,
        #[arg(long, default_value_t = Target::Global)]
        target: Target,
    },

    /// Install a plugin from the inventory
    Install {
        /// Plugin name
        name: String,
        /// Version spec (default: latest stable)
        #[arg(long = "version", value_name = "SPEC")]
        spec: Option<PluginVersionSpec>,
        #[arg(long, default_value_t = Target::Global)]
        target: Target,
    },

    /// Remove an installed plugin
    Uninstall {
        /// Plugin name
        name: String,
        /// Required when the name is installed for several targets
        #[arg(long)]
        target: Option<Target>,
    },

    /// List installed and available plugins
    Plugin {
        #[command(subcommand)]
        subcommand: PluginSubcommand,
    },

    /// List and install plugin groups
    Group {
        #[command(subcommand)]
        subcommand: GroupSubcommand,
    },

    /// Build and print the merged command tree
    Tree {
        /// Include hidden commands
        #[arg(long)]
        all: bool,
    },

    /// Show or validate the configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    let context = cli.context_type;

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Resolve { name, spec, target } => {
            cmd::resolve::run(&root, &name, &spec, target, cli.json)
        }
        Commands::Install { name, spec, target } => {
            cmd::install::install(&root, &name, spec.as_ref(), target, cli.json)
        }
        Commands::Uninstall { name, target } => {
            cmd::install::uninstall(&root, &name, target, cli.json)
        }
        Commands::Plugin { subcommand } => cmd::plugin::run(&root, subcommand, context, cli.json),
        Commands::Group { subcommand } => cmd::group::run(&root, subcommand, cli.json),
        Commands::Tree { all } => cmd::tree::run(&root, context, all, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
