use clap::{Parser, Subcommand};

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "chainctl", bin_name = "chainctl", version = get_version())]
#[command(about = "Manage the chains configured on a node", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Root URL of the node's API (overrides config file and CHAINCTL_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub url: Option<String>,

    /// Chain namespace, e.g. solana, evm, terra
    #[arg(short = 't', long = "type", global = true, value_name = "TYPE")]
    pub chain_type: Option<String>,

    /// Print results as JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all chains
    #[command(alias = "ls")]
    List {
        /// Page to fetch (1-based; omitted uses the node's default)
        #[arg(long, default_value_t = 0)]
        page: u32,
    },

    /// Create a new chain
    #[command(alias = "n")]
    Create {
        /// ID of the chain
        #[arg(long)]
        id: Option<String>,

        /// Chain config as a JSON blob or a path to a JSON file
        config: Option<String>,
    },

    /// Remove a chain
    #[command(aliases = ["rm", "delete"])]
    Remove {
        /// ID of the chain to remove
        id: Option<String>,
    },

    /// Change parameters of an existing chain's config
    Configure {
        /// ID of the chain
        #[arg(long)]
        id: Option<String>,

        /// Parameters to set, as key=value (values are parsed as JSON when possible)
        #[arg(num_args = 0.., allow_hyphen_values = true)]
        params: Vec<String>,
    },
}
