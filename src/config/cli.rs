use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "gaehwa")]
#[command(about = "Gaehwa flower-gifting client: likes, D-day, recommendations and sign-in")]
pub struct CliConfig {
    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, env = "GAEHWA_BACKEND_URL")]
    pub backend_url: Option<String>,

    #[arg(long)]
    pub storage_dir: Option<String>,

    #[arg(long)]
    pub secure_dir: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Manage liked florist ids
    Likes {
        #[command(subcommand)]
        action: LikesAction,
    },
    /// Show the D-day for the stored (or given) anniversary
    Dday {
        #[arg(long, help = "Anniversary as YYYY-MM-DD; stored for next time")]
        target: Option<String>,
    },
    /// Ask the backend for florist recommendations
    Recommend(RecommendArgs),
    /// Pick favourite bouquets from the fixed candidate set
    Select {
        #[arg(long, value_delimiter = ',')]
        ids: Vec<String>,
    },
    /// Exchange an identity token for a session
    Login {
        #[arg(long, env = "GAEHWA_ID_TOKEN")]
        id_token: String,
    },
    /// Remove the stored session
    Logout,
    /// Show the signed-in user's greeting
    Profile,
}

#[derive(Debug, Clone, Subcommand)]
pub enum LikesAction {
    /// Like or unlike an id
    Toggle { id: String },
    /// Print whether an id is liked
    Check { id: String },
    /// Print every liked id
    List,
}

#[derive(Debug, Clone, Args)]
pub struct RecommendArgs {
    #[arg(long, help = "남 or 여")]
    pub gender: String,

    #[arg(long, help = "10대 .. 90대")]
    pub age: String,

    #[arg(long, help = "축하, 기쁨, 위로, 슬픔, 허무")]
    pub emotion: String,
}
