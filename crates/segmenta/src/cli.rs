//! Clap derive structures for the `segmenta` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

use segmenta_core::view::{
    CampaignField, CampaignSortKey, CampaignStatus, RouterField, SegmentField, SegmentSortKey,
    SortDir,
};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// segmenta -- manage campaign routers, campaigns and audience segments
#[derive(Debug, Parser)]
#[command(
    name = "segmenta",
    version,
    about = "Manage campaign routers, campaigns and audience segments",
    long_about = "Administer the router inventory, marketing campaigns and the\n\
        audience segments that target them, against a segmenta backend.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "SEGMENTA_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend root URL (overrides profile)
    #[arg(long, env = "SEGMENTA_API_BASE_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "SEGMENTA_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "SEGMENTA_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds [default: none]
    #[arg(long, env = "SEGMENTA_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

impl GlobalOpts {
    pub fn output(&self) -> OutputFormat {
        self.output.unwrap_or(OutputFormat::Table)
    }

    pub fn color(&self) -> ColorMode {
        self.color.unwrap_or(ColorMode::Auto)
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage the router inventory
    #[command(alias = "r")]
    Routers(RoutersArgs),

    /// Manage campaigns
    #[command(alias = "c")]
    Campaigns(CampaignsArgs),

    /// Manage audience segments
    #[command(alias = "s")]
    Segments(SegmentsArgs),

    /// Inspect router groups
    Groups(GroupsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared List Arguments ────────────────────────────────────────────

/// Search, ordering and paging shared by every list command.
#[derive(Debug, Args)]
pub struct ViewArgs {
    /// Case-insensitive substring to search for
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Sort direction: asc or desc
    #[arg(long)]
    pub dir: Option<SortDir>,

    /// Page to show (1-based, clamped to the last page)
    #[arg(long, default_value = "1")]
    pub page: usize,

    /// Rows per page [default: from config, else 10]
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Show every row on one page
    #[arg(long, short = 'a', conflicts_with_all = ["page", "page_size"])]
    pub all: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ROUTERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RoutersArgs {
    #[command(subcommand)]
    pub command: RoutersCommand,
}

#[derive(Debug, Subcommand)]
pub enum RoutersCommand {
    /// List routers
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        view: ViewArgs,

        /// Restrict the search to one column (id, serial, mac, device_name,
        /// estacion, municipio, latitud, longitud, group_name)
        #[arg(long)]
        field: Option<RouterField>,

        /// Sort column (same names as --field)
        #[arg(long)]
        sort: Option<RouterField>,
    },

    /// Show one router
    Get {
        /// Router ID
        id: String,
    },

    /// Register a router
    Create(RouterFields),

    /// Edit a router; unspecified fields keep their current value
    Update {
        /// Router ID
        id: String,

        #[command(flatten)]
        fields: RouterFields,
    },

    /// Move a router to another group ("" unassigns it)
    SetGroup {
        /// Router ID
        id: String,

        /// Target group name
        group: String,
    },

    /// Delete a router
    #[command(alias = "rm")]
    Delete {
        /// Router ID
        id: String,
    },

    /// Router count per group
    Groups,
}

#[derive(Debug, Args)]
pub struct RouterFields {
    #[arg(long)]
    pub serial: Option<String>,
    #[arg(long)]
    pub mac: Option<String>,
    #[arg(long)]
    pub device_name: Option<String>,
    #[arg(long)]
    pub estacion: Option<String>,
    #[arg(long)]
    pub municipio: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub latitud: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub longitud: Option<String>,
    #[arg(long = "group")]
    pub group_name: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CAMPAIGNS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CampaignsArgs {
    #[command(subcommand)]
    pub command: CampaignsCommand,
}

#[derive(Debug, Subcommand)]
pub enum CampaignsCommand {
    /// List campaigns (active first, newest first)
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        view: ViewArgs,

        /// Restrict the search to one column (name, description, url)
        #[arg(long)]
        field: Option<CampaignField>,

        /// Status filter: all, active or inactive
        #[arg(long, default_value = "all")]
        status: CampaignStatus,

        /// Sort column: name, created_at, updated_at
        #[arg(long)]
        sort: Option<CampaignSortKey>,
    },

    /// Show one campaign
    Get {
        /// Campaign ID
        id: String,
    },

    /// Create a campaign
    Create {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Landing URL (defaults to a slug of the name)
        #[arg(long)]
        url: Option<String>,

        /// Create the campaign inactive
        #[arg(long)]
        inactive: bool,
    },

    /// Edit a campaign; unspecified fields keep their current value
    Update {
        /// Campaign ID
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        url: Option<String>,

        /// Set the active flag
        #[arg(long, action = clap::ArgAction::Set)]
        active: Option<bool>,
    },

    /// Delete a campaign
    #[command(alias = "rm")]
    Delete {
        /// Campaign ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SEGMENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SegmentsArgs {
    #[command(subcommand)]
    pub command: SegmentsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SegmentsCommand {
    /// List segments
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        view: ViewArgs,

        /// Restrict the search to one column (name, group_name, gender,
        /// campaign_name)
        #[arg(long)]
        field: Option<SegmentField>,

        /// Sort column: id, name, campaign_name, group_name, gender, age,
        /// updated_at, created_at
        #[arg(long)]
        sort: Option<SegmentSortKey>,
    },

    /// Show one segment
    Get {
        /// Segment ID
        id: String,
    },

    /// Create a segment
    Create(SegmentFields),

    /// Edit a segment; unspecified fields keep their current value
    Update {
        /// Segment ID
        id: String,

        #[command(flatten)]
        fields: SegmentFields,
    },

    /// Delete a segment
    #[command(alias = "rm")]
    Delete {
        /// Segment ID
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct SegmentFields {
    #[arg(long)]
    pub name: Option<String>,

    /// Target campaign ID
    #[arg(long = "campaign")]
    pub campaign_id: Option<String>,

    #[arg(long = "group")]
    pub group_name: Option<String>,

    /// m, f or any
    #[arg(long)]
    pub gender: Option<String>,

    #[arg(long)]
    pub min_age: Option<String>,

    #[arg(long)]
    pub max_age: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  GROUPS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct GroupsArgs {
    #[command(subcommand)]
    pub command: GroupsCommand,
}

#[derive(Debug, Subcommand)]
pub enum GroupsCommand {
    /// List known group names
    #[command(alias = "ls")]
    List,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Add a profile to the config file (prompts unless --api-url is given)
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the config file location
    Path,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
