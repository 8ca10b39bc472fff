//! Clap derive structures for the `vidtube` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// vidtube -- browse, publish and curate videos from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "vidtube",
    version,
    about = "Browse and manage a vidtube video platform from the command line",
    long_about = "A command-line client for the vidtube REST API.\n\n\
        Signs in with the credentials of the active profile, then runs one\n\
        view of the platform: the home feed, a channel, a playlist, your studio.",
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
    #[arg(long, short = 'p', env = "VIDTUBE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL, including the version prefix (overrides profile)
    #[arg(long, short = 'u', env = "VIDTUBE_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "VIDTUBE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "VIDTUBE_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "VIDTUBE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
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
    /// Sign in, register, sign out
    Auth(AuthArgs),

    /// Browse, like, upload and save videos
    #[command(alias = "v")]
    Videos(VideosArgs),

    /// View and subscribe to channels
    #[command(alias = "ch")]
    Channel(ChannelArgs),

    /// Read and write comments on a video
    Comments(CommentsArgs),

    /// Manage your playlists
    #[command(alias = "pl")]
    Playlists(PlaylistsArgs),

    /// Post and manage short text posts
    Tweets(TweetsArgs),

    /// Channel dashboard: stats, edits, publish status
    Studio(StudioArgs),

    /// View and edit your account
    Profile(ProfileArgs),

    /// List the channels you subscribe to
    Subscriptions,

    /// Check that the backend is reachable
    Health,

    /// Show how a view path would be resolved for the current session
    Route(RouteArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Sign in with the profile's credentials and print the identity
    Login {
        /// Username (prompts for the password)
        #[arg(long, conflicts_with = "email")]
        username: Option<String>,

        /// Email (prompts for the password)
        #[arg(long)]
        email: Option<String>,
    },

    /// Create an account and sign in as it
    Register {
        #[arg(long)]
        fullname: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        username: String,

        /// Avatar image file
        #[arg(long)]
        avatar: Option<PathBuf>,

        /// Cover image file
        #[arg(long)]
        cover_image: Option<PathBuf>,
    },

    /// End the session on the backend
    Logout,

    /// Print the signed-in identity
    Whoami,
}

// ── Videos ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct VideosArgs {
    #[command(subcommand)]
    pub command: VideosCommand,
}

#[derive(Debug, Subcommand)]
pub enum VideosCommand {
    /// List the home feed
    #[command(alias = "ls")]
    List {
        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: u32,
    },

    /// Show one video
    Show {
        /// Video ID
        id: String,
    },

    /// Like or unlike a video
    Like {
        /// Video ID
        id: String,
    },

    /// Upload and publish a video
    Upload {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,

        /// Video file
        #[arg(long)]
        file: PathBuf,

        /// Thumbnail image
        #[arg(long)]
        thumbnail: PathBuf,
    },

    /// Save a video to one of your playlists
    Save {
        /// Video ID
        id: String,

        /// Playlist number as listed (1-based); prompts when omitted
        #[arg(long)]
        playlist: Option<usize>,
    },

    /// Videos you watched recently
    History,

    /// Videos you liked
    Liked,
}

// ── Channel ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ChannelArgs {
    #[command(subcommand)]
    pub command: ChannelCommand,
}

#[derive(Debug, Subcommand)]
pub enum ChannelCommand {
    /// Show a channel with its videos and posts
    Show {
        /// Channel username
        username: String,
    },

    /// Subscribe to or unsubscribe from a channel
    Subscribe {
        /// Channel username
        username: String,
    },
}

// ── Comments ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CommentsArgs {
    /// Video ID the comments belong to
    pub video: String,

    #[command(subcommand)]
    pub command: CommentsCommand,
}

#[derive(Debug, Subcommand)]
pub enum CommentsCommand {
    /// List comments on the video
    #[command(alias = "ls")]
    List,

    /// Add a comment
    Add { content: String },

    /// Replace the text of a comment
    Edit { id: String, content: String },

    /// Delete a comment
    #[command(alias = "rm")]
    Delete { id: String },

    /// Like or unlike a comment
    Like { id: String },
}

// ── Playlists ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PlaylistsArgs {
    #[command(subcommand)]
    pub command: PlaylistsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PlaylistsCommand {
    /// List your playlists
    #[command(alias = "ls")]
    List,

    /// Show a playlist with its videos
    Show { id: String },

    /// Create a playlist
    Create {
        name: String,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// Rename a playlist
    Rename {
        id: String,
        name: String,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// Delete a playlist
    #[command(alias = "rm")]
    Delete { id: String },

    /// Remove a video from a playlist
    Remove {
        /// Playlist ID
        id: String,
        /// Video ID
        video: String,
    },
}

// ── Tweets ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TweetsArgs {
    #[command(subcommand)]
    pub command: TweetsCommand,
}

#[derive(Debug, Subcommand)]
pub enum TweetsCommand {
    /// List your posts
    #[command(alias = "ls")]
    List,

    /// Post something
    Post { content: String },

    /// Replace the text of a post
    Edit { id: String, content: String },

    /// Delete a post
    #[command(alias = "rm")]
    Delete { id: String },

    /// Like or unlike a post
    Like { id: String },
}

// ── Studio ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StudioArgs {
    #[command(subcommand)]
    pub command: StudioCommand,
}

#[derive(Debug, Subcommand)]
pub enum StudioCommand {
    /// Channel totals
    Stats,

    /// All videos on your channel, published or not
    Videos,

    /// Edit a video's title and description
    Edit {
        id: String,

        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,

        /// Replacement thumbnail
        #[arg(long)]
        thumbnail: Option<PathBuf>,
    },

    /// Flip a video between published and draft
    Publish { id: String },

    /// Delete a video
    #[command(alias = "rm")]
    Delete { id: String },
}

// ── Profile ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Show your account and watch history
    Show,

    /// Update your full name and email
    Update {
        #[arg(long)]
        fullname: String,

        #[arg(long)]
        email: String,
    },

    /// Change your password (prompts for both)
    Password,

    /// Replace your avatar image
    Avatar { file: PathBuf },

    /// Replace your cover image
    Cover { file: PathBuf },
}

// ── Route ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RouteArgs {
    /// View path, e.g. /profile or /video/abc123
    pub path: String,

    /// Resolve as a signed-out visitor
    #[arg(long)]
    pub anonymous: bool,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive configuration wizard
    Init,

    /// Show the current configuration
    Show,

    /// Store the profile's password in the system keyring
    SetPassword,

    /// Print the config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}
