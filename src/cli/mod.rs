use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod interactive;
pub mod progress;

pub use interactive::run_interactive;
pub use progress::spawn_progress;

#[derive(Parser)]
#[command(
    name = "ytdigest",
    about = "yt-digest - Summarize YouTube videos from their captions using Gemini",
    version,
    long_about = "Fetches the captions of a YouTube video in the configured language and asks Gemini for a summary, optionally focused on the points you name. API keys are used for a single request and never stored."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log warnings and errors, and hide the progress spinner
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file (defaults to ./config.yaml or the user config directory)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize a single video
    Summarize {
        /// YouTube video URL
        #[arg(value_name = "URL")]
        url: String,

        /// Points the summary should focus on
        #[arg(short, long, value_name = "TEXT")]
        focus: Option<String>,

        /// Gemini API key
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        api_key: String,

        /// Output file path (prints to console if not specified)
        #[arg(short, long, value_name = "FILE", conflicts_with = "save")]
        output: Option<PathBuf>,

        /// Save to a generated file name in the current directory
        #[arg(long)]
        save: bool,

        /// Output format (defaults to the configured format)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Prompt for videos one after another until an empty URL is entered
    Interactive {
        /// Gemini API key (asked for when not provided)
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },

    /// Print the video identifier contained in a URL
    Id {
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Show configuration
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text
    Text,
    /// JSON with metadata
    Json,
    /// Markdown document
    Markdown,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "md",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <OutputFormat as ValueEnum>::from_str(s, true)
            .map_err(|_| anyhow::anyhow!("Unknown output format: {}", s))
    }
}
