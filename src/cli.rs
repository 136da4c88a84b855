//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`FormatArg`] - Input format override
//!
//! ```rust
//! use chatpulse::cli::FormatArg;
//! use chatpulse::parser::InputFormat;
//!
//! let format: InputFormat = FormatArg::Json.into();
//! assert_eq!(format, InputFormat::Json);
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::TimeZoneSetting;

/// Analyze a WhatsApp group transcript (TXT export, JSON or CSV):
/// activity, response times, heatmap, word cloud and mention flows.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatpulse")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatpulse \"WhatsApp Chat with Amigos.txt\"
    chatpulse chat.txt --identities people.json -o report.json
    chatpulse chat.txt --user Ana --user Rui --after 2024-01-01
    chatpulse messages.csv --utc --export messages.json
    chatpulse export.dat --format json")]
pub struct Args {
    /// Path to the transcript
    pub input: String,

    /// Input format (inferred from the file extension when omitted)
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// JSON file with `phones` and `aliases` name tables
    #[arg(long, value_name = "FILE")]
    pub identities: Option<String>,

    /// JSON array of words replacing the built-in stopword list
    #[arg(long, value_name = "FILE")]
    pub stopwords: Option<String>,

    /// Restrict charts to this user (repeatable)
    #[arg(short, long = "user", value_name = "USER")]
    pub users: Vec<String>,

    /// Only chart messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Only chart messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Convert offset timestamps to UTC instead of the local zone
    #[arg(long)]
    pub utc: bool,

    /// Write the full analytics report as JSON
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Export the filtered messages (.csv or .json)
    #[arg(long, value_name = "FILE")]
    pub export: Option<String>,

    /// Number of users, words and flows printed
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Minimum occurrences for a word to reach the word cloud
    #[arg(long, default_value_t = 5)]
    pub min_count: usize,

    /// Print parse progress to stderr
    #[arg(long)]
    pub progress: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Zone used for structured timestamps carrying an offset.
    pub fn time_zone(&self) -> TimeZoneSetting {
        if self.utc {
            TimeZoneSetting::Utc
        } else {
            TimeZoneSetting::Local
        }
    }

    /// Default `tracing` directive when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }
}

/// Input format override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatArg {
    /// WhatsApp "Export chat" text
    #[value(alias = "wa")]
    Txt,

    /// JSON array of messages
    Json,

    /// CSV with a timestamp,sender,content header
    Csv,
}
