//! # Chatpulse
//!
//! A Rust library for turning group chat transcripts into activity analytics.
//!
//! ## Overview
//!
//! Chatpulse ingests a transcript in one of three formats:
//! - **TXT** - the line-oriented "Export chat" file produced by WhatsApp
//! - **JSON** - an array of `{timestamp, sender, content, replyTo?, isSystemMessage?}`
//! - **CSV** - the same fields as columns, header required
//!
//! Every format is normalized into one canonical [`Message`] sequence: sender
//! names are cleaned up and resolved through an [`IdentityTable`](identity::IdentityTable),
//! group-management events are flagged as system messages, and mentions are
//! kept as a lightweight `reply_to` hint.
//!
//! The [`analytics`] module then computes a summary, per-user response
//! statistics, a weekday × hour heatmap, word frequencies for a word cloud and
//! mention flows between users.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatpulse::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let transcript = "\
//! 15/03/24, 14:30 - Ana criou o grupo \"Praia\"
//! 15/03/24, 14:31 - Ana: Amanhã praia?
//! 15/03/24, 14:33 - Rui: @\u{2068}Ana\u{2069} sim!";
//!
//! let raw = RawImport::from_file_name("chat.txt", transcript)?;
//! let parsed = Ingestor::new(IngestConfig::default()).ingest(&raw)?;
//!
//! assert_eq!(parsed.group_name.as_deref(), Some("Praia"));
//!
//! let stats = user_stats(&parsed.messages);
//! assert_eq!(stats.len(), 2);
//! assert_eq!(thread_flows(&parsed.messages)[0].target, "Ana");
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - [`ingest`] - dispatcher from a raw `{format, fileName, content}` import
//! - [`parser`] - [`Parser`](parser::Parser) trait, [`InputFormat`](parser::InputFormat), [`create_parser`](parser::create_parser)
//! - [`parsers`] - [`TxtParser`](parsers::TxtParser), [`JsonParser`](parsers::JsonParser), [`CsvParser`](parsers::CsvParser)
//! - [`parsing`] - timestamp layouts, system phrases, mentions, group names
//! - [`identity`] - sender name normalization
//! - [`analytics`] - summary, user stats, heatmap, word frequencies, thread flows
//! - [`core`] - [`FilterConfig`](core::FilterConfig) and export writers
//! - [`config`] - ingestion and word cloud configuration
//! - [`progress`] - progress callbacks and cancellation
//! - [`error`] - unified error type ([`ChatpulseError`], [`Result`])
//! - [`prelude`] - convenient re-exports

pub mod analytics;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod identity;
pub mod ingest;
pub mod message;
pub mod parser;
pub mod parsers;
pub mod parsing;
pub mod progress;

// Re-export the main types at the crate root for convenience
pub use error::{ChatpulseError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatpulse::prelude::*;
/// ```
pub mod prelude {
    // Core message type
    pub use crate::Message;

    // Error types
    pub use crate::error::{ChatpulseError, Result};

    // Ingestion
    pub use crate::ingest::{Ingestor, ParseResult, RawImport, parse_import};
    pub use crate::parser::{InputFormat, Parser, create_parser};

    // Configuration
    pub use crate::config::{IngestConfig, TimeZoneSetting, WordCloudConfig};
    pub use crate::identity::IdentityTable;

    // Progress
    pub use crate::progress::{CancellationToken, ParseProgress, ProgressReporter};

    // Analytics
    pub use crate::analytics::{
        ChartData, Report, Stopwords, heatmap, summary, thread_flows, user_stats, word_frequencies,
    };

    // Filtering and export
    pub use crate::core::filter::{FilterConfig, apply_filters};
    pub use crate::core::output::{to_csv, to_json, write_csv, write_json, write_report};
    pub use crate::format::OutputFormat;
}
