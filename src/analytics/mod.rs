//! Analytics over canonical messages.
//!
//! Each function takes a slice of [`Message`](crate::Message) in source
//! order and returns plain serializable data:
//!
//! | Function | Output |
//! |----------|--------|
//! | [`summary`] | totals, date range, busiest day |
//! | [`user_stats`] | per-author counts and response times |
//! | [`heatmap`] | 7 × 24 activity grid |
//! | [`word_frequencies`] | word cloud entries |
//! | [`thread_flows`] | mention links between users |
//!
//! System messages are ignored everywhere except in
//! [`SummaryData::total_messages`]. Ties are always broken by first
//! appearance.

pub mod dashboard;
pub mod display;
pub mod heatmap;
pub mod stopwords;
pub mod summary;
mod tally;
pub mod threads;
pub mod users;
pub mod words;

pub use dashboard::{ChartData, Report};
pub use heatmap::{HeatmapCell, UserCount, heatmap};
pub use stopwords::Stopwords;
pub use summary::{ActiveDay, DateRange, SummaryData, summary};
pub use threads::{ThreadFlow, thread_flows};
pub use users::{UserStats, user_stats};
pub use words::{WordFrequency, word_frequencies};
