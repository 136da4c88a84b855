//! Everything a dashboard needs for one filter selection.

use serde::{Deserialize, Serialize};

use super::heatmap::{HeatmapCell, heatmap};
use super::summary::{SummaryData, summary};
use super::threads::{ThreadFlow, thread_flows};
use super::users::{UserStats, user_stats};
use super::words::{WordFrequency, word_frequencies};
use crate::Message;
use crate::config::WordCloudConfig;
use crate::core::filter::FilterConfig;

/// Analytics computed for a transcript and a filter selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    /// Over the whole transcript, ignoring the filter.
    pub summary: SummaryData,

    /// Over the whole transcript, ignoring the filter.
    pub all_user_stats: Vec<UserStats>,

    /// `all_user_stats` restricted to the selected users.
    pub user_stats: Vec<UserStats>,

    pub heatmap: Vec<HeatmapCell>,
    pub word_frequencies: Vec<WordFrequency>,
    pub thread_flows: Vec<ThreadFlow>,
}

impl ChartData {
    /// Computes every chart.
    ///
    /// The summary and the full user table always describe the whole
    /// transcript. The heatmap, word cloud and flows only see messages that
    /// pass `filter`.
    ///
    /// ```rust
    /// use chatpulse::analytics::ChartData;
    /// use chatpulse::config::WordCloudConfig;
    /// use chatpulse::core::filter::FilterConfig;
    /// use chatpulse::Message;
    /// use chrono::NaiveDate;
    ///
    /// let ts = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
    /// let messages = vec![Message::new(ts, "Ana", "oi"), Message::new(ts, "Rui", "olá")];
    ///
    /// let charts = ChartData::compute(
    ///     &messages,
    ///     &FilterConfig::new().with_user("Rui"),
    ///     &WordCloudConfig::default(),
    /// );
    /// assert_eq!(charts.summary.total_participants, 2);
    /// assert_eq!(charts.user_stats.len(), 1);
    /// assert_eq!(charts.heatmap.iter().map(|c| c.count).sum::<usize>(), 1);
    /// ```
    pub fn compute(messages: &[Message], filter: &FilterConfig, words: &WordCloudConfig) -> Self {
        let all_user_stats = user_stats(messages);
        let selected: Vec<UserStats> = all_user_stats
            .iter()
            .filter(|s| filter.selects_user(&s.name))
            .cloned()
            .collect();

        let filtered: Vec<Message> = if filter.is_active() {
            messages.iter().filter(|m| filter.matches(m)).cloned().collect()
        } else {
            messages.to_vec()
        };

        Self {
            summary: summary(messages),
            all_user_stats,
            user_stats: selected,
            heatmap: heatmap(&filtered),
            word_frequencies: word_frequencies(&filtered, words),
            thread_flows: thread_flows(&filtered),
        }
    }
}

/// A full analytics report, ready for export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub group_name: Option<String>,

    #[serde(flatten)]
    pub charts: ChartData,
}

impl Report {
    pub fn new(group_name: Option<String>, charts: ChartData) -> Self {
        Self { group_name, charts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(d: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, d)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn transcript() -> Vec<Message> {
        vec![
            Message::system(at(1), "Ana criou o grupo \"Praia\""),
            Message::new(at(1), "Ana", "praia amanhã"),
            Message::new(at(2), "Rui", "@Ana praia sim").with_reply_to("Ana"),
            Message::new(at(3), "Eva", "praia"),
            Message::new(at(9), "Rui", "praia praia"),
        ]
    }

    #[test]
    fn test_unfiltered_uses_everything() {
        let config = WordCloudConfig::new().with_min_count(1);
        let charts = ChartData::compute(&transcript(), &FilterConfig::new(), &config);
        assert_eq!(charts.summary.total_messages, 5);
        assert_eq!(charts.user_stats, charts.all_user_stats);
        assert_eq!(charts.heatmap.iter().map(|c| c.count).sum::<usize>(), 4);
        assert_eq!(charts.word_frequencies[0].text, "praia");
        assert_eq!(charts.word_frequencies[0].count, 5);
        assert_eq!(charts.thread_flows.len(), 1);
    }

    #[test]
    fn test_filter_restricts_charts_not_summary() {
        let filter = FilterConfig::new()
            .with_user("Rui")
            .with_date_to("2024-05-05")
            .unwrap();
        let config = WordCloudConfig::new().with_min_count(1);
        let charts = ChartData::compute(&transcript(), &filter, &config);

        assert_eq!(charts.summary.total_participants, 3);
        assert_eq!(charts.all_user_stats.len(), 3);
        assert_eq!(charts.user_stats.len(), 1);
        assert_eq!(charts.user_stats[0].message_count, 2);
        assert_eq!(charts.heatmap.iter().map(|c| c.count).sum::<usize>(), 1);
        assert_eq!(charts.thread_flows[0].source, "Rui");
    }

    #[test]
    fn test_report_flattens_charts() {
        let charts = ChartData::compute(&transcript(), &FilterConfig::new(), &WordCloudConfig::new());
        let json = serde_json::to_value(Report::new(Some("Praia".into()), charts)).unwrap();
        assert_eq!(json["groupName"], "Praia");
        assert_eq!(json["summary"]["totalMessages"], 5);
        assert!(json["allUserStats"].is_array());
        assert_eq!(json["heatmap"].as_array().unwrap().len(), 168);
    }
}
