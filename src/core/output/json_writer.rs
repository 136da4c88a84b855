//! JSON output writer.

use std::fs;
use std::path::Path;

use crate::Message;
use crate::analytics::Report;
use crate::error::Result;

/// Writes messages to a JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {"timestamp": "2024-01-01T10:00:00", "sender": "Ana", "content": "Olá", "isSystemMessage": false}
/// ]
/// ```
///
/// The file can be ingested again as a JSON transcript.
pub fn write_json(messages: &[Message], output_path: impl AsRef<Path>) -> Result<()> {
    fs::write(output_path, to_json(messages)?)?;
    Ok(())
}

/// Converts messages to a pretty-printed JSON array.
pub fn to_json(messages: &[Message]) -> Result<String> {
    Ok(serde_json::to_string_pretty(messages)?)
}

/// Writes an analytics report as pretty-printed JSON.
pub fn write_report(report: &Report, output_path: impl AsRef<Path>) -> Result<()> {
    fs::write(output_path, to_report_json(report)?)?;
    Ok(())
}

/// Converts an analytics report to pretty-printed JSON.
pub fn to_report_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::ChartData;
    use crate::config::WordCloudConfig;
    use crate::core::filter::FilterConfig;
    use chrono::NaiveDate;
    use tempfile::NamedTempFile;

    fn messages() -> Vec<Message> {
        let ts = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        vec![
            Message::new(ts, "Ana", "Olá"),
            Message::new(ts, "Rui", "@Ana oi").with_reply_to("Ana"),
        ]
    }

    #[test]
    fn test_to_json_basic() {
        let json = to_json(&messages()).unwrap();

        assert!(json.contains(r#""sender": "Ana""#));
        assert!(json.contains(r#""timestamp": "2024-06-15T12:30:00""#));
        assert!(json.contains(r#""replyTo": "Ana""#));
        assert_eq!(json.matches("replyTo").count(), 1);
    }

    #[test]
    fn test_write_json_file() {
        let temp_file = NamedTempFile::new().unwrap();
        write_json(&messages(), temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        let back: Vec<Message> = serde_json::from_str(&content).unwrap();
        assert_eq!(back, messages());
    }

    #[test]
    fn test_write_report() {
        let charts = ChartData::compute(&messages(), &FilterConfig::new(), &WordCloudConfig::new());
        let report = Report::new(None, charts);

        let temp_file = NamedTempFile::new().unwrap();
        write_report(&report, temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains(r#""totalMessages": 2"#));
        assert!(!content.contains("groupName"));
    }
}
