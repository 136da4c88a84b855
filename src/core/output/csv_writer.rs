//! CSV output writer.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::Message;
use crate::error::{ChatpulseError, Result};

const HEADER: [&str; 5] = ["timestamp", "sender", "content", "replyTo", "isSystemMessage"];

/// Writes messages to a comma-separated file.
///
/// # Format
/// - Delimiter: `,`
/// - Columns: `timestamp`, `sender`, `content`, `replyTo`, `isSystemMessage`
/// - Timestamps: ISO-8601 local time without offset
/// - Encoding: UTF-8
///
/// The file can be ingested again as a CSV transcript.
pub fn write_csv(messages: &[Message], output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(messages, file)
}

/// Converts messages to a CSV string.
pub fn to_csv(messages: &[Message]) -> Result<String> {
    let mut buf = Vec::new();
    write_records(messages, &mut buf)?;
    String::from_utf8(buf).map_err(|e| ChatpulseError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

fn write_records<W: Write>(messages: &[Message], out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().from_writer(out);
    writer.write_record(HEADER)?;

    for msg in messages {
        writer.write_record([
            msg.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string().as_str(),
            msg.sender.as_str(),
            msg.content.as_str(),
            msg.reply_to().unwrap_or_default(),
            if msg.is_system_message { "true" } else { "false" },
        ])?;
    }

    writer.flush()?;
    Ok(())
}
