//! Example: Using chatpulse as a library
//!
//! Ingests a small WhatsApp export and prints every chart.
//!
//! Run with: cargo run --example library_usage

use chatpulse::analytics::display::{day_name, format_duration};
use chatpulse::prelude::*;

const TRANSCRIPT: &str = "\
10/05/24, 19:00 - Ana criou o grupo \"Futebol de Terça\"
10/05/24, 19:01 - Ana adicionou \u{202A}+351 936 000 111\u{202C}
10/05/24, 19:02 - Ana: Futebol terça às 21h?
10/05/24, 19:04 - \u{202A}+351 936 000 111\u{202C}: Futebol sim, levo a bola
10/05/24, 19:10 - Xani: @\u{2068}Ana\u{2069} conta comigo para o futebol
11/05/24, 09:30 - Ana: Campo reservado para o futebol
11/05/24, 09:31 - Xani: Boa! futebol futebol";

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== chatpulse Library Usage Examples ===\n");

    // Example 1: Ingest with an identity table
    println!("1. Ingesting a TXT export:");
    let identities = IdentityTable::from_json_str(
        r#"{"phones": {"+351 936 000 111": "Nuno"}, "aliases": {"Xani": "Alexandre"}}"#,
    )?;
    let config = IngestConfig::new().with_identities(identities);
    let raw = RawImport::from_file_name("WhatsApp Chat - Futebol.txt", TRANSCRIPT)?;
    let parsed = Ingestor::new(config).ingest(&raw)?;

    println!("   Group: {}", parsed.group_name.as_deref().unwrap_or("-"));
    for msg in &parsed.messages {
        let marker = if msg.is_system_message() { "⚙" } else { " " };
        println!("   {} {} {}: {}", marker, msg.timestamp, msg.sender, msg.content);
    }

    // Example 2: Summary
    println!("\n2. Summary:");
    let s = summary(&parsed.messages);
    println!("   Messages: {}", s.total_messages);
    println!("   Participants: {}", s.total_participants);
    if let Some(day) = s.most_active_day {
        println!("   Busiest day: {} ({} messages)", day.date, day.count);
    }

    // Example 3: Per-user statistics
    println!("\n3. User statistics:");
    for user in user_stats(&parsed.messages) {
        println!(
            "   {:<10} {} msgs, {} replies, avg response {}",
            user.name,
            user.message_count,
            user.replies_received,
            format_duration(user.avg_response_time)
        );
    }

    // Example 4: Heatmap
    println!("\n4. Busy heatmap cells:");
    for cell in heatmap(&parsed.messages).iter().filter(|c| c.count > 0) {
        println!(
            "   {} {:02}h: {} messages",
            day_name(cell.day_of_week as usize).unwrap_or("?"),
            cell.hour,
            cell.count
        );
    }

    // Example 5: Word cloud
    println!("\n5. Word cloud (min count 2):");
    let words = WordCloudConfig::new().with_min_count(2);
    for word in word_frequencies(&parsed.messages, &words) {
        println!("   {} x{} size {:.1}", word.text, word.count, word.size);
    }

    // Example 6: Mention flows
    println!("\n6. Mention flows:");
    for flow in thread_flows(&parsed.messages) {
        println!("   {} → {}: {}", flow.source, flow.target, flow.value);
    }

    // Example 7: Filtered charts
    println!("\n7. Charts for Alexandre since 2024-05-11:");
    let filter = FilterConfig::new()
        .with_user("Alexandre")
        .with_date_from("2024-05-11")?;
    let charts = ChartData::compute(&parsed.messages, &filter, &words);
    println!("   Selected users: {}", charts.user_stats.len());
    println!(
        "   Heatmap total: {}",
        charts.heatmap.iter().map(|c| c.count).sum::<usize>()
    );

    // Example 8: Report and export
    println!("\n8. Report JSON:");
    let report = Report::new(parsed.group_name.clone(), charts);
    let json = serde_json::to_string_pretty(&report.charts.summary)?;
    println!("{}", json);

    let csv = to_csv(&apply_filters(parsed.messages, &filter))?;
    println!("\n   Filtered CSV export:\n{}", csv);

    println!("=== Examples complete! ===");
    Ok(())
}
