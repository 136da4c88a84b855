//! # chatpulse CLI
//!
//! Command-line interface for the chatpulse library.

use std::fs;
use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use chatpulse::analytics::display::{day_name, format_duration};
use chatpulse::analytics::{ChartData, HeatmapCell, Report, Stopwords};
use chatpulse::cli::Args;
use chatpulse::config::{IngestConfig, WordCloudConfig};
use chatpulse::core::{FilterConfig, apply_filters, write_report};
use chatpulse::format::{OutputFormat, write_to_format};
use chatpulse::identity::IdentityTable;
use chatpulse::ingest::{RawImport, parse_import};
use chatpulse::parser::InputFormat;
use chatpulse::progress::{ProgressReporter, stderr_progress};
use chatpulse::ChatpulseError;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(&args);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(args: &Args) {
    let filter = if args.verbose {
        EnvFilter::new(args.log_level())
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(args.log_level()))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn run(args: &Args) -> Result<(), ChatpulseError> {
    let total_start = Instant::now();

    let file_name = Path::new(&args.input)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.input.clone());
    let format = match args.format {
        Some(arg) => InputFormat::from(arg),
        None => InputFormat::from_file_name(&file_name)?,
    };

    println!("📊 chatpulse v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input);
    println!("📄 Format:  {}", format);

    let mut config = IngestConfig::new().with_time_zone(args.time_zone());
    if let Some(ref path) = args.identities {
        let identities = IdentityTable::from_json_str(&fs::read_to_string(path)?)?;
        println!(
            "🪪 Names:   {} phones, {} aliases",
            identities.phone_count(),
            identities.alias_count()
        );
        config = config.with_identities(identities);
    }

    let filter = build_filter(args)?;
    let words = build_word_config(args)?;
    println!();

    // Step 1: Ingest
    println!("⏳ Parsing {}...", file_name);
    let parse_start = Instant::now();
    let bytes = fs::read(&args.input)?;
    let raw = RawImport::new(format, file_name, String::from_utf8_lossy(&bytes));
    let progress = if args.progress {
        ProgressReporter::new(stderr_progress())
    } else {
        ProgressReporter::silent()
    };
    let parsed = parse_import(&raw, config, &progress)?;
    println!(
        "   Found {} messages ({:.2}s)",
        parsed.messages.len(),
        parse_start.elapsed().as_secs_f64()
    );

    if parsed.is_empty() {
        println!("⚠️  No messages recognized in {}", args.input);
    }

    // Step 2: Analyze
    println!("🔍 Computing charts...");
    let charts = ChartData::compute(&parsed.messages, &filter, &words);
    print_report(parsed.group_name.as_deref(), &charts, args.top);

    // Step 3: Write outputs
    if let Some(ref export) = args.export {
        let export_format = OutputFormat::from_path(export)?;
        let selected = apply_filters(parsed.messages.clone(), &filter);
        write_to_format(&selected, export, export_format)?;
        println!();
        println!("💾 Exported {} messages as {} to {}", selected.len(), export_format, export);
    }

    if let Some(ref output) = args.output {
        write_report(&Report::new(parsed.group_name.clone(), charts), output)?;
        println!("💾 Report saved to {}", output);
    }

    println!();
    println!("✅ Done in {:.2}s", total_start.elapsed().as_secs_f64());
    Ok(())
}

fn build_filter(args: &Args) -> Result<FilterConfig, ChatpulseError> {
    let mut filter = FilterConfig::new().with_users(args.users.iter().cloned());

    if let Some(ref after) = args.after {
        filter = filter.with_date_from(after)?;
        println!("📅 After:   {}", after);
    }
    if let Some(ref before) = args.before {
        filter = filter.with_date_to(before)?;
        println!("📅 Before:  {}", before);
    }
    if filter.has_user_filter() {
        println!("👤 Users:   {}", args.users.join(", "));
    }

    Ok(filter)
}

fn build_word_config(args: &Args) -> Result<WordCloudConfig, ChatpulseError> {
    let mut config = WordCloudConfig::new().with_min_count(args.min_count);
    if let Some(ref path) = args.stopwords {
        let stopwords = Stopwords::from_json_str(&fs::read_to_string(path)?)?;
        println!("🚫 Stopwords: {} words from {}", stopwords.len(), path);
        config = config.with_stopwords(stopwords);
    }
    Ok(config)
}

fn print_report(group_name: Option<&str>, charts: &ChartData, top: usize) {
    let summary = &charts.summary;

    println!();
    if let Some(name) = group_name {
        println!("👥 Group:   {}", name);
    }
    println!("📈 Summary:");
    println!("   Messages:      {}", summary.total_messages);
    println!("   Participants:  {}", summary.total_participants);
    if let Some(range) = summary.date_range {
        println!(
            "   Period:        {} → {}",
            range.start.format("%Y-%m-%d %H:%M"),
            range.end.format("%Y-%m-%d %H:%M")
        );
    }
    if let Some(day) = summary.most_active_day {
        println!("   Busiest day:   {} ({} messages)", day.date, day.count);
    }

    if !charts.user_stats.is_empty() {
        println!();
        println!("🗣️  Top users:");
        for (rank, user) in charts.user_stats.iter().take(top).enumerate() {
            println!(
                "   {:>2}. {:<24} {:>6} msgs  {:>4} replies  avg {}",
                rank + 1,
                user.name,
                user.message_count,
                user.replies_received,
                format_duration(user.avg_response_time)
            );
        }
    }

    if let Some(cell) = peak_cell(&charts.heatmap) {
        println!();
        println!(
            "🔥 Peak hour:  {} {:02}h ({} messages)",
            day_name(cell.day_of_week as usize).unwrap_or("?"),
            cell.hour,
            cell.count
        );
    }

    if !charts.word_frequencies.is_empty() {
        let words: Vec<String> = charts
            .word_frequencies
            .iter()
            .take(top)
            .map(|w| format!("{} ({})", w.text, w.count))
            .collect();
        println!();
        println!("💬 Top words:  {}", words.join(", "));
    }

    if !charts.thread_flows.is_empty() {
        println!();
        println!("🔗 Mentions:");
        for flow in charts.thread_flows.iter().take(top) {
            println!("   {} → {}: {}", flow.source, flow.target, flow.value);
        }
    }
}

/// Busiest non-empty slot, earliest in the week on ties.
fn peak_cell(cells: &[HeatmapCell]) -> Option<&HeatmapCell> {
    cells
        .iter()
        .filter(|c| c.count > 0)
        .fold(None, |best: Option<&HeatmapCell>, c| match best {
            Some(b) if b.count >= c.count => Some(b),
            _ => Some(c),
        })
}
