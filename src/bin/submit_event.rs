use clap::Parser;
use event_logger::collector::FormCollector;
use event_logger::error::{other_error, Error};
use event_logger::submission::SubmissionRecord;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000/api/submit";

/// Submit one event record to a running event logger
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file holding the form record
    record: PathBuf,
    /// Submission endpoint of the server
    #[arg(long, env = "SUBMIT_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();

    let content = fs::read_to_string(&args.record).map_err(Error::from)?;
    let record: SubmissionRecord = serde_json::from_str(&content).map_err(Error::from)?;

    let mut collector = FormCollector::new(&args.endpoint);
    *collector.draft_mut() = record;

    println!("Submitting '{}' to {}...", collector.draft().event_name, args.endpoint);
    let reply = collector.submit().await?;

    if reply.success {
        println!("✅ {}", reply.message);
        Ok(())
    } else {
        for field in &reply.errors {
            println!("  {}", field);
        }
        if let Some(completed) = &reply.completed {
            println!(
                "  completed before failure: sheet row {}, {} calendar event(s), task {}",
                if completed.sheet_appended { "yes" } else { "no" },
                completed.events_created,
                if completed.task_created { "yes" } else { "no" },
            );
        }
        Err(other_error(&format!("❌ {}", reply.message)).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_take_record_and_endpoint() {
        let args = Args::try_parse_from([
            "submit_event",
            "winter_break.json",
            "--endpoint",
            "http://logger.local/api/submit",
        ])
        .unwrap();
        assert_eq!(args.record, PathBuf::from("winter_break.json"));
        assert_eq!(args.endpoint, "http://logger.local/api/submit");
    }

    #[test]
    fn test_args_require_record() {
        assert!(Args::try_parse_from(["submit_event"]).is_err());
    }

    #[test]
    fn test_args_reject_unknown_flags() {
        assert!(Args::try_parse_from(["submit_event", "record.json", "--verbose"]).is_err());
    }
}
