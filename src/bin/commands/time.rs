use chrono::{DateTime, Utc};
use grip::lens::time::{TimeDescription, TimeLens, TimeParseArgs};
use grip::lens::utils::OutputFormat;
use tabled::settings::Style;
use tabled::Table;

pub fn run(args: TimeParseArgs, reference: DateTime<Utc>, output_format: OutputFormat) {
    let lens = TimeLens::new();

    let results = match lens.describe(&args, reference) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return;
        }
    };

    format_output(&results, output_format);
}

fn format_output(results: &[TimeDescription], output_format: OutputFormat) {
    match output_format {
        OutputFormat::Table => {
            println!("{}", Table::new(results).with(Style::rounded()));
        }
        OutputFormat::Markdown => {
            println!("{}", Table::new(results).with(Style::markdown()));
        }
        OutputFormat::Json => match serde_json::to_string(results) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("ERROR: Failed to serialize to JSON: {}", e),
        },
        OutputFormat::JsonPretty => match serde_json::to_string_pretty(results) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("ERROR: Failed to serialize to JSON: {}", e),
        },
        OutputFormat::JsonLine => {
            for r in results {
                match serde_json::to_string(r) {
                    Ok(json) => println!("{}", json),
                    Err(e) => eprintln!("ERROR: Failed to serialize to JSON: {}", e),
                }
            }
        }
        OutputFormat::Psv => {
            println!("unix|rfc3339|date|human|elapsed_days");
            for r in results {
                println!(
                    "{}|{}|{}|{}|{}",
                    r.unix, r.rfc3339, r.date, r.human, r.elapsed_days
                );
            }
        }
    }
}
