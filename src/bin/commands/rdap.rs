use chrono::{DateTime, Utc};
use clap::Subcommand;
use grip::lens::fields::FieldRow;
use grip::lens::rdap::{
    EntrySelection, RdapClient, RdapEntryArgs, RdapLens, RdapNetworkArgs, RdapRecord,
};
use grip::lens::utils::{format_record, format_records, OutputFormat};
use grip::GripConfig;
use json_to_table::json_to_table;

#[derive(Subcommand)]
pub enum RdapCommands {
    /// Show the network object registered for an IP
    Network(RdapNetworkArgs),

    /// Show the registration entity with the most recent event
    Recent(RdapEntryArgs),

    /// Show the registration entity with the oldest event
    Oldest(RdapEntryArgs),

    /// List all registration entities, most recent first
    Entries {
        #[clap(flatten)]
        args: RdapEntryArgs,

        /// List oldest first instead
        #[clap(short, long)]
        descending: bool,
    },

    /// Show the full RDAP record
    Raw {
        /// IP address to look up
        #[clap(value_name = "IP")]
        ip: String,
    },
}

fn fetch_record(client: &RdapClient, ip: &str) -> grip::Result<RdapRecord> {
    client.fetch(ip)?.into_record(ip)
}

fn entries_output(
    lens: &RdapLens,
    record: &RdapRecord,
    args: &RdapEntryArgs,
    selection: EntrySelection,
    output_format: OutputFormat,
) -> grip::Result<String> {
    let records: Vec<Vec<FieldRow>> = lens
        .entry_views(record, args, selection)?
        .into_iter()
        .map(|view| view.rows)
        .collect();
    match selection {
        EntrySelection::MostRecent | EntrySelection::Oldest => match records.first() {
            Some(rows) => format_record(rows, output_format),
            None => Ok(String::new()),
        },
        EntrySelection::All | EntrySelection::AllDescending => {
            format_records(&records, output_format)
        }
    }
}

pub fn run(
    config: &GripConfig,
    command: RdapCommands,
    reference: DateTime<Utc>,
    output_format: OutputFormat,
) {
    let client = RdapClient::new(&config.rdap_url, config.request_timeout());
    let lens = RdapLens::new(reference);

    let result = match command {
        RdapCommands::Network(args) => fetch_record(&client, &args.ip).and_then(|record| {
            let rows = lens.network_rows(&record, &args.selection())?;
            format_record(&rows, output_format)
        }),
        RdapCommands::Recent(args) => fetch_record(&client, &args.ip).and_then(|record| {
            entries_output(&lens, &record, &args, EntrySelection::MostRecent, output_format)
        }),
        RdapCommands::Oldest(args) => fetch_record(&client, &args.ip).and_then(|record| {
            entries_output(&lens, &record, &args, EntrySelection::Oldest, output_format)
        }),
        RdapCommands::Entries { args, descending } => {
            let selection = if descending {
                EntrySelection::AllDescending
            } else {
                EntrySelection::All
            };
            fetch_record(&client, &args.ip).and_then(|record| {
                entries_output(&lens, &record, &args, selection, output_format)
            })
        }
        RdapCommands::Raw { ip } => fetch_record(&client, &ip).and_then(|record| {
            let value = record.into_value();
            match output_format {
                OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(&value)?),
                f if f.is_json() => Ok(value.to_string()),
                _ => {
                    let mut table = json_to_table(&value);
                    table.collapse();
                    Ok(table.to_string())
                }
            }
        }),
    };

    match result {
        Ok(output) => println!("{}", output),
        Err(e) if e.is_reserved() => println!("{}", e),
        Err(e) => eprintln!("ERROR: {}", e),
    }
}
