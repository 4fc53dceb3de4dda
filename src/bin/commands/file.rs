use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use grip::lens::fields::{FieldRow, FieldSelection};
use grip::lens::geoip::{GeoIpLens, GeoIpLookupArgs};
use grip::lens::ip_file::IpFileLens;
use grip::lens::rdap::{RdapClient, RdapLens};
use grip::lens::utils::{format_records, OutputFormat};
use grip::GripConfig;
use tracing::info;

/// Which service to query for each address
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LookupSource {
    #[default]
    Geoip,
    Rdap,
}

/// Arguments for the File command
#[derive(Args)]
pub struct FileArgs {
    /// Text file containing IPv4 addresses
    #[clap(value_name = "PATH")]
    pub path: PathBuf,

    /// Service to query for each address
    #[clap(short, long, value_enum, default_value_t = LookupSource::Geoip)]
    pub source: LookupSource,

    /// Show a progress bar while looking up addresses
    #[clap(short, long)]
    pub progress: bool,

    /// Fields to show for each address; all when omitted
    #[clap(value_name = "FIELD")]
    pub fields: Vec<String>,
}

struct Lookup {
    source: LookupSource,
    geoip: GeoIpLens,
    rdap: RdapClient,
    rdap_lens: RdapLens,
}

impl Lookup {
    fn rows(&self, ip: &str, fields: &[String]) -> grip::Result<Vec<FieldRow>> {
        match self.source {
            LookupSource::Geoip => {
                let args = GeoIpLookupArgs::new(ip).with_fields(fields.iter().cloned());
                self.geoip.lookup(&args)
            }
            LookupSource::Rdap => {
                let record = self.rdap.fetch(ip)?.into_record(ip)?;
                let selection: FieldSelection = fields.iter().map(String::as_str).collect();
                let mut rows = vec![("ip".to_string(), ip.to_string())];
                rows.extend(self.rdap_lens.network_rows(&record, &selection)?);
                Ok(rows)
            }
        }
    }
}

pub fn run(
    config: &GripConfig,
    args: FileArgs,
    reference: DateTime<Utc>,
    output_format: OutputFormat,
) {
    let FileArgs {
        path,
        source,
        progress,
        fields,
    } = args;

    let ips = match IpFileLens::new().and_then(|lens| lens.read_ips(&path)) {
        Ok(ips) => ips,
        Err(e) => {
            eprintln!("ERROR: unable to read {}: {}", path.display(), e);
            return;
        }
    };

    let lookup = Lookup {
        source,
        geoip: GeoIpLens::new(&config.geoip_url, config.request_timeout()),
        rdap: RdapClient::new(&config.rdap_url, config.request_timeout()),
        rdap_lens: RdapLens::new(reference),
    };

    let pb = if progress {
        let pb = indicatif::ProgressBar::new(ips.len() as u64);
        if let Ok(sty) = indicatif::ProgressStyle::with_template(
            "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {eta}",
        ) {
            pb.set_style(sty.progress_chars("##-"));
        }
        Some(pb)
    } else {
        None
    };

    let mut records = vec![];
    for ip in &ips {
        info!("looking up {}", ip);
        match lookup.rows(ip, &fields) {
            Ok(rows) => records.push(rows),
            Err(e) => {
                let msg = if e.is_reserved() {
                    e.to_string()
                } else {
                    format!("ERROR: {}", e)
                };
                match &pb {
                    Some(pb) => pb.println(msg),
                    None => eprintln!("{}", msg),
                }
            }
        }
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    match format_records(&records, output_format) {
        Ok(output) => println!("{}", output),
        Err(e) => eprintln!("ERROR: {e}"),
    }
}
