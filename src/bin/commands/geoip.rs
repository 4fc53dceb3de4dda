use grip::lens::geoip::{GeoIpLens, GeoIpLookupArgs};
use grip::lens::utils::{format_record, OutputFormat};
use grip::GripConfig;

pub fn run(config: &GripConfig, args: GeoIpLookupArgs, output_format: OutputFormat) {
    let lens = GeoIpLens::new(&config.geoip_url, config.request_timeout());

    let rows = match lens.lookup(&args) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("ERROR: unable to get GeoIP information: {e}");
            return;
        }
    };
    match format_record(&rows, output_format) {
        Ok(output) => println!("{}", output),
        Err(e) => eprintln!("ERROR: {e}"),
    }
}
