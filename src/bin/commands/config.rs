use grip::lens::utils::OutputFormat;
use grip::GripConfig;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ConfigInfo<'a> {
    config_file: String,
    #[serde(flatten)]
    settings: &'a GripConfig,
}

pub fn run(config: &GripConfig, output_format: OutputFormat) {
    let info = ConfigInfo {
        config_file: GripConfig::config_file_path(),
        settings: config,
    };

    if output_format.is_json() {
        let json = if output_format == OutputFormat::JsonPretty {
            serde_json::to_string_pretty(&info)
        } else {
            serde_json::to_string(&info)
        };
        match json {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("ERROR: Failed to serialize to JSON: {}", e),
        }
        return;
    }

    println!("Config File:        {}", info.config_file);
    println!("{}", config.summary());
}
