pub mod config;
pub mod file;
pub mod geoip;
pub mod rdap;
pub mod time;
