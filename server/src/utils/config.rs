use crate::management::utils::cleanup_rule::CleanupRule;
use crate::utils::logging::*;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use tokio::sync::RwLock;

lazy_static! {
    static ref CONFIG: RwLock<Config> = RwLock::new(Config::new());
}

#[derive(Debug, Deserialize)]
struct ConfigTable {
    #[serde(rename = "Config")]
    config: Config,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    pub internal_timestamp: u64, //milliseconds
    pub http_server_bind_port: u16, //port
    pub bind_retry_duration: u64, //seconds
    pub detector_script: String, //path
    pub detector_model: String, //path
    pub detector_confidence: f64, //ratio
    pub detector_timeout: u64, //seconds
    pub upload_folder: String, //path
    pub visualization_folder: String, //path
    pub max_upload_size: usize, //bytes
    pub invoice_prefix: String, //text
    pub cleanup_interval: u64, //seconds
    pub cleanup_rules: Vec<CleanupRule>,
}

impl Config {
    pub fn new() -> Self {
        //Startup must abort when the configuration is unusable.
        match fs::read_to_string("./server.toml") {
            Ok(toml_string) => {
                match toml::from_str::<ConfigTable>(&toml_string) {
                    Ok(config_table) => {
                        let config = config_table.config;
                        if !Self::validate(&config) {
                            logging_console!(emergency_entry!("Invalid configuration file"));
                            panic!("Invalid configuration file");
                        }
                        config
                    },
                    Err(err) => {
                        logging_console!(emergency_entry!("Unable to parse configuration file", format!("Err: {err}")));
                        panic!("Unable to parse configuration file");
                    },
                }
            },
            Err(err) => {
                logging_console!(emergency_entry!("Configuration file not found", format!("Err: {err}")));
                panic!("Configuration file not found");
            },
        }
    }

    pub async fn now() -> Config {
        CONFIG.read().await.clone()
    }

    pub async fn update(config: Config) {
        *CONFIG.write().await = config
    }

    pub fn validate(config: &Config) -> bool {
        Config::validate_mini_second(config.internal_timestamp)
            && Config::validate_second(config.bind_retry_duration)
            && Config::validate_path(&config.detector_script)
            && Config::validate_path(&config.detector_model)
            && Config::validate_ratio(config.detector_confidence)
            && Config::validate_second(config.detector_timeout)
            && Config::validate_path(&config.upload_folder)
            && Config::validate_path(&config.visualization_folder)
            && Config::validate_size(config.max_upload_size)
            && Config::validate_prefix(&config.invoice_prefix)
            && Config::validate_second(config.cleanup_interval)
            && config.cleanup_rules.iter().all(Config::validate_cleanup_rule)
    }

    fn validate_mini_second(second: u64) -> bool {
        second <= 60000
    }

    fn validate_second(second: u64) -> bool {
        second <= 3600
    }

    fn validate_ratio(ratio: f64) -> bool {
        (0.0..=1.0).contains(&ratio)
    }

    fn validate_path(path: &str) -> bool {
        !path.is_empty()
    }

    fn validate_prefix(prefix: &str) -> bool {
        !prefix.is_empty()
    }

    fn validate_size(size: usize) -> bool {
        size > 0_usize
    }

    fn validate_cleanup_rule(rule: &CleanupRule) -> bool {
        rule.max_age <= 2592000 && !rule.directory.is_empty() && Regex::new(&rule.pattern).is_ok()
    }
}
