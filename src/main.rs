#![allow(non_snake_case)]

mod cli;
mod clients;
mod config;
mod models;
mod service;

use std::env;

use crate::config::{AppConfig, SyncConfig};

#[tokio::main]
async fn main() {
    let file_config = match env::var("CONFIG_FILE") {
        Ok(path) => AppConfig::from_file(&path).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    };

    let get_prop = |key: &str| -> Option<String> {
        file_config.get(key).or_else(|| env::var(key).ok())
    };

    let config = match SyncConfig::resolve(get_prop) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = cli::cli(config).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
