use std::{env, sync::Arc};

use async_trait::async_trait;
use export_utils::{parse_flag, Charset};
use service::{
    config::{Config, ConfigService},
    ServiceError,
};
use tracing::warn;

pub const DEFAULT_PRODUCT_ID: &str = "-//ical-export//NONSGML v1.0//EN";

/// Reads the export settings from the process environment on every call.
pub struct ConfigServiceImpl;

#[async_trait]
impl ConfigService for ConfigServiceImpl {
    async fn get_config(&self) -> Result<Config, ServiceError> {
        Ok(load_config(|key| env::var(key).ok()))
    }
}

fn flag(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: bool) -> bool {
    match lookup(key) {
        None => default,
        Some(value) => parse_flag(&value).unwrap_or_else(|| {
            warn!("Ignoring {key}={value:?}, using {default}");
            default
        }),
    }
}

pub fn load_config(lookup: impl Fn(&str) -> Option<String>) -> Config {
    let product_id = lookup("ICAL_PRODUCT_ID")
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PRODUCT_ID.to_string());
    let output_charset = match lookup("ICAL_OUTPUT_CHARSET") {
        None => Charset::default(),
        Some(value) => value.parse().unwrap_or_else(|err| {
            warn!("{err}, using {}", Charset::default());
            Charset::default()
        }),
    };

    Config {
        product_id: Arc::from(product_id),
        fold_lines: flag(&lookup, "ICAL_FOLD_LINES", true),
        legacy_dtstamp: flag(&lookup, "ICAL_LEGACY_DTSTAMP", false),
        output_charset,
    }
}
