use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use log::debug;
use serde::Deserialize;

use crate::Seconds;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Us,
    Eu,
}

impl Region {
    pub fn api_base(&self) -> &'static str {
        match self {
            Region::Us => "https://api.mailgun.net",
            Region::Eu => "https://api.eu.mailgun.net",
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Which Mailgun region the sending domain belongs to
    pub region: Region,

    /// If supplied overrides the API base derived from `region`
    pub base_url: Option<String>,

    /// How long to wait for Mailgun before giving up
    pub timeout: Seconds,

    /// If supplied logs are also written to this file
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: Region::default(),
            base_url: None,
            timeout: 30.into(),
            log_file: None,
        }
    }
}

impl Config {
    pub fn load_from(config_path: &Path) -> anyhow::Result<Config> {
        debug!("Loading Config from: {config_path:?}");
        let file_contents = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read contents of {config_path:?}"))?;
        let result: Config = serde_json::from_str(&file_contents)
            .with_context(|| format!("Failed to parse contents of {config_path:?}"))?;
        anyhow::ensure!(
            u64::from(result.timeout) > 0,
            "timeout in {config_path:?} must be greater than 0"
        );
        Ok(result)
    }

    pub fn base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.clone(),
            None => self.region.api_base().to_string(),
        }
    }
}
