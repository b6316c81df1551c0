use std::io::ErrorKind;

use anyhow::Result;
use serde::Deserialize;
use tokio::{fs::File, io::AsyncReadExt};

use crate::source::{Difficulty, DEFAULT_API_URL};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub amount: u8,
    pub difficulty: Difficulty,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            amount: 5,
            difficulty: Difficulty::Medium,
        }
    }
}

impl Config {
    /// Reads a YAML config file, falling back to the defaults when the
    /// file does not exist. A file that exists but does not parse is an
    /// error.
    pub async fn load(path: &str) -> Result<Self> {
        let mut f = match File::open(path).await {
            Ok(f) => f,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("{} not found, using defaults", path);
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        let mut buf = Vec::new();
        f.read_to_end(&mut buf).await?;

        Ok(serde_yaml::from_slice(&buf)?)
    }
}
