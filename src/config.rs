use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Runtime settings derived from environment variables.
#[derive(Debug, Clone)]
pub struct Settings {
    /// HTTP port, from `PORT`. Defaults to 3000.
    pub port: u16,
    /// Directory holding the JSON store files, from `DATA_DIR`. Defaults to
    /// the working directory.
    pub data_dir: PathBuf,
}

impl Settings {
    /// Loads settings, reading a `.env` file first when one exists.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let port = match env::var("PORT") {
            Ok(raw) if !raw.is_empty() => raw
                .parse()
                .with_context(|| format!("invalid PORT value: {raw}"))?,
            _ => 3000,
        };

        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        Ok(Self { port, data_dir })
    }

    pub fn recipes_path(&self) -> PathBuf {
        self.data_dir.join("recipes.json")
    }

    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join("users.json")
    }
}
