//! Engine settings.
//!
//! Values come from the process environment, after a `.env` file in the
//! working directory (if any) has been loaded into it:
//!
//! - `RELALG_STORE_DIR`: where snapshots and tuple stores are written.
//! - `RELALG_INDEX`: index backend of new and loaded tables (`tree`, `hash`
//!   or `none`).
//! - `RELALG_STRING_WIDTH`: bytes reserved per string field in the tuple
//!   store.

use std::path::PathBuf;

use crate::persistence::{Error, IndexKind, Result};

pub const DEFAULT_STORE_DIR: &str = "store";
pub const DEFAULT_STRING_WIDTH: u16 = 64;

const STORE_DIR_VAR: &str = "RELALG_STORE_DIR";
const INDEX_VAR: &str = "RELALG_INDEX";
const STRING_WIDTH_VAR: &str = "RELALG_STRING_WIDTH";

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub store_dir: PathBuf,
    pub index_kind: IndexKind,
    pub string_width: u16,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            store_dir: PathBuf::from(DEFAULT_STORE_DIR),
            index_kind: IndexKind::default(),
            string_width: DEFAULT_STRING_WIDTH,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<EngineConfig> {
        //! Load `.env`, then read the `RELALG_*` variables. A missing `.env`
        //! file is not an error.

        dotenvy::dotenv().ok();
        EngineConfig::from_vars(|name| std::env::var(name).ok())
    }

    pub fn from_vars<F>(lookup: F) -> Result<EngineConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        //! Build a config from any variable source; unset variables keep
        //! their defaults.

        let mut config = EngineConfig::default();

        if let Some(dir) = lookup(STORE_DIR_VAR) {
            config.store_dir = PathBuf::from(dir);
        }
        if let Some(kind) = lookup(INDEX_VAR) {
            config.index_kind = kind.parse()?;
        }
        if let Some(width) = lookup(STRING_WIDTH_VAR) {
            config.string_width = width.trim().parse().map_err(|_| Error::InvalidConfig {
                name: STRING_WIDTH_VAR.to_string(),
                value: width.clone(),
            })?;
        }

        Ok(config)
    }
}
