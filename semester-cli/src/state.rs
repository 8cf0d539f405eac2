use anyhow::{Context, Result};
use std::path::PathBuf;

pub fn semester_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".semester"))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(semester_home()?.join("config.toml"))
}
