use anyhow::{Context, Result};
use semester_core::RiskPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// IANA zone used for timestamps without an offset.
    pub timezone: String,
    /// `tracing` filter directive, overridden by `RUST_LOG`.
    pub log_level: String,
    pub policy: RiskPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            log_level: "warn".to_string(),
            policy: RiskPolicy::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: Config =
        toml::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
    cfg.policy
        .validate()
        .map_err(|e| anyhow::anyhow!("{}: [policy] {e}", path.display()))?;
    Ok(cfg)
}

pub fn save_config(path: &Path, cfg: &Config) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config already exists: {}", path.display());
        return Ok(());
    }
    save_config(path, &Config::default())?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// Effective config as TOML, headed by its path. The timezone is printed
/// as given and not checked here.
pub fn show_config(path: &Path, tz_override: Option<&str>) -> Result<String> {
    let mut cfg = load_config(path)?;
    if let Some(tz) = tz_override {
        cfg.timezone = tz.to_string();
    }
    let body = toml::to_string_pretty(&cfg).context("serialize config")?;
    Ok(format!("# {}\n{body}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn partial_policy_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(
            &p,
            "timezone = \"Asia/Jerusalem\"\n\n[policy]\ndanger_days_left = 3.0\ndanger_top_n = 5\n",
        )
        .unwrap();

        let cfg = load_config(&p).unwrap();
        assert_eq!(cfg.timezone, "Asia/Jerusalem");
        assert_eq!(cfg.log_level, "warn");
        assert_eq!(cfg.policy.danger_days_left, 3.0);
        assert_eq!(cfg.policy.danger_top_n, 5);
        assert_eq!(cfg.policy.high_tier_from, 7.0);
    }

    #[test]
    fn invalid_policy_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[policy]\nlow_tier_below = 9.0\nhigh_tier_from = 2.0\n").unwrap();
        assert!(load_config(&p).is_err());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.policy.neutral_score = 4.0;
        save_config(&p, &cfg).unwrap();
        assert_eq!(load_config(&p).unwrap(), cfg);
    }

    #[test]
    fn init_leaves_a_broken_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        let broken = "[policy]\nlow_tier_below = 9.0\nhigh_tier_from = 2.0\n";
        fs::write(&p, broken).unwrap();
        init_config(&p).unwrap();
        assert_eq!(fs::read_to_string(&p).unwrap(), broken);
    }

    #[test]
    fn show_does_not_check_the_timezone() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "timezone = \"Mars/Olympus\"\n").unwrap();
        let text = show_config(&p, None).unwrap();
        assert!(text.contains("timezone = \"Mars/Olympus\""), "{text}");

        let text = show_config(&p, Some("Nowhere/Else")).unwrap();
        assert!(text.contains("Nowhere/Else"), "{text}");
    }
}
