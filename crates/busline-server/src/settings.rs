//! Runtime server configuration.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use busline_core::registry::RegistryPolicy;
use serde::Deserialize;

/// Deserialised from `config.toml`, overridden by `BUSLINE_*` environment
/// variables (`BUSLINE_POLICY__ELIGIBILITY__MIN_SAFETY_SCORE=80`).
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
  #[serde(default)]
  pub policy:     RegistryPolicy,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 5240 }

fn default_store_path() -> PathBuf { PathBuf::from("busline.db") }

impl ServerConfig {
  /// Layer the optional TOML file at `path` under the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("BUSLINE")
          .prefix_separator("_")
          .separator("__"),
      )
      .build()
      .context("failed to read config file")?;

    let mut cfg: ServerConfig = settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")?;
    cfg.store_path = expand_tilde(&cfg.store_path);
    Ok(cfg)
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_uses_defaults() {
    let cfg = ServerConfig::load(Path::new("/nonexistent/busline.toml")).unwrap();
    assert_eq!(cfg.port, 5240);
    assert_eq!(cfg.policy, RegistryPolicy::default());
  }

  #[test]
  fn file_overrides_policy() {
    let path = std::env::temp_dir().join(format!("busline-config-{}.toml", std::process::id()));
    std::fs::write(
      &path,
      r#"
port = 9000
store_path = "/var/lib/busline/registry.db"

[policy.eligibility]
min_safety_score = 80

[policy.penalties]
base_penalty = 10
tiers = [{ min_severity = 3, penalty = 20 }]
"#,
    )
    .unwrap();

    let cfg = ServerConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.store_path, PathBuf::from("/var/lib/busline/registry.db"));
    assert_eq!(cfg.policy.eligibility.min_safety_score, 80);
    assert_eq!(cfg.policy.eligibility.background_check_window_secs, 31_536_000);
    assert_eq!(cfg.policy.penalties.penalty_for(1), 10);
    assert_eq!(cfg.policy.penalties.penalty_for(3), 20);
  }

  #[test]
  fn tiers_without_base_penalty() {
    let path =
      std::env::temp_dir().join(format!("busline-tiers-{}.toml", std::process::id()));
    std::fs::write(
      &path,
      r#"
[policy.penalties]
tiers = [{ min_severity = 6, penalty = 40 }]
"#,
    )
    .unwrap();

    let cfg = ServerConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(cfg.policy.penalties.penalty_for(2), 5);
    assert_eq!(cfg.policy.penalties.penalty_for(6), 40);
  }

  #[test]
  fn tilde_is_expanded() {
    if let Ok(home) = std::env::var("HOME") {
      assert_eq!(expand_tilde(Path::new("~/x.db")), PathBuf::from(home).join("x.db"));
    }
    assert_eq!(expand_tilde(Path::new("/abs/x.db")), PathBuf::from("/abs/x.db"));
  }
}
