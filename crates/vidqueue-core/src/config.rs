use serde::Deserialize;

use crate::routes::Routes;

pub const DEFAULT_CHANNEL_PATH: &str =
  "/ws";
pub const DEFAULT_RECONNECT_DELAY_MS: u32 =
  5_000;

/// Client settings, read from the TOML asset compiled into the frontend.
#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct ClientConfig {
  /// Prefix for every HTTP route. Empty means same origin.
  pub api_base:           String,
  pub channel_path:       String,
  pub reconnect_delay_ms: u32
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      api_base:           String::new(),
      channel_path:
        DEFAULT_CHANNEL_PATH.to_string(),
      reconnect_delay_ms:
        DEFAULT_RECONNECT_DELAY_MS
    }
  }
}

impl ClientConfig {
  pub fn from_toml_str(
    raw: &str
  ) -> Result<Self, toml::de::Error> {
    let mut config: Self =
      toml::from_str(raw)?;
    config.sanitize();
    Ok(config)
  }

  fn sanitize(&mut self) {
    if self.reconnect_delay_ms == 0 {
      tracing::warn!(
        "reconnect delay of zero \
         replaced with default"
      );
      self.reconnect_delay_ms =
        DEFAULT_RECONNECT_DELAY_MS;
    }

    let path = self.channel_path.trim();
    if path.is_empty() {
      self.channel_path =
        DEFAULT_CHANNEL_PATH.to_string();
    } else if !path.starts_with('/') {
      self.channel_path =
        format!("/{path}");
    }
  }

  pub fn routes(&self) -> Routes {
    Routes::new(&self.api_base)
  }
}
