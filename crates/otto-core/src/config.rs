use otto_shared::LifecycleState;
use serde::{
  Deserialize,
  Serialize
};
use tracing::{
  debug,
  info,
  warn
};

use crate::error::ConfigError;

const FALLBACK_EMPTY_MESSAGE: &str =
  "No containers";

/// Board settings. Every key has a default so the page only needs to embed
/// the keys it wants to change.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Serialize,
  Deserialize,
)]
#[serde(default)]
pub struct BoardConfig {
  pub endpoint_prefix: String,
  pub debug_events:    bool,
  pub classes:         ClassNames,
  pub palette:         Palette,
  pub empty_messages:  EmptyMessages
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Serialize,
  Deserialize,
)]
#[serde(default)]
pub struct ClassNames {
  pub dragging:       String,
  pub loading:        String,
  pub zone_active:    String,
  pub zone_blocked:   String,
  pub drop_indicator: String,
  pub menu_open:      String,
  pub menu_divider:   String,
  pub empty_message:  String
}

/// Classes for the small state glyph on each card.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Serialize,
  Deserialize,
)]
#[serde(default)]
pub struct Palette {
  pub glyph_base: String,
  pub running:    String,
  pub paused:     String,
  pub stopped:    String
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Serialize,
  Deserialize,
)]
#[serde(default)]
pub struct EmptyMessages {
  pub running: String,
  pub paused:  String,
  pub stopped: String
}

impl Default for BoardConfig {
  fn default() -> Self {
    Self {
      endpoint_prefix: "/containers"
        .to_string(),
      debug_events:    false,
      classes:         ClassNames::default(
      ),
      palette:         Palette::default(),
      empty_messages:
        EmptyMessages::default()
    }
  }
}

impl Default for ClassNames {
  fn default() -> Self {
    Self {
      dragging:       "otto-dragging"
        .to_string(),
      loading:        "otto-loading"
        .to_string(),
      zone_active:    "otto-zone-active"
        .to_string(),
      zone_blocked:   "otto-zone-blocked"
        .to_string(),
      drop_indicator:
        "otto-drop-indicator".to_string(),
      menu_open:      "open".to_string(),
      menu_divider:
        "otto-dropdown-divider"
          .to_string(),
      empty_message:
        "text-xs text-text-muted px-2"
          .to_string()
    }
  }
}

impl Default for Palette {
  fn default() -> Self {
    Self {
      glyph_base: "w-2 h-2 rounded-full"
        .to_string(),
      running:    "bg-primary/60"
        .to_string(),
      paused:     "bg-[#D4A017]/70"
        .to_string(),
      stopped:    "bg-text-muted"
        .to_string()
    }
  }
}

impl Default for EmptyMessages {
  fn default() -> Self {
    Self {
      running: "No running containers"
        .to_string(),
      paused:  "No paused containers"
        .to_string(),
      stopped: "No stopped containers"
        .to_string()
    }
  }
}

impl Palette {
  pub fn for_state(
    &self,
    state: LifecycleState
  ) -> &str {
    match state {
      | LifecycleState::Running => {
        &self.running
      }
      | LifecycleState::Paused => {
        &self.paused
      }
      | LifecycleState::Stopped => {
        &self.stopped
      }
    }
  }
}

impl EmptyMessages {
  pub fn for_state(
    &self,
    state: LifecycleState
  ) -> &str {
    let message = match state {
      | LifecycleState::Running => {
        &self.running
      }
      | LifecycleState::Paused => {
        &self.paused
      }
      | LifecycleState::Stopped => {
        &self.stopped
      }
    };
    if message.trim().is_empty() {
      FALLBACK_EMPTY_MESSAGE
    } else {
      message
    }
  }
}

impl BoardConfig {
  pub fn from_toml_str(
    text: &str
  ) -> Result<Self, ConfigError> {
    Ok(toml::from_str(text)?)
  }

  /// Parses an optional inline override, falling back to defaults when it
  /// is absent or malformed.
  #[tracing::instrument(skip_all)]
  pub fn load_or_default(
    text: Option<&str>
  ) -> Self {
    let Some(text) = text
      .map(str::trim)
      .filter(|text| !text.is_empty())
    else {
      debug!(
        "no board config override; \
         using defaults"
      );
      return Self::default();
    };

    match Self::from_toml_str(text) {
      | Ok(config) => {
        info!(
          endpoint_prefix = %config.endpoint_prefix,
          debug_events = config.debug_events,
          "loaded board config override"
        );
        config
      }
      | Err(error) => {
        warn!(%error, "failed to parse board config; using defaults");
        Self::default()
      }
    }
  }
}
