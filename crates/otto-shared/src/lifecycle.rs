use std::fmt;

use serde::{
  Deserialize,
  Serialize
};

/// Lifecycle column a container card lives in.
///
/// The lowercase spelling is the one the page uses for `data-state` and
/// `data-dropzone`.
#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
  Running,
  Paused,
  Stopped
}

impl LifecycleState {
  pub const ALL: [LifecycleState; 3] = [
    LifecycleState::Running,
    LifecycleState::Paused,
    LifecycleState::Stopped
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      | LifecycleState::Running => {
        "running"
      }
      | LifecycleState::Paused => {
        "paused"
      }
      | LifecycleState::Stopped => {
        "stopped"
      }
    }
  }

  /// Title-case label used by the header status pills.
  pub fn label(self) -> &'static str {
    match self {
      | LifecycleState::Running => {
        "Running"
      }
      | LifecycleState::Paused => {
        "Paused"
      }
      | LifecycleState::Stopped => {
        "Stopped"
      }
    }
  }

  /// Parses an attribute value. Anything outside the three known states is
  /// `None`, which callers treat as "no legal targets".
  pub fn from_attr(
    raw: &str
  ) -> Option<Self> {
    match raw.trim() {
      | "running" => {
        Some(LifecycleState::Running)
      }
      | "paused" => {
        Some(LifecycleState::Paused)
      }
      | "stopped" => {
        Some(LifecycleState::Stopped)
      }
      | _ => None
    }
  }
}

impl fmt::Display for LifecycleState {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Backend command that moves a container between lifecycle states.
#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleCommand {
  Start,
  Stop,
  Pause,
  Unpause
}

impl LifecycleCommand {
  pub fn as_str(self) -> &'static str {
    match self {
      | LifecycleCommand::Start => {
        "start"
      }
      | LifecycleCommand::Stop => "stop",
      | LifecycleCommand::Pause => {
        "pause"
      }
      | LifecycleCommand::Unpause => {
        "unpause"
      }
    }
  }

  pub fn from_attr(
    raw: &str
  ) -> Option<Self> {
    match raw.trim() {
      | "start" => {
        Some(LifecycleCommand::Start)
      }
      | "stop" => {
        Some(LifecycleCommand::Stop)
      }
      | "pause" => {
        Some(LifecycleCommand::Pause)
      }
      | "unpause" => {
        Some(LifecycleCommand::Unpause)
      }
      | _ => None
    }
  }
}

impl fmt::Display for LifecycleCommand {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

const TRANSITIONS: [(
  LifecycleState,
  LifecycleState,
  LifecycleCommand
); 4] = [
  (
    LifecycleState::Running,
    LifecycleState::Paused,
    LifecycleCommand::Pause
  ),
  (
    LifecycleState::Running,
    LifecycleState::Stopped,
    LifecycleCommand::Stop
  ),
  (
    LifecycleState::Paused,
    LifecycleState::Running,
    LifecycleCommand::Unpause
  ),
  (
    LifecycleState::Stopped,
    LifecycleState::Running,
    LifecycleCommand::Start
  )
];

/// Zones a card in `current` may be dropped on.
pub fn legal_targets(
  current: LifecycleState
) -> &'static [LifecycleState] {
  match current {
    | LifecycleState::Running => &[
      LifecycleState::Paused,
      LifecycleState::Stopped
    ],
    | LifecycleState::Paused => {
      &[LifecycleState::Running]
    }
    | LifecycleState::Stopped => {
      &[LifecycleState::Running]
    }
  }
}

pub fn is_legal(
  target: LifecycleState,
  current: LifecycleState
) -> bool {
  command_for(target, current).is_some()
}

/// Command that moves a `current` card into `target`, if that is a
/// transition at all.
pub fn command_for(
  target: LifecycleState,
  current: LifecycleState
) -> Option<LifecycleCommand> {
  if target == current {
    return None;
  }
  TRANSITIONS
    .iter()
    .find(|(from, to, _)| {
      *from == current && *to == target
    })
    .map(|(_, _, command)| *command)
}

/// Request path for a lifecycle command, e.g. `/containers/c1/pause`.
pub fn command_path(
  prefix: &str,
  container_id: &str,
  command: LifecycleCommand
) -> String {
  format!(
    "{}/{}/{}",
    prefix.trim_end_matches('/'),
    container_id,
    command.as_str()
  )
}
