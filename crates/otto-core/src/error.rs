use otto_shared::LifecycleCommand;
use thiserror::Error;

/// Why a lifecycle command did not go through. Neither case is shown to the
/// user; the page reload that follows restores the real state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
  #[error(
    "{command} for {container_id} was rejected with status {status}"
  )]
  Rejected {
    container_id: String,
    command:      LifecycleCommand,
    status:       u16
  },

  #[error(
    "{command} for {container_id} could not reach the backend: {message}"
  )]
  Transport {
    container_id: String,
    command:      LifecycleCommand,
    message:      String
  }
}

impl DispatchError {
  pub fn command(
    &self
  ) -> LifecycleCommand {
    match self {
      | DispatchError::Rejected {
        command,
        ..
      }
      | DispatchError::Transport {
        command,
        ..
      } => *command
    }
  }
}

#[derive(Error, Debug)]
pub enum ConfigError {
  #[error(
    "invalid board configuration: {0}"
  )]
  Parse(#[from] toml::de::Error)
}
