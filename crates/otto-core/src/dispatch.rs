use async_trait::async_trait;
use otto_shared::{
  LifecycleCommand,
  command_path
};
use tracing::{
  error,
  info
};

use crate::error::DispatchError;
use crate::surface::{
  BoardSurface,
  CardFlag
};

/// Sends a bodiless `POST` and reports the HTTP status, or a message when
/// the request never got a response.
#[async_trait(?Send)]
pub trait CommandTransport {
  async fn post(
    &self,
    url: &str
  ) -> Result<u16, String>;
}

/// Throws away the current view and loads it again from the server.
pub trait Reloader {
  fn reload(&self);
}

#[derive(Debug, Clone, PartialEq)]
pub struct DispatchRequest<C> {
  pub container_id: String,
  pub commands:     Vec<LifecycleCommand>,
  pub card:         Option<C>
}

impl<C> DispatchRequest<C> {
  pub fn single(
    container_id: String,
    command: LifecycleCommand,
    card: Option<C>
  ) -> Self {
    Self {
      container_id,
      commands: vec![command],
      card
    }
  }
}

/// What happened before the reload. Only used for logging and tests; the
/// page never shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
  pub completed: Vec<LifecycleCommand>,
  pub failure:   Option<DispatchError>
}

impl DispatchOutcome {
  pub fn succeeded(&self) -> bool {
    self.failure.is_none()
  }
}

pub fn is_success_status(
  status: u16
) -> bool {
  (200..300).contains(&status)
}

pub struct Dispatcher<S, T, R> {
  surface:         S,
  transport:       T,
  reloader:        R,
  endpoint_prefix: String
}

impl<S, T, R> Dispatcher<S, T, R>
where
  S: BoardSurface,
  T: CommandTransport,
  R: Reloader
{
  pub fn new(
    surface: S,
    transport: T,
    reloader: R,
    endpoint_prefix: impl Into<String>
  ) -> Self {
    Self {
      surface,
      transport,
      reloader,
      endpoint_prefix: endpoint_prefix
        .into()
    }
  }

  /// Runs the request's commands in order, stopping at the first failure,
  /// then reloads the page whatever the result.
  #[tracing::instrument(
    skip(self, request),
    fields(container_id = %request.container_id)
  )]
  pub async fn dispatch(
    &self,
    request: DispatchRequest<S::Card>
  ) -> DispatchOutcome {
    if let Some(card) = &request.card {
      self.surface.set_card_flag(
        card,
        CardFlag::Loading,
        true
      );
    }

    let mut completed = Vec::new();
    let mut failure = None;

    for command in &request.commands {
      match self
        .send(
          &request.container_id,
          *command
        )
        .await
      {
        | Ok(()) => {
          info!(%command, "lifecycle command accepted");
          completed.push(*command);
        }
        | Err(err) => {
          error!(error = %err, %command, "lifecycle command failed");
          failure = Some(err);
          break;
        }
      }
    }

    self.reloader.reload();

    DispatchOutcome {
      completed,
      failure
    }
  }

  async fn send(
    &self,
    container_id: &str,
    command: LifecycleCommand
  ) -> Result<(), DispatchError> {
    let url = command_path(
      &self.endpoint_prefix,
      container_id,
      command
    );

    match self.transport.post(&url).await
    {
      | Ok(status)
        if is_success_status(status) =>
      {
        Ok(())
      }
      | Ok(status) => {
        Err(DispatchError::Rejected {
          container_id: container_id
            .to_string(),
          command,
          status
        })
      }
      | Err(message) => {
        Err(DispatchError::Transport {
          container_id: container_id
            .to_string(),
          command,
          message
        })
      }
    }
  }
}
