use otto_shared::{
  LifecycleState,
  command_for
};
use tracing::{
  debug,
  info,
  warn
};

use crate::config::BoardConfig;
use crate::dispatch::DispatchRequest;
use crate::feedback::{
  self,
  DropAffordance
};
use crate::mutator;
use crate::session::DragSession;
use crate::surface::BoardSurface;

/// Result of a drop gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome<C> {
  /// No drag from this board was in progress.
  Ignored,
  /// The zone is not a legal target; nothing changed.
  Rejected,
  /// The card was moved on the page. `request` is what must be sent to the
  /// backend; it is `None` only when the card carried no container id.
  Moved {
    zone:    LifecycleState,
    request: Option<DispatchRequest<C>>
  }
}

/// Owns the drag session and applies each drag phase to the page.
pub struct BoardController<S: BoardSurface> {
  surface: S,
  session: DragSession<S>,
  config:  BoardConfig
}

impl<S: BoardSurface> BoardController<S> {
  pub fn new(
    surface: S,
    config: BoardConfig
  ) -> Self {
    Self {
      surface,
      session: DragSession::Idle,
      config
    }
  }

  pub fn surface(&self) -> &S {
    &self.surface
  }

  pub fn config(&self) -> &BoardConfig {
    &self.config
  }

  pub fn session(
    &self
  ) -> &DragSession<S> {
    &self.session
  }

  pub fn drag_start(
    &mut self,
    card: S::Card
  ) {
    self.session.begin(&self.surface, card);
    let state = self
      .session
      .active()
      .and_then(|drag| drag.state);
    feedback::mark_blocked_zones(
      &self.surface,
      state
    );
  }

  pub fn drag_end(&mut self) {
    self.session.finish(&self.surface);
  }

  pub fn drag_over(
    &mut self,
    zone: LifecycleState,
    pointer_y: f64
  ) -> DropAffordance {
    feedback::drag_over(
      &self.surface,
      &self.session,
      zone,
      pointer_y
    )
  }

  pub fn drag_leave(
    &mut self,
    zone: LifecycleState,
    destination_inside: bool
  ) {
    feedback::drag_leave(
      &self.surface,
      &self.session,
      zone,
      destination_inside
    );
  }

  /// Validates the drop, applies the optimistic move and ends the session.
  /// An illegal drop leaves the session in place for the drag end that
  /// follows.
  pub fn drop(
    &mut self,
    zone: LifecycleState
  ) -> DropOutcome<S::Card> {
    let Some(drag) = self.session.active()
    else {
      return DropOutcome::Ignored;
    };

    let Some(command) = drag
      .state
      .and_then(|current| {
        command_for(zone, current)
      })
    else {
      debug!(
        zone = %zone,
        state = ?drag.state,
        "drop rejected by transition \
         table"
      );
      return DropOutcome::Rejected;
    };

    mutator::move_into_zone(
      &self.surface,
      drag,
      zone
    );

    let Some(drag) =
      self.session.finish(&self.surface)
    else {
      return DropOutcome::Ignored;
    };
    mutator::refresh_counts(
      &self.surface,
      &self.config
    );

    let request = match drag.container_id
    {
      | Some(container_id) => {
        info!(
          %container_id,
          %command,
          zone = %zone,
          "card dropped; dispatching"
        );
        Some(DispatchRequest::single(
          container_id,
          command,
          Some(drag.card)
        ))
      }
      | None => {
        warn!(
          zone = %zone,
          "dropped card has no container \
           id; nothing to dispatch"
        );
        None
      }
    };

    DropOutcome::Moved {
      zone,
      request
    }
  }
}
