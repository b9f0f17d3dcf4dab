use otto_shared::LifecycleState;
use tracing::debug;

use crate::surface::{
  BoardSurface,
  CardFlag,
  ZoneFlag
};

/// The card being dragged and what was read from it at drag start.
pub struct ActiveDrag<S: BoardSurface> {
  pub card:         S::Card,
  pub container_id: Option<String>,
  pub state:        Option<LifecycleState>,
  pub indicator:    S::Indicator
}

/// Single-slot drag state. `Dragging` only exists between a drag start and
/// the matching drag end or successful drop.
pub enum DragSession<S: BoardSurface> {
  Idle,
  Dragging(ActiveDrag<S>)
}

impl<S: BoardSurface> Default
  for DragSession<S>
{
  fn default() -> Self {
    DragSession::Idle
  }
}

impl<S: BoardSurface> DragSession<S> {
  pub fn is_dragging(&self) -> bool {
    matches!(
      self,
      DragSession::Dragging(_)
    )
  }

  pub fn active(
    &self
  ) -> Option<&ActiveDrag<S>> {
    match self {
      | DragSession::Dragging(drag) => {
        Some(drag)
      }
      | DragSession::Idle => None
    }
  }

  /// Idle -> Dragging. Flags the card and builds an unattached indicator.
  pub fn begin(
    &mut self,
    surface: &S,
    card: S::Card
  ) {
    if self.is_dragging() {
      debug!(
        "drag start while already \
         dragging; resetting previous \
         session"
      );
      self.finish(surface);
    }

    let container_id =
      surface.card_id(&card);
    let state = surface.card_state(&card);
    surface.set_card_flag(
      &card,
      CardFlag::Dragging,
      true
    );
    let indicator =
      surface.create_indicator();

    debug!(
      container_id = container_id.as_deref().unwrap_or("-"),
      state = ?state,
      "drag session started"
    );

    *self = DragSession::Dragging(
      ActiveDrag {
        card,
        container_id,
        state,
        indicator
      }
    );
  }

  /// Dragging -> Idle. Clears every flag the drag set and drops the
  /// indicator. Returns the finished drag, if there was one.
  pub fn finish(
    &mut self,
    surface: &S
  ) -> Option<ActiveDrag<S>> {
    let previous = std::mem::take(self);
    let finished = match previous {
      | DragSession::Dragging(drag) => {
        surface.set_card_flag(
          &drag.card,
          CardFlag::Dragging,
          false
        );
        surface
          .detach_indicator(&drag.indicator);
        Some(drag)
      }
      | DragSession::Idle => None
    };

    for zone in surface.zones() {
      surface.set_zone_flag(
        zone,
        ZoneFlag::Active,
        false
      );
      surface.set_zone_flag(
        zone,
        ZoneFlag::Blocked,
        false
      );
    }

    if finished.is_some() {
      debug!("drag session finished");
    }
    finished
  }
}
