use otto_shared::{
  LifecycleState,
  is_legal
};
use tracing::trace;

use crate::session::DragSession;
use crate::surface::{
  BoardSurface,
  ZoneFlag
};

/// What the page should tell the browser about a drag-over.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum DropAffordance {
  /// No drag from this board is in progress; leave the event alone.
  Unhandled,
  /// The zone is not a legal target; the drop must not complete here.
  Refuse,
  /// The zone is a legal target.
  Accept
}

/// Whether a card read as `state` may land in `zone`. Unrecognized states
/// have no legal targets.
pub fn zone_accepts(
  state: Option<LifecycleState>,
  zone: LifecycleState
) -> bool {
  state.is_some_and(|current| {
    is_legal(zone, current)
  })
}

/// Flags every zone the dragged card cannot reach, source zone included.
pub fn mark_blocked_zones<S: BoardSurface>(
  surface: &S,
  state: Option<LifecycleState>
) {
  for zone in surface.zones() {
    if !zone_accepts(state, zone) {
      surface.set_zone_flag(
        zone,
        ZoneFlag::Blocked,
        true
      );
    }
  }
}

/// First card in `zone` (other than `dragged`) whose midpoint is below the
/// pointer. `None` means the indicator belongs at the end.
pub fn insertion_reference<
  S: BoardSurface
>(
  surface: &S,
  zone: LifecycleState,
  pointer_y: f64,
  dragged: &S::Card
) -> Option<S::Card> {
  surface
    .cards_in(zone)
    .into_iter()
    .filter(|card| card != dragged)
    .find(|card| {
      pointer_y
        < surface.card_midpoint(card)
    })
}

pub fn drag_over<S: BoardSurface>(
  surface: &S,
  session: &DragSession<S>,
  zone: LifecycleState,
  pointer_y: f64
) -> DropAffordance {
  let Some(drag) = session.active()
  else {
    return DropAffordance::Unhandled;
  };

  if !zone_accepts(drag.state, zone) {
    return DropAffordance::Refuse;
  }

  for other in surface.zones() {
    surface.set_zone_flag(
      other,
      ZoneFlag::Active,
      other == zone
    );
  }

  let reference = insertion_reference(
    surface, zone, pointer_y,
    &drag.card
  );
  trace!(
    zone = %zone,
    pointer_y,
    at_end = reference.is_none(),
    "placing drop indicator"
  );
  surface.place_indicator(
    &drag.indicator,
    zone,
    reference.as_ref()
  );
  DropAffordance::Accept
}

/// `destination_inside` is whether the element the pointer moved to is
/// still within `zone`; moving between a zone's own children is not a
/// leave.
pub fn drag_leave<S: BoardSurface>(
  surface: &S,
  session: &DragSession<S>,
  zone: LifecycleState,
  destination_inside: bool
) {
  if destination_inside {
    return;
  }

  surface.set_zone_flag(
    zone,
    ZoneFlag::Active,
    false
  );

  if let Some(drag) = session.active()
    && surface
      .indicator_zone(&drag.indicator)
      == Some(zone)
  {
    surface
      .detach_indicator(&drag.indicator);
  }
}
