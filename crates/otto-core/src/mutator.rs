use otto_shared::LifecycleState;
use tracing::debug;

use crate::config::BoardConfig;
use crate::session::ActiveDrag;
use crate::surface::BoardSurface;

/// Card totals per zone, as counted from the page.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
)]
pub struct ZoneCounts {
  pub running: usize,
  pub paused:  usize,
  pub stopped: usize
}

impl ZoneCounts {
  pub fn get(
    &self,
    state: LifecycleState
  ) -> usize {
    match state {
      | LifecycleState::Running => {
        self.running
      }
      | LifecycleState::Paused => {
        self.paused
      }
      | LifecycleState::Stopped => {
        self.stopped
      }
    }
  }

  fn set(
    &mut self,
    state: LifecycleState,
    count: usize
  ) {
    match state {
      | LifecycleState::Running => {
        self.running = count
      }
      | LifecycleState::Paused => {
        self.paused = count
      }
      | LifecycleState::Stopped => {
        self.stopped = count
      }
    }
  }
}

pub fn badge_aria_label(
  zone: LifecycleState,
  count: usize
) -> String {
  format!("{count} {zone} containers")
}

pub fn status_pill_text(
  state: LifecycleState,
  count: usize
) -> String {
  format!(" {count} {}", state.label())
}

/// Puts the dragged card into `zone` where the indicator sits (or at the
/// end when the indicator is elsewhere), then rewrites its state attribute
/// and glyph colour.
pub fn move_into_zone<S: BoardSurface>(
  surface: &S,
  drag: &ActiveDrag<S>,
  zone: LifecycleState
) {
  let before = (surface
    .indicator_zone(&drag.indicator)
    == Some(zone))
  .then_some(&drag.indicator);

  surface.move_card(
    &drag.card, zone, before
  );
  surface.set_card_state(
    &drag.card, zone
  );
  surface
    .recolor_glyph(&drag.card, zone);
}

/// Recomputes badges, empty-state items and header pills from the cards on
/// the page.
pub fn refresh_counts<S: BoardSurface>(
  surface: &S,
  config: &BoardConfig
) {
  let mut counts = ZoneCounts::default();

  for zone in surface.zones() {
    let count =
      surface.cards_in(zone).len();
    counts.set(zone, count);

    surface.set_badge(
      zone,
      &count.to_string(),
      &badge_aria_label(zone, count)
    );

    let has_placeholder =
      surface.has_empty_placeholder(zone);
    if count == 0 && !has_placeholder {
      surface.insert_empty_placeholder(
        zone,
        config
          .empty_messages
          .for_state(zone)
      );
    } else if count > 0
      && has_placeholder
    {
      surface
        .remove_empty_placeholder(zone);
    }
  }

  for state in LifecycleState::ALL {
    surface.set_status_pill(
      state,
      &status_pill_text(
        state,
        counts.get(state)
      )
    );
  }

  debug!(
    running = counts.running,
    paused = counts.paused,
    stopped = counts.stopped,
    "board counts refreshed"
  );
}
