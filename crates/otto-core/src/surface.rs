//! The seam between the board engine and the page it drives.
//!
//! The page is the only store of board state: cards, their order, their
//! lifecycle attribute and every flag live in the markup. Implementations
//! read and write it directly and never cache, so geometry and counts are
//! always taken from what is on screen.

use std::fmt;

use otto_shared::{
  LifecycleState,
  MenuItem
};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum CardFlag {
  Dragging,
  Loading
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum ZoneFlag {
  Active,
  Blocked
}

pub trait BoardSurface {
  /// Handle to a container card. Equality is identity.
  type Card: Clone + PartialEq + fmt::Debug;
  /// The transient insertion marker shown while dragging.
  type Indicator;

  /// Zones present on the page, in display order.
  fn zones(&self) -> Vec<LifecycleState>;

  /// Cards directly inside `zone`, top to bottom. Excludes the insertion
  /// indicator and the empty-state item.
  fn cards_in(
    &self,
    zone: LifecycleState
  ) -> Vec<Self::Card>;

  fn card_id(
    &self,
    card: &Self::Card
  ) -> Option<String>;

  /// `None` when the card's state attribute is missing or unrecognized.
  fn card_state(
    &self,
    card: &Self::Card
  ) -> Option<LifecycleState>;

  fn set_card_state(
    &self,
    card: &Self::Card,
    state: LifecycleState
  );

  fn set_card_flag(
    &self,
    card: &Self::Card,
    flag: CardFlag,
    on: bool
  );

  fn recolor_glyph(
    &self,
    card: &Self::Card,
    state: LifecycleState
  );

  /// Vertical midpoint of the card in viewport coordinates.
  fn card_midpoint(
    &self,
    card: &Self::Card
  ) -> f64;

  /// Reparents `card` into `zone`, directly before `before` when given,
  /// otherwise at the end.
  fn move_card(
    &self,
    card: &Self::Card,
    zone: LifecycleState,
    before: Option<&Self::Indicator>
  );

  fn set_zone_flag(
    &self,
    zone: LifecycleState,
    flag: ZoneFlag,
    on: bool
  );

  /// Builds a detached indicator.
  fn create_indicator(
    &self
  ) -> Self::Indicator;

  /// Attaches (or moves) the indicator into `zone`, before `before` when
  /// given, otherwise at the end.
  fn place_indicator(
    &self,
    indicator: &Self::Indicator,
    zone: LifecycleState,
    before: Option<&Self::Card>
  );

  fn indicator_zone(
    &self,
    indicator: &Self::Indicator
  ) -> Option<LifecycleState>;

  fn detach_indicator(
    &self,
    indicator: &Self::Indicator
  );

  fn has_empty_placeholder(
    &self,
    zone: LifecycleState
  ) -> bool;

  fn insert_empty_placeholder(
    &self,
    zone: LifecycleState,
    message: &str
  );

  fn remove_empty_placeholder(
    &self,
    zone: LifecycleState
  );

  fn set_badge(
    &self,
    zone: LifecycleState,
    text: &str,
    aria_label: &str
  );

  fn set_status_pill(
    &self,
    state: LifecycleState,
    text: &str
  );
}

/// Per-card contextual menus.
pub trait MenuSurface: BoardSurface {
  type Menu: Clone + PartialEq + fmt::Debug;

  fn menus(&self) -> Vec<Self::Menu>;

  fn menu_is_open(
    &self,
    menu: &Self::Menu
  ) -> bool;

  fn set_menu_open(
    &self,
    menu: &Self::Menu,
    open: bool
  );

  /// Card the menu belongs to.
  fn menu_card(
    &self,
    menu: &Self::Menu
  ) -> Option<Self::Card>;

  /// Replaces the menu's rows.
  fn populate_menu(
    &self,
    menu: &Self::Menu,
    items: &[MenuItem]
  );
}
