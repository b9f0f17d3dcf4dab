use otto_shared::{
  LifecycleCommand,
  menu_items
};
use tracing::{
  debug,
  warn
};

use crate::dispatch::DispatchRequest;
use crate::surface::MenuSurface;

/// Keeps at most one card menu open. Opening one closes every other; it is
/// not a stack.
pub struct MenuController<S: MenuSurface> {
  open: Option<S::Menu>
}

impl<S: MenuSurface> Default
  for MenuController<S>
{
  fn default() -> Self {
    Self {
      open: None
    }
  }
}

impl<S: MenuSurface> MenuController<S> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn open_menu(
    &self
  ) -> Option<&S::Menu> {
    self.open.as_ref()
  }

  /// Opens `menu` with rows for its card's current state, or closes it if
  /// it was already open.
  pub fn toggle(
    &mut self,
    surface: &S,
    menu: &S::Menu
  ) {
    let was_open =
      surface.menu_is_open(menu);
    self.dismiss(surface);
    if was_open {
      return;
    }

    let state = surface
      .menu_card(menu)
      .and_then(|card| {
        surface.card_state(&card)
      });
    surface.populate_menu(
      menu,
      &menu_items(state)
    );
    surface.set_menu_open(menu, true);
    self.open = Some(menu.clone());
    debug!(state = ?state, "card menu opened");
  }

  /// Closes every open menu, including ones this controller did not open.
  pub fn dismiss(&mut self, surface: &S) {
    for menu in surface.menus() {
      if surface.menu_is_open(&menu) {
        surface.set_menu_open(&menu, false);
      }
    }
    self.open = None;
  }

  /// Closes menus and turns the chosen entry into a dispatch for `card`.
  pub fn select(
    &mut self,
    surface: &S,
    card: Option<S::Card>,
    command: LifecycleCommand
  ) -> Option<DispatchRequest<S::Card>>
  {
    self.dismiss(surface);

    let Some(card) = card else {
      warn!(%command, "menu entry selected outside a card");
      return None;
    };
    let Some(container_id) =
      surface.card_id(&card)
    else {
      warn!(%command, "menu card has no container id");
      return None;
    };

    debug!(%container_id, %command, "menu entry selected");
    Some(DispatchRequest::single(
      container_id,
      command,
      Some(card)
    ))
  }
}
