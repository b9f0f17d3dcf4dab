#![allow(dead_code)]

use std::cell::{
  Cell,
  RefCell
};
use std::collections::{
  BTreeMap,
  VecDeque
};
use std::rc::Rc;

use async_trait::async_trait;
use otto_core::{
  BoardSurface,
  CardFlag,
  CommandTransport,
  MenuSurface,
  Reloader,
  ZoneFlag
};
use otto_shared::{
  LifecycleState,
  MenuItem
};

const ZONE_HEIGHT: f64 = 1000.0;
const SLOT_HEIGHT: f64 = 40.0;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct CardRef(usize);

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct IndicatorRef(usize);

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct MenuRef(usize);

#[derive(Debug, Clone, PartialEq)]
enum Slot {
  Card(usize),
  Indicator(usize),
  Empty(String)
}

#[derive(Debug, Clone, PartialEq)]
struct FakeCard {
  id:         Option<String>,
  state_attr: String,
  dragging:   bool,
  loading:    bool,
  glyph:      Option<LifecycleState>
}

#[derive(Debug, Clone, PartialEq)]
struct FakeZone {
  state:       LifecycleState,
  slots:       Vec<Slot>,
  active:      bool,
  blocked:     bool,
  badge:       String,
  badge_label: String
}

#[derive(
  Debug, Clone, Default, PartialEq,
)]
struct FakeMenu {
  open:  bool,
  items: Vec<MenuItem>
}

/// Everything the fake page holds. Compared wholesale to prove a gesture
/// changed nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSnapshot {
  zones:      Vec<FakeZone>,
  cards:      Vec<FakeCard>,
  menus:      Vec<FakeMenu>,
  pills:
    BTreeMap<LifecycleState, String>,
  indicators: usize
}

/// In-memory stand-in for the server-rendered board. Cards are stacked
/// top to bottom in fixed-height slots; zones are laid out one below the
/// other.
#[derive(Clone)]
pub struct FakeBoard {
  inner:    Rc<RefCell<BoardSnapshot>>,
  menu_log: Rc<RefCell<Vec<(MenuRef, bool)>>>
}

impl FakeBoard {
  pub fn with_cards(
    layout: &[(LifecycleState, &[&str])]
  ) -> Self {
    let board = FakeBoard {
      inner:    Rc::new(RefCell::new(
        BoardSnapshot {
          zones:      vec![],
          cards:      vec![],
          menus:      vec![],
          pills:      BTreeMap::new(),
          indicators: 0
        }
      )),
      menu_log: Rc::new(RefCell::new(
        vec![]
      ))
    };

    for (state, ids) in layout {
      board.inner.borrow_mut().zones.push(
        FakeZone {
          state:       *state,
          slots:       vec![],
          active:      false,
          blocked:     false,
          badge:       ids.len().to_string(),
          badge_label: String::new()
        }
      );
      for id in ids.iter() {
        board.push_card(
          *state,
          Some(*id),
          state.as_str()
        );
      }
      if ids.is_empty() {
        board.push_empty(*state);
      }
    }
    board
  }

  /// Running, paused and stopped zones with the given ids.
  pub fn standard(
    running: &[&str],
    paused: &[&str],
    stopped: &[&str]
  ) -> Self {
    Self::with_cards(&[
      (LifecycleState::Running, running),
      (LifecycleState::Paused, paused),
      (LifecycleState::Stopped, stopped)
    ])
  }

  /// Appends a card whose state attribute is `state_attr`, which need not
  /// be a known state.
  pub fn push_card(
    &self,
    zone: LifecycleState,
    id: Option<&str>,
    state_attr: &str
  ) -> CardRef {
    let mut inner = self.inner.borrow_mut();
    let index = inner.cards.len();
    inner.cards.push(FakeCard {
      id:         id.map(str::to_string),
      state_attr: state_attr.to_string(),
      dragging:   false,
      loading:    false,
      glyph:      None
    });
    inner.menus.push(FakeMenu::default());
    if let Some(zone) = inner
      .zones
      .iter_mut()
      .find(|z| z.state == zone)
    {
      zone.slots.push(Slot::Card(index));
    }
    CardRef(index)
  }

  fn push_empty(
    &self,
    zone: LifecycleState
  ) {
    let mut inner = self.inner.borrow_mut();
    if let Some(zone) = inner
      .zones
      .iter_mut()
      .find(|z| z.state == zone)
    {
      zone.slots.push(Slot::Empty(
        "server empty message".to_string()
      ));
    }
  }

  pub fn snapshot(&self) -> BoardSnapshot {
    self.inner.borrow().clone()
  }

  pub fn card(&self, id: &str) -> CardRef {
    let inner = self.inner.borrow();
    let index = inner
      .cards
      .iter()
      .position(|card| {
        card.id.as_deref() == Some(id)
      })
      .expect("card with id");
    CardRef(index)
  }

  pub fn menu_of(&self, id: &str) -> MenuRef {
    MenuRef(self.card(id).0)
  }

  pub fn ids_in(
    &self,
    zone: LifecycleState
  ) -> Vec<String> {
    self
      .cards_in(zone)
      .into_iter()
      .map(|card| {
        self
          .card_id(&card)
          .unwrap_or_default()
      })
      .collect()
  }

  pub fn is_blocked(
    &self,
    zone: LifecycleState
  ) -> bool {
    self.with_zone(zone, |z| z.blocked)
  }

  pub fn is_active(
    &self,
    zone: LifecycleState
  ) -> bool {
    self.with_zone(zone, |z| z.active)
  }

  pub fn placeholder_message(
    &self,
    zone: LifecycleState
  ) -> Option<String> {
    self.with_zone(zone, |z| {
      z.slots.iter().find_map(|slot| {
        match slot {
          | Slot::Empty(message) => {
            Some(message.clone())
          }
          | _ => None
        }
      })
    })
  }

  pub fn badge(
    &self,
    zone: LifecycleState
  ) -> (String, String) {
    self.with_zone(zone, |z| {
      (z.badge.clone(), z.badge_label.clone())
    })
  }

  pub fn pill(
    &self,
    state: LifecycleState
  ) -> Option<String> {
    self.inner.borrow().pills.get(&state).cloned()
  }

  /// Slot index of the indicator within `zone`, counting every child.
  pub fn indicator_slot(
    &self,
    zone: LifecycleState
  ) -> Option<usize> {
    self.with_zone(zone, |z| {
      z.slots.iter().position(|slot| {
        matches!(slot, Slot::Indicator(_))
      })
    })
  }

  pub fn indicator_attached(&self) -> bool {
    LifecycleState::ALL
      .into_iter()
      .any(|zone| {
        self.zone_exists(zone)
          && self
            .indicator_slot(zone)
            .is_some()
      })
  }

  pub fn is_dragging(
    &self,
    card: CardRef
  ) -> bool {
    self.inner.borrow().cards[card.0]
      .dragging
  }

  pub fn is_loading(
    &self,
    card: CardRef
  ) -> bool {
    self.inner.borrow().cards[card.0]
      .loading
  }

  pub fn state_attr(
    &self,
    card: CardRef
  ) -> String {
    self.inner.borrow().cards[card.0]
      .state_attr
      .clone()
  }

  pub fn glyph(
    &self,
    card: CardRef
  ) -> Option<LifecycleState> {
    self.inner.borrow().cards[card.0].glyph
  }

  pub fn items_of(
    &self,
    menu: MenuRef
  ) -> Vec<MenuItem> {
    self.inner.borrow().menus[menu.0]
      .items
      .clone()
  }

  pub fn open_menus(&self) -> Vec<MenuRef> {
    self
      .inner
      .borrow()
      .menus
      .iter()
      .enumerate()
      .filter(|(_, menu)| menu.open)
      .map(|(index, _)| MenuRef(index))
      .collect()
  }

  /// Every open/close applied to a menu, in order.
  pub fn menu_log(
    &self
  ) -> Vec<(MenuRef, bool)> {
    self.menu_log.borrow().clone()
  }

  /// Pointer position just above the top half of `id`.
  pub fn above(&self, id: &str) -> f64 {
    self.card_midpoint(&self.card(id)) - 1.0
  }

  /// Pointer position just below the midpoint of `id`.
  pub fn below(&self, id: &str) -> f64 {
    self.card_midpoint(&self.card(id)) + 1.0
  }

  fn zone_exists(
    &self,
    zone: LifecycleState
  ) -> bool {
    self
      .inner
      .borrow()
      .zones
      .iter()
      .any(|z| z.state == zone)
  }

  fn with_zone<T>(
    &self,
    zone: LifecycleState,
    read: impl FnOnce(&FakeZone) -> T
  ) -> T {
    let inner = self.inner.borrow();
    let zone = inner
      .zones
      .iter()
      .find(|z| z.state == zone)
      .expect("zone on board");
    read(zone)
  }

  fn with_zone_mut(
    &self,
    zone: LifecycleState,
    write: impl FnOnce(&mut FakeZone)
  ) {
    let mut inner = self.inner.borrow_mut();
    if let Some(zone) = inner
      .zones
      .iter_mut()
      .find(|z| z.state == zone)
    {
      write(zone);
    }
  }

  fn remove_slot(
    &self,
    wanted: &Slot
  ) {
    let mut inner = self.inner.borrow_mut();
    for zone in &mut inner.zones {
      zone.slots.retain(|slot| slot != wanted);
    }
  }
}

impl BoardSurface for FakeBoard {
  type Card = CardRef;
  type Indicator = IndicatorRef;

  fn zones(&self) -> Vec<LifecycleState> {
    self
      .inner
      .borrow()
      .zones
      .iter()
      .map(|z| z.state)
      .collect()
  }

  fn cards_in(
    &self,
    zone: LifecycleState
  ) -> Vec<CardRef> {
    self.with_zone(zone, |z| {
      z.slots
        .iter()
        .filter_map(|slot| match slot {
          | Slot::Card(index) => {
            Some(CardRef(*index))
          }
          | _ => None
        })
        .collect()
    })
  }

  fn card_id(
    &self,
    card: &CardRef
  ) -> Option<String> {
    self.inner.borrow().cards[card.0]
      .id
      .clone()
  }

  fn card_state(
    &self,
    card: &CardRef
  ) -> Option<LifecycleState> {
    LifecycleState::from_attr(
      &self.inner.borrow().cards[card.0]
        .state_attr
    )
  }

  fn set_card_state(
    &self,
    card: &CardRef,
    state: LifecycleState
  ) {
    self.inner.borrow_mut().cards[card.0]
      .state_attr =
      state.as_str().to_string();
  }

  fn set_card_flag(
    &self,
    card: &CardRef,
    flag: CardFlag,
    on: bool
  ) {
    let mut inner = self.inner.borrow_mut();
    let card = &mut inner.cards[card.0];
    match flag {
      | CardFlag::Dragging => {
        card.dragging = on
      }
      | CardFlag::Loading => {
        card.loading = on
      }
    }
  }

  fn recolor_glyph(
    &self,
    card: &CardRef,
    state: LifecycleState
  ) {
    self.inner.borrow_mut().cards[card.0]
      .glyph = Some(state);
  }

  fn card_midpoint(
    &self,
    card: &CardRef
  ) -> f64 {
    let inner = self.inner.borrow();
    for (zone_index, zone) in
      inner.zones.iter().enumerate()
    {
      if let Some(slot_index) = zone
        .slots
        .iter()
        .position(|slot| {
          *slot == Slot::Card(card.0)
        })
      {
        return zone_index as f64
          * ZONE_HEIGHT
          + slot_index as f64 * SLOT_HEIGHT
          + SLOT_HEIGHT / 2.0;
      }
    }
    f64::MAX
  }

  fn move_card(
    &self,
    card: &CardRef,
    zone: LifecycleState,
    before: Option<&IndicatorRef>
  ) {
    let slot = Slot::Card(card.0);
    self.remove_slot(&slot);
    self.with_zone_mut(zone, |z| {
      let position = before.and_then(|ind| {
        z.slots.iter().position(|s| {
          *s == Slot::Indicator(ind.0)
        })
      });
      match position {
        | Some(index) => {
          z.slots.insert(index, slot)
        }
        | None => z.slots.push(slot)
      }
    });
  }

  fn set_zone_flag(
    &self,
    zone: LifecycleState,
    flag: ZoneFlag,
    on: bool
  ) {
    self.with_zone_mut(zone, |z| {
      match flag {
        | ZoneFlag::Active => z.active = on,
        | ZoneFlag::Blocked => {
          z.blocked = on
        }
      }
    });
  }

  fn create_indicator(&self) -> IndicatorRef {
    let mut inner = self.inner.borrow_mut();
    inner.indicators += 1;
    IndicatorRef(inner.indicators)
  }

  fn place_indicator(
    &self,
    indicator: &IndicatorRef,
    zone: LifecycleState,
    before: Option<&CardRef>
  ) {
    let slot = Slot::Indicator(indicator.0);
    self.remove_slot(&slot);
    self.with_zone_mut(zone, |z| {
      let position = before.and_then(|card| {
        z.slots.iter().position(|s| {
          *s == Slot::Card(card.0)
        })
      });
      match position {
        | Some(index) => {
          z.slots.insert(index, slot)
        }
        | None => z.slots.push(slot)
      }
    });
  }

  fn indicator_zone(
    &self,
    indicator: &IndicatorRef
  ) -> Option<LifecycleState> {
    self
      .inner
      .borrow()
      .zones
      .iter()
      .find(|z| {
        z.slots.contains(&Slot::Indicator(
          indicator.0
        ))
      })
      .map(|z| z.state)
  }

  fn detach_indicator(
    &self,
    indicator: &IndicatorRef
  ) {
    self.remove_slot(&Slot::Indicator(
      indicator.0
    ));
  }

  fn has_empty_placeholder(
    &self,
    zone: LifecycleState
  ) -> bool {
    self.placeholder_message(zone).is_some()
  }

  fn insert_empty_placeholder(
    &self,
    zone: LifecycleState,
    message: &str
  ) {
    self.with_zone_mut(zone, |z| {
      z.slots
        .push(Slot::Empty(message.to_string()))
    });
  }

  fn remove_empty_placeholder(
    &self,
    zone: LifecycleState
  ) {
    self.with_zone_mut(zone, |z| {
      z.slots.retain(|slot| {
        !matches!(slot, Slot::Empty(_))
      })
    });
  }

  fn set_badge(
    &self,
    zone: LifecycleState,
    text: &str,
    aria_label: &str
  ) {
    self.with_zone_mut(zone, |z| {
      z.badge = text.to_string();
      z.badge_label = aria_label.to_string();
    });
  }

  fn set_status_pill(
    &self,
    state: LifecycleState,
    text: &str
  ) {
    self
      .inner
      .borrow_mut()
      .pills
      .insert(state, text.to_string());
  }
}

impl MenuSurface for FakeBoard {
  type Menu = MenuRef;

  fn menus(&self) -> Vec<MenuRef> {
    (0..self.inner.borrow().menus.len())
      .map(MenuRef)
      .collect()
  }

  fn menu_is_open(
    &self,
    menu: &MenuRef
  ) -> bool {
    self.inner.borrow().menus[menu.0].open
  }

  fn set_menu_open(
    &self,
    menu: &MenuRef,
    open: bool
  ) {
    self.inner.borrow_mut().menus[menu.0]
      .open = open;
    self.menu_log.borrow_mut().push((*menu, open));
  }

  fn menu_card(
    &self,
    menu: &MenuRef
  ) -> Option<CardRef> {
    Some(CardRef(menu.0))
  }

  fn populate_menu(
    &self,
    menu: &MenuRef,
    items: &[MenuItem]
  ) {
    self.inner.borrow_mut().menus[menu.0]
      .items = items.to_vec();
  }
}

/// Records every URL posted and answers from a scripted queue, defaulting
/// to `204 No Content`.
#[derive(Clone, Default)]
pub struct FakeTransport {
  pub posted:    Rc<RefCell<Vec<String>>>,
  responses: Rc<RefCell<VecDeque<Result<u16, String>>>>
}

impl FakeTransport {
  pub fn answering(
    responses: Vec<Result<u16, String>>
  ) -> Self {
    Self {
      posted:    Rc::default(),
      responses: Rc::new(RefCell::new(
        responses.into()
      ))
    }
  }

  pub fn posted(&self) -> Vec<String> {
    self.posted.borrow().clone()
  }
}

#[async_trait(?Send)]
impl CommandTransport for FakeTransport {
  async fn post(
    &self,
    url: &str
  ) -> Result<u16, String> {
    self.posted.borrow_mut().push(url.to_string());
    self
      .responses
      .borrow_mut()
      .pop_front()
      .unwrap_or(Ok(204))
  }
}

#[derive(Clone, Default)]
pub struct FakeReloader {
  pub count: Rc<Cell<usize>>
}

impl FakeReloader {
  pub fn reloads(&self) -> usize {
    self.count.get()
  }
}

impl Reloader for FakeReloader {
  fn reload(&self) {
    self.count.set(self.count.get() + 1);
  }
}

pub fn init_tracing() {
  let _ = tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::new(
        "otto_core=debug"
      )
    )
    .with_test_writer()
    .try_init();
}
