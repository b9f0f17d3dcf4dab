use anyhow::anyhow;
use otto_core::config::{
  BoardConfig,
  ClassNames,
  Palette
};
use otto_core::{
  BoardSurface,
  CardFlag,
  MenuSurface,
  ZoneFlag
};
use otto_shared::{
  LifecycleState,
  MenuItem
};
use wasm_bindgen::{
  JsCast,
  JsValue
};
use web_sys::{
  Document,
  Element,
  Node,
  NodeList
};

pub const CARD_SELECTOR: &str =
  "li[draggable]";
pub const ZONE_SELECTOR: &str =
  "ol[data-dropzone]";
pub const MENU_TOGGLE_SELECTOR: &str =
  "[data-menu-toggle]";
pub const MENU_ACTION_SELECTOR: &str =
  "[data-action]";
pub const MENU_WRAP_SELECTOR: &str =
  ".otto-menu-wrap";
pub const MENU_DROPDOWN_SELECTOR: &str =
  ".otto-dropdown";

const EMPTY_SELECTOR: &str =
  "li[data-empty-msg]";
const SECTION_SELECTOR: &str =
  "section[aria-labelledby]";
const BADGE_SELECTOR: &str =
  "span[aria-label]";
const PILL_SELECTOR: &str =
  "nav[aria-label] [role='status']";
const GLYPH_SELECTOR: &str =
  "span[aria-hidden='true']";

const CONTAINER_ID_ATTR: &str =
  "data-container-id";
const STATE_ATTR: &str = "data-state";
const DROPZONE_ATTR: &str =
  "data-dropzone";

/// The server-rendered board, read and written in place.
#[derive(Clone)]
pub struct DomBoard {
  document:  Document,
  classes:   ClassNames,
  palette:   Palette,
  indicator: Element
}

impl DomBoard {
  pub fn new(
    document: Document,
    config: &BoardConfig
  ) -> anyhow::Result<Self> {
    let indicator = document
      .create_element("li")
      .map_err(|err| {
        anyhow!(
          "failed to build drop \
           indicator: {err:?}"
        )
      })?;
    indicator.set_class_name(
      &config.classes.drop_indicator
    );
    report(
      "indicator.aria-hidden",
      indicator.set_attribute(
        "aria-hidden",
        "true"
      )
    );

    Ok(Self {
      document,
      classes: config.classes.clone(),
      palette: config.palette.clone(),
      indicator
    })
  }

  fn zone_element(
    &self,
    zone: LifecycleState
  ) -> Option<Element> {
    let selector = format!(
      "ol[{DROPZONE_ATTR}=\"{}\"]",
      zone.as_str()
    );
    self
      .document
      .query_selector(&selector)
      .ok()
      .flatten()
  }

  fn section_of(
    &self,
    zone: LifecycleState
  ) -> Option<Element> {
    self
      .zone_element(zone)?
      .closest(SECTION_SELECTOR)
      .ok()
      .flatten()
  }

  fn build(
    &self,
    tag: &str
  ) -> Option<Element> {
    match self.document.create_element(tag)
    {
      | Ok(element) => Some(element),
      | Err(error) => {
        tracing::warn!(?error, tag, "failed to create element");
        None
      }
    }
  }
}

/// Zone a `data-dropzone` element stands for.
pub fn zone_of(
  element: &Element
) -> Option<LifecycleState> {
  element
    .get_attribute(DROPZONE_ATTR)
    .as_deref()
    .and_then(LifecycleState::from_attr)
}

pub fn elements(
  list: &NodeList
) -> Vec<Element> {
  (0..list.length())
    .filter_map(|index| list.item(index))
    .filter_map(|node| {
      node.dyn_into::<Element>().ok()
    })
    .collect()
}

fn query_all(
  root: &Element,
  selector: &str
) -> Vec<Element> {
  match root.query_selector_all(selector) {
    | Ok(list) => elements(&list),
    | Err(error) => {
      tracing::warn!(?error, selector, "selector query failed");
      vec![]
    }
  }
}

fn set_class(
  element: &Element,
  class: &str,
  on: bool
) {
  let list = element.class_list();
  let result = if on {
    list.add_1(class)
  } else {
    list.remove_1(class)
  };
  report("class_list", result);
}

fn report<T>(
  op: &str,
  result: Result<T, JsValue>
) {
  if let Err(error) = result {
    tracing::warn!(?error, op, "dom update failed");
  }
}

impl BoardSurface for DomBoard {
  type Card = Element;
  type Indicator = Element;

  fn zones(&self) -> Vec<LifecycleState> {
    match self
      .document
      .query_selector_all(ZONE_SELECTOR)
    {
      | Ok(list) => elements(&list)
        .iter()
        .filter_map(zone_of)
        .collect(),
      | Err(error) => {
        tracing::warn!(?error, "failed to list zones");
        vec![]
      }
    }
  }

  fn cards_in(
    &self,
    zone: LifecycleState
  ) -> Vec<Element> {
    self
      .zone_element(zone)
      .map(|zone_el| {
        query_all(
          &zone_el,
          &format!(":scope > {CARD_SELECTOR}")
        )
      })
      .unwrap_or_default()
  }

  fn card_id(
    &self,
    card: &Element
  ) -> Option<String> {
    card
      .get_attribute(CONTAINER_ID_ATTR)
      .filter(|id| !id.is_empty())
  }

  fn card_state(
    &self,
    card: &Element
  ) -> Option<LifecycleState> {
    card
      .get_attribute(STATE_ATTR)
      .as_deref()
      .and_then(LifecycleState::from_attr)
  }

  fn set_card_state(
    &self,
    card: &Element,
    state: LifecycleState
  ) {
    report(
      "card.data-state",
      card.set_attribute(
        STATE_ATTR,
        state.as_str()
      )
    );
  }

  fn set_card_flag(
    &self,
    card: &Element,
    flag: CardFlag,
    on: bool
  ) {
    let class = match flag {
      | CardFlag::Dragging => {
        &self.classes.dragging
      }
      | CardFlag::Loading => {
        &self.classes.loading
      }
    };
    set_class(card, class, on);
  }

  fn recolor_glyph(
    &self,
    card: &Element,
    state: LifecycleState
  ) {
    let Some(glyph) = card
      .query_selector(GLYPH_SELECTOR)
      .ok()
      .flatten()
    else {
      tracing::debug!(
        "card has no state glyph"
      );
      return;
    };
    glyph
      .set_class_name(&self.palette.glyph_base);
    set_class(
      &glyph,
      self.palette.for_state(state),
      true
    );
  }

  fn card_midpoint(
    &self,
    card: &Element
  ) -> f64 {
    let rect =
      card.get_bounding_client_rect();
    rect.top() + rect.height() / 2.0
  }

  fn move_card(
    &self,
    card: &Element,
    zone: LifecycleState,
    before: Option<&Element>
  ) {
    let Some(zone_el) =
      self.zone_element(zone)
    else {
      return;
    };
    let result = match before {
      | Some(anchor) => {
        let anchor: &Node = anchor;
        zone_el.insert_before(card, Some(anchor))
      }
      | None => zone_el.append_child(card)
    };
    report("card.move", result);
  }

  fn set_zone_flag(
    &self,
    zone: LifecycleState,
    flag: ZoneFlag,
    on: bool
  ) {
    let Some(zone_el) =
      self.zone_element(zone)
    else {
      return;
    };
    let class = match flag {
      | ZoneFlag::Active => {
        &self.classes.zone_active
      }
      | ZoneFlag::Blocked => {
        &self.classes.zone_blocked
      }
    };
    set_class(&zone_el, class, on);
  }

  fn create_indicator(&self) -> Element {
    self.indicator.clone()
  }

  fn place_indicator(
    &self,
    indicator: &Element,
    zone: LifecycleState,
    before: Option<&Element>
  ) {
    let Some(zone_el) =
      self.zone_element(zone)
    else {
      return;
    };
    let result = match before {
      | Some(card) => {
        let card: &Node = card;
        zone_el.insert_before(indicator, Some(card))
      }
      | None => zone_el.append_child(indicator)
    };
    report("indicator.place", result);
  }

  fn indicator_zone(
    &self,
    indicator: &Element
  ) -> Option<LifecycleState> {
    indicator
      .parent_element()
      .as_ref()
      .and_then(zone_of)
  }

  fn detach_indicator(
    &self,
    indicator: &Element
  ) {
    indicator.remove();
  }

  fn has_empty_placeholder(
    &self,
    zone: LifecycleState
  ) -> bool {
    self
      .zone_element(zone)
      .and_then(|zone_el| {
        zone_el
          .query_selector(EMPTY_SELECTOR)
          .ok()
          .flatten()
      })
      .is_some()
  }

  fn insert_empty_placeholder(
    &self,
    zone: LifecycleState,
    message: &str
  ) {
    let (
      Some(zone_el),
      Some(item),
      Some(text)
    ) = (
      self.zone_element(zone),
      self.build("li"),
      self.build("p")
    )
    else {
      return;
    };
    report(
      "empty.data-empty-msg",
      item.set_attribute(
        "data-empty-msg",
        ""
      )
    );
    text.set_class_name(
      &self.classes.empty_message
    );
    text.set_text_content(Some(message));
    report(
      "empty.text",
      item.append_child(&text)
    );
    report(
      "empty.insert",
      zone_el.append_child(&item)
    );
  }

  fn remove_empty_placeholder(
    &self,
    zone: LifecycleState
  ) {
    if let Some(existing) = self
      .zone_element(zone)
      .and_then(|zone_el| {
        zone_el
          .query_selector(EMPTY_SELECTOR)
          .ok()
          .flatten()
      })
    {
      existing.remove();
    }
  }

  fn set_badge(
    &self,
    zone: LifecycleState,
    text: &str,
    aria_label: &str
  ) {
    let Some(badge) = self
      .section_of(zone)
      .and_then(|section| {
        section
          .query_selector(BADGE_SELECTOR)
          .ok()
          .flatten()
      })
    else {
      tracing::debug!(zone = %zone, "zone has no count badge");
      return;
    };
    badge.set_text_content(Some(text));
    report(
      "badge.aria-label",
      badge.set_attribute(
        "aria-label",
        aria_label
      )
    );
  }

  fn set_status_pill(
    &self,
    state: LifecycleState,
    text: &str
  ) {
    let index = LifecycleState::ALL
      .iter()
      .position(|s| *s == state)
      .unwrap_or_default();
    let pill = self
      .document
      .query_selector_all(PILL_SELECTOR)
      .ok()
      .and_then(|list| {
        list.item(index as u32)
      })
      .and_then(|pill| pill.last_child());
    match pill {
      | Some(node) => {
        node.set_text_content(Some(text))
      }
      | None => {
        tracing::debug!(state = %state, "no status pill for state")
      }
    }
  }
}

impl MenuSurface for DomBoard {
  type Menu = Element;

  fn menus(&self) -> Vec<Element> {
    match self
      .document
      .query_selector_all(MENU_DROPDOWN_SELECTOR)
    {
      | Ok(list) => elements(&list),
      | Err(error) => {
        tracing::warn!(?error, "failed to list menus");
        vec![]
      }
    }
  }

  fn menu_is_open(
    &self,
    menu: &Element
  ) -> bool {
    menu
      .class_list()
      .contains(&self.classes.menu_open)
  }

  fn set_menu_open(
    &self,
    menu: &Element,
    open: bool
  ) {
    set_class(
      menu,
      &self.classes.menu_open,
      open
    );
  }

  fn menu_card(
    &self,
    menu: &Element
  ) -> Option<Element> {
    menu
      .closest(CARD_SELECTOR)
      .ok()
      .flatten()
  }

  fn populate_menu(
    &self,
    menu: &Element,
    items: &[MenuItem]
  ) {
    menu.set_inner_html("");

    for item in items {
      let entry = match item {
        | MenuItem::Action {
          label,
          command
        } => self.build("button").map(|button| {
          report(
            "menu.data-action",
            button.set_attribute(
              "data-action",
              command.as_str()
            )
          );
          menu_button(&button, label);
          button
        }),
        | MenuItem::Divider => {
          self.build("div").map(|divider| {
            divider.set_class_name(
              &self.classes.menu_divider
            );
            divider
          })
        }
        | MenuItem::Disabled {
          label
        } => self.build("button").map(|button| {
          report(
            "menu.disabled",
            button.set_attribute(
              "disabled",
              ""
            )
          );
          menu_button(&button, label);
          button
        })
      };

      if let Some(entry) = entry {
        report(
          "menu.append",
          menu.append_child(&entry)
        );
      }
    }
  }
}

fn menu_button(
  button: &Element,
  label: &str
) {
  report(
    "menu.type",
    button.set_attribute("type", "button")
  );
  report(
    "menu.role",
    button.set_attribute("role", "menuitem")
  );
  button.set_text_content(Some(label));
}
