use std::cell::RefCell;
use std::rc::Rc;

use anyhow::anyhow;
use gloo::console::log;
use gloo::events::{
  EventListener,
  EventListenerOptions
};
use otto_core::{
  BoardConfig,
  BoardController,
  DispatchRequest,
  Dispatcher,
  DropAffordance,
  DropOutcome,
  MenuController
};
use otto_shared::LifecycleCommand;
use wasm_bindgen::JsCast;
use web_sys::{
  Document,
  DragEvent,
  Element,
  Event,
  Node
};

use crate::dom::{
  self,
  CARD_SELECTOR,
  DomBoard,
  MENU_ACTION_SELECTOR,
  MENU_DROPDOWN_SELECTOR,
  MENU_TOGGLE_SELECTOR,
  MENU_WRAP_SELECTOR,
  ZONE_SELECTOR
};
use crate::transport::{
  HttpTransport,
  PageReloader
};

const CONFIG_ELEMENT_ID: &str =
  "otto-config";

type BoardDispatcher = Dispatcher<
  DomBoard,
  HttpTransport,
  PageReloader
>;

/// Everything the listeners share. Handlers run one at a time, so the
/// `RefCell` borrows never overlap; none is held across an await.
struct BoardRuntime {
  board:      DomBoard,
  controller:
    RefCell<BoardController<DomBoard>>,
  menus:
    RefCell<MenuController<DomBoard>>,
  dispatcher: Rc<BoardDispatcher>,
  debug:      bool
}

/// Wires the board once the document has been parsed.
pub fn mount_when_ready()
-> anyhow::Result<()> {
  let document = web_sys::window()
    .and_then(|window| window.document())
    .ok_or_else(|| {
      anyhow!("missing window document")
    })?;

  if still_parsing(&document.ready_state())
  {
    EventListener::once(
      &document,
      "DOMContentLoaded",
      |_| {
        if let Err(error) = mount() {
          tracing::error!(%error, "failed to mount board");
        }
      }
    )
    .forget();
    Ok(())
  } else {
    mount()
  }
}

/// `document.readyState` is `"loading"` until the parser finishes; it then
/// moves to `"interactive"` and `"complete"`.
fn still_parsing(ready_state: &str) -> bool {
  ready_state == "loading"
}

#[tracing::instrument]
fn mount() -> anyhow::Result<()> {
  let window = web_sys::window()
    .ok_or_else(|| anyhow!("missing window"))?;
  let document =
    window.document().ok_or_else(|| {
      anyhow!("missing document")
    })?;

  let override_text = document
    .get_element_by_id(CONFIG_ELEMENT_ID)
    .and_then(|element| {
      element.text_content()
    });
  let config = BoardConfig::load_or_default(
    override_text.as_deref()
  );

  let board =
    DomBoard::new(document.clone(), &config)?;
  let dispatcher = Rc::new(Dispatcher::new(
    board.clone(),
    HttpTransport,
    PageReloader::new(window),
    config.endpoint_prefix.clone()
  ));
  let debug = config.debug_events;
  let runtime = Rc::new(BoardRuntime {
    board:      board.clone(),
    controller: RefCell::new(
      BoardController::new(board, config)
    ),
    menus:      RefCell::new(
      MenuController::new()
    ),
    dispatcher,
    debug
  });

  install_drag_listeners(&document, &runtime);
  install_click_listener(&document, &runtime);

  tracing::info!("board mounted");
  Ok(())
}

fn install_drag_listeners(
  document: &Document,
  runtime: &Rc<BoardRuntime>
) {
  {
    let runtime = Rc::clone(runtime);
    EventListener::new(
      document,
      "dragstart",
      move |event| {
        on_drag_start(&runtime, event)
      }
    )
    .forget();
  }

  {
    let runtime = Rc::clone(runtime);
    EventListener::new(
      document,
      "dragend",
      move |_| {
        ui_debug(
          runtime.debug,
          "drag.end",
          "drag gesture ended"
        );
        runtime
          .controller
          .borrow_mut()
          .drag_end();
      }
    )
    .forget();
  }

  let zones = match document
    .query_selector_all(ZONE_SELECTOR)
  {
    | Ok(list) => dom::elements(&list),
    | Err(error) => {
      tracing::error!(?error, "failed to find drop zones");
      return;
    }
  };

  for zone_el in zones {
    let Some(zone) = dom::zone_of(&zone_el)
    else {
      tracing::warn!(
        "drop zone with unknown state; \
         skipping"
      );
      continue;
    };

    {
      let runtime = Rc::clone(runtime);
      EventListener::new_with_options(
        &zone_el,
        "dragover",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
          let Some(drag) =
            event.dyn_ref::<DragEvent>()
          else {
            return;
          };
          let affordance = runtime
            .controller
            .borrow_mut()
            .drag_over(
              zone,
              f64::from(drag.client_y())
            );
          match affordance {
            | DropAffordance::Accept => {
              drag.prevent_default();
              if let Some(transfer) =
                drag.data_transfer()
              {
                transfer.set_drop_effect("move");
              }
            }
            | DropAffordance::Refuse => {
              if let Some(transfer) =
                drag.data_transfer()
              {
                transfer.set_drop_effect("none");
              }
            }
            | DropAffordance::Unhandled => {}
          }
        }
      )
      .forget();
    }

    {
      let runtime = Rc::clone(runtime);
      let zone_node: Node =
        zone_el.clone().into();
      EventListener::new(
        &zone_el,
        "dragleave",
        move |event| {
          let Some(drag) =
            event.dyn_ref::<DragEvent>()
          else {
            return;
          };
          let destination = drag
            .related_target()
            .and_then(|target| {
              target.dyn_into::<Node>().ok()
            });
          let inside = zone_node
            .contains(destination.as_ref());
          runtime
            .controller
            .borrow_mut()
            .drag_leave(zone, inside);
        }
      )
      .forget();
    }

    {
      let runtime = Rc::clone(runtime);
      EventListener::new_with_options(
        &zone_el,
        "drop",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
          event.prevent_default();
          let outcome = runtime
            .controller
            .borrow_mut()
            .drop(zone);
          match outcome {
            | DropOutcome::Moved {
              request: Some(request),
              ..
            } => {
              ui_debug(
                runtime.debug,
                "drop.moved",
                &format!(
                  "{} -> {zone}",
                  request.container_id
                )
              );
              spawn_dispatch(&runtime, request);
            }
            | DropOutcome::Moved {
              request: None,
              ..
            } => {}
            | DropOutcome::Rejected => {
              ui_debug(
                runtime.debug,
                "drop.rejected",
                zone.as_str()
              );
            }
            | DropOutcome::Ignored => {}
          }
        }
      )
      .forget();
    }
  }
}

fn on_drag_start(
  runtime: &BoardRuntime,
  event: &Event
) {
  let Some(card) = closest(event, CARD_SELECTOR)
  else {
    return;
  };

  if let Some(drag) =
    event.dyn_ref::<DragEvent>()
    && let Some(transfer) =
      drag.data_transfer()
  {
    transfer.set_effect_allowed("move");
    let id = card
      .get_attribute("data-container-id")
      .unwrap_or_default();
    if let Err(error) =
      transfer.set_data("text/plain", &id)
    {
      tracing::warn!(?error, "failed writing drag data");
    }
  }

  ui_debug(
    runtime.debug,
    "drag.start",
    &card
      .get_attribute("data-container-id")
      .unwrap_or_default()
  );
  runtime
    .controller
    .borrow_mut()
    .drag_start(card);
}

fn install_click_listener(
  document: &Document,
  runtime: &Rc<BoardRuntime>
) {
  let runtime = Rc::clone(runtime);
  EventListener::new_with_options(
    document,
    "click",
    EventListenerOptions::enable_prevent_default(),
    move |event| {
      if let Some(toggle) =
        closest(event, MENU_TOGGLE_SELECTOR)
      {
        event.prevent_default();
        event.stop_propagation();
        on_menu_toggle(&runtime, &toggle);
      } else if let Some(entry) =
        closest(event, MENU_ACTION_SELECTOR)
      {
        event.prevent_default();
        event.stop_propagation();
        on_menu_action(&runtime, &entry);
      } else if runtime
        .menus
        .borrow()
        .open_menu()
        .is_some()
      {
        runtime
          .menus
          .borrow_mut()
          .dismiss(&runtime.board);
      }
    }
  )
  .forget();
}

fn on_menu_toggle(
  runtime: &BoardRuntime,
  toggle: &Element
) {
  let Some(menu) = toggle
    .closest(MENU_WRAP_SELECTOR)
    .ok()
    .flatten()
    .and_then(|wrap| {
      wrap
        .query_selector(MENU_DROPDOWN_SELECTOR)
        .ok()
        .flatten()
    })
  else {
    tracing::warn!(
      "menu toggle without a dropdown"
    );
    return;
  };

  runtime
    .menus
    .borrow_mut()
    .toggle(&runtime.board, &menu);
}

fn on_menu_action(
  runtime: &Rc<BoardRuntime>,
  entry: &Element
) {
  let Some(command) = entry
    .get_attribute("data-action")
    .as_deref()
    .and_then(LifecycleCommand::from_attr)
  else {
    tracing::warn!(
      action = ?entry.get_attribute("data-action"),
      "unknown menu action"
    );
    runtime
      .menus
      .borrow_mut()
      .dismiss(&runtime.board);
    return;
  };

  let card = entry
    .closest(CARD_SELECTOR)
    .ok()
    .flatten();
  let request = runtime
    .menus
    .borrow_mut()
    .select(&runtime.board, card, command);

  if let Some(request) = request {
    ui_debug(
      runtime.debug,
      "menu.action",
      &format!(
        "{} {command}",
        request.container_id
      )
    );
    spawn_dispatch(runtime, request);
  }
}

fn spawn_dispatch(
  runtime: &Rc<BoardRuntime>,
  request: DispatchRequest<Element>
) {
  let dispatcher =
    Rc::clone(&runtime.dispatcher);
  wasm_bindgen_futures::spawn_local(
    async move {
      let outcome =
        dispatcher.dispatch(request).await;
      tracing::debug!(
        completed = outcome.completed.len(),
        failed = !outcome.succeeded(),
        "dispatch settled"
      );
    }
  );
}

fn closest(
  event: &Event,
  selector: &str
) -> Option<Element> {
  event
    .target()
    .and_then(|target| {
      target.dyn_into::<Element>().ok()
    })
    .and_then(|element| {
      element.closest(selector).ok().flatten()
    })
}

fn ui_debug(
  enabled: bool,
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  if enabled {
    log!(format!(
      "[ui-debug] {event}: {detail}"
    ));
  }
}
