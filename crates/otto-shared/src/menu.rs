use serde::{
  Deserialize,
  Serialize
};

use crate::lifecycle::{
  LifecycleCommand,
  LifecycleState
};

pub const VIEW_LOGS_LABEL: &str =
  "View Logs";

/// One row of a card's contextual menu.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub enum MenuItem {
  Action {
    label:   String,
    command: LifecycleCommand
  },
  Divider,
  Disabled {
    label: String
  }
}

impl MenuItem {
  fn action(
    label: &str,
    command: LifecycleCommand
  ) -> Self {
    MenuItem::Action {
      label: label.to_string(),
      command
    }
  }

  pub fn is_enabled(&self) -> bool {
    matches!(self, MenuItem::Action { .. })
  }
}

/// Menu rows for a card. Unknown states get no actions, only the trailing
/// divider and the disabled logs entry.
pub fn menu_items(
  state: Option<LifecycleState>
) -> Vec<MenuItem> {
  let mut items = match state {
    | Some(LifecycleState::Running) => {
      vec![
        MenuItem::action(
          "Pause",
          LifecycleCommand::Pause
        ),
        MenuItem::action(
          "Stop",
          LifecycleCommand::Stop
        ),
      ]
    }
    | Some(LifecycleState::Paused) => {
      vec![MenuItem::action(
        "Resume",
        LifecycleCommand::Unpause
      )]
    }
    | Some(LifecycleState::Stopped) => {
      vec![MenuItem::action(
        "Start",
        LifecycleCommand::Start
      )]
    }
    | None => vec![]
  };

  items.push(MenuItem::Divider);
  items.push(MenuItem::Disabled {
    label: VIEW_LOGS_LABEL.to_string()
  });
  items
}
