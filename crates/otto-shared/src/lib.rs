pub mod lifecycle;
pub mod menu;

pub use lifecycle::{
  LifecycleCommand,
  LifecycleState,
  command_for,
  command_path,
  is_legal,
  legal_targets
};
pub use menu::{
  MenuItem,
  menu_items
};
