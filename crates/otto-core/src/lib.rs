//! Drag-and-drop lifecycle engine for the container board.
//!
//! Everything here talks to the page through [`surface::BoardSurface`], so
//! the same code runs against the browser DOM and against in-memory boards
//! in tests.

pub mod config;
pub mod controller;
pub mod dispatch;
pub mod error;
pub mod feedback;
pub mod menu;
pub mod mutator;
pub mod session;
pub mod surface;

pub use config::BoardConfig;
pub use controller::{
  BoardController,
  DropOutcome
};
pub use dispatch::{
  CommandTransport,
  DispatchOutcome,
  DispatchRequest,
  Dispatcher,
  Reloader
};
pub use error::{
  ConfigError,
  DispatchError
};
pub use feedback::DropAffordance;
pub use menu::MenuController;
pub use surface::{
  BoardSurface,
  CardFlag,
  MenuSurface,
  ZoneFlag
};
