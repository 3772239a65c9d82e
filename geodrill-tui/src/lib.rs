//! geodrill TUI: drill from the world map down to states and districts.
//!
//! The main thread owns [`app::AppState`] and draws it; a worker thread owns
//! the drilldown controller and does all network loads (see [`worker`]).

pub mod app;
pub mod input;
pub mod theme;
pub mod ui;
pub mod viewport;
pub mod worker;

pub use app::AppState;

#[cfg(test)]
mod test_helpers;
