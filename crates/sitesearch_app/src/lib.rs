//! Sitesearch app: presentation controller, terminal rendering and CLI wiring.
pub mod cli;
pub mod controller;
pub mod render;

pub use controller::{Notification, PresentationController};
