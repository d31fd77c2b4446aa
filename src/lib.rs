mod board;
mod bot;
mod common;
mod config;
mod logging;
mod session;
mod ship;
pub mod ui;

pub use board::*;
pub use bot::*;
pub use common::*;
pub use config::*;
pub use logging::init_logging;
pub use session::*;
pub use ship::*;
