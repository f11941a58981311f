// Library surface for the binary, headless tests and reuse.
// Terminal setup and CLI parsing stay in main.rs.
pub mod app;
pub mod catalog;
pub mod config;
pub mod deck;
pub mod logging;
pub mod runtime;
pub mod scheduler;
pub mod session;
pub mod ui;

pub use app::{App, AppAction};
pub use session::{Direction, Progress, Session, SessionState, SettleTicket};
