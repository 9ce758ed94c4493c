//! vef_webservice - serve a vef_forms form as a single-window browser app
//!
//! [`VefApp`] owns the form, renders the page, hands the schema to the client,
//! stores submissions and runs the submit handler. Messages pushed through the
//! [`ConsoleSession`] appear in the window's console pane.

pub mod app;
pub mod browser;
pub mod config;
pub mod console;

pub use app::{SubmitContext, VefApp};
pub use browser::BrowserError;
pub use config::{load_config_from_path, AppConfig, ConfigError};
pub use console::{ConsoleEvent, ConsolePayload, ConsoleSession};
