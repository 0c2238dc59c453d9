//! dockhost - document host for docking editors
//!
//! This crate provides the document container of a docking editor and the
//! cancelable close-request protocol that guards every document teardown,
//! driven through an Elm-style message/update loop.

pub mod cli;
pub mod close_request;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod messages;
pub mod model;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use close_request::{CloseRequestError, CloseRequestNotification, CloseRequestNotifier};
pub use commands::Cmd;
pub use config::HostConfig;
pub use messages::Msg;
pub use model::{DocumentHost, Workbench};
