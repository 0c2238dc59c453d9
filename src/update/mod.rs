//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod app;
mod layout;

pub use app::update_app;
pub use layout::update_layout;

use crate::close_request::CloseRequestError;
use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::Workbench;

/// Main update function - dispatches to sub-handlers
///
/// Close-request failures are shown in the status line and returned to the
/// caller; the affected document stays open.
pub fn update(model: &mut Workbench, msg: Msg) -> Result<Option<Cmd>, CloseRequestError> {
    let result = match msg {
        Msg::Layout(m) => update_layout(model, m),
        Msg::App(m) => update_app(model, m),
    };

    if let Err(e) = &result {
        tracing::warn!("close request failed: {}", e);
        model.set_status(e.user_message());
    }

    result
}
