//! Screen state for the home list and the new-application form.
//!
//! # Responsibility
//! - Hold per-screen state and drive it through service calls.
//! - Report where the UI should navigate next; routing itself lives in the
//!   embedding UI.

use crate::model::application::ApplicationKey;

pub mod entry_form;
pub mod list_view;

/// Logical screens of the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Home screen listing saved applications.
    List,
    /// New-application form.
    NewApplication,
    /// Details of one application.
    Details(ApplicationKey),
}
