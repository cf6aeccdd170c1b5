//! Terminal implementations of the rendering and prompting seams.

mod form;
mod list;
mod prompt;

use std::io::Write;

use crate::application::notify::{Notifier, Toast};

pub use form::TerminalForm;
pub use list::{TerminalDetailRenderer, TerminalListRenderer};
pub use prompt::{AutoConfirm, PromptConfirm, SharedInput};

/// Prints toasts to stderr, one line each.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, toast: Toast) {
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "[{}] {}", toast.kind.as_str(), toast.text);
    }
}
