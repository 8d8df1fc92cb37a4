//! Cargo-style status lines on stderr.
//!
//! Results go to stdout; everything here is for the human watching.

use std::io::Write;

use console::Style;

fn emit(style: Style, label: &str, message: &str) {
    let _ = writeln!(
        std::io::stderr(),
        "{:>12} {message}",
        style.bold().apply_to(label)
    );
}

/// Print an action line such as `   Resolving 12 modules`.
///
/// The label is right-aligned to 12 columns in bold green.
pub fn status(label: &str, message: &str) {
    emit(Style::new().green(), label, message);
}

/// Like [`status`] but bold cyan, for informational lines.
pub fn status_info(label: &str, message: &str) {
    emit(Style::new().cyan(), label, message);
}

pub fn status_warn(label: &str, message: &str) {
    emit(Style::new().yellow(), label, message);
}
