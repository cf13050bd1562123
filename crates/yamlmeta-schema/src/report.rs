//! Text rendering of schema errors.
//!
//! The layout is fixed so reports can be compared byte for byte:
//!
//! ```text
//! <summary>
//! <'=' under the summary>
//!
//! <description>
//! <file>:
//!     |
//!     | ...
//!   5 | <source line>
//!     |
//!
//!     = found: <found>
//!     = expected: <expected>
//!     = hint: <hint>
//! ```
//!
//! Every gutter is padded to the widest line label in the whole report.

use crate::error::AssertionFailure;
use std::fmt::Write;

/// Render a summary, its failures, and free-form messages.
pub fn render_report(summary: &str, failures: &[AssertionFailure], misc: &[String]) -> String {
    let width = failures
        .iter()
        .flat_map(|failure| {
            failure
                .positions
                .iter()
                .map(|info| info.pos.len())
                .chain(std::iter::once(failure.file_pos.len()))
        })
        .max()
        .unwrap_or(0);
    let pad = |delim: &str, label: &str| format!("  {:>width$} {}", label, delim, width = width);

    let mut out = String::new();

    if !summary.is_empty() {
        let _ = write!(
            out,
            "\n{}\n{}\n",
            summary,
            "=".repeat(summary.chars().count())
        );
    }

    for failure in failures {
        if !failure.description.is_empty() {
            out.push('\n');
            out.push_str(&failure.description);
        }

        if failure.from_memory {
            let gutter = pad("#", "");
            let _ = write!(
                out,
                "\n{}:\n{}\n{} {}\n{}",
                failure.source_name, gutter, gutter, failure.source, gutter
            );
        } else {
            let gutter = pad("|", "");
            let _ = write!(out, "\n{}:\n{}", failure.file_name, gutter);
            for info in &failure.positions {
                if info.skip_lines {
                    let _ = write!(out, "\n{} ...", gutter);
                }
                let _ = write!(out, "\n{} {}", pad("|", &info.pos), info.source);
            }
            let _ = write!(out, "\n{}", gutter);
        }

        let mut lines = Vec::new();
        if !failure.found.is_empty() {
            lines.push(format!("{} found: {}", pad("=", ""), failure.found));
        }
        if !failure.expected.is_empty() {
            lines.push(format!("{} expected: {}", pad("=", ""), failure.expected));
        }
        for hint in &failure.hints {
            lines.push(format!("{} hint: {}", pad("=", ""), hint));
        }
        let _ = write!(out, "\n\n{}\n", lines.join("\n"));
    }

    // golden reports keep a space before each message's newline
    for message in misc {
        let _ = writeln!(out, "{} ", message);
    }
    out.push('\n');

    out
}
