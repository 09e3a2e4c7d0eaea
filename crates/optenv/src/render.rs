//! Help and error text.
//!
//! Rendering never writes anywhere by itself; [`Environment`](crate::Environment)
//! sends the finished text to its sink.

use crate::option::CliOption;
use crate::registry::Registry;

/// Line length after which option descriptions wrap.
pub const HELP_WIDTH: usize = 120;

/// Text placed around help and error output.
///
/// Every method defaults to the empty string; override the ones you need.
pub trait RenderHooks {
    fn before_help(&self) -> String {
        String::new()
    }

    fn after_help(&self) -> String {
        String::new()
    }

    /// Emitted once before the whole batch of errors.
    fn before_errors(&self) -> String {
        String::new()
    }

    fn after_errors(&self) -> String {
        String::new()
    }

    /// Emitted before each individual error.
    fn before_error(&self) -> String {
        String::new()
    }

    fn after_error(&self) -> String {
        String::new()
    }
}

/// Hooks that add nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHooks;

impl RenderHooks for DefaultHooks {}

/// One line per option, in registration order.
pub fn help_lines<C>(registry: &Registry<C>) -> String {
    let mut out = String::new();
    for option in registry {
        out.push_str(&help_line(option));
        out.push('\n');
    }
    out
}

/// `  <short>|<long>\t<description> (<attributes>)`
///
/// The attribute suffix is left out when no attribute is set. Long
/// descriptions wrap at word boundaries, continuation lines are indented to
/// the description column.
pub fn help_line<C>(option: &CliOption<C>) -> String {
    let head = format!(
        "  {}|{}",
        option.short().unwrap_or_default(),
        option.long().unwrap_or_default()
    );

    let mut body = option.description().unwrap_or_default().trim().to_string();
    let attributes = option.attributes();
    if !attributes.is_empty() {
        if !body.is_empty() {
            body.push(' ');
        }
        body.push_str(&format!("({attributes})"));
    }

    let head_width = head.chars().count();
    let indent = format!("{}\t", " ".repeat(head_width));
    format!("{head}\t{}", wrap(&body, head_width + 1, &indent))
}

/// Greedy word wrap. `start` is the column the text begins at; each
/// continuation line starts with `indent` and resumes at that same column.
/// A single word longer than the remaining width is kept whole.
fn wrap(text: &str, start: usize, indent: &str) -> String {
    let mut out = String::new();
    let mut column = start;
    let mut line_has_word = false;

    for word in text.split(' ').filter(|w| !w.is_empty()) {
        let len = word.chars().count();
        if line_has_word && column + 1 + len > HELP_WIDTH {
            out.push('\n');
            out.push_str(indent);
            column = start;
            line_has_word = false;
        }
        if line_has_word {
            out.push(' ');
            column += 1;
        }
        out.push_str(word);
        column += len;
        line_has_word = true;
    }

    out
}

/// Join errors with newlines, each wrapped in the per-error hooks and the
/// whole batch wrapped in the batch hooks.
pub fn error_message(hooks: &(dyn RenderHooks + Send + Sync), errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }

    let lines: Vec<String> = errors
        .iter()
        .map(|e| format!("{}{e}{}", hooks.before_error(), hooks.after_error()))
        .collect();

    let mut out = hooks.before_errors();
    out.push_str(&lines.join("\n"));
    out.push_str(&hooks.after_errors());
    out
}
