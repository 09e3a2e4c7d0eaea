//! The scan over argv.
//!
//! Tokens are read left to right. A token that names a still-unmatched option
//! dispatches that option's handler; anything else is skipped. Values are
//! taken from the tokens directly after an option until a token turns out to
//! be the name of a registered option.

use std::sync::Arc;

use indexmap::IndexSet;

use crate::attributes::Attributes;
use crate::environment::Environment;
use crate::option::{CliOption, Handler};
use crate::registry::Registry;

/// What the scan does after dispatching one option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Continue at this argv index.
    Goto(usize),
    /// A sub-command took over the remaining tokens.
    Stop,
}

struct Scan<'a, C> {
    /// Registry snapshot taken when the parse starts.
    options: Registry<C>,
    /// Indices into `options` not matched yet, in registration order.
    pending: IndexSet<usize>,
    args: &'a [String],
}

impl<'a, C> Scan<'a, C> {
    fn new(env: &Environment<C>, args: &'a [String]) -> Self {
        let options = env.registry().clone();
        let pending = (0..options.len()).collect();
        Self {
            options,
            pending,
            args,
        }
    }

    /// First pending option named `token`, removed from the pending set.
    fn take_match(&mut self, token: &str) -> Option<Arc<CliOption<C>>> {
        let (index, option) = self.pending.iter().find_map(|&i| {
            self.options
                .get(i)
                .filter(|o| o.matches(token))
                .map(|o| (i, Arc::clone(o)))
        })?;
        self.pending.shift_remove(&index);
        Some(option)
    }

    /// The token after `pos`, unless it is missing, empty, or spells the name
    /// of any registered option (matched already or not).
    fn value_after(&self, pos: usize) -> Option<&'a str> {
        let candidate = self.args.get(pos + 1)?.as_str();
        if candidate.is_empty() {
            return None;
        }
        if candidate.starts_with('-') && self.options.is_registered_name(candidate) {
            return None;
        }
        Some(candidate)
    }

    fn dispatch(&self, env: &mut Environment<C>, option: &CliOption<C>, pos: usize) -> Step {
        let attributes = option.attributes();

        match option.handler() {
            Handler::Void(handler) => {
                handler(env);
                Step::Goto(pos + 1)
            }
            Handler::Single(handler) => {
                let value = self.value_after(pos);
                if value.is_none() && option.is_required() {
                    report_missing(env, option);
                    return Step::Goto(pos + 1);
                }
                handler(env, value);
                Step::Goto(if value.is_some() { pos + 2 } else { pos + 1 })
            }
            Handler::Multi(handler) if attributes.contains(Attributes::SUB_MODULE) => {
                let remainder = &self.args[pos + 1..];
                tracing::debug!(
                    option = option.display_name(),
                    tokens = remainder.len(),
                    "handing remaining tokens to sub-command"
                );
                handler(env, remainder);
                Step::Stop
            }
            Handler::Multi(handler) if attributes.contains(Attributes::MULTI_VALUE) => {
                let mut values: Vec<String> = Vec::new();
                let mut last = pos;
                while let Some(value) = self.value_after(last) {
                    values.push(value.to_string());
                    last += 1;
                }
                if values.is_empty() && option.is_required() {
                    report_missing(env, option);
                    return Step::Goto(pos + 1);
                }
                handler(env, values.as_slice());
                Step::Goto(last + 1)
            }
            Handler::Multi(_) => {
                tracing::warn!(
                    option = option.display_name(),
                    "multi-value option has neither MultiValue nor SubModule, nothing consumed"
                );
                Step::Goto(pos)
            }
        }
    }
}

fn report_missing<C>(env: &mut Environment<C>, option: &CliOption<C>) {
    let message = required_message(option);
    tracing::debug!("{message}");
    env.push_error(message);
}

/// `Parameter <name> is required`, naming the option by its long name when it
/// has one.
pub fn required_message<C>(option: &CliOption<C>) -> String {
    format!("Parameter {} is required", option.display_name())
}

/// Scan `args`, dispatching handlers into `env`, then report every required
/// option that never showed up.
///
/// Returns `true` when `env` holds no errors afterwards.
pub(crate) fn parse<C>(env: &mut Environment<C>, args: &[String]) -> bool {
    let mut scan = Scan::new(env, args);
    let mut pos = 0usize;

    while pos < args.len() {
        let token = args[pos].as_str();
        tracing::trace!(token, pos, "scanning");

        let Some(option) = scan.take_match(token) else {
            pos += 1;
            continue;
        };

        tracing::debug!(option = option.display_name(), kind = ?option.kind(), pos, "matched option");
        match scan.dispatch(env, &option, pos) {
            Step::Goto(next) => pos = next,
            Step::Stop => return !env.has_error(),
        }
    }

    for &index in &scan.pending {
        if let Some(option) = scan.options.get(index)
            && option.is_required()
        {
            report_missing(env, option);
        }
    }

    !env.has_error()
}
