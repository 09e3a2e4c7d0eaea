use std::sync::Arc;

use optenv::{Attributes, CliOption, Environment, Registry};
use serde::Serialize;

use crate::{OptionTable, SpecKind};

/// What a parse over a table did: every handler call in order, plus errors.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Report {
    pub command: String,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invocations: Vec<Invocation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// One handler call.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Invocation {
    pub option: String,
    pub kind: SpecKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    /// Nested parse of a sub-module option that has a command table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcommand: Option<Box<Report>>,
}

impl Invocation {
    fn new(option: &str, kind: SpecKind, values: Vec<String>) -> Self {
        Self {
            option: option.to_string(),
            kind,
            values,
            subcommand: None,
        }
    }
}

/// Register one recording handler per option of `table`.
///
/// Sub-module options with a nested `command` table run a nested parse of
/// their remaining tokens against it; the nested report is attached to the
/// invocation.
pub fn register_recording(table: &OptionTable, registry: &mut Registry<Report>) {
    for spec in &table.options {
        let name = spec.display_name().to_string();
        let short = spec.short.as_deref();
        let long = spec.long.as_deref();
        let description = spec.description.as_deref();
        let attributes = spec.attributes();

        let option: CliOption<Report> = match spec.kind {
            SpecKind::Void => CliOption::void(short, long, description, attributes, move |env| {
                record(env, Invocation::new(&name, SpecKind::Void, Vec::new()));
            }),
            SpecKind::Single => {
                CliOption::single(short, long, description, attributes, move |env, value| {
                    let values = value.map(str::to_string).into_iter().collect();
                    record(env, Invocation::new(&name, SpecKind::Single, values));
                })
            }
            SpecKind::Multi => {
                let nested: Option<Arc<OptionTable>> = spec
                    .command
                    .as_deref()
                    .filter(|_| attributes.contains(Attributes::SUB_MODULE))
                    .map(|t| Arc::new(t.clone()));
                CliOption::multi(short, long, description, attributes, move |env, values| {
                    let mut invocation = Invocation::new(&name, SpecKind::Multi, values.to_vec());
                    if let Some(nested) = &nested {
                        invocation.subcommand = Some(Box::new(run_table(nested, values)));
                    }
                    record(env, invocation);
                })
            }
        };
        registry.add(option);
    }
}

fn record(env: &mut Environment<Report>, invocation: Invocation) {
    tracing::debug!(option = %invocation.option, values = invocation.values.len(), "handler called");
    env.config_mut().invocations.push(invocation);
}

/// Parse `args` against `table` with recording handlers.
pub fn run_table(table: &OptionTable, args: &[String]) -> Report {
    let mut env = Environment::new(Report {
        command: table.name.clone(),
        ..Default::default()
    });
    register_recording(table, env.registry_mut());

    let ok = env.parse(args.iter().cloned());
    let errors = env.errors().to_vec();
    let mut report = env.into_config();
    report.ok = ok;
    report.errors = errors;
    report
}
