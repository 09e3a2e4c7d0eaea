//! Declarative option tables.
//!
//! An option table describes a command's options as data (JSON), so tools can
//! render help, check definitions, or run the parser without compiling
//! handlers. Each option kind maps onto the handler arity of the same name in
//! [`optenv`]. A sub-module option may carry a nested table describing the
//! command it hands its remaining tokens to.

use serde::{Deserialize, Serialize};

use optenv::{Attributes, OptionKind};

mod recorder;

pub use recorder::{Invocation, Report, register_recording, run_table};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct OptionTable {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct OptionSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub kind: SpecKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeName>,
    /// Table for the nested command of a sub-module option.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Box<OptionTable>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SpecKind {
    #[default]
    Void,
    Single,
    Multi,
}

impl From<SpecKind> for OptionKind {
    fn from(kind: SpecKind) -> Self {
        match kind {
            SpecKind::Void => OptionKind::Void,
            SpecKind::Single => OptionKind::SingleValue,
            SpecKind::Multi => OptionKind::MultiValue,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AttributeName {
    Optional,
    OptionalValue,
    MultiValue,
    SubModule,
}

impl From<AttributeName> for Attributes {
    fn from(name: AttributeName) -> Self {
        match name {
            AttributeName::Optional => Attributes::OPTIONAL,
            AttributeName::OptionalValue => Attributes::OPTIONAL_VALUE,
            AttributeName::MultiValue => Attributes::MULTI_VALUE,
            AttributeName::SubModule => Attributes::SUB_MODULE,
        }
    }
}

impl OptionSpec {
    pub fn attributes(&self) -> Attributes {
        self.attributes
            .iter()
            .fold(Attributes::NONE, |acc, name| acc | Attributes::from(*name))
    }

    /// Name used in reports: long name, else short name.
    pub fn display_name(&self) -> &str {
        self.long
            .as_deref()
            .or(self.short.as_deref())
            .unwrap_or_default()
    }
}

/// A definition defect found somewhere in a (possibly nested) table.
#[derive(Debug, thiserror::Error)]
#[error("command '{command}': {source}")]
pub struct TableError {
    /// Space-separated path of command names leading to the bad table.
    pub command: String,
    #[source]
    pub source: optenv::DefinitionError,
}

impl OptionTable {
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Run the definition check on this table and every nested command table.
    pub fn check(&self) -> Result<(), TableError> {
        self.check_under("")
    }

    fn check_under(&self, parent: &str) -> Result<(), TableError> {
        let command = if parent.is_empty() {
            self.name.clone()
        } else {
            format!("{parent} {}", self.name)
        };

        let mut registry = optenv::Registry::<Report>::new();
        register_recording(self, &mut registry);
        registry.check().map_err(|source| TableError {
            command: command.clone(),
            source,
        })?;

        for spec in &self.options {
            if let Some(nested) = &spec.command {
                nested.check_under(&command)?;
            }
        }
        Ok(())
    }

    /// Help text for this table's options, as the parser would render it.
    pub fn help(&self) -> String {
        let mut env = optenv::Environment::new(Report::default());
        register_recording(self, env.registry_mut());
        let mut out = String::new();
        if self.summary.trim().is_empty() {
            out.push_str(&self.name);
        } else {
            out.push_str(&format!("{} - {}", self.name, self.summary.trim()));
        }
        out.push_str("\n\n");
        out.push_str(&env.help_message());
        out
    }
}
