use std::fmt;

use crate::attributes::Attributes;
use crate::environment::Environment;

/// Callback for an option that takes no value.
pub type VoidHandler<C> = Box<dyn Fn(&mut Environment<C>) + Send + Sync>;
/// Callback for an option that takes at most one value.
pub type ValueHandler<C> = Box<dyn Fn(&mut Environment<C>, Option<&str>) + Send + Sync>;
/// Callback for an option that takes a run of values (or a sub-command's argv).
pub type ValuesHandler<C> = Box<dyn Fn(&mut Environment<C>, &[String]) + Send + Sync>;

/// How many argv tokens an option consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Void,
    SingleValue,
    MultiValue,
}

/// Option callback, tagged by arity.
pub enum Handler<C> {
    Void(VoidHandler<C>),
    Single(ValueHandler<C>),
    Multi(ValuesHandler<C>),
}

impl<C> Handler<C> {
    pub fn kind(&self) -> OptionKind {
        match self {
            Self::Void(_) => OptionKind::Void,
            Self::Single(_) => OptionKind::SingleValue,
            Self::Multi(_) => OptionKind::MultiValue,
        }
    }
}

impl<C> fmt::Debug for Handler<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler::{:?}", self.kind())
    }
}

/// One registered command-line switch.
///
/// Options are built once and never change afterwards. Nothing is validated
/// at construction: an option without names simply never matches, see
/// [`Registry::check`](crate::Registry::check) for an explicit definition check.
#[derive(Debug)]
pub struct CliOption<C> {
    short: Option<String>,
    long: Option<String>,
    description: Option<String>,
    attributes: Attributes,
    handler: Handler<C>,
}

impl<C> CliOption<C> {
    pub fn new(
        short: Option<&str>,
        long: Option<&str>,
        description: Option<&str>,
        attributes: Attributes,
        handler: Handler<C>,
    ) -> Self {
        Self {
            short: short.map(str::to_string),
            long: long.map(str::to_string),
            description: description.map(str::to_string),
            attributes,
            handler,
        }
    }

    pub fn void<F>(
        short: Option<&str>,
        long: Option<&str>,
        description: Option<&str>,
        attributes: Attributes,
        handler: F,
    ) -> Self
    where
        F: Fn(&mut Environment<C>) + Send + Sync + 'static,
    {
        Self::new(short, long, description, attributes, Handler::Void(Box::new(handler)))
    }

    pub fn single<F>(
        short: Option<&str>,
        long: Option<&str>,
        description: Option<&str>,
        attributes: Attributes,
        handler: F,
    ) -> Self
    where
        F: Fn(&mut Environment<C>, Option<&str>) + Send + Sync + 'static,
    {
        Self::new(short, long, description, attributes, Handler::Single(Box::new(handler)))
    }

    pub fn multi<F>(
        short: Option<&str>,
        long: Option<&str>,
        description: Option<&str>,
        attributes: Attributes,
        handler: F,
    ) -> Self
    where
        F: Fn(&mut Environment<C>, &[String]) + Send + Sync + 'static,
    {
        Self::new(short, long, description, attributes, Handler::Multi(Box::new(handler)))
    }

    pub fn short(&self) -> Option<&str> {
        self.short.as_deref()
    }

    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn attributes(&self) -> Attributes {
        self.attributes
    }

    pub fn kind(&self) -> OptionKind {
        self.handler.kind()
    }

    pub fn handler(&self) -> &Handler<C> {
        &self.handler
    }

    /// A sub-module option is never required, whatever its other flags say.
    pub fn is_required(&self) -> bool {
        !self.attributes.contains(Attributes::OPTIONAL)
            && !self.attributes.contains(Attributes::SUB_MODULE)
    }

    /// Name used in messages: long name, else short name.
    pub fn display_name(&self) -> &str {
        self.long()
            .or_else(|| self.short())
            .unwrap_or_default()
    }

    /// Exact comparison against either name.
    pub fn matches(&self, token: &str) -> bool {
        self.short() == Some(token) || self.long() == Some(token)
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = &str> {
        self.short().into_iter().chain(self.long())
    }
}
