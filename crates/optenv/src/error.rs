use thiserror::Error;

/// A defect in the registered option table itself.
///
/// Parsing never produces these: they come from [`Registry::check`](crate::Registry::check),
/// which callers run once after registration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("option #{index} has neither a short nor a long name")]
    Unnamed { index: usize },

    #[error("option name {name} is registered more than once (options #{first} and #{second})")]
    DuplicateName {
        name: String,
        first: usize,
        second: usize,
    },

    #[error("multi-value option {name} needs either MultiValue or SubModule")]
    InertMultiValue { name: String },

    #[error("option {name} is marked SubModule but does not take multiple values")]
    MisplacedSubModule { name: String },
}
