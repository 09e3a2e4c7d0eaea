//! Callback-driven command-line option parsing.
//!
//! Options are registered on an [`Environment`] together with a handler, and
//! parsing an argv runs the handler of every option that shows up. Handlers
//! write straight into the environment's configuration value:
//!
//! ```
//! use optenv::{Attributes, Environment};
//!
//! #[derive(Default)]
//! struct Config {
//!     verbose: bool,
//!     output: Option<String>,
//!     inputs: Vec<String>,
//! }
//!
//! let mut env = Environment::new(Config::default());
//! let registry = env.registry_mut();
//! registry.add_void(Some("-v"), Some("--verbose"), Some("Print more"), Attributes::OPTIONAL, |env| {
//!     env.config_mut().verbose = true;
//! });
//! registry.add_single(Some("-o"), Some("--output"), Some("Output file"), Attributes::NONE, |env, value| {
//!     env.config_mut().output = value.map(str::to_string);
//! });
//! registry.add_multi(Some("-i"), None, Some("Input files"), Attributes::MULTI_VALUE, |env, values| {
//!     env.config_mut().inputs = values.to_vec();
//! });
//!
//! assert!(env.parse(["-i", "a.txt", "b.txt", "-o", "out.txt", "--verbose"]));
//! let config = env.into_config();
//! assert!(config.verbose);
//! assert_eq!(config.output.as_deref(), Some("out.txt"));
//! assert_eq!(config.inputs, ["a.txt", "b.txt"]);
//! ```
//!
//! Parsing is deliberately permissive: unknown tokens are skipped, and the
//! only error the parser itself reports is a required option that is missing
//! (or is missing its value), as `Parameter <name> is required`.

mod attributes;
mod environment;
mod error;
mod option;
mod parser;
mod registry;
pub mod render;

pub use attributes::Attributes;
pub use environment::Environment;
pub use error::DefinitionError;
pub use option::{CliOption, Handler, OptionKind, ValueHandler, ValuesHandler, VoidHandler};
pub use parser::required_message;
pub use registry::Registry;
pub use render::{DefaultHooks, RenderHooks};
