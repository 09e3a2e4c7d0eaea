use std::fmt;
use std::io::{self, Write};

use crate::parser;
use crate::registry::Registry;
use crate::render::{self, DefaultHooks, RenderHooks};

/// The mutable target of a parse.
///
/// Wraps a caller-owned configuration value `C` together with the option
/// registry that fills it in and the errors collected along the way. Option
/// handlers receive the whole environment, so they can update the
/// configuration, ask for help output, or record their own errors.
pub struct Environment<C> {
    config: C,
    registry: Registry<C>,
    errors: Vec<String>,
    show_help: bool,
    hooks: Box<dyn RenderHooks + Send + Sync>,
    sink: Box<dyn Write + Send>,
}

impl<C> Environment<C> {
    /// Create an environment around `config` with no options, default hooks
    /// and stdout as the output sink.
    pub fn new(config: C) -> Self {
        Self {
            config,
            registry: Registry::new(),
            errors: Vec::new(),
            show_help: false,
            hooks: Box::new(DefaultHooks),
            sink: Box::new(io::stdout()),
        }
    }

    pub fn with_hooks(mut self, hooks: impl RenderHooks + Send + Sync + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    pub fn with_sink(mut self, sink: impl Write + Send + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut C {
        &mut self.config
    }

    pub fn into_config(self) -> C {
        self.config
    }

    pub fn registry(&self) -> &Registry<C> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry<C> {
        &mut self.registry
    }

    /// Run the parser over `args`, invoking option handlers as options match.
    ///
    /// Returns `true` when no errors have been recorded. Errors accumulate
    /// across calls; parsing twice on one environment is not idempotent.
    pub fn parse<I, S>(&mut self, args: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        parser::parse(self, &args)
    }

    /// Parse, then print help if it was requested or the errors if any.
    pub fn finish<I, S>(&mut self, args: I) -> io::Result<bool>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ok = self.parse(args);
        if self.show_help {
            self.print_help()?;
        } else if self.has_error() {
            self.print_errors()?;
        }
        Ok(ok)
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn has_error(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn set_show_help(&mut self, show: bool) {
        self.show_help = show;
    }

    /// Help text for every registered option, wrapped in the help hooks.
    pub fn help_message(&self) -> String {
        let mut out = self.hooks.before_help();
        out.push_str(&render::help_lines(&self.registry));
        out.push_str(&self.hooks.after_help());
        out
    }

    /// Every recorded error, one per line, wrapped in the error hooks.
    pub fn error_message(&self) -> String {
        render::error_message(&*self.hooks, &self.errors)
    }

    pub fn print_help(&mut self) -> io::Result<()> {
        let text = self.help_message();
        self.sink.write_all(text.as_bytes())?;
        self.sink.flush()
    }

    pub fn print_errors(&mut self) -> io::Result<()> {
        let text = self.error_message();
        writeln!(self.sink, "{text}")?;
        self.sink.flush()
    }
}

impl<C: Default> Default for Environment<C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<C: fmt::Debug> fmt::Debug for Environment<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("errors", &self.errors)
            .field("show_help", &self.show_help)
            .finish_non_exhaustive()
    }
}
