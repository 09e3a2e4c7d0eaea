use std::collections::HashMap;
use std::sync::Arc;

use crate::attributes::Attributes;
use crate::environment::Environment;
use crate::error::DefinitionError;
use crate::option::{CliOption, OptionKind};

/// Registered options in registration order.
///
/// Order matters twice: help lines are rendered in it, and missing required
/// options are reported in it.
#[derive(Debug)]
pub struct Registry<C> {
    options: Vec<Arc<CliOption<C>>>,
}

impl<C> Default for Registry<C> {
    fn default() -> Self {
        Self {
            options: Vec::new(),
        }
    }
}

impl<C> Clone for Registry<C> {
    fn clone(&self) -> Self {
        Self {
            options: self.options.clone(),
        }
    }
}

impl<C> Registry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an option and hand back the stored handle.
    ///
    /// No deduplication happens here; two options sharing a name are both
    /// kept and the first one registered wins during parsing.
    pub fn add(&mut self, option: CliOption<C>) -> Arc<CliOption<C>> {
        let option = Arc::new(option);
        self.options.push(Arc::clone(&option));
        option
    }

    pub fn add_void<F>(
        &mut self,
        short: Option<&str>,
        long: Option<&str>,
        description: Option<&str>,
        attributes: Attributes,
        handler: F,
    ) -> Arc<CliOption<C>>
    where
        F: Fn(&mut Environment<C>) + Send + Sync + 'static,
    {
        self.add(CliOption::void(short, long, description, attributes, handler))
    }

    pub fn add_single<F>(
        &mut self,
        short: Option<&str>,
        long: Option<&str>,
        description: Option<&str>,
        attributes: Attributes,
        handler: F,
    ) -> Arc<CliOption<C>>
    where
        F: Fn(&mut Environment<C>, Option<&str>) + Send + Sync + 'static,
    {
        self.add(CliOption::single(short, long, description, attributes, handler))
    }

    pub fn add_multi<F>(
        &mut self,
        short: Option<&str>,
        long: Option<&str>,
        description: Option<&str>,
        attributes: Attributes,
        handler: F,
    ) -> Arc<CliOption<C>>
    where
        F: Fn(&mut Environment<C>, &[String]) + Send + Sync + 'static,
    {
        self.add(CliOption::multi(short, long, description, attributes, handler))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<CliOption<C>>> {
        self.options.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<CliOption<C>>> {
        self.options.get(index)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Whether `token` equals a name of any registered option.
    pub fn is_registered_name(&self, token: &str) -> bool {
        self.options.iter().any(|o| o.matches(token))
    }

    /// Check the table for definitions the parser would silently misbehave on.
    ///
    /// Reports the first defect in registration order.
    pub fn check(&self) -> Result<(), DefinitionError> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for (index, option) in self.options.iter().enumerate() {
            if option.short().is_none() && option.long().is_none() {
                return Err(DefinitionError::Unnamed { index });
            }

            for name in option.names() {
                if let Some(first) = seen.insert(name, index)
                    && first != index
                {
                    return Err(DefinitionError::DuplicateName {
                        name: name.to_string(),
                        first,
                        second: index,
                    });
                }
            }

            let attrs = option.attributes();
            match option.kind() {
                OptionKind::MultiValue => {
                    if !attrs.contains(Attributes::MULTI_VALUE)
                        && !attrs.contains(Attributes::SUB_MODULE)
                    {
                        return Err(DefinitionError::InertMultiValue {
                            name: option.display_name().to_string(),
                        });
                    }
                }
                OptionKind::Void | OptionKind::SingleValue => {
                    if attrs.contains(Attributes::SUB_MODULE) {
                        return Err(DefinitionError::MisplacedSubModule {
                            name: option.display_name().to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

impl<'a, C> IntoIterator for &'a Registry<C> {
    type Item = &'a Arc<CliOption<C>>;
    type IntoIter = std::slice::Iter<'a, Arc<CliOption<C>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_keeps_registration_order_and_returns_handle() {
        let mut registry: Registry<()> = Registry::new();
        let first = registry.add_void(Some("-a"), None, None, Attributes::OPTIONAL, |_| {});
        registry.add_single(Some("-b"), None, None, Attributes::NONE, |_, _| {});
        registry.add_multi(Some("-c"), None, None, Attributes::MULTI_VALUE, |_, _| {});

        let names: Vec<&str> = registry.iter().map(|o| o.display_name()).collect();
        assert_eq!(names, ["-a", "-b", "-c"]);
        assert!(Arc::ptr_eq(&first, registry.iter().next().unwrap()));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn add_does_not_deduplicate() {
        let mut registry: Registry<()> = Registry::new();
        registry.add_void(Some("-a"), None, None, Attributes::NONE, |_| {});
        registry.add_void(Some("-a"), None, None, Attributes::NONE, |_| {});
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn lookup_by_index_and_name() {
        let mut registry: Registry<()> = Registry::new();
        registry.add_void(Some("-v"), Some("--verbose"), None, Attributes::OPTIONAL, |_| {});
        let out = registry.add_single(Some("-o"), None, None, Attributes::NONE, |_, _| {});

        assert!(registry.get(1).is_some_and(|o| Arc::ptr_eq(o, &out)));
        assert!(registry.get(2).is_none());
        assert!(registry.is_registered_name("--verbose"));
        assert!(registry.is_registered_name("-o"));
        assert!(!registry.is_registered_name("--out"));

        let snapshot = registry.clone();
        registry.add_void(Some("-q"), None, None, Attributes::NONE, |_| {});
        assert_eq!(snapshot.len(), 2);
        assert!(!snapshot.is_registered_name("-q"));
    }

    #[test]
    fn check_accepts_well_formed_table() {
        let mut registry: Registry<()> = Registry::new();
        registry.add_void(Some("-v"), Some("--verbose"), None, Attributes::OPTIONAL, |_| {});
        registry.add_multi(Some("-s"), Some("--sub"), None, Attributes::SUB_MODULE, |_, _| {});
        registry.add_multi(Some("-m"), None, None, Attributes::MULTI_VALUE, |_, _| {});
        assert_eq!(registry.check(), Ok(()));
    }

    #[test]
    fn check_rejects_duplicate_names() {
        let mut registry: Registry<()> = Registry::new();
        registry.add_void(Some("-v"), Some("--verbose"), None, Attributes::NONE, |_| {});
        registry.add_single(Some("-x"), Some("--verbose"), None, Attributes::NONE, |_, _| {});
        let err = registry.check().unwrap_err();
        assert_eq!(
            err,
            DefinitionError::DuplicateName {
                name: "--verbose".to_string(),
                first: 0,
                second: 1,
            }
        );
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn check_rejects_inert_multi_value() {
        let mut registry: Registry<()> = Registry::new();
        registry.add_multi(Some("-m"), None, None, Attributes::OPTIONAL, |_, _| {});
        match registry.check() {
            Err(DefinitionError::InertMultiValue { name }) => assert_eq!(name, "-m"),
            other => panic!("expected InertMultiValue, got: {other:?}"),
        }
    }

    #[test]
    fn check_rejects_unnamed_and_misplaced_sub_module() {
        let mut registry: Registry<()> = Registry::new();
        registry.add_void(None, None, None, Attributes::NONE, |_| {});
        assert_eq!(registry.check(), Err(DefinitionError::Unnamed { index: 0 }));

        let mut registry: Registry<()> = Registry::new();
        registry.add_void(Some("-s"), None, None, Attributes::SUB_MODULE, |_| {});
        assert!(matches!(
            registry.check(),
            Err(DefinitionError::MisplacedSubModule { .. })
        ));
    }
}
