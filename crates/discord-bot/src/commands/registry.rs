//! Command registry.

use super::{fun, general, utility, Category, CommandHandler};
use crate::error::RegistryError;
use std::collections::HashMap;
use std::sync::Arc;

/// Flat, case-insensitive command namespace.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in command.
    pub fn builtin() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for handler in general::handlers()
            .into_iter()
            .chain(utility::handlers())
            .chain(fun::handlers())
        {
            registry.register(handler)?;
        }
        Ok(registry)
    }

    /// Register a command. Names are unique across all categories.
    pub fn register(&mut self, handler: Arc<dyn CommandHandler>) -> Result<(), RegistryError> {
        let name = handler.name().to_lowercase();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(RegistryError::InvalidName(name));
        }
        if self.commands.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }
        self.commands.insert(name, handler);
        Ok(())
    }

    /// Find a command by name, ignoring case.
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn CommandHandler>> {
        self.commands.get(&name.to_lowercase()).cloned()
    }

    /// All registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Commands in a category, sorted by name.
    pub fn by_category(&self, category: Category) -> Vec<Arc<dyn CommandHandler>> {
        let mut handlers: Vec<_> = self
            .commands
            .values()
            .filter(|h| h.category() == category)
            .cloned()
            .collect();
        handlers.sort_by_key(|h| h.name().to_lowercase());
        handlers
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandContext;
    use crate::error::AppResult;
    use async_trait::async_trait;

    struct MockCommand {
        name: String,
        category: Category,
    }

    #[async_trait]
    impl CommandHandler for MockCommand {
        fn name(&self) -> &str {
            &self.name
        }

        fn category(&self) -> Category {
            self.category
        }

        fn description(&self) -> &str {
            "Mock command"
        }

        async fn execute(&self, _ctx: &CommandContext, _args: &[String]) -> AppResult<()> {
            Ok(())
        }
    }

    fn mock(name: &str, category: Category) -> Arc<dyn CommandHandler> {
        Arc::new(MockCommand {
            name: name.into(),
            category,
        })
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = CommandRegistry::new();
        let handler = mock("ping", Category::General);
        registry.register(handler.clone()).unwrap();

        let found = registry.lookup("ping").unwrap();
        assert!(Arc::ptr_eq(&found, &handler));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut registry = CommandRegistry::new();
        let handler = mock("Ping", Category::General);
        registry.register(handler.clone()).unwrap();

        assert!(Arc::ptr_eq(&registry.lookup("ping").unwrap(), &handler));
        assert!(Arc::ptr_eq(&registry.lookup("PING").unwrap(), &handler));
        assert_eq!(registry.names(), vec!["ping"]);
    }

    #[test]
    fn test_lookup_missing() {
        let registry = CommandRegistry::new();
        assert!(registry.lookup("ping").is_none());
        assert!(registry.lookup("").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_duplicate_across_categories_rejected() {
        let mut registry = CommandRegistry::new();
        let first = mock("roll", Category::Fun);
        registry.register(first.clone()).unwrap();

        let err = registry.register(mock("ROLL", Category::Utility)).unwrap_err();
        assert_eq!(err, RegistryError::Duplicate("roll".into()));

        // First registration wins
        assert!(Arc::ptr_eq(&registry.lookup("roll").unwrap(), &first));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_invalid_names_rejected() {
        let mut registry = CommandRegistry::new();
        assert!(matches!(
            registry.register(mock("", Category::Fun)),
            Err(RegistryError::InvalidName(_))
        ));
        assert!(matches!(
            registry.register(mock("two words", Category::Fun)),
            Err(RegistryError::InvalidName(_))
        ));
    }

    #[test]
    fn test_by_category_sorted() {
        let mut registry = CommandRegistry::new();
        registry.register(mock("zeta", Category::Fun)).unwrap();
        registry.register(mock("alpha", Category::Fun)).unwrap();
        registry.register(mock("help", Category::General)).unwrap();

        let fun: Vec<String> = registry
            .by_category(Category::Fun)
            .iter()
            .map(|h| h.name().to_string())
            .collect();
        assert_eq!(fun, vec!["alpha", "zeta"]);
        assert!(registry.by_category(Category::Utility).is_empty());
    }

    #[test]
    fn test_builtin_commands() {
        let registry = CommandRegistry::builtin().unwrap();
        assert_eq!(
            registry.names(),
            vec!["channels", "coinflip", "echo", "help", "ping", "roll", "userinfo"]
        );
    }
}
