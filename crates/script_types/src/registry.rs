// Command Registry - Stores command definitions by name
//
// The registry holds all commands the editor can place in a script. The
// engine only ever reads it through the CommandSchema trait.

use std::collections::HashMap;

use crate::command::{CommandDef, CommandSchema, FieldDef};

/// Registry of all available commands
pub struct CommandRegistry {
    commands: HashMap<String, CommandDef>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Register a command definition
    pub fn register(&mut self, definition: CommandDef) {
        self.commands.insert(definition.id.clone(), definition);
    }

    /// Get a command definition by name
    pub fn get(&self, command: &str) -> Option<&CommandDef> {
        self.commands.get(command)
    }

    /// Check if a command is registered
    pub fn contains(&self, command: &str) -> bool {
        self.commands.contains_key(command)
    }

    /// Get all registered command names
    pub fn command_ids(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(|s| s.as_str())
    }

    /// Get command count
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl CommandSchema for CommandRegistry {
    fn fields(&self, command: &str) -> Option<&[FieldDef]> {
        self.commands.get(command).map(|def| def.fields.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::FieldKind;

    #[test]
    fn test_empty_registry() {
        let registry = CommandRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.get("TEXT").is_none());
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = CommandRegistry::new();
        registry.register(
            CommandDef::new("TEXT", "Display Text").with_fields(vec![FieldDef::text("text")]),
        );

        assert!(registry.contains("TEXT"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("TEXT").unwrap().name, "Display Text");
    }

    #[test]
    fn test_schema_adapter() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandDef::new("LOOP", "Loop").with_fields(vec![
            FieldDef::branch("true"),
        ]));

        let fields = registry.fields("LOOP").unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].kind, FieldKind::Branch);
        assert!(registry.fields("UNKNOWN").is_none());
    }
}
