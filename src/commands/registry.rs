//! Command registry
//!
//! Table of the commands the REPL understands. Built once at startup and
//! passed by reference; nothing here is global.

use std::collections::HashMap;

/// What a command does when dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Exit,
    Help,
    Map,
    Mapb,
    Pokedex,
    Explore,
    Catch,
    Inspect,
}

/// A registered command.
#[derive(Debug, Clone, Copy)]
pub struct Command {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: CommandKind,
    /// Whether the command needs one positional argument
    pub takes_argument: bool,
}

/// Lookup table of commands by name.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    commands: HashMap<&'static str, Command>,
}

impl CommandRegistry {
    /// Creates a registry holding every built-in command.
    pub fn new() -> Self {
        let builtins = [
            ("exit", "Exit the Pokedex", CommandKind::Exit, false),
            ("help", "Displays a help message", CommandKind::Help, false),
            (
                "map",
                "Display the next page of locations in the Pokemon world",
                CommandKind::Map,
                false,
            ),
            (
                "mapb",
                "Display the previous page of locations in the Pokemon world",
                CommandKind::Mapb,
                false,
            ),
            (
                "pokedex",
                "Display the Pokemon you have caught in your Pokedex",
                CommandKind::Pokedex,
                false,
            ),
            (
                "explore",
                "Explore a given location in the Pokemon world",
                CommandKind::Explore,
                true,
            ),
            (
                "catch",
                "Attempt to catch a Pokemon and add it to your Pokedex",
                CommandKind::Catch,
                true,
            ),
            (
                "inspect",
                "Inspect any Pokemon in your Pokedex",
                CommandKind::Inspect,
                true,
            ),
        ];

        let commands = builtins
            .into_iter()
            .map(|(name, description, kind, takes_argument)| {
                (
                    name,
                    Command {
                        name,
                        description,
                        kind,
                        takes_argument,
                    },
                )
            })
            .collect();

        Self { commands }
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// All commands sorted by name.
    pub fn commands(&self) -> Vec<&Command> {
        let mut commands: Vec<&Command> = self.commands.values().collect();
        commands.sort_by_key(|command| command.name);
        commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_builtins() {
        let registry = CommandRegistry::new();

        assert_eq!(registry.len(), 8);
        assert_eq!(registry.get("mapb").unwrap().kind, CommandKind::Mapb);
        assert!(registry.get("catch").unwrap().takes_argument);
        assert!(!registry.get("help").unwrap().takes_argument);
        assert!(registry.get("fly").is_none());
    }

    #[test]
    fn test_commands_sorted_by_name() {
        let registry = CommandRegistry::new();
        let names: Vec<&str> = registry.commands().iter().map(|c| c.name).collect();

        assert_eq!(
            names,
            vec!["catch", "exit", "explore", "help", "inspect", "map", "mapb", "pokedex"]
        );
    }
}
