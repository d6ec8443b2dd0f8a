//! Session state
//!
//! Per-run state threaded through every command: the location listing
//! cursor and the Pokemon caught so far.

use std::collections::HashMap;

use crate::models::Pokemon;

/// Mutable state of one REPL session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// URL of the next location page, `None` past the last page
    pub next: Option<String>,
    /// URL of the previous location page, `None` on the first page
    pub previous: Option<String>,
    caught: HashMap<String, Pokemon>,
}

impl Session {
    /// Starts a session whose first `map` fetches `first_page_url`.
    pub fn new(first_page_url: impl Into<String>) -> Self {
        Self {
            next: Some(first_page_url.into()),
            previous: None,
            caught: HashMap::new(),
        }
    }

    /// Records a caught Pokemon under the name it was caught by, replacing an
    /// earlier catch of the same name.
    ///
    /// The key is what the user typed (a name or a numeric id), so `inspect`
    /// with the same word finds it.
    pub fn record_catch(&mut self, caught_as: impl Into<String>, pokemon: Pokemon) {
        self.caught.insert(caught_as.into(), pokemon);
    }

    pub fn caught(&self, name: &str) -> Option<&Pokemon> {
        self.caught.get(name)
    }

    /// Names accepted by `caught`, in alphabetical order.
    pub fn caught_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.caught.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
