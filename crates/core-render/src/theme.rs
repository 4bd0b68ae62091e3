//! Theme variable store.
//!
//! The engine pushes `themed` updates as ordered `(name, value)` pairs (CSS
//! custom properties in the original host). The widget only retains them for
//! the embedding layer; order is preserved so hosts can apply them as given.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeVars {
    vars: Vec<(String, String)>,
}

impl ThemeVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, updates: Vec<(String, String)>) {
        for (name, value) in updates {
            match self.vars.iter_mut().find(|(n, _)| *n == name) {
                Some(entry) => entry.1 = value,
                None => self.vars.push((name, value)),
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}
