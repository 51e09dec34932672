use std::borrow::Cow;

/// Alias name to replacement text, listed in insertion order.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: Vec<(Box<str>, Box<str>)>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an alias, overwriting any previous value in place.
    pub fn add(&mut self, name: &str, command: &str) {
        match self.position(name) {
            Some(idx) => self.entries[idx].1 = command.into(),
            None => self.entries.push((name.into(), command.into())),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.position(name)
            .map(|idx| self.entries.remove(idx).1.into_string())
    }

    pub fn get<'a>(&'a self, name: &str) -> Option<Cow<'a, str>> {
        self.position(name)
            .map(|idx| Cow::Borrowed(&*self.entries[idx].1))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (&**k, &**v))
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(k, _)| k.to_string()).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| &**k == name)
    }
}
