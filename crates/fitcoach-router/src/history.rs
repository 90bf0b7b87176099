//! Hash-fragment style navigation history.
//!
//! Locations are kept normalized: leading `/`, no query string, no empty
//! segments and no trailing slash except for the root.

/// Normalizes a location or fragment (`#/plan/?tab=1` becomes `/plan`).
pub fn normalize(location: &str) -> String {
    let location = location.trim();
    let location = location.strip_prefix('#').unwrap_or(location);
    let location = location
        .split(['?', '#'])
        .next()
        .unwrap_or_default();

    let segments: Vec<&str> = location.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return "/".to_string();
    }
    format!("/{}", segments.join("/"))
}

/// Back/forward stack of normalized locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
    index: usize,
}

impl History {
    /// Starts with a single entry.
    pub fn new(initial: &str) -> Self {
        Self {
            entries: vec![normalize(initial)],
            index: 0,
        }
    }

    /// Starts from a URL fragment such as `#/forum`.
    pub fn from_fragment(fragment: &str) -> Self {
        Self::new(fragment)
    }

    pub fn current(&self) -> &str {
        &self.entries[self.index]
    }

    /// The current location as a fragment, e.g. `#/forum`.
    pub fn fragment(&self) -> String {
        format!("#{}", self.current())
    }

    /// Adds an entry and drops anything ahead of the cursor.
    ///
    /// Pushing the current location again is a no-op.
    pub fn push(&mut self, location: &str) {
        let location = normalize(location);
        if location == self.current() {
            return;
        }
        self.entries.truncate(self.index + 1);
        self.entries.push(location);
        self.index += 1;
    }

    /// Overwrites the current entry.
    pub fn replace(&mut self, location: &str) {
        self.entries[self.index] = normalize(location);
    }

    /// Moves back one entry. Returns `false` at the start.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Moves forward one entry. Returns `false` at the end.
    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new("/")
    }
}
