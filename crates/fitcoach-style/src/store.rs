//! The style-variable namespace consulted by every visual component.
//!
//! ## Sharing
//!
//! `StyleStore` is a handle: clones share one namespace. It is built on
//! `Rc<RefCell<..>>`, so it is `!Send` and cannot leave the UI thread.
//! Writers are last-write-wins.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::{self, Write};
use std::rc::Rc;

#[derive(Debug, Default)]
struct Vars {
    values: BTreeMap<String, String>,
    revision: u64,
}

/// Shared `name -> value` map of style variables (`--color-bg`, ...).
#[derive(Clone, Default)]
pub struct StyleStore {
    vars: Rc<RefCell<Vars>>,
}

impl StyleStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a variable. The revision only advances when the value changes.
    pub fn set_property(&self, name: &str, value: &str) {
        let mut vars = self.vars.borrow_mut();
        if vars.values.get(name).map(String::as_str) == Some(value) {
            return;
        }
        vars.values.insert(name.to_string(), value.to_string());
        vars.revision += 1;
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.vars.borrow().values.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.borrow().values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.borrow().values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Counter bumped on every effective change.
    pub fn revision(&self) -> u64 {
        self.vars.borrow().revision
    }

    /// Copy of the current namespace.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.vars.borrow().values.clone()
    }

    /// Renders the namespace as a `:root` CSS block.
    pub fn to_css(&self) -> String {
        let vars = self.vars.borrow();
        let mut css = String::from(":root {\n");
        for (name, value) in &vars.values {
            // Writing to a String cannot fail.
            let _ = writeln!(css, "  {name}: {value};");
        }
        css.push('}');
        css
    }
}

impl fmt::Debug for StyleStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vars = self.vars.borrow();
        f.debug_struct("StyleStore")
            .field("len", &vars.values.len())
            .field("revision", &vars.revision)
            .finish()
    }
}
