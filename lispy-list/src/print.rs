//! Structural printer.
//!
//! Lists print as `(e1 e2 ... en)` with nested lists in their own
//! parentheses. Atoms print through their `Debug` form, so strings come out
//! quoted and numbers bare. Once `max_elements` atoms have been written,
//! each list still open prints `...` in place of the rest.

use crate::heap::{CellId, Heap, Value};
use std::fmt;

/// Atoms printed before the output is cut short.
pub const DEFAULT_MAX_ELEMENTS: usize = 45;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintOptions {
    pub max_elements: usize,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            max_elements: DEFAULT_MAX_ELEMENTS,
        }
    }
}

impl PrintOptions {
    #[must_use]
    pub fn with_max_elements(mut self, max_elements: usize) -> Self {
        self.max_elements = max_elements;
        self
    }
}

/// A value paired with its heap, ready for `{}` formatting.
pub struct Printed<'a, T> {
    heap: &'a Heap<T>,
    value: &'a Value<T>,
    options: PrintOptions,
}

impl<T: fmt::Debug> fmt::Display for Printed<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut printed = 0;
        match self.value {
            Value::Nil => f.write_str("()"),
            Value::Atom(atom) => write!(f, "{atom:?}"),
            Value::Pair(id) => self.write_list(f, *id, &mut printed),
        }
    }
}

impl<T: fmt::Debug> Printed<'_, T> {
    fn write_list(&self, f: &mut fmt::Formatter<'_>, id: CellId, printed: &mut usize) -> fmt::Result {
        f.write_str("(")?;
        let mut current = id;
        loop {
            if *printed >= self.options.max_elements {
                f.write_str("...")?;
                break;
            }
            let cell = self.heap.get(current);
            match &cell.head {
                Value::Nil => f.write_str("()")?,
                Value::Atom(atom) => {
                    write!(f, "{atom:?}")?;
                    *printed += 1;
                }
                Value::Pair(inner) => self.write_list(f, *inner, printed)?,
            }
            match &cell.tail {
                Value::Nil => break,
                Value::Atom(atom) => {
                    write!(f, " . {atom:?}")?;
                    break;
                }
                Value::Pair(next) => {
                    f.write_str(" ")?;
                    current = *next;
                }
            }
        }
        f.write_str(")")
    }
}

impl<T> Heap<T> {
    /// Displays `value` with the default element cap.
    #[must_use]
    pub fn display<'a>(&'a self, value: &'a Value<T>) -> Printed<'a, T> {
        self.display_with(value, PrintOptions::default())
    }

    #[must_use]
    pub fn display_with<'a>(&'a self, value: &'a Value<T>, options: PrintOptions) -> Printed<'a, T> {
        Printed {
            heap: self,
            value,
            options,
        }
    }

    /// Renders `value` with the default element cap.
    #[must_use]
    pub fn format(&self, value: &Value<T>) -> String
    where
        T: fmt::Debug,
    {
        self.display(value).to_string()
    }
}
