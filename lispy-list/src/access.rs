//! Accessors.
//!
//! Two families read a cell's slots:
//!
//! - [`Heap::car`] / [`Heap::cdr`] assert that the slot holds a list and fail
//!   with [`Error::TypeMismatch`] otherwise. They are what nested walks use.
//! - [`Heap::head`] / [`Heap::tail`] return the raw [`Value`] whatever it is.
//!
//! Both treat the empty list as its own head and tail.
//!
//! Nested compositions (`cadr`, `cddar`, ...) are all driven by [`Heap::cxr`].

use crate::error::{Error, Result};
use crate::heap::{Heap, List, Value};

impl<T> Heap<T> {
    /// Returns the head of `list` as a list.
    pub fn car(&self, list: List) -> Result<List> {
        match list {
            None => Ok(None),
            Some(id) => self.get(id).head.to_list(),
        }
    }

    /// Returns the tail of `list` as a list.
    pub fn cdr(&self, list: List) -> Result<List> {
        match list {
            None => Ok(None),
            Some(id) => self.get(id).tail.to_list(),
        }
    }
}

impl<T: Clone> Heap<T> {
    /// Returns whatever the head slot of `list` holds, atom or list.
    ///
    /// Unlike [`Heap::car`] this never fails; the head of the empty list is
    /// the empty list.
    ///
    /// # Example
    /// ```
    /// use lispy_list::{Heap, Value};
    ///
    /// let mut heap = Heap::new();
    /// let list = heap.list_of([1, 2]);
    /// assert_eq!(heap.head(list), Value::Atom(1));
    /// assert!(heap.car(list).is_err());
    /// assert_eq!(heap.head(None), Value::Nil);
    /// ```
    #[must_use]
    pub fn head(&self, list: List) -> Value<T> {
        match list {
            None => Value::Nil,
            Some(id) => self.get(id).head.clone(),
        }
    }

    /// Returns whatever the tail slot of `list` holds, including the atom of
    /// a dotted pair.
    ///
    /// # Example
    /// ```
    /// use lispy_list::{Heap, Value};
    ///
    /// let mut heap = Heap::new();
    /// let pair = heap.cons(Value::Atom(1), Value::Atom(2));
    /// assert_eq!(heap.tail(Some(pair)), Value::Atom(2));
    /// assert!(heap.cdr(Some(pair)).is_err());
    /// ```
    #[must_use]
    pub fn tail(&self, list: List) -> Value<T> {
        match list {
            None => Value::Nil,
            Some(id) => self.get(id).tail.clone(),
        }
    }

    /// Applies the accessor named by `path`, as in `c<path>r`.
    ///
    /// The path is read right to left: `'a'` takes the head, `'d'` the tail.
    /// Every step but the last must land on a list; the last step returns
    /// whatever the slot holds. An empty path returns `list` itself.
    ///
    /// # Example
    /// ```
    /// use lispy_list::{Heap, Value};
    ///
    /// let mut heap = Heap::new();
    /// let list = heap.list_of([1, 2, 3]);
    /// assert_eq!(heap.cxr("ad", list), Ok(Value::Atom(2)));
    /// assert_eq!(heap.cxr("add", list), Ok(Value::Atom(3)));
    /// assert!(heap.cxr("ab", list).is_err());
    /// ```
    pub fn cxr(&self, path: &str, list: List) -> Result<Value<T>> {
        if let Some((position, found)) = path
            .chars()
            .enumerate()
            .find(|(_, c)| !matches!(c, 'a' | 'd'))
        {
            return Err(Error::InvalidFormat {
                path: path.to_string(),
                found,
                position,
            });
        }

        let mut steps = path.chars();
        let Some(outermost) = steps.next() else {
            return Ok(Value::from(list));
        };

        let mut current = list;
        for step in steps.rev() {
            current = if step == 'a' {
                self.car(current)?
            } else {
                self.cdr(current)?
            };
        }

        Ok(if outermost == 'a' {
            self.head(current)
        } else {
            self.tail(current)
        })
    }
}

macro_rules! cxr_aliases {
    ($($name:ident => $path:literal),* $(,)?) => {
        impl<T: Clone> Heap<T> {
            $(
                #[doc = concat!("Shorthand for `cxr(\"", $path, "\", list)`.")]
                pub fn $name(&self, list: List) -> Result<Value<T>> {
                    self.cxr($path, list)
                }
            )*
        }
    };
}

cxr_aliases! {
    caar => "aa", cadr => "ad", cdar => "da", cddr => "dd",

    caaar => "aaa", caadr => "aad", cadar => "ada", caddr => "add",
    cdaar => "daa", cdadr => "dad", cddar => "dda", cdddr => "ddd",

    caaaar => "aaaa", caaadr => "aaad", caadar => "aada", caaddr => "aadd",
    cadaar => "adaa", cadadr => "adad", caddar => "adda", cadddr => "addd",
    cdaaar => "daaa", cdaadr => "daad", cdadar => "dada", cdaddr => "dadd",
    cddaar => "ddaa", cddadr => "ddad", cdddar => "ddda", cddddr => "dddd",
}
