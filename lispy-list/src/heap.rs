//! # Cell Heap
//!
//! Every cons cell lives in a [`Heap`], an append-only arena addressed by
//! [`CellId`] handles. A handle is just an index, so any number of lists can
//! hold the same cell at once, and a mutation made through one handle is seen
//! through every other. This is what makes structure sharing (and the
//! destructive operations built on it) work without `Rc<RefCell<T>>`.
//!
//! ## Lifetime
//!
//! Cells are never freed individually. They become garbage once no list
//! references them and are reclaimed all at once when the heap is dropped.
//!
//! ## Thread Safety
//!
//! A heap is meant to be used from one thread. The work counters use
//! [`std::cell::Cell`], so `Heap<T>` is not `Sync`; callers that want to share
//! a structure across threads must wrap the heap in their own lock.
//!
//! ## Example
//!
//! ```
//! use lispy_list::{Heap, Value};
//!
//! let mut heap: Heap<i64> = Heap::new();
//! let tail = heap.cons(Value::Atom(2), Value::Nil);
//! let list = heap.cons(Value::Atom(1), Value::Pair(tail));
//!
//! assert_eq!(heap.get(list).head, Value::Atom(1));
//! assert_eq!(heap.get(list).tail, Value::Pair(tail));
//! ```

use crate::error::{Error, Result, Shape};
use std::cell::Cell;

/// A handle to a cell in a [`Heap`].
///
/// Two handles are equal when they name the same cell; this is identity,
/// not structural equality (see [`Heap::equal`] for the latter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId {
    index: usize,
}

impl CellId {
    /// Returns the raw slot index of this cell.
    #[must_use]
    pub fn index(self) -> usize {
        self.index
    }
}

/// A list is either empty (`None`) or the handle of its first cell.
pub type List = Option<CellId>;

/// The contents of a head or tail slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<T> {
    /// The empty list.
    Nil,
    /// An opaque payload.
    Atom(T),
    /// A reference to a cell, i.e. a non-empty list.
    Pair(CellId),
}

impl<T> Value<T> {
    /// Names what kind of value this is, for error reports.
    ///
    /// # Example
    /// ```
    /// use lispy_list::{Shape, Value};
    ///
    /// assert_eq!(Value::<i64>::Nil.shape(), Shape::Empty);
    /// assert_eq!(Value::Atom(1).shape(), Shape::Atom);
    /// ```
    #[must_use]
    pub fn shape(&self) -> Shape {
        match self {
            Value::Nil => Shape::Empty,
            Value::Atom(_) => Shape::Atom,
            Value::Pair(_) => Shape::List,
        }
    }

    /// True for the empty list.
    #[must_use]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// True for an atom. The empty list is not an atom.
    #[must_use]
    pub fn is_atom(&self) -> bool {
        matches!(self, Value::Atom(_))
    }

    /// Returns the payload of an atom, or `None` for a list.
    ///
    /// # Example
    /// ```
    /// use lispy_list::Value;
    ///
    /// assert_eq!(Value::Atom("a").as_atom(), Some(&"a"));
    /// assert_eq!(Value::<&str>::Nil.as_atom(), None);
    /// ```
    #[must_use]
    pub fn as_atom(&self) -> Option<&T> {
        match self {
            Value::Atom(atom) => Some(atom),
            _ => None,
        }
    }

    /// Views this value as a list, failing if it is an atom.
    pub fn to_list(&self) -> Result<List> {
        match self {
            Value::Nil => Ok(None),
            Value::Pair(id) => Ok(Some(*id)),
            Value::Atom(_) => Err(Error::expected_list(Shape::Atom)),
        }
    }

    /// Like [`Value::to_list`], but an atom ends the list instead of failing.
    ///
    /// This is how a dotted tail is read by the walks that tolerate it.
    #[must_use]
    pub fn as_list_or_nil(&self) -> List {
        match self {
            Value::Pair(id) => Some(*id),
            _ => None,
        }
    }
}

impl<T> From<List> for Value<T> {
    fn from(list: List) -> Self {
        match list {
            None => Value::Nil,
            Some(id) => Value::Pair(id),
        }
    }
}

impl<T> From<CellId> for Value<T> {
    fn from(id: CellId) -> Self {
        Value::Pair(id)
    }
}

/// A cons cell: a head and a tail slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Cons<T> {
    pub head: Value<T>,
    pub tail: Value<T>,
}

/// Work done on a heap since it was created or last reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Cells created by `cons`.
    pub allocations: usize,
    /// Tail links followed while searching for the last cell of a list.
    pub tail_walks: usize,
}

impl Stats {
    /// Total work: allocations plus tail walks.
    #[must_use]
    pub fn work(&self) -> usize {
        self.allocations + self.tail_walks
    }
}

/// The arena that owns every cell.
#[derive(Debug)]
pub struct Heap<T> {
    cells: Vec<Cons<T>>,
    allocations: usize,
    tail_walks: Cell<usize>,
}

impl<T> Default for Heap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Heap<T> {
    /// Creates an empty heap.
    ///
    /// # Example
    /// ```
    /// use lispy_list::Heap;
    ///
    /// let heap: Heap<i64> = Heap::new();
    /// assert!(heap.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty heap with room for `capacity` cells before it
    /// reallocates.
    ///
    /// # Example
    /// ```
    /// use lispy_list::Heap;
    ///
    /// let mut heap = Heap::with_capacity(3);
    /// heap.list_of([1, 2, 3]);
    /// assert_eq!(heap.len(), 3);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
            allocations: 0,
            tail_walks: Cell::new(0),
        }
    }

    pub(crate) fn alloc(&mut self, cell: Cons<T>) -> CellId {
        let index = self.cells.len();
        self.cells.push(cell);
        self.allocations += 1;
        CellId { index }
    }

    /// Returns the cell behind a handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle was issued by a different heap.
    #[must_use]
    pub fn get(&self, id: CellId) -> &Cons<T> {
        &self.cells[id.index]
    }

    /// Returns the cell behind a handle for in-place mutation.
    ///
    /// # Panics
    ///
    /// Panics if the handle was issued by a different heap.
    #[must_use]
    pub fn get_mut(&mut self, id: CellId) -> &mut Cons<T> {
        &mut self.cells[id.index]
    }

    /// Returns the cell behind a handle, or `None` if this heap never
    /// issued it.
    ///
    /// # Example
    /// ```
    /// use lispy_list::{Heap, Value};
    ///
    /// let mut small = Heap::new();
    /// let mut large = Heap::new();
    /// large.list_of([1, 2, 3]);
    /// let id = large.cons(Value::Atom(4), Value::Nil);
    ///
    /// assert!(large.try_get(id).is_some());
    /// small.cons(Value::Atom(0), Value::Nil);
    /// assert!(small.try_get(id).is_none());
    /// ```
    #[must_use]
    pub fn try_get(&self, id: CellId) -> Option<&Cons<T>> {
        self.cells.get(id.index)
    }

    /// Number of cells ever allocated in this heap.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True if no cell has been allocated yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the work counters accumulated since the heap was created or
    /// [`Heap::reset_stats`] was last called.
    ///
    /// # Example
    /// ```
    /// use lispy_list::Heap;
    ///
    /// let mut heap = Heap::new();
    /// let list = heap.list_of([1, 2, 3]);
    /// let _ = heap.last(list.unwrap());
    ///
    /// let stats = heap.stats();
    /// assert_eq!(stats.allocations, 3);
    /// assert_eq!(stats.tail_walks, 2);
    /// ```
    #[must_use]
    pub fn stats(&self) -> Stats {
        Stats {
            allocations: self.allocations,
            tail_walks: self.tail_walks.get(),
        }
    }

    /// Zeroes the work counters. Cells already allocated are kept.
    pub fn reset_stats(&mut self) {
        self.allocations = 0;
        self.tail_walks.set(0);
    }

    pub(crate) fn count_tail_walk(&self) {
        self.tail_walks.set(self.tail_walks.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_and_get() {
        let mut heap: Heap<i64> = Heap::new();
        let a = heap.alloc(Cons {
            head: Value::Atom(10),
            tail: Value::Nil,
        });
        let b = heap.alloc(Cons {
            head: Value::Atom(20),
            tail: Value::Pair(a),
        });

        assert_eq!(heap.get(a).head, Value::Atom(10));
        assert_eq!(heap.get(b).tail, Value::Pair(a));
        assert_eq!(heap.len(), 2);
        assert_eq!(heap.stats().allocations, 2);
    }

    #[test]
    fn test_mutation_is_seen_through_every_handle() {
        let mut heap: Heap<&str> = Heap::new();
        let cell = heap.alloc(Cons {
            head: Value::Atom("hello"),
            tail: Value::Nil,
        });
        let alias = cell;

        heap.get_mut(cell).head = Value::Atom("world");
        assert_eq!(heap.get(alias).head, Value::Atom("world"));
    }

    #[test]
    fn test_value_shapes() {
        let atom: Value<i64> = Value::Atom(1);
        assert_eq!(atom.shape(), Shape::Atom);
        assert_eq!(
            atom.to_list(),
            Err(Error::TypeMismatch {
                expected: Shape::List,
                found: Shape::Atom
            })
        );
        assert_eq!(atom.as_list_or_nil(), None);

        let nil: Value<i64> = Value::from(None);
        assert!(nil.is_nil());
        assert_eq!(nil.to_list(), Ok(None));
    }

    #[test]
    fn test_try_get_from_foreign_handle() {
        let mut big: Heap<i64> = Heap::new();
        big.alloc(Cons {
            head: Value::Nil,
            tail: Value::Nil,
        });
        let foreign = big.alloc(Cons {
            head: Value::Nil,
            tail: Value::Nil,
        });

        let small: Heap<i64> = Heap::new();
        assert!(small.try_get(foreign).is_none());
    }

    #[test]
    fn test_reset_stats() {
        let mut heap: Heap<i64> = Heap::new();
        heap.alloc(Cons {
            head: Value::Atom(1),
            tail: Value::Nil,
        });
        heap.count_tail_walk();
        assert_eq!(
            heap.stats(),
            Stats {
                allocations: 1,
                tail_walks: 1
            }
        );

        heap.reset_stats();
        assert_eq!(heap.stats(), Stats::default());
        assert_eq!(heap.len(), 1);
    }
}
