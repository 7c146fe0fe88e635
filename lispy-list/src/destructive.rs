//! Destructive operations.
//!
//! These are the only functions that rewrite cells after construction. Every
//! list holding one of the rewritten cells sees the change. None of them
//! checks for cycles: a circular tail chain makes them loop forever.

use crate::heap::{CellId, Heap, List, Value};

impl<T> Heap<T> {
    /// Replaces the head of `cell`, returning the cell.
    pub fn rplaca(&mut self, cell: CellId, value: Value<T>) -> CellId {
        self.get_mut(cell).head = value;
        cell
    }

    /// Replaces the tail of `cell`, returning the cell.
    pub fn rplacd(&mut self, cell: CellId, value: Value<T>) -> CellId {
        self.get_mut(cell).tail = value;
        cell
    }

    /// Returns the last cell of the list starting at `list`.
    ///
    /// An atom in a tail slot ends the walk, so the last cell of `(1 2 . 3)`
    /// is the one holding `2`. Each link followed is counted in
    /// [`Stats::tail_walks`](crate::Stats::tail_walks).
    #[must_use]
    pub fn last(&self, list: CellId) -> CellId {
        let mut current = list;
        while let Value::Pair(next) = self.get(current).tail {
            self.count_tail_walk();
            current = next;
        }
        current
    }

    /// Concatenates `x` and `y` by pointing the last cell of `x` at `y`.
    ///
    /// No cell is copied: `x` itself is modified and returned, and `y`
    /// becomes part of it. If `x` ends in a dotted atom, the atom is
    /// overwritten.
    ///
    /// # Example
    /// ```
    /// use lispy_list::{Heap, Value};
    ///
    /// let mut heap = Heap::new();
    /// let x = heap.list_of([3, 4]);
    /// let y = heap.list_of([5, 6, 7]);
    /// let joined = heap.nconc(x, y);
    ///
    /// assert_eq!(joined, x);
    /// assert_eq!(heap.format(&Value::from(x)), "(3 4 5 6 7)");
    /// ```
    pub fn nconc(&mut self, x: List, y: List) -> List {
        match (x, y) {
            (None, _) => y,
            (Some(_), None) => x,
            (Some(first), Some(_)) => {
                let last = self.last(first);
                log::trace!("splicing cell {} onto cell {}", last.index(), first.index());
                self.get_mut(last).tail = Value::from(y);
                x
            }
        }
    }

    /// Reverses `list` in place by re-pointing every tail, returning the new
    /// first cell.
    ///
    /// A dotted atom at the end of the input is dropped.
    pub fn nreverse(&mut self, list: List) -> List {
        let mut reversed: List = None;
        let mut rest = list;
        let mut count = 0usize;
        while let Some(id) = rest {
            rest = self.get(id).tail.as_list_or_nil();
            self.get_mut(id).tail = Value::from(reversed);
            reversed = Some(id);
            count += 1;
        }
        log::trace!("reversed {count} cells in place");
        reversed
    }
}
