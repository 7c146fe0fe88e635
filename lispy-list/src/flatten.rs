//! # Flattening
//!
//! Three ways to turn a nested list into a flat list of its atoms, read
//! depth first and left to right. They agree on the output and differ in
//! cost and in what they do to their input:
//!
//! | | cost | input |
//! |---|---|---|
//! | [`Heap::flatten_acc`] | one `cons` per atom | untouched, output is fresh |
//! | [`Heap::flatten_splice`] | quadratic on left-deep input | consumed, output reuses its unshared cells |
//! | [`Heap::flatten_traverse`] | quadratic in the atom count | untouched, output is fresh |
//!
//! [`Heap::flatten_acc_iter`] is the accumulator algorithm on an explicit
//! stack, for structures too deep for the call stack.
//!
//! Empty sublists contribute nothing. An atom in a tail slot (a dotted pair)
//! is taken as one more element.

use crate::heap::{CellId, Cons, Heap, List, Value};

impl<T: Clone> Heap<T> {
    /// Flattens `tree` by prepending onto an accumulator.
    ///
    /// The tail is flattened before the head, so even though the result is
    /// built back to front the atoms come out in order. Allocates exactly one
    /// cell per atom and never writes to the input.
    ///
    /// # Example
    /// ```
    /// use lispy_list::{Heap, Value};
    ///
    /// let mut heap = Heap::new();
    /// let inner = heap.list_of([2, 3]);
    /// let tree = heap.make_list([Value::Atom(1), Value::from(inner), Value::Atom(4)]);
    ///
    /// let flat = heap.flatten_acc(tree);
    /// assert_eq!(heap.format(&Value::from(flat)), "(1 2 3 4)");
    /// assert_eq!(heap.format(&Value::from(tree)), "(1 (2 3) 4)");
    /// ```
    pub fn flatten_acc(&mut self, tree: List) -> List {
        let before = self.stats();
        let flat = self.flatten_onto(Value::from(tree), None);
        log::debug!(
            "flatten_acc: {} cells allocated",
            self.stats().allocations - before.allocations
        );
        flat
    }

    fn flatten_onto(&mut self, x: Value<T>, acc: List) -> List {
        match x {
            Value::Nil => acc,
            Value::Atom(atom) => Some(self.cons(Value::Atom(atom), Value::from(acc))),
            Value::Pair(id) => {
                let Cons { head, tail } = self.get(id).clone();
                let acc = self.flatten_onto(tail, acc);
                self.flatten_onto(head, acc)
            }
        }
    }

    /// [`Heap::flatten_acc`] without recursion.
    ///
    /// Produces the same cells in the same order, using a heap-allocated
    /// stack in place of the call stack.
    pub fn flatten_acc_iter(&mut self, tree: List) -> List {
        let mut stack = vec![Value::from(tree)];
        let mut acc: List = None;
        while let Some(x) = stack.pop() {
            match x {
                Value::Nil => {}
                Value::Atom(atom) => acc = Some(self.cons(Value::Atom(atom), Value::from(acc))),
                Value::Pair(id) => {
                    let Cons { head, tail } = self.get(id).clone();
                    stack.push(head);
                    stack.push(tail);
                }
            }
        }
        acc
    }

    /// Flattens `tree` by splicing flattened pieces together with
    /// [`Heap::nconc`].
    ///
    /// This is destructive. A run of cells whose heads are all atoms is
    /// returned as-is instead of being copied, and already-flat sublists are
    /// spliced in place, so the result shares cells with `tree` and `tree`
    /// must be considered consumed: writing to the result (or flattening
    /// again) can change what `tree` looks like.
    ///
    /// Only cells reached once from `tree` are reused. A sublist that appears
    /// more than once, as in `(x x)`, is copied at every occurrence and left
    /// as it was, so the result never loops back on itself.
    ///
    /// Each splice walks to the end of its left operand, so a left-deep input
    /// such as `((((1) 2) 3) 4)` costs time quadratic in its size.
    ///
    /// # Example
    /// ```
    /// use lispy_list::{Heap, Value};
    ///
    /// let mut heap = Heap::new();
    /// let x = heap.list_of([1, 2]);
    /// let tree = heap.make_list([Value::from(x), Value::from(x)]);
    ///
    /// let flat = heap.flatten_splice(tree);
    /// assert_eq!(heap.format(&Value::from(flat)), "(1 2 1 2)");
    /// assert_eq!(heap.format(&Value::from(x)), "(1 2)");
    /// ```
    pub fn flatten_splice(&mut self, tree: List) -> List {
        let before = self.stats();
        let shared = self.shared_cells(tree);
        let flat = self.splice_flat(tree, &shared);
        let after = self.stats();
        log::debug!(
            "flatten_splice: {} cells allocated, {} tail links walked",
            after.allocations - before.allocations,
            after.tail_walks - before.tail_walks
        );
        flat
    }

    // Marks every cell reachable from `tree` along more than one path. A cell
    // is expanded at most twice: once when first seen and once when it turns
    // out to be shared, which marks everything below it as shared too.
    fn shared_cells(&self, tree: List) -> Vec<bool> {
        let mut visits = vec![0u8; self.len()];
        let mut stack: Vec<CellId> = tree.into_iter().collect();
        while let Some(id) = stack.pop() {
            let seen = visits[id.index()];
            if seen >= 2 {
                continue;
            }
            visits[id.index()] = seen + 1;
            let cell = self.get(id);
            for next in [&cell.head, &cell.tail] {
                if let Value::Pair(next) = next {
                    stack.push(*next);
                }
            }
        }
        visits.into_iter().map(|seen| seen >= 2).collect()
    }

    fn splice_flat(&mut self, list: List, shared: &[bool]) -> List {
        let Some(id) = list else {
            return None;
        };
        let Cons { head, tail } = self.get(id).clone();
        match head {
            Value::Pair(inner) => {
                let flat_head = self.splice_flat(Some(inner), shared);
                let flat_tail = self.splice_flat_tail(&tail, shared);
                self.nconc(flat_head, flat_tail)
            }
            Value::Nil => self.splice_flat_tail(&tail, shared),
            Value::Atom(atom) => {
                let flat_tail = self.splice_flat_tail(&tail, shared);
                if !shared[id.index()] && !tail.is_atom() && flat_tail == tail.as_list_or_nil() {
                    // the rest was already flat, keep this cell
                    list
                } else {
                    let cell = self.cons(Value::Atom(atom), Value::Nil);
                    self.nconc(Some(cell), flat_tail)
                }
            }
        }
    }

    fn splice_flat_tail(&mut self, tail: &Value<T>, shared: &[bool]) -> List {
        match tail {
            Value::Atom(atom) => Some(self.cons(Value::Atom(atom.clone()), Value::Nil)),
            _ => self.splice_flat(tail.as_list_or_nil(), shared),
        }
    }

    /// Flattens `tree` by visiting its atoms with [`Heap::traverse_with`] and
    /// splicing a fresh one-cell list onto the result for each.
    ///
    /// The input is left alone, but every splice walks the whole result so
    /// far, which makes this quadratic in the number of atoms.
    pub fn flatten_traverse(&mut self, tree: List) -> List {
        let mut flat: List = None;
        self.traverse_with(tree, |heap, atom| {
            let cell = heap.cons(Value::Atom(atom), Value::Nil);
            flat = heap.nconc(flat, Some(cell));
        });
        flat
    }
}
