//! Constructors: the only way cells come into existence.

use crate::heap::{CellId, Cons, Heap, List, Value};

impl<T> Heap<T> {
    /// Allocates a new cell `(head . tail)`.
    ///
    /// # Example
    /// ```
    /// use lispy_list::{Heap, Value};
    ///
    /// let mut heap = Heap::new();
    /// let pair = heap.cons(Value::Atom(1), Value::Atom(2));
    /// assert_eq!(heap.format(&Value::Pair(pair)), "(1 . 2)");
    /// ```
    pub fn cons(&mut self, head: Value<T>, tail: Value<T>) -> CellId {
        self.alloc(Cons { head, tail })
    }

    /// Builds a proper list holding `values` in order.
    ///
    /// An empty sequence yields the empty list.
    ///
    /// # Example
    /// ```
    /// use lispy_list::{Heap, Value};
    ///
    /// let mut heap = Heap::new();
    /// let inner = heap.list_of([2, 3]);
    /// let list = heap.make_list([Value::Atom(1), Value::from(inner)]);
    /// assert_eq!(heap.format(&Value::from(list)), "(1 (2 3))");
    ///
    /// assert_eq!(heap.make_list(Vec::new()), None);
    /// ```
    pub fn make_list<I>(&mut self, values: I) -> List
    where
        I: IntoIterator<Item = Value<T>>,
        I::IntoIter: DoubleEndedIterator,
    {
        values
            .into_iter()
            .rev()
            .fold(None, |tail, head| Some(self.cons(head, Value::from(tail))))
    }

    /// Builds a proper list of atoms.
    pub fn list_of<I>(&mut self, atoms: I) -> List
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: DoubleEndedIterator,
    {
        self.make_list(atoms.into_iter().map(Value::Atom))
    }
}

impl Heap<i64> {
    /// Builds the list `(start start+1 ... start+length-1)`.
    ///
    /// The run stops at `i64::MAX`, so a list that would run past it comes
    /// out shorter than `length`.
    ///
    /// # Example
    /// ```
    /// use lispy_list::{Heap, Value};
    ///
    /// let mut heap = Heap::new();
    /// let run = heap.gen_int_list(5, 3);
    /// assert_eq!(heap.format(&Value::from(run)), "(5 6 7)");
    ///
    /// let top = heap.gen_int_list(i64::MAX - 1, 10);
    /// assert_eq!(heap.length(top), Ok(2));
    /// ```
    pub fn gen_int_list(&mut self, start: i64, length: usize) -> List {
        match i64::try_from(length).ok().and_then(|n| start.checked_add(n)) {
            Some(end) => self.list_of(start..end),
            None => self.list_of(start..=i64::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cons_cells_chain() {
        let mut heap = Heap::new();
        let c3 = heap.cons(Value::Atom(3), Value::Nil);
        let c2 = heap.cons(Value::Atom(2), Value::Pair(c3));
        let c1 = heap.cons(Value::Atom(1), Value::Pair(c2));

        assert_eq!(heap.format(&Value::Pair(c1)), "(1 2 3)");
        assert_eq!(heap.stats().allocations, 3);
    }

    #[test]
    fn test_make_list_preserves_order() {
        let mut heap = Heap::new();
        let list = heap.list_of(["how", "now", "brown", "cow"]);
        assert_eq!(
            heap.format(&Value::from(list)),
            r#"("how" "now" "brown" "cow")"#
        );
    }

    #[test]
    fn test_make_list_empty_input() {
        let mut heap: Heap<i64> = Heap::new();
        assert_eq!(heap.list_of(Vec::new()), None);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_nested_make_list() {
        let mut heap = Heap::new();
        let inner = heap.list_of([4, 5, 6]);
        let middle = heap.make_list([Value::Atom(2), Value::Atom(3), Value::from(inner)]);
        let last = heap.list_of([7, 8]);
        let list = heap.make_list([Value::Atom(1), Value::from(middle), Value::from(last)]);

        assert_eq!(
            heap.format(&Value::from(list)),
            "(1 (2 3 (4 5 6)) (7 8))"
        );
    }

    #[test]
    fn test_gen_int_list() {
        let mut heap = Heap::new();
        let list = heap.gen_int_list(5, 4);
        assert_eq!(heap.format(&Value::from(list)), "(5 6 7 8)");
        assert_eq!(heap.gen_int_list(1, 0), None);
    }

    #[test]
    fn test_gen_int_list_stops_at_max() {
        let mut heap = Heap::new();
        let list = heap.gen_int_list(i64::MAX, 1);
        assert_eq!(heap.format(&Value::from(list)), "(9223372036854775807)");

        let list = heap.gen_int_list(i64::MAX, 3);
        assert_eq!(heap.length(list), Ok(1));
        let list = heap.gen_int_list(i64::MAX - 2, usize::MAX);
        assert_eq!(heap.length(list), Ok(3));
        assert_eq!(heap.gen_int_list(i64::MAX, 0), None);
    }
}
