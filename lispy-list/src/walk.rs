//! Traversal, search and non-destructive transforms.

use crate::error::{Error, Result};
use crate::heap::{Cons, Heap, List, Value};

/// Iterator over the top-level elements of a list, from [`Heap::iter`].
pub struct Iter<'a, T> {
    heap: &'a Heap<T>,
    next: List,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a Value<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let cell = self.heap.get(self.next?);
        self.next = cell.tail.as_list_or_nil();
        Some(&cell.head)
    }
}

impl<T> Heap<T> {
    /// Calls `visit` on every atom of `list`, depth first, head before tail.
    ///
    /// Empty sublists are skipped; an atom in a tail slot is visited. Runs
    /// on an explicit stack, so nesting depth and length are limited only by
    /// memory.
    pub fn traverse<F>(&self, list: List, mut visit: F)
    where
        F: FnMut(&T),
    {
        let root = Value::from(list);
        let mut stack = vec![&root];
        while let Some(value) = stack.pop() {
            match value {
                Value::Nil => {}
                Value::Atom(atom) => visit(atom),
                Value::Pair(id) => {
                    let cell = self.get(*id);
                    stack.push(&cell.tail);
                    stack.push(&cell.head);
                }
            }
        }
    }

    /// Iterates over the top-level elements of `list`.
    ///
    /// Nested lists are yielded as single [`Value::Pair`] elements; a dotted
    /// tail ends the iteration.
    #[must_use]
    pub fn iter(&self, list: List) -> Iter<'_, T> {
        Iter { heap: self, next: list }
    }

    /// Counts the top-level cells of `list`.
    ///
    /// Fails with [`Error::StructureError`] if a tail slot holds an atom.
    ///
    /// # Example
    /// ```
    /// use lispy_list::Heap;
    ///
    /// let mut heap = Heap::new();
    /// let list = heap.list_of([1, 2, 3, 4, 5]);
    /// assert_eq!(heap.length(list), Ok(5));
    /// assert_eq!(heap.length(None), Ok(0));
    /// ```
    pub fn length(&self, list: List) -> Result<usize> {
        let mut count = 0;
        let mut current = list;
        while let Some(id) = current {
            current = match &self.get(id).tail {
                Value::Atom(_) => return Err(Error::StructureError { position: count }),
                tail => tail.as_list_or_nil(),
            };
            count += 1;
        }
        Ok(count)
    }

    /// Counts the top-level cells of `list`, stopping quietly at an atom in
    /// a tail slot.
    #[must_use]
    pub fn length_unchecked(&self, list: List) -> usize {
        self.iter(list).count()
    }
}

impl<T: PartialEq> Heap<T> {
    /// Structural equality: atoms compare by value, lists element by element.
    #[must_use]
    pub fn equal(&self, a: &Value<T>, b: &Value<T>) -> bool {
        let (mut a, mut b) = (a, b);
        loop {
            match (a, b) {
                (Value::Nil, Value::Nil) => return true,
                (Value::Atom(x), Value::Atom(y)) => return x == y,
                (Value::Pair(x), Value::Pair(y)) => {
                    if x == y {
                        return true;
                    }
                    let (x, y) = (self.get(*x), self.get(*y));
                    if !self.equal(&x.head, &y.head) {
                        return false;
                    }
                    a = &x.tail;
                    b = &y.tail;
                }
                _ => return false,
            }
        }
    }

    /// Returns the first sub-list of `list` whose head equals `value`.
    ///
    /// # Example
    /// ```
    /// use lispy_list::{Heap, Value};
    ///
    /// let mut heap = Heap::new();
    /// let list = heap.list_of([3, 4, 5, 6, 7]);
    /// let found = heap.member(&Value::Atom(6), list);
    /// assert_eq!(heap.format(&Value::from(found)), "(6 7)");
    /// assert_eq!(heap.member(&Value::Atom(99), list), None);
    /// ```
    #[must_use]
    pub fn member(&self, value: &Value<T>, list: List) -> List {
        let mut current = list;
        while let Some(id) = current {
            let cell = self.get(id);
            if self.equal(&cell.head, value) {
                return current;
            }
            current = cell.tail.as_list_or_nil();
        }
        None
    }
}

impl<T: Clone> Heap<T> {
    /// Like [`Heap::traverse`], but `visit` may allocate and splice in the
    /// heap. Each atom is handed over by value.
    ///
    /// Cells are read as the walk reaches them, so a write to a cell not yet
    /// visited is observed.
    pub fn traverse_with<F>(&mut self, list: List, mut visit: F)
    where
        F: FnMut(&mut Self, T),
    {
        let mut stack = vec![Value::from(list)];
        while let Some(value) = stack.pop() {
            match value {
                Value::Nil => {}
                Value::Atom(atom) => visit(self, atom),
                Value::Pair(id) => {
                    let Cons { head, tail } = self.get(id).clone();
                    stack.push(tail);
                    stack.push(head);
                }
            }
        }
    }

    /// Collects the top-level elements of `list`.
    #[must_use]
    pub fn to_vec(&self, list: List) -> Vec<Value<T>> {
        self.iter(list).cloned().collect()
    }

    /// Copies `x` with its last tail pointing at `y`. `y` is shared, not
    /// copied, and neither input is modified.
    pub fn append2(&mut self, x: List, y: List) -> List {
        let heads = self.to_vec(x);
        heads
            .into_iter()
            .rev()
            .fold(y, |tail, head| Some(self.cons(head, Value::from(tail))))
    }

    /// Concatenates any number of lists without modifying them.
    ///
    /// Every list but the last is copied; the last becomes the shared tail
    /// of the result.
    pub fn append<I>(&mut self, lists: I) -> List
    where
        I: IntoIterator<Item = List>,
    {
        let mut lists: Vec<List> = lists.into_iter().collect();
        let Some(last) = lists.pop() else {
            return None;
        };
        lists
            .into_iter()
            .rev()
            .fold(last, |tail, list| self.append2(list, tail))
    }

    /// Returns a reversed copy of `list`.
    pub fn reverse(&mut self, list: List) -> List {
        let heads = self.to_vec(list);
        heads
            .into_iter()
            .fold(None, |tail, head| Some(self.cons(head, Value::from(tail))))
    }
}

impl<T: Clone + PartialEq> Heap<T> {
    /// Returns `tree` with every part equal to `old` replaced by `new`.
    ///
    /// `old` may be an atom or a whole list and is matched anywhere, heads
    /// and tails alike. Only the cells on a path to a replacement are
    /// rebuilt; untouched sub-structure is shared with `tree`. Recurses once
    /// per cell on the path.
    pub fn subst(&mut self, new: &Value<T>, old: &Value<T>, tree: &Value<T>) -> Value<T> {
        if self.equal(tree, old) {
            return new.clone();
        }
        let Value::Pair(id) = tree else {
            return tree.clone();
        };
        let cell = self.get(*id).clone();
        let head = self.subst(new, old, &cell.head);
        let tail = self.subst(new, old, &cell.tail);
        if head == cell.head && tail == cell.tail {
            tree.clone()
        } else {
            Value::Pair(self.cons(head, tail))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(heap: &Heap<i64>, list: List) -> String {
        heap.format(&Value::from(list))
    }

    #[test]
    fn test_traverse_order() {
        let mut heap = Heap::new();
        let deep = heap.list_of([4, 5, 6]);
        let middle = heap.make_list([Value::Atom(2), Value::Atom(3), Value::from(deep)]);
        let last = heap.list_of([7, 8]);
        let tree = heap.make_list([Value::Atom(1), Value::from(middle), Value::from(last)]);

        let mut seen = Vec::new();
        heap.traverse(tree, |atom| seen.push(*atom));
        assert_eq!(seen, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_traverse_with_can_allocate() {
        let mut heap = Heap::new();
        let list = heap.list_of([1, 2, 3]);
        let mut doubled: List = None;
        heap.traverse_with(list, |heap, atom| {
            doubled = Some(heap.cons(Value::Atom(atom * 2), Value::from(doubled)));
        });
        assert_eq!(show(&heap, doubled), "(6 4 2)");
    }

    #[test]
    fn test_length() {
        let mut heap = Heap::new();
        let inner = heap.list_of([1, 2, 3]);
        let list = heap.make_list([Value::from(inner), Value::Atom(4)]);
        // nested lists count once
        assert_eq!(heap.length(list), Ok(2));
        assert_eq!(heap.length_unchecked(list), 2);
    }

    #[test]
    fn test_length_of_dotted_list() {
        let mut heap = Heap::new();
        let end = heap.cons(Value::Atom(2), Value::Atom(3));
        let list = Some(heap.cons(Value::Atom(1), Value::Pair(end)));

        assert_eq!(heap.length(list), Err(Error::StructureError { position: 1 }));
        assert_eq!(heap.length_unchecked(list), 2);
    }

    #[test]
    fn test_equal_is_structural() {
        let mut heap = Heap::new();
        let a = heap.list_of([1, 2]);
        let b = heap.list_of([1, 2]);
        let c = heap.list_of([1, 2, 3]);

        assert_ne!(a, b);
        assert!(heap.equal(&Value::from(a), &Value::from(b)));
        assert!(!heap.equal(&Value::from(a), &Value::from(c)));
        assert!(!heap.equal(&Value::from(a), &Value::Atom(1)));
        assert!(heap.equal(&Value::Nil, &Value::Nil));
    }

    #[test]
    fn test_member_finds_nested_list_by_value() {
        let mut heap = Heap::new();
        let inner = heap.list_of([2, 3]);
        let list = heap.make_list([Value::Atom(1), Value::from(inner), Value::Atom(4)]);
        let needle = heap.list_of([2, 3]);

        let found = heap.member(&Value::from(needle), list);
        assert_eq!(show(&heap, found), "((2 3) 4)");
    }

    #[test]
    fn test_subst_atoms_everywhere() {
        let mut heap = Heap::new();
        let inner = heap.list_of([1, 2, 1]);
        let tree = heap.make_list([Value::Atom(1), Value::from(inner), Value::Atom(3)]);

        let replaced = heap.subst(&Value::Atom(9), &Value::Atom(1), &Value::from(tree));
        assert_eq!(heap.format(&replaced), "(9 (9 2 9) 3)");
        assert_eq!(show(&heap, tree), "(1 (1 2 1) 3)");
    }

    #[test]
    fn test_subst_shares_untouched_structure() {
        let mut heap = Heap::new();
        let untouched = heap.list_of([5, 6]);
        let tree = heap.make_list([Value::Atom(1), Value::from(untouched)]);

        let replaced = heap.subst(&Value::Atom(0), &Value::Atom(1), &Value::from(tree));
        let list = replaced.to_list().unwrap();
        assert_eq!(heap.cadr(list), Ok(Value::from(untouched)));

        let same = heap.subst(&Value::Atom(0), &Value::Atom(42), &Value::from(tree));
        assert_eq!(same, Value::from(tree));
    }

    #[test]
    fn test_subst_whole_sublist() {
        let mut heap = Heap::new();
        let inner = heap.list_of([2, 3]);
        let tree = heap.make_list([Value::Atom(1), Value::from(inner)]);
        let old = heap.list_of([2, 3]);

        let replaced = heap.subst(&Value::Atom(23), &Value::from(old), &Value::from(tree));
        assert_eq!(heap.format(&replaced), "(1 23)");
    }

    #[test]
    fn test_append_copies_all_but_last() {
        let mut heap = Heap::new();
        let a = heap.list_of([1, 2]);
        let b = heap.list_of([3]);
        let c = heap.list_of([4, 5]);

        let joined = heap.append([a, b, c]);
        assert_eq!(show(&heap, joined), "(1 2 3 4 5)");
        assert_eq!(show(&heap, a), "(1 2)");
        assert_eq!(show(&heap, b), "(3)");
        // c is the shared tail
        assert_eq!(heap.cdr(heap.cdr(heap.cdr(joined).unwrap()).unwrap()), Ok(c));
    }

    #[test]
    fn test_append_edge_cases() {
        let mut heap = Heap::new();
        let a = heap.list_of([1]);
        assert_eq!(heap.append(Vec::new()), None);
        assert_eq!(heap.append([a]), a);
        let joined = heap.append([None, a, None]);
        assert_eq!(show(&heap, joined), "(1)");
        assert_ne!(joined, a);
    }

    #[test]
    fn test_reverse_is_a_copy() {
        let mut heap = Heap::new();
        let list = heap.list_of([1, 2, 3]);
        let reversed = heap.reverse(list);
        assert_eq!(show(&heap, reversed), "(3 2 1)");
        assert_eq!(show(&heap, list), "(1 2 3)");
    }

    #[test]
    fn test_iter_and_to_vec() {
        let mut heap = Heap::new();
        let list = heap.list_of([1, 2, 3]);
        let atoms: Vec<i64> = heap.iter(list).filter_map(|v| v.as_atom().copied()).collect();
        assert_eq!(atoms, vec![1, 2, 3]);
        assert_eq!(
            heap.to_vec(list),
            vec![Value::Atom(1), Value::Atom(2), Value::Atom(3)]
        );
    }
}
