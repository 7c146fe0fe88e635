//! Random nested lists for tests and the demo binary.
//!
//! The generated lists hold consecutive integers, so any correct flatten of
//! one is an ascending run that [`Heap::is_ascending_run`] can check.

use crate::heap::{Heap, List, Value};

/// Linear congruential generator.
///
/// Deterministic for a given seed, which keeps generated fixtures
/// reproducible.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    const A: u64 = 1_664_525;
    const C: u64 = 1_013_904_223;
    const M: u64 = 1 << 32;

    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { state: seed % Self::M }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = Self::A.wrapping_mul(self.state).wrapping_add(Self::C) % Self::M;
        self.state
    }

    /// Returns a number in `low..=high`, or `low` if the range is empty.
    pub fn between(&mut self, low: usize, high: usize) -> usize {
        if high <= low {
            return low;
        }
        let span = (high - low + 1) as u64;
        low + (self.next_u64() % span) as usize
    }
}

struct Nester<'a> {
    heap: &'a mut Heap<i64>,
    rng: &'a mut Lcg,
    next: i64,
    end: i64,
    length: usize,
    depth: usize,
}

impl Nester<'_> {
    // Runs are clipped at `end`, so a run asked for after the last number
    // has been handed out is empty.
    fn int_run(&mut self, count: usize) -> List {
        let count = count.min(self.remaining());
        let run = self.heap.gen_int_list(self.next, count);
        self.next += count as i64;
        run
    }

    fn remaining(&self) -> usize {
        usize::try_from(self.end - self.next).unwrap_or(usize::MAX)
    }

    // A list nested up to `depth - 1` levels: either a run of integers or a
    // pair of deeper lists.
    fn nest(&mut self, depth: usize) -> List {
        let depth = depth.saturating_sub(1);
        if depth == 0 {
            let divisor = self.rng.between(1, self.depth);
            let count = self.rng.between(1, self.length / divisor + 1);
            return self.int_run(count);
        }
        let first = self.rng.between(1, depth);
        let first = self.nest(first);
        let second = self.rng.between(1, depth);
        let second = self.nest(second);
        let rest = self.heap.make_list([Value::from(second)]);
        Some(self.heap.cons(Value::from(first), Value::from(rest)))
    }
}

impl Heap<i64> {
    /// Builds a random nested list whose atoms, read depth first, are
    /// `start, start + 1, ...` and nesting at most `depth` levels.
    ///
    /// Exactly `length` atoms are produced, unless the numbers would pass
    /// `i64::MAX`, in which case they stop just short of it. The last nested
    /// piece may hold empty sublists where it ran out of numbers.
    pub fn gen_nested_list(&mut self, rng: &mut Lcg, start: i64, length: usize, depth: usize) -> List {
        let end = i64::try_from(length)
            .ok()
            .and_then(|n| start.checked_add(n))
            .unwrap_or(i64::MAX);
        let depth = depth.max(1);
        let mut list: List = None;
        let mut nester = Nester {
            heap: self,
            rng,
            next: start,
            end,
            length,
            depth,
        };
        while nester.next < end {
            let piece = if nester.rng.between(1, 5) < 3 {
                let count = nester.rng.between(1, nester.remaining());
                nester.int_run(count)
            } else {
                let depth = nester.rng.between(1, depth);
                nester.nest(depth)
            };
            list = nester.heap.nconc(list, piece);
        }
        log::debug!(
            "generated nested list of {} atoms from {start}",
            nester.next - start
        );
        list
    }

    /// Checks that `list` is a proper, flat list of exactly `length` atoms
    /// reading `start, start + 1, ...`.
    ///
    /// A nested element, an atom in a tail slot, or a count other than
    /// `length` all fail the check.
    ///
    /// # Example
    /// ```
    /// use lispy_list::Heap;
    ///
    /// let mut heap = Heap::new();
    /// let run = heap.gen_int_list(3, 4);
    /// assert!(heap.is_ascending_run(run, 3, 4));
    /// assert!(!heap.is_ascending_run(run, 3, 5));
    /// ```
    #[must_use]
    pub fn is_ascending_run(&self, list: List, start: i64, length: usize) -> bool {
        let mut expected = Some(start);
        let mut count = 0;
        let mut next = list;
        while let Some(id) = next {
            let cell = self.get(id);
            match (&cell.head, expected) {
                (Value::Atom(atom), Some(want)) if *atom == want => {}
                _ => return false,
            }
            expected = expected.and_then(|n| n.checked_add(1));
            count += 1;
            next = match &cell.tail {
                Value::Pair(id) => Some(*id),
                Value::Nil => None,
                Value::Atom(_) => return false,
            };
        }
        count == length
    }
}
