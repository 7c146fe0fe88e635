//! # Lispy Lists
//!
//! Dynamically typed, singly linked lists built from cons cells, the way
//! Lisp builds them: every cell has a head and a tail, either of which may
//! hold an atom, another list, or nothing.
//!
//! ## Modules
//!
//! - [`heap`]: the cell arena, [`Value`] and [`List`]
//! - [`build`]: `cons`, `make_list` and friends
//! - [`access`]: `car`/`cdr`, the `cxr` path accessor and its named aliases
//! - [`destructive`]: `rplaca`, `rplacd`, `last`, `nconc`, `nreverse`
//! - [`flatten`]: three flattening strategies
//! - [`walk`]: traversal, `length`, `member`, `subst`, `append`, `reverse`
//! - [`print`]: the structural printer
//! - [`fixture`]: random nested lists for tests and demos
//!
//! ## Sharing
//!
//! A [`List`] is a handle into a [`Heap`]. Handles are plain indices, so many
//! lists may point at the same cells, and the destructive operations are
//! seen through all of them. Nothing here detects cycles; a circular list
//! makes most walks run forever.
//!
//! ## Example
//!
//! ```
//! use lispy_list::{Heap, Value};
//!
//! let mut heap = Heap::new();
//! let deep = heap.list_of([4, 5, 6]);
//! let middle = heap.make_list([Value::Atom(2), Value::Atom(3), Value::from(deep)]);
//! let last = heap.list_of([7, 8]);
//! let tree = heap.make_list([Value::Atom(1), Value::from(middle), Value::from(last)]);
//! assert_eq!(heap.format(&Value::from(tree)), "(1 (2 3 (4 5 6)) (7 8))");
//!
//! let flat = heap.flatten_acc(tree);
//! assert_eq!(heap.format(&Value::from(flat)), "(1 2 3 4 5 6 7 8)");
//! assert_eq!(heap.length(flat), Ok(8));
//! ```

pub mod access;
pub mod build;
pub mod destructive;
pub mod error;
pub mod fixture;
pub mod flatten;
pub mod heap;
pub mod print;
pub mod walk;

pub use error::{Error, Result, Shape};
pub use fixture::Lcg;
pub use heap::{CellId, Cons, Heap, List, Stats, Value};
pub use print::{DEFAULT_MAX_ELEMENTS, PrintOptions, Printed};
