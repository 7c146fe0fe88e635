//! Work counters of the flatten strategies on left-deep input.

use lispy_list::{Heap, List, Value};

// ((((1) 2) 3) ... n)
fn left_deep(heap: &mut Heap<i64>, n: i64) -> List {
    let mut tree = heap.list_of([1]);
    for k in 2..=n {
        tree = heap.make_list([Value::from(tree), Value::Atom(k)]);
    }
    tree
}

fn measure(n: i64, flatten: fn(&mut Heap<i64>, List) -> List) -> usize {
    let mut heap = Heap::new();
    let tree = left_deep(&mut heap, n);
    heap.reset_stats();
    let flat = flatten(&mut heap, tree);
    assert!(heap.is_ascending_run(flat, 1, n as usize));
    heap.stats().work()
}

#[test]
fn test_flatten_acc_is_linear() {
    let small = measure(100, Heap::flatten_acc);
    let large = measure(200, Heap::flatten_acc);
    assert_eq!(small, 100);
    assert_eq!(large, 2 * small);

    assert_eq!(measure(200, Heap::flatten_acc_iter), large);
}

#[test]
fn test_flatten_splice_is_quadratic_on_left_deep_input() {
    let small = measure(100, Heap::flatten_splice);
    let large = measure(200, Heap::flatten_splice);
    // (n - 1)(n - 2) / 2 tail links walked, no cells allocated
    assert_eq!(small, 99 * 98 / 2);
    assert_eq!(large, 199 * 198 / 2);
    assert!(large > 3 * small);
}

#[test]
fn test_flatten_traverse_is_quadratic() {
    let small = measure(100, Heap::flatten_traverse);
    let large = measure(200, Heap::flatten_traverse);
    assert!(large > 3 * small);
}

#[test]
fn test_splice_outgrows_acc() {
    for n in [50, 100, 400] {
        let acc = measure(n, Heap::flatten_acc);
        let splice = measure(n, Heap::flatten_splice);
        assert!(splice > acc, "n = {n}: splice {splice} <= acc {acc}");
    }
}

#[test]
fn test_iterative_walks_handle_deep_nesting() {
    let n = 100_000;
    let mut heap = Heap::new();
    let tree = left_deep(&mut heap, n);

    let flat = heap.flatten_acc_iter(tree);
    assert!(heap.is_ascending_run(flat, 1, n as usize));

    let mut count = 0;
    heap.traverse(tree, |_| count += 1);
    assert_eq!(count, n);

    let last = heap.last(flat.unwrap());
    assert_eq!(heap.get(last).head, Value::Atom(n));
}
