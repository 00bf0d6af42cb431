//! Tolerant free-function surface over [`Queue`].
//!
//! Every function accepts absent arguments as `None` and degrades to a
//! neutral result (`false`, `0` or `None`) instead of failing. Errors of the
//! typed surface are folded into the same neutral results.
//!
//! ```
//! use cyclic_queue::ops;
//!
//! let mut queue = ops::new();
//! assert!(ops::insert_tail(Some(&mut queue), Some("a")));
//! assert!(!ops::insert_tail(None, Some("b")));
//! assert!(!ops::insert_tail(Some(&mut queue), None));
//! assert_eq!(ops::size(Some(&queue)), 1);
//! assert_eq!(ops::size(None), 0);
//! ops::free(Some(queue));
//! ```

use crate::element::Element;
use crate::list::List;
use crate::merge::Context;
use crate::queue::Queue;

/// Create an empty queue.
pub fn new() -> Queue {
    Queue::new()
}

/// Release a queue and every element it still holds.
pub fn free(queue: Option<Queue>) {
    drop(queue)
}

/// Release a detached element.
pub fn release(element: Option<Element>) {
    if let Some(element) = element {
        element.release();
    }
}

/// Insert a copy of `value` at the head. Returns `false` if an argument is
/// absent or the allocation fails.
pub fn insert_head(queue: Option<&mut Queue>, value: Option<&str>) -> bool {
    match (queue, value) {
        (Some(queue), Some(value)) => queue.insert_head(value).is_ok(),
        _ => false,
    }
}

/// Insert a copy of `value` at the tail. See [`insert_head`].
pub fn insert_tail(queue: Option<&mut Queue>, value: Option<&str>) -> bool {
    match (queue, value) {
        (Some(queue), Some(value)) => queue.insert_tail(value).is_ok(),
        _ => false,
    }
}

/// Detach the head element and copy its payload into `buf` as by
/// [`Queue::remove_head`]. An absent or zero-capacity buffer leaves the queue
/// untouched and yields `None`.
pub fn remove_head(queue: Option<&mut Queue>, buf: Option<&mut [u8]>) -> Option<Element> {
    match (queue, buf) {
        (Some(queue), Some(buf)) => queue.remove_head(buf).ok(),
        _ => None,
    }
}

/// Detach the tail element. See [`remove_head`] for the buffer.
pub fn remove_tail(queue: Option<&mut Queue>, buf: Option<&mut [u8]>) -> Option<Element> {
    match (queue, buf) {
        (Some(queue), Some(buf)) => queue.remove_tail(buf).ok(),
        _ => None,
    }
}

/// Number of elements, or 0 for an absent queue.
pub fn size(queue: Option<&Queue>) -> usize {
    queue.map_or(0, Queue::size)
}

/// Remove the middle element. Returns `false` on an absent or empty queue.
pub fn delete_mid(queue: Option<&mut Queue>) -> bool {
    queue.map_or(false, Queue::delete_mid)
}

/// Remove every element of a run of duplicates. Returns `false` on an absent
/// queue, or on an unsorted one with the `checked` feature.
pub fn delete_dup(queue: Option<&mut Queue>) -> bool {
    queue.map_or(false, |queue| queue.delete_dup().is_ok())
}

/// Swap adjacent pairs.
pub fn swap(queue: Option<&mut Queue>) {
    if let Some(queue) = queue {
        queue.swap();
    }
}

/// Reverse the queue.
pub fn reverse(queue: Option<&mut Queue>) {
    if let Some(queue) = queue {
        queue.reverse();
    }
}

/// Reverse in groups of `k`; `k == 0` leaves the queue untouched.
pub fn reverse_k(queue: Option<&mut Queue>, k: usize) {
    if let Some(queue) = queue {
        let _ = queue.reverse_k(k);
    }
}

/// Sort the queue ascending, or descending.
pub fn sort(queue: Option<&mut Queue>, descending: bool) {
    if let Some(queue) = queue {
        queue.sort(descending);
    }
}

/// Keep a non-decreasing subsequence ending at the tail; returns what remains.
pub fn ascend(queue: Option<&mut Queue>) -> usize {
    queue.map_or(0, Queue::ascend)
}

/// Keep a non-increasing subsequence ending at the tail; returns what remains.
pub fn descend(queue: Option<&mut Queue>) -> usize {
    queue.map_or(0, Queue::descend)
}

/// Merge the chain into its first queue. See [`crate::merge`].
pub fn merge(chain: Option<&mut List<Context>>, descending: bool) -> usize {
    chain.map_or(0, |chain| crate::merge::merge(chain, descending))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(queue: &Queue) -> Vec<&str> {
        queue.iter().map(String::as_str).collect()
    }

    #[test]
    fn absent_arguments_are_neutral() {
        assert!(!insert_head(None, Some("a")));
        assert!(remove_head(None, None).is_none());
        assert!(remove_tail(None, Some(&mut [0u8; 4])).is_none());
        assert_eq!(size(None), 0);
        assert!(!delete_mid(None));
        assert!(!delete_dup(None));
        swap(None);
        reverse(None);
        reverse_k(None, 2);
        sort(None, true);
        assert_eq!(ascend(None), 0);
        assert_eq!(descend(None), 0);
        assert_eq!(merge(None, false), 0);
        release(None);
        free(None);
    }

    #[test]
    fn remove_needs_a_buffer() {
        let mut queue = new();
        assert!(insert_tail(Some(&mut queue), Some("abc")));
        assert!(insert_tail(Some(&mut queue), Some("def")));

        assert!(remove_head(Some(&mut queue), Some(&mut [][..])).is_none());
        assert_eq!(size(Some(&queue)), 2);

        let mut buf = [0u8; 3];
        let head = remove_head(Some(&mut queue), Some(&mut buf[..]));
        assert_eq!(&buf, b"ab\0");
        release(head);

        assert!(remove_tail(Some(&mut queue), None).is_none());
        assert_eq!(size(Some(&queue)), 1);

        let tail = remove_tail(Some(&mut queue), Some(&mut buf[..])).unwrap();
        assert_eq!(tail.value(), "def");
        assert_eq!(&buf, b"de\0");
        assert!(remove_tail(Some(&mut queue), Some(&mut buf[..])).is_none());
    }

    #[test]
    fn transforms() {
        let mut queue = new();
        for value in ["a", "a", "c", "b", "d"].iter() {
            assert!(insert_tail(Some(&mut queue), Some(*value)));
        }
        sort(Some(&mut queue), false);
        assert!(delete_dup(Some(&mut queue)));
        assert_eq!(contents(&queue), vec!["b", "c", "d"]);

        reverse_k(Some(&mut queue), 0);
        assert_eq!(contents(&queue), vec!["b", "c", "d"]);
        reverse_k(Some(&mut queue), 2);
        assert_eq!(contents(&queue), vec!["c", "b", "d"]);

        swap(Some(&mut queue));
        reverse(Some(&mut queue));
        assert_eq!(contents(&queue), vec!["d", "c", "b"]);
        assert_eq!(descend(Some(&mut queue)), 3);
        assert_eq!(ascend(Some(&mut queue)), 1);

        assert!(delete_mid(Some(&mut queue)));
        assert!(!delete_mid(Some(&mut queue)));
    }

    #[test]
    fn delete_dup_on_unsorted_queue() {
        let mut queue = new();
        for value in ["b", "a", "a"].iter() {
            assert!(insert_tail(Some(&mut queue), Some(*value)));
        }
        let removed = delete_dup(Some(&mut queue));
        if cfg!(feature = "checked") {
            assert!(!removed);
            assert_eq!(contents(&queue), vec!["b", "a", "a"]);
        } else {
            assert!(removed);
            assert_eq!(contents(&queue), vec!["b"]);
        }
    }

    #[test]
    fn merge_chain() {
        let mut chain = List::new();
        chain.push_back(Context::with_queue(0, ["b", "a"].iter().copied().collect()));
        chain.push_back(Context::with_queue(1, ["c"].iter().copied().collect()));
        assert_eq!(merge(Some(&mut chain), false), 3);
    }
}
