use crate::element::Element;
use crate::error::{Error, Result};
use crate::list::{List, Node};
use crate::Iter;
use std::fmt;
use std::iter::FromIterator;

/// A queue of owned strings threaded on a cyclic doubly-linked ring.
///
/// Insertion and removal at both ends take *O*(1) time. Every restructuring
/// operation (reversal, sorting, pruning, ...) relinks the existing nodes in
/// place and never copies a payload.
///
/// # Examples
///
/// ```
/// use cyclic_queue::Queue;
///
/// let mut queue = Queue::new();
/// queue.insert_tail("b").unwrap();
/// queue.insert_head("a").unwrap();
/// assert_eq!(queue.size(), 2);
///
/// let mut buf = [0u8; 8];
/// let element = queue.remove_head(&mut buf).unwrap();
/// assert_eq!(element.value(), "a");
/// assert_eq!(&buf[..2], b"a\0");
/// ```
#[derive(Default, Clone, PartialEq, Eq, Hash)]
pub struct Queue {
    list: List<String>,
}

impl Queue {
    /// Create an empty queue.
    #[inline]
    pub fn new() -> Self {
        Self { list: List::new() }
    }

    /// Copies `value` and inserts it at the head of the queue.
    ///
    /// If the copy or the node cannot be allocated, `Error::OutOfMemory` is
    /// returned and the queue is left unchanged.
    pub fn insert_head(&mut self, value: &str) -> Result<()> {
        self.list.try_push_front(copy_payload(value)?)
    }

    /// Copies `value` and inserts it at the tail of the queue.
    ///
    /// If the copy or the node cannot be allocated, `Error::OutOfMemory` is
    /// returned and the queue is left unchanged.
    pub fn insert_tail(&mut self, value: &str) -> Result<()> {
        self.list.try_push_back(copy_payload(value)?)
    }

    /// Detaches the head element, and copies its payload into `buf`.
    ///
    /// At most `buf.len() - 1` bytes of the payload are copied, followed by a
    /// NUL byte. The copy may end in the middle of a UTF-8 sequence.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidArgument` if `buf` is empty;
    /// - `Error::Empty` if the queue is empty.
    ///
    /// In both cases the queue is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::{Error, Queue};
    ///
    /// let mut queue = Queue::new();
    /// queue.insert_tail("hello").unwrap();
    ///
    /// assert!(matches!(queue.remove_head(&mut []), Err(Error::InvalidArgument { .. })));
    ///
    /// let mut buf = [0xffu8; 3];
    /// let element = queue.remove_head(&mut buf).unwrap();
    /// assert_eq!(&buf, b"he\0");
    /// assert_eq!(element.value(), "hello");
    ///
    /// assert_eq!(queue.remove_head(&mut buf).unwrap_err(), Error::Empty);
    /// ```
    pub fn remove_head(&mut self, buf: &mut [u8]) -> Result<Element> {
        self.remove_with(buf, List::pop_front_node)
    }

    /// Detaches the tail element, and copies its payload into `buf`.
    ///
    /// See [`Queue::remove_head`] for the copy and the errors.
    pub fn remove_tail(&mut self, buf: &mut [u8]) -> Result<Element> {
        self.remove_with(buf, List::pop_back_node)
    }

    fn remove_with<F>(&mut self, buf: &mut [u8], pop: F) -> Result<Element>
    where
        F: FnOnce(&mut List<String>) -> Option<Box<Node<String>>>,
    {
        if buf.is_empty() {
            log::debug!("rejected removal into a zero-capacity buffer");
            return Err(Error::invalid("zero-capacity buffer"));
        }
        match pop(&mut self.list) {
            Some(node) => {
                copy_truncated(&node.element, buf);
                Ok(Element::from_node(node))
            }
            None => {
                log::debug!("removal from an empty queue");
                Err(Error::Empty)
            }
        }
    }

    /// Detaches the head element without copying it, or returns `None` if
    /// the queue is empty.
    pub fn take_head(&mut self) -> Option<Element> {
        self.list.pop_front_node().map(Element::from_node)
    }

    /// Detaches the tail element without copying it, or returns `None` if
    /// the queue is empty.
    pub fn take_tail(&mut self) -> Option<Element> {
        self.list.pop_back_node().map(Element::from_node)
    }

    /// Returns the number of elements, by walking the whole ring.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn size(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if the queue holds no element.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Provides a forward iterator over the payloads, head to tail.
    #[inline]
    pub fn iter(&self) -> Iter<'_, String> {
        self.list.iter()
    }

    /// Views the underlying ring.
    #[inline]
    pub fn as_list(&self) -> &List<String> {
        &self.list
    }

    /// Consumes the queue and returns the underlying ring.
    pub fn into_list(self) -> List<String> {
        self.list
    }

    /// Moves all elements of `other` to the tail of the queue in *O*(1) time,
    /// leaving `other` empty.
    pub fn append(&mut self, other: &mut Queue) {
        self.list.append(&mut other.list);
    }

    /// Removes and releases the middle element, the one at index *n* / 2
    /// (rounded down). Returns `false` if the queue is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue: Queue = ["a", "b", "c"].iter().copied().collect();
    /// assert!(queue.delete_mid());
    /// assert_eq!(queue.iter().collect::<Vec<_>>(), ["a", "c"]);
    /// ```
    pub fn delete_mid(&mut self) -> bool {
        let deleted = self.list.remove_middle().is_some();
        self.check_links();
        deleted
    }

    /// Removes every element that belongs to a run of adjacent equal strings,
    /// keeping only the strings that occur once. Returns how many elements
    /// were removed.
    ///
    /// The queue is expected to be sorted in ascending order. On an unsorted
    /// queue only runs of adjacent equal strings are removed; with the
    /// `checked` feature it is rejected with `Error::Unsorted` instead and
    /// left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue: Queue = ["a", "a", "b", "b", "b", "c"].iter().copied().collect();
    /// assert_eq!(queue.delete_dup(), Ok(5));
    /// assert_eq!(queue.iter().collect::<Vec<_>>(), ["c"]);
    /// ```
    pub fn delete_dup(&mut self) -> Result<usize> {
        #[cfg(feature = "checked")]
        {
            if !self.list.is_sorted() {
                log::debug!("rejected duplicate removal on an unsorted queue");
                return Err(Error::Unsorted);
            }
        }
        #[cfg(not(feature = "checked"))]
        {
            if !self.list.is_sorted() {
                log::debug!("removing adjacent duplicates from an unsorted queue");
            }
        }

        let removed = self.list.dedup_runs();
        self.check_links();
        log::trace!("removed {} duplicated elements", removed);
        Ok(removed)
    }

    /// Swaps every two adjacent elements by relinking their nodes. An odd
    /// trailing element stays in place.
    pub fn swap(&mut self) {
        self.list.swap_pairs();
        self.check_links();
    }

    /// Reverses the queue in place.
    pub fn reverse(&mut self) {
        self.list.reverse();
        self.check_links();
    }

    /// Reverses the queue in consecutive groups of `k` elements. A trailing
    /// group shorter than `k` keeps its order.
    ///
    /// Returns `Error::InvalidArgument` for `k == 0`, leaving the queue
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue: Queue = ["1", "2", "3", "4", "5"].iter().copied().collect();
    /// queue.reverse_k(2).unwrap();
    /// assert_eq!(queue.iter().collect::<Vec<_>>(), ["2", "1", "4", "3", "5"]);
    /// assert!(queue.reverse_k(0).is_err());
    /// ```
    pub fn reverse_k(&mut self, k: usize) -> Result<()> {
        if k == 0 {
            log::debug!("rejected group reversal with k = 0");
            return Err(Error::invalid("group size must be positive"));
        }
        self.list.reverse_groups(k);
        self.check_links();
        Ok(())
    }

    /// Sorts the queue in ascending order, or in descending order if
    /// `descending` is set.
    ///
    /// See [`List::sort`] for the algorithm.
    pub fn sort(&mut self, descending: bool) {
        if descending {
            self.list.sort_descending();
        } else {
            self.list.sort();
        }
        self.check_links();
        log::trace!("sorted queue, descending: {}", descending);
    }

    /// Removes every element that has a strictly smaller element anywhere to
    /// its right, and returns the remaining count. The tail is always kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue: Queue = ["a", "d", "b", "c", "b"].iter().copied().collect();
    /// assert_eq!(queue.ascend(), 3);
    /// assert_eq!(queue.iter().collect::<Vec<_>>(), ["a", "b", "b"]);
    /// ```
    pub fn ascend(&mut self) -> usize {
        let remaining = self.list.retain_ascending();
        self.check_links();
        remaining
    }

    /// Removes every element that has a strictly greater element anywhere to
    /// its right, and returns the remaining count. The tail is always kept.
    pub fn descend(&mut self) -> usize {
        let remaining = self.list.retain_descending();
        self.check_links();
        remaining
    }

    fn check_links(&self) {
        #[cfg(feature = "checked")]
        assert!(self.list.is_well_linked(), "queue ring is broken");
        #[cfg(not(feature = "checked"))]
        debug_assert!(self.list.is_well_linked(), "queue ring is broken");
    }
}

/// Copy a payload, reporting allocation failure instead of aborting.
fn copy_payload(value: &str) -> Result<String> {
    let mut payload = String::new();
    if payload.try_reserve_exact(value.len()).is_err() {
        log::warn!("payload allocation of {} bytes failed", value.len());
        return Err(Error::OutOfMemory { size: value.len() });
    }
    payload.push_str(value);
    Ok(payload)
}

/// Copy as much of `value` as fits in `buf`, keeping the last byte for NUL.
///
/// `buf` must not be empty.
fn copy_truncated(value: &str, buf: &mut [u8]) {
    let len = value.len().min(buf.len() - 1);
    buf[..len].copy_from_slice(&value.as_bytes()[..len]);
    buf[len] = 0;
}

impl fmt::Debug for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Queue").field(&self.list).finish()
    }
}

impl From<List<String>> for Queue {
    fn from(list: List<String>) -> Self {
        Self { list }
    }
}

impl<'a> FromIterator<&'a str> for Queue {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            list: iter.into_iter().map(str::to_owned).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Queue {
    type Item = &'a String;
    type IntoIter = Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::Queue;
    use crate::error::Error;
    use std::iter::FromIterator;

    fn queue_of(values: &[&str]) -> Queue {
        Queue::from_iter(values.iter().copied())
    }

    fn contents(queue: &Queue) -> Vec<&str> {
        queue.iter().map(String::as_str).collect()
    }

    #[test]
    fn insert_and_size() {
        let mut queue = Queue::new();
        assert_eq!(queue.size(), 0);
        assert!(queue.is_empty());

        queue.insert_head("b").unwrap();
        queue.insert_head("a").unwrap();
        queue.insert_tail("c").unwrap();
        queue.insert_tail("").unwrap();
        assert_eq!(queue.size(), 4);
        assert_eq!(contents(&queue), vec!["a", "b", "c", ""]);
    }

    #[test]
    fn insert_copies_payload() {
        let mut queue = Queue::new();
        let mut source = String::from("abc");
        queue.insert_tail(&source).unwrap();
        source.clear();
        assert_eq!(contents(&queue), vec!["abc"]);
    }

    #[test]
    fn remove_truncates_into_buffer() {
        let mut queue = queue_of(&["hello", "world", "x"]);

        let mut buf = [0xffu8; 3];
        let head = queue.remove_head(&mut buf).unwrap();
        assert_eq!(&buf, b"he\0");
        assert_eq!(head.value(), "hello");

        let mut buf = [0xffu8; 16];
        let tail = queue.remove_tail(&mut buf).unwrap();
        assert_eq!(&buf[..2], b"x\0");
        assert_eq!(buf[2], 0xff);
        assert_eq!(tail.value(), "x");

        let mut buf = [0xffu8; 1];
        let last = queue.remove_tail(&mut buf).unwrap();
        assert_eq!(buf, [0]);
        assert_eq!(last.value(), "world");
        assert!(queue.is_empty());
    }

    #[test]
    fn remove_rejects_bad_calls() {
        let mut queue = queue_of(&["a"]);
        assert_eq!(
            queue.remove_head(&mut []).unwrap_err(),
            Error::invalid("zero-capacity buffer")
        );
        assert_eq!(queue.size(), 1);

        let mut buf = [0u8; 4];
        assert!(queue.remove_tail(&mut buf).is_ok());
        assert_eq!(queue.remove_tail(&mut buf).unwrap_err(), Error::Empty);
        assert_eq!(queue.remove_head(&mut buf).unwrap_err(), Error::Empty);
        assert!(queue.take_head().is_none());
        assert!(queue.take_tail().is_none());
    }

    #[test]
    fn delete_mid() {
        let mut queue = Queue::new();
        assert!(!queue.delete_mid());

        let mut queue = queue_of(&["a", "b", "c"]);
        assert!(queue.delete_mid());
        assert_eq!(contents(&queue), vec!["a", "c"]);

        let mut queue = queue_of(&["a", "b", "c", "d"]);
        assert!(queue.delete_mid());
        assert_eq!(contents(&queue), vec!["a", "b", "d"]);

        let mut queue = queue_of(&["a"]);
        assert!(queue.delete_mid());
        assert!(queue.is_empty());
    }

    #[test]
    fn delete_dup() {
        let mut queue = queue_of(&["a", "a", "b", "b", "b", "c"]);
        assert_eq!(queue.delete_dup(), Ok(5));
        assert_eq!(contents(&queue), vec!["c"]);

        let mut queue = queue_of(&["a", "b", "b", "c"]);
        assert_eq!(queue.delete_dup(), Ok(2));
        assert_eq!(contents(&queue), vec!["a", "c"]);

        let mut queue = Queue::new();
        assert_eq!(queue.delete_dup(), Ok(0));
    }

    #[cfg(not(feature = "checked"))]
    #[test]
    fn delete_dup_unsorted_collapses_adjacent_runs() {
        let mut queue = queue_of(&["b", "a", "a", "c", "b", "b"]);
        assert_eq!(queue.delete_dup(), Ok(4));
        assert_eq!(contents(&queue), vec!["b", "c"]);

        let mut queue = queue_of(&["b", "a", "b"]);
        assert_eq!(queue.delete_dup(), Ok(0));
        assert_eq!(contents(&queue), vec!["b", "a", "b"]);
    }

    #[cfg(feature = "checked")]
    #[test]
    fn delete_dup_rejects_unsorted() {
        let mut queue = queue_of(&["b", "a", "a"]);
        assert_eq!(queue.delete_dup(), Err(Error::Unsorted));
        assert_eq!(contents(&queue), vec!["b", "a", "a"]);
    }

    #[test]
    fn swap_and_reverse() {
        let mut queue = queue_of(&["1", "2", "3", "4", "5"]);
        queue.swap();
        assert_eq!(contents(&queue), vec!["2", "1", "4", "3", "5"]);

        queue.reverse();
        assert_eq!(contents(&queue), vec!["5", "3", "4", "1", "2"]);

        let mut queue = Queue::new();
        queue.swap();
        queue.reverse();
        assert!(queue.is_empty());
    }

    #[test]
    fn reverse_k() {
        let mut queue = queue_of(&["1", "2", "3", "4", "5"]);
        assert_eq!(
            queue.reverse_k(0),
            Err(Error::invalid("group size must be positive"))
        );
        assert_eq!(queue.reverse_k(1), Ok(()));
        assert_eq!(contents(&queue), vec!["1", "2", "3", "4", "5"]);

        assert_eq!(queue.reverse_k(3), Ok(()));
        assert_eq!(contents(&queue), vec!["3", "2", "1", "4", "5"]);
    }

    #[test]
    fn sort() {
        let mut queue = queue_of(&["pear", "apple", "fig", "apple"]);
        queue.sort(false);
        assert_eq!(contents(&queue), vec!["apple", "apple", "fig", "pear"]);

        queue.sort(true);
        assert_eq!(contents(&queue), vec!["pear", "fig", "apple", "apple"]);

        // Byte-wise order: uppercase sorts before lowercase.
        let mut queue = queue_of(&["b", "B", "a", "A"]);
        queue.sort(false);
        assert_eq!(contents(&queue), vec!["A", "B", "a", "b"]);
    }

    #[test]
    fn ascend_and_descend() {
        let mut queue = Queue::new();
        assert_eq!(queue.ascend(), 0);
        assert_eq!(queue.descend(), 0);

        let mut queue = queue_of(&["a", "d", "b", "c", "b"]);
        assert_eq!(queue.ascend(), 3);
        assert_eq!(contents(&queue), vec!["a", "b", "b"]);

        let mut queue = queue_of(&["a", "d", "b", "c", "b"]);
        assert_eq!(queue.descend(), 3);
        assert_eq!(contents(&queue), vec!["d", "c", "b"]);
    }

    #[test]
    fn append_and_clone() {
        let mut queue = queue_of(&["a"]);
        let mut other = queue_of(&["b", "c"]);
        queue.append(&mut other);
        assert!(other.is_empty());
        assert_eq!(contents(&queue), vec!["a", "b", "c"]);

        let cloned = queue.clone();
        assert_eq!(cloned, queue);
        assert_eq!(format!("{:?}", cloned), r#"Queue(["a", "b", "c"])"#);
    }
}
