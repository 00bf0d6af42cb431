use crate::list::Node;
use std::fmt;

/// A string payload detached from any queue, still carrying the node it was
/// linked through.
///
/// An `Element` is handed out by [`Queue::remove_head`](crate::Queue::remove_head)
/// and friends. Its links are dangling and never read again; the payload and
/// the node are released together, exactly once, when the `Element` is
/// dropped or passed to [`Element::release`].
pub struct Element {
    node: Box<Node<String>>,
}

impl Element {
    pub(crate) fn from_node(node: Box<Node<String>>) -> Self {
        Self { node }
    }

    /// Returns the payload.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// queue.insert_tail("hello").unwrap();
    /// let element = queue.take_head().unwrap();
    /// assert_eq!(element.value(), "hello");
    /// ```
    #[inline]
    pub fn value(&self) -> &str {
        &self.node.element
    }

    /// Consumes the element and reclaims its payload. The node itself is
    /// released.
    pub fn into_value(self) -> String {
        self.node.into_element()
    }

    /// Releases the payload and the node.
    ///
    /// This is the same as dropping the element; it only exists to make the
    /// release explicit at call sites.
    #[inline]
    pub fn release(self) {
        drop(self)
    }
}

impl AsRef<str> for Element {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl PartialEq<str> for Element {
    fn eq(&self, other: &str) -> bool {
        self.value() == other
    }
}

impl PartialEq<&str> for Element {
    fn eq(&self, other: &&str) -> bool {
        self.value() == *other
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Element").field(&self.value()).finish()
    }
}

// SAFETY: the links of a detached node are never dereferenced, so the
// element behaves like the `String` it owns.
unsafe impl Send for Element {}

unsafe impl Sync for Element {}
