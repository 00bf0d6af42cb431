use std::alloc::{self, Layout};
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::error::{Error, Result};
use crate::list::cursor::{Cursor, CursorMut};
use crate::{IntoIter, Iter, IterMut};

pub use self::algorithms::{Drain, DrainFilter};

pub mod cursor;
pub mod iterator;

mod algorithms;

/// A doubly-linked ring of heap nodes, closed by a payload-less ghost node.
///
/// Walking forward from the ghost node visits every element front to back
/// and returns to the ghost node; walking backward visits them back to front.
/// The ghost node is the only node an empty list owns.
///
/// Linking, unlinking, splicing and cutting at a known node take *O*(1) time.
/// The length is not stored, so [`List::len`] walks the ring.
///
/// # Naming Conventions
///
/// - `front..=back`: a closed range of nodes, both ends included;
/// - `start..end`: a half-open range of nodes, `end` excluded (possibly the
///   ghost node).
pub struct List<T> {
    ghost: NonNull<Node<Erased>>,
    _marker: PhantomData<Box<Node<T>>>,
}

/// A node of the ring.
///
/// The links come first, so the ghost node, a `Node<Erased>`, can be viewed
/// as a `Node<T>` as long as its `element` is never read.
#[repr(C)]
pub(crate) struct Node<T> {
    pub(crate) next: NonNull<Node<T>>,
    pub(crate) prev: NonNull<Node<T>>,
    pub(crate) element: T,
}

struct Erased;

/// A chain of nodes `front..=back` taken out of a ring. `front.prev` and
/// `back.next` are stale until the chain is attached somewhere.
pub(crate) struct DetachedNodes<T> {
    pub(crate) front: NonNull<Node<T>>,
    pub(crate) back: NonNull<Node<T>>,
    _marker: PhantomData<Box<Node<T>>>,
}

// Link surgery. Callers uphold the ring invariants.
impl<T> List<T> {
    pub(crate) fn ghost_node(&self) -> NonNull<Node<T>> {
        self.ghost.cast()
    }

    pub(crate) fn front_node(&self) -> NonNull<Node<T>> {
        // SAFETY: the ghost node is live for the whole life of the list.
        unsafe { self.ghost_node().as_ref().next }
    }

    pub(crate) fn back_node(&self) -> NonNull<Node<T>> {
        // SAFETY: the ghost node is live for the whole life of the list.
        unsafe { self.ghost_node().as_ref().prev }
    }

    /// Close the ring over `node`. The links of `node` itself are left as
    /// they were and must not be followed afterwards.
    ///
    /// `node` must be a non-ghost node of this list.
    pub(crate) unsafe fn unlink_node(&mut self, node: NonNull<Node<T>>) {
        connect(node.as_ref().prev, node.as_ref().next);
    }

    /// Unlink `node` and take back ownership of its allocation.
    ///
    /// `node` must be a non-ghost node of this list.
    pub(crate) unsafe fn detach_node(&mut self, node: NonNull<Node<T>>) -> Box<Node<T>> {
        self.unlink_node(node);
        Box::from_raw(node.as_ptr())
    }

    /// Link the detached `node` between the adjacent nodes `prev` and `next`.
    pub(crate) unsafe fn attach_node(
        &mut self,
        prev: NonNull<Node<T>>,
        next: NonNull<Node<T>>,
        node: NonNull<Node<T>>,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        connect(prev, node);
        connect(node, next);
    }

    /// Take the chain `front..=back` out of the ring.
    ///
    /// `front` must not lie after `back`, and neither may be the ghost node.
    pub(crate) unsafe fn detach_nodes(
        &mut self,
        front: NonNull<Node<T>>,
        back: NonNull<Node<T>>,
    ) -> DetachedNodes<T> {
        connect(front.as_ref().prev, back.as_ref().next);
        DetachedNodes::new(front, back)
    }

    /// Link a detached chain between the adjacent nodes `prev` and `next`.
    pub(crate) unsafe fn attach_nodes(
        &mut self,
        prev: NonNull<Node<T>>,
        next: NonNull<Node<T>>,
        detached: DetachedNodes<T>,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        connect(prev, detached.front);
        connect(detached.back, next);
    }

    /// Take every node out of the ring, or `None` if there is none.
    pub(crate) fn detach_all_nodes(&mut self) -> Option<DetachedNodes<T>> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: front..=back spans exactly the non-ghost nodes.
        unsafe { Some(self.detach_nodes(self.front_node(), self.back_node())) }
    }

    pub(crate) fn from_detached(detached: DetachedNodes<T>) -> Self {
        let mut list = List::new();
        let ghost = list.ghost_node();
        // SAFETY: the ghost node of an empty list is adjacent to itself.
        unsafe { list.attach_nodes(ghost, ghost, detached) };
        list
    }

    pub(crate) fn into_detached(mut self) -> Option<DetachedNodes<T>> {
        self.detach_all_nodes()
    }

    /// Link an already allocated, detached node at the back.
    pub(crate) fn push_back_node(&mut self, node: NonNull<Node<T>>) {
        // SAFETY: the back node and the ghost node are adjacent.
        unsafe { self.attach_node(self.back_node(), self.ghost_node(), node) }
    }

    pub(crate) fn pop_front_node(&mut self) -> Option<Box<Node<T>>> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, so the front node holds an element.
        Some(unsafe { self.detach_node(self.front_node()) })
    }

    pub(crate) fn pop_back_node(&mut self) -> Option<Box<Node<T>>> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, so the back node holds an element.
        Some(unsafe { self.detach_node(self.back_node()) })
    }

    /// Walk the ring once from the ghost node, checking that every `next`
    /// link is answered by the matching `prev` link.
    pub(crate) fn is_well_linked(&self) -> bool {
        let ghost = self.ghost_node();
        let mut node = ghost;
        // SAFETY: only nodes reachable from the ghost node are visited.
        unsafe {
            loop {
                let next = node.as_ref().next;
                if next.as_ref().prev != node {
                    return false;
                }
                node = next;
                if node == ghost {
                    return true;
                }
            }
        }
    }
}

impl<T> List<T> {
    /// Create an empty `List`.
    ///
    /// Only the ghost node is allocated.
    #[inline]
    pub fn new() -> Self {
        Self {
            ghost: new_ghost(),
            _marker: PhantomData,
        }
    }

    /// Returns `true` if the ghost node is linked to itself.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.front_node() == self.ghost_node()
    }

    /// Returns `true` if the `List` holds exactly one element.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::new();
    /// assert!(!list.is_singular());
    /// list.push_back("only");
    /// assert!(list.is_singular());
    /// list.push_back("second");
    /// assert!(!list.is_singular());
    /// ```
    #[inline]
    pub fn is_singular(&self) -> bool {
        !self.is_empty() && self.front_node() == self.back_node()
    }

    /// Counts the elements by walking the ring.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Drops every element, front to back.
    pub fn clear(&mut self) {
        while self.pop_front_node().is_some() {}
    }

    /// Returns the front element, or `None` if the list is empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.cursor_start().current()
    }

    /// Returns the front element mutably, or `None` if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2]);
    /// if let Some(front) = list.front_mut() {
    ///     *front = 5;
    /// }
    /// assert_eq!(list.front(), Some(&5));
    /// ```
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the front node of a non-empty list holds an element.
        unsafe { Some(&mut self.front_node().as_mut().element) }
    }

    /// Returns the back element, or `None` if the list is empty.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.cursor_end().previous()
    }

    /// Returns the back element mutably, or `None` if the list is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the back node of a non-empty list holds an element.
        unsafe { Some(&mut self.back_node().as_mut().element) }
    }

    /// Links `elt` in front of the first element.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn push_front(&mut self, elt: T) {
        self.cursor_start_mut().insert(elt);
    }

    /// Like [`List::push_front`], but a failed node allocation is reported as
    /// `Error::OutOfMemory` instead of aborting. The list is unchanged on
    /// failure, and `elt` is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::new();
    /// list.try_push_front("b").unwrap();
    /// list.try_push_front("a").unwrap();
    /// assert_eq!(list.front(), Some(&"a"));
    /// ```
    pub fn try_push_front(&mut self, elt: T) -> Result<()> {
        let node = Node::try_new_detached(elt)?;
        // SAFETY: the ghost node and the front node are adjacent.
        unsafe { self.attach_node(self.ghost_node(), self.front_node(), node) };
        Ok(())
    }

    /// Unlinks the first element and returns it, or `None` if the list is
    /// empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn pop_front(&mut self) -> Option<T> {
        self.pop_front_node().map(Node::into_element)
    }

    /// Links `elt` after the last element.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn push_back(&mut self, elt: T) {
        self.push_back_node(Node::new_detached(elt));
    }

    /// Like [`List::push_back`], but a failed node allocation is reported as
    /// `Error::OutOfMemory` instead of aborting.
    pub fn try_push_back(&mut self, elt: T) -> Result<()> {
        let node = Node::try_new_detached(elt)?;
        self.push_back_node(node);
        Ok(())
    }

    /// Unlinks the last element and returns it, or `None` if the list is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.pop_back(), None);
    /// list.push_back(1);
    /// list.push_front(0);
    /// assert_eq!(list.pop_back(), Some(1));
    /// assert_eq!(list.pop_back(), Some(0));
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        self.cursor_end_mut().backspace()
    }

    /// Provides a cursor at index `at`; `at == len` is the ghost node.
    ///
    /// # Panics
    ///
    /// Panics if `at > len`.
    pub fn cursor(&self, at: usize) -> Cursor<'_, T> {
        let mut cursor = self.cursor_start();
        cursor
            .seek_to(at)
            .expect("Cannot create cursor at a nonexistent index");
        cursor
    }

    /// Provides a cursor at the first node, or at the ghost node if the list
    /// is empty.
    pub fn cursor_start(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.front_node())
    }

    /// Provides a cursor at the ghost node.
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.ghost_node())
    }

    /// Provides an editing cursor at index `at`; `at == len` is the ghost
    /// node.
    ///
    /// # Panics
    ///
    /// Panics if `at > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(["a", "b", "c"]);
    /// assert_eq!(list.cursor_mut(1).remove(), Some("b"));
    /// assert_eq!(list.cursor_mut(2).current(), None);
    /// ```
    pub fn cursor_mut(&mut self, at: usize) -> CursorMut<'_, T> {
        let mut cursor = self.cursor_start_mut();
        cursor
            .seek_to(at)
            .expect("Cannot create cursor at a nonexistent index");
        cursor
    }

    /// Provides an editing cursor at the first node, or at the ghost node if
    /// the list is empty.
    pub fn cursor_start_mut(&mut self) -> CursorMut<'_, T> {
        let front = self.front_node();
        CursorMut::new(self, front)
    }

    /// Provides an editing cursor at the ghost node.
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T> {
        let ghost = self.ghost_node();
        CursorMut::new(self, ghost)
    }

    /// Iterates over the elements, front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Iterates over the elements, front to back, with mutable access.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Splices every node of `other` after the back of the list, leaving
    /// `other` empty. No node is allocated or freed.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(["a"]);
    /// let mut other = List::from_iter(["b", "c"]);
    /// list.append(&mut other);
    ///
    /// assert!(other.is_empty());
    /// assert_eq!(list.into_iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    /// ```
    pub fn append(&mut self, other: &mut Self) {
        if let Some(detached) = other.detach_all_nodes() {
            // SAFETY: the back node and the ghost node are adjacent.
            unsafe { self.attach_nodes(self.back_node(), self.ghost_node(), detached) }
        }
    }

    /// Splices every node of `other` before the front of the list, leaving
    /// `other` empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time and *O*(1) memory.
    pub fn prepend(&mut self, other: &mut Self) {
        if let Some(detached) = other.detach_all_nodes() {
            // SAFETY: the ghost node and the front node are adjacent.
            unsafe { self.attach_nodes(self.ghost_node(), self.front_node(), detached) }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Node<T> {
    /// Allocate a node whose links dangle until it is attached.
    pub(crate) fn new_detached(element: T) -> NonNull<Node<T>> {
        let node = Box::new(Node {
            next: NonNull::dangling(),
            prev: NonNull::dangling(),
            element,
        });
        NonNull::from(Box::leak(node))
    }

    /// Like [`Node::new_detached`], but returns `Error::OutOfMemory` when the
    /// allocator gives up.
    pub(crate) fn try_new_detached(element: T) -> Result<NonNull<Node<T>>> {
        let layout = Layout::new::<Node<T>>();
        // SAFETY: `Node<T>` holds two pointers, so the layout is never zero-sized.
        let ptr = unsafe { alloc::alloc(layout) } as *mut Node<T>;
        let node = match NonNull::new(ptr) {
            Some(node) => node,
            None => {
                log::warn!("node allocation of {} bytes failed", layout.size());
                return Err(Error::OutOfMemory {
                    size: layout.size(),
                });
            }
        };
        // SAFETY: `node` is fresh memory with the layout of `Node<T>`, which
        // `Box::from_raw` releases later.
        unsafe {
            node.as_ptr().write(Node {
                next: NonNull::dangling(),
                prev: NonNull::dangling(),
                element,
            });
        }
        Ok(node)
    }

    pub(crate) fn into_element(self: Box<Self>) -> T {
        self.element
    }
}

impl<T> DetachedNodes<T> {
    /// `front..=back` must be a chain of live nodes.
    unsafe fn new(front: NonNull<Node<T>>, back: NonNull<Node<T>>) -> Self {
        Self {
            front,
            back,
            _marker: PhantomData,
        }
    }
}

fn new_ghost() -> NonNull<Node<Erased>> {
    let ghost = Node::new_detached(Erased);
    // SAFETY: `ghost` is fresh and not shared yet.
    unsafe { connect(ghost, ghost) };
    ghost
}

/// Make `next` the successor of `prev`.
pub(crate) unsafe fn connect<T>(mut prev: NonNull<Node<T>>, mut next: NonNull<Node<T>>) {
    prev.as_mut().next = next;
    next.as_mut().prev = prev;
}

/// Unlink `node` and relink it right before `to`, within the same ring.
///
/// `node` and `to` must be distinct, and `node` must not be the ghost node.
pub(crate) unsafe fn move_node<T>(node: NonNull<Node<T>>, to: NonNull<Node<T>>) {
    connect(node.as_ref().prev, node.as_ref().next);
    connect(to.as_ref().prev, node);
    connect(node, to);
}

#[cfg(debug_assertions)]
fn assert_adjacent<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    // SAFETY: only called on live nodes.
    unsafe {
        assert_eq!(prev.as_ref().next, next);
        assert_eq!(next.as_ref().prev, prev);
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
        // SAFETY: the ghost node came from `new_ghost`, and nothing links to
        // it once the list is empty.
        unsafe { drop(Box::from_raw(self.ghost.as_ptr())) };
    }
}

unsafe impl<T: Send> Send for List<T> {}

unsafe impl<T: Sync> Sync for List<T> {}

// `List` and its read-only iterators must stay covariant in `T`.
#[allow(dead_code)]
fn assert_covariance() {
    fn a<'a>(x: List<&'static str>) -> List<&'a str> {
        x
    }
    fn b<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
    fn c<'a>(x: IntoIter<&'static str>) -> IntoIter<&'a str> {
        x
    }
}

#[cfg(test)]
mod tests {
    use crate::list::{move_node, List};
    use std::cell::RefCell;
    use std::iter::FromIterator;

    fn to_vec<T: Clone>(list: &List<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn empty_ring() {
        let mut list = List::<String>::new();
        assert!(list.is_empty());
        assert!(!list.is_singular());
        assert_eq!(list.len(), 0);
        assert_eq!(list.front_node(), list.ghost_node());
        assert_eq!(list.back_node(), list.ghost_node());
        assert!(list.is_well_linked());

        assert_eq!(list.front(), None);
        assert_eq!(list.back_mut(), None);
        assert_eq!(list.pop_front(), None);
        assert_eq!(list.pop_back(), None);
        assert!(list.pop_front_node().is_none());
    }

    #[test]
    fn drops_each_element_once() {
        struct Noisy<'a>(&'a str, &'a RefCell<Vec<&'a str>>);
        impl Drop for Noisy<'_> {
            fn drop(&mut self) {
                self.1.borrow_mut().push(self.0);
            }
        }

        let dropped = RefCell::new(Vec::new());
        let mut list = List::new();
        list.push_back(Noisy("b", &dropped));
        list.push_front(Noisy("a", &dropped));
        list.push_back(Noisy("c", &dropped));
        drop(list.pop_back());
        assert_eq!(*dropped.borrow(), vec!["c"]);
        drop(list);
        assert_eq!(*dropped.borrow(), vec!["c", "a", "b"]);
    }

    #[test]
    fn both_ends() {
        let mut list = List::new();
        list.push_back("b");
        list.try_push_back("c").unwrap();
        list.push_front("a");
        list.try_push_front("_").unwrap();
        assert_eq!(to_vec(&list), vec!["_", "a", "b", "c"]);
        assert_eq!(list.len(), 4);
        assert!(list.is_well_linked());

        *list.front_mut().unwrap() = "z";
        assert_eq!(list.front(), Some(&"z"));
        assert_eq!(list.back(), Some(&"c"));
        *list.back_mut().unwrap() = "y";
        assert_eq!(list.back(), Some(&"y"));
        *list.back_mut().unwrap() = "c";

        assert_eq!(list.pop_front(), Some("z"));
        assert_eq!(list.pop_back(), Some("c"));
        assert_eq!(list.pop_back(), Some("b"));
        assert!(list.is_singular());
        assert_eq!(list.pop_front(), Some("a"));
        assert!(list.is_empty());
        assert!(list.is_well_linked());
    }

    #[test]
    fn ends_of_empty_list() {
        let mut list = List::<i32>::new();
        assert_eq!(list.front_mut(), None);
        assert_eq!(list.back_mut(), None);
        list.push_back(1);
        *list.back_mut().unwrap() += 1;
        assert_eq!(list.front_mut(), Some(&mut 2));
    }

    #[test]
    fn append_and_prepend() {
        let mut list = List::from_iter(["c"]);
        let mut other = List::from_iter(["a", "b"]);
        list.prepend(&mut other);
        assert!(other.is_empty());
        assert_eq!(to_vec(&list), vec!["a", "b", "c"]);

        let mut other = List::from_iter(["d"]);
        list.append(&mut other);
        list.append(&mut List::new());
        list.prepend(&mut List::new());
        assert_eq!(to_vec(&list), vec!["a", "b", "c", "d"]);
        assert!(list.is_well_linked());
        assert!(other.is_well_linked());

        let mut empty = List::new();
        empty.append(&mut list);
        assert!(list.is_empty());
        assert_eq!(empty.len(), 4);
    }

    #[test]
    fn node_surgery() {
        let mut list = List::from_iter(0..4);
        let front = list.front_node();
        let back = list.back_node();
        unsafe { move_node(back, front) };
        assert_eq!(to_vec(&list), vec![3, 0, 1, 2]);
        assert!(list.is_well_linked());

        let node = list.pop_back_node().unwrap();
        assert_eq!(node.into_element(), 2);

        let detached = list.detach_all_nodes().unwrap();
        assert!(list.is_empty());
        let list = List::from_detached(detached);
        assert_eq!(to_vec(&list), vec![3, 0, 1]);
        assert!(list.is_well_linked());
    }

    #[test]
    fn debug_format() {
        let list = List::from_iter(["x", "y"]);
        assert_eq!(format!("{:?}", list), r#"["x", "y"]"#);
    }
}
