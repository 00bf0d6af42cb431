use crate::list::{List, Node};
use std::fmt;
use std::ptr::NonNull;

/// A read-only position in a `List`.
///
/// A list of length *n* has *n* + 1 positions: the elements at indices
/// 0..*n*, and the ghost node at index *n*. The cyclic moves pass through the
/// ghost node; the checked moves refuse to.
///
/// # Examples
///
/// ```
/// use cyclic_queue::List;
/// use std::iter::FromIterator;
///
/// let list = List::from_iter(["a", "b", "c"]);
///
/// let cursor = list.cursor_start();
/// assert_eq!(cursor.current(), Some(&"a"));
/// assert_eq!(cursor.peek_next(), Some(&"b"));
///
/// let mut cursor = list.cursor_end();
/// assert_eq!(cursor.current(), None);
/// assert!(cursor.move_next().is_err());
/// cursor.move_next_cyclic();
/// assert_eq!(cursor.current(), Some(&"a"));
/// ```
pub struct Cursor<'a, T: 'a> {
    pub(crate) current: NonNull<Node<T>>,
    pub(crate) list: &'a List<T>,
}

/// A position in a `List` that can edit the ring around it.
///
/// Removing at the cursor moves it to the successor of the removed node, so
/// a forward walk can remove nodes as it goes without losing its place.
///
/// The list stays mutably borrowed while the cursor lives:
///
/// ```compile_fail
/// use cyclic_queue::List;
/// use std::iter::FromIterator;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let mut cursor = list.cursor_start_mut();
/// println!("{:?}", list.back());
/// println!("{:?}", cursor.current());
/// ```
pub struct CursorMut<'a, T: 'a> {
    pub(crate) current: NonNull<Node<T>>,
    pub(crate) list: &'a mut List<T>,
}

macro_rules! impl_cursor {
    ($CURSOR:ident) => {
        impl<'a, T: 'a> $CURSOR<'a, T> {
            pub(crate) fn is_ghost_node(&self) -> bool {
                self.current == self.list.ghost_node()
            }

            pub(crate) fn is_front_node(&self) -> bool {
                self.prev_node() == self.list.ghost_node()
            }

            pub(crate) fn next_node(&self) -> NonNull<Node<T>> {
                // SAFETY: every node of a ring has a live successor.
                unsafe { self.current.as_ref().next }
            }

            pub(crate) fn prev_node(&self) -> NonNull<Node<T>> {
                // SAFETY: every node of a ring has a live predecessor.
                unsafe { self.current.as_ref().prev }
            }

            /// Returns `true` if the `List` is empty.
            pub fn is_empty(&self) -> bool {
                self.list.is_empty()
            }

            /// Steps to the next position, from the back element onto the
            /// ghost node and from the ghost node onto the front element.
            pub fn move_next_cyclic(&mut self) {
                self.current = self.next_node();
            }

            /// Steps to the previous position, wrapping through the ghost node.
            pub fn move_prev_cyclic(&mut self) {
                self.current = self.prev_node();
            }

            /// Steps to the next position, unless the cursor is at the ghost
            /// node.
            pub fn move_next(&mut self) -> Result<(), &'static str> {
                if self.is_ghost_node() {
                    return Err("`move_next` across ghost boundary");
                }
                self.move_next_cyclic();
                Ok(())
            }

            /// Steps to the previous position, unless the cursor is at the
            /// front node (or at the ghost node of an empty list).
            pub fn move_prev(&mut self) -> Result<(), &'static str> {
                if self.is_front_node() {
                    return Err("`move_prev` across ghost boundary");
                }
                self.move_prev_cyclic();
                Ok(())
            }

            /// Steps forward `steps` times. On error, returns how many steps
            /// were taken; the cursor is then at the ghost node.
            pub fn seek_forward(&mut self, steps: usize) -> Result<(), usize> {
                (0..steps).try_for_each(|i| self.move_next().map_err(|_| i))
            }

            /// Steps backward `steps` times. On error, returns how many steps
            /// were taken; the cursor is then at the front node.
            pub fn seek_backward(&mut self, steps: usize) -> Result<(), usize> {
                (0..steps).try_for_each(|i| self.move_prev().map_err(|_| i))
            }

            /// Moves to index `target`. If `target > len`, the cursor does not
            /// move and the excess `target - len` is returned.
            ///
            /// This operation should compute in *O*(*n*) time.
            pub fn seek_to(&mut self, target: usize) -> Result<(), usize> {
                let current = self.current;
                self.move_to_start();
                self.seek_forward(target).map_err(|reached| {
                    self.current = current;
                    target - reached
                })
            }

            #[inline]
            pub fn move_to_start(&mut self) {
                self.current = self.list.front_node();
            }

            #[inline]
            pub fn move_to_end(&mut self) {
                self.current = self.list.ghost_node();
            }

            fn element_at(&self, node: NonNull<Node<T>>) -> Option<NonNull<T>> {
                if node == self.list.ghost_node() {
                    return None;
                }
                // SAFETY: non-ghost nodes are live and hold an element; no
                // reference to the node is created here.
                unsafe {
                    let elt = std::ptr::addr_of_mut!((*node.as_ptr()).element);
                    Some(NonNull::new_unchecked(elt))
                }
            }

            fn peek_next_element(&self) -> Option<NonNull<T>> {
                if self.is_ghost_node() {
                    return None;
                }
                self.element_at(self.next_node())
            }
        }

        impl<'a, T: fmt::Debug + 'a> fmt::Debug for $CURSOR<'a, T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($CURSOR))
                    .field("list", &self.list)
                    .field("current", &self.current())
                    .finish()
            }
        }
    };
}

impl_cursor!(Cursor);
impl_cursor!(CursorMut);

impl<'a, T: 'a> Cursor<'a, T> {
    pub(crate) fn new(list: &'a List<T>, current: NonNull<Node<T>>) -> Self {
        Self { current, list }
    }

    /// The element at the cursor, or `None` at the ghost node.
    ///
    /// The reference borrows the list, not the cursor, so it outlives moves
    /// of the cursor.
    pub fn current(&self) -> Option<&'a T> {
        // SAFETY: the list is shared for `'a`, so no node is freed meanwhile.
        self.element_at(self.current).map(|elt| unsafe { &*elt.as_ptr() })
    }

    /// The element before the cursor, or `None` at the front node.
    pub fn previous(&self) -> Option<&'a T> {
        // SAFETY: as for `current`.
        self.element_at(self.prev_node()).map(|elt| unsafe { &*elt.as_ptr() })
    }

    /// The element after the cursor, without wrapping: `None` at the back
    /// node and at the ghost node.
    pub fn peek_next(&self) -> Option<&'a T> {
        // SAFETY: as for `current`.
        self.peek_next_element().map(|elt| unsafe { &*elt.as_ptr() })
    }
}

impl<'a, T: 'a> CursorMut<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>, current: NonNull<Node<T>>) -> Self {
        Self { current, list }
    }

    /// The element at the cursor, or `None` at the ghost node.
    ///
    /// The reference borrows the cursor, so the node cannot be unlinked while
    /// it is held:
    ///
    /// ```compile_fail
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([String::from("a")]);
    /// let mut cursor = list.cursor_start_mut();
    /// let held = cursor.current().unwrap();
    /// drop(cursor.remove());
    /// println!("{}", held);
    /// ```
    pub fn current(&self) -> Option<&T> {
        // SAFETY: the node stays linked while `self` is borrowed.
        self.element_at(self.current).map(|elt| unsafe { &*elt.as_ptr() })
    }

    /// The element before the cursor, or `None` at the front node.
    pub fn previous(&self) -> Option<&T> {
        // SAFETY: as for `current`.
        self.element_at(self.prev_node()).map(|elt| unsafe { &*elt.as_ptr() })
    }

    /// The element after the cursor, without wrapping: `None` at the back
    /// node and at the ghost node.
    pub fn peek_next(&self) -> Option<&T> {
        // SAFETY: as for `current`.
        self.peek_next_element().map(|elt| unsafe { &*elt.as_ptr() })
    }

    /// The element at the cursor, mutably, or `None` at the ghost node.
    pub fn current_mut(&mut self) -> Option<&mut T> {
        // SAFETY: `self` is borrowed uniquely for the lifetime of the result.
        self.element_at(self.current).map(|elt| unsafe { &mut *elt.as_ptr() })
    }

    /// The element before the cursor, mutably, or `None` at the front node.
    pub fn previous_mut(&mut self) -> Option<&mut T> {
        // SAFETY: as for `current_mut`.
        self.element_at(self.prev_node()).map(|elt| unsafe { &mut *elt.as_ptr() })
    }

    /// Borrows the whole list read-only.
    pub fn view(&self) -> &List<T> {
        self.list
    }

    /// Links `item` right before the cursor. The cursor does not move.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(["a", "c"]);
    /// let mut cursor = list.cursor_mut(1);
    /// cursor.insert("b");
    /// assert_eq!(cursor.current(), Some(&"c"));
    /// assert_eq!(cursor.previous(), Some(&"b"));
    /// ```
    pub fn insert(&mut self, item: T) {
        let node = Node::new_detached(item);
        // SAFETY: `current.prev` and `current` are adjacent nodes of the list.
        unsafe { self.list.attach_node(self.prev_node(), self.current, node) };
    }

    /// Unlinks the element at the cursor and returns it, moving the cursor to
    /// the successor. Returns `None` at the ghost node.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(1..=6);
    /// let mut cursor = list.cursor_start_mut();
    /// while let Some(&x) = cursor.current() {
    ///     if x % 2 == 0 {
    ///         cursor.remove();
    ///     } else {
    ///         cursor.move_next_cyclic();
    ///     }
    /// }
    /// assert_eq!(Vec::from_iter(list), vec![1, 3, 5]);
    /// ```
    pub fn remove(&mut self) -> Option<T> {
        self.remove_node().map(Node::into_element)
    }

    /// Like [`CursorMut::remove`], but hands out the node itself.
    pub(crate) fn remove_node(&mut self) -> Option<Box<Node<T>>> {
        if self.is_ghost_node() {
            return None;
        }
        let next = self.next_node();
        let node = std::mem::replace(&mut self.current, next);
        // SAFETY: `node` is a non-ghost node of the list.
        Some(unsafe { self.list.detach_node(node) })
    }

    /// Unlinks the element before the cursor and returns it, or `None` at the
    /// front node. The cursor stays where it is.
    pub fn backspace(&mut self) -> Option<T> {
        self.move_prev().ok()?;
        self.remove()
    }

    /// Relinks the node at the cursor to the back of `other` and moves the
    /// cursor to its successor. Returns `false` at the ghost node.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time; the node is neither
    /// freed nor reallocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(["a", "b", "c"]);
    /// let mut other = List::from_iter(["x"]);
    /// let mut cursor = list.cursor_mut(1);
    ///
    /// assert!(cursor.move_to_back(&mut other));
    /// assert_eq!(cursor.current(), Some(&"c"));
    /// assert_eq!(Vec::from_iter(list), vec!["a", "c"]);
    /// assert_eq!(Vec::from_iter(other), vec!["x", "b"]);
    /// ```
    pub fn move_to_back(&mut self, other: &mut List<T>) -> bool {
        if self.is_ghost_node() {
            return false;
        }
        let next = self.next_node();
        let node = std::mem::replace(&mut self.current, next);
        // SAFETY: `node` is a non-ghost node of this list, and `other` is a
        // different list since both are borrowed mutably.
        unsafe { self.list.unlink_node(node) };
        other.push_back_node(node);
        true
    }

    /// Moves the cursor node and everything after it into a new list. The
    /// cursor ends at the ghost node. Returns `None` at the ghost node.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(0..5);
    /// let tail = list.cursor_mut(3).split().unwrap();
    /// assert_eq!(Vec::from_iter(tail), vec![3, 4]);
    /// assert_eq!(Vec::from_iter(list), vec![0, 1, 2]);
    /// ```
    pub fn split(&mut self) -> Option<List<T>> {
        if self.is_ghost_node() {
            return None;
        }
        let front = std::mem::replace(&mut self.current, self.list.ghost_node());
        // SAFETY: `front` is a non-ghost node, so front..=back is a chain.
        unsafe {
            let back = self.list.back_node();
            Some(List::from_detached(self.list.detach_nodes(front, back)))
        }
    }

    /// Moves everything before the cursor into a new list. The cursor does
    /// not move. Returns `None` at the front node.
    pub fn split_before(&mut self) -> Option<List<T>> {
        if self.is_front_node() {
            return None;
        }
        // SAFETY: the cursor is not at the front node, so front..=prev is a
        // chain.
        unsafe {
            let (front, back) = (self.list.front_node(), self.prev_node());
            Some(List::from_detached(self.list.detach_nodes(front, back)))
        }
    }

    /// Moves the prefix ending at the cursor, inclusive, into a new list.
    /// The cursor moves to the successor, which is the new front of this list.
    /// Returns `None` at the ghost node.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(0..6);
    /// let mut cursor = list.cursor_mut(2);
    ///
    /// let front = cursor.cut().unwrap();
    /// assert_eq!(cursor.current(), Some(&3));
    ///
    /// assert_eq!(Vec::from_iter(front), vec![0, 1, 2]);
    /// assert_eq!(Vec::from_iter(list), vec![3, 4, 5]);
    /// ```
    pub fn cut(&mut self) -> Option<List<T>> {
        if self.is_ghost_node() {
            return None;
        }
        let next = self.next_node();
        let back = std::mem::replace(&mut self.current, next);
        // SAFETY: `back` is a non-ghost node, so front..=back is a chain.
        unsafe {
            let front = self.list.front_node();
            Some(List::from_detached(self.list.detach_nodes(front, back)))
        }
    }

    /// Links every node of `other` right before the cursor.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn splice(&mut self, other: List<T>) {
        if let Some(detached) = other.into_detached() {
            // SAFETY: `current.prev` and `current` are adjacent nodes of the list.
            unsafe {
                let prev = self.prev_node();
                self.list.attach_nodes(prev, self.current, detached);
            }
        }
    }
}

unsafe impl<T: Sync> Send for Cursor<'_, T> {}

unsafe impl<T: Sync> Sync for Cursor<'_, T> {}

unsafe impl<T: Send> Send for CursorMut<'_, T> {}

unsafe impl<T: Sync> Sync for CursorMut<'_, T> {}
