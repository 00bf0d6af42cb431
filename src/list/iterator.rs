use crate::list::{List, Node};
use std::fmt;
use std::iter::{FromIterator, FusedIterator};
use std::marker::PhantomData;
use std::ptr::NonNull;

/// Borrowing iterator over a `List`, front to back.
///
/// The remaining elements are the half-open node range `head..tail`; `tail`
/// starts at the ghost node. Both ends move towards each other, so the
/// iterator is double-ended and stops at the ghost node instead of wrapping.
///
/// # Examples
///
/// The list cannot be mutated while an `Iter` is alive.
///
/// ```compile_fail
/// use cyclic_queue::List;
/// use std::iter::FromIterator;
///
/// let mut list = List::from_iter(["a", "b"]);
/// let mut iter = list.iter();
/// list.push_back("c");
/// println!("{:?}", iter.next());
/// ```
pub struct Iter<'a, T: 'a> {
    head: NonNull<Node<T>>,
    tail: NonNull<Node<T>>,
    _marker: PhantomData<&'a List<T>>,
}

/// Borrowing iterator over a `List` with mutable access to the elements, but
/// not to the links.
pub struct IterMut<'a, T: 'a> {
    head: NonNull<Node<T>>,
    tail: NonNull<Node<T>>,
    _marker: PhantomData<&'a mut List<T>>,
}

/// Owning iterator over a `List`, created by [`List::into_iter`].
///
/// Elements not yet yielded are dropped with the iterator.
pub struct IntoIter<T> {
    list: List<T>,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(list: &'a List<T>) -> Self {
        Self {
            head: list.front_node(),
            tail: list.ghost_node(),
            _marker: PhantomData,
        }
    }
}

impl<'a, T: 'a> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            head: self.head,
            tail: self.tail,
            _marker: PhantomData,
        }
    }
}

impl<'a, T: 'a> IterMut<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>) -> Self {
        Self {
            head: list.front_node(),
            tail: list.ghost_node(),
            _marker: PhantomData,
        }
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.head == self.tail {
            return None;
        }
        // SAFETY: `head..tail` is a non-empty range of live nodes, so `head`
        // holds an element.
        let node = unsafe { self.head.as_ref() };
        self.head = node.next;
        Some(&node.element)
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.head == self.tail {
            return None;
        }
        // SAFETY: the range is non-empty, so `tail.prev` is a node holding an
        // element.
        let node = unsafe { self.tail.as_ref().prev.as_ref() };
        self.tail = NonNull::from(node);
        Some(&node.element)
    }
}

impl<'a, T: 'a> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.head == self.tail {
            return None;
        }
        // SAFETY: as for `Iter`. Each node leaves the range once, so the
        // handed out references never alias.
        let node = unsafe { self.head.as_mut() };
        self.head = node.next;
        Some(&mut node.element)
    }
}

impl<'a, T: 'a> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.head == self.tail {
            return None;
        }
        // SAFETY: as for `Iter`.
        unsafe {
            self.tail = self.tail.as_ref().prev;
            Some(&mut self.tail.as_mut().element)
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back()
    }
}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

impl<'a, T: 'a> FusedIterator for IterMut<'a, T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.list).finish()
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elt in iter {
            self.push_back(elt);
        }
    }
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}

unsafe impl<T: Sync> Sync for Iter<'_, T> {}

unsafe impl<T: Send> Send for IterMut<'_, T> {}

unsafe impl<T: Sync> Sync for IterMut<'_, T> {}
