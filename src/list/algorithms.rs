use crate::list::List;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

pub use self::drain::{Drain, DrainFilter};

mod drain;
mod prune;
mod reorder;
mod sort;

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: PartialOrd> PartialOrd for List<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for List<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0_usize;
        for elt in self {
            elt.hash(state);
            len += 1;
        }
        len.hash(state);
    }
}

impl<T> List<T> {
    /// Returns `true` if the `List` contains an element equal to the given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_back(0);
    /// list.push_back(1);
    /// list.push_back(2);
    ///
    /// assert_eq!(list.contains(&0), true);
    /// assert_eq!(list.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }

    /// Returns `true` if every element is less than or equal to its successor.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// assert!(List::from_iter([1, 1, 2]).is_sorted());
    /// assert!(!List::from_iter([2, 1]).is_sorted());
    /// assert!(List::<i32>::new().is_sorted());
    /// ```
    pub fn is_sorted(&self) -> bool
    where
        T: PartialOrd,
    {
        self.iter().zip(self.iter().skip(1)).all(|(a, b)| a <= b)
    }

    /// Returns an iterator that removes every element of the list, front to
    /// back. Elements not yet yielded are dropped with the iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// assert_eq!(list.drain().next(), Some(1));
    /// assert!(list.is_empty());
    /// ```
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain::new(self)
    }

    /// Returns an iterator that walks the list front to back and removes the
    /// elements for which `filter` returns `true`, yielding them. The walk
    /// keeps its place across removals.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(1..=6);
    /// let evens: Vec<_> = list.drain_filter(|x| *x % 2 == 0).collect();
    /// assert_eq!(evens, vec![2, 4, 6]);
    /// assert_eq!(list.into_iter().collect::<Vec<_>>(), vec![1, 3, 5]);
    /// ```
    pub fn drain_filter<F>(&mut self, filter: F) -> DrainFilter<'_, T, F>
    where
        F: FnMut(&mut T) -> bool,
    {
        DrainFilter::new(self, filter)
    }
}
