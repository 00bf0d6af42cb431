use crate::List;

impl<T> List<T> {
    /// Removes the middle element and returns it, or `None` if the list is
    /// empty.
    ///
    /// For a list of length *n* the removed element is the one at index
    /// *n* / 2 (rounded down), that is the later of the two middle elements
    /// when *n* is even.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(["a", "b", "c"]);
    /// assert_eq!(list.remove_middle(), Some("b"));
    ///
    /// let mut list = List::from_iter([1, 2, 3, 4]);
    /// assert_eq!(list.remove_middle(), Some(3));
    /// assert_eq!(list.into_iter().collect::<Vec<_>>(), vec![1, 2, 4]);
    /// ```
    pub fn remove_middle(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let mid = self.len() / 2;
        self.cursor_mut(mid).remove()
    }

    /// Removes every element that belongs to a run of adjacent equal
    /// elements, and returns how many elements were removed. Elements without
    /// an equal neighbour are kept.
    ///
    /// The list is expected to be sorted, so that equal elements are adjacent;
    /// on an unsorted list only adjacent runs are collapsed.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(["a", "a", "b", "b", "b", "c"]);
    /// assert_eq!(list.dedup_runs(), 5);
    /// assert_eq!(list.into_iter().collect::<Vec<_>>(), vec!["c"]);
    /// ```
    pub fn dedup_runs(&mut self) -> usize
    where
        T: PartialEq,
    {
        let mut cursor = self.cursor_start_mut();
        let (mut in_run, mut removed) = (false, 0);
        loop {
            let matched = match cursor.current() {
                Some(current) => cursor.peek_next() == Some(current),
                None => break,
            };
            // The last element of a run does not match its successor, but it
            // is still removed since the previous comparison matched.
            if matched || in_run {
                cursor.remove();
                removed += 1;
            } else {
                cursor.move_next_cyclic();
            }
            in_run = matched;
        }
        removed
    }

    /// Walks the list from back to front and removes every element for which
    /// `dominated(element, kept)` is `true`, where `kept` is the nearest
    /// element to its right that survived. Returns the number of remaining
    /// elements.
    ///
    /// The back element is always kept. Each element is compared exactly once.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn retain_monotonic_by<F>(&mut self, mut dominated: F) -> usize
    where
        F: FnMut(&T, &T) -> bool,
    {
        let ghost = self.ghost_node();
        let mut kept = self.back_node();
        if kept == ghost {
            return 0;
        }
        let mut remaining = 1;
        // SAFETY: `kept` is always a non-ghost node of this list, and `walk` is
        // either its predecessor or the ghost node. `walk` is never `kept`,
        // so detaching it leaves `kept` valid.
        unsafe {
            let mut walk = kept.as_ref().prev;
            while walk != ghost {
                if dominated(&walk.as_ref().element, &kept.as_ref().element) {
                    drop(self.detach_node(walk));
                } else {
                    kept = walk;
                    remaining += 1;
                }
                walk = kept.as_ref().prev;
            }
        }
        remaining
    }

    /// Removes every element that has a strictly smaller element somewhere to
    /// its right, leaving a non-decreasing list. Returns the number of
    /// remaining elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 5, 2, 3, 2]);
    /// assert_eq!(list.retain_ascending(), 3);
    /// assert_eq!(list.into_iter().collect::<Vec<_>>(), vec![1, 2, 2]);
    /// ```
    pub fn retain_ascending(&mut self) -> usize
    where
        T: Ord,
    {
        self.retain_monotonic_by(|element, kept| element > kept)
    }

    /// Removes every element that has a strictly greater element somewhere to
    /// its right, leaving a non-increasing list. Returns the number of
    /// remaining elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([5, 2, 13, 3, 8]);
    /// assert_eq!(list.retain_descending(), 2);
    /// assert_eq!(list.into_iter().collect::<Vec<_>>(), vec![13, 8]);
    /// ```
    pub fn retain_descending(&mut self) -> usize
    where
        T: Ord,
    {
        self.retain_monotonic_by(|element, kept| element < kept)
    }
}

#[cfg(test)]
mod tests {
    use crate::List;
    use std::cell::Cell;
    use std::iter::FromIterator;

    fn to_vec<T: Clone>(list: &List<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn remove_middle() {
        let mut list = List::<i32>::new();
        assert_eq!(list.remove_middle(), None);

        let mut list = List::from_iter([7]);
        assert_eq!(list.remove_middle(), Some(7));
        assert!(list.is_empty());

        let mut list = List::from_iter([1, 2]);
        assert_eq!(list.remove_middle(), Some(2));
        assert_eq!(to_vec(&list), vec![1]);

        let mut list = List::from_iter(0..7);
        assert_eq!(list.remove_middle(), Some(3));
        assert_eq!(to_vec(&list), vec![0, 1, 2, 4, 5, 6]);
        assert!(list.is_well_linked());
    }

    #[test]
    fn dedup_runs() {
        let mut list = List::<&str>::new();
        assert_eq!(list.dedup_runs(), 0);

        let mut list = List::from_iter(["a", "b", "c"]);
        assert_eq!(list.dedup_runs(), 0);
        assert_eq!(to_vec(&list), vec!["a", "b", "c"]);

        let mut list = List::from_iter(["a", "a"]);
        assert_eq!(list.dedup_runs(), 2);
        assert!(list.is_empty());

        let mut list = List::from_iter(["a", "b", "b", "c", "d", "d"]);
        assert_eq!(list.dedup_runs(), 4);
        assert_eq!(to_vec(&list), vec!["a", "c"]);
        assert!(list.is_well_linked());

        // Only adjacent runs are collapsed.
        let mut list = List::from_iter(["b", "a", "a", "b"]);
        assert_eq!(list.dedup_runs(), 2);
        assert_eq!(to_vec(&list), vec!["b", "b"]);
    }

    #[test]
    fn retain_ascending() {
        let mut list = List::<i32>::new();
        assert_eq!(list.retain_ascending(), 0);

        let mut list = List::from_iter([3, 2, 1]);
        assert_eq!(list.retain_ascending(), 1);
        assert_eq!(to_vec(&list), vec![1]);

        let mut list = List::from_iter([1, 2, 3]);
        assert_eq!(list.retain_ascending(), 3);
        assert_eq!(to_vec(&list), vec![1, 2, 3]);
        assert!(list.is_well_linked());
    }

    #[test]
    fn retain_descending() {
        let mut list = List::from_iter(["a", "c", "b", "d", "a"]);
        assert_eq!(list.retain_descending(), 2);
        assert_eq!(to_vec(&list), vec!["d", "a"]);
        assert!(list.is_well_linked());

        let mut list = List::from_iter(["b", "b", "a"]);
        assert_eq!(list.retain_descending(), 3);
    }

    #[test]
    fn retain_compares_each_element_once() {
        let calls = Cell::new(0);
        let mut list = List::from_iter([4, 1, 3, 2, 5, 0]);
        list.retain_monotonic_by(|a, b| {
            calls.set(calls.get() + 1);
            a > b
        });
        assert_eq!(calls.get(), 5);
        assert_eq!(to_vec(&list), vec![0]);
    }
}
