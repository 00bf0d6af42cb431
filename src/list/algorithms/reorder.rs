use crate::list::{move_node, List};

impl<T> List<T> {
    /// Reverses the order of the list in place, by exchanging the `next` and
    /// `prev` links of every node, the ghost node included.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// list.reverse();
    /// assert_eq!(list.into_iter().collect::<Vec<_>>(), vec![3, 2, 1]);
    /// ```
    pub fn reverse(&mut self) {
        let ghost = self.ghost_node();
        let mut node = ghost;
        // SAFETY: every node reachable from the ghost node belongs to this list;
        // after the exchange, `prev` holds the old `next`, so the walk is forward.
        unsafe {
            loop {
                let links = node.as_mut();
                std::mem::swap(&mut links.next, &mut links.prev);
                node = links.prev;
                if node == ghost {
                    break;
                }
            }
        }
        log::trace!("reversed list");
    }

    /// Swaps every two adjacent elements (positions 0 and 1, 2 and 3, ...) by
    /// relinking their nodes. If the length is odd, the last element stays in
    /// place.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3, 4, 5]);
    /// list.swap_pairs();
    /// assert_eq!(list.into_iter().collect::<Vec<_>>(), vec![2, 1, 4, 3, 5]);
    /// ```
    pub fn swap_pairs(&mut self) {
        let ghost = self.ghost_node();
        // SAFETY: `first` and `second` are adjacent non-ghost nodes of this list,
        // and moving `second` before `first` keeps the ring closed.
        unsafe {
            let mut first = self.front_node();
            while first != ghost {
                let second = first.as_ref().next;
                if second == ghost {
                    break;
                }
                move_node(second, first);
                first = first.as_ref().next;
            }
        }
    }

    /// Reverses the list in consecutive groups of `k` elements, from the front.
    /// A trailing group shorter than `k` keeps its order. A `k` of 0 or 1
    /// leaves the list untouched.
    ///
    /// Each group is reversed by moving, `k - 1` times, the node following the
    /// group's original first node right after the group's anchor.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(1..=8);
    /// list.reverse_groups(3);
    /// assert_eq!(list.into_iter().collect::<Vec<_>>(), vec![3, 2, 1, 6, 5, 4, 7, 8]);
    /// ```
    pub fn reverse_groups(&mut self, k: usize) {
        if k < 2 {
            return;
        }
        let groups = self.len() / k;
        let mut anchor = self.ghost_node();
        // SAFETY: there are at least `groups * k` nodes after the ghost node, so
        // every node moved below is a non-ghost node of this list.
        unsafe {
            for _ in 0..groups {
                let first = anchor.as_ref().next;
                for _ in 1..k {
                    move_node(first.as_ref().next, anchor.as_ref().next);
                }
                anchor = first;
            }
        }
        log::trace!("reversed {} groups of {}", groups, k);
    }
}

#[cfg(test)]
mod tests {
    use crate::List;
    use std::iter::FromIterator;

    fn to_vec(list: &List<i32>) -> Vec<i32> {
        list.iter().copied().collect()
    }

    #[test]
    fn reverse() {
        for n in 0..6 {
            let mut list = List::from_iter(0..n);
            list.reverse();
            assert_eq!(to_vec(&list), (0..n).rev().collect::<Vec<_>>());
            assert!(list.is_well_linked());
            list.reverse();
            assert_eq!(to_vec(&list), (0..n).collect::<Vec<_>>());
        }
    }

    #[test]
    fn reverse_keeps_nodes() {
        let mut list = List::from_iter([String::from("x"), String::from("y")]);
        let before: Vec<*const String> = list.iter().map(|s| s as *const String).collect();
        list.reverse();
        list.reverse();
        let after: Vec<*const String> = list.iter().map(|s| s as *const String).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn swap_pairs() {
        let mut list = List::<i32>::new();
        list.swap_pairs();
        assert!(list.is_empty());

        let mut list = List::from_iter([1]);
        list.swap_pairs();
        assert_eq!(to_vec(&list), vec![1]);

        let mut list = List::from_iter(1..=4);
        list.swap_pairs();
        assert_eq!(to_vec(&list), vec![2, 1, 4, 3]);
        assert_eq!(list.back(), Some(&3));
        assert!(list.is_well_linked());

        let mut list = List::from_iter(1..=5);
        list.swap_pairs();
        assert_eq!(to_vec(&list), vec![2, 1, 4, 3, 5]);
        assert!(list.is_well_linked());
    }

    #[test]
    fn reverse_groups() {
        let mut list = List::from_iter(1..=5);
        list.reverse_groups(1);
        assert_eq!(to_vec(&list), vec![1, 2, 3, 4, 5]);
        list.reverse_groups(0);
        assert_eq!(to_vec(&list), vec![1, 2, 3, 4, 5]);

        list.reverse_groups(2);
        assert_eq!(to_vec(&list), vec![2, 1, 4, 3, 5]);
        assert!(list.is_well_linked());

        let mut list = List::from_iter(1..=5);
        list.reverse_groups(5);
        assert_eq!(to_vec(&list), vec![5, 4, 3, 2, 1]);
        assert!(list.is_well_linked());

        let mut list = List::from_iter(1..=5);
        list.reverse_groups(6);
        assert_eq!(to_vec(&list), vec![1, 2, 3, 4, 5]);

        let mut list = List::from_iter(1..=9);
        list.reverse_groups(4);
        assert_eq!(to_vec(&list), vec![4, 3, 2, 1, 8, 7, 6, 5, 9]);
        assert!(list.is_well_linked());
    }
}
