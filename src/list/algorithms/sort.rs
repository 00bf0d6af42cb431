use crate::List;
use std::cmp::Ordering;

impl<T> List<T> {
    /// Sort the list in ascending order.
    ///
    /// This sort is stable (i.e., does not reorder equal elements).
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* * log(*n*)) time, with
    /// *O*(log(*n*)) recursion depth. Nodes are relinked, elements are never
    /// moved or copied.
    ///
    /// # Current Implementation
    ///
    /// The current algorithm is a top-down merge sort on whole lists: the list
    /// is cut in two halves, each half is sorted recursively, and both are
    /// merged into a staging list which is finally spliced back.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    /// let mut list = List::from_iter([5, 2, 4, 3, 1]);
    ///
    /// list.sort();
    ///
    /// assert_eq!(list.into_iter().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        merge_sort(self, &mut |a: &T, b: &T| a.lt(b));
    }

    /// Sort the list in descending order.
    ///
    /// The list is sorted ascending and then reversed once, so equal elements
    /// end up in reverse input order.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    /// let mut list = List::from_iter(["b", "c", "a"]);
    ///
    /// list.sort_descending();
    ///
    /// assert_eq!(list.into_iter().collect::<Vec<_>>(), vec!["c", "b", "a"]);
    /// ```
    pub fn sort_descending(&mut self)
    where
        T: Ord,
    {
        self.sort();
        self.reverse();
    }

    /// Sort the list with a comparator function.
    ///
    /// This sort is stable (i.e., does not reorder equal elements).
    ///
    /// The comparator function must define a total ordering for the
    /// elements in the list. If the ordering is not total, the order
    /// of the elements is unspecified.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    /// let mut v = List::from_iter([5, 4, 1, 3, 2]);
    /// v.sort_by(|a, b| a.cmp(b));
    /// assert_eq!(v.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    ///
    /// // reverse sorting
    /// v.sort_by(|a, b| b.cmp(a));
    /// assert_eq!(v.iter().copied().collect::<Vec<_>>(), vec![5, 4, 3, 2, 1]);
    /// ```
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        merge_sort(self, &mut |a: &T, b: &T| compare(a, b) == Ordering::Less)
    }

    /// Sorts the list with a key extraction function.
    ///
    /// This sort is stable (i.e., does not reorder equal elements).
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    /// let mut v = List::from_iter([-5i32, 4, 1, -3, 2]);
    ///
    /// v.sort_by_key(|k| k.abs());
    /// assert_eq!(v.into_iter().collect::<Vec<_>>(), vec![1, 2, -3, 4, -5]);
    /// ```
    pub fn sort_by_key<K, F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> K,
        K: Ord,
    {
        merge_sort(self, &mut |a: &T, b: &T| f(a).lt(&f(b)));
    }
}

fn merge_sort<T, F>(list: &mut List<T>, less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    if list.is_empty() || list.is_singular() {
        return;
    }
    // The first half ends at `len / 2 - 1`, so it is never empty and the
    // second half keeps at least one node.
    let len = list.len();
    let mut front = match list.cursor_mut(len / 2 - 1).cut() {
        Some(front) => front,
        None => return,
    };
    merge_sort(&mut front, less);
    merge_sort(list, less);
    merge(&mut front, list, less);
}

/// Merge two sorted lists into `back`, leaving `front` empty.
///
/// On ties the element of `front` goes first.
fn merge<T, F>(front: &mut List<T>, back: &mut List<T>, less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let mut merged = List::new();
    loop {
        let take_back = match (front.front(), back.front()) {
            (Some(a), Some(b)) => less(b, a),
            _ => break,
        };
        let source = if take_back { &mut *back } else { &mut *front };
        source.cursor_start_mut().move_to_back(&mut merged);
    }
    merged.append(front);
    merged.append(back);
    back.append(&mut merged);
}
