//! Folding a chain of independent queues into one sorted queue.
//!
//! Each queue lives in a [`Context`], which caches its element count so that
//! the merged size is known without walking the rings. The chain itself is a
//! [`List<Context>`](crate::List).

use crate::element::Element;
use crate::error::Result;
use crate::list::List;
use crate::queue::Queue;

/// A queue together with its cached size and an identifier.
///
/// The queue is only reachable mutably through the insert and remove methods
/// of the context, so the cached size always equals the queue's length.
#[derive(Debug, Default)]
pub struct Context {
    queue: Queue,
    size: usize,
    id: usize,
}

impl Context {
    /// Create a context holding an empty queue.
    pub fn new(id: usize) -> Self {
        Self {
            queue: Queue::new(),
            size: 0,
            id,
        }
    }

    /// Create a context around an existing queue, counting its elements once.
    pub fn with_queue(id: usize, queue: Queue) -> Self {
        let size = queue.size();
        Self { queue, size, id }
    }

    /// The identifier given at construction.
    pub fn id(&self) -> usize {
        self.id
    }

    /// The cached number of elements.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Borrows the queue read-only.
    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// Unwraps the queue, dropping the cached size.
    pub fn into_queue(self) -> Queue {
        self.queue
    }

    /// Inserts a copy of `value` at the head. See [`Queue::insert_head`].
    pub fn insert_head(&mut self, value: &str) -> Result<()> {
        self.queue.insert_head(value)?;
        self.size += 1;
        Ok(())
    }

    /// Inserts a copy of `value` at the tail and counts it.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Context;
    ///
    /// let mut context = Context::new(0);
    /// context.insert_tail("a").unwrap();
    /// context.insert_tail("b").unwrap();
    /// assert_eq!(context.size(), 2);
    /// assert_eq!(context.queue().size(), 2);
    /// ```
    pub fn insert_tail(&mut self, value: &str) -> Result<()> {
        self.queue.insert_tail(value)?;
        self.size += 1;
        Ok(())
    }

    /// Detaches the head element, copying its payload into `buf` as
    /// [`Queue::remove_head`] does. The cached size only drops on success.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::{Context, Error};
    ///
    /// let mut context = Context::with_queue(0, ["abc"].iter().copied().collect());
    /// let mut buf = [0u8; 3];
    ///
    /// assert_eq!(context.remove_head(&mut buf).unwrap().value(), "abc");
    /// assert_eq!(&buf, b"ab\0");
    /// assert_eq!(context.size(), 0);
    /// assert_eq!(context.remove_head(&mut buf).unwrap_err(), Error::Empty);
    /// ```
    pub fn remove_head(&mut self, buf: &mut [u8]) -> Result<Element> {
        let element = self.queue.remove_head(buf)?;
        self.size -= 1;
        Ok(element)
    }

    /// Detaches the tail element. See [`Context::remove_head`].
    pub fn remove_tail(&mut self, buf: &mut [u8]) -> Result<Element> {
        let element = self.queue.remove_tail(buf)?;
        self.size -= 1;
        Ok(element)
    }
}

/// Merge every queue of the chain into the first one, sort it, and return
/// its size. Returns 0 for an empty chain.
///
/// The other queues are spliced, in chain order, onto the tail of the first
/// one; they are left empty with a cached size of 0. No payload is copied.
///
/// # Examples
///
/// ```
/// use cyclic_queue::{merge, Context, List};
///
/// let mut chain = List::new();
/// chain.push_back(Context::with_queue(0, ["b", "a"].iter().copied().collect()));
/// chain.push_back(Context::with_queue(1, ["d", "c"].iter().copied().collect()));
///
/// assert_eq!(merge(&mut chain, false), 4);
///
/// let first = chain.front().unwrap();
/// assert_eq!(first.queue().iter().collect::<Vec<_>>(), ["a", "b", "c", "d"]);
/// assert_eq!(chain.back().unwrap().size(), 0);
/// ```
pub fn merge(chain: &mut List<Context>, descending: bool) -> usize {
    let mut contexts = chain.iter_mut();
    let first = match contexts.next() {
        Some(first) => first,
        None => return 0,
    };
    for other in contexts {
        first.queue.append(&mut other.queue);
        first.size += other.size;
        other.size = 0;
    }
    first.queue.sort(descending);
    log::debug!("merged chain into context {} of {} elements", first.id, first.size);
    first.size
}

#[cfg(test)]
mod tests {
    use super::{merge, Context};
    use crate::List;

    fn contents(context: &Context) -> Vec<&str> {
        context.queue().iter().map(String::as_str).collect()
    }

    #[test]
    fn context_tracks_size() {
        let mut context = Context::new(7);
        assert_eq!(context.id(), 7);
        context.insert_tail("b").unwrap();
        context.insert_head("a").unwrap();
        assert_eq!(context.size(), 2);

        let mut buf = [0u8; 4];
        assert_eq!(context.remove_tail(&mut buf).unwrap().value(), "b");
        assert_eq!(context.size(), 1);

        // Failed removals leave the cached size alone.
        assert!(context.remove_head(&mut []).is_err());
        assert_eq!(context.size(), 1);
        assert!(context.remove_head(&mut buf).is_ok());
        assert!(context.remove_head(&mut buf).is_err());
        assert_eq!(context.size(), 0);
    }

    #[test]
    fn cached_size_follows_wrapped_queue() {
        let mut context = Context::with_queue(3, ["a", "b", "c"].iter().copied().collect());
        let mut buf = [0u8; 2];
        while context.remove_tail(&mut buf).is_ok() {
            assert_eq!(context.size(), context.queue().size());
        }
        assert_eq!(context.size(), 0);
        assert!(context.remove_head(&mut buf).is_err());
        assert!(context.remove_tail(&mut buf).is_err());
        assert_eq!(context.size(), 0);

        context.insert_head("x").unwrap();
        assert_eq!(context.size(), 1);
        assert_eq!(context.into_queue().size(), 1);
    }

    #[test]
    fn merge_ascending() {
        let mut chain = List::new();
        let mut first = Context::new(0);
        first.insert_tail("b").unwrap();
        first.insert_tail("a").unwrap();
        let mut second = Context::new(1);
        second.insert_tail("d").unwrap();
        second.insert_tail("c").unwrap();
        chain.push_back(first);
        chain.push_back(second);

        assert_eq!(merge(&mut chain, false), 4);

        let mut contexts = chain.iter();
        let first = contexts.next().unwrap();
        assert_eq!(contents(first), vec!["a", "b", "c", "d"]);
        assert_eq!(first.size(), 4);
        let second = contexts.next().unwrap();
        assert!(second.queue().is_empty());
        assert_eq!(second.size(), 0);
    }

    #[test]
    fn merge_descending() {
        let mut chain = List::new();
        chain.push_back(Context::with_queue(0, ["x", "a"].iter().copied().collect()));
        chain.push_back(Context::new(1));
        chain.push_back(Context::with_queue(2, ["m"].iter().copied().collect()));

        assert_eq!(merge(&mut chain, true), 3);
        assert_eq!(contents(chain.front().unwrap()), vec!["x", "m", "a"]);
        assert!(chain.iter().skip(1).all(|context| context.size() == 0));
    }

    #[test]
    fn merge_degenerate_chains() {
        let mut chain = List::<Context>::new();
        assert_eq!(merge(&mut chain, false), 0);

        chain.push_back(Context::with_queue(0, ["b", "a"].iter().copied().collect()));
        assert_eq!(merge(&mut chain, false), 2);
        assert_eq!(contents(chain.front().unwrap()), vec!["a", "b"]);
    }
}
