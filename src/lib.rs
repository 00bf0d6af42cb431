//! This crate provides a queue of owned strings threaded on a cyclic
//! doubly-linked ring, together with a set of algorithms that restructure the
//! ring in place: reversal, reversal in groups, pairwise swap, merge sort,
//! duplicate-run removal, middle removal, monotonic pruning, and the merge of
//! many queues into one.
//!
//! The ring itself is the generic [`List`], which allows inserting, removing,
//! splicing and cutting at any known position in constant time. In
//! compromise, accessing a position or computing the length take *O*(*n*)
//! time. The string [`Queue`] is a thin layer over `List<String>`.
//!
//! Here is a quick example showing how the queue works.
//!
//! ```
//! use cyclic_queue::Queue;
//!
//! let mut queue = Queue::new();
//! for value in ["pear", "fig", "apple", "fig"].iter() {
//!     queue.insert_tail(value).unwrap();
//! }
//!
//! queue.sort(false);
//! assert_eq!(queue.iter().collect::<Vec<_>>(), ["apple", "fig", "fig", "pear"]);
//!
//! assert_eq!(queue.delete_dup(), Ok(2));
//! assert_eq!(queue.iter().collect::<Vec<_>>(), ["apple", "pear"]);
//!
//! let mut buf = [0u8; 4];
//! let element = queue.remove_head(&mut buf).unwrap();
//! assert_eq!(element.value(), "apple");
//! assert_eq!(&buf, b"app\0");
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the list is like the following graph:
//! ```text
//!          ┌─────────────────────────────────────────────────────────────────────┐
//!          ↓                                                     (Ghost) Node N  │
//!    ╔═══════════╗           ╔═══════════╗                        ┌───────────┐  │
//!    ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ │   next    │ ─┘
//!    ╟───────────╢           ╟───────────╢     Node 2, 3, ...     ├───────────┤
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←──────── ┄┄ ←──────── │   prev    │
//! │  ╟───────────╢           ╟───────────╢                        ├───────────┤
//! │  ║ payload T ║           ║ payload T ║                        ┊No payload ┊
//! │  ╚═══════════╝           ╚═══════════╝                        └╌╌╌╌╌╌╌╌╌╌╌┘
//! │      Node 0                  Node 1                               ↑   ↑
//! └───────────────────────────────────────────────────────────────────┘   │
//! ╔═══════════╗                                                           │
//! ║   ghost   ║ ──────────────────────────────────────────────────────────┘
//! ╚═══════════╝
//!     List
//! ```
//! The `List` holds only a pointer `ghost` to the ghost node. The length is
//! not cached, so that splicing and cutting never need to count nodes.
//!
//! Each node of the list `List<T>` is allocated on heap, which contains:
//! - the `next` pointer that points to the next element (or the ghost node if it
//!   is the last element in the list);
//! - the `prev` pointer that points to the previous element (or the ghost node if
//!   it is the first element in the list);
//! - the actual payload `T`, except in the ghost node.
//!
//! Initially, there is a ghost node in an empty list, of which the `next` and `prev`
//! pointer point to itself.
//!
//! In convention, in a list with length *n*, the nodes are indexed by 0, 1, ...,
//! *n* - 1, and the ghost node is always indexed by *n*.
//!
//! A removed element keeps its node: [`Queue::remove_head`] hands out an
//! [`Element`], which owns both, and releases both when dropped.
//!
//! # Iteration
//!
//! Iterating over a list is by the [`Iter`] and [`IterMut`] iterators. These are
//! double-ended iterators and iterate the list like an array (fused and non-cyclic).
//!
//! ```
//! use cyclic_queue::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([1, 2, 3]);
//! let mut iter = list.iter();
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next(), Some(&2));
//! assert_eq!(iter.next(), Some(&3));
//! assert_eq!(iter.next(), None);
//! assert_eq!(iter.next(), None); // Fused and non-cyclic
//!
//! list.iter_mut().for_each(|item| *item *= 2);
//! assert_eq!(Vec::from_iter(list), vec![2, 4, 6]);
//! ```
//!
//! # Cursor Mutations
//!
//! [`CursorMut`] provides the structural edits the algorithms are built from.
//! - [`insert`]: insert a new item at the cursor;
//! - [`remove`]: remove the item at the cursor, moving to its successor;
//! - [`backspace`]: remove the item before the cursor;
//! - [`cut`]: move everything up to the cursor (inclusive) into a new list;
//! - [`move_to_back`]: move the item at the cursor to the back of another list;
//! - [`splice`]: splice another list before the cursor position;
//!
//! ```
//! use cyclic_queue::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([1, 2, 3, 4]);
//!
//! let mut cursor = list.cursor_start_mut();
//!
//! cursor.insert(5); // becomes [5, 1, 2, 3, 4], points to 1
//! assert_eq!(cursor.current(), Some(&1));
//!
//! assert!(cursor.seek_forward(2).is_ok());
//! assert_eq!(cursor.remove(), Some(3)); // becomes [5, 1, 2, 4], points to 4
//! assert_eq!(cursor.current(), Some(&4));
//!
//! assert_eq!(cursor.backspace(), Some(2)); // becomes [5, 1, 4], points to 4
//! assert_eq!(cursor.current(), Some(&4));
//!
//! assert_eq!(Vec::from_iter(list), vec![5, 1, 4]);
//! ```
//!
//! # Features
//!
//! - `checked`: verify at runtime that [`Queue::delete_dup`] is given a
//!   sorted queue, and that the ring stays closed after every restructuring
//!   operation. Without it, both are only asserted in debug builds.
//!
//! [`CursorMut`]: crate::list::cursor::CursorMut
//! [`insert`]: crate::list::cursor::CursorMut::insert
//! [`remove`]: crate::list::cursor::CursorMut::remove
//! [`backspace`]: crate::list::cursor::CursorMut::backspace
//! [`cut`]: crate::list::cursor::CursorMut::cut
//! [`move_to_back`]: crate::list::cursor::CursorMut::move_to_back
//! [`splice`]: crate::list::cursor::CursorMut::splice

#[doc(inline)]
pub use list::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::{Drain, DrainFilter, List};

pub use element::Element;
pub use error::{Error, Result};
pub use merge::{merge, Context};
pub use queue::Queue;

pub mod error;
pub mod list;
pub mod merge;
pub mod ops;

mod element;
mod queue;
