// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Index arithmetic for the interval heap layout.
//!
//! An interval heap is a binary tree of nodes where
//!
//! (1) each node (except possibly the last leaf) holds two items, the
//!     first one less than or equal to the second one,
//! (2) each node represents a closed interval, and
//! (3) a child node's interval is contained in its parent's interval.
//!
//! The nodes live in one flat array. Here's the layout of a tree with 13
//! items (7 nodes) where the numbers are *offsets* into the array:
//!
//! ```text
//!          (0 1)
//!         /     \
//!    (2 3)       (4 5)
//!    /   \       /    \
//!  (6 7)(8 9)(10 11)(12 --)
//! ```
//!
//! Even offsets are "left" bounds and form a min-heap; odd offsets are
//! "right" bounds and form a max-heap. A lone item in the last node acts
//! as both bounds.

/// Which of the two implicit heaps an offset belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Left bounds, at even offsets.
    Min,
    /// Right bounds, at odd offsets.
    Max,
}

impl Side {
    /// The side owning offset `i`.
    #[inline]
    pub fn of(i: usize) -> Side {
        if i & 1 == 0 { Side::Min } else { Side::Max }
    }

    /// Offset of this side's slot in the parent node of offset `i`.
    ///
    /// `i` must not lie in the root node.
    #[inline]
    pub fn parent(self, i: usize) -> usize {
        debug_assert!(!is_root(i));
        let right = (i / 2 - 1) | 1;
        match self {
            Side::Min => right ^ 1,
            Side::Max => right,
        }
    }

    /// Offset of this side's slot in the first child node of the node
    /// holding offset `i`. The second child's slot is two further on.
    #[inline]
    pub fn first_child(self, i: usize) -> usize {
        match self {
            Side::Min => left(i) * 2 + 2,
            Side::Max => left(i) * 2 + 3,
        }
    }
}

/// True for the two offsets of the root node.
#[inline]
pub fn is_root(i: usize) -> bool { i < 2 }

/// Clears the low bit: the left offset of the node holding `i`.
#[inline]
pub fn left(i: usize) -> usize { i & !1 }

/// Offset of the same-side slot in the parent node of `i`: the parent's
/// left bound for even `i`, its right bound for odd `i`.
#[inline]
pub fn parent(i: usize) -> usize {
    ((i / 2 - 1) | 1) ^ 1 ^ (i & 1)
}

/// Offset of the parent node's right bound.
#[inline]
pub fn parent_right(i: usize) -> usize {
    (i / 2 - 1) | 1
}

/// Random access to the items being arranged.
///
/// The engine never grows or shrinks its storage and touches items only
/// through `get` and `swap`, so anything that can hand out a reference by
/// offset and exchange two offsets can be arranged into an interval heap.
pub trait Slots<T> {
    /// Number of items.
    fn len(&self) -> usize;

    /// The item at offset `i`.
    fn get(&self, i: usize) -> &T;

    /// Exchanges the items at offsets `a` and `b`.
    fn swap(&mut self, a: usize, b: usize);
}

impl<T> Slots<T> for [T] {
    #[inline]
    fn len(&self) -> usize { <[T]>::len(self) }

    #[inline]
    fn get(&self, i: usize) -> &T { &self[i] }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) { <[T]>::swap(self, a, b) }
}

#[cfg(test)]
mod test {
    use super::{left, parent, parent_right, Side};

    #[test]
    fn test_parent() {
        // (2 3) and (4 5) hang off the root, (6 7) and (8 9) off (2 3).
        assert_eq!(parent(2), 0);
        assert_eq!(parent(3), 1);
        assert_eq!(parent(4), 0);
        assert_eq!(parent(5), 1);
        assert_eq!(parent(6), 2);
        assert_eq!(parent(9), 3);
        assert_eq!(parent(10), 4);
        assert_eq!(parent(13), 5);

        for i in 2..1000 {
            assert_eq!(parent(i), Side::of(i).parent(i));
            assert_eq!(parent_right(i), Side::Max.parent(i));
            assert_eq!(parent_right(i) - 1, Side::Min.parent(i));
        }
    }

    #[test]
    fn test_children() {
        assert_eq!(Side::Min.first_child(0), 2);
        assert_eq!(Side::Max.first_child(1), 3);
        assert_eq!(Side::Min.first_child(4), 10);
        assert_eq!(Side::Max.first_child(5), 11);

        for i in 0..500 {
            for side in [Side::Min, Side::Max] {
                let c = side.first_child(i);
                assert_eq!(Side::of(c), side);
                assert_eq!(left(parent(c)), left(i));
                assert_eq!(left(parent(c + 2)), left(i));
            }
        }
    }

    #[test]
    fn test_side() {
        assert_eq!(Side::of(0), Side::Min);
        assert_eq!(Side::of(7), Side::Max);
        assert_eq!(Side::of(1000), Side::Min);
    }
}
