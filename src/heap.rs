// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Functions arranging a slice into an interval heap.
//!
//! These work on any `&mut [T]` and never allocate; [`PriorityDeque`]
//! grows and shrinks its vector around them. See [`layout`] for the shape
//! of the heap.
//!
//! Items are only ever swapped, so no function loses or duplicates an
//! item, whatever the comparator does. When the comparator fails,
//! [`push_interval_heap`], [`pop_interval_heap_min`],
//! [`pop_interval_heap_max`], [`pop_interval_heap`] and
//! [`update_interval_heap`] undo their swaps before returning the error,
//! leaving the slice exactly as they found it. [`make_interval_heap`] and
//! [`sort_interval_heap`] leave it in some valid permutation that need not
//! be a heap.
//!
//! [`PriorityDeque`]: crate::PriorityDeque
//! [`layout`]: crate::layout

use crate::layout::{left, parent_right, Side, Slots};
use crate::order::TryCompare;

/// Moves the item at `origin` up its side's heap while it belongs nearer
/// the root than its parent, never climbing to an offset below `limit`.
///
/// `limit` is at least 2. On failure the items displaced so far are
/// rotated back down.
pub(crate) fn sift_up<T, S: Slots<T> + ?Sized, C: TryCompare<T>>(
    v: &mut S,
    origin: usize,
    cmp: &C,
    limit: usize,
) -> Result<(), C::Error> {
    debug_assert!(limit >= 2);
    let side = Side::of(origin);
    let mut i = origin;
    while i >= limit {
        let p = side.parent(i);
        match side.before(cmp, v.get(i), v.get(p)) {
            Ok(true) => {
                v.swap(i, p);
                i = p;
            }
            Ok(false) => break,
            Err(e) => {
                let mut j = origin;
                while j != i {
                    v.swap(j, i);
                    j = side.parent(j);
                }
                return Err(e);
            }
        }
    }
    Ok(())
}

/// Places the left-bound leaf item at `i` on the correct side of its
/// interval, then sifts it up.
///
/// Without a partner the item is weighed against its parent's right bound.
fn sift_leaf_min<T, S: Slots<T> + ?Sized, C: TryCompare<T>>(
    v: &mut S,
    i: usize,
    cmp: &C,
    limit: usize,
) -> Result<(), C::Error> {
    let mut co = i | 1;
    if co >= v.len() {
        if co == 1 {
            return Ok(());
        }
        co = parent_right(co);
    }
    if cmp.try_compares_lt(v.get(co), v.get(i))? {
        v.swap(i, co);
        if let Err(e) = sift_up(v, co, cmp, limit) {
            v.swap(i, co);
            return Err(e);
        }
        Ok(())
    } else {
        sift_up(v, i, cmp, limit)
    }
}

/// Places the right-bound leaf item at `i` on the correct side of its
/// interval, then sifts it up.
///
/// A right bound whose only descendant is a lone item must also bound that
/// item, so it is weighed against it instead of its own partner.
fn sift_leaf_max<T, S: Slots<T> + ?Sized, C: TryCompare<T>>(
    v: &mut S,
    i: usize,
    cmp: &C,
    limit: usize,
) -> Result<(), C::Error> {
    let co = if (v.len() - 1) / 2 < i { i ^ 1 } else { i * 2 };
    if cmp.try_compares_lt(v.get(i), v.get(co))? {
        v.swap(i, co);
        if let Err(e) = sift_up(v, co, cmp, limit) {
            v.swap(i, co);
            return Err(e);
        }
        Ok(())
    } else {
        sift_up(v, i, cmp, limit)
    }
}

/// Restores the heap after the leaf item at `i` arrived.
pub(crate) fn sift_leaf<T, S: Slots<T> + ?Sized, C: TryCompare<T>>(
    v: &mut S,
    i: usize,
    cmp: &C,
    limit: usize,
) -> Result<(), C::Error> {
    match Side::of(i) {
        Side::Min => sift_leaf_min(v, i, cmp, limit),
        Side::Max => sift_leaf_max(v, i, cmp, limit),
    }
}

/// Restores the heap when the item at `origin` is the only one out of place.
///
/// The item is first carried all the way down to a leaf, each step pulling
/// the more extreme same-side child up into its slot, and then sifted back
/// up from there. Everything above `limit` is left untouched by the upward
/// pass.
pub(crate) fn sift_down<T, S: Slots<T> + ?Sized, C: TryCompare<T>>(
    v: &mut S,
    origin: usize,
    cmp: &C,
    limit: usize,
) -> Result<(), C::Error> {
    if origin >= v.len() {
        return Ok(());
    }
    let side = Side::of(origin);
    let mut i = origin;
    match descend(v, &mut i, side, cmp, limit) {
        Ok(()) => Ok(()),
        Err(e) => {
            while i > origin {
                let p = side.parent(i);
                v.swap(p, i);
                i = p;
            }
            Err(e)
        }
    }
}

/// The body of `sift_down`. `i` tracks the item being moved so the caller
/// can walk it back on failure.
fn descend<T, S: Slots<T> + ?Sized, C: TryCompare<T>>(
    v: &mut S,
    i: &mut usize,
    side: Side,
    cmp: &C,
    limit: usize,
) -> Result<(), C::Error> {
    let len = v.len();
    loop {
        let child = side.first_child(*i);
        if child + 2 >= len {
            break;
        }
        let next = if side.before(cmp, v.get(child + 2), v.get(child))? {
            child + 2
        } else {
            child
        };
        v.swap(*i, next);
        *i = next;
    }

    let child = side.first_child(*i);
    if child < len {
        // A lone item in the second child is a right bound as well.
        let lone = child + 1;
        if side == Side::Max && lone < len && cmp.try_compares_lt(v.get(child), v.get(lone))? {
            v.swap(*i, lone);
            *i = lone;
            return sift_leaf_min(v, lone, cmp, limit);
        }
        v.swap(*i, child);
        *i = child;
    }

    match side {
        Side::Min => sift_leaf_min(v, *i, cmp, limit),
        Side::Max => sift_leaf_max(v, *i, cmp, limit),
    }
}

/// Orders the two items of the node whose left bound is at `l`.
pub(crate) fn order_node<T, S: Slots<T> + ?Sized, C: TryCompare<T>>(
    v: &mut S,
    l: usize,
    cmp: &C,
) -> Result<(), C::Error> {
    if cmp.try_compares_lt(v.get(l + 1), v.get(l))? {
        v.swap(l, l + 1);
    }
    Ok(())
}

/// Merges the node at `l` into its two subtrees, which must already be
/// interval heaps. Nothing is moved above the node's children.
pub(crate) fn fix_node<T, S: Slots<T> + ?Sized, C: TryCompare<T>>(
    v: &mut S,
    l: usize,
    cmp: &C,
) -> Result<(), C::Error> {
    let limit = (l + 1) * 2;
    order_node(v, l, cmp)?;
    sift_down(v, l + 1, cmp, limit)?;
    sift_down(v, l, cmp, limit)
}

/// Rearranges the items of `v` into an interval heap.
///
/// Takes `O(n)` time. Nodes are fixed from the last one back to the root,
/// so each node is merged into two subtrees that are already heaps.
///
/// # Examples
///
/// ```
/// use priority_deque::heap;
///
/// let mut v = vec![5, 1, 6, 4, 3];
/// heap::make_interval_heap(&mut v, &compare::natural()).unwrap();
/// assert!(heap::is_interval_heap(&v, &compare::natural()));
/// assert_eq!((v[0], v[1]), (1, 6));
/// ```
pub fn make_interval_heap<T, C: TryCompare<T>>(v: &mut [T], cmp: &C) -> Result<(), C::Error> {
    let len = v.len();
    if len < 2 {
        return Ok(());
    }
    let end_parent = len / 2 - 1;
    let mut l = left(len) - 2;
    // Leaves only need their own two items ordered.
    while l > end_parent {
        order_node(v, l, cmp)?;
        l -= 2;
    }
    loop {
        fix_node(v, l, cmp)?;
        if l < 2 {
            return Ok(());
        }
        l -= 2;
    }
}

/// Extends the interval heap `v[..v.len() - 1]` over the last item.
///
/// Takes `O(log n)` time.
pub fn push_interval_heap<T, C: TryCompare<T>>(v: &mut [T], cmp: &C) -> Result<(), C::Error> {
    match v.len() {
        0 => Ok(()),
        len => sift_leaf(v, len - 1, cmp, 2),
    }
}

/// Moves a smallest item of the interval heap `v` to its end, leaving
/// `v[..v.len() - 1]` an interval heap.
///
/// Takes `O(log n)` time. Does nothing to an empty slice.
pub fn pop_interval_heap_min<T, C: TryCompare<T>>(v: &mut [T], cmp: &C) -> Result<(), C::Error> {
    let last = match v.len() {
        0 => return Ok(()),
        len => len - 1,
    };
    v.swap(0, last);
    if let Err(e) = sift_down(&mut v[..last], 0, cmp, 2) {
        v.swap(0, last);
        return Err(e);
    }
    Ok(())
}

/// Moves a greatest item of the interval heap `v` to its end, leaving
/// `v[..v.len() - 1]` an interval heap.
///
/// Takes `O(log n)` time. With two items or fewer the greatest is already
/// last and nothing moves.
pub fn pop_interval_heap_max<T, C: TryCompare<T>>(v: &mut [T], cmp: &C) -> Result<(), C::Error> {
    let len = v.len();
    if len <= 2 {
        return Ok(());
    }
    let last = len - 1;
    v.swap(1, last);
    if let Err(e) = sift_down(&mut v[..last], 1, cmp, 2) {
        v.swap(1, last);
        return Err(e);
    }
    Ok(())
}

/// Moves the item at `index` of the interval heap `v` to its end, leaving
/// `v[..v.len() - 1]` an interval heap.
///
/// Takes `O(log n)` time.
///
/// # Panics
///
/// Panics if `index` is out of bounds.
pub fn pop_interval_heap<T, C: TryCompare<T>>(
    v: &mut [T],
    index: usize,
    cmp: &C,
) -> Result<(), C::Error> {
    assert!(index < v.len(), "index {} out of bounds for {} items", index, v.len());
    let last = v.len() - 1;
    v.swap(index, last);
    if let Err(e) = update_interval_heap(&mut v[..last], index, cmp) {
        v.swap(index, last);
        return Err(e);
    }
    Ok(())
}

/// Restores the interval heap `v` after the item at `index` was replaced.
///
/// Every other item must still satisfy the heap rules when the one at
/// `index` is ignored. Takes `O(log n)` time.
pub fn update_interval_heap<T, C: TryCompare<T>>(
    v: &mut [T],
    index: usize,
    cmp: &C,
) -> Result<(), C::Error> {
    debug_assert!(index <= v.len());
    sift_down(v, index, cmp, 2)
}

/// Sorts the interval heap `v` in ascending order by repeatedly moving the
/// greatest remaining item behind the shrinking heap.
///
/// Takes `O(n log n)` time.
pub fn sort_interval_heap<T, C: TryCompare<T>>(v: &mut [T], cmp: &C) -> Result<(), C::Error> {
    for end in (3..v.len() + 1).rev() {
        pop_interval_heap_max(&mut v[..end], cmp)?;
    }
    Ok(())
}

/// Whether the item at `n` keeps the heap rules towards items before it.
fn fits<T, C: TryCompare<T>>(v: &[T], n: usize, cmp: &C) -> Result<bool, C::Error> {
    if n & 1 == 1 && cmp.try_compares_lt(&v[n], &v[n - 1])? {
        return Ok(false);
    }
    if n >= 2 {
        let p = parent_right(n);
        if cmp.try_compares_lt(&v[p], &v[n])? {
            return Ok(false);
        }
        if n & 1 == 0 && cmp.try_compares_lt(&v[n], &v[p - 1])? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Returns the length of the longest prefix of `v` that is an interval heap.
///
/// This is `v.len()` when all of `v` is one. A comparator failure counts
/// as a violation at the item being checked. Takes `O(n)` time.
///
/// # Examples
///
/// ```
/// use priority_deque::heap::is_interval_heap_until;
///
/// let cmp = compare::natural();
/// assert_eq!(is_interval_heap_until(&[1, 5, 2, 4], &cmp), 4);
/// assert_eq!(is_interval_heap_until(&[1, 5, 6, 4], &cmp), 2);
/// ```
pub fn is_interval_heap_until<T, C: TryCompare<T>>(v: &[T], cmp: &C) -> usize {
    (0..v.len()).find(|&n| !matches!(fits(v, n, cmp), Ok(true))).unwrap_or(v.len())
}

/// Checks whether `v` is an interval heap.
///
/// It is if:
///
/// 1. It has fewer than two items, OR
/// 2a. Each node's left item is less than or equal to its right item, AND
/// 2b. Each node's left item is greater than or equal to the left item of the
///     node's parent, AND
/// 2c. Each node's right item is less than or equal to the right item of the
///     node's parent
///
/// where a lone item in the last node counts as both its left and right item.
pub fn is_interval_heap<T, C: TryCompare<T>>(v: &[T], cmp: &C) -> bool {
    is_interval_heap_until(v, cmp) == v.len()
}
