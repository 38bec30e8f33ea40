// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A double-ended priority queue implemented with an interval heap.
//!
//! A `PriorityDeque` can be used wherever a [`BinaryHeap`][bh] can, but gives efficient access
//! to both its smallest and its greatest item, lets any item be replaced or removed in place, and
//! accepts custom comparators. If you only need one end, `BinaryHeap` is more efficient.
//!
//! Insertion, popping either end, and replacing or removing an arbitrary item are `O(log n)`.
//! Retrieving the smallest or greatest item is `O(1)`. Building from a vector, or merging a batch
//! of items in, is `O(n)`.
//!
//! The arrangement itself lives in [`heap`], a set of functions that turn any mutable slice into
//! an interval heap and keep it one. With the `parallel` feature (on by default), [`par`] builds
//! large heaps on the rayon thread pool.
//!
//! # Fallible comparators
//!
//! Every operation is available in a `try_` form for comparators implementing [`TryCompare`]
//! with a real error type. When such a comparator fails, the deque reports
//! [`Error::Compare`] and is left exactly as it was before the call, except after
//! [`try_merge`](PriorityDeque::try_merge), which keeps every item but may need another merge or
//! rebuild to be ordered again. Comparators from the `compare` crate and plain closures never
//! fail, and get the short forms (`push`, `pop_min`, ...).
//!
//! # Threads
//!
//! A deque is an ordinary owned value: share it between threads behind a `Mutex` or `RwLock`
//! like any other collection.
//!
//! [bh]: https://doc.rust-lang.org/stable/std/collections/struct.BinaryHeap.html

use std::convert::Infallible;
use std::fmt::{self, Debug};
use std::mem;

use compare::{natural, Natural};

pub mod heap;
pub mod layout;
#[cfg(feature = "parallel")]
pub mod par;

mod error;
mod iter;
mod order;
mod peek;
#[cfg(test)]
mod testing;

pub use error::Error;
pub use iter::{Drain, IntoIter, Iter};
pub use order::TryCompare;
pub use peek::PeekMut;

use order::infallible;

/// A double-ended priority queue implemented with an interval heap.
///
/// It is a logic error for an item to be modified in such a way that the
/// item's ordering relative to any other item, as determined by the deque's
/// comparator, changes while it is in the deque, other than through
/// [`update`](#method.update) or [`PeekMut`]. This is normally only
/// possible through `Cell`, `RefCell`, global state, I/O, or unsafe code.
#[derive(Clone)]
pub struct PriorityDeque<T, C: TryCompare<T> = Natural<T>> {
    data: Vec<T>,
    cmp: C,
}

impl<T, C: TryCompare<T> + Default> Default for PriorityDeque<T, C> {
    #[inline]
    fn default() -> PriorityDeque<T, C> {
        Self::with_comparator(C::default())
    }
}

impl<T: Ord> PriorityDeque<T> {
    /// Returns an empty deque ordered according to the natural order of its items.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_deque::PriorityDeque;
    ///
    /// let deque = PriorityDeque::<u32>::new();
    /// assert!(deque.is_empty());
    /// ```
    pub fn new() -> PriorityDeque<T> { Self::with_comparator(natural()) }

    /// Returns an empty deque with the given capacity and ordered according to the
    /// natural order of its items.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_deque::PriorityDeque;
    ///
    /// let deque = PriorityDeque::<u32>::with_capacity(5);
    /// assert!(deque.is_empty());
    /// assert!(deque.capacity() >= 5);
    /// ```
    pub fn with_capacity(capacity: usize) -> PriorityDeque<T> {
        Self::with_capacity_and_comparator(capacity, natural())
    }
}

impl<T: Ord> From<Vec<T>> for PriorityDeque<T> {
    /// Returns a deque containing all the items of the given vector and ordered
    /// according to the natural order of its items.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_deque::PriorityDeque;
    ///
    /// let deque = PriorityDeque::from(vec![5, 1, 6, 4]);
    /// assert_eq!(deque.len(), 4);
    /// assert_eq!(deque.min_max(), Some((&1, &6)));
    /// ```
    fn from(vec: Vec<T>) -> PriorityDeque<T> {
        Self::from_vec_and_comparator(vec, natural())
    }
}

impl<T, C: TryCompare<T>> PriorityDeque<T, C> {
    /// Returns an empty deque ordered according to the given comparator.
    pub fn with_comparator(cmp: C) -> PriorityDeque<T, C> {
        PriorityDeque { data: vec![], cmp }
    }

    /// Returns an empty deque with the given capacity and ordered according to the given
    /// comparator.
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> PriorityDeque<T, C> {
        PriorityDeque { data: Vec::with_capacity(capacity), cmp }
    }

    /// Returns a deque containing all the items of the given vector and ordered
    /// according to the given comparator.
    ///
    /// If the comparator fails, the items are dropped along with it and the error
    /// returned.
    pub fn try_from_vec_and_comparator(
        mut vec: Vec<T>,
        cmp: C,
    ) -> Result<PriorityDeque<T, C>, Error<C::Error>> {
        heap::make_interval_heap(&mut vec, &cmp).map_err(Error::Compare)?;
        Ok(PriorityDeque { data: vec, cmp })
    }

    /// Returns an iterator visiting all items in the deque in arbitrary order.
    pub fn iter(&self) -> Iter<T> {
        Iter(self.data.iter())
    }

    /// Returns the items in heap order, which is not priority order.
    ///
    /// Offsets into this slice are what [`update`](#method.update) and
    /// [`remove`](#method.remove) take.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_deque::PriorityDeque;
    ///
    /// let mut deque = PriorityDeque::from(vec![3, 9, 4, 1]);
    /// let at = deque.as_slice().iter().position(|&x| x == 4).unwrap();
    /// assert_eq!(deque.remove(at), 4);
    /// assert_eq!(deque.into_sorted_vec(), [1, 3, 9]);
    /// ```
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns the comparator ordering the deque.
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Returns a reference to the smallest item in the deque.
    ///
    /// Returns `None` if the deque is empty.
    pub fn min(&self) -> Option<&T> {
        self.data.first()
    }

    /// Returns a reference to the greatest item in the deque.
    ///
    /// Returns `None` if the deque is empty.
    pub fn max(&self) -> Option<&T> {
        match self.data.len() {
            0 => None,
            1 => Some(&self.data[0]),
            _ => Some(&self.data[1]),
        }
    }

    /// Same as [`max`](#method.max), for code written against a one-ended queue.
    pub fn top(&self) -> Option<&T> {
        self.max()
    }

    /// Returns references to the smallest and greatest items in the deque.
    ///
    /// Returns `None` if the deque is empty.
    pub fn min_max(&self) -> Option<(&T, &T)> {
        match self.data.len() {
            0 => None,
            1 => Some((&self.data[0], &self.data[0])),
            _ => Some((&self.data[0], &self.data[1])),
        }
    }

    /// Returns the number of items the deque can hold without reallocation.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Reserves the minimum capacity for exactly `additional` more items to be inserted into the
    /// deque.
    ///
    /// Does nothing if the capacity is already sufficient.
    ///
    /// Note that the allocator may give the deque more space than it
    /// requests. Therefore capacity can not be relied upon to be precisely
    /// minimal. Prefer `reserve` if future insertions are expected.
    pub fn reserve_exact(&mut self, additional: usize) {
        self.data.reserve_exact(additional);
    }

    /// Reserves capacity for at least `additional` more items to be inserted into the deque.
    ///
    /// The deque may reserve more space to avoid frequent reallocations.
    pub fn reserve(&mut self, additional: usize) {
        self.data.reserve(additional);
    }

    /// Discards as much additional capacity from the deque as possible.
    pub fn shrink_to_fit(&mut self) {
        self.data.shrink_to_fit()
    }

    /// Pushes an item onto the deque.
    ///
    /// On failure the item is dropped and the deque is unchanged.
    pub fn try_push(&mut self, item: T) -> Result<(), Error<C::Error>> {
        self.data.try_reserve(1)?;
        self.data.push(item);
        if let Err(e) = heap::push_interval_heap(&mut self.data, &self.cmp) {
            self.data.pop();
            return Err(Error::Compare(e));
        }
        Ok(())
    }

    /// Removes the smallest item from the deque and returns it.
    ///
    /// Returns `Ok(None)` if the deque was empty. On failure the deque is unchanged.
    pub fn try_pop_min(&mut self) -> Result<Option<T>, Error<C::Error>> {
        heap::pop_interval_heap_min(&mut self.data, &self.cmp).map_err(Error::Compare)?;
        Ok(self.data.pop())
    }

    /// Removes the greatest item from the deque and returns it.
    ///
    /// Returns `Ok(None)` if the deque was empty. On failure the deque is unchanged.
    pub fn try_pop_max(&mut self) -> Result<Option<T>, Error<C::Error>> {
        heap::pop_interval_heap_max(&mut self.data, &self.cmp).map_err(Error::Compare)?;
        Ok(self.data.pop())
    }

    /// Replaces the item at offset `index` of [`as_slice`](#method.as_slice) and returns the
    /// old one.
    ///
    /// On failure `item` is dropped and the deque is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn try_update(&mut self, index: usize, item: T) -> Result<T, Error<C::Error>> {
        let old = mem::replace(&mut self.data[index], item);
        match heap::update_interval_heap(&mut self.data, index, &self.cmp) {
            Ok(()) => Ok(old),
            Err(e) => {
                self.data[index] = old;
                Err(Error::Compare(e))
            }
        }
    }

    /// Removes the item at offset `index` of [`as_slice`](#method.as_slice) and returns it.
    ///
    /// On failure the deque is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn try_remove(&mut self, index: usize) -> Result<T, Error<C::Error>> {
        heap::pop_interval_heap(&mut self.data, index, &self.cmp).map_err(Error::Compare)?;
        Ok(self.data.pop().expect("removed item is last"))
    }

    /// Adds all items of `items` to the deque, rebuilding it in `O(n)` time.
    ///
    /// If the comparator fails, every old and new item is kept and one more
    /// rebuild is attempted before the error is returned; the deque is only
    /// guaranteed to be ordered if that attempt succeeds. If room for the
    /// items cannot be reserved, they are dropped and the deque is unchanged.
    pub fn try_merge<I>(&mut self, items: I) -> Result<(), Error<C::Error>>
    where
        I: IntoIterator<Item = T>,
    {
        self.try_append(items)?;
        if let Err(e) = heap::make_interval_heap(&mut self.data, &self.cmp) {
            if heap::make_interval_heap(&mut self.data, &self.cmp).is_ok() {
                log::debug!("rebuilt interval heap of {} items after a failed merge",
                            self.data.len());
            }
            return Err(Error::Compare(e));
        }
        Ok(())
    }

    /// Consumes the deque and returns its items as a vector in arbitrary order.
    pub fn into_vec(self) -> Vec<T> { self.data }

    /// Returns the number of items in the deque.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the deque contains no items.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the largest number of items a deque of `T` could ever hold.
    pub fn max_len(&self) -> usize {
        match mem::size_of::<T>() {
            0 => usize::MAX,
            size => isize::MAX as usize / size,
        }
    }

    /// Removes all items from the deque.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Clears the deque, returning an iterator over the removed items in arbitrary order.
    pub fn drain(&mut self) -> Drain<T> {
        Drain(self.data.drain(..))
    }

    /// Exchanges the items and comparators of two deques.
    pub fn swap(&mut self, other: &mut PriorityDeque<T, C>) {
        mem::swap(self, other);
    }

    /// Checks that the items form an interval heap under the deque's comparator.
    ///
    /// Only a broken comparator, or an item changed behind the deque's back,
    /// can make this fail. See [`heap::is_interval_heap`].
    pub fn is_valid(&self) -> bool {
        heap::is_interval_heap(&self.data, &self.cmp)
    }

    /// Appends `items` unordered, reserving room for all of them first.
    fn try_append<I: IntoIterator<Item = T>>(&mut self, items: I) -> Result<(), Error<C::Error>> {
        let items: Vec<T> = items.into_iter().collect();
        self.data.try_reserve(items.len())?;
        self.data.extend(items);
        Ok(())
    }
}

impl<T, C: TryCompare<T, Error = Infallible>> PriorityDeque<T, C> {
    /// Returns a deque containing all the items of the given vector and ordered
    /// according to the given comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{natural, Compare};
    /// use priority_deque::PriorityDeque;
    ///
    /// let deque = PriorityDeque::from_vec_and_comparator(vec![5, 1, 6, 4], natural().rev());
    /// assert_eq!(deque.min_max(), Some((&6, &1)));
    /// ```
    pub fn from_vec_and_comparator(mut vec: Vec<T>, cmp: C) -> PriorityDeque<T, C> {
        infallible(heap::make_interval_heap(&mut vec, &cmp));
        let deque = PriorityDeque { data: vec, cmp };
        debug_assert!(deque.is_valid());
        deque
    }

    /// Returns a mutable reference to the smallest item in the deque.
    ///
    /// The deque is put back in order when the returned guard is dropped.
    /// Returns `None` if the deque is empty.
    pub fn peek_min_mut(&mut self) -> Option<PeekMut<T, C>> {
        match self.data.len() {
            0 => None,
            _ => Some(PeekMut::new(self, 0)),
        }
    }

    /// Returns a mutable reference to the greatest item in the deque.
    ///
    /// The deque is put back in order when the returned guard is dropped.
    /// Returns `None` if the deque is empty.
    pub fn peek_max_mut(&mut self) -> Option<PeekMut<T, C>> {
        match self.data.len() {
            0 => None,
            1 => Some(PeekMut::new(self, 0)),
            _ => Some(PeekMut::new(self, 1)),
        }
    }

    /// Removes the smallest item from the deque and returns it.
    ///
    /// Returns `None` if the deque was empty.
    pub fn pop_min(&mut self) -> Option<T> {
        debug_assert!(self.is_valid());
        infallible(heap::pop_interval_heap_min(&mut self.data, &self.cmp));
        let min = self.data.pop();
        debug_assert!(self.is_valid());
        min
    }

    /// Removes the greatest item from the deque and returns it.
    ///
    /// Returns `None` if the deque was empty.
    pub fn pop_max(&mut self) -> Option<T> {
        debug_assert!(self.is_valid());
        infallible(heap::pop_interval_heap_max(&mut self.data, &self.cmp));
        let max = self.data.pop();
        debug_assert!(self.is_valid());
        max
    }

    /// Same as [`pop_max`](#method.pop_max), for code written against a one-ended queue.
    pub fn pop(&mut self) -> Option<T> {
        self.pop_max()
    }

    /// Pushes an item onto the deque.
    pub fn push(&mut self, item: T) {
        debug_assert!(self.is_valid());
        self.data.push(item);
        infallible(heap::push_interval_heap(&mut self.data, &self.cmp));
        debug_assert!(self.is_valid());
    }

    /// Builds an item from `args` and pushes it onto the deque.
    pub fn emplace<A: Into<T>>(&mut self, args: A) {
        self.push(args.into());
    }

    /// Replaces the item at offset `index` of [`as_slice`](#method.as_slice) and returns the
    /// old one.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_deque::PriorityDeque;
    ///
    /// let mut deque = PriorityDeque::from(vec![2, 8, 5]);
    /// let at = deque.iter().position(|&x| x == 5).unwrap();
    /// assert_eq!(deque.update(at, 10), 5);
    /// assert_eq!(deque.max(), Some(&10));
    /// ```
    pub fn update(&mut self, index: usize, item: T) -> T {
        debug_assert!(self.is_valid());
        let old = mem::replace(&mut self.data[index], item);
        infallible(heap::update_interval_heap(&mut self.data, index, &self.cmp));
        debug_assert!(self.is_valid());
        old
    }

    /// Removes the item at offset `index` of [`as_slice`](#method.as_slice) and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> T {
        debug_assert!(self.is_valid());
        infallible(heap::pop_interval_heap(&mut self.data, index, &self.cmp));
        let item = self.data.pop().expect("removed item is last");
        debug_assert!(self.is_valid());
        item
    }

    /// Adds all items of `items` to the deque, rebuilding it in `O(n)` time.
    pub fn merge<I: IntoIterator<Item = T>>(&mut self, items: I) {
        self.data.extend(items);
        infallible(heap::make_interval_heap(&mut self.data, &self.cmp));
        debug_assert!(self.is_valid());
    }

    /// Consumes the deque and returns its items as a vector in sorted (ascending) order.
    pub fn into_sorted_vec(self) -> Vec<T> {
        let mut vec = self.data;
        infallible(heap::sort_interval_heap(&mut vec, &self.cmp));
        vec
    }
}

#[cfg(feature = "parallel")]
impl<T: Send, C: TryCompare<T> + Sync> PriorityDeque<T, C>
where
    C::Error: Send,
{
    /// Like [`try_from_vec_and_comparator`](#method.try_from_vec_and_comparator), but builds
    /// large deques on the rayon thread pool.
    pub fn try_par_from_vec_and_comparator(
        mut vec: Vec<T>,
        cmp: C,
        options: &par::BuildOptions,
    ) -> Result<PriorityDeque<T, C>, Error<C::Error>> {
        par::par_make_interval_heap(&mut vec, &cmp, options).map_err(Error::Compare)?;
        Ok(PriorityDeque { data: vec, cmp })
    }

    /// Like [`try_merge`](#method.try_merge), but rebuilds large deques on the rayon thread
    /// pool.
    pub fn try_par_merge<I: IntoIterator<Item = T>>(
        &mut self,
        items: I,
        options: &par::BuildOptions,
    ) -> Result<(), Error<C::Error>> {
        self.try_append(items)?;
        if let Err(e) = par::par_make_interval_heap(&mut self.data, &self.cmp, options) {
            if par::par_make_interval_heap(&mut self.data, &self.cmp, options).is_ok() {
                log::debug!("rebuilt interval heap of {} items after a failed merge",
                            self.data.len());
            }
            return Err(Error::Compare(e));
        }
        Ok(())
    }
}

#[cfg(feature = "parallel")]
impl<T: Send, C: TryCompare<T, Error = Infallible> + Sync> PriorityDeque<T, C> {
    /// Like [`from_vec_and_comparator`](#method.from_vec_and_comparator), but builds large
    /// deques on the rayon thread pool.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_deque::PriorityDeque;
    /// use priority_deque::par::BuildOptions;
    ///
    /// let items: Vec<u64> = (0..100_000).rev().collect();
    /// let deque = PriorityDeque::par_from_vec_and_comparator(
    ///     items, compare::natural(), &BuildOptions::default());
    /// assert_eq!(deque.min_max(), Some((&0, &99_999)));
    /// ```
    pub fn par_from_vec_and_comparator(
        mut vec: Vec<T>,
        cmp: C,
        options: &par::BuildOptions,
    ) -> PriorityDeque<T, C> {
        infallible(par::par_make_interval_heap(&mut vec, &cmp, options));
        PriorityDeque { data: vec, cmp }
    }

    /// Like [`merge`](#method.merge), but rebuilds large deques on the rayon thread pool.
    pub fn par_merge<I: IntoIterator<Item = T>>(&mut self, items: I, options: &par::BuildOptions) {
        self.data.extend(items);
        infallible(par::par_make_interval_heap(&mut self.data, &self.cmp, options));
    }
}

impl<T: Debug, C: TryCompare<T>> Debug for PriorityDeque<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

impl<T, C: TryCompare<T, Error = Infallible> + Default> FromIterator<T>
    for PriorityDeque<T, C>
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> PriorityDeque<T, C> {
        PriorityDeque::from_vec_and_comparator(iter.into_iter().collect(), C::default())
    }
}

impl<T, C: TryCompare<T, Error = Infallible>> Extend<T> for PriorityDeque<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.merge(iter);
    }
}

impl<'a, T: 'a + Copy, C: TryCompare<T, Error = Infallible>> Extend<&'a T>
    for PriorityDeque<T, C>
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, C: TryCompare<T>> IntoIterator for PriorityDeque<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> IntoIter<T> { IntoIter(self.data.into_iter()) }
}

impl<'a, T, C: TryCompare<T>> IntoIterator for &'a PriorityDeque<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Iter<'a, T> { self.iter() }
}
