// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::convert::Infallible;
use std::ops::{Deref, DerefMut};

use compare::Natural;

use crate::heap;
use crate::order::{infallible, TryCompare};
use crate::PriorityDeque;

/// A mutable reference to the smallest or greatest item of a `PriorityDeque`.
///
/// Acquire through [`PriorityDeque::peek_min_mut`] or [`PriorityDeque::peek_max_mut`]. The
/// item may be changed freely; the deque is put back in order when the guard is dropped.
///
/// # Examples
///
/// ```
/// use priority_deque::PriorityDeque;
///
/// let mut deque = PriorityDeque::from(vec![2, 1, 3]);
/// *deque.peek_min_mut().unwrap() = 5;
/// assert_eq!(deque.min_max(), Some((&2, &5)));
/// ```
pub struct PeekMut<'a, T: 'a, C: 'a + TryCompare<T, Error = Infallible> = Natural<T>> {
    deque: &'a mut PriorityDeque<T, C>,
    index: usize,
    sift: bool,
}

impl<'a, T: 'a, C: TryCompare<T, Error = Infallible>> PeekMut<'a, T, C> {
    pub(crate) fn new(deque: &'a mut PriorityDeque<T, C>, index: usize) -> PeekMut<'a, T, C> {
        debug_assert!(index < deque.data.len());
        PeekMut { deque, index, sift: true }
    }

    /// Removes the peeked item from the deque and returns it.
    pub fn pop(mut self) -> T {
        self.sift = false;
        let deque = &mut *self.deque;
        infallible(heap::pop_interval_heap(&mut deque.data, self.index, &deque.cmp));
        deque.data.pop().expect("peeked item is last")
    }
}

impl<'a, T: 'a, C: TryCompare<T, Error = Infallible>> Drop for PeekMut<'a, T, C> {
    fn drop(&mut self) {
        if self.sift {
            let deque = &mut *self.deque;
            infallible(heap::update_interval_heap(&mut deque.data, self.index, &deque.cmp));
        }
    }
}

impl<'a, T: 'a, C: TryCompare<T, Error = Infallible>> Deref for PeekMut<'a, T, C> {
    type Target = T;
    fn deref(&self) -> &T { &self.deque.data[self.index] }
}

impl<'a, T: 'a, C: TryCompare<T, Error = Infallible>> DerefMut for PeekMut<'a, T, C> {
    fn deref_mut(&mut self) -> &mut T { &mut self.deque.data[self.index] }
}
