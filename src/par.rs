// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Building interval heaps on several threads.
//!
//! The nodes of one layer of the heap are split into two blocks. Each
//! block's subtrees are built on their own task, and only once both have
//! joined is the layer above fixed. Sibling subtrees share no offsets, so
//! the tasks never touch the same item.

use std::marker::PhantomData;
use std::ptr;

use crate::heap::{self, fix_node, order_node, sift_down};
use crate::layout::{left, Slots};
use crate::order::TryCompare;

/// Tuning for [`par_make_interval_heap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildOptions {
    /// Slices of at most this many items are built on the calling thread.
    pub min_len: usize,
    /// Most tasks to spread the build over. The size of the current rayon
    /// pool caps this as well.
    pub max_threads: usize,
    /// Blocks spanning fewer offsets than this are not split further.
    pub min_branch_len: usize,
}

impl Default for BuildOptions {
    fn default() -> BuildOptions {
        BuildOptions {
            min_len: 32,
            max_threads: rayon::current_num_threads(),
            min_branch_len: 0,
        }
    }
}

/// One buffer handed to several tasks at once.
///
/// Each task is given the root nodes of subtrees no other task touches, and
/// every offset it reaches through `get` or `swap` lies in those subtrees.
struct SharedSlots<'a, T> {
    ptr: *mut T,
    len: usize,
    _marker: PhantomData<&'a mut [T]>,
}

impl<'a, T> SharedSlots<'a, T> {
    fn new(v: &'a mut [T]) -> SharedSlots<'a, T> {
        SharedSlots { ptr: v.as_mut_ptr(), len: v.len(), _marker: PhantomData }
    }
}

impl<'a, T> Clone for SharedSlots<'a, T> {
    fn clone(&self) -> SharedSlots<'a, T> { *self }
}

impl<'a, T> Copy for SharedSlots<'a, T> {}

// SAFETY: items only move between threads (hence `T: Send`), and no two
// tasks access the same offset; see the type's docs.
unsafe impl<'a, T: Send> Send for SharedSlots<'a, T> {}
unsafe impl<'a, T: Send> Sync for SharedSlots<'a, T> {}

impl<'a, T> Slots<T> for SharedSlots<'a, T> {
    #[inline]
    fn len(&self) -> usize { self.len }

    #[inline]
    fn get(&self, i: usize) -> &T {
        assert!(i < self.len);
        // SAFETY: in bounds, and no other task writes offset `i` while
        // this one may read it.
        unsafe { &*self.ptr.add(i) }
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        assert!(a < self.len && b < self.len);
        // SAFETY: in bounds and owned by this task; `ptr::swap` allows
        // `a == b`.
        unsafe { ptr::swap(self.ptr.add(a), self.ptr.add(b)) }
    }
}

/// Rearranges the items of `v` into an interval heap, spreading the work
/// over the current rayon pool.
///
/// Produces the same arrangement as [`heap::make_interval_heap`], which it
/// falls back to for short slices or when only one thread is available.
/// On comparator failure the items of `v` are all still there, but in no
/// particular order.
///
/// # Examples
///
/// ```
/// use priority_deque::heap;
/// use priority_deque::par::{par_make_interval_heap, BuildOptions};
///
/// let mut v: Vec<u32> = (0..10_000).map(|i| i * 7919 % 10_007).collect();
/// par_make_interval_heap(&mut v, &compare::natural(), &BuildOptions::default()).unwrap();
/// assert!(heap::is_interval_heap(&v, &compare::natural()));
/// ```
pub fn par_make_interval_heap<T: Send, C: TryCompare<T> + Sync>(
    v: &mut [T],
    cmp: &C,
    options: &BuildOptions,
) -> Result<(), C::Error>
where
    C::Error: Send,
{
    let threads = options.max_threads.min(rayon::current_num_threads());
    if v.len() < 2 || v.len() <= options.min_len || threads <= 1 {
        return heap::make_interval_heap(v, cmp);
    }
    log::trace!("building interval heap of {} items with {} threads", v.len(), threads);
    make_block(SharedSlots::new(v), cmp, options, 0, 2, threads)
}

/// Builds the subtrees rooted at the nodes with left offsets in
/// `begin..end`, all on one layer of the heap.
fn make_block<T: Send, C: TryCompare<T> + Sync>(
    mut v: SharedSlots<'_, T>,
    cmp: &C,
    options: &BuildOptions,
    begin: usize,
    end: usize,
    threads: usize,
) -> Result<(), C::Error>
where
    C::Error: Send,
{
    let len = v.len();
    let end_parent = len / 2 - 1;

    if begin < end_parent {
        let child_begin = (begin + 1) * 2;
        let child_end = (end + 1) * 2;
        if threads > 1 && end - begin >= options.min_branch_len {
            let child_mid = begin + end + 2;
            let split = threads / 2;
            log::trace!("splitting heap build at offset {} ({} + {} threads)",
                        child_mid, threads - split, split);
            let (lo, hi) = rayon::join(
                move || make_block(v, cmp, options, child_begin, child_mid, threads - split),
                move || make_block(v, cmp, options, child_mid, child_end, split));
            lo?;
            hi?;
        } else {
            make_block(v, cmp, options, child_begin, child_end, threads)?;
        }
        for l in (begin..end).step_by(2).rev() {
            fix_node(&mut v, l, cmp)?;
        }
    } else {
        // The bottom layer. A lone last item is in order already.
        let end = end.min(left(len));
        for l in (begin + 2..end).step_by(2).rev() {
            order_node(&mut v, l, cmp)?;
        }
        if begin + 1 < end {
            // Only this node can have a child, and only a lone one.
            let limit = if begin <= end_parent { (begin + 1) * 2 } else { len };
            order_node(&mut v, begin, cmp)?;
            sift_down(&mut v, begin + 1, cmp, limit)?;
            sift_down(&mut v, begin, cmp, limit)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use compare::natural;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use thiserror::Error;

    use super::{par_make_interval_heap, BuildOptions};
    use crate::heap::{is_interval_heap, make_interval_heap};
    use crate::order::TryCompare;
    use crate::testing::sorted;

    fn pool(threads: usize) -> rayon::ThreadPool {
        rayon::ThreadPoolBuilder::new().num_threads(threads).build().unwrap()
    }

    fn eager() -> BuildOptions {
        BuildOptions { min_len: 0, max_threads: 8, min_branch_len: 0 }
    }

    #[test]
    fn test_default_options() {
        let options = pool(3).install(BuildOptions::default);
        assert_eq!(options.max_threads, 3);
        assert_eq!(options.min_len, 32);
    }

    #[test]
    fn test_matches_sequential_build() {
        let mut rng = StdRng::seed_from_u64(11);
        let cmp = natural();
        pool(4).install(|| {
            for len in (0..300).chain([1023, 1024, 1025, 4097]) {
                let v: Vec<u32> = (0..len).map(|_| rng.gen_range(0..500)).collect();
                let mut seq = v.clone();
                make_interval_heap(&mut seq, &cmp).unwrap();
                let mut par = v.clone();
                par_make_interval_heap(&mut par, &cmp, &eager()).unwrap();
                assert!(is_interval_heap(&par, &cmp), "{:?}", par);
                assert_eq!(par, seq);
            }
        });
    }

    #[test]
    fn test_branch_limits() {
        let mut rng = StdRng::seed_from_u64(12);
        let cmp = natural();
        let v: Vec<i64> = (0..5000).map(|_| rng.gen_range(-1000..1000)).collect();
        pool(8).install(|| {
            for min_branch_len in [0, 4, 64, 1 << 20] {
                for max_threads in [1, 2, 3, 8] {
                    let options = BuildOptions { min_len: 0, max_threads, min_branch_len };
                    let mut w = v.clone();
                    par_make_interval_heap(&mut w, &cmp, &options).unwrap();
                    assert!(is_interval_heap(&w, &cmp));
                    assert_eq!(sorted(w), sorted(v.iter().cloned()));
                }
            }
        });
    }

    #[derive(Debug, Error)]
    #[error("out of comparisons")]
    struct Exhausted;

    /// Natural order that fails after a shared number of comparisons.
    struct Budget(AtomicUsize);

    impl TryCompare<u32> for Budget {
        type Error = Exhausted;

        fn try_compares_lt(&self, l: &u32, r: &u32) -> Result<bool, Exhausted> {
            self.0.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                  .map(|_| l < r)
                  .map_err(|_| Exhausted)
        }
    }

    #[test]
    fn test_no_loss_on_failure() {
        let mut rng = StdRng::seed_from_u64(13);
        let v: Vec<u32> = (0..2000).map(|_| rng.gen_range(0..100)).collect();
        pool(4).install(|| {
            for budget in [0, 1, 10, 500, 1000] {
                let mut w = v.clone();
                let res = par_make_interval_heap(&mut w, &Budget(AtomicUsize::new(budget)),
                                                 &eager());
                assert!(res.is_err());
                assert_eq!(sorted(w), sorted(v.iter().cloned()));
            }
        });
    }
}
