// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Comparators that may fail.

use std::convert::Infallible;

use compare::Compare;

use crate::layout::Side;

/// A strict weak ordering whose evaluation can fail.
///
/// `try_compares_lt(l, r)` answers "does `l` come strictly before `r`?".
/// The relation must be irreflexive, asymmetric and transitive, but need
/// not be total: when neither item comes before the other, their relative
/// position in the heap is unspecified.
///
/// Every [`Compare`] is a `TryCompare` that never fails, so closures, the
/// natural order and the `compare` adaptors can be used directly.
///
/// Because of that blanket impl, a fallible comparator is implemented once
/// per concrete item type (`impl TryCompare<i32> for MyCmp`), not generically
/// (`impl<T: Ord> TryCompare<T> for MyCmp`): the generic form overlaps any
/// `Compare<T>` impl another crate could add for `MyCmp`, and the compiler
/// rejects it. One comparator may still carry impls for several item types.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use priority_deque::{PriorityDeque, TryCompare};
///
/// struct Budget(Cell<u32>);
///
/// impl TryCompare<i32> for Budget {
///     type Error = &'static str;
///
///     fn try_compares_lt(&self, l: &i32, r: &i32) -> Result<bool, Self::Error> {
///         match self.0.get() {
///             0 => Err("out of comparisons"),
///             n => { self.0.set(n - 1); Ok(l < r) }
///         }
///     }
/// }
///
/// let mut deque = PriorityDeque::with_comparator(Budget(Cell::new(0)));
/// assert!(deque.try_push(1).is_ok()); // a lone item needs no comparison
/// assert!(deque.try_push(2).is_err());
/// assert_eq!(deque.len(), 1);
/// ```
pub trait TryCompare<T: ?Sized> {
    /// What a failed comparison reports.
    type Error;

    /// Returns whether `l` comes strictly before `r`.
    fn try_compares_lt(&self, l: &T, r: &T) -> Result<bool, Self::Error>;
}

impl<T: ?Sized, C: Compare<T> + ?Sized> TryCompare<T> for C {
    type Error = Infallible;

    #[inline]
    fn try_compares_lt(&self, l: &T, r: &T) -> Result<bool, Infallible> {
        Ok(self.compares_lt(l, r))
    }
}

impl Side {
    /// Whether `a` belongs nearer the root than `b` on this side: smaller
    /// on the min side, greater on the max side.
    #[inline]
    pub(crate) fn before<T, C: TryCompare<T>>(
        self,
        cmp: &C,
        a: &T,
        b: &T,
    ) -> Result<bool, C::Error> {
        match self {
            Side::Min => cmp.try_compares_lt(a, b),
            Side::Max => cmp.try_compares_lt(b, a),
        }
    }
}

/// Unwraps a result whose error cannot exist.
#[inline]
pub(crate) fn infallible<T>(res: Result<T, Infallible>) -> T {
    match res {
        Ok(v) => v,
        Err(e) => match e {},
    }
}

#[cfg(test)]
mod test {
    use compare::{natural, Compare};

    use super::TryCompare;
    use crate::layout::Side;

    #[test]
    fn test_compare_is_infallible() {
        let cmp = natural::<i32>();
        assert_eq!(cmp.try_compares_lt(&1, &2), Ok(true));
        assert_eq!(cmp.try_compares_lt(&2, &2), Ok(false));
        assert_eq!(cmp.rev().try_compares_lt(&1, &2), Ok(false));

        let by_len = |l: &&str, r: &&str| l.len().cmp(&r.len());
        assert_eq!(by_len.try_compares_lt(&"ab", &"abc"), Ok(true));
    }

    /// A fallible comparator serving two item types through one impl each.
    struct Checked;

    #[derive(Debug, PartialEq)]
    struct Nan;

    impl TryCompare<f64> for Checked {
        type Error = Nan;

        fn try_compares_lt(&self, l: &f64, r: &f64) -> Result<bool, Nan> {
            l.partial_cmp(r).map(|o| o.is_lt()).ok_or(Nan)
        }
    }

    impl TryCompare<f32> for Checked {
        type Error = Nan;

        fn try_compares_lt(&self, l: &f32, r: &f32) -> Result<bool, Nan> {
            l.partial_cmp(r).map(|o| o.is_lt()).ok_or(Nan)
        }
    }

    #[test]
    fn test_per_type_impls() {
        assert_eq!(Checked.try_compares_lt(&1.0f64, &2.0), Ok(true));
        assert_eq!(Checked.try_compares_lt(&2.0f32, &1.0), Ok(false));
        assert_eq!(Checked.try_compares_lt(&f64::NAN, &1.0), Err(Nan));

        let mut deque = crate::PriorityDeque::with_comparator(Checked);
        for x in [3.5f64, -1.0, 2.0] {
            deque.try_push(x).unwrap();
        }
        assert_eq!(deque.min_max(), Some((&-1.0, &3.5)));
        assert!(matches!(deque.try_push(f64::NAN), Err(crate::Error::Compare(Nan))));
        assert_eq!(deque.len(), 3);
    }

    #[test]
    fn test_before() {
        let cmp = natural::<i32>();
        assert_eq!(Side::Min.before(&cmp, &1, &2), Ok(true));
        assert_eq!(Side::Max.before(&cmp, &1, &2), Ok(false));
        assert_eq!(Side::Max.before(&cmp, &3, &2), Ok(true));
        assert_eq!(Side::Min.before(&cmp, &2, &2), Ok(false));
        assert_eq!(Side::Max.before(&cmp, &2, &2), Ok(false));
    }
}
