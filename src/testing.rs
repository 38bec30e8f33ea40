// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Helpers shared by the unit tests.

use std::cell::Cell;
use std::rc::Rc;

use thiserror::Error;

use crate::order::TryCompare;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("injected comparator failure")]
pub struct Fault;

/// Natural order that fails once its budget of comparisons runs out.
///
/// Clones share the budget, so a deque's comparator can be armed from
/// outside.
#[derive(Clone, Debug, Default)]
pub struct Faulty {
    budget: Rc<Cell<Option<usize>>>,
}

impl Faulty {
    /// Lets `n` more comparisons succeed and fails every one after.
    pub fn arm(&self, n: usize) {
        self.budget.set(Some(n));
    }

    /// Never fails again.
    pub fn disarm(&self) {
        self.budget.set(None);
    }
}

impl TryCompare<i32> for Faulty {
    type Error = Fault;

    fn try_compares_lt(&self, l: &i32, r: &i32) -> Result<bool, Fault> {
        match self.budget.get() {
            Some(0) => Err(Fault),
            Some(n) => {
                self.budget.set(Some(n - 1));
                Ok(l < r)
            }
            None => Ok(l < r),
        }
    }
}

/// The items in ascending order, for comparing multisets.
pub fn sorted<T: Ord, I: IntoIterator<Item = T>>(items: I) -> Vec<T> {
    let mut v: Vec<T> = items.into_iter().collect();
    v.sort();
    v
}
