// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::TryReserveError;

use thiserror::Error;

/// Why a fallible [`PriorityDeque`](crate::PriorityDeque) operation failed.
///
/// `E` is the comparator's error type.
#[derive(Debug, Error)]
pub enum Error<E> {
    /// The comparator reported a failure.
    #[error("comparator failed")]
    Compare(#[source] E),
    /// The backing vector could not grow.
    #[error("failed to reserve room for more items")]
    Reserve(#[from] TryReserveError),
}

impl<E> Error<E> {
    /// The comparator's error, if that is what failed.
    pub fn into_compare(self) -> Option<E> {
        match self {
            Error::Compare(e) => Some(e),
            Error::Reserve(_) => None,
        }
    }
}
