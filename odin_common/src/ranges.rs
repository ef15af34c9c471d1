/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use std::fmt::{self,Debug,Display};
use serde::{Serialize,Deserialize};

/// a closed interval `[start,end]` of ordered values, (de)serialized as a two element sequence.
/// Construction enforces `start <= end`
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
#[serde(try_from = "[T;2]", into = "[T;2]")]
pub struct InclusiveRange<T> where T: Copy + PartialOrd + Debug {
    start: T,
    end: T
}

impl<T> InclusiveRange<T> where T: Copy + PartialOrd + Debug {
    pub fn new (start: T, end: T)->Result<Self,String> {
        if start <= end {
            Ok( InclusiveRange{start,end} )
        } else {
            Err( format!("invalid range: start {start:?} > end {end:?}") )
        }
    }

    #[inline] pub fn start (&self)->T { self.start }
    #[inline] pub fn end (&self)->T { self.end }

    #[inline] pub fn contains (&self, v: T)->bool {
        v >= self.start && v <= self.end
    }

    /// check if the range is within [min,max]
    pub fn is_within (&self, min: T, max: T)->bool {
        self.start >= min && self.end <= max
    }
}

impl InclusiveRange<u32> {
    pub fn iter (&self)->std::ops::RangeInclusive<u32> {
        self.start..=self.end
    }

    pub fn len (&self)->usize {
        (self.end - self.start) as usize + 1
    }
}

impl<T> TryFrom<[T;2]> for InclusiveRange<T> where T: Copy + PartialOrd + Debug {
    type Error = String;

    fn try_from (a: [T;2])->Result<Self,String> {
        InclusiveRange::new( a[0], a[1])
    }
}

impl<T> From<InclusiveRange<T>> for [T;2] where T: Copy + PartialOrd + Debug {
    fn from (r: InclusiveRange<T>)->[T;2] {
        [r.start, r.end]
    }
}

impl<T> Display for InclusiveRange<T> where T: Copy + PartialOrd + Debug + Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{}]", self.start, self.end)
    }
}
