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
#![allow(unused)]

pub mod macros;
pub mod fs;
pub mod datetime;
pub mod ranges;

/// clamp a f32 into [0,1], mapping NaN to 0
#[inline] pub fn unit_clamp (x: f32)->f32 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

/// a simple incremental min/max/avg accumulator
#[derive(Debug,Clone)]
pub struct MinMaxAvg {
    pub n: usize,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

impl MinMaxAvg {
    pub fn new()->Self {
        MinMaxAvg { n: 0, min: f64::MAX, max: f64::MIN, avg: 0.0 }
    }

    pub fn add (&mut self, v: f64) {
        self.n += 1;
        if v < self.min { self.min = v }
        if v > self.max { self.max = v }
        self.avg += (v - self.avg) / self.n as f64;
    }
}

impl Default for MinMaxAvg {
    fn default()->Self { MinMaxAvg::new() }
}
