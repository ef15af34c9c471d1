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

//! calendar helpers for satellite products that are organized by year and day-of-year (DOY)

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

pub fn is_leap_year (year: i32)->bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_year (year: i32)->u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// 1-based day of year
#[inline]
pub fn day_of_year (date: &NaiveDate)->u32 {
    date.ordinal()
}

/// parse a compact 'YYYYMMDD' date spec
pub fn parse_yyyymmdd (s: &str)->Option<NaiveDate> {
    if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
        let y: i32 = s[0..4].parse().ok()?;
        let m: u32 = s[4..6].parse().ok()?;
        let d: u32 = s[6..8].parse().ok()?;
        NaiveDate::from_ymd_opt( y, m, d)
    } else {
        None
    }
}

/// parse a compact 'HHMM' time spec into (hour,minute)
pub fn parse_hhmm (s: &str)->Option<(u32,u32)> {
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        let h: u32 = s[0..2].parse().ok()?;
        let m: u32 = s[2..4].parse().ok()?;
        if h < 24 && m < 60 { Some((h,m)) } else { None }
    } else {
        None
    }
}

/// the 'YYYY-MM-DD HHMM' label we use to annotate products
pub fn product_time_label (date: &NaiveDate, hour: u32, minute: u32)->String {
    format!("{} {:02}{:02}", date.format("%Y-%m-%d"), hour, minute)
}
