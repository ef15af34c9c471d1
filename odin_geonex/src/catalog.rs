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

//! GeoNEX L1G file catalog
//!
//! L1G collections are organized as `<root>/<tile>/<year>/<doy>/<file>`, e.g.
//! `GEONEX-L1G/h09v03/2020/190/GO17_ABI12B_20200708_1400_GLBG_h09v03_02.hdf`. All record
//! fields are parsed from the file name, not from the directory depth.

use std::{cmp::Ordering, collections::BTreeSet, fmt, path::{Path,PathBuf}, str::FromStr};
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug,info};

use odin_common::{datetime::{day_of_year,parse_hhmm,parse_yyyymmdd,product_time_label}, fs::{filename,matching_subdirs}, ranges::InclusiveRange};
use crate::errors::{Result,OdinGeonexError,op_failed};

lazy_static! {
    pub static ref L1G_RE: Regex = Regex::new(
        r"^([A-Z0-9]+)_([A-Z0-9]+)_(\d{8})_(\d{4})_([A-Z0-9]+)_(h\d{2}v\d{2})_(\d+)\.((?i:hdf|tif|tiff))$"
    ).unwrap();
    static ref TILE_RE: Regex = Regex::new( r"^h\d{2}v\d{2}$").unwrap();
}

pub fn is_tile_id (s: &str)->bool {
    TILE_RE.is_match(s)
}

/// the structured content of a L1G file name
#[derive(Debug,Clone,PartialEq,Eq)]
pub struct L1gFileName {
    pub satellite: String, // e.g. "GO17"
    pub product: String,
    pub date: NaiveDate,
    pub hour: u32,
    pub minute: u32,
    pub region: String,
    pub tile: String,
    pub version: String,
    pub extension: String,
}

impl L1gFileName {
    pub fn from_path<P: AsRef<Path>> (path: &P)->Option<Self> {
        filename(path).and_then( |fname| fname.parse().ok())
    }

    pub fn year (&self)->i32 {
        use chrono::Datelike;
        self.date.year()
    }

    pub fn day_of_year (&self)->u32 {
        day_of_year( &self.date)
    }

    /// the name of the still image we render for this file. Names sort chronologically for a given satellite and tile,
    /// product and version keep files with the same timestamp apart
    pub fn frame_name (&self, ext: &str)->String {
        format!("{}_{}_{}_{:03}_{:02}{:02}_{}_{}.{}", self.satellite, self.tile, self.year(), self.day_of_year(),
                self.hour, self.minute, self.product, self.version, ext)
    }

    /// human readable 'YYYY-MM-DD HHMM' timestamp
    pub fn time_label (&self)->String {
        product_time_label( &self.date, self.hour, self.minute)
    }
}

impl FromStr for L1gFileName {
    type Err = OdinGeonexError;

    fn from_str (s: &str)->Result<Self> {
        let caps = L1G_RE.captures(s).ok_or_else( || op_failed!("not a L1G file name: {s}"))?;
        let date = parse_yyyymmdd( &caps[3]).ok_or_else( || op_failed!("invalid date in {s}"))?;
        let (hour, minute) = parse_hhmm( &caps[4]).ok_or_else( || op_failed!("invalid time in {s}"))?;

        Ok( L1gFileName {
            satellite: caps[1].to_string(),
            product: caps[2].to_string(),
            date, hour, minute,
            region: caps[5].to_string(),
            tile: caps[6].to_string(),
            version: caps[7].to_string(),
            extension: caps[8].to_ascii_lowercase(),
        })
    }
}

/// one catalog entry. Records are ordered by (day_of_year, hour, minute), ties are broken by path
#[derive(Debug,Clone,PartialEq,Eq)]
pub struct FileRecord {
    pub day_of_year: u32,
    pub hour: u32,
    pub minute: u32,
    pub path: PathBuf,
    pub name: L1gFileName,
}

impl FileRecord {
    pub fn from_path (path: PathBuf)->Option<Self> {
        L1gFileName::from_path( &path).map( |name| {
            FileRecord { day_of_year: name.day_of_year(), hour: name.hour, minute: name.minute, path, name }
        })
    }

    #[inline]
    pub fn timestamp_key (&self)->(u32,u32,u32) {
        (self.day_of_year, self.hour, self.minute)
    }
}

impl Ord for FileRecord {
    fn cmp (&self, other: &Self)->Ordering {
        self.timestamp_key().cmp( &other.timestamp_key()).then_with( || self.path.cmp( &other.path))
    }
}

impl PartialOrd for FileRecord {
    fn partial_cmp (&self, other: &Self)->Option<Ordering> { Some( self.cmp(other)) }
}

impl fmt::Display for FileRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03} {:02}:{:02} {}", self.day_of_year, self.hour, self.minute, self.path.display())
    }
}

/// the abstract catalog interface: all files of a tile for a single day
pub trait Catalog {
    fn files (&self, tile: &str, year: i32, day_of_year: u32)->Result<Vec<FileRecord>>;
}

/// a GeoNEX L1G collection on a (local or mounted) file system
#[derive(Debug,Clone)]
pub struct GeoNexCatalog {
    root: PathBuf,
    sensor: String,
}

impl GeoNexCatalog {
    pub fn new (root: impl AsRef<Path>, sensor: impl ToString)->Self {
        GeoNexCatalog { root: root.as_ref().to_path_buf(), sensor: sensor.to_string() }
    }

    pub fn root (&self)->&Path { &self.root }

    pub fn sensor (&self)->&str { &self.sensor }

    /// the tiles for which this collection has data
    pub fn tiles (&self)->Result<Vec<String>> {
        Ok( matching_subdirs( &self.root, &TILE_RE)? )
    }

    pub fn day_dir (&self, tile: &str, year: i32, day_of_year: u32)->PathBuf {
        self.root.join(tile).join( year.to_string()).join( format!("{day_of_year:03}"))
    }
}

impl Catalog for GeoNexCatalog {
    fn files (&self, tile: &str, year: i32, day_of_year: u32)->Result<Vec<FileRecord>> {
        let dir = self.day_dir( tile, year, day_of_year);
        let mut records = Vec::new();

        if dir.is_dir() {
            for entry in std::fs::read_dir(&dir)? {
                let path = entry?.path();
                if !path.is_file() { continue }

                match FileRecord::from_path( path) {
                    Some(rec) if rec.name.tile == tile && rec.name.year() == year && rec.day_of_year == day_of_year => records.push(rec),
                    Some(rec) => debug!("skipping misplaced file {:?}", rec.path),
                    None => {} // not a L1G file
                }
            }
        }

        records.sort();
        Ok(records)
    }
}

/// collect the records for each day in the (inclusive) day range and merge them into a chronologically
/// ordered set that is unique by path. An empty result is not an error
pub fn query (catalog: &dyn Catalog, tile: &str, year: i32, day_range: &InclusiveRange<u32>)->Result<Vec<FileRecord>> {
    let mut set: BTreeSet<FileRecord> = BTreeSet::new();
    let mut seen: BTreeSet<PathBuf> = BTreeSet::new();

    for doy in day_range.iter() {
        for rec in catalog.files( tile, year, doy)? {
            if seen.insert( rec.path.clone()) {
                set.insert( rec);
            }
        }
    }

    Ok( set.into_iter().collect() )
}

/// query a GeoNEX L1G collection rooted at `directory`
pub fn query_collection (directory: impl AsRef<Path>, sensor: &str, tile: &str, year: i32, day_range: &InclusiveRange<u32>)->Result<Vec<FileRecord>> {
    let catalog = GeoNexCatalog::new( directory, sensor);
    let records = query( &catalog, tile, year, day_range)?;
    info!("found {} {} files for tile {} in {} days {}", records.len(), sensor, tile, year, day_range);
    Ok(records)
}

/// sort records chronologically and keep the ones with an hour within `hour_range` (inclusive on both ends)
pub fn filter_hours (mut records: Vec<FileRecord>, hour_range: &InclusiveRange<u32>)->Vec<FileRecord> {
    records.sort();
    records.retain( |r| hour_range.contains( r.hour));
    records
}
