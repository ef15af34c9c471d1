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

use std::{fs, path::{Path,PathBuf}};
use odin_common::ranges::InclusiveRange;
use odin_geonex::{
    catalog::{filter_hours, query, query_collection, Catalog, FileRecord, GeoNexCatalog, L1gFileName},
    Result
};

/// create an (empty) L1G file in the GeoNEX directory layout
fn touch_l1g (root: &Path, tile: &str, year: i32, doy: u32, date: &str, hhmm: &str)->Result<PathBuf> {
    let dir = root.join(tile).join( year.to_string()).join( format!("{doy:03}"));
    fs::create_dir_all( &dir)?;
    let path = dir.join( format!("GO17_ABI12B_{date}_{hhmm}_GLBG_{tile}_02.tif"));
    fs::write( &path, b"")?;
    Ok(path)
}

fn range (start: u32, end: u32)->InclusiveRange<u32> {
    InclusiveRange::new( start, end).unwrap()
}

fn keys (records: &[FileRecord])->Vec<(u32,u32,u32)> {
    records.iter().map( |r| r.timestamp_key()).collect()
}

#[test]
fn test_parse_file_name ()->Result<()> {
    let name: L1gFileName = "GO17_ABI12B_20200708_1430_GLBG_h09v03_02.hdf".parse()?;
    assert_eq!( name.satellite, "GO17");
    assert_eq!( name.tile, "h09v03");
    assert_eq!( name.year(), 2020);
    assert_eq!( name.day_of_year(), 190);
    assert_eq!( (name.hour, name.minute), (14, 30));
    assert_eq!( name.extension, "hdf");
    assert_eq!( name.frame_name("png"), "GO17_h09v03_2020_190_1430_ABI12B_02.png");
    assert_eq!( name.time_label(), "2020-07-08 1430");

    assert!( "GO17_ABI12B_20200708_1430_GLBG_h09v03_02.nc".parse::<L1gFileName>().is_err());
    assert!( "GO17_ABI12B_20201308_1430_GLBG_h09v03_02.hdf".parse::<L1gFileName>().is_err()); // month 13
    assert!( "GO17_ABI12B_20200708_2460_GLBG_h09v03_02.hdf".parse::<L1gFileName>().is_err());
    assert!( "readme.txt".parse::<L1gFileName>().is_err());

    // independent of directory depth
    let rec = FileRecord::from_path( PathBuf::from("/a/b/c/d/GO17_ABI12B_20200709_0005_GLBG_h09v03_02.TIF"));
    assert_eq!( rec.map( |r| r.timestamp_key()), Some((191, 0, 5)));
    Ok(())
}

#[test]
fn test_query_and_filter ()->Result<()> {
    let dir = tempfile::tempdir()?;
    let root = dir.path();

    touch_l1g( root, "h09v03", 2020, 190, "20200708", "1600")?;
    touch_l1g( root, "h09v03", 2020, 190, "20200708", "1400")?;
    touch_l1g( root, "h09v03", 2020, 191, "20200709", "1430")?;
    touch_l1g( root, "h09v03", 2020, 193, "20200711", "1400")?; // outside of day range
    touch_l1g( root, "h10v03", 2020, 190, "20200708", "1400")?; // other tile
    fs::write( root.join("h09v03/2020/190/notes.txt"), b"not a L1G file")?;

    let days = range( 190, 192);
    let records = query_collection( root, "G17", "h09v03", 2020, &days)?;
    assert_eq!( keys(&records), vec![(190,14,0), (190,16,0), (191,14,30)]);

    let hours = range( 14, 15);
    let filtered = filter_hours( records, &hours);
    assert_eq!( keys(&filtered), vec![(190,14,0), (191,14,30)]);

    // idempotent
    let again = filter_hours( filtered.clone(), &hours);
    assert_eq!( again, filtered);
    Ok(())
}

#[test]
fn test_inclusive_hour_bounds ()->Result<()> {
    let dir = tempfile::tempdir()?;
    let root = dir.path();
    for hhmm in ["1359", "1400", "1559", "1600"] {
        touch_l1g( root, "h09v03", 2020, 190, "20200708", hhmm)?;
    }

    let records = query_collection( root, "G17", "h09v03", 2020, &range( 190, 190))?;
    let filtered = filter_hours( records, &range( 14, 15));
    assert_eq!( keys(&filtered), vec![(190,14,0), (190,15,59)]);
    Ok(())
}

#[test]
fn test_empty_collection ()->Result<()> {
    let dir = tempfile::tempdir()?;
    let records = query_collection( dir.path().join("nonexistent"), "G17", "h09v03", 2020, &range( 190, 192))?;
    assert!( records.is_empty());
    Ok(())
}

#[test]
fn test_misplaced_files ()->Result<()> {
    let dir = tempfile::tempdir()?;
    let root = dir.path();

    // file for day 191 stored in the directory of day 190
    let dir190 = root.join("h09v03/2020/190");
    fs::create_dir_all( &dir190)?;
    fs::write( dir190.join("GO17_ABI12B_20200709_1400_GLBG_h09v03_02.tif"), b"")?;
    touch_l1g( root, "h09v03", 2020, 190, "20200708", "1400")?;

    let catalog = GeoNexCatalog::new( root, "G17");
    let records = catalog.files( "h09v03", 2020, 190)?;
    assert_eq!( keys(&records), vec![(190,14,0)]);

    let tiles = catalog.tiles()?;
    assert_eq!( tiles, vec!["h09v03".to_string()]);
    Ok(())
}

/// a catalog that reports the same file for several days
struct OverlappingCatalog { path: PathBuf }

impl Catalog for OverlappingCatalog {
    fn files (&self, _tile: &str, _year: i32, _doy: u32)->Result<Vec<FileRecord>> {
        Ok( FileRecord::from_path( self.path.clone()).into_iter().collect())
    }
}

#[test]
fn test_query_unique_by_path ()->Result<()> {
    let catalog = OverlappingCatalog { path: PathBuf::from("/data/GO17_ABI12B_20200708_1400_GLBG_h09v03_02.tif") };
    let records = query( &catalog, "h09v03", 2020, &range( 190, 195))?;
    assert_eq!( records.len(), 1);
    Ok(())
}
