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

use std::fs;
use odin_geonex::{config::{load_jobs, JobSet}, OdinGeonexError, Result};

const TOML_JOBS: &str = r#"
[west_summer]
collection = "/data/geonex/GOES17/GEONEX-L1G"
sensor = "G17"
tile = "h09v03"
year = 2020
doys = [190, 192]
hours = [14, 21]
frames = 150
remove = "true"
name = "goes17_h09v03"

[east_fall]
collection = "/data/geonex/GOES16/GEONEX-L1G"
sensor = "G16"
tile = "h14v03"
year = 2019
doys = [280, 281]
hours = [12, 12]
frames = 200
remove = false
name = "goes16_h14v03"
mix = 0.1
frame_size = 512
annotate = false
"#;

#[test]
fn test_toml_jobs ()->Result<()> {
    let jobs = JobSet::from_toml_str( TOML_JOBS)?;
    assert_eq!( jobs.len(), 2);

    // processed in job name order
    let names: Vec<&str> = jobs.jobs.iter().map( |j| j.name.as_str()).collect();
    assert_eq!( names, vec!["east_fall", "west_summer"]);

    let west = &jobs.get("west_summer").unwrap().spec;
    assert_eq!( west.sensor, "G17");
    assert_eq!( (west.day_range.start(), west.day_range.end()), (190, 192));
    assert_eq!( (west.hour_range.start(), west.hour_range.end()), (14, 21));
    assert_eq!( west.frame_duration_ms, 150);
    assert!( west.remove_intermediate);
    assert_eq!( west.output_name, "goes17_h09v03");
    assert_eq!( west.target_sensor, "H8");
    assert_eq!( west.mix, 0.05);
    assert_eq!( west.contrast, 1.75);
    assert_eq!( west.frame_size, None);
    assert!( west.annotate);

    let east = &jobs.get("east_fall").unwrap().spec;
    assert!( !east.remove_intermediate);
    assert_eq!( east.mix, 0.1);
    assert_eq!( east.frame_size, Some(512));
    assert!( !east.annotate);
    Ok(())
}

#[test]
fn test_ron_jobs ()->Result<()> {
    let input = r#"{
        "west_summer": (
            collection: "/data/geonex/GOES17/GEONEX-L1G",
            sensor: "G17",
            tile: "h09v03",
            year: 2020,
            doys: (190, 192),
            hours: (14, 15),
            frames: 100,
            remove: true,
            name: "west",
        ),
    }"#;

    let jobs = JobSet::from_ron_str( input)?;
    assert_eq!( jobs.len(), 1);
    let spec = &jobs.jobs[0].spec;
    assert_eq!( spec.hour_range.len(), 2);
    assert!( spec.remove_intermediate);
    Ok(())
}

fn job_toml (extra: &str, doys: &str, hours: &str, remove: &str)->String {
    format!(r#"
[job]
collection = "/data"
sensor = "G17"
tile = "h09v03"
year = 2020
doys = {doys}
hours = {hours}
frames = 100
remove = {remove}
name = "anim"
{extra}
"#)
}

#[test]
fn test_invalid_jobs () {
    // valid baseline
    assert!( JobSet::from_toml_str( &job_toml( "", "[190,192]", "[14,15]", "true")).is_ok());
    assert!( JobSet::from_toml_str( &job_toml( "", "[366,366]", "[0,23]", "\"FALSE\"")).is_ok()); // leap year

    // unknown key
    assert!( JobSet::from_toml_str( &job_toml( "speed = 3", "[190,192]", "[14,15]", "true")).is_err());
    // reversed and out of bounds ranges
    assert!( JobSet::from_toml_str( &job_toml( "", "[192,190]", "[14,15]", "true")).is_err());
    assert!( JobSet::from_toml_str( &job_toml( "", "[0,2]", "[14,15]", "true")).is_err());
    assert!( JobSet::from_toml_str( &job_toml( "", "[190,192]", "[14,24]", "true")).is_err());
    // not a flag
    assert!( JobSet::from_toml_str( &job_toml( "", "[190,192]", "[14,15]", "\"yes\"")).is_err());
    // out of range tunables
    assert!( JobSet::from_toml_str( &job_toml( "mix = 1.5", "[190,192]", "[14,15]", "true")).is_err());
    assert!( JobSet::from_toml_str( &job_toml( "frame_size = 0", "[190,192]", "[14,15]", "true")).is_err());

    match JobSet::from_toml_str( "") {
        Err(OdinGeonexError::ConfigError(_)) => {}
        other => panic!("expected config error for empty job set, got {other:?}")
    }
}

#[test]
fn test_load_jobs ()->Result<()> {
    let dir = tempfile::tempdir()?;

    let path = dir.path().join("jobs.toml");
    fs::write( &path, TOML_JOBS)?;
    assert_eq!( load_jobs( &path)?.len(), 2);

    let path = dir.path().join("jobs.yaml");
    fs::write( &path, TOML_JOBS)?;
    assert!( load_jobs( &path).is_err());
    Ok(())
}
