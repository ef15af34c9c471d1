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

//! strongly typed animation job configuration
//!
//! A job config file contains one named section per animation job, e.g. in TOML:
//! ```toml
//! [goes17_summer]
//! collection = "/nex/datapool/geonex/public/GOES17/GEONEX-L1G/"
//! sensor = "G17"
//! tile = "h09v03"
//! year = 2020
//! doys = [190, 192]
//! hours = [14, 21]
//! frames = 150
//! remove = "true"
//! name = "goes17_h09v03"
//! ```
//! The same structure can be expressed in RON as a map from job names to job specs.
//! Day and hour ranges are inclusive on both ends.

use std::{collections::BTreeMap, path::{Path,PathBuf}, fmt};
use serde::{Deserialize,Deserializer};

use odin_common::{fs::{EnvPathBuf,extension,filepath_contents}, ranges::InclusiveRange, datetime::days_in_year};
use crate::{catalog::is_tile_id, errors::{Result,OdinGeonexError,config_error}, raster::tile_pixels};

pub const DEFAULT_TARGET_SENSOR: &str = "H8";
pub const DEFAULT_MIX: f32 = 0.05;
pub const DEFAULT_RESOLUTION_KM: f64 = 1.0;
pub const DEFAULT_CONTRAST: f32 = 1.75;

fn default_target_sensor()->String { DEFAULT_TARGET_SENSOR.to_string() }
fn default_mix()->f32 { DEFAULT_MIX }
fn default_resolution_km()->f64 { DEFAULT_RESOLUTION_KM }
fn default_contrast()->f32 { DEFAULT_CONTRAST }
fn default_true()->bool { true }

/// the parameters of one animation pipeline run
#[derive(Deserialize,Debug,Clone)]
#[serde(deny_unknown_fields)]
pub struct JobSpec {
    #[serde(rename = "collection")]
    pub source_directory: EnvPathBuf,

    pub sensor: String,
    pub tile: String,
    pub year: i32,

    #[serde(rename = "doys")]
    pub day_range: InclusiveRange<u32>,

    #[serde(rename = "hours")]
    pub hour_range: InclusiveRange<u32>,

    #[serde(rename = "frames")]
    pub frame_duration_ms: u32,

    #[serde(rename = "remove", deserialize_with = "deserialize_flag")]
    pub remove_intermediate: bool,

    #[serde(rename = "name")]
    pub output_name: String,

    #[serde(default = "default_target_sensor")]
    pub target_sensor: String,

    /// fraction of the translated green band in the composite green channel [0..1]
    #[serde(default = "default_mix")]
    pub mix: f32,

    #[serde(default = "default_resolution_km")]
    pub resolution_km: f64,

    #[serde(default = "default_contrast")]
    pub contrast: f32,

    /// optional edge length in pixels of the (square) rendered frames. Native raster size if not set
    #[serde(default)]
    pub frame_size: Option<u32>,

    #[serde(default = "default_true")]
    pub annotate: bool,
}

impl JobSpec {
    pub fn validate (&self, job: &str)->Result<()> {
        if self.sensor.trim().is_empty() { return Err( config_error!("job '{job}': empty sensor")) }
        if self.target_sensor.trim().is_empty() { return Err( config_error!("job '{job}': empty target_sensor")) }
        if !is_tile_id( &self.tile) { return Err( config_error!("job '{job}': invalid tile '{}' (expected hNNvNN)", self.tile)) }

        let max_doy = days_in_year( self.year);
        if !self.day_range.is_within( 1, max_doy) {
            return Err( config_error!("job '{job}': doys {} not within [1..{max_doy}] of {}", self.day_range, self.year))
        }
        if !self.hour_range.is_within( 0, 23) {
            return Err( config_error!("job '{job}': hours {} not within [0..23]", self.hour_range))
        }

        if self.frame_duration_ms == 0 { return Err( config_error!("job '{job}': frames has to be > 0")) }
        if !(0.0..=1.0).contains( &self.mix) { return Err( config_error!("job '{job}': mix {} not within [0..1]", self.mix)) }
        if !(self.contrast > 0.0) { return Err( config_error!("job '{job}': contrast has to be > 0")) }
        if let Some(0) = self.frame_size { return Err( config_error!("job '{job}': frame_size has to be > 0")) }
        tile_pixels( self.resolution_km).map_err( |e| config_error!("job '{job}': {e}"))?;

        let name = self.output_name.trim();
        if name.is_empty() || name.contains(['/','\\']) || name == "." || name == ".." {
            return Err( config_error!("job '{job}': invalid output name '{}'", self.output_name))
        }

        Ok(())
    }
}

/// a named JobSpec
#[derive(Debug,Clone)]
pub struct AnimationJob {
    pub name: String,
    pub spec: JobSpec,
}

/// all jobs of a config file, ordered by job name
#[derive(Debug,Clone)]
pub struct JobSet {
    pub jobs: Vec<AnimationJob>,
}

impl JobSet {
    pub fn from_map (map: BTreeMap<String,JobSpec>)->Result<Self> {
        if map.is_empty() { return Err( config_error!("no animation jobs configured")) }

        let mut jobs = Vec::with_capacity( map.len());
        for (name,spec) in map.into_iter() {
            spec.validate( &name)?;
            jobs.push( AnimationJob{ name, spec });
        }
        Ok( JobSet{ jobs } )
    }

    pub fn from_toml_str (s: &str)->Result<Self> {
        let map: BTreeMap<String,JobSpec> = toml::from_str(s)?;
        Self::from_map( map)
    }

    pub fn from_ron_str (s: &str)->Result<Self> {
        let map: BTreeMap<String,JobSpec> = ron::from_str(s)?;
        Self::from_map( map)
    }

    pub fn get (&self, name: &str)->Option<&AnimationJob> {
        self.jobs.iter().find( |j| j.name == name)
    }

    pub fn len (&self)->usize { self.jobs.len() }

    pub fn is_empty (&self)->bool { self.jobs.is_empty() }
}

/// load jobs from a `.toml` or `.ron` file
pub fn load_jobs<P: AsRef<Path>> (path: P)->Result<JobSet> {
    let path = path.as_ref();
    let bytes = filepath_contents( &path)?;
    let s = std::str::from_utf8( &bytes).map_err( |e| config_error!("config {path:?} is not UTF-8: {e}"))?;

    match extension(&path).map( |e| e.to_ascii_lowercase()).as_deref() {
        Some("toml") => JobSet::from_toml_str(s),
        Some("ron") => JobSet::from_ron_str(s),
        _ => Err( config_error!("unknown config format {path:?} (expected .toml or .ron)"))
    }
}

/// accept both booleans and the strings "true"/"false" (case insensitive). Everything else is rejected
pub fn deserialize_flag<'de,D> (deserializer: D)->std::result::Result<bool,D::Error> where D: Deserializer<'de> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag { Bool(bool), Str(String) }

    match Flag::deserialize( deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Str(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err( serde::de::Error::custom( format!("invalid boolean flag '{s}' (expected true or false)")))
        }
    }
}
