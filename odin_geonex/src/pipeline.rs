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

//! the animation pipeline that drives catalog query, time filter, frame rendering, post-processing and
//! animation assembly for each configured job

use std::{path::{Path,PathBuf}, time::Duration};
use tracing::{debug,error,info,warn};

use odin_common::fs::{ensure_dir, remove_files, sorted_files_with_extension};
use odin_image::{enhance_contrast_in_place, write_gif, FontVec, GifOptions, OdinImageError};
use crate::{
    catalog::{filter_hours, query, Catalog, GeoNexCatalog},
    config::{AnimationJob, JobSet}, errors::{config_error, Result, OdinGeonexError},
    raster::RasterLoader, render::{FrameRenderer, RenderOptions, FRAME_EXT}, translate::Translator
};

pub const ANIMATION_EXT: &str = "gif";

/// the collaborators and directories shared by all jobs of a run
pub struct PipelineContext<'a> {
    pub loader: &'a dyn RasterLoader,
    pub translator: &'a dyn Translator,
    pub font: Option<&'a FontVec>,

    /// each job renders its stills into its own `<frames_dir>/<output name>` subdirectory
    pub frames_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl<'a> PipelineContext<'a> {
    pub fn job_frames_dir (&self, job: &AnimationJob)->PathBuf {
        self.frames_dir.join( &job.spec.output_name)
    }

    pub fn animation_path (&self, job: &AnimationJob)->PathBuf {
        self.output_dir.join( format!("{}.{}", job.spec.output_name, ANIMATION_EXT))
    }
}

#[derive(Debug,Clone,PartialEq)]
pub enum JobOutcome {
    Animated { path: PathBuf, n_frames: usize },
    Skipped { reason: String },
}

/// run one job against the given catalog
pub fn run_job (ctx: &PipelineContext, job: &AnimationJob, catalog: &dyn Catalog)->Result<JobOutcome> {
    let spec = &job.spec;
    info!("job '{}': {} tile {} year {} days {} hours {}", job.name, spec.sensor, spec.tile, spec.year, spec.day_range, spec.hour_range);

    let records = query( catalog, &spec.tile, spec.year, &spec.day_range)?;
    if records.is_empty() {
        return Ok( skip_job( job, format!("no {} files for tile {} in {} days {}", spec.sensor, spec.tile, spec.year, spec.day_range)))
    }

    let records = filter_hours( records, &spec.hour_range);
    if records.is_empty() {
        return Ok( skip_job( job, format!("no {} files for tile {} in {} days {} within hours {}", spec.sensor, spec.tile, spec.year, spec.day_range, spec.hour_range)))
    }
    info!("job '{}': {} files within hours {}", job.name, records.len(), spec.hour_range);

    let frames_dir = ctx.job_frames_dir( job);
    ensure_dir( &frames_dir)?;
    let n_stale = remove_files( &sorted_files_with_extension( &frames_dir, FRAME_EXT)?)?;
    if n_stale > 0 { debug!("removed {n_stale} stale frames from {:?}", frames_dir) }

    let renderer = FrameRenderer::new( ctx.loader, ctx.translator, ctx.font, &frames_dir);
    renderer.render_all( &records, &RenderOptions::from(spec))?;

    let n_fixed = post_process( &frames_dir, spec.contrast)?;
    debug!("enhanced contrast of {n_fixed} frames");

    let path = ctx.animation_path( job);
    let n_frames = assemble_animation( &frames_dir, &path, spec.frame_duration_ms, spec.remove_intermediate)?;
    info!("job '{}': saved {n_frames} frame animation {:?}", job.name, path);

    Ok( JobOutcome::Animated{ path, n_frames })
}

fn skip_job (job: &AnimationJob, msg: String)->JobOutcome {
    let e = OdinGeonexError::EmptyCollection( msg);
    warn!("job '{}' skipped: {e}", job.name);
    JobOutcome::Skipped{ reason: e.to_string() }
}

/// enhance the contrast of all stills in `frames_dir`, replacing the files. Returns the number of processed stills
pub fn post_process (frames_dir: &Path, contrast: f32)->Result<usize> {
    let stills = sorted_files_with_extension( &frames_dir, FRAME_EXT)?;
    for path in &stills {
        enhance_contrast_in_place( path, contrast)?;
    }
    Ok( stills.len())
}

/// assemble all stills in `frames_dir` (in file name order) into a looping GIF at `out_path`. Stills are only
/// removed if `remove_stills` is set and the animation was successfully written
pub fn assemble_animation (frames_dir: &Path, out_path: &Path, frame_duration_ms: u32, remove_stills: bool)->Result<usize> {
    let stills = sorted_files_with_extension( &frames_dir, FRAME_EXT)?;
    if stills.is_empty() {
        return Err( OdinGeonexError::NoFrames( frames_dir.to_path_buf()))
    }

    if let Some(dir) = out_path.parent() {
        if !dir.as_os_str().is_empty() {
            ensure_dir( dir).map_err( |e| OdinGeonexError::AssemblyFailure{ path: out_path.to_path_buf(), msg: e.to_string() })?;
        }
    }

    let opts = GifOptions { frame_delay: Duration::from_millis( frame_duration_ms as u64), ..GifOptions::default() };
    let n_frames = write_gif( &stills, out_path, &opts).map_err( |e| match e {
        OdinImageError::NoFrames(_) => OdinGeonexError::NoFrames( frames_dir.to_path_buf()),
        e => OdinGeonexError::AssemblyFailure{ path: out_path.to_path_buf(), msg: e.to_string() }
    })?;

    // the animation is complete at this point, leftover stills are not a job failure
    if remove_stills {
        match remove_files( &stills) {
            Ok(n) => debug!("removed {n} intermediate frames from {:?}", frames_dir),
            Err(e) => warn!("failed to remove intermediate frames from {:?}: {e}", frames_dir)
        }
    }

    Ok(n_frames)
}

/// which of the configured jobs to run
#[derive(Debug,Clone,Default)]
pub struct RunOptions {
    /// only run the job with this name
    pub only: Option<String>,

    /// stop after the first job, whatever its outcome
    pub single_job: bool,
}

pub struct RunReport {
    pub results: Vec<(String, Result<JobOutcome>)>,
}

impl RunReport {
    pub fn n_animated (&self)->usize {
        self.results.iter().filter( |(_,r)| matches!(r, Ok(JobOutcome::Animated{..}))).count()
    }

    pub fn n_skipped (&self)->usize {
        self.results.iter().filter( |(_,r)| matches!(r, Ok(JobOutcome::Skipped{..}))).count()
    }

    pub fn n_failed (&self)->usize {
        self.results.iter().filter( |(_,r)| r.is_err()).count()
    }

    pub fn is_success (&self)->bool { self.n_failed() == 0 }
}

/// run jobs sequentially in job name order, each one against the GeoNEX collection of its config. A failed
/// job is logged and does not stop the run
pub fn run_jobs (ctx: &PipelineContext, jobs: &JobSet, opts: &RunOptions)->Result<RunReport> {
    let selected: Vec<&AnimationJob> = match &opts.only {
        Some(name) => vec![ jobs.get(name).ok_or_else( || config_error!("unknown job '{name}'"))? ],
        None => jobs.jobs.iter().collect()
    };

    ensure_dir( &ctx.output_dir)?;

    let mut results = Vec::with_capacity( selected.len());
    for job in selected {
        let catalog = GeoNexCatalog::new( job.spec.source_directory.as_path(), &job.spec.sensor);
        let result = run_job( ctx, job, &catalog);
        if let Err(e) = &result {
            error!("job '{}' failed: {e}", job.name);
        }
        results.push( (job.name.clone(), result));

        if opts.single_job {
            info!("single job run, skipping remaining jobs");
            break
        }
    }

    Ok( RunReport{ results })
}
