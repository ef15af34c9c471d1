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

//! command line tool to render GeoNEX L1G tile animations for all jobs of a TOML or RON config file

use std::path::PathBuf;
use anyhow::{anyhow, Result};
use tracing::{info,warn};
use tracing_subscriber::EnvFilter;

use odin_common::{define_cli, check_cli};
use odin_image::load_font;
use odin_geonex::{load_jobs, load_translator, run_jobs, PipelineContext, RunOptions, TiffRasterLoader};

define_cli! { ARGS [about="render pseudo true color GeoNEX tile animations for configured jobs"] =
    translator: PathBuf [help="RON config of the band translation model", long],
    frames_dir: PathBuf [help="directory for intermediate frame images", long, default_value="frames"],
    output_dir: PathBuf [help="directory for animations", long, default_value="."],
    job: Option<String> [help="only run the job with this name", long],
    single_job: bool [help="stop after the first job", long],
    font: Option<PathBuf> [help="TTF/OTF font for timestamp labels", long],
    int_scale: f32 [help="scale factor for integer raster samples", long, default_value_t=1.0e-4],
    config: PathBuf [help="pathname of job config (.toml or .ron)"]
}

fn main()->Result<()> {
    check_cli!(ARGS);

    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::try_from_default_env().unwrap_or_else( |_| EnvFilter::new("info")))
        .init();

    let jobs = load_jobs( &ARGS.config)?;
    info!("loaded {} jobs from {:?}", jobs.len(), ARGS.config);

    let translator = load_translator( &ARGS.translator)?;
    let loader = TiffRasterLoader::new( ARGS.int_scale);
    let font = match &ARGS.font {
        Some(path) => Some( load_font(path)?),
        None => None
    };

    let ctx = PipelineContext {
        loader: &loader,
        translator: translator.as_ref(),
        font: font.as_ref(),
        frames_dir: ARGS.frames_dir.clone(),
        output_dir: ARGS.output_dir.clone(),
    };
    let opts = RunOptions { only: ARGS.job.clone(), single_job: ARGS.single_job };

    let report = run_jobs( &ctx, &jobs, &opts)?;
    info!("{} animated, {} skipped, {} failed", report.n_animated(), report.n_skipped(), report.n_failed());

    if report.is_success() {
        Ok(())
    } else {
        for (name, res) in &report.results {
            if let Err(e) = res { warn!("job '{name}': {e}") }
        }
        Err( anyhow!("{} of {} jobs failed", report.n_failed(), report.results.len()))
    }
}
