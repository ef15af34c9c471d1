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

//! GeoNEX L1G tile animations: pseudo true color composites of GOES ABI tiles, using a translated
//! (Himawari AHI like) green band, rendered as annotated stills and assembled into looping GIFs

pub mod errors;
pub use errors::{Result,OdinGeonexError};

pub mod config;
pub use config::{load_jobs, AnimationJob, JobSet, JobSpec};

pub mod catalog;
pub use catalog::{filter_hours, query, query_collection, Catalog, FileRecord, GeoNexCatalog, L1gFileName};

pub mod raster;
pub use raster::{Raster, RasterLoader, TiffRasterLoader};

pub mod translate;
pub use translate::{load_translator, BandAdjustTranslator, Translator, TranslatorConfig};

pub mod composite;

pub mod render;
pub use render::{FrameRenderer, RenderOptions};

pub mod pipeline;
pub use pipeline::{assemble_animation, post_process, run_job, run_jobs, JobOutcome, PipelineContext, RunOptions, RunReport};
