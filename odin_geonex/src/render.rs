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

//! per-frame rendering: load, translate, composite, tone map, annotate and persist a still image

use std::path::{Path,PathBuf};
use image::{ImageFormat, Rgb, RgbImage};
use tracing::{debug,info,warn};

use odin_image::{rgb_image_from_unit_array, fit_scaled, draw_label, save_atomically, Anchor, FontVec};
use crate::{
    catalog::FileRecord, composite::{composite, apply_tone_curve, channel_stats, GAMMA},
    config::JobSpec, errors::{Result,OdinGeonexError}, raster::{Raster,RasterLoader}, translate::Translator
};

pub const FRAME_EXT: &str = "png";

/// label font size in pt per 1000 pixels of image height
const LABEL_PT_PER_KPX: f32 = 20.0;
const MIN_LABEL_PT: f32 = 8.0;
const LABEL_MARGIN: f32 = 0.01;
const LABEL_COLOR: Rgb<u8> = Rgb([255,255,255]);

/// the job parameters that affect how a single frame is rendered
#[derive(Debug,Clone)]
pub struct RenderOptions {
    pub source_sensor: String,
    pub target_sensor: String,
    pub resolution_km: f64,
    pub mix: f32,
    pub frame_size: Option<u32>,
    pub annotate: bool,
}

impl From<&JobSpec> for RenderOptions {
    fn from (spec: &JobSpec)->Self {
        RenderOptions {
            source_sensor: spec.sensor.clone(),
            target_sensor: spec.target_sensor.clone(),
            resolution_km: spec.resolution_km,
            mix: spec.mix,
            frame_size: spec.frame_size,
            annotate: spec.annotate,
        }
    }
}

pub struct FrameRenderer<'a> {
    loader: &'a dyn RasterLoader,
    translator: &'a dyn Translator,
    font: Option<&'a FontVec>,
    frames_dir: PathBuf,
}

impl<'a> FrameRenderer<'a> {
    pub fn new (loader: &'a dyn RasterLoader, translator: &'a dyn Translator, font: Option<&'a FontVec>, frames_dir: impl AsRef<Path>)->Self {
        FrameRenderer { loader, translator, font, frames_dir: frames_dir.as_ref().to_path_buf() }
    }

    pub fn frames_dir (&self)->&Path { &self.frames_dir }

    pub fn frame_path (&self, rec: &FileRecord)->PathBuf {
        self.frames_dir.join( rec.name.frame_name( FRAME_EXT))
    }

    fn load_checked (&self, rec: &FileRecord, opts: &RenderOptions)->Result<Raster> {
        let raster = match self.loader.load( &rec.path, opts.resolution_km) {
            Ok(raster) => raster,
            Err(OdinGeonexError::MalformedRaster{path,msg}) => return Err( OdinGeonexError::MalformedRaster{path,msg}),
            Err(OdinGeonexError::UnsupportedFormat(path)) => return Err( OdinGeonexError::UnsupportedFormat(path)),
            Err(e) => return Err( OdinGeonexError::MalformedRaster{ path: rec.path.clone(), msg: e.to_string() })
        };

        raster.check(2).map_err( |msg| OdinGeonexError::MalformedRaster{ path: rec.path.clone(), msg })?;
        Ok(raster)
    }

    fn translate_checked (&self, rec: &FileRecord, raster: &Raster, opts: &RenderOptions)->Result<Raster> {
        let translated = self.translator.translate( raster, &opts.source_sensor, &opts.target_sensor)
            .map_err( |e| match e {
                OdinGeonexError::TranslationFailure{msg,..} => OdinGeonexError::TranslationFailure{ path: rec.path.clone(), msg },
                e => OdinGeonexError::TranslationFailure{ path: rec.path.clone(), msg: e.to_string() }
            })?;

        translated.check(2).map_err( |msg| OdinGeonexError::TranslationFailure{ path: rec.path.clone(), msg })?;
        if translated.spatial_dim() != raster.spatial_dim() {
            return Err( OdinGeonexError::TranslationFailure {
                path: rec.path.clone(),
                msg: format!("translated dimensions {:?} differ from source {:?}", translated.spatial_dim(), raster.spatial_dim())
            })
        }
        Ok(translated)
    }

    /// render the (unsaved) frame image for `rec`
    pub fn render_image (&self, rec: &FileRecord, opts: &RenderOptions)->Result<RgbImage> {
        let raster = self.load_checked( rec, opts)?;
        let translated = self.translate_checked( rec, &raster, opts)?;

        let mut rgb = composite( &raster, &translated, opts.mix)?;
        if tracing::enabled!(tracing::Level::DEBUG) {
            let [r,g,b] = channel_stats( &rgb);
            debug!("{}: R[{:.3}..{:.3}] G[{:.3}..{:.3}] B[{:.3}..{:.3}]", rec.name.time_label(), r.min, r.max, g.min, g.max, b.min, b.max);
        }
        apply_tone_curve( &mut rgb, GAMMA);

        let mut img = rgb_image_from_unit_array( &rgb.view())?;
        if let Some(size) = opts.frame_size {
            img = fit_scaled( &img, size, size);
        }

        if opts.annotate {
            if let Some(font) = self.font {
                let pt_size = (LABEL_PT_PER_KPX * img.height() as f32 / 1000.0).max( MIN_LABEL_PT);
                draw_label( &mut img, &rec.name.time_label(), font, pt_size, LABEL_COLOR, Anchor::BottomRight, LABEL_MARGIN)?;
            }
        }

        Ok(img)
    }

    /// render and persist the still for `rec`, returning its path. Nothing is written if rendering fails
    pub fn render_frame (&self, rec: &FileRecord, opts: &RenderOptions)->Result<PathBuf> {
        let img = self.render_image( rec, opts)?;
        let path = self.frame_path( rec);
        save_atomically( &img, &path, ImageFormat::Png)?;
        debug!("saved frame {:?}", path);
        Ok(path)
    }

    /// render all records in order. The first failure aborts the sequence
    pub fn render_all (&self, records: &[FileRecord], opts: &RenderOptions)->Result<Vec<PathBuf>> {
        if opts.annotate && self.font.is_none() && !records.is_empty() {
            warn!("no label font configured, frames are not annotated");
        }

        let mut paths = Vec::with_capacity( records.len());
        for (i, rec) in records.iter().enumerate() {
            info!("rendering frame {}/{}: {}", i+1, records.len(), rec);
            paths.push( self.render_frame( rec, opts)?);
        }
        Ok(paths)
    }
}
