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

//! sensor domain translation
//!
//! A translator maps a raster of one satellite instrument (e.g. "G17" for GOES-17 ABI) into the spectral
//! representation of another one (e.g. "H8" for Himawari-8 AHI), preserving spatial dimensions and units.
//! Translators are configured with RON files like
//! ```text
//! BandAdjust((
//!     pairs: [
//!         ( source: "G17", target: "H8", gains: [1.0, 0.93, 1.0], offsets: [0.0, 0.004, 0.0] ),
//!     ]
//! ))
//! ```

use std::path::Path;
use ndarray::{Array3, Axis, Zip};
use serde::Deserialize;
use tracing::info;

use odin_common::fs::filepath_contents;
use crate::{errors::{Result,OdinGeonexError,op_failed,config_error}, raster::Raster};

#[cfg(feature="onnx")]
mod onnx;
#[cfg(feature="onnx")]
pub use onnx::OnnxTranslator;

/// the abstract translation model interface. Implementations that are not thread safe have to serialize
/// access internally
pub trait Translator {
    fn translate (&self, raster: &Raster, source_sensor: &str, target_sensor: &str)->Result<Raster>;
}

#[derive(Deserialize,Debug,Clone)]
pub enum TranslatorConfig {
    BandAdjust( BandAdjustConfig),
    Onnx( OnnxTranslatorConfig),
}

/* #region linear band adjustment ****************************************************************************/

#[derive(Deserialize,Debug,Clone)]
#[serde(deny_unknown_fields)]
pub struct BandAdjustment {
    pub source: String,
    pub target: String,
    pub gains: Vec<f32>,
    pub offsets: Vec<f32>,
}

#[derive(Deserialize,Debug,Clone)]
#[serde(deny_unknown_fields)]
pub struct BandAdjustConfig {
    pub pairs: Vec<BandAdjustment>,
}

/// a linear spectral band adjustment model: `target[k] = gains[k] * source[k] + offsets[k]`
/// for each configured (source,target) sensor pair
#[derive(Debug,Clone)]
pub struct BandAdjustTranslator {
    config: BandAdjustConfig,
}

impl BandAdjustTranslator {
    pub fn new (config: BandAdjustConfig)->Result<Self> {
        for p in &config.pairs {
            if p.gains.is_empty() || p.gains.len() != p.offsets.len() {
                return Err( config_error!("band adjustment {}->{} needs the same (non-zero) number of gains and offsets", p.source, p.target))
            }
        }
        Ok( BandAdjustTranslator { config } )
    }

    fn adjustment (&self, source: &str, target: &str)->Option<&BandAdjustment> {
        self.config.pairs.iter().find( |p| p.source.eq_ignore_ascii_case(source) && p.target.eq_ignore_ascii_case(target))
    }
}

impl Translator for BandAdjustTranslator {
    fn translate (&self, raster: &Raster, source_sensor: &str, target_sensor: &str)->Result<Raster> {
        let adj = self.adjustment( source_sensor, target_sensor)
            .ok_or_else( || op_failed!("no band adjustment for {source_sensor} -> {target_sensor}"))?;

        let n = adj.gains.len();
        if raster.n_bands() < n {
            return Err( op_failed!("raster has {} bands, adjustment {source_sensor} -> {target_sensor} needs {n}", raster.n_bands()))
        }

        let (h, w) = raster.spatial_dim();
        let mut out = Array3::<f32>::zeros( (h, w, n));
        for k in 0..n {
            let (gain, offset) = (adj.gains[k], adj.offsets[k]);
            Zip::from( out.index_axis_mut( Axis(2), k))
                .and( raster.data().index_axis( Axis(2), k))
                .for_each( |o, &v| *o = gain * v + offset);
        }

        Ok( Raster::new(out) )
    }
}

/* #endregion linear band adjustment */

/* #region ONNX models ***************************************************************************************/

/// an ONNX model that translates `source` into `target` rasters, using NCHW `[1,bands,height,width]`
/// float tensors for input and output
#[derive(Deserialize,Debug,Clone)]
#[serde(deny_unknown_fields)]
pub struct OnnxModelSpec {
    pub source: String,
    pub target: String,
    pub model_path: odin_common::fs::EnvPathBuf,
    pub input: String,
    pub output: String,
}

#[derive(Deserialize,Debug,Clone)]
#[serde(deny_unknown_fields)]
pub struct OnnxTranslatorConfig {
    pub models: Vec<OnnxModelSpec>,
}

/* #endregion ONNX models */

pub fn load_translator_config<P: AsRef<Path>> (path: P)->Result<TranslatorConfig> {
    let bytes = filepath_contents( &path)?;
    let s = std::str::from_utf8( &bytes).map_err( |e| config_error!("translator config {:?} is not UTF-8: {e}", path.as_ref()))?;
    Ok( ron::from_str(s)? )
}

pub fn create_translator (config: TranslatorConfig)->Result<Box<dyn Translator>> {
    match config {
        TranslatorConfig::BandAdjust(cfg) => {
            info!("using linear band adjustment translator for {} sensor pairs", cfg.pairs.len());
            Ok( Box::new( BandAdjustTranslator::new(cfg)?) )
        }
        #[cfg(feature="onnx")]
        TranslatorConfig::Onnx(cfg) => {
            info!("using ONNX translator with {} models", cfg.models.len());
            Ok( Box::new( OnnxTranslator::new(&cfg)?) )
        }
        #[cfg(not(feature="onnx"))]
        TranslatorConfig::Onnx(_) => {
            Err( config_error!("ONNX translator requires the 'onnx' feature"))
        }
    }
}

/// load the translator config at `path` and instantiate the respective translator
pub fn load_translator<P: AsRef<Path>> (path: P)->Result<Box<dyn Translator>> {
    create_translator( load_translator_config(path)?)
}
