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

//! pseudo true color compositing
//!
//! GOES ABI has no green band, which we approximate by blending the red band with the green band of a
//! translated (Himawari AHI) raster: `G = G_translated * F + R * (1 - F)`

use ndarray::{stack, Array2, Array3, ArrayView2, Axis, Zip};
use odin_common::{unit_clamp, MinMaxAvg};

use crate::{errors::{Result,OdinGeonexError,op_failed}, raster::Raster};

/// band indices into source and translated rasters
pub const BLUE_BAND: usize = 0;
pub const RED_BAND: usize = 1;
pub const GREEN_BAND: usize = 1;

/// raw reflectances are divided by this before display
pub const NORMALIZATION: f32 = 1.6;

/// exponent of the display tone curve
pub const GAMMA: f32 = 0.5;

/// `g_model * mix + r * (1 - mix)`. The boundary mix values return exact copies of the respective inputs
pub fn blend_green (r: &ArrayView2<f32>, g_model: &ArrayView2<f32>, mix: f32)->Array2<f32> {
    if mix <= 0.0 {
        r.to_owned()
    } else if mix >= 1.0 {
        g_model.to_owned()
    } else {
        let mut g = Array2::<f32>::zeros( r.dim());
        Zip::from( &mut g).and( r).and( g_model).for_each( |g, &r, &gm| *g = gm * mix + r * (1.0 - mix));
        g
    }
}

/// assemble the raw (not yet normalized) `height x width x 3` [R,G,B] array
pub fn pseudo_true_color (source: &Raster, translated: &Raster, mix: f32)->Result<Array3<f32>> {
    if source.spatial_dim() != translated.spatial_dim() {
        return Err( op_failed!("translated raster dimensions {:?} differ from source {:?}", translated.spatial_dim(), source.spatial_dim()))
    }

    let r = source.band( RED_BAND).ok_or_else( || op_failed!("source raster has no red band"))?;
    let b = source.band( BLUE_BAND).ok_or_else( || op_failed!("source raster has no blue band"))?;
    let gm = translated.band( GREEN_BAND).ok_or_else( || op_failed!("translated raster has no green band"))?;

    let g = blend_green( &r, &gm, mix);
    stack( Axis(2), &[r, g.view(), b]).map_err( |e| op_failed!("failed to stack bands: {e}"))
}

/// clip negative (and NaN) values to 0, divide by `norm` and clip to at most 1
pub fn clip_normalize (rgb: &mut Array3<f32>, norm: f32) {
    rgb.mapv_inplace( |v| if v > 0.0 { unit_clamp( v / norm) } else { 0.0 });
}

/// apply `v^gamma` to unit intensities
pub fn apply_tone_curve (rgb: &mut Array3<f32>, gamma: f32) {
    rgb.mapv_inplace( |v| v.powf( gamma));
}

/// the clipped and normalized composite image with values in [0,1]
pub fn composite (source: &Raster, translated: &Raster, mix: f32)->Result<Array3<f32>> {
    let mut rgb = pseudo_true_color( source, translated, mix)?;
    clip_normalize( &mut rgb, NORMALIZATION);
    Ok(rgb)
}

/// per channel value statistics of a composite (useful to diagnose scaling problems)
pub fn channel_stats (rgb: &Array3<f32>)->[MinMaxAvg;3] {
    let mut stats = [MinMaxAvg::new(), MinMaxAvg::new(), MinMaxAvg::new()];
    for (k, s) in stats.iter_mut().enumerate() {
        for &v in rgb.index_axis( Axis(2), k).iter() {
            s.add( v as f64);
        }
    }
    stats
}
