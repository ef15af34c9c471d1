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

/// image processing module of ODIN for rendered satellite products
/// this mostly wraps and extends the external 'image' crate (and related)

use std::{ops::{Add, Div, Mul, Sub}, path::{Path,PathBuf}, io::{BufWriter,Write}};
use image::{self, imageops::{FilterType,resize}, DynamicImage, GenericImageView, ImageFormat, Rgb, RgbImage};
use ndarray::{ArrayView3, Axis};
use num::{Zero,Bounded};
use odin_common::{fs::write_atomically, unit_clamp};

mod errors;
pub use errors::{Result,OdinImageError};

mod text;
pub use text::{load_font, draw_label, Anchor};
pub use ab_glyph::FontVec;

mod animation;
pub use animation::{write_gif, encode_gif_frames, GifOptions};

pub struct Stats<T> {
    pub min: T,
    pub max: T,
    pub mean: f64,
    pub variance: f64,

    pub s: f64,
    pub n: usize
}

impl <T> Stats<T>
    where T: Add<T,Output=T> + Sub<T,Output=T> + Div<T,Output=T> + Mul<T,Output=T> +
             Bounded + PartialOrd + PartialEq + Zero + Into<f64> + Copy
{
    pub fn new ()->Self {
        let min = T::max_value();
        let max = T::min_value();
        let mean: f64 = 0.0;
        let variance: f64 = 0.0;

        Stats{min,max,mean,variance, s: 0.0, n: 0}
    }

    pub fn add (&mut self, v: T) {
        self.n += 1;

        if v < self.min { self.min = v }
        if v > self.max { self.max = v }

        let prev_mean = self.mean;
        let v: f64 = v.into();
        let n = self.n as f64;

        self.mean = (v + (n * prev_mean) - prev_mean) / n;
        self.s = self.s + (v - prev_mean) * (v - self.mean);
        self.variance = self.s / n;
    }

    pub fn std_dev (&self)->f64 {
        self.variance.sqrt()
    }
}

const R: usize = 0;
const G: usize = 1;
const B: usize = 2;

/// ITU-R 601-2 luma transform with integer rounding (same as the common 'L' conversion)
#[inline]
pub fn luma (px: &Rgb<u8>)->u8 {
    let l = px[R] as u32 * 299 + px[G] as u32 * 587 + px[B] as u32 * 114;
    ((l + 500) / 1000) as u8
}

/// luma statistics of an RGB image, which we use as the contrast measure
pub fn luma_stats (img: &RgbImage)->Stats<u8> {
    let mut stats = Stats::<u8>::new();
    for px in img.pixels() {
        stats.add( luma(px));
    }
    stats
}

/* #region conversion ***************************************************************************************/

/// turn a `height x width x 3` array of unit intensities into an 8 bit RGB image. Values outside of [0,1] are clamped
pub fn rgb_image_from_unit_array (a: &ArrayView3<f32>)->Result<RgbImage> {
    let (h, w, c) = a.dim();
    if c != 3 {
        return Err( OdinImageError::InvalidDimensions( format!("expected 3 channels, got {c}")))
    }
    if h == 0 || w == 0 {
        return Err( OdinImageError::InvalidDimensions( "empty image".into()))
    }

    let mut img = RgbImage::new( w as u32, h as u32);
    for (x, y, px) in img.enumerate_pixels_mut() {
        let (i, j) = (y as usize, x as usize);
        *px = Rgb([
            to_u8( a[[i,j,R]]),
            to_u8( a[[i,j,G]]),
            to_u8( a[[i,j,B]]),
        ]);
    }
    Ok(img)
}

#[inline]
fn to_u8 (v: f32)->u8 {
    (unit_clamp(v) * 255.0).round() as u8
}

/// indiscriminately scale the input image to given size. This does **not** preserve aspect ratio
pub fn fit_scaled (img: &RgbImage, w: u32, h: u32)->RgbImage {
    if img.width() == w && img.height() == h {
        img.clone()
    } else {
        resize( img, w, h, FilterType::CatmullRom)
    }
}

/* #endregion conversion */

/* #region contrast enhancement *****************************************************************************/

/// enhance contrast by blending the image with a uniform gray image of its (rounded) mean luma:
/// `out = mean + factor * (in - mean)`, clamped to [0,255]. A factor of 1.0 returns the original image.
/// Note this is not idempotent - repeated application compounds the enhancement
pub fn enhance_contrast (img: &RgbImage, factor: f32)->RgbImage {
    let mean = luma_stats(img).mean.round() as f32;

    let mut out = img.clone();
    for px in out.pixels_mut() {
        for c in 0..3 {
            let v = mean + factor * (px[c] as f32 - mean);
            px[c] = v.round().clamp( 0.0, 255.0) as u8;
        }
    }
    out
}

/// enhance contrast of the image stored at `path`, replacing the file contents
pub fn enhance_contrast_in_place (path: impl AsRef<Path>, factor: f32)->Result<()> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;
    let img = image::open(path)?.to_rgb8();
    let enhanced = enhance_contrast( &img, factor);
    save_atomically( &enhanced, path, format)
}

/* #endregion contrast enhancement */

/// save image so that `path` is never left partially written
pub fn save_atomically (img: &RgbImage, path: impl AsRef<Path>, format: ImageFormat)->Result<()> {
    write_atomically( path, |file| -> Result<()> {
        let mut w = BufWriter::new(file);
        img.write_to( &mut w, format)?;
        w.flush()?;
        Ok(())
    })
}
