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

use ndarray::{Array2, Array3, Axis};
use odin_geonex::{
    composite::{blend_green, composite, pseudo_true_color, clip_normalize, apply_tone_curve, NORMALIZATION, GAMMA},
    raster::Raster, Result
};

/// a 2 band raster with a value ramp from `lo` to `hi`
fn ramp_raster (h: usize, w: usize, lo: f32, hi: f32)->Raster {
    let n = (h * w * 2 - 1) as f32;
    Raster::new( Array3::from_shape_fn( (h, w, 2), |(i,j,k)| {
        let idx = ((i * w + j) * 2 + k) as f32;
        lo + (hi - lo) * idx / n
    }))
}

#[test]
fn test_blend_boundaries () {
    let r = Array2::from_shape_fn( (4, 5), |(i,j)| 0.1 * i as f32 + 0.013 * j as f32);
    let g = Array2::from_shape_fn( (4, 5), |(i,j)| 0.7 - 0.05 * i as f32 + 0.021 * j as f32);

    assert_eq!( blend_green( &r.view(), &g.view(), 0.0), r);
    assert_eq!( blend_green( &r.view(), &g.view(), 1.0), g);

    let half = blend_green( &r.view(), &g.view(), 0.5);
    for ((&b, &r), &g) in half.iter().zip( r.iter()).zip( g.iter()) {
        assert!( (b - (r + g) / 2.0).abs() < 1e-6);
    }
}

#[test]
fn test_channel_assignment ()->Result<()> {
    let source = ramp_raster( 3, 4, 0.0, 1.0);
    let translated = ramp_raster( 3, 4, 1.0, 0.0);

    let rgb = pseudo_true_color( &source, &translated, 0.0)?;
    assert_eq!( rgb.dim(), (3, 4, 3));

    let src = source.data();
    assert_eq!( rgb.index_axis( Axis(2), 0), src.index_axis( Axis(2), 1)); // R = source band 1
    assert_eq!( rgb.index_axis( Axis(2), 1), src.index_axis( Axis(2), 1)); // G = R for mix 0
    assert_eq!( rgb.index_axis( Axis(2), 2), src.index_axis( Axis(2), 0)); // B = source band 0

    let rgb = pseudo_true_color( &source, &translated, 1.0)?;
    assert_eq!( rgb.index_axis( Axis(2), 1), translated.data().index_axis( Axis(2), 1));
    Ok(())
}

#[test]
fn test_composite_range ()->Result<()> {
    // non-negative inputs well beyond the normalization constant
    let source = ramp_raster( 8, 8, 0.0, NORMALIZATION * 1.6);
    let translated = ramp_raster( 8, 8, NORMALIZATION * 1.6, 0.0);

    for mix in [0.0, 0.05, 0.5, 1.0] {
        let rgb = composite( &source, &translated, mix)?;
        assert!( rgb.iter().all( |v| (0.0..=1.0).contains(v)), "composite out of [0,1] for mix {mix}");
    }
    Ok(())
}

#[test]
fn test_clip_and_tone_curve () {
    let mut rgb = Array3::from_shape_vec( (1, 2, 3), vec![-0.5, 0.0, 0.4, 1.6, 3.2, f32::NAN]).unwrap();
    clip_normalize( &mut rgb, NORMALIZATION);
    assert_eq!( rgb.as_slice().unwrap(), &[0.0, 0.0, 0.25, 1.0, 1.0, 0.0]);

    apply_tone_curve( &mut rgb, GAMMA);
    assert_eq!( rgb.as_slice().unwrap(), &[0.0, 0.0, 0.5, 1.0, 1.0, 0.0]);
}

#[test]
fn test_dimension_mismatch () {
    let source = ramp_raster( 4, 4, 0.0, 1.0);
    let translated = ramp_raster( 4, 5, 0.0, 1.0);
    assert!( composite( &source, &translated, 0.05).is_err());
}
