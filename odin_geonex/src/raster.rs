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

//! multi-band rasters and how to load them

use std::{fs::File, io::BufReader, path::{Path,PathBuf}};
use ndarray::{s, Array2, Array3, ArrayView2, Axis};
use tiff::decoder::{Decoder, DecodingResult};
use tracing::debug;

use odin_common::fs::has_extension;
use crate::errors::{Result,OdinGeonexError};

/// edge length of a GeoNEX tile in degrees
pub const TILE_DEGREES: f64 = 6.0;

/// nominal grid spacing in degrees for 1km resolution
pub const DEGREES_PER_KM: f64 = 0.01;

/// number of pixels along each edge of a tile rendered at the given resolution
pub fn tile_pixels (resolution_km: f64)->std::result::Result<usize,String> {
    if resolution_km.is_finite() && resolution_km > 0.0 {
        let n = (TILE_DEGREES / (DEGREES_PER_KM * resolution_km)).round();
        if n >= 1.0 {
            Ok( n as usize )
        } else {
            Err( format!("resolution {resolution_km}km too coarse for {TILE_DEGREES} degree tiles") )
        }
    } else {
        Err( format!("invalid resolution {resolution_km}km") )
    }
}

/// a `height x width x band` raster of physical (reflectance-like) values
#[derive(Debug,Clone,PartialEq)]
pub struct Raster {
    data: Array3<f32>,
}

impl Raster {
    pub fn new (data: Array3<f32>)->Self {
        Raster { data }
    }

    /// stack single band arrays of identical dimensions
    pub fn from_bands (bands: &[Array2<f32>])->std::result::Result<Self,String> {
        let first = bands.first().ok_or( "no bands")?;
        let (h, w) = first.dim();

        let mut data = Array3::<f32>::zeros( (h, w, bands.len()));
        for (k, band) in bands.iter().enumerate() {
            if band.dim() != (h, w) {
                return Err( format!("band {k} has dimensions {:?}, expected {:?}", band.dim(), (h,w)))
            }
            data.slice_mut( s![.., .., k]).assign( band);
        }
        Ok( Raster { data } )
    }

    #[inline] pub fn height (&self)->usize { self.data.dim().0 }
    #[inline] pub fn width (&self)->usize { self.data.dim().1 }
    #[inline] pub fn n_bands (&self)->usize { self.data.dim().2 }

    /// (height,width)
    #[inline] pub fn spatial_dim (&self)->(usize,usize) {
        let (h, w, _) = self.data.dim();
        (h, w)
    }

    pub fn band (&self, k: usize)->Option<ArrayView2<'_,f32>> {
        if k < self.n_bands() { Some( self.data.index_axis( Axis(2), k)) } else { None }
    }

    pub fn data (&self)->&Array3<f32> { &self.data }

    pub fn into_data (self)->Array3<f32> { self.data }

    /// check minimal structural requirements for compositing
    pub fn check (&self, min_bands: usize)->std::result::Result<(),String> {
        let (h, w, n) = self.data.dim();
        if h == 0 || w == 0 {
            Err( format!("empty raster ({h}x{w})"))
        } else if n < min_bands {
            Err( format!("raster has {n} bands, need at least {min_bands}"))
        } else {
            Ok(())
        }
    }
}

/// the abstract raster source interface
pub trait RasterLoader {
    fn load (&self, path: &Path, resolution_km: f64)->Result<Raster>;
}

/// loader for (Geo)TIFF tiles that store one band per page (IFD) or interleaved bands in a single page.
/// Integer samples are multiplied by `int_scale`, float samples are used as is. Each band is resampled
/// to the tile grid for the requested resolution, which allows bands of different native resolutions
#[derive(Debug,Clone)]
pub struct TiffRasterLoader {
    pub int_scale: f32,
}

impl TiffRasterLoader {
    pub fn new (int_scale: f32)->Self {
        TiffRasterLoader { int_scale }
    }

    pub fn read_bands (&self, path: &Path)->Result<Vec<Array2<f32>>> {
        let malformed = |msg: String| OdinGeonexError::MalformedRaster { path: path.to_path_buf(), msg };

        let mut decoder = Decoder::new( BufReader::new( File::open(path)?))?;
        let mut bands: Vec<Array2<f32>> = Vec::new();

        loop {
            let (w, h) = decoder.dimensions()?;
            let (w, h) = (w as usize, h as usize);
            let samples = self.to_f32( decoder.read_image()?).ok_or_else( || malformed("unsupported sample type".into()))?;

            let n_px = w * h;
            if n_px == 0 || samples.len() % n_px != 0 {
                return Err( malformed( format!("{} samples do not match {w}x{h} page", samples.len())))
            }

            let n_samples = samples.len() / n_px;
            let page = Array3::from_shape_vec( (h, w, n_samples), samples).map_err( |e| malformed( e.to_string()))?;
            for k in 0..n_samples {
                bands.push( page.index_axis( Axis(2), k).to_owned());
            }

            if !decoder.more_images() { break }
            decoder.next_image()?;
        }

        Ok(bands)
    }

    fn to_f32 (&self, res: DecodingResult)->Option<Vec<f32>> {
        let sc = self.int_scale;
        match res {
            DecodingResult::F32(v) => Some(v),
            DecodingResult::F64(v) => Some( v.into_iter().map( |x| x as f32).collect()),
            DecodingResult::U8(v) => Some( v.into_iter().map( |x| x as f32 * sc).collect()),
            DecodingResult::U16(v) => Some( v.into_iter().map( |x| x as f32 * sc).collect()),
            DecodingResult::U32(v) => Some( v.into_iter().map( |x| x as f32 * sc).collect()),
            DecodingResult::I8(v) => Some( v.into_iter().map( |x| x as f32 * sc).collect()),
            DecodingResult::I16(v) => Some( v.into_iter().map( |x| x as f32 * sc).collect()),
            DecodingResult::I32(v) => Some( v.into_iter().map( |x| x as f32 * sc).collect()),
            _ => None
        }
    }
}

impl Default for TiffRasterLoader {
    fn default()->Self { TiffRasterLoader::new( 1.0) }
}

impl RasterLoader for TiffRasterLoader {
    fn load (&self, path: &Path, resolution_km: f64)->Result<Raster> {
        if !(has_extension( &path, "tif") || has_extension( &path, "tiff")) {
            return Err( OdinGeonexError::UnsupportedFormat( path.to_path_buf()))
        }

        let n = tile_pixels( resolution_km).map_err( |msg| OdinGeonexError::ConfigError(msg))?;
        let bands: Vec<Array2<f32>> = self.read_bands( path)?.iter().map( |b| resample( &b.view(), n, n)).collect();
        debug!("loaded {} bands from {:?} at {}x{}", bands.len(), path, n, n);

        Raster::from_bands( &bands).map_err( |msg| OdinGeonexError::MalformedRaster { path: path.to_path_buf(), msg })
    }
}

/// resample a band to `h x w`. Integer down-sampling factors use block means, everything else nearest neighbor
pub fn resample (band: &ArrayView2<f32>, h: usize, w: usize)->Array2<f32> {
    let (sh, sw) = band.dim();

    if (sh, sw) == (h, w) {
        band.to_owned()

    } else if sh >= h && sw >= w && h > 0 && w > 0 && sh % h == 0 && sw % w == 0 {
        let (fy, fx) = (sh / h, sw / w);
        let n = (fy * fx) as f32;
        Array2::from_shape_fn( (h, w), |(i,j)| {
            band.slice( s![i*fy..(i+1)*fy, j*fx..(j+1)*fx]).sum() / n
        })

    } else {
        Array2::from_shape_fn( (h, w), |(i,j)| {
            band[[ (i * sh) / h, (j * sw) / w ]]
        })
    }
}
