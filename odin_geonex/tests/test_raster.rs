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

use std::{fs::File, io::BufWriter, path::Path};
use ndarray::{array, Array2};
use tiff::encoder::{colortype, TiffEncoder};
use odin_geonex::{
    raster::{resample, tile_pixels, Raster, RasterLoader, TiffRasterLoader},
    OdinGeonexError, Result
};

/// resolution at which GeoNEX tiles have 6x6 pixels
const COARSE_KM: f64 = 100.0;

fn write_gray16_pages (path: &Path, w: u32, h: u32, pages: &[u16])->Result<()> {
    let mut encoder = TiffEncoder::new( BufWriter::new( File::create(path)?))?;
    for &v in pages {
        let data = vec![v; (w * h) as usize];
        encoder.write_image::<colortype::Gray16>( w, h, &data)?;
    }
    Ok(())
}

fn assert_close (a: f32, b: f32) {
    assert!( (a - b).abs() < 1e-5, "{a} != {b}");
}

#[test]
fn test_tile_pixels () {
    assert_eq!( tile_pixels(1.0), Ok(600));
    assert_eq!( tile_pixels(0.5), Ok(1200));
    assert_eq!( tile_pixels(2.0), Ok(300));
    assert_eq!( tile_pixels(COARSE_KM), Ok(6));
    assert!( tile_pixels(0.0).is_err());
    assert!( tile_pixels(-1.0).is_err());
    assert!( tile_pixels(f64::NAN).is_err());
    assert!( tile_pixels(10000.0).is_err());
}

#[test]
fn test_load_multipage_tiff ()->Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("GO17_ABI12B_20200708_1400_GLBG_h09v03_02.tif");
    write_gray16_pages( &path, 12, 12, &[1000, 2000, 3000])?;

    let loader = TiffRasterLoader::new( 1.0e-4);
    let raster = loader.load( &path, COARSE_KM)?;
    assert_eq!( raster.spatial_dim(), (6, 6));
    assert_eq!( raster.n_bands(), 3);

    for (k, expected) in [0.1, 0.2, 0.3].into_iter().enumerate() {
        let band = raster.band(k).unwrap();
        band.iter().for_each( |&v| assert_close( v, expected));
    }
    Ok(())
}

#[test]
fn test_load_interleaved_float_tiff ()->Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("tile.tiff");
    {
        let mut encoder = TiffEncoder::new( BufWriter::new( File::create(&path)?))?;
        let data: Vec<f32> = (0..3*3).flat_map( |_| [0.25f32, 0.5, 0.75]).collect();
        encoder.write_image::<colortype::RGB32Float>( 3, 3, &data)?;
    }

    let raster = TiffRasterLoader::default().load( &path, COARSE_KM)?;
    assert_eq!( raster.data().dim(), (6, 6, 3));
    assert_close( raster.data()[[5,5,0]], 0.25);
    assert_close( raster.data()[[0,3,2]], 0.75);
    Ok(())
}

#[test]
fn test_unsupported_and_malformed ()->Result<()> {
    let dir = tempfile::tempdir()?;
    let loader = TiffRasterLoader::default();

    let hdf = dir.path().join("GO17_ABI12B_20200708_1400_GLBG_h09v03_02.hdf");
    std::fs::write( &hdf, b"\x0e\x03\x13\x01")?;
    match loader.load( &hdf, 1.0) {
        Err(OdinGeonexError::UnsupportedFormat(p)) => assert_eq!( p, hdf),
        other => panic!("expected UnsupportedFormat, got {other:?}")
    }

    let garbage = dir.path().join("garbage.tif");
    std::fs::write( &garbage, b"this is not a tiff")?;
    assert!( loader.load( &garbage, 1.0).is_err());
    Ok(())
}

#[test]
fn test_resample () {
    let a = array![[1.0f32, 2.0], [3.0, 4.0]];
    let up = resample( &a.view(), 4, 4);
    assert_eq!( up, array![
        [1.0, 1.0, 2.0, 2.0],
        [1.0, 1.0, 2.0, 2.0],
        [3.0, 3.0, 4.0, 4.0],
        [3.0, 3.0, 4.0, 4.0]
    ]);

    let down = resample( &up.view(), 2, 2);
    assert_eq!( down, a);

    let mean = resample( &a.view(), 1, 1);
    assert_eq!( mean, array![[2.5f32]]);
}

#[test]
fn test_raster_check () {
    let single = Raster::from_bands( &[Array2::<f32>::zeros((3,3))]).unwrap();
    assert!( single.check(2).is_err());

    let pair = Raster::from_bands( &[Array2::<f32>::zeros((3,3)), Array2::<f32>::ones((3,3))]).unwrap();
    assert!( pair.check(2).is_ok());

    assert!( Raster::from_bands( &[Array2::<f32>::zeros((3,3)), Array2::<f32>::zeros((3,4))]).is_err());
}
