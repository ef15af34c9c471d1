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

use std::{fs::File, io::BufReader, path::PathBuf, time::Duration};
use image::{codecs::gif::GifDecoder, AnimationDecoder, ImageFormat, Rgb, RgbImage};
use odin_image::{write_gif, save_atomically, GifOptions, OdinImageError, Result};

fn write_frames (dir: &std::path::Path, n: u8, w: u32, h: u32)->Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for i in 0..n {
        let img = RgbImage::from_pixel( w, h, Rgb([i * 40, 100, 200 - i * 40]));
        let path = dir.join( format!("frame_{i:02}.png"));
        save_atomically( &img, &path, ImageFormat::Png)?;
        paths.push(path);
    }
    Ok(paths)
}

#[test]
fn test_write_gif () -> Result<()> {
    let dir = tempfile::tempdir()?;
    let frames = write_frames( dir.path(), 3, 16, 12)?;
    let out = dir.path().join("anim.gif");

    let opts = GifOptions { frame_delay: Duration::from_millis(150), ..GifOptions::default() };
    let n = write_gif( &frames, &out, &opts)?;
    assert_eq!( n, 3);

    let decoder = GifDecoder::new( BufReader::new( File::open(&out)?))?;
    let decoded = decoder.into_frames().collect_frames()?;
    assert_eq!( decoded.len(), 3);
    for f in &decoded {
        assert_eq!( f.buffer().dimensions(), (16, 12));
        let (num, denom) = f.delay().numer_denom_ms();
        assert_eq!( num / denom, 150);
    }
    Ok(())
}

#[test]
fn test_no_frames () -> Result<()> {
    let dir = tempfile::tempdir()?;
    let out = dir.path().join("anim.gif");

    match write_gif( &[], &out, &GifOptions::default()) {
        Err(OdinImageError::NoFrames(_)) => {}
        other => panic!("expected NoFrames error, got {other:?}")
    }
    assert!( !out.exists());
    Ok(())
}

#[test]
fn test_inconsistent_frames () -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut frames = write_frames( dir.path(), 2, 16, 12)?;
    let odd = RgbImage::from_pixel( 8, 8, Rgb([0, 0, 0]));
    let odd_path = dir.path().join("frame_99.png");
    save_atomically( &odd, &odd_path, ImageFormat::Png)?;
    frames.push( odd_path);

    let out = dir.path().join("anim.gif");
    assert!( matches!( write_gif( &frames, &out, &GifOptions::default()), Err(OdinImageError::InvalidDimensions(_))));
    assert!( !out.exists()); // no partial output
    Ok(())
}
