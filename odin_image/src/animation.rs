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

use std::{io::{BufWriter,Write}, path::{Path,PathBuf}, time::Duration};
use image::{codecs::gif::{GifEncoder,Repeat}, Delay, Frame};

use odin_common::fs::write_atomically;
use crate::errors::{Result,OdinImageError};

#[derive(Debug,Clone)]
pub struct GifOptions {
    pub frame_delay: Duration,
    pub looping: bool,
    pub speed: i32, // NeuQuant speed [1..30], 1 is best quality
}

impl Default for GifOptions {
    fn default()->Self {
        GifOptions { frame_delay: Duration::from_millis(100), looping: true, speed: 10 }
    }
}

/// encode the images stored at `paths` (in given order) as frames of an animated GIF.
/// All frames have to have the same dimensions. Returns the number of encoded frames
pub fn encode_gif_frames<W: Write> (paths: &[PathBuf], opts: &GifOptions, w: W)->Result<usize> {
    if paths.is_empty() {
        return Err( OdinImageError::NoFrames("no images to encode".into()))
    }

    let mut encoder = GifEncoder::new_with_speed( w, opts.speed.clamp(1, 30));
    encoder.set_repeat( if opts.looping { Repeat::Infinite } else { Repeat::Finite(0) })?;
    let delay = Delay::from_saturating_duration( opts.frame_delay);

    let mut dims: Option<(u32,u32)> = None;
    for path in paths {
        let img = image::open(path)?.to_rgba8();
        match dims {
            None => dims = Some(img.dimensions()),
            Some(d) if d != img.dimensions() => {
                return Err( OdinImageError::InvalidDimensions( format!("frame {:?} has dimensions {:?}, expected {:?}", path, img.dimensions(), d)))
            }
            _ => {}
        }
        encoder.encode_frame( Frame::from_parts( img, 0, 0, delay))?;
    }

    Ok(paths.len())
}

/// write an animated GIF from the images at `paths`. The output file only becomes visible if all frames
/// could be encoded
pub fn write_gif<P: AsRef<Path>> (paths: &[PathBuf], out_path: P, opts: &GifOptions)->Result<usize> {
    if paths.is_empty() {
        return Err( OdinImageError::NoFrames( format!("no images for {:?}", out_path.as_ref())))
    }

    let mut n_frames = 0;
    write_atomically( out_path, |file| -> Result<()> {
        let mut w = BufWriter::new(file);
        n_frames = encode_gif_frames( paths, opts, &mut w)?;
        w.flush()?;
        Ok(())
    })?;

    Ok(n_frames)
}
