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

use std::path::Path;
use ab_glyph::{Font,FontVec,PxScale};
use image::{Rgb,RgbImage};
use imageproc::drawing::{draw_text_mut,text_size};

use odin_common::fs::filepath_contents;
use crate::errors::{Result,OdinImageError};

/// where to put a text label relative to the image borders
#[derive(Debug,Clone,Copy,PartialEq)]
pub enum Anchor { TopLeft, TopRight, BottomLeft, BottomRight }

pub fn load_font<P: AsRef<Path>> (path: P)->Result<FontVec> {
    let path = path.as_ref();
    if !path.is_file() {
        Err( OdinImageError::NotFoundError(format!("font not found: {:?}", path)) )
    } else {
        let data = filepath_contents( &path)?;
        Ok( FontVec::try_from_vec( data)? )
    }
}

/// draw a single line text label with a margin that is a fraction of the image size (matching relative
/// axis coordinates such as 0.95/0.01 for a bottom right label)
pub fn draw_label (img: &mut RgbImage, text: &str, font: &FontVec, pt_size: f32, color: Rgb<u8>, anchor: Anchor, margin: f32)->Result<()> {
    let scale: PxScale = font.pt_to_px_scale(pt_size).ok_or( OdinImageError::IllegalArgument("invalid font pt size".to_string()))?;
    let (tw, th) = text_size( scale, font, text);

    let (w, h) = (img.width() as i32, img.height() as i32);
    let dx = (w as f32 * margin).round() as i32;
    let dy = (h as f32 * margin).round() as i32;

    let (x, y) = match anchor {
        Anchor::TopLeft => (dx, dy),
        Anchor::TopRight => (w - dx - tw as i32, dy),
        Anchor::BottomLeft => (dx, h - dy - th as i32),
        Anchor::BottomRight => (w - dx - tw as i32, h - dy - th as i32),
    };

    draw_text_mut( img, color, x.max(0), y.max(0), scale, font, text);
    Ok(())
}
