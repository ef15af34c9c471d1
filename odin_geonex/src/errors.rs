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

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, OdinGeonexError>;

#[derive(Error,Debug)]
pub enum OdinGeonexError {

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("ODIN image error {0}")]
    OdinImageError( #[from] odin_image::OdinImageError),

    #[error("image codec error {0}")]
    ImageError( #[from] image::ImageError),

    #[error("tiff error {0}")]
    TiffError( #[from] tiff::TiffError),

    #[error("TOML error {0}")]
    TomlError( #[from] toml::de::Error),

    #[error("RON error {0}")]
    RonError( #[from] ron::error::SpannedError),

    #[cfg(feature="onnx")]
    #[error("ONNX runtime error {0}")]
    OrtError( #[from] ort::Error),

    #[error("config error {0}")]
    ConfigError(String),

    #[error("the requested satellite overpass data is not available: {0}")]
    EmptyCollection(String),

    #[error("malformed raster {path:?}: {msg}")]
    MalformedRaster { path: PathBuf, msg: String },

    #[error("translation of {path:?} failed: {msg}")]
    TranslationFailure { path: PathBuf, msg: String },

    #[error("unsupported raster format {0:?}")]
    UnsupportedFormat(PathBuf),

    #[error("no frames found in {0:?}")]
    NoFrames(PathBuf),

    #[error("assembly of {path:?} failed: {msg}")]
    AssemblyFailure { path: PathBuf, msg: String },

    #[error("operation failed {0}")]
    OpFailedError(String),
}

macro_rules! op_failed {
    ($fmt:literal $(, $arg:expr )* ) => {
        OdinGeonexError::OpFailedError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use op_failed;

macro_rules! config_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        OdinGeonexError::ConfigError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use config_error;
