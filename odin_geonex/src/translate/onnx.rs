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

use std::{collections::HashMap, sync::Mutex};
use ndarray::Array3;
use ort::{session::Session, value::Tensor};
use tracing::{debug,info};

use crate::{errors::{Result,OdinGeonexError,op_failed}, raster::Raster};
use super::{OnnxModelSpec,OnnxTranslatorConfig,Translator};

struct ModelSession {
    spec: OnnxModelSpec,
    session: Mutex<Session>, // ort sessions need exclusive access to run
}

/// translator that runs one ONNX model per (source,target) sensor pair
pub struct OnnxTranslator {
    models: HashMap<(String,String),ModelSession>,
}

impl OnnxTranslator {
    pub fn new (config: &OnnxTranslatorConfig)->Result<Self> {
        let mut models = HashMap::new();

        for spec in &config.models {
            let session = Session::builder()?.commit_from_file( spec.model_path.as_path())?;
            info!("loaded ONNX model {:?} for {} -> {}", spec.model_path, spec.source, spec.target);
            print_session_info( &session);

            let key = (spec.source.to_ascii_uppercase(), spec.target.to_ascii_uppercase());
            models.insert( key, ModelSession { spec: spec.clone(), session: Mutex::new(session) });
        }

        Ok( OnnxTranslator { models } )
    }
}

impl Translator for OnnxTranslator {
    fn translate (&self, raster: &Raster, source_sensor: &str, target_sensor: &str)->Result<Raster> {
        let key = (source_sensor.to_ascii_uppercase(), target_sensor.to_ascii_uppercase());
        let model = self.models.get( &key).ok_or_else( || op_failed!("no ONNX model for {source_sensor} -> {target_sensor}"))?;

        let (h, w, c) = raster.data().dim();
        let input = Tensor::from_array( ([1usize, c, h, w], to_nchw( raster.data())) )?;

        let mut session = model.session.lock().map_err( |_| op_failed!("ONNX session lock poisoned"))?;
        let outputs = session.run( ort::inputs![ model.spec.input.as_str() => input ])?;
        let (shape, values) = outputs[model.spec.output.as_str()].try_extract_tensor::<f32>()?;

        let dims: Vec<i64> = shape.iter().copied().collect();
        debug!("model output shape {:?}", dims);
        if dims.len() != 4 || dims[0] != 1 || dims[2] != h as i64 || dims[3] != w as i64 {
            return Err( op_failed!("unexpected model output shape {:?} for {h}x{w} input", dims))
        }
        let n_bands = dims[1] as usize;
        if values.len() != n_bands * h * w {
            return Err( op_failed!("model output has {} values, expected {}", values.len(), n_bands * h * w))
        }

        Ok( Raster::new( from_nchw( values, n_bands, h, w)) )
    }
}

fn print_session_info (session: &Session) {
    for input in &session.inputs {
        debug!("  model input {}: {:?}", input.name, input.input_type);
    }
    for output in &session.outputs {
        debug!("  model output {}: {:?}", output.name, output.output_type);
    }
}

/// HWC raster data into a flat CHW buffer
fn to_nchw (data: &Array3<f32>)->Vec<f32> {
    let (h, w, c) = data.dim();
    let mut buf = Vec::with_capacity( h * w * c);
    for k in 0..c {
        for i in 0..h {
            for j in 0..w {
                buf.push( data[[i,j,k]]);
            }
        }
    }
    buf
}

fn from_nchw (values: &[f32], c: usize, h: usize, w: usize)->Array3<f32> {
    Array3::from_shape_fn( (h, w, c), |(i,j,k)| values[ k*h*w + i*w + j ])
}
