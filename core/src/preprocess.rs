//! JPEG bytes to the normalized `[1, H, W, 3]` tensor the classifier eats.
//!
//! Decoding happens on the host with the `image` crate; everything after
//! it (cast, batch axis, bilinear resize, mean subtraction) is a small
//! tract graph, so the numerics are those of the operators and not of ad
//! hoc pixel loops.
use image::ImageFormat;
use log::{debug, info};
use tract_tensorflow::prelude::*;
use tract_tensorflow::tract_core::ops::cast::cast;
use tract_tensorflow::tract_core::ops::change_axes::AxisOp;
use tract_tensorflow::tract_core::ops::math;

use crate::config::Config;
use crate::errors::{RecogError, RecogResult, Stage};
use crate::ops::ResizeBilinear;

#[derive(Debug, Clone, PartialEq)]
pub struct Preprocessor {
    pub height: usize,
    pub width: usize,
    pub mean: f32,
}

impl Default for Preprocessor {
    fn default() -> Preprocessor {
        Preprocessor::from_config(&Config::default())
    }
}

impl Preprocessor {
    pub fn new(height: usize, width: usize, mean: f32) -> Preprocessor {
        Preprocessor { height, width, mean }
    }

    pub fn from_config(config: &Config) -> Preprocessor {
        Preprocessor::new(config.height, config.width, config.mean)
    }

    /// Decode JPEG bytes into an `u8` `[H, W, 3]` tensor.
    ///
    /// Grayscale and CMYK pictures are expanded to RGB.
    pub fn decode(&self, bytes: &[u8]) -> RecogResult<Tensor> {
        let image = image::load_from_memory_with_format(bytes, ImageFormat::Jpeg)
            .map_err(RecogError::Decode)?
            .to_rgb8();
        let (width, height) = image.dimensions();
        info!("Decoded {}x{} image", width, height);
        Tensor::from_shape(&[height as usize, width as usize, 3], image.as_raw())
            .map_err(|e| RecogError::execution(Stage::Preprocess, e))
    }

    /// Build the normalization graph for a decoded image of the given size.
    pub fn graph(&self, height: usize, width: usize) -> TractResult<TypedModel> {
        let mut model = TypedModel::default();
        let image = model.add_source("image", u8::fact([height, width, 3]))?;
        let floats = model.wire_node("cast", cast(f32::datum_type()), &[image])?;
        let batch = model.wire_node("make_batch", AxisOp::Add(0), &floats)?;
        let resized = model.wire_node(
            "resize",
            ResizeBilinear { height: self.height, width: self.width },
            &batch,
        )?;
        let mean = model.add_const("mean", tensor0(self.mean).into_shape(&[1, 1, 1, 1])?)?;
        let centered = model.wire_node("sub", math::sub(), &[resized[0], mean])?;
        model.set_output_outlets(&centered)?;
        Ok(model)
    }

    /// Run the normalization graph on already decoded pixels.
    pub fn normalize_pixels(&self, pixels: Tensor) -> RecogResult<Tensor> {
        let shape = pixels.shape();
        if shape.len() != 3 || shape[2] != 3 {
            return Err(RecogError::execution(
                Stage::Preprocess,
                anyhow::anyhow!("Expected [H, W, 3] pixels, got {:?}", shape),
            ));
        }
        let (height, width) = (shape[0], shape[1]);
        let plan = self
            .graph(height, width)
            .and_then(|model| model.into_runnable())
            .map_err(|e| RecogError::execution(Stage::Preprocess, e))?;
        let mut outputs = plan
            .run(tvec!(pixels.into_tvalue()))
            .map_err(|e| RecogError::execution(Stage::Preprocess, e))?;
        let normalized = outputs.remove(0).into_tensor();
        debug!("Normalized tensor: {:?}", normalized.shape());
        Ok(normalized)
    }

    /// Decode and normalize an encoded JPEG.
    pub fn normalize(&self, bytes: &[u8]) -> RecogResult<Tensor> {
        let pixels = self.decode(bytes)?;
        self.normalize_pixels(pixels)
    }
}
