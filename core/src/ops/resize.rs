use tract_tensorflow::prelude::tract_ndarray::{Array4, Ix4};
use tract_tensorflow::tract_core::internal::*;

/// Bilinear resize of the two spatial axes of a NHWC f32 tensor.
///
/// Follows TensorFlow's `ResizeBilinear` with `align_corners` and
/// `half_pixel_centers` both unset: output pixel `o` samples the input at
/// `o * in / out`, so the top-left corners are aligned and the right and
/// bottom edges are clamped.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct ResizeBilinear {
    pub height: usize,
    pub width: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Lerp {
    lo: usize,
    hi: usize,
    frac: f32,
}

fn lerps(input: usize, output: usize) -> Vec<Lerp> {
    let scale = input as f32 / output as f32;
    (0..output)
        .map(|o| {
            let src = o as f32 * scale;
            let floor = src.floor();
            Lerp {
                lo: (floor as usize).min(input - 1),
                hi: (src.ceil() as usize).min(input - 1),
                frac: src - floor,
            }
        })
        .collect()
}

impl Op for ResizeBilinear {
    fn name(&self) -> Cow<str> {
        "ResizeBilinear".into()
    }

    fn info(&self) -> TractResult<Vec<String>> {
        Ok(vec![format!("output: {}x{}", self.height, self.width)])
    }

    op_as_typed_op!();
    impl_op_same_as!();
}

impl EvalOp for ResizeBilinear {
    fn is_stateless(&self) -> bool {
        true
    }

    fn eval(&self, inputs: TVec<TValue>) -> TractResult<TVec<TValue>> {
        let input = args_1!(inputs);
        let input = input.to_array_view::<f32>()?.into_dimensionality::<Ix4>()?;
        let (batch, in_h, in_w, channels) = input.dim();
        ensure!(in_h > 0 && in_w > 0, "Can not resize an empty {}x{} image", in_h, in_w);
        let ys = lerps(in_h, self.height);
        let xs = lerps(in_w, self.width);
        let output =
            Array4::from_shape_fn((batch, self.height, self.width, channels), |(n, y, x, c)| {
                let (ly, lx) = (ys[y], xs[x]);
                let top_left = input[(n, ly.lo, lx.lo, c)];
                let top_right = input[(n, ly.lo, lx.hi, c)];
                let bottom_left = input[(n, ly.hi, lx.lo, c)];
                let bottom_right = input[(n, ly.hi, lx.hi, c)];
                let top = top_left + (top_right - top_left) * lx.frac;
                let bottom = bottom_left + (bottom_right - bottom_left) * lx.frac;
                top + (bottom - top) * ly.frac
            });
        Ok(tvec!(output.into_tensor().into_tvalue()))
    }
}

impl TypedOp for ResizeBilinear {
    fn output_facts(&self, inputs: &[&TypedFact]) -> TractResult<TVec<TypedFact>> {
        let input = inputs[0];
        ensure!(input.rank() == 4, "ResizeBilinear expects a NHWC input, got {:?}", input);
        ensure!(
            input.datum_type == f32::datum_type(),
            "ResizeBilinear works on f32, got {:?}",
            input.datum_type
        );
        Ok(tvec!(f32::fact([
            input.shape[0].clone(),
            self.height.to_dim(),
            self.width.to_dim(),
            input.shape[3].clone(),
        ])))
    }

    as_op!();
}
