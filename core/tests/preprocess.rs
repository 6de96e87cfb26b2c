mod utils;

use proptest::prelude::*;
use recog_core::{Preprocessor, RecogError};
use tract_tensorflow::prelude::*;

use crate::utils::*;

#[test]
fn model_sized_image_is_only_mean_centered() {
    setup_test_logger();
    let bytes = jpeg(224, 224);
    let normalized = Preprocessor::default().normalize(&bytes).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
    let expected: Vec<f32> = decoded.as_raw().iter().map(|&p| p as f32 - 117.0).collect();
    assert_eq!(normalized.shape(), &[1, 224, 224, 3]);
    assert_eq!(normalized.as_slice::<f32>().unwrap(), &*expected);
}

#[test]
fn custom_size_and_mean() {
    let bytes = jpeg(64, 48);
    let preprocessor = Preprocessor::new(299, 299, 128.0);
    let normalized = preprocessor.normalize(&bytes).unwrap();
    assert_eq!(normalized.shape(), &[1, 299, 299, 3]);
    let values = normalized.as_slice::<f32>().unwrap();
    assert!(values.iter().all(|v| (-128.0..=127.0).contains(v)));
}

#[test]
fn text_bytes_are_a_decode_error() {
    let result = Preprocessor::default().normalize(b"<html>404 not found</html>");
    assert!(matches!(result, Err(RecogError::Decode(_))));
}

#[test]
fn truncated_header_is_a_decode_error() {
    let bytes = jpeg(64, 64);
    let result = Preprocessor::default().normalize(&bytes[..20]);
    assert!(matches!(result, Err(RecogError::Decode(_))));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]
    #[test]
    fn any_size_lands_on_model_shape(width in 1u32..300, height in 1u32..300) {
        let tensor = Preprocessor::default().normalize(&jpeg(width, height)).unwrap();
        prop_assert_eq!(tensor.shape(), &[1, 224, 224, 3]);
        prop_assert_eq!(tensor.datum_type(), f32::datum_type());
    }
}
