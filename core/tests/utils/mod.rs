#![allow(dead_code)]
use std::path::Path;

use image::ColorType;
use image::codecs::jpeg::JpegEncoder;
use recog_core::Config;
use tract_tensorflow::prelude::*;
use tract_tensorflow::tfpb;
use tract_tensorflow::tfpb::tensorflow::attr_value::Value;
use tract_tensorflow::tfpb::tensorflow::{AttrValue, DataType, NodeDef, TensorProto};

pub fn setup_test_logger() {
    let _ = env_logger::Builder::from_env("RECOG_LOG").try_init();
}

/// A deterministic RGB JPEG with some texture in it.
pub fn jpeg(width: u32, height: u32) -> Vec<u8> {
    let pixels: Vec<u8> = (0..height)
        .flat_map(|y| {
            (0..width).flat_map(move |x| [(x * 255 / width) as u8, (y * 255 / height) as u8, 128])
        })
        .collect();
    let mut buf = vec![];
    JpegEncoder::new_with_quality(&mut buf, 90)
        .encode(&pixels, width, height, ColorType::Rgb8)
        .unwrap();
    buf
}

fn konst(name: &str, tensor: &Tensor) -> NodeDef {
    let dtype = if tensor.datum_type() == i32::datum_type() {
        DataType::DtInt32
    } else {
        DataType::DtFloat
    };
    tfpb::node()
        .name(name)
        .op("Const")
        .attr("dtype", dtype)
        .attr("value", TensorProto::try_from(tensor).unwrap())
}

/// A frozen graph with an `input` placeholder whose `output` is always
/// `[probabilities]`, whatever the input values.
pub fn stub_graph(probabilities: &[f32]) -> Vec<u8> {
    let probs = Tensor::from_shape(&[1, probabilities.len()], probabilities).unwrap();
    tfpb::graph()
        .node(tfpb::node().name("input").op("Placeholder").attr("dtype", DataType::DtFloat))
        .node(konst("probs", &probs))
        .node(konst("axes", &tensor1(&[0i32, 1, 2, 3])))
        .node(konst("zero", &tensor0(0f32)))
        .node(
            tfpb::node()
                .name("sum")
                .op("Sum")
                .input("input")
                .input("axes")
                .attr("T", DataType::DtFloat)
                .attr("Tidx", DataType::DtInt32)
                .attr("keep_dims", AttrValue { value: Some(Value::B(false)) }),
        )
        .node(
            tfpb::node()
                .name("silence")
                .op("Mul")
                .input("sum")
                .input("zero")
                .attr("T", DataType::DtFloat),
        )
        .node(
            tfpb::node()
                .name("output")
                .op("Add")
                .input("probs")
                .input("silence")
                .attr("T", DataType::DtFloat),
        )
        .write_to_bytes()
        .unwrap()
}

/// Write a stub graph and a label file in `dir`, return a config using them.
pub fn artifacts(dir: &Path, probabilities: &[f32], labels: &[&str]) -> Config {
    let graph = dir.join("graph.pb");
    let labels_path = dir.join("labels.txt");
    std::fs::write(&graph, stub_graph(probabilities)).unwrap();
    std::fs::write(&labels_path, labels.join("\n")).unwrap();
    Config { graph, labels: labels_path, ..Config::default() }
}

pub fn normalized_zeros() -> Tensor {
    Tensor::zero::<f32>(&[1, 224, 224, 3]).unwrap()
}
