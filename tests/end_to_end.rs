use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use imgconv_rs::image_pipeline::bmp::decode_bmp;
use imgconv_rs::image_pipeline::{Color, ConversionError, ConversionPipeline, Image};
use tempfile::TempDir;

const RED: Color = Color::rgb(255, 0, 0);
const GREEN: Color = Color::rgb(0, 255, 0);
const BLUE: Color = Color::rgb(0, 0, 255);
const WHITE: Color = Color::rgb(255, 255, 255);

/// 2x2 bitmap written byte by byte: red, green on top; blue, white below.
fn hand_made_bmp() -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&70u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&54u32.to_le_bytes());

    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(&2i32.to_le_bytes());
    bytes.extend_from_slice(&2i32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&24u16.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&11811i32.to_le_bytes());
    bytes.extend_from_slice(&11811i32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&0x0100_0000u32.to_le_bytes());

    // bottom row: blue, white
    bytes.extend_from_slice(&[255, 0, 0, 255, 255, 255, 0, 0]);
    // top row: red, green
    bytes.extend_from_slice(&[0, 0, 255, 0, 255, 0, 0, 0]);
    bytes
}

fn expected_grid() -> Image {
    let mut image = Image::new(2, 2, Color::black());
    image.set_pixel(0, 0, RED);
    image.set_pixel(1, 0, GREEN);
    image.set_pixel(0, 1, BLUE);
    image.set_pixel(1, 1, WHITE);
    image
}

fn read_bmp(path: &Path) -> Image {
    let bytes = fs::read(path).unwrap();
    decode_bmp(&mut bytes.as_slice()).unwrap()
}

fn run_cli(args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_imgconv_rs"))
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_bmp_to_ppm_and_back() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("source.bmp");
    let middle = dir.path().join("middle.ppm");
    let back = dir.path().join("back.bmp");
    fs::write(&source, hand_made_bmp()).unwrap();

    let pipeline = ConversionPipeline::default();
    pipeline.convert_file(&source, &middle).unwrap();
    pipeline.convert_file(&middle, &back).unwrap();

    let mut expected_ppm = b"P6\n2 2\n255\n".to_vec();
    expected_ppm.extend_from_slice(&[255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255]);
    assert_eq!(fs::read(&middle).unwrap(), expected_ppm);

    assert_eq!(read_bmp(&back), expected_grid());
    assert_eq!(fs::read(&back).unwrap(), hand_made_bmp());
}

#[test]
fn test_bmp_through_jpeg() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("flat.bmp");
    let jpeg = dir.path().join("flat.jpg");
    let back = dir.path().join("back.bmp");

    let image = Image::new(24, 16, Color::rgb(30, 160, 220));
    let mut bytes = Vec::new();
    imgconv_rs::image_pipeline::bmp::encode_bmp(&image, &mut bytes).unwrap();
    fs::write(&source, bytes).unwrap();

    let pipeline = ConversionPipeline::default();
    pipeline.convert_file(&source, &jpeg).unwrap();
    pipeline.convert_file(&jpeg, &back).unwrap();

    let decoded = read_bmp(&back);
    assert_eq!((decoded.width(), decoded.height()), (24, 16));
    let center = decoded.pixel(12, 8).unwrap();
    assert!(center.r.abs_diff(30) <= 8);
    assert!(center.g.abs_diff(160) <= 8);
    assert!(center.b.abs_diff(220) <= 8);
}

#[test]
fn test_bmp_wider_than_u16_converts() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("wide.bmp");
    let target = dir.path().join("wide.ppm");

    let mut image = Image::new(70_000, 1, Color::black());
    image.set_pixel(69_999, 0, RED);
    let mut bytes = Vec::new();
    imgconv_rs::image_pipeline::bmp::encode_bmp(&image, &mut bytes).unwrap();
    fs::write(&source, bytes).unwrap();

    ConversionPipeline::default()
        .convert_file(&source, &target)
        .unwrap();

    let ppm = fs::read(&target).unwrap();
    let header = b"P6\n70000 1\n255\n";
    assert_eq!(&ppm[..header.len()], header);
    assert_eq!(ppm.len(), header.len() + 70_000 * 3);
    assert_eq!(&ppm[ppm.len() - 3..], &[255, 0, 0]);
}

#[test]
fn test_corrupt_bmp_fails_to_load() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("broken.bmp");
    let target = dir.path().join("out.ppm");
    let mut bytes = hand_made_bmp();
    bytes.truncate(bytes.len() - 3);
    fs::write(&source, bytes).unwrap();

    let err = ConversionPipeline::default()
        .convert_file(&source, &target)
        .unwrap_err();

    assert!(matches!(err, ConversionError::LoadFailed(_)));
    assert!(!target.exists());
}

#[test]
fn test_cli_success() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("in.bmp");
    let target = dir.path().join("out.ppm");
    fs::write(&source, hand_made_bmp()).unwrap();

    let output = run_cli(&[&source, &target]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Successfully converted"));
    assert!(target.exists());
}

#[test]
fn test_cli_wrong_argument_count() {
    let output = run_cli(&[Path::new("only_one.bmp")]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn test_cli_unknown_input_format() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("in.gif");
    let target = dir.path().join("out.bmp");
    fs::write(&source, b"GIF89a").unwrap();

    let output = run_cli(&[&source, &target]);

    assert_eq!(output.status.code(), Some(2));
    assert!(!target.exists());
}

#[test]
fn test_cli_unknown_output_format_leaves_no_file() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("in.bmp");
    let target = dir.path().join("out.gif");
    fs::write(&source, hand_made_bmp()).unwrap();

    let output = run_cli(&[&source, &target]);

    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("output"));
    assert!(!target.exists());
}

#[test]
fn test_cli_existing_output_untouched_on_unknown_format() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("in.bmp");
    let target = dir.path().join("out.gif");
    fs::write(&source, hand_made_bmp()).unwrap();
    fs::write(&target, b"keep me").unwrap();

    let output = run_cli(&[&source, &target]);

    assert_eq!(output.status.code(), Some(3));
    assert_eq!(fs::read(&target).unwrap(), b"keep me");
}

#[test]
fn test_cli_load_failure() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("in.bmp");
    let target = dir.path().join("out.ppm");
    fs::write(&source, b"definitely not a bitmap").unwrap();

    let output = run_cli(&[&source, &target]);

    assert_eq!(output.status.code(), Some(4));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Loading failed"));
}

#[test]
fn test_cli_save_failure() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("in.bmp");
    let target = dir.path().join("missing_dir").join("out.ppm");
    fs::write(&source, hand_made_bmp()).unwrap();

    let output = run_cli(&[&source, &target]);

    assert_eq!(output.status.code(), Some(5));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Saving failed"));
}
