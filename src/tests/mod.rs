mod judge_tests;

use image::{ Rgb, RgbImage };
use log::info;
use std::path::Path;

// Setup function to initialize logging
pub(crate) fn setup() {
    if env_logger::builder().is_test(true).try_init().is_ok() {
        info!("Logger initialized");
    }
}

/// Write a solid-colour PNG
pub(crate) fn write_png(path: &Path, width: u32, height: u32, color: [u8; 3]) {
    RgbImage::from_pixel(width, height, Rgb(color)).save(path).expect("write test png");
}
