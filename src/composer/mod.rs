//! Composer: lays out reference and app screenshots side by side with
//! labels and writes a single comparison PNG.

pub mod font;
pub mod layout;

use image::imageops::{ self, FilterType };
use image::{ ImageFormat, Rgb, RgbImage };
use log::{ debug, info };
use std::path::{ Path, PathBuf };

use crate::config::ComposerConfig;
use crate::errors::{ HarnessError, HarnessResult };
use crate::models::{ ScreenshotNames, ScreenshotRole, ScreenshotSet };

pub use font::LabelFont;
pub use layout::{ scaled_size, CanvasLayout, PanelPlacement };

/// Fewer screenshots than this make no comparison
pub const MIN_SCREENSHOTS: usize = 2;

/// A decoded screenshot and the label drawn above it
pub struct ComparisonImage {
    pub role: ScreenshotRole,
    pub label: String,
    pub image: RgbImage,
}

/// Resolve the screenshots for `book`/`chapter` in `dir`, compose them and
/// write `comparison_<book>_ch<chapter>.png` into the same directory.
///
/// Nothing is written unless at least two screenshots resolve and every
/// resolved screenshot decodes.
pub fn compose_comparison(
    book: &str,
    chapter: &str,
    dir: &Path,
    config: &ComposerConfig
) -> HarnessResult<PathBuf> {
    let names = ScreenshotNames::new(book, chapter);
    let set = ScreenshotSet::resolve(dir, &names);

    if set.len() < MIN_SCREENSHOTS {
        return Err(HarnessError::InsufficientScreenshots {
            found: set.len(),
            required: MIN_SCREENSHOTS,
        });
    }

    let images = load_images(&set)?;
    let canvas = render_comparison(normalize_heights(images), config);

    let output = dir.join(names.comparison());
    canvas
        .save_with_format(&output, ImageFormat::Png)
        .map_err(|source| HarnessError::ImageEncode {
            path: output.clone(),
            source,
        })?;

    info!("Comparison image saved to {}", output.display());
    Ok(output)
}

/// Decode every resolved screenshot. A corrupt file is an error, not a gap.
pub fn load_images(set: &ScreenshotSet) -> HarnessResult<Vec<ComparisonImage>> {
    set.resolved()
        .into_iter()
        .map(|shot| {
            let decoded = image::open(&shot.path).map_err(|source| HarnessError::ImageDecode {
                path: shot.path.clone(),
                source,
            })?;
            debug!(
                "Loaded {} ({}x{})",
                shot.path.display(),
                decoded.width(),
                decoded.height()
            );
            Ok(ComparisonImage {
                role: shot.role,
                label: shot.role.label().to_string(),
                image: decoded.to_rgb8(),
            })
        })
        .collect()
}

/// Scale every image to the tallest image's height with Lanczos resampling
pub fn normalize_heights(images: Vec<ComparisonImage>) -> Vec<ComparisonImage> {
    let target = images
        .iter()
        .map(|i| i.image.height())
        .max()
        .unwrap_or(0);

    images
        .into_iter()
        .map(|mut entry| {
            let (width, height) = entry.image.dimensions();
            if height != target {
                let (new_width, new_height) = scaled_size(width, height, target);
                debug!("Resizing {} from {}x{} to {}x{}", entry.label, width, height, new_width, new_height);
                entry.image = imageops::resize(
                    &entry.image,
                    new_width,
                    new_height,
                    FilterType::Lanczos3
                );
            }
            entry
        })
        .collect()
}

/// Paint normalized images and their labels onto a fresh canvas
pub fn render_comparison(images: Vec<ComparisonImage>, config: &ComposerConfig) -> RgbImage {
    let sizes: Vec<(u32, u32)> = images
        .iter()
        .map(|i| i.image.dimensions())
        .collect();
    let layout = CanvasLayout::compute(&sizes, config.padding, config.label_height);

    let mut canvas = RgbImage::from_pixel(layout.width, layout.height, Rgb(config.background));
    let font = LabelFont::discover(&config.font_paths, config.font_size);
    let color = Rgb(config.label_color);

    for (entry, panel) in images.iter().zip(&layout.panels) {
        imageops::replace(&mut canvas, &entry.image, panel.x as i64, panel.y as i64);

        let text_width = font.text_width(&entry.label) as i32;
        let text_x = (panel.x as i32) + ((panel.width as i32) - text_width).div_euclid(2);
        font.draw(&mut canvas, color, text_x, layout.label_y as i32, &entry.label);
    }

    canvas
}
