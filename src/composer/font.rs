use ab_glyph::{ FontVec, PxScale };
use font8x8::UnicodeFonts;
use image::{ Rgb, RgbImage };
use imageproc::drawing::{ draw_text_mut, text_size };
use log::{ debug, info };
use std::path::{ Path, PathBuf };

const BUILTIN_GLYPH_SIZE: u32 = 8;

/// Font used for panel labels
///
/// Acquisition never fails: when no listed font can be loaded the built-in
/// 8x8 bitmap font is used, scaled to roughly the requested size.
pub enum LabelFont {
    TrueType {
        font: FontVec,
        scale: PxScale,
    },
    Builtin {
        scale: u32,
    },
}

impl LabelFont {
    /// First font in `paths` that exists and parses, else the built-in one
    pub fn discover(paths: &[PathBuf], size: f32) -> Self {
        for path in paths {
            if let Some(font) = Self::load(path, size) {
                info!("Using label font {}", path.display());
                return font;
            }
        }
        debug!("No label font found, using built-in bitmap font");
        Self::builtin(size)
    }

    /// Load a TrueType/OpenType font (first face of a collection)
    pub fn load(path: &Path, size: f32) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                debug!("Could not read font {}: {}", path.display(), e);
                return None;
            }
        };
        match FontVec::try_from_vec_and_index(data, 0) {
            Ok(font) =>
                Some(LabelFont::TrueType {
                    font,
                    scale: PxScale::from(size),
                }),
            Err(e) => {
                debug!("Skipping unparseable font {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn builtin(size: f32) -> Self {
        let scale = (size / (BUILTIN_GLYPH_SIZE as f32)).round().max(1.0) as u32;
        LabelFont::Builtin { scale }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, LabelFont::Builtin { .. })
    }

    /// Rendered width of `text` in pixels
    pub fn text_width(&self, text: &str) -> u32 {
        match self {
            LabelFont::TrueType { font, scale } => text_size(*scale, font, text).0,
            LabelFont::Builtin { scale } =>
                (text.chars().count() as u32) * BUILTIN_GLYPH_SIZE * scale,
        }
    }

    /// Draw `text` with its top-left corner at (x, y), clipped to the canvas
    pub fn draw(&self, canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, text: &str) {
        match self {
            LabelFont::TrueType { font, scale } => {
                draw_text_mut(canvas, color, x, y, *scale, font, text);
            }
            LabelFont::Builtin { scale } => draw_bitmap_text(canvas, color, x, y, *scale, text),
        }
    }
}

fn draw_bitmap_text(canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, scale: u32, text: &str) {
    let (width, height) = (canvas.width() as i64, canvas.height() as i64);
    let scale = scale as i64;
    let advance = (BUILTIN_GLYPH_SIZE as i64) * scale;

    for (index, ch) in text.chars().enumerate() {
        // Characters outside the basic set render as blanks
        let glyph = match font8x8::BASIC_FONTS.get(ch) {
            Some(glyph) => glyph,
            None => continue,
        };
        let origin_x = (x as i64) + (index as i64) * advance;

        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..BUILTIN_GLYPH_SIZE as i64 {
                if (*bits & (1 << col)) == 0 {
                    continue;
                }
                let px = origin_x + col * scale;
                let py = (y as i64) + (row as i64) * scale;
                for dy in 0..scale {
                    for dx in 0..scale {
                        let (cx, cy) = (px + dx, py + dy);
                        if cx >= 0 && cy >= 0 && cx < width && cy < height {
                            canvas.put_pixel(cx as u32, cy as u32, color);
                        }
                    }
                }
            }
        }
    }
}
