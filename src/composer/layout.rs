/// Size of an image after scaling it to `target_height`, keeping the aspect
/// ratio. The width is floored. Images already at the target are unchanged.
pub fn scaled_size(width: u32, height: u32, target_height: u32) -> (u32, u32) {
    if height == target_height || height == 0 {
        return (width, height);
    }
    let scaled = ((width as u64) * (target_height as u64)) / (height as u64);
    (scaled.max(1) as u32, target_height)
}

/// Where one image sits on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelPlacement {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Geometry of a comparison canvas
///
/// Panels run left to right, each preceded by `padding`, below a label band
/// of `label_height`. The canvas is `sum(widths) + padding * (n + 1)` wide and
/// `max(heights) + label_height + 2 * padding` tall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasLayout {
    pub width: u32,
    pub height: u32,
    /// Top of the label text
    pub label_y: u32,
    pub panels: Vec<PanelPlacement>,
}

impl CanvasLayout {
    /// Lay out images of the given (already normalized) sizes
    pub fn compute(sizes: &[(u32, u32)], padding: u32, label_height: u32) -> Self {
        let max_height = sizes
            .iter()
            .map(|(_, h)| *h)
            .max()
            .unwrap_or(0);
        let total_width: u32 = sizes.iter().map(|(w, _)| *w).sum::<u32>() +
            padding * ((sizes.len() as u32) + 1);
        let total_height = max_height + label_height + padding * 2;

        let y = label_height + padding;
        let mut x = padding;
        let mut panels = Vec::with_capacity(sizes.len());
        for (width, height) in sizes {
            panels.push(PanelPlacement {
                x,
                y,
                width: *width,
                height: *height,
            });
            x += width + padding;
        }

        Self {
            width: total_width,
            height: total_height,
            label_y: padding,
            panels,
        }
    }
}
