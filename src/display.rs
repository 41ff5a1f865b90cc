//! Aspect-preserving fit of an image into a viewport.

/// Where a scaled image lands inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub width: usize,
    pub height: usize,
    /// Left offset that centers the image horizontally.
    pub offset_x: usize,
    /// Top offset that centers the image vertically.
    pub offset_y: usize,
}

/// Fit `(width, height)` inside `(viewport_width, viewport_height)` keeping the
/// aspect ratio.
///
/// Returns `None` (nothing to render) for viewports smaller than 2 pixels on
/// either side, for empty images, or when the fitted size rounds below 1 pixel.
pub fn fit_within(
    image: (usize, usize),
    viewport: (usize, usize),
) -> Option<Placement> {
    let (img_w, img_h) = image;
    let (view_w, view_h) = viewport;
    if view_w < 2 || view_h < 2 || img_w == 0 || img_h == 0 {
        return None;
    }

    let aspect = img_w as f64 / img_h as f64;
    let (w, h) = if view_w as f64 / aspect <= view_h as f64 {
        (view_w as f64, (view_w as f64 / aspect).round())
    } else {
        ((view_h as f64 * aspect).round(), view_h as f64)
    };
    if w < 1.0 || h < 1.0 {
        return None;
    }

    let (width, height) = (w as usize, h as usize);
    Some(Placement {
        width,
        height,
        offset_x: view_w.saturating_sub(width) / 2,
        offset_y: view_h.saturating_sub(height) / 2,
    })
}
