use image::RgbImage;
use log::debug;
use mupdf::{Colorspace, Device, Document, Matrix, Pixmap};
use std::path::Path;

use crate::error::DocumentError;

/// Rasterize the first page of the document at `path`.
///
/// The page is rendered through a `scale` x `scale` transform, so a scale of
/// 2.0 doubles the nominal point size of the page in pixels. Only page 0 is
/// ever loaded; multi-page documents print their first page.
pub fn render_first_page(path: &Path, scale: f32) -> Result<RgbImage, DocumentError> {
    if !path.exists() {
        return Err(DocumentError::NotFound(path.to_path_buf()));
    }

    let doc = Document::open(&path.to_string_lossy())?;
    let page = doc.load_page(0)?;

    let transform = Matrix::new_scale(scale, scale);
    let bounds = page.bounds()?;
    let width = ((bounds.x1 - bounds.x0) * scale) as i32;
    let height = ((bounds.y1 - bounds.y0) * scale) as i32;
    debug!("rendering page 0 at {}x{} (scale {})", width, height, scale);

    let mut pixmap = Pixmap::new_with_w_h(&Colorspace::device_rgb(), width, height, false)?;
    pixmap.clear_with(0xff)?;

    let device = Device::from_pixmap(&pixmap)?;
    page.run(&device, &transform)?;

    let mut img = RgbImage::new(width as u32, height as u32);
    let samples = pixmap.samples();

    for y in 0..height {
        for x in 0..width {
            let idx = ((y * width + x) * 3) as usize;
            if idx + 2 < samples.len() {
                let pixel = image::Rgb([samples[idx], samples[idx + 1], samples[idx + 2]]);
                img.put_pixel(x as u32, y as u32, pixel);
            }
        }
    }

    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_reported_without_opening() {
        let err = render_first_page(Path::new("no-such-file.pdf"), 2.0).unwrap_err();
        assert!(matches!(err, DocumentError::NotFound(_)));
    }
}
