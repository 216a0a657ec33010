use image::{imageops, imageops::FilterType, RgbImage};

/// Scale `image` to exactly `width` dots, preserving aspect ratio.
///
/// The new height is `width * original_height / original_width` with the
/// fractional row truncated, not rounded. Degenerate inputs still come out
/// at least one row tall.
pub fn resize_to_width(image: &RgbImage, width: u32) -> RgbImage {
    let aspect = image.height() as f64 / image.width() as f64;
    let height = ((width as f64 * aspect) as u32).max(1);

    imageops::resize(image, width, height, FilterType::CatmullRom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(width: u32, height: u32) -> RgbImage {
        RgbImage::new(width, height)
    }

    #[test]
    fn width_is_exact_and_height_keeps_aspect() {
        let resized = resize_to_width(&blank(100, 200), 224);
        assert_eq!(resized.dimensions(), (224, 448));

        let resized = resize_to_width(&blank(288, 576), 192);
        assert_eq!(resized.dimensions(), (192, 384));
    }

    #[test]
    fn height_truncates_rather_than_rounds() {
        // 224 * 100 / 300 = 74.66..; the fractional row is dropped.
        let resized = resize_to_width(&blank(300, 100), 224);
        assert_eq!(resized.dimensions(), (224, 74));
    }

    #[test]
    fn height_never_collapses_to_zero() {
        let resized = resize_to_width(&blank(1000, 1), 203);
        assert_eq!(resized.dimensions(), (203, 1));
    }
}
