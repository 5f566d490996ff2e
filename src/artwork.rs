use image::{DynamicImage, GenericImageView, imageops::FilterType};
use std::path::Path;
use tracing::warn;

/// Decoded cover art sized for display.
pub struct Cover {
    pub image: DynamicImage,
    /// `false` when the blank placeholder stands in for a missing or broken file
    pub found: bool,
}

/// Decode `path` and fit it inside `size`. Anything that goes wrong yields
/// a blank placeholder of exactly `size`.
pub fn load_cover(path: Option<&Path>, size: (u32, u32)) -> Cover {
    let (w, h) = (size.0.max(1), size.1.max(1));

    let Some(path) = path else {
        return placeholder(w, h);
    };

    match image::open(path) {
        Ok(img) => Cover {
            image: img.resize(w, h, FilterType::Triangle),
            found: true,
        },
        Err(e) => {
            warn!("Could not decode cover {}: {e}", path.display());
            placeholder(w, h)
        }
    }
}

fn placeholder(w: u32, h: u32) -> Cover {
    Cover {
        image: DynamicImage::new_rgb8(w, h),
        found: false,
    }
}

/// Mean color of the image, used to tint the now-playing panel
pub fn average_color(image: &DynamicImage) -> (u8, u8, u8) {
    let (w, h) = image.dimensions();
    let count = u64::from(w) * u64::from(h);
    if count == 0 {
        return (0, 0, 0);
    }

    let (r, g, b) = image
        .to_rgb8()
        .pixels()
        .fold((0u64, 0u64, 0u64), |(r, g, b), p| {
            (r + u64::from(p[0]), g + u64::from(p[1]), b + u64::from(p[2]))
        });

    ((r / count) as u8, (g / count) as u8, (b / count) as u8)
}
