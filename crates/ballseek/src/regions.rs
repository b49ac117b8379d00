//! Region proposal: fuse a bright-pixel mask with an edge map.
//!
//! The ball shows up in two distinct ways depending on exposure: as a
//! saturated blob when over-exposed or slightly out of focus, and as a
//! crisp circular boundary when correctly exposed. Thresholding catches the
//! first, Canny the second, and their union feeds the circle search so that
//! either appearance alone is enough.

use image::{GrayImage, Luma};
use imageproc::distance_transform::Norm;
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use imageproc::map::map_colors2;
use imageproc::morphology::{close, open};

use crate::params::RegionParams;

/// Maps derived from one intensity frame. All three share the frame's
/// dimensions and live only for the duration of one detection call.
pub(crate) struct RegionMaps {
    /// Cleaned binary mask of bright pixels.
    pub bright: GrayImage,
    /// Canny edge map of the raw intensity image.
    pub edges: GrayImage,
    /// Smoothed union of the two, input to the circle transform.
    pub fused: GrayImage,
}

pub(crate) fn propose(gray: &GrayImage, params: &RegionParams) -> RegionMaps {
    let bright = bright_mask(gray, params);
    let edges = canny(gray, params.canny_low, params.canny_high);
    let combined = map_colors2(&bright, &edges, |b, e| Luma([b[0] | e[0]]));
    let fused = gaussian_blur_f32(&combined, params.blur_sigma);
    RegionMaps {
        bright,
        edges,
        fused,
    }
}

/// Threshold at the brightness cutoff, then open to drop speckle noise and
/// close to fill small gaps, both with an elliptical neighborhood.
fn bright_mask(gray: &GrayImage, params: &RegionParams) -> GrayImage {
    let (w, h) = gray.dimensions();
    let mask = GrayImage::from_fn(w, h, |x, y| {
        if gray.get_pixel(x, y)[0] > params.bright_threshold {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    });
    let mask = open(&mask, Norm::L2, params.morph_radius);
    close(&mask, Norm::L2, params.morph_radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(w: u32, h: u32) -> GrayImage {
        GrayImage::from_pixel(w, h, Luma([0u8]))
    }

    fn draw_disk(img: &mut GrayImage, cx: i32, cy: i32, r: i32, value: u8) {
        for y in (cy - r).max(0)..=(cy + r).min(img.height() as i32 - 1) {
            for x in (cx - r).max(0)..=(cx + r).min(img.width() as i32 - 1) {
                let (dx, dy) = (x - cx, y - cy);
                if dx * dx + dy * dy <= r * r {
                    img.put_pixel(x as u32, y as u32, Luma([value]));
                }
            }
        }
    }

    #[test]
    fn speckle_is_opened_away_but_a_disk_survives() {
        let mut img = blank(64, 64);
        img.put_pixel(5, 5, Luma([255u8])); // isolated speckle
        draw_disk(&mut img, 40, 32, 10, 220);

        let maps = propose(&img, &RegionParams::default());
        assert_eq!(maps.bright.get_pixel(5, 5)[0], 0);
        assert_eq!(maps.bright.get_pixel(40, 32)[0], 255);
    }

    #[test]
    fn dim_scene_proposes_nothing() {
        let img = GrayImage::from_pixel(48, 48, Luma([30u8]));
        let maps = propose(&img, &RegionParams::default());
        assert!(maps.bright.as_raw().iter().all(|&p| p == 0));
        assert!(maps.edges.as_raw().iter().all(|&p| p == 0));
        assert!(maps.fused.as_raw().iter().all(|&p| p == 0));
    }

    #[test]
    fn fused_map_covers_both_mask_and_edges() {
        let mut img = blank(96, 96);
        draw_disk(&mut img, 48, 48, 20, 200);
        let maps = propose(&img, &RegionParams::default());
        // The disk interior comes from the bright mask, the rim from Canny;
        // both must survive the fusion (blurring keeps the interior high).
        assert!(maps.fused.get_pixel(48, 48)[0] > 128);
        let rim_on = maps.edges.as_raw().iter().any(|&p| p > 0);
        assert!(rim_on, "expected Canny to fire on the disk rim");
    }
}
