//! Overlay rendering for the crossing gate.
//!
//! Pure visualization: composites the two realms as semi-transparent
//! fills over a copy of the input image and draws the bar centerline.
//! Nothing here feeds back into crossing detection.

use std::collections::HashMap;

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point;

use crate::gate::{CrossingGate, DetectionFrame, Realm};

/// Fill color for `realm_in`.
const IN_FILL: Rgb<u8> = Rgb([255, 0, 0]);
/// Fill color for `realm_out`.
const OUT_FILL: Rgb<u8> = Rgb([0, 0, 255]);
/// Centerline color.
const LINE_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
/// Opacity of the realm fills over the input image.
const FILL_ALPHA: f32 = 0.4;

/// Produce an annotated copy of `image` for the gate's current geometry.
///
/// The realm fills are always composited; the centerline is drawn only
/// when the gate was configured with `visualize`. The input image is
/// never mutated.
pub fn annotate(image: &RgbImage, gate: &CrossingGate) -> RgbImage {
    let mut overlay = image.clone();
    fill_realm(&mut overlay, gate.realm_in(), IN_FILL);
    fill_realm(&mut overlay, gate.realm_out(), OUT_FILL);

    let mut out = blend(image, &overlay, FILL_ALPHA);
    if gate.visualize() {
        let (start, end) = (gate.start(), gate.end());
        draw_line_segment_mut(&mut out, (start.x, start.y), (end.x, end.y), LINE_COLOR);
    }
    out
}

fn fill_realm(image: &mut RgbImage, realm: &Realm, color: Rgb<u8>) {
    let mut points: Vec<Point<i32>> = Vec::with_capacity(4);
    for v in &realm.vertices {
        let p = Point::new(v.x.round() as i32, v.y.round() as i32);
        if points.last() != Some(&p) {
            points.push(p);
        }
    }
    // Degenerate realms (zero-length bar, sub-pixel width) round down to
    // too few distinct vertices to fill.
    if points.len() < 3 || points.first() == points.last() {
        return;
    }
    draw_polygon_mut(image, &points, color);
}

fn blend(base: &RgbImage, overlay: &RgbImage, alpha: f32) -> RgbImage {
    let mut out = base.clone();
    for (o, (b, v)) in out
        .pixels_mut()
        .zip(base.pixels().zip(overlay.pixels()))
    {
        for c in 0..3 {
            o.0[c] = (alpha * v.0[c] as f32 + (1.0 - alpha) * b.0[c] as f32).round() as u8;
        }
    }
    out
}

impl CrossingGate {
    /// Process one detection frame and hand back an annotated copy of the
    /// supplied image alongside the updated counters.
    ///
    /// Identical to [`CrossingGate::update`] in every observable way
    /// except for the extra rendered output.
    pub fn update_with_image(
        &mut self,
        image: &RgbImage,
        frame: DetectionFrame,
    ) -> (RgbImage, &HashMap<String, u64>) {
        self.update(frame);
        let annotated = annotate(image, self);
        (annotated, self.counts())
    }
}
