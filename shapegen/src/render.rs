use std::f64::consts::{FRAC_PI_2, TAU};
use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};
use imageproc::{
    drawing::{draw_filled_circle_mut, draw_polygon_mut},
    point::Point,
};
use shapes::{
    config::CanvasConfig,
    record::{Hsl, Shape, ShapeColor, ShapeRecord},
};

use crate::error::GenResult;

/// Rasterizes one attribute record onto a square RGB canvas: background
/// fill, then one filled shape, no stroke.
pub struct Rasterizer {
    canvas: CanvasConfig,
}

impl Rasterizer {
    pub fn new(canvas: CanvasConfig) -> Self {
        Self { canvas }
    }

    pub fn render(&self, rec: &ShapeRecord) -> RgbImage {
        let size = self.canvas.image_size;
        let mut img = RgbImage::from_pixel(size, size, hsl_to_rgb(rec.background));
        let color = foreground_rgb(rec.color);

        let img_f = f64::from(size);
        let cx = rec.center_x * img_f;
        let cy = rec.center_y * img_f;
        let radius = rec.size * (img_f / 2.0 - self.canvas.margin);

        match rec.shape {
            Shape::Polygon { vertices, angle } => {
                fill_polygon(&mut img, cx, cy, radius, vertices, angle, color);
            }
            Shape::Circle => {
                draw_filled_circle_mut(
                    &mut img,
                    (cx.round() as i32, cy.round() as i32),
                    radius.round() as i32,
                    color,
                );
            }
        }
        img
    }

    /// PNG bytes for one record, encoded in memory. This is both the batch
    /// archival path and the synchronous preview path.
    pub fn encode_png(&self, rec: &ShapeRecord) -> GenResult<Vec<u8>> {
        let img = self.render(rec);
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png)?;
        Ok(buf.into_inner())
    }
}

// Vertex 0 points straight up at angle 0; the rest follow clockwise in
// screen coordinates.
fn fill_polygon(
    img: &mut RgbImage,
    cx: f64,
    cy: f64,
    radius: f64,
    vertices: u32,
    angle: f64,
    color: Rgb<u8>,
) {
    let step = TAU / f64::from(vertices);
    let start = angle.to_radians() - FRAC_PI_2;
    let mut points: Vec<Point<i32>> = (0..vertices)
        .map(|i| {
            let a = start + step * f64::from(i);
            Point::new(
                (cx + radius * a.cos()).round() as i32,
                (cy + radius * a.sin()).round() as i32,
            )
        })
        .collect();

    // A tiny radius can collapse neighbouring vertices onto the same pixel,
    // which the polygon fill rejects; drop duplicates and fall back to a dot
    // when fewer than three raster points survive.
    points.dedup();
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    if points.len() < 3 {
        draw_filled_circle_mut(
            img,
            (cx.round() as i32, cy.round() as i32),
            radius.round().max(0.0) as i32,
            color,
        );
        return;
    }
    draw_polygon_mut(img, &points, color);
}

/// Standard HSL to RGB conversion with 8-bit quantization.
pub fn hsl_to_rgb(c: Hsl) -> Rgb<u8> {
    let h = c.hue.rem_euclid(360.0);
    let s = c.saturation.clamp(0.0, 1.0);
    let l = c.lightness.clamp(0.0, 1.0);

    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h / 60.0;
    let x = chroma * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match hp as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = l - chroma / 2.0;
    Rgb([quantize(r1 + m), quantize(g1 + m), quantize(b1 + m)])
}

fn foreground_rgb(color: ShapeColor) -> Rgb<u8> {
    match color {
        ShapeColor::Hsl(c) => hsl_to_rgb(c),
        ShapeColor::Rgb { r, g, b } => Rgb([quantize(r), quantize(g), quantize(b)]),
    }
}

fn quantize(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> CanvasConfig {
        CanvasConfig::new(64)
    }

    fn record(shape: Shape) -> ShapeRecord {
        ShapeRecord {
            shape,
            size: 1.0,
            center_x: 0.5,
            center_y: 0.5,
            color: ShapeColor::Rgb {
                r: 1.0,
                g: 0.0,
                b: 0.0,
            },
            background: Hsl::gray(1.0),
        }
    }

    #[test]
    fn hsl_conversion_hits_known_colors() {
        assert_eq!(hsl_to_rgb(Hsl::new(0.0, 1.0, 0.5)), Rgb([255, 0, 0]));
        assert_eq!(hsl_to_rgb(Hsl::new(120.0, 1.0, 0.5)), Rgb([0, 255, 0]));
        assert_eq!(hsl_to_rgb(Hsl::new(240.0, 1.0, 0.5)), Rgb([0, 0, 255]));
        assert_eq!(hsl_to_rgb(Hsl::gray(1.0)), Rgb([255, 255, 255]));
        assert_eq!(hsl_to_rgb(Hsl::gray(0.0)), Rgb([0, 0, 0]));
        assert_eq!(hsl_to_rgb(Hsl::gray(0.5)), Rgb([128, 128, 128]));
    }

    #[test]
    fn hue_wraps_modulo_360() {
        assert_eq!(
            hsl_to_rgb(Hsl::new(480.0, 1.0, 0.5)),
            hsl_to_rgb(Hsl::new(120.0, 1.0, 0.5))
        );
        assert_eq!(
            hsl_to_rgb(Hsl::new(-120.0, 1.0, 0.5)),
            hsl_to_rgb(Hsl::new(240.0, 1.0, 0.5))
        );
    }

    #[test]
    fn background_fills_the_whole_canvas() {
        let rec = ShapeRecord {
            size: 0.1,
            background: Hsl::gray(0.0),
            ..record(Shape::Circle)
        };
        let img = Rasterizer::new(canvas()).render(&rec);
        assert_eq!(img.dimensions(), (64, 64));
        assert_eq!(*img.get_pixel(0, 0), Rgb([0, 0, 0]));
        assert_eq!(*img.get_pixel(63, 63), Rgb([0, 0, 0]));
    }

    #[test]
    fn circle_paints_center_and_stays_inside_radius() {
        // size 1.0 on a 64 px canvas: radius 27 around (32, 32)
        let img = Rasterizer::new(canvas()).render(&record(Shape::Circle));
        assert_eq!(*img.get_pixel(32, 32), Rgb([255, 0, 0]));
        assert_eq!(*img.get_pixel(32, 2), Rgb([255, 255, 255]));
    }

    #[test]
    fn polygon_paints_foreground_inside_and_background_outside() {
        // Four vertices at 45 degrees form an axis-aligned square spanning
        // roughly [13, 51] on both axes.
        let rec = record(Shape::Polygon {
            vertices: 4,
            angle: 45.0,
        });
        let img = Rasterizer::new(canvas()).render(&rec);
        assert_eq!(*img.get_pixel(32, 32), Rgb([255, 0, 0]));
        assert_eq!(*img.get_pixel(20, 32), Rgb([255, 0, 0]));
        assert_eq!(*img.get_pixel(1, 1), Rgb([255, 255, 255]));
    }

    #[test]
    fn collapsed_polygon_degenerates_to_a_dot() {
        let rec = ShapeRecord {
            size: 0.001,
            ..record(Shape::Polygon {
                vertices: 8,
                angle: 0.0,
            })
        };
        let img = Rasterizer::new(canvas()).render(&rec);
        assert_eq!(*img.get_pixel(32, 32), Rgb([255, 0, 0]));
    }

    #[test]
    fn png_bytes_carry_the_signature() {
        let png = Rasterizer::new(canvas())
            .encode_png(&record(Shape::Circle))
            .unwrap();
        assert_eq!(&png[..4], &[0x89, b'P', b'N', b'G']);
    }
}
