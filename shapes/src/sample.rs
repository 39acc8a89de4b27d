use crate::{
    config::{
        BackgroundMode, CanvasConfig, ColorModel, GenerationConfig, PositionMode, ShapeMode,
    },
    record::{Hsl, Shape, ShapeColor, ShapeRecord},
    rng::UniformSource,
};

/// Draws fully-specified shape records from one uniform stream, keeping
/// every shape inside the canvas margins.
///
/// Draw order per sample is fixed: kind, size, center x/y, angle, vertex
/// count, color channels, background. Kind is only drawn in `Both` mode,
/// angle and vertices only for polygons, the background only in `Random`
/// mode, so replaying a seed with the same config replays the records.
pub struct Sampler<'a> {
    cfg: &'a GenerationConfig,
    canvas: CanvasConfig,
}

impl<'a> Sampler<'a> {
    pub fn new(cfg: &'a GenerationConfig) -> Self {
        Self {
            cfg,
            canvas: cfg.canvas(),
        }
    }

    pub fn with_canvas(cfg: &'a GenerationConfig, canvas: CanvasConfig) -> Self {
        Self { cfg, canvas }
    }

    pub fn draw(&self, src: &mut UniformSource) -> ShapeRecord {
        let polygon = match self.cfg.shape_mode {
            ShapeMode::Polygon => true,
            ShapeMode::Circle => false,
            ShapeMode::Both => src.next() < 0.5,
        };

        let (lo, hi) = self.cfg.size.sorted();
        let size = src.next_float(lo, hi);
        let (center_x, center_y) = self.draw_center(src, size);

        let shape = if polygon {
            let (alo, ahi) = self.cfg.angle.sorted();
            let angle = src.next_float(alo, ahi);
            let (vlo, vhi) = self.cfg.vertices.sorted();
            let vlo = vlo.max(3); // regular polygons start at triangles
            let vertices = src.next_int(vlo, vhi.max(vlo));
            Shape::Polygon { vertices, angle }
        } else {
            Shape::Circle
        };

        ShapeRecord {
            shape,
            size,
            center_x,
            center_y,
            color: self.draw_color(src),
            background: self.draw_background(src),
        }
    }

    // Keeps `center * image_size ± radius` inside the margins. A shape with
    // no placement freedom is pinned to the middle instead of rejected.
    fn draw_center(&self, src: &mut UniformSource, size: f64) -> (f64, f64) {
        if self.cfg.position == PositionMode::Center {
            return (0.5, 0.5);
        }
        let img = f64::from(self.canvas.image_size);
        let radius = size * (img / 2.0 - self.canvas.margin);
        let min_c = (radius + self.canvas.margin) / img;
        let max_c = 1.0 - min_c;
        if min_c >= max_c {
            return (0.5, 0.5);
        }
        (src.next_float(min_c, max_c), src.next_float(min_c, max_c))
    }

    fn draw_color(&self, src: &mut UniformSource) -> ShapeColor {
        let (hlo, hhi) = self.cfg.hue.sorted();
        let (slo, shi) = self.cfg.saturation.sorted();
        match self.cfg.color_model {
            ColorModel::Hs => ShapeColor::Hsl(Hsl::new(
                src.next_float(hlo, hhi),
                src.next_float(slo, shi),
                0.5,
            )),
            ColorModel::Hsl => {
                let (llo, lhi) = self.cfg.lightness.sorted();
                ShapeColor::Hsl(Hsl::new(
                    src.next_float(hlo, hhi),
                    src.next_float(slo, shi),
                    src.next_float(llo, lhi),
                ))
            }
            ColorModel::Rgb => {
                let (rlo, rhi) = self.cfg.red.sorted();
                let (glo, ghi) = self.cfg.green.sorted();
                let (blo, bhi) = self.cfg.blue.sorted();
                ShapeColor::Rgb {
                    r: src.next_float(rlo, rhi),
                    g: src.next_float(glo, ghi),
                    b: src.next_float(blo, bhi),
                }
            }
        }
    }

    fn draw_background(&self, src: &mut UniformSource) -> Hsl {
        match self.cfg.background {
            BackgroundMode::White => Hsl::gray(1.0),
            BackgroundMode::Black => Hsl::gray(0.0),
            BackgroundMode::Gray => Hsl::gray(0.5),
            // Categorical draw, not a continuous hue
            BackgroundMode::Random => match src.next_int(0, 2) {
                0 => Hsl::gray(0.0),
                1 => Hsl::gray(1.0),
                _ => Hsl::gray(0.5),
            },
        }
    }
}
