/// Shape kind with its kind-specific parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Polygon { vertices: u32, angle: f64 },
    Circle,
}

impl Shape {
    /// Vertex count as recorded in the metadata; circles record 0.
    pub fn vertices(&self) -> u32 {
        match self {
            Self::Polygon { vertices, .. } => *vertices,
            Self::Circle => 0,
        }
    }

    /// Rotation in degrees; circles record 0.
    pub fn angle(&self) -> f64 {
        match self {
            Self::Polygon { angle, .. } => *angle,
            Self::Circle => 0.0,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Polygon { .. } => "polygon",
            Self::Circle => "circle",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// Achromatic color at the given lightness.
    pub fn gray(lightness: f64) -> Self {
        Self::new(0.0, 0.0, lightness)
    }
}

/// Foreground color under the active color model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeColor {
    Hsl(Hsl),
    Rgb { r: f64, g: f64, b: f64 },
}

/// Full parameter set describing one generated image. Sampled once,
/// rendered once, serialized once; never mutated in between.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeRecord {
    pub shape: Shape,
    /// Fraction of the maximum inscribed radius.
    pub size: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub color: ShapeColor,
    pub background: Hsl,
}
