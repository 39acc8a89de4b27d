use serde::{Deserialize, Serialize};

/// Pixel inset from the canvas edges that no shape geometry may cross.
pub const DEFAULT_MARGIN: f64 = 5.0;

pub const MIN_IMAGE_SIZE: u32 = 16;

/// Inclusive attribute range; min and max may arrive in either order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// The pair ordered so that the first element is the smaller one.
    pub fn sorted(self) -> (f64, f64) {
        if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexRange {
    pub min: u32,
    pub max: u32,
}

impl VertexRange {
    pub fn sorted(self) -> (u32, u32) {
        if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeMode {
    Polygon,
    Circle,
    Both,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundMode {
    White,
    Black,
    Gray,
    Random,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionMode {
    Random,
    Center,
}

/// Active color parameterization. `Hs` draws hue and saturation with
/// lightness pinned to 0.5; `Hsl` adds a lightness draw and column;
/// `Rgb` draws each channel from its own range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorModel {
    Hs,
    Hsl,
    Rgb,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    pub image_size: u32,
    pub margin: f64,
}

impl CanvasConfig {
    pub fn new(image_size: u32) -> Self {
        Self {
            image_size,
            margin: DEFAULT_MARGIN,
        }
    }
}

/// Full parameter set for one batch run, immutable for the run's duration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub samples: u32,
    pub image_size: u32,
    /// `None` seeds from OS entropy and the run is not reproducible.
    pub seed: Option<u32>,
    pub shape_mode: ShapeMode,
    pub background: BackgroundMode,
    pub position: PositionMode,
    pub color_model: ColorModel,
    pub size: Range,
    pub angle: Range,
    pub vertices: VertexRange,
    pub hue: Range,
    pub saturation: Range,
    pub lightness: Range,
    pub red: Range,
    pub green: Range,
    pub blue: Range,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            samples: 1000,
            image_size: 64,
            seed: None,
            shape_mode: ShapeMode::Polygon,
            background: BackgroundMode::White,
            position: PositionMode::Random,
            color_model: ColorModel::Hsl,
            size: Range::new(0.3, 1.0),
            angle: Range::new(0.0, 360.0),
            vertices: VertexRange { min: 3, max: 8 },
            hue: Range::new(0.0, 360.0),
            saturation: Range::new(0.5, 1.0),
            lightness: Range::new(0.35, 0.65),
            red: Range::new(0.0, 1.0),
            green: Range::new(0.0, 1.0),
            blue: Range::new(0.0, 1.0),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("sample count must be at least 1")]
    SampleCount,

    #[error("image size must be at least 16 px, got {0}")]
    ImageSize(u32),

    #[error("vertex minimum must be at least 3, got {0}")]
    VertexMin(u32),
}

impl GenerationConfig {
    /// Checks the bounds a run must satisfy before it starts. Only the
    /// min/max order of ranges is corrected silently, everything else is
    /// an error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.samples < 1 {
            return Err(ConfigError::SampleCount);
        }
        if self.image_size < MIN_IMAGE_SIZE {
            return Err(ConfigError::ImageSize(self.image_size));
        }
        let (vmin, _) = self.vertices.sorted();
        if vmin < 3 {
            return Err(ConfigError::VertexMin(vmin));
        }
        Ok(())
    }

    pub fn canvas(&self) -> CanvasConfig {
        CanvasConfig::new(self.image_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GenerationConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_samples_is_rejected() {
        let cfg = GenerationConfig {
            samples: 0,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::SampleCount));
    }

    #[test]
    fn tiny_canvas_is_rejected() {
        let cfg = GenerationConfig {
            image_size: 8,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ImageSize(8)));
    }

    #[test]
    fn low_vertex_minimum_is_rejected() {
        let cfg = GenerationConfig {
            vertices: VertexRange { min: 8, max: 2 },
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::VertexMin(2)));
    }

    #[test]
    fn range_sorting_swaps_reversed_pairs() {
        assert_eq!(Range::new(0.9, 0.2).sorted(), (0.2, 0.9));
        assert_eq!(Range::new(0.2, 0.9).sorted(), (0.2, 0.9));
        assert_eq!(VertexRange { min: 8, max: 3 }.sorted(), (3, 8));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: GenerationConfig =
            serde_json::from_str(r#"{"samples": 5, "seed": 42, "shape_mode": "both"}"#).unwrap();
        assert_eq!(cfg.samples, 5);
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.shape_mode, ShapeMode::Both);
        assert_eq!(cfg.image_size, 64);
        assert_eq!(cfg.background, BackgroundMode::White);
    }
}
