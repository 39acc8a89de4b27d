use std::fmt::Write as _;

use crate::{
    config::{BackgroundMode, ColorModel, GenerationConfig, ShapeMode},
    record::{ShapeColor, ShapeRecord},
};

/// Filename for a 1-based sample index: zero-padded to at least four
/// digits, wider when the run is large enough to need it.
pub fn format_filename(index: u32, total: u32) -> String {
    let width = digits(total).max(4);
    format!("{index:0width$}.png")
}

fn digits(n: u32) -> usize {
    (n.checked_ilog10().unwrap_or(0) + 1) as usize
}

/// Column switches derived from the run configuration. The record type is
/// one superset; which optional columns appear is decided here, explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Schema {
    pub color_model: ColorModel,
    pub with_background: bool,
    pub with_shape_type: bool,
}

impl Schema {
    pub fn from_config(cfg: &GenerationConfig) -> Self {
        Self {
            color_model: cfg.color_model,
            with_background: cfg.background == BackgroundMode::Random,
            with_shape_type: cfg.shape_mode == ShapeMode::Both,
        }
    }
}

/// Ordered metadata rows; row order is generation order is filename order.
pub struct MetadataTable {
    schema: Schema,
    rows: Vec<(String, ShapeRecord)>,
}

impl MetadataTable {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, filename: String, record: ShapeRecord) {
        self.rows.push((filename, record));
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn header(&self) -> String {
        let mut h = String::from("filename,size,angle,vertices,center_x,center_y");
        match self.schema.color_model {
            ColorModel::Hs => h.push_str(",hue,saturation"),
            ColorModel::Hsl => h.push_str(",hue,saturation,lightness"),
            ColorModel::Rgb => h.push_str(",color_r,color_g,color_b"),
        }
        if self.schema.with_background {
            h.push_str(",bg_hue,bg_saturation,bg_lightness");
        }
        if self.schema.with_shape_type {
            h.push_str(",shape_type");
        }
        h
    }

    // Fixed precision: angles and hues at 2 decimals, every other float at
    // 4, integers unformatted. No field can contain a comma, so no quoting.
    fn format_row(&self, filename: &str, rec: &ShapeRecord) -> String {
        let mut line = format!(
            "{filename},{:.4},{:.2},{},{:.4},{:.4}",
            rec.size,
            rec.shape.angle(),
            rec.shape.vertices(),
            rec.center_x,
            rec.center_y,
        );
        match rec.color {
            ShapeColor::Hsl(c) => {
                let _ = write!(line, ",{:.2},{:.4}", c.hue, c.saturation);
                if self.schema.color_model == ColorModel::Hsl {
                    let _ = write!(line, ",{:.4}", c.lightness);
                }
            }
            ShapeColor::Rgb { r, g, b } => {
                let _ = write!(line, ",{r:.4},{g:.4},{b:.4}");
            }
        }
        if self.schema.with_background {
            let bg = rec.background;
            let _ = write!(line, ",{:.2},{:.4},{:.4}", bg.hue, bg.saturation, bg.lightness);
        }
        if self.schema.with_shape_type {
            let _ = write!(line, ",{}", rec.shape.kind());
        }
        line
    }

    /// The finalized table: header line plus one line per record, in order.
    pub fn to_csv(&self) -> String {
        let mut out = self.header();
        out.push('\n');
        for (filename, rec) in &self.rows {
            out.push_str(&self.format_row(filename, rec));
            out.push('\n');
        }
        out
    }
}
