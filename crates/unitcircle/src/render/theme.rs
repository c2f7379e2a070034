use palette::rgb::FromHexError;
use palette::{Srgb, Srgba};
use std::collections::HashMap;
use thiserror::Error;
use trigo::SegmentKind;
use trigo::curves::TrigFunction;

#[derive(Debug, Error)]
#[error("Invalid color for {segment}: {source}")]
pub struct ColorError {
    pub segment: SegmentKind,
    #[source]
    pub source: FromHexError,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Srgba<f64>,
    pub width: f64,
    /// Cell glyph used by text renderers.
    pub glyph: char,
}

impl LineStyle {
    pub fn new(hex: u32, alpha: f64, width: f64, glyph: char) -> Self {
        Self {
            color: with_alpha(
                Srgb::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8),
                alpha,
            ),
            width,
            glyph,
        }
    }

    pub fn rgb8(&self) -> Srgb<u8> {
        self.color.color.into_format()
    }
}

fn with_alpha(rgb: Srgb<u8>, alpha: f64) -> Srgba<f64> {
    let rgb: Srgb<f64> = rgb.into_format();
    Srgba::new(rgb.red, rgb.green, rgb.blue, alpha)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub radial: LineStyle,
    pub opposite: LineStyle,
    pub adjacent: LineStyle,
    pub circle: LineStyle,
    pub sin: LineStyle,
    pub cos: LineStyle,
    pub tan: LineStyle,
    pub marker: char,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            radial: LineStyle::new(0x008000, 0.6, 3.0, '*'),
            opposite: LineStyle::new(0x0000ff, 0.6, 3.0, '|'),
            adjacent: LineStyle::new(0xff0000, 0.6, 3.0, '-'),
            circle: LineStyle::new(0x808080, 0.6, 2.0, '.'),
            sin: LineStyle::new(0x0000ff, 1.0, 1.0, '.'),
            cos: LineStyle::new(0xff0000, 1.0, 1.0, '.'),
            tan: LineStyle::new(0x800080, 1.0, 1.0, '.'),
            marker: 'o',
        }
    }
}

impl Theme {
    /// Replaces segment colors with `#rrggbb` values, keeping alpha and width.
    pub fn with_overrides(
        mut self,
        colors: &HashMap<SegmentKind, String>,
    ) -> Result<Self, ColorError> {
        for (&segment, hex) in colors {
            let rgb: Srgb<u8> = hex
                .trim()
                .parse()
                .map_err(|source| ColorError { segment, source })?;
            let style = self.segment_mut(segment);
            style.color = with_alpha(rgb, style.color.alpha);
        }
        Ok(self)
    }

    pub fn segment(&self, kind: SegmentKind) -> &LineStyle {
        match kind {
            SegmentKind::Radial => &self.radial,
            SegmentKind::Opposite => &self.opposite,
            SegmentKind::Adjacent => &self.adjacent,
        }
    }

    fn segment_mut(&mut self, kind: SegmentKind) -> &mut LineStyle {
        match kind {
            SegmentKind::Radial => &mut self.radial,
            SegmentKind::Opposite => &mut self.opposite,
            SegmentKind::Adjacent => &mut self.adjacent,
        }
    }

    pub fn curve(&self, function: TrigFunction) -> &LineStyle {
        match function {
            TrigFunction::Sin => &self.sin,
            TrigFunction::Cos => &self.cos,
            TrigFunction::Tan => &self.tan,
        }
    }
}
