//! Panel field identifiers and value formatting

use crate::config::DragConfig;
use crate::selection::Axis;

/// Field identifiers shared with the page markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    PosX,
    PosY,
    PosZ,
    RotXInput,
    RotYInput,
    RotZInput,
    DimXInput,
    DimYInput,
    DimZInput,
    DimensionX,
    DimensionY,
    DimensionZ,
    VolumeValue,
    SurfaceAreaValue,
    BoundingBoxValue,
    MaterialSelect,
    SelectionInfo,
}

/// How a numeric field scrubs, formats and applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldClass {
    Position,
    Rotation,
    Dimension,
}

impl FieldId {
    pub fn all() -> &'static [FieldId] {
        &[
            FieldId::PosX,
            FieldId::PosY,
            FieldId::PosZ,
            FieldId::RotXInput,
            FieldId::RotYInput,
            FieldId::RotZInput,
            FieldId::DimXInput,
            FieldId::DimYInput,
            FieldId::DimZInput,
            FieldId::DimensionX,
            FieldId::DimensionY,
            FieldId::DimensionZ,
            FieldId::VolumeValue,
            FieldId::SurfaceAreaValue,
            FieldId::BoundingBoxValue,
            FieldId::MaterialSelect,
            FieldId::SelectionInfo,
        ]
    }

    /// Element id in the page markup
    pub fn element_id(&self) -> &'static str {
        match self {
            FieldId::PosX => "posX",
            FieldId::PosY => "posY",
            FieldId::PosZ => "posZ",
            FieldId::RotXInput => "rotXInput",
            FieldId::RotYInput => "rotYInput",
            FieldId::RotZInput => "rotZInput",
            FieldId::DimXInput => "dimXInput",
            FieldId::DimYInput => "dimYInput",
            FieldId::DimZInput => "dimZInput",
            FieldId::DimensionX => "dimensionX",
            FieldId::DimensionY => "dimensionY",
            FieldId::DimensionZ => "dimensionZ",
            FieldId::VolumeValue => "volumeValue",
            FieldId::SurfaceAreaValue => "surfaceAreaValue",
            FieldId::BoundingBoxValue => "boundingBoxValue",
            FieldId::MaterialSelect => "materialSelect",
            FieldId::SelectionInfo => "selectionInfo",
        }
    }

    pub fn from_element_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.element_id() == id)
    }

    /// Class derived from the element id prefix; `None` for display fields
    pub fn class(&self) -> Option<FieldClass> {
        let id = self.element_id();
        if id.starts_with("pos") {
            Some(FieldClass::Position)
        } else if id.starts_with("rot") {
            Some(FieldClass::Rotation)
        } else if id.starts_with("dim") {
            Some(FieldClass::Dimension)
        } else {
            None
        }
    }

    pub fn axis(&self) -> Option<Axis> {
        match self {
            FieldId::PosX | FieldId::RotXInput | FieldId::DimXInput | FieldId::DimensionX => {
                Some(Axis::X)
            }
            FieldId::PosY | FieldId::RotYInput | FieldId::DimYInput | FieldId::DimensionY => {
                Some(Axis::Y)
            }
            FieldId::PosZ | FieldId::RotZInput | FieldId::DimZInput | FieldId::DimensionZ => {
                Some(Axis::Z)
            }
            _ => None,
        }
    }

    /// Whether the field belongs to the CAD panel's dimension row
    pub fn is_cad_dimension(&self) -> bool {
        matches!(
            self,
            FieldId::DimensionX | FieldId::DimensionY | FieldId::DimensionZ
        )
    }
}

impl FieldClass {
    /// Value change per pixel of pointer travel
    pub fn sensitivity(&self, drag: &DragConfig) -> f32 {
        match self {
            FieldClass::Position => drag.position,
            FieldClass::Rotation => drag.rotation,
            FieldClass::Dimension => drag.dimension,
        }
    }

    /// Text for a field after scrubbing `delta_px` from `start`
    pub fn scrub(&self, start: f32, delta_px: f32, drag: &DragConfig) -> String {
        let value = start + delta_px * self.sensitivity(drag);
        match self {
            FieldClass::Position => format_fixed(value),
            FieldClass::Rotation => format_integer(value),
            FieldClass::Dimension => format_integer(round_half_up(value).clamp(1.0, 100.0)),
        }
    }
}

/// Round to the nearest integer, halves toward positive infinity
pub fn round_half_up(value: f32) -> f32 {
    (value + 0.5).floor()
}

/// Two decimals
pub fn format_fixed(value: f32) -> String {
    format!("{value:.2}")
}

/// Nearest integer, without a sign on zero
pub fn format_integer(value: f32) -> String {
    format!("{}", round_half_up(value) as i64)
}

/// One decimal place at most; whole numbers print without a fraction
pub fn format_one_decimal(value: f32) -> String {
    let rounded = round_half_up(value * 10.0) / 10.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{rounded}")
    }
}

/// Parse the longest numeric prefix, ignoring leading whitespace
pub fn parse_float(text: &str) -> Option<f32> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - digits_start;
    if bytes.get(end) == Some(&b'.') {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while bytes.get(fraction_end).is_some_and(u8::is_ascii_digit) {
            fraction_end += 1;
        }
        mantissa_digits += fraction_end - fraction_start;
        if mantissa_digits > 0 {
            end = fraction_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    text[..end].parse().ok()
}

/// Parse the longest integer prefix, ignoring leading whitespace
pub fn parse_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    text[..end].parse().ok()
}

/// Parsed float, or `fallback` when the text is not a number or is zero
pub fn float_or(text: &str, fallback: f32) -> f32 {
    parse_float(text).filter(|v| *v != 0.0).unwrap_or(fallback)
}

/// Parsed integer, or `fallback` when the text is not a number or is zero
pub fn int_or(text: &str, fallback: i64) -> i64 {
    parse_int(text).filter(|v| *v != 0).unwrap_or(fallback)
}
