use log::debug;

use logic_common::names::NamePath;
use logic_common::types::Type;

use super::apply::Arguments;
use super::color::{self, Hsl};
use super::LogicValue;

/// The most numbers `Number.range` produces.
pub const MAX_RANGE_LENGTH: usize = 1 << 20;

/// A function of the prelude with a native implementation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Builtin {
    StringConcat,
    ArrayAt,
    ArrayCount,
    NumberRange,
    ColorSetHue,
    ColorSetSaturation,
    ColorSetLightness,
    ColorFromHsl,
    ColorSaturate,
    BooleanAnd,
    BooleanOr,
}

impl Builtin {
    /// Get the builtin with the given qualified name, if there is one.
    pub fn from_path(path: &NamePath) -> Option<Self> {
        let segments: Vec<_> = path.segments().collect();

        Some(match segments.as_slice() {
            ["String", "concat"] => Self::StringConcat,
            ["Array", "at"] => Self::ArrayAt,
            ["Array", "count"] => Self::ArrayCount,
            ["Number", "range"] => Self::NumberRange,
            ["Color", "setHue"] => Self::ColorSetHue,
            ["Color", "setSaturation"] => Self::ColorSetSaturation,
            ["Color", "setLightness"] => Self::ColorSetLightness,
            ["Color", "fromHSL"] => Self::ColorFromHsl,
            ["Color", "saturate"] => Self::ColorSaturate,
            ["Boolean", "and"] => Self::BooleanAnd,
            ["Boolean", "or"] => Self::BooleanOr,
            _ => return None,
        })
    }

    pub fn call(self, arguments: &Arguments) -> Option<LogicValue> {
        let number = |label: &str, position: usize| arguments.get(label, position)?.as_number();
        let boolean = |label: &str, position: usize| arguments.get(label, position)?.as_bool();
        let color = |position: usize| arguments.get("color", position)?.as_color();

        match self {
            Self::StringConcat => {
                let a = arguments.get("a", 0)?.as_str()?;
                let b = arguments.get("b", 1)?.as_str()?;
                Some(LogicValue::string(format!("{a}{b}")))
            }

            Self::ArrayAt => {
                let array = arguments.get("array", 0)?.as_array()?;
                let index = number("index", 1)?;

                if index < 0.0 || index.fract() != 0.0 {
                    debug!("cannot index an array with {index}");
                    return None;
                }

                array.get(index as usize).cloned()
            }

            Self::ArrayCount => {
                let array = arguments.get("array", 0)?.as_array()?;
                Some(LogicValue::number(array.len() as f64))
            }

            Self::NumberRange => {
                let from = number("from", 0)?;
                let to = number("to", 1)?;
                let by = match arguments.get("by", 2) {
                    Some(by) => by.as_number()?,
                    None => 1.0,
                };

                if !(from.is_finite() && to.is_finite() && by.is_finite()) || by <= 0.0 {
                    debug!("cannot make a range from {from} to {to} by {by}");
                    return None;
                }

                let count = ((to - from) / by).ceil().max(0.0);
                if count > MAX_RANGE_LENGTH as f64 {
                    debug!("refusing to make a range of {count} numbers");
                    return None;
                }

                let values = (0..count as usize)
                    .map(|i| LogicValue::number(from + i as f64 * by))
                    .collect();

                Some(LogicValue::array(Type::number(), values))
            }

            Self::ColorSetHue => {
                let value = number("value", 1)?;
                let result = color::transform(color(0)?, |hsl| {
                    Hsl::new(value, hsl.saturation, hsl.lightness)
                })?;
                Some(LogicValue::color(result))
            }

            Self::ColorSetSaturation => {
                let value = number("value", 1)?;
                let result =
                    color::transform(color(0)?, |hsl| Hsl::new(hsl.hue, value, hsl.lightness))?;
                Some(LogicValue::color(result))
            }

            Self::ColorSetLightness => {
                let value = number("value", 1)?;
                let result =
                    color::transform(color(0)?, |hsl| Hsl::new(hsl.hue, hsl.saturation, value))?;
                Some(LogicValue::color(result))
            }

            Self::ColorFromHsl => {
                let hsl = Hsl::new(
                    number("hue", 0)?,
                    number("saturation", 1)?,
                    number("lightness", 2)?,
                );
                Some(LogicValue::color(hsl.to_rgba(255).to_string()))
            }

            Self::ColorSaturate => {
                let factor = number("factor", 1)?;
                let result = color::transform(color(0)?, |hsl| {
                    Hsl::new(hsl.hue, hsl.saturation * factor, hsl.lightness)
                })?;
                Some(LogicValue::color(result))
            }

            Self::BooleanAnd => Some(LogicValue::boolean(boolean("a", 0)? && boolean("b", 1)?)),
            Self::BooleanOr => Some(LogicValue::boolean(boolean("a", 0)? || boolean("b", 1)?)),
        }
    }
}
