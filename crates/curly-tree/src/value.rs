//! Text codec between scalar values and their decimal/word forms.

use curly_core::{Error, ParseInfo, Result};

/// Conversion between a typed value and its textual form in a
/// configuration file.
pub trait ValueFormat: Sized + PartialOrd {
    /// Encode the value as text. Escaping is not this layer's concern.
    fn to_text(&self) -> String;

    /// Decode a value from text, reporting the location on failure.
    fn from_text(info: &ParseInfo, text: &str) -> Result<Self>;
}

macro_rules! impl_value_format_for_numbers {
    ($($ty:ty),* $(,)?) => {$(
        impl ValueFormat for $ty {
            fn to_text(&self) -> String {
                self.to_string()
            }

            fn from_text(info: &ParseInfo, text: &str) -> Result<Self> {
                text.parse().map_err(|_| Error::InvalidValue {
                    value: text.to_string(),
                    info: info.clone(),
                })
            }
        }
    )*};
}

impl_value_format_for_numbers!(i16, i32, i64, u16, u32, u64, f32, f64);

impl ValueFormat for String {
    fn to_text(&self) -> String {
        self.clone()
    }

    fn from_text(_info: &ParseInfo, text: &str) -> Result<Self> {
        Ok(text.to_string())
    }
}

impl ValueFormat for bool {
    fn to_text(&self) -> String {
        if *self { "true" } else { "false" }.to_string()
    }

    fn from_text(info: &ParseInfo, text: &str) -> Result<Self> {
        match text {
            "on" | "true" | "1" | "yes" => Ok(true),
            "off" | "false" | "0" | "no" => Ok(false),
            _ => Err(Error::InvalidValue {
                value: text.to_string(),
                info: info.clone(),
            }),
        }
    }
}
