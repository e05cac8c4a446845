use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::ops::Deref;

/// Opaque display value. Accepts strings, numbers and booleans on the wire
/// and always renders as text; `null` becomes empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayText(String);

impl DisplayText {
    pub fn new(value: impl Into<String>) -> Self {
        DisplayText(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whitespace-only values count as blank, same as a missing field.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Deref for DisplayText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DisplayText {
    fn from(value: &str) -> Self {
        DisplayText(value.to_string())
    }
}

impl From<String> for DisplayText {
    fn from(value: String) -> Self {
        DisplayText(value)
    }
}

impl Serialize for DisplayText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DisplayText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DisplayVisitor;

        impl<'de> Visitor<'de> for DisplayVisitor {
            type Value = DisplayText;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string, number, boolean or null")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<DisplayText, E> {
                Ok(DisplayText(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<DisplayText, E> {
                Ok(DisplayText(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<DisplayText, E> {
                Ok(DisplayText(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<DisplayText, E> {
                Ok(DisplayText(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<DisplayText, E> {
                Ok(DisplayText(v.to_string()))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<DisplayText, E> {
                Ok(DisplayText(v.to_string()))
            }

            fn visit_unit<E: de::Error>(self) -> Result<DisplayText, E> {
                Ok(DisplayText::default())
            }

            fn visit_none<E: de::Error>(self) -> Result<DisplayText, E> {
                Ok(DisplayText::default())
            }

            fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<DisplayText, D::Error> {
                d.deserialize_any(self)
            }
        }

        deserializer.deserialize_any(DisplayVisitor)
    }
}

/// Boolean switch for template sections. Besides JSON booleans it accepts
/// numbers (non-zero is on) and the strings "true", "yes", "1" and "on".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flag(pub bool);

impl Flag {
    pub fn is_set(self) -> bool {
        self.0
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        Flag(value)
    }
}

impl Serialize for Flag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.0)
    }
}

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FlagVisitor;

        impl<'de> Visitor<'de> for FlagVisitor {
            type Value = Flag;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a boolean, number, string or null")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Flag, E> {
                Ok(Flag(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Flag, E> {
                Ok(Flag(v != 0))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Flag, E> {
                Ok(Flag(v != 0))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Flag, E> {
                Ok(Flag(v != 0.0))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Flag, E> {
                let on = matches!(
                    v.trim().to_ascii_lowercase().as_str(),
                    "true" | "yes" | "1" | "on"
                );
                Ok(Flag(on))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Flag, E> {
                Ok(Flag(false))
            }

            fn visit_none<E: de::Error>(self) -> Result<Flag, E> {
                Ok(Flag(false))
            }

            fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Flag, D::Error> {
                d.deserialize_any(self)
            }
        }

        deserializer.deserialize_any(FlagVisitor)
    }
}
