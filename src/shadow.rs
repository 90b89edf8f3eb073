use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Shadow filtering modes supported by clustered lighting.
///
/// The numeric identifiers match the ones stored in render settings
/// documents, which is why they are not sequential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShadowType {
    /// Single tap, no filtering.
    Pcf1,
    /// 3x3 percentage-closer filtering.
    #[default]
    Pcf3,
    /// 5x5 percentage-closer filtering.
    Pcf5,
}

impl ShadowType {
    pub const ALL: [ShadowType; 3] = [ShadowType::Pcf1, ShadowType::Pcf3, ShadowType::Pcf5];

    /// Identifier used by serialized render settings.
    pub const fn id(self) -> u32 {
        match self {
            ShadowType::Pcf3 => 0,
            ShadowType::Pcf5 => 4,
            ShadowType::Pcf1 => 5,
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|shadow| shadow.id() == id)
    }

    pub const fn name(self) -> &'static str {
        match self {
            ShadowType::Pcf1 => "pcf1",
            ShadowType::Pcf3 => "pcf3",
            ShadowType::Pcf5 => "pcf5",
        }
    }

    /// Width of the square sampling kernel in texels.
    pub const fn kernel_size(self) -> u32 {
        match self {
            ShadowType::Pcf1 => 1,
            ShadowType::Pcf3 => 3,
            ShadowType::Pcf5 => 5,
        }
    }

    pub const fn sample_count(self) -> u32 {
        self.kernel_size() * self.kernel_size()
    }
}

impl fmt::Display for ShadowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShadowType {
    type Err = Error;

    /// Accepts either a mode name (`pcf3`) or its numeric identifier (`0`).
    fn from_str(value: &str) -> Result<Self> {
        let value = value.trim();
        if let Ok(id) = value.parse::<u32>() {
            return Self::from_id(id).ok_or_else(|| anyhow!("unknown shadow type id {id}"));
        }
        Self::ALL
            .into_iter()
            .find(|shadow| shadow.name().eq_ignore_ascii_case(value))
            .ok_or_else(|| anyhow!("unknown shadow type `{value}`"))
    }
}

impl Serialize for ShadowType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.id())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ShadowTypeRepr {
    Id(u32),
    Name(String),
}

impl<'de> Deserialize<'de> for ShadowType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let parsed = match ShadowTypeRepr::deserialize(deserializer)? {
            ShadowTypeRepr::Id(id) => ShadowType::from_id(id)
                .ok_or_else(|| anyhow!("unknown shadow type id {id}")),
            ShadowTypeRepr::Name(name) => name.parse(),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_ids() {
        assert_eq!("pcf5".parse::<ShadowType>().unwrap(), ShadowType::Pcf5);
        assert_eq!("PCF1".parse::<ShadowType>().unwrap(), ShadowType::Pcf1);
        assert_eq!("0".parse::<ShadowType>().unwrap(), ShadowType::Pcf3);
        assert_eq!("5".parse::<ShadowType>().unwrap(), ShadowType::Pcf1);
    }

    #[test]
    fn rejects_unsupported_modes() {
        assert!("vsm16".parse::<ShadowType>().is_err());
        assert!("2".parse::<ShadowType>().is_err());
        assert!(ShadowType::from_id(6).is_none());
    }

    #[test]
    fn kernel_sizes() {
        assert_eq!(ShadowType::Pcf1.sample_count(), 1);
        assert_eq!(ShadowType::Pcf3.sample_count(), 9);
        assert_eq!(ShadowType::Pcf5.sample_count(), 25);
        assert_eq!(ShadowType::default(), ShadowType::Pcf3);
    }
}
