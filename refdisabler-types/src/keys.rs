use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A plugin file name, extension included (`Skyrim.esm`).
///
/// Load orders treat plugin file names case-insensitively, so equality,
/// ordering, and hashing all ignore ASCII case. The original spelling is
/// preserved for display and serialization.
#[derive(Debug, Clone)]
pub struct ModKey(String);

impl ModKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn folded(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.bytes().map(|b| b.to_ascii_lowercase())
    }
}

impl PartialEq for ModKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for ModKey {}

impl PartialOrd for ModKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ModKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.folded().cmp(other.folded())
    }
}

impl Hash for ModKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.folded() {
            state.write_u8(b);
        }
    }
}

impl fmt::Display for ModKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ModKey {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Serialize for ModKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ModKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self)
    }
}

/// A record identifier: form id plus the plugin file that introduced the
/// record.
///
/// Rendered as `000014:Skyrim.esm` (six uppercase hex digits, a colon, the
/// mod key) and serialized in that form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FormKey {
    pub id: u32,
    pub mod_key: ModKey,
}

impl FormKey {
    pub fn new(id: u32, mod_key: impl Into<ModKey>) -> Self {
        Self {
            id,
            mod_key: mod_key.into(),
        }
    }

    /// The player reference, used as the synthetic enable parent for records
    /// forced into the disabled state.
    pub fn player_ref() -> Self {
        Self::new(0x000014, "Skyrim.esm")
    }
}

impl fmt::Display for FormKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06X}:{}", self.id, self.mod_key)
    }
}

/// Error parsing a `FormKey` from its string form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormKeyParseError {
    input: String,
}

impl fmt::Display for FormKeyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid form key '{}' (expected 'FFFFFF:Plugin.esm')",
            self.input
        )
    }
}

impl std::error::Error for FormKeyParseError {}

impl FromStr for FormKey {
    type Err = FormKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || FormKeyParseError {
            input: s.to_string(),
        };

        let (id, mod_key) = s.split_once(':').ok_or_else(err)?;
        if mod_key.is_empty() {
            return Err(err());
        }
        let id = u32::from_str_radix(id, 16).map_err(|_| err())?;
        Ok(Self::new(id, mod_key))
    }
}

impl Serialize for FormKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FormKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
