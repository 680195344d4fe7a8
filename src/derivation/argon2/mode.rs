//! Argon2 variants and the supported version.

use core::fmt;
use core::str::FromStr;

use super::error::DecodeError;

/// Argon2 version 1.3 (0x13), the only version produced or accepted.
pub const ARGON2_VERSION: u32 = 0x13;

/// Argon2 variant, selecting how reference blocks are addressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Argon2Mode {
    /// Data-dependent addressing. Fastest, exposed to cache-timing leaks.
    Argon2d,
    /// Data-independent addressing on every pass.
    #[default]
    Argon2i,
    /// Data-independent for the first half of pass 0, data-dependent after.
    Argon2id,
}

impl Argon2Mode {
    /// Type identifier `y` hashed into H0 and the address blocks.
    pub const fn type_id(self) -> u32 {
        match self {
            Self::Argon2d => 0,
            Self::Argon2i => 1,
            Self::Argon2id => 2,
        }
    }

    /// Identifier used in the encoded hash string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Argon2d => "argon2d",
            Self::Argon2i => "argon2i",
            Self::Argon2id => "argon2id",
        }
    }

    /// Whether the segment at (`pass`, `slice`) derives its reference
    /// indices from address blocks instead of the previous block.
    pub(crate) const fn is_data_independent(self, pass: u32, slice: u32) -> bool {
        match self {
            Self::Argon2d => false,
            Self::Argon2i => true,
            Self::Argon2id => pass == 0 && slice < 2,
        }
    }
}

impl fmt::Display for Argon2Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Argon2Mode {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "argon2d" => Ok(Self::Argon2d),
            "argon2i" => Ok(Self::Argon2i),
            "argon2id" => Ok(Self::Argon2id),
            _ => Err(DecodeError::BadPrefix),
        }
    }
}
