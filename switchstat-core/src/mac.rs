use logos::{Lexer, Logos};
use std::{fmt, str::FromStr};
use thiserror::Error;

use crate::defaults::DEFAULT_MAC_SEED;

/// Number of characters of the seed kept as the address prefix.
const PREFIX_LEN: usize = 12;

/// Maximum number of hex digits in a seed (a full 48 bits address).
const MAX_DIGITS: usize = 12;

/// Seed of the generated MAC addresses.
///
/// Accepts hex digits optionally grouped with `.`, `:` or `-` (e.g.
/// `D099.D500.0000`, `d0:99:d5:00:00:00`). The seed is kept as written
/// (upper-cased) so the generated addresses keep the same notation.
///
/// ```
/// use switchstat_core::MacSeed;
///
/// let seed: MacSeed = "d099.d500.0000".parse().unwrap();
/// assert_eq!(seed.address(1).to_string(), "D099.D500.0001");
/// assert_eq!(seed.address(48).to_string(), "D099.D500.0030");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MacSeed(String);

/// A generated MAC address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MacAddress(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MacSeedError {
    #[error("MAC seed is empty")]
    Empty,
    #[error("invalid character in MAC seed `{seed}' at offset {offset}")]
    InvalidCharacter { seed: String, offset: usize },
    #[error("MAC seed has {digits} hex digits, expecting at most 12")]
    TooManyDigits { digits: usize },
}

#[derive(Logos, Debug, PartialEq)]
enum MacToken {
    #[regex("[0-9a-fA-F]+")]
    Digits,

    #[token(".")]
    #[token(":")]
    #[token("-")]
    Separator,
}

impl MacSeed {
    /// The first 12 characters of the seed, right padded with `0`.
    pub fn prefix(&self) -> String {
        let prefix: String = self.0.chars().take(PREFIX_LEN).collect();
        format!("{prefix:0<PREFIX_LEN$}")
    }

    /// Derive the address of the interface `id`: the seed prefix followed
    /// by `id` in (at least two) upper case hex digits.
    pub fn address(&self, id: u32) -> MacAddress {
        MacAddress(format!("{}{id:02X}", self.prefix()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MacSeed {
    fn default() -> Self {
        Self(DEFAULT_MAC_SEED.to_owned())
    }
}

impl FromStr for MacSeed {
    type Err = MacSeedError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut lex = Lexer::<'_, MacToken>::new(s);

        let mut digits = 0;
        while let Some(token) = lex.next() {
            match token {
                Ok(MacToken::Digits) => digits += lex.slice().len(),
                Ok(MacToken::Separator) => (),
                Err(()) => {
                    return Err(MacSeedError::InvalidCharacter {
                        seed: s.to_owned(),
                        offset: lex.span().start,
                    });
                }
            }
        }

        if digits == 0 {
            return Err(MacSeedError::Empty);
        }
        if digits > MAX_DIGITS {
            return Err(MacSeedError::TooManyDigits { digits });
        }

        Ok(Self(s.to_ascii_uppercase()))
    }
}

impl fmt::Display for MacSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl MacAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}
