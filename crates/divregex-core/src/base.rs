// Numeral bases and their digit alphabets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a base name is not one of the supported bases.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid base: {0:?} (expected binary, decimal or hexadecimal)")]
pub struct UnknownBase(pub String);

/// Positional numeral bases supported by the automaton builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Base {
    /// Base 2, digits `0`-`1`.
    Binary,
    /// Base 10, digits `0`-`9`.
    Decimal,
    /// Base 16, digits `0`-`9` then upper-case `A`-`F`.
    Hexadecimal,
}

const DIGITS: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F',
];

impl Base {
    /// All supported bases, smallest radix first.
    pub const ALL: [Base; 3] = [Base::Binary, Base::Decimal, Base::Hexadecimal];

    /// The radix of this base.
    pub fn radix(self) -> u32 {
        match self {
            Base::Binary => 2,
            Base::Decimal => 10,
            Base::Hexadecimal => 16,
        }
    }

    /// Digit symbols in ascending value order. The digit at index `v` has value `v`.
    pub fn digits(self) -> &'static [char] {
        &DIGITS[..self.radix() as usize]
    }

    /// Numeric value of `ch` in this base, or `None` if it is not a digit of the base.
    ///
    /// Only upper-case hexadecimal letters are digits.
    pub fn digit_value(self, ch: char) -> Option<u32> {
        self.digits().iter().position(|&d| d == ch).map(|v| v as u32)
    }

    /// Regex character class matching any single character that is not a digit of this base.
    pub fn non_digit_class(self) -> &'static str {
        match self {
            Base::Binary => "[^0-1]",
            Base::Decimal => "[^0-9]",
            Base::Hexadecimal => "[^0-9A-F]",
        }
    }

    /// Render `n` in this base without a prefix, using upper-case hexadecimal letters.
    pub fn format(self, n: u64) -> String {
        match self {
            Base::Binary => format!("{n:b}"),
            Base::Decimal => n.to_string(),
            Base::Hexadecimal => format!("{n:X}"),
        }
    }

    /// Parse a digit string in this base. Returns `None` for empty input, foreign
    /// characters, or values that overflow `u128`.
    pub fn parse(self, s: &str) -> Option<u128> {
        if s.is_empty() {
            return None;
        }
        let radix = self.radix() as u128;
        let mut value: u128 = 0;
        for ch in s.chars() {
            let digit = self.digit_value(ch)? as u128;
            value = value.checked_mul(radix)?.checked_add(digit)?;
        }
        Some(value)
    }

    /// Long lower-case name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Base::Binary => "binary",
            Base::Decimal => "decimal",
            Base::Hexadecimal => "hexadecimal",
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Base {
    type Err = UnknownBase;

    /// Accepts the long name, a short form (`bin`/`dec`/`hex`), the single-letter
    /// form used by web forms (`b`/`d`/`h`), or the radix itself. Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "binary" | "bin" | "b" | "2" => Ok(Base::Binary),
            "decimal" | "dec" | "d" | "10" => Ok(Base::Decimal),
            "hexadecimal" | "hex" | "h" | "16" => Ok(Base::Hexadecimal),
            _ => Err(UnknownBase(s.to_string())),
        }
    }
}
