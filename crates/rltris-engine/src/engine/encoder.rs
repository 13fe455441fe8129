use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::core::Grid;

/// Fixed-length 0/1 feature vector of a grid, one entry per cell in row-major
/// order (hidden rows included).
///
/// It is both the input of a linear value function and the lookup key of a
/// tabular one, so it is hashable and serializes to a compact string of `0`
/// and `1` characters.
///
/// # Example
///
/// ```
/// use rltris_engine::{EncodedState, Grid};
///
/// let state = EncodedState::from_grid(&Grid::new(4, 2));
/// assert_eq!(state.len(), 8);
/// assert_eq!(state.to_string(), "00000000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EncodedState {
    bits: Box<[u8]>,
}

impl EncodedState {
    /// Encodes `grid`; a cell is `1` iff it is occupied.
    ///
    /// Pass the projection from [`Grid::with_piece`] to include the falling piece.
    #[must_use]
    pub fn from_grid(grid: &Grid) -> Self {
        Self {
            bits: grid.values().map(|v| u8::from(v != 0)).collect(),
        }
    }

    #[must_use]
    pub fn from_bits(bits: impl IntoIterator<Item = bool>) -> Self {
        Self {
            bits: bits.into_iter().map(u8::from).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    #[must_use]
    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    /// Returns the features as `f32` values (`0.0` or `1.0`).
    pub fn features(&self) -> impl Iterator<Item = f32> + '_ {
        self.bits.iter().map(|&b| f32::from(b))
    }

    /// Dot product with a weight vector of the same length.
    #[must_use]
    pub fn dot(&self, weights: &[f32]) -> f32 {
        debug_assert_eq!(weights.len(), self.len());
        self.features().zip(weights).map(|(s, w)| s * w).sum()
    }
}

impl fmt::Display for EncodedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bits {
            f.write_str(if b == 0 { "0" } else { "1" })?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid encoded state character {found:?} at index {index}")]
pub struct ParseEncodedStateError {
    index: usize,
    found: char,
}

impl FromStr for EncodedState {
    type Err = ParseEncodedStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits = s
            .chars()
            .enumerate()
            .map(|(index, c)| match c {
                '0' => Ok(0),
                '1' => Ok(1),
                found => Err(ParseEncodedStateError { index, found }),
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { bits })
    }
}

impl Serialize for EncodedState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EncodedState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
