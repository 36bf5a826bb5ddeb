use core::fmt;
use core::num::NonZeroU32;

/// Compact, stable identifier used across the terrain graph.
///
/// - `u32` keeps memory small (grids are capped at `u32::MAX` cells)
/// - `NonZero` enables `Option<Id>` to be pointer-optimized
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(NonZeroU32);

impl Id {
    /// Create an Id from a 0-based index by storing index+1.
    pub const fn from_index(index: u32) -> Self {
        // saturates only past the largest grid GridIndex accepts
        Self(NonZeroU32::MIN.saturating_add(index))
    }

    /// Create an Id from a `usize` index, if it fits the id space.
    pub fn try_from_usize(index: usize) -> Option<Self> {
        u32::try_from(index)
            .ok()
            .filter(|&i| i < u32::MAX)
            .map(Self::from_index)
    }

    /// Recover the 0-based index.
    pub const fn index(self) -> u32 {
        self.0.get() - 1
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Id {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.index())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Id {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let index = <u32 as serde::Deserialize>::deserialize(deserializer)?;
        if index == u32::MAX {
            return Err(serde::de::Error::custom("id index out of range"));
        }
        Ok(Self::from_index(index))
    }
}

/// Domain-specific ID aliases for clarity (no runtime cost).
///
/// A `NodeId` is always `row * cols + col` of the grid the graph was built from.
pub type NodeId = Id;
/// Position of an edge in its graph's edge list.
pub type EdgeId = Id;
