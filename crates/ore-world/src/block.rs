//! Block tiles.
//!
//! A [`Block`] is the material of one grid tile. [`BlockType::Null`] is the
//! empty tile: it is not solid and a block may be placed there. Every other
//! type is solid and occupies its tile.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Material tag of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlockType {
    /// Empty space.
    #[default]
    Null,
    Dirt,
    Stone,
    Copper,
    Iron,
    Coal,
    Sand,
    Uranium,
    Diamond,
    Bedrock,
}

impl BlockType {
    /// Every block type, `Null` first.
    pub const ALL: [BlockType; 10] = [
        BlockType::Null,
        BlockType::Dirt,
        BlockType::Stone,
        BlockType::Copper,
        BlockType::Iron,
        BlockType::Coal,
        BlockType::Sand,
        BlockType::Uranium,
        BlockType::Diamond,
        BlockType::Bedrock,
    ];

    /// Anything but `Null` is solid.
    #[inline]
    pub fn is_solid(self) -> bool {
        self != BlockType::Null
    }

    /// Lower-case name, as used in texture and item names.
    pub fn name(self) -> &'static str {
        match self {
            BlockType::Null => "null",
            BlockType::Dirt => "dirt",
            BlockType::Stone => "stone",
            BlockType::Copper => "copper",
            BlockType::Iron => "iron",
            BlockType::Coal => "coal",
            BlockType::Sand => "sand",
            BlockType::Uranium => "uranium",
            BlockType::Diamond => "diamond",
            BlockType::Bedrock => "bedrock",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One tile of the world grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Block {
    pub block_type: BlockType,
}

impl Block {
    /// The empty tile.
    pub const NULL: Block = Block {
        block_type: BlockType::Null,
    };

    pub fn new(block_type: BlockType) -> Self {
        Self { block_type }
    }

    #[inline]
    pub fn is_solid(&self) -> bool {
        self.block_type.is_solid()
    }

    /// Whether a block can be placed on this tile.
    ///
    /// Only the tile itself is checked; entities standing on it are not.
    #[inline]
    pub fn is_placeable(&self) -> bool {
        self.block_type == BlockType::Null
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_is_the_default_and_only_non_solid_type() {
        assert_eq!(Block::default(), Block::NULL);
        for ty in BlockType::ALL {
            let block = Block::new(ty);
            assert_eq!(block.is_solid(), ty != BlockType::Null, "{ty}");
            assert_eq!(block.is_placeable(), !block.is_solid(), "{ty}");
        }
    }

    #[test]
    fn names_are_lowercase() {
        assert_eq!(BlockType::Stone.to_string(), "stone");
        assert!(BlockType::ALL.iter().all(|t| t.name() == t.name().to_lowercase()));
    }
}
