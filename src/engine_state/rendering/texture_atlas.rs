//! Texture atlas table.
//!
//! The atlas image itself belongs to the graphics pipeline. The mesher only
//! needs to know, for every solid block id, which atlas cells each of the six
//! faces samples. Block id `n` uses the entry at index `n - 1`.
//!
//! Tables are plain JSON:
//!
//! ```json
//! [
//!   { "neg_x": [[2, 0], [3, 1]], "pos_x": [[2, 0], [3, 1]],
//!     "neg_y": [[2, 0], [3, 1]], "pos_y": [[2, 0], [3, 1]],
//!     "neg_z": [[2, 0], [3, 1]], "pos_z": [[2, 0], [3, 1]] }
//! ]
//! ```

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    engine_state::voxels::block::{block_side::BlockSide, Block},
    error::{VoxelError, VoxelResult},
};

/// Number of cells along each edge of the square atlas.
pub const ATLAS_CELLS: usize = 16;

/// A rectangle in atlas-cell units, from its first corner `(u0, v0)` to its
/// second corner `(u1, v1)`.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextureRect(pub [i8; 2], pub [i8; 2]);

impl TextureRect {
    /// Creates a rectangle from its two corners.
    pub const fn new(first: [i8; 2], second: [i8; 2]) -> Self {
        TextureRect(first, second)
    }

    /// The first corner.
    pub const fn first(&self) -> [i8; 2] {
        self.0
    }

    /// The second corner.
    pub const fn second(&self) -> [i8; 2] {
        self.1
    }
}

/// The six face rectangles of one block id.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextureMap {
    /// Rectangle for the -x face.
    pub neg_x: TextureRect,
    /// Rectangle for the +x face.
    pub pos_x: TextureRect,
    /// Rectangle for the -y face.
    pub neg_y: TextureRect,
    /// Rectangle for the +y face.
    pub pos_y: TextureRect,
    /// Rectangle for the -z face.
    pub neg_z: TextureRect,
    /// Rectangle for the +z face.
    pub pos_z: TextureRect,
}

impl TextureMap {
    /// A map using `rect` on every face.
    pub const fn uniform(rect: TextureRect) -> Self {
        Self::sided(rect, rect, rect)
    }

    /// A map with one rectangle for the four sides, one for the bottom and
    /// one for the top.
    pub const fn sided(sides: TextureRect, bottom: TextureRect, top: TextureRect) -> Self {
        TextureMap {
            neg_x: sides,
            pos_x: sides,
            neg_y: sides,
            pos_y: sides,
            neg_z: bottom,
            pos_z: top,
        }
    }

    /// The rectangle for `side`.
    pub fn rect(&self, side: BlockSide) -> TextureRect {
        match side {
            BlockSide::NegX => self.neg_x,
            BlockSide::PosX => self.pos_x,
            BlockSide::NegY => self.neg_y,
            BlockSide::PosY => self.pos_y,
            BlockSide::NegZ => self.neg_z,
            BlockSide::PosZ => self.pos_z,
        }
    }
}

const DIRT: TextureRect = TextureRect::new([2, 0], [3, 1]);
const GRASS_SIDE: TextureRect = TextureRect::new([0, 0], [1, 1]);
const GRASS_TOP: TextureRect = TextureRect::new([1, 0], [2, 1]);

static STANDARD_MAPS: [TextureMap; 2] = [
    // id 1, dirt
    TextureMap::uniform(DIRT),
    // id 2, grass
    TextureMap::sided(GRASS_SIDE, DIRT, GRASS_TOP),
];

/// Per-block-id texture rectangles.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(transparent)]
pub struct TextureAtlas {
    maps: Vec<TextureMap>,
}

impl TextureAtlas {
    /// Wraps a table; `maps[n - 1]` belongs to block id `n`.
    pub fn new(maps: Vec<TextureMap>) -> Self {
        TextureAtlas { maps }
    }

    /// The built-in table covering dirt (id 1) and grass (id 2).
    pub fn standard() -> Self {
        Self::new(STANDARD_MAPS.to_vec())
    }

    /// Parses a JSON table.
    pub fn from_json_str(json: &str) -> VoxelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON table from disk.
    pub fn load(path: impl AsRef<Path>) -> VoxelResult<Self> {
        let path = path.as_ref();
        let atlas = Self::from_json_str(&std::fs::read_to_string(path)?)?;
        info!(
            "Loaded texture atlas table with {} entries from {}",
            atlas.len(),
            path.display()
        );
        Ok(atlas)
    }

    /// Appends a map and returns the block id it is assigned to.
    pub fn push(&mut self, map: TextureMap) -> usize {
        self.maps.push(map);
        self.maps.len()
    }

    /// Number of populated block ids.
    pub fn len(&self) -> usize {
        self.maps.len()
    }

    /// `true` when no block id is populated.
    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    /// The texture map of `block`.
    ///
    /// Air never has one, and ids beyond the populated range are a lookup
    /// error rather than a silent fallback.
    pub fn lookup(&self, block: Block) -> VoxelResult<&TextureMap> {
        if block.is_air() {
            return Err(VoxelError::AirHasNoTexture);
        }
        self.maps
            .get(usize::from(block.id) - 1)
            .ok_or_else(|| VoxelError::MissingTextureMap {
                block_id: block.id,
                populated: self.maps.len(),
            })
    }
}

impl Default for TextureAtlas {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_matches_the_reference_atlas() {
        let atlas = TextureAtlas::standard();
        assert_eq!(atlas.len(), 2);

        let dirt = atlas.lookup(Block::from_id(1)).unwrap();
        for side in BlockSide::all() {
            assert_eq!(dirt.rect(side), TextureRect::new([2, 0], [3, 1]));
        }

        let grass = atlas.lookup(Block::from_id(2)).unwrap();
        assert_eq!(grass.rect(BlockSide::NegX), TextureRect::new([0, 0], [1, 1]));
        assert_eq!(grass.rect(BlockSide::PosY), TextureRect::new([0, 0], [1, 1]));
        assert_eq!(grass.rect(BlockSide::NegZ), TextureRect::new([2, 0], [3, 1]));
        assert_eq!(grass.rect(BlockSide::PosZ), TextureRect::new([1, 0], [2, 1]));
    }

    #[test]
    fn lookups_outside_the_table_fail() {
        let atlas = TextureAtlas::standard();
        assert!(matches!(
            atlas.lookup(Block::AIR),
            Err(VoxelError::AirHasNoTexture)
        ));
        assert!(matches!(
            atlas.lookup(Block::from_id(3)),
            Err(VoxelError::MissingTextureMap {
                block_id: 3,
                populated: 2
            })
        ));
    }

    #[test]
    fn json_tables_round_trip() {
        let json = r#"[
            { "neg_x": [[4, 0], [5, 1]], "pos_x": [[4, 0], [5, 1]],
              "neg_y": [[4, 0], [5, 1]], "pos_y": [[4, 0], [5, 1]],
              "neg_z": [[4, 0], [5, 1]], "pos_z": [[6, 2], [7, 3]] }
        ]"#;
        let atlas = TextureAtlas::from_json_str(json).unwrap();
        let map = atlas.lookup(Block::from_id(1)).unwrap();
        assert_eq!(map.rect(BlockSide::PosZ), TextureRect::new([6, 2], [7, 3]));

        let written = serde_json::to_string(&TextureAtlas::standard()).unwrap();
        assert_eq!(
            TextureAtlas::from_json_str(&written).unwrap(),
            TextureAtlas::standard()
        );
    }

    #[test]
    fn pushed_maps_get_the_next_id() {
        let mut atlas = TextureAtlas::standard();
        let id = atlas.push(TextureMap::uniform(TextureRect::new([8, 8], [9, 9])));
        assert_eq!(id, 3);
        assert!(atlas.lookup(Block::from_id(3)).is_ok());
    }
}
