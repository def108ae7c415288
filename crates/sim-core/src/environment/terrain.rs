//! Terrain Map
//!
//! Static tile grid loaded from an ASCII layout. The top row of the layout
//! is the northern edge of the map (highest `y`).

use glam::Vec3;
use sim_events::Cell;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Grass,
    Water,
    Rock,
}

impl Tile {
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(Tile::Grass),
            '~' => Some(Tile::Water),
            '#' => Some(Tile::Rock),
            _ => None,
        }
    }

    pub fn is_walkable(self) -> bool {
        matches!(self, Tile::Grass)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TerrainError {
    #[error("terrain layout is empty")]
    Empty,
    #[error("layout row {row} has {found} tiles, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown tile glyph {glyph:?} at row {row}, column {column}")]
    UnknownGlyph { glyph: char, row: usize, column: usize },
}

#[derive(Debug, Clone)]
pub struct TerrainMap {
    width: i32,
    height: i32,
    tile_size: f32,
    /// Row-major from `y = 0`
    tiles: Vec<Tile>,
}

impl TerrainMap {
    /// Parses a layout given top row first.
    pub fn from_layout<S: AsRef<str>>(rows: &[S], tile_size: f32) -> Result<Self, TerrainError> {
        let expected = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);
        if expected == 0 {
            return Err(TerrainError::Empty);
        }

        let height = rows.len();
        let mut tiles = vec![Tile::Rock; expected * height];
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != expected {
                return Err(TerrainError::Ragged { row, expected, found });
            }
            let y = height - 1 - row;
            for (column, glyph) in line.chars().enumerate() {
                let tile = Tile::from_glyph(glyph)
                    .ok_or(TerrainError::UnknownGlyph { glyph, row, column })?;
                tiles[y * expected + column] = tile;
            }
        }

        Ok(Self {
            width: expected as i32,
            height: height as i32,
            tile_size,
            tiles,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    pub fn tile(&self, cell: Cell) -> Option<Tile> {
        if !self.contains(cell) {
            return None;
        }
        self.tiles
            .get((cell.y * self.width + cell.x) as usize)
            .copied()
    }

    /// Out-of-bounds cells are never walkable.
    pub fn is_walkable(&self, cell: Cell) -> bool {
        self.tile(cell).is_some_and(Tile::is_walkable)
    }

    pub fn is_water(&self, cell: Cell) -> bool {
        self.tile(cell) == Some(Tile::Water)
    }

    /// Water tiles with at least one walkable neighbour, i.e. tiles a
    /// creature can actually drink from.
    pub fn shore_water(&self) -> Vec<Cell> {
        self.cells()
            .filter(|&c| self.is_water(c) && c.neighbours().iter().any(|&n| self.is_walkable(n)))
            .collect()
    }

    pub fn walkable_cells(&self) -> Vec<Cell> {
        self.cells().filter(|&c| self.is_walkable(c)).collect()
    }

    /// Centre of a tile in world space, `y` up.
    pub fn cell_center(&self, cell: Cell) -> Vec3 {
        Vec3::new(
            cell.x as f32 * self.tile_size,
            0.0,
            cell.y as f32 * self.tile_size,
        )
    }

    fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Cell::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_layout_orientation() {
        let map = TerrainMap::from_layout(&["#~", ".."], 1.0).unwrap();
        assert_eq!(map.width(), 2);
        assert_eq!(map.height(), 2);
        // Top row is the highest y
        assert_eq!(map.tile(Cell::new(0, 1)), Some(Tile::Rock));
        assert_eq!(map.tile(Cell::new(1, 1)), Some(Tile::Water));
        assert!(map.is_walkable(Cell::new(0, 0)));
        assert!(!map.is_walkable(Cell::new(1, 1)));
        assert!(!map.is_walkable(Cell::new(5, 0)));
    }

    #[test]
    fn test_layout_errors() {
        let empty: [&str; 0] = [];
        assert_eq!(TerrainMap::from_layout(&empty, 1.0).unwrap_err(), TerrainError::Empty);
        assert_eq!(
            TerrainMap::from_layout(&["...", ".."], 1.0).unwrap_err(),
            TerrainError::Ragged { row: 1, expected: 3, found: 2 }
        );
        assert_eq!(
            TerrainMap::from_layout(&["..x"], 1.0).unwrap_err(),
            TerrainError::UnknownGlyph { glyph: 'x', row: 0, column: 2 }
        );
    }

    #[test]
    fn test_shore_water() {
        let map = TerrainMap::from_layout(&["~~~~", "~~~~", "...."], 1.0).unwrap();
        let shore = map.shore_water();
        assert_eq!(shore.len(), 4);
        assert!(shore.iter().all(|c| c.y == 1));
    }

    #[test]
    fn test_cell_center_scales() {
        let map = TerrainMap::from_layout(&["..."], 2.0).unwrap();
        assert_eq!(map.cell_center(Cell::new(2, 0)), Vec3::new(4.0, 0.0, 0.0));
    }
}
