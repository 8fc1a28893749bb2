//! MovingAI-style `.map` format parser and grid queries.

use std::path::Path;

use thiserror::Error;

/// A single cell in a grid map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    /// Agent can traverse this cell.
    Passable,
    /// Obstacle; agent cannot enter.
    Blocked,
}

/// Errors from loading or parsing a grid map file.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("missing header field: {0}")]
    MissingHeader(&'static str),

    #[error("invalid header value for {field}: {value}")]
    InvalidHeader { field: &'static str, value: String },

    #[error("dimension mismatch: expected {expected} rows, got {got}")]
    DimensionMismatch { expected: i32, got: i32 },

    #[error("row {row} width mismatch: expected {expected}, got {got}")]
    RowWidthMismatch { row: i32, expected: i32, got: i32 },

    #[error("failed to read map file")]
    Io(#[from] std::io::Error),
}

/// A parsed grid map.
///
/// Coordinates are signed so that neighbour arithmetic never wraps; any
/// out-of-range coordinate is reported as an obstacle.
#[derive(Debug, Clone)]
pub struct GridMap {
    width: i32,
    height: i32,
    /// Row-major; index = y * width + x
    tiles: Vec<Tile>,
}

/// Offsets of the four cardinal neighbours followed by the four diagonals.
const OCTILE_OFFSETS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

impl GridMap {
    /// Parse a map file content.
    ///
    /// Expected format:
    /// ```text
    /// type octile
    /// height N
    /// width M
    /// map
    /// <N lines of M characters>
    /// ```
    pub fn parse(input: &str) -> Result<Self, MapError> {
        let mut lines = input.lines();

        let mut map_type: Option<&str> = None;
        let mut height: Option<i32> = None;
        let mut width: Option<i32> = None;

        for line in lines.by_ref() {
            let line = line.trim();
            if line.eq_ignore_ascii_case("map") {
                break;
            }
            if let Some(rest) = line.strip_prefix("type ") {
                map_type = Some(rest.trim());
            } else if let Some(rest) = line.strip_prefix("height ") {
                height = Some(rest.trim().parse().map_err(|_| MapError::InvalidHeader {
                    field: "height",
                    value: rest.to_string(),
                })?);
            } else if let Some(rest) = line.strip_prefix("width ") {
                width = Some(rest.trim().parse().map_err(|_| MapError::InvalidHeader {
                    field: "width",
                    value: rest.to_string(),
                })?);
            }
        }

        let _map_type = map_type.ok_or(MapError::MissingHeader("type"))?;
        let height = height.ok_or(MapError::MissingHeader("height"))?;
        let width = width.ok_or(MapError::MissingHeader("width"))?;

        let mut tiles = Vec::with_capacity((width * height) as usize);
        let mut row_count: i32 = 0;

        for line in lines {
            if row_count >= height {
                break; // ignore trailing lines
            }
            let chars: Vec<char> = line.chars().collect();
            if chars.len() != width as usize {
                return Err(MapError::RowWidthMismatch {
                    row: row_count,
                    expected: width,
                    got: chars.len() as i32,
                });
            }
            for ch in chars {
                tiles.push(Self::char_to_tile(ch));
            }
            row_count += 1;
        }

        if row_count < height {
            return Err(MapError::DimensionMismatch {
                expected: height,
                got: row_count,
            });
        }

        Ok(Self { width, height, tiles })
    }

    /// Read and parse a map file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Create from raw bytes (row-major, 1 = passable, 0 = blocked).
    pub fn from_bytes(width: i32, height: i32, data: &[u8]) -> Option<Self> {
        if width < 0 || height < 0 || data.len() != (width * height) as usize {
            return None;
        }
        let tiles = data
            .iter()
            .map(|&b| if b != 0 { Tile::Passable } else { Tile::Blocked })
            .collect();
        Some(Self { width, height, tiles })
    }

    fn char_to_tile(ch: char) -> Tile {
        match ch {
            '.' | 'G' | 'S' => Tile::Passable,
            // Everything else is blocked (@ T O W etc.)
            _ => Tile::Blocked,
        }
    }

    /// Width of the map (x dimension).
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height of the map (y dimension).
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Row-major cell id of (x, y).
    #[inline]
    pub fn cell_id(&self, x: i32, y: i32) -> u32 {
        (y * self.width + x) as u32
    }

    /// Get tile at (x, y). Returns `None` if out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<Tile> {
        if self.in_bounds(x, y) {
            Some(self.tiles[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Whether (x, y) is inside the map bounds.
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Whether (x, y) cannot be entered. Out-of-bounds counts as blocked.
    #[inline]
    pub fn is_obstacle(&self, x: i32, y: i32) -> bool {
        self.get(x, y) != Some(Tile::Passable)
    }

    /// The in-bounds, non-obstacle 8-neighbours of (x, y).
    ///
    /// A diagonal neighbour is admitted only when both of its orthogonal
    /// companions are free, so a path can never slip through the shared
    /// corner of two touching obstacles.
    pub fn neighbours_8(&self, x: i32, y: i32) -> Vec<(i32, i32)> {
        let mut result = Vec::with_capacity(8);
        for (i, (dx, dy)) in OCTILE_OFFSETS.iter().enumerate() {
            let nx = x + dx;
            let ny = y + dy;
            if self.is_obstacle(nx, ny) {
                continue;
            }
            if i >= 4 && (self.is_obstacle(x + dx, y) || self.is_obstacle(x, y + dy)) {
                continue;
            }
            result.push((nx, ny));
        }
        result
    }
}
