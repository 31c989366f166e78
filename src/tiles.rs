//! Tile geometry.  The raster is cut into a `g x g` grid of equal
//! blocks; when `g` does not divide a dimension evenly the leftover
//! columns become a strip of right-edge tiles, the leftover rows a
//! strip of bottom-edge tiles, and the corner where the two strips
//! meet gets a tile of its own.  Together the tiles cover every pixel
//! exactly once.
//!
//! When `g` is larger than a dimension the grid blocks along that axis
//! are zero pixels wide.  Those tiles are still emitted, cover nothing,
//! and are skipped by the scheduler.

use itertools::iproduct;
use std::ops::Range;

/// A rectangle of pixels, `width` columns starting at `x` and `height`
/// rows starting at `y`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    /// Leftmost column.
    pub x: usize,
    /// Top row.
    pub y: usize,
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl Tile {
    /// Constructor.
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Tile {
            x,
            y,
            width,
            height,
        }
    }

    /// Number of pixels covered.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// True for the degenerate tiles of an oversized granularity.
    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }

    /// Every (x, y) inside the tile, column by column.
    pub fn pixels(&self) -> itertools::Product<Range<usize>, Range<usize>> {
        iproduct!(self.x..self.x + self.width, self.y..self.y + self.height)
    }
}

/// Cuts a `width x height` raster into tiles, `granularity` divisions
/// per axis.  The order is: the grid row by row, then the right-edge
/// strip, then the bottom-edge strip, then the corner.
///
/// Panics if `granularity` is zero; `TileScheduler::new` refuses that
/// value before it gets here.
pub fn make_tiles(width: usize, height: usize, granularity: usize) -> Vec<Tile> {
    assert!(granularity > 0, "granularity must be at least 1");
    let g = granularity;
    let (block_width, block_height) = (width / g, height / g);
    let (rest_width, rest_height) = (width % g, height % g);
    let (edge_x, edge_y) = (g * block_width, g * block_height);

    let mut tiles: Vec<Tile> = iproduct!(0..g, 0..g)
        .map(|(row, column)| {
            Tile::new(
                column * block_width,
                row * block_height,
                block_width,
                block_height,
            )
        })
        .collect();

    if rest_width != 0 {
        tiles.extend(
            (0..g).map(|i| Tile::new(edge_x, i * block_height, rest_width, block_height)),
        );
    }

    if rest_height != 0 {
        tiles.extend(
            (0..g).map(|i| Tile::new(i * block_width, edge_y, block_width, rest_height)),
        );
    }

    if rest_width != 0 && rest_height != 0 {
        tiles.push(Tile::new(edge_x, edge_y, rest_width, rest_height));
    }

    tiles
}

/// How many tiles `make_tiles` will produce for these arguments.
pub fn tile_count(width: usize, height: usize, granularity: usize) -> usize {
    let g = granularity;
    let (right, bottom) = (width % g != 0, height % g != 0);
    let mut count = g * g;
    if right {
        count += g;
    }
    if bottom {
        count += g;
    }
    if right && bottom {
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand::rngs::StdRng;

    // Paints every tile onto a coverage map and checks that each pixel
    // was painted once and nothing landed outside the raster.
    fn assert_partition(width: usize, height: usize, g: usize) {
        let tiles = make_tiles(width, height, g);
        assert_eq!(tiles.len(), tile_count(width, height, g));
        let mut hits = vec![0u8; width * height];
        for tile in &tiles {
            assert!(tile.x + tile.width <= width, "{:?} overruns {}", tile, width);
            assert!(tile.y + tile.height <= height, "{:?} overruns {}", tile, height);
            for (x, y) in tile.pixels() {
                hits[y * width + x] += 1;
            }
        }
        let covered: usize = tiles.iter().map(Tile::area).sum();
        assert_eq!(covered, width * height, "{}x{} g={}", width, height, g);
        assert!(hits.iter().all(|&h| h == 1), "{}x{} g={}", width, height, g);
    }

    #[test]
    fn single_division_is_the_whole_raster() {
        assert_eq!(make_tiles(7, 5, 1), vec![Tile::new(0, 0, 7, 5)]);
    }

    #[test]
    fn exact_divisors_have_no_strips() {
        let tiles = make_tiles(8, 6, 2);
        assert_eq!(
            tiles,
            vec![
                Tile::new(0, 0, 4, 3),
                Tile::new(4, 0, 4, 3),
                Tile::new(0, 3, 4, 3),
                Tile::new(4, 3, 4, 3),
            ]
        );
    }

    #[test]
    fn four_by_four_in_thirds() {
        let tiles = make_tiles(4, 4, 3);
        assert_eq!(tiles.len(), 9 + 3 + 3 + 1);
        assert!(tiles[..9].iter().all(|t| t.width == 1 && t.height == 1));
        assert_eq!(
            &tiles[9..12],
            &[Tile::new(3, 0, 1, 1), Tile::new(3, 1, 1, 1), Tile::new(3, 2, 1, 1)]
        );
        assert_eq!(
            &tiles[12..15],
            &[Tile::new(0, 3, 1, 1), Tile::new(1, 3, 1, 1), Tile::new(2, 3, 1, 1)]
        );
        assert_eq!(tiles[15], Tile::new(3, 3, 1, 1));
        assert_eq!(tiles.iter().map(Tile::area).sum::<usize>(), 16);
        assert_partition(4, 4, 3);
    }

    #[test]
    fn only_one_remainder() {
        let tiles = make_tiles(10, 9, 3);
        assert_eq!(tiles.len(), 9 + 3);
        assert!(tiles[9..].iter().all(|t| t.x == 9 && t.width == 1 && t.height == 3));
        assert_partition(10, 9, 3);
        assert_partition(9, 10, 3);
    }

    #[test]
    fn oversized_granularity_yields_empty_tiles() {
        let tiles = make_tiles(3, 2, 5);
        assert_eq!(tiles.iter().filter(|t| !t.is_empty()).count(), 1);
        assert_eq!(tiles.last(), Some(&Tile::new(0, 0, 3, 2)));
        assert_partition(3, 2, 5);
    }

    #[test]
    fn partition_matrix() {
        for &(w, h) in &[(1, 1), (1, 7), (7, 1), (4, 4), (16, 9), (31, 17), (64, 64)] {
            for &g in &[1, 2, 3, 4, 7, 8, w, h, w + 1, h + 3, 2 * w] {
                assert_partition(w, h, g);
            }
        }
    }

    #[test]
    fn partition_random_sweep() {
        let mut rng = StdRng::seed_from_u64(0x7117_b207);
        for _ in 0..200 {
            let w = rng.gen_range(1, 80);
            let h = rng.gen_range(1, 80);
            let g = rng.gen_range(1, 100);
            assert_partition(w, h, g);
        }
    }

    #[test]
    fn pixels_walks_columns() {
        let t = Tile::new(2, 5, 2, 2);
        let pixels: Vec<(usize, usize)> = t.pixels().collect();
        assert_eq!(pixels, vec![(2, 5), (2, 6), (3, 5), (3, 6)]);
        assert_eq!(Tile::new(4, 4, 0, 3).pixels().count(), 0);
    }
}
