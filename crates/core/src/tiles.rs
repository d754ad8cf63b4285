//! Tile alphabets and the sources that produce new tiles.
//!
//! Refills go through the [`TileSource`] trait so sessions can run on seeded
//! random tiles in play and on a fixed script in tests.

use std::collections::VecDeque;

use unicode_width::UnicodeWidthChar;

use crate::error::GameError;
use crate::rng::SimpleRng;
use crate::types::{Tile, DEFAULT_TILES, MIN_ALPHABET};

/// A validated set of at least two distinct, visible tiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    tiles: Vec<Tile>,
}

impl Alphabet {
    pub fn new(tiles: Vec<Tile>) -> Result<Self, GameError> {
        if tiles.len() < MIN_ALPHABET {
            return Err(GameError::AlphabetTooSmall { len: tiles.len() });
        }
        for (i, tile) in tiles.iter().enumerate() {
            if !matches!(UnicodeWidthChar::width(tile.symbol()), Some(w) if w > 0) {
                return Err(GameError::ZeroWidthTile { tile: *tile });
            }
            if tiles[..i].contains(tile) {
                return Err(GameError::DuplicateTile { tile: *tile });
            }
        }
        Ok(Self { tiles })
    }

    /// One tile per char, whitespace ignored. Multi-char symbols such as
    /// `❤️` (a heart plus a variation selector) are rejected.
    ///
    /// ```
    /// use tui_match3_core::Alphabet;
    ///
    /// let alphabet = Alphabet::parse("🍋 🍉 🥝").unwrap();
    /// assert_eq!(alphabet.len(), 3);
    /// assert!(Alphabet::parse("a").is_err());
    /// ```
    pub fn parse(symbols: &str) -> Result<Self, GameError> {
        Self::new(
            symbols
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(Tile::new)
                .collect(),
        )
    }

    /// The seven fruits of the classic board
    pub fn fruits() -> Self {
        Self {
            tiles: DEFAULT_TILES.iter().copied().map(Tile::new).collect(),
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, tile: Tile) -> bool {
        self.tiles.contains(&tile)
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::fruits()
    }
}

/// Supplies the tile for a cell that needs a fresh one
pub trait TileSource {
    fn next_tile(&mut self) -> Tile;

    /// A tile that is not in `avoid`, or `None` when every tile the source
    /// can produce is excluded.
    fn next_tile_avoiding(&mut self, avoid: &[Tile]) -> Option<Tile>;
}

/// Uniformly random tiles from an alphabet, reproducible from the seed
#[derive(Debug, Clone)]
pub struct RandomTiles {
    alphabet: Alphabet,
    rng: SimpleRng,
}

impl RandomTiles {
    pub fn new(alphabet: Alphabet, seed: u32) -> Self {
        Self {
            alphabet,
            rng: SimpleRng::new(seed),
        }
    }
}

impl TileSource for RandomTiles {
    fn next_tile(&mut self) -> Tile {
        let tiles = self.alphabet.tiles();
        tiles[self.rng.next_index(tiles.len())]
    }

    fn next_tile_avoiding(&mut self, avoid: &[Tile]) -> Option<Tile> {
        let allowed: Vec<Tile> = self
            .alphabet
            .tiles()
            .iter()
            .copied()
            .filter(|tile| !avoid.contains(tile))
            .collect();
        self.rng.choose(&allowed).copied()
    }
}

/// Replays a fixed sequence of tiles, cycling when it runs out
#[derive(Debug, Clone)]
pub struct ScriptedTiles {
    script: VecDeque<Tile>,
    drawn: usize,
}

impl ScriptedTiles {
    /// Panics on an empty script.
    pub fn new(script: impl IntoIterator<Item = Tile>) -> Self {
        let script: VecDeque<Tile> = script.into_iter().collect();
        assert!(!script.is_empty(), "scripted tile source needs at least one tile");
        Self { script, drawn: 0 }
    }

    /// One tile per char, whitespace ignored
    pub fn from_symbols(symbols: &str) -> Self {
        Self::new(symbols.chars().filter(|c| !c.is_whitespace()).map(Tile::new))
    }

    /// How many tiles have been handed out so far
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl TileSource for ScriptedTiles {
    fn next_tile(&mut self) -> Tile {
        self.drawn += 1;
        // Non-empty by construction.
        let tile = self.script[0];
        self.script.rotate_left(1);
        tile
    }

    /// Skips excluded tiles in script order; skipped tiles stay in the cycle.
    fn next_tile_avoiding(&mut self, avoid: &[Tile]) -> Option<Tile> {
        for _ in 0..self.script.len() {
            let tile = self.next_tile();
            if !avoid.contains(&tile) {
                return Some(tile);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_validation() {
        assert_eq!(
            Alphabet::parse("a"),
            Err(GameError::AlphabetTooSmall { len: 1 })
        );
        assert_eq!(
            Alphabet::parse("aba"),
            Err(GameError::DuplicateTile { tile: Tile::new('a') })
        );
        assert_eq!(
            Alphabet::parse("❤️🍋"),
            Err(GameError::ZeroWidthTile {
                tile: Tile::new('\u{FE0F}')
            })
        );
        assert_eq!(
            Alphabet::parse("ae\u{301}"),
            Err(GameError::ZeroWidthTile {
                tile: Tile::new('\u{301}')
            })
        );
        assert_eq!(
            Alphabet::parse("ab\u{7}"),
            Err(GameError::ZeroWidthTile {
                tile: Tile::new('\u{7}')
            })
        );
        assert_eq!(Alphabet::parse("❤🍋").map(|a| a.len()), Ok(2));
        assert_eq!(Alphabet::fruits().len(), 7);
        assert_eq!(Alphabet::default(), Alphabet::fruits());
    }

    #[test]
    fn random_tiles_stay_in_alphabet() {
        let alphabet = Alphabet::parse("xyz").unwrap();
        let mut source = RandomTiles::new(alphabet.clone(), 99);
        for _ in 0..200 {
            assert!(alphabet.contains(source.next_tile()));
        }
    }

    #[test]
    fn random_tiles_are_seeded() {
        let mut a = RandomTiles::new(Alphabet::fruits(), 5);
        let mut b = RandomTiles::new(Alphabet::fruits(), 5);
        let xs: Vec<Tile> = (0..32).map(|_| a.next_tile()).collect();
        let ys: Vec<Tile> = (0..32).map(|_| b.next_tile()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn scripted_tiles_cycle() {
        let mut source = ScriptedTiles::from_symbols("ab");
        let drawn: String = (0..5).map(|_| source.next_tile().symbol()).collect();
        assert_eq!(drawn, "ababa");
        assert_eq!(source.drawn(), 5);
    }

    #[test]
    fn avoiding_skips_excluded_tiles() {
        let (a, b, c) = (Tile::new('a'), Tile::new('b'), Tile::new('c'));

        let mut random = RandomTiles::new(Alphabet::parse("abc").unwrap(), 3);
        for _ in 0..50 {
            assert_eq!(random.next_tile_avoiding(&[a, b]), Some(c));
        }
        assert_eq!(random.next_tile_avoiding(&[a, b, c]), None);

        let mut scripted = ScriptedTiles::from_symbols("abc");
        assert_eq!(scripted.next_tile_avoiding(&[a]), Some(b));
        assert_eq!(scripted.next_tile_avoiding(&[b]), Some(c));
        assert_eq!(scripted.next_tile_avoiding(&[a, b, c]), None);
        assert_eq!(scripted.next_tile(), a);
    }
}
