//! Level catalog parsing
//!
//! The catalog is plain text. Each level starts with a line holding its
//! number, followed by 8 rows of 16 characters: per column a brick char
//! (`R` regular, `D` double-hit, case-insensitive) and a bonus char
//! (`3` three balls, `4` super size, `5` slow motion, `6` bad points).
//! Anything else in a cell means "no brick" or "no bonus". Requests past
//! the end of the catalog wrap around to level 1.

use std::path::PathBuf;

use glam::Vec2;

use super::brick::{Bonus, BonusKind, Brick, BrickKind};
use crate::consts::{BONUS_INSET, BONUS_SPEED, BRICK_SIZE, LEVEL_COLS, LEVEL_ROWS, LEVEL_TOP};
use crate::error::LevelError;
use crate::render::colors;

/// Catalog bundled with the game
pub const DEFAULT_LEVELS: &str = include_str!("../../levels/levels.txt");

/// Where the catalog text comes from
pub trait LevelSource {
    fn fetch(&self) -> Result<String, LevelError>;
}

/// Catalog held in memory
#[derive(Debug, Clone)]
pub struct TextLevels(pub String);

impl TextLevels {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl Default for TextLevels {
    fn default() -> Self {
        Self::new(DEFAULT_LEVELS)
    }
}

impl LevelSource for TextLevels {
    fn fetch(&self) -> Result<String, LevelError> {
        Ok(self.0.clone())
    }
}

/// Catalog read from disk
#[derive(Debug, Clone)]
pub struct FileLevels {
    pub path: PathBuf,
}

impl FileLevels {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LevelSource for FileLevels {
    fn fetch(&self) -> Result<String, LevelError> {
        std::fs::read_to_string(&self.path)
            .map_err(|e| LevelError::ResourceUnavailable(format!("{}: {e}", self.path.display())))
    }
}

/// One level block: its header number and up to 8 rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelBlock {
    pub number: u32,
    pub rows: Vec<String>,
}

/// Split catalog text into level blocks. Rows are consumed with their
/// header, so a row of digits is never read as another header.
pub fn parse_catalog(text: &str) -> Vec<LevelBlock> {
    let lines: Vec<&str> = text.lines().collect();
    let mut blocks = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        match lines[i].trim().parse::<u32>() {
            Ok(number) => {
                let end = (i + 1 + LEVEL_ROWS).min(lines.len());
                blocks.push(LevelBlock {
                    number,
                    rows: lines[i + 1..end].iter().map(|s| s.to_string()).collect(),
                });
                i = end;
            }
            Err(_) => i += 1,
        }
    }
    blocks
}

/// Map a requested level onto a catalog of `count` levels: ((L−1) mod N) + 1
pub fn wrap_level(level: u32, count: usize) -> u32 {
    if count == 0 {
        return level.max(1);
    }
    (level.max(1) - 1) % count as u32 + 1
}

fn brick_kind(c: char) -> Option<BrickKind> {
    match c.to_ascii_uppercase() {
        'R' => Some(BrickKind::Regular),
        'D' => Some(BrickKind::DoubleHit),
        _ => None,
    }
}

fn bonus_kind(c: char) -> Option<BonusKind> {
    match c {
        '3' => Some(BonusKind::ThreeBalls),
        '4' => Some(BonusKind::SuperSize),
        '5' => Some(BonusKind::SlowMotion),
        '6' => Some(BonusKind::BadPoints),
        _ => None,
    }
}

/// Build the brick grid from level rows. Short or missing rows simply
/// produce fewer bricks.
pub fn parse_grid<S: AsRef<str>>(rows: &[S]) -> Vec<Brick> {
    let mut bricks = Vec::new();
    for (row, line) in rows.iter().take(LEVEL_ROWS).enumerate() {
        let cells: Vec<char> = line.as_ref().chars().collect();
        for col in 0..LEVEL_COLS {
            let Some(kind) = cells.get(col * 2).copied().and_then(brick_kind) else {
                continue;
            };

            let location = Vec2::new(
                col as f32 * BRICK_SIZE.x,
                LEVEL_TOP + row as f32 * BRICK_SIZE.y,
            );
            let palette = &colors::BRICK_PALETTE;
            let mut brick =
                Brick::new(kind, location).with_color(palette[(row + col) % palette.len()]);

            if let Some(bonus) = cells.get(col * 2 + 1).copied().and_then(bonus_kind) {
                brick = brick.with_bonus(Bonus::new(
                    bonus,
                    location + Vec2::splat(BONUS_INSET),
                    BONUS_SPEED,
                ));
            }
            bricks.push(brick);
        }
    }
    bricks
}

/// Loads level grids from a source, caching the parsed catalog after the
/// first successful fetch
#[derive(Debug)]
pub struct LevelLoader<S> {
    source: S,
    catalog: Option<Vec<LevelBlock>>,
    bonus_speed: f32,
}

impl<S: LevelSource> LevelLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            catalog: None,
            bonus_speed: BONUS_SPEED,
        }
    }

    /// Override the fall speed given to parsed bonuses
    pub fn with_bonus_speed(mut self, speed: f32) -> Self {
        self.bonus_speed = speed;
        self
    }

    fn catalog(&mut self) -> Result<&[LevelBlock], LevelError> {
        if self.catalog.is_none() {
            let text = self.source.fetch()?;
            let blocks = parse_catalog(&text);
            log::info!("Level catalog loaded: {} levels", blocks.len());
            self.catalog = Some(blocks);
        }
        Ok(self.catalog.as_deref().unwrap_or_default())
    }

    /// Number of levels in the catalog
    pub fn level_count(&mut self) -> Result<usize, LevelError> {
        Ok(self.catalog()?.len())
    }

    /// Bricks for `level`, wrapping past the end of the catalog
    pub fn try_load(&mut self, level: u32) -> Result<Vec<Brick>, LevelError> {
        let bonus_speed = self.bonus_speed;
        let catalog = self.catalog()?;
        if catalog.is_empty() {
            return Err(LevelError::EmptyCatalog);
        }

        let wrapped = wrap_level(level, catalog.len());
        let block = catalog
            .iter()
            .find(|b| b.number == wrapped)
            .ok_or(LevelError::LevelNotFound(wrapped))?;

        let mut bricks = parse_grid(&block.rows);
        for bonus in bricks.iter_mut().filter_map(|b| b.bonus.as_mut()) {
            bonus.body.speed = bonus_speed;
        }
        Ok(bricks)
    }

    /// Like `try_load`, but any failure is logged and yields an empty level
    pub fn load(&mut self, level: u32) -> Vec<Brick> {
        match self.try_load(level) {
            Ok(bricks) => bricks,
            Err(e @ LevelError::ResourceUnavailable(_)) => {
                log::error!("Error loading level {level}: {e}");
                Vec::new()
            }
            Err(e) => {
                log::warn!("Error loading level {level}: {e}");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Sprite, SpriteState};
    use proptest::prelude::*;
    use std::cell::Cell;

    const TWO_LEVELS: &str = "\
1
R3D4r5d6R_______
________________
________________
________________
________________
________________
________________
________________
2
DDDDDDDDDDDDDDDD
________________
________________
________________
________________
________________
________________
RRRRRRRRRRRRRRRR
";

    struct Failing;

    impl LevelSource for Failing {
        fn fetch(&self) -> Result<String, LevelError> {
            Err(LevelError::ResourceUnavailable("offline".into()))
        }
    }

    struct Counting<'a> {
        fetches: &'a Cell<u32>,
    }

    impl LevelSource for Counting<'_> {
        fn fetch(&self) -> Result<String, LevelError> {
            self.fetches.set(self.fetches.get() + 1);
            Ok(TWO_LEVELS.to_string())
        }
    }

    #[test]
    fn test_first_row_mapping() {
        let mut loader = LevelLoader::new(TextLevels::new(TWO_LEVELS));
        let bricks = loader.try_load(1).unwrap();
        assert_eq!(bricks.len(), 5);

        let kinds: Vec<_> = bricks.iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![
                BrickKind::Regular,
                BrickKind::DoubleHit,
                BrickKind::Regular,
                BrickKind::DoubleHit,
                BrickKind::Regular,
            ]
        );

        let bonuses: Vec<_> = bricks.iter().map(|b| b.bonus.as_ref().map(|x| x.kind)).collect();
        assert_eq!(
            bonuses,
            vec![
                Some(BonusKind::ThreeBalls),
                Some(BonusKind::SuperSize),
                Some(BonusKind::SlowMotion),
                Some(BonusKind::BadPoints),
                None,
            ]
        );
    }

    #[test]
    fn test_grid_positions() {
        let mut loader = LevelLoader::new(TextLevels::new(TWO_LEVELS));
        let bricks = loader.try_load(2).unwrap();
        assert_eq!(bricks.len(), 16);
        assert_eq!(bricks[0].location(), Vec2::new(0.0, 48.0));
        assert_eq!(bricks[7].location(), Vec2::new(336.0, 48.0));
        assert_eq!(bricks[8].location(), Vec2::new(0.0, 48.0 + 7.0 * 24.0));
    }

    #[test]
    fn test_bonus_inset_and_dormant() {
        let bricks = parse_grid(&["__R3"]);
        assert_eq!(bricks.len(), 1);
        let bonus = bricks[0].bonus.as_ref().unwrap();
        assert_eq!(bonus.location(), Vec2::new(52.0, 52.0));
        assert_eq!(bonus.state(), SpriteState::Dead);
    }

    #[test]
    fn test_bonus_chars_are_case_sensitive_digits() {
        // Letters in the bonus slot never map to a bonus
        let bricks = parse_grid(&["RtRsRmRT"]);
        assert_eq!(bricks.len(), 4);
        assert!(bricks.iter().all(|b| b.bonus.is_none()));
    }

    #[test]
    fn test_malformed_rows_degrade() {
        let bricks = parse_grid(&["R", "", "xx?D", "R3R3R3R3R3R3R3R3R3R3"]);
        // "R" -> 1, "" -> 0, "xx?D" -> 0 (D sits in a bonus slot), long row -> 8
        assert_eq!(bricks.len(), 9);
    }

    #[test]
    fn test_wrap_level() {
        assert_eq!(wrap_level(1, 2), 1);
        assert_eq!(wrap_level(2, 2), 2);
        assert_eq!(wrap_level(3, 2), 1);
        assert_eq!(wrap_level(7, 3), 1);
        assert_eq!(wrap_level(0, 3), 1);
    }

    #[test]
    fn test_unavailable_resource_is_empty_level() {
        let mut loader = LevelLoader::new(Failing);
        assert!(matches!(
            loader.try_load(1),
            Err(LevelError::ResourceUnavailable(_))
        ));
        assert!(loader.load(1).is_empty());
    }

    #[test]
    fn test_missing_header_is_empty_level() {
        // Two headers, but numbered 1 and 5: level 2 has no block
        let text = format!("1\n{}5\n{}", "RR\n".repeat(8), "DD\n".repeat(8));
        let mut loader = LevelLoader::new(TextLevels::new(text));
        assert_eq!(loader.level_count().unwrap(), 2);
        assert_eq!(loader.try_load(2).unwrap_err(), LevelError::LevelNotFound(2));
        assert!(loader.load(2).is_empty());
        assert_eq!(loader.load(1).len(), 8);
    }

    #[test]
    fn test_empty_catalog() {
        let mut loader = LevelLoader::new(TextLevels::new("no levels here"));
        assert_eq!(loader.try_load(1).unwrap_err(), LevelError::EmptyCatalog);
    }

    #[test]
    fn test_catalog_fetched_once() {
        let fetches = Cell::new(0);
        let mut loader = LevelLoader::new(Counting { fetches: &fetches });
        loader.load(1);
        loader.load(2);
        loader.load(3);
        assert_eq!(fetches.get(), 1);
    }

    #[test]
    fn test_missing_file() {
        let mut loader = LevelLoader::new(FileLevels::new("/nonexistent/levels.txt"));
        assert!(loader.load(1).is_empty());
    }

    #[test]
    fn test_default_catalog_parses() {
        let mut loader = LevelLoader::new(TextLevels::default());
        let count = loader.level_count().unwrap();
        assert!(count >= 1);
        for level in 1..=count as u32 {
            assert!(!loader.try_load(level).unwrap().is_empty());
        }
    }

    fn cell_char() -> impl Strategy<Value = char> {
        prop::sample::select(vec!['R', 'r', 'D', 'd', '_', 'x', '3', '4', '5', '6', '7', 't', ' '])
    }

    proptest! {
        #[test]
        fn prop_wrap_idempotent(level in 1u32..500) {
            let mut loader = LevelLoader::new(TextLevels::new(TWO_LEVELS));
            let n = loader.level_count().unwrap();
            let a = loader.try_load(level).unwrap();
            let b = loader.try_load(wrap_level(level, n)).unwrap();
            prop_assert_eq!(a.len(), b.len());
            for (x, y) in a.iter().zip(b.iter()) {
                prop_assert_eq!(x.kind, y.kind);
                prop_assert_eq!(x.location(), y.location());
                prop_assert_eq!(x.bonus.as_ref().map(|b| b.kind), y.bonus.as_ref().map(|b| b.kind));
            }
        }

        #[test]
        fn prop_grid_matches_char_table(
            rows in prop::collection::vec(prop::collection::vec(cell_char(), 0..20), 0..10)
        ) {
            let rows: Vec<String> = rows.into_iter().map(|r| r.into_iter().collect()).collect();
            let bricks = parse_grid(&rows);
            prop_assert!(bricks.len() <= LEVEL_ROWS * LEVEL_COLS);

            let mut expected = Vec::new();
            for (row, line) in rows.iter().take(LEVEL_ROWS).enumerate() {
                let cells: Vec<char> = line.chars().collect();
                for col in 0..LEVEL_COLS {
                    let kind = match cells.get(col * 2) {
                        Some('R') | Some('r') => BrickKind::Regular,
                        Some('D') | Some('d') => BrickKind::DoubleHit,
                        _ => continue,
                    };
                    let bonus = match cells.get(col * 2 + 1) {
                        Some('3') => Some(BonusKind::ThreeBalls),
                        Some('4') => Some(BonusKind::SuperSize),
                        Some('5') => Some(BonusKind::SlowMotion),
                        Some('6') => Some(BonusKind::BadPoints),
                        _ => None,
                    };
                    expected.push((row, col, kind, bonus));
                }
            }

            prop_assert_eq!(bricks.len(), expected.len());
            for (brick, (row, col, kind, bonus)) in bricks.iter().zip(expected) {
                prop_assert_eq!(brick.kind, kind);
                prop_assert_eq!(brick.bonus.as_ref().map(|b| b.kind), bonus);
                prop_assert_eq!(
                    brick.location(),
                    Vec2::new(col as f32 * 48.0, 48.0 + row as f32 * 24.0)
                );
            }
        }
    }
}
