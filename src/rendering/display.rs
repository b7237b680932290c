//! # Display Management
//!
//! Text rendering of the bounds map.
//!
//! Each mapped room becomes a box on a character grid, with a gap in the
//! wall for every exit and a glyph for each kind of occupant.

use crate::config::{MAP_CELL_HEIGHT, MAP_CELL_WIDTH};
use crate::game::{ConcreteEntity, Direction, Dungeon, GameState, Mob, Position, Room};
use crate::utils::CoordinateMap;
use crate::{CrawlError, CrawlResult};
use serde::{Deserialize, Serialize};

/// Geometry and glyphs used by the [`TextCartographer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Characters per room cell, walls included
    pub cell_width: usize,
    /// Lines per room cell, walls included
    pub cell_height: usize,
    pub corner: char,
    pub horizontal_wall: char,
    pub vertical_wall: char,
    /// Drawn in the wall where an exit is
    pub door: char,
    pub player: char,
    pub valuable: char,
    pub creature: char,
    pub corpse: char,
}

impl DisplayConfig {
    /// Checks the cell is large enough to hold walls, doors and glyphs.
    pub fn validate(&self) -> CrawlResult<()> {
        if self.cell_width < 5 || self.cell_height < 4 {
            return Err(CrawlError::InvalidAttribute(format!(
                "map cells must be at least 5x4, got {}x{}",
                self.cell_width, self.cell_height
            )));
        }
        Ok(())
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            cell_width: MAP_CELL_WIDTH,
            cell_height: MAP_CELL_HEIGHT,
            corner: '+',
            horizontal_wall: '-',
            vertical_wall: '|',
            door: ' ',
            player: '@',
            valuable: '$',
            creature: 'M',
            corpse: 'm',
        }
    }
}

/// Draws a [`CoordinateMap`] as lines of text.
#[derive(Debug, Clone, Default)]
pub struct TextCartographer {
    config: DisplayConfig,
}

impl TextCartographer {
    pub fn new(config: DisplayConfig) -> CrawlResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Renders the map of a running game.
    pub fn render_state(&self, state: &GameState) -> Vec<String> {
        self.render(state.dungeon(), &state.map())
    }

    /// Renders every mapped room. Trailing spaces are trimmed from each line.
    ///
    /// # Examples
    ///
    /// ```
    /// use crawl::{BoundsMapper, Dungeon, Room, TextCartographer};
    ///
    /// let mut dungeon = Dungeon::new();
    /// let cell = dungeon.add_room(Room::new("Cell").unwrap());
    /// let map = BoundsMapper::new(&dungeon, cell).walk();
    ///
    /// let lines = TextCartographer::default().render(&dungeon, &map);
    /// assert_eq!(lines[0], "+-----+");
    /// assert_eq!(lines.len(), 5);
    /// ```
    pub fn render(&self, dungeon: &Dungeon, map: &CoordinateMap) -> Vec<String> {
        if map.is_empty() {
            return Vec::new();
        }
        let (w, h) = (self.config.cell_width, self.config.cell_height);
        let bounds = map.bounds();
        let top_left = Position::new(bounds.x_min, bounds.y_min);
        let mut canvas = vec![vec![' '; bounds.width() * w]; bounds.height() * h];

        for (id, position) in map.iter() {
            let Some(room) = dungeon.room(id) else {
                continue;
            };
            let offset = position - top_left;
            let left = offset.x as usize * w;
            let top = offset.y as usize * h;
            self.draw_room(&mut canvas, room, left, top);
        }

        canvas
            .into_iter()
            .map(|row| row.into_iter().collect::<String>().trim_end().to_string())
            .collect()
    }

    fn draw_room(&self, canvas: &mut [Vec<char>], room: &Room, left: usize, top: usize) {
        let cfg = &self.config;
        let (w, h) = (cfg.cell_width, cfg.cell_height);
        let (right, bottom) = (left + w - 1, top + h - 1);

        for x in left..=right {
            canvas[top][x] = cfg.horizontal_wall;
            canvas[bottom][x] = cfg.horizontal_wall;
        }
        for row in canvas.iter_mut().take(bottom + 1).skip(top) {
            row[left] = cfg.vertical_wall;
            row[right] = cfg.vertical_wall;
        }
        for (x, y) in [(left, top), (right, top), (left, bottom), (right, bottom)] {
            canvas[y][x] = cfg.corner;
        }

        for (direction, _) in room.exits() {
            let (x, y) = match direction {
                Direction::North => (left + w / 2, top),
                Direction::South => (left + w / 2, bottom),
                Direction::West => (left, top + h / 2),
                Direction::East => (right, top + h / 2),
            };
            canvas[y][x] = cfg.door;
        }

        // Glyph slots: player and loot on the first inner line, creatures on the last.
        let (near, far) = (left + 1, left + w / 2 + 1);
        let (upper, lower) = (top + 1, bottom - 1);
        for entity in room.contents() {
            let (x, y, glyph) = match entity {
                ConcreteEntity::Player => (near, upper, cfg.player),
                ConcreteEntity::Valuable(_) => (far, upper, cfg.valuable),
                ConcreteEntity::Creature(creature) if creature.is_alive() => {
                    (near, lower, cfg.creature)
                }
                ConcreteEntity::Creature(_) => (far, lower, cfg.corpse),
                ConcreteEntity::Item(_) => continue,
            };
            canvas[y][x] = glyph;
        }
    }
}
