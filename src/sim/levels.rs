//! Hand-authored brick layouts for the five levels
//!
//! Each level is a character grid:
//! - `#` plain, `R` resistant, `U` unbreakable
//! - `>` / `<` plain brick oscillating, starting rightward / leftward
//! - `.` empty cell
//!
//! Positions use integer pixel math so layouts land on whole pixels for any
//! screen width.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::brick::{Brick, Durability};
use crate::config::ConfigError;
use crate::consts::*;

/// Horizontal placement of a layout's rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    /// All rows share the left edge of a grid centered on screen
    Grid,
    /// Each row is centered on its own
    CenterRows,
}

#[derive(Debug)]
struct Layout {
    rows: &'static [&'static str],
    align: Align,
    top: i32,
    /// Column pitch (brick width + spacing)
    step_x: i32,
    /// Row pitch (brick height + spacing)
    step_y: i32,
    move_range: f32,
    move_speed: f32,
}

const BRICK_W: i32 = BRICK_WIDTH as i32;
const BRICK_H: i32 = BRICK_HEIGHT as i32;
const TOP: i32 = BRICK_TOP_MARGIN as i32;

static LEVELS: [Layout; MAX_LEVEL as usize] = [
    // 1: solid wall
    Layout {
        rows: &["######", "######", "######", "######", "######"],
        align: Align::Grid,
        top: TOP,
        step_x: BRICK_W,
        step_y: BRICK_H,
        move_range: 0.0,
        move_speed: 0.0,
    },
    // 2: heart with an unbreakable core
    Layout {
        rows: &[
            "###..###",
            "########",
            "##U##U##",
            ".##UU##.",
            "..####..",
            "...##...",
        ],
        align: Align::Grid,
        top: TOP,
        step_x: BRICK_W + 5,
        step_y: BRICK_H + 5,
        move_range: 0.0,
        move_speed: 0.0,
    },
    // 3: inverted pyramid, resistant ends, unbreakable tip
    Layout {
        rows: &["R####R", "R###R", "R##R", "R#R", "U"],
        align: Align::CenterRows,
        top: 100,
        step_x: BRICK_W + 10,
        step_y: BRICK_H + 30,
        move_range: 0.0,
        move_speed: 0.0,
    },
    // 4: sliding rows in alternating directions
    Layout {
        rows: &[">>>", "<<<", ">>>"],
        align: Align::Grid,
        top: TOP,
        step_x: BRICK_W + 150,
        step_y: BRICK_H + 50,
        move_range: 100.0,
        move_speed: 8.0,
    },
    // 5: fortress
    Layout {
        rows: &["U#####U", ".URRRU.", ">>>>>>>", "<<<<<<<", ".RRRRR."],
        align: Align::Grid,
        top: TOP,
        step_x: BRICK_W + 10,
        step_y: BRICK_H + 10,
        move_range: 60.0,
        move_speed: MOVABLE_BRICK_DEFAULT_SPEED,
    },
];

/// A level number known to have a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Level(u32);

impl Level {
    pub const FIRST: Level = Level(1);

    pub fn new(level: u32) -> Result<Self, ConfigError> {
        if (1..=MAX_LEVEL).contains(&level) {
            Ok(Level(level))
        } else {
            Err(ConfigError::InvalidLevel(level))
        }
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// The following level, `None` after the last one
    pub fn next(self) -> Option<Level> {
        Level::new(self.0 + 1).ok()
    }

    pub fn is_last(self) -> bool {
        self.0 == MAX_LEVEL
    }

    fn layout(self) -> &'static Layout {
        &LEVELS[(self.0 - 1) as usize]
    }
}

impl TryFrom<u32> for Level {
    type Error = ConfigError;

    fn try_from(level: u32) -> Result<Self, Self::Error> {
        Level::new(level)
    }
}

impl From<Level> for u32 {
    fn from(level: Level) -> u32 {
        level.0
    }
}

/// Build the bricks for `level`. Ids are drawn from `next_id`.
pub fn generate_level(level: Level, screen_width: f32, next_id: &mut u32) -> Vec<Brick> {
    let layout = level.layout();

    let screen_w = screen_width as i32;
    let cols = layout.rows.iter().map(|r| r.len()).max().unwrap_or(0) as i32;
    let mut bricks = Vec::new();

    for (row, cells) in layout.rows.iter().enumerate() {
        let start_x = match layout.align {
            Align::Grid => (screen_w - cols * layout.step_x) / 2,
            Align::CenterRows => {
                let n = cells.len() as i32;
                let row_width = n * layout.step_x - (layout.step_x - BRICK_W);
                screen_w / 2 - row_width / 2
            }
        };
        let y = layout.top + row as i32 * layout.step_y;

        for (col, cell) in cells.chars().enumerate() {
            let (durability, direction) = match cell {
                '#' => (Durability::Plain, None),
                'R' => (Durability::resistant(), None),
                'U' => (Durability::Unbreakable, None),
                '>' => (Durability::Plain, Some(1.0)),
                '<' => (Durability::Plain, Some(-1.0)),
                _ => continue,
            };
            let x = start_x + col as i32 * layout.step_x;
            let id = *next_id;
            *next_id += 1;

            let brick = Brick::new(
                id,
                Vec2::new(x as f32, y as f32),
                BRICK_WIDTH,
                BRICK_HEIGHT,
                durability,
            );
            bricks.push(match direction {
                Some(dir) => brick.with_motion(layout.move_range, dir, layout.move_speed),
                None => brick,
            });
        }
    }

    let destructible = bricks.iter().filter(|b| b.counts_for_clear()).count();
    log::info!(
        "Level {}: {} bricks ({} destructible)",
        level.get(),
        bricks.len(),
        destructible
    );

    bricks
}
