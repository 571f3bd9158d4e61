use lazy_static::lazy_static;

use crate::board::Player;
use crate::games::go::{FlatTile, State, GO_MAX_AREA};
use crate::util::zobrist::{zobrist_table, Zobrist};

lazy_static! {
    static ref COLOR_TILE: Vec<Zobrist> = zobrist_table(0x60_01, 2 * GO_MAX_AREA as usize);
    static ref TURN: Vec<Zobrist> = zobrist_table(0x60_02, 2);
    static ref PASS: Vec<Zobrist> = zobrist_table(0x60_03, 3);
}

impl Zobrist {
    /// Key for a stone of `color` on `tile`. Boards of different sizes share the same table.
    pub fn for_color_tile(color: Player, tile: FlatTile) -> Zobrist {
        COLOR_TILE[color.index() as usize * GO_MAX_AREA as usize + tile.index() as usize]
    }

    pub fn for_color_turn(color: Player) -> Zobrist {
        TURN[color.index() as usize]
    }

    pub fn for_pass_state(state: State) -> Zobrist {
        // don't include the outcome itself, that is implied by the stones
        let index = match state {
            State::Normal => 0,
            State::Passed => 1,
            State::Done(_) => 2,
        };
        PASS[index]
    }
}
