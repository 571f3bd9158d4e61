use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::ControlFlow;
use std::str::FromStr;

use internal_iterator::InternalIterator;

use crate::ai::heuristic::Features;
use crate::board::{illegal_action, AllActionsIterator, Board, BoardMoves, LegalActionsIterator, Outcome, Player};
use crate::games::go::{score, Chains, FlatTile, KoRule, Placement, Rules, Score, Tile, GO_MAX_AREA};
use crate::util::zobrist::Zobrist;

#[derive(Clone, Eq, PartialEq)]
pub struct GoBoard {
    rules: Rules,
    chains: Chains,
    state: State,
    history: Vec<GoRecord>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GoAction {
    Pass,
    Place(FlatTile),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum State {
    Normal,
    Passed,
    Done(Outcome),
}

/// Everything needed to pop an action again.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GoRecord {
    pub action: GoAction,
    /// The stone zobrist right before this action was played.
    pub zobrist_before: Zobrist,
    pub state_before: State,
    placement: Option<Placement>,
}

impl GoBoard {
    pub fn new(size: u8, rules: Rules) -> GoBoard {
        GoBoard {
            rules,
            chains: Chains::new(size),
            state: State::Normal,
            history: vec![],
        }
    }

    pub fn size(&self) -> u8 {
        self.chains.size()
    }

    pub fn area(&self) -> u16 {
        self.chains.area()
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn chains(&self) -> &Chains {
        &self.chains
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn history(&self) -> &[GoRecord] {
        &self.history
    }

    pub fn stone_at(&self, tile: Tile) -> Option<Player> {
        self.chains.stone_at(tile)
    }

    /// The area score of the current stones.
    pub fn score(&self) -> Score {
        score(&self.chains)
    }

    /// Convenience constructor for the action placing a stone on `(x, y)`.
    pub fn place_xy(&self, x: u8, y: u8) -> GoAction {
        GoAction::Place(Tile::new(x, y).to_flat(self.size()))
    }

    fn is_legal_placement(&self, tile: FlatTile) -> bool {
        if tile.index() >= self.area() {
            return false;
        }
        let sim = match self.chains.simulate(tile, self.turn()) {
            None => return false,
            Some(sim) => sim,
        };

        if sim.suicide && !self.rules.allow_suicide {
            return false;
        }

        match self.rules.ko {
            KoRule::Simple => match self.history.last() {
                // a pass did not change the stones, so there is nothing to recapture
                Some(record) if record.action != GoAction::Pass => record.zobrist_before != sim.zobrist,
                _ => true,
            },
            KoRule::PositionalSuperko => {
                // scan in reverse, repetitions are typically close in time
                sim.zobrist != self.chains.zobrist() && !self.history.iter().rev().any(|r| r.zobrist_before == sim.zobrist)
            }
        }
    }
}

impl Default for GoBoard {
    fn default() -> Self {
        GoBoard::new(9, Rules::default())
    }
}

impl Board for GoBoard {
    type Action = GoAction;

    fn len(&self) -> usize {
        self.history.len()
    }

    fn legal(&self, action: GoAction) -> bool {
        if self.is_done() {
            return false;
        }
        match action {
            GoAction::Pass => true,
            GoAction::Place(tile) => self.is_legal_placement(tile),
        }
    }

    fn append(&mut self, action: GoAction) {
        if !self.legal(action) {
            illegal_action(self, action);
        }

        let zobrist_before = self.chains.zobrist();
        let state_before = self.state;

        let placement = match action {
            GoAction::Pass => {
                self.state = match self.state {
                    State::Normal => State::Passed,
                    State::Passed => {
                        let score = self.score();
                        tracing::debug!("Go game finished after {} actions with {:?}", self.len() + 1, score);
                        State::Done(score.outcome())
                    }
                    State::Done(_) => unreachable!(),
                };
                None
            }
            GoAction::Place(tile) => {
                let placement = self.chains.place_stone(tile, self.turn());
                self.state = State::Normal;
                Some(placement)
            }
        };

        self.history.push(GoRecord {
            action,
            zobrist_before,
            state_before,
            placement,
        });
    }

    fn pop(&mut self) -> GoAction {
        let record = match self.history.pop() {
            Some(record) => record,
            None => panic!("Cannot pop from a board without history:\n{:?}", self),
        };

        if let Some(placement) = record.placement {
            self.chains.undo_placement(placement);
        }
        self.state = record.state_before;
        debug_assert_eq!(self.chains.zobrist(), record.zobrist_before);

        record.action
    }

    fn last_action(&self) -> Option<GoAction> {
        self.history.last().map(|r| r.action)
    }

    fn winner(&self) -> Option<Outcome> {
        match self.state {
            State::Normal | State::Passed => None,
            State::Done(outcome) => Some(outcome),
        }
    }

    /// Includes the stones, the next player and the pass state.
    fn zobrist(&self) -> Zobrist {
        self.chains.zobrist() ^ Zobrist::for_color_turn(self.turn()) ^ Zobrist::for_pass_state(self.state)
    }

    fn clear(&mut self) {
        *self = GoBoard::new(self.size(), self.rules);
    }
}

impl Features for GoBoard {
    fn features(&self) -> Vec<f32> {
        let mut result = FlatTile::all(self.size())
            .map(|tile| match self.chains.cell(tile) {
                None => 0.0,
                Some(player) => player.sign::<f32>(Player::A),
            })
            .collect::<Vec<_>>();
        result.push(1.0);
        result
    }
}

impl<'a> BoardMoves<'a, GoBoard> for GoBoard {
    type AllActionsIterator = AllActionsIterator<GoBoard>;
    type LegalActionsIterator = LegalActionsIterator<'a, GoBoard>;

    fn all_possible_actions() -> Self::AllActionsIterator {
        AllActionsIterator::default()
    }

    fn legal_actions(&'a self) -> Self::LegalActionsIterator {
        LegalActionsIterator(self)
    }
}

impl InternalIterator for AllActionsIterator<GoBoard> {
    type Item = GoAction;

    fn try_for_each<R, F>(self, mut f: F) -> ControlFlow<R>
    where
        F: FnMut(Self::Item) -> ControlFlow<R>,
    {
        f(GoAction::Pass)?;
        for index in 0..GO_MAX_AREA {
            f(GoAction::Place(FlatTile::new(index)))?;
        }
        ControlFlow::Continue(())
    }
}

impl InternalIterator for LegalActionsIterator<'_, GoBoard> {
    type Item = GoAction;

    fn try_for_each<R, F>(self, mut f: F) -> ControlFlow<R>
    where
        F: FnMut(Self::Item) -> ControlFlow<R>,
    {
        let board = self.board();
        if board.is_done() {
            return ControlFlow::Continue(());
        }

        f(GoAction::Pass)?;
        for tile in FlatTile::all(board.size()) {
            if board.is_legal_placement(tile) {
                f(GoAction::Place(tile))?;
            }
        }
        ControlFlow::Continue(())
    }
}

impl Hash for GoBoard {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.zobrist().hash(state);
    }
}

impl Debug for GoBoard {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GoBoard(size={}, next={:?}, state={:?}, history_len={}, stones_a={}, stones_b={}, rules={:?})\n{}",
            self.size(),
            self.turn(),
            self.state,
            self.history.len(),
            self.chains.stone_count_from(Player::A),
            self.chains.stone_count_from(Player::B),
            self.rules,
            self,
        )
    }
}

impl Display for GoBoard {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let size = self.size();
        for y in (0..size).rev() {
            write!(f, "{:2} ", y + 1)?;
            for x in 0..size {
                let c = self.stone_at(Tile::new(x, y)).map_or('.', |p| p.to_char());
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for x in 0..size {
            write!(f, "{}", Tile::new(x, 0).x_char())?;
        }
        writeln!(f)
    }
}

impl Display for GoAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GoAction::Pass => write!(f, "PASS"),
            GoAction::Place(tile) => write!(f, "{}", tile.index()),
        }
    }
}

impl FromStr for GoAction {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("pass") {
            Ok(GoAction::Pass)
        } else {
            s.parse::<u16>().map(|index| GoAction::Place(FlatTile::new(index)))
        }
    }
}
