//! Win/draw/loss bookkeeping for match results.
use crate::board::{Outcome, Player};

/// The outcome of a game from the POV of a certain player. Usually obtained using [POV::pov].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum OutcomeWDL {
    Win,
    Draw,
    Loss,
}

/// Counts (or probabilities) of wins, draws and losses.
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct WDL<V> {
    pub win: V,
    pub draw: V,
    pub loss: V,
}

/// Trait to convert an absolute outcome to a relative one.
pub trait POV {
    type Output;

    /// View this outcome from the POV of `pov`.
    fn pov(self, pov: Player) -> Self::Output;
}

pub trait Flip {
    /// Swap the roles of both players.
    fn flip(self) -> Self;
}

impl OutcomeWDL {
    /// Convert this to a WDL with a one at the correct place and zero otherwise.
    pub fn to_wdl<V: num_traits::One + num_traits::Zero>(self) -> WDL<V> {
        let (win, draw, loss) = match self {
            OutcomeWDL::Win => (V::one(), V::zero(), V::zero()),
            OutcomeWDL::Draw => (V::zero(), V::one(), V::zero()),
            OutcomeWDL::Loss => (V::zero(), V::zero(), V::one()),
        };
        WDL { win, draw, loss }
    }
}

impl<V> WDL<V> {
    pub fn new(win: V, draw: V, loss: V) -> Self {
        WDL { win, draw, loss }
    }
}

impl<V: Copy + std::ops::Add<V, Output = V>> WDL<V> {
    pub fn sum(self) -> V {
        self.win + self.draw + self.loss
    }
}

impl POV for Outcome {
    type Output = OutcomeWDL;

    fn pov(self, pov: Player) -> OutcomeWDL {
        match self {
            Outcome::WonBy(player) if player == pov => OutcomeWDL::Win,
            Outcome::WonBy(_) => OutcomeWDL::Loss,
            Outcome::Draw => OutcomeWDL::Draw,
        }
    }
}

impl<V: Copy> Flip for WDL<V> {
    fn flip(self) -> Self {
        WDL {
            win: self.loss,
            draw: self.draw,
            loss: self.win,
        }
    }
}

impl<V: Copy + std::ops::Add<V, Output = V>> std::ops::Add<WDL<V>> for WDL<V> {
    type Output = WDL<V>;

    fn add(self, rhs: WDL<V>) -> Self::Output {
        WDL {
            win: self.win + rhs.win,
            draw: self.draw + rhs.draw,
            loss: self.loss + rhs.loss,
        }
    }
}

impl<V: Copy + std::ops::Add<V, Output = V>> std::ops::AddAssign<WDL<V>> for WDL<V> {
    fn add_assign(&mut self, rhs: WDL<V>) {
        *self = *self + rhs;
    }
}

impl<V: Default + Copy + std::ops::Add<Output = V>> std::iter::Sum for WDL<V> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |a, v| a + v)
    }
}
