use std::fmt::{Debug, Formatter};

/// The specific Go rules used.
/// Scoring is always area scoring without komi, the game ends after two consecutive passes.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Rules {
    /// Whether a placement that leaves the mover's own group without liberties is legal.
    /// Such a group is removed from the board immediately.
    pub allow_suicide: bool,
    pub ko: KoRule,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum KoRule {
    /// A placement may not recreate the stone position from right before the opponent's last move.
    /// Only applies when that move was a placement, after a pass every otherwise legal placement is allowed.
    Simple,
    /// A placement may not recreate any stone position that occurred earlier in the game.
    PositionalSuperko,
}

impl Rules {
    const NAMED_RULES: &'static [(&'static str, Rules)] = &[
        ("SimpleKo", Rules::simple_ko()),
        ("TT", Rules::tromp_taylor()),
        ("CGOS", Rules::cgos()),
    ];

    pub const fn simple_ko() -> Self {
        Rules {
            allow_suicide: true,
            ko: KoRule::Simple,
        }
    }

    /// Tromp-Taylor rules, see <https://tromp.github.io/go.html>.
    pub const fn tromp_taylor() -> Self {
        Rules {
            allow_suicide: true,
            ko: KoRule::PositionalSuperko,
        }
    }

    /// Rules used by the [Computer Go Server](http://www.yss-aya.com/cgos/).
    /// The same as Tromp-Taylor except suicide is not allowed.
    pub const fn cgos() -> Self {
        Rules {
            allow_suicide: false,
            ko: KoRule::PositionalSuperko,
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Rules::simple_ko()
    }
}

impl Debug for Rules {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = Rules::NAMED_RULES.iter().find(|(_, r)| r == self).map(|(n, _)| n);
        if let Some(name) = name {
            write!(f, "Rules({:?})", name)
        } else {
            f.debug_struct("Rules")
                .field("allow_suicide", &self.allow_suicide)
                .field("ko", &self.ko)
                .finish()
        }
    }
}
