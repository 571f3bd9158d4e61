use std::collections::VecDeque;
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};

use itertools::Itertools;
use nohash_hasher::IntSet;

use crate::board::Player;
use crate::games::go::{DisjointSet, FlatTile, Tile, GO_MAX_SIZE};
use crate::util::zobrist::Zobrist;

/// The stones on a Go board, grouped into connected components that each track their liberties.
///
/// Components and liberties are stored per disjoint-set root. Only the root of a group of stones
/// holds non-empty sets, every other index (empty tiles and absorbed roots) holds empty sets.
/// This keeps the representation canonical, so two `Chains` reached through different
/// `place_stone`/`undo_placement` sequences compare equal iff they are structurally identical.
#[derive(Clone, Eq, PartialEq)]
pub struct Chains {
    size: u8,
    cells: Vec<Option<Player>>,
    set: DisjointSet,
    components: Vec<IntSet<u16>>,
    liberties: Vec<IntSet<u16>>,

    // derived data
    stone_count: u16,
    zobrist: Zobrist,
}

/// Everything needed to undo a [Chains::join].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct JoinRecord {
    /// The participating roots in connect order, the first one survives.
    roots: Vec<u16>,
    components: Vec<IntSet<u16>>,
    liberties: Vec<IntSet<u16>>,
}

/// Everything needed to undo a [Chains::capture].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CaptureRecord {
    pub color: Player,
    pub root: u16,
    members: Vec<u16>,
    component: IntSet<u16>,
    liberties: IntSet<u16>,
    /// `(captor_root, freed_cell)` pairs where the freed cell became a new liberty of the captor.
    grants: Vec<(u16, u16)>,
}

/// The result of [Chains::place_stone], to be passed back to [Chains::undo_placement].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Placement {
    pub tile: FlatTile,
    pub color: Player,
    /// Roots of the neighbouring groups that lost `tile` as a liberty.
    touched: Vec<u16>,
    join: Option<JoinRecord>,
    captures: Vec<CaptureRecord>,
}

/// Non-mutating preview of a placement, see [Chains::simulate].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Simulated {
    /// The stone zobrist after the placement and all resulting captures.
    pub zobrist: Zobrist,
    /// The number of enemy stones that would be captured.
    pub captured: u16,
    /// Whether the mover's own group would be left without liberties and removed.
    pub suicide: bool,
}

impl Chains {
    pub fn new(size: u8) -> Self {
        assert!(
            (1..=GO_MAX_SIZE).contains(&size),
            "Size must be in 1..={}, got {}",
            GO_MAX_SIZE,
            size
        );

        let area = size as u16 * size as u16;
        Chains {
            size,
            cells: vec![None; area as usize],
            set: DisjointSet::new(area),
            components: vec![IntSet::default(); area as usize],
            liberties: vec![IntSet::default(); area as usize],
            stone_count: 0,
            zobrist: Zobrist::default(),
        }
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn area(&self) -> u16 {
        self.size as u16 * self.size as u16
    }

    pub fn stone_count(&self) -> u16 {
        self.stone_count
    }

    pub fn stone_count_from(&self, color: Player) -> u16 {
        self.cells.iter().filter(|&&c| c == Some(color)).count() as u16
    }

    /// The zobrist hash of the stones only.
    pub fn zobrist(&self) -> Zobrist {
        self.zobrist
    }

    pub fn cell(&self, tile: FlatTile) -> Option<Player> {
        self.cells[tile.index() as usize]
    }

    pub fn stone_at(&self, tile: Tile) -> Option<Player> {
        self.cell(tile.to_flat(self.size))
    }

    pub fn root(&self, tile: FlatTile) -> u16 {
        self.set.root(tile.index())
    }

    pub fn disjoint_set(&self) -> &DisjointSet {
        &self.set
    }

    /// The stones of the group `tile` belongs to, empty for an empty tile.
    pub fn component(&self, tile: FlatTile) -> &IntSet<u16> {
        &self.components[self.root(tile) as usize]
    }

    /// The liberties of the group `tile` belongs to, empty for an empty tile.
    pub fn liberties(&self, tile: FlatTile) -> &IntSet<u16> {
        &self.liberties[self.root(tile) as usize]
    }

    /// Iterator over all groups currently on the board as `(root, color)`.
    pub fn groups(&self) -> impl Iterator<Item = (u16, Player)> + '_ {
        (0..self.area()).filter_map(move |i| {
            let color = self.cells[i as usize]?;
            self.set.is_root(i).then_some((i, color))
        })
    }

    fn adjacent(&self, index: u16) -> impl Iterator<Item = u16> + Clone {
        FlatTile::new(index).all_adjacent(self.size).map(FlatTile::index)
    }

    /// The distinct roots of the stone groups adjacent to `index`, in neighbour order.
    fn adjacent_roots(&self, index: u16) -> Vec<u16> {
        self.adjacent(index)
            .filter(|&adj| self.cells[adj as usize].is_some())
            .map(|adj| self.set.root(adj))
            .unique()
            .collect()
    }

    /// Merge the groups with the given roots into a single group.
    /// The roots are connected in order of descending weight, so the heaviest root survives.
    pub fn join(&mut self, roots: &[u16]) -> JoinRecord {
        assert!(roots.len() >= 2, "Join needs at least two roots, got {:?}", roots);

        let mut roots = roots.to_vec();
        roots.sort_by_key(|&r| std::cmp::Reverse(self.set.weight(r)));

        let components = roots
            .iter()
            .map(|&r| std::mem::take(&mut self.components[r as usize]))
            .collect_vec();
        let liberties = roots
            .iter()
            .map(|&r| std::mem::take(&mut self.liberties[r as usize]))
            .collect_vec();

        let first = roots[0];
        for &other in &roots[1..] {
            let survivor = self.set.connect(first, other);
            debug_assert_eq!(survivor, first);
        }

        let merged_components = components.iter().flatten().copied().collect();
        let merged_liberties = liberties.iter().flatten().copied().collect();
        self.components[first as usize] = merged_components;
        self.liberties[first as usize] = merged_liberties;

        JoinRecord {
            roots,
            components,
            liberties,
        }
    }

    fn undo_join(&mut self, record: JoinRecord) {
        let JoinRecord {
            roots,
            components,
            liberties,
        } = record;

        let first = roots[0];
        for &other in roots[1..].iter().rev() {
            self.set.undo_connect(first, other);
        }

        for ((root, component), liberties) in roots.into_iter().zip(components).zip(liberties) {
            self.components[root as usize] = component;
            self.liberties[root as usize] = liberties;
        }
    }

    /// Remove the group with the given root from the board.
    /// Every freed cell becomes a liberty of each distinct neighbouring group.
    pub fn capture(&mut self, root: u16) -> CaptureRecord {
        assert!(self.set.is_root(root), "Index {} is not a root", root);
        let color = match self.cells[root as usize] {
            Some(color) => color,
            None => panic!("Cannot capture empty tile {}", root),
        };

        let component = std::mem::take(&mut self.components[root as usize]);
        let liberties = std::mem::take(&mut self.liberties[root as usize]);
        let members = component.iter().copied().sorted().collect_vec();

        for &m in &members {
            self.cells[m as usize] = None;
            self.zobrist ^= Zobrist::for_color_tile(color, FlatTile::new(m));
        }
        self.stone_count -= members.len() as u16;
        self.set.atomize(&members);

        let mut grants = vec![];
        for &m in &members {
            for captor in self.adjacent_roots(m) {
                if self.liberties[captor as usize].insert(m) {
                    grants.push((captor, m));
                }
            }
        }

        tracing::debug!("Captured {:?} group of {} stones at root {}", color, members.len(), root);

        CaptureRecord {
            color,
            root,
            members,
            component,
            liberties,
            grants,
        }
    }

    fn undo_capture(&mut self, record: CaptureRecord) {
        let CaptureRecord {
            color,
            root,
            members,
            component,
            liberties,
            grants,
        } = record;

        for &(captor, cell) in grants.iter().rev() {
            let removed = self.liberties[captor as usize].remove(&cell);
            debug_assert!(removed);
        }

        self.set.undo_atomize(&members);
        for &m in &members {
            self.cells[m as usize] = Some(color);
            self.zobrist ^= Zobrist::for_color_tile(color, FlatTile::new(m));
        }
        self.stone_count += members.len() as u16;

        self.components[root as usize] = component;
        self.liberties[root as usize] = liberties;
    }

    /// Place a stone of `color` on the empty `tile` and resolve merges and captures:
    /// 1. the stone becomes a single-stone group with its empty neighbours as liberties,
    /// 2. `tile` is removed from the liberties of every neighbouring group,
    /// 3. friendly neighbouring groups are joined with the new stone,
    /// 4. enemy neighbouring groups without liberties are captured, in neighbour order,
    /// 5. if the mover's group has no liberties left it is captured too.
    ///
    /// Panics if `tile` is occupied.
    pub fn place_stone(&mut self, tile: FlatTile, color: Player) -> Placement {
        let index = tile.index();
        assert!(
            self.cells[index as usize].is_none(),
            "Cannot place {:?} stone on occupied tile {:?}",
            color,
            tile.to_tile(self.size)
        );

        self.cells[index as usize] = Some(color);
        self.zobrist ^= Zobrist::for_color_tile(color, tile);
        self.stone_count += 1;
        self.components[index as usize].insert(index);
        let own_liberties = self
            .adjacent(index)
            .filter(|&adj| self.cells[adj as usize].is_none())
            .collect();
        self.liberties[index as usize] = own_liberties;

        let touched = self.adjacent_roots(index);
        for &root in &touched {
            let removed = self.liberties[root as usize].remove(&index);
            debug_assert!(removed, "Neighbour group {} did not have {} as a liberty", root, index);
        }

        let (friendly, enemy): (Vec<u16>, Vec<u16>) = touched
            .iter()
            .copied()
            .partition(|&root| self.cells[root as usize] == Some(color));

        let join = if friendly.is_empty() {
            None
        } else {
            let roots = std::iter::once(index).chain(friendly).collect_vec();
            Some(self.join(&roots))
        };

        let mut captures = vec![];
        for root in enemy {
            if self.liberties[root as usize].is_empty() {
                captures.push(self.capture(root));
            }
        }

        let own_root = self.set.root(index);
        if self.liberties[own_root as usize].is_empty() {
            captures.push(self.capture(own_root));
        }

        Placement {
            tile,
            color,
            touched,
            join,
            captures,
        }
    }

    /// Exactly revert `placement`, which must be the most recent placement on these chains.
    pub fn undo_placement(&mut self, placement: Placement) {
        let Placement {
            tile,
            color,
            touched,
            join,
            captures,
        } = placement;
        let index = tile.index();

        for capture in captures.into_iter().rev() {
            self.undo_capture(capture);
        }
        if let Some(join) = join {
            self.undo_join(join);
        }
        for &root in touched.iter().rev() {
            self.liberties[root as usize].insert(index);
        }

        debug_assert_eq!(self.cells[index as usize], Some(color));
        self.cells[index as usize] = None;
        self.zobrist ^= Zobrist::for_color_tile(color, tile);
        self.stone_count -= 1;
        self.components[index as usize].clear();
        self.liberties[index as usize].clear();
    }

    /// Compute the effect of placing a stone without modifying anything.
    /// Returns `None` if `tile` is occupied.
    pub fn simulate(&self, tile: FlatTile, color: Player) -> Option<Simulated> {
        let index = tile.index();
        if self.cells[index as usize].is_some() {
            return None;
        }

        let mut zobrist = self.zobrist ^ Zobrist::for_color_tile(color, tile);
        let mut captured = 0;
        let mut has_liberty = false;
        let mut friendly = vec![];

        for adj in self.adjacent(index) {
            match self.cells[adj as usize] {
                None => has_liberty = true,
                Some(adj_color) => {
                    let root = self.set.root(adj);
                    let libs = &self.liberties[root as usize];

                    if adj_color == color {
                        if !friendly.contains(&root) {
                            friendly.push(root);
                            has_liberty |= libs.iter().any(|&lib| lib != index);
                        }
                    } else if libs.len() == 1 && !self.is_counted(root, index, adj) {
                        debug_assert!(libs.contains(&index));
                        captured += self.components[root as usize].len() as u16;
                        zobrist ^= self.group_zobrist(root, adj_color);
                    }
                }
            }
        }

        let suicide = captured == 0 && !has_liberty;
        if suicide {
            zobrist ^= Zobrist::for_color_tile(color, tile);
            for &root in &friendly {
                zobrist ^= self.group_zobrist(root, color);
            }
        }

        Some(Simulated {
            zobrist,
            captured,
            suicide,
        })
    }

    /// Whether an earlier neighbour of `index` (before `adj`) already belongs to `root`.
    fn is_counted(&self, root: u16, index: u16, adj: u16) -> bool {
        self.adjacent(index)
            .take_while(|&prev| prev != adj)
            .any(|prev| self.cells[prev as usize].is_some() && self.set.root(prev) == root)
    }

    fn group_zobrist(&self, root: u16, color: Player) -> Zobrist {
        self.components[root as usize]
            .iter()
            .fold(Zobrist::default(), |acc, &m| acc ^ Zobrist::for_color_tile(color, FlatTile::new(m)))
    }

    /// Check all derived data against a brute-force recomputation, panicking on any mismatch.
    pub fn assert_valid(&self) {
        let area = self.area();
        self.set.assert_valid();

        let mut visited = vec![false; area as usize];
        let mut zobrist = Zobrist::default();
        let mut stone_count = 0;

        for start in 0..area {
            let color = match self.cells[start as usize] {
                None => {
                    assert!(self.set.is_root(start), "Empty tile {} is not a root", start);
                    assert_eq!(self.set.weight(start), 1, "Empty tile {} has weight", start);
                    continue;
                }
                Some(color) => color,
            };
            zobrist ^= Zobrist::for_color_tile(color, FlatTile::new(start));
            stone_count += 1;

            if visited[start as usize] {
                continue;
            }

            // flood fill the group
            let mut component = IntSet::default();
            let mut liberties = IntSet::default();
            let mut todo = VecDeque::new();
            todo.push_back(start);
            visited[start as usize] = true;

            while let Some(curr) = todo.pop_front() {
                component.insert(curr);
                for adj in self.adjacent(curr) {
                    match self.cells[adj as usize] {
                        None => {
                            liberties.insert(adj);
                        }
                        Some(adj_color) if adj_color == color && !visited[adj as usize] => {
                            visited[adj as usize] = true;
                            todo.push_back(adj);
                        }
                        Some(_) => {}
                    }
                }
            }

            let root = self.set.root(start);
            assert!(
                component.iter().all(|&m| self.set.root(m) == root),
                "Group at {} does not share a single root\n{}",
                start,
                self
            );
            assert_eq!(self.set.weight(root) as usize, component.len(), "Wrong weight for group {}", root);
            assert_eq!(self.components[root as usize], component, "Wrong component for group {}", root);
            assert_eq!(self.liberties[root as usize], liberties, "Wrong liberties for group {}", root);
            assert!(!liberties.is_empty(), "Group {} has no liberties\n{}", root, self);
        }

        for i in 0..area {
            let is_group_root = self.cells[i as usize].is_some() && self.set.is_root(i);
            if !is_group_root {
                assert!(self.components[i as usize].is_empty(), "Stale component at {}", i);
                assert!(self.liberties[i as usize].is_empty(), "Stale liberties at {}", i);
            }
        }

        assert_eq!(self.stone_count, stone_count, "Wrong stone count");
        assert_eq!(self.zobrist, zobrist, "Invalid zobrist hash");
    }
}

impl Placement {
    pub fn captured_stones(&self) -> u16 {
        self.captures
            .iter()
            .filter(|c| c.color != self.color)
            .map(|c| c.members.len() as u16)
            .sum()
    }

    pub fn is_suicide(&self) -> bool {
        self.captures.iter().any(|c| c.color == self.color)
    }

    pub fn captures(&self) -> &[CaptureRecord] {
        &self.captures
    }
}

impl CaptureRecord {
    pub fn members(&self) -> &[u16] {
        &self.members
    }
}

impl Hash for Chains {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.zobrist.hash(state);
    }
}

impl Debug for Chains {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Chains(size={}, stones={}, groups={}, zobrist={:?})",
            self.size,
            self.stone_count,
            self.groups().count(),
            self.zobrist
        )
    }
}

impl Display for Chains {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Chains {{")?;
        let size = self.size;
        for y in (0..size).rev() {
            write!(f, "  {:2} ", y + 1)?;
            for x in 0..size {
                let index = Tile::new(x, y).to_flat(size).index();
                match self.cells[index as usize] {
                    None => write!(f, "   .")?,
                    Some(_) => write!(f, "{:4}", self.set.root(index))?,
                }
            }
            writeln!(f)?;
        }

        for (root, color) in self.groups() {
            writeln!(
                f,
                "  group {}: {:?} stones={:?} liberties={:?}",
                root,
                color,
                self.components[root as usize].iter().sorted().collect_vec(),
                self.liberties[root as usize].iter().sorted().collect_vec(),
            )?;
        }
        write!(f, "}}")
    }
}
