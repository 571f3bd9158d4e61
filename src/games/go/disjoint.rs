use std::fmt::{Debug, Formatter};

/// Weighted union-find over `0..len` that can exactly undo its most recent mutations.
///
/// There is no path compression: every mutation must be reversible from a small record,
/// and keeping the trees balanced by weight already keeps `root` cheap.
#[derive(Clone, Eq, PartialEq)]
pub struct DisjointSet {
    parent: Vec<u16>,
    /// Only meaningful at roots, where it is the number of indices in the component.
    weight: Vec<u16>,
    history: Vec<Record>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
enum Record {
    Connect {
        parent: u16,
        absorbed: u16,
    },
    Atomize {
        members: Vec<u16>,
        weights: Vec<u16>,
        parents: Vec<u16>,
    },
}

impl DisjointSet {
    pub fn new(len: u16) -> Self {
        DisjointSet {
            parent: (0..len).collect(),
            weight: vec![1; len as usize],
            history: vec![],
        }
    }

    pub fn len(&self) -> u16 {
        self.parent.len() as u16
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// The representative of the component containing `i`.
    pub fn root(&self, i: u16) -> u16 {
        let mut curr = i;
        loop {
            let next = self.parent[curr as usize];
            if next == curr {
                return curr;
            }
            curr = next;
        }
    }

    pub fn is_root(&self, i: u16) -> bool {
        self.parent[i as usize] == i
    }

    /// The number of indices in the component containing `i`.
    pub fn weight(&self, i: u16) -> u16 {
        self.weight[self.root(i) as usize]
    }

    /// Merge the components of `i` and `j` and return the new root.
    /// The heavier root absorbs the lighter one, ties are won by the root of `i`.
    pub fn connect(&mut self, i: u16, j: u16) -> u16 {
        let ri = self.root(i);
        let rj = self.root(j);
        assert_ne!(ri, rj, "Cannot connect {} and {}, they already share root {}", i, j, ri);

        let (parent, absorbed) = if self.weight[ri as usize] >= self.weight[rj as usize] {
            (ri, rj)
        } else {
            (rj, ri)
        };

        self.parent[absorbed as usize] = parent;
        self.weight[parent as usize] += self.weight[absorbed as usize];
        self.history.push(Record::Connect { parent, absorbed });

        parent
    }

    /// Revert the last operation, which must have been `connect(i, j)`.
    pub fn undo_connect(&mut self, i: u16, j: u16) {
        let (parent, absorbed) = match self.history.pop() {
            Some(Record::Connect { parent, absorbed }) => (parent, absorbed),
            other => panic!("Expected connect({}, {}) as last operation, got {:?}", i, j, other),
        };

        self.weight[parent as usize] -= self.weight[absorbed as usize];
        self.parent[absorbed as usize] = absorbed;

        let mut roots = [self.root(i), self.root(j)];
        roots.sort_unstable();
        let mut expected = [parent, absorbed];
        expected.sort_unstable();
        assert_eq!(
            roots, expected,
            "Undo mismatch: connect({}, {}) did not merge roots {} and {}",
            i, j, parent, absorbed
        );
    }

    /// Split the component containing all of `members` into singletons.
    /// `members` must be exactly one full component.
    pub fn atomize(&mut self, members: &[u16]) {
        let Some(&first) = members.first() else {
            panic!("Cannot atomize an empty component");
        };
        let root = self.root(first);
        assert!(
            members.iter().all(|&m| self.root(m) == root),
            "Members {:?} do not share a single root",
            members
        );
        assert_eq!(
            self.weight[root as usize] as usize,
            members.len(),
            "Members {:?} are not the full component of root {}",
            members,
            root
        );

        let weights = members.iter().map(|&m| self.weight[m as usize]).collect();
        let parents = members.iter().map(|&m| self.parent[m as usize]).collect();

        for &m in members {
            self.parent[m as usize] = m;
            self.weight[m as usize] = 1;
        }

        self.history.push(Record::Atomize {
            members: members.to_vec(),
            weights,
            parents,
        });
    }

    /// Revert the last operation, which must have been `atomize(members)`.
    pub fn undo_atomize(&mut self, members: &[u16]) {
        let (saved_members, weights, parents) = match self.history.pop() {
            Some(Record::Atomize {
                members,
                weights,
                parents,
            }) => (members, weights, parents),
            other => panic!("Expected atomize({:?}) as last operation, got {:?}", members, other),
        };
        assert_eq!(saved_members, members, "Undo mismatch for atomize");

        for ((&m, w), p) in members.iter().zip(weights).zip(parents) {
            self.weight[m as usize] = w;
            self.parent[m as usize] = p;
        }
    }

    pub fn clear(&mut self) {
        let len = self.len();
        *self = DisjointSet::new(len);
    }

    /// Check the weight invariant of every root.
    pub fn assert_valid(&self) {
        let mut counts = vec![0u16; self.parent.len()];
        for i in 0..self.len() {
            counts[self.root(i) as usize] += 1;
        }
        for i in 0..self.len() {
            if self.is_root(i) {
                assert_eq!(counts[i as usize], self.weight[i as usize], "Wrong weight for root {}", i);
            }
        }
    }
}

impl Debug for DisjointSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisjointSet")
            .field("parent", &self.parent)
            .field("weight", &self.weight)
            .field("history_len", &self.history.len())
            .finish()
    }
}
