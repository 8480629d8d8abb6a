use ahash::AHashMap;
use itertools::Itertools;
use plex::{Ring, RingOps};
use plex_homology::{ChainComplex, ChainSummand, Grid};
use plex_matrix::sparse::SpMat;

use crate::{Error, Result, Simplex};

// A finite simplicial complex, closed under the face relation. Cells are
// partitioned by dimension; each cell has a stable index within its
// dimension, assigned on insertion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimplicialComplex {
    cells: Vec<Vec<Simplex>>,
    indices: AHashMap<Simplex, usize>
}

impl SimplicialComplex {
    pub fn new() -> Self {
        let hasher = ahash::RandomState::with_seeds(0, 0, 0, 0);
        Self {
            cells: vec![],
            indices: AHashMap::with_hasher(hasher)
        }
    }

    pub fn from_cells<I>(cells: I) -> Result<Self>
    where I: IntoIterator<Item = Simplex> {
        let mut c = Self::new();
        for s in cells {
            c.add(s, true)?;
        }
        Ok(c)
    }

    pub fn dim(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn size(&self, d: usize) -> usize {
        self.cells.get(d).map_or(0, |cs| cs.len())
    }

    pub fn total_size(&self) -> usize {
        self.cells.iter().map(|cs| cs.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self, d: usize) -> impl Iterator<Item = &Simplex> {
        self.cells.get(d).into_iter().flatten()
    }

    // all cells, in dimension order.
    pub fn iter(&self) -> impl Iterator<Item = &Simplex> {
        self.cells.iter().flatten()
    }

    pub fn cell(&self, d: usize, i: usize) -> Option<&Simplex> {
        self.cells.get(d)?.get(i)
    }

    pub fn index_of(&self, s: &Simplex) -> Option<usize> {
        self.indices.get(s).copied()
    }

    pub fn contains(&self, s: &Simplex) -> bool {
        self.indices.contains_key(s)
    }

    // Inserts `s`, returning the newly inserted cells in face-first order.
    // With `recursive` off, every proper face must already be present.
    pub fn add(&mut self, s: Simplex, recursive: bool) -> Result<Vec<Simplex>> {
        if self.contains(&s) {
            return Ok(vec![])
        }

        let mut added = vec![];

        for f in s.faces().collect_vec() {
            if self.contains(&f) {
                continue
            }
            if !recursive {
                return Err(Error::FaceMissing { face: f, cell: s })
            }
            let mut sub = self.add(f, true)?;
            added.append(&mut sub);
        }

        self.insert(s.clone());
        added.push(s);

        Ok(added)
    }

    fn insert(&mut self, s: Simplex) {
        let d = s.dim();
        if self.cells.len() <= d {
            self.cells.resize(d + 1, vec![]);
        }

        let i = self.cells[d].len();
        self.cells[d].push(s.clone());
        self.indices.insert(s, i);
    }

    // Σ_k (-1)^k (number of k-cells)
    pub fn euler_characteristic(&self) -> isize {
        self.cells.iter().enumerate().map(|(d, cs)| {
            let n = cs.len() as isize;
            if d % 2 == 0 { n } else { -n }
        }).sum()
    }

    // ∂_d as an (m × n)-matrix, m = size(d-1), n = size(d).
    pub fn boundary_matrix<R>(&self, d: usize) -> SpMat<R>
    where R: Ring, for<'x> &'x R: RingOps<R> {
        let n = self.size(d);

        if d == 0 {
            return SpMat::zero((0, n))
        }

        let m = self.size(d - 1);

        SpMat::from_entries((m, n), self.cells(d).enumerate().flat_map(|(j, s)| {
            s.boundary::<R>().into_iter().map(move |(f, a)| {
                let i = self.index_of(&f).expect("face closure");
                (i, j, a)
            }).collect_vec()
        }))
    }

    // The associated chain complex, with d_deg = -1.
    pub fn chain_complex<R>(&self) -> ChainComplex<Simplex, R>
    where R: Ring, for<'x> &'x R: RingOps<R> {
        let top = self.dim() as isize;
        let summands = Grid::generate(0 ..= top, |d|
            ChainSummand::free(self.cells(d as usize).cloned())
        );

        ChainComplex::new(summands, -1, |_, z|
            z.apply(|s| s.boundary())
        )
    }
}
