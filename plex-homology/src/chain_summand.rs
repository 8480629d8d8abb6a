use ahash::AHashMap;

use plex::{Ring, RingOps};
use plex::chain::{Chain, Gen};
use plex_matrix::sparse::{SpVec, Trans};

use crate::{RModStr, Summand, rmod_str_symbol};

// A module structure whose ambient basis is labeled by generators.
#[derive(Clone)]
pub struct ChainSummand<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    gens: Vec<X>,
    indices: AHashMap<X, usize>,
    inner: Summand<R>
}

impl<X, R> ChainSummand<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    pub fn new(gens: Vec<X>, inner: Summand<R>) -> Self {
        let hasher = ahash::RandomState::with_seeds(0, 0, 0, 0);
        let mut indices = AHashMap::with_capacity_and_hasher(gens.len(), hasher);
        for (i, x) in gens.iter().cloned().enumerate() {
            indices.insert(x, i);
        }

        Self { gens, indices, inner }
    }

    pub fn free<I>(gens: I) -> Self
    where I: IntoIterator<Item = X> {
        let gens = gens.into_iter().collect::<Vec<_>>();
        let inner = Summand::free(gens.len());
        Self::new(gens, inner)
    }

    pub fn ngens(&self) -> usize {
        self.gens.len()
    }

    pub fn gens(&self) -> impl Iterator<Item = &X> {
        self.gens.iter()
    }

    pub fn gen(&self, i: usize) -> &X {
        &self.gens[i]
    }

    pub fn index_of(&self, x: &X) -> Option<usize> {
        self.indices.get(x).copied()
    }

    pub fn trans(&self) -> Option<&Trans<R>> {
        self.inner.trans()
    }

    pub fn vectorize(&self, z: &Chain<X, R>) -> SpVec<R> {
        let n = self.ngens();
        SpVec::from_entries(n, z.iter().map(|(x, a)| {
            let Some(i) = self.index_of(x) else {
                panic!("{x} is not a generator.")
            };
            (i, a.clone())
        }))
    }

    pub fn as_chain(&self, v: &SpVec<R>) -> Chain<X, R> {
        assert_eq!(v.dim(), self.ngens());

        v.iter_nz().map(|(i, a)|
            (self.gens[i].clone(), a.clone())
        ).collect()
    }

    // The chain representing the i-th generator of the (possibly
    // non-free) structure, expressed in the ambient basis.
    pub fn gen_chain(&self, i: usize) -> Chain<X, R> {
        let v = self.inner.gen_vec(i);
        self.as_chain(&v)
    }

    pub fn compose(&self, other: &Summand<R>) -> Self {
        let inner = self.inner.compose(other);
        Self::new(self.gens.clone(), inner)
    }
}

impl<X, R> Default for ChainSummand<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn default() -> Self {
        Self::free([])
    }
}

impl<X, R> RModStr for ChainSummand<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    type R = R;

    fn rank(&self) -> usize {
        self.inner.rank()
    }

    fn tors(&self) -> &[R] {
        self.inner.tors()
    }
}

impl<X, R> std::fmt::Display for ChainSummand<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", rmod_str_symbol(self.rank(), self.tors(), "0"))
    }
}
