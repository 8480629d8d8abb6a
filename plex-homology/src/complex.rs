use std::ops::Index;
use std::sync::Arc;

use delegate::delegate;
use plex::{Ring, RingOps};
use plex::chain::{Chain, Gen};
use plex_matrix::sparse::{SpMat, SpVec};

use crate::{Grid, GridIter, ChainSummand, RModStr};

#[cfg(feature = "multithread")]
use rayon::prelude::{IntoParallelIterator, ParallelIterator};

pub type ChainComplexSummand<X, R> = ChainSummand<X, R>;

// A chain complex whose summands are freely generated and whose
// differential is given degree-wise on chains.
pub struct ChainComplex<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    summands: Grid<ChainComplexSummand<X, R>>,
    d_deg: isize,
    d_map: Arc<dyn Fn(isize, &Chain<X, R>) -> Chain<X, R> + Send + Sync>,
}

impl<X, R> ChainComplex<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>,
{
    pub fn new<F>(summands: Grid<ChainComplexSummand<X, R>>, d_deg: isize, d_map: F) -> Self
    where F: Fn(isize, &Chain<X, R>) -> Chain<X, R> + Send + Sync + 'static {
        assert!(summands.iter().all(|(_, s)| s.is_free()));

        let d_map = Arc::new(d_map);
        Self { summands, d_deg, d_map }
    }

    pub fn summands(&self) -> &Grid<ChainComplexSummand<X, R>> {
        &self.summands
    }

    delegate! {
        to self.summands {
            pub fn support(&self) -> GridIter;
            pub fn is_supported(&self, i: isize) -> bool;
        }
    }

    pub fn rank(&self, i: isize) -> usize {
        self[i].ngens()
    }

    pub fn d_deg(&self) -> isize {
        self.d_deg
    }

    pub fn d(&self, i: isize, z: &Chain<X, R>) -> Chain<X, R> {
        (self.d_map)(i, z)
    }

    pub fn d_matrix(&self, i: isize) -> SpMat<R> {
        let m = self[i + self.d_deg].ngens();
        let n = self[i].ngens();

        cfg_if::cfg_if! {
            if #[cfg(feature = "multithread")] {
                let cols = (0..n).into_par_iter().map(|j|
                    self.d_matrix_col(i, j)
                ).collect::<Vec<_>>();
                SpMat::from_col_vecs(m, cols)
            } else {
                let cols = (0..n).map(|j|
                    self.d_matrix_col(i, j)
                );
                SpMat::from_col_vecs(m, cols)
            }
        }
    }

    fn d_matrix_col(&self, i: isize, j: usize) -> SpVec<R> {
        let z = Chain::from(self[i].gen(j).clone());
        let w = self.d(i, &z);
        self[i + self.d_deg].vectorize(&w)
    }

    pub fn check_d_at(&self, i0: isize) {
        let i1 = i0 + self.d_deg;
        if !(self.is_supported(i0) && self.is_supported(i1)) {
            return
        }

        let d0 = self.d_matrix(i0);
        let d1 = self.d_matrix(i1);
        let res = d1 * d0;

        assert!( res.is_zero(), "d² is non-zero at {i0}." );
    }

    pub fn check_d_all(&self) {
        for i in self.support() {
            self.check_d_at(i);
        }
    }
}

impl<X, R> Index<isize> for ChainComplex<X, R>
where X: Gen, R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = ChainComplexSummand<X, R>;
    fn index(&self, i: isize) -> &Self::Output {
        self.summands.get(i)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use derive_more::Display;
    use num_traits::Zero;
    use plex::Elem;
    use plex_matrix::MatTrait;
    use super::*;

    #[derive(Debug, Display, Default, Hash, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
    #[display("e({},{})", _0, _1)]
    pub struct EnumGen(pub isize, pub usize);

    impl Elem for EnumGen {
        fn math_symbol() -> String {
            "E".into()
        }
    }

    impl Gen for EnumGen {}

    pub fn from_mats<R>(d_deg: isize, offset: isize, mats: Vec<SpMat<R>>) -> ChainComplex<EnumGen, R>
    where R: Ring, for<'x> &'x R: RingOps<R> {
        let n = mats.len() as isize;
        let range = offset .. offset + n;

        let summands = Grid::generate(range.clone(), |i| {
            let c = (i - offset) as usize;
            let r = mats[c].ncols();
            ChainSummand::free((0..r).map(|j| EnumGen(i, j)))
        });

        let lookup = Grid::generate(range, |i| {
            let c = (i - offset) as usize;
            mats[c].clone()
        });

        let summands2 = summands.clone();
        ChainComplex::new(
            summands, d_deg,
            move |i, z| {
                let d = &lookup[i];
                let v = summands2[i].vectorize(z);
                let dv = d * v;
                summands2[i + d_deg].as_chain(&dv)
            }
        )
    }

    fn mat<R>(shape: (usize, usize), entries: Vec<i32>) -> SpMat<R>
    where R: Ring + From<i32>, for<'x> &'x R: RingOps<R> {
        SpMat::from_dense_data(shape, entries.into_iter().map(|x| R::from(x)))
    }

    // the boundary of a solid tetrahedron
    pub fn s2_complex<R>() -> ChainComplex<EnumGen, R>
    where R: Ring + From<i32>, for<'x> &'x R: RingOps<R> {
        from_mats(-1, 0, vec![
            mat((0, 4), vec![]),
            mat((4, 6), vec![-1, -1, 0, -1, 0, 0, 1, 0, -1, 0, -1, 0, 0, 1, 1, 0, 0, -1, 0, 0, 0, 1, 1, 1]),
            mat((6, 4), vec![1, 1, 0, 0, -1, 0, 1, 0, 1, 0, 0, 1, 0, -1, -1, 0, 0, 1, 0, -1, 0, 0, 1, 1]),
        ])
    }

    #[test]
    fn ranks() {
        let c = s2_complex::<i64>();

        assert_eq!(c.rank(0), 4);
        assert_eq!(c.rank(1), 6);
        assert_eq!(c.rank(2), 4);
        assert_eq!(c.rank(3), 0);
    }

    #[test]
    fn d_squared() {
        let c = s2_complex::<i64>();
        c.check_d_all();
    }

    #[test]
    fn d_matrix() {
        let c = s2_complex::<i64>();
        let d1 = c.d_matrix(1);
        assert_eq!(d1.shape(), (4, 6));
    }

    #[test]
    fn d_of_chain() {
        let c = s2_complex::<i64>();
        let z = Chain::from(EnumGen(1, 0));
        let dz = c.d(1, &z);

        assert!(!dz.is_zero());
        assert_eq!(dz, Chain::from_iter([(EnumGen(0, 0), -1), (EnumGen(0, 1), 1)]));
    }
}
