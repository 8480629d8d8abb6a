use plex::{EucRing, EucRingOps};
use plex::chain::Gen;
use plex_matrix::{SnfError, SnfSolver};

use crate::calc::HomologyCalc;
use crate::{ChainComplex, ChainSummand, Grid};

pub type HomologySummand<X, R> = ChainSummand<X, R>;
pub type Homology<X, R> = Grid<HomologySummand<X, R>>;

impl<X, R> ChainComplex<X, R>
where
    X: Gen,
    R: EucRing, for<'x> &'x R: EucRingOps<R>
{
    pub fn homology_at(&self, i: isize, with_trans: bool) -> HomologySummand<X, R> {
        let d_in  = self.d_matrix(i - self.d_deg());
        let d_out = self.d_matrix(i);
        let h = HomologyCalc::calculate(d_in, d_out, with_trans);
        self[i].compose(&h)
    }

    pub fn homology(&self, with_trans: bool) -> Homology<X, R> {
        Homology::generate(
            self.support(),
            |i| self.homology_at(i, with_trans)
        )
    }

    pub fn homology_at_with(&self, i: isize, with_trans: bool, solver: &dyn SnfSolver<R>) -> Result<HomologySummand<X, R>, SnfError> {
        let d_in  = self.d_matrix(i - self.d_deg());
        let d_out = self.d_matrix(i);
        let h = HomologyCalc::calculate_with(d_in, d_out, with_trans, solver)?;
        Ok(self[i].compose(&h))
    }

    pub fn homology_with(&self, with_trans: bool, solver: &dyn SnfSolver<R>) -> Result<Homology<X, R>, SnfError> {
        self.support().map(|i|
            self.homology_at_with(i, with_trans, solver).map(|h| (i, h))
        ).collect()
    }
}
