use plex::{EucRing, EucRingOps};
use crate::dense::Mat;
use crate::dense::snf::snf_in_place;

#[derive(Debug, derive_more::Display)]
#[display("snf failed: {}", msg)]
pub struct SnfError {
    pub msg: String
}

impl std::error::Error for SnfError {}

// A Smith Normal Form decomposition u·b·v = s, where s is diagonal with
// the invariant factors d1 | d2 | ... followed by zeros.
#[derive(Clone, Debug)]
pub struct SmithForm<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    pub shape: (usize, usize),
    pub diag: Vec<R>,     // the nonzero invariant factors
    pub u: Mat<R>,
    pub u_inv: Mat<R>,
    pub v: Mat<R>,
    pub v_inv: Mat<R>,
}

impl<R> SmithForm<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    pub fn rank(&self) -> usize {
        self.diag.len()
    }

    pub fn factors(&self) -> &[R] {
        &self.diag
    }

    pub fn matrix(&self) -> Mat<R> {
        Mat::diag(self.shape, self.diag.iter().cloned())
    }
}

// Swappable Smith Normal Form backend.
pub trait SnfSolver<R>: Send + Sync
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    fn snf(&self, target: Mat<R>) -> Result<SmithForm<R>, SnfError>;
}

// The library-bundled solver.
#[derive(Clone, Copy, Debug, Default)]
pub struct BundledSnf;

impl<R> SnfSolver<R> for BundledSnf
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    fn snf(&self, target: Mat<R>) -> Result<SmithForm<R>, SnfError> {
        Ok(snf_in_place(target))
    }
}
