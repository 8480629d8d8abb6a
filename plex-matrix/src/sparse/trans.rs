use plex::{Ring, RingOps};
use crate::MatTrait;
use crate::sparse::{SpMat, SpVec};

// A change of basis between an ambient space and a reduced one: `f` maps
// ambient coordinates forward, `b` maps reduced coordinates back, and
// f·b is the identity on the reduced side.
#[derive(Clone, Debug)]
pub struct Trans<R>
where R: Ring, for <'x> &'x R: RingOps<R> {
    f: SpMat<R>,
    b: SpMat<R>,
}

impl<R> Trans<R>
where R: Ring, for <'x> &'x R: RingOps<R> {
    pub fn new(f: SpMat<R>, b: SpMat<R>) -> Self {
        assert_eq!(f.nrows(), b.ncols());
        assert_eq!(f.ncols(), b.nrows());
        Self { f, b }
    }

    pub fn id(n: usize) -> Self {
        Self::new(SpMat::id(n), SpMat::id(n))
    }

    pub fn zero() -> Self {
        Self::id(0)
    }

    pub fn src_dim(&self) -> usize {
        self.f.ncols()
    }

    pub fn tgt_dim(&self) -> usize {
        self.f.nrows()
    }

    pub fn forward(&self, v: &SpVec<R>) -> SpVec<R> {
        assert_eq!(v.dim(), self.src_dim());
        &self.f * v
    }

    pub fn backward(&self, v: &SpVec<R>) -> SpVec<R> {
        assert_eq!(v.dim(), self.tgt_dim());
        &self.b * v
    }

    pub fn compose(&self, other: &Trans<R>) -> Trans<R> {
        assert_eq!(self.tgt_dim(), other.src_dim());
        Trans::new(&other.f * &self.f, &self.b * &other.b)
    }

    pub fn forward_mat(&self) -> SpMat<R> {
        self.f.clone()
    }

    pub fn backward_mat(&self) -> SpMat<R> {
        self.b.clone()
    }
}

impl<R> Default for Trans<R>
where R: Ring, for <'x> &'x R: RingOps<R> {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id() {
        let t = Trans::<i32>::id(5);

        let v = SpVec::from(vec![0,1,2,3,4]);

        assert_eq!(t.forward(&v), v);
        assert_eq!(t.backward(&v), v);
    }

    #[test]
    fn project_and_lift() {
        let t = Trans::<i32>::new(
            SpMat::id(5).submat_rows(0..3),
            SpMat::id(5).submat_cols(0..3),
        );

        let v = SpVec::from(vec![0,1,2,3,4]);
        let w = t.forward(&v);
        let x = t.backward(&w);

        assert_eq!(w, SpVec::from(vec![0,1,2]));
        assert_eq!(x, SpVec::from(vec![0,1,2,0,0]));
    }

    #[test]
    fn compose() {
        let t0 = Trans::<i32>::new(
            SpMat::id(5).submat_rows(0..3),
            SpMat::id(5).submat_cols(0..3),
        );
        let t1 = Trans::<i32>::new(
            SpMat::id(3).submat_rows(0..2),
            SpMat::id(3).submat_cols(0..2),
        );
        let t = t0.compose(&t1);

        assert_eq!(t.src_dim(), 5);
        assert_eq!(t.tgt_dim(), 2);

        let v = SpVec::from(vec![0,1,2,3,4]);
        assert_eq!(t.forward(&v), SpVec::from(vec![0,1]));
    }

    #[test]
    fn round_trip_is_identity() {
        let t = Trans::<i32>::new(
            SpMat::id(4).submat_rows(1..3),
            SpMat::id(4).submat_cols(1..3),
        );

        for i in 0..t.tgt_dim() {
            let e = SpVec::unit(t.tgt_dim(), i);
            assert_eq!(t.forward(&t.backward(&e)), e);
        }
    }
}
