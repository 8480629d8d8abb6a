use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use nalgebra::{ClosedAdd, ClosedSub, ClosedMul, Scalar};
use nalgebra_sparse::CscMatrix;
use num_traits::{Zero, One};
use auto_impl_ops::auto_ops;
use super::sp_mat::SpMat;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpVec<R> {
    inner: CscMatrix<R> // ncols == 1
}

impl<R> SpVec<R> {
    fn new(inner: CscMatrix<R>) -> Self {
        assert_eq!(inner.ncols(), 1);
        Self { inner }
    }

    pub(crate) fn into_inner(self) -> CscMatrix<R> {
        self.inner
    }

    pub fn zero(dim: usize) -> Self {
        let inner = CscMatrix::zeros(dim, 1);
        Self::new(inner)
    }

    pub fn is_zero(&self) -> bool
    where R: Zero {
        self.inner.values().iter().all(|a| a.is_zero())
    }

    pub fn unit(n: usize, i: usize) -> Self
    where R: One {
        let inner = CscMatrix::try_from_csc_data(
            n, 1,
            vec![0, 1],
            vec![i],
            vec![R::one()]
        ).unwrap();

        Self::new(inner)
    }

    pub fn dim(&self) -> usize {
        self.inner.nrows()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &R)> {
        self.inner.triplet_iter().map(|(i, _, a)| (i, a))
    }

    pub fn iter_nz(&self) -> impl Iterator<Item = (usize, &R)>
    where R: Zero {
        self.iter().filter(|(_, a)| !a.is_zero())
    }

    pub fn into_vec(self) -> Vec<R>
    where R: Clone + Zero {
        self.into()
    }

    pub fn to_dense(&self) -> Vec<R>
    where R: Clone + Zero {
        let mut vec = vec![R::zero(); self.dim()];
        for (i, a) in self.iter_nz() {
            vec[i] = a.clone();
        }
        vec
    }
}

impl<R> From<Vec<R>> for SpVec<R>
where R: Scalar + Zero + ClosedAdd {
    fn from(vec: Vec<R>) -> Self {
        Self::from_entries(vec.len(), vec.into_iter().enumerate())
    }
}

impl<R> From<SpVec<R>> for Vec<R>
where R: Clone + Zero {
    fn from(value: SpVec<R>) -> Self {
        value.to_dense()
    }
}

// SpVec(n) as SpMat(n, 1)
impl<R> From<SpVec<R>> for SpMat<R> {
    fn from(vec: SpVec<R>) -> Self {
        SpMat::from(vec.into_inner())
    }
}

impl<R> SpMat<R> {
    pub fn into_spvec(self) -> SpVec<R> {
        assert_eq!(self.inner().ncols(), 1);
        SpVec::new(self.into_inner())
    }
}

impl<R> SpVec<R>
where R: Scalar + Zero + ClosedAdd {
    pub fn from_entries<T>(dim: usize, entries: T) -> Self
    where T: IntoIterator<Item = (usize, R)> {
        SpMat::from_entries(
            (dim, 1),
            entries.into_iter().map(|(i, a)| (i, 0, a))
        ).into_spvec()
    }
}

impl<R> Default for SpVec<R> {
    fn default() -> Self {
        Self::zero(0)
    }
}

impl<R> Neg for SpVec<R>
where R: Scalar + Neg<Output = R> {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.inner)
    }
}

impl<R> Neg for &SpVec<R>
where R: Scalar + Neg<Output = R> {
    type Output = SpVec<R>;
    fn neg(self) -> Self::Output {
        SpVec::new(-&self.inner)
    }
}

macro_rules! impl_binop {
    ($trait:ident, $method:ident) => {
        #[auto_ops]
        impl<'a, 'b, R> $trait<&'b SpVec<R>> for &'a SpVec<R>
        where R: Scalar + ClosedAdd + ClosedSub + ClosedMul + Zero + One + Neg<Output = R> {
            type Output = SpVec<R>;
            fn $method(self, rhs: &'b SpVec<R>) -> Self::Output {
                let res = (&self.inner).$method(&rhs.inner);
                SpVec::new(res)
            }
        }
    };
}

impl_binop!(Add, add);
impl_binop!(Sub, sub);

#[auto_ops(val_val, val_ref, ref_val)]
impl<'a, 'b, R> Mul<&'b SpVec<R>> for &'a SpMat<R>
where R: Scalar + ClosedAdd + ClosedSub + ClosedMul + Zero + One + Neg<Output = R> {
    type Output = SpVec<R>;
    fn mul(self, rhs: &'b SpVec<R>) -> Self::Output {
        let res = self.inner() * &rhs.inner;
        SpVec::new(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init() {
        let v = SpVec::from(vec![0, 1, 0, 2]);
        assert_eq!(v.dim(), 4);
        assert_eq!(v.to_dense(), vec![0, 1, 0, 2]);
    }

    #[test]
    fn zero() {
        let v: SpVec<i32> = SpVec::zero(3);
        assert!(v.is_zero());
        assert_eq!(v.dim(), 3);
    }

    #[test]
    fn unit() {
        let v: SpVec<i32> = SpVec::unit(3, 1);
        assert_eq!(v.to_dense(), vec![0, 1, 0]);
    }

    #[test]
    fn from_entries() {
        let v = SpVec::from_entries(4, [(0, 1), (2, 3)]);
        assert_eq!(v.to_dense(), vec![1, 0, 3, 0]);
    }

    #[test]
    fn add() {
        let v = SpVec::from(vec![1, 0, 2]);
        let w = SpVec::from(vec![0, 3, -2]);
        assert_eq!((v + w).to_dense(), vec![1, 3, 0]);
    }

    #[test]
    fn mat_mul_vec() {
        let a = SpMat::from_dense_data((2, 3), [1,2,3,4,5,6]);
        let v = SpVec::from(vec![1, 0, -1]);
        let w = &a * &v;
        assert_eq!(w.to_dense(), vec![-2, -2]);
    }
}
