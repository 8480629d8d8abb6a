use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Range, Sub, SubAssign};
use std::iter::zip;
use std::fmt::{Display, Debug};
use delegate::delegate;
use nalgebra::{ClosedAdd, ClosedSub, ClosedMul, Scalar};
use nalgebra_sparse::{CscMatrix, CooMatrix};
use num_traits::{Zero, One};
use auto_impl_ops::auto_ops;
use crate::MatTrait;
use crate::dense::Mat;
use super::sp_vec::SpVec;

#[derive(Clone, PartialEq, Eq)]
pub struct SpMat<R> {
    inner: CscMatrix<R>
}

impl<R> MatTrait for SpMat<R> {
    fn shape(&self) -> (usize, usize) {
        (self.inner.nrows(), self.inner.ncols())
    }
}

impl<R> SpMat<R> {
    pub(crate) fn inner(&self) -> &CscMatrix<R> {
        &self.inner
    }

    pub(crate) fn into_inner(self) -> CscMatrix<R> {
        self.inner
    }

    pub fn disassemble(self) -> (Vec<usize>, Vec<usize>, Vec<R>) {
        self.inner.disassemble()
    }

    pub fn zero(shape: (usize, usize)) -> Self {
        let csc = CscMatrix::zeros(shape.0, shape.1);
        Self::from(csc)
    }

    pub fn is_zero(&self) -> bool
    where R: Zero {
        self.inner.values().iter().all(|a| a.is_zero())
    }

    pub fn id(n: usize) -> Self
    where R: Scalar + One {
        let csc = CscMatrix::identity(n);
        Self::from(csc)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &R)> {
        self.inner.triplet_iter()
    }

    pub fn nnz(&self) -> usize {
        self.inner.nnz()
    }

    pub fn into_dense(self) -> Mat<R>
    where R: Scalar + Zero + ClosedAdd {
        self.into()
    }
}

impl<R> SpMat<R>
where R: Scalar + Clone + Zero + ClosedAdd {
    pub fn from_entries<T>(shape: (usize, usize), entries: T) -> Self
    where T: IntoIterator<Item = (usize, usize, R)> {
        let mut coo = CooMatrix::new(shape.0, shape.1);
        for (i, j, a) in entries {
            if a.is_zero() {
                continue;
            }
            coo.push(i, j, a)
        }
        let csc = CscMatrix::from(&coo);
        Self::from(csc)
    }

    pub fn from_col_vecs<I>(nrows: usize, vecs: I) -> Self
    where I: IntoIterator<Item = SpVec<R>> {
        let mut col_offsets = vec![0];
        let mut row_indices = vec![];
        let mut values = vec![];

        for v in vecs.into_iter() {
            assert_eq!(nrows, v.dim());
            let (_, mut v_rows, mut v_values) = v.into_inner().disassemble();

            row_indices.append(&mut v_rows);
            values.append(&mut v_values);
            col_offsets.push(row_indices.len());
        }

        let ncols = col_offsets.len() - 1;
        let csc = CscMatrix::try_from_csc_data(nrows, ncols, col_offsets, row_indices, values).unwrap();
        Self::from(csc)
    }

    pub fn from_dense_data<I>(shape: (usize, usize), data: I) -> Self
    where I: IntoIterator<Item = R> {
        let n = shape.1;
        Self::from_entries(
            shape,
            data.into_iter().enumerate().map(|(k, a)| {
                let (i, j) = (k / n, k % n);
                (i, j, a)
            })
        )
    }

    pub fn col_vec(&self, j: usize) -> SpVec<R> {
        let col = self.inner.col(j);
        let iter = Iterator::zip(
            col.row_indices().iter().cloned(),
            col.values().iter().cloned()
        );
        SpVec::from_entries(self.nrows(), iter)
    }

    pub fn extract<F>(&self, shape: (usize, usize), f: F) -> SpMat<R>
    where F: Fn(usize, usize) -> Option<(usize, usize)> {
        SpMat::from_entries(shape, self.iter().filter_map(|(i, j, a)|
            f(i, j).map(|(i, j)| (i, j, a.clone()))
        ))
    }

    pub fn submat(&self, rows: Range<usize>, cols: Range<usize>) -> SpMat<R> {
        let (i0, i1) = (rows.start, rows.end);
        let (j0, j1) = (cols.start, cols.end);

        assert!(i0 <= i1 && i1 <= self.nrows());
        assert!(j0 <= j1 && j1 <= self.ncols());

        let shape = (i1 - i0, j1 - j0);
        self.extract(shape, |i, j|
            (rows.contains(&i) && cols.contains(&j)).then( ||
                (i - i0, j - j0)
            )
        )
    }

    pub fn submat_rows(&self, rows: Range<usize>) -> SpMat<R> {
        let n = self.ncols();
        self.submat(rows, 0 .. n)
    }

    pub fn submat_cols(&self, cols: Range<usize>) -> SpMat<R> {
        let m = self.nrows();
        self.submat(0 .. m, cols)
    }

    pub fn combine_blocks(blocks: [&SpMat<R>; 4]) -> SpMat<R> {
        let [a, b, c, d] = blocks;

        assert_eq!(a.nrows(), b.nrows());
        assert_eq!(c.nrows(), d.nrows());
        assert_eq!(a.ncols(), c.ncols());
        assert_eq!(b.ncols(), d.ncols());

        let (m, n) = (a.nrows() + c.nrows(), a.ncols() + b.ncols());
        let (k, l) = a.shape();

        let entries = zip(
            [a, b, c, d],
            [(0,0), (0,l), (k,0), (k,l)]
        ).flat_map(|(x, (di, dj))|
            x.iter().map(move |(i, j, r)|
                (i + di, j + dj, r.clone())
            )
        );

        Self::from_entries((m, n), entries)
    }

    pub fn concat(&self, b: &Self) -> Self {
        let zero = |m, n| SpMat::<R>::zero((m, n));
        Self::combine_blocks([
            self,
            b,
            &zero(0, self.ncols()),
            &zero(0, b.ncols())
        ])
    }

    pub fn stack(&self, b: &Self) -> Self {
        let zero = |m, n| SpMat::<R>::zero((m, n));
        Self::combine_blocks([
            self,
            &zero(self.nrows(), 0),
            b,
            &zero(b.nrows(), 0)
        ])
    }
}

impl<R> From<CscMatrix<R>> for SpMat<R> {
    fn from(inner: CscMatrix<R>) -> Self {
        Self { inner }
    }
}

impl<R> From<Mat<R>> for SpMat<R>
where R: Scalar + Zero {
    fn from(value: Mat<R>) -> Self {
        let csc = CscMatrix::from(value.inner());
        Self::from(csc)
    }
}

impl<R> From<SpMat<R>> for Mat<R>
where R: Scalar + Zero + ClosedAdd {
    fn from(value: SpMat<R>) -> Self {
        let inner = nalgebra::DMatrix::from(&value.inner);
        Self::from(inner)
    }
}

impl<R> Default for SpMat<R> {
    fn default() -> Self {
        Self::zero((0, 0))
    }
}

impl<R> Neg for SpMat<R>
where R: Scalar + Neg<Output = R> {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::from(-self.inner)
    }
}

impl<R> Neg for &SpMat<R>
where R: Scalar + Neg<Output = R> {
    type Output = SpMat<R>;
    fn neg(self) -> Self::Output {
        SpMat::from(-&self.inner)
    }
}

// see: nalgebra_sparse::ops::impl_std_ops.
macro_rules! impl_binop {
    ($trait:ident, $method:ident) => {
        #[auto_ops]
        impl<'a, 'b, R> $trait<&'b SpMat<R>> for &'a SpMat<R>
        where R: Scalar + ClosedAdd + ClosedSub + ClosedMul + Zero + One + Neg<Output = R> {
            type Output = SpMat<R>;
            fn $method(self, rhs: &'b SpMat<R>) -> Self::Output {
                let res = (&self.inner).$method(&rhs.inner);
                SpMat::from(res)
            }
        }
    };
}

impl_binop!(Add, add);
impl_binop!(Sub, sub);
impl_binop!(Mul, mul);

impl<R> Display for SpMat<R>
where R: Display + Debug {
    delegate! { to self.inner {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result;
    }}
}

impl<R> Debug for SpMat<R>
where R: Display + Debug {
    delegate! { to self.inner {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result;
    }}
}

#[cfg(test)]
pub(super) mod tests {
    use super::*;

    #[test]
    fn init() {
        let a = SpMat::from_entries((2, 2), [
            (0, 0, 1),
            (0, 1, 2),
            (1, 0, 3),
            (1, 1, 4)
        ]);
        assert_eq!(a.disassemble(), (vec![0, 2, 4], vec![0, 1, 0, 1], vec![1, 3, 2, 4]));
    }

    #[test]
    fn from_dense_data() {
        let a = SpMat::from_dense_data((2, 2), [1,2,3,4]);
        assert_eq!(a.disassemble(), (vec![0, 2, 4], vec![0, 1, 0, 1], vec![1, 3, 2, 4]));
    }

    #[test]
    fn zero_entries_skipped() {
        let a = SpMat::from_dense_data((2, 2), [1,0,0,4]);
        assert_eq!(a.nnz(), 2);
    }

    #[test]
    fn into_dense() {
        let a = SpMat::from_entries((2, 2), [
            (0, 0, 1),
            (0, 1, 2),
            (1, 0, 3),
            (1, 1, 4)
        ]);
        assert_eq!(a.into_dense(), Mat::from_data((2, 2), [1,2,3,4]));
    }

    #[test]
    fn col_vec() {
        let a = SpMat::from_dense_data((3, 2), [1,2,0,4,5,0]);
        let v = a.col_vec(1);
        assert_eq!(v, SpVec::from(vec![2, 4, 0]));
    }

    #[test]
    fn submat() {
        let a = SpMat::from_dense_data((5, 6), 0..30);
        let b = a.submat(1..3, 2..5);
        assert_eq!(b, SpMat::from_dense_data((2,3), vec![
             8,  9, 10,
            14, 15, 16
        ]));
    }

    #[test]
    fn concat() {
        let a = SpMat::from_dense_data((2, 2), [1,2,3,4]);
        let b = SpMat::from_dense_data((2, 1), [5,6]);
        let c = a.concat(&b);
        assert_eq!(c, SpMat::from_dense_data((2, 3), [1,2,5,3,4,6]));
    }

    #[test]
    fn stack() {
        let a = SpMat::from_dense_data((2, 2), [1,2,3,4]);
        let b = SpMat::from_dense_data((1, 2), [5,6]);
        let c = a.stack(&b);
        assert_eq!(c, SpMat::from_dense_data((3, 2), [1,2,3,4,5,6]));
    }

    #[test]
    fn mul() {
        let a = SpMat::from_dense_data((2, 3), [1,2,3,4,5,6]);
        let b = SpMat::from_dense_data((3, 2), [1,2,1,-1,0,2]);
        let c = a * b;
        assert_eq!(c, SpMat::from_dense_data((2, 2), [3,6,9,15]));
    }

    #[test]
    fn from_col_vecs() {
        let vecs = vec![
            SpVec::from(vec![1, 0, 3]),
            SpVec::from(vec![0, 2, 0]),
        ];
        let a = SpMat::from_col_vecs(3, vecs);
        assert_eq!(a, SpMat::from_dense_data((3, 2), [1,0,0,2,3,0]));
    }
}
