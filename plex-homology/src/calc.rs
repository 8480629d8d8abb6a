use std::marker::PhantomData;
use log::*;

use plex::{EucRing, EucRingOps, Ring};
use plex_matrix::{BundledSnf, MatTrait, SmithForm, SnfError, SnfSolver};
use plex_matrix::sparse::{SpMat, Trans};

use crate::Summand;

// Computes H(B) = Ker(d_out) / Im(d_in) for a segment
//
//    A --d_in--> B --d_out--> C
//
// by two Smith reductions: the first factors d_in and splits B into the
// image and a complement; the second factors d_out restricted to that
// complement. What survives both is the homology.
pub struct HomologyCalc<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    _r: PhantomData<R>
}

impl<R> HomologyCalc<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    pub fn calculate(d_in: SpMat<R>, d_out: SpMat<R>, with_trans: bool) -> Summand<R> {
        // the bundled solver does not fail.
        Self::calculate_with(d_in, d_out, with_trans, &BundledSnf).unwrap()
    }

    pub fn calculate_with(d_in: SpMat<R>, d_out: SpMat<R>, with_trans: bool, solver: &dyn SnfSolver<R>) -> Result<Summand<R>, SnfError> {
        assert_eq!(d_in.nrows(), d_out.ncols());

        let n = d_in.nrows();

        if n == 0 {
            return Ok(Summand::zero())
        }
        if d_in.is_zero() && d_out.is_zero() {
            return Ok(Summand::free(n))
        }

        trace!("calculate homology: {} -> {} -> {}", d_in.ncols(), n, d_out.nrows());

        let s_in = solver.snf(d_in.into_dense())?;
        let r_in = s_in.rank();

        // the outgoing map restricted to the complement of Im(d_in)
        let complement = s_in.u_inv.submat_cols(r_in..n).into_sparse();
        let restricted = d_out * &complement;
        let s_out = solver.snf(restricted.into_dense())?;
        let r_out = s_out.rank();

        assert!(n >= r_in + r_out);

        let rank = n - r_in - r_out;
        let tors: Vec<R> = s_in.factors().iter()
            .filter(|d| !d.is_unit())
            .cloned()
            .collect();

        let trans = if with_trans {
            Some(Self::quotient_trans(&s_in, &s_out, rank, tors.len()))
        } else {
            None
        };

        Ok(Summand::new(rank, tors, trans))
    }

    // Basis bookkeeping for the quotient. Columns of u_inv past the rank
    // of d_in span a complement of the image; v of the second reduction
    // rotates that complement so its leading r_out directions are the
    // ones d_out kills off. What remains are the free cycle classes. The
    // non-unit diagonal positions of the first reduction contribute the
    // torsion classes.
    fn quotient_trans(s_in: &SmithForm<R>, s_out: &SmithForm<R>, rank: usize, tor: usize) -> Trans<R> {
        let n = s_in.shape.0;
        let (r_in, r_out) = (s_in.rank(), s_out.rank());

        let comp_b = s_in.u_inv.submat_cols(r_in..n).into_sparse();
        let comp_f = s_in.u.submat_rows(r_in..n).into_sparse();

        let free_b = &comp_b * s_out.v.submat_cols(r_out..n - r_in).into_sparse();
        let free_f = s_out.v_inv.submat_rows(r_out..n - r_in).into_sparse() * &comp_f;

        let tor_b = s_in.u_inv.submat_cols(r_in - tor..r_in).into_sparse();
        let tor_f = s_in.u.submat_rows(r_in - tor..r_in).into_sparse();

        let b = free_b.concat(&tor_b);
        let f = free_f.stack(&tor_f);

        assert_eq!(b.shape(), (n, rank + tor));
        assert_eq!(f.shape(), (rank + tor, n));

        Trans::new(f, b)
    }
}
