use std::fmt::Display;

use itertools::Itertools;
use num_traits::Zero;
use plex::{EucRing, EucRingOps};
use plex::chain::Chain;
use plex::util::format::subscript;
use plex_homology::{Homology, HomologySummand, RModStr};
use plex_matrix::SnfSolver;

use crate::{Result, Simplex, SimplicialComplex};

// H_0, ..., H_dim of a simplicial complex over R.
pub struct SimplicialHomology<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    inner: Homology<Simplex, R>,
    dim: usize,
    with_generators: bool
}

impl<R> SimplicialHomology<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn summand(&self, k: usize) -> &HomologySummand<Simplex, R> {
        &self.inner[k as isize]
    }

    pub fn rank(&self, k: usize) -> usize {
        self.summand(k).rank()
    }

    pub fn tors(&self, k: usize) -> &[R] {
        self.summand(k).tors()
    }

    pub fn betti(&self) -> Vec<usize> {
        (0..=self.dim).map(|k| self.rank(k)).collect()
    }

    pub fn euler(&self) -> isize {
        (0..=self.dim).map(|k| {
            let b = self.rank(k) as isize;
            if k % 2 == 0 { b } else { -b }
        }).sum()
    }

    // representative cycles, each labeled with its torsion order
    // (zero for free generators).
    pub fn generators(&self, k: usize) -> Vec<(Chain<Simplex, R>, R)> {
        assert!(self.with_generators, "computed without generators");

        let h = self.summand(k);
        let rank = h.rank();

        (0..h.dim()).map(|i| {
            let z = h.gen_chain(i);
            let t = if i < rank {
                R::zero()
            } else {
                h.tors()[i - rank].clone()
            };
            (z, t)
        }).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &HomologySummand<Simplex, R>)> {
        (0..=self.dim).map(|k| (k, self.summand(k)))
    }
}

impl<R> Display for SimplicialHomology<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (k, h) in self.iter() {
            writeln!(f, "H{} = {}", subscript(k as isize), h.math_symbol())?;
        }
        Ok(())
    }
}

impl SimplicialComplex {
    pub fn homology<R>(&self) -> SimplicialHomology<R>
    where R: EucRing, for<'x> &'x R: EucRingOps<R> {
        self.compute_homology(false)
    }

    pub fn homology_with_generators<R>(&self) -> SimplicialHomology<R>
    where R: EucRing, for<'x> &'x R: EucRingOps<R> {
        self.compute_homology(true)
    }

    fn compute_homology<R>(&self, with_generators: bool) -> SimplicialHomology<R>
    where R: EucRing, for<'x> &'x R: EucRingOps<R> {
        let cc = self.chain_complex::<R>();
        let inner = cc.homology(with_generators);

        SimplicialHomology { inner, dim: self.dim(), with_generators }
    }

    pub fn homology_with_solver<R>(&self, with_generators: bool, solver: &dyn SnfSolver<R>) -> Result<SimplicialHomology<R>>
    where R: EucRing, for<'x> &'x R: EucRingOps<R> {
        let cc = self.chain_complex::<R>();
        let inner = cc.homology_with(with_generators, solver)?;

        Ok(SimplicialHomology { inner, dim: self.dim(), with_generators })
    }
}

// The dimension of a chain of simplices, if uniform.
pub fn chain_dim<R>(z: &Chain<Simplex, R>) -> Option<usize>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    let mut dims = z.gens().map(|s| s.dim()).collect_vec();
    dims.sort_unstable();
    dims.dedup();

    match dims.len() {
        0 | 1 => dims.first().copied(),
        _ => None
    }
}

// chain addition restricted to a single dimension.
pub fn try_add<R>(a: &Chain<Simplex, R>, b: &Chain<Simplex, R>) -> Result<Chain<Simplex, R>>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    use crate::Error;

    match (chain_dim(a), chain_dim(b)) {
        (Some(da), Some(db)) if da != db => Err(Error::DimensionMismatch(da, db)),
        (None, _) if !a.is_zero() => Err(Error::InvalidInput("mixed-dimension chain".into())),
        (_, None) if !b.is_zero() => Err(Error::InvalidInput("mixed-dimension chain".into())),
        _ => Ok(a + b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s<const N: usize>(vs: [usize; N]) -> Simplex {
        Simplex::new(vs).unwrap()
    }

    #[test]
    fn point() {
        let c = SimplicialComplex::from_cells([s([0])]).unwrap();
        let h = c.homology::<i64>();

        assert_eq!(h.betti(), vec![1]);
        assert_eq!(h.euler(), 1);
    }

    #[test]
    fn circle() {
        let c = SimplicialComplex::from_cells([
            s([0, 1]), s([1, 2]), s([0, 2])
        ]).unwrap();
        let h = c.homology::<i64>();

        assert_eq!(h.betti(), vec![1, 1]);
        assert_eq!(h.euler(), 0);
    }

    #[test]
    fn disk() {
        let c = SimplicialComplex::from_cells([s([0, 1, 2])]).unwrap();
        let h = c.homology::<i64>();

        assert_eq!(h.betti(), vec![1, 0]);
        assert_eq!(h.euler(), 1);
    }

    #[test]
    fn two_components() {
        let c = SimplicialComplex::from_cells([
            s([0, 1]), s([2])
        ]).unwrap();
        let h = c.homology::<i64>();

        assert_eq!(h.rank(0), 2);
    }

    #[test]
    fn circle_generator() {
        let c = SimplicialComplex::from_cells([
            s([0, 1]), s([1, 2]), s([0, 2])
        ]).unwrap();
        let h = c.homology_with_generators::<i64>();

        let gens = h.generators(1);
        assert_eq!(gens.len(), 1);

        let (z, t) = &gens[0];
        assert!(t.is_zero());
        assert!(!z.is_zero());

        // the generator is a cycle
        let dz = z.apply(|s| s.boundary::<i64>());
        assert!(dz.is_zero());
    }

    #[test]
    fn with_solver() {
        use plex_matrix::BundledSnf;

        let c = SimplicialComplex::from_cells([
            s([0, 1]), s([1, 2]), s([0, 2])
        ]).unwrap();
        let h = c.homology_with_solver::<i64>(false, &BundledSnf).unwrap();

        assert_eq!(h.betti(), vec![1, 1]);
    }

    #[test]
    fn chain_dims() {
        let z = Chain::<Simplex, i64>::from(s([0, 1]));
        assert_eq!(chain_dim(&z), Some(1));

        let w = Chain::<Simplex, i64>::from(s([2]));
        assert!(try_add(&z, &w).is_err());

        let w2 = Chain::<Simplex, i64>::from(s([1, 2]));
        let sum = try_add(&z, &w2).unwrap();
        assert_eq!(sum.nterms(), 2);
    }

    #[test]
    fn display() {
        let c = SimplicialComplex::from_cells([s([0, 1]), s([1, 2])]).unwrap();
        let h = c.homology::<i64>();
        let str = h.to_string();

        assert!(str.contains("H₀ = Z"));
    }
}
