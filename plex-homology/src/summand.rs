use itertools::Itertools;

use plex::{Ring, RingOps};
use plex_matrix::sparse::{Trans, SpVec};

pub trait RModStr
where Self::R: Ring, for<'x> &'x Self::R: RingOps<Self::R> {
    type R;

    fn rank(&self) -> usize;
    fn tors(&self) -> &[Self::R];

    fn dim(&self) -> usize {
        self.rank() + self.tors().len()
    }

    fn is_zero(&self) -> bool {
        self.rank() == 0 && self.is_free()
    }

    fn is_free(&self) -> bool {
        self.tors().is_empty()
    }

    fn math_symbol(&self) -> String {
        rmod_str_symbol(self.rank(), self.tors(), "0")
    }
}

pub fn rmod_str_symbol<R>(rank: usize, tors: &[R], dflt: &str) -> String
where R: Ring, for<'x> &'x R: RingOps<R> {
    use plex::util::format::superscript;

    let tors = tors.iter()
        .into_group_map_by(|r| r.to_string())
        .into_iter().map(|(k, list)| (k, list.len()))
        .collect_vec();

    if rank == 0 && tors.is_empty() {
        return dflt.to_string()
    }

    let mut res = vec![];
    let symbol = R::math_symbol();

    if rank > 1 {
        let str = format!("{}{}", symbol, superscript(rank as isize));
        res.push(str);
    } else if rank == 1 {
        let str = symbol.to_string();
        res.push(str);
    }

    for (t, r) in tors.iter() {
        let str = if r > &1 {
            format!("({}/{}){}", symbol, t, superscript(*r as isize))
        } else {
            format!("({}/{})", symbol, t)
        };
        res.push(str);
    }

    res.join(" ⊕ ")
}

// rank + torsion + (optionally) the transformation to the original basis.
#[derive(Clone, Debug)]
pub struct Summand<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    rank: usize,
    tors: Vec<R>,
    trans: Option<Trans<R>>
}

impl<R> Summand<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    pub fn new(rank: usize, tors: Vec<R>, trans: Option<Trans<R>>) -> Self {
        if let Some(t) = &trans {
            assert_eq!(rank + tors.len(), t.tgt_dim());
        }
        Self { rank, tors, trans }
    }

    pub fn free(rank: usize) -> Self {
        Self::new(rank, vec![], Some(Trans::id(rank)))
    }

    pub fn zero() -> Self {
        Self::new(0, vec![], Some(Trans::zero()))
    }

    pub fn trans(&self) -> Option<&Trans<R>> {
        self.trans.as_ref()
    }

    // The vector representing the i-th generator.
    pub fn gen_vec(&self, i: usize) -> SpVec<R> {
        let Some(t) = &self.trans else {
            panic!()
        };

        assert!(i < self.dim());

        t.backward_mat().col_vec(i)
    }

    pub fn compose(&self, other: &Summand<R>) -> Summand<R> {
        let rank = other.rank;
        let tors = other.tors.clone();

        if let Some(t0) = &self.trans {
            if let Some(t1) = &other.trans {
                let t = t0.compose(t1);
                return Self::new(rank, tors, Some(t))
            }
        }
        Self::new(rank, tors, None)
    }
}

impl<R> Default for Summand<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<R> RModStr for Summand<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type R = R;

    fn rank(&self) -> usize {
        self.rank
    }

    fn tors(&self) -> &[R] {
        &self.tors
    }
}

impl<R> std::fmt::Display for Summand<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.math_symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol() {
        assert_eq!(rmod_str_symbol::<i32>(0, &[], "0"), "0");
        assert_eq!(rmod_str_symbol::<i32>(1, &[], "0"), "Z");
        assert_eq!(rmod_str_symbol::<i32>(2, &[], "0"), "Z²");
        assert_eq!(rmod_str_symbol::<i32>(0, &[2], "0"), "(Z/2)");
        assert_eq!(rmod_str_symbol::<i32>(1, &[2, 2], "0"), "Z ⊕ (Z/2)²");
    }

    #[test]
    fn free() {
        let s = Summand::<i32>::free(3);
        assert_eq!(s.rank(), 3);
        assert!(s.is_free());
        assert!(!s.is_zero());
        assert_eq!(s.dim(), 3);
    }

    #[test]
    fn zero() {
        let s = Summand::<i32>::zero();
        assert!(s.is_zero());
        assert!(s.is_free());
    }

    #[test]
    fn gen_vec() {
        let s = Summand::<i32>::free(3);
        assert_eq!(s.gen_vec(0), SpVec::unit(3, 0));
        assert_eq!(s.gen_vec(2), SpVec::unit(3, 2));
    }
}
