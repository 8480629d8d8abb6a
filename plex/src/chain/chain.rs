use std::collections::HashMap;
use std::fmt::{Display, Debug};
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign, Mul, MulAssign};
use ahash::AHashMap;
use itertools::Itertools;
use num_traits::Zero;
use auto_impl_ops::auto_ops;
use crate::{Elem, AddMon, AddMonOps, AddGrp, AddGrpOps, Ring, RingOps};

use super::gen::*;

// A formal R-linear combination of generators.
#[derive(PartialEq, Eq, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Chain<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    data: AHashMap<X, R>,
    #[cfg_attr(feature = "serde", serde(skip))]
    r_zero: R
}

impl<X, R> Chain<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    pub fn new() -> Self {
        let hasher = ahash::RandomState::with_seeds(0, 0, 0, 0);
        let data = AHashMap::with_hasher(hasher);
        let r_zero = R::zero();
        Self { data, r_zero }
    }

    pub fn simplify(&mut self) {
        self.data.retain(|_, r| !r.is_zero());
    }

    pub fn nterms(&self) -> usize {
        self.data.len()
    }

    pub fn any_term(&self) -> Option<(&X, &R)> {
        self.iter().next()
    }

    pub fn gens(&self) -> impl Iterator<Item = &X> {
        self.data.keys()
    }

    pub fn is_gen(&self) -> bool {
        self.nterms() == 1 &&
        self.iter().next().unwrap().1.is_one()
    }

    pub fn as_gen(&self) -> Option<X> {
        if !self.is_gen() {
            None?
        }
        self.iter().next().map(|(x, _)| x.clone())
    }

    pub fn coeff(&self, x: &X) -> &R {
        self.data.get(x).unwrap_or(&self.r_zero)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&X, &R)> {
        self.data.iter()
    }

    pub fn map<Y, S, F>(&self, f: F) -> Chain<Y, S>
    where
        Y: Gen,
        S: Ring, for<'x> &'x S: RingOps<S>,
        F: Fn(&X, &R) -> (Y, S)
    {
        self.iter().map(|(x, r)| f(x, r)).collect()
    }

    pub fn into_map<Y, S, F>(self, f: F) -> Chain<Y, S>
    where
        Y: Gen,
        S: Ring, for<'x> &'x S: RingOps<S>,
        F: Fn(X, R) -> (Y, S)
    {
        self.into_iter().map(|(x, r)| f(x, r)).collect()
    }

    pub fn map_coeffs<S, F>(&self, f: F) -> Chain<X, S>
    where
        S: Ring, for<'x> &'x S: RingOps<S>,
        F: Fn(&R) -> S
    {
        self.map(|x, r| (x.clone(), f(r)))
    }

    pub fn map_gens<Y, F>(&self, f: F) -> Chain<Y, R>
    where
        Y: Gen,
        F: Fn(&X) -> Y
    {
        self.map(|x, r| (f(x), r.clone()))
    }

    pub fn filter_gens<F>(&self, f: F) -> Self
    where F: Fn(&X) -> bool {
        self.iter().filter_map(|(x, a)|
            if f(x) {
                Some((x.clone(), a.clone()))
            } else {
                None
            }
        ).collect()
    }

    pub fn apply<F>(&self, f: F) -> Self
    where F: Fn(&X) -> Chain<X, R> {
        self.iter().flat_map(|(x, r)| {
            f(x).into_iter().map(move |(y, s)| {
                (y, r * &s)
            })
        }).collect()
    }

    fn fmt_ordered(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use crate::util::format::paren_expr;

        if self.data.is_empty() {
            return write!(f, "0");
        }

        let mut elements = self.iter().sorted_by(|(x, _), (y, _)|
            x.cmp_for_display(y)
        );

        if let Some((x, r)) = elements.next() {
            let r = paren_expr(r);
            let x = x.to_string();

            if r == "1" {
                write!(f, "{x}")?
            } else if r == "-1" {
                write!(f, "-{x}")?
            } else {
                write!(f, "{r}{x}")?
            };
        };

        for (x, r) in elements {
            let r = paren_expr(r);
            let x = x.to_string();

            let (op, r) = if let Some(r) = r.strip_prefix('-') {
                ("-", r)
            } else {
                ("+", r.as_str())
            };

            if r == "1" {
                write!(f, " {op} {x}")?
            } else {
                write!(f, " {op} {r}{x}")?
            };
        }

        Ok(())
    }
}

impl<X, R> From<X> for Chain<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn from(x: X) -> Self {
        Self::from((x, R::one()))
    }
}

impl<X, R> From<(X, R)> for Chain<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn from(value: (X, R)) -> Self {
        Self::from_iter([value])
    }
}

impl<X, R> From<HashMap<X, R>> for Chain<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn from(value: HashMap<X, R>) -> Self {
        Self::from_iter(value)
    }
}

impl<X, R> FromIterator<(X, R)> for Chain<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn from_iter<T: IntoIterator<Item = (X, R)>>(iter: T) -> Self {
        let mut res = Self::new();
        for e in iter.into_iter() {
            res.add_term(e);
        }
        res.simplify();
        res
    }
}

impl<X, R> IntoIterator for Chain<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    type Item = (X, R);
    type IntoIter = std::collections::hash_map::IntoIter<X, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<X, R> Display for Chain<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_ordered(f)
    }
}

impl<X, R> Debug for Chain<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_ordered(f)
    }
}

impl<X, R> Zero for Chain<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn zero() -> Self {
        Self::new()
    }

    fn is_zero(&self) -> bool {
        self.data.is_empty()
    }
}

impl<X, R> Neg for Chain<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.into_map(|x, r| (x, -r))
    }
}

impl<X, R> Neg for &Chain<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    type Output = Chain<X, R>;

    fn neg(self) -> Self::Output {
        self.map_coeffs(|r| -r)
    }
}

impl<X, R> Chain<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    // must simplify after call
    pub fn add_term(&mut self, rhs: (X, R)) {
        let (x, r) = rhs;
        if r.is_zero() { return }

        if self.data.contains_key(&x) {
            let v = self.data.get_mut(&x).unwrap();
            v.add_assign(r);
        } else {
            self.data.insert(x, r);
        }
    }

    // must simplify after call
    pub fn add_term_ref(&mut self, rhs: (&X, &R)) {
        let (x, r) = rhs;
        if r.is_zero() { return }

        if self.data.contains_key(x) {
            let v = self.data.get_mut(x).unwrap();
            v.add_assign(r);
        } else {
            self.data.insert(x.clone(), r.clone());
        }
    }
}

#[auto_ops]
impl<X, R> AddAssign<&Chain<X, R>> for Chain<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn add_assign(&mut self, rhs: &Self) {
        for e in rhs.data.iter() {
            self.add_term_ref(e);
        }
        self.simplify()
    }
}

#[auto_ops]
impl<X, R> SubAssign<&Chain<X, R>> for Chain<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn sub_assign(&mut self, rhs: &Self) {
        for e in rhs.data.iter() {
            self.add_term_ref((e.0, &-e.1));
        }
        self.simplify()
    }
}

#[auto_ops]
impl<X, R> MulAssign<&R> for Chain<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn mul_assign(&mut self, rhs: &R) {
        let data = std::mem::take(&mut self.data);
        self.data = data.into_iter().map(|(x, r)| (x, &r * rhs)).collect();
        self.simplify()
    }
}

macro_rules! impl_alg_ops {
    ($trait:ident) => {
        impl<X, R> $trait<Self> for Chain<X, R>
        where X: Gen, R: Ring, for<'x> &'x R: RingOps<R> {}

        impl<X, R> $trait<Chain<X, R>> for &Chain<X, R>
        where X: Gen, R: Ring, for<'x> &'x R: RingOps<R> {}
    };
}

impl_alg_ops!(AddMonOps);
impl_alg_ops!(AddGrpOps);

impl<X, R> Elem for Chain<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn math_symbol() -> String {
        format!("{}<{}>", R::math_symbol(), X::math_symbol())
    }
}

impl<X, R> AddMon for Chain<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{}

impl<X, R> AddGrp for Chain<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{}
