use std::iter::Product;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use num_traits::{Zero, One};
use crate::Elem;

// Additive monoids

pub trait AddMonOps<T = Self>:
    Sized +
    Add<T, Output = T> +
    for<'a> Add<&'a T, Output = T>
{}

pub trait AddMon:
    Elem +
    Zero +
    AddMonOps +
    AddAssign +
    for<'a> AddAssign<&'a Self>
where
    for<'a> &'a Self: AddMonOps<Self>
{
    fn sum<A, I>(itr: I) -> Self
    where
        Self: AddAssign<A>,
        I: IntoIterator<Item = A>
    {
        itr.into_iter().fold(Self::zero(), |mut res, a| {
            res += a;
            res
        })
    }
}

// Additive groups

pub trait AddGrpOps<T = Self>:
    AddMonOps<T> +
    Neg<Output = T> +
    Sub<T, Output = T> +
    for<'a> Sub<&'a T, Output = T>
{}

pub trait AddGrp:
    AddMon +
    AddGrpOps +
    SubAssign +
    for<'a> SubAssign<&'a Self>
where
    for<'a> &'a Self: AddGrpOps<Self>
{}

// Multiplicative monoids

pub trait MonOps<T = Self>:
    Sized +
    Mul<T, Output = T> +
    for<'a> Mul<&'a T, Output = T>
{}

pub trait Mon:
    Elem +
    MonOps +
    MulAssign +
    for<'a> MulAssign<&'a Self> +
    Product<Self> +
    for<'a> Product<&'a Self> +
    One
where
    for<'a> &'a Self: MonOps<Self>
{}
