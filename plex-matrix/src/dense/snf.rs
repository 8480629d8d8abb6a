use std::cmp::min;

use log::{debug, trace};
use plex::{EucRing, EucRingOps};
use crate::{MatTrait, SmithForm};
use crate::dense::Mat;

pub fn snf<R>(target: &Mat<R>) -> SmithForm<R>
where R: EucRing, for<'a> &'a R: EucRingOps<R> {
    snf_in_place(target.clone())
}

pub fn snf_in_place<R>(target: Mat<R>) -> SmithForm<R>
where R: EucRing, for<'a> &'a R: EucRingOps<R> {
    debug!("start snf: {:?}.", target.shape());
    trace!("{}", target);

    let mut red = Reduction::new(target);
    red.run();

    debug!("snf done.");
    trace!("{}", red.work);

    red.finish()
}

// A unimodular row or column operation. The reduction keeps a log of
// these and the transforms are materialized afterwards by replaying the
// log against an identity matrix.
#[derive(Clone, Debug)]
enum Op<R> {
    Swap(usize, usize),
    Scale(usize, R),                 // by a unit
    Combine(usize, usize, [R; 4]),   // 2x2 block of determinant one
}

impl<R> Op<R>
where R: EucRing, for<'a> &'a R: EucRingOps<R> {
    fn inverse(&self) -> Op<R> {
        match self {
            Op::Swap(i, j) => Op::Swap(*i, *j),
            Op::Scale(i, u) => Op::Scale(*i, u.inv().unwrap()),
            Op::Combine(i, j, [a, b, c, d]) =>
                Op::Combine(*i, *j, [d.clone(), -b, -c, a.clone()]),
        }
    }

    fn apply_rows(&self, m: &mut Mat<R>) {
        match self {
            Op::Swap(i, j) => m.swap_rows(*i, *j),
            Op::Scale(i, u) => {
                for k in 0..m.ncols() {
                    let x = m[(*i, k)].clone();
                    m[(*i, k)] = x * u;
                }
            }
            Op::Combine(i, j, [a, b, c, d]) => {
                for k in 0..m.ncols() {
                    let x = m[(*i, k)].clone();
                    let y = m[(*j, k)].clone();
                    m[(*i, k)] = a * &x + b * &y;
                    m[(*j, k)] = c * &x + d * &y;
                }
            }
        }
    }

    fn apply_cols(&self, m: &mut Mat<R>) {
        match self {
            Op::Swap(i, j) => m.swap_cols(*i, *j),
            Op::Scale(j, u) => {
                for k in 0..m.nrows() {
                    let x = m[(k, *j)].clone();
                    m[(k, *j)] = x * u;
                }
            }
            Op::Combine(i, j, [a, b, c, d]) => {
                for k in 0..m.nrows() {
                    let x = m[(k, *i)].clone();
                    let y = m[(k, *j)].clone();
                    m[(k, *i)] = a * &x + b * &y;
                    m[(k, *j)] = c * &x + d * &y;
                }
            }
        }
    }
}

// Annihilates y against x:
//
//   [ s  t] [x]   [g]
//   [-v  u] [y] = [0],   g = sx + ty,  u = x/g,  v = y/g.
//
// When x already divides y a plain shear suffices and the pivot is kept.
fn gcd_combine<R>(x: &R, y: &R, i: usize, j: usize) -> Op<R>
where R: EucRing, for<'a> &'a R: EucRingOps<R> {
    if x.divides(y) {
        let q = y / x;
        return Op::Combine(i, j, [R::one(), R::zero(), -q, R::one()])
    }

    let (g, s, t) = EucRing::gcdx(x, y);
    let u = x / &g;
    let v = y / &g;
    Op::Combine(i, j, [s, t, -v, u])
}

struct Reduction<R>
where R: EucRing, for<'a> &'a R: EucRingOps<R> {
    work: Mat<R>,
    row_ops: Vec<Op<R>>,
    col_ops: Vec<Op<R>>,
}

impl<R> Reduction<R>
where R: EucRing, for<'a> &'a R: EucRingOps<R> {
    fn new(work: Mat<R>) -> Self {
        Self { work, row_ops: vec![], col_ops: vec![] }
    }

    fn row(&mut self, op: Op<R>) {
        op.apply_rows(&mut self.work);
        self.row_ops.push(op);
    }

    fn col(&mut self, op: Op<R>) {
        op.apply_cols(&mut self.work);
        self.col_ops.push(op);
    }

    fn run(&mut self) {
        let mut t = 0;

        while let Some((i, j)) = self.find_pivot(t) {
            if i != t {
                self.row(Op::Swap(t, i));
            }
            if j != t {
                self.col(Op::Swap(t, j));
            }
            self.clear_cross(t);
            t += 1;
        }

        self.chain_divisibility(t);
        self.normalize(t);
    }

    // a unit pivot clears its cross in a single pass; otherwise take the
    // first nonzero entry and let the gcd combines shrink it.
    fn find_pivot(&self, t: usize) -> Option<(usize, usize)> {
        let (m, n) = self.work.shape();
        let mut fallback = None;

        for j in t..n {
            for i in t..m {
                let e = &self.work[(i, j)];
                if e.is_zero() {
                    continue
                }
                if e.is_unit() {
                    return Some((i, j))
                }
                if fallback.is_none() {
                    fallback = Some((i, j));
                }
            }
        }

        fallback
    }

    // Alternates column and row elimination at (t, t); clearing one side
    // can refill the other, but each round replaces the pivot by a proper
    // divisor, so the alternation runs dry.
    fn clear_cross(&mut self, t: usize) {
        loop {
            let a = self.clear_below(t);
            let b = self.clear_right(t);
            if !a && !b {
                break
            }
        }
    }

    fn clear_below(&mut self, t: usize) -> bool {
        let m = self.work.nrows();
        let mut changed = false;

        for i in t+1..m {
            if self.work[(i, t)].is_zero() {
                continue
            }
            let op = gcd_combine(&self.work[(t, t)], &self.work[(i, t)], t, i);
            self.row(op);
            changed = true;
        }

        changed
    }

    fn clear_right(&mut self, t: usize) -> bool {
        let n = self.work.ncols();
        let mut changed = false;

        for j in t+1..n {
            if self.work[(t, j)].is_zero() {
                continue
            }
            let op = gcd_combine(&self.work[(t, t)], &self.work[(t, j)], t, j);
            self.col(op);
            changed = true;
        }

        changed
    }

    // Forces d1 | d2 | ... over the nonzero diagonal block: a violating
    // pair is folded so the gcd moves up and the lcm moves down, then the
    // check backs up one step.
    fn chain_divisibility(&mut self, r: usize) {
        let mut k = 0;

        while k + 1 < r {
            let x = &self.work[(k, k)];
            let y = &self.work[(k + 1, k + 1)];

            if x.divides(y) {
                k += 1;
                continue
            }

            self.col(Op::Combine(k, k + 1, [R::one(), R::one(), R::zero(), R::one()]));
            self.clear_cross(k);
            k = k.saturating_sub(1);
        }
    }

    fn normalize(&mut self, r: usize) {
        for i in 0..r {
            let u = self.work[(i, i)].normalizing_unit();
            if !u.is_one() {
                self.row(Op::Scale(i, u));
            }
        }
    }

    fn finish(self) -> SmithForm<R> {
        let (m, n) = self.work.shape();

        let r = (0..min(m, n))
            .take_while(|&i| !self.work[(i, i)].is_zero())
            .count();
        let diag = (0..r).map(|i| self.work[(i, i)].clone()).collect();

        let u     = replay_rows(m, self.row_ops.iter().cloned());
        let u_inv = replay_rows(m, self.row_ops.iter().rev().map(Op::inverse));
        let v     = replay_cols(n, self.col_ops.iter().cloned());
        let v_inv = replay_cols(n, self.col_ops.iter().rev().map(Op::inverse));

        SmithForm { shape: (m, n), diag, u, u_inv, v, v_inv }
    }
}

fn replay_rows<R, I>(size: usize, ops: I) -> Mat<R>
where R: EucRing, for<'a> &'a R: EucRingOps<R>, I: IntoIterator<Item = Op<R>> {
    let mut m = Mat::id(size);
    for op in ops {
        op.apply_rows(&mut m);
    }
    m
}

fn replay_cols<R, I>(size: usize, ops: I) -> Mat<R>
where R: EucRing, for<'a> &'a R: EucRingOps<R>, I: IntoIterator<Item = Op<R>> {
    let mut m = Mat::id(size);
    for op in ops {
        op.apply_cols(&mut m);
    }
    m
}
