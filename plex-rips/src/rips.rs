use std::str::FromStr;

use itertools::Itertools;
use log::debug;
use plex_matrix::MatTrait;
use plex_matrix::dense::Mat;

use crate::{Error, Result, Simplex, SimplicialComplex, Vertex};
use crate::metric::pairwise_distances;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Expansion {
    Inductive,
    #[default]
    Incremental
}

impl FromStr for Expansion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "inductive"   => Ok(Expansion::Inductive),
            "incremental" => Ok(Expansion::Incremental),
            _ => Err(Error::InvalidMethod(s.to_string()))
        }
    }
}

// Per-dimension filtration weights, aligned with cell indices.
pub type Weights = Vec<Vec<f64>>;

pub fn vietoris_rips<P, F>(points: &[P], eps: f64, max_dim: usize, expansion: Expansion, with_weights: bool, metric: F) -> Result<(SimplicialComplex, Option<Weights>)>
where P: AsRef<[f64]>, F: Fn(&[f64], &[f64]) -> f64 {
    let dists = pairwise_distances(points, metric);
    rips_complex(&dists, eps, max_dim, expansion, with_weights)
}

// Builds VR(X, eps) from a pairwise distance matrix, expanding the nerve
// up to dimension k_max = min(max_dim, max vertex degree).
pub fn rips_complex(dists: &Mat<f64>, eps: f64, max_dim: usize, expansion: Expansion, with_weights: bool) -> Result<(SimplicialComplex, Option<Weights>)> {
    if !dists.is_square() {
        return Err(Error::InvalidInput("distance matrix must be square".into()))
    }
    if eps < 0.0 {
        return Err(Error::InvalidInput("scale must be non-negative".into()))
    }
    if max_dim == 0 {
        return Err(Error::InvalidInput("max_dim must be positive".into()))
    }

    let n = dists.nrows();
    let mut c = SimplicialComplex::new();

    for v in 0..n {
        c.add(Simplex::vertex(v), false)?;
    }

    // 1-skeleton
    let mut adj = vec![vec![false; n]; n];
    for (u, v) in (0..n).tuple_combinations() {
        let d = dists[(u, v)];
        if 0.0 < d && d <= eps {
            adj[u][v] = true;
            adj[v][u] = true;
            c.add(Simplex::edge(u, v)?, false)?;
        }
    }

    let max_degree = (0..n).map(|i|
        (0..n).filter(|&j| {
            let d = dists[(j, i)];
            0.0 < d && d <= eps
        }).count()
    ).max().unwrap_or(0);

    let k_max = max_dim.min(max_degree);

    debug!("rips: n = {n}, eps = {eps}, k_max = {k_max}, edges = {}", c.size(1));

    expand(&mut c, &adj, k_max, expansion)?;

    let w = if with_weights {
        Some(assign_weights(&c, |e| {
            let vs = e.vertices();
            dists[(vs[0], vs[1])]
        }))
    } else {
        None
    };

    Ok((c, w))
}

pub(crate) fn expand(c: &mut SimplicialComplex, adj: &[Vec<bool>], k_max: usize, expansion: Expansion) -> Result<()> {
    match expansion {
        Expansion::Inductive   => expand_inductive(c, adj, k_max),
        Expansion::Incremental => expand_incremental(c, adj, k_max),
    }
}

fn lower_nbrs(adj: &[Vec<bool>], u: Vertex) -> Vec<Vertex> {
    (0..u).filter(|&w| adj[w][u]).collect()
}

// vertices below all of `vs` and adjacent to each of them.
fn common_lower_nbrs(adj: &[Vec<bool>], vs: &[Vertex]) -> Vec<Vertex> {
    let &v0 = vs.first().unwrap();
    (0..v0).filter(|&w| vs.iter().all(|&u| adj[w][u])).collect()
}

fn expand_inductive(c: &mut SimplicialComplex, adj: &[Vec<bool>], k_max: usize) -> Result<()> {
    for d in 1..k_max {
        let cells = c.cells(d).cloned().collect_vec();
        for t in cells {
            for v in common_lower_nbrs(adj, t.vertices()) {
                c.add(t.joined(v)?, true)?;
            }
        }
    }
    Ok(())
}

fn expand_incremental(c: &mut SimplicialComplex, adj: &[Vec<bool>], k_max: usize) -> Result<()> {
    let n = adj.len();
    for u in 0..n {
        let nbrs = lower_nbrs(adj, u);
        add_cofaces(c, adj, &Simplex::vertex(u), &nbrs, k_max)?;
    }
    Ok(())
}

fn add_cofaces(c: &mut SimplicialComplex, adj: &[Vec<bool>], t: &Simplex, nbrs: &[Vertex], k_max: usize) -> Result<()> {
    c.add(t.clone(), true)?;

    if t.dim() >= k_max {
        return Ok(())
    }

    for &v in nbrs {
        let s = t.joined(v)?;
        let m = nbrs.iter().copied().filter(|&w| w < v && adj[w][v]).collect_vec();
        add_cofaces(c, adj, &s, &m, k_max)?;
    }

    Ok(())
}

// w[0] = 0, w[1] by the given edge weight, and above that the maximum
// over the faces. A simplex enters at the scale of its longest edge.
pub(crate) fn assign_weights<F>(c: &SimplicialComplex, edge_weight: F) -> Weights
where F: Fn(&Simplex) -> f64 {
    let top = c.dim();
    let mut w: Weights = Vec::with_capacity(top + 1);

    w.push(vec![0.0; c.size(0)]);

    if top >= 1 {
        w.push(c.cells(1).map(|e| edge_weight(e)).collect());
    }

    for d in 2..=top {
        let wd = c.cells(d).map(|s| {
            s.faces().map(|f| {
                let i = c.index_of(&f).expect("face closure");
                w[d - 1][i]
            }).fold(f64::NEG_INFINITY, f64::max)
        }).collect();
        w.push(wd);
    }

    w
}

#[cfg(test)]
mod tests {
    use crate::metric::euclidean;
    use super::*;

    fn unit_triangle() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![0.5, 0.75f64.sqrt()],
        ]
    }

    #[test]
    fn parse_expansion() {
        assert_eq!("inductive".parse::<Expansion>().unwrap(), Expansion::Inductive);
        assert_eq!("incremental".parse::<Expansion>().unwrap(), Expansion::Incremental);
        assert!("magic".parse::<Expansion>().is_err());
    }

    #[test]
    fn small_scale_no_edges() {
        let (c, _) = vietoris_rips(&unit_triangle(), 0.5, 2, Expansion::Incremental, false, euclidean).unwrap();

        assert_eq!(c.size(0), 3);
        assert_eq!(c.size(1), 0);
    }

    #[test]
    fn full_triangle() {
        let (c, _) = vietoris_rips(&unit_triangle(), 1.1, 2, Expansion::Incremental, false, euclidean).unwrap();

        assert_eq!(c.size(0), 3);
        assert_eq!(c.size(1), 3);
        assert_eq!(c.size(2), 1);
    }

    #[test]
    fn max_dim_caps_expansion() {
        let (c, _) = vietoris_rips(&unit_triangle(), 1.1, 1, Expansion::Incremental, false, euclidean).unwrap();

        assert_eq!(c.size(1), 3);
        assert_eq!(c.size(2), 0);
    }

    #[test]
    fn inductive_matches_incremental() {
        let points = vec![
            vec![0.0, 0.0], vec![1.0, 0.0], vec![2.0, 0.0],
            vec![0.0, 1.0], vec![1.0, 1.0], vec![2.0, 1.0],
        ];

        let (a, _) = vietoris_rips(&points, 1.5, 3, Expansion::Inductive, false, euclidean).unwrap();
        let (b, _) = vietoris_rips(&points, 1.5, 3, Expansion::Incremental, false, euclidean).unwrap();

        assert_eq!(a.dim(), b.dim());
        for d in 0..=a.dim() {
            let mut xs = a.cells(d).cloned().collect_vec();
            let mut ys = b.cells(d).cloned().collect_vec();
            xs.sort();
            ys.sort();
            assert_eq!(xs, ys, "cells differ at dim {d}");
        }
    }

    #[test]
    fn monotone_in_scale() {
        let points = unit_triangle();
        let (small, _) = vietoris_rips(&points, 0.9, 2, Expansion::Incremental, false, euclidean).unwrap();
        let (large, _) = vietoris_rips(&points, 1.2, 2, Expansion::Incremental, false, euclidean).unwrap();

        for d in 0..=small.dim() {
            for s in small.cells(d) {
                assert!(large.contains(s));
            }
        }
    }

    #[test]
    fn weights() {
        let (_c, w) = vietoris_rips(&unit_triangle(), 1.1, 2, Expansion::Incremental, true, euclidean).unwrap();
        let w = w.unwrap();

        assert_eq!(w.len(), 3);
        assert_eq!(w[0], vec![0.0; 3]);
        assert_eq!(w[1].len(), 3);
        assert_eq!(w[2].len(), 1);

        // triangle enters at its longest edge
        let longest = w[1].iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(w[2][0], longest);
    }

    #[test]
    fn zero_max_dim_rejected() {
        let e = vietoris_rips(&unit_triangle(), 1.0, 0, Expansion::Incremental, false, euclidean);
        assert!(matches!(e, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn face_closure() {
        let points = vec![
            vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0],
        ];
        let (c, _) = vietoris_rips(&points, 1.5, 3, Expansion::Incremental, false, euclidean).unwrap();

        for d in 1..=c.dim() {
            for s in c.cells(d) {
                for f in s.faces() {
                    assert!(c.contains(&f));
                }
            }
        }
    }
}
