use itertools::Itertools;
use log::debug;
use plex_matrix::MatTrait;
use plex_matrix::dense::Mat;

use crate::{Error, Expansion, Result, Simplex, SimplicialComplex, Weights};
use crate::rips::assign_weights;

// Builds the witness complex over `l` landmarks: `dists` is the
// (l × n)-matrix of landmark-to-point distances, and a non-landmark point
// i witnesses the edge (a, b) when both endpoints lie within eps + m_i of
// it. The relaxation m_i is the nu-th smallest distance from any landmark
// to point i (nu = 0 gives the strict complex).
pub fn witness_complex(dists: &Mat<f64>, eps: f64, nu: usize, max_dim: usize, expansion: Expansion, with_weights: bool) -> Result<(SimplicialComplex, Option<Weights>)> {
    if nu > 2 {
        return Err(Error::InvalidInput(format!("nu must be 0, 1 or 2, got {nu}")))
    }
    if eps < 0.0 {
        return Err(Error::InvalidInput("scale must be non-negative".into()))
    }
    if max_dim == 0 {
        return Err(Error::InvalidInput("max_dim must be positive".into()))
    }

    let (l, n) = dists.shape();

    if n == 0 || l == 0 {
        return Err(Error::InvalidInput("witness complex needs landmarks and points".into()))
    }
    if l > n {
        return Err(Error::InvalidInput("more landmarks than points".into()))
    }

    // per-point relaxation
    let m = (0..n).map(|i| {
        if nu == 0 {
            0.0
        } else {
            let mut col = (0..l).map(|a| dists[(a, i)]).collect_vec();
            col.sort_by(|x, y| x.partial_cmp(y).unwrap());
            col[nu - 1]
        }
    }).collect_vec();

    let mut c = SimplicialComplex::new();
    for v in 0..l {
        c.add(Simplex::vertex(v), false)?;
    }

    // 1-skeleton: an edge needs at least one witness
    let mut adj = vec![vec![false; l]; l];
    let mut edge_w = Mat::zero((l, l));

    for (a, b) in (0..l).tuple_combinations() {
        let w = (0..n).map(|i| {
            f64::max(dists[(a, i)], dists[(b, i)]) - m[i]
        }).fold(f64::INFINITY, f64::min);

        if w <= eps {
            adj[a][b] = true;
            adj[b][a] = true;
            edge_w[(a, b)] = w.max(0.0);
            edge_w[(b, a)] = edge_w[(a, b)];
            c.add(Simplex::edge(a, b)?, false)?;
        }
    }

    let max_m = m.iter().cloned().fold(0.0, f64::max);
    let max_degree = (0..n).map(|i|
        (0..l).filter(|&j| dists[(j, i)] <= eps + max_m).count()
    ).max().unwrap_or(0);

    let k_max = max_dim.min(max_degree);

    debug!("witness: l = {l}, n = {n}, eps = {eps}, nu = {nu}, k_max = {k_max}, edges = {}", c.size(1));

    crate::rips::expand(&mut c, &adj, k_max, expansion)?;

    let w = if with_weights {
        Some(assign_weights(&c, |e| {
            let vs = e.vertices();
            edge_w[(vs[0], vs[1])]
        }))
    } else {
        None
    };

    Ok((c, w))
}

// End-to-end variant: selects `n_landmarks` landmarks from the point
// cloud and builds the witness complex over them. Returns the chosen
// landmark indices along with the complex.
#[allow(clippy::too_many_arguments)]
pub fn witness<P, F, G>(
    points: &[P],
    n_landmarks: usize,
    method: crate::landmarks::LandmarkMethod,
    eps: f64,
    nu: usize,
    max_dim: usize,
    expansion: Expansion,
    with_weights: bool,
    metric: F,
    rng: &mut G,
) -> Result<(SimplicialComplex, Option<Weights>, Vec<usize>)>
where P: AsRef<[f64]>, F: Fn(&[f64], &[f64]) -> f64, G: rand::Rng {
    use crate::landmarks::{landmark_distances, select_landmarks};
    use crate::metric::pairwise_distances;

    let dists = pairwise_distances(points, metric);
    let ls = select_landmarks(&dists, n_landmarks, method, rng)?;
    let ld = landmark_distances(&dists, &ls);

    let (c, w) = witness_complex(&ld, eps, nu, max_dim, expansion, with_weights)?;
    Ok((c, w, ls))
}
