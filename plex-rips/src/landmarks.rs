use std::str::FromStr;

use plex_matrix::dense::Mat;
use plex_matrix::MatTrait;
use rand::Rng;
use rand::seq::index::sample;

use crate::{Error, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LandmarkMethod {
    Random,
    #[default]
    MaxMin
}

impl FromStr for LandmarkMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "random" => Ok(LandmarkMethod::Random),
            "maxmin" => Ok(LandmarkMethod::MaxMin),
            _ => Err(Error::InvalidMethod(s.to_string()))
        }
    }
}

// Selects `l` landmark indices from the `n` points behind the given
// pairwise distance matrix.
pub fn select_landmarks<G>(dists: &Mat<f64>, l: usize, method: LandmarkMethod, rng: &mut G) -> Result<Vec<usize>>
where G: Rng {
    let n = dists.nrows();

    if l == 0 || l > n {
        return Err(Error::InvalidInput(format!("cannot select {l} landmarks from {n} points")))
    }

    let res = match method {
        LandmarkMethod::Random => {
            let mut ids = sample(rng, n, l).into_vec();
            ids.sort_unstable();
            ids
        }
        LandmarkMethod::MaxMin => maxmin(dists, l, rng.gen_range(0..n))
    };

    Ok(res)
}

// greedy farthest-point: each round picks the point maximizing the
// distance to the already chosen set.
fn maxmin(dists: &Mat<f64>, l: usize, seed: usize) -> Vec<usize> {
    let n = dists.nrows();

    let mut chosen = vec![seed];
    let mut min_dist: Vec<f64> = (0..n).map(|i| dists[(seed, i)]).collect();
    min_dist[seed] = -1.0; // never re-picked

    while chosen.len() < l {
        let (next, _) = min_dist.iter().enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .unwrap();

        chosen.push(next);

        for i in 0..n {
            let d = dists[(next, i)];
            if d < min_dist[i] {
                min_dist[i] = d;
            }
        }
        min_dist[next] = -1.0;
    }

    chosen.sort_unstable();
    chosen
}

// The (l × n)-matrix of distances from each landmark to every point.
pub fn landmark_distances(dists: &Mat<f64>, landmarks: &[usize]) -> Mat<f64> {
    let n = dists.ncols();
    let l = landmarks.len();

    let mut d = Mat::zero((l, n));
    for (a, &i) in landmarks.iter().enumerate() {
        for j in 0..n {
            d[(a, j)] = dists[(i, j)];
        }
    }

    d
}
