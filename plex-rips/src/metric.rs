use plex_matrix::dense::Mat;

pub fn euclidean(p: &[f64], q: &[f64]) -> f64 {
    assert_eq!(p.len(), q.len());
    p.iter().zip(q).map(|(x, y)| {
        let d = x - y;
        d * d
    }).sum::<f64>().sqrt()
}

// symmetric, zero-diagonal
pub fn pairwise_distances<P, F>(points: &[P], metric: F) -> Mat<f64>
where P: AsRef<[f64]>, F: Fn(&[f64], &[f64]) -> f64 {
    let n = points.len();
    let mut d = Mat::zero((n, n));

    for i in 0..n {
        for j in i+1..n {
            let v = metric(points[i].as_ref(), points[j].as_ref());
            d[(i, j)] = v;
            d[(j, i)] = v;
        }
    }

    d
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dist() {
        assert_eq!(euclidean(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
        assert_eq!(euclidean(&[1.0], &[1.0]), 0.0);
    }

    #[test]
    fn pairwise() {
        let points = vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![0.0, 1.0],
        ];
        let d = pairwise_distances(&points, euclidean);

        assert_eq!(d[(0, 0)], 0.0);
        assert_eq!(d[(0, 1)], 1.0);
        assert_eq!(d[(1, 0)], 1.0);
        assert_eq!(d[(1, 2)], 2f64.sqrt());
    }
}
