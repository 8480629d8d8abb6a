use std::fmt::{Debug, Display};

use itertools::Itertools;
use plex::{Elem, Ring, RingOps, Sign};
use plex::chain::{Chain, Gen};

use crate::{Error, Result};

pub type Vertex = usize;

// An abstract simplex: distinct vertex labels, kept sorted.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Simplex {
    vertices: Vec<Vertex>
}

impl Simplex {
    pub fn new<I>(vertices: I) -> Result<Self>
    where I: IntoIterator<Item = Vertex> {
        let mut vs = vertices.into_iter().collect_vec();
        if vs.is_empty() {
            return Err(Error::InvalidInput("a simplex needs at least one vertex".into()))
        }

        vs.sort_unstable();

        for (v, w) in vs.iter().tuple_windows() {
            if v == w {
                return Err(Error::DuplicateVertex(*v))
            }
        }

        Ok(Self { vertices: vs })
    }

    pub fn vertex(v: Vertex) -> Self {
        Self { vertices: vec![v] }
    }

    pub fn edge(u: Vertex, v: Vertex) -> Result<Self> {
        Self::new([u, v])
    }

    pub fn dim(&self) -> usize {
        self.vertices.len() - 1
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn contains(&self, v: Vertex) -> bool {
        self.vertices.binary_search(&v).is_ok()
    }

    // the (dim - 1)-faces, omitting vertex 0 first.
    pub fn faces(&self) -> impl Iterator<Item = Simplex> + '_ {
        let d = self.dim();
        (0 .. d + 1).filter(move |_| d > 0).map(move |i| {
            let vertices = self.vertices.iter()
                .enumerate()
                .filter_map(|(k, &v)| (k != i).then_some(v))
                .collect_vec();
            Simplex { vertices }
        })
    }

    pub fn joined(&self, v: Vertex) -> Result<Simplex> {
        if self.contains(v) {
            return Err(Error::DuplicateVertex(v))
        }

        let i = self.vertices.partition_point(|&w| w < v);
        let mut vertices = self.vertices.clone();
        vertices.insert(i, v);

        Ok(Simplex { vertices })
    }

    pub fn boundary<R>(&self) -> Chain<Simplex, R>
    where R: Ring, for<'x> &'x R: RingOps<R> {
        self.faces().enumerate().map(|(i, f)|
            (f, R::from_sign(Sign::from_parity(i)))
        ).collect()
    }
}

impl Display for Simplex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.vertices.iter().join(","))
    }
}

impl Debug for Simplex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Elem for Simplex {
    fn math_symbol() -> String {
        String::from("Δ")
    }
}

impl Gen for Simplex {}

#[cfg(test)]
mod tests {
    use num_traits::Zero;
    use super::*;

    fn s<const N: usize>(vs: [Vertex; N]) -> Simplex {
        Simplex::new(vs).unwrap()
    }

    #[test]
    fn init() {
        let x = s([3, 1, 2]);
        assert_eq!(x.dim(), 2);
        assert_eq!(x.vertices(), &[1, 2, 3]);
    }

    #[test]
    fn duplicate_vertices() {
        let e = Simplex::new([1, 2, 1]);
        assert!(matches!(e, Err(Error::DuplicateVertex(1))));
    }

    #[test]
    fn empty() {
        let e = Simplex::new([]);
        assert!(e.is_err());
    }

    #[test]
    fn eq() {
        assert_eq!(s([1, 2, 3]), s([3, 2, 1]));
        assert_ne!(s([1, 2, 3]), s([1, 2, 4]));
    }

    #[test]
    fn faces() {
        let x = s([1, 2, 3]);
        let fs = x.faces().collect::<Vec<_>>();

        assert_eq!(fs, vec![s([2, 3]), s([1, 3]), s([1, 2])]);
    }

    #[test]
    fn faces_of_vertex() {
        let x = s([1]);
        assert_eq!(x.faces().count(), 0);
    }

    #[test]
    fn joined() {
        let x = s([1, 3]);
        assert_eq!(x.joined(2).unwrap(), s([1, 2, 3]));
        assert!(x.joined(3).is_err());
    }

    #[test]
    fn contains() {
        let x = s([1, 3, 5]);
        assert!(x.contains(3));
        assert!(!x.contains(2));
    }

    #[test]
    fn boundary_edge() {
        let x = s([1, 2]);
        let dx = x.boundary::<i64>();

        assert_eq!(dx, Chain::from_iter([(s([2]), 1), (s([1]), -1)]));
    }

    #[test]
    fn boundary_triangle() {
        let x = s([1, 2, 3]);
        let dx = x.boundary::<i64>();

        assert_eq!(dx, Chain::from_iter([
            (s([2, 3]),  1),
            (s([1, 3]), -1),
            (s([1, 2]),  1),
        ]));
    }

    #[test]
    fn boundary_of_boundary() {
        let x = s([1, 2, 3, 4]);
        let dx = x.boundary::<i64>();
        let ddx = dx.apply(|f| f.boundary());

        assert!(ddx.is_zero());
    }

    #[test]
    fn boundary_of_vertex() {
        let x = s([1]);
        let dx = x.boundary::<i64>();

        assert!(dx.is_zero());
    }

    #[test]
    fn display() {
        assert_eq!(s([3, 1, 2]).to_string(), "[1,2,3]");
    }
}
