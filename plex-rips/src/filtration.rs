use std::fmt::Display;
use std::io::{BufRead, Write};

use ahash::AHashMap;
use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::{Error, Result, Simplex, SimplicialComplex, Weights};

pub type FiltrationValue = OrderedFloat<f64>;

// A face-respecting total order on the cells of a complex: triples
// (dim, index, value), sorted by (value, dim) with ties kept stable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filtration {
    complex: SimplicialComplex,
    order: Vec<(usize, usize, FiltrationValue)>,
    divisions: Option<usize>
}

impl Filtration {
    // filtration values by insertion order: 1, 2, 3, ...
    pub fn new(complex: SimplicialComplex) -> Self {
        let mut k = 0;
        let order = (0..=complex.dim()).flat_map(|d| {
            (0..complex.size(d)).map(|i| {
                k += 1;
                (d, i, OrderedFloat(k as f64))
            }).collect_vec()
        }).collect_vec();

        Self { complex, order, divisions: None }
    }

    pub fn with_weights(complex: SimplicialComplex, weights: &Weights) -> Result<Self> {
        for d in 0..=complex.dim() {
            let given = weights.get(d).map_or(0, |w| w.len());
            if given != complex.size(d) {
                return Err(Error::InvalidInput(
                    format!("{} weights given for {} cells of dim {d}", given, complex.size(d))
                ))
            }
        }

        let mut order = (0..=complex.dim()).flat_map(|d|
            (0..complex.size(d)).map(|i|
                (d, i, OrderedFloat(weights[d][i]))
            ).collect_vec()
        ).collect_vec();

        order.sort_by_key(|&(d, _, v)| (v, d));

        Ok(Self { complex, order, divisions: None })
    }

    pub fn with_divisions(mut self, n: usize) -> Self {
        self.divisions = if n > 0 { Some(n) } else { None };
        self
    }

    pub fn complex(&self) -> &SimplicialComplex {
        &self.complex
    }

    pub fn divisions(&self) -> Option<usize> {
        self.divisions
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn order(&self) -> &[(usize, usize, FiltrationValue)] {
        &self.order
    }

    pub fn value_of(&self, s: &Simplex) -> Option<f64> {
        let d = s.dim();
        let i = self.complex.index_of(s)?;
        self.order.iter()
            .find(|&&(d1, i1, _)| d1 == d && i1 == i)
            .map(|&(_, _, v)| v.into_inner())
    }

    // Inserts `s` at value `v`, splicing the newly created cells (faces
    // first) after every entry of value <= v and before the first entry
    // of value > v. Created faces inherit `v`.
    pub fn push(&mut self, s: Simplex, v: f64, recursive: bool) -> Result<Vec<Simplex>> {
        let added = self.complex.add(s, recursive)?;

        let v = OrderedFloat(v);
        let at = self.order.partition_point(|&(_, _, w)| w <= v);

        let triples = added.iter().map(|s| {
            let d = s.dim();
            let i = self.complex.index_of(s).expect("just added");
            (d, i, v)
        }).collect_vec();

        self.order.splice(at..at, triples);

        Ok(added)
    }

    // One step per distinct value, or `divisions` aggregated steps over
    // the value range.
    pub fn steps(&self) -> Vec<(f64, Vec<(usize, usize)>)> {
        if self.order.is_empty() {
            return vec![]
        }

        let Some(n) = self.divisions else {
            let mut res: Vec<(f64, Vec<(usize, usize)>)> = vec![];
            for &(d, i, v) in self.order.iter() {
                let v = v.into_inner();
                match res.last_mut() {
                    Some((v0, cells)) if *v0 == v => cells.push((d, i)),
                    _ => res.push((v, vec![(d, i)])),
                }
            }
            return res
        };

        let lo = self.order.first().unwrap().2.into_inner();
        let hi = self.order.last().unwrap().2.into_inner();

        if hi == lo {
            let cells = self.order.iter().map(|&(d, i, _)| (d, i)).collect_vec();
            return vec![(hi, cells)]
        }

        let width = (hi - lo) / n as f64;
        let mut res = Vec::with_capacity(n);
        let mut it = self.order.iter().peekable();

        for k in 0..n {
            let end = lo + (k + 1) as f64 * width;
            let mut cells = vec![];

            while let Some(&&(d, i, v)) = it.peek() {
                let v = v.into_inner();
                if v < end || (k == n - 1 && v <= hi) {
                    cells.push((d, i));
                    it.next();
                } else {
                    break
                }
            }

            res.push((end, cells));
        }

        res
    }

    // One sparse column per cell in filtration order, holding the
    // positions of its faces. With `reduced`, a leading augmentation
    // column is added and vertices point at it.
    pub fn combined_boundary_matrix(&self, reduced: bool) -> Vec<Vec<usize>> {
        let offset = usize::from(reduced);

        let hasher = ahash::RandomState::with_seeds(0, 0, 0, 0);
        let mut pos = AHashMap::with_capacity_and_hasher(self.order.len(), hasher);
        for (p, &(d, i, _)) in self.order.iter().enumerate() {
            pos.insert((d, i), p + offset);
        }

        let mut cols = Vec::with_capacity(self.order.len() + offset);

        if reduced {
            cols.push(vec![]);
        }

        for &(d, i, _) in self.order.iter() {
            let cell = self.complex.cell(d, i).expect("indexed cell");

            let col = if d == 0 {
                if reduced { vec![0] } else { vec![] }
            } else {
                cell.faces().map(|f| {
                    let fi = self.complex.index_of(&f).expect("face closure");
                    pos[&(d - 1, fi)]
                }).sorted().collect_vec()
            };

            cols.push(col);
        }

        cols
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        for &(d, i, v) in self.order.iter() {
            let cell = self.complex.cell(d, i).expect("indexed cell");
            let vs = cell.vertices().iter().join(",");
            writeln!(w, "{},{}", vs, fmt_value(v.into_inner()))?;
        }
        Ok(())
    }

    // Reads the line-oriented format back; lines must be pre-closed
    // under faces.
    pub fn read_from<B: BufRead>(r: B) -> Result<Filtration> {
        let mut flt = Filtration::default();

        for (k, line) in r.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue
            }

            let parse_err = |msg: &str| Error::Parse { line: k + 1, msg: msg.to_string() };

            let mut tokens = line.split(',').collect_vec();
            if tokens.len() < 2 {
                return Err(parse_err("expected vertices and a value"))
            }

            let v = tokens.pop().unwrap().trim().parse::<f64>()
                .map_err(|e| parse_err(&e.to_string()))?;

            let vs = tokens.iter().map(|t|
                t.trim().parse::<usize>().map_err(|e| parse_err(&e.to_string()))
            ).collect::<Result<Vec<_>>>()?;

            let s = Simplex::new(vs)?;
            flt.push(s, v, false)?;
        }

        Ok(flt)
    }

    // One line per column: the cell dimension followed by the positions
    // of its faces. Vertices emit a single `0`.
    pub fn write_boundary_matrix<W: Write>(&self, w: &mut W, one_based: bool) -> std::io::Result<()> {
        let offset = usize::from(one_based);

        let hasher = ahash::RandomState::with_seeds(0, 0, 0, 0);
        let mut pos = AHashMap::with_capacity_and_hasher(self.order.len(), hasher);
        for (p, &(d, i, _)) in self.order.iter().enumerate() {
            pos.insert((d, i), p + offset);
        }

        for &(d, i, _) in self.order.iter() {
            if d == 0 {
                writeln!(w, "0")?;
                continue
            }

            let cell = self.complex.cell(d, i).expect("indexed cell");
            let faces = cell.faces().map(|f| {
                let fi = self.complex.index_of(&f).expect("face closure");
                pos[&(d - 1, fi)]
            }).sorted().join(" ");

            writeln!(w, "{} {}", d, faces)?;
        }

        Ok(())
    }
}

fn fmt_value(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

impl Display for Filtration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for &(d, i, v) in self.order.iter() {
            let cell = self.complex.cell(d, i).expect("indexed cell");
            writeln!(f, "{} @ {}", cell, fmt_value(v.into_inner()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s<const N: usize>(vs: [usize; N]) -> Simplex {
        Simplex::new(vs).unwrap()
    }

    fn sample() -> Filtration {
        let mut flt = Filtration::default();
        flt.push(s([1]), 1.0, false).unwrap();
        flt.push(s([2]), 2.0, false).unwrap();
        flt.push(s([1, 2]), 3.0, true).unwrap();
        flt.push(s([1, 3]), 4.0, true).unwrap();
        flt
    }

    #[test]
    fn push_splices_in_value_order() {
        let flt = sample();

        assert_eq!(flt.len(), 5);
        assert_eq!(flt.order(), &[
            (0, 0, OrderedFloat(1.0)),
            (0, 1, OrderedFloat(2.0)),
            (1, 0, OrderedFloat(3.0)),
            (0, 2, OrderedFloat(4.0)),
            (1, 1, OrderedFloat(4.0)),
        ]);
    }

    #[test]
    fn push_into_middle() {
        let mut flt = sample();
        flt.push(s([4]), 2.5, false).unwrap();

        assert_eq!(flt.order()[2], (0, 3, OrderedFloat(2.5)));
    }

    #[test]
    fn push_missing_face() {
        let mut flt = Filtration::default();
        let e = flt.push(s([1, 2]), 1.0, false);

        assert!(matches!(e, Err(Error::FaceMissing { .. })));
    }

    #[test]
    fn faces_come_earlier() {
        let flt = sample();

        for &(d, i, _) in flt.order() {
            if d == 0 { continue }
            let cell = flt.complex().cell(d, i).unwrap();
            let p = flt.order().iter().position(|&(d1, i1, _)| (d1, i1) == (d, i)).unwrap();

            for f in cell.faces() {
                let fi = flt.complex().index_of(&f).unwrap();
                let fp = flt.order().iter().position(|&(d1, i1, _)| (d1, i1) == (d - 1, fi)).unwrap();
                assert!(fp < p);
            }
        }
    }

    #[test]
    fn steps_per_value() {
        let flt = sample();
        let steps = flt.steps();

        assert_eq!(steps, vec![
            (1.0, vec![(0, 0)]),
            (2.0, vec![(0, 1)]),
            (3.0, vec![(1, 0)]),
            (4.0, vec![(0, 2), (1, 1)]),
        ]);
    }

    #[test]
    fn steps_divided() {
        let flt = sample().with_divisions(3);
        let steps = flt.steps();

        assert_eq!(steps.len(), 3);

        // intervals of width 1 over [1, 4]
        assert_eq!(steps[0].1, vec![(0, 0)]);               // [1, 2)
        assert_eq!(steps[1].1, vec![(0, 1)]);               // [2, 3)
        assert_eq!(steps[2].1, vec![(1, 0), (0, 2), (1, 1)]); // [3, 4]
    }

    #[test]
    fn combined_boundary_matrix() {
        let flt = sample();
        let cols = flt.combined_boundary_matrix(false);

        assert_eq!(cols, vec![
            vec![],
            vec![],
            vec![0, 1],
            vec![],
            vec![0, 3],
        ]);

        let nnz: usize = cols.iter().map(|c| c.len()).sum();
        assert_eq!(nnz, 4);
    }

    #[test]
    fn combined_boundary_matrix_reduced() {
        let flt = sample();
        let cols = flt.combined_boundary_matrix(true);

        assert_eq!(cols, vec![
            vec![],
            vec![0],
            vec![0],
            vec![1, 2],
            vec![0],
            vec![1, 4],
        ]);
    }

    #[test]
    fn serialize() {
        let flt = sample();
        let mut buf = vec![];
        flt.write_to(&mut buf).unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "1,1\n2,2\n1,2,3\n3,4\n1,3,4\n");
    }

    #[test]
    fn round_trip() {
        let flt = sample();
        let mut buf = vec![];
        flt.write_to(&mut buf).unwrap();

        let back = Filtration::read_from(buf.as_slice()).unwrap();

        assert_eq!(flt, back);
    }

    #[test]
    fn boundary_matrix_dump() {
        let flt = sample();
        let mut buf = vec![];
        flt.write_boundary_matrix(&mut buf, false).unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "0\n0\n1 0 1\n0\n1 0 3\n");
    }

    #[test]
    fn from_complex_by_insertion_order() {
        let c = SimplicialComplex::from_cells([s([1, 2])]).unwrap();
        let flt = Filtration::new(c);

        assert_eq!(flt.order(), &[
            (0, 0, OrderedFloat(1.0)),
            (0, 1, OrderedFloat(2.0)),
            (1, 0, OrderedFloat(3.0)),
        ]);
    }

    #[test]
    fn with_weights_sorted() {
        let c = SimplicialComplex::from_cells([s([0, 1])]).unwrap();
        let w: Weights = vec![vec![0.0, 0.0], vec![1.5]];
        let flt = Filtration::with_weights(c, &w).unwrap();

        assert_eq!(flt.order(), &[
            (0, 0, OrderedFloat(0.0)),
            (0, 1, OrderedFloat(0.0)),
            (1, 0, OrderedFloat(1.5)),
        ]);
    }

    #[test]
    fn with_weights_length_mismatch() {
        let c = SimplicialComplex::from_cells([s([0, 1])]).unwrap();
        let w: Weights = vec![vec![0.0], vec![1.5]];

        assert!(Filtration::with_weights(c, &w).is_err());
    }

    #[test]
    fn value_of() {
        let flt = sample();
        assert_eq!(flt.value_of(&s([1, 2])), Some(3.0));
        assert_eq!(flt.value_of(&s([9])), None);
    }
}
