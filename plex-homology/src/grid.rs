use std::ops::Index;

use ahash::AHashMap;
use itertools::Itertools;

pub type GridIter = std::vec::IntoIter<isize>;

// A degree-indexed sequence with an out-of-support default.
#[derive(Clone)]
pub struct Grid<E> {
    support: Vec<isize>,
    data: AHashMap<isize, E>,
    default: E
}

impl<E> Grid<E> {
    pub fn generate<It, F>(support: It, mut e_map: F) -> Self
    where
        It: IntoIterator<Item = isize>,
        F: FnMut(isize) -> E,
        E: Default
    {
        let support = support.into_iter().collect_vec();
        let data = support.iter().map(|&i| (i, e_map(i))).collect();
        Self { support, data, default: E::default() }
    }

    pub fn support(&self) -> GridIter {
        self.support.clone().into_iter()
    }

    pub fn is_supported(&self, i: isize) -> bool {
        self.data.contains_key(&i)
    }

    pub fn get(&self, i: isize) -> &E {
        self.data.get(&i).unwrap_or(&self.default)
    }

    pub fn iter(&self) -> impl Iterator<Item = (isize, &E)> {
        self.support.iter().map(|&i| (i, self.get(i)))
    }
}

impl<E> Default for Grid<E>
where E: Default {
    fn default() -> Self {
        Self {
            support: vec![],
            data: AHashMap::default(),
            default: E::default()
        }
    }
}

impl<E> Index<isize> for Grid<E> {
    type Output = E;
    fn index(&self, i: isize) -> &Self::Output {
        self.get(i)
    }
}

impl<E> FromIterator<(isize, E)> for Grid<E>
where E: Default {
    fn from_iter<T: IntoIterator<Item = (isize, E)>>(iter: T) -> Self {
        let mut support = vec![];
        let mut data = AHashMap::new();
        for (i, e) in iter {
            support.push(i);
            data.insert(i, e);
        }
        Self { support, data, default: E::default() }
    }
}
