use std::cmp::Ordering;
use std::hash::Hash;

use crate::Elem;

pub trait Gen: Elem + Hash + Ord {
    fn cmp_for_display(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}
