use std::fmt::Display;
use itertools::Itertools;

pub fn paren_expr<S>(s: S) -> String
where S: Display {
    let s = s.to_string();
    if s.contains(' ') {
        format!("({s})")
    } else {
        s
    }
}

pub fn subscript(i: isize) -> String {
    if i == 0 { return String::from('\u{2080}') }

    let (mut res, i) = if i > 0 {
        (vec![], i as usize)
    } else {
        (vec!['\u{208B}'], -i as usize)
    };

    let mut s = digits(i).into_iter().map(|d| {
        char::from_u32(('\u{2080}' as u32) + (d as u32)).unwrap()
    }).collect_vec();

    res.append(&mut s);
    res.iter().collect()
}

pub fn superscript(i: isize) -> String {
    if i == 0 { return String::from('\u{2070}') }

    let (mut res, i) = if i > 0 {
        (vec![], i as usize)
    } else {
        (vec!['\u{207B}'], -i as usize)
    };

    let mut s = digits(i).into_iter().map(|d| {
        match d {
            1 => '\u{00B9}',
            2 => '\u{00B2}',
            3 => '\u{00B3}',
            _ => char::from_u32(('\u{2070}' as u32) + (d as u32)).unwrap()
        }
    }).collect_vec();

    res.append(&mut s);
    res.iter().collect()
}

fn digits(mut i: usize) -> Vec<u8> {
    let mut res = vec![];
    while i > 0 {
        res.push((i % 10) as u8);
        i /= 10;
    }
    res.reverse();
    res
}
