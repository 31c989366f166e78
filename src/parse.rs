//! String parsers for the command line front end.  The renderer itself
//! never sees strings.

use std::str::FromStr;

use crate::planes::ComplexPlane;

/// Given a string and a separator, returns the two values
/// separated by the separator.
pub fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

/// Parses "WxH" into a width and height.
pub fn parse_size(s: &str) -> Option<(usize, usize)> {
    parse_pair(s, 'x')
}

/// Parses "reMin:reMax:imMin:imMax".  Exactly four fields, all
/// floating point.
pub fn parse_rect(s: &str) -> Option<ComplexPlane> {
    let fields: Vec<f64> = s
        .split(':')
        .map(f64::from_str)
        .collect::<Result<_, _>>()
        .ok()?;
    match fields.as_slice() {
        [re_min, re_max, im_min, im_max] => {
            Some(ComplexPlane::new(*re_min, *re_max, *im_min, *im_max))
        }
        _ => None,
    }
}
