use std::fmt::Display;
use itertools::Itertools;

/// `(a, b, c)`
pub fn tuple<I>(entries: I) -> String
where I: IntoIterator, I::Item: Display {
    format!("({})", entries.into_iter().join(", "))
}

/// `(a,b;c,d)`, rows separated by `;`.
pub fn grid<I, R>(rows: I) -> String
where I: IntoIterator<Item = R>, R: IntoIterator, R::Item: Display {
    let body = rows.into_iter().map(|r|
        r.into_iter().join(",")
    ).join(";");
    format!("({body})")
}
