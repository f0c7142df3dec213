// src/data.rs
//
// Flat table data shared by every exporter.
//
// - DataSet:  headers + string rows, the shape `csv` and `file` write.
// - Tabular:  a typed record that knows its column names and how to render a row.
// - ToCell:   one value -> one cell. Absent values render as an empty cell.

use chrono::NaiveDate;

use crate::config::options::TableKind;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataSet {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl DataSet {
    pub fn new(headers: Option<Vec<String>>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Render typed records with their canonical headers.
    pub fn from_records<T: Tabular>(records: &[T]) -> Self {
        Self {
            headers: Some(T::headers()),
            rows: records.iter().map(Tabular::to_row).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append rows of another set. Headers are kept from `self` when present.
    pub fn extend(&mut self, other: DataSet) {
        if self.headers.is_none() {
            self.headers = other.headers;
        }
        self.rows.extend(other.rows);
    }

    /// Index of a header by name (exact match).
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.as_ref()?.iter().position(|h| h == name)
    }
}

/// A named table ready for export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedTable {
    pub kind: TableKind,
    pub data: DataSet,
}

pub trait Tabular {
    const HEADERS: &'static [&'static str];

    fn to_row(&self) -> Vec<String>;

    fn headers() -> Vec<String> {
        Self::HEADERS.iter().map(|h| s!(*h)).collect()
    }
}

pub trait ToCell {
    fn to_cell(&self) -> String;
}

impl ToCell for String {
    fn to_cell(&self) -> String {
        self.clone()
    }
}

impl ToCell for str {
    fn to_cell(&self) -> String {
        s!(self)
    }
}

impl ToCell for bool {
    fn to_cell(&self) -> String {
        if *self { s!("true") } else { s!("false") }
    }
}

macro_rules! int_cell {
    ($($t:ty),*) => {
        $(impl ToCell for $t {
            fn to_cell(&self) -> String {
                self.to_string()
            }
        })*
    };
}

int_cell!(u8, u16, u32, u64, usize, i32, i64);

impl ToCell for f64 {
    /// Whole numbers print without a fraction ("6", not "6.0").
    fn to_cell(&self) -> String {
        if *self == 0.0 {
            s!("0")
        } else if self.is_finite() && self.fract() == 0.0 {
            format!("{:.0}", self)
        } else {
            self.to_string()
        }
    }
}

impl ToCell for NaiveDate {
    fn to_cell(&self) -> String {
        self.format("%Y-%m-%d").to_string()
    }
}

impl<T: ToCell> ToCell for Option<T> {
    fn to_cell(&self) -> String {
        match self {
            Some(v) => v.to_cell(),
            None => s!(),
        }
    }
}

impl<T: ToCell + ?Sized> ToCell for &T {
    fn to_cell(&self) -> String {
        (**self).to_cell()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair {
        name: Option<String>,
        value: f64,
    }

    impl Tabular for Pair {
        const HEADERS: &'static [&'static str] = &["name", "value"];

        fn to_row(&self) -> Vec<String> {
            row![self.name, self.value]
        }
    }

    #[test]
    fn absent_values_are_empty_cells() {
        let none: Option<u32> = None;
        assert_eq!(none.to_cell(), "");
        assert_eq!(Some(3u32).to_cell(), "3");
    }

    #[test]
    fn whole_floats_drop_fraction() {
        assert_eq!(6.0f64.to_cell(), "6");
        assert_eq!(52.3f64.to_cell(), "52.3");
        assert_eq!((-10.0f64).to_cell(), "-10");
        assert_eq!((-0.0f64).to_cell(), "0");
    }

    #[test]
    fn from_records_uses_static_headers() {
        let ds = DataSet::from_records(&[
            Pair { name: Some(s!("a")), value: 1.5 },
            Pair { name: None, value: 2.0 },
        ]);
        assert_eq!(ds.headers, Some(vec![s!("name"), s!("value")]));
        assert_eq!(ds.rows[1], vec![s!(""), s!("2")]);
        assert_eq!(ds.column("value"), Some(1));
    }
}
