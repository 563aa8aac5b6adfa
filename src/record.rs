//! Splitting one input line into key and value.
//!

/// The fields found on one line.
///
/// A line yields zero fields when it is blank, one field when it has no
/// delimiter, and two fields otherwise.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Fields<'a> {
    Empty,
    Key(&'a str),
    KeyValue(&'a str, &'a str),
}

impl<'a> Fields<'a> {
    /// Number of fields, 0 to 2.
    pub fn len(&self) -> usize {
        match self {
            Fields::Empty => 0,
            Fields::Key(_) => 1,
            Fields::KeyValue(..) => 2,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Fields::Empty)
    }

    /// The fields as a vector, in line order.
    pub fn to_vec(&self) -> Vec<&'a str> {
        match *self {
            Fields::Empty => vec![],
            Fields::Key(k) => vec![k],
            Fields::KeyValue(k, v) => vec![k, v],
        }
    }
}

/// Splits `line` on the first `delimiter`.
///
/// Surrounding whitespace (including any line terminator) is trimmed first.
/// Later occurrences of the delimiter stay inside the value verbatim.
pub fn split_fields(line: &str, delimiter: char) -> Fields<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Fields::Empty;
    }
    match line.split_once(delimiter) {
        Some((key, value)) => Fields::KeyValue(key, value),
        None => Fields::Key(line),
    }
}

/// A single (key, value) pair read from the input.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Record {
    /// The key.
    pub key: String,
    /// The value, absent when the line held no delimiter.
    pub value: Option<String>,
}

impl Record {
    /// Construct a new record from the given key and value.
    pub fn new(key: impl Into<String>, value: Option<String>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// Parses one line. Returns [`None`] for blank lines.
    pub fn parse(line: &str, delimiter: char) -> Option<Self> {
        match split_fields(line, delimiter) {
            Fields::Empty => None,
            Fields::Key(key) => Some(Self::new(key, None)),
            Fields::KeyValue(key, value) => Some(Self::new(key, Some(value.to_string()))),
        }
    }

    /// Borrow the value, if any.
    #[inline]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Consumes the record and returns the value, using `""` when absent.
    ///
    /// This is what reducers see for a key-only line.
    #[inline]
    pub fn into_value(self) -> String {
        self.value.unwrap_or_default()
    }

    /// Consumes the record and returns key and value, using `""` for an
    /// absent value.
    #[inline]
    pub fn into_pair(self) -> (String, String) {
        (self.key, self.value.unwrap_or_default())
    }
}
