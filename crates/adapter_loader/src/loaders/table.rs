//! Shared CSV reading for the loaders.

use std::fmt::Display;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::LoadError;

/// A fully read CSV input with its header validated.
pub(crate) struct Table {
    file: String,
    headers: StringRecord,
    leading: usize,
    rows: Vec<(u64, StringRecord)>,
}

/// Opens `path` for one of the `read_*` loaders.
pub(crate) fn open(path: &Path) -> Result<(File, String), LoadError> {
    let file = path.display().to_string();
    match File::open(path) {
        Ok(handle) => Ok((handle, file)),
        Err(source) => Err(LoadError::Io { file, source }),
    }
}

impl Table {
    /// Reads every row of `reader`.
    ///
    /// The header must start with `leading` (case-insensitive); further
    /// header columns are allowed and are returned by [`Table::extra_headers`].
    /// Blank lines and lines starting with `#` are skipped.
    pub(crate) fn read<R: Read>(
        reader: R,
        file: &str,
        leading: &[&str],
    ) -> Result<Self, LoadError> {
        let mut csv = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);

        let csv_error = |source| LoadError::Csv {
            file: file.to_string(),
            source,
        };

        let headers = csv.headers().map_err(csv_error)?.clone();
        let matches = headers.len() >= leading.len()
            && leading
                .iter()
                .zip(headers.iter())
                .all(|(want, got)| want.eq_ignore_ascii_case(got));
        if !matches {
            return Err(LoadError::Malformed {
                file: file.to_string(),
                line: 1,
                message: format!(
                    "expected header starting with {}, found {}",
                    leading.join(","),
                    headers.iter().collect::<Vec<_>>().join(",")
                ),
            });
        }

        let mut rows = Vec::new();
        for record in csv.records() {
            let record = record.map_err(csv_error)?;
            let line = record.position().map_or(0, |p| p.line());
            rows.push((line, record));
        }

        Ok(Self {
            file: file.to_string(),
            headers,
            leading: leading.len(),
            rows,
        })
    }

    /// Input name used in errors.
    pub(crate) fn file(&self) -> &str {
        &self.file
    }

    /// Header columns after the leading ones.
    pub(crate) fn extra_headers(&self) -> impl Iterator<Item = &str> {
        self.headers.iter().skip(self.leading)
    }

    /// Data rows in file order.
    pub(crate) fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |(line, record)| Row {
            table: self,
            line: *line,
            record,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn malformed(&self, line: u64, message: impl Into<String>) -> LoadError {
        LoadError::Malformed {
            file: self.file.clone(),
            line,
            message: message.into(),
        }
    }
}

/// One data row.
pub(crate) struct Row<'a> {
    table: &'a Table,
    line: u64,
    record: &'a StringRecord,
}

impl<'a> Row<'a> {
    pub(crate) fn line(&self) -> u64 {
        self.line
    }

    /// Raw text of column `index`.
    pub(crate) fn text(&self, index: usize) -> &'a str {
        self.record.get(index).unwrap_or("")
    }

    /// Non-empty text of column `index`.
    pub(crate) fn required(&self, index: usize) -> Result<&'a str, LoadError> {
        let text = self.text(index);
        if text.is_empty() {
            return Err(self.malformed(format!("empty {}", self.column(index))));
        }
        Ok(text)
    }

    /// Column `index` parsed as a finite number.
    pub(crate) fn number(&self, index: usize) -> Result<f64, LoadError> {
        let text = self.text(index);
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(self.malformed(format!(
                "invalid number '{}' in {}",
                text,
                self.column(index)
            ))),
        }
    }

    /// Column `index` parsed with `FromStr`.
    pub(crate) fn parse<T>(&self, index: usize) -> Result<T, LoadError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.text(index)
            .parse()
            .map_err(|e: T::Err| self.malformed(format!("{} in {}", e, self.column(index))))
    }

    /// Every column from `start` onwards as numbers.
    pub(crate) fn numbers_from(&self, start: usize) -> Result<Vec<f64>, LoadError> {
        (start..self.record.len()).map(|i| self.number(i)).collect()
    }

    pub(crate) fn malformed(&self, message: impl Into<String>) -> LoadError {
        self.table.malformed(self.line, message)
    }

    pub(crate) fn duplicate(&self, key: impl Display) -> LoadError {
        LoadError::Duplicate {
            file: self.table.file.clone(),
            line: self.line,
            key: key.to_string(),
        }
    }

    fn column(&self, index: usize) -> String {
        match self.table.headers.get(index) {
            Some(name) if !name.is_empty() => format!("column {name}"),
            _ => format!("column {}", index + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVELS: &[&str] = &["RiskFactor", "BaseLevel"];

    #[test]
    fn test_header_is_case_insensitive_and_trimmed() {
        let table = Table::read(" riskfactor , BASELEVEL \nA,1\n".as_bytes(), "t", LEVELS).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.extra_headers().count(), 0);
    }

    #[test]
    fn test_wrong_header() {
        let err = Table::read("Name,Level\nA,1\n".as_bytes(), "levels.csv", LEVELS)
            .err()
            .unwrap();
        assert!(matches!(err, LoadError::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_ragged_row_rejected() {
        let err = Table::read("RiskFactor,BaseLevel\nA,1,2\n".as_bytes(), "t", LEVELS)
            .err()
            .unwrap();
        assert!(matches!(err, LoadError::Csv { .. }));
    }

    #[test]
    fn test_comments_skipped_and_lines_reported() {
        let content = "RiskFactor,BaseLevel\nA,1\n# comment\nB,oops\n";
        let table = Table::read(content.as_bytes(), "t", LEVELS).unwrap();
        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line(), 2);
        match rows[1].number(1) {
            Err(LoadError::Malformed { message, .. }) => {
                assert!(message.contains("BaseLevel"));
            }
            _ => panic!("Expected malformed number"),
        }
    }

    #[test]
    fn test_non_finite_numbers_rejected() {
        let table = Table::read("K,V\nA,NaN\nB,inf\n".as_bytes(), "t", &["K", "V"]).unwrap();
        for row in table.rows() {
            assert!(row.number(1).is_err());
        }
    }
}
