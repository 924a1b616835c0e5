//! `?` placeholder scanning and substitution.
//!
//! A `?` is a placeholder unless it sits inside a string literal (delimited
//! by the connection's string-quote character) or is preceded by a
//! backslash. `\?` is rewritten to a bare `?`; other backslash sequences are
//! kept as written. Clause fragments resolved into a builder buffer keep
//! their `\?` so the buffer can be resolved again at execution.

use crate::error::{QueryError, QueryResult};
use crate::serialize::Serializer;
use crate::value::Value;

/// A fragment split at its placeholders.
///
/// `pieces.len()` is always one more than the number of placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pieces: Vec<String>,
}

impl Template {
    /// Scan `fragment`, treating `quote` as the string-literal delimiter.
    pub fn parse(fragment: &str, quote: char) -> Self {
        Self::scan(fragment, quote, true)
    }

    /// Like [`Template::parse`], but `\?` is left escaped.
    pub fn parse_clause(fragment: &str, quote: char) -> Self {
        Self::scan(fragment, quote, false)
    }

    fn scan(fragment: &str, quote: char, collapse: bool) -> Self {
        let mut pieces = Vec::new();
        let mut current = String::with_capacity(fragment.len());
        let mut in_quote = false;
        let mut escaped = false;

        for c in fragment.chars() {
            if escaped {
                escaped = false;
                if c == '?' && collapse {
                    // `\?` -> `?`
                    current.pop();
                }
                current.push(c);
                continue;
            }
            match c {
                '\\' => {
                    escaped = true;
                    current.push(c);
                }
                c if c == quote => {
                    in_quote = !in_quote;
                    current.push(c);
                }
                '?' if !in_quote => pieces.push(std::mem::take(&mut current)),
                _ => current.push(c),
            }
        }
        pieces.push(current);
        Self { pieces }
    }

    pub fn placeholder_count(&self) -> usize {
        self.pieces.len() - 1
    }

    /// Substitute `values` positionally, escaping strings.
    pub fn bind(&self, values: &[Value], ser: &Serializer<'_>) -> QueryResult<String> {
        let expected = self.placeholder_count();
        if expected != values.len() {
            return Err(QueryError::ParameterCountMismatch {
                expected,
                got: values.len(),
            });
        }

        let mut out = String::with_capacity(self.pieces.iter().map(String::len).sum::<usize>());
        for (i, piece) in self.pieces.iter().enumerate() {
            out.push_str(piece);
            if let Some(value) = values.get(i) {
                ser.write_value(&mut out, value, false, true)?;
            }
        }
        Ok(out)
    }
}

/// Resolve the placeholders of `fragment` against `values`.
///
/// Fails with [`QueryError::ParameterCountMismatch`] when the number of
/// placeholders differs from `values.len()`.
pub fn resolve(fragment: &str, values: &[Value], ser: &Serializer<'_>) -> QueryResult<String> {
    Template::parse(fragment, ser.quoting().string).bind(values, ser)
}

/// Resolve a clause fragment that is appended to a builder buffer.
///
/// Same as [`resolve`] except `\?` stays escaped until the buffer itself is
/// resolved.
pub fn resolve_clause(
    fragment: &str,
    values: &[Value],
    ser: &Serializer<'_>,
) -> QueryResult<String> {
    Template::parse_clause(fragment, ser.quoting().string).bind(values, ser)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryConnection;
    use crate::values;
    use crate::zone::DateZone;

    fn count(fragment: &str) -> usize {
        Template::parse(fragment, '\'').placeholder_count()
    }

    #[test]
    fn counts_unquoted_unescaped_marks() {
        assert_eq!(count("a = ? AND b = ?"), 2);
        assert_eq!(count("a = '?' AND b = ?"), 1);
        assert_eq!(count(r"a = \? AND b = ?"), 1);
        assert_eq!(count(r"a = 'it\'s ?' AND b = ?"), 1);
        assert_eq!(count("no marks"), 0);
    }

    #[test]
    fn fragment_without_marks_is_unchanged() {
        let conn = MemoryConnection::new();
        let ser = Serializer::new(&conn, DateZone::Utc);
        assert_eq!(resolve("a = 'x?'", &[], &ser).unwrap(), "a = 'x?'");
    }

    #[test]
    fn escaped_mark_collapses() {
        let conn = MemoryConnection::new();
        let ser = Serializer::new(&conn, DateZone::Utc);
        assert_eq!(
            resolve(r"a LIKE 'x' AND b = \? AND c = ?", &values![1], &ser).unwrap(),
            "a LIKE 'x' AND b = ? AND c = 1"
        );
        assert_eq!(resolve(r"a = '\n'", &[], &ser).unwrap(), r"a = '\n'");
    }

    #[test]
    fn clause_keeps_escaped_mark() {
        let conn = MemoryConnection::new();
        let ser = Serializer::new(&conn, DateZone::Utc);
        let clause = resolve_clause(r"a = \? AND b = ?", &values![1], &ser).unwrap();
        assert_eq!(clause, r"a = \? AND b = 1");
        assert_eq!(resolve(&clause, &[], &ser).unwrap(), "a = ? AND b = 1");
    }

    #[test]
    fn substitutes_in_order() {
        let conn = MemoryConnection::new();
        let ser = Serializer::new(&conn, DateZone::Utc);
        assert_eq!(
            resolve("id = ? AND name = ? AND ok = ?", &values![5, "O'Hara", true], &ser).unwrap(),
            r"id = 5 AND name = 'O\'Hara' AND ok = 1"
        );
        assert_eq!(
            resolve("id IN ?", &values![vec![1, 2, 3]], &ser).unwrap(),
            "id IN (1,2,3)"
        );
    }

    #[test]
    fn mismatch_reports_counts() {
        let conn = MemoryConnection::new();
        let ser = Serializer::new(&conn, DateZone::Utc);
        let err = resolve("a = ? AND b = ?", &values![1], &ser).unwrap_err();
        assert_eq!(
            err,
            QueryError::ParameterCountMismatch {
                expected: 2,
                got: 1
            }
        );
        assert!(resolve("a = 1", &values![1], &ser).unwrap_err().is_parameter_count_mismatch());
    }

    #[test]
    fn quote_char_follows_connection() {
        let conn = MemoryConnection::new().with_quoting(crate::Quoting {
            string: '"',
            table: '"',
            field: '"',
        });
        let ser = Serializer::new(&conn, DateZone::Utc);
        assert_eq!(
            resolve("a = \"?\" AND b = '?", &values![2], &ser).unwrap(),
            "a = \"?\" AND b = '2"
        );
    }
}
