//! Properties map and file readers.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::Chars;

use crate::error::ConfigError;

/// Flat string-to-string configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: BTreeMap<String, String>,
}

impl Properties {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a configuration file.
    ///
    /// Files with a `.toml` extension are read as a flat TOML table; any
    /// other file is read with properties syntax (see [`Properties::parse`]).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        let props = if is_toml {
            Self::parse_toml(&content)?
        } else {
            Self::parse(&content)?
        };

        tracing::debug!(path = %path.display(), keys = props.len(), "Loaded configuration");
        Ok(props)
    }

    /// Parses properties syntax.
    ///
    /// - `key=value`, `key: value` and `key value` are all accepted
    /// - lines starting with `#` or `!` are comments
    /// - a line ending in an odd number of `\` joins the next line, whose
    ///   leading whitespace is dropped
    /// - `\t`, `\n`, `\r`, `\f` and `\uXXXX` are decoded in keys and
    ///   values; any other escaped character stands for itself, so
    ///   `dir=C\:\\data` reads as `C:\data`
    /// - leading whitespace of a value is dropped, trailing whitespace is kept
    /// - a repeated key overrides the earlier value
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut entries = BTreeMap::new();
        let mut lines = content.lines().enumerate();

        while let Some((index, raw)) = lines.next() {
            let first = raw.trim_start();
            if first.is_empty() || first.starts_with(['#', '!']) {
                continue;
            }

            let mut logical = first.to_string();
            while is_continued(&logical) {
                logical.pop();
                match lines.next() {
                    Some((_, next)) => logical.push_str(next.trim_start()),
                    None => break,
                }
            }

            let line = index + 1;
            let (key, value) = split_entry(&logical);
            let key = unescape(key, line)?;
            if key.is_empty() {
                return Err(ConfigError::Parse {
                    line,
                    message: format!("missing key in '{}'", raw.trim()),
                });
            }
            entries.insert(key, unescape(value, line)?);
        }

        Ok(Self { entries })
    }

    /// Parses a flat TOML table.
    ///
    /// Strings are kept as-is; integers, floats and booleans are rendered
    /// with their TOML text form. Any nested table or array is rejected.
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        let table: toml::Table = toml::from_str(content)?;
        let mut entries = BTreeMap::new();
        for (key, value) in table {
            let text = match value {
                toml::Value::String(s) => s,
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                _ => return Err(ConfigError::UnsupportedValue { key }),
            };
            entries.insert(key, text);
        }
        Ok(Self { entries })
    }

    /// Replaces values from environment variables.
    ///
    /// For every key already present, `<PREFIX>_<KEY>` is consulted, with the
    /// key upper-cased and `-`/`.` turned into `_`; `var-level` under prefix
    /// `SIMM` becomes `SIMM_VAR_LEVEL`.
    pub fn with_env_override(mut self, prefix: &str) -> Self {
        self.apply_overrides(prefix, |name| std::env::var(name).ok());
        self
    }

    fn apply_overrides(&mut self, prefix: &str, lookup: impl Fn(&str) -> Option<String>) {
        for (key, value) in self.entries.iter_mut() {
            let name = env_var_name(prefix, key);
            if let Some(replacement) = lookup(&name) {
                tracing::debug!(
                    key = %key,
                    env = %name,
                    "Configuration value overridden from environment"
                );
                *value = replacement;
            }
        }
    }

    /// Value of `key`, if set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Value of `key`, or `default` when unset.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Sets `key` to `value`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    /// Returns true if `key` is set.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no key is set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Properties
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// True when `line` ends in an unescaped `\`.
fn is_continued(line: &str) -> bool {
    line.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 1
}

/// Splits a logical line into raw key and value at the first unescaped
/// `=`, `:` or whitespace.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let separator = line.char_indices().find_map(|(pos, c)| {
        if escaped {
            escaped = false;
            return None;
        }
        match c {
            '\\' => {
                escaped = true;
                None
            }
            '=' | ':' => Some(pos),
            c if c.is_whitespace() => Some(pos),
            _ => None,
        }
    });
    let Some(pos) = separator else {
        return (line, "");
    };
    let rest = line[pos..].trim_start();
    let value = rest.strip_prefix(['=', ':']).unwrap_or(rest);
    (&line[..pos], value.trim_start())
}

fn unescape(text: &str, line: usize) -> Result<String, ConfigError> {
    if !text.contains('\\') {
        return Ok(text.to_string());
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => out.push(unicode_escape(&mut chars, line)?),
            Some(other) => out.push(other),
            // a dangling backslash at the end of input is dropped
            None => {}
        }
    }
    Ok(out)
}

/// Decodes the digits of a `\uXXXX` escape, joining a surrogate pair
/// written as two consecutive escapes.
fn unicode_escape(chars: &mut Chars<'_>, line: usize) -> Result<char, ConfigError> {
    let unit = hex_unit(chars, line)?;
    if !(0xD800..0xDC00).contains(&unit) {
        return char::from_u32(unit).ok_or_else(|| malformed_escape(line));
    }

    let mut rest = chars.clone();
    if rest.next() == Some('\\') && rest.next() == Some('u') {
        let low = hex_unit(&mut rest, line)?;
        if (0xDC00..0xE000).contains(&low) {
            *chars = rest;
            let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
            return char::from_u32(code).ok_or_else(|| malformed_escape(line));
        }
    }
    Err(malformed_escape(line))
}

fn hex_unit(chars: &mut Chars<'_>, line: usize) -> Result<u32, ConfigError> {
    let mut unit = 0;
    for _ in 0..4 {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| malformed_escape(line))?;
        unit = unit * 16 + digit;
    }
    Ok(unit)
}

fn malformed_escape(line: usize) -> ConfigError {
    ConfigError::Parse {
        line,
        message: "malformed \\uXXXX escape".to_string(),
    }
}

fn env_var_name(prefix: &str, key: &str) -> String {
    let key: String = key
        .chars()
        .map(|c| match c {
            '-' | '.' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect();
    if prefix.is_empty() {
        key
    } else {
        format!("{}_{}", prefix.to_ascii_uppercase(), key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_parse_separators() {
        let props = Properties::parse("a=1\nb: 2\nc 3\nd = four five\n").unwrap();
        assert_eq!(props.get("a"), Some("1"));
        assert_eq!(props.get("b"), Some("2"));
        assert_eq!(props.get("c"), Some("3"));
        assert_eq!(props.get("d"), Some("four five"));
        assert_eq!(props.len(), 4);
    }

    #[test]
    fn test_parse_comments_and_blank_lines() {
        let content = "# comment\n! also a comment\n\n   \nkey=value\n";
        let props = Properties::parse(content).unwrap();
        assert_eq!(props.keys().collect::<Vec<_>>(), vec!["key"]);
    }

    #[test]
    fn test_parse_continuation() {
        let props = Properties::parse("path=/data/\\\n    shocks.csv\nnext=1").unwrap();
        assert_eq!(props.get("path"), Some("/data/shocks.csv"));
        assert_eq!(props.get("next"), Some("1"));
    }

    #[test]
    fn test_parse_windows_path_is_not_continued() {
        let content = "dir=C\\:\\\\data\\\\\nfx-rates=fx.csv\n";
        let props = Properties::parse(content).unwrap();
        assert_eq!(props.get("dir"), Some(r"C:\data\"));
        assert_eq!(props.get("fx-rates"), Some("fx.csv"));
    }

    #[test]
    fn test_parse_odd_backslash_run_continues() {
        let props = Properties::parse("dir=C:\\\\data\\\\\\\n  sub\nnext=1\n").unwrap();
        assert_eq!(props.get("dir"), Some(r"C:\data\sub"));
        assert_eq!(props.get("next"), Some("1"));
    }

    #[test]
    fn test_parse_escaped_separators_in_key() {
        let props = Properties::parse(r"my\ key\=x\:y = v\=w").unwrap();
        assert_eq!(props.get("my key=x:y"), Some("v=w"));
    }

    #[test]
    fn test_parse_character_escapes() {
        let props = Properties::parse(r"tab=a\tb
unicode=\u00e9t\u00E9
pair=\uD83D\uDE00
plain=\q").unwrap();
        assert_eq!(props.get("tab"), Some("a\tb"));
        assert_eq!(props.get("unicode"), Some("été"));
        assert_eq!(props.get("pair"), Some("\u{1F600}"));
        assert_eq!(props.get("plain"), Some("q"));
    }

    #[test]
    fn test_parse_malformed_unicode_escape() {
        let err = Properties::parse("ok=1\nbad=\\u12G4\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { line: 2, .. }));
        assert!(matches!(
            Properties::parse(r"lone=\uD83D"),
            Err(ConfigError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_parse_value_keeps_trailing_whitespace() {
        let props = Properties::parse("k =  v  \n").unwrap();
        assert_eq!(props.get("k"), Some("v  "));
    }

    #[test]
    fn test_parse_empty_value_and_override() {
        let props = Properties::parse("empty=\nk=1\nk=2\nbare\n").unwrap();
        assert_eq!(props.get("empty"), Some(""));
        assert_eq!(props.get("k"), Some("2"));
        assert_eq!(props.get("bare"), Some(""));
    }

    #[test]
    fn test_parse_value_keeps_later_separators() {
        let props = Properties::parse("url=http://host:8080/a=b").unwrap();
        assert_eq!(props.get("url"), Some("http://host:8080/a=b"));
    }

    #[test]
    fn test_parse_missing_key() {
        let err = Properties::parse("ok=1\n= orphan\n").unwrap_err();
        match err {
            ConfigError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("Expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_get_or() {
        let props: Properties = [("var-level", "0.95")].into_iter().collect();
        assert_eq!(props.get_or("var-level", "0.99"), "0.95");
        assert_eq!(props.get_or("base-currency", "USD"), "USD");
    }

    #[test]
    fn test_parse_toml_flat_table() {
        let content = r#"
            base-currency = "EUR"
            var-level = 0.975
            scenarios = 250
            strict = true
        "#;
        let props = Properties::parse_toml(content).unwrap();
        assert_eq!(props.get("base-currency"), Some("EUR"));
        assert_eq!(props.get("var-level"), Some("0.975"));
        assert_eq!(props.get("scenarios"), Some("250"));
        assert_eq!(props.get("strict"), Some("true"));
    }

    #[test]
    fn test_parse_toml_rejects_nested() {
        let err = Properties::parse_toml("[files]\nfx = \"a.csv\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedValue { key } if key == "files"));
    }

    #[test]
    fn test_parse_toml_syntax_error() {
        assert!(matches!(
            Properties::parse_toml("key = "),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_load_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let props_path = dir.path().join("simm.properties");
        let mut file = std::fs::File::create(&props_path).unwrap();
        writeln!(file, "base-currency=GBP").unwrap();

        let toml_path = dir.path().join("simm.toml");
        std::fs::write(&toml_path, "base-currency = \"JPY\"\n").unwrap();

        assert_eq!(Properties::load(&props_path).unwrap().get("base-currency"), Some("GBP"));
        assert_eq!(Properties::load(&toml_path).unwrap().get("base-currency"), Some("JPY"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Properties::load(dir.path().join("absent.properties")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_env_var_name() {
        assert_eq!(env_var_name("SIMM", "var-level"), "SIMM_VAR_LEVEL");
        assert_eq!(env_var_name("simm", "fx.rates"), "SIMM_FX_RATES");
        assert_eq!(env_var_name("", "base-currency"), "BASE_CURRENCY");
    }

    #[test]
    fn test_overrides_only_touch_known_keys() {
        let mut props: Properties = [("var-level", "0.99"), ("fx-rates", "fx.csv")]
            .into_iter()
            .collect();
        let env = HashMap::from([
            ("SIMM_VAR_LEVEL".to_string(), "0.95".to_string()),
            ("SIMM_BASE_CURRENCY".to_string(), "EUR".to_string()),
        ]);

        props.apply_overrides("SIMM", |name| env.get(name).cloned());

        assert_eq!(props.get("var-level"), Some("0.95"));
        assert_eq!(props.get("fx-rates"), Some("fx.csv"));
        assert!(!props.contains_key("base-currency"));
    }

    #[test]
    fn test_with_env_override_reads_process_environment() {
        std::env::set_var("INFRA_CONFIG_TEST_VAR_LEVEL", "0.975");
        let props: Properties = [("var-level", "0.99")].into_iter().collect();
        let props = props.with_env_override("INFRA_CONFIG_TEST");
        std::env::remove_var("INFRA_CONFIG_TEST_VAR_LEVEL");

        assert_eq!(props.get("var-level"), Some("0.975"));
    }
}
