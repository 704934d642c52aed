//! Argument tokenizer
//!
//! Splits the raw argument vector into positional tokens and named
//! (`--key` / `--key=value`) tokens. Everything after a bare `--` is positional.

use crate::error::UsageError;

use std::collections::BTreeMap;
use std::ffi::OsString;

/// Prefix that marks a named argument
pub const FLAG_PREFIX: &str = "--";

/// A named argument as the user typed it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedArg {
    /// Key with its original spelling (without the prefix)
    pub key: String,
    /// Value after `=`, or `None` for a bare `--key`
    pub value: Option<String>,
}

/// Named arguments keyed case-insensitively
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedArgs {
    entries: BTreeMap<String, NamedArg>,
}

impl NamedArgs {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an argument, returning the entry it replaced
    pub fn insert(&mut self, key: &str, value: Option<String>) -> Option<NamedArg> {
        self.entries.insert(
            fold_case(key),
            NamedArg {
                key: key.to_string(),
                value,
            },
        )
    }

    /// Look up an argument by name, ignoring case
    pub fn get(&self, name: &str) -> Option<&NamedArg> {
        self.entries.get(&fold_case(name))
    }

    /// Check whether an argument is present, ignoring case
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&fold_case(name))
    }

    /// Remove and return an argument by name, ignoring case
    pub fn remove(&mut self, name: &str) -> Option<NamedArg> {
        self.entries.remove(&fold_case(name))
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no arguments
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over arguments in key order
    pub fn iter(&self) -> impl Iterator<Item = &NamedArg> {
        self.entries.values()
    }
}

/// Case fold used for every name comparison
pub(crate) fn fold_case(name: &str) -> String {
    name.to_lowercase()
}

/// Positional and named tokens from one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    /// Positional tokens in order, command name included
    pub positional: Vec<String>,
    /// Named tokens
    pub named: NamedArgs,
}

/// Result of tokenizing: the parsed arguments plus any duplicate-key errors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokenized {
    pub args: ParsedArgs,
    pub errors: Vec<UsageError>,
}

impl Tokenized {
    /// True if no duplicate keys were seen
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Tokenize an argument vector with the program name already removed
///
/// Never rejects the input as a whole. A repeated key keeps its last value
/// and records [`UsageError::DuplicateNamedArgument`].
pub fn tokenize<I, S>(args: I) -> Tokenized
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tokenized = Tokenized::default();
    let mut only_positional = false;

    for arg in args {
        let arg = arg.as_ref();

        if only_positional || !arg.starts_with(FLAG_PREFIX) {
            tokenized.args.positional.push(arg.to_string());
        } else if arg == FLAG_PREFIX {
            only_positional = true;
        } else {
            let body = &arg[FLAG_PREFIX.len()..];
            let (key, value) = match body.split_once('=') {
                Some((key, value)) => (key, Some(value.to_string())),
                None => (body, None),
            };

            if tokenized.args.named.insert(key, value).is_some() {
                log::debug!("Duplicate named argument --{}", key);
                tokenized
                    .errors
                    .push(UsageError::DuplicateNamedArgument(key.to_string()));
            }
        }
    }

    tokenized
}

/// Convert OS arguments to strings, replacing invalid UTF-8 with U+FFFD
pub fn lossy_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| match arg.into_string() {
            Ok(arg) => arg,
            Err(raw) => {
                let arg = raw.to_string_lossy().into_owned();
                log::warn!("Argument is not valid UTF-8: {}", arg);
                arg
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_lossy_args_keeps_invalid_utf8() {
        use std::os::unix::ffi::OsStringExt;

        let args = lossy_args(vec![
            OsString::from("pack"),
            OsString::from_vec(b"dir\xff".to_vec()),
        ]);
        assert_eq!(args, vec!["pack".to_string(), "dir\u{FFFD}".to_string()]);
    }

    #[test]
    fn test_tokenize_empty() {
        let tokenized = tokenize(Vec::<String>::new());
        assert!(tokenized.is_ok());
        assert!(tokenized.args.positional.is_empty());
        assert!(tokenized.args.named.is_empty());
    }

    #[test]
    fn test_tokenize_positional_and_named() {
        let tokenized = tokenize(["push", "--source=./dir", "mypackage"]);
        assert!(tokenized.is_ok());
        assert_eq!(tokenized.args.positional, vec!["push", "mypackage"]);
        let source = tokenized.args.named.get("source").unwrap();
        assert_eq!(source.value.as_deref(), Some("./dir"));
    }

    #[test]
    fn test_bare_flag_has_no_value() {
        let tokenized = tokenize(["unpack", "--force"]);
        assert_eq!(tokenized.args.named.get("force").unwrap().value, None);
    }

    #[test]
    fn test_value_splits_on_first_equals() {
        let tokenized = tokenize(["--user=admin=root"]);
        let user = tokenized.args.named.get("user").unwrap();
        assert_eq!(user.value.as_deref(), Some("admin=root"));
    }

    #[test]
    fn test_empty_value_is_present() {
        let tokenized = tokenize(["--version="]);
        let version = tokenized.args.named.get("version").unwrap();
        assert_eq!(version.value.as_deref(), Some(""));
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let tokenized = tokenize(["--Source=a"]);
        assert!(tokenized.args.named.contains("SOURCE"));
        assert_eq!(tokenized.args.named.get("source").unwrap().key, "Source");
    }

    #[test]
    fn test_duplicate_key_is_error() {
        let tokenized = tokenize(["unpack", "--force", "--FORCE=false"]);
        assert!(!tokenized.is_ok());
        assert_eq!(
            tokenized.errors,
            vec![UsageError::DuplicateNamedArgument("FORCE".to_string())]
        );
        // later occurrence wins
        let force = tokenized.args.named.get("force").unwrap();
        assert_eq!(force.value.as_deref(), Some("false"));
    }

    #[test]
    fn test_separator_makes_rest_positional() {
        let tokenized = tokenize(["pack", "--", "--not-a-flag", "--", "x"]);
        assert!(tokenized.is_ok());
        assert!(tokenized.args.named.is_empty());
        assert_eq!(
            tokenized.args.positional,
            vec!["pack", "--not-a-flag", "--", "x"]
        );
    }

    #[test]
    fn test_single_dash_is_positional() {
        let tokenized = tokenize(["-v", "-"]);
        assert_eq!(tokenized.args.positional, vec!["-v", "-"]);
    }

    #[test]
    fn test_tokenize_is_repeatable() {
        let argv = ["install", "pkg", "--source=http://feed", "--prerelease"];
        assert_eq!(tokenize(argv), tokenize(argv));
    }
}
