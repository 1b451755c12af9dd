use std::collections::HashMap;

use super::parser::lexer;

/// Command-name aliases, fixed for the lifetime of the interpreter. The
/// table is plain session state handed to the executor; nothing mutates it
/// after startup.
pub struct AliasTable {
    entries: HashMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.insert("ll", "ls -l");
        table
    }

    pub fn insert(&mut self, name: &str, expansion: &str) {
        self.entries.insert(name.to_string(), expansion.to_string());
    }

    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Rewrites argv[0] through the table, once. The expansion is tokenized
    /// and splices in front of the remaining arguments; the result is not
    /// looked up again, so aliasing an alias stays unresolved.
    pub fn expand(&self, argv: Vec<String>) -> Vec<String> {
        let Some(expansion) = argv.first().and_then(|head| self.lookup(head)) else {
            return argv;
        };
        let Ok(mut replacement) = lexer::tokenize(expansion) else {
            return argv;
        };
        replacement.extend(argv.into_iter().skip(1));
        replacement
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_word_expands() {
        let table = AliasTable::with_defaults();
        let argv = vec!["ll".to_string(), "/tmp".to_string()];
        assert_eq!(table.expand(argv), vec!["ls", "-l", "/tmp"]);
    }

    #[test]
    fn test_non_alias_passes_through() {
        let table = AliasTable::with_defaults();
        let argv = vec!["ls".to_string(), "-a".to_string()];
        assert_eq!(table.expand(argv.clone()), argv);
    }

    #[test]
    fn test_expansion_is_not_recursive() {
        let mut table = AliasTable::new();
        table.insert("a", "b -x");
        table.insert("b", "c");
        let argv = vec!["a".to_string(), "y".to_string()];
        // `a` expands to `b -x`, and `b` is left alone
        assert_eq!(table.expand(argv), vec!["b", "-x", "y"]);
    }

    #[test]
    fn test_empty_argv_passes_through() {
        let table = AliasTable::with_defaults();
        assert!(table.expand(Vec::new()).is_empty());
    }
}
