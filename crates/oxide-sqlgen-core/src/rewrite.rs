//! Post-render rewrite rules.
//!
//! Some dialects need a keyword sequence produced by the generic column
//! renderer spelled differently. Those quirks are expressed as exact-substring
//! replacements applied after rendering, in list order.

/// Replaces every occurrence of `find` with `replace`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rewrite {
    /// The exact text to look for.
    pub find: &'static str,
    /// Its replacement.
    pub replace: &'static str,
}

impl Rewrite {
    /// Creates a rewrite rule.
    #[must_use]
    pub const fn new(find: &'static str, replace: &'static str) -> Self {
        Self { find, replace }
    }

    /// Applies the rule. The input is returned untouched unless it contains
    /// `find` verbatim.
    #[must_use]
    pub fn apply(&self, sql: String) -> String {
        if sql.contains(self.find) {
            sql.replace(self.find, self.replace)
        } else {
            sql
        }
    }
}

/// Applies each rule in order.
#[must_use]
pub fn apply_all(rules: &[Rewrite], sql: String) -> String {
    rules.iter().fold(sql, |sql, rule| rule.apply(sql))
}
