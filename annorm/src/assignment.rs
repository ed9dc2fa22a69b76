use crate::types::AliasMap;

/// Accumulates `alias.column = literal` fragments for a SQL `SET` clause.
///
/// One builder per rendering call; fragments are kept in append order and are
/// never deduplicated.
#[derive(Debug, Default)]
pub struct AssignmentBuilder<'a> {
    aliases: Option<&'a AliasMap>,
    fragments: Vec<String>,
}

impl<'a> AssignmentBuilder<'a> {
    /// Builder that uses table names verbatim as aliases.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_aliases(aliases: &'a AliasMap) -> Self {
        Self {
            aliases: Some(aliases),
            fragments: Vec::new(),
        }
    }

    pub fn set(&mut self, table: &str, column: &str, literal: &str) {
        let alias = self
            .aliases
            .and_then(|aliases| aliases.get(table))
            .map_or(table, String::as_str);
        let fragment = format!("{alias}.{column} = {literal}");
        log::trace!("assignment fragment: {fragment}");
        self.fragments.push(fragment);
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn render(&self) -> String {
        self.fragments.join(", ")
    }
}
