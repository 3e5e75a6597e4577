//! Table names and the statements built from them.

use std::fmt;

/// Statement that releases every table lock held by the session.
pub const UNLOCK_STATEMENT: &str = "UNLOCK TABLES";

/// A fully-qualified `schema.table` name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TableName {
    schema: String,
    table: String,
}

impl TableName {
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
        }
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Renders the name as a backtick-quoted identifier usable in SQL.
    pub fn quoted(&self) -> String {
        format!("{}.{}", quote_identifier(&self.schema), quote_identifier(&self.table))
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.table)
    }
}

fn quote_identifier(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "``"))
}

/// Ordered set of tables covered by one lock session.
///
/// Built once by the table selector and never modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSet {
    tables: Vec<TableName>,
}

impl TableSet {
    pub fn new(tables: Vec<TableName>) -> Self {
        Self { tables }
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableName> {
        self.tables.iter()
    }

    /// Returns the single statement that read-locks every table in the set.
    ///
    /// Returns `None` for an empty set; there is nothing meaningful to lock.
    pub fn lock_statement(&self) -> Option<String> {
        if self.tables.is_empty() {
            return None;
        }
        let names = self
            .tables
            .iter()
            .map(TableName::quoted)
            .collect::<Vec<_>>()
            .join(", ");
        Some(format!("FLUSH TABLES {names} WITH READ LOCK"))
    }
}

impl FromIterator<TableName> for TableSet {
    fn from_iter<I: IntoIterator<Item = TableName>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
