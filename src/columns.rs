/// Column role resolution
///
/// The source schema is not fixed, so each logical field of a post is mapped
/// to the first physical column whose name appears in a ranked candidate list.
use crate::types::{SourceRow, Value};
use log::debug;
use std::collections::BTreeMap;

/// Logical field of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Title,
    Content,
    Description,
    Slug,
    Date,
    Category,
}

impl Role {
    pub const ALL: [Role; 6] = [Role::Title, Role::Content, Role::Description, Role::Slug, Role::Date, Role::Category];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Title => "title",
            Role::Content => "content",
            Role::Description => "description",
            Role::Slug => "slug",
            Role::Date => "date",
            Role::Category => "categories",
        }
    }

    /// Column names tried for this role, most preferred first
    pub fn candidates(&self) -> &'static [&'static str] {
        match self {
            Role::Title => &["title", "subject", "name"],
            Role::Content => &["content", "body", "text", "markdown"],
            Role::Description => &["description", "summary", "excerpt"],
            Role::Slug => &["slug", "url_key", "path"],
            Role::Date => &["createdAt", "created_at", "publishedAt", "date"],
            Role::Category => &["category", "categories", "tag", "tags"],
        }
    }

    /// Roles without which no post can be written
    pub fn is_required(&self) -> bool {
        matches!(self, Role::Title | Role::Content | Role::Date)
    }
}

/// Mapping from role to the physical column that holds it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleMap {
    columns: BTreeMap<Role, String>,
}

impl RoleMap {
    /// Pick the first present candidate for every role
    pub fn resolve<S: AsRef<str>>(available: &[S]) -> Self {
        let mut columns = BTreeMap::new();
        for role in Role::ALL {
            let found = role.candidates().iter().find(|c| available.iter().any(|a| a.as_ref() == **c));
            match found {
                Some(column) => {
                    debug!("role {} -> column {}", role.as_str(), column);
                    columns.insert(role, column.to_string());
                }
                None => debug!("role {} unresolved", role.as_str()),
            }
        }
        RoleMap { columns }
    }

    pub fn column(&self, role: Role) -> Option<&str> {
        self.columns.get(&role).map(|c| c.as_str())
    }

    pub fn missing_required(&self) -> Vec<Role> {
        Role::ALL.into_iter().filter(|r| r.is_required() && !self.columns.contains_key(r)).collect()
    }

    /// Distinct resolved columns in role order, for building SELECT lists
    pub fn selected_columns(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for role in Role::ALL {
            if let Some(column) = self.column(role) {
                if !out.contains(&column) {
                    out.push(column);
                }
            }
        }
        out
    }

    /// Raw value of a role in a row; None when the role is unresolved or the column absent
    pub fn value<'r>(&self, row: &'r SourceRow, role: Role) -> Option<&'r Value> {
        self.column(role).and_then(|column| row.get(column))
    }

    /// Untrimmed text of a role; empty for unresolved roles and NULLs
    pub fn raw_text(&self, row: &SourceRow, role: Role) -> String {
        self.value(row, role).and_then(Value::as_text).map(str::to_string).unwrap_or_default()
    }

    /// Trimmed text of a role
    pub fn text(&self, row: &SourceRow, role: Role) -> String {
        self.raw_text(row, role).trim().to_string()
    }
}

#[cfg(test)]
#[path = "columns_test.rs"]
mod columns_test;
