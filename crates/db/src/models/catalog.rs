//! Catalog entry model shared by the four reference tables.

use serde::Serialize;
use sqlx::FromRow;

use planner_core::types::EntityId;

/// The four catalog kinds. Structurally identical, semantically distinct --
/// each kind lives in its own table so project references cannot cross kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Process,
    Line,
    Client,
    Type,
}

impl CatalogKind {
    /// The backing table for this kind.
    pub fn table(self) -> &'static str {
        match self {
            CatalogKind::Process => "processes",
            CatalogKind::Line => "lines",
            CatalogKind::Client => "clients",
            CatalogKind::Type => "project_types",
        }
    }

    /// Entity name used in not-found errors.
    pub fn entity_name(self) -> &'static str {
        match self {
            CatalogKind::Process => "Process",
            CatalogKind::Line => "Line",
            CatalogKind::Client => "Client",
            CatalogKind::Type => "Type",
        }
    }

    /// Parse a URL path segment (`processes`, `lines`, `clients`, `types`).
    pub fn from_path_segment(segment: &str) -> Option<Self> {
        match segment {
            "processes" => Some(CatalogKind::Process),
            "lines" => Some(CatalogKind::Line),
            "clients" => Some(CatalogKind::Client),
            "types" => Some(CatalogKind::Type),
            _ => None,
        }
    }
}

/// A full catalog row.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct CatalogEntry {
    pub id: EntityId,
    pub name: String,
    pub is_active: bool,
}

/// The `{id, name}` shape used by catalog listings.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct CatalogItem {
    pub id: EntityId,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_segments_round_trip() {
        for (segment, kind) in [
            ("processes", CatalogKind::Process),
            ("lines", CatalogKind::Line),
            ("clients", CatalogKind::Client),
            ("types", CatalogKind::Type),
        ] {
            assert_eq!(CatalogKind::from_path_segment(segment), Some(kind));
        }
        assert_eq!(CatalogKind::from_path_segment("widgets"), None);
    }
}
