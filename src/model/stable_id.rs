//! Stable IDs: string identifiers for database objects that are consistent
//! across catalog snapshots.
//!
//! Two distinct objects must never produce the same stable ID, and the same
//! object must produce the same ID in both the `main` and `branch` catalogs.
//! Metadata IDs (ACLs, default ACLs, column ACLs, role memberships) are
//! recognized by a fixed set of prefixes so the scheduler can special-case
//! them (e.g. when deciding which phase a mixed alter/drop belongs to).

use std::fmt;

/// The prefixes that mark a stable ID as "metadata" rather than a schema
/// object proper.
pub const METADATA_PREFIXES: &[&str] = &["acl:", "defacl:", "aclcol:", "membership:"];

/// Marker prefix for a dependency row referencing an object the catalog
/// extractor could not classify. Catalog rows with either side prefixed
/// this way are discarded by the scheduler.
pub const UNKNOWN_PREFIX: &str = "unknown:";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct StableId(String);

impl StableId {
    /// Wrap an already-formatted stable ID string. Prefer the typed
    /// constructors below when building one from scratch; this exists for
    /// catalog rows read verbatim off the wire and for tests.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_metadata(&self) -> bool {
        METADATA_PREFIXES.iter().any(|p| self.0.starts_with(p))
    }

    pub fn is_unknown(&self) -> bool {
        self.0.starts_with(UNKNOWN_PREFIX)
    }

    pub fn unknown(raw: impl Into<String>) -> Self {
        Self(format!("{UNKNOWN_PREFIX}{}", raw.into()))
    }

    pub fn schema(schema: &str) -> Self {
        Self(format!("schema:{schema}"))
    }

    pub fn role(name: &str) -> Self {
        Self(format!("role:{name}"))
    }

    pub fn extension(name: &str) -> Self {
        Self(format!("extension:{name}"))
    }

    pub fn table(schema: &str, name: &str) -> Self {
        Self(format!("table:{schema}.{name}"))
    }

    pub fn column(schema: &str, table: &str, column: &str) -> Self {
        Self(format!("column:{schema}.{table}.{column}"))
    }

    pub fn view(schema: &str, name: &str) -> Self {
        Self(format!("view:{schema}.{name}"))
    }

    pub fn materialized_view(schema: &str, name: &str) -> Self {
        Self(format!("materialized_view:{schema}.{name}"))
    }

    pub fn index(schema: &str, name: &str) -> Self {
        Self(format!("index:{schema}.{name}"))
    }

    pub fn trigger(schema: &str, table: &str, name: &str) -> Self {
        Self(format!("trigger:{schema}.{table}.{name}"))
    }

    pub fn rls_policy(schema: &str, table: &str, name: &str) -> Self {
        Self(format!("rls_policy:{schema}.{table}.{name}"))
    }

    pub fn rule(schema: &str, table: &str, name: &str) -> Self {
        Self(format!("rule:{schema}.{table}.{name}"))
    }

    pub fn procedure(schema: &str, name: &str, argtypes: &str) -> Self {
        Self(format!("procedure:{schema}.{name}({argtypes})"))
    }

    pub fn aggregate(schema: &str, name: &str, argtypes: &str) -> Self {
        Self(format!("aggregate:{schema}.{name}({argtypes})"))
    }

    pub fn sequence(schema: &str, name: &str) -> Self {
        Self(format!("sequence:{schema}.{name}"))
    }

    pub fn domain(schema: &str, name: &str) -> Self {
        Self(format!("domain:{schema}.{name}"))
    }

    pub fn enum_type(schema: &str, name: &str) -> Self {
        Self(format!("enum:{schema}.{name}"))
    }

    pub fn composite_type(schema: &str, name: &str) -> Self {
        Self(format!("composite_type:{schema}.{name}"))
    }

    pub fn range_type(schema: &str, name: &str) -> Self {
        Self(format!("range:{schema}.{name}"))
    }

    pub fn collation(schema: &str, name: &str) -> Self {
        Self(format!("collation:{schema}.{name}"))
    }

    pub fn language(name: &str) -> Self {
        Self(format!("language:{name}"))
    }

    pub fn publication(name: &str) -> Self {
        Self(format!("publication:{name}"))
    }

    pub fn subscription(name: &str) -> Self {
        Self(format!("subscription:{name}"))
    }

    pub fn foreign_data_wrapper(name: &str) -> Self {
        Self(format!("foreign_data_wrapper:{name}"))
    }

    pub fn server(name: &str) -> Self {
        Self(format!("server:{name}"))
    }

    pub fn user_mapping(server: &str, user: &str) -> Self {
        Self(format!("user_mapping:{server}:{user}"))
    }

    pub fn foreign_table(schema: &str, name: &str) -> Self {
        Self(format!("foreign_table:{schema}.{name}"))
    }

    pub fn event_trigger(name: &str) -> Self {
        Self(format!("event_trigger:{name}"))
    }

    /// ACL on an arbitrary object, scoped to a single grantee.
    pub fn acl(object: &StableId, grantee: &str) -> Self {
        Self(format!("acl:{}::grantee:{grantee}", object.as_str()))
    }

    /// ACL on a single column of a table, scoped to a single grantee.
    pub fn acl_column(schema: &str, table: &str, column: &str, grantee: &str) -> Self {
        Self(format!(
            "aclcol:{schema}.{table}.{column}::grantee:{grantee}"
        ))
    }

    pub fn membership(role: &str, member: &str) -> Self {
        Self(format!("membership:{role}->{member}"))
    }

    pub fn default_acl(grantor: &str, objtype: &str, schema: &str, grantee: &str) -> Self {
        Self(format!("defacl:{grantor}:{objtype}:{schema}:{grantee}"))
    }

    pub fn comment(object: &StableId) -> Self {
        Self(format!("comment:{}", object.as_str()))
    }

    pub fn owner(object: &StableId) -> Self {
        Self(format!("owner:{}", object.as_str()))
    }
}

impl fmt::Display for StableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StableId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for StableId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_prefixes_are_recognized() {
        assert!(StableId::role("admin").is_metadata() == false);
        let t = StableId::table("public", "users");
        assert!(StableId::acl(&t, "alice").is_metadata());
        assert!(StableId::membership("admin", "alice").is_metadata());
        assert!(
            StableId::default_acl("admin", "table", "public", "alice").is_metadata()
        );
        assert!(StableId::acl_column("public", "users", "email", "alice").is_metadata());
    }

    #[test]
    fn unknown_rows_are_tagged() {
        let id = StableId::unknown("pg_catalog.some_internal_thing");
        assert!(id.is_unknown());
        assert_eq!(id.as_str(), "unknown:pg_catalog.some_internal_thing");
    }

    #[test]
    fn distinct_objects_never_collide() {
        let table = StableId::table("public", "events");
        let view = StableId::view("public", "events");
        let seq = StableId::sequence("public", "events");
        assert_ne!(table, view);
        assert_ne!(table, seq);
        assert_ne!(view, seq);
    }

    #[test]
    fn same_object_is_stable_across_calls() {
        assert_eq!(
            StableId::table("public", "events"),
            StableId::table("public", "events")
        );
    }
}
