//! Explore-jump capability boundary.
//!
//! The `x` shortcut resolves the focused panel's datasource and builds an
//! explore URL for its queries. Both steps are asynchronous and both may
//! legitimately come up empty; an empty stage ends the jump silently.

use futures_util::future::BoxFuture;

use crate::dashboard::Panel;

/// Reference to a datasource by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSourceRef(pub String);

/// A resolved datasource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datasource {
    /// Datasource name
    pub name: String,
}

/// Capability for resolving datasources and building explore URLs.
pub trait ExploreGateway: Send + Sync {
    /// Resolve a datasource reference; `None` input resolves the default
    /// datasource. A `None` result means no datasource is available.
    fn resolve_datasource(
        &self,
        datasource: Option<&DataSourceRef>,
    ) -> BoxFuture<'static, Option<Datasource>>;

    /// Build the explore URL for a panel's queries against a resolved
    /// datasource. `None` when the panel has nothing explorable.
    fn build_explore_url(
        &self,
        panel: &Panel,
        datasource: &Datasource,
    ) -> BoxFuture<'static, Option<String>>;
}

/// Capability checks on the current user.
pub trait UserContext: Send + Sync {
    /// Whether the user may jump from a panel to explore.
    fn has_access_to_explore(&self) -> bool;
}
