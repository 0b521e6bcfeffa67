//! Dashboard capability boundary and panel model.
//!
//! Responsibilities:
//! - Define the operations dashboard-scoped shortcuts need from the
//!   active dashboard, as a trait so the service can be tested without a
//!   concrete dashboard implementation.
//!
//! Non-responsibilities:
//! - Panel lifecycle, refresh scheduling, rendering (the embedding
//!   application owns those behind the trait).

use std::sync::{Arc, Mutex};

use crate::explore::DataSourceRef;

/// Numeric panel identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PanelId(pub u64);

impl std::fmt::Display for PanelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Legend display options for a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendOptions {
    /// Whether the legend is shown.
    pub show: bool,
}

/// One query a panel issues against its datasource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Letter identifying the query within the panel (A, B, ...).
    pub ref_id: String,
    /// The query expression.
    pub query: String,
}

/// A dashboard panel, as shortcuts see it.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    /// Panel identifier
    pub id: PanelId,
    /// Panel title
    pub title: String,
    /// Datasource the panel queries; `None` means the default datasource
    pub datasource: Option<DataSourceRef>,
    /// Queries the panel issues
    pub targets: Vec<Target>,
    /// Legend options; `None` for panel types without a legend
    pub legend: Option<LegendOptions>,
}

/// A panel plus its position in the dashboard's panel list.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelInfo {
    /// The panel
    pub panel: Panel,
    /// Index into the dashboard's panel list
    pub index: usize,
}

/// Shared-crosshair behavior of graph tooltips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TooltipMode {
    /// Tooltip on the hovered panel only.
    #[default]
    Default,
    /// Crosshair shared across panels.
    SharedCrosshair,
    /// Full tooltip shared across panels.
    SharedTooltip,
}

impl TooltipMode {
    /// The next mode in the cycle order.
    pub fn next(self) -> Self {
        match self {
            Self::Default => Self::SharedCrosshair,
            Self::SharedCrosshair => Self::SharedTooltip,
            Self::SharedTooltip => Self::Default,
        }
    }
}

/// Capability set of the currently viewed dashboard.
///
/// Handlers capture a [`SharedDashboard`] and read through it at fire
/// time, so focus and edit state are always current.
pub trait DashboardHandle: Send {
    /// Panel that currently has keyboard focus, if any.
    fn focus_panel_id(&self) -> Option<PanelId>;

    /// Set or clear the focused panel.
    fn set_focus_panel(&mut self, id: Option<PanelId>);

    /// Whether the current user may edit this dashboard.
    fn can_edit(&self) -> bool;

    /// Current graph tooltip mode.
    fn graph_tooltip(&self) -> TooltipMode;

    /// Change the graph tooltip mode.
    fn set_graph_tooltip(&mut self, mode: TooltipMode);

    /// Look up a panel by id.
    fn panel_by_id(&self, id: PanelId) -> Option<Panel>;

    /// Look up a panel and its list position by id.
    fn panel_info_by_id(&self, id: PanelId) -> Option<PanelInfo>;

    /// Duplicate the panel at the given list position.
    fn duplicate_panel(&mut self, index: usize);

    /// Flip the legend visibility of one panel. No-op for panels without
    /// a legend.
    fn toggle_panel_legend(&mut self, id: PanelId);

    /// Flip legend visibility on every panel.
    fn toggle_legends_for_all(&mut self);

    /// Collapse all dashboard rows.
    fn collapse_rows(&mut self);

    /// Expand all dashboard rows.
    fn expand_rows(&mut self);

    /// Trigger a dashboard data refresh.
    fn start_refresh(&mut self);
}

/// The dashboard handle as handlers hold it.
pub type SharedDashboard = Arc<Mutex<dyn DashboardHandle>>;
