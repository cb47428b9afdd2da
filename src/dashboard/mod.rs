//! Dashboard view model
//!
//! Mounting a [`Dashboard`] fires the overview, products and users fetches
//! concurrently. Each one fills its own [`Section`] as soon as it settles, so
//! a slow endpoint never holds back the others. Unmounting (or dropping) the
//! dashboard aborts whatever is still in flight.

pub mod widgets;

pub use widgets::{
    project_entries, team_entries, weekly_bars, AnalyticsBar, ProjectEntry, TaskStatus, TeamEntry,
};

use std::sync::Arc;
use tokio::sync::watch;

use crate::client::{ApiClient, ApiResult, Overview, Product, TeamMember, ViewScope};
use crate::session::SessionStore;
use crate::stats::ProjectStats;

/// One independently loaded part of the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct Section<T> {
    pub loading: bool,
    /// Last successfully fetched data, kept across failed refreshes
    pub data: Option<T>,
    /// Message of the last failed fetch
    pub error: Option<String>,
    /// Fetch round currently allowed to settle
    round: u64,
}

impl<T> Default for Section<T> {
    fn default() -> Self {
        Self {
            loading: false,
            data: None,
            error: None,
            round: 0,
        }
    }
}

impl<T> Section<T> {
    /// Start a new fetch round; earlier rounds can no longer settle
    fn begin(&mut self) -> u64 {
        self.round += 1;
        self.loading = true;
        self.round
    }

    fn settle(&mut self, label: &'static str, round: u64, result: ApiResult<T>) {
        if round != self.round {
            tracing::debug!(section = label, round, "Dropping superseded response");
            return;
        }
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(section = label, error = %e, "Dashboard fetch failed");
                self.error = Some(e.to_string());
            }
        }
    }
}

/// Snapshot of every dashboard section
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub overview: Section<Overview>,
    pub products: Section<Vec<Product>>,
    pub users: Section<Vec<TeamMember>>,
}

impl DashboardState {
    /// No section is waiting for a response
    pub fn is_settled(&self) -> bool {
        !(self.overview.loading || self.products.loading || self.users.loading)
    }

    pub fn stats(&self) -> ProjectStats {
        ProjectStats::derive(self.overview.data.as_ref(), self.products.data.as_deref())
    }

    pub fn projects(&self) -> Vec<ProjectEntry> {
        project_entries(self.products.data.as_deref().unwrap_or_default())
    }

    pub fn team(&self) -> Vec<TeamEntry> {
        team_entries(self.users.data.as_deref().unwrap_or_default())
    }
}

/// A mounted dashboard view
pub struct Dashboard {
    client: ApiClient,
    token: Option<String>,
    scope: ViewScope,
    state: Arc<watch::Sender<DashboardState>>,
}

impl Dashboard {
    /// Mount for the current session and start loading.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(client: ApiClient, session: &SessionStore) -> Self {
        Self::mount_with_token(client, session.token())
    }

    /// Mount with an explicit bearer token
    pub fn mount_with_token(client: ApiClient, token: Option<String>) -> Self {
        let (state, _) = watch::channel(DashboardState::default());
        let dashboard = Self {
            client,
            token,
            scope: ViewScope::new(),
            state: Arc::new(state),
        };
        dashboard.refresh();
        dashboard
    }

    /// Re-issue all three fetches. Existing data stays until replaced; a
    /// response from an older round is dropped once a newer one is issued.
    pub fn refresh(&self) {
        if self.scope.is_closed() {
            tracing::debug!("Dashboard unmounted, ignoring refresh");
            return;
        }

        let mut rounds = (0, 0, 0);
        self.state.send_modify(|s| {
            rounds = (s.overview.begin(), s.products.begin(), s.users.begin());
        });
        let (overview_round, products_round, users_round) = rounds;

        let client = self.client.clone();
        let token = self.token.clone();
        let state = Arc::clone(&self.state);
        self.scope.spawn(
            "overview",
            async move { client.fetch_overview(token.as_deref()).await },
            move |result| state.send_modify(|s| s.overview.settle("overview", overview_round, result)),
        );

        let client = self.client.clone();
        let token = self.token.clone();
        let state = Arc::clone(&self.state);
        self.scope.spawn(
            "products",
            async move { client.fetch_products(token.as_deref()).await },
            move |result| state.send_modify(|s| s.products.settle("products", products_round, result)),
        );

        let client = self.client.clone();
        let token = self.token.clone();
        let state = Arc::clone(&self.state);
        self.scope.spawn(
            "users",
            async move { client.fetch_users(token.as_deref()).await },
            move |result| state.send_modify(|s| s.users.settle("users", users_round, result)),
        );
    }

    /// Tear the view down; pending fetches are aborted and never applied
    pub fn unmount(&self) {
        if !self.scope.is_closed() {
            tracing::debug!("Unmounting dashboard");
        }
        self.scope.close();
    }

    pub fn is_mounted(&self) -> bool {
        !self.scope.is_closed()
    }

    /// Current snapshot
    pub fn state(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    /// Watch section updates
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.subscribe()
    }

    /// Wait until every section has settled. Returns immediately once unmounted.
    pub async fn settled(&self) -> DashboardState {
        if self.scope.is_closed() {
            return self.state();
        }

        let mut rx = self.state.subscribe();
        let result = match rx.wait_for(DashboardState::is_settled).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        result
    }

    pub fn stats(&self) -> ProjectStats {
        self.state.borrow().stats()
    }

    pub fn projects(&self) -> Vec<ProjectEntry> {
        self.state.borrow().projects()
    }

    pub fn team(&self) -> Vec<TeamEntry> {
        self.state.borrow().team()
    }
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("client", &self.client)
            .field("mounted", &self.is_mounted())
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}
