//! Batch submission of holiday maps
//!
//! `submit_holidays` snapshots one user's classified cells and returns a
//! future resolving to the real outcome of the post. `submit_all` fires one
//! mass-mode submission per user before awaiting any of them, then folds the
//! outcomes according to the configured [`AggregationPolicy`].

use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, error, info, warn};

use super::client::AjaxClient;
use super::error::SubmitError;
use super::notice::{
    ALL_FAILURE_MESSAGE, ALL_SUCCESS_MESSAGE, Notice, Notifier, SINGLE_SUCCESS_MESSAGE,
    UNKNOWN_REJECTION_MESSAGE,
};
use super::types::{
    MassHolidaysRequest, SubmitAllReport, SubmitMode, SubmitOutcome, UserOutcome,
};
use crate::config::{Config, SubmitSettings};
use crate::domain::{HolidayTable, UserId};

/// Posts holiday maps and reports the results through a [`Notifier`]
#[derive(Clone)]
pub struct BatchSubmitter {
    client: AjaxClient,
    notifier: Arc<dyn Notifier>,
    settings: SubmitSettings,
}

impl BatchSubmitter {
    pub fn new(client: AjaxClient, notifier: Arc<dyn Notifier>, settings: SubmitSettings) -> Self {
        Self {
            client,
            notifier,
            settings,
        }
    }

    pub fn from_config(config: &Config, notifier: Arc<dyn Notifier>) -> Self {
        Self::new(
            AjaxClient::with_settings(&config.endpoint),
            notifier,
            config.submit.clone(),
        )
    }

    pub fn settings(&self) -> &SubmitSettings {
        &self.settings
    }

    /// Submit the classified cells of one user.
    ///
    /// The holiday map is taken from `table` right away; the returned future
    /// performs the post and resolves once the endpoint has answered.
    pub fn submit_holidays(
        &self,
        table: &HolidayTable,
        user_id: UserId,
        mode: SubmitMode,
    ) -> impl Future<Output = SubmitOutcome> + Send + 'static {
        let request = MassHolidaysRequest::for_user(table, user_id);
        if let Some(row) = table.row(user_id) {
            let skipped = row.selected_count();
            if skipped > 0 {
                debug!(
                    "[holiday-grid:submit] user {}: skipping {} unclassified selected cell(s)",
                    user_id, skipped
                );
            }
        } else {
            warn!("[holiday-grid:submit] user {} is not in the table", user_id);
        }

        let this = self.clone();
        async move { this.dispatch(request, mode).await }
    }

    /// Submit every user in table order and report one overall status
    pub fn submit_all(
        &self,
        table: &HolidayTable,
    ) -> impl Future<Output = SubmitAllReport> + Send + 'static {
        let pending: Vec<_> = table
            .user_ids()
            .map(|user_id| {
                let submission = self.submit_holidays(table, user_id, SubmitMode::Mass);
                async move {
                    UserOutcome {
                        user_id,
                        outcome: submission.await,
                    }
                }
            })
            .collect();

        let policy = self.settings.aggregation;
        let notifier = Arc::clone(&self.notifier);
        info!("[holiday-grid:submit] Submitting {} user(s)", pending.len());

        async move {
            let outcomes = join_all(pending).await;
            let report = SubmitAllReport { policy, outcomes };

            if report.succeeded() {
                info!("[holiday-grid:submit] Submit-all finished ({:?})", policy);
                notifier.notify(Notice::info(ALL_SUCCESS_MESSAGE));
            } else {
                let failed: Vec<String> = report.failures().map(|f| f.user_id.to_string()).collect();
                warn!(
                    "[holiday-grid:submit] Submit-all reported failure ({:?}), failed users: [{}]",
                    policy,
                    failed.join(", ")
                );
                notifier.notify(Notice::error(ALL_FAILURE_MESSAGE));
            }
            report
        }
    }

    async fn dispatch(self, request: MassHolidaysRequest, mode: SubmitMode) -> SubmitOutcome {
        let user_id = request.user_id;
        let client = self.client.clone();

        let result = tokio::task::spawn_blocking(move || client.post_mass_holidays(&request))
            .await
            .map_err(|e| SubmitError::Task(e.to_string()))
            .and_then(|r| r);

        let outcome = match result {
            Ok(response) if response.success => SubmitOutcome::Accepted,
            Ok(response) => SubmitOutcome::Rejected {
                message: response
                    .error
                    .unwrap_or_else(|| UNKNOWN_REJECTION_MESSAGE.to_string()),
            },
            Err(e) => {
                error!("[holiday-grid:submit] user {}: {}", user_id, e);
                SubmitOutcome::TransportFailed {
                    reason: e.to_string(),
                }
            }
        };

        debug!("[holiday-grid:submit] user {}: {}", user_id, outcome);
        self.announce(mode, &outcome);
        outcome
    }

    fn announce(&self, mode: SubmitMode, outcome: &SubmitOutcome) {
        match outcome {
            SubmitOutcome::Accepted => {
                if mode == SubmitMode::Single {
                    self.notifier.notify(Notice::info(SINGLE_SUCCESS_MESSAGE));
                }
            }
            SubmitOutcome::Rejected { message } => {
                if mode == SubmitMode::Single || self.settings.notify_mass_failures {
                    self.notifier.notify(Notice::error(message.clone()));
                }
            }
            // Logged in dispatch; nothing to show
            SubmitOutcome::TransportFailed { .. } => {}
        }
    }
}

impl std::fmt::Debug for BatchSubmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchSubmitter")
            .field("client", &self.client)
            .field("settings", &self.settings)
            .finish()
    }
}
