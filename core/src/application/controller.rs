//! Session controller: menu assembly and action dispatch.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::catalog::{Catalog, NamespaceCatalogBuilder};
use super::detector::ActiveSessionDetector;
use super::locator::ConfigFileLocator;
use crate::adapters::Toolchain;
use crate::config::{HelpLinkSetting, Settings};
use crate::domain::{
    ActionItem, ActionOutcome, CommandResult, CommandSpec, Menu, MenuGroup, Namespace,
    SessionEvent, SessionState,
};
use crate::error::{Error, Result};
use crate::ports::{CommandRunner, FileOpener, NotificationSink};

/// Title of the review-release group.
const REVIEW_GROUP_TITLE: &str = "Port-Forward (Review)";

/// Title of the help-link group.
const HELP_GROUP_TITLE: &str = "Help";

/// Builds the session menu and executes the chosen action.
///
/// Nothing is cached between calls: every menu build re-detects the session
/// and re-lists the cluster.
pub struct SessionController<R: CommandRunner, N: NotificationSink, O: FileOpener> {
    runner: Arc<R>,
    toolchain: Arc<Toolchain>,
    detector: ActiveSessionDetector<R>,
    catalog: NamespaceCatalogBuilder<R>,
    locator: ConfigFileLocator,
    notifier: N,
    opener: O,
    help_links: Vec<HelpLinkSetting>,
    timeout: Duration,
}

impl<R: CommandRunner, N: NotificationSink, O: FileOpener> SessionController<R, N, O> {
    pub fn new(runner: R, notifier: N, opener: O, settings: &Settings) -> Self {
        let runner = Arc::new(runner);
        let toolchain = Arc::new(Toolchain::from_settings(settings));

        Self {
            detector: ActiveSessionDetector::new(runner.clone(), toolchain.clone(), settings),
            catalog: NamespaceCatalogBuilder::new(runner.clone(), toolchain.clone(), settings),
            locator: ConfigFileLocator::new(settings.config_search_root.clone()),
            runner,
            toolchain,
            notifier,
            opener,
            help_links: settings.help_links.clone(),
            timeout: settings.command_timeout(),
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn opener(&self) -> &O {
        &self.opener
    }

    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Detects the current session, reporting inspection failures.
    pub async fn session_state(&self) -> SessionState {
        match self.detector.try_detect().await {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "session detection failed");
                self.notifier.notify(SessionEvent::ActionFailed {
                    action: "Session detection".to_string(),
                    message: e.to_string(),
                });
                SessionState::Inactive
            }
        }
    }

    /// Lists the catalog; a cluster failure degrades to an empty catalog.
    pub async fn catalog(&self) -> Catalog {
        match self.catalog.build().await {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(error = %e, "namespace listing failed; menu will be empty");
                self.notifier.notify(SessionEvent::CatalogUnavailable {
                    message: e.to_string(),
                });
                Catalog::default()
            }
        }
    }

    // =========================================================================
    // Menu
    // =========================================================================

    /// Builds the menu for one menu-open event.
    ///
    /// An active session offers only stop and open-config; an inactive one
    /// offers only start actions. Help links are always appended.
    pub async fn build_menu(&self) -> Menu {
        let state = self.session_state().await;

        let mut groups = match &state {
            SessionState::Active(namespace) => {
                let mut items = vec![ActionItem::Stop {
                    namespace: namespace.clone(),
                }];
                if let Some(namespace) = namespace {
                    items.push(ActionItem::OpenConfig {
                        namespace: namespace.clone(),
                    });
                }
                vec![MenuGroup::new(Menu::session_title(&state), items)]
            }
            SessionState::Inactive => {
                let catalog = self.catalog().await;
                let start_items = catalog
                    .plain_namespaces
                    .into_iter()
                    .map(|namespace| ActionItem::StartPlain { namespace })
                    .collect();
                let review_items = catalog
                    .review_releases
                    .into_iter()
                    .map(|entry| ActionItem::StartReview {
                        namespace: entry.namespace,
                        release: entry.release,
                    })
                    .collect();
                vec![
                    MenuGroup::new(Menu::session_title(&state), start_items),
                    MenuGroup::new(REVIEW_GROUP_TITLE, review_items),
                ]
            }
        };

        if !self.help_links.is_empty() {
            let links = self
                .help_links
                .iter()
                .map(|link| ActionItem::HelpLink {
                    label: link.label.clone(),
                    url: link.url.clone(),
                })
                .collect();
            groups.push(MenuGroup::new(HELP_GROUP_TITLE, links));
        }

        Menu { state, groups }
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Executes one menu action.
    ///
    /// Every failure is reported to the notification sink before it is returned.
    pub async fn execute(&self, item: &ActionItem) -> Result<ActionOutcome> {
        info!(action = item.kind(), label = %item.label(), "executing action");

        let outcome = match item {
            ActionItem::StartPlain { namespace } => self.start_plain(namespace).await,
            ActionItem::StartReview { namespace, release } => {
                self.start_review(namespace, release).await
            }
            ActionItem::Stop { namespace } => self.stop(namespace.as_ref()).await,
            ActionItem::OpenConfig { namespace } => self.open_config(namespace),
            ActionItem::HelpLink { url, .. } => self
                .opener
                .open_url(url)
                .map(|()| ActionOutcome::Browsed { url: url.clone() }),
        };

        outcome.map_err(|e| self.report_failure(item, e))
    }

    async fn start_plain(&self, namespace: &Namespace) -> Result<ActionOutcome> {
        self.ensure_no_session().await?;

        let command = self.toolchain.start_port_forward(namespace)?;
        let result = self.run_checked(&command).await?;

        self.notifier.notify(SessionEvent::PortForwardStarted {
            namespace: namespace.clone(),
        });
        Ok(ActionOutcome::Completed(result))
    }

    /// The review tunnel runs in the foreground, so it is launched and left running.
    async fn start_review(&self, namespace: &Namespace, release: &str) -> Result<ActionOutcome> {
        self.ensure_no_session().await?;

        let command = self
            .toolchain
            .start_review_port_forward(namespace, release)?;
        let pid = self.runner.spawn(&command)?;

        self.notifier.notify(SessionEvent::ReviewPortForwardStarted {
            namespace: namespace.clone(),
            release: release.to_string(),
        });
        Ok(ActionOutcome::Launched { pid })
    }

    /// Runs the tunnel CLI's global clean-up, which tears down every session.
    async fn stop(&self, namespace: Option<&Namespace>) -> Result<ActionOutcome> {
        let result = self.run_checked(&self.toolchain.clean_up()).await?;

        self.notifier.notify(SessionEvent::PortForwardStopped {
            namespace: namespace.cloned(),
        });
        Ok(ActionOutcome::Completed(result))
    }

    fn open_config(&self, namespace: &Namespace) -> Result<ActionOutcome> {
        let Some(path) = self.locator.locate(namespace) else {
            self.notifier.notify(SessionEvent::ConfigNotFound {
                namespace: namespace.clone(),
            });
            return Err(Error::ConfigNotFound {
                namespace: namespace.to_string(),
            });
        };

        self.opener.open_path(&path)?;
        Ok(ActionOutcome::Opened { path })
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    /// Re-detects the session so two tunnels are never started.
    async fn ensure_no_session(&self) -> Result<()> {
        match self.detector.try_detect().await? {
            SessionState::Inactive => Ok(()),
            SessionState::Active(namespace) => Err(Error::SessionAlreadyActive {
                namespace: namespace.map(|ns| ns.to_string()),
            }),
        }
    }

    async fn run_checked(&self, command: &CommandSpec) -> Result<CommandResult> {
        let result = self.runner.run(command, self.timeout).await?;
        if !result.success() {
            return Err(Error::CommandFailed {
                program: command.program().to_string(),
                code: result.exit_code,
                stderr: result.stderr.trim().to_string(),
            });
        }
        Ok(result)
    }

    /// Reports a failed action unless the sink already heard about it.
    fn report_failure(&self, item: &ActionItem, error: Error) -> Error {
        warn!(action = item.kind(), error = %error, "action failed");
        if !matches!(error, Error::ConfigNotFound { .. }) {
            self.notifier.notify(SessionEvent::ActionFailed {
                action: item.label(),
                message: error.to_string(),
            });
        }
        error
    }
}
