//! Namespace and review-release enumeration.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use crate::adapters::Toolchain;
use crate::config::Settings;
use crate::domain::{
    is_release_noise, parse_namespace_list, parse_release_line, partition_namespaces, CommandSpec,
    Namespace, ReleaseEntry,
};
use crate::error::{Error, Result};
use crate::ports::CommandRunner;

/// Namespaces and review releases available for a new session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// Namespaces offered for a plain tunnel, in cluster listing order.
    pub plain_namespaces: Vec<Namespace>,
    /// Namespaces classified as review namespaces, in cluster listing order.
    pub review_namespaces: Vec<Namespace>,
    /// Releases of all review namespaces, by namespace then listing order.
    pub review_releases: Vec<ReleaseEntry>,
}

impl Catalog {
    pub fn is_empty(&self) -> bool {
        self.plain_namespaces.is_empty() && self.review_releases.is_empty()
    }
}

/// Builds the catalog from the cluster and release CLIs.
pub struct NamespaceCatalogBuilder<R: CommandRunner> {
    runner: Arc<R>,
    toolchain: Arc<Toolchain>,
    review_marker: String,
    infra_release_marker: String,
    timeout: Duration,
}

impl<R: CommandRunner> NamespaceCatalogBuilder<R> {
    pub fn new(runner: Arc<R>, toolchain: Arc<Toolchain>, settings: &Settings) -> Self {
        Self {
            runner,
            toolchain,
            review_marker: settings.review_marker.clone(),
            infra_release_marker: settings.infra_release_marker.clone(),
            timeout: settings.command_timeout(),
        }
    }

    /// Lists every namespace of the cluster, in listing order.
    pub async fn list_namespaces(&self) -> Result<Vec<Namespace>> {
        let stdout = self.run_checked(&self.toolchain.list_namespaces()).await?;
        Ok(parse_namespace_list(&stdout))
    }

    /// Lists the releases deployed in one review namespace.
    pub async fn list_releases(&self, namespace: &Namespace) -> Result<Vec<ReleaseEntry>> {
        let command = self.toolchain.list_releases(namespace)?;
        let stdout = self.run_checked(&command).await?;

        Ok(parse_release_listing(&stdout, &self.infra_release_marker)
            .into_iter()
            .filter(|entry| {
                let same_namespace = entry.namespace == *namespace;
                if !same_namespace {
                    warn!(
                        namespace = %namespace,
                        release = %entry.release,
                        listed_namespace = %entry.namespace,
                        "skipping release listed under another namespace"
                    );
                }
                same_namespace
            })
            .collect())
    }

    /// Enumerates plain namespaces and review releases.
    ///
    /// Fails only when the namespaces cannot be listed. A review namespace whose
    /// releases cannot be listed contributes nothing.
    pub async fn build(&self) -> Result<Catalog> {
        let namespaces = self.list_namespaces().await?;
        let (plain_namespaces, review_namespaces) =
            partition_namespaces(namespaces, &self.review_marker);

        let mut review_releases = Vec::new();
        for namespace in &review_namespaces {
            match self.list_releases(namespace).await {
                Ok(releases) => review_releases.extend(releases),
                Err(e) => warn!(namespace = %namespace, error = %e, "failed to list releases"),
            }
        }

        debug!(
            plain = plain_namespaces.len(),
            review = review_namespaces.len(),
            releases = review_releases.len(),
            "built namespace catalog"
        );

        Ok(Catalog {
            plain_namespaces,
            review_namespaces,
            review_releases,
        })
    }

    /// Runs a listing command and returns stdout, failing on non-zero exit.
    async fn run_checked(&self, command: &CommandSpec) -> Result<String> {
        let result = self.runner.run(command, self.timeout).await?;
        if !result.success() {
            return Err(Error::CommandFailed {
                program: command.program().to_string(),
                code: result.exit_code,
                stderr: result.stderr.trim().to_string(),
            });
        }
        Ok(result.stdout)
    }
}

/// Parses release-listing output, skipping noise and malformed lines.
pub fn parse_release_listing(output: &str, infra_marker: &str) -> Vec<ReleaseEntry> {
    output
        .lines()
        .filter(|line| !is_release_noise(line, infra_marker))
        .filter_map(|line| match parse_release_line(line) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "skipping release line");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fake_settings, FakeRunner};

    const HELM_HEADER: &str = "NAME\tNAMESPACE\tREVISION\tUPDATED\tSTATUS\tCHART\tAPP VERSION";

    fn tools() -> Toolchain {
        Toolchain::from_settings(&fake_settings())
    }

    fn builder(runner: FakeRunner) -> NamespaceCatalogBuilder<FakeRunner> {
        let settings = fake_settings();
        NamespaceCatalogBuilder::new(Arc::new(runner), Arc::new(tools()), &settings)
    }

    fn helm_row(release: &str, namespace: &str) -> String {
        format!(
            "{}\t{}\t1\t2024-05-01 10:00:00 +0000 UTC\tdeployed\tapp-1.0.0\t1.0.0",
            release, namespace
        )
    }

    #[test]
    fn test_parse_release_listing() {
        let output = format!(
            "{}\n{}\n{}\nbroken\n\n",
            HELM_HEADER,
            helm_row("myrelease", "review-1"),
            helm_row("gitlab-runner", "review-1"),
        );

        assert_eq!(
            parse_release_listing(&output, "gitlab"),
            vec![ReleaseEntry::new("myrelease", "review-1")]
        );
    }

    #[test]
    fn test_catalog_partitions_namespaces() {
        let tools = tools();
        let runner = FakeRunner::new()
            .with_output(tools.list_namespaces(), "default\nreview-1\nprod\n")
            .with_output(
                tools.list_releases(&"review-1".into()).unwrap(),
                "myrelease review-1\n",
            );

        let catalog = tokio_test::block_on(builder(runner).build()).unwrap();

        assert_eq!(
            catalog.plain_namespaces,
            vec![Namespace::from("default"), Namespace::from("prod")]
        );
        assert_eq!(catalog.review_namespaces, vec![Namespace::from("review-1")]);
        assert_eq!(
            catalog.review_releases,
            vec![ReleaseEntry::new("myrelease", "review-1")]
        );
        assert_eq!(catalog.review_releases[0].label(), "review-1/myrelease");
    }

    #[test]
    fn test_releases_keep_namespace_then_listing_order() {
        let tools = tools();
        let runner = FakeRunner::new()
            .with_output(tools.list_namespaces(), "review-b\nteam\nreview-a\n")
            .with_output(
                tools.list_releases(&"review-b".into()).unwrap(),
                &format!("{}\n{}\n{}\n", HELM_HEADER, helm_row("b2", "review-b"), helm_row("b1", "review-b")),
            )
            .with_output(
                tools.list_releases(&"review-a".into()).unwrap(),
                &format!("{}\n", helm_row("a1", "review-a")),
            );

        let catalog = tokio_test::block_on(builder(runner).build()).unwrap();
        let labels: Vec<_> = catalog.review_releases.iter().map(ReleaseEntry::label).collect();
        assert_eq!(labels, vec!["review-b/b2", "review-b/b1", "review-a/a1"]);
    }

    #[tokio::test]
    async fn test_failing_review_namespace_contributes_nothing() {
        let tools = tools();
        let runner = FakeRunner::new()
            .with_output(tools.list_namespaces(), "review-1\nreview-2\n")
            .with_exit(tools.list_releases(&"review-1".into()).unwrap(), 1, "forbidden")
            .with_output(
                tools.list_releases(&"review-2".into()).unwrap(),
                "rel review-2\n",
            );

        let catalog = builder(runner).build().await.unwrap();
        assert_eq!(catalog.review_releases, vec![ReleaseEntry::new("rel", "review-2")]);
        assert!(catalog.plain_namespaces.is_empty());
    }

    #[tokio::test]
    async fn test_empty_release_listing() {
        let tools = tools();
        let runner = FakeRunner::new()
            .with_output(tools.list_namespaces(), "review-1\n")
            .with_output(tools.list_releases(&"review-1".into()).unwrap(), "");

        let catalog = builder(runner).build().await.unwrap();
        assert!(catalog.review_releases.is_empty());
        assert!(catalog.is_empty());
    }

    #[tokio::test]
    async fn test_release_from_other_namespace_is_skipped() {
        let tools = tools();
        let runner = FakeRunner::new().with_output(
            tools.list_releases(&"review-1".into()).unwrap(),
            "mine review-1\nstray prod\n",
        );

        let releases = builder(runner).list_releases(&"review-1".into()).await.unwrap();
        assert_eq!(releases, vec![ReleaseEntry::new("mine", "review-1")]);
    }

    #[tokio::test]
    async fn test_cluster_failure_is_an_error() {
        let tools = tools();
        let runner = FakeRunner::new().with_exit(tools.list_namespaces(), 1, "connection refused");

        assert!(matches!(
            builder(runner).build().await,
            Err(Error::CommandFailed { .. })
        ));

        let missing = builder(FakeRunner::new());
        assert!(matches!(
            missing.build().await,
            Err(Error::ProcessLaunch { .. })
        ));
    }
}
