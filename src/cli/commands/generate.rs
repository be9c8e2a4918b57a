//! cli::commands::generate
//!
//! The release-notes generation run.
//!
//! # Pipeline
//!
//! 1. Predict the last released version from the changelog heading (anchor).
//! 2. Scan build-metadata history for the new release version and the
//!    last-release commit (the newest commit whose metadata content contains
//!    the anchor as a raw substring).
//! 3. Collect ticket identifiers from commits in `(lastRelease, HEAD]` that
//!    touch the module directory.
//! 4. Verify the release ticket is not closed, then fetch each ticket, link
//!    it to the release ticket, and classify it into a group.
//! 5. Print the announcement post and insert the rendered fragment into the
//!    changelog file.
//!
//! Every step is sequential and every failure is fatal; link mutations made
//! before a failure are not rolled back.

use std::collections::BTreeSet;
use std::fs;

use anyhow::{bail, Context as _, Result};

use crate::cli::Context;
use crate::config::{Config, Credentials};
use crate::core::groups::{self, Classification, TicketGroups};
use crate::core::ticket::{self, TicketId};
use crate::core::version;
use crate::core::{changelog, render};
use crate::git::{CommitId, Git};
use crate::tracker::jira::JiraTracker;
use crate::tracker::{Tracker, RELATIONSHIP_LINK_TYPE};
use crate::ui::output::{self, Verbosity};

/// Arguments for the generate command.
#[derive(Debug, Default)]
pub struct GenerateArgs {
    /// Override for the release-tracking ticket.
    pub release_ticket: Option<String>,
    /// Skip tracker link mutations and the changelog write.
    pub dry_run: bool,
}

/// Run release-notes generation.
///
/// This is a synchronous wrapper that uses tokio to run the async
/// implementation.
pub fn generate(ctx: &Context, args: GenerateArgs) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(generate_async(ctx, args))
}

async fn generate_async(ctx: &Context, args: GenerateArgs) -> Result<()> {
    let cwd = match &ctx.cwd {
        Some(path) => path.clone(),
        None => std::env::current_dir()?,
    };

    let mut config = Config::new(cwd);
    if let Some(ticket) = args.release_ticket {
        config.release_ticket = ticket;
    }

    let credentials = Credentials::from_env()?;
    let tracker = JiraTracker::new(config.tracker_base.clone(), credentials);

    run_with_tracker(ctx, &config, &tracker, args.dry_run).await
}

/// The full pipeline against an arbitrary tracker implementation.
///
/// Exposed so integration tests can run it against the mock tracker.
pub async fn run_with_tracker(
    ctx: &Context,
    config: &Config,
    tracker: &dyn Tracker,
    dry_run: bool,
) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    output::debug(format!("tracker: {}", tracker.name()), verbosity);

    let git = Git::open(&config.repo_dir)?;

    let changelog_file = config.changelog_file();
    let changelog_text = fs::read_to_string(&changelog_file)
        .with_context(|| format!("failed to read {}", changelog_file.display()))?;

    let anchor = version::last_released_version(&changelog_text)?;
    output::debug(format!("anchor version: {}", anchor), verbosity);

    let head = git.head()?;
    let release = resolve_release(&git, config, &head, &anchor)?;
    output::print(format!("release version: {}", release.version), verbosity);
    output::print(
        format!("last release commit: {}", release.last_release),
        verbosity,
    );

    let tickets = scan_tickets(&git, config, &release.last_release, &head, verbosity)?;

    let keys: Vec<&str> = tickets.iter().map(TicketId::as_str).collect();
    output::print(config.issue_search_url(&keys), verbosity);

    let release_issue = tracker.get_issue(&config.release_ticket).await?;
    if release_issue.is_closed() {
        bail!(
            "{} is closed. Verify correct ticket.",
            config.browse_url(&config.release_ticket)
        );
    }

    let groups = classify_tickets(config, tracker, &tickets, dry_run, verbosity).await?;

    let post = render::changelog_post(
        &groups,
        &release.version,
        &config.browse_url(&config.release_ticket),
    );
    output::print(&post, verbosity);

    let fragment = render::changelog_fragment(&groups, &release.version);
    let updated = changelog::insert_fragment(&changelog_text, &fragment)?;

    if dry_run {
        output::print(&fragment, verbosity);
        output::print("dry run: changelog not written", verbosity);
    } else {
        fs::write(&changelog_file, updated)
            .with_context(|| format!("failed to write {}", changelog_file.display()))?;
    }

    Ok(())
}

/// Outcome of the build-metadata history scan.
struct ReleaseResolution {
    /// New release version, read verbatim from build metadata.
    version: String,
    /// Newest commit whose metadata content contains the anchor.
    last_release: CommitId,
}

/// Scan build-metadata history for the release boundary.
///
/// Walks the most recent commits touching the metadata file, newest first.
/// The second commit visited carries the new release version in its
/// `Bundle-Version` line (the tip commit holds the follow-up development
/// bump). Independently, the first commit whose content contains the anchor
/// version is the last-release commit; the walk stops there.
fn resolve_release(
    git: &Git,
    config: &Config,
    head: &CommitId,
    anchor: &str,
) -> Result<ReleaseResolution> {
    let commits = git.commits_touching(head, &config.metadata_path, config.metadata_scan_window)?;

    let mut version = None;
    let mut last_release = None;

    for (index, commit) in commits.iter().enumerate() {
        let content = git.file_content_at(&commit.id, &config.metadata_path)?;

        if index == 1 {
            version = version::bundle_version(&content);
        }

        if content.contains(anchor) {
            last_release = Some(commit.id.clone());
            break;
        }
    }

    let Some(last_release) = last_release else {
        bail!(
            "no commit within the last {} touching {} contains the previous release version {}",
            config.metadata_scan_window,
            config.metadata_path,
            anchor
        );
    };

    let Some(version) = version else {
        bail!(
            "could not read a Bundle-Version line from the history of {}",
            config.metadata_path
        );
    };

    Ok(ReleaseResolution {
        version,
        last_release,
    })
}

/// Collect unique ticket identifiers from `(last_release, head]`.
fn scan_tickets(
    git: &Git,
    config: &Config,
    last_release: &CommitId,
    head: &CommitId,
    verbosity: Verbosity,
) -> Result<BTreeSet<TicketId>> {
    let commits = git.commits_in_range(last_release, head, &config.module_dir)?;

    let tickets = ticket::extract_all(commits.iter().map(|commit| commit.message.as_str()));
    for ticket in &tickets {
        output::print(ticket, verbosity);
    }

    Ok(tickets)
}

/// Fetch, link, and classify every ticket, in lexicographic order.
async fn classify_tickets(
    config: &Config,
    tracker: &dyn Tracker,
    tickets: &BTreeSet<TicketId>,
    dry_run: bool,
    verbosity: Verbosity,
) -> Result<TicketGroups> {
    let mut groups = TicketGroups::new();

    for ticket in tickets {
        output::print(ticket, verbosity);

        let issue = tracker.get_issue(ticket.as_str()).await?;

        let line = format!(
            "[{}]({}) - {}",
            ticket,
            config.browse_url(ticket.as_str()),
            issue.summary
        )
        .trim()
        .to_string();

        if !dry_run {
            tracker
                .link_issues(
                    RELATIONSHIP_LINK_TYPE,
                    &config.release_ticket,
                    ticket.as_str(),
                )
                .await?;
        }

        match groups::classify(ticket, &issue.labels, &issue.components) {
            Classification::Grouped(name) => groups.add(name, line),
            Classification::MissingLabel => {
                output::warn(
                    format!("Missing poshi label: {}", config.browse_url(ticket.as_str())),
                    verbosity,
                );
                groups.add(groups::OTHER_GROUP, line);
            }
            Classification::MissingComponent => {
                output::warn(
                    format!("Missing component: {}", config.browse_url(ticket.as_str())),
                    verbosity,
                );
            }
            Classification::SentinelComponent => {
                // Release-component tickets track the release itself and are
                // never listed in the notes.
            }
        }
    }

    Ok(groups)
}
