//! Update runner backed by external commands.
//!
//! Mode selection, in order:
//! - `command`: a configured shell command performs the whole update
//! - `git`: the root is a git checkout; fetch, move to the channel's target,
//!   then run the optional build command
//! - otherwise nothing can be done and the outcome is `unknown`

use crate::step_runner::{StepRun, run_step};
use crate::{Result as UpdateErrorResult, UpdateRunOptions, UpdateRunner};

use gw_core::{MODE_UNKNOWN, UpdateChannel, UpdateOutcome, UpdateStatus, UpdateStep};

use std::path::Path;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use log::{info, warn};

pub const MODE_COMMAND: &str = "command";
pub const MODE_GIT: &str = "git";

const SHELL: &str = "sh";
const GIT: &str = "git";
const CHANNEL_ENV: &str = "GW_UPDATE_CHANNEL";

#[derive(Debug, Clone)]
pub struct CommandUpdateRunner {
    /// Replaces the git flow entirely when set
    command: Option<String>,
    /// Runs after a successful git update
    build_command: Option<String>,
    default_timeout_ms: u64,
}

impl CommandUpdateRunner {
    pub fn new(
        command: Option<String>,
        build_command: Option<String>,
        default_timeout_ms: u64,
    ) -> Self {
        Self {
            command,
            build_command,
            default_timeout_ms,
        }
    }

    async fn run_command_mode(
        &self,
        session: &mut StepSession<'_>,
        command: &str,
    ) -> UpdateErrorResult<UpdateOutcome> {
        if let Verdict::Failed(reason) = session.run("command", SHELL, &["-c", command]).await? {
            return Ok(session.finish_error(MODE_COMMAND, None, reason));
        }

        Ok(session.finish(UpdateStatus::Ok, MODE_COMMAND, None, None, None))
    }

    async fn run_git_mode(
        &self,
        session: &mut StepSession<'_>,
    ) -> UpdateErrorResult<UpdateOutcome> {
        let before = match session.run("git rev-parse", GIT, &["rev-parse", "HEAD"]).await? {
            Verdict::Passed(head) => Some(head),
            Verdict::Failed(reason) => return Ok(session.finish_error(MODE_GIT, None, reason)),
        };

        match session
            .run("git status", GIT, &["status", "--porcelain"])
            .await?
        {
            Verdict::Passed(changes) if !changes.is_empty() => {
                return Ok(session.finish_error(MODE_GIT, before, String::from("dirty")));
            }
            Verdict::Passed(_) => {}
            Verdict::Failed(reason) => return Ok(session.finish_error(MODE_GIT, before, reason)),
        }

        if let Verdict::Failed(reason) = session
            .run("git fetch", GIT, &["fetch", "--all", "--prune", "--tags"])
            .await?
        {
            return Ok(session.finish_error(MODE_GIT, before, reason));
        }

        match session.channel {
            Some(UpdateChannel::Stable) | Some(UpdateChannel::Beta) => {
                let tags = match session
                    .run("git tag", GIT, &["tag", "--list", "--sort=-v:refname"])
                    .await?
                {
                    Verdict::Passed(tags) => tags,
                    Verdict::Failed(reason) => {
                        return Ok(session.finish_error(MODE_GIT, before, reason));
                    }
                };

                let Some(tag) = select_release_tag(&tags, session.channel) else {
                    return Ok(session.finish_error(
                        MODE_GIT,
                        before,
                        String::from("no-release-tag"),
                    ));
                };

                if let Verdict::Failed(reason) = session
                    .run("git checkout", GIT, &["checkout", "--detach", tag])
                    .await?
                {
                    return Ok(session.finish_error(MODE_GIT, before, reason));
                }
            }
            Some(UpdateChannel::Dev) | None => {
                if let Verdict::Failed(reason) = session
                    .run("git pull", GIT, &["pull", "--ff-only"])
                    .await?
                {
                    return Ok(session.finish_error(MODE_GIT, before, reason));
                }
            }
        }

        if let Some(build) = &self.build_command
            && let Verdict::Failed(reason) = session.run("build", SHELL, &["-c", build]).await?
        {
            return Ok(session.finish_error(MODE_GIT, before, reason));
        }

        let after = match session.run("git rev-parse", GIT, &["rev-parse", "HEAD"]).await? {
            Verdict::Passed(head) => Some(head),
            Verdict::Failed(reason) => return Ok(session.finish_error(MODE_GIT, before, reason)),
        };

        Ok(session.finish(UpdateStatus::Ok, MODE_GIT, before, after, None))
    }
}

#[async_trait]
impl UpdateRunner for CommandUpdateRunner {
    async fn run(&self, options: UpdateRunOptions) -> UpdateErrorResult<UpdateOutcome> {
        let budget = Duration::from_millis(options.timeout_ms.unwrap_or(self.default_timeout_ms));
        let mut session = StepSession::new(&options.cwd, options.channel, budget);

        let outcome = if let Some(command) = &self.command {
            self.run_command_mode(&mut session, command).await?
        } else if options.cwd.join(".git").exists() {
            self.run_git_mode(&mut session).await?
        } else {
            warn!(
                "update root {} is neither a git checkout nor has an update command configured",
                options.cwd.display()
            );
            session.finish(UpdateStatus::Unknown, MODE_UNKNOWN, None, None, None)
        };

        info!(
            "update runner finished status={} mode={} steps={} in {}ms",
            outcome.status,
            outcome.mode,
            outcome.steps.len(),
            outcome.duration_ms
        );

        Ok(outcome)
    }
}

/// Newest tag for the channel from `git tag --sort=-v:refname` output.
///
/// Stable only accepts plain release tags (no `-` pre-release suffix).
pub fn select_release_tag(tags: &str, channel: Option<UpdateChannel>) -> Option<&str> {
    tags.lines()
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .find(|tag| match channel {
            Some(UpdateChannel::Stable) => !tag.contains('-'),
            _ => true,
        })
}

enum Verdict {
    Passed(String),
    Failed(String),
}

/// Steps executed so far plus the shared time budget
struct StepSession<'a> {
    root: &'a Path,
    channel: Option<UpdateChannel>,
    started: Instant,
    budget: Duration,
    steps: Vec<UpdateStep>,
}

impl<'a> StepSession<'a> {
    fn new(root: &'a Path, channel: Option<UpdateChannel>, budget: Duration) -> Self {
        Self {
            root,
            channel,
            started: Instant::now(),
            budget,
            steps: Vec::new(),
        }
    }

    async fn run(&mut self, name: &str, program: &str, args: &[&str]) -> UpdateErrorResult<Verdict> {
        let remaining = self.budget.saturating_sub(self.started.elapsed());
        let channel = self.channel.map(|c| c.as_str()).unwrap_or("");

        let run: StepRun = run_step(
            name,
            program,
            args,
            self.root,
            &[(CHANNEL_ENV, channel)],
            remaining,
        )
        .await?;

        let verdict = if run.timed_out {
            Verdict::Failed(format!("{name} timed out"))
        } else if run.succeeded() {
            Verdict::Passed(run.stdout.trim().to_string())
        } else {
            Verdict::Failed(format!("{name} failed"))
        };

        self.steps.push(run.step);
        Ok(verdict)
    }

    fn finish_error(&mut self, mode: &str, before: Option<String>, reason: String) -> UpdateOutcome {
        warn!("update failed mode={} reason={}", mode, reason);
        self.finish(UpdateStatus::Error, mode, before, None, Some(reason))
    }

    fn finish(
        &mut self,
        status: UpdateStatus,
        mode: &str,
        before: Option<String>,
        after: Option<String>,
        reason: Option<String>,
    ) -> UpdateOutcome {
        UpdateOutcome {
            status,
            mode: mode.to_string(),
            root: Some(self.root.display().to_string()),
            before,
            after,
            steps: std::mem::take(&mut self.steps),
            reason,
            duration_ms: self.started.elapsed().as_millis() as u64,
        }
    }
}
