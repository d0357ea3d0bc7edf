//! Candidate inputs: built-in samples and file loading.

use std::path::Path;

use anyhow::{Context, Result};

/// Sample career narrative used when no `--raw-file` is given.
pub const RAW_SAMPLE: &str = "
was responsible for managing product releases and coordinating with engineering and design teams. helped improve customer onboarding flow. worked on task automation and maintained product docs. occasionally tracked metrics and produced reports.
";

/// Sample job description used when no `--jd-file` is given.
pub const JD_SAMPLE: &str = "
We are hiring a Product Manager to drive product strategy and execution for our SaaS analytics product. Responsibilities include: roadmap prioritization, stakeholder management, defining KPIs and dashboards, running A/B experiments, working closely with engineering in agile delivery, and improving user onboarding and activation metrics. Required skills: product strategy, SQL, A/B testing, analytics, stakeholder communication, roadmap planning, OKRs, experimentation.
";

pub const DEFAULT_CANDIDATE_NAME: &str = "Alex Morgan";

/// Reads `path` as UTF-8, or returns `default` when no path is given.
pub fn read_file_or_default(path: Option<&Path>, default: &str) -> Result<String> {
    match path {
        None => Ok(default.to_string()),
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
    }
}
