//! Tracing setup shared by the service binary.
//!
//! The assistant never logs note text; events carry lengths, counts and
//! event types only. This module only decides how those events are rendered.

use std::io::{self, IsTerminal};
use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Workspace crate targets that get the per-crate level directive.
pub const WORKSPACE_TARGETS: &[&str] = &[
    "clinical_doc_assistant",
    "ai_llm_service",
    "api",
    "clinical_text",
    "note_pipeline",
    "rag_base",
    "summarizer",
];

/// RFC3339 UTC timer implemented via `chrono`.
/// Example output: `2025-09-12T10:20:30Z`
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let s = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        w.write_str(&s)
    }
}

/// Compact single-line formatting layer.
///
/// - RFC3339 UTC timestamps
/// - level and target (module path)
/// - ANSI colors only when stdout is a terminal
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .compact()
        .with_timer(ChronoRfc3339Utc)
        .with_level(true)
        .with_target(true)
        .with_ansi(io::stdout().is_terminal())
}

/// Level directives for every workspace crate, e.g. `note_pipeline=debug`.
pub fn workspace_directives(level: Level) -> Vec<Directive> {
    let level = level.as_str().to_lowercase();
    WORKSPACE_TARGETS
        .iter()
        .filter_map(|target| Directive::from_str(&format!("{target}={level}")).ok())
        .collect()
}

/// `RUST_LOG` if set, otherwise `default` globally plus `level` for the workspace crates.
pub fn env_filter_with_level(default: &str, level: Level) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    workspace_directives(level)
        .into_iter()
        .fold(EnvFilter::new(default), |f, d| f.add_directive(d))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_directive_per_workspace_crate() {
        let d = workspace_directives(Level::DEBUG);
        assert_eq!(d.len(), WORKSPACE_TARGETS.len());
        assert_eq!(d[1].to_string(), "ai_llm_service=debug");
    }
}
