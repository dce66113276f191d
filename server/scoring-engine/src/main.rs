//! Binary entrypoint: read one JSON request from stdin, write one JSON object to stdout.
//!
//! Logs go to stderr; `RUST_LOG` controls verbosity (default `info`).

use std::io::{self, Read, Write};

use scoring_engine::types::ErrorOutput;
use scoring_engine::{request, Engine, EngineSettings, Output, ScoringError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
  tracing_subscriber::registry()
    .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
    .with(tracing_subscriber::fmt::layer().with_writer(io::stderr).without_time())
    .init();

  match run_binary() {
    Ok(out) => {
      if let Err(e) = write_json(&out) {
        tracing::error!(error = %e, "failed to write output");
        std::process::exit(1);
      }
    }
    Err(e) => {
      tracing::warn!(error = %e, "request rejected");
      let mut err = ErrorOutput::new(e.to_string());
      if let Some(field) = e.field() {
        err = err.with_field(field);
      }
      let _ = write_json(&err);
      std::process::exit(1);
    }
  }
}

fn run_binary() -> Result<Output, ScoringError> {
  let settings = EngineSettings::from_env()?;
  let engine = Engine::from_settings(settings)?;

  let mut raw = String::new();
  io::stdin().lock().read_to_string(&mut raw)?;
  let req = request::parse(&raw)?;
  tracing::debug!(
    text_chars = req.text.as_ref().map(|t| t.chars().count()),
    has_dimensions = req.dimensions.is_some(),
    "request parsed"
  );

  let out = engine.handle(&req);
  if let (Some(c), Some(a)) = (&out.classification, &out.assessment) {
    tracing::info!(
      type_id = %c.type_id,
      score = a.normalized_score,
      level = %a.level,
      evidence = a.evidence_count,
      "text scored"
    );
  }
  if let Some(report) = &out.complexity {
    tracing::info!(total = report.weighted_total, level = %report.level, "complexity aggregated");
  }
  Ok(out)
}

fn write_json<T: serde::Serialize>(value: &T) -> Result<(), ScoringError> {
  let json = serde_json::to_vec(value)?;
  let mut stdout = io::stdout().lock();
  stdout.write_all(&json)?;
  stdout.write_all(b"\n")?;
  Ok(())
}
