use std::io::Write;
use std::path::Path;
use std::time::{Duration, UNIX_EPOCH};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{info, warn};

use warpgrid_window::{Recorded, TimeWindow, WindowConfig, WindowError};

pub struct ReplayArgs<'a> {
    pub input: &'a str,
    pub config: Option<&'a str>,
    pub duration: Option<&'a str>,
    pub granularity: Option<&'a str>,
    pub format: &'a str,
}

/// What happened to a replayed sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Stored,
    Dropped,
    OutOfOrder,
}

impl Outcome {
    fn as_str(self) -> &'static str {
        match self {
            Outcome::Stored => "stored",
            Outcome::Dropped => "dropped",
            Outcome::OutOfOrder => "out_of_order",
        }
    }
}

/// One replayed sample and the window extremes right after it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayStep {
    pub timestamp: u64,
    pub value: i32,
    pub bucket: i64,
    pub outcome: Outcome,
    pub max: Option<i32>,
    pub min: Option<i32>,
}

pub fn replay(args: &ReplayArgs<'_>) -> Result<()> {
    replay_to(args, &mut std::io::stdout().lock())
}

/// Replay into `out`, one line per sample.
pub fn replay_to(args: &ReplayArgs<'_>, out: &mut impl Write) -> Result<()> {
    let config = resolve_config(args.config.map(Path::new), args.duration, args.granularity)?;
    let mut window = config.build().with_context(|| {
        format!(
            "invalid window config (duration {}, granularity {})",
            config.duration, config.granularity
        )
    })?;

    let content = std::fs::read_to_string(args.input)
        .with_context(|| format!("failed to read {}", args.input))?;
    let samples = parse_samples(&content)?;

    info!(
        samples = samples.len(),
        capacity = window.capacity(),
        "replaying samples"
    );

    for step in run(&mut window, &samples)? {
        match args.format {
            "json" => writeln!(out, "{}", serde_json::to_string(&step)?)?,
            _ => writeln!(out, "{}", format_step(&step))?,
        }
    }

    Ok(())
}

/// Load the config file (if any) and apply flag overrides on top.
pub fn resolve_config(
    path: Option<&Path>,
    duration: Option<&str>,
    granularity: Option<&str>,
) -> Result<WindowConfig> {
    let mut config = match path {
        Some(p) => WindowConfig::from_file(p)?,
        None => WindowConfig::default(),
    };
    if let Some(d) = duration {
        config.duration = d.to_string();
    }
    if let Some(g) = granularity {
        config.granularity = g.to_string();
    }
    Ok(config)
}

/// Parse `<unix_seconds> <value>` lines.
pub fn parse_samples(content: &str) -> Result<Vec<(u64, i32)>> {
    let mut samples = Vec::new();

    for (i, line) in content.lines().enumerate() {
        let line_no = i + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split_whitespace();
        let (Some(ts), Some(value), None) = (fields.next(), fields.next(), fields.next()) else {
            bail!("line {line_no}: expected `<unix_seconds> <value>`, got {line:?}");
        };
        let ts = ts
            .parse::<u64>()
            .with_context(|| format!("line {line_no}: invalid timestamp {ts:?}"))?;
        let value = value
            .parse::<i32>()
            .with_context(|| format!("line {line_no}: invalid value {value:?}"))?;
        samples.push((ts, value));
    }

    Ok(samples)
}

/// Feed samples through the window. Out-of-order samples are skipped.
pub fn run(window: &mut TimeWindow, samples: &[(u64, i32)]) -> Result<Vec<ReplayStep>> {
    let mut steps = Vec::with_capacity(samples.len());

    for &(timestamp, value) in samples {
        let now = UNIX_EPOCH
            .checked_add(Duration::from_secs(timestamp))
            .with_context(|| format!("timestamp {timestamp} out of range"))?;
        let bucket = window.bucket_index(now)?;

        let outcome = match window.record(now, value) {
            Ok(Recorded::Stored) => Outcome::Stored,
            Ok(Recorded::Dropped) => Outcome::Dropped,
            Err(WindowError::OutOfOrder { index, last }) => {
                warn!(timestamp, index, last, "sample out of order, skipped");
                Outcome::OutOfOrder
            }
            Err(e) => return Err(e.into()),
        };

        steps.push(ReplayStep {
            timestamp,
            value,
            bucket,
            outcome,
            max: window.max(),
            min: window.min(),
        });
    }

    Ok(steps)
}

pub fn format_step(step: &ReplayStep) -> String {
    let show = |v: Option<i32>| v.map_or_else(|| "-".to_string(), |v| v.to_string());
    format!(
        "{} bucket={} value={} {} max={} min={}",
        step.timestamp,
        step.bucket,
        step.value,
        step.outcome.as_str(),
        show(step.max),
        show(step.min),
    )
}
