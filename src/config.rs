use anyhow::{Context, Result};

use crate::models::MonthKey;
use crate::store::DEFAULT_LOG_CAPACITY;

pub(crate) const LOG_CAPACITY_ENV: &str = "SPLITBOOK_LOG_CAPACITY";

/// Session settings: defaults, then environment, then command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    /// Month shown (and seeded) at launch.
    pub(crate) start_month: MonthKey,
    /// Messages kept in the activity log.
    pub(crate) log_capacity: usize,
    /// Start the session with the launch month already seeded.
    pub(crate) seed_on_start: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_month: MonthKey::current(),
            log_capacity: DEFAULT_LOG_CAPACITY,
            seed_on_start: true,
        }
    }
}

impl Settings {
    /// Build settings from the process environment and `args` (without the
    /// program name). Returns the settings and the arguments left over once
    /// the settings flags are removed.
    pub(crate) fn load(args: &[String]) -> Result<(Self, Vec<String>)> {
        Self::load_with(args, |name| std::env::var(name).ok())
    }

    pub(crate) fn load_with(
        args: &[String],
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<(Self, Vec<String>)> {
        let mut settings = Self::default();

        if let Some(raw) = env(LOG_CAPACITY_ENV) {
            settings.log_capacity = parse_capacity(&raw)
                .with_context(|| format!("Invalid {LOG_CAPACITY_ENV}: {raw}"))?;
        }

        let mut rest = Vec::new();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--month" | "-m" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--month needs a value (YYYY-MM)"))?;
                    settings.start_month = value.parse()?;
                }
                "--log-capacity" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--log-capacity needs a value"))?;
                    settings.log_capacity = parse_capacity(value)
                        .with_context(|| format!("Invalid --log-capacity: {value}"))?;
                }
                "--empty" => settings.seed_on_start = false,
                _ => rest.push(arg.clone()),
            }
        }

        log::debug!("settings: {settings:?}");
        Ok((settings, rest))
    }
}

fn parse_capacity(raw: &str) -> Result<usize> {
    let n: usize = raw.trim().parse()?;
    if n == 0 {
        anyhow::bail!("capacity must be at least 1");
    }
    Ok(n)
}
