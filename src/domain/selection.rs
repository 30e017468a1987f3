//! Metric Selection - Which Instruments a Monitor Chain Attaches
//!
//! Replaces a loose string-keyed boolean map with a small enumerated
//! set. The wildcard `all` enables every known metric; a name that is
//! not selected is disabled.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::error::MonitorError;

/// Selection key that enables every known metric.
pub const WILDCARD: &str = "all";

/// A metric the monitor chain knows how to attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetricName {
    /// Request counter labeled by status code and method.
    ApiRequestsTotal,
    /// Latency histogram labeled by method.
    ResponseDurationSeconds,
}

impl MetricName {
    /// Every known metric, in registration order.
    pub const ALL: [Self; 2] = [Self::ApiRequestsTotal, Self::ResponseDurationSeconds];

    /// Registered Prometheus name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApiRequestsTotal => "api_requests_total",
            Self::ResponseDurationSeconds => "response_duration_seconds",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricName {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| MonitorError::UnknownMetric(s.to_string()))
    }
}

/// Set of metrics enabled for a monitor chain.
///
/// Deserializes from a TOML/serde table of flags, e.g.
/// `{ all = true }` or `{ api_requests_total = true }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "HashMap<String, bool>")]
pub struct MetricSelection {
    /// Wildcard flag: every metric is enabled.
    all: bool,
    /// Explicitly enabled metrics.
    names: BTreeSet<MetricName>,
}

impl MetricSelection {
    /// Selection with nothing enabled.
    pub fn none() -> Self {
        Self::default()
    }

    /// Selection with the wildcard set.
    pub fn all() -> Self {
        Self {
            all: true,
            names: BTreeSet::new(),
        }
    }

    /// Adds one metric to the selection.
    #[must_use]
    pub fn with(mut self, name: MetricName) -> Self {
        self.names.insert(name);
        self
    }

    /// Builds a selection from name/flag pairs.
    ///
    /// Pairs flagged `false` are ignored, so an absent key and a `false`
    /// key mean the same thing.
    ///
    /// # Errors
    /// Returns [`MonitorError::UnknownMetric`] for a key that is neither a
    /// known metric name nor the wildcard, even when flagged `false`.
    pub fn from_flags<I, K>(flags: I) -> Result<Self, MonitorError>
    where
        I: IntoIterator<Item = (K, bool)>,
        K: AsRef<str>,
    {
        let mut selection = Self::none();
        for (key, enabled) in flags {
            let key = key.as_ref();
            if key == WILDCARD {
                selection.all |= enabled;
                continue;
            }
            let name = key.parse::<MetricName>()?;
            if enabled {
                selection.names.insert(name);
            }
        }
        Ok(selection)
    }

    /// Whether the given metric is enabled, directly or via the wildcard.
    pub fn enables(&self, name: MetricName) -> bool {
        self.all || self.names.contains(&name)
    }

    /// Whether no metric is enabled.
    pub fn is_empty(&self) -> bool {
        !self.all && self.names.is_empty()
    }

    /// Enabled metrics in registration order.
    pub fn enabled(&self) -> impl Iterator<Item = MetricName> + '_ {
        MetricName::ALL.into_iter().filter(|name| self.enables(*name))
    }
}

impl TryFrom<HashMap<String, bool>> for MetricSelection {
    type Error = MonitorError;

    fn try_from(flags: HashMap<String, bool>) -> Result<Self, Self::Error> {
        Self::from_flags(flags)
    }
}
