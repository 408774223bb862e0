//! Agent status radar.
//!
//! Keeps a live reachability view for a fixed, compiled-in set of well-known
//! agent endpoints, independent of the committed backend endpoint. Each poll
//! cycle issues one request per target concurrently; results come back as a
//! [`crate::api::BackendEvent::RadarCycle`] and are merged here per key.

use std::collections::BTreeMap;
use std::time::Duration;

/// Interval between poll cycles. The first cycle fires immediately on
/// startup; subsequent cycles may overlap with slow predecessors, which is
/// accepted since each key's write is independent.
pub const RADAR_INTERVAL: Duration = Duration::from_secs(15);

/// One well-known agent endpoint watched by the radar.
#[derive(Debug, Clone, Copy)]
pub struct RadarTarget {
    pub key: &'static str,
    pub label: &'static str,
    pub url: &'static str,
}

/// The fixed target set. Not user-configurable.
pub const RADAR_TARGETS: [RadarTarget; 4] = [
    RadarTarget {
        key: "gnosis",
        label: "Gnosis",
        url: "http://localhost:8600",
    },
    RadarTarget {
        key: "architect",
        label: "Architect",
        url: "http://localhost:8601",
    },
    RadarTarget {
        key: "browser",
        label: "Browser",
        url: "http://localhost:8602",
    },
    RadarTarget {
        key: "phantom",
        label: "Phantom",
        url: "http://localhost:8603",
    },
];

/// Visual state of a target, a total function of the stored code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Health {
    /// Never checked (`None` in the map).
    Pending,
    /// 2xx status code.
    Healthy,
    /// Anything else, including the transport-failure sentinel 0.
    Unhealthy,
}

impl Health {
    /// Maps a stored status code to its visual state. Total over all
    /// representable codes plus "never checked".
    pub fn of(code: Option<u16>) -> Self {
        match code {
            None => Health::Pending,
            Some(code) if (200..300).contains(&code) => Health::Healthy,
            Some(_) => Health::Unhealthy,
        }
    }
}

/// Status map keyed by target identifier.
///
/// Every known key is present from construction on; entries are only ever
/// updated in place, never removed.
pub struct StatusRadar {
    statuses: BTreeMap<&'static str, Option<u16>>,
}

impl StatusRadar {
    /// A radar with every target in the "never checked" state.
    pub fn new() -> Self {
        let statuses = RADAR_TARGETS
            .iter()
            .map(|target| (target.key, None))
            .collect();
        Self { statuses }
    }

    pub fn targets(&self) -> &'static [RadarTarget] {
        &RADAR_TARGETS
    }

    pub fn status(&self, key: &str) -> Option<u16> {
        self.statuses.get(key).copied().flatten()
    }

    pub fn health(&self, key: &str) -> Health {
        Health::of(self.statuses.get(key).copied().flatten())
    }

    /// Merges one completed poll cycle. Keys outside the known set are
    /// dropped; entries not in this cycle keep their previous value.
    pub fn apply_cycle(&mut self, cycle: Vec<(&'static str, u16)>) {
        for (key, code) in cycle {
            if let Some(slot) = self.statuses.get_mut(key) {
                *slot = Some(code);
            }
        }
    }
}

impl Default for StatusRadar {
    fn default() -> Self {
        Self::new()
    }
}
