//! Temporal snapshot synchronizer: advances all per-browser version
//! timelines in lock-step through calendar time, emitting one "world
//! snapshot" per date at which any browser's active version changes.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use confluence_core::keys::BrowserKey;

use crate::sequencer::VersionChain;

/// All releases of one browser name, merged across its OS chains and
/// ordered by release date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    pub browser_name: String,
    pub releases: Vec<(BrowserKey, DateTime<Utc>)>,
}

/// A synchronized cross-browser point in calendar time: the latest version
/// of every tracked browser released at or before `date`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub date: DateTime<Utc>,
    /// One active build per tracked browser, ordered by browser name.
    pub active: Vec<BrowserKey>,
}

/// Merge the sequencer's per-(browser, OS) chains into per-browser-name
/// timelines, ordered by release date (key as tie-break).
pub fn timelines_from_chains(chains: &[VersionChain]) -> Vec<Timeline> {
    let mut merged: BTreeMap<&str, Vec<(BrowserKey, DateTime<Utc>)>> = BTreeMap::new();
    for chain in chains {
        let releases = merged.entry(chain.browser_name.as_str()).or_default();
        for record in &chain.records {
            releases.push((record.browser_key.clone(), record.release_date));
        }
    }
    merged
        .into_iter()
        .map(|(browser_name, mut releases)| {
            releases.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
            Timeline {
                browser_name: browser_name.to_string(),
                releases,
            }
        })
        .collect()
}

/// Run the synchronization algorithm.
///
/// The first snapshot date is the maximum of all browsers' earliest release
/// dates; it is well-defined only if every tracked browser has at least one
/// version, so an empty timeline set (or any empty timeline) yields no
/// snapshots. At each date `T`, every cursor advances while the next
/// version's release date is ≤ T; the next `T` is the minimum release date
/// strictly after each browser's cursor. Output dates are strictly
/// increasing and cursors never move backwards. Fully deterministic: no
/// wall-clock dependency.
pub fn synchronize(timelines: &[Timeline]) -> Vec<Snapshot> {
    if timelines.is_empty() || timelines.iter().any(|t| t.releases.is_empty()) {
        return Vec::new();
    }

    let mut cursors = vec![0usize; timelines.len()];
    // Every browser must have shipped something before the first snapshot.
    let mut date = timelines
        .iter()
        .map(|t| t.releases[0].1)
        .max()
        .unwrap_or_default();

    let mut snapshots = Vec::new();
    loop {
        for (cursor, timeline) in cursors.iter_mut().zip(timelines) {
            while timeline
                .releases
                .get(*cursor + 1)
                .is_some_and(|(_, released)| *released <= date)
            {
                *cursor += 1;
            }
        }
        snapshots.push(Snapshot {
            date,
            active: cursors
                .iter()
                .zip(timelines)
                .map(|(cursor, timeline)| timeline.releases[*cursor].0.clone())
                .collect(),
        });

        // Next future release across all timelines, if any.
        let next = cursors
            .iter()
            .zip(timelines)
            .filter_map(|(cursor, timeline)| timeline.releases.get(*cursor + 1))
            .map(|(_, released)| *released)
            .min();
        match next {
            Some(next_date) => date = next_date,
            None => break,
        }
    }
    debug!(snapshots = snapshots.len(), "synchronized timelines");
    snapshots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(date: &str) -> DateTime<Utc> {
        format!("{date}T00:00:00Z").parse().unwrap()
    }

    fn timeline(browser: &str, releases: &[(&str, &str)]) -> Timeline {
        Timeline {
            browser_name: browser.to_string(),
            releases: releases
                .iter()
                .map(|(version, date)| {
                    (
                        BrowserKey::new(browser, version, "Windows", "10.0"),
                        ts(date),
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn first_snapshot_waits_for_every_browser() {
        let timelines = vec![
            timeline("Alpha", &[("1", "2016-01-01"), ("2", "2016-06-01")]),
            timeline("Beta", &[("1", "2016-03-01")]),
        ];
        let snapshots = synchronize(&timelines);
        // Alpha shipped first, but the world starts when Beta arrives.
        assert_eq!(snapshots[0].date, ts("2016-03-01"));
        assert_eq!(snapshots[0].active[0].browser_version(), "1");
        assert_eq!(snapshots[0].active[1].browser_version(), "1");
    }

    #[test]
    fn emits_one_snapshot_per_release_event() {
        let timelines = vec![
            timeline("Alpha", &[("1", "2016-01-01"), ("2", "2016-06-01")]),
            timeline("Beta", &[("1", "2016-03-01"), ("2", "2016-09-01")]),
        ];
        let snapshots = synchronize(&timelines);
        let dates: Vec<DateTime<Utc>> = snapshots.iter().map(|s| s.date).collect();
        assert_eq!(
            dates,
            vec![ts("2016-03-01"), ts("2016-06-01"), ts("2016-09-01")]
        );
        // At the last snapshot both cursors sit on version 2.
        let last = snapshots.last().unwrap();
        assert!(last.active.iter().all(|k| k.browser_version() == "2"));
    }

    #[test]
    fn snapshot_dates_strictly_increase_and_cursors_never_regress() {
        let timelines = vec![
            timeline(
                "Alpha",
                &[("1", "2016-01-01"), ("2", "2016-02-01"), ("3", "2016-08-01")],
            ),
            timeline("Beta", &[("1", "2016-02-01"), ("2", "2016-05-01")]),
            timeline("Gamma", &[("1", "2016-01-15")]),
        ];
        let snapshots = synchronize(&timelines);
        for pair in snapshots.windows(2) {
            assert!(pair[0].date < pair[1].date);
            for (before, after) in pair[0].active.iter().zip(&pair[1].active) {
                assert!(before <= after);
            }
        }
    }

    #[test]
    fn simultaneous_releases_collapse_into_one_snapshot() {
        let timelines = vec![
            timeline("Alpha", &[("1", "2016-01-01"), ("2", "2016-06-01")]),
            timeline("Beta", &[("1", "2016-01-01"), ("2", "2016-06-01")]),
        ];
        let snapshots = synchronize(&timelines);
        assert_eq!(snapshots.len(), 2);
        assert!(snapshots[1].active.iter().all(|k| k.browser_version() == "2"));
    }

    #[test]
    fn empty_input_yields_no_snapshots() {
        assert!(synchronize(&[]).is_empty());
        let with_empty = vec![
            timeline("Alpha", &[("1", "2016-01-01")]),
            Timeline {
                browser_name: "Beta".to_string(),
                releases: vec![],
            },
        ];
        assert!(synchronize(&with_empty).is_empty());
    }

    #[test]
    fn merges_os_chains_per_browser_name() {
        use confluence_core::models::VersionRecord;
        let chains = vec![
            VersionChain {
                browser_name: "Safari".to_string(),
                os_name: "OSX".to_string(),
                records: vec![VersionRecord {
                    browser_key: BrowserKey::new("Safari", "10.0", "OSX", "10.12"),
                    prev_browser_key: None,
                    release_date: ts("2016-09-20"),
                }],
            },
            VersionChain {
                browser_name: "Safari".to_string(),
                os_name: "iOS".to_string(),
                records: vec![VersionRecord {
                    browser_key: BrowserKey::new("Safari", "10.0", "iOS", "10.0"),
                    prev_browser_key: None,
                    release_date: ts("2016-09-13"),
                }],
            },
        ];
        let timelines = timelines_from_chains(&chains);
        assert_eq!(timelines.len(), 1);
        assert_eq!(timelines[0].releases.len(), 2);
        // Ordered by release date, not by chain order.
        assert_eq!(timelines[0].releases[0].0.os_name(), "iOS");
    }
}
