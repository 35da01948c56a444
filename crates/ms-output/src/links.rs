//! `LinkLeaveCounts` — how often vehicles left each counted link.

use std::collections::BTreeMap;

use ms_core::LinkId;

use crate::LinkLeaveRow;

#[derive(Debug, Clone, Copy, PartialEq)]
struct LinkTally {
    leaves:    u64,
    freespeed: Option<f64>,
}

/// Leave counts keyed by link.  Links are kept in id order, which is also
/// the report order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkLeaveCounts {
    links: BTreeMap<LinkId, LinkTally>,
}

impl LinkLeaveCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one vehicle leaving `link`, remembering the link's free speed.
    pub fn record(&mut self, link: &LinkId, freespeed: Option<f64>) {
        match self.links.get_mut(link) {
            Some(tally) => {
                tally.leaves += 1;
                tally.freespeed = freespeed;
            }
            None => {
                self.links.insert(link.clone(), LinkTally { leaves: 1, freespeed });
            }
        }
    }

    /// Leaves counted on `link`; `0` for links never left.
    pub fn leaves(&self, link: &LinkId) -> u64 {
        self.links.get(link).map_or(0, |t| t.leaves)
    }

    /// Leaves over all links.
    pub fn total(&self) -> u64 {
        self.links.values().map(|t| t.leaves).sum()
    }

    /// Links left at least once.
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn rows(&self) -> Vec<LinkLeaveRow> {
        self.links
            .iter()
            .map(|(link, t)| LinkLeaveRow { link: link.clone(), leaves: t.leaves, freespeed: t.freespeed })
            .collect()
    }
}
