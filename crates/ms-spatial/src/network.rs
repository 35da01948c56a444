//! Network link lookup.
//!
//! The analysis never routes.  Trip reconstruction needs a representative
//! coordinate for a link when an activity event carries a link id but no
//! coordinate; as in the simulation itself, that coordinate is the midpoint
//! of the link.  Link-leave counting additionally needs each link's free
//! speed and the modes allowed on it.
//!
//! # CSV format
//!
//! ```csv
//! link_id,from_x,from_y,to_x,to_y,freespeed,modes
//! 1001,363000.0,5690000.0,363250.0,5690000.0,13.89,"car,ride"
//! pt_17,363000.0,5690000.0,363100.0,5690100.0,22.22,pt
//! ```
//!
//! `freespeed` (m/s) and `modes` (comma-separated) are optional columns;
//! files with only the five geometry columns load with no free speed and no
//! mode restriction.

use std::collections::{BTreeSet, HashMap};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use ms_core::{Coord, LinkId, TransportMode};

use crate::{SpatialError, SpatialResult};

// ── NetworkLookup ─────────────────────────────────────────────────────────────

/// `LinkId → Coord` resolution used by trip reconstruction.
pub trait NetworkLookup {
    /// Representative coordinate of `link`, or `None` if the link is unknown.
    fn link_coord(&self, link: &LinkId) -> Option<Coord>;
}

impl<T: NetworkLookup + ?Sized> NetworkLookup for &T {
    fn link_coord(&self, link: &LinkId) -> Option<Coord> {
        (**self).link_coord(link)
    }
}

impl<T: NetworkLookup + ?Sized> NetworkLookup for Arc<T> {
    fn link_coord(&self, link: &LinkId) -> Option<Coord> {
        (**self).link_coord(link)
    }
}

// ── Network ───────────────────────────────────────────────────────────────────

/// A directed link between two node positions.
#[derive(Clone, Debug, PartialEq)]
pub struct Link {
    pub from:      Coord,
    pub to:        Coord,
    /// Free-flow speed in m/s, when the network file has one.
    pub freespeed: Option<f64>,
    /// Modes allowed on the link.  Empty when the network file does not say.
    pub modes:     BTreeSet<TransportMode>,
}

impl Link {
    /// A link with geometry only.
    pub fn new(from: Coord, to: Coord) -> Self {
        Self { from, to, freespeed: None, modes: BTreeSet::new() }
    }

    pub fn with_freespeed(mut self, freespeed: f64) -> Self {
        self.freespeed = Some(freespeed);
        self
    }

    pub fn with_modes<I>(mut self, modes: I) -> Self
    where
        I: IntoIterator<Item = TransportMode>,
    {
        self.modes.extend(modes);
        self
    }

    /// The link's representative coordinate (its midpoint).
    #[inline]
    pub fn coord(&self) -> Coord {
        self.from.midpoint(self.to)
    }

    /// `true` when public transit is the only mode allowed.
    pub fn is_pt_only(&self) -> bool {
        self.modes.len() == 1 && self.modes.contains(&TransportMode::Pt)
    }
}

/// Link geometry keyed by id.  Do not construct directly; use
/// [`NetworkBuilder`] or [`load_network_csv`].
pub struct Network {
    links: HashMap<LinkId, Link>,
}

impl Network {
    pub fn empty() -> Self {
        NetworkBuilder::new().build()
    }

    pub fn link(&self, id: &LinkId) -> Option<&Link> {
        self.links.get(id)
    }

    /// Every link with its id, in unspecified order.
    pub fn links(&self) -> impl Iterator<Item = (&LinkId, &Link)> {
        self.links.iter()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl NetworkLookup for Network {
    fn link_coord(&self, link: &LinkId) -> Option<Coord> {
        self.links.get(link).map(Link::coord)
    }
}

// ── NetworkBuilder ────────────────────────────────────────────────────────────

/// Construct a [`Network`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use ms_core::{Coord, LinkId, TransportMode};
/// use ms_spatial::{Link, NetworkBuilder, NetworkLookup};
///
/// let mut b = NetworkBuilder::new();
/// b.add_link(LinkId::new("1"), Coord::new(0.0, 0.0), Coord::new(100.0, 0.0)).unwrap();
/// b.insert_link(LinkId::new("2"), Link::new(Coord::new(0.0, 0.0), Coord::new(0.0, 80.0)).with_freespeed(8.33))
///     .unwrap();
/// let net = b.build();
/// assert_eq!(net.link_coord(&LinkId::new("1")), Some(Coord::new(50.0, 0.0)));
/// assert_eq!(net.link(&LinkId::new("2")).and_then(|l| l.freespeed), Some(8.33));
/// ```
pub struct NetworkBuilder {
    links: HashMap<LinkId, Link>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self { links: HashMap::new() }
    }

    pub fn with_capacity(links: usize) -> Self {
        Self { links: HashMap::with_capacity(links) }
    }

    /// Add a geometry-only link.  Ids must be unique.
    pub fn add_link(&mut self, id: LinkId, from: Coord, to: Coord) -> SpatialResult<()> {
        self.insert_link(id, Link::new(from, to))
    }

    /// Add a fully described link.  Ids must be unique.
    pub fn insert_link(&mut self, id: LinkId, link: Link) -> SpatialResult<()> {
        if self.links.contains_key(&id) {
            return Err(SpatialError::DuplicateLink(id));
        }
        self.links.insert(id, link);
        Ok(())
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn build(self) -> Network {
        Network { links: self.links }
    }
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ── CSV loading ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct LinkRecord {
    link_id:   String,
    from_x:    f64,
    from_y:    f64,
    to_x:      f64,
    to_y:      f64,
    #[serde(default)]
    freespeed: Option<f64>,
    #[serde(default)]
    modes:     Option<String>,
}

impl LinkRecord {
    fn into_link(self) -> (LinkId, Link) {
        let modes = self
            .modes
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(TransportMode::parse);
        let link = Link {
            from:      Coord::new(self.from_x, self.from_y),
            to:        Coord::new(self.to_x, self.to_y),
            freespeed: self.freespeed,
            modes:     modes.collect(),
        };
        (LinkId::from(self.link_id), link)
    }
}

/// Load a [`Network`] from a links CSV file.
pub fn load_network_csv(path: &Path) -> SpatialResult<Network> {
    let file = std::fs::File::open(path)?;
    let network = load_network_reader(file)?;
    log::info!("loaded {} links from {}", network.link_count(), path.display());
    Ok(network)
}

/// Like [`load_network_csv`] but accepts any `Read` source.
pub fn load_network_reader<R: Read>(reader: R) -> SpatialResult<Network> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut builder = NetworkBuilder::new();
    for result in csv_reader.deserialize::<LinkRecord>() {
        let (id, link) = result?.into_link();
        builder.insert_link(id, link)?;
    }
    Ok(builder.build())
}
