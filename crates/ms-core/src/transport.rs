//! Transport modes and the precedence order used to pick a trip's main mode.
//!
//! A trip is usually several legs: a short walk to the car park, the drive,
//! a walk from the car park to the door.  The trip's *main mode* is the leg
//! mode with the highest precedence:
//!
//! ```text
//! walk < bike < ride < car < pt
//! ```
//!
//! Mode strings the analysis does not know are kept verbatim as
//! [`TransportMode::Other`].  They rank below every known mode, so they only
//! survive as a main mode when no known leg mode is seen.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::str::FromStr;

/// A leg or trip mode, named as the simulation names it.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum TransportMode {
    /// On foot, including access/egress walks.
    Walk,
    /// Bicycle.
    Bike,
    /// Car passenger.
    Ride,
    /// Car driver.
    Car,
    /// Scheduled public transit (bus, rail, …).
    Pt,
    /// Any mode string not listed above.
    Other(Box<str>),
}

impl TransportMode {
    /// The modes every modal-distance table carries, in column order.
    pub const REPORTED: [TransportMode; 5] = [
        TransportMode::Car,
        TransportMode::Ride,
        TransportMode::Pt,
        TransportMode::Bike,
        TransportMode::Walk,
    ];

    /// Map a simulation mode string onto a mode.  Never fails.
    pub fn parse(s: &str) -> Self {
        match s {
            "walk" => TransportMode::Walk,
            "bike" => TransportMode::Bike,
            "ride" => TransportMode::Ride,
            "car"  => TransportMode::Car,
            "pt"   => TransportMode::Pt,
            other  => TransportMode::Other(other.into()),
        }
    }

    /// The simulation's name for this mode.
    pub fn as_str(&self) -> &str {
        match self {
            TransportMode::Walk     => "walk",
            TransportMode::Bike     => "bike",
            TransportMode::Ride     => "ride",
            TransportMode::Car      => "car",
            TransportMode::Pt       => "pt",
            TransportMode::Other(s) => s,
        }
    }

    /// Rank in the main-mode precedence order; `None` for unknown modes.
    ///
    /// `Option`'s ordering puts `None` below every `Some`, which is exactly
    /// the "unknown never outranks a known mode" rule.
    #[inline]
    pub fn precedence(&self) -> Option<u8> {
        match self {
            TransportMode::Walk     => Some(0),
            TransportMode::Bike     => Some(1),
            TransportMode::Ride     => Some(2),
            TransportMode::Car      => Some(3),
            TransportMode::Pt       => Some(4),
            TransportMode::Other(_) => None,
        }
    }

    #[inline]
    pub fn is_known(&self) -> bool {
        self.precedence().is_some()
    }

    /// Fold one more leg mode into a trip's main mode.
    ///
    /// Returns `candidate` if it strictly outranks `current`, otherwise
    /// `current`.  A trip with no mode yet takes the candidate.
    pub fn resolve(current: Option<TransportMode>, candidate: TransportMode) -> TransportMode {
        match current {
            None => candidate,
            Some(current) if candidate.precedence() > current.precedence() => candidate,
            Some(current) => current,
        }
    }

    /// Position in report layout: the [`REPORTED`](Self::REPORTED) order,
    /// unknown modes last.
    fn report_slot(&self) -> usize {
        match self {
            TransportMode::Car      => 0,
            TransportMode::Ride     => 1,
            TransportMode::Pt       => 2,
            TransportMode::Bike     => 3,
            TransportMode::Walk     => 4,
            TransportMode::Other(_) => 5,
        }
    }
}

/// Orders modes as reports list them (car, ride, pt, bike, walk, then
/// unknown modes by name).  This is *not* the precedence order.
impl Ord for TransportMode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.report_slot()
            .cmp(&other.report_slot())
            .then_with(|| self.as_str().cmp(other.as_str()))
    }
}

impl PartialOrd for TransportMode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for TransportMode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TransportMode::parse(s))
    }
}

impl From<String> for TransportMode {
    fn from(s: String) -> Self {
        TransportMode::parse(&s)
    }
}

impl From<TransportMode> for String {
    fn from(mode: TransportMode) -> Self {
        mode.as_str().to_owned()
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}
