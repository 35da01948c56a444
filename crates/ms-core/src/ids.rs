//! Strongly typed identifier wrappers.
//!
//! Simulation ids are opaque strings (`"1034561"`, `"pt_bus_12"`, …).  Each
//! wrapper holds an `Arc<str>` so cloning an id into a map key is a refcount
//! bump rather than a string copy.  All ids are `Clone + Ord + Hash` so they
//! can be used as map keys and sorted collection elements without ceremony.

use std::fmt;
use std::sync::Arc;

/// Generate a typed id wrapper around a shared string.
macro_rules! string_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(Arc<str>);

        impl $name {
            pub fn new(id: impl AsRef<str>) -> Self {
                Self(Arc::from(id.as_ref()))
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(Arc::from(id))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id! {
    /// Identifier of a simulated person, including transit vehicle drivers.
    pub struct AgentId;
}

string_id! {
    /// Identifier of a directed network link.
    pub struct LinkId;
}
