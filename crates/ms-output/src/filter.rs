//! The `AgentFilter` trait selecting the subpopulation that is reported.

use ms_core::AgentId;

/// Decides which agents' trips enter the reports.
///
/// Filters are consulted once per agent during aggregation, possibly from
/// several threads when the `parallel` feature is on, hence `Sync`.
///
/// Any `Fn(&AgentId) -> bool + Sync` closure is a filter:
///
/// ```rust
/// use ms_core::AgentId;
/// use ms_output::AgentFilter;
///
/// let residents = |a: &AgentId| a.as_str().starts_with("res_");
/// assert!(residents.accepts(&AgentId::new("res_17")));
/// assert!(!residents.accepts(&AgentId::new("visitor_3")));
/// ```
pub trait AgentFilter: Sync {
    fn accepts(&self, agent: &AgentId) -> bool;
}

impl<F> AgentFilter for F
where
    F: Fn(&AgentId) -> bool + Sync,
{
    #[inline]
    fn accepts(&self, agent: &AgentId) -> bool {
        self(agent)
    }
}

/// Accepts every agent.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl AgentFilter for AcceptAll {
    #[inline]
    fn accepts(&self, _agent: &AgentId) -> bool {
        true
    }
}
