//! Agent specs on the command line: `kind[:name]`

use std::str::FromStr;

use anyhow::{bail, Result};

use hexpie_tournament::{Agent, OrderedAgent, RandomAgent};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgentKind {
    Random,
    Ordered,
}

/// A parsed `--agent` value
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentSpec {
    pub kind: AgentKind,
    pub name: Option<String>,
}

impl FromStr for AgentSpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (kind, name) = match s.split_once(':') {
            Some((kind, name)) if !name.is_empty() => (kind, Some(name.to_string())),
            Some((kind, _)) => (kind, None),
            None => (s, None),
        };
        let kind = match kind {
            "random" => AgentKind::Random,
            "ordered" => AgentKind::Ordered,
            other => bail!("Unknown agent kind: {} (expected random or ordered)", other),
        };
        Ok(Self { kind, name })
    }
}

impl AgentSpec {
    /// Build the agent. Unnamed agents are called `<kind>-<index>`.
    pub fn build(&self, index: usize, seed: u64) -> Box<dyn Agent> {
        let name = self.name.clone().unwrap_or_else(|| {
            let kind = match self.kind {
                AgentKind::Random => "random",
                AgentKind::Ordered => "ordered",
            };
            format!("{}-{}", kind, index)
        });
        match self.kind {
            AgentKind::Random => Box::new(RandomAgent::new(name, seed)),
            AgentKind::Ordered => Box::new(OrderedAgent::new(name)),
        }
    }
}

/// Build a roster; agent `i` gets seed `base_seed + i`
pub fn build_roster(specs: &[AgentSpec], base_seed: u64) -> Vec<Box<dyn Agent>> {
    specs
        .iter()
        .enumerate()
        .map(|(i, spec)| spec.build(i, base_seed.wrapping_add(i as u64)))
        .collect()
}
