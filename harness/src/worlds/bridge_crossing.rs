//! `BridgeCrossing`: get everyone over a footbridge at night.
//!
//! At most two people cross at once and every crossing needs the single
//! flashlight. A pair walks at the slower person's pace; the cost of a
//! crossing is the minutes it takes.
//!
//! The state does not generate its own successors. Three standalone
//! generators emit the same operations in different orders, which changes
//! how many nodes an uninformed search creates but never which states are
//! reachable.

use std::fmt;

use serde::{Deserialize, Serialize};
use statespace_kernel::generator::{Generator, GeneratorKind};
use statespace_kernel::operators::operator::{Action, Cost, Operator};
use statespace_kernel::operators::operator_registry::{OperatorRegistry, RegistryError};
use statespace_search::Problem;

use crate::contract::{World, WorldError};
use crate::worlds::Bank;

/// One or two walkers, by index into [`Bridge::times`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Party {
    pub lead: usize,
    pub partner: Option<usize>,
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.partner {
            Some(partner) => write!(f, "#{}, #{partner}", self.lead),
            None => write!(f, "#{}", self.lead),
        }
    }
}

/// Who is on which side, and where the flashlight is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bridge {
    times: Vec<Cost>,
    sides: Vec<Bank>,
    flashlight: Bank,
}

impl Bridge {
    /// Everyone on the near side. Walkers are indexed fastest first.
    #[must_use]
    pub fn start(times: &[Cost]) -> Self {
        let mut times = times.to_vec();
        times.sort_unstable();
        Self {
            sides: vec![Bank::Near; times.len()],
            times,
            flashlight: Bank::Near,
        }
    }

    /// Crossing time of every walker, ascending.
    #[must_use]
    pub fn times(&self) -> &[Cost] {
        &self.times
    }

    #[must_use]
    pub fn flashlight(&self) -> Bank {
        self.flashlight
    }

    /// Whether every walker has crossed.
    #[must_use]
    pub fn all_across(&self) -> bool {
        self.sides.iter().all(|&side| side == Bank::Far)
    }

    /// Indices of walkers standing with the flashlight, fastest first.
    fn with_flashlight(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.sides.len()).filter(move |&i| self.sides[i] == self.flashlight)
    }

    fn can_walk(&self, i: usize) -> bool {
        self.sides.get(i) == Some(&self.flashlight)
    }

    fn walk(&mut self, party: Party) {
        let to = self.flashlight.flip();
        self.sides[party.lead] = to;
        if let Some(partner) = party.partner {
            self.sides[partner] = to;
        }
        self.flashlight = to;
    }

    /// Minutes `party` needs to cross.
    fn pace(&self, party: Party) -> Cost {
        let lead = self.times[party.lead];
        party
            .partner
            .map_or(lead, |partner| lead.max(self.times[partner]))
    }
}

impl fmt::Display for Bridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, side) in [Bank::Near, Bank::Far].into_iter().enumerate() {
            if n > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{side}:")?;
            for (time, _) in self.times.iter().zip(&self.sides).filter(|(_, &s)| s == side) {
                write!(f, " {time}")?;
            }
            if self.flashlight == side {
                f.write_str(" *")?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

fn solo_fits(state: &Bridge, party: &Party) -> bool {
    party.partner.is_none() && state.can_walk(party.lead)
}

fn pair_fits(state: &Bridge, party: &Party) -> bool {
    matches!(party.partner, Some(partner) if partner != party.lead && state.can_walk(partner))
        && state.can_walk(party.lead)
}

fn walk(state: &mut Bridge, party: &Party) {
    state.walk(*party);
}

/// One walker crosses with the flashlight.
pub const CROSS: Operator<Bridge, Party> = Operator::new("cross", solo_fits, walk);
/// Two walkers cross together with the flashlight.
pub const ESCORT: Operator<Bridge, Party> = Operator::new("escort", pair_fits, walk);

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Order in which solo and paired crossings are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossingOrder {
    /// Solo crossings before pairs, in both directions.
    SoloFirst,
    /// Pairs before solo crossings, in both directions.
    PairsFirst,
    /// Pairs first going over, solo first coming back.
    Adaptive,
}

impl CrossingOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SoloFirst => "solo_first",
            Self::PairsFirst => "pairs_first",
            Self::Adaptive => "adaptive",
        }
    }
}

/// Standalone generator for [`Bridge`] states.
#[derive(Debug, Clone)]
pub struct BridgeGenerator {
    order: CrossingOrder,
    registry: OperatorRegistry<Bridge, Party>,
}

impl BridgeGenerator {
    pub const SCHEMA_VERSION: &'static str = "bridge_crossing.v1";

    /// # Errors
    ///
    /// Returns [`RegistryError`] if the operator table is malformed.
    pub fn new(order: CrossingOrder) -> Result<Self, RegistryError> {
        Ok(Self {
            order,
            registry: OperatorRegistry::new(Self::SCHEMA_VERSION, [CROSS, ESCORT])?,
        })
    }

    #[must_use]
    pub fn order(&self) -> CrossingOrder {
        self.order
    }
}

impl Generator for BridgeGenerator {
    type State = Bridge;
    type Args = Party;

    /// Walking back and forth revisits states.
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Inconsistent
    }

    fn registry(&self) -> &OperatorRegistry<Bridge, Party> {
        &self.registry
    }

    fn operations(&self, state: &Bridge) -> impl Iterator<Item = Action<Bridge, Party>> {
        let here: Vec<usize> = state.with_flashlight().collect();
        let costed = |op: Operator<Bridge, Party>, party: Party| {
            op.action(party).with_cost(state.pace(party))
        };

        let solos: Vec<_> = here
            .iter()
            .map(|&lead| {
                costed(
                    CROSS,
                    Party {
                        lead,
                        partner: None,
                    },
                )
            })
            .collect();
        let pairs: Vec<_> = here
            .iter()
            .enumerate()
            .flat_map(|(k, &lead)| {
                here[k + 1..].iter().map(move |&partner| Party {
                    lead,
                    partner: Some(partner),
                })
            })
            .map(|party| costed(ESCORT, party))
            .collect();

        let solo_first = match self.order {
            CrossingOrder::SoloFirst => true,
            CrossingOrder::PairsFirst => false,
            CrossingOrder::Adaptive => state.flashlight == Bank::Far,
        };
        let (first, second) = if solo_first {
            (solos, pairs)
        } else {
            (pairs, solos)
        };
        first.into_iter().chain(second)
    }

    fn name(&self) -> &str {
        match self.order {
            CrossingOrder::SoloFirst => "bridge_crossing::solo_first",
            CrossingOrder::PairsFirst => "bridge_crossing::pairs_first",
            CrossingOrder::Adaptive => "bridge_crossing::adaptive",
        }
    }
}

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

/// Crossing times and the generator ordering to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeCrossing {
    times: Vec<Cost>,
    order: CrossingOrder,
}

impl BridgeCrossing {
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidInstance`] for an empty party or a
    /// zero crossing time.
    pub fn new(times: Vec<Cost>, order: CrossingOrder) -> Result<Self, WorldError> {
        if times.is_empty() || times.contains(&0) {
            return Err(WorldError::InvalidInstance {
                world: "bridge_crossing",
                detail: format!("crossing times must be positive: {times:?}"),
            });
        }
        Ok(Self { times, order })
    }

    /// Four walkers taking 1, 2, 5 and 10 minutes. Best total: 17.
    #[must_use]
    pub fn classic(order: CrossingOrder) -> Self {
        Self {
            times: vec![1, 2, 5, 10],
            order,
        }
    }
}

impl World for BridgeCrossing {
    type Generator = BridgeGenerator;

    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "bridge_crossing"
    }

    fn generator(&self) -> Result<BridgeGenerator, WorldError> {
        Ok(BridgeGenerator::new(self.order)?)
    }

    fn problem(&self) -> Problem<Bridge> {
        Problem::new(Bridge::start(&self.times), Bridge::all_across)
    }

    /// The slowest walker still on the near side must cross at least once.
    fn estimate(&self, state: &Bridge) -> Cost {
        state
            .times
            .iter()
            .zip(&state.sides)
            .filter(|(_, &side)| side == Bank::Near)
            .map(|(&time, _)| time)
            .max()
            .unwrap_or(0)
    }
}
