//! `RiverCrossing`: the farmer, wolf, goat and cabbage puzzle.
//!
//! The boat holds the farmer and at most one passenger. Left without the
//! farmer, the wolf eats the goat and the goat eats the cabbage.
//!
//! The state generates its own successors ([`SelfGenerating`]). Operations
//! are emitted without regard to safety; unsafe banks are pruned by the
//! validity filter. Crossing back and forth revisits states, so the
//! generator is inconsistent.

use std::fmt;

use statespace_kernel::generator::{GeneratorKind, Intrinsic, SelfGenerating};
use statespace_kernel::operators::operator::{always, Action, Operator};
use statespace_search::Problem;

use crate::contract::{World, WorldError};
use crate::worlds::Bank;

/// Who rides with the farmer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cargo {
    Nothing,
    Wolf,
    Goat,
    Cabbage,
}

impl Cargo {
    const PASSENGERS: [Self; 3] = [Self::Wolf, Self::Cabbage, Self::Goat];
}

/// Renders empty for [`Cargo::Nothing`] so a solo crossing prints as `cross`.
impl fmt::Display for Cargo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Nothing => "",
            Self::Wolf => "wolf",
            Self::Goat => "goat",
            Self::Cabbage => "cabbage",
        })
    }
}

/// Positions of the four actors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RiverBank {
    pub farmer: Bank,
    pub wolf: Bank,
    pub goat: Bank,
    pub cabbage: Bank,
}

impl RiverBank {
    /// Everyone on the near bank.
    #[must_use]
    pub const fn start() -> Self {
        Self {
            farmer: Bank::Near,
            wolf: Bank::Near,
            goat: Bank::Near,
            cabbage: Bank::Near,
        }
    }

    /// Whether everyone has crossed.
    #[must_use]
    pub fn all_across(&self) -> bool {
        self.actors().iter().all(|&(_, bank)| bank == Bank::Far)
    }

    fn actors(&self) -> [(&'static str, Bank); 4] {
        [
            ("farmer", self.farmer),
            ("wolf", self.wolf),
            ("goat", self.goat),
            ("cabbage", self.cabbage),
        ]
    }

    fn position(&self, cargo: Cargo) -> Option<Bank> {
        match cargo {
            Cargo::Nothing => None,
            Cargo::Wolf => Some(self.wolf),
            Cargo::Goat => Some(self.goat),
            Cargo::Cabbage => Some(self.cabbage),
        }
    }

    fn position_mut(&mut self, cargo: Cargo) -> Option<&mut Bank> {
        match cargo {
            Cargo::Nothing => None,
            Cargo::Wolf => Some(&mut self.wolf),
            Cargo::Goat => Some(&mut self.goat),
            Cargo::Cabbage => Some(&mut self.cabbage),
        }
    }
}

impl fmt::Display for RiverBank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, side) in [Bank::Near, Bank::Far].into_iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            let names: Vec<&str> = self
                .actors()
                .iter()
                .filter(|&&(_, bank)| bank == side)
                .map(|&(name, _)| name)
                .collect();
            write!(f, "{side}: {}", names.join(", "))?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

fn cross(state: &mut RiverBank, _: &Cargo) {
    state.farmer = state.farmer.flip();
}

fn carry_fits(state: &RiverBank, cargo: &Cargo) -> bool {
    state.position(*cargo) == Some(state.farmer)
}

fn carry(state: &mut RiverBank, cargo: &Cargo) {
    let to = state.farmer.flip();
    state.farmer = to;
    if let Some(bank) = state.position_mut(*cargo) {
        *bank = to;
    }
}

/// The farmer rows across alone.
pub const CROSS: Operator<RiverBank, Cargo> = Operator::new("cross", always, cross);
/// The farmer rows across with a passenger from his bank.
pub const CARRY: Operator<RiverBank, Cargo> = Operator::new("carry", carry_fits, carry);

impl SelfGenerating for RiverBank {
    type Args = Cargo;
    const KIND: GeneratorKind = GeneratorKind::Inconsistent;

    fn operators() -> Vec<Operator<Self, Cargo>> {
        vec![CROSS, CARRY]
    }

    fn operations(&self) -> impl Iterator<Item = Action<Self, Cargo>> {
        let state = *self;
        std::iter::once(CROSS.action(Cargo::Nothing)).chain(
            Cargo::PASSENGERS
                .into_iter()
                .filter(move |&cargo| carry_fits(&state, &cargo))
                .map(|cargo| CARRY.action(cargo)),
        )
    }

    /// Nobody gets eaten.
    fn is_valid(&self) -> bool {
        let wolf_eats_goat = self.wolf == self.goat && self.goat != self.farmer;
        let goat_eats_cabbage = self.goat == self.cabbage && self.goat != self.farmer;
        !(wolf_eats_goat || goat_eats_cabbage)
    }
}

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

/// The classic four-actor instance.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiverCrossing;

impl World for RiverCrossing {
    type Generator = Intrinsic<RiverBank>;

    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "river_crossing"
    }

    fn generator(&self) -> Result<Intrinsic<RiverBank>, WorldError> {
        Ok(Intrinsic::new()?)
    }

    fn problem(&self) -> Problem<RiverBank> {
        Problem::new(RiverBank::start(), RiverBank::all_across)
    }

    /// Every passenger still on the near bank needs its own trip across.
    fn estimate(&self, state: &RiverBank) -> u64 {
        let waiting = Cargo::PASSENGERS
            .into_iter()
            .filter(|&cargo| state.position(cargo) == Some(Bank::Near))
            .count();
        u64::try_from(waiting).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statespace_kernel::generator::Generator;

    #[test]
    fn start_offers_solo_crossing_and_every_passenger() {
        let actions: Vec<String> = RiverBank::start()
            .operations()
            .map(|a| a.to_string())
            .collect();
        assert_eq!(actions, ["cross", "carry(wolf)", "carry(cabbage)", "carry(goat)"]);
    }

    #[test]
    fn carry_moves_farmer_and_passenger() {
        let next = CARRY.action(Cargo::Goat).apply(&RiverBank::start()).unwrap();
        assert_eq!(next.farmer, Bank::Far);
        assert_eq!(next.goat, Bank::Far);
        assert_eq!(next.wolf, Bank::Near);
        assert!(next.is_valid());
    }

    #[test]
    fn carrying_from_the_wrong_bank_is_rejected() {
        let far = CROSS.action(Cargo::Nothing).apply(&RiverBank::start()).unwrap();
        assert!(CARRY.action(Cargo::Wolf).apply(&far).is_err());
    }

    #[test]
    fn unattended_goat_with_wolf_is_invalid() {
        let next = CARRY.action(Cargo::Cabbage).apply(&RiverBank::start()).unwrap();
        assert!(!next.is_valid());
    }

    #[test]
    fn display_lists_each_bank() {
        let next = CARRY.action(Cargo::Goat).apply(&RiverBank::start()).unwrap();
        assert_eq!(next.to_string(), "near: wolf, cabbage | far: farmer, goat");
    }

    #[test]
    fn world_generator_is_inconsistent() {
        let generator = RiverCrossing.generator().unwrap();
        assert_eq!(generator.kind(), GeneratorKind::Inconsistent);
        assert_eq!(generator.registry().len(), 2);
        assert_eq!(RiverCrossing.estimate(&RiverBank::start()), 3);
    }
}
