// This file is part of openbracket.
//
// openbracket is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// openbracket is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::mem;

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    Id,
    bracket::Elimination,
    competitor::Competitor,
    match_record::{Match, MatchOutcome},
    pairing::Randomness,
    resolver,
    roster::{Roster, RosterError},
    scheduler::{self, ActiveMatch, AdvanceOutcome},
};

/// Everything an event needs to decide what happens next.
///
/// Transitions take the tournament by value and hand back the new one, so a
/// half-applied update is never observable.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Tournament {
    pub roster: Roster,
    pub elimination: Elimination,
    /// 0 until the first match is paired.
    pub current_round: u32,
    pub current_match_number: u32,
    pub round_bye_assigned: bool,
    pub active_match: Option<ActiveMatch>,
}

impl Tournament {
    #[must_use]
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            ..Self::default()
        }
    }

    /// Puts every competitor back in the winners bracket and zeroes the
    /// counters.
    #[must_use]
    pub fn begin_event(mut self, elimination: Elimination) -> Self {
        for competitor in &mut self.roster.competitors {
            competitor.reset_bracket();
        }

        info!(
            "begin_event {} competitors, elimination {elimination}",
            self.roster.len()
        );

        Self {
            roster: self.roster,
            elimination,
            ..Self::default()
        }
    }

    /// Clears all results and the match history, keeping the competitors.
    #[must_use]
    pub fn reset_for_next_event(mut self) -> Self {
        for competitor in &mut self.roster.competitors {
            competitor.reset_record();
        }
        self.roster.matches.clear();

        info!("reset_for_next_event");

        Self {
            roster: self.roster,
            elimination: self.elimination,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn advance<R: Randomness + ?Sized>(self, rng: &mut R) -> (Self, AdvanceOutcome) {
        scheduler::advance(self, rng)
    }

    #[must_use]
    pub fn complete_match(self, outcome: &MatchOutcome) -> (Self, Option<Match>) {
        resolver::complete_match(self, outcome)
    }
}

/// Owns a [`Tournament`] and the randomness that drives it across calls.
#[derive(Clone, Debug, Default)]
pub struct EventSession<R> {
    tournament: Tournament,
    rng: R,
}

impl<R: Randomness> EventSession<R> {
    #[must_use]
    pub fn new(tournament: Tournament, rng: R) -> Self {
        Self { tournament, rng }
    }

    #[must_use]
    pub fn tournament(&self) -> &Tournament {
        &self.tournament
    }

    #[must_use]
    pub fn into_tournament(self) -> Tournament {
        self.tournament
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.tournament.roster
    }

    fn transition<T>(&mut self, f: impl FnOnce(Tournament, &mut R) -> (Tournament, T)) -> T {
        let (tournament, value) = f(mem::take(&mut self.tournament), &mut self.rng);
        self.tournament = tournament;
        value
    }

    pub fn advance(&mut self) -> AdvanceOutcome {
        self.transition(|tournament, rng| tournament.advance(rng))
    }

    pub fn complete_match(&mut self, outcome: &MatchOutcome) -> Option<Match> {
        self.transition(|tournament, _| tournament.complete_match(outcome))
    }

    pub fn begin_event(&mut self, elimination: Elimination) {
        self.transition(|tournament, _| (tournament.begin_event(elimination), ()));
    }

    pub fn reset_for_next_event(&mut self) {
        self.transition(|tournament, _| (tournament.reset_for_next_event(), ()));
    }

    /// Forgets every competitor and goes back to double elimination.
    pub fn reset_tournament(&mut self) {
        info!("reset_tournament");
        self.tournament = Tournament::default();
    }

    pub fn add_competitor(&mut self, first_name: &str, last_name: &str) -> Id {
        self.tournament.roster.add_competitor(first_name, last_name)
    }

    /// # Errors
    ///
    /// If the competitor doesn't exist.
    pub fn update_competitor(
        &mut self,
        id: Id,
        first_name: &str,
        last_name: &str,
    ) -> Result<(), RosterError> {
        self.tournament
            .roster
            .update_competitor(id, first_name, last_name)
    }

    /// # Errors
    ///
    /// If the competitor doesn't exist or has match history.
    pub fn remove_competitor(&mut self, id: Id) -> Result<Competitor, RosterError> {
        self.tournament.roster.remove_competitor(id)
    }
}
