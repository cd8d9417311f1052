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

//! Deciding what happens next in an event.
//!
//! A round is one pass in which every live competitor either plays exactly
//! one match or receives a bye. Byes go to the losers bracket first, at most
//! one per round. When the winners bracket is left with an odd number of
//! competitors, its weakest member crosses over to fight the strongest
//! available loser.

use std::fmt;

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    Id,
    bracket::Bracket,
    competitor::Competitor,
    pairing::{
        Randomness, select_bye_recipient, select_highest_wins, select_lowest_wins,
        select_random_pair,
    },
    roster::Roster,
    session::Tournament,
};

/// Passes through the scheduling loop before giving up with
/// [`AdvanceOutcome::Idle`].
pub const MAX_ITERATIONS: usize = 50;

/// The pairing waiting for a result.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ActiveMatch {
    pub red_id: Id,
    pub blue_id: Id,
    pub round: u32,
    pub match_number: u32,
    pub bracket: Bracket,
}

impl fmt::Display for ActiveMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.round, self.match_number, self.bracket, self.red_id, self.blue_id
        )
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum AdvanceOutcome {
    MatchReady(ActiveMatch),
    /// The event is over and every competitor has a place.
    Results,
    /// There are fewer than two competitors.
    CompetitorCountError,
    /// The scheduler ran out of iterations without finding anything to do.
    Idle,
}

impl fmt::Display for AdvanceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MatchReady(active_match) => write!(f, "match_ready {active_match}"),
            Self::Results => write!(f, "results"),
            Self::CompetitorCountError => write!(f, "competitor_count_error"),
            Self::Idle => write!(f, "idle"),
        }
    }
}

/// Produces the next thing to do in the event.
///
/// Calling this again while a match is outstanding returns the same match.
pub fn advance<R: Randomness + ?Sized>(
    mut tournament: Tournament,
    rng: &mut R,
) -> (Tournament, AdvanceOutcome) {
    if let Some(active_match) = tournament.active_match.take() {
        if tournament.roster.contains(active_match.red_id)
            && tournament.roster.contains(active_match.blue_id)
        {
            tournament.active_match = Some(active_match);
            return (tournament, AdvanceOutcome::MatchReady(active_match));
        }

        warn!("advance: stale match cancelled {active_match}");
    }

    if tournament.roster.len() < 2 {
        info!(
            "advance: competitor_count_error, {} competitor(s)",
            tournament.roster.len()
        );
        return (tournament, AdvanceOutcome::CompetitorCountError);
    }

    for _ in 0..MAX_ITERATIONS {
        let competitors = &tournament.roster.competitors;
        let total = competitors.len();
        let eliminated = competitors
            .iter()
            .filter(|competitor| competitor.bracket == Bracket::Eliminated)
            .count();
        let winners = ids_in(competitors, Bracket::Winner);
        let losers = ids_in(competitors, Bracket::Loser);

        if eliminated == total - 1
            && let Some(&champion) = winners.first()
        {
            assign_places(&mut tournament.roster, champion);
            return (tournament, AdvanceOutcome::Results);
        }

        if let ([winner], [loser]) = (winners.as_slice(), losers.as_slice()) {
            let (winner, loser) = (*winner, *loser);

            if round_is_over(&tournament.roster) {
                start_next_round(&mut tournament);
            }

            let active_match = pair(&mut tournament, winner, loser, Bracket::Winner);
            return (tournament, AdvanceOutcome::MatchReady(active_match));
        }

        if round_is_over(&tournament.roster) {
            start_next_round(&mut tournament);
            continue;
        }

        if !tournament.round_bye_assigned {
            assign_bye(&mut tournament, rng);
        }

        if let Some((red, blue, bracket)) = choose_pairing(&tournament.roster, rng) {
            let active_match = pair(&mut tournament, red, blue, bracket);
            return (tournament, AdvanceOutcome::MatchReady(active_match));
        }
    }

    error!(
        "advance: scheduler exhausted after {MAX_ITERATIONS} iterations in round {}",
        tournament.current_round
    );
    (tournament, AdvanceOutcome::Idle)
}

fn ids_in(competitors: &[Competitor], bracket: Bracket) -> Vec<Id> {
    competitors
        .iter()
        .filter(|competitor| competitor.bracket == bracket)
        .map(|competitor| competitor.id)
        .collect()
}

/// The live competitors who have not played yet this round, as
/// `(winners, losers)`.
fn available(roster: &Roster) -> (Vec<&Competitor>, Vec<&Competitor>) {
    roster
        .competitors
        .iter()
        .filter(|competitor| competitor.is_available())
        .partition(|competitor| competitor.bracket == Bracket::Winner)
}

#[must_use]
fn round_is_over(roster: &Roster) -> bool {
    let mut live = roster
        .competitors
        .iter()
        .filter(|competitor| competitor.bracket.is_live())
        .peekable();

    live.peek().is_some() && live.all(|competitor| competitor.previous_participant)
}

fn start_next_round(tournament: &mut Tournament) {
    tournament.current_round += 1;
    tournament.current_match_number = 0;
    tournament.round_bye_assigned = false;

    for competitor in &mut tournament.roster.competitors {
        if competitor.bracket.is_live() {
            competitor.previous_participant = false;
        }
    }

    info!("round {} begins", tournament.current_round);
}

fn assign_bye<R: Randomness + ?Sized>(tournament: &mut Tournament, rng: &mut R) {
    let (winners, losers) = available(&tournament.roster);

    if (winners.len() + losers.len()) % 2 == 0 {
        return;
    }

    // Before anyone has lost, the bye comes from the winners bracket.
    let recipient =
        select_bye_recipient(&losers, rng).or_else(|| select_bye_recipient(&winners, rng));

    if let Some(id) = recipient
        && let Some(competitor) = tournament.roster.get_mut(id)
    {
        competitor.byes += 1;
        competitor.previous_participant = true;
        tournament.round_bye_assigned = true;

        info!(
            "bye to {id} {} in the {} bracket, round {}",
            competitor.name(),
            competitor.bracket,
            tournament.current_round
        );
    }
}

fn choose_pairing<R: Randomness + ?Sized>(
    roster: &Roster,
    rng: &mut R,
) -> Option<(Id, Id, Bracket)> {
    let (mut winners, mut losers) = available(roster);

    if winners.len() % 2 == 1 && !losers.is_empty() {
        let red = select_lowest_wins(&winners, rng)?;
        let blue = select_highest_wins(&losers, rng)?;
        return Some((red, blue, Bracket::Winner));
    }

    if let Some((red, blue)) = select_random_pair(&mut winners, rng) {
        return Some((red, blue, Bracket::Winner));
    }

    select_random_pair(&mut losers, rng).map(|(red, blue)| (red, blue, Bracket::Loser))
}

fn pair(tournament: &mut Tournament, red_id: Id, blue_id: Id, bracket: Bracket) -> ActiveMatch {
    if tournament.current_round == 0 {
        tournament.current_round = 1;
    }
    tournament.current_match_number += 1;

    for competitor in &mut tournament.roster.competitors {
        competitor.clear_corner();

        if competitor.id == red_id {
            competitor.is_red_comp = true;
        } else if competitor.id == blue_id {
            competitor.is_blue_comp = true;
        } else {
            continue;
        }

        competitor.previous_participant = true;
        competitor.last_match = true;
    }

    let active_match = ActiveMatch {
        red_id,
        blue_id,
        round: tournament.current_round,
        match_number: tournament.current_match_number,
        bracket,
    };

    debug!("match_ready {active_match}");
    tournament.active_match = Some(active_match);
    active_match
}

/// The champion takes first, the eliminated follow by most wins.
fn assign_places(roster: &mut Roster, champion: Id) {
    let mut eliminated: Vec<_> = roster
        .competitors
        .iter()
        .filter(|competitor| competitor.bracket == Bracket::Eliminated)
        .map(|competitor| (competitor.id, competitor.wins))
        .collect();

    // Stable, so equal wins keep roster order.
    eliminated.sort_by(|a, b| b.1.cmp(&a.1));

    if let Some(competitor) = roster.get_mut(champion) {
        competitor.place = 1;
        info!("results: champion {champion} {}", competitor.name());
    }

    for ((id, _), place) in eliminated.into_iter().zip(2..) {
        if let Some(competitor) = roster.get_mut(id) {
            competitor.place = place;
        }
    }
}
