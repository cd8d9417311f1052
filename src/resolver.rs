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

use log::{debug, info, warn};

use crate::{
    bracket::Bracket,
    clock::ClockTime,
    match_record::{Match, MatchOutcome},
    session::Tournament,
};

/// Records the result of the active match.
///
/// This is the only place wins, losses, and eliminations change. Returns
/// `None` without touching any competitor when there is no active match or
/// when one of its competitors has been removed.
#[must_use]
pub fn complete_match(
    mut tournament: Tournament,
    outcome: &MatchOutcome,
) -> (Tournament, Option<Match>) {
    let Some(active_match) = tournament.active_match.take() else {
        debug!("complete_match: there is no active match");
        return (tournament, None);
    };

    let roster = &mut tournament.roster;

    if !(roster.contains(active_match.red_id) && roster.contains(active_match.blue_id)) {
        warn!("complete_match: stale match cancelled {active_match}");
        return (tournament, None);
    }

    let (winner_id, loser_id) = if outcome.red_wins {
        (active_match.red_id, active_match.blue_id)
    } else {
        (active_match.blue_id, active_match.red_id)
    };
    let threshold = tournament.elimination.threshold();

    if let Some(winner) = roster.get_mut(winner_id) {
        winner.wins += 1;
        winner.bracket = Bracket::Winner;
        winner.clear_corner();
    }

    if let Some(loser) = roster.get_mut(loser_id) {
        loser.losses += 1;
        loser.bracket = if loser.losses >= threshold {
            info!("{loser_id} {} is eliminated", loser.name());
            Bracket::Eliminated
        } else {
            Bracket::Loser
        };
        loser.clear_corner();
    }

    let record = Match {
        id: roster.next_match_id(),
        round_number: active_match.round,
        match_number: active_match.match_number,
        bracket: active_match.bracket,
        red_id: active_match.red_id,
        blue_id: active_match.blue_id,
        red_score: outcome.red_score,
        blue_score: outcome.blue_score,
        victory_method: outcome.victory_method,
        winner_id,
        starting_length: outcome.start,
        match_end: outcome.end,
        duration: ClockTime::duration(outcome.start, outcome.end),
    };

    info!("complete_match {record}");
    roster.matches.push(record.clone());

    tournament.current_round = active_match.round;
    tournament.current_match_number = active_match.match_number;

    (tournament, Some(record))
}
