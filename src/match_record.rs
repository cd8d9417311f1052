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

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Id, bracket::Bracket, clock::ClockTime, victory::VictoryMethod};

/// A finished match. Never changed once it is in the history.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Match {
    pub id: Id,
    pub round_number: u32,
    pub match_number: u32,
    pub bracket: Bracket,
    pub red_id: Id,
    pub blue_id: Id,
    pub red_score: u32,
    pub blue_score: u32,
    pub victory_method: VictoryMethod,
    pub winner_id: Id,
    pub starting_length: ClockTime,
    pub match_end: ClockTime,
    pub duration: ClockTime,
}

impl Match {
    #[must_use]
    pub fn loser_id(&self) -> Id {
        if self.winner_id == self.red_id {
            self.blue_id
        } else {
            self.red_id
        }
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {}-{} {} {} {} {} {}",
            self.id,
            self.round_number,
            self.match_number,
            self.bracket,
            self.red_id,
            self.blue_id,
            self.red_score,
            self.blue_score,
            self.winner_id,
            self.victory_method.to_string().replace(' ', "_"),
            self.starting_length,
            self.match_end,
            self.duration,
        )
    }
}

/// What the match table reports when a match ends.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct MatchOutcome {
    pub red_wins: bool,
    pub red_score: u32,
    pub blue_score: u32,
    pub victory_method: VictoryMethod,
    pub start: ClockTime,
    pub end: ClockTime,
}
