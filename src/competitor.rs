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

use crate::{Id, bracket::Bracket};

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Competitor {
    pub id: Id,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub byes: u32,
    /// 0 until the event is over, then 1 for the champion.
    #[serde(default)]
    pub place: u32,
    #[serde(default)]
    pub bracket: Bracket,
    /// Already played or received a bye this round.
    #[serde(default)]
    pub previous_participant: bool,
    #[serde(default)]
    pub is_red_comp: bool,
    #[serde(default)]
    pub is_blue_comp: bool,
    #[serde(default)]
    pub last_match: bool,
}

impl Competitor {
    #[must_use]
    pub fn new(id: Id, first_name: &str, last_name: &str) -> Self {
        Self {
            id,
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    #[must_use]
    pub fn has_match_history(&self) -> bool {
        self.wins != 0 || self.losses != 0 || self.byes != 0
    }

    /// Live and has not yet played or received a bye this round.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.bracket.is_live() && !self.previous_participant
    }

    pub fn clear_corner(&mut self) {
        self.is_red_comp = false;
        self.is_blue_comp = false;
    }

    /// Back to a fresh bracket state, keeping counters and place.
    pub fn reset_bracket(&mut self) {
        self.bracket = Bracket::Winner;
        self.previous_participant = false;
        self.last_match = false;
        self.clear_corner();
    }

    /// Back to a fresh bracket state with no history.
    pub fn reset_record(&mut self) {
        self.reset_bracket();
        self.wins = 0;
        self.losses = 0;
        self.byes = 0;
        self.place = 0;
    }
}

impl fmt::Display for Competitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {} {}",
            self.id,
            self.first_name,
            self.last_name,
            self.wins,
            self.losses,
            self.byes,
            self.place,
            self.bracket
        )
    }
}
