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

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Id, competitor::Competitor, match_record::Match};

#[derive(Error, Debug, Eq, PartialEq)]
pub enum RosterError {
    #[error("roster: competitor {0} was not found")]
    NotFound(Id),
    #[error("roster: competitor {0} has match history, reset the event first")]
    HasMatchHistory(Id),
}

/// The competitors of an event and the matches they have played.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Roster {
    pub competitors: Vec<Competitor>,
    #[serde(default)]
    pub matches: Vec<Match>,
}

impl Roster {
    #[must_use]
    pub fn get(&self, id: Id) -> Option<&Competitor> {
        self.competitors.iter().find(|competitor| competitor.id == id)
    }

    pub fn get_mut(&mut self, id: Id) -> Option<&mut Competitor> {
        self.competitors
            .iter_mut()
            .find(|competitor| competitor.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: Id) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.competitors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.competitors.is_empty()
    }

    #[must_use]
    pub fn next_competitor_id(&self) -> Id {
        self.competitors
            .iter()
            .map(|competitor| competitor.id)
            .max()
            .map_or(1, |id| id + 1)
    }

    #[must_use]
    pub fn next_match_id(&self) -> Id {
        self.matches
            .iter()
            .map(|record| record.id)
            .max()
            .map_or(1, |id| id + 1)
    }

    pub fn add_competitor(&mut self, first_name: &str, last_name: &str) -> Id {
        let id = self.next_competitor_id();
        let competitor = Competitor::new(id, first_name, last_name);

        info!("add_competitor {id} {}", competitor.name());
        self.competitors.push(competitor);

        id
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
        let competitor = self.get_mut(id).ok_or(RosterError::NotFound(id))?;
        competitor.first_name = first_name.trim().to_string();
        competitor.last_name = last_name.trim().to_string();

        debug!("update_competitor {id} {}", competitor.name());
        Ok(())
    }

    /// # Errors
    ///
    /// If the competitor doesn't exist or has already won, lost, or received a
    /// bye.
    pub fn remove_competitor(&mut self, id: Id) -> Result<Competitor, RosterError> {
        let index = self
            .competitors
            .iter()
            .position(|competitor| competitor.id == id)
            .ok_or(RosterError::NotFound(id))?;

        if self.competitors[index].has_match_history() {
            return Err(RosterError::HasMatchHistory(id));
        }

        info!("remove_competitor {id}");
        Ok(self.competitors.remove(index))
    }

    /// Competitors ordered by finishing place.
    #[must_use]
    pub fn standings(&self) -> Vec<&Competitor> {
        let mut standings: Vec<_> = self.competitors.iter().collect();
        standings.sort_by_key(|competitor| competitor.place);
        standings
    }

    #[must_use]
    pub fn total_wins(&self) -> u32 {
        self.competitors.iter().map(|competitor| competitor.wins).sum()
    }

    #[must_use]
    pub fn total_losses(&self) -> u32 {
        self.competitors
            .iter()
            .map(|competitor| competitor.losses)
            .sum()
    }
}
