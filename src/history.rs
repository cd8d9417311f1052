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

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{competitor::Competitor, match_record::Match, roster::Roster};

/// Searches the match history. Every criterion is an optional,
/// case-insensitive substring match and all of them must hold.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct HistoryFilter {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub winner_first_name: Option<String>,
    pub winner_last_name: Option<String>,
    /// At least one corner scored this many points.
    pub minimum_points: Option<u32>,
    pub victory_method: Option<String>,
}

fn contains(haystack: &str, needle: Option<&String>) -> bool {
    needle.is_none_or(|needle| haystack.to_lowercase().contains(&needle.to_lowercase()))
}

impl HistoryFilter {
    #[must_use]
    pub fn apply<'a>(&self, roster: &'a Roster) -> Vec<&'a Match> {
        roster
            .matches
            .iter()
            .filter(|record| self.matches(roster, record))
            .collect()
    }

    fn matches(&self, roster: &Roster, record: &Match) -> bool {
        let red = roster.get(record.red_id);
        let blue = roster.get(record.blue_id);
        let winner = roster.get(record.winner_id);

        let either = |name: fn(&Competitor) -> &str, needle: Option<&String>| {
            needle.is_none()
                || [red, blue]
                    .into_iter()
                    .flatten()
                    .any(|competitor| contains(name(competitor), needle))
        };
        let won = |name: fn(&Competitor) -> &str, needle: Option<&String>| {
            needle.is_none() || winner.is_some_and(|winner| contains(name(winner), needle))
        };

        either(|c| c.first_name.as_str(), self.first_name.as_ref())
            && either(|c| c.last_name.as_str(), self.last_name.as_ref())
            && won(|c| c.first_name.as_str(), self.winner_first_name.as_ref())
            && won(|c| c.last_name.as_str(), self.winner_last_name.as_ref())
            && self.minimum_points.is_none_or(|points| {
                record.red_score >= points || record.blue_score >= points
            })
            && contains(
                &record.victory_method.to_string(),
                self.victory_method.as_ref(),
            )
    }
}

impl TryFrom<&[&str]> for HistoryFilter {
    type Error = anyhow::Error;

    /// Reads `key=value` pairs, for example `winner_last=garcia points=4`.
    fn try_from(args: &[&str]) -> anyhow::Result<Self> {
        let mut filter = Self::default();

        for arg in args {
            let Some((key, value)) = arg.split_once('=') else {
                return Err(anyhow::Error::msg(format!(
                    "expected: key=value, found '{arg}'"
                )));
            };
            let value = value.replace('_', " ");

            match key {
                "first" => filter.first_name = Some(value),
                "last" => filter.last_name = Some(value),
                "winner_first" => filter.winner_first_name = Some(value),
                "winner_last" => filter.winner_last_name = Some(value),
                "points" => {
                    filter.minimum_points =
                        Some(value.parse().context("history: points is not an integer")?);
                }
                "method" => filter.victory_method = Some(value),
                _ => {
                    return Err(anyhow::Error::msg(format!(
                        "history: unknown filter '{key}'"
                    )));
                }
            }
        }

        Ok(filter)
    }
}
