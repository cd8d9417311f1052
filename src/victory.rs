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

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum VictoryMethod {
    Submission,
    #[default]
    Points,
    Decision,
    OpponentDisqualification,
}

impl fmt::Display for VictoryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Submission => write!(f, "Submission"),
            Self::Points => write!(f, "Points"),
            Self::Decision => write!(f, "Decision"),
            Self::OpponentDisqualification => write!(f, "Opponent Disqualification"),
        }
    }
}

impl FromStr for VictoryMethod {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> anyhow::Result<Self> {
        match value.to_lowercase().as_str() {
            "submission" | "sub" => Ok(Self::Submission),
            "points" => Ok(Self::Points),
            "decision" => Ok(Self::Decision),
            "opponent disqualification" | "opponent_disqualification" | "dq" => {
                Ok(Self::OpponentDisqualification)
            }
            _ => Err(anyhow::Error::msg(format!(
                "Error trying to convert '{value}' to a VictoryMethod!"
            ))),
        }
    }
}
