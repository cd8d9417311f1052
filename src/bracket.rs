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

/// The pool a competitor currently belongs to.
///
/// `Eliminated` is terminal: an eliminated competitor is never paired again.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum Bracket {
    #[default]
    Winner,
    Loser,
    Eliminated,
}

impl Bracket {
    #[must_use]
    pub fn is_live(self) -> bool {
        self != Self::Eliminated
    }
}

impl fmt::Display for Bracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Winner => write!(f, "winner"),
            Self::Loser => write!(f, "loser"),
            Self::Eliminated => write!(f, "eliminated"),
        }
    }
}

impl FromStr for Bracket {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> anyhow::Result<Self> {
        let string = string.to_lowercase();

        match string.as_str() {
            "w" | "winner" => Ok(Self::Winner),
            "l" | "loser" => Ok(Self::Loser),
            "e" | "eliminated" => Ok(Self::Eliminated),
            _ => Err(anyhow::Error::msg(format!(
                "Error trying to convert '{string}' to a Bracket!"
            ))),
        }
    }
}

/// How many losses a competitor may take before being eliminated.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Elimination {
    Single,
    #[default]
    Double,
}

impl Elimination {
    #[must_use]
    pub fn threshold(self) -> u32 {
        match self {
            Self::Single => 1,
            Self::Double => 2,
        }
    }
}

/// Anything but a single loss means double elimination.
impl From<u32> for Elimination {
    fn from(losses: u32) -> Self {
        if losses == 1 {
            Self::Single
        } else {
            Self::Double
        }
    }
}

impl fmt::Display for Elimination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.threshold())
    }
}

impl FromStr for Elimination {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> anyhow::Result<Self> {
        match string.to_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "double" => Ok(Self::Double),
            number => {
                let losses: i64 = number.parse().map_err(|_| {
                    anyhow::Error::msg(format!(
                        "Error trying to convert '{string}' to an Elimination!"
                    ))
                })?;

                Ok(u32::try_from(losses).map_or(Self::Double, Self::from))
            }
        }
    }
}
