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

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// The largest minutes or seconds value the match clock accepts.
pub const CLOCK_LIMIT: u32 = 60;

const MINUTE: u32 = 60;

/// A match clock reading, displayed as `MM:SS`.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct ClockTime {
    pub minutes: u32,
    pub seconds: u32,
}

impl ClockTime {
    /// A reading entered by the operator, each part clamped to `0..=60`.
    #[must_use]
    pub fn new(minutes: u32, seconds: u32) -> Self {
        Self {
            minutes: minutes.min(CLOCK_LIMIT),
            seconds: seconds.min(CLOCK_LIMIT),
        }
    }

    #[must_use]
    pub fn from_total_seconds(total: u32) -> Self {
        Self {
            minutes: total / MINUTE,
            seconds: total % MINUTE,
        }
    }

    #[must_use]
    pub fn total_seconds(&self) -> u32 {
        self.minutes * MINUTE + self.seconds
    }

    /// The absolute difference between two readings.
    ///
    /// The clock counts down, so `end` is usually the smaller value.
    #[must_use]
    pub fn duration(start: Self, end: Self) -> Self {
        Self::from_total_seconds(start.total_seconds().abs_diff(end.total_seconds()))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}

impl FromStr for ClockTime {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> anyhow::Result<Self> {
        let Some((minutes, seconds)) = string.trim().split_once(':') else {
            return Err(anyhow::Error::msg(format!(
                "expected: MM:SS, found '{string}'"
            )));
        };

        let minutes = minutes
            .parse::<u32>()
            .context("clock: minutes is not a non-negative integer")?;
        let seconds = seconds
            .parse::<u32>()
            .context("clock: seconds is not a non-negative integer")?;

        Ok(Self::new(minutes, seconds))
    }
}
