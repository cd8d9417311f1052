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

use std::str::FromStr;

use anyhow::Context;

use crate::{
    Id, bracket::Elimination, clock::ClockTime, history::HistoryFilter,
    match_record::MatchOutcome, victory::VictoryMethod,
};

pub const COMMANDS: [&str; 17] = [
    "add",
    "advance",
    "begin",
    "competitors",
    "complete",
    "history",
    "known_command",
    "list_commands",
    "name",
    "quit",
    "remove",
    "rename",
    "reset",
    "reset_tournament",
    "standings",
    "status",
    "version",
];

/// A line of the text protocol.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Message {
    /// `add FIRST LAST`
    Add(String, String),
    /// Pair the next match, or report the one in progress.
    Advance,
    /// `begin [1|2]`, without a threshold the current one is kept.
    Begin(Option<Elimination>),
    Competitors,
    /// `complete red|blue RED_SCORE BLUE_SCORE METHOD START END`
    Complete(MatchOutcome),
    Empty,
    /// `history [first=… last=… winner_first=… winner_last=… points=… method=…]`
    History(HistoryFilter),
    KnownCommand(String),
    ListCommands,
    Name,
    Quit,
    Remove(Id),
    /// `rename ID FIRST LAST`
    Rename(Id, String, String),
    Reset,
    ResetTournament,
    Standings,
    Status,
    Version,
}

fn names(command: &str, words: &[&str]) -> anyhow::Result<(String, String)> {
    match words {
        [first, last @ ..] if !last.is_empty() => Ok(((*first).to_string(), last.join(" "))),
        _ => Err(anyhow::Error::msg(format!(
            "expected: {command} FIRST LAST"
        ))),
    }
}

fn id(command: &str, word: Option<&&str>) -> anyhow::Result<Id> {
    let word = word.ok_or_else(|| anyhow::Error::msg(format!("expected: {command} ID")))?;
    word.parse()
        .with_context(|| format!("{command}: '{word}' is not a competitor id"))
}

fn outcome(words: &[&str]) -> anyhow::Result<MatchOutcome> {
    let [corner, red_score, blue_score, victory_method, start, end] = words else {
        return Err(anyhow::Error::msg(
            "expected: complete red|blue RED_SCORE BLUE_SCORE METHOD START END",
        ));
    };

    let red_wins = match corner.to_lowercase().as_str() {
        "red" => true,
        "blue" => false,
        _ => {
            return Err(anyhow::Error::msg(format!(
                "complete: the winner must be red or blue, found '{corner}'"
            )));
        }
    };

    Ok(MatchOutcome {
        red_wins,
        red_score: red_score.parse().context("complete: RED_SCORE")?,
        blue_score: blue_score.parse().context("complete: BLUE_SCORE")?,
        victory_method: VictoryMethod::from_str(victory_method)?,
        start: ClockTime::from_str(start)?,
        end: ClockTime::from_str(end)?,
    })
}

impl FromStr for Message {
    type Err = anyhow::Error;

    fn from_str(message: &str) -> anyhow::Result<Self> {
        let words: Vec<_> = message.split_ascii_whitespace().collect();

        let Some((command, args)) = words.split_first() else {
            return Ok(Self::Empty);
        };

        match *command {
            "add" => {
                let (first_name, last_name) = names("add", args)?;
                Ok(Self::Add(first_name, last_name))
            }
            "advance" => Ok(Self::Advance),
            "begin" => match args.first() {
                Some(elimination) => Ok(Self::Begin(Some(Elimination::from_str(elimination)?))),
                None => Ok(Self::Begin(None)),
            },
            "competitors" => Ok(Self::Competitors),
            "complete" => Ok(Self::Complete(outcome(args)?)),
            "history" => Ok(Self::History(HistoryFilter::try_from(args)?)),
            "known_command" => {
                let command = args
                    .first()
                    .ok_or_else(|| anyhow::Error::msg("expected: known_command COMMAND"))?;
                Ok(Self::KnownCommand((*command).to_string()))
            }
            "list_commands" => Ok(Self::ListCommands),
            "name" => Ok(Self::Name),
            "quit" => Ok(Self::Quit),
            "remove" => Ok(Self::Remove(id("remove", args.first())?)),
            "rename" => {
                let id = id("rename", args.first())?;
                let (first_name, last_name) = names("rename ID", args.get(1..).unwrap_or_default())?;
                Ok(Self::Rename(id, first_name, last_name))
            }
            "reset" => Ok(Self::Reset),
            "reset_tournament" => Ok(Self::ResetTournament),
            "standings" => Ok(Self::Standings),
            "status" => Ok(Self::Status),
            "version" => Ok(Self::Version),
            text => Err(anyhow::Error::msg(format!("unrecognized command: {text}"))),
        }
    }
}
