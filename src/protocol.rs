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

use std::{borrow::Cow, process::exit, str::FromStr};

use crate::{
    message::{COMMANDS, Message},
    pairing::Randomness,
    session::EventSession,
};

fn lines<T: ToString>(items: impl IntoIterator<Item = T>) -> String {
    let mut reply = String::new();
    for item in items {
        reply.push('\n');
        reply.push_str(&item.to_string());
    }
    reply
}

impl<R: Randomness> EventSession<R> {
    /// # Errors
    ///
    /// If the command is illegal or invalid.
    pub fn read_line(&mut self, buffer: &str) -> anyhow::Result<Option<String>> {
        let mut buffer = Cow::from(buffer);
        if let Some(comment_offset) = buffer.find('#') {
            buffer.to_mut().replace_range(comment_offset.., "");
        }

        self.update(Message::from_str(buffer.as_ref())?)
    }

    /// # Errors
    ///
    /// If the command is illegal or invalid.
    pub fn update(&mut self, message: Message) -> anyhow::Result<Option<String>> {
        match message {
            Message::Add(first_name, last_name) => {
                let id = self.add_competitor(&first_name, &last_name);
                Ok(Some(id.to_string()))
            }
            Message::Advance => Ok(Some(self.advance().to_string())),
            Message::Begin(elimination) => {
                let elimination = elimination.unwrap_or(self.tournament().elimination);
                self.begin_event(elimination);
                Ok(Some(String::new()))
            }
            Message::Competitors => Ok(Some(lines(&self.roster().competitors))),
            Message::Complete(outcome) => match self.complete_match(&outcome) {
                Some(record) => Ok(Some(record.to_string())),
                None => Err(anyhow::Error::msg("complete: there is no match to complete")),
            },
            Message::Empty => Ok(None),
            Message::History(filter) => Ok(Some(lines(filter.apply(self.roster())))),
            Message::KnownCommand(command) => {
                if COMMANDS.contains(&command.as_str()) {
                    Ok(Some("true".to_string()))
                } else {
                    Ok(Some("false".to_string()))
                }
            }
            Message::ListCommands => Ok(Some(lines(COMMANDS))),
            Message::Name => {
                let name = env!("CARGO_PKG_NAME");
                Ok(Some(name.to_string()))
            }
            Message::Quit => exit(0),
            Message::Remove(id) => {
                let competitor = self.remove_competitor(id)?;
                Ok(Some(competitor.to_string()))
            }
            Message::Rename(id, first_name, last_name) => {
                self.update_competitor(id, &first_name, &last_name)?;
                Ok(Some(String::new()))
            }
            Message::Reset => {
                self.reset_for_next_event();
                Ok(Some(String::new()))
            }
            Message::ResetTournament => {
                self.reset_tournament();
                Ok(Some(String::new()))
            }
            Message::Standings => Ok(Some(lines(self.roster().standings()))),
            Message::Status => Ok(Some(ron::ser::to_string(self.tournament())?)),
            Message::Version => {
                let version = env!("CARGO_PKG_VERSION");
                Ok(Some(version.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bracket::{Bracket, Elimination},
        competitor::Competitor,
        pairing::Scripted,
        session::Tournament,
    };

    fn reply(session: &mut EventSession<Scripted>, line: &str) -> anyhow::Result<String> {
        Ok(session.read_line(line)?.unwrap_or_default())
    }

    #[test]
    fn housekeeping() -> anyhow::Result<()> {
        let mut session = EventSession::new(Tournament::default(), Scripted::first());

        assert_eq!(session.read_line("# nothing but a comment\n")?, None);
        assert_eq!(reply(&mut session, "known_command advance")?, "true");
        assert_eq!(reply(&mut session, "known_command fight")?, "false");
        assert_eq!(reply(&mut session, "name")?, "openbracket");
        assert!(reply(&mut session, "list_commands")?.contains("\nstandings"));
        assert_eq!(reply(&mut session, "advance")?, "competitor_count_error");

        Ok(())
    }

    #[test]
    fn roster_commands() -> anyhow::Result<()> {
        let mut session = EventSession::new(Tournament::default(), Scripted::first());

        assert_eq!(reply(&mut session, "add Royce Gracie # first")?, "1");
        assert_eq!(reply(&mut session, "add Rickson Gracie")?, "2");
        reply(&mut session, "rename 2 Rolls Gracie")?;
        assert_eq!(
            session.roster().get(2).map(Competitor::name),
            Some("Rolls Gracie".to_string())
        );
        assert!(session.read_line("rename 9 Nobody Here").is_err());

        reply(&mut session, "begin 1")?;
        assert_eq!(session.tournament().elimination, Elimination::Single);
        assert_eq!(reply(&mut session, "advance")?, "match_ready 1 1 winner 1 2");
        assert_eq!(
            reply(&mut session, "complete red 2 0 submission 05:00 03:00")?,
            "1 1 1 winner 1 2 2-0 1 Submission 05:00 03:00 02:00"
        );
        assert!(session.read_line("complete red 2 0 submission 05:00 03:00").is_err());

        assert!(session.read_line("remove 1").is_err());
        assert_eq!(reply(&mut session, "advance")?, "results");
        assert!(
            reply(&mut session, "standings")?.starts_with("\n1 Royce Gracie 1 0 0 1 winner")
        );
        assert_eq!(reply(&mut session, "history winner_first=rolls")?, "");

        reply(&mut session, "reset")?;
        assert!(reply(&mut session, "remove 1")?.starts_with("1 Royce Gracie"));
        assert_eq!(session.roster().len(), 1);
        assert_eq!(
            session.roster().get(2).map(|competitor| competitor.bracket),
            Some(Bracket::Winner)
        );

        reply(&mut session, "reset_tournament")?;
        assert!(session.roster().is_empty());

        Ok(())
    }

    #[test]
    fn status_is_ron() -> anyhow::Result<()> {
        let mut session = EventSession::new(Tournament::default(), Scripted::first());
        reply(&mut session, "add Royce Gracie")?;

        let status = reply(&mut session, "status")?;
        let tournament: Tournament = ron::from_str(&status)?;

        assert_eq!(&tournament, session.tournament());
        Ok(())
    }
}
