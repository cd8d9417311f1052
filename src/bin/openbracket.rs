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

use std::io::{self, Write as _};

use clap::{CommandFactory, Parser};
use log::info;
use openbracket::{
    COPYRIGHT, LONG_VERSION,
    bracket::Elimination,
    session::{EventSession, Tournament},
    utils,
};
use rand::{SeedableRng, rngs::StdRng};

/// Open Bracket
///
/// Runs a single or double elimination event from the terminal, one command
/// per line. Enter 'list_commands' for a list of commands.
#[derive(Parser, Debug)]
#[command(long_version = LONG_VERSION, about = "Open Bracket")]
struct Args {
    /// How many losses eliminate a competitor, anything but 1 means 2
    #[arg(default_value_t = Elimination::Double, long, value_name = "1|2")]
    elimination: Elimination,

    /// Seed the random pairings so an event can be replayed
    #[arg(long)]
    seed: Option<u64>,

    /// Whether to log on the debug level
    #[arg(long)]
    debug: bool,

    /// Whether the application is being run by systemd
    #[arg(long)]
    systemd: bool,

    /// Print the standings after every command
    #[arg(long)]
    display_standings: bool,

    /// Build the manpage
    #[arg(long)]
    man: bool,
}

impl Args {
    fn generate_man_page() -> anyhow::Result<()> {
        let mut buffer: Vec<u8> = Vec::default();
        let cmd = Self::command().name("openbracket").long_version(None);
        let man = clap_mangen::Man::new(cmd).date("2026-10-19");

        man.render(&mut buffer)?;
        write!(buffer, "{COPYRIGHT}")?;

        std::fs::write("openbracket.1", buffer)?;
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    utils::init_logger(args.debug, args.systemd);

    if args.man {
        return Args::generate_man_page();
    }

    let rng = match args.seed {
        Some(seed) => {
            info!("seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let tournament = Tournament {
        elimination: args.elimination,
        ..Tournament::default()
    };
    let mut session = EventSession::new(tournament, rng);

    let mut buffer = String::new();
    let stdin = io::stdin();

    loop {
        buffer.clear();
        match stdin.read_line(&mut buffer) {
            Ok(0) => return Ok(()),
            Ok(_) => {}
            Err(error) => {
                println!("? {error}\n");
                return Ok(());
            }
        }

        match session.read_line(&buffer) {
            Err(error) => println!("? {error}\n"),
            Ok(Some(message)) => println!("= {message}\n"),
            Ok(None) => {}
        }

        if args.display_standings {
            for competitor in session.roster().standings() {
                println!("{competitor}");
            }
            println!();
        }
    }
}
