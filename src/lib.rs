//! A bracket scheduler for single and double elimination events.
//!
//! Competitors start in the winners bracket, drop to the losers bracket on
//! their first loss under double elimination, and are eliminated once they
//! reach the loss threshold. The scheduler hands out byes, pairs matches
//! across and within brackets, and ranks everyone when one competitor is
//! left.
//!
//! ## Text Protocol
//!
//! The `openbracket` binary reads one [message] per line on stdin and
//! replies with `= ` on success or `? ` on failure.
//!
//! [message]: message::Message

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

#![deny(clippy::panic)]

pub mod bracket;
pub mod clock;
pub mod competitor;
pub mod history;
pub mod match_record;
pub mod message;
pub mod pairing;
pub mod protocol;
pub mod resolver;
pub mod roster;
pub mod scheduler;
pub mod session;
pub mod utils;
pub mod victory;

pub type Id = u32;

pub const COPYRIGHT: &str = r".SH COPYRIGHT
Copyright (C) 2026 The openbracket developers

This program is free software: you can redistribute it and/or modify
it under the terms of the GNU Affero General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU Affero General Public License for more details.

You should have received a copy of the GNU Affero General Public License
along with this program.  If not, see <https://www.gnu.org/licenses/>.
";

pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "
Copyright (c) 2026 The openbracket developers
Licensed under the AGPLv3"
);
