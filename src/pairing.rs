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

//! Choosing who gets a bye and who fights whom.
//!
//! Every random choice goes through [`Randomness`] so a whole event can be
//! replayed from a seed or a scripted sequence.

use rand::{
    Rng,
    rngs::{StdRng, ThreadRng},
};

use crate::{Id, competitor::Competitor};

pub trait Randomness {
    /// Returns an index in `0..len`. `len` is never zero.
    fn index(&mut self, len: usize) -> usize;
}

impl Randomness for StdRng {
    fn index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

impl Randomness for ThreadRng {
    fn index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// Hands out a fixed list of indexes, repeating the last one when it runs
/// out.
#[derive(Clone, Debug, Default)]
pub struct Scripted {
    indexes: Vec<usize>,
    cursor: usize,
}

impl Scripted {
    #[must_use]
    pub fn new(indexes: Vec<usize>) -> Self {
        Self { indexes, cursor: 0 }
    }

    /// Always picks the first candidate.
    #[must_use]
    pub fn first() -> Self {
        Self::new(vec![0])
    }

    /// Always picks the last candidate.
    #[must_use]
    pub fn last() -> Self {
        Self::new(vec![usize::MAX])
    }
}

impl Randomness for Scripted {
    fn index(&mut self, len: usize) -> usize {
        let Some(last) = self.indexes.len().checked_sub(1) else {
            return 0;
        };

        let index = self.indexes[self.cursor.min(last)];
        self.cursor += 1;

        index.min(len - 1)
    }
}

#[derive(Clone, Copy)]
enum Wins {
    Fewest,
    Most,
}

fn pick_by_wins<R: Randomness + ?Sized>(
    candidates: &[&Competitor],
    wins: Wins,
    rng: &mut R,
) -> Option<Id> {
    let target = match wins {
        Wins::Fewest => candidates.iter().map(|competitor| competitor.wins).min()?,
        Wins::Most => candidates.iter().map(|competitor| competitor.wins).max()?,
    };

    let tied: Vec<_> = candidates
        .iter()
        .filter(|competitor| competitor.wins == target)
        .collect();

    tied.get(rng.index(tied.len())).map(|competitor| competitor.id)
}

/// The candidate with the fewest wins, ties broken at random.
pub fn select_lowest_wins<R: Randomness + ?Sized>(
    candidates: &[&Competitor],
    rng: &mut R,
) -> Option<Id> {
    pick_by_wins(candidates, Wins::Fewest, rng)
}

/// Byes go to whoever has won the least.
pub fn select_bye_recipient<R: Randomness + ?Sized>(
    candidates: &[&Competitor],
    rng: &mut R,
) -> Option<Id> {
    select_lowest_wins(candidates, rng)
}

/// The candidate with the most wins, ties broken at random.
pub fn select_highest_wins<R: Randomness + ?Sized>(
    candidates: &[&Competitor],
    rng: &mut R,
) -> Option<Id> {
    pick_by_wins(candidates, Wins::Most, rng)
}

/// Removes two candidates at random, the first drawn fights in the red
/// corner.
pub fn select_random_pair<R: Randomness + ?Sized>(
    candidates: &mut Vec<&Competitor>,
    rng: &mut R,
) -> Option<(Id, Id)> {
    if candidates.len() < 2 {
        return None;
    }

    let red = candidates.remove(rng.index(candidates.len()));
    let blue = candidates.remove(rng.index(candidates.len()));

    Some((red.id, blue.id))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn competitors(wins: &[u32]) -> Vec<Competitor> {
        wins.iter()
            .zip(1..)
            .map(|(&wins, id)| Competitor {
                id,
                wins,
                ..Competitor::default()
            })
            .collect()
    }

    #[test]
    fn bye_goes_to_fewest_wins() {
        let competitors = competitors(&[3, 1, 0, 2]);
        let candidates: Vec<_> = competitors.iter().collect();

        assert_eq!(select_bye_recipient(&candidates, &mut Scripted::last()), Some(3));
        assert_eq!(select_highest_wins(&candidates, &mut Scripted::last()), Some(1));
    }

    #[test]
    fn ties_are_broken_by_the_randomness() {
        let competitors = competitors(&[1, 5, 1, 1]);
        let candidates: Vec<_> = competitors.iter().collect();

        assert_eq!(select_bye_recipient(&candidates, &mut Scripted::first()), Some(1));
        assert_eq!(select_bye_recipient(&candidates, &mut Scripted::new(vec![1])), Some(3));
        assert_eq!(select_bye_recipient(&candidates, &mut Scripted::last()), Some(4));
    }

    #[test]
    fn nobody_to_pick() {
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(select_bye_recipient(&[], &mut rng), None);
        assert_eq!(select_highest_wins(&[], &mut rand::rng()), None);

        let competitors = competitors(&[0]);
        let mut candidates: Vec<_> = competitors.iter().collect();
        assert_eq!(select_random_pair(&mut candidates, &mut rng), None);
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn random_pair_removes_both() {
        let competitors = competitors(&[0, 0, 0, 0]);
        let mut candidates: Vec<_> = competitors.iter().collect();

        let pair = select_random_pair(&mut candidates, &mut Scripted::new(vec![2, 0]));

        assert_eq!(pair, Some((3, 1)));
        let left: Vec<_> = candidates.iter().map(|competitor| competitor.id).collect();
        assert_eq!(left, vec![2, 4]);
    }

    #[test]
    fn seeded_pairs_never_repeat_a_competitor() -> anyhow::Result<()> {
        let competitors = competitors(&[0; 8]);
        let mut rng = StdRng::seed_from_u64(2025);

        for _ in 0..32 {
            let mut candidates: Vec<_> = competitors.iter().collect();
            let (red, blue) = select_random_pair(&mut candidates, &mut rng)
                .ok_or_else(|| anyhow::Error::msg("eight candidates should make a pair"))?;

            assert_ne!(red, blue);
            assert_eq!(candidates.len(), 6);
        }

        Ok(())
    }
}
