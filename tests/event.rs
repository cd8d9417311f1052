use std::{
    collections::{HashMap, HashSet},
    str::FromStr,
};

use rand::{Rng, SeedableRng, rngs::StdRng};

use openbracket::{
    bracket::{Bracket, Elimination},
    clock::ClockTime,
    match_record::MatchOutcome,
    pairing::{Randomness, Scripted},
    scheduler::{ActiveMatch, AdvanceOutcome},
    session::{EventSession, Tournament},
    victory::VictoryMethod,
};

const MAX_MATCHES: usize = 1_000;

struct Event {
    tournament: Tournament,
    matches: Vec<ActiveMatch>,
    byes_by_round: HashMap<u32, u32>,
}

fn entrants<R: Randomness>(count: usize, rng: R) -> EventSession<R> {
    let mut session = EventSession::new(Tournament::default(), rng);
    for index in 1..=count {
        session.add_competitor(&format!("First{index}"), &format!("Last{index}"));
    }
    session
}

fn byes(session: &EventSession<impl Randomness>) -> u32 {
    session
        .roster()
        .competitors
        .iter()
        .map(|competitor| competitor.byes)
        .sum()
}

/// Plays an event to the end, letting `red_wins` decide every match.
fn run_event<R: Randomness>(
    mut session: EventSession<R>,
    elimination: Elimination,
    mut red_wins: impl FnMut() -> bool,
) -> anyhow::Result<Event> {
    session.begin_event(elimination);

    let mut matches = Vec::new();
    let mut byes_by_round = HashMap::new();

    for _ in 0..MAX_MATCHES {
        let byes_before = byes(&session);

        match session.advance() {
            AdvanceOutcome::MatchReady(active_match) => {
                *byes_by_round.entry(active_match.round).or_insert(0) +=
                    byes(&session) - byes_before;

                assert_eq!(session.advance(), AdvanceOutcome::MatchReady(active_match));

                let outcome = MatchOutcome {
                    red_wins: red_wins(),
                    red_score: 2,
                    blue_score: 0,
                    victory_method: VictoryMethod::Points,
                    start: ClockTime::from_str("05:00")?,
                    end: ClockTime::from_str("00:00")?,
                };
                let record = session
                    .complete_match(&outcome)
                    .ok_or_else(|| anyhow::Error::msg("the active match should complete"))?;

                assert_eq!(record.round_number, active_match.round);
                assert_eq!(record.duration.to_string(), "05:00");
                matches.push(active_match);
            }
            AdvanceOutcome::Results => {
                return Ok(Event {
                    tournament: session.into_tournament(),
                    matches,
                    byes_by_round,
                });
            }
            outcome => return Err(anyhow::Error::msg(format!("unexpected outcome: {outcome}"))),
        }
    }

    Err(anyhow::Error::msg("the event never finished"))
}

fn assert_event_is_consistent(
    event: &Event,
    count: usize,
    elimination: Elimination,
) -> anyhow::Result<()> {
    let roster = &event.tournament.roster;
    let completed = u32::try_from(roster.matches.len())?;

    assert_eq!(roster.total_wins(), completed);
    assert_eq!(roster.total_losses(), completed);
    assert_eq!(event.matches.len(), roster.matches.len());

    let mut places: Vec<_> = roster.competitors.iter().map(|c| c.place).collect();
    places.sort_unstable();
    assert_eq!(places, (1..=u32::try_from(count)?).collect::<Vec<_>>());

    for competitor in &roster.competitors {
        if competitor.place == 1 {
            assert_ne!(competitor.bracket, Bracket::Eliminated);
            assert!(competitor.losses < elimination.threshold());
        } else {
            assert_eq!(competitor.bracket, Bracket::Eliminated);
            assert_eq!(competitor.losses, elimination.threshold());
        }
    }

    let standings = roster.standings();
    for pair in standings.windows(2).skip(1) {
        assert!(pair[0].wins >= pair[1].wins);
    }

    let mut seen: HashMap<u32, HashSet<u32>> = HashMap::new();
    for active_match in &event.matches {
        let round = seen.entry(active_match.round).or_default();
        assert!(round.insert(active_match.red_id), "{active_match}");
        assert!(round.insert(active_match.blue_id), "{active_match}");
    }

    for byes in event.byes_by_round.values() {
        assert!(*byes <= 1);
    }

    Ok(())
}

#[test]
fn seeded_events_are_consistent() -> anyhow::Result<()> {
    for count in 2..=16 {
        for elimination in [Elimination::Single, Elimination::Double] {
            for seed in 0..8 {
                let mut coin = StdRng::seed_from_u64(seed + 1_000);
                let session = entrants(count, StdRng::seed_from_u64(seed));

                let event = run_event(session, elimination, || coin.random_bool(0.5))?;
                assert_event_is_consistent(&event, count, elimination)?;
            }
        }
    }

    Ok(())
}

#[test]
fn same_seed_same_event() -> anyhow::Result<()> {
    let play = || {
        let session = entrants(9, StdRng::seed_from_u64(42));
        run_event(session, Elimination::Double, || true)
    };

    assert_eq!(play()?.matches, play()?.matches);
    Ok(())
}

#[test]
fn scripted_and_thread_randomness_finish() -> anyhow::Result<()> {
    let event = run_event(entrants(7, Scripted::last()), Elimination::Double, || false)?;
    assert_event_is_consistent(&event, 7, Elimination::Double)?;

    let event = run_event(entrants(6, rand::rng()), Elimination::Single, || true)?;
    assert_event_is_consistent(&event, 6, Elimination::Single)?;

    Ok(())
}

#[test]
fn two_competitors_double_elimination() -> anyhow::Result<()> {
    let mut session = entrants(2, Scripted::first());
    session.begin_event(Elimination::from(2));

    let AdvanceOutcome::MatchReady(first) = session.advance() else {
        return Err(anyhow::Error::msg("expected the first match"));
    };
    let outcome = MatchOutcome {
        red_wins: true,
        ..MatchOutcome::default()
    };
    session.complete_match(&outcome);

    let roster = session.roster();
    let winner = roster.get(first.red_id).map(|c| (c.wins, c.bracket));
    let loser = roster.get(first.blue_id).map(|c| (c.losses, c.bracket));
    assert_eq!(winner, Some((1, Bracket::Winner)));
    assert_eq!(loser, Some((1, Bracket::Loser)));

    let AdvanceOutcome::MatchReady(second) = session.advance() else {
        return Err(anyhow::Error::msg("expected the second match"));
    };
    assert_eq!((second.red_id, second.blue_id), (first.red_id, first.blue_id));
    assert_eq!(second.round, 2);
    session.complete_match(&outcome);

    let loser = session.roster().get(first.blue_id).map(|c| (c.losses, c.bracket));
    assert_eq!(loser, Some((2, Bracket::Eliminated)));

    assert_eq!(session.advance(), AdvanceOutcome::Results);
    let roster = session.roster();
    assert_eq!(roster.get(first.red_id).map(|c| c.place), Some(1));
    assert_eq!(roster.get(first.blue_id).map(|c| c.place), Some(2));

    Ok(())
}

#[test]
fn one_competitor_cannot_compete() {
    let mut session = entrants(1, Scripted::first());
    session.begin_event(Elimination::Double);

    assert_eq!(session.advance(), AdvanceOutcome::CompetitorCountError);
}

#[test]
fn removed_competitor_cancels_the_active_match() -> anyhow::Result<()> {
    let mut session = entrants(3, Scripted::first());
    session.begin_event(Elimination::Double);

    let AdvanceOutcome::MatchReady(active_match) = session.advance() else {
        return Err(anyhow::Error::msg("expected a match"));
    };
    session.remove_competitor(active_match.blue_id)?;

    let AdvanceOutcome::MatchReady(next) = session.advance() else {
        return Err(anyhow::Error::msg("the remaining two should be paired"));
    };
    assert_ne!(next, active_match);
    assert!(session.roster().contains(next.red_id));
    assert!(session.roster().contains(next.blue_id));
    assert!(session.complete_match(&MatchOutcome::default()).is_some());

    Ok(())
}

#[test]
fn protocol_runs_a_whole_event() -> anyhow::Result<()> {
    let mut session = EventSession::new(Tournament::default(), StdRng::seed_from_u64(7));

    for name in ["Royce Gracie", "Rickson Gracie", "Marcelo Garcia", "Roger Gracie"] {
        session.read_line(&format!("add {name}\n"))?;
    }
    session.read_line("begin 2 # double elimination\n")?;

    let mut results = false;
    for _ in 0..MAX_MATCHES {
        let reply = session.read_line("advance\n")?.unwrap_or_default();

        if reply == "results" {
            results = true;
            break;
        }

        assert!(reply.starts_with("match_ready "), "{reply}");
        session.read_line("complete blue 0 0 decision 06:00 00:30\n")?;
    }
    assert!(results);

    let history = session.read_line("history method=decision\n")?.unwrap_or_default();
    assert_eq!(history.lines().skip(1).count(), session.roster().matches.len());

    let standings = session.read_line("standings\n")?.unwrap_or_default();
    let places: Vec<_> = standings
        .lines()
        .skip(1)
        .filter_map(|line| line.split_whitespace().nth(6))
        .collect();
    assert_eq!(places, vec!["1", "2", "3", "4"]);

    Ok(())
}
