use organpair_engine::catalog::Catalog;
use organpair_engine::logger::ScoreRecord;
use organpair_engine::session::GameSession;
use organpair_engine::settings::GameSettings;
use organpair_engine::state::{Phase, SessionEvent};
use organpair_engine::tile::Face;

#[test]
fn ticking_to_zero_ends_exactly_once() {
    let mut s = GameSession::with_defaults(Some(3));
    s.start();

    // earn something first so the summary has content
    let deck = s.deck().unwrap().clone();
    let organ = deck.tiles().iter().find(|t| t.face == Face::Organ).unwrap().id;
    s.select(organ);
    s.select(deck.counterpart(organ).unwrap().id);
    let before = s.state();

    let mut ended_events = 0;
    let mut ticks = 0;
    while s.phase() != Phase::Ended {
        let step = s.tick();
        ticks += 1;
        ended_events += step
            .events
            .iter()
            .filter(|e| matches!(e, SessionEvent::Ended(_)))
            .count();
        assert!(ticks <= 75, "clock must stop at zero");
    }
    assert_eq!(ticks, 75);
    assert_eq!(ended_events, 1);

    for _ in 0..5 {
        let step = s.tick();
        assert!(step.is_quiet());
        assert_eq!(step.state.time_remaining_secs, 0);
    }

    let summary = s.final_summary().expect("summary after end");
    assert_eq!(summary.score, before.score);
    assert_eq!(summary.level, 1);
    assert_eq!(summary.total_matches_made, 1);
    assert_eq!(summary.max_combo_reached, 1);
}

#[test]
fn picks_after_end_are_ignored() {
    let mut s = GameSession::with_defaults(Some(4));
    s.start();
    let first = s.deck().unwrap().tiles()[0].id;
    s.select(first);
    while !s.is_ended() {
        s.tick();
    }
    let frozen = s.state();
    let second = s.deck().unwrap().counterpart(first).unwrap().id;
    let deck = s.deck().unwrap().clone();
    for t in deck.tiles() {
        assert!(s.select(t.id).is_quiet());
    }
    assert!(s.select(second).is_quiet());
    assert!(s.start().is_quiet());
    assert_eq!(s.state(), frozen);
    assert_eq!(s.pending_pick(), None);
}

#[test]
fn short_clock_reports_summary_in_step() {
    let settings = GameSettings {
        initial_time_secs: 2,
        ..GameSettings::default()
    };
    let mut s = GameSession::new(Catalog::default(), settings, Some(8)).unwrap();
    s.start();
    assert!(s.tick().ended().is_none());
    let step = s.tick();
    let summary = step.ended().expect("ended on second tick");
    assert_eq!(summary.score, 0);
    assert_eq!(step.state.phase, Phase::Ended);
}

#[test]
fn failing_sink_leaves_session_final() {
    use organpair_engine::errors::PersistError;
    use organpair_engine::logger::ScoreSink;

    struct Offline;
    impl ScoreSink for Offline {
        fn submit(&mut self, _record: &ScoreRecord) -> Result<(), PersistError> {
            Err(PersistError::Rejected("503".into()))
        }
    }

    let mut s = GameSession::with_defaults(Some(9));
    s.start();
    while !s.is_ended() {
        s.tick();
    }
    let summary = s.final_summary();
    assert!(s.submit_score(&mut Offline, 5).is_err());
    assert_eq!(s.final_summary(), summary);

    let mut stored: Vec<ScoreRecord> = Vec::new();
    s.submit_score(&mut stored, 5).expect("memory sink accepts");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].user_id, 5);
    assert_eq!(stored[0].seed, Some(9));
    assert_eq!(stored[0].score, 0);
}

#[test]
fn pending_pick_is_released_at_expiry() {
    let settings = GameSettings {
        initial_time_secs: 3,
        ..GameSettings::default()
    };
    let mut s = GameSession::new(Catalog::default(), settings, Some(8)).unwrap();
    s.start();
    let first = s.deck().unwrap().tiles()[0].id;
    s.select(first);
    assert_eq!(s.pending_pick(), Some(first));

    for _ in 0..3 {
        s.tick();
    }
    assert!(s.is_ended());
    assert_eq!(s.pending_pick(), None);
    let deck = s.deck().unwrap();
    assert!(deck.get(first).unwrap().is_hidden());
    assert!(deck.tiles().iter().all(|t| t.is_hidden()));
}
