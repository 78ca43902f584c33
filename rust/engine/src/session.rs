use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::clock::{ClockTick, SessionClock};
use crate::combo::ComboTracker;
use crate::deck::{CardSetGenerator, Deck};
use crate::errors::{GameError, PersistError};
use crate::logger::{ScoreRecord, ScoreSink};
use crate::progression::LevelProgressor;
use crate::rules::{self, Feedback};
use crate::settings::GameSettings;
use crate::state::{FinalSummary, Phase, SessionEvent, SessionState, Step};
use crate::tile::{TileId, TileState};

/// One play-through: deck, clock, score and the selection state machine.
///
/// The session is driven by three calls delivered serially by the host:
/// [`start`](GameSession::start), [`select`](GameSession::select) and
/// [`tick`](GameSession::tick). Inputs that do not fit the current phase are
/// ignored rather than reported as errors.
///
/// # Examples
///
/// ```
/// use organpair_engine::session::GameSession;
/// use organpair_engine::state::Phase;
///
/// let mut session = GameSession::with_defaults(Some(7));
/// session.start();
///
/// // pick a tile and its partner
/// let deck = session.deck().expect("deck after start");
/// let first = deck.tiles()[0].id;
/// let second = deck.counterpart(first).expect("partner").id;
/// session.select(first);
/// let step = session.select(second);
/// assert_eq!(step.state.combo, 1);
///
/// // run the clock out
/// while session.phase() != Phase::Ended {
///     session.tick();
/// }
/// assert!(session.final_summary().is_some());
/// ```
#[derive(Debug)]
pub struct GameSession {
    catalog: Catalog,
    settings: GameSettings,
    generator: CardSetGenerator,
    deck: Option<Deck>,
    clock: SessionClock,
    combo: ComboTracker,
    progressor: LevelProgressor,
    score: i64,
    total_matches: u32,
    phase: Phase,
    first_pick: Option<TileId>,
    summary: Option<FinalSummary>,
}

impl GameSession {
    /// Create a session that has not started yet. Without a seed the deck
    /// generator is seeded from the OS random source.
    pub fn new(
        catalog: Catalog,
        settings: GameSettings,
        seed: Option<u64>,
    ) -> Result<Self, GameError> {
        settings.validate()?;
        Ok(Self::build(catalog, settings, seed))
    }

    /// Session over the built-in catalog with default rules.
    pub fn with_defaults(seed: Option<u64>) -> Self {
        Self::build(Catalog::default(), GameSettings::default(), seed)
    }

    fn build(catalog: Catalog, settings: GameSettings, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        let generator =
            CardSetGenerator::new_with_seed(seed).with_max_extra_pairs(settings.max_extra_pairs);
        Self {
            clock: SessionClock::new(settings.initial_time_secs),
            progressor: LevelProgressor::new(settings.level_complete_bonus_secs),
            catalog,
            settings,
            generator,
            deck: None,
            combo: ComboTracker::new(),
            score: 0,
            total_matches: 0,
            phase: Phase::NotStarted,
            first_pick: None,
            summary: None,
        }
    }

    pub fn seed(&self) -> u64 {
        self.generator.seed()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn deck(&self) -> Option<&Deck> {
        self.deck.as_ref()
    }

    /// The tile waiting for a partner, if any.
    pub fn pending_pick(&self) -> Option<TileId> {
        self.first_pick
    }

    pub fn final_summary(&self) -> Option<FinalSummary> {
        self.summary
    }

    pub fn is_ended(&self) -> bool {
        self.phase == Phase::Ended
    }

    pub fn state(&self) -> SessionState {
        let (matched_pairs, pairs_in_level) = self
            .deck
            .as_ref()
            .map(|d| (d.matched_pairs() as u32, d.pair_count() as u32))
            .unwrap_or((0, 0));
        SessionState {
            score: self.score,
            combo: self.combo.current(),
            max_combo: self.combo.max_reached(),
            level: self.progressor.level(),
            time_remaining_secs: self.clock.remaining(),
            total_matches_made: self.total_matches,
            matched_pairs,
            pairs_in_level,
            phase: self.phase,
        }
    }

    pub fn start(&mut self) -> Step {
        let mut events = Vec::new();
        if self.phase != Phase::NotStarted {
            debug!(phase = ?self.phase, "start ignored");
            return self.step(events);
        }

        self.score = 0;
        self.total_matches = 0;
        self.combo = ComboTracker::new();
        self.progressor.reset();
        self.clock = SessionClock::new(self.settings.initial_time_secs);
        self.first_pick = None;

        let deck = self.generator.generate(&self.catalog, 1);
        let pairs = deck.pair_count() as u32;
        self.deck = Some(deck);
        self.phase = Phase::AwaitingFirstPick;

        info!(
            seed = self.generator.seed(),
            pairs,
            time = self.clock.remaining(),
            "session started"
        );
        events.push(SessionEvent::Started { level: 1, pairs });
        self.step(events)
    }

    pub fn select(&mut self, id: TileId) -> Step {
        let mut events = Vec::new();
        if !self.phase.accepts_picks() {
            debug!(tile = %id, phase = ?self.phase, "pick ignored");
            return self.step(events);
        }
        let Some(deck) = self.deck.as_mut() else {
            return self.step(events);
        };
        match deck.get(id) {
            Some(tile) if tile.is_hidden() => {}
            _ => {
                debug!(tile = %id, "pick ignored: unknown or not hidden");
                return self.step(events);
            }
        }

        deck.set_state(id, TileState::Selected);
        events.push(SessionEvent::TileSelected(id));

        match self.first_pick.take() {
            None => {
                self.first_pick = Some(id);
                self.phase = Phase::AwaitingSecondPick;
            }
            Some(first) => {
                self.phase = Phase::Evaluating;
                self.evaluate(first, id, &mut events);
            }
        }
        self.step(events)
    }

    pub fn tick(&mut self) -> Step {
        let mut events = Vec::new();
        if matches!(self.phase, Phase::NotStarted | Phase::Ended) {
            return self.step(events);
        }
        if let ClockTick::Expired = self.clock.tick() {
            self.finish(&mut events);
        }
        self.step(events)
    }

    /// Build the record for score persistence. `None` until the session ended.
    pub fn score_record(&self, user_id: u64) -> Option<ScoreRecord> {
        self.summary
            .map(|s| ScoreRecord::from_summary(&s, user_id, Some(self.seed())))
    }

    /// Hand the final result to `sink`. The session itself is never modified,
    /// so a failing sink leaves the finalized state intact.
    pub fn submit_score(&self, sink: &mut dyn ScoreSink, user_id: u64) -> Result<(), PersistError> {
        let record = self
            .score_record(user_id)
            .ok_or(PersistError::SessionNotFinished)?;
        sink.submit(&record)
    }

    fn evaluate(&mut self, first: TileId, second: TileId, events: &mut Vec<SessionEvent>) {
        let Some(deck) = self.deck.as_mut() else {
            self.phase = Phase::AwaitingFirstPick;
            return;
        };
        let (a, b) = match (deck.get(first), deck.get(second)) {
            (Some(a), Some(b)) => (a.clone(), b.clone()),
            _ => {
                self.phase = Phase::AwaitingFirstPick;
                return;
            }
        };

        let cleared = if rules::is_match(&a, &b) {
            deck.set_state(first, TileState::Matched);
            deck.set_state(second, TileState::Matched);
            let combo = self.combo.record_match();
            let points = rules::match_points(self.clock.remaining(), combo, &self.settings);
            self.score += points.total;
            self.total_matches += 1;
            debug!(pair = %a.pair_key, combo, delta = points.total, score = self.score, "match");
            events.push(SessionEvent::Matched {
                pair: a.pair_key,
                points,
                feedback: Feedback::gain(points.total),
            });
            self.progressor.is_complete(deck)
        } else {
            deck.set_state(first, TileState::Hidden);
            deck.set_state(second, TileState::Hidden);
            self.combo.reset();
            let delta = rules::mismatch_penalty(&self.settings);
            self.score += delta;
            debug!(first = %first, second = %second, delta, score = self.score, "mismatch");
            events.push(SessionEvent::Mismatched {
                first,
                second,
                feedback: Feedback::loss(delta),
            });
            false
        };

        self.phase = Phase::AwaitingFirstPick;
        if cleared {
            self.advance_level(events);
        }
    }

    fn advance_level(&mut self, events: &mut Vec<SessionEvent>) {
        self.phase = Phase::LevelTransition;
        let next = self.progressor.advance();
        let deck = self.generator.generate(&self.catalog, next.level);
        let pairs = deck.pair_count() as u32;
        self.deck = Some(deck);
        self.first_pick = None;
        self.combo.reset();
        // levels complete inside `select`, which is refused once time is up
        self.clock.add_bonus(next.bonus_secs);
        let bonus_secs = next.bonus_secs;
        info!(
            level = next.level,
            pairs,
            bonus_secs,
            time = self.clock.remaining(),
            score = self.score,
            "level complete"
        );
        events.push(SessionEvent::LevelCompleted {
            level: next.level,
            bonus_secs,
            pairs,
        });
        self.phase = Phase::AwaitingFirstPick;
    }

    fn finish(&mut self, events: &mut Vec<SessionEvent>) {
        self.phase = Phase::Ended;
        // a half-made pair is dropped: the final deck holds no Selected tile
        if let (Some(pending), Some(deck)) = (self.first_pick.take(), self.deck.as_mut()) {
            deck.set_state(pending, TileState::Hidden);
        }
        let summary = FinalSummary {
            score: self.score,
            level: self.progressor.level(),
            total_matches_made: self.total_matches,
            max_combo_reached: self.combo.max_reached(),
        };
        self.summary = Some(summary);
        info!(
            score = summary.score,
            level = summary.level,
            matches = summary.total_matches_made,
            max_combo = summary.max_combo_reached,
            "session ended"
        );
        events.push(SessionEvent::Ended(summary));
    }

    fn step(&self, events: Vec<SessionEvent>) -> Step {
        Step {
            state: self.state(),
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogItem;

    fn session_with(n: usize, seed: u64) -> GameSession {
        let items = (0..n)
            .map(|i| CatalogItem::new(&format!("organ{i}"), &format!("Organ {i}"), "works"))
            .collect();
        GameSession::new(Catalog::new(items).unwrap(), GameSettings::default(), Some(seed)).unwrap()
    }

    #[test]
    fn nothing_happens_before_start() {
        let mut s = session_with(3, 1);
        assert!(s.tick().is_quiet());
        assert!(s.select(TileId(0)).is_quiet());
        assert_eq!(s.state().time_remaining_secs, 75);
        assert_eq!(s.phase(), Phase::NotStarted);
        assert!(s.deck().is_none());
    }

    #[test]
    fn start_is_only_honoured_once() {
        let mut s = session_with(3, 1);
        let step = s.start();
        assert_eq!(step.events, vec![SessionEvent::Started { level: 1, pairs: 3 }]);
        s.tick();
        assert!(s.start().is_quiet());
        assert_eq!(s.state().time_remaining_secs, 74);
    }

    #[test]
    fn reselecting_pending_tile_is_ignored() {
        let mut s = session_with(3, 2);
        s.start();
        let id = s.deck().unwrap().tiles()[0].id;
        s.select(id);
        let step = s.select(id);
        assert!(step.is_quiet());
        assert_eq!(step.state.phase, Phase::AwaitingSecondPick);
        assert_eq!(s.pending_pick(), Some(id));
    }

    #[test]
    fn same_seed_gives_same_decks() {
        let mut a = session_with(5, 99);
        let mut b = session_with(5, 99);
        a.start();
        b.start();
        assert_eq!(a.deck(), b.deck());
        assert_eq!(a.seed(), 99);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let settings = GameSettings {
            initial_time_secs: 0,
            ..GameSettings::default()
        };
        assert!(GameSession::new(Catalog::default(), settings, None).is_err());
    }

    #[test]
    fn submit_before_end_is_refused() {
        let mut s = session_with(3, 4);
        s.start();
        let mut sink: Vec<ScoreRecord> = Vec::new();
        assert!(matches!(
            s.submit_score(&mut sink, 1),
            Err(PersistError::SessionNotFinished)
        ));
        assert!(sink.is_empty());
    }
}
