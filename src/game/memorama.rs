//! Session controller.

use glam::Vec3;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cards::{select_pairs, AssetRef, CardEntity, CardIdentity, PairCatalog, SelectedPair};
use crate::core::{
    encode_history, CardId, ClickOutcome, ClickRecord, GameConfig, GameRng, IgnoreReason, MemoramaError,
    Result,
};
use crate::interaction::{
    Animator, NullAnimator, NullPresenter, PerspectivePicker, Picker, Presenter, ScreenPoint, Viewport,
};
use crate::layout::GridLayout;
use crate::session::{
    Judgement, MatchPhase, MatchStateMachine, PendingEvaluation, SessionEvent, SessionState,
};
use crate::timer::TimerQueue;

/// A model the frontend should load, and where to put it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadRequest {
    pub card: CardId,
    pub identity: CardIdentity,
    pub model: AssetRef,
    pub material: AssetRef,
    pub position: Vec3,
    pub scale: f32,
}

/// The table model drawn behind the grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackgroundRequest {
    pub model: AssetRef,
    pub material: AssetRef,
    pub position: Vec3,
    pub scale: Vec3,
}

/// Builder for creating a `Memorama` session.
pub struct MemoramaBuilder {
    config: GameConfig,
    catalog: PairCatalog,
}

impl Default for MemoramaBuilder {
    fn default() -> Self {
        Self {
            config: GameConfig::default(),
            catalog: PairCatalog::bundled(),
        }
    }
}

impl MemoramaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn catalog(mut self, catalog: PairCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Deal a session with no-op presentation.
    pub fn build(self, seed: u64) -> Result<Memorama> {
        self.build_with(seed, NullAnimator, NullPresenter)
    }

    /// Deal a session that drives the given animator and presenter.
    ///
    /// Fails with `InvalidConfiguration` before anything is laid out if the
    /// configuration cannot be satisfied by the catalog.
    pub fn build_with<A: Animator, P: Presenter>(
        self,
        seed: u64,
        animator: A,
        presenter: P,
    ) -> Result<Memorama<A, P>> {
        self.config.validate(self.catalog.len())?;

        let mut rng = GameRng::new(seed).for_context("deal");
        let dealt = select_pairs(&self.catalog, self.config.total_pairs as usize, &mut rng)?;

        let grid = GridLayout::from_config(&self.config, self.catalog.len());
        let mut requests = Vec::with_capacity(dealt.len() * 2);
        for pair in &dealt {
            for is_counterpart in [false, true] {
                let identity = CardIdentity::new(pair.pair_index, is_counterpart);
                let model = pair.definition.asset(is_counterpart).clone();
                requests.push(LoadRequest {
                    card: CardId::for_card(pair.pair_index, is_counterpart),
                    identity,
                    material: model.material(),
                    model,
                    position: grid.position(identity),
                    scale: self.config.card_scale,
                });
            }
        }
        let request_index = requests
            .iter()
            .enumerate()
            .map(|(i, r)| (r.identity, i))
            .collect();

        info!(
            seed,
            total_pairs = self.config.total_pairs,
            catalog = self.catalog.len(),
            "session dealt"
        );

        Ok(Memorama {
            machine: MatchStateMachine::from_config(&self.config),
            picker: Box::new(PerspectivePicker::from_config(&self.config)),
            state: SessionState::new(self.config.total_pairs),
            timers: TimerQueue::new(),
            grid,
            dealt,
            requests,
            request_index,
            failed: FxHashSet::default(),
            events: Vec::new(),
            history: Vec::new(),
            animator,
            presenter,
            seed,
            config: self.config,
        })
    }
}

/// One play-through: the board, its pacing, and its collaborators.
///
/// Single-threaded and event driven. Model loads, clicks, and clock ticks
/// all come in through `&mut self` calls; nothing blocks.
pub struct Memorama<A = NullAnimator, P = NullPresenter> {
    config: GameConfig,
    grid: GridLayout,
    machine: MatchStateMachine,
    picker: Box<dyn Picker>,
    state: SessionState,
    timers: TimerQueue<PendingEvaluation>,
    dealt: Vec<SelectedPair>,
    requests: Vec<LoadRequest>,
    request_index: FxHashMap<CardIdentity, usize>,
    failed: FxHashSet<CardIdentity>,
    events: Vec<SessionEvent>,
    history: Vec<ClickRecord>,
    animator: A,
    presenter: P,
    seed: u64,
}

impl<A: Animator, P: Presenter> Memorama<A, P> {
    /// Replace the default perspective picker.
    #[must_use]
    pub fn with_picker(mut self, picker: impl Picker + 'static) -> Self {
        self.picker = Box::new(picker);
        self
    }

    // === Accessors ===

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &GridLayout {
        &self.grid
    }

    /// Pairs dealt this session, in pair-index order.
    pub fn dealt(&self) -> &[SelectedPair] {
        &self.dealt
    }

    /// Every model the frontend should load. Order is irrelevant.
    pub fn load_requests(&self) -> &[LoadRequest] {
        &self.requests
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> MatchPhase {
        self.state.phase()
    }

    pub fn is_won(&self) -> bool {
        self.state.is_won()
    }

    /// Current virtual time.
    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    /// Take every event emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn history(&self) -> &[ClickRecord] {
        &self.history
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Cards whose model failed to load.
    pub fn failed(&self) -> impl Iterator<Item = &CardIdentity> {
        self.failed.iter()
    }

    // === Asset loading ===

    /// The background model to load along with the cards.
    pub fn background_request(&self) -> BackgroundRequest {
        let background = &self.config.background;
        let model = AssetRef::new(background.model.clone());
        BackgroundRequest {
            material: model.material(),
            model,
            position: Vec3::from(background.position),
            scale: Vec3::from(background.scale),
        }
    }

    /// A card's model finished loading: place it and make it clickable.
    ///
    /// Loads may complete in any order, and clicks on already placed cards
    /// are valid before the rest of the board has arrived.
    pub fn card_loaded(&mut self, identity: CardIdentity) -> Result<CardId> {
        let position = self.request(identity)?.position;
        let card = CardEntity::new(identity, position);
        let id = card.id;

        if !self.state.place(card) {
            return Err(MemoramaError::DuplicateCard(identity));
        }
        self.failed.remove(&identity);

        debug!(%id, %identity, x = position.x, y = position.y, z = position.z, "card placed");
        self.events.push(SessionEvent::CardPlaced {
            card: id,
            identity,
            position,
        });
        Ok(id)
    }

    /// A card's model failed to load.
    ///
    /// The card is never placed and never clickable. The rest of the board
    /// is unaffected. A later successful `card_loaded` still places it.
    pub fn card_load_failed(&mut self, identity: CardIdentity, reason: impl Into<String>) -> Result<()> {
        let position = self.request(identity)?.position;
        if self.state.card(CardId::for_card(identity.pair_index, identity.is_counterpart)).is_some() {
            return Err(MemoramaError::DuplicateCard(identity));
        }

        let reason = reason.into();
        warn!(%identity, %reason, "card model failed to load");
        self.presenter.show_placeholder(identity, position, &reason);
        self.failed.insert(identity);
        self.events.push(SessionEvent::CardLoadFailed { identity, reason });
        Ok(())
    }

    /// Place every card that has not been placed or failed yet.
    ///
    /// For headless play where no real loader exists.
    pub fn place_all(&mut self) -> Vec<CardId> {
        let waiting: Vec<_> = self
            .requests
            .iter()
            .filter(|r| self.state.card(r.card).is_none() && !self.failed.contains(&r.identity))
            .map(|r| r.identity)
            .collect();

        waiting
            .into_iter()
            .filter_map(|identity| self.card_loaded(identity).ok())
            .collect()
    }

    fn request(&self, identity: CardIdentity) -> Result<&LoadRequest> {
        self.request_index
            .get(&identity)
            .and_then(|&i| self.requests.get(i))
            .ok_or(MemoramaError::UnknownCard(identity))
    }

    // === Input ===

    /// Pointer clicked at `point` on a surface of size `viewport`.
    pub fn click_at(&mut self, point: ScreenPoint, viewport: Viewport) -> ClickOutcome {
        match self.picker.pick(point, viewport, &self.state) {
            Some(card) => self.click_card(card),
            None => {
                let outcome = ClickOutcome::Ignored(IgnoreReason::NoCardHit);
                self.history.push(ClickRecord::new(self.now_ms(), None, outcome));
                outcome
            }
        }
    }

    /// A click already resolved to a card.
    pub fn click_card(&mut self, card: CardId) -> ClickOutcome {
        let outcome = self
            .machine
            .click(&mut self.state, card, &mut self.timers, &mut self.animator);
        self.history.push(ClickRecord::new(self.now_ms(), Some(card), outcome));

        match outcome {
            ClickOutcome::FirstFlipped(card) => {
                self.events.push(SessionEvent::CardFlipped { card, face_up: true });
            }
            ClickOutcome::SecondFlipped(card) => {
                self.events.push(SessionEvent::CardFlipped { card, face_up: true });
                if let [first, second] = *self.state.pending() {
                    self.events.push(SessionEvent::EvaluationScheduled {
                        first,
                        second,
                        due_ms: self.now_ms().saturating_add(self.machine.reveal_delay_ms()),
                    });
                }
            }
            ClickOutcome::Ignored(reason) => {
                debug!(%card, ?reason, "click ignored");
            }
        }
        outcome
    }

    // === Time ===

    /// Advance the virtual clock and judge every round now due.
    pub fn advance(&mut self, delta_ms: u64) -> Vec<Judgement> {
        let fired = self.timers.advance(delta_ms);
        let mut judgements = Vec::with_capacity(fired.len());

        for (_, pending) in fired {
            let Some(judgement) = self.machine.evaluate(&mut self.state, &mut self.animator) else {
                debug!(?pending, "timer fired with no round to judge");
                continue;
            };
            self.emit_judgement(judgement);
            judgements.push(judgement);
        }
        judgements
    }

    /// Advance until no judgment is outstanding.
    pub fn settle(&mut self) -> Vec<Judgement> {
        let mut judgements = Vec::new();
        while let Some(due) = self.timers.next_due_ms() {
            let delta = due.saturating_sub(self.now_ms());
            judgements.extend(self.advance(delta));
        }
        judgements
    }

    fn emit_judgement(&mut self, judgement: Judgement) {
        match judgement {
            Judgement::Matched { pair_index, won, .. } => {
                let pairs_found = self.state.pairs_found();
                self.events.push(SessionEvent::PairMatched {
                    pair_index,
                    pairs_found,
                });
                if won {
                    info!(pairs_found, elapsed_ms = self.now_ms(), "all pairs found");
                    self.presenter.announce_win(pairs_found);
                    self.events.push(SessionEvent::Won { pairs_found });
                }
            }
            Judgement::Mismatched { cards: [first, second] } => {
                for card in [first, second] {
                    self.events.push(SessionEvent::CardFlipped { card, face_up: false });
                }
                self.events.push(SessionEvent::PairMismatched { first, second });
            }
        }
    }

    // === History ===

    /// Encode the click history; decode with [`crate::core::decode_history`].
    pub fn encode_history(&self) -> Result<Vec<u8>> {
        encode_history(&self.history)
    }

    /// Re-issue recorded clicks at their recorded times.
    ///
    /// Cards must already be placed. Replaying the history of a session
    /// into a fresh session with the same seed reproduces it exactly.
    pub fn replay(&mut self, records: &[ClickRecord]) -> Vec<ClickOutcome> {
        let mut outcomes = Vec::with_capacity(records.len());
        for record in records {
            if record.at_ms > self.now_ms() {
                self.advance(record.at_ms - self.now_ms());
            }
            let outcome = match record.card {
                Some(card) => self.click_card(card),
                None => {
                    let outcome = ClickOutcome::Ignored(IgnoreReason::NoCardHit);
                    self.history.push(ClickRecord::new(self.now_ms(), None, outcome));
                    outcome
                }
            };
            outcomes.push(outcome);
        }
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::PairDefinition;

    #[test]
    fn test_build_default() {
        let game = MemoramaBuilder::new().build(42).unwrap();
        assert_eq!(game.dealt().len(), 6);
        assert_eq!(game.load_requests().len(), 12);
        assert_eq!(game.state().placed_count(), 0);
        assert_eq!(game.phase(), MatchPhase::Idle);
    }

    #[test]
    fn test_build_rejects_oversized_deal() {
        let result = MemoramaBuilder::new()
            .config(GameConfig::default().with_total_pairs(7))
            .build(1);
        assert!(matches!(result, Err(MemoramaError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_load_requests_follow_layout() {
        let game = MemoramaBuilder::new().build(3).unwrap();
        for request in game.load_requests() {
            assert_eq!(request.position, game.grid().position(request.identity));
            assert_eq!(request.scale, 1.5);
            assert!(request.model.path().ends_with(".obj"));
            assert!(request.material.path().ends_with(".mtl"));
            let expected = if request.identity.is_counterpart { "B.obj" } else { "A.obj" };
            assert!(request.model.path().ends_with(expected));
        }
    }

    #[test]
    fn test_load_requests_use_dealt_pairs() {
        let game = MemoramaBuilder::new().build(8).unwrap();
        for request in game.load_requests() {
            let pair = &game.dealt()[request.identity.pair_index as usize];
            assert_eq!(&request.model, pair.definition.asset(request.identity.is_counterpart));
        }
    }

    #[test]
    fn test_card_loaded_errors() {
        let mut game = MemoramaBuilder::new()
            .config(GameConfig::default().with_total_pairs(2))
            .build(5)
            .unwrap();

        assert!(matches!(
            game.card_loaded(CardIdentity::primary(5)),
            Err(MemoramaError::UnknownCard(_))
        ));

        game.card_loaded(CardIdentity::primary(1)).unwrap();
        assert!(matches!(
            game.card_loaded(CardIdentity::primary(1)),
            Err(MemoramaError::DuplicateCard(_))
        ));
    }

    #[test]
    fn test_place_all_skips_failed() {
        let mut game = MemoramaBuilder::new().build(5).unwrap();
        game.card_load_failed(CardIdentity::counterpart(0), "404").unwrap();

        let placed = game.place_all();
        assert_eq!(placed.len(), 11);
        assert!(game.state().card(CardId::for_card(0, true)).is_none());
        assert_eq!(game.failed().count(), 1);
    }

    #[test]
    fn test_custom_catalog() {
        let catalog: PairCatalog = (0..10)
            .map(|i| PairDefinition::new(format!("m{i}a.obj"), format!("m{i}b.obj")))
            .collect();
        let game = MemoramaBuilder::new()
            .catalog(catalog)
            .config(GameConfig::default().with_total_pairs(8).with_columns(4))
            .build(2)
            .unwrap();

        assert_eq!(game.dealt().len(), 8);
        assert_eq!(game.grid().rows(), 3);
    }

    #[test]
    fn test_grid_sized_by_catalog() {
        let catalog: PairCatalog = (1..=9)
            .map(|i| PairDefinition::new(format!("Cards/CARTA{i}A.obj"), format!("Cards/CARTA{i}B.obj")))
            .collect();
        let game = MemoramaBuilder::new().catalog(catalog).build(17).unwrap();

        assert_eq!(game.dealt().len(), 6);
        assert_eq!(game.grid().rows(), 3);
        let first = game
            .load_requests()
            .iter()
            .find(|r| r.identity == CardIdentity::primary(0))
            .unwrap();
        assert_eq!(first.position, Vec3::new(-6.5, 6.5, 0.0));
    }

    #[test]
    fn test_evaluation_due_time_saturates() {
        let mut game = MemoramaBuilder::new()
            .config(GameConfig::default().with_reveal_delay_ms(u64::MAX))
            .build(6)
            .unwrap();
        game.place_all();
        game.advance(10);

        game.click_card(CardId::for_card(0, false));
        game.click_card(CardId::for_card(1, false));

        assert!(game.events().contains(&SessionEvent::EvaluationScheduled {
            first: CardId::for_card(0, false),
            second: CardId::for_card(1, false),
            due_ms: u64::MAX,
        }));
        assert!(game.advance(1000).is_empty());
    }

    #[test]
    fn test_background_request() {
        let game = MemoramaBuilder::new().build(1).unwrap();
        let background = game.background_request();

        assert_eq!(background.model.path(), "tablero.obj");
        assert_eq!(background.material.path(), "tablero.mtl");
        assert_eq!(background.position, Vec3::new(0.0, 0.0, -15.0));
        assert_eq!(background.scale, Vec3::new(2.0, 0.8, 15.0));
    }

    #[test]
    fn test_history_round_trip() {
        let mut game = MemoramaBuilder::new().build(4).unwrap();
        game.place_all();
        game.click_card(CardId(0));
        game.click_card(CardId(0));

        let bytes = game.encode_history().unwrap();
        let decoded = crate::core::decode_history(&bytes).unwrap();
        assert_eq!(decoded, game.history());
    }
}
