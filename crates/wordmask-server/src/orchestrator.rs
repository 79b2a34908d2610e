//! Synchronous rules engine for one room.
//!
//! Every inbound event (player action, timer firing, disconnect) is handled
//! to completion before the next, and produces a list of [`Effect`]s that the
//! room task carries out: frames to send and timers to arm or cancel. Timers
//! carry a token; a firing whose token is no longer current is ignored, so a
//! deadline racing the final submission can never advance a phase twice.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use wordmask_core::content::{ClueDeck, WordBank, clue_deck, word_bank};
use wordmask_core::net::messages::{
    ClientMessage, ClueRoundStartMsg, ClueSubmittedMsg, GameConfiguredMsg, GameResultsMsg,
    GameStartedMsg, GuessStartMsg, HostChangedMsg, MatchStartMsg, PhaseLobbyMsg,
    PlayerJoinedMsg, PlayerLeftMsg, PlayerReconnectedMsg, PlayerRef, PlayerSubmittedMsg,
    RoomJoinedMsg, SelectClueMsg, ServerMessage, TimerStartMsg, WordReveal,
};
use wordmask_core::player::{PlayerId, PlayerSummary, normalize_name};
use wordmask_core::registry::PlayerRegistry;
use wordmask_core::scoring::{Participant, calculate_results};
use wordmask_core::session::{MatchMap, Phase, Session};
use wordmask_core::settings::{MAX_PLAYERS, MIN_PLAYERS, Settings, SettingsPatch};

use crate::config::ServerConfig;
use crate::error::RoomError;

/// Per-room policy taken from the server configuration.
#[derive(Debug, Clone)]
pub struct RoomOptions {
    pub disconnect_grace: Duration,
    /// Pause after each sealed clue slot.
    pub step_reveal_delay: Duration,
    pub reset_scores_on_abort: bool,
    pub reset_scores_on_play_again: bool,
}

impl Default for RoomOptions {
    fn default() -> Self {
        Self {
            disconnect_grace: Duration::from_secs(30),
            step_reveal_delay: Duration::from_millis(3000),
            reset_scores_on_abort: false,
            reset_scores_on_play_again: true,
        }
    }
}

impl RoomOptions {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            disconnect_grace: Duration::from_secs(config.rooms.disconnect_grace_secs),
            step_reveal_delay: Duration::from_millis(config.rooms.step_reveal_delay_ms),
            reset_scores_on_abort: config.scores.reset_on_abort,
            reset_scores_on_play_again: config.scores.reset_on_play_again,
        }
    }
}

/// Work for the room task to carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Send {
        to: PlayerId,
        msg: ServerMessage,
    },
    Broadcast {
        msg: ServerMessage,
        except: Option<PlayerId>,
    },
    /// Arm the room's single phase timer, replacing any previous one.
    StartTimer {
        token: u64,
        after: Duration,
    },
    CancelTimer,
    StartGrace {
        player_id: PlayerId,
        token: u64,
        after: Duration,
    },
    CancelGrace {
        player_id: PlayerId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    ClueDeadline,
    StepReveal,
    GuessDeadline,
    MatchDeadline,
}

#[derive(Debug, Clone, Copy)]
struct ActiveTimer {
    token: u64,
    kind: TimerKind,
}

pub struct Room {
    code: String,
    options: RoomOptions,
    registry: PlayerRegistry,
    session: Session,
    settings: Settings,
    word_bank: WordBank,
    clue_deck: ClueDeck,
    /// Hand dealt to each player for the open clue slot.
    hands: HashMap<PlayerId, Vec<String>>,
    /// `game:results` exactly as broadcast, replayed to reconnecting players.
    last_results: Option<ServerMessage>,
    timer: Option<ActiveTimer>,
    grace: HashMap<PlayerId, u64>,
    next_token: u64,
    rng: StdRng,
    effects: Vec<Effect>,
}

impl Room {
    pub fn new(code: String, options: RoomOptions) -> Self {
        Self::with_rng(code, options, StdRng::from_rng(&mut rand::rng()))
    }

    pub fn with_rng(code: String, options: RoomOptions, rng: StdRng) -> Self {
        let settings = Settings::default();
        let clue_deck = ClueDeck::new(&settings.clue_list);
        Self {
            code,
            options,
            registry: PlayerRegistry::new(),
            session: Session::new(),
            settings,
            word_bank: WordBank::new(),
            clue_deck,
            hands: HashMap::new(),
            last_results: None,
            timer: None,
            grace: HashMap::new(),
            next_token: 0,
            rng,
            effects: Vec::new(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn registry(&self) -> &PlayerRegistry {
        &self.registry
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Connected players.
    pub fn player_count(&self) -> usize {
        self.registry.count()
    }

    /// True once no player remains, connected or held for reconnection.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    // ------------------------------------------------------------------
    // Membership
    // ------------------------------------------------------------------

    /// Admit a player. A name matching a player who is disconnected but still
    /// within the grace period is treated as a reconnection, in any phase.
    pub fn join(&mut self, player_id: &str, name: &str, as_host: bool) -> Result<(), RoomError> {
        let name = normalize_name(name).ok_or(RoomError::InvalidName)?;
        if !as_host
            && let Some(old_id) = self
                .registry
                .find_disconnected_by_name(&name)
                .map(|p| p.id.clone())
        {
            self.reconnect(&old_id, player_id);
            return Ok(());
        }
        if self.session.phase() != Phase::Lobby {
            return Err(RoomError::GameInProgress);
        }
        if self.registry.all_including_disconnected().len() >= MAX_PLAYERS {
            return Err(RoomError::RoomFull);
        }
        let summary = PlayerSummary::from(self.registry.add(
            player_id.to_string(),
            &name,
            as_host,
        )?);
        tracing::info!(player_id, room = %self.code, name = %summary.name, "Player joined");

        let joined = self.room_joined(player_id);
        self.send(player_id, joined);
        self.broadcast_except(
            player_id,
            ServerMessage::PlayerJoined(PlayerJoinedMsg { player: summary }),
        );
        self.ensure_host();
        Ok(())
    }

    /// Explicit reconnection by display name.
    pub fn rejoin(&mut self, player_id: &str, name: &str) -> Result<(), RoomError> {
        let old_id = self
            .registry
            .find_disconnected_by_name(name)
            .map(|p| p.id.clone())
            .ok_or(RoomError::NoPlayerToRejoin)?;
        self.reconnect(&old_id, player_id);
        Ok(())
    }

    fn reconnect(&mut self, old_id: &str, new_id: &str) {
        if self.grace.remove(old_id).is_some() {
            self.effects.push(Effect::CancelGrace {
                player_id: old_id.to_string(),
            });
        }
        let Some(player) = self.registry.migrate_id(old_id, new_id) else {
            return;
        };
        let player_name = player.display_name.clone();
        self.session.migrate_player_id(old_id, new_id);
        if let Some(hand) = self.hands.remove(old_id) {
            self.hands.insert(new_id.to_string(), hand);
        }
        tracing::info!(
            player_id = new_id,
            old_player_id = old_id,
            room = %self.code,
            phase = %self.session.phase(),
            "Player reconnected"
        );

        self.ensure_host();
        self.send_snapshot(new_id);
        self.broadcast_except(
            new_id,
            ServerMessage::PlayerReconnected(PlayerReconnectedMsg {
                old_player_id: old_id.to_string(),
                player_id: new_id.to_string(),
                player_name,
            }),
        );
    }

    /// Voluntary departure: the player is removed at once.
    pub fn leave(&mut self, player_id: &str) {
        if self.registry.get(player_id).is_none() {
            return;
        }
        if self.grace.remove(player_id).is_some() {
            self.effects.push(Effect::CancelGrace {
                player_id: player_id.to_string(),
            });
        }
        self.send(player_id, ServerMessage::RoomLeft);
        tracing::info!(player_id, room = %self.code, "Player left");
        self.remove_player(player_id);
    }

    /// The connection dropped. The player stops counting toward submissions
    /// immediately and is removed only if the grace period runs out.
    pub fn disconnect(&mut self, player_id: &str) {
        let was_host = self.registry.is_host(player_id);
        if !self.registry.get(player_id).is_some_and(|p| p.connected) {
            return;
        }
        self.registry.mark_disconnected(player_id);
        tracing::info!(
            player_id,
            room = %self.code,
            phase = %self.session.phase(),
            "Player disconnected, holding slot"
        );

        if was_host && let Some(host_id) = self.registry.promote_new_host() {
            self.broadcast(ServerMessage::HostChanged(HostChangedMsg { host_id }));
        }

        let token = self.next_token();
        self.grace.insert(player_id.to_string(), token);
        self.effects.push(Effect::StartGrace {
            player_id: player_id.to_string(),
            token,
            after: self.options.disconnect_grace,
        });

        self.check_phase_advance();
    }

    pub fn grace_expired(&mut self, player_id: &str, token: u64) {
        if self.grace.get(player_id) != Some(&token) {
            tracing::debug!(player_id, room = %self.code, "Ignoring stale grace timer");
            return;
        }
        self.grace.remove(player_id);
        tracing::info!(player_id, room = %self.code, "Grace period expired, removing player");
        self.remove_player(player_id);
    }

    fn remove_player(&mut self, player_id: &str) {
        if self.registry.remove(player_id).is_none() {
            return;
        }
        self.hands.remove(player_id);
        let new_host_id = if self.registry.host_id().is_none() {
            self.registry.promote_new_host()
        } else {
            None
        };
        self.broadcast_except(
            player_id,
            ServerMessage::PlayerLeft(PlayerLeftMsg {
                player_id: player_id.to_string(),
                new_host_id,
            }),
        );
        self.check_phase_advance();
    }

    /// Give the host title to someone if nobody connected holds it.
    fn ensure_host(&mut self) {
        if self.registry.host_id().is_none()
            && let Some(host_id) = self.registry.promote_new_host()
        {
            self.broadcast(ServerMessage::HostChanged(HostChangedMsg { host_id }));
        }
    }

    // ------------------------------------------------------------------
    // Player actions
    // ------------------------------------------------------------------

    /// Route an in-room action. Actions that are illegal for the phase, come
    /// from a non-host, or repeat an earlier submission are dropped silently.
    pub fn handle_action(&mut self, player_id: &str, msg: ClientMessage) {
        if !self.registry.get(player_id).is_some_and(|p| p.connected) {
            tracing::debug!(player_id, room = %self.code, "Action from unknown player");
            return;
        }
        match msg {
            ClientMessage::Configure(patch) => self.configure(player_id, &patch),
            ClientMessage::StartGame => self.start_game(player_id),
            ClientMessage::SelectClue(m) => self.select_clue(player_id, m),
            ClientMessage::SubmitGuess(m) => self.submit_guess(player_id, &m.word),
            ClientMessage::SubmitMatches(m) => self.submit_matches(player_id, m.matches),
            ClientMessage::PlayAgain => self.play_again(player_id),
            ClientMessage::Abort => self.abort(player_id),
            other => {
                tracing::debug!(
                    player_id,
                    room = %self.code,
                    event = other.event_name(),
                    "Not a room action"
                );
            },
        }
    }

    fn configure(&mut self, player_id: &str, patch: &SettingsPatch) {
        if !self.registry.is_host(player_id) || self.session.phase() != Phase::Lobby {
            tracing::debug!(player_id, room = %self.code, "Dropped game:configure");
            return;
        }
        self.settings.apply(patch);
        self.clue_deck.set_list(&self.settings.clue_list);
        self.broadcast(ServerMessage::GameConfigured(GameConfiguredMsg {
            settings: self.settings.clone(),
        }));
    }

    fn start_game(&mut self, player_id: &str) {
        if !self.registry.is_host(player_id) || self.session.phase() != Phase::Lobby {
            tracing::debug!(player_id, room = %self.code, "Dropped game:start");
            return;
        }
        let players = self.registry.connected_ids();
        if players.len() < MIN_PLAYERS {
            tracing::debug!(
                room = %self.code,
                players = players.len(),
                "Not enough players to start"
            );
            return;
        }

        let needed = players.len() + usize::from(self.settings.decoy_count);
        let Some(words) = self
            .word_bank
            .pick_words(&self.settings.theme, needed, &mut self.rng)
        else {
            tracing::warn!(
                room = %self.code,
                theme = %self.settings.theme,
                needed,
                "Theme has too few words for this game"
            );
            return;
        };
        let (hidden, decoys) = words.split_at(players.len());
        let assignments = players.iter().cloned().zip(hidden.iter().cloned()).collect();
        let mut order = players.clone();
        order.shuffle(&mut self.rng);

        self.session.init_game(assignments, order, decoys.to_vec());
        self.last_results = None;
        if !self.transition(Phase::Clue) {
            return;
        }
        tracing::info!(room = %self.code, players = players.len(), "Game started");
        self.broadcast(ServerMessage::GameStarted(GameStartedMsg { phase: Phase::Clue }));
        self.start_clue_step();
    }

    /// The card index is advisory: any card in the player's hand is accepted.
    fn select_clue(&mut self, player_id: &str, msg: SelectClueMsg) {
        if self.session.phase() != Phase::Clue || self.in_step_reveal() {
            tracing::debug!(player_id, room = %self.code, "Dropped stray clue");
            return;
        }
        if !self.session.is_participant(player_id) {
            return;
        }
        let in_hand = self
            .hands
            .get(player_id)
            .is_some_and(|hand| hand.contains(&msg.clue));
        if !in_hand {
            tracing::debug!(
                player_id,
                room = %self.code,
                card_index = ?msg.card_index,
                "Clue is not in the player's hand"
            );
            return;
        }
        if !self
            .session
            .submit_clue(player_id, &msg.clue, Instant::now())
        {
            tracing::debug!(player_id, room = %self.code, "Repeated clue ignored");
            return;
        }

        let connected = self.connected_participants();
        self.broadcast(ServerMessage::ClueSubmitted(ClueSubmittedMsg {
            clue: msg.clue,
            count: self.session.current_clue_count(),
            total: connected.len(),
        }));
        if self.session.all_clues_in(&connected) {
            self.finish_clue_step();
        }
    }

    fn submit_guess(&mut self, player_id: &str, word: &str) {
        if self.session.phase() != Phase::Guessing || !self.session.is_participant(player_id) {
            tracing::debug!(player_id, room = %self.code, "Dropped stray guess");
            return;
        }
        let is_option = self.session.hidden_word(player_id) == Some(word)
            || self.session.decoys().iter().any(|d| d == word);
        if !is_option {
            tracing::debug!(player_id, room = %self.code, "Guess is not one of the options");
            return;
        }
        if !self.session.submit_guess(player_id, word, Instant::now()) {
            tracing::debug!(player_id, room = %self.code, "Repeated guess ignored");
            return;
        }
        self.broadcast(ServerMessage::GuessPlayerSubmitted(PlayerSubmittedMsg {
            player_id: player_id.to_string(),
        }));
        if self.session.all_guesses_in(&self.connected_participants()) {
            self.finish_guessing();
        }
    }

    fn submit_matches(&mut self, player_id: &str, raw: MatchMap) {
        if self.session.phase() != Phase::Matching || !self.session.is_participant(player_id) {
            tracing::debug!(player_id, room = %self.code, "Dropped stray match set");
            return;
        }
        let Some(matches) = self.sanitize_matches(player_id, raw) else {
            tracing::debug!(player_id, room = %self.code, "Dropped duplicate accusations");
            return;
        };
        if !self
            .session
            .submit_matches(player_id, matches, Instant::now())
        {
            tracing::debug!(player_id, room = %self.code, "Repeated match set ignored");
            return;
        }
        self.broadcast(ServerMessage::MatchPlayerSubmitted(PlayerSubmittedMsg {
            player_id: player_id.to_string(),
        }));
        if self.session.all_matches_in(&self.connected_participants()) {
            self.finish_matching();
        }
    }

    /// Keep only accusations about other participants' words that name
    /// another participant. `None` when duplicates are not allowed and an
    /// accused player appears twice.
    fn sanitize_matches(&self, player_id: &str, raw: MatchMap) -> Option<MatchMap> {
        let own_word = self.session.hidden_word(player_id);
        let kept: MatchMap = raw
            .into_iter()
            .filter(|(word, accused)| {
                Some(word.as_str()) != own_word
                    && self.session.hidden_words().values().any(|w| w == word)
                    && accused != player_id
                    && self.session.is_participant(accused)
            })
            .collect();
        if !self.settings.allow_duplicate_matches {
            let mut seen = HashSet::new();
            if !kept.values().all(|accused| seen.insert(accused)) {
                return None;
            }
        }
        Some(kept)
    }

    fn play_again(&mut self, player_id: &str) {
        if !self.registry.is_host(player_id) || self.session.phase() != Phase::Results {
            tracing::debug!(player_id, room = %self.code, "Dropped game:playAgain");
            return;
        }
        if !self.transition(Phase::Lobby) {
            return;
        }
        self.reset_round_data();
        if self.options.reset_scores_on_play_again {
            self.session.reset_scores();
        }
        tracing::info!(room = %self.code, "Back to lobby for another game");
        self.broadcast_lobby();
    }

    fn abort(&mut self, player_id: &str) {
        if !self.registry.is_host(player_id) || !self.session.phase().is_mid_game() {
            tracing::debug!(player_id, room = %self.code, "Dropped game:abort");
            return;
        }
        self.cancel_timer();
        self.reset_round_data();
        if self.options.reset_scores_on_abort {
            self.session.reset_scores();
        }
        tracing::info!(room = %self.code, "Game aborted by host");
        self.broadcast_lobby();
    }

    fn reset_round_data(&mut self) {
        self.session.reset_for_new_game();
        self.word_bank.reset();
        self.clue_deck.reset_round();
        self.hands.clear();
        self.last_results = None;
    }

    // ------------------------------------------------------------------
    // Phase progression
    // ------------------------------------------------------------------

    fn start_clue_step(&mut self) {
        self.session.start_clue_step(Instant::now());
        self.clue_deck.start_step();
        self.hands.clear();
        let timer = self.settings.clue_timer;
        for id in self.connected_participants() {
            let msg = self.clue_round_start_for(&id, timer);
            self.send(&id, msg);
        }
        if timer > 0 {
            self.start_phase_timer(TimerKind::ClueDeadline, timer);
        }
    }

    fn finish_clue_step(&mut self) {
        self.cancel_timer();
        let slot = self.session.seal_clue_slot(Instant::now());
        tracing::debug!(
            room = %self.code,
            round = slot.round,
            word_index = slot.word_index,
            "Clue slot sealed"
        );
        if self.options.step_reveal_delay.is_zero() {
            self.after_step_reveal();
        } else {
            self.arm_timer(TimerKind::StepReveal, self.options.step_reveal_delay);
        }
    }

    fn after_step_reveal(&mut self) {
        if self
            .session
            .is_clue_phase_complete(self.settings.clue_rounds)
        {
            self.start_guessing();
        } else {
            self.start_clue_step();
        }
    }

    fn start_guessing(&mut self) {
        if !self.transition(Phase::Guessing) {
            return;
        }
        let timer = self.settings.guess_timer;
        for id in self.connected_participants() {
            let msg = self.guess_start_for(&id, timer);
            self.send(&id, msg);
        }
        if timer > 0 {
            self.start_phase_timer(TimerKind::GuessDeadline, timer);
        }
    }

    fn finish_guessing(&mut self) {
        self.cancel_timer();
        self.start_matching();
    }

    fn start_matching(&mut self) {
        if !self.transition(Phase::Matching) {
            return;
        }
        let timer = self.settings.match_timer;
        for id in self.connected_participants() {
            let msg = self.match_start_for(&id, timer);
            self.send(&id, msg);
        }
        if timer > 0 {
            self.start_phase_timer(TimerKind::MatchDeadline, timer);
        }
    }

    fn finish_matching(&mut self) {
        self.cancel_timer();
        if !self.transition(Phase::Results) {
            return;
        }
        let participants = self.participants();
        let results = calculate_results(&mut self.session, &participants, &self.settings);
        let word_reveal = self
            .session
            .word_order()
            .iter()
            .filter_map(|id| {
                let word = self.session.hidden_word(id)?;
                let player_name = self
                    .registry
                    .display_name(id)
                    .unwrap_or("Unknown")
                    .to_string();
                Some((
                    id.clone(),
                    WordReveal {
                        player_name,
                        word: word.to_string(),
                    },
                ))
            })
            .collect();
        tracing::info!(
            room = %self.code,
            players = participants.len(),
            penalties = results.penalties.len(),
            "Results computed"
        );

        let msg = ServerMessage::GameResults(Box::new(GameResultsMsg {
            results,
            word_reveal,
        }));
        self.last_results = Some(msg.clone());
        self.broadcast(msg);
    }

    /// Re-evaluate completion after the headcount dropped.
    fn check_phase_advance(&mut self) {
        if self.in_step_reveal() {
            return;
        }
        let connected = self.connected_participants();
        if connected.is_empty() {
            return;
        }
        match self.session.phase() {
            Phase::Clue if self.session.all_clues_in(&connected) => self.finish_clue_step(),
            Phase::Guessing if self.session.all_guesses_in(&connected) => self.finish_guessing(),
            Phase::Matching if self.session.all_matches_in(&connected) => self.finish_matching(),
            _ => {},
        }
    }

    pub fn timer_fired(&mut self, token: u64) {
        let Some(active) = self.timer.filter(|t| t.token == token) else {
            tracing::debug!(room = %self.code, token, "Ignoring stale phase timer");
            return;
        };
        self.timer = None;
        let phase = self.session.phase();
        match active.kind {
            TimerKind::ClueDeadline if phase == Phase::Clue => self.finish_clue_step(),
            TimerKind::StepReveal if phase == Phase::Clue => self.after_step_reveal(),
            TimerKind::GuessDeadline if phase == Phase::Guessing => self.finish_guessing(),
            TimerKind::MatchDeadline if phase == Phase::Matching => self.finish_matching(),
            kind => {
                tracing::error!(room = %self.code, ?kind, %phase, "Phase timer outlived its phase");
            },
        }
    }

    fn transition(&mut self, next: Phase) -> bool {
        match self.session.transition_to(next, Instant::now()) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(room = %self.code, error = %e, "Phase transition rejected");
                false
            },
        }
    }

    // ------------------------------------------------------------------
    // Timers
    // ------------------------------------------------------------------

    fn next_token(&mut self) -> u64 {
        self.next_token += 1;
        self.next_token
    }

    fn arm_timer(&mut self, kind: TimerKind, after: Duration) {
        let token = self.next_token();
        self.timer = Some(ActiveTimer { token, kind });
        self.effects.push(Effect::StartTimer { token, after });
    }

    /// Arm a visible countdown and announce it.
    fn start_phase_timer(&mut self, kind: TimerKind, seconds: u16) {
        self.arm_timer(kind, Duration::from_secs(u64::from(seconds)));
        self.broadcast(ServerMessage::TimerStart(TimerStartMsg { seconds }));
    }

    fn cancel_timer(&mut self) {
        if self.timer.take().is_some() {
            self.effects.push(Effect::CancelTimer);
        }
    }

    fn in_step_reveal(&self) -> bool {
        matches!(
            self.timer,
            Some(ActiveTimer {
                kind: TimerKind::StepReveal,
                ..
            })
        )
    }

    // ------------------------------------------------------------------
    // Payloads
    // ------------------------------------------------------------------

    /// Connected players who were dealt a word this game, in registry order.
    fn connected_participants(&self) -> Vec<PlayerId> {
        self.registry
            .all()
            .filter(|p| self.session.is_participant(&p.id))
            .map(|p| p.id.clone())
            .collect()
    }

    /// Every participant still on the roster, connected or not.
    fn participants(&self) -> Vec<Participant> {
        self.registry
            .all_including_disconnected()
            .iter()
            .filter(|p| self.session.is_participant(&p.id))
            .map(|p| Participant {
                id: p.id.clone(),
                name: p.display_name.clone(),
            })
            .collect()
    }

    fn room_joined(&self, player_id: &str) -> ServerMessage {
        ServerMessage::RoomJoined(RoomJoinedMsg {
            room_code: self.code.clone(),
            player_id: player_id.to_string(),
            players: self.registry.summaries(),
            host_id: self.registry.host_id(),
            settings: self.settings.clone(),
            phase: self.session.phase(),
            themes: word_bank::themes().into_iter().map(String::from).collect(),
            clue_lists: clue_deck::lists().into_iter().map(String::from).collect(),
        })
    }

    fn clue_round_start_for(&mut self, player_id: &str, timer: u16) -> ServerMessage {
        let target = self.session.current_target().cloned();
        let is_your_word = target.as_deref() == Some(player_id);
        let word = if is_your_word {
            None
        } else {
            target
                .as_deref()
                .and_then(|t| self.session.hidden_word(t))
                .map(str::to_string)
        };
        let hand = match self.hands.get(player_id) {
            Some(hand) => hand.clone(),
            None => {
                let hand = self
                    .clue_deck
                    .draw(usize::from(self.settings.hand_size), &mut self.rng);
                self.hands.insert(player_id.to_string(), hand.clone());
                hand
            },
        };
        ServerMessage::ClueRoundStart(ClueRoundStartMsg {
            word_slot: self.session.word_index(),
            total_slots: self.session.word_order().len(),
            round_num: self.session.round() + 1,
            total_rounds: self.settings.clue_rounds,
            word,
            hand,
            is_your_word,
            timer,
        })
    }

    fn guess_start_for(&mut self, player_id: &str, timer: u16) -> ServerMessage {
        let mut options: Vec<String> = self
            .session
            .hidden_word(player_id)
            .into_iter()
            .chain(self.session.decoys().iter().map(String::as_str))
            .map(str::to_string)
            .collect();
        options.shuffle(&mut self.rng);
        let clues = self.session.clues_for_player(player_id);
        ServerMessage::GuessStart(GuessStartMsg {
            options,
            clues_for_you: clues.clues,
            blind_clues: clues.blind_clues,
            timer,
        })
    }

    fn match_start_for(&mut self, player_id: &str, timer: u16) -> ServerMessage {
        let mut hidden_words: Vec<String> = self
            .session
            .word_order()
            .iter()
            .filter(|id| id.as_str() != player_id)
            .filter_map(|id| self.session.hidden_word(id))
            .map(str::to_string)
            .collect();
        hidden_words.shuffle(&mut self.rng);

        let own_word = self.session.hidden_word(player_id).map(str::to_string);
        let guessed_word = self.session.guess(player_id).map(str::to_string);
        let guess_correct = guessed_word.is_some() && guessed_word == own_word;
        let registry = &self.registry;
        let revealed_clues = self
            .session
            .revealed_clues(|id| registry.display_name(id).map(str::to_string));
        let players = self
            .participants()
            .into_iter()
            .map(|p| PlayerRef {
                id: p.id,
                name: p.name,
            })
            .collect();

        ServerMessage::MatchStart(MatchStartMsg {
            hidden_words,
            players,
            revealed_clues,
            allow_duplicate_matches: self.settings.allow_duplicate_matches,
            timer,
            guessed_word,
            guess_correct,
            own_word,
        })
    }

    /// Replay the current state to a reconnecting player. Countdowns are
    /// not resent.
    fn send_snapshot(&mut self, player_id: &str) {
        let joined = self.room_joined(player_id);
        self.send(player_id, joined);
        let participant = self.session.is_participant(player_id);
        let msg = match self.session.phase() {
            Phase::Lobby => None,
            Phase::Clue if participant && !self.in_step_reveal() => {
                Some(self.clue_round_start_for(player_id, 0))
            },
            Phase::Guessing if participant => Some(self.guess_start_for(player_id, 0)),
            Phase::Matching if participant => Some(self.match_start_for(player_id, 0)),
            Phase::Results => self.last_results.clone(),
            _ => None,
        };
        if let Some(msg) = msg {
            self.send(player_id, msg);
        }
    }

    fn broadcast_lobby(&mut self) {
        self.broadcast(ServerMessage::PhaseLobby(PhaseLobbyMsg {
            players: self.registry.summaries(),
            settings: self.settings.clone(),
        }));
    }

    fn send(&mut self, to: &str, msg: ServerMessage) {
        self.effects.push(Effect::Send {
            to: to.to_string(),
            msg,
        });
    }

    fn broadcast(&mut self, msg: ServerMessage) {
        self.effects.push(Effect::Broadcast { msg, except: None });
    }

    fn broadcast_except(&mut self, except: &str, msg: ServerMessage) {
        self.effects.push(Effect::Broadcast {
            msg,
            except: Some(except.to_string()),
        });
    }
}
