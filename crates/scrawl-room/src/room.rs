//! Room actor: an isolated Tokio task that owns one game session.
//!
//! Each room runs in its own task, communicating with the outside world
//! through an mpsc channel. All mutations to a room's state happen on
//! that one task — the single-writer discipline that makes the
//! guess-vs-timer race impossible to lose. Timer firings arrive as
//! commands on the same channel, stamped with the [`Generation`] they
//! were scheduled under; a stale stamp makes the firing a no-op.

use std::sync::Arc;
use std::time::Duration;

use scrawl_gateway::Gateway;
use scrawl_protocol::{
    GamePhase, PlayerId, PlayerInfo, RevealedLetter, RoomId, RoomSettings, ScoreEntry,
    ServerEvent, Stroke,
};
use scrawl_timer::{Generation, TimerSet};
use rand::seq::IndexedRandom;
use tokio::sync::{mpsc, oneshot};

use crate::scoring::{self, DRAWER_AWARD, GUESSER_AWARD, Scoreboard};
use crate::words::{self, WordPool};
use crate::RoomError;

/// Pause between a round ending and the next turn starting, so clients
/// can show the reveal.
pub const ROUND_GRACE: Duration = Duration::from_secs(3);

/// Commands sent to a room actor through its channel.
///
/// Join and leave carry reply channels because the registry must know
/// whether they took effect; game actions are fire-and-forget, with
/// rejections delivered to the caller as error events instead.
pub(crate) enum RoomCommand {
    Join {
        player: PlayerId,
        name: String,
        reply: oneshot::Sender<Result<JoinAck, RoomError>>,
    },
    Leave {
        player: PlayerId,
        reply: oneshot::Sender<LeaveOutcome>,
    },
    Start {
        caller: PlayerId,
    },
    SelectWord {
        caller: PlayerId,
        word: String,
    },
    Draw {
        caller: PlayerId,
        stroke: Stroke,
    },
    Chat {
        caller: PlayerId,
        text: String,
    },
    PlayAgain {
        caller: PlayerId,
    },
    Info {
        reply: oneshot::Sender<RoomInfo>,
    },

    // Timer deliveries. Each carries the generation it was scheduled
    // under; the handlers discard stale stamps.
    DrawTimeExpired {
        generation: Generation,
    },
    RevealHint {
        generation: Generation,
    },
    NextTurn {
        generation: Generation,
    },

    Shutdown,
}

/// Reply to a successful join.
#[derive(Debug, Clone, Copy)]
pub struct JoinAck {
    /// Whether the joiner became (or already was) the host.
    pub is_host: bool,
}

/// Reply to a leave request.
#[derive(Debug, Clone, Copy)]
pub struct LeaveOutcome {
    /// Whether the player was actually a member.
    pub was_member: bool,
    /// Whether the room is now empty (caller should tear it down).
    pub now_empty: bool,
}

/// A snapshot of room metadata, for routing and tests.
#[derive(Debug, Clone)]
pub struct RoomInfo {
    pub room_id: RoomId,
    pub phase: GamePhase,
    pub player_count: usize,
    pub max_players: usize,
    pub host: Option<PlayerId>,
    pub drawer: Option<PlayerId>,
}

/// Handle to a running room actor. Cheap to clone.
#[derive(Clone)]
pub struct RoomHandle {
    room_id: RoomId,
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub async fn join(&self, player: PlayerId, name: String) -> Result<JoinAck, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(RoomCommand::Join { player, name, reply: reply_tx }).await?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?
    }

    pub async fn leave(&self, player: PlayerId) -> Result<LeaveOutcome, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(RoomCommand::Leave { player, reply: reply_tx }).await?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))
    }

    pub async fn start(&self, caller: PlayerId) -> Result<(), RoomError> {
        self.send(RoomCommand::Start { caller }).await
    }

    pub async fn select_word(&self, caller: PlayerId, word: String) -> Result<(), RoomError> {
        self.send(RoomCommand::SelectWord { caller, word }).await
    }

    pub async fn draw(&self, caller: PlayerId, stroke: Stroke) -> Result<(), RoomError> {
        self.send(RoomCommand::Draw { caller, stroke }).await
    }

    pub async fn chat(&self, caller: PlayerId, text: String) -> Result<(), RoomError> {
        self.send(RoomCommand::Chat { caller, text }).await
    }

    pub async fn play_again(&self, caller: PlayerId) -> Result<(), RoomError> {
        self.send(RoomCommand::PlayAgain { caller }).await
    }

    pub async fn info(&self) -> Result<RoomInfo, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(RoomCommand::Info { reply: reply_tx }).await?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))
    }

    pub async fn shutdown(&self) -> Result<(), RoomError> {
        self.send(RoomCommand::Shutdown).await
    }

    async fn send(&self, cmd: RoomCommand) -> Result<(), RoomError> {
        self.sender
            .send(cmd)
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))
    }
}

/// The internal room actor state. Runs inside a Tokio task.
struct RoomActor<G: Gateway> {
    id: RoomId,
    settings: RoomSettings,
    gateway: Arc<G>,
    pool: Arc<WordPool>,

    /// Members in join order — this ordering drives drawer rotation,
    /// host reassignment, and winner tie-breaks.
    players: Vec<PlayerInfo>,
    host: Option<PlayerId>,
    phase: GamePhase,
    /// 0-based; advances once per completed round.
    round: u32,
    drawer: Option<PlayerId>,
    word: Option<String>,
    candidates: Vec<String>,
    strokes: Vec<Stroke>,
    /// Char positions already hinted, bounded by `letter_hint_count`.
    revealed: Vec<usize>,
    scores: Scoreboard,

    generation: Generation,
    timers: TimerSet<RoomCommand>,
    /// Loopback for timer deliveries.
    self_tx: mpsc::Sender<RoomCommand>,
    receiver: mpsc::Receiver<RoomCommand>,
}

impl<G: Gateway> RoomActor<G> {
    async fn run(mut self) {
        tracing::info!(room_id = %self.id, "room actor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                RoomCommand::Join { player, name, reply } => {
                    let result = self.handle_join(player, name);
                    let _ = reply.send(result);
                }
                RoomCommand::Leave { player, reply } => {
                    let outcome = self.handle_leave(player);
                    let empty = outcome.now_empty;
                    let _ = reply.send(outcome);
                    if empty {
                        break;
                    }
                }
                RoomCommand::Start { caller } => self.handle_start(caller),
                RoomCommand::SelectWord { caller, word } => {
                    self.handle_select_word(caller, word)
                }
                RoomCommand::Draw { caller, stroke } => self.handle_draw(caller, stroke),
                RoomCommand::Chat { caller, text } => self.handle_chat(caller, text),
                RoomCommand::PlayAgain { caller } => self.handle_play_again(caller),
                RoomCommand::Info { reply } => {
                    let _ = reply.send(self.info());
                }
                RoomCommand::DrawTimeExpired { generation } => {
                    self.handle_draw_time_expired(generation)
                }
                RoomCommand::RevealHint { generation } => self.handle_reveal_hint(generation),
                RoomCommand::NextTurn { generation } => self.handle_next_turn(generation),
                RoomCommand::Shutdown => break,
            }
        }

        // TimerSet drops with the actor, aborting anything pending.
        tracing::info!(room_id = %self.id, "room actor stopped");
    }

    // -- membership ------------------------------------------------------

    fn handle_join(&mut self, player: PlayerId, name: String) -> Result<JoinAck, RoomError> {
        if self.players.iter().any(|p| p.id == player) {
            return Err(RoomError::InvalidState("already in this room".into()));
        }
        if self.players.len() >= self.settings.max_players {
            return Err(RoomError::RoomFull(self.id.clone()));
        }

        self.players.push(PlayerInfo { id: player, name });
        self.scores.track(player);
        // First player in becomes host.
        let host = *self.host.get_or_insert(player);
        self.gateway.join(&self.id, player);

        tracing::info!(
            room_id = %self.id,
            %player,
            players = self.players.len(),
            "player joined"
        );

        self.broadcast_roster();
        if self.phase.in_round() {
            self.gateway.send_to_player(player, self.snapshot());
        }

        Ok(JoinAck { is_host: host == player })
    }

    fn handle_leave(&mut self, player: PlayerId) -> LeaveOutcome {
        let Some(idx) = self.players.iter().position(|p| p.id == player) else {
            return LeaveOutcome { was_member: false, now_empty: self.players.is_empty() };
        };

        self.players.remove(idx);
        self.scores.forget(player);
        self.gateway.leave(&self.id, player);

        tracing::info!(
            room_id = %self.id,
            %player,
            players = self.players.len(),
            "player left"
        );

        if self.players.is_empty() {
            return LeaveOutcome { was_member: true, now_empty: true };
        }

        // Host hand-off: earliest joined remaining player.
        if self.host == Some(player) {
            self.host = Some(self.players[0].id);
        }
        self.broadcast_roster();

        // The drawer walking out resolves the turn: a live canvas ends
        // the round with no winner, a pending word choice just moves to
        // the next drawer on the same round.
        if self.drawer == Some(player) {
            match self.phase {
                GamePhase::Playing => {
                    tracing::info!(room_id = %self.id, "drawer left mid-round");
                    self.end_round(None);
                }
                GamePhase::Choosing => self.begin_turn(),
                _ => {}
            }
        }

        LeaveOutcome { was_member: true, now_empty: false }
    }

    // -- game actions ----------------------------------------------------

    fn handle_start(&mut self, caller: PlayerId) {
        if self.host != Some(caller) {
            return self.reject(caller, RoomError::NotHost);
        }
        if self.phase != GamePhase::Lobby {
            return self.reject(
                caller,
                RoomError::InvalidState("game already started".into()),
            );
        }
        if self.players.len() < 2 {
            return self.reject(
                caller,
                RoomError::InvalidState("need at least 2 players".into()),
            );
        }

        self.round = 0;
        tracing::info!(room_id = %self.id, players = self.players.len(), "game started");
        self.broadcast(ServerEvent::GameStarted);
        self.begin_turn();
    }

    fn handle_play_again(&mut self, caller: PlayerId) {
        if self.host != Some(caller) {
            return self.reject(caller, RoomError::NotHost);
        }
        if self.phase != GamePhase::Finished {
            return self.reject(
                caller,
                RoomError::InvalidState("game is not finished".into()),
            );
        }

        self.round = 0;
        self.scores.reset();
        tracing::info!(room_id = %self.id, "game restarted");
        self.broadcast(ServerEvent::GameStarted);
        self.begin_turn();
    }

    fn handle_select_word(&mut self, caller: PlayerId, word: String) {
        if self.drawer != Some(caller) {
            return self.reject(caller, RoomError::NotCurrentDrawer);
        }
        if self.phase != GamePhase::Choosing {
            return self.reject(
                caller,
                RoomError::InvalidState("no word choice is pending".into()),
            );
        }
        if !self.candidates.iter().any(|c| *c == word) {
            return self.reject(
                caller,
                RoomError::InvalidState("that word was not offered".into()),
            );
        }

        self.candidates.clear();
        self.phase = GamePhase::Playing;
        self.broadcast(ServerEvent::WordSelected {
            masked: words::masked(&word),
            length: word.chars().count(),
        });
        tracing::info!(room_id = %self.id, drawer = %caller, "word selected, round live");
        self.word = Some(word);

        // One draw-expiry timer plus evenly spaced hint reveals, all
        // stamped with the current generation.
        let draw_time = Duration::from_secs(u64::from(self.settings.draw_time_secs));
        self.timers.schedule(
            self.self_tx.clone(),
            draw_time,
            RoomCommand::DrawTimeExpired { generation: self.generation },
        );
        let hints = self.settings.letter_hint_count as u32;
        let spacing = draw_time / (hints + 1);
        for k in 1..=hints {
            self.timers.schedule(
                self.self_tx.clone(),
                spacing * k,
                RoomCommand::RevealHint { generation: self.generation },
            );
        }
    }

    fn handle_draw(&mut self, caller: PlayerId, stroke: Stroke) {
        if self.drawer != Some(caller) {
            return self.reject(caller, RoomError::NotCurrentDrawer);
        }
        if self.phase != GamePhase::Playing {
            return self.reject(
                caller,
                RoomError::InvalidState("no round in progress".into()),
            );
        }

        self.strokes.push(stroke.clone());
        self.gateway
            .send_to_room_except(&self.id, caller, ServerEvent::Draw { stroke });
    }

    fn handle_chat(&mut self, caller: PlayerId, text: String) {
        let Some(name) = self.players.iter().find(|p| p.id == caller).map(|p| p.name.clone())
        else {
            tracing::debug!(room_id = %self.id, %caller, "chat from non-member, ignoring");
            return;
        };

        // Every chat line doubles as a guess. The drawer can talk but
        // can never score off their own word.
        let correct = self.phase.accepts_guesses()
            && self.drawer != Some(caller)
            && self.word.as_deref().is_some_and(|w| scoring::is_match(w, &text));

        self.broadcast(ServerEvent::Chat { player: caller, name, text, correct });

        if correct {
            if let Some(drawer) = self.drawer {
                self.scores.award(caller, GUESSER_AWARD);
                self.scores.award(drawer, DRAWER_AWARD);
                tracing::info!(
                    room_id = %self.id,
                    winner = %caller,
                    round = self.round,
                    "word guessed"
                );
                self.end_round(Some(caller));
            }
        }
    }

    // -- timer deliveries ------------------------------------------------

    fn handle_draw_time_expired(&mut self, generation: Generation) {
        if generation != self.generation || self.phase != GamePhase::Playing {
            tracing::trace!(room_id = %self.id, "stale draw-expiry timer, ignoring");
            return;
        }
        tracing::info!(room_id = %self.id, round = self.round, "draw time expired");
        self.end_round(None);
    }

    fn handle_reveal_hint(&mut self, generation: Generation) {
        if generation != self.generation || self.phase != GamePhase::Playing {
            return;
        }
        if self.revealed.len() >= self.settings.letter_hint_count {
            return;
        }
        let Some(word) = self.word.as_deref() else { return };

        let eligible = words::hint_candidates(word, &self.revealed);
        let Some(&index) = eligible.choose(&mut rand::rng()) else {
            // Short word: every position already revealed.
            return;
        };
        self.revealed.push(index);

        if let Some(c) = word.chars().nth(index) {
            let letter = c.to_lowercase().next().unwrap_or(c);
            self.broadcast(ServerEvent::LetterRevealed { index, letter });
        }
    }

    fn handle_next_turn(&mut self, generation: Generation) {
        if generation != self.generation || self.phase != GamePhase::Choosing {
            return;
        }
        self.begin_turn();
    }

    // -- round lifecycle -------------------------------------------------

    /// Starts the next turn: rotate the drawer, deal word candidates,
    /// reset the canvas. Cancels anything the previous turn scheduled.
    fn begin_turn(&mut self) {
        self.timers.cancel_all();
        self.generation.bump();

        let drawer = self.next_drawer();
        self.drawer = Some(drawer);
        self.word = None;
        self.strokes.clear();
        self.revealed.clear();
        self.candidates = self
            .pool
            .sample(&mut rand::rng(), self.settings.word_choice_count);
        self.phase = GamePhase::Choosing;

        tracing::info!(
            room_id = %self.id,
            %drawer,
            round = self.round + 1,
            "turn started"
        );

        self.broadcast(ServerEvent::RoundStarted {
            drawer,
            round: self.round + 1,
            total_rounds: self.settings.rounds,
        });
        self.gateway.send_to_player(
            drawer,
            ServerEvent::WordCandidates { words: self.candidates.clone() },
        );
    }

    /// The participant after the current drawer in join order; falls
    /// back to the first player when there is no anchor (first turn, or
    /// the previous drawer left).
    fn next_drawer(&self) -> PlayerId {
        let anchor = self
            .drawer
            .and_then(|d| self.players.iter().position(|p| p.id == d));
        match anchor {
            Some(i) => self.players[(i + 1) % self.players.len()].id,
            None => self.players[0].id,
        }
    }

    /// Shared tail of "correct guess", "draw time expired", and "drawer
    /// left": settle the turn, then either finish the game or schedule
    /// the next turn after the grace delay.
    fn end_round(&mut self, winner: Option<PlayerId>) {
        self.timers.cancel_all();
        self.generation.bump();

        let word = self.word.take().unwrap_or_default();
        self.strokes.clear();
        self.revealed.clear();
        self.candidates.clear();

        self.broadcast(ServerEvent::TurnEnded {
            word,
            winner,
            scores: self.score_entries(),
        });

        self.round += 1;
        if self.round >= self.settings.rounds {
            self.phase = GamePhase::Finished;
            self.drawer = None;
            if let Some(champion) = self.scores.leader(&self.join_order()) {
                tracing::info!(room_id = %self.id, winner = %champion, "game finished");
                self.broadcast(ServerEvent::GameFinished {
                    scores: self.score_entries(),
                    winner: champion,
                });
            }
        } else {
            self.phase = GamePhase::Choosing;
            self.timers.schedule(
                self.self_tx.clone(),
                ROUND_GRACE,
                RoomCommand::NextTurn { generation: self.generation },
            );
        }
    }

    // -- helpers ---------------------------------------------------------

    fn join_order(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id).collect()
    }

    fn score_entries(&self) -> Vec<ScoreEntry> {
        self.scores.entries(&self.join_order())
    }

    fn broadcast(&self, event: ServerEvent) {
        self.gateway.send_to_room(&self.id, event);
    }

    fn broadcast_roster(&self) {
        if let Some(host) = self.host {
            self.broadcast(ServerEvent::RoomUpdate {
                players: self.players.clone(),
                host,
                settings: self.settings.clone(),
                phase: self.phase,
            });
        }
    }

    /// Mid-game catch-up state for a late joiner.
    fn snapshot(&self) -> ServerEvent {
        ServerEvent::GameSnapshot {
            drawer: self.drawer,
            masked_word: self.word.as_deref().map(words::masked),
            strokes: self.strokes.clone(),
            scores: self.score_entries(),
            revealed: self
                .revealed
                .iter()
                .filter_map(|&index| {
                    let c = self.word.as_deref()?.chars().nth(index)?;
                    Some(RevealedLetter {
                        index,
                        letter: c.to_lowercase().next().unwrap_or(c),
                    })
                })
                .collect(),
            round: self.round + 1,
            total_rounds: self.settings.rounds,
        }
    }

    fn info(&self) -> RoomInfo {
        RoomInfo {
            room_id: self.id.clone(),
            phase: self.phase,
            player_count: self.players.len(),
            max_players: self.settings.max_players,
            host: self.host,
            drawer: self.drawer,
        }
    }

    fn reject(&self, caller: PlayerId, err: RoomError) {
        tracing::debug!(room_id = %self.id, player = %caller, error = %err, "action rejected");
        self.gateway
            .send_to_player(caller, ServerEvent::Error { reason: err.to_string() });
    }
}

/// Spawns a new room actor task and returns a handle to it.
pub(crate) fn spawn_room<G: Gateway>(
    room_id: RoomId,
    settings: RoomSettings,
    gateway: Arc<G>,
    pool: Arc<WordPool>,
    channel_size: usize,
) -> RoomHandle {
    let (tx, rx) = mpsc::channel(channel_size);

    let actor = RoomActor {
        id: room_id.clone(),
        settings,
        gateway,
        pool,
        players: Vec::new(),
        host: None,
        phase: GamePhase::Lobby,
        round: 0,
        drawer: None,
        word: None,
        candidates: Vec::new(),
        strokes: Vec::new(),
        revealed: Vec::new(),
        scores: Scoreboard::new(),
        generation: Generation::new(),
        timers: TimerSet::new(),
        self_tx: tx.clone(),
        receiver: rx,
    };

    tokio::spawn(actor.run());

    RoomHandle { room_id, sender: tx }
}
