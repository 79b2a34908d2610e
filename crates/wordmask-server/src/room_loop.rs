//! One task per room. Commands from connections and timers are processed
//! strictly one at a time against the room's [`Room`] state machine, and the
//! resulting effects are carried out before the next command is read.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use wordmask_core::net::messages::{ClientMessage, ServerMessage};
use wordmask_core::net::protocol::encode_server_message;
use wordmask_core::player::PlayerId;
use wordmask_core::session::Phase;

use crate::orchestrator::{Effect, Room};
use crate::room_manager::PlayerSender;
use crate::state::SharedRoomDirectory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Create,
    Join,
    Rejoin,
}

pub enum RoomCommand {
    Join {
        player_id: PlayerId,
        name: String,
        kind: JoinKind,
        sender: PlayerSender,
        /// `true` once the connection is seated in the room.
        reply: oneshot::Sender<bool>,
    },
    Leave {
        player_id: PlayerId,
    },
    Action {
        player_id: PlayerId,
        msg: ClientMessage,
    },
    Disconnected {
        player_id: PlayerId,
    },
    TimerFired {
        token: u64,
    },
    GraceExpired {
        player_id: PlayerId,
        token: u64,
    },
}

/// Published by the room task after every command, read by `/health`.
#[derive(Default)]
struct RoomStatus {
    players: AtomicUsize,
    in_game: AtomicBool,
}

/// Cheap, cloneable reference to a running room.
#[derive(Clone)]
pub struct RoomHandle {
    code: String,
    tx: mpsc::UnboundedSender<RoomCommand>,
    status: Arc<RoomStatus>,
}

impl RoomHandle {
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Connected players as of the last processed command.
    pub fn player_count(&self) -> usize {
        self.status.players.load(Ordering::Relaxed)
    }

    /// Whether the room has left the lobby.
    pub fn in_game(&self) -> bool {
        self.status.in_game.load(Ordering::Relaxed)
    }

    /// Queue a command. Returns false if the room has shut down.
    pub fn send(&self, cmd: RoomCommand) -> bool {
        self.tx.send(cmd).is_ok()
    }

    /// Ask the room to seat a connection. `None` if the room closed first.
    pub async fn join(
        &self,
        player_id: PlayerId,
        name: String,
        kind: JoinKind,
        sender: PlayerSender,
    ) -> Option<bool> {
        let (reply, rx) = oneshot::channel();
        let queued = self.send(RoomCommand::Join {
            player_id,
            name,
            kind,
            sender,
            reply,
        });
        if !queued {
            return None;
        }
        rx.await.ok()
    }
}

pub fn spawn_room(room: Room, directory: SharedRoomDirectory) -> RoomHandle {
    let (tx, rx) = mpsc::unbounded_channel();
    let status = Arc::new(RoomStatus::default());
    let handle = RoomHandle {
        code: room.code().to_string(),
        tx: tx.clone(),
        status: Arc::clone(&status),
    };
    let task = RoomTask::new(room, tx);
    tokio::spawn(run_room(task, rx, directory, status));
    handle
}

async fn run_room(
    mut task: RoomTask,
    mut rx: mpsc::UnboundedReceiver<RoomCommand>,
    directory: SharedRoomDirectory,
    status: Arc<RoomStatus>,
) {
    let code = task.room.code().to_string();
    while let Some(cmd) = rx.recv().await {
        task.handle(cmd);
        status
            .players
            .store(task.room.player_count(), Ordering::Relaxed);
        status
            .in_game
            .store(task.room.phase() != Phase::Lobby, Ordering::Relaxed);
        if task.room.is_empty() {
            break;
        }
    }
    task.shutdown();
    directory.write().await.remove(&code);
    tracing::info!(room = %code, "Room closed");
}

struct RoomTask {
    room: Room,
    connections: HashMap<PlayerId, PlayerSender>,
    phase_timer: Option<JoinHandle<()>>,
    grace_timers: HashMap<PlayerId, JoinHandle<()>>,
    /// Timers report back through the room's own queue.
    commands: mpsc::UnboundedSender<RoomCommand>,
}

impl RoomTask {
    fn new(room: Room, commands: mpsc::UnboundedSender<RoomCommand>) -> Self {
        Self {
            room,
            connections: HashMap::new(),
            phase_timer: None,
            grace_timers: HashMap::new(),
            commands,
        }
    }

    fn handle(&mut self, cmd: RoomCommand) {
        match cmd {
            RoomCommand::Join {
                player_id,
                name,
                kind,
                sender,
                reply,
            } => {
                // Seat the connection first so the snapshot reaches it.
                self.connections.insert(player_id.clone(), sender.clone());
                let result = match kind {
                    JoinKind::Create => self.room.join(&player_id, &name, true),
                    JoinKind::Join => self.room.join(&player_id, &name, false),
                    JoinKind::Rejoin => self.room.rejoin(&player_id, &name),
                };
                let seated = match result {
                    Ok(()) => true,
                    Err(e) => {
                        self.connections.remove(&player_id);
                        tracing::debug!(
                            player_id,
                            room = %self.room.code(),
                            error = %e,
                            "Join rejected"
                        );
                        if let Some(bytes) = encode(&ServerMessage::error(e.to_string()))
                            && let Err(err) = sender.try_send(bytes)
                        {
                            tracing::debug!(player_id, error = %err, "Failed to send room error");
                        }
                        false
                    },
                };
                self.apply_effects();
                let _ = reply.send(seated);
            },
            RoomCommand::Leave { player_id } => {
                self.room.leave(&player_id);
                self.apply_effects();
                self.connections.remove(&player_id);
            },
            RoomCommand::Action { player_id, msg } => {
                self.room.handle_action(&player_id, msg);
                self.apply_effects();
            },
            RoomCommand::Disconnected { player_id } => {
                // Absent when the player already left voluntarily.
                if self.connections.remove(&player_id).is_some() {
                    self.room.disconnect(&player_id);
                    self.apply_effects();
                }
            },
            RoomCommand::TimerFired { token } => {
                self.room.timer_fired(token);
                self.apply_effects();
            },
            RoomCommand::GraceExpired { player_id, token } => {
                // Connection ids are never reused, so this entry is the timer that fired.
                self.grace_timers.remove(&player_id);
                self.room.grace_expired(&player_id, token);
                self.apply_effects();
            },
        }
    }

    fn apply_effects(&mut self) {
        for effect in self.room.take_effects() {
            match effect {
                Effect::Send { to, msg } => {
                    if let Some(bytes) = encode(&msg) {
                        self.send_to(&to, bytes);
                    }
                },
                Effect::Broadcast { msg, except } => {
                    if let Some(bytes) = encode(&msg) {
                        self.broadcast(&bytes, except.as_deref());
                    }
                },
                Effect::StartTimer { token, after } => {
                    let timer = self.schedule(after, RoomCommand::TimerFired { token });
                    if let Some(old) = self.phase_timer.replace(timer) {
                        old.abort();
                    }
                },
                Effect::CancelTimer => {
                    if let Some(old) = self.phase_timer.take() {
                        old.abort();
                    }
                },
                Effect::StartGrace {
                    player_id,
                    token,
                    after,
                } => {
                    let timer = self.schedule(
                        after,
                        RoomCommand::GraceExpired {
                            player_id: player_id.clone(),
                            token,
                        },
                    );
                    if let Some(old) = self.grace_timers.insert(player_id, timer) {
                        old.abort();
                    }
                },
                Effect::CancelGrace { player_id } => {
                    if let Some(old) = self.grace_timers.remove(&player_id) {
                        old.abort();
                    }
                },
            }
        }
    }

    fn schedule(&self, after: Duration, cmd: RoomCommand) -> JoinHandle<()> {
        let tx = self.commands.clone();
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let _ = tx.send(cmd);
        })
    }

    fn send_to(&self, player_id: &str, data: Bytes) {
        if let Some(sender) = self.connections.get(player_id)
            && let Err(e) = sender.try_send(data)
        {
            tracing::debug!(
                player_id, room = %self.room.code(), error = %e,
                "Failed to send to player (slow or disconnected)"
            );
        }
    }

    fn broadcast(&self, data: &Bytes, except: Option<&str>) {
        for (player_id, sender) in &self.connections {
            if Some(player_id.as_str()) == except {
                continue;
            }
            if let Err(e) = sender.try_send(data.clone()) {
                tracing::debug!(
                    player_id, room = %self.room.code(), error = %e,
                    "Skipping broadcast to slow client"
                );
            }
        }
    }

    fn shutdown(&mut self) {
        if let Some(timer) = self.phase_timer.take() {
            timer.abort();
        }
        for (_, timer) in self.grace_timers.drain() {
            timer.abort();
        }
    }
}

fn encode(msg: &ServerMessage) -> Option<Bytes> {
    match encode_server_message(msg) {
        Ok(data) => Some(Bytes::from(data)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode server message");
            None
        },
    }
}
