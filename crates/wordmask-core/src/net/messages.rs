use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::player::{PlayerId, PlayerSummary};
use crate::scoring::GameResults;
use crate::session::{Phase, RevealedClue};
use crate::settings::{Settings, SettingsPatch};

// ---------------------------------------------------------------------------
// Client -> Server
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateRoomMsg {
    #[serde(alias = "playerName")]
    pub name: String,
}

/// Payload of both `room:join` and `room:rejoin`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JoinRoomMsg {
    #[serde(alias = "roomCode")]
    pub code: String,
    #[serde(alias = "playerName")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectClueMsg {
    pub card_index: Option<usize>,
    pub clue: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmitGuessMsg {
    pub word: String,
}

/// Accused owner per hidden word.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmitMatchesMsg {
    pub matches: BTreeMap<String, PlayerId>,
}

/// Inbound player actions. The wire form is `{"event": <name>, "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientMessage {
    #[serde(rename = "room:create")]
    CreateRoom(CreateRoomMsg),
    #[serde(rename = "room:join")]
    JoinRoom(JoinRoomMsg),
    #[serde(rename = "room:rejoin")]
    RejoinRoom(JoinRoomMsg),
    #[serde(rename = "room:leave")]
    LeaveRoom,
    #[serde(rename = "game:configure")]
    Configure(SettingsPatch),
    #[serde(rename = "game:start")]
    StartGame,
    #[serde(rename = "clue:select")]
    SelectClue(SelectClueMsg),
    #[serde(rename = "guess:submit")]
    SubmitGuess(SubmitGuessMsg),
    #[serde(rename = "match:submit")]
    SubmitMatches(SubmitMatchesMsg),
    #[serde(rename = "game:playAgain")]
    PlayAgain,
    #[serde(rename = "game:abort")]
    Abort,
}

impl ClientMessage {
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::CreateRoom(_) => "room:create",
            Self::JoinRoom(_) => "room:join",
            Self::RejoinRoom(_) => "room:rejoin",
            Self::LeaveRoom => "room:leave",
            Self::Configure(_) => "game:configure",
            Self::StartGame => "game:start",
            Self::SelectClue(_) => "clue:select",
            Self::SubmitGuess(_) => "guess:submit",
            Self::SubmitMatches(_) => "match:submit",
            Self::PlayAgain => "game:playAgain",
            Self::Abort => "game:abort",
        }
    }
}

// ---------------------------------------------------------------------------
// Server -> Client
// ---------------------------------------------------------------------------

/// Full room snapshot for a joining or reconnecting connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomJoinedMsg {
    pub room_code: String,
    pub player_id: PlayerId,
    pub players: Vec<PlayerSummary>,
    pub host_id: Option<PlayerId>,
    pub settings: Settings,
    pub phase: Phase,
    pub themes: Vec<String>,
    pub clue_lists: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerJoinedMsg {
    pub player: PlayerSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerLeftMsg {
    pub player_id: PlayerId,
    pub new_host_id: Option<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerReconnectedMsg {
    pub old_player_id: PlayerId,
    pub player_id: PlayerId,
    pub player_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostChangedMsg {
    pub host_id: PlayerId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomErrorMsg {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfiguredMsg {
    pub settings: Settings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStartedMsg {
    pub phase: Phase,
}

/// Per-player slot opening. `word` is withheld from its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClueRoundStartMsg {
    pub word_slot: usize,
    pub total_slots: usize,
    /// 1-based.
    pub round_num: u8,
    pub total_rounds: u8,
    pub word: Option<String>,
    pub hand: Vec<String>,
    pub is_your_word: bool,
    /// Seconds; 0 when untimed or when replayed to a reconnecting player.
    pub timer: u16,
}

/// Anonymous clue announcement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClueSubmittedMsg {
    pub clue: String,
    pub count: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessStartMsg {
    pub options: Vec<String>,
    pub clues_for_you: Vec<String>,
    pub blind_clues: Vec<String>,
    pub timer: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSubmittedMsg {
    pub player_id: PlayerId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRef {
    pub id: PlayerId,
    pub name: String,
}

/// Per-player matching setup: every hidden word except the recipient's own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStartMsg {
    pub hidden_words: Vec<String>,
    pub players: Vec<PlayerRef>,
    pub revealed_clues: Vec<RevealedClue>,
    pub allow_duplicate_matches: bool,
    pub timer: u16,
    pub guessed_word: Option<String>,
    pub guess_correct: bool,
    pub own_word: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordReveal {
    pub player_name: String,
    pub word: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResultsMsg {
    #[serde(flatten)]
    pub results: GameResults,
    pub word_reveal: BTreeMap<PlayerId, WordReveal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseLobbyMsg {
    pub players: Vec<PlayerSummary>,
    pub settings: Settings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerStartMsg {
    pub seconds: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerMessage {
    #[serde(rename = "room:joined")]
    RoomJoined(RoomJoinedMsg),
    #[serde(rename = "room:playerJoined")]
    PlayerJoined(PlayerJoinedMsg),
    #[serde(rename = "room:playerLeft")]
    PlayerLeft(PlayerLeftMsg),
    #[serde(rename = "room:playerReconnected")]
    PlayerReconnected(PlayerReconnectedMsg),
    #[serde(rename = "room:hostChanged")]
    HostChanged(HostChangedMsg),
    #[serde(rename = "room:left")]
    RoomLeft,
    #[serde(rename = "room:error")]
    RoomError(RoomErrorMsg),
    #[serde(rename = "game:configured")]
    GameConfigured(GameConfiguredMsg),
    #[serde(rename = "game:started")]
    GameStarted(GameStartedMsg),
    #[serde(rename = "clue:roundStart")]
    ClueRoundStart(ClueRoundStartMsg),
    #[serde(rename = "clue:submitted")]
    ClueSubmitted(ClueSubmittedMsg),
    #[serde(rename = "guess:start")]
    GuessStart(GuessStartMsg),
    #[serde(rename = "guess:playerSubmitted")]
    GuessPlayerSubmitted(PlayerSubmittedMsg),
    #[serde(rename = "match:start")]
    MatchStart(MatchStartMsg),
    #[serde(rename = "match:playerSubmitted")]
    MatchPlayerSubmitted(PlayerSubmittedMsg),
    #[serde(rename = "game:results")]
    GameResults(Box<GameResultsMsg>),
    #[serde(rename = "phase:lobby")]
    PhaseLobby(PhaseLobbyMsg),
    #[serde(rename = "timer:start")]
    TimerStart(TimerStartMsg),
}

impl ServerMessage {
    pub fn error(message: impl Into<String>) -> Self {
        Self::RoomError(RoomErrorMsg {
            message: message.into(),
        })
    }
}
