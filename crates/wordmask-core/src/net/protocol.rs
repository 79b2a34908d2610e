use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::messages::{ClientMessage, ServerMessage};

/// Maximum inbound (client) frame size in bytes.
pub const MAX_MESSAGE_SIZE: usize = 16 * 1024; // 16 KiB

/// Maximum outbound (server) frame size in bytes. `match:start` and
/// `game:results` grow with players squared times clue rounds; a full room
/// at the highest round count stays well below this.
pub const MAX_SERVER_MESSAGE_SIZE: usize = 512 * 1024; // 512 KiB

#[derive(Debug)]
pub enum ProtocolError {
    EmptyMessage,
    UnknownEvent(String),
    PayloadTooLarge { size: usize, max: usize },
    SerializeError(String),
    DeserializeError(String),
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "empty message"),
            Self::UnknownEvent(name) => write!(f, "unknown event: {name}"),
            Self::PayloadTooLarge { size, max } => {
                write!(f, "payload too large: {size} bytes (max {max})")
            },
            Self::SerializeError(e) => write!(f, "serialize error: {e}"),
            Self::DeserializeError(e) => write!(f, "deserialize error: {e}"),
        }
    }
}

impl std::error::Error for ProtocolError {}

/// The outer frame shared by every event.
#[derive(Debug, Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    data: serde_json::Value,
}

/// Encode any serializable event as a JSON text frame of at most `max` bytes.
pub fn encode_message<T: Serialize>(msg: &T, max: usize) -> Result<Vec<u8>, ProtocolError> {
    let buf = serde_json::to_vec(msg).map_err(|e| ProtocolError::SerializeError(e.to_string()))?;
    if buf.len() > max {
        return Err(ProtocolError::PayloadTooLarge {
            size: buf.len(),
            max,
        });
    }
    Ok(buf)
}

pub fn encode_server_message(msg: &ServerMessage) -> Result<Vec<u8>, ProtocolError> {
    encode_message(msg, MAX_SERVER_MESSAGE_SIZE)
}

/// Client frames are held to the inbound limit so the server never drops
/// what this encoder produced.
pub fn encode_client_message(msg: &ClientMessage) -> Result<Vec<u8>, ProtocolError> {
    encode_message(msg, MAX_MESSAGE_SIZE)
}

/// Decode a payload, treating a missing or `null` body as an empty object so
/// that all-optional payloads tolerate bare events.
pub fn decode_payload<T: DeserializeOwned>(data: serde_json::Value) -> Result<T, ProtocolError> {
    let data = if data.is_null() {
        serde_json::Value::Object(serde_json::Map::new())
    } else {
        data
    };
    serde_json::from_value(data).map_err(|e| ProtocolError::DeserializeError(e.to_string()))
}

fn decode_envelope(data: &[u8]) -> Result<Envelope, ProtocolError> {
    if data.is_empty() {
        return Err(ProtocolError::EmptyMessage);
    }
    if data.len() > MAX_MESSAGE_SIZE {
        return Err(ProtocolError::PayloadTooLarge {
            size: data.len(),
            max: MAX_MESSAGE_SIZE,
        });
    }
    serde_json::from_slice(data).map_err(|e| ProtocolError::DeserializeError(e.to_string()))
}

/// Decode a raw text frame into a `ClientMessage`. Payload-less events ignore
/// whatever body accompanies them.
pub fn decode_client_message(data: &[u8]) -> Result<ClientMessage, ProtocolError> {
    let Envelope { event, data } = decode_envelope(data)?;
    let msg = match event.as_str() {
        "room:create" => ClientMessage::CreateRoom(decode_payload(data)?),
        "room:join" => ClientMessage::JoinRoom(decode_payload(data)?),
        "room:rejoin" => ClientMessage::RejoinRoom(decode_payload(data)?),
        "room:leave" => ClientMessage::LeaveRoom,
        "game:configure" => ClientMessage::Configure(decode_payload(data)?),
        "game:start" => ClientMessage::StartGame,
        "clue:select" => ClientMessage::SelectClue(decode_payload(data)?),
        "guess:submit" => ClientMessage::SubmitGuess(decode_payload(data)?),
        "match:submit" => ClientMessage::SubmitMatches(decode_payload(data)?),
        "game:playAgain" => ClientMessage::PlayAgain,
        "game:abort" => ClientMessage::Abort,
        _ => return Err(ProtocolError::UnknownEvent(event)),
    };
    Ok(msg)
}

pub fn decode_server_message(data: &[u8]) -> Result<ServerMessage, ProtocolError> {
    if data.is_empty() {
        return Err(ProtocolError::EmptyMessage);
    }
    serde_json::from_slice(data).map_err(|e| ProtocolError::DeserializeError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::messages::{
        ClueSubmittedMsg, JoinRoomMsg, SelectClueMsg, SubmitMatchesMsg,
    };

    #[test]
    fn client_events_decode_by_name() {
        let msg = decode_client_message(
            br#"{"event":"room:join","data":{"code":"abcd","name":"Bob"}}"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            ClientMessage::JoinRoom(JoinRoomMsg {
                code: "abcd".into(),
                name: "Bob".into(),
            })
        );
    }

    #[test]
    fn legacy_field_names_are_accepted() {
        let msg = decode_client_message(
            br#"{"event":"room:join","data":{"roomCode":"WXYZ","playerName":"Ann"}}"#,
        )
        .unwrap();
        let ClientMessage::JoinRoom(join) = msg else {
            panic!("expected join");
        };
        assert_eq!(join.code, "WXYZ");
        assert_eq!(join.name, "Ann");
    }

    #[test]
    fn bare_events_decode_with_or_without_data() {
        assert_eq!(
            decode_client_message(br#"{"event":"game:start"}"#).unwrap(),
            ClientMessage::StartGame
        );
        assert_eq!(
            decode_client_message(br#"{"event":"game:abort","data":{}}"#).unwrap(),
            ClientMessage::Abort
        );
        let ClientMessage::Configure(patch) =
            decode_client_message(br#"{"event":"game:configure"}"#).unwrap()
        else {
            panic!("expected configure");
        };
        assert_eq!(patch, Default::default());
    }

    #[test]
    fn unknown_and_malformed_frames_are_rejected() {
        assert!(matches!(
            decode_client_message(br#"{"event":"chat:say","data":{}}"#),
            Err(ProtocolError::UnknownEvent(name)) if name == "chat:say"
        ));
        assert!(matches!(
            decode_client_message(b""),
            Err(ProtocolError::EmptyMessage)
        ));
        assert!(matches!(
            decode_client_message(b"not json"),
            Err(ProtocolError::DeserializeError(_))
        ));
        let huge = vec![b' '; MAX_MESSAGE_SIZE + 1];
        assert!(matches!(
            decode_client_message(&huge),
            Err(ProtocolError::PayloadTooLarge { max: MAX_MESSAGE_SIZE, .. })
        ));
    }

    #[test]
    fn server_frames_may_exceed_the_inbound_limit() {
        let msg = ServerMessage::error("x".repeat(MAX_MESSAGE_SIZE * 2));
        let bytes = encode_server_message(&msg).unwrap();
        assert!(bytes.len() > MAX_MESSAGE_SIZE);
        assert_eq!(decode_server_message(&bytes).unwrap(), msg);

        let huge = ServerMessage::error("x".repeat(MAX_SERVER_MESSAGE_SIZE));
        assert!(matches!(
            encode_server_message(&huge),
            Err(ProtocolError::PayloadTooLarge { max: MAX_SERVER_MESSAGE_SIZE, .. })
        ));
    }

    #[test]
    fn client_encoding_matches_decoder() {
        let msg = ClientMessage::SelectClue(SelectClueMsg {
            card_index: Some(2),
            clue: "sharp".into(),
        });
        let bytes = encode_client_message(&msg).unwrap();
        assert_eq!(decode_client_message(&bytes).unwrap(), msg);

        let msg = ClientMessage::SubmitMatches(SubmitMatchesMsg {
            matches: [("fox".to_string(), "p1".to_string())].into(),
        });
        let bytes = encode_client_message(&msg).unwrap();
        assert_eq!(decode_client_message(&bytes).unwrap(), msg);
    }

    #[test]
    fn server_messages_use_event_envelope() {
        let bytes = encode_server_message(&ServerMessage::ClueSubmitted(ClueSubmittedMsg {
            clue: "sharp".into(),
            count: 1,
            total: 3,
        }))
        .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["event"], "clue:submitted");
        assert_eq!(value["data"]["total"], 3);

        let bytes = encode_server_message(&ServerMessage::error("Room not found")).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["event"], "room:error");
        assert_eq!(value["data"]["message"], "Room not found");
        assert!(decode_server_message(&bytes).is_ok());
    }
}
