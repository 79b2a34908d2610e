use wordmask_core::registry::RegistryError;

/// Failures reported to a client as `room:error`. The display text is the
/// message the client sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomError {
    NotFound,
    RoomFull,
    NameTaken,
    InvalidName,
    GameInProgress,
    NoPlayerToRejoin,
    TooManyRooms,
}

impl std::fmt::Display for RoomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "Room not found"),
            Self::RoomFull => write!(f, "Room is full"),
            Self::NameTaken => write!(f, "Name already taken"),
            Self::InvalidName => write!(f, "Invalid player name"),
            Self::GameInProgress => write!(f, "Game already in progress"),
            Self::NoPlayerToRejoin => write!(f, "No disconnected player with that name"),
            Self::TooManyRooms => write!(f, "Server is full, try again later"),
        }
    }
}

impl std::error::Error for RoomError {}

impl From<RegistryError> for RoomError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::InvalidName => Self::InvalidName,
            RegistryError::NameTaken => Self::NameTaken,
        }
    }
}
