use rectangles::IllegalMove;

/// A request that the judge could not act on, regardless of the rules.
#[derive(Debug)]
pub enum ProtocolError {
    MalformedPayload(serde_json::Error),
    UnrecognizedRequest(serde_json::Error),
    RequestTooLong,
    OutOfTurn,
    GameNotRunning,
}

impl std::error::Error for ProtocolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProtocolError::MalformedPayload(err) | ProtocolError::UnrecognizedRequest(err) => {
                Some(err)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtocolError::MalformedPayload(_) => write!(f, "Request is not valid JSON"),
            ProtocolError::UnrecognizedRequest(err) => write!(f, "Unrecognized request: {}", err),
            ProtocolError::RequestTooLong => write!(f, "Request is too long"),
            ProtocolError::OutOfTurn => write!(f, "It's not your turn"),
            ProtocolError::GameNotRunning => write!(f, "The game is not running"),
        }
    }
}

/// Why a request from a participant was turned down.
#[derive(Debug)]
pub enum Rejection {
    Protocol(ProtocolError),
    Rule(IllegalMove),
}

/// What a participant is told when their move breaks the rules.
pub const WRONG_MOVE_MESSAGE: &str = "wrong move";

impl Rejection {
    /// The message for the `incorrectRequest` response.
    ///
    /// Rule violations are not explained to the player.
    pub fn client_message(&self) -> String {
        match self {
            Rejection::Protocol(err) => err.to_string(),
            Rejection::Rule(_) => String::from(WRONG_MOVE_MESSAGE),
        }
    }
}

impl From<ProtocolError> for Rejection {
    fn from(err: ProtocolError) -> Self {
        Rejection::Protocol(err)
    }
}

impl From<IllegalMove> for Rejection {
    fn from(err: IllegalMove) -> Self {
        Rejection::Rule(err)
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::Protocol(err) => write!(f, "{}", err),
            Rejection::Rule(err) => write!(f, "{}", err),
        }
    }
}
