//! Observable events
//!
//! Every line the engine logs names one of these.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Engine opened against a data directory
    EngineOpened,
    /// Client identity created for the first time
    IdentityCreated,
    /// Request loop started
    Serving,
    /// Request loop finished
    ShutdownComplete,

    // Writes
    QuestionCreated,
    AnswerCreated,
    /// Vote inserted or flipped
    VoteApplied,
    /// Vote cancelled by repeating it
    VoteRetracted,
    /// Write rejected by validation or a missing target
    WriteRejected,

    // Storage
    /// Medium could not be read or written
    StorageFailed,
    /// Persisted blob failed verification
    DataCorruption,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::EngineOpened => "ENGINE_OPENED",
            Event::IdentityCreated => "IDENTITY_CREATED",
            Event::Serving => "QUORUM_SERVING",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
            Event::QuestionCreated => "QUESTION_CREATED",
            Event::AnswerCreated => "ANSWER_CREATED",
            Event::VoteApplied => "VOTE_APPLIED",
            Event::VoteRetracted => "VOTE_RETRACTED",
            Event::WriteRejected => "WRITE_REJECTED",
            Event::StorageFailed => "STORAGE_FAILED",
            Event::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
