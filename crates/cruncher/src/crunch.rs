//! Number Cruncher
//!
//! Orchestrates one crunch cycle: invoke the requester, classify the
//! returned integer as even or odd, update the tummy accordingly, and
//! produce a human-readable verdict string. Owns the tummy and its
//! eviction policy.

use crate::requester::{CallOutcome, LogEntry, NumberRequester, RequesterError};
use crate::source::TransportError;
use crate::tummy::{DigestedFact, Tummy};

/// Crunch cycle errors
#[derive(Debug, thiserror::Error)]
pub enum CrunchError {
    #[error("tummy size must be at least 1")]
    InvalidTummySize,

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("fact source returned error status {error_code}")]
    FailedRequest { error_code: u16 },

    #[error("unexpected error")]
    Unexpected {
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Fetches number trivia and digests the even ones into a bounded tummy
pub struct NumberCruncher {
    tummy: Tummy,
    requester: NumberRequester,
}

impl NumberCruncher {
    /// A tummy of size 0 is a configuration error, rejected up front.
    pub fn new(size_of_tummy: usize, requester: NumberRequester) -> Result<Self, CrunchError> {
        if size_of_tummy == 0 {
            return Err(CrunchError::InvalidTummySize);
        }
        Ok(Self {
            tummy: Tummy::new(size_of_tummy),
            requester,
        })
    }

    /// Run one fetch/classify/store cycle.
    ///
    /// Even numbers are digested, evicting the oldest fact when the tummy is
    /// full; odd numbers are rejected untouched. Transport failures propagate
    /// unmodified. A `Failure` outcome from the requester surfaces as
    /// `FailedRequest` rather than a verdict. Any other requester error is
    /// logged with its cause and collapsed into the generic `Unexpected`
    /// kind; the tummy is never left partially updated.
    pub fn crunch(&mut self) -> Result<String, CrunchError> {
        let outcome = match self.requester.call() {
            Ok(outcome) => outcome,
            Err(RequesterError::Transport(e)) => return Err(CrunchError::Transport(e)),
            Err(cause) => {
                tracing::error!(error = %cause, "crunch cycle hit an unclassifiable fact");
                return Err(CrunchError::Unexpected {
                    cause: Box::new(cause),
                });
            }
        };

        match outcome {
            CallOutcome::Failure { error_code } => Err(CrunchError::FailedRequest { error_code }),
            CallOutcome::Success { number, fact } => {
                if number % 2 == 0 {
                    let digested = DigestedFact { number, fact };
                    match self.tummy.swallow(digested) {
                        None => Ok(format!("Yum! {}", number)),
                        Some(popped) => Ok(format!("Burp! {}", popped.number)),
                    }
                } else {
                    Ok(format!("Yuk! {}", number))
                }
            }
        }
    }

    /// Snapshot of the tummy contents, oldest first
    pub fn tummy(&self) -> Vec<DigestedFact> {
        self.tummy.snapshot()
    }

    /// Audit log of every fact request made on behalf of this cruncher
    pub fn log(&self) -> &[LogEntry] {
        self.requester.log()
    }
}
