//! Number Cruncher - Even-number trivia digestion
//!
//! Fetches a fact about a random integer from a numeric-trivia service,
//! classifies it as even or odd, and keeps the even ones in a fixed-capacity
//! FIFO "tummy". Every fetch attempt is recorded in an append-only audit log
//! with a strictly increasing request number.

pub mod clock;
pub mod crunch;
pub mod requester;
pub mod source;
pub mod tummy;

pub use clock::{Clock, FixedClock, SystemClock};
pub use crunch::{CrunchError, NumberCruncher};
pub use requester::{CallOutcome, CallResult, LogEntry, NumberRequester, RequesterError, END_POINT};
pub use source::{
    FactResponse, FactSource, FactSourceConfig, FakeFactSource, HttpFactSource, TransportError,
};
pub use tummy::{DigestedFact, Tummy};
