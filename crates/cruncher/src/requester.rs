//! Number Requester
//!
//! Wraps one call to the fact source, converts the raw response into a typed
//! outcome, and appends a structured record to its own audit log. The
//! requester owns a private, strictly increasing call counter; log entries
//! are immutable once appended and the requester is their sole writer.

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::source::{FactResponse, FactSource, FactSourceConfig, HttpFactSource, TransportError};

/// Trivia service endpoint
pub const END_POINT: &str = "http://numbersapi.com/random/math";

/// Status code signalling a usable fact body
const SUCCESS_STATUS: u16 = 200;

/// Typed outcome of one fact request. Transient: consumed by the caller,
/// never retained beyond derived log and tummy entries.
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome {
    Success { number: i64, fact: String },
    Failure { error_code: u16 },
}

/// Result tag recorded in the audit log
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallResult {
    Success,
    Failure,
}

/// One audit log record. `number` is present only for successful calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    pub request_number: u64,
    pub call_time: String,
    pub end_point: String,
    pub result: CallResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<i64>,
}

/// Requester errors
#[derive(Debug, thiserror::Error)]
pub enum RequesterError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("fact body is empty")]
    EmptyBody,

    #[error("malformed fact body: first token {token:?} is not an integer")]
    MalformedBody {
        token: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Fetches number trivia and keeps an append-only log of every attempt
pub struct NumberRequester {
    source: Box<dyn FactSource>,
    clock: Box<dyn Clock>,
    call_number: u64,
    log: Vec<LogEntry>,
}

impl NumberRequester {
    pub fn new(source: Box<dyn FactSource>, clock: Box<dyn Clock>) -> Self {
        Self {
            source,
            clock,
            call_number: 0,
            log: Vec::new(),
        }
    }

    /// Requester wired to the live endpoint with the system clock
    pub fn over_http(config: FactSourceConfig) -> anyhow::Result<Self> {
        let source = HttpFactSource::new(config)?;
        Ok(Self::new(Box::new(source), Box::new(SystemClock)))
    }

    /// Perform one fact request.
    ///
    /// Order matters: the timestamp is snapshotted first, then the call
    /// counter is incremented, then the fetch happens. Transport and parse
    /// errors propagate without appending a log entry; the consumed request
    /// number is never reused.
    pub fn call(&mut self) -> Result<CallOutcome, RequesterError> {
        let timestamp = self.clock.now_iso();
        self.call_number += 1;

        let FactResponse { status, body } = self.source.fetch(END_POINT)?;

        if status == SUCCESS_STATUS {
            let token = body
                .split_whitespace()
                .next()
                .ok_or(RequesterError::EmptyBody)?;
            let number: i64 = token.parse().map_err(|source| RequesterError::MalformedBody {
                token: token.to_string(),
                source,
            })?;

            tracing::debug!(request_number = self.call_number, number, "fact received");
            self.log.push(LogEntry {
                request_number: self.call_number,
                call_time: timestamp,
                end_point: END_POINT.to_string(),
                result: CallResult::Success,
                number: Some(number),
            });
            Ok(CallOutcome::Success { number, fact: body })
        } else {
            tracing::debug!(
                request_number = self.call_number,
                error_code = status,
                "fact request failed"
            );
            self.log.push(LogEntry {
                request_number: self.call_number,
                call_time: timestamp,
                end_point: END_POINT.to_string(),
                result: CallResult::Failure,
                number: None,
            });
            Ok(CallOutcome::Failure { error_code: status })
        }
    }

    /// Read-only view of the audit log, oldest entry first
    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::source::FakeFactSource;

    fn requester_with(source: FakeFactSource) -> NumberRequester {
        NumberRequester::new(
            Box::new(source),
            Box::new(FixedClock::new("2022-11-09T16:38:23.417667Z")),
        )
    }

    #[test]
    fn test_requester_returns_success_outcome_for_200() {
        let mut requester = requester_with(FakeFactSource::always(200, "13 is lucky for some."));

        let outcome = requester.call().unwrap();

        assert_eq!(
            outcome,
            CallOutcome::Success {
                number: 13,
                fact: "13 is lucky for some.".to_string()
            }
        );
    }

    #[test]
    fn test_requester_returns_failure_outcome_for_non_200() {
        let mut requester =
            requester_with(FakeFactSource::always(404, "Oop! Something has gone wrong"));

        let outcome = requester.call().unwrap();

        assert_eq!(outcome, CallOutcome::Failure { error_code: 404 });
    }

    #[test]
    fn test_requester_keeps_exact_log_of_requests() {
        let mut requester = requester_with(FakeFactSource::always(200, "49 is seven squared."));

        for _ in 0..5 {
            requester.call().unwrap();
        }

        let expected: Vec<LogEntry> = (1..=5)
            .map(|n| LogEntry {
                request_number: n,
                call_time: "2022-11-09T16:38:23.417667Z".to_string(),
                end_point: "http://numbersapi.com/random/math".to_string(),
                result: CallResult::Success,
                number: Some(49),
            })
            .collect();

        assert_eq!(requester.log(), expected.as_slice());
    }

    #[test]
    fn test_requester_logs_mixed_outcomes_in_sequence() {
        let mut requester = requester_with(FakeFactSource::new(vec![
            Ok(FactResponse {
                status: 200,
                body: "8 is great.".to_string(),
            }),
            Ok(FactResponse {
                status: 503,
                body: "unavailable".to_string(),
            }),
            Ok(FactResponse {
                status: 200,
                body: "3 is a crowd.".to_string(),
            }),
        ]));

        for _ in 0..3 {
            requester.call().unwrap();
        }

        let log = requester.log();
        assert_eq!(log.len(), 3);
        assert_eq!(
            log.iter().map(|e| e.request_number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(log[0].result, CallResult::Success);
        assert_eq!(log[0].number, Some(8));
        assert_eq!(log[1].result, CallResult::Failure);
        assert_eq!(log[1].number, None);
        assert_eq!(log[2].result, CallResult::Success);
        assert_eq!(log[2].number, Some(3));
    }

    #[test]
    fn test_requester_propagates_transport_error_without_logging() {
        let mut requester = requester_with(FakeFactSource::always_error(TransportError::Http(
            "connection refused".to_string(),
        )));

        let result = requester.call();

        assert!(matches!(result, Err(RequesterError::Transport(_))));
        assert!(requester.log().is_empty());
    }

    #[test]
    fn test_requester_rejects_non_integer_first_token() {
        let mut requester =
            requester_with(FakeFactSource::always(200, "forty two is the meaning of life."));

        let result = requester.call();

        match result {
            Err(RequesterError::MalformedBody { token, .. }) => assert_eq!(token, "forty"),
            other => panic!("expected MalformedBody, got {:?}", other),
        }
        assert!(requester.log().is_empty());
    }

    #[test]
    fn test_requester_rejects_empty_body() {
        let mut requester = requester_with(FakeFactSource::always(200, "   "));

        assert!(matches!(requester.call(), Err(RequesterError::EmptyBody)));
    }

    #[test]
    fn test_request_numbers_are_never_reused_after_an_error() {
        let mut requester = requester_with(FakeFactSource::new(vec![
            Ok(FactResponse {
                status: 200,
                body: "nonsense body".to_string(),
            }),
            Ok(FactResponse {
                status: 200,
                body: "6 is perfect.".to_string(),
            }),
        ]));

        assert!(requester.call().is_err());
        requester.call().unwrap();

        // The failed call consumed request number 1
        assert_eq!(requester.log().len(), 1);
        assert_eq!(requester.log()[0].request_number, 2);
    }

    #[test]
    fn test_failure_log_entry_serializes_without_number_field() {
        let mut requester = requester_with(FakeFactSource::always(500, "boom"));
        requester.call().unwrap();

        let json = serde_json::to_value(&requester.log()[0]).unwrap();
        assert_eq!(json["result"], "FAILURE");
        assert!(json.get("number").is_none());
    }

    #[test]
    fn test_success_log_entry_serializes_with_number_field() {
        let mut requester = requester_with(FakeFactSource::always(200, "49 is seven squared."));
        requester.call().unwrap();

        let json = serde_json::to_value(&requester.log()[0]).unwrap();
        assert_eq!(json["result"], "SUCCESS");
        assert_eq!(json["number"], 49);
        assert_eq!(json["end_point"], "http://numbersapi.com/random/math");
        assert_eq!(json["call_time"], "2022-11-09T16:38:23.417667Z");
    }
}
