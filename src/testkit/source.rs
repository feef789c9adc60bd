//! Scripted trade-history source.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{TimeWindow, TradeRecord, TradeSide};
use crate::error::{Result, SourceError};
use crate::port::TradeHistorySource;

/// A canned answer to one query.
#[derive(Debug, Clone)]
pub enum Scripted {
    Records(Vec<TradeRecord>),
    /// A transient API failure.
    Fail(String),
    /// An HTTP rejection with the given status.
    Reject(u16),
}

impl Scripted {
    fn into_result(self) -> Result<Vec<TradeRecord>> {
        match self {
            Self::Records(records) => Ok(records),
            Self::Fail(message) => Err(SourceError::Api {
                code: "-1".into(),
                message,
            }
            .into()),
            Self::Reject(status) => Err(SourceError::Rejected {
                status,
                body: String::new(),
            }
            .into()),
        }
    }
}

/// A query the source received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryCall {
    pub side: TradeSide,
    pub window: Option<TimeWindow>,
}

struct SourceState {
    history: HashMap<TradeSide, Vec<TradeRecord>>,
    windowed: HashMap<TradeSide, VecDeque<Scripted>>,
    history_failure: Option<String>,
    fallback: Scripted,
    calls: Vec<QueryCall>,
}

/// Replays scripted responses per side.
///
/// Unbounded queries return the configured history. Windowed queries pop
/// the side's queue and fall back to a fixed answer (empty by default)
/// once it is drained.
#[derive(Clone)]
pub struct ScriptedSource {
    state: Arc<Mutex<SourceState>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SourceState {
                history: HashMap::new(),
                windowed: HashMap::new(),
                history_failure: None,
                fallback: Scripted::Records(Vec::new()),
                calls: Vec::new(),
            })),
        }
    }

    /// A source whose windowed queries always fail.
    pub fn failing(message: &str) -> Self {
        let source = Self::new();
        source.set_fallback(Scripted::Fail(message.to_string()));
        source
    }

    /// Set the startup history for one side.
    pub fn with_history(self, side: TradeSide, records: Vec<TradeRecord>) -> Self {
        self.state.lock().history.insert(side, records);
        self
    }

    /// Make unbounded (startup) queries fail.
    pub fn with_failing_history(self, message: &str) -> Self {
        self.state.lock().history_failure = Some(message.to_string());
        self
    }

    /// Queue the next windowed answer for one side.
    pub fn push(&self, side: TradeSide, answer: Scripted) {
        self.state
            .lock()
            .windowed
            .entry(side)
            .or_default()
            .push_back(answer);
    }

    /// Queue records as the next windowed answer for one side.
    pub fn push_records(&self, side: TradeSide, records: Vec<TradeRecord>) {
        self.push(side, Scripted::Records(records));
    }

    /// Answer used once a side's queue is empty.
    pub fn set_fallback(&self, answer: Scripted) {
        self.state.lock().fallback = answer;
    }

    pub fn calls(&self) -> Vec<QueryCall> {
        self.state.lock().calls.clone()
    }

    /// Windowed queries received so far.
    pub fn windowed_calls(&self) -> Vec<QueryCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.window.is_some())
            .collect()
    }
}

impl Default for ScriptedSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TradeHistorySource for ScriptedSource {
    async fn query(
        &self,
        side: &TradeSide,
        window: Option<TimeWindow>,
    ) -> Result<Vec<TradeRecord>> {
        let mut state = self.state.lock();
        state.calls.push(QueryCall {
            side: side.clone(),
            window,
        });

        let answer = match window {
            None => match &state.history_failure {
                Some(message) => Scripted::Fail(message.clone()),
                None => Scripted::Records(state.history.get(side).cloned().unwrap_or_default()),
            },
            Some(_) => {
                let queued = state.windowed.get_mut(side).and_then(VecDeque::pop_front);
                queued.unwrap_or_else(|| state.fallback.clone())
            }
        };
        answer.into_result()
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
