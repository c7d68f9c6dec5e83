//! Message id generation and time source.

use chrono::Utc;
use uuid::Uuid;

use crate::message::MessageId;

/// Produces collision-free message ids within a session.
pub trait IdGenerator {
    fn next_id(&mut self) -> MessageId;
}

/// Random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> MessageId {
        MessageId::new(Uuid::new_v4().to_string())
    }
}

/// Predictable ids (`<prefix>1`, `<prefix>2`, ...), handy in tests.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> MessageId {
        let id = MessageId::new(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

/// Source of the send timestamp, in epoch milliseconds.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}
