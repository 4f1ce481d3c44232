//! Randomized producer/consumer traffic against a [`RingBuffer`].
//!
//! One thread produces payloads and another produces enqueue/dequeue decisions, each over its own
//! rendezvous channel. The calling thread is the only owner of the buffer: it pairs one payload
//! with one decision, applies it, and replays the same operation on a [`VecDeque`] bounded to the
//! buffer's usable capacity. Any difference between the two is reported as an error.

use std::{
    collections::{BTreeMap, VecDeque},
    thread,
};

use fastrand::Rng;
use flume::Receiver;
use ring_queue::{InvalidCapacity, QueueEmpty, QueueFull, RingBuffer};
use thiserror::Error;
use tracing::{info, trace};

mod config;
mod item;

pub use config::Params;
pub use item::{Decision, Item};

// mixed into the run seed so the decision stream is not a copy of the payload stream
const DECISION_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Error, Debug)]
pub enum StressError {
    #[error(transparent)]
    Capacity(#[from] InvalidCapacity),
    #[error(
        "operation {index}: channels closed unevenly (payloads closed: {items_closed}, decisions closed: {decisions_closed})"
    )]
    Desync {
        index: u64,
        items_closed: bool,
        decisions_closed: bool,
    },
    #[error("operation {index}: enqueue accepted with all {usable} usable slots taken")]
    AcceptedWhenFull { index: u64, usable: usize },
    #[error("operation {index}: enqueue rejected with only {len} of {usable} usable slots taken")]
    RejectedWithRoom {
        index: u64,
        len: usize,
        usable: usize,
    },
    #[error("operation {index}: dequeued {got:?} but expected {expected:?}")]
    WrongItem {
        index: u64,
        expected: Item,
        got: Item,
    },
    #[error("operation {index}: dequeued {got:?} from a buffer that should be empty")]
    DequeuedFromEmpty { index: u64, got: Item },
    #[error("operation {index}: dequeue reported empty but {expected:?} was pending")]
    MissingItem { index: u64, expected: Item },
    #[error("operation {index}: buffer holds {ring} elements, shadow queue holds {shadow}")]
    LengthDiverged {
        index: u64,
        ring: usize,
        shadow: usize,
    },
}

/// Outcome of a run that matched the shadow queue throughout.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    pub seed: u64,
    pub enqueued: u64,
    pub dequeued: u64,
    pub rejected_full: u64,
    pub rejected_empty: u64,
    /// Payloads seen per [`Item::kind`].
    pub kinds: BTreeMap<&'static str, u64>,
    /// Elements still in the buffer when the streams ended.
    pub remaining: usize,
}

impl Report {
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.enqueued + self.dequeued + self.rejected_full + self.rejected_empty
    }
}

pub fn run(params: &Params) -> Result<Report, StressError> {
    let seed = params.seed.unwrap_or_else(|| fastrand::u64(..));
    let ops = params.ops;

    info!(seed, ops, capacity = params.capacity, "starting stress run");

    let mut ring = RingBuffer::new(params.capacity)?;

    let (item_tx, item_rx) = flume::bounded(0);
    let (decision_tx, decision_rx) = flume::bounded(0);

    thread::scope(|s| {
        s.spawn(move || {
            let mut rng = Rng::with_seed(seed);
            for _ in 0..ops {
                if item_tx.send(Item::random(&mut rng)).is_err() {
                    break;
                }
            }
        });

        s.spawn(move || {
            let mut rng = Rng::with_seed(seed ^ DECISION_STREAM);
            for _ in 0..ops {
                if decision_tx.send(Decision::random(&mut rng)).is_err() {
                    break;
                }
            }
        });

        // the receivers are moved in so an early error disconnects the producers before the join
        let mut report = drive(&mut ring, item_rx, decision_rx)?;
        report.seed = seed;
        Ok(report)
    })
}

#[allow(
    clippy::needless_pass_by_value,
    reason = "dropping the receivers on return is what disconnects the producers"
)]
fn drive(
    ring: &mut RingBuffer<Item>,
    item_rx: Receiver<Item>,
    decision_rx: Receiver<Decision>,
) -> Result<Report, StressError> {
    let usable = ring.usable_capacity();
    let mut shadow = VecDeque::with_capacity(usable);
    let mut report = Report::default();

    for index in 0_u64.. {
        let (item, decision) = match (item_rx.recv(), decision_rx.recv()) {
            (Ok(item), Ok(decision)) => (item, decision),
            (Err(_), Err(_)) => break,
            (item, decision) => {
                return Err(StressError::Desync {
                    index,
                    items_closed: item.is_err(),
                    decisions_closed: decision.is_err(),
                });
            }
        };

        trace!(index, ?decision, ?item, len = shadow.len(), "applying");
        *report.kinds.entry(item.kind()).or_default() += 1;

        match decision {
            Decision::Enqueue => {
                let has_room = shadow.len() < usable;
                match (ring.enqueue(item), has_room) {
                    (Ok(()), true) => {
                        shadow.push_back(item);
                        report.enqueued += 1;
                    }
                    (Err(QueueFull(_)), false) => report.rejected_full += 1,
                    (Ok(()), false) => {
                        return Err(StressError::AcceptedWhenFull { index, usable });
                    }
                    (Err(QueueFull(_)), true) => {
                        return Err(StressError::RejectedWithRoom {
                            index,
                            len: shadow.len(),
                            usable,
                        });
                    }
                }
            }
            Decision::Dequeue => match (ring.dequeue(), shadow.pop_front()) {
                (Ok(got), Some(expected)) if got == expected => report.dequeued += 1,
                (Ok(got), Some(expected)) => {
                    return Err(StressError::WrongItem {
                        index,
                        expected,
                        got,
                    });
                }
                (Err(QueueEmpty), None) => report.rejected_empty += 1,
                (Ok(got), None) => return Err(StressError::DequeuedFromEmpty { index, got }),
                (Err(QueueEmpty), Some(expected)) => {
                    return Err(StressError::MissingItem { index, expected });
                }
            },
        }

        if ring.len() != shadow.len() || ring.len() > usable {
            return Err(StressError::LengthDiverged {
                index,
                ring: ring.len(),
                shadow: shadow.len(),
            });
        }
    }

    report.remaining = ring.len();
    Ok(report)
}
