// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Interlinea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Interlinea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Debounced connector recompute.
//!
//! Anything that can move a word on screen (resize, scroll, document mutation, element
//! resize) is reported as a [`LayoutEvent`]. Bursts collapse into one recompute once the
//! stream has been quiet for the debounce delay; a slow poll catches changes nobody
//! reported. Results go out through a `watch` channel, so readers only ever see the
//! latest complete result.

use std::fmt;
use std::future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};
use tokio::time::{interval_at, sleep_until, Instant, Interval, MissedTickBehavior};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutEvent {
    WindowResize,
    Scroll,
    Mutation,
    ElementResize,
    Poll,
}

impl fmt::Display for LayoutEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::WindowResize => "window_resize",
            Self::Scroll => "scroll",
            Self::Mutation => "mutation",
            Self::ElementResize => "element_resize",
            Self::Poll => "poll",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    pub debounce_ms: u64,
    /// `0` disables the fallback poll.
    pub poll_interval_ms: u64,
}

impl SyncConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn poll_interval(&self) -> Option<Duration> {
        (self.poll_interval_ms > 0).then(|| Duration::from_millis(self.poll_interval_ms))
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self { debounce_ms: 50, poll_interval_ms: 1000 }
    }
}

/// Trailing-edge debouncer. Pure: callers pass the clock in.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
    pending: usize,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, deadline: None, pending: 0 }
    }

    /// Each event pushes the deadline out to `now + delay`.
    pub fn record(&mut self, event: LayoutEvent, now: Instant) {
        self.pending += 1;
        self.deadline = Some(now + self.delay);
        trace!(%event, pending = self.pending, "layout event");
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns how many events were coalesced if the deadline has passed, and resets.
    pub fn fire(&mut self, now: Instant) -> Option<usize> {
        match self.deadline {
            Some(deadline) if now >= deadline => Some(self.take()),
            _ => None,
        }
    }

    fn take(&mut self) -> usize {
        self.deadline = None;
        std::mem::take(&mut self.pending)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecomputeStats {
    pub events: usize,
    pub recomputes: usize,
}

/// Runs until `events` closes. Events still pending at close are flushed with one last
/// recompute.
///
/// `recompute` is only ever called from this task, one call at a time.
pub async fn run_recompute_loop<T, F>(
    mut events: mpsc::Receiver<LayoutEvent>,
    config: SyncConfig,
    mut recompute: F,
    publish: watch::Sender<T>,
) -> RecomputeStats
where
    F: FnMut() -> T,
{
    let mut debouncer = Debouncer::new(config.debounce());
    let mut poll = config.poll_interval().map(|period| {
        let mut poll = interval_at(Instant::now() + period, period);
        poll.set_missed_tick_behavior(MissedTickBehavior::Delay);
        poll
    });
    let mut stats = RecomputeStats::default();

    loop {
        let deadline = debouncer.deadline();
        tokio::select! {
            event = events.recv() => match event {
                Some(event) => {
                    stats.events += 1;
                    debouncer.record(event, Instant::now());
                }
                None => break,
            },
            _ = next_poll(&mut poll) => debouncer.record(LayoutEvent::Poll, Instant::now()),
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                if let Some(coalesced) = debouncer.fire(Instant::now()) {
                    publish.send_replace(recompute());
                    stats.recomputes += 1;
                    debug!(coalesced, recomputes = stats.recomputes, "connectors recomputed");
                }
            }
        }
    }

    if debouncer.is_pending() {
        let coalesced = debouncer.take();
        publish.send_replace(recompute());
        stats.recomputes += 1;
        debug!(coalesced, "flushed pending recompute on shutdown");
    }
    debug!(events = stats.events, recomputes = stats.recomputes, "recompute loop stopped");
    stats
}

async fn next_poll(poll: &mut Option<Interval>) {
    match poll {
        Some(poll) => {
            poll.tick().await;
        }
        None => future::pending().await,
    }
}
