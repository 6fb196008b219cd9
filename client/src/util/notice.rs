//! Transient on-screen messages that dismiss themselves.
//!
//! Each `flash` bumps a sequence number; the dismiss timer only clears the
//! message it was started for, so a newer message keeps its full lifetime.

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

use std::time::Duration;

use leptos::prelude::*;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoticeState {
    pub text: Option<String>,
    pub seq: u64,
}

impl NoticeState {
    /// Show `text`; returns the sequence number to dismiss it with.
    pub fn show(&mut self, text: impl Into<String>) -> u64 {
        self.seq += 1;
        self.text = Some(text.into());
        self.seq
    }

    /// Clear the message if it is still the one shown at `seq`.
    pub fn dismiss(&mut self, seq: u64) {
        if self.seq == seq {
            self.text = None;
        }
    }
}

#[derive(Clone, Copy)]
pub struct Notice {
    state: RwSignal<NoticeState>,
    lifetime: Duration,
}

impl Notice {
    pub fn new(lifetime: Duration) -> Self {
        Self { state: RwSignal::new(NoticeState::default()), lifetime }
    }

    pub fn text(self) -> Option<String> {
        self.state.with(|s| s.text.clone())
    }

    pub fn flash(self, text: impl Into<String>) {
        let Some(seq) = self.state.try_update(|s| s.show(text)) else {
            return;
        };
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            gloo_timers::future::sleep(self.lifetime).await;
            self.state.try_update(|s| s.dismiss(seq));
        });
        #[cfg(not(feature = "csr"))]
        let _ = (seq, self.lifetime);
    }

    pub fn clear(self) {
        self.state.update(|s| s.text = None);
    }
}
