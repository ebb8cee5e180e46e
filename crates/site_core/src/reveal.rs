//! Scroll-driven reveal tracking for the animated page sections.

use std::sync::Arc;

use shared::domain::{SectionId, VisibilityState};
use tokio::{
    sync::{broadcast, watch},
    task::JoinHandle,
};
use tracing::debug;

/// Distance past a section's top edge the viewport bottom must reach before it reveals.
pub const DEFAULT_REVEAL_OFFSET_PX: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSample {
    pub scroll_top: f64,
    pub viewport_height: f64,
}

impl ViewportSample {
    pub fn new(scroll_top: f64, viewport_height: f64) -> Self {
        Self {
            scroll_top,
            viewport_height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.scroll_top + self.viewport_height
    }
}

/// Layout collaborator answering document-relative section offsets.
///
/// `None` means the element is not rendered yet; the tracker retries on the next pass.
pub trait LayoutQuery: Send + Sync {
    fn section_top(&self, section: SectionId) -> Option<f64>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionVisibility {
    states: [VisibilityState; SectionId::COUNT],
}

impl SectionVisibility {
    pub fn get(&self, section: SectionId) -> VisibilityState {
        self.states[section.index()]
    }

    pub fn is_visible(&self, section: SectionId) -> bool {
        self.get(section).is_visible()
    }

    pub fn visible_count(&self) -> usize {
        self.states.iter().filter(|state| state.is_visible()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionId, VisibilityState)> + '_ {
        SectionId::ALL
            .iter()
            .map(|section| (*section, self.states[section.index()]))
    }

    fn reveal(&mut self, section: SectionId) {
        self.states[section.index()] = VisibilityState::Visible;
    }
}

#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    thresholds: [Option<f64>; SectionId::COUNT],
    visibility: SectionVisibility,
}

impl RevealTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker with every page section registered at `offset_px`.
    pub fn for_page(offset_px: f64) -> Self {
        let mut tracker = Self::new();
        for section in SectionId::ALL {
            tracker.register(*section, offset_px);
        }
        tracker
    }

    /// Starts tracking `section`. Returns `false` when it was already registered,
    /// in which case its threshold and state are left untouched.
    pub fn register(&mut self, section: SectionId, threshold_offset_px: f64) -> bool {
        let slot = &mut self.thresholds[section.index()];
        if slot.is_some() {
            return false;
        }
        *slot = Some(threshold_offset_px);
        true
    }

    pub fn is_registered(&self, section: SectionId) -> bool {
        self.thresholds[section.index()].is_some()
    }

    pub fn visibility(&self) -> &SectionVisibility {
        &self.visibility
    }

    pub fn evaluate(
        &mut self,
        viewport: ViewportSample,
        layout: &dyn LayoutQuery,
    ) -> &SectionVisibility {
        let viewport_bottom = viewport.bottom();
        for section in SectionId::ALL {
            let Some(threshold) = self.thresholds[section.index()] else {
                continue;
            };
            if self.visibility.is_visible(*section) {
                continue;
            }
            let Some(section_top) = layout.section_top(*section) else {
                continue;
            };
            if viewport_bottom > section_top + threshold {
                debug!(
                    section = section.key(),
                    section_top, viewport_bottom, "section revealed"
                );
                self.visibility.reveal(*section);
            }
        }
        &self.visibility
    }

    /// Evaluates once against `initial`, then re-evaluates on every sample from
    /// `scroll` until the returned subscription is dropped.
    ///
    /// Must be called from within a tokio runtime.
    pub fn activate(
        mut self,
        initial: ViewportSample,
        mut scroll: broadcast::Receiver<ViewportSample>,
        layout: Arc<dyn LayoutQuery>,
    ) -> RevealSubscription {
        let initial_snapshot = *self.evaluate(initial, layout.as_ref());
        let (snapshots, receiver) = watch::channel(initial_snapshot);

        let task = tokio::spawn(async move {
            loop {
                match scroll.recv().await {
                    Ok(sample) => {
                        let before = self.visibility;
                        let after = *self.evaluate(sample, layout.as_ref());
                        if after != before {
                            snapshots.send_replace(after);
                        }
                    }
                    // Only the newest position matters; skipped samples are harmless.
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        debug!(skipped, "reveal tracker lagged behind scroll feed");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        RevealSubscription { task, receiver }
    }
}

/// Live scroll subscription; the listener is released when this is dropped.
#[derive(Debug)]
pub struct RevealSubscription {
    task: JoinHandle<()>,
    receiver: watch::Receiver<SectionVisibility>,
}

impl RevealSubscription {
    pub fn snapshot(&self) -> SectionVisibility {
        *self.receiver.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SectionVisibility> {
        self.receiver.clone()
    }

    pub fn deactivate(self) -> SectionVisibility {
        self.snapshot()
    }
}

impl Drop for RevealSubscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
#[path = "tests/reveal_tests.rs"]
mod tests;
