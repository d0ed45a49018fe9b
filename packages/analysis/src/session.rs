//! The caller-owned "current analysis" slot.
//!
//! Only one selection is current at a time. Every [`AnalysisSession::select`]
//! hands out a [`SelectionTicket`] with a fresh id from the session's own
//! counter; a result is accepted only if it carries the ticket of the
//! selection that is still current. Requests issued for superseded or
//! cleared selections are not cancelled, but whatever they return is
//! dropped.

use std::sync::{
    Mutex, MutexGuard, PoisonError,
    atomic::{AtomicU64, Ordering},
};

use urban_map_region_models::{RegionAnalysis, RegionSelection};

use crate::RegionAnalyzer;

/// Identifies the selection an analysis request was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionTicket {
    id: u64,
}

impl SelectionTicket {
    /// The selection id this ticket was issued for.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.id
    }
}

/// A read-only copy of the session state for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    /// Id of the current selection, if any.
    pub selection_id: Option<u64>,
    /// The current selection, if any.
    pub selection: Option<RegionSelection>,
    /// The analysis of the current selection, once it has arrived.
    pub analysis: Option<RegionAnalysis>,
    /// Whether the current selection's analysis is still in flight.
    pub loading: bool,
}

#[derive(Debug, Default)]
struct Slot {
    current: Option<SelectionTicket>,
    selection: Option<RegionSelection>,
    analysis: Option<RegionAnalysis>,
    loading: bool,
}

/// Holds the current selection and its analysis.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    next_id: AtomicU64,
    slot: Mutex<Slot>,
}

impl AnalysisSession {
    /// Creates an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Makes `selection` current, dropping any previous selection and
    /// analysis, and marks the session as loading.
    pub fn select(&self, selection: RegionSelection) -> SelectionTicket {
        let ticket = SelectionTicket {
            id: self.next_id.fetch_add(1, Ordering::Relaxed) + 1,
        };

        let mut slot = self.slot();
        *slot = Slot {
            current: Some(ticket),
            selection: Some(selection),
            analysis: None,
            loading: true,
        };
        drop(slot);

        log::debug!("Selection {} is now current", ticket.id);
        ticket
    }

    /// Clears the selection. Outstanding tickets become stale.
    pub fn clear(&self) {
        *self.slot() = Slot::default();
    }

    /// Stores `analysis` if `ticket` still names the current selection.
    ///
    /// Returns `false`, leaving the session untouched, when the selection
    /// has since been replaced or cleared.
    pub fn complete(&self, ticket: SelectionTicket, analysis: RegionAnalysis) -> bool {
        let mut slot = self.slot();
        if slot.current != Some(ticket) {
            drop(slot);
            log::debug!("Discarding stale analysis for selection {}", ticket.id);
            return false;
        }

        slot.analysis = Some(analysis);
        slot.loading = false;
        true
    }

    /// Selects `selection`, analyzes it, and stores the result unless a
    /// newer selection was made in the meantime.
    ///
    /// Returns whether the result was stored.
    pub async fn run(&self, analyzer: &RegionAnalyzer, selection: RegionSelection) -> bool {
        let ticket = self.select(selection);
        let analysis = analyzer.analyze(&selection).await;
        self.complete(ticket, analysis)
    }

    /// Whether the current selection's analysis is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.slot().loading
    }

    /// A copy of the current analysis, if one has arrived.
    #[must_use]
    pub fn current_analysis(&self) -> Option<RegionAnalysis> {
        self.slot().analysis.clone()
    }

    /// A copy of the whole session state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let slot = self.slot();
        SessionSnapshot {
            selection_id: slot.current.map(SelectionTicket::id),
            selection: slot.selection,
            analysis: slot.analysis.clone(),
            loading: slot.loading,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::oneshot;

    use super::*;
    use crate::fixtures::{GatedSource, StaticSource, feature, rect};

    fn hospitals(n: usize) -> Vec<urban_map_region_models::Feature> {
        (0..n).map(|_| feature(&[("amenity", "hospital")])).collect()
    }

    #[test]
    fn tickets_are_monotonic() {
        let session = AnalysisSession::new();
        let a = session.select(rect(0.0, 0.0, 0.1, 0.1));
        let b = session.select(rect(0.0, 0.0, 0.2, 0.2));
        assert!(b.id() > a.id());
        assert_eq!(session.snapshot().selection_id, Some(b.id()));
    }

    #[tokio::test]
    async fn run_stores_result_and_clears_loading() {
        let analyzer = RegionAnalyzer::new(Arc::new(StaticSource::new(hospitals(3))));
        let session = AnalysisSession::new();
        let selection = rect(0.0, 0.0, 0.1, 0.1);

        assert!(session.run(&analyzer, selection).await);

        let snapshot = session.snapshot();
        assert!(!snapshot.loading);
        assert_eq!(snapshot.selection, Some(selection));
        assert_eq!(snapshot.analysis.unwrap().amenities.hospitals, 3);
    }

    #[test]
    fn select_marks_loading_and_drops_previous_analysis() {
        let session = AnalysisSession::new();
        let first = session.select(rect(0.0, 0.0, 0.1, 0.1));
        assert!(session.is_loading());

        let analysis = RegionAnalysis {
            area_km2: 123.21,
            amenities: urban_map_region_models::AmenityCounts::default(),
            infra_score: 0,
            population: None,
            transport: urban_map_region_models::TransportMetrics::default(),
        };
        assert!(session.complete(first, analysis));
        assert!(!session.is_loading());
        assert!(session.current_analysis().is_some());

        session.select(rect(0.0, 0.0, 0.2, 0.2));
        assert!(session.is_loading());
        assert!(session.current_analysis().is_none());
    }

    #[tokio::test]
    async fn late_result_for_superseded_selection_is_discarded() {
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        let analyzer =
            RegionAnalyzer::new(Arc::new(GatedSource::new(vec![first_rx, second_rx])));
        let session = AnalysisSession::new();

        let first = session.run(&analyzer, rect(0.0, 0.0, 0.1, 0.1));
        let second = session.run(&analyzer, rect(0.0, 0.0, 0.2, 0.2));
        let driver = async {
            tokio::task::yield_now().await;
            // The newer request finishes first, the older one arrives late.
            second_tx.send(hospitals(2)).unwrap();
            tokio::task::yield_now().await;
            first_tx.send(hospitals(7)).unwrap();
        };

        let (first_stored, second_stored, ()) = tokio::join!(first, second, driver);

        assert!(!first_stored);
        assert!(second_stored);
        let snapshot = session.snapshot();
        assert!(!snapshot.loading);
        assert_eq!(snapshot.selection, Some(rect(0.0, 0.0, 0.2, 0.2)));
        assert_eq!(snapshot.analysis.unwrap().amenities.hospitals, 2);
    }

    #[tokio::test]
    async fn result_arriving_after_clear_is_discarded() {
        let (tx, rx) = oneshot::channel();
        let analyzer = RegionAnalyzer::new(Arc::new(GatedSource::new(vec![rx])));
        let session = AnalysisSession::new();

        let pending = session.run(&analyzer, rect(0.0, 0.0, 0.1, 0.1));
        let driver = async {
            tokio::task::yield_now().await;
            session.clear();
            tx.send(hospitals(1)).unwrap();
        };

        let (stored, ()) = tokio::join!(pending, driver);

        assert!(!stored);
        assert_eq!(session.snapshot(), SessionSnapshot::default());
    }
}
