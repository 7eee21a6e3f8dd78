//! Feed Ranking
//!
//! Total ordering for the derived candidate list: priority descending,
//! then event date ascending. The sort is stable, so ties beyond those
//! two keys keep candidate-generation order. Dedup is already handled
//! by the deterministic candidate identities; no extra pass is needed.

use crate::models::notification::Notification;

/// Sort candidates into final feed order
pub fn rank_notifications(mut candidates: Vec<Notification>) -> Vec<Notification> {
    candidates.sort_by(|a, b| {
        b.priority
            .rank()
            .cmp(&a.priority.rank())
            .then(a.event_date.cmp(&b.event_date))
    });
    candidates
}
