//! In-memory record of active and recent conversions.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;

/// Tracking for conversion requests.
pub struct ConversionTracker {
    active: Mutex<HashMap<String, ActiveConversion>>,
    completed: Mutex<VecDeque<CompletedConversion>>,
    max_completed: usize,
}

/// A conversion still running.
#[derive(Debug, Clone, Serialize)]
pub struct ActiveConversion {
    pub id: String,
    pub file_name: String,
    pub band: Option<String>,
    pub started_at: DateTime<Utc>,
    pub status: String,
}

/// A finished conversion, successful or not.
#[derive(Debug, Clone, Serialize)]
pub struct CompletedConversion {
    pub id: String,
    pub file_name: String,
    pub band: Option<String>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub success: bool,
    pub artifacts: Vec<String>,
    pub error_message: Option<String>,
}

/// Response for `/status`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub active: Vec<ActiveConversion>,
    pub recent: Vec<CompletedConversion>,
    pub total_completed: usize,
}

impl ConversionTracker {
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn with_capacity(max_completed: usize) -> Self {
        Self {
            active: Mutex::new(HashMap::new()),
            completed: Mutex::new(VecDeque::new()),
            max_completed,
        }
    }

    pub async fn start(&self, id: &str, file_name: &str, band: Option<&str>) {
        let conversion = ActiveConversion {
            id: id.to_string(),
            file_name: file_name.to_string(),
            band: band.map(str::to_string),
            started_at: Utc::now(),
            status: "processing".to_string(),
        };
        self.active.lock().await.insert(id.to_string(), conversion);
    }

    pub async fn complete(
        &self,
        id: &str,
        success: bool,
        artifacts: Vec<String>,
        error_message: Option<String>,
    ) {
        let mut active = self.active.lock().await;
        let Some(conversion) = active.remove(id) else {
            return;
        };

        let completed_at = Utc::now();
        let duration_ms = (completed_at - conversion.started_at).num_milliseconds() as u64;

        let mut completed = self.completed.lock().await;
        completed.push_front(CompletedConversion {
            id: conversion.id,
            file_name: conversion.file_name,
            band: conversion.band,
            started_at: conversion.started_at,
            completed_at,
            duration_ms,
            success,
            artifacts,
            error_message,
        });
        completed.truncate(self.max_completed);
    }

    pub async fn get_status(&self) -> StatusResponse {
        let active = self.active.lock().await;
        let completed = self.completed.lock().await;

        StatusResponse {
            active: active.values().cloned().collect(),
            recent: completed.iter().take(20).cloned().collect(),
            total_completed: completed.len(),
        }
    }
}

impl Default for ConversionTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_start_and_complete() {
        let tracker = ConversionTracker::new();
        tracker.start("job-1", "scene.h5", Some("B04")).await;

        let status = tracker.get_status().await;
        assert_eq!(status.active.len(), 1);
        assert_eq!(status.active[0].status, "processing");

        tracker
            .complete("job-1", true, vec!["B04_COG.tif".to_string()], None)
            .await;

        let status = tracker.get_status().await;
        assert!(status.active.is_empty());
        assert_eq!(status.total_completed, 1);
        assert!(status.recent[0].success);
        assert_eq!(status.recent[0].band.as_deref(), Some("B04"));
    }

    #[tokio::test]
    async fn test_completed_ring_is_bounded() {
        let tracker = ConversionTracker::with_capacity(5);
        for i in 0..8 {
            let id = format!("job-{i}");
            tracker.start(&id, "scene.h5", None).await;
            tracker
                .complete(&id, false, vec![], Some("boom".to_string()))
                .await;
        }

        let status = tracker.get_status().await;
        assert_eq!(status.total_completed, 5);
        // Newest first
        assert_eq!(status.recent[0].id, "job-7");
        assert_eq!(status.recent[4].id, "job-3");
    }

    #[tokio::test]
    async fn test_complete_unknown_id_is_ignored() {
        let tracker = ConversionTracker::new();
        tracker.complete("nope", true, vec![], None).await;
        assert_eq!(tracker.get_status().await.total_completed, 0);
    }
}
