//! # Profile Store
//!
//! Owns the persisted `UserProfile`: loads it once at startup, mutates it in
//! place, and rewrites the whole file on every update. All read-modify-write
//! cycles run under one async mutex so concurrent commands cannot race the
//! load-mutate-save sequence.

pub mod extract;

use crate::domain::profile::{Fact, UserProfile};
use crate::domain::traits::FactExtractor;
use chrono::Utc;
use std::path::PathBuf;
use tokio::sync::Mutex;

pub struct ProfileStore {
    path: PathBuf,
    extractor: Box<dyn FactExtractor>,
    profile: Mutex<UserProfile>,
}

impl ProfileStore {
    /// Open the store at `path`, loading the on-disk profile. A missing or
    /// corrupt file degrades silently to the default shape.
    pub fn open(path: PathBuf, extractor: Box<dyn FactExtractor>) -> Self {
        let profile = Self::load_from(&path);
        Self {
            path,
            extractor,
            profile: Mutex::new(profile),
        }
    }

    fn load_from(path: &PathBuf) -> UserProfile {
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(profile) => profile,
                Err(e) => {
                    tracing::warn!("Corrupt profile file {:?}, using defaults: {}", path, e);
                    UserProfile::default()
                }
            },
            Err(_) => UserProfile::default(),
        }
    }

    /// Re-read the profile from disk into memory. Exposed mainly so tests
    /// and the memory endpoint observe exactly what persisted.
    pub async fn reload(&self) -> UserProfile {
        let fresh = Self::load_from(&self.path);
        let mut guard = self.profile.lock().await;
        *guard = fresh.clone();
        fresh
    }

    /// Current in-memory profile (authoritative even if a write failed).
    pub async fn snapshot(&self) -> UserProfile {
        self.profile.lock().await.clone()
    }

    /// Render the stored profile for inclusion in a model prompt.
    pub async fn context_summary(&self) -> String {
        self.profile.lock().await.context_summary()
    }

    /// Pattern-match trigger phrases in the command text, update the profile
    /// fields accordingly, append a `Fact` when the text carries personal
    /// information, and persist after any mutation. I/O failure during
    /// persistence is logged and never propagated.
    pub async fn extract_and_store(&self, command: &str, response: &str) {
        let mut guard = self.profile.lock().await;
        let mut changed = false;

        if let Some(name) = self.extractor.extract_name(command) {
            guard.name = Some(name);
            changed = true;
        }
        if let Some(occupation) = self.extractor.extract_occupation(command) {
            guard.occupation = Some(occupation);
            changed = true;
        }
        for interest in self.extractor.extract_interests(command) {
            if guard.add_interest(interest) {
                changed = true;
            }
        }

        if self.extractor.is_personal_info(command) {
            guard.facts.push(Fact {
                content: command.to_string(),
                timestamp: Utc::now(),
                context: response.chars().take(100).collect(),
            });
            changed = true;
        }

        if changed {
            guard.last_updated = Some(Utc::now());
            self.persist(&guard);
        }
    }

    /// Reset to the default shape and persist.
    pub async fn clear(&self) {
        let mut guard = self.profile.lock().await;
        *guard = UserProfile::default();
        self.persist(&guard);
    }

    fn persist(&self, profile: &UserProfile) {
        let json = match serde_json::to_string_pretty(profile) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize profile: {}", e);
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    tracing::error!("Failed to create profile dir {:?}: {}", parent, e);
                    return;
                }
            }
        }
        if let Err(e) = std::fs::write(&self.path, json) {
            // Non-fatal: the in-memory profile stays authoritative
            tracing::error!("Failed to persist profile to {:?}: {}", self.path, e);
        }
    }
}
