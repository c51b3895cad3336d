//! # User Profile
//!
//! The persisted long-term record of what the assistant knows about its
//! user: profile fields, preferences, and an append-only list of facts
//! mined from conversations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single remembered statement from a conversation. Append-only;
/// individual facts are never edited or deleted (only bulk-cleared).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fact {
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Short snippet of the assistant response that accompanied the fact.
    pub context: String,
}

/// The whole persisted profile. Loaded once per process start, held as the
/// sole in-memory copy, rewritten in full on every mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    /// Deduplicated, insertion order preserved.
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub preferences: BTreeMap<String, String>,
    #[serde(default)]
    pub facts: Vec<Fact>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Add an interest if it is not already recorded.
    pub fn add_interest(&mut self, interest: String) -> bool {
        if self.interests.iter().any(|i| i == &interest) {
            return false;
        }
        self.interests.push(interest);
        true
    }

    /// Render the profile plus the five most recent facts as a text block
    /// suitable for inclusion in a model prompt. Empty when nothing is known.
    pub fn context_summary(&self) -> String {
        if self.name.is_none() && self.facts.is_empty() {
            return String::new();
        }

        let mut context = String::from("**User Information (Remember this):**\n");

        if let Some(name) = &self.name {
            context.push_str(&format!("- Name: {}\n", name));
        }
        if let Some(occupation) = &self.occupation {
            context.push_str(&format!("- Occupation: {}\n", occupation));
        }
        if !self.interests.is_empty() {
            context.push_str(&format!("- Interests: {}\n", self.interests.join(", ")));
        }

        if !self.facts.is_empty() {
            context.push_str("\n**Previous conversations:**\n");
            for fact in self.facts.iter().rev().take(5).rev() {
                context.push_str(&format!("- {}\n", fact.content));
            }
        }

        context
    }

    /// Human-readable summary of what is stored, for the memory endpoint.
    pub fn memory_summary(&self) -> String {
        let mut summary = String::from("**Your assistant knows about you:**\n\n");

        match &self.name {
            Some(name) => summary.push_str(&format!("✅ Name: {}\n", name)),
            None => summary.push_str("❌ Name: Not set\n"),
        }
        match &self.occupation {
            Some(occupation) => summary.push_str(&format!("✅ Occupation: {}\n", occupation)),
            None => summary.push_str("❌ Occupation: Not set\n"),
        }
        if self.interests.is_empty() {
            summary.push_str("❌ Interests: Not set\n");
        } else {
            summary.push_str(&format!("✅ Interests: {}\n", self.interests.join(", ")));
        }

        summary.push_str(&format!("\n📝 Total facts stored: {}\n", self.facts.len()));

        if let Some(updated) = &self.last_updated {
            summary.push_str(&format!("🕐 Last updated: {}\n", updated.to_rfc3339()));
        }

        summary
    }
}
