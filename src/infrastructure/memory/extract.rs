//! # Fact Extraction
//!
//! Regex-based implementation of the `FactExtractor` strategy. Matches a
//! small fixed set of trigger phrases in two language registers (English
//! and romanized Hindi). Inherently heuristic; precision is traded for
//! having no model call on the hot path.

use crate::domain::traits::FactExtractor;
use regex::Regex;

const PERSONAL_KEYWORDS: &[&str] = &[
    "my name",
    "i am",
    "i work",
    "i like",
    "i love",
    "mera naam",
    "main hoon",
    "mujhe pasand",
    "kaam karta",
    "kaam karti",
];

pub struct RegexFactExtractor {
    name_patterns: Vec<Regex>,
    occupation_patterns: Vec<Regex>,
    interest_patterns: Vec<Regex>,
}

impl RegexFactExtractor {
    pub fn new() -> Self {
        let compile = |patterns: &[&str]| -> Vec<Regex> {
            patterns
                .iter()
                .map(|p| Regex::new(p).expect("invalid extraction pattern"))
                .collect()
        };

        Self {
            name_patterns: compile(&[
                r"my name is (\w+)",
                r"i am (\w+)",
                r"mera naam (\w+)",
                r"main (\w+) hoon",
                r"call me (\w+)",
            ]),
            occupation_patterns: compile(&[
                r"i work as (?:a |an )?(.+?)(?:\.|$)",
                r"i am (?:a |an )(.+?)(?:\.|$)",
                r"kaam karta hoon (.+?)(?:\.|$)",
                r"kaam karti hoon (.+?)(?:\.|$)",
            ]),
            interest_patterns: compile(&[
                r"i like (.+?)(?:\.|$)",
                r"i love (.+?)(?:\.|$)",
                r"mujhe (.+?) pasand",
                r"interested in (.+?)(?:\.|$)",
            ]),
        }
    }
}

impl Default for RegexFactExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FactExtractor for RegexFactExtractor {
    fn extract_name(&self, text: &str) -> Option<String> {
        let lower = text.to_lowercase();
        for pattern in &self.name_patterns {
            if let Some(caps) = pattern.captures(&lower) {
                if let Some(name) = caps.get(1) {
                    // Articles mean "i am a ..." described an occupation, not a name
                    if name.as_str() == "a" || name.as_str() == "an" {
                        continue;
                    }
                    return Some(capitalize(name.as_str()));
                }
            }
        }
        None
    }

    fn extract_occupation(&self, text: &str) -> Option<String> {
        let lower = text.to_lowercase();
        for pattern in &self.occupation_patterns {
            if let Some(caps) = pattern.captures(&lower) {
                if let Some(m) = caps.get(1) {
                    let occupation = m.as_str().trim();
                    // Too-short captures and filler words are noise
                    if occupation.len() > 2 && occupation != "student" && occupation != "working" {
                        return Some(occupation.to_string());
                    }
                }
            }
        }
        None
    }

    fn extract_interests(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let mut interests = Vec::new();
        for pattern in &self.interest_patterns {
            if let Some(caps) = pattern.captures(&lower) {
                if let Some(m) = caps.get(1) {
                    let interest = m.as_str().trim().to_string();
                    if !interest.is_empty() && !interests.contains(&interest) {
                        interests.push(interest);
                    }
                }
            }
        }
        interests
    }

    fn is_personal_info(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        PERSONAL_KEYWORDS.iter().any(|kw| lower.contains(kw))
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
