//! # Messages
//!
//! Constant strings and format functions for user-facing messages:
//! degradation notices, quota guidance, and error surfaces.

pub const NOT_CONFIGURED: &str =
    "⚠️ AI not configured. Please set your GEMINI_API_KEY environment variable \
     (or configure another provider in config.yaml).";

pub const QUOTA_EXCEEDED: &str = "⚠️ **API Quota Limit Reached!**\n\n\
     Your request quota has been exceeded. Please:\n\
     1. Wait 30-60 minutes and try again\n\
     2. Check your usage with your provider\n\n\
     **Tip:** Free tiers usually reset every minute/day.";

pub const MEMORY_CLEARED: &str = "Memory cleared successfully";

pub const ACTIONS_HEADER: &str = "\n\n**Actions Performed:**\n";

pub fn model_error(err: &str) -> String {
    format!("❌ Error processing command: {err}\n\nPlease try again or check the backend logs.")
}

pub fn content_generation_failed(err: &str) -> String {
    format!("❌ Content generation failed: {err}")
}
