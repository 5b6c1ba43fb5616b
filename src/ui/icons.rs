//! Shared UI icons.
//!
//! Each icon falls back to a plain-text marker on terminals without emoji
//! support.

use console::Emoji;

// Status indicators
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK]");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[ERR]");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[WARN]");

// Catalog indicators
pub static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "");
pub static PIN: Emoji<'_, '_> = Emoji("📍", "*");
pub static ARROW: Emoji<'_, '_> = Emoji("→", "->");
