//! One-time report of a minted key.
//!
//! This is the only place the raw secret leaves the process: the binaries
//! print the rendered text to stdout once and never log it.

use std::fmt::{self, Write};

use crate::application::ProvisionedKey;
use crate::support::ProvisionError;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Render the success banner with the prefixed key and a `curl` example.
pub fn render_report(key: &ProvisionedKey, usage_url: &str) -> String {
    let mut out = String::new();
    // Writing into a `String` never fails.
    write_report(&mut out, key, usage_url).map(|()| out).unwrap_or_default()
}

fn write_report(out: &mut impl Write, key: &ProvisionedKey, usage_url: &str) -> fmt::Result {
    let expires = match key.api_key.expires_at {
        Some(at) => at.to_rfc3339(),
        None => "Never".to_string(),
    };

    writeln!(out)?;
    writeln!(out, "🎉 API Key created successfully!")?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "🔑 API Key: {}", key.prefixed_key)?;
    writeln!(out, "👤 User ID: {}", key.user.id)?;
    writeln!(out, "🆔 Key ID: {}", key.api_key.id)?;
    if let Some(note) = &key.api_key.note {
        writeln!(out, "📝 Note: {}", note)?;
    }
    writeln!(out, "⏰ Expires: {}", expires)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)?;
    writeln!(out, "📖 Usage:")?;
    writeln!(
        out,
        "curl -H \"Authorization: Bearer {}\" \\",
        key.prefixed_key
    )?;
    writeln!(out, "     {}", usage_url)?;
    writeln!(out)?;
    writeln!(
        out,
        "⚠️  IMPORTANT: Save this API key securely - it won't be shown again!"
    )
}

/// Render an error with its operator hint, if any.
pub fn render_failure(err: &ProvisionError) -> String {
    match err.hint() {
        Some(hint) => format!("❌ {}\n💡 {}", err, hint),
        None => format!("❌ {}", err),
    }
}
