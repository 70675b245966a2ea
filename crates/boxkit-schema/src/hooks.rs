use crate::types::HookFragment;
use tracing::warn;

/// Placeholder every chain starts from, so the result is valid shell even
/// when nothing decodes.
pub const EMPTY_CHAIN: &str = ": ;";

fn ends_with_terminator(text: &str) -> bool {
    let text = text.trim_end();
    text.ends_with(';') || text.ends_with("&&")
}

/// Join encoded hook fragments into one shell command chain.
///
/// Fragments are joined with `&&` unless the previous fragment already ends in
/// `;` or `&&`. Empty or undecodable fragments are skipped.
pub fn decode_hooks(fragments: &[HookFragment]) -> String {
    let mut chain = String::from(EMPTY_CHAIN);
    let mut separator = "";

    for fragment in fragments {
        if fragment.is_empty() {
            continue;
        }
        let Some(decoded) = fragment.decode() else {
            warn!("skipping hook fragment that does not decode");
            continue;
        };

        chain.push(' ');
        chain.push_str(separator);
        chain.push(' ');
        chain.push_str(&decoded);

        separator = if ends_with_terminator(&decoded) {
            ""
        } else {
            "&&"
        };
    }

    chain
}
