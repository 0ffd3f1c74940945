use crate::config::PlayerKind;

/// Parses the `shuffle` argument: `on` or `off`.
pub fn parse_toggle(s: &str) -> Result<bool, String> {
    match s.to_lowercase().as_str() {
        "on" => Ok(true),
        "off" => Ok(false),
        _ => Err("must be one of {on | off}".to_string()),
    }
}

pub fn parse_player_kind(s: &str) -> Result<PlayerKind, String> {
    s.parse()
}

/// Masks all but the last four characters of a secret for display.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let visible: String = secret.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), visible)
}
