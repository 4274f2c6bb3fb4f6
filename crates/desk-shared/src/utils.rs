//! Utility functions

use uuid::Uuid;

pub fn parse_uuid(s: &str) -> Option<Uuid> {
    Uuid::parse_str(s.trim()).ok()
}

pub fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        if local.chars().count() <= 2 {
            format!("{}***{}", local.chars().take(1).collect::<String>(), domain)
        } else {
            format!("{}***{}", local.chars().take(2).collect::<String>(), domain)
        }
    } else {
        "***".to_string()
    }
}

/// Case-insensitive containment. `needle_lower` must already be lowercase.
pub fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Trims the value and drops it when nothing is left.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
