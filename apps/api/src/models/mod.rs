pub mod candidate;
pub mod interview;
pub mod job;
pub mod notification;

use uuid::Uuid;

/// Generates a new opaque record identifier.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generates a short, prefixed identifier such as `INT_1a2b3c4d`.
pub fn prefixed_id(prefix: &str) -> String {
    let simple = Uuid::new_v4().simple().to_string();
    format!("{prefix}_{}", &simple[..8])
}

/// Turns a snake_case enum label into a human-readable title ("on_hold" → "On Hold").
pub fn title_case(label: &str) -> String {
    label
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
