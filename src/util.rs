/// Title-cases a common name for embed titles, e.g. "white-tailed deer"
/// becomes "White-tailed Deer".
pub fn title_case(name: &str) -> String {
    name.split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercases the first letter and lowercases the rest.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
