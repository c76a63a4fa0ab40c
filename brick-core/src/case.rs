//! Case conversion for template identifiers.
//!
//! Every conversion goes through [`split_words`], so already-cased input can be
//! re-cased freely: `MyProject`, `my_project` and `my-project` all produce the
//! same words.

/// Split a string into words.
///
/// Splits on `_`, `-`, `.`, `/` and whitespace, and on case boundaries:
/// lower or digit followed by upper (`myApp` -> `my`, `App`), and the last
/// capital of an acronym run followed by a lowercase letter
/// (`HTTPServer` -> `HTTP`, `Server`).
pub fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if is_separator(c) {
            flush(&mut words, &mut current);
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower)
            {
                flush(&mut words, &mut current);
            }
        }

        current.push(c);
    }
    flush(&mut words, &mut current);

    words
}

fn is_separator(c: char) -> bool {
    matches!(c, '_' | '-' | '.' | '/') || c.is_whitespace()
}

fn flush(words: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}

/// Uppercase the first character and lowercase the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
    }
}

fn join_lower(s: &str, sep: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(sep)
}

fn join_capitalized(s: &str, sep: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| capitalize(w))
        .collect::<Vec<_>>()
        .join(sep)
}

/// Convert a string to snake_case (e.g., "My Cool App" -> "my_cool_app")
pub fn to_snake_case(s: &str) -> String {
    join_lower(s, "_")
}

/// Convert a string to kebab-case (e.g., "MyCoolApp" -> "my-cool-app")
pub fn to_kebab_case(s: &str) -> String {
    join_lower(s, "-")
}

/// Convert a string to dot.case (e.g., "my_cool_app" -> "my.cool.app")
pub fn to_dot_case(s: &str) -> String {
    join_lower(s, ".")
}

/// Convert a string to path/case (e.g., "com.example" -> "com/example")
pub fn to_path_case(s: &str) -> String {
    join_lower(s, "/")
}

/// Convert a string to CONSTANT_CASE (e.g., "myCoolApp" -> "MY_COOL_APP")
pub fn to_constant_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| w.to_uppercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Convert a string to Title Case (e.g., "my_cool_app" -> "My Cool App")
pub fn to_title_case(s: &str) -> String {
    join_capitalized(s, " ")
}

/// Convert a string to Header-Case (e.g., "my_cool_app" -> "My-Cool-App")
pub fn to_header_case(s: &str) -> String {
    join_capitalized(s, "-")
}

/// Convert a string to PascalCase (e.g., "hello_world" -> "HelloWorld")
pub fn to_pascal_case(s: &str) -> String {
    join_capitalized(s, "")
}

/// Convert a string to camelCase (e.g., "hello_world" -> "helloWorld")
pub fn to_camel_case(s: &str) -> String {
    let words = split_words(s);
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(&word.to_lowercase());
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

/// Convert a string to Sentence case (e.g., "MyCoolApp" -> "My cool app")
pub fn to_sentence_case(s: &str) -> String {
    let words = split_words(s);
    let mut out = Vec::with_capacity(words.len());
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push(capitalize(word));
        } else {
            out.push(word.to_lowercase());
        }
    }
    out.join(" ")
}

/// Uppercase the whole string, separators included.
pub fn to_upper_case(s: &str) -> String {
    s.to_uppercase()
}

/// Lowercase the whole string, separators included.
pub fn to_lower_case(s: &str) -> String {
    s.to_lowercase()
}
