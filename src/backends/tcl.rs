// Copyright 2026 Cornell University
// released under MIT License

//! Helpers shared by the Tcl script backends.

use std::borrow::Cow;

fn is_special(c: char) -> bool {
    c.is_whitespace() || matches!(c, '{' | '}' | '[' | ']' | '$' | '"' | ';' | '\\')
}

fn braces_balance(word: &str) -> bool {
    let mut depth = 0usize;
    for c in word.chars() {
        match c {
            '{' => depth += 1,
            '}' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}

/// Quotes `word` so that the Tcl parser reads it back as exactly one word
/// with the same content.
///
/// Plain words are emitted as-is. Words with special characters are wrapped in
/// braces when that is safe (balanced braces, no backslashes), otherwise every
/// special character is escaped with a backslash.
pub fn quote(word: &str) -> Cow<'_, str> {
    if word.is_empty() {
        return Cow::Borrowed("{}");
    }
    if !word.starts_with('#') && !word.chars().any(is_special) {
        return Cow::Borrowed(word);
    }
    if !word.contains('\\') && braces_balance(word) {
        return Cow::Owned(format!("{{{word}}}"));
    }
    let mut escaped = String::with_capacity(word.len() * 2);
    for (ii, c) in word.chars().enumerate() {
        match c {
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '#' if ii == 0 => escaped.push_str("\\#"),
            c if is_special(c) => {
                escaped.push('\\');
                escaped.push(c);
            }
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Builds a Tcl list from `items`, quoting each element
pub fn list<S: AsRef<str>>(items: impl IntoIterator<Item = S>) -> String {
    items
        .into_iter()
        .map(|item| quote(item.as_ref()).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Turns an alias name into something that can be used after `$` in a
/// variable reference: everything outside `[A-Za-z0-9_]` becomes `_`.
pub fn ident(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_words_stay_bare() {
        assert_eq!(quote("IDLE"), "IDLE");
        assert_eq!(quote("top/fsm/state"), "top/fsm/state");
        assert_eq!(quote("0a"), "0a");
    }

    #[test]
    fn brackets_and_spaces_are_braced() {
        assert_eq!(quote("top.fsm.state[1:0]"), "{top.fsm.state[1:0]}");
        assert_eq!(quote("WAIT ACK"), "{WAIT ACK}");
        assert_eq!(quote("$pc"), "{$pc}");
        assert_eq!(quote("#1"), "{#1}");
        assert_eq!(quote(""), "{}");
    }

    #[test]
    fn unbalanced_braces_are_escaped() {
        assert_eq!(quote("a}b"), "a\\}b");
        assert_eq!(quote("{open"), "\\{open");
        assert_eq!(quote("back\\slash"), "back\\\\slash");
        assert_eq!(quote("x {y"), "x\\ \\{y");
    }

    #[test]
    fn lists() {
        assert_eq!(list(["a", "b c", "d[0]"]), "a {b c} {d[0]}");
        assert_eq!(list(Vec::<String>::new()), "");
    }

    #[test]
    fn identifiers() {
        assert_eq!(ident("state"), "state");
        assert_eq!(ident("Opcode_t"), "Opcode_t");
        assert_eq!(ident("my-enum.v2"), "my_enum_v2");
    }
}
