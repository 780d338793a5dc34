//! Punctuation filtering
//!
//!     Reduces chunk-free text to the characters a word recognizer cares about: alphanumerics,
//!     hyphens, apostrophes and spaces. Other whitespace (line breaks, tabs) is not on that list
//!     but is not dropped either: it becomes a single space. Dropping it would glue the words of
//!     `one\ntwo` into `onetwo`, which no recognized word matches.
//!
//!     Tag regions are copied verbatim. A single flag tracks whether we are inside a tag: `[`
//!     sets it and `]` clears it, and both brackets are always copied, so the output has exactly
//!     as many brackets as the input.

/// True for characters kept outside of tag brackets
pub fn is_allowed(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '\'' || c == ' '
}

/// Filter `text` down to the allow-listed characters, leaving tag regions untouched.
pub fn filter_punctuation(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut inside_tag = false;

    for c in text.chars() {
        match c {
            '[' => {
                inside_tag = true;
                output.push(c);
            }
            ']' => {
                inside_tag = false;
                output.push(c);
            }
            _ if inside_tag => output.push(c),
            _ if is_allowed(c) => output.push(c),
            _ if c.is_whitespace() => output.push(' '),
            _ => {}
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_punctuation() {
        assert_eq!(filter_punctuation("Hello, world!"), "Hello world");
    }

    #[test]
    fn test_keeps_hyphen_and_apostrophe() {
        assert_eq!(filter_punctuation("It's a well-known fact."), "It's a well-known fact");
    }

    #[test]
    fn test_keeps_tag_content_verbatim() {
        assert_eq!(
            filter_punctuation("Oh! [happy duration=1.2, v2=0.5]yes.[/happy]"),
            "Oh [happy duration=1.2, v2=0.5]yes[/happy]"
        );
    }

    #[test]
    fn test_line_breaks_become_spaces() {
        assert_eq!(filter_punctuation("one\ntwo\tthree"), "one two three");
    }

    #[test]
    fn test_keeps_unicode_letters() {
        assert_eq!(filter_punctuation("Ça va? Très bien."), "Ça va Très bien");
    }

    #[test]
    fn test_bracket_count_is_preserved() {
        let input = "a ] b [c [d] e] f [";
        let output = filter_punctuation(input);
        let count = |s: &str| s.chars().filter(|c| *c == '[' || *c == ']').count();
        assert_eq!(count(&output), count(input));
    }
}
