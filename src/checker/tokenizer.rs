/// A word of the document together with where it starts (byte offset).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub start: usize,
}

impl<'a> Token<'a> {
    pub fn new(text: &'a str, start: usize) -> Self {
        Self { text, start }
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// The word touching `cursor`, grown left and right over word characters.
///
/// A cursor past the end is clamped; one inside a multi-byte character is
/// moved back to that character's start. Returns an empty token when the
/// cursor sits between two non-word characters.
pub fn word_at(text: &str, cursor: usize) -> Token<'_> {
    let mut cursor = cursor.min(text.len());
    while !text.is_char_boundary(cursor) {
        cursor -= 1;
    }

    let start = text[..cursor]
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_word_char(*c))
        .last()
        .map_or(cursor, |(i, _)| i);

    let end = text[cursor..]
        .char_indices()
        .find(|(_, c)| !is_word_char(*c))
        .map_or(text.len(), |(i, _)| cursor + i);

    Token::new(&text[start..end], start)
}

/// Every word of `text`, in order.
pub fn words(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut word_start = None;

    for (i, c) in text.char_indices() {
        match (is_word_char(c), word_start) {
            (true, None) => word_start = Some(i),
            (false, Some(start)) => {
                tokens.push(Token::new(&text[start..i], start));
                word_start = None;
            }
            _ => {}
        }
    }

    if let Some(start) = word_start {
        tokens.push(Token::new(&text[start..], start));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_at_cursor() {
        let text = "the nigth sky";
        assert_eq!(word_at(text, 6), Token::new("nigth", 4));
        assert_eq!(word_at(text, 4), Token::new("nigth", 4));
        // cursor right after the word still touches it
        assert_eq!(word_at(text, 9), Token::new("nigth", 4));
        assert_eq!(word_at(text, 0), Token::new("the", 0));
        assert_eq!(word_at(text, 100), Token::new("sky", 10));
    }

    #[test]
    fn test_word_at_between_separators() {
        let text = "a  -  b";
        assert!(word_at(text, 3).is_empty());
        assert!(word_at("", 0).is_empty());
    }

    #[test]
    fn test_word_characters() {
        assert_eq!(word_at("snake_case2 x", 3).text, "snake_case2");
        assert_eq!(word_at("don't", 1).text, "don");
        assert_eq!(word_at("café au lait", 2).text, "café");
        // inside the two-byte é
        assert_eq!(word_at("café au lait", 4).text, "café");
    }

    #[test]
    fn test_words() {
        let tokens = words("Hello, world! snake_case");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["Hello", "world", "snake_case"]);
        assert_eq!(tokens[1].start, 7);
        assert_eq!(tokens[1].end(), 12);
        assert!(words("  ...  ").is_empty());
    }
}
