use wren_common::warning::warn_once;

use super::character_reference::decode_character_reference;
use super::token::Token;

/// Elements whose content is never rendered as text.
pub const IGNORABLE_ELEMENTS: [&str; 2] = ["script", "style"];

/// Single-pass markup tokenizer.
///
/// Text outside brackets accumulates in a buffer that is flushed as a
/// [`Token::Text`] whenever a tag starts. Malformed input never fails: an
/// unterminated tag or an ignorable element with no closing tag ends the
/// scan, and the problem is recorded in this tokenizer's
/// [`issues`](Self::issues). It is also printed once through
/// [`warn_once`](wren_common::warning::warn_once).
pub struct HTMLTokenizer {
    pub(super) input: String,
    pub(super) current_pos: usize,
    /// Text seen since the last tag, not yet emitted.
    pub(super) text_buffer: String,
    pub(super) token_stream: Vec<Token>,
    /// Malformed input tolerated during this scan, in the order found.
    pub(super) issues: Vec<String>,
}

impl HTMLTokenizer {
    /// Create a tokenizer over `input`.
    #[must_use]
    pub const fn new(input: String) -> Self {
        Self {
            input,
            current_pos: 0,
            text_buffer: String::new(),
            token_stream: Vec::new(),
            issues: Vec::new(),
        }
    }

    /// Scan the whole input.
    pub fn run(&mut self) {
        while let Some(offset) = self.remaining().find(['<', '&']) {
            self.consume_text(offset);
            let keep_going = if self.remaining().starts_with('<') {
                self.consume_tag()
            } else {
                self.consume_character_reference();
                true
            };
            if !keep_going {
                break;
            }
        }
        let rest = self.remaining().len();
        self.consume_text(rest);
        self.flush_text();
    }

    /// Tokens produced so far.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.token_stream
    }

    /// Problems found in the input so far.
    #[must_use]
    pub fn issues(&self) -> &[String] {
        &self.issues
    }

    /// Consume the tokenizer and return its tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.token_stream
    }

    /// Consume the tokenizer and return its tokens and issues.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Token>, Vec<String>) {
        (self.token_stream, self.issues)
    }

    /// Handle the `<` at the current position. Returns false when scanning
    /// must stop.
    fn consume_tag(&mut self) -> bool {
        self.flush_text();

        let content_start = self.current_pos + 1;
        let Some(length) = self.input[content_start..].find('>') else {
            self.report("unterminated tag at end of input; dropping the rest".to_string());
            self.current_pos = self.input.len();
            return false;
        };

        let token = Token::tag(&self.input[content_start..content_start + length]);
        self.current_pos = content_start + length + 1;

        let ignorable = token
            .tag_name()
            .filter(|name| IGNORABLE_ELEMENTS.contains(name))
            .map(str::to_string);
        self.emit(token);

        match ignorable {
            Some(name) => self.skip_element_content(&name),
            None => true,
        }
    }

    /// Skip past `</name>`. Returns false (and stops at end of input) when
    /// the closing tag never appears.
    fn skip_element_content(&mut self, name: &str) -> bool {
        let closing = format!("</{name}>");
        if let Some(offset) = self.find_ignoring_ascii_case(&closing) {
            self.current_pos += offset + closing.len();
            true
        } else {
            self.report(format!(
                "<{name}> element is never closed; dropping the rest of the document"
            ));
            self.current_pos = self.input.len();
            false
        }
    }

    /// Record a tolerated problem with the input.
    fn report(&mut self, message: String) {
        warn_once("HTML", &message);
        self.issues.push(message);
    }

    /// Handle the `&` at the current position.
    fn consume_character_reference(&mut self) {
        match decode_character_reference(self.remaining()) {
            Some((decoded, consumed)) => {
                self.text_buffer.push(decoded);
                self.current_pos += consumed;
            }
            None => {
                self.text_buffer.push('&');
                self.current_pos += 1;
            }
        }
    }
}

/// Tokenize `body` into text and tag tokens in document order.
#[must_use]
pub fn lex(body: &str) -> Vec<Token> {
    let mut tokenizer = HTMLTokenizer::new(body.to_string());
    tokenizer.run();
    tokenizer.into_tokens()
}

/// Tokenize `body`, also returning the problems found in it.
///
/// The issues belong to this call alone, so concurrent scans never see
/// each other's problems.
#[must_use]
pub fn lex_with_issues(body: &str) -> (Vec<Token>, Vec<String>) {
    let mut tokenizer = HTMLTokenizer::new(body.to_string());
    tokenizer.run();
    tokenizer.into_parts()
}
