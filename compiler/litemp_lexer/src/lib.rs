//! Tokenizer for litemp templates.
//!
//! Splits template text into four token kinds using the delimiter pairs
//! `{{ }}`, `{% %}` and `{# #}`. Each directive runs up to the *first*
//! matching closer (non-greedy), and the leftmost opener wins. An opener
//! without a closer is ordinary text.
//!
//! Tokens borrow from the source and tile it exactly: concatenating every
//! token's text reproduces the input, and empty text runs between adjacent
//! directives are never produced.

use litemp_ir::Span;
use memchr::{memchr, memmem};

/// Classification of a template fragment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Literal text.
    Text,
    /// `{{ ... }}`
    Expression,
    /// `{% ... %}`
    Tag,
    /// `{# ... #}`
    Comment,
}

impl TokenKind {
    /// Kind introduced by the byte after `{`, with its closing delimiter.
    fn from_opener(byte: u8) -> Option<(TokenKind, &'static [u8])> {
        match byte {
            b'{' => Some((TokenKind::Expression, b"}}")),
            b'%' => Some((TokenKind::Tag, b"%}")),
            b'#' => Some((TokenKind::Comment, b"#}")),
            _ => None,
        }
    }
}

/// A classified fragment of the template text.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    /// Full fragment, delimiters included.
    pub text: &'src str,
    pub span: Span,
}

impl<'src> Token<'src> {
    /// Directive content without delimiters and surrounding whitespace.
    ///
    /// For `Text` tokens this is the text itself, unstripped.
    pub fn interior(&self) -> &'src str {
        match self.kind {
            TokenKind::Text => self.text,
            TokenKind::Expression | TokenKind::Tag | TokenKind::Comment => {
                self.text[2..self.text.len() - 2].trim()
            }
        }
    }
}

/// Iterator over the tokens of a template.
#[derive(Clone, Debug)]
pub struct Lexer<'src> {
    source: &'src str,
    /// Start of the text run not yet emitted.
    pos: usize,
    /// A directive found after a text run, emitted on the next call.
    pending: Option<Token<'src>>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            source,
            pos: 0,
            pending: None,
        }
    }

    fn token(&self, kind: TokenKind, range: std::ops::Range<usize>) -> Token<'src> {
        Token {
            kind,
            text: &self.source[range.clone()],
            span: Span::from_range(range),
        }
    }

    /// Find the next complete directive at or after `from`.
    ///
    /// Returns its kind and byte range.
    fn find_directive(&self, from: usize) -> Option<(TokenKind, std::ops::Range<usize>)> {
        let bytes = self.source.as_bytes();
        let mut search = from;
        while let Some(offset) = memchr(b'{', &bytes[search..]) {
            let open = search + offset;
            let opener = bytes.get(open + 1).copied().and_then(TokenKind::from_opener);
            if let Some((kind, closer)) = opener {
                let body = open + 2;
                if let Some(close) = memmem::find(&bytes[body..], closer) {
                    return Some((kind, open..body + close + 2));
                }
            }
            search = open + 1;
        }
        None
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Token<'src>> {
        if let Some(token) = self.pending.take() {
            return Some(token);
        }
        if self.pos >= self.source.len() {
            return None;
        }
        let start = self.pos;
        match self.find_directive(start) {
            Some((kind, range)) => {
                self.pos = range.end;
                let directive = self.token(kind, range.clone());
                if range.start > start {
                    self.pending = Some(directive);
                    Some(self.token(TokenKind::Text, start..range.start))
                } else {
                    Some(directive)
                }
            }
            None => {
                self.pos = self.source.len();
                Some(self.token(TokenKind::Text, start..self.source.len()))
            }
        }
    }
}

/// Tokenize a whole template.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    Lexer::new(source).collect()
}
