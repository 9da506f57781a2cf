use std::ops::Range;

use logos::Logos;

use crate::syntax::kind::TokenKind;

/// A lexer that wraps `logos::Lexer` and yields tokens with their byte span
/// inside the line.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
}

impl<'a> Lexer<'a> {
    pub fn new(line: &'a str) -> Self {
        Self {
            inner: TokenKind::lexer(line),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = (TokenKind, &'a str, Range<usize>);

    fn next(&mut self) -> Option<Self::Item> {
        let token_result = self.inner.next()?;
        let text = self.inner.slice();
        let span = self.inner.span();

        // Anything the patterns reject is still cell content.
        let kind = token_result.unwrap_or(TokenKind::Text);

        Some((kind, text, span))
    }
}
