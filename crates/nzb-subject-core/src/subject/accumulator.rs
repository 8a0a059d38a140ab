//! Folds closed tokens into the ordered token list and the signature.

use crate::types::{Signature, Token, TokenKind};

/// Collects tokens in close order and keeps the signature in step with them.
///
/// `PRiVATE` directly followed by `WtFnZb` is one marker: the second token
/// is merged into the first instead of being appended, and the low nibble
/// becomes `PRiV-WtF`.
#[derive(Debug)]
pub struct SignatureAccumulator<'a> {
    source: &'a [u8],
    signature: Signature,
    tokens: Vec<Token>,
}

impl<'a> SignatureAccumulator<'a> {
    /// Starts an empty accumulator over the subject bytes the tokens index into.
    #[must_use]
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            signature: Signature::EMPTY,
            tokens: Vec::new(),
        }
    }

    /// Current signature.
    #[must_use]
    pub fn signature(&self) -> Signature {
        self.signature
    }

    /// Tokens recorded so far.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Records a closed token.
    pub fn push(&mut self, token: Token) {
        if token.kind == TokenKind::WtFnZb && self.signature.last() == TokenKind::Private {
            if let Some(previous) = self.tokens.last_mut() {
                previous.kind = TokenKind::PrivWtf;
                previous.end = token.end;
                previous.text =
                    String::from_utf8_lossy(&self.source[previous.start..previous.end])
                        .into_owned();
            }
            self.signature = self.signature.replace_last(TokenKind::PrivWtf);
            return;
        }

        self.signature = self.signature.push(token.kind);
        self.tokens.push(token);
    }

    /// Hands back the signature and the tokens.
    #[must_use]
    pub fn finish(self) -> (Signature, Vec<Token>) {
        (self.signature, self.tokens)
    }
}
