//! Tokenizer 主循环
//!
//! Drives [`FsmLexer::run`] once per token until input is exhausted or an
//! error stops it. The driver also owns what the engine leaves to callers:
//! - an attempt that consumed input but matched nothing is an error
//!   ([`TokenizeError::Incomplete`]), not the end of input
//! - end-of-line tokens move the cursor to the next line
//! - consecutive end-of-line tokens are coalesced when `aggregate_eol` is set

use crate::fsm::{eol, FsmLexer, Token, TokenKind, TokenizeError};
use tracing::{trace, warn};

const BYTE_ORDER_MARK: char = '\u{FEFF}';

pub struct Tokenizer<'l, 's, K> {
    lexer: &'l mut FsmLexer<K>,
    source: &'s [char],
    pending: Option<Result<Token<K>, TokenizeError>>,
    done: bool,
}

impl<'l, 's, K: TokenKind> Tokenizer<'l, 's, K> {
    /// Rewinds the lexer to the beginning of `source`, past a leading
    /// byte-order mark if there is one.
    pub fn new(lexer: &'l mut FsmLexer<K>, source: &'s [char]) -> Self {
        if source.first() == Some(&BYTE_ORDER_MARK) {
            trace!(target: "fsmlex::lexer", "Skipping byte-order mark");
            lexer.move_to(1, 0, 0);
        } else {
            lexer.move_to(0, 0, 0);
        }
        Self {
            lexer,
            source,
            pending: None,
            done: false,
        }
    }

    fn scan(&mut self) -> Option<Result<Token<K>, TokenizeError>> {
        if self.done {
            return None;
        }
        match self.lexer.run(self.source) {
            Ok(m) if m.is_success => {
                if m.token.kind.is_end_of_line() {
                    self.next_line(&m.token);
                }
                Some(Ok(m.token))
            }
            Ok(m) => {
                self.done = true;
                let start = m.stalled_at?;
                let err = TokenizeError::Incomplete {
                    line: start.line,
                    column: start.column,
                };
                warn!(target: "fsmlex::lexer", "{}", err);
                Some(Err(err))
            }
            Err(err) => {
                self.done = true;
                Some(Err(err.into()))
            }
        }
    }

    /// The engine only advances the column over an end-of-line token
    fn next_line(&mut self, token: &Token<K>) {
        let cursor = self.lexer.cursor();
        let consumed = self
            .source
            .get(token.position.index..cursor.position)
            .unwrap_or(&[]);
        let lines = eol::count_line_ends(consumed);
        if lines > 0 {
            self.lexer.move_to(cursor.position, cursor.line + lines, 0);
        }
    }
}

impl<K: TokenKind> Iterator for Tokenizer<'_, '_, K> {
    type Item = Result<Token<K>, TokenizeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = match self.pending.take() {
            Some(item) => item,
            None => self.scan()?,
        };
        let mut token = match first {
            Ok(token) => token,
            Err(err) => return Some(Err(err)),
        };

        if self.lexer.options().aggregate_eol && token.kind.is_end_of_line() {
            while let Some(next) = self.scan() {
                match next {
                    Ok(eol) if eol.kind.is_end_of_line() => token.text.push_str(&eol.text),
                    other => {
                        self.pending = Some(other);
                        break;
                    }
                }
            }
        }
        Some(Ok(token))
    }
}

/// Scan all of `source`, stopping at the first error
pub fn tokenize<K: TokenKind>(
    lexer: &mut FsmLexer<K>,
    source: &[char],
) -> Result<Vec<Token<K>>, TokenizeError> {
    Tokenizer::new(lexer, source).collect()
}
