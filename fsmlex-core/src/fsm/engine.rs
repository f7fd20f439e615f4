//! Longest-match scan engine
//!
//! [`FsmLexer::run`] scans one token from the current cursor:
//!
//! 1. skip whitespace / end-of-line (only before the first token character)
//! 2. follow the first transition whose check accepts the next character
//!    given the text accumulated so far
//! 3. every accepting node reached pushes a candidate; the last pushed is
//!    the longest
//! 4. when no transition fires, pop the longest candidate, rewind the
//!    cursor to just after it, and apply the winning node's callback
//!
//! One lexer instance is one reader: the cursor is carried between runs.
//! Share the graph (`Arc<Graph<K>>`) and give each concurrent scan its own
//! lexer.

use super::eol;
use super::error::LexicalError;
use super::graph::Graph;
use super::matching::FsmMatch;
use super::position::Cursor;
use super::types::{NodeId, TokenKind, START_NODE};
use fsmlex_config::ScanOptions;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// An accepting prefix found during the current attempt
struct Candidate<K> {
    result: FsmMatch<K>,
    node: NodeId,
    cursor_after: Cursor,
}

pub struct FsmLexer<K> {
    graph: Arc<Graph<K>>,
    options: ScanOptions,
    cursor: Cursor,
}

impl<K: TokenKind> FsmLexer<K> {
    pub fn new(graph: impl Into<Arc<Graph<K>>>, options: ScanOptions) -> Self {
        let graph = graph.into();
        debug!(
            target: "fsmlex::lexer",
            nodes = graph.node_count(),
            ignore_whitespace = options.ignore_whitespace,
            ignore_eol = options.ignore_eol,
            "Creating FSM lexer"
        );
        Self {
            graph,
            options,
            cursor: Cursor::default(),
        }
    }

    pub fn graph(&self) -> &Arc<Graph<K>> {
        &self.graph
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Reposition the cursor, e.g. after skipping a byte-order mark
    pub fn move_to(&mut self, position: usize, line: usize, column: usize) {
        self.cursor = Cursor::new(position, line, column);
    }

    /// Scan from the current cursor
    pub fn run(&mut self, source: &[char]) -> Result<FsmMatch<K>, LexicalError> {
        let start = self.cursor.position;
        self.run_from(source, start)
    }

    /// Scan from `start`, overriding the cursor position (line and column
    /// are kept as they are).
    ///
    /// Returns a failure match when input is exhausted or an attempt that
    /// made progress never reached an accepting node; in the latter case
    /// `stalled_at` holds where that attempt started. Returns an error only
    /// when the very first character of a fresh attempt has no transition.
    pub fn run_from(&mut self, source: &[char], start: usize) -> Result<FsmMatch<K>, LexicalError> {
        self.cursor.position = start;

        let mut successes: Vec<Candidate<K>> = Vec::new();
        let mut current = Some(START_NODE);
        let mut last_node = START_NODE;
        let mut token_started = false;
        let mut value = String::new();
        let mut token_position = self.cursor.token_position();

        while self.cursor.position < source.len() {
            if !token_started {
                self.skip_blanks(source, &mut current, !successes.is_empty());
            }
            let Some(from) = current else {
                break;
            };
            let Some(&c) = source.get(self.cursor.position) else {
                break;
            };

            match self.graph.step(from, c, &value) {
                Some(node) => {
                    trace!(target: "fsmlex::lexer", from, to = node.id, ch = ?c, "Transition");
                    current = Some(node.id);
                    last_node = node.id;
                    value.push(c);

                    if !token_started {
                        token_started = true;
                        token_position = self.cursor.token_position();
                    }
                    self.cursor.advance();

                    if let Some(kind) = node.value() {
                        successes.push(Candidate {
                            result: FsmMatch::success(kind.clone(), value.clone(), token_position),
                            node: node.id,
                            cursor_after: self.cursor,
                        });
                    }

                    if let Some(action) = node.action() {
                        value = action(&value);
                    }
                }
                None => {
                    current = None;
                    if last_node == START_NODE && !token_started && successes.is_empty() {
                        let err = LexicalError::new(self.cursor.line, self.cursor.column, c);
                        warn!(target: "fsmlex::lexer", "{}", err);
                        return Err(err);
                    }
                }
            }
        }

        let Some(Candidate {
            result,
            node,
            cursor_after,
        }) = successes.pop()
        else {
            trace!(target: "fsmlex::lexer", position = self.cursor.position, "No token");
            if token_started {
                return Ok(FsmMatch::stalled(token_position));
            }
            return Ok(FsmMatch::failure());
        };

        // 回退到最长匹配之后
        self.cursor = cursor_after;
        let result = match self.graph.node(node).and_then(|n| n.callback()) {
            Some(callback) => callback(result),
            None => result,
        };
        debug!(
            target: "fsmlex::lexer",
            kind = ?result.token.kind,
            text = %result.token.text,
            line = result.token.position.line,
            column = result.token.position.column,
            "Accepted token"
        );
        Ok(result)
    }

    /// Skip whitespace and end-of-line sequences before a token starts.
    ///
    /// Skipping restarts from the start node, or stops the attempt when a
    /// match was already recorded.
    fn skip_blanks(&mut self, source: &[char], current: &mut Option<NodeId>, has_success: bool) {
        while let Some(&c) = source.get(self.cursor.position) {
            if self.options.skips_whitespace(c) {
                self.cursor.advance();
            } else {
                let eol = eol::detect(source, self.cursor.position);
                if !(self.options.ignore_eol && eol.is_eol()) {
                    break;
                }
                self.cursor.new_line(eol.width());
            }
            trace!(target: "fsmlex::lexer", ch = ?c, "Skipped");
            *current = if has_success { None } else { Some(START_NODE) };
        }
    }
}

impl<K> Clone for FsmLexer<K> {
    /// A fresh reader over the same graph, with a copy of the cursor
    fn clone(&self) -> Self {
        Self {
            graph: Arc::clone(&self.graph),
            options: self.options.clone(),
            cursor: self.cursor,
        }
    }
}

impl<K: TokenKind> std::fmt::Debug for FsmLexer<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FsmLexer")
            .field("graph", &self.graph)
            .field("options", &self.options)
            .field("cursor", &self.cursor)
            .finish()
    }
}
