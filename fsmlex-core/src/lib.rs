//! fsmlex Core - finite-state machine lexer runtime (pure logic, no IO)
//!
//! A graph of nodes and transitions is assembled once (by hand, by
//! [`fsm::GraphBuilder`], or by an external generator) and then driven
//! repeatedly over input text by [`fsm::FsmLexer`], one longest match per
//! call. [`tokenizer::Tokenizer`] is the loop that turns those calls into a
//! token stream.
//!
//! Configuration is passed explicitly via [`ScanOptions`], not via global state.

pub mod fsm;
pub mod tokenizer;

pub use fsm::{
    CharCheck, Cursor, EolKind, FsmLexer, FsmMatch, Graph, GraphBuildError, GraphBuilder,
    LexicalError, Node, NodeId, Token, TokenKind, TokenPosition, TokenizeError, Transition,
    TransitionCheck, START_NODE,
};
pub use tokenizer::{tokenize, Tokenizer};

// Re-export config types from fsmlex-config
pub use fsmlex_config::ScanOptions;
