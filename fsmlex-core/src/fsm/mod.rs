//! Finite-state machine lexer
//!
//! - `check`    - per-character transition guards with optional preconditions
//! - `graph`    - node/transition arena with per-node hooks
//! - `builder`  - fluent graph construction and common token recipes
//! - `engine`   - the longest-match run loop
//! - `matching` - match results and tokens
//! - `position` - cursor and token positions (0-based)

pub mod builder;
pub mod check;
pub mod engine;
pub mod eol;
pub mod error;
pub mod graph;
pub mod matching;
pub mod position;
pub mod types;

pub use builder::GraphBuilder;
pub use check::{CharCheck, TransitionCheck};
pub use engine::FsmLexer;
pub use eol::EolKind;
pub use error::{GraphBuildError, LexicalError, TokenizeError};
pub use graph::{Graph, Node, NodeAction, NodeCallback, Transition};
pub use matching::{FsmMatch, Token};
pub use position::{Cursor, TokenPosition};
pub use types::{NodeId, TokenKind, START_NODE};
