use std::fmt;

/// 节点ID，同时也是节点在图中的下标
pub type NodeId = usize;

/// 起始节点，每次扫描都从这里出发
pub const START_NODE: NodeId = 0;

/// Token kinds carried by accepting nodes.
///
/// `Default` is the non-terminal sentinel, used as the kind of a failed match.
pub trait TokenKind: fmt::Debug + Clone + PartialEq + Default + Send + Sync + 'static {
    /// Whether tokens of this kind are end-of-line tokens.
    ///
    /// Only the tokenizer driver looks at this, to coalesce consecutive
    /// end-of-line tokens when `aggregate_eol` is set.
    fn is_end_of_line(&self) -> bool {
        false
    }
}
