//! 状态图
//!
//! Nodes live in an arena indexed by their id; outgoing transitions are kept
//! per source node in insertion order. The graph only grows: nodes and
//! transitions are appended, hooks are set or replaced.

use super::check::TransitionCheck;
use super::matching::FsmMatch;
use super::types::{NodeId, TokenKind, START_NODE};
use std::fmt;
use std::sync::Arc;

/// Rewrites the in-progress token text each time the scan lands on a node
pub type NodeAction = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Post-processes the accepted match ending on a node
pub type NodeCallback<K> = Arc<dyn Fn(FsmMatch<K>) -> FsmMatch<K> + Send + Sync>;

pub struct Node<K> {
    pub id: NodeId,
    value: Option<K>,
    action: Option<NodeAction>,
    callback: Option<NodeCallback<K>>,
}

impl<K> Node<K> {
    /// Accepting nodes carry a token kind
    pub fn is_end(&self) -> bool {
        self.value.is_some()
    }

    pub fn value(&self) -> Option<&K> {
        self.value.as_ref()
    }

    pub fn action(&self) -> Option<&NodeAction> {
        self.action.as_ref()
    }

    pub fn callback(&self) -> Option<&NodeCallback<K>> {
        self.callback.as_ref()
    }
}

impl<K: fmt::Debug> fmt::Debug for Node<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("value", &self.value)
            .field("action", &self.action.is_some())
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// 转移规则
#[derive(Debug, Clone)]
pub struct Transition {
    pub from: NodeId,
    pub to: NodeId,
    pub check: TransitionCheck,
}

impl Transition {
    pub fn new(from: NodeId, to: NodeId, check: impl Into<TransitionCheck>) -> Self {
        Self {
            from,
            to,
            check: check.into(),
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -({})-> {}", self.from, self.check, self.to)
    }
}

/// Graph store: nodes, outgoing transitions and per-node hooks
pub struct Graph<K> {
    nodes: Vec<Node<K>>,
    transitions: Vec<Vec<Transition>>,
}

impl<K: TokenKind> Graph<K> {
    /// A graph holding only the non-accepting start node
    pub fn new() -> Self {
        let mut graph = Self::empty();
        graph.add_node(None);
        graph
    }

    /// No nodes at all; the caller adds the start node first
    pub(crate) fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// 添加新节点，返回新节点ID
    ///
    /// The node is accepting iff `value` is `Some`.
    pub fn add_node(&mut self, value: Option<K>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            id,
            value,
            action: None,
            callback: None,
        });
        id
    }

    pub fn add_end_node(&mut self, kind: K) -> NodeId {
        self.add_node(Some(kind))
    }

    /// Append a transition to the outgoing list of `transition.from`.
    ///
    /// No de-duplication and no validation: edges from or to ids that are
    /// never created are kept and simply never fire.
    pub fn add_transition(&mut self, transition: Transition) {
        let from = transition.from;
        if from >= self.transitions.len() {
            self.transitions.resize_with(from + 1, Vec::new);
        }
        self.transitions[from].push(transition);
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<K>> {
        self.nodes.get(id)
    }

    pub fn start(&self) -> Option<&Node<K>> {
        self.node(START_NODE)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn has_node(&self, id: NodeId) -> bool {
        id < self.nodes.len()
    }

    pub fn transitions(&self, from: NodeId) -> &[Transition] {
        self.transitions.get(from).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First transition from `from` whose character test admits `c`.
    ///
    /// Preconditions are ignored; the run loop uses value-aware matching.
    pub fn get_transition(&self, from: NodeId, c: char) -> Option<&Transition> {
        if !self.has_node(from) {
            return None;
        }
        self.transitions(from).iter().find(|t| t.check.matches(c))
    }

    /// Value-aware move: the node reached by the first transition whose
    /// check accepts `c` given the accumulated `value`.
    pub fn step(&self, from: NodeId, c: char, value: &str) -> Option<&Node<K>> {
        self.transitions(from)
            .iter()
            .find(|t| t.check.check(c, value))
            .and_then(|t| self.node(t.to))
    }

    /// Set the node's action. Last write wins; unknown ids are ignored.
    pub fn set_action<F>(&mut self, id: NodeId, action: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.set_shared_action(id, Arc::new(action));
    }

    pub fn set_shared_action(&mut self, id: NodeId, action: NodeAction) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.action = Some(action);
        }
    }

    /// Set the node's callback. Last write wins; unknown ids are ignored.
    pub fn set_callback<F>(&mut self, id: NodeId, callback: F)
    where
        F: Fn(FsmMatch<K>) -> FsmMatch<K> + Send + Sync + 'static,
    {
        self.set_shared_callback(id, Arc::new(callback));
    }

    pub fn set_shared_callback(&mut self, id: NodeId, callback: NodeCallback<K>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.callback = Some(callback);
        }
    }

    pub fn has_action(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|node| node.action.is_some())
    }

    pub fn has_callback(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|node| node.callback.is_some())
    }
}

impl<K: TokenKind> Default for Graph<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Display for Graph<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for transition in self.transitions.iter().flatten() {
            writeln!(f, "{}", transition)?;
        }
        Ok(())
    }
}

impl<K: fmt::Debug> fmt::Debug for Graph<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("node_count", &self.nodes.len())
            .field(
                "transition_count",
                &self.transitions.iter().map(Vec::len).sum::<usize>(),
            )
            .finish()
    }
}
