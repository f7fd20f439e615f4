//! 扫描结果

use super::position::TokenPosition;
use super::types::TokenKind;
use serde_json::Value;
use std::collections::BTreeMap;

/// Token 结构
#[derive(Debug, Clone, PartialEq)]
pub struct Token<K> {
    pub kind: K,
    pub text: String,
    pub position: TokenPosition,
}

impl<K> Token<K> {
    pub fn new(kind: K, text: impl Into<String>, position: TokenPosition) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }
}

/// Outcome of one scan.
///
/// `properties` is a bag for node callbacks to attach extra data without
/// changing the token shape.
#[derive(Debug, Clone, PartialEq)]
pub struct FsmMatch<K> {
    pub is_success: bool,
    pub token: Token<K>,
    pub properties: BTreeMap<String, Value>,
    /// On failure: where an attempt that consumed input started. `None`
    /// when nothing but skippable input was left.
    pub stalled_at: Option<TokenPosition>,
}

impl<K: TokenKind> FsmMatch<K> {
    pub fn success(kind: K, text: impl Into<String>, position: TokenPosition) -> Self {
        Self {
            is_success: true,
            token: Token::new(kind, text, position),
            properties: BTreeMap::new(),
            stalled_at: None,
        }
    }

    /// No token here: default kind, empty text
    pub fn failure() -> Self {
        Self {
            is_success: false,
            token: Token::new(K::default(), String::new(), TokenPosition::default()),
            properties: BTreeMap::new(),
            stalled_at: None,
        }
    }

    /// Failure of an attempt that started at `position` and got stuck
    pub fn stalled(position: TokenPosition) -> Self {
        Self {
            stalled_at: Some(position),
            ..Self::failure()
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_property(key, value);
        self
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// The token, if the match succeeded
    pub fn into_token(self) -> Option<Token<K>> {
        self.is_success.then_some(self.token)
    }
}
