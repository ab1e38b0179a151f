//! Token to replacement-text mapping

use crate::Token;
use std::collections::BTreeMap;

/// Replacement values keyed by token, iterated in token declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders {
    values: BTreeMap<Token, String>,
}

impl Placeholders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the replacement for `token`, replacing any previous value
    pub fn insert(&mut self, token: Token, value: impl Into<String>) -> &mut Self {
        self.values.insert(token, value.into());
        self
    }

    pub fn get(&self, token: Token) -> Option<&str> {
        self.values.get(&token).map(String::as_str)
    }

    pub fn contains(&self, token: Token) -> bool {
        self.values.contains_key(&token)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn tokens(&self) -> impl Iterator<Item = Token> + '_ {
        self.values.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Token, &str)> {
        self.values.iter().map(|(token, value)| (*token, value.as_str()))
    }
}

impl<V: Into<String>> FromIterator<(Token, V)> for Placeholders {
    fn from_iter<I: IntoIterator<Item = (Token, V)>>(iter: I) -> Self {
        let mut placeholders = Placeholders::new();
        placeholders.extend(iter);
        placeholders
    }
}

impl<V: Into<String>> Extend<(Token, V)> for Placeholders {
    fn extend<I: IntoIterator<Item = (Token, V)>>(&mut self, iter: I) {
        for (token, value) in iter {
            self.insert(token, value);
        }
    }
}
