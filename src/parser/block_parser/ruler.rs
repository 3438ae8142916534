//! Ordered registry of block rules.
//!
//! Every rule has a unique name and may belong to any number of
//! alternation chains. A chain named after a block type (`paragraph`,
//! `blockquote`, `list`, ...) lists the rules that are allowed to interrupt
//! that block; they are probed in silent mode while the block scans ahead.

use std::fmt;
use std::sync::Arc;

use super::state::BlockState;

/// A block rule: `(state, start_line, end_line, silent) -> matched`.
///
/// In silent mode a rule must only report whether it would match, without
/// pushing tokens or moving `state.line`.
pub type BlockRuleFn = Arc<dyn Fn(&mut BlockState<'_>, usize, usize, bool) -> bool + Send + Sync>;

/// Errors raised while editing the rule list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulerError {
    /// The anchor rule passed to `before`/`after`/`enable`/`disable` is not registered.
    UnknownRule(String),
    /// A rule with this name is already registered.
    DuplicateRule(String),
}

impl fmt::Display for RulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRule(name) => write!(f, "unknown block rule: {}", name),
            Self::DuplicateRule(name) => write!(f, "block rule already registered: {}", name),
        }
    }
}

impl std::error::Error for RulerError {}

struct Rule {
    name: String,
    enabled: bool,
    func: BlockRuleFn,
    alt: Vec<String>,
}

#[derive(Default)]
pub struct BlockRuler {
    rules: Vec<Rule>,
}

impl BlockRuler {
    pub fn new() -> Self {
        Self::default()
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.rules.iter().position(|rule| rule.name == name)
    }

    fn make_rule(&self, name: &str, func: BlockRuleFn, alt: &[&str]) -> Result<Rule, RulerError> {
        if self.find(name).is_some() {
            return Err(RulerError::DuplicateRule(name.to_string()));
        }
        Ok(Rule {
            name: name.to_string(),
            enabled: true,
            func,
            alt: alt.iter().map(|chain| chain.to_string()).collect(),
        })
    }

    /// Append a rule at the end of the list.
    pub fn push<F>(&mut self, name: &str, func: F, alt: &[&str]) -> Result<(), RulerError>
    where
        F: Fn(&mut BlockState<'_>, usize, usize, bool) -> bool + Send + Sync + 'static,
    {
        let rule = self.make_rule(name, Arc::new(func), alt)?;
        self.rules.push(rule);
        Ok(())
    }

    /// Insert a rule directly before `before_name`.
    pub fn before<F>(
        &mut self,
        before_name: &str,
        name: &str,
        func: F,
        alt: &[&str],
    ) -> Result<(), RulerError>
    where
        F: Fn(&mut BlockState<'_>, usize, usize, bool) -> bool + Send + Sync + 'static,
    {
        let idx = self
            .find(before_name)
            .ok_or_else(|| RulerError::UnknownRule(before_name.to_string()))?;
        let rule = self.make_rule(name, Arc::new(func), alt)?;
        self.rules.insert(idx, rule);
        Ok(())
    }

    /// Insert a rule directly after `after_name`.
    pub fn after<F>(
        &mut self,
        after_name: &str,
        name: &str,
        func: F,
        alt: &[&str],
    ) -> Result<(), RulerError>
    where
        F: Fn(&mut BlockState<'_>, usize, usize, bool) -> bool + Send + Sync + 'static,
    {
        let idx = self
            .find(after_name)
            .ok_or_else(|| RulerError::UnknownRule(after_name.to_string()))?;
        let rule = self.make_rule(name, Arc::new(func), alt)?;
        self.rules.insert(idx + 1, rule);
        Ok(())
    }

    pub fn enable(&mut self, name: &str) -> Result<(), RulerError> {
        self.set_enabled(name, true)
    }

    pub fn disable(&mut self, name: &str) -> Result<(), RulerError> {
        self.set_enabled(name, false)
    }

    fn set_enabled(&mut self, name: &str, enabled: bool) -> Result<(), RulerError> {
        let idx = self
            .find(name)
            .ok_or_else(|| RulerError::UnknownRule(name.to_string()))?;
        self.rules[idx].enabled = enabled;
        Ok(())
    }

    /// Enabled rules of a chain, in order. The empty chain holds every rule.
    pub fn chain<'r>(&'r self, chain: &'r str) -> impl Iterator<Item = &'r BlockRuleFn> + 'r {
        self.rules
            .iter()
            .filter(move |rule| {
                rule.enabled && (chain.is_empty() || rule.alt.iter().any(|alt| alt == chain))
            })
            .map(|rule| &rule.func)
    }

    /// Names of all registered rules, in order.
    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.name.as_str()).collect()
    }
}
