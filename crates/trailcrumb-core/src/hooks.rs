//! # Extension Hooks
//!
//! Optional host callbacks invoked at fixed points of trail construction:
//!
//! - `ancestors`: rewrite the ancestor list of a singular item (oldest first)
//! - `trail`: rewrite the whole composed crumb list
//! - `link`: rewrite each resolved crumb, given its index and the composed list
//!
//! List hooks return [`HookOutput`] so that a host returning a single value
//! or nothing is representable. Such output is coerced into a list and the
//! coercion is reported as a [`TrailWarning`].

use crate::{Crumb, ItemId, ResolvedCrumb, TrailWarning};
use std::fmt;

/// Value returned by a list-rewriting hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutput<T> {
    /// A proper list.
    Many(Vec<T>),
    /// A single value where a list was expected.
    One(T),
    /// No value at all.
    Nothing,
}

impl<T> From<Vec<T>> for HookOutput<T> {
    fn from(values: Vec<T>) -> Self {
        Self::Many(values)
    }
}

impl<T> HookOutput<T> {
    /// Turn the output into a list, recording a warning when it was not one.
    pub fn into_list(self, hook: &str, warnings: &mut Vec<TrailWarning>) -> Vec<T> {
        let list = match self {
            Self::Many(values) => return values,
            Self::One(value) => vec![value],
            Self::Nothing => Vec::new(),
        };

        let warning = TrailWarning::NonSequenceHookOutput {
            hook: hook.to_string(),
            len: list.len(),
        };
        tracing::warn!(hook, "{}", warning);
        warnings.push(warning);
        list
    }
}

pub type AncestorsHook = Box<dyn Fn(Vec<ItemId>) -> HookOutput<ItemId> + Send + Sync>;
pub type TrailHook = Box<dyn Fn(Vec<Crumb>) -> HookOutput<Crumb> + Send + Sync>;
pub type LinkHook = Box<dyn Fn(ResolvedCrumb, usize, &[Crumb]) -> ResolvedCrumb + Send + Sync>;

/// The set of registered hooks. Empty by default.
#[derive(Default)]
pub struct Extensions {
    pub(crate) ancestors: Option<AncestorsHook>,
    pub(crate) trail: Option<TrailHook>,
    pub(crate) link: Option<LinkHook>,
}

impl Extensions {
    /// Create an empty hook set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the ancestor-list hook.
    #[must_use]
    pub fn with_ancestors<F>(mut self, hook: F) -> Self
    where
        F: Fn(Vec<ItemId>) -> HookOutput<ItemId> + Send + Sync + 'static,
    {
        self.ancestors = Some(Box::new(hook));
        self
    }

    /// Register the composed-trail hook.
    #[must_use]
    pub fn with_trail<F>(mut self, hook: F) -> Self
    where
        F: Fn(Vec<Crumb>) -> HookOutput<Crumb> + Send + Sync + 'static,
    {
        self.trail = Some(Box::new(hook));
        self
    }

    /// Register the per-crumb hook.
    #[must_use]
    pub fn with_link<F>(mut self, hook: F) -> Self
    where
        F: Fn(ResolvedCrumb, usize, &[Crumb]) -> ResolvedCrumb + Send + Sync + 'static,
    {
        self.link = Some(Box::new(hook));
        self
    }
}

impl fmt::Debug for Extensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extensions")
            .field("ancestors", &self.ancestors.is_some())
            .field("trail", &self.trail.is_some())
            .field("link", &self.link.is_some())
            .finish()
    }
}
