//! # Actor Context
//!
//! Resolves which identity an audit record is attributed to.
//!
//! Two levels exist: a default (typically set once per request or batch)
//! and an override that wins whenever it is set. The context is a plain
//! value threaded through every service call, so concurrent callers never
//! share a slot.
//!
//! ```
//! use lims_01_sample_lifecycle::ActorContext;
//! use shared_types::Actor;
//!
//! let ctx = ActorContext::new().with_default(Actor::new("batch"));
//! let name = ctx.scoped_override(Actor::new("alice"), |inner| {
//!     inner.resolve().map(|a| a.to_string())
//! });
//! assert_eq!(name.as_deref(), Some("alice"));
//! assert_eq!(ctx.resolve().map(|a| a.as_str()), Some("batch"));
//! ```

use serde::{Deserialize, Serialize};
use shared_types::Actor;

use super::errors::{LifecycleError, LifecycleResult};

/// Default and override actor for a unit of processing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorContext {
    default: Option<Actor>,
    override_actor: Option<Actor>,
}

impl ActorContext {
    /// Empty context; resolves to nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Context with only a default actor.
    pub fn for_actor(actor: Actor) -> Self {
        Self::new().with_default(actor)
    }

    /// Replace the default actor.
    pub fn with_default(mut self, actor: Actor) -> Self {
        self.default = Some(actor);
        self
    }

    /// Replace the override actor.
    pub fn with_override(mut self, actor: Actor) -> Self {
        self.override_actor = Some(actor);
        self
    }

    /// Run `f` with a derived context whose default is `actor`.
    ///
    /// `self` is untouched, so the previous value is in effect again once
    /// `f` returns, errors or unwinds. `f` may return a future.
    pub fn scoped_default<T>(&self, actor: Actor, f: impl FnOnce(ActorContext) -> T) -> T {
        f(self.clone().with_default(actor))
    }

    /// Run `f` with a derived context whose override is `actor`.
    pub fn scoped_override<T>(&self, actor: Actor, f: impl FnOnce(ActorContext) -> T) -> T {
        f(self.clone().with_override(actor))
    }

    /// The override if set, else the default.
    pub fn resolve(&self) -> Option<&Actor> {
        self.override_actor.as_ref().or(self.default.as_ref())
    }

    /// Resolved actor or [`LifecycleError::MissingActor`].
    pub fn require(&self) -> LifecycleResult<&Actor> {
        self.resolve().ok_or(LifecycleError::MissingActor)
    }
}
