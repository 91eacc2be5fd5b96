use crate::pattern::Params;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::{HandlerFn, HandlerResolver, ResponseBody};

/// Named handlers grouped by controller, resolved from `owner@member` references
#[derive(Clone, Default)]
pub struct ControllerRegistry {
    controllers: HashMap<String, HashMap<String, HandlerFn>>,
}

impl ControllerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` as `owner@member`, replacing any earlier registration
    pub fn register<F>(&mut self, owner: &str, member: &str, handler: F)
    where
        F: Fn(&Params, &mut ResponseBody) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        debug!(owner = %owner, member = %member, "Registered controller action");
        self.controllers
            .entry(owner.to_string())
            .or_default()
            .insert(member.to_string(), Arc::new(handler));
    }

    #[must_use]
    pub fn contains(&self, owner: &str, member: &str) -> bool {
        self.controllers
            .get(owner)
            .is_some_and(|actions| actions.contains_key(member))
    }

    /// All registered references as `owner@member`, sorted
    #[must_use]
    pub fn references(&self) -> Vec<String> {
        let mut refs: Vec<String> = self
            .controllers
            .iter()
            .flat_map(|(owner, actions)| actions.keys().map(move |m| format!("{owner}@{m}")))
            .collect();
        refs.sort();
        refs
    }
}

impl HandlerResolver for ControllerRegistry {
    fn resolve(&self, owner: &str, member: &str) -> Option<HandlerFn> {
        self.controllers
            .get(owner)
            .and_then(|actions| actions.get(member))
            .map(Arc::clone)
    }
}
