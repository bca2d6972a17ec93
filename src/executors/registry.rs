//! Executor registry keyed by effect type.
//!
//! The registry is a plain value owned by the caller, not a process-wide
//! table; hosts that need custom effects register them on their own
//! instance.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::warn;

use super::{
    DestroyExecutor, DrawExecutor, EffectExecutor, ExecutionContext, ExecutionResult,
    ModifyStatExecutor, NegateExecutor, SearchExecutor,
};
use crate::core::{Result, RulesError};
use crate::effects::{EffectKind, ParsedEffect};

/// Maps effect-type keys to executors.
///
/// ```
/// use duel_rules::executors::ExecutorRegistry;
///
/// let registry = ExecutorRegistry::with_builtins();
/// assert!(registry.contains("search"));
/// assert!(registry.contains("modifyATK"));
/// assert!(!registry.contains("banish"));
/// ```
#[derive(Clone, Default)]
pub struct ExecutorRegistry {
    executors: FxHashMap<String, Arc<dyn EffectExecutor>>,
}

impl ExecutorRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every built-in executor.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(EffectKind::Search.as_str(), SearchExecutor);
        registry.register(EffectKind::Negate.as_str(), NegateExecutor);
        registry.register(EffectKind::ModifyAttack.as_str(), ModifyStatExecutor);
        registry.register(EffectKind::ModifyDefense.as_str(), ModifyStatExecutor);
        registry.register(EffectKind::Destroy.as_str(), DestroyExecutor);
        registry.register(EffectKind::Draw.as_str(), DrawExecutor);
        registry
    }

    /// Register an executor under a key, replacing any previous one.
    pub fn register(&mut self, key: impl Into<String>, executor: impl EffectExecutor + 'static) {
        let key = key.into();
        if self.executors.contains_key(&key) {
            warn!(effect_type = %key, "overriding existing executor registration");
        }
        self.executors.insert(key, Arc::new(executor));
    }

    /// Is an executor registered under `key`?
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.executors.contains_key(key)
    }

    /// Look up an executor.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&dyn EffectExecutor> {
        self.executors.get(key).map(|e| &**e)
    }

    /// Registered keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.executors.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Run the executor for `effect.kind`.
    ///
    /// Fails with `UnknownEffectType` when nothing is registered for it.
    pub fn execute(&self, ctx: &mut ExecutionContext<'_>, effect: &ParsedEffect) -> Result<ExecutionResult> {
        let key = effect.kind.as_str();
        let Some(executor) = self.get(key) else {
            warn!(game = %ctx.game, effect_type = %key, "no executor registered");
            return Err(RulesError::UnknownEffectType(key.to_string()));
        };
        Ok(executor.execute(ctx, effect))
    }
}

impl std::fmt::Debug for ExecutorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutorRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameId, GameState, InstanceId, RulesConfig, Seat};
    use crate::effects::EffectStore;
    use crate::executors::ExecutionPayload;

    struct Echo(&'static str);

    impl EffectExecutor for Echo {
        fn execute(&self, _ctx: &mut ExecutionContext<'_>, _effect: &ParsedEffect) -> ExecutionResult {
            ExecutionResult::ok(self.0, ExecutionPayload::None)
        }
    }

    fn run(registry: &ExecutorRegistry, effect: &ParsedEffect) -> Result<ExecutionResult> {
        let mut state = GameState::new(GameId(1));
        let mut effects = EffectStore::new();
        let config = RulesConfig::default();
        let mut ctx = ExecutionContext {
            game: GameId(1),
            state: &mut state,
            effects: &mut effects,
            config: &config,
            player: Seat::Host,
            source: InstanceId(1),
            targets: &[],
        };
        registry.execute(&mut ctx, effect)
    }

    #[test]
    fn test_builtin_keys() {
        let registry = ExecutorRegistry::with_builtins();
        assert_eq!(
            registry.keys(),
            vec!["destroy", "draw", "modifyATK", "modifyDEF", "negate", "search"]
        );
    }

    #[test]
    fn test_unknown_effect_type_is_reported() {
        let registry = ExecutorRegistry::with_builtins();
        let err = run(&registry, &ParsedEffect::new(EffectKind::Custom("banish".into()))).unwrap_err();
        assert_eq!(err, RulesError::UnknownEffectType("banish".to_string()));
    }

    #[test]
    fn test_custom_executor_and_override() {
        let mut registry = ExecutorRegistry::new();
        registry.register("burn", Echo("first"));
        registry.register("burn", Echo("second"));

        let result = run(&registry, &ParsedEffect::new(EffectKind::from("burn"))).unwrap();
        assert_eq!(result.message, "second");
    }
}
