//! Veto results returned by user hooks.

use std::rc::Rc;

/// Outcome of a user hook.
///
/// Every hook can veto the default action of the step it is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Decision {
    /// Continue with the default action.
    #[default]
    Proceed,
    /// Skip the default action for this step.
    Veto,
}

impl Decision {
    pub fn is_veto(self) -> bool {
        matches!(self, Decision::Veto)
    }

    pub fn is_proceed(self) -> bool {
        matches!(self, Decision::Proceed)
    }
}

impl From<bool> for Decision {
    /// `true` proceeds, `false` vetoes.
    fn from(proceed: bool) -> Self {
        if proceed {
            Decision::Proceed
        } else {
            Decision::Veto
        }
    }
}

/// A user callback attached to an interaction step.
///
/// Hooks are reference counted so option structs stay cheap to clone.
pub type Hook<T> = Rc<dyn Fn(&T) -> Decision>;

/// Wrap a closure as a [`Hook`].
pub fn hook<T: 'static>(f: impl Fn(&T) -> Decision + 'static) -> Hook<T> {
    Rc::new(f)
}

/// Run an optional hook; a missing hook always proceeds.
pub(crate) fn run_hook<T>(hook: Option<&Hook<T>>, args: &T) -> Decision {
    hook.map_or(Decision::Proceed, |h| h(args))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_hook_proceeds() {
        assert_eq!(run_hook::<u32>(None, &1), Decision::Proceed);
    }

    #[test]
    fn test_hook_veto() {
        let h = hook(|value: &u32| Decision::from(*value < 10));
        assert!(run_hook(Some(&h), &3).is_proceed());
        assert!(run_hook(Some(&h), &30).is_veto());
    }
}
