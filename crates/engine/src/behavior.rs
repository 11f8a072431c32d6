//! Behaviors attached to cells and lifecycle hooks, and how they compose.
//!
//! Composition is deliberately plain: an ordered list of steps run one after
//! another (`ActionList`, `ClickActionList`), or an ordered list of checks
//! that must all pass (`ConditionList`). A list collapses into a single
//! shared closure once it is complete.

use std::fmt;
use std::sync::Arc;

use crate::events::{CloseReason, InteractionKind};
use crate::viewer::Viewer;

/// Fire-and-forget effect.
pub type Action = Arc<dyn Fn(&dyn Viewer) + Send + Sync>;

/// Effect scoped to one click: interaction kind plus auxiliary index
/// (the hotbar slot for number-key clicks, -1 otherwise).
pub type ClickAction = Arc<dyn Fn(&dyn Viewer, InteractionKind, i32) + Send + Sync>;

/// Effect run when an open interface closes.
pub type CloseAction = Arc<dyn Fn(&dyn Viewer, CloseReason) + Send + Sync>;

/// Pure predicate over a viewer.
pub type Condition = Arc<dyn Fn(&dyn Viewer) -> bool + Send + Sync>;

/// Per-viewer title.
pub type TitleFn = Arc<dyn Fn(&dyn Viewer) -> String + Send + Sync>;

pub fn action<F>(f: F) -> Action
where
    F: Fn(&dyn Viewer) + Send + Sync + 'static,
{
    Arc::new(f)
}

pub fn click_action<F>(f: F) -> ClickAction
where
    F: Fn(&dyn Viewer, InteractionKind, i32) + Send + Sync + 'static,
{
    Arc::new(f)
}

pub fn close_action<F>(f: F) -> CloseAction
where
    F: Fn(&dyn Viewer, CloseReason) + Send + Sync + 'static,
{
    Arc::new(f)
}

pub fn condition<F>(f: F) -> Condition
where
    F: Fn(&dyn Viewer) -> bool + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A click action that ignores the click data and runs `action`.
pub fn click_from_action(action: Action) -> ClickAction {
    click_action(move |viewer, _, _| action(viewer))
}

/// A close action that ignores the reason and runs `action`.
pub fn close_from_action(action: Action) -> CloseAction {
    close_action(move |viewer, _| action(viewer))
}

/// Run `action` only when `guard` holds. Without a guard the action is returned as is.
pub fn guard_action(action: Action, guard: Option<Condition>) -> Action {
    match guard {
        Some(guard) => self::action(move |viewer| {
            if guard(viewer) {
                action(viewer);
            }
        }),
        None => action,
    }
}

/// Run `action` only when `guard` holds. Without a guard the action is returned as is.
pub fn guard_click(action: ClickAction, guard: Option<Condition>) -> ClickAction {
    match guard {
        Some(guard) => click_action(move |viewer, kind, aux| {
            if guard(viewer) {
                action(viewer, kind, aux);
            }
        }),
        None => action,
    }
}

// ============================================================================
// Ordered compositions
// ============================================================================

/// Actions run in order, each regardless of the others.
#[derive(Clone, Default)]
pub struct ActionList {
    steps: Vec<Action>,
}

impl ActionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: Action) {
        self.steps.push(action);
    }

    pub fn then(mut self, action: Action) -> Self {
        self.push(action);
        self
    }

    pub fn extend(&mut self, other: ActionList) {
        self.steps.extend(other.steps);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn run(&self, viewer: &dyn Viewer) {
        for step in &self.steps {
            step(viewer);
        }
    }

    /// Collapse into one action, or `None` when there is nothing to run.
    pub fn into_action(mut self) -> Option<Action> {
        match self.steps.len() {
            0 => None,
            1 => self.steps.pop(),
            _ => Some(action(move |viewer| self.run(viewer))),
        }
    }
}

impl FromIterator<Action> for ActionList {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        Self { steps: iter.into_iter().collect() }
    }
}

impl fmt::Debug for ActionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActionList({} steps)", self.steps.len())
    }
}

/// Click actions run in order with the same click data.
#[derive(Clone, Default)]
pub struct ClickActionList {
    steps: Vec<ClickAction>,
}

impl ClickActionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: ClickAction) {
        self.steps.push(action);
    }

    /// Append plain actions; they run without looking at the click data.
    pub fn push_actions(&mut self, actions: ActionList) {
        self.steps
            .extend(actions.steps.into_iter().map(click_from_action));
    }

    pub fn extend(&mut self, other: ClickActionList) {
        self.steps.extend(other.steps);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn click(&self, viewer: &dyn Viewer, kind: InteractionKind, aux: i32) {
        for step in &self.steps {
            step(viewer, kind, aux);
        }
    }

    pub fn into_click_action(mut self) -> Option<ClickAction> {
        match self.steps.len() {
            0 => None,
            1 => self.steps.pop(),
            _ => Some(click_action(move |viewer, kind, aux| self.click(viewer, kind, aux))),
        }
    }
}

impl FromIterator<ClickAction> for ClickActionList {
    fn from_iter<I: IntoIterator<Item = ClickAction>>(iter: I) -> Self {
        Self { steps: iter.into_iter().collect() }
    }
}

impl fmt::Debug for ClickActionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClickActionList({} steps)", self.steps.len())
    }
}

/// Conditions combined with logical AND, left to right, short-circuiting.
#[derive(Clone, Default)]
pub struct ConditionList {
    checks: Vec<Condition>,
}

impl ConditionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, condition: Condition) {
        self.checks.push(condition);
    }

    pub fn extend(&mut self, other: ConditionList) {
        self.checks.extend(other.checks);
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    pub fn test(&self, viewer: &dyn Viewer) -> bool {
        self.checks.iter().all(|check| check(viewer))
    }

    pub fn into_condition(mut self) -> Option<Condition> {
        match self.checks.len() {
            0 => None,
            1 => self.checks.pop(),
            _ => Some(condition(move |viewer| self.test(viewer))),
        }
    }
}

impl FromIterator<Condition> for ConditionList {
    fn from_iter<I: IntoIterator<Item = Condition>>(iter: I) -> Self {
        Self { checks: iter.into_iter().collect() }
    }
}

impl fmt::Debug for ConditionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConditionList({} checks)", self.checks.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::RecordingViewer;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn recorder(log: &Arc<Mutex<Vec<&'static str>>>, name: &'static str) -> Action {
        let log = Arc::clone(log);
        action(move |_| log.lock().unwrap().push(name))
    }

    #[test]
    fn test_action_list_runs_in_declaration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let list: ActionList = vec![recorder(&log, "a"), recorder(&log, "b"), recorder(&log, "c")]
            .into_iter()
            .collect();
        let composed = list.into_action().unwrap();
        composed(&RecordingViewer::new("Alex"));
        assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_lists_collapse_to_none() {
        assert!(ActionList::new().into_action().is_none());
        assert!(ClickActionList::new().into_click_action().is_none());
        assert!(ConditionList::new().into_condition().is_none());
    }

    #[test]
    fn test_condition_list_is_logical_and() {
        let viewer = RecordingViewer::new("Alex");
        let yes = condition(|_| true);
        let no = condition(|_| false);

        let all_true: ConditionList = vec![yes.clone(), yes.clone()].into_iter().collect();
        let one_false: ConditionList = vec![yes.clone(), no.clone()].into_iter().collect();
        assert!(all_true.test(&viewer));
        assert!(!one_false.test(&viewer));
    }

    #[test]
    fn test_condition_list_short_circuits() {
        let viewer = RecordingViewer::new("Alex");
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = {
            let calls = Arc::clone(&calls);
            condition(move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                true
            })
        };
        let list: ConditionList = vec![condition(|_| false), counted].into_iter().collect();
        assert!(!list.test(&viewer));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_click_list_passes_click_data_and_adapts_actions() {
        let viewer = RecordingViewer::new("Alex");
        let seen = Arc::new(Mutex::new(Vec::new()));
        let plain = Arc::new(AtomicUsize::new(0));

        let mut list = ClickActionList::new();
        {
            let seen = Arc::clone(&seen);
            list.push(click_action(move |_, kind, aux| seen.lock().unwrap().push((kind, aux))));
        }
        {
            let plain = Arc::clone(&plain);
            list.push_actions(ActionList::new().then(action(move |_| {
                plain.fetch_add(1, Ordering::SeqCst);
            })));
        }

        list.into_click_action().unwrap()(&viewer, InteractionKind::NumberKey, 4);
        assert_eq!(*seen.lock().unwrap(), vec![(InteractionKind::NumberKey, 4)]);
        assert_eq!(plain.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_guard_blocks_whole_action() {
        let viewer = RecordingViewer::new("Alex");
        let count = Arc::new(AtomicUsize::new(0));
        let inner = {
            let count = Arc::clone(&count);
            click_action(move |_, _, _| {
                count.fetch_add(1, Ordering::SeqCst);
            })
        };

        let blocked = guard_click(inner.clone(), Some(condition(|_| false)));
        blocked(&viewer, InteractionKind::Left, -1);
        assert_eq!(count.load(Ordering::SeqCst), 0);

        let open = guard_click(inner, None);
        open(&viewer, InteractionKind::Left, -1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_guard_action_uses_viewer_permissions() {
        let viewer = RecordingViewer::new("Alex").with_permission("menu.use");
        let guarded = guard_action(
            action(|viewer| viewer.send_message("hi")),
            Some(condition(|viewer| viewer.has_permission("menu.use"))),
        );
        guarded(&viewer);
        assert_eq!(viewer.messages(), vec!["hi".to_string()]);
    }
}
