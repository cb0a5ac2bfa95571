//! Change notification for graph stores.

use crate::definition::Workflow;

/// Receives the full workflow after every applied mutation.
pub trait ChangeListener {
    fn on_change(&self, workflow: &Workflow);
}

impl<F> ChangeListener for F
where
    F: Fn(&Workflow),
{
    fn on_change(&self, workflow: &Workflow) {
        self(workflow);
    }
}
