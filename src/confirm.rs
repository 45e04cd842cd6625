pub const DELETE_CONTACT_PROMPT: &str = "Are you sure you want to delete this contact?";

/// Work held back until the user answers the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    DeleteContact(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirmation {
    pub message: String,
    pub action: PendingAction,
}

/// Yes/no gate with room for one pending action. A new `show` replaces whatever was waiting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmSlot {
    pending: Option<PendingConfirmation>,
}

impl ConfirmSlot {
    pub fn show(&mut self, message: impl Into<String>, action: PendingAction) {
        if let Some(old) = &self.pending {
            log::debug!("Replacing unanswered confirmation for {:?}", old.action);
        }
        self.pending = Some(PendingConfirmation { message: message.into(), action });
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Hands out the pending action and closes the dialog. A second call yields nothing.
    pub fn confirm(&mut self) -> Option<PendingAction> {
        self.pending.take().map(|p| p.action)
    }

    pub fn pending(&self) -> Option<&PendingConfirmation> {
        self.pending.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_yields_action_once() {
        let mut slot = ConfirmSlot::default();
        slot.show(DELETE_CONTACT_PROMPT, PendingAction::DeleteContact("rec1".into()));
        assert!(slot.is_open());
        assert_eq!(slot.pending().unwrap().message, DELETE_CONTACT_PROMPT);
        assert_eq!(slot.confirm(), Some(PendingAction::DeleteContact("rec1".into())));
        assert_eq!(slot.confirm(), None);
        assert!(!slot.is_open());
    }

    #[test]
    fn cancel_discards_action() {
        let mut slot = ConfirmSlot::default();
        slot.show("sure?", PendingAction::DeleteContact("rec1".into()));
        slot.cancel();
        assert_eq!(slot.confirm(), None);
    }

    #[test]
    fn second_show_replaces_first() {
        let mut slot = ConfirmSlot::default();
        slot.show("first", PendingAction::DeleteContact("rec1".into()));
        slot.show("second", PendingAction::DeleteContact("rec2".into()));
        assert_eq!(slot.pending().unwrap().message, "second");
        assert_eq!(slot.confirm(), Some(PendingAction::DeleteContact("rec2".into())));
    }
}
