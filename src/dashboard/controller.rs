use std::collections::HashSet;

use crate::credentials::{Credential, CredentialForm, CredentialId};
use crate::dashboard::failure_message;
use crate::passwords::{generate_strong_password, PasswordStrength, DEFAULT_LENGTH};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Search,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum View {
    List,
    AddForm,
    EditForm,
    ConfirmDelete,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormField {
    Platform,
    Username,
    Password,
    Url,
    Notes,
}

/// A store request the front end should run, then report back via
/// [`Dashboard::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    Insert(CredentialForm),
    Update { id: CredentialId, form: CredentialForm },
    Delete(CredentialId),
}

/// View state for the credential list and its add/edit/delete flows.
pub struct Dashboard {
    credentials: Vec<Credential>,
    filtered: Vec<usize>,
    pub selected: usize,
    pub mode: Mode,
    filter: String,
    revealed: HashSet<CredentialId>,
    view: View,
    // Form state (Add/Edit)
    pub form: CredentialForm,
    pub form_field: FormField,
    pub form_reveal: bool,
    editing_id: Option<CredentialId>,
    delete_target: Option<CredentialId>,
    pending: Option<PendingAction>,
    generator_length: usize,
    toast: Option<String>,
    toast_ticks: u16,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Dashboard {
    pub fn new(credentials: Vec<Credential>) -> Self {
        let mut d = Self {
            credentials,
            filtered: Vec::new(),
            selected: 0,
            mode: Mode::Normal,
            filter: String::new(),
            revealed: HashSet::new(),
            view: View::List,
            form: CredentialForm::default(),
            form_field: FormField::Platform,
            form_reveal: false,
            editing_id: None,
            delete_target: None,
            pending: None,
            generator_length: DEFAULT_LENGTH,
            toast: None,
            toast_ticks: 0,
        };
        d.recompute();
        d
    }

    pub fn with_generator_length(mut self, length: usize) -> Self {
        self.generator_length = length;
        self
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn editing_id(&self) -> Option<&CredentialId> {
        self.editing_id.as_ref()
    }

    // ===== List & selection =====

    pub fn next(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.filtered.len().saturating_sub(1));
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn visible(&self) -> Vec<&Credential> {
        self.filtered.iter().map(|&i| &self.credentials[i]).collect()
    }

    pub fn total(&self) -> usize {
        self.credentials.len()
    }

    pub fn selected_credential(&self) -> Option<&Credential> {
        self.filtered
            .get(self.selected)
            .map(|&i| &self.credentials[i])
    }

    /// Swap in a fresh fetch. Reveal flags for vanished rows are dropped.
    pub fn replace_credentials(&mut self, credentials: Vec<Credential>) {
        self.credentials = credentials;
        let live: HashSet<&CredentialId> = self.credentials.iter().map(|c| &c.id).collect();
        self.revealed.retain(|id| live.contains(id));
        self.recompute();
    }

    // ===== Search =====

    pub fn enter_search(&mut self) {
        self.mode = Mode::Search;
    }

    pub fn exit_search(&mut self) {
        self.mode = Mode::Normal;
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
        self.recompute();
    }

    pub fn push_filter(&mut self, c: char) {
        self.filter.push(c);
        self.recompute();
    }

    pub fn pop_filter(&mut self) {
        self.filter.pop();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.filtered.clear();
        let q = self.filter.to_lowercase();
        for (i, c) in self.credentials.iter().enumerate() {
            if q.is_empty() || c.matches(&q) {
                self.filtered.push(i);
            }
        }
        if self.selected >= self.filtered.len() {
            self.selected = self.filtered.len().saturating_sub(1);
        }
    }

    // ===== Password visibility =====

    pub fn toggle_reveal(&mut self, id: &CredentialId) {
        if !self.revealed.remove(id) {
            self.revealed.insert(id.clone());
        }
    }

    pub fn toggle_reveal_selected(&mut self) {
        if let Some(id) = self.selected_credential().map(|c| c.id.clone()) {
            self.toggle_reveal(&id);
        }
    }

    pub fn is_revealed(&self, id: &CredentialId) -> bool {
        self.revealed.contains(id)
    }

    // ===== Notifications =====

    pub fn toast(&mut self, msg: impl Into<String>) {
        self.toast = Some(msg.into());
        self.toast_ticks = 15; // ~3s at 200ms tick
    }

    pub fn toast_message(&self) -> Option<&str> {
        self.toast.as_deref()
    }

    pub fn tick(&mut self) {
        if self.toast_ticks > 0 {
            self.toast_ticks -= 1;
            if self.toast_ticks == 0 {
                self.toast = None;
            }
        }
    }

    // ===== Add / edit =====

    pub fn open_add(&mut self) {
        if self.is_pending() {
            return;
        }
        self.form.clear();
        self.form_field = FormField::Platform;
        self.form_reveal = false;
        self.editing_id = None;
        self.view = View::AddForm;
    }

    pub fn open_edit(&mut self) {
        if self.is_pending() {
            return;
        }
        let Some(c) = self.selected_credential() else {
            return;
        };
        let form = CredentialForm::from_credential(c);
        let id = c.id.clone();
        self.form = form;
        self.form_field = FormField::Platform;
        self.form_reveal = false;
        self.editing_id = Some(id);
        self.view = View::EditForm;
    }

    /// Leave any form or prompt without side effects.
    pub fn cancel(&mut self) {
        if self.is_pending() {
            return;
        }
        if matches!(self.view, View::AddForm | View::EditForm) {
            self.form.clear();
        }
        self.editing_id = None;
        self.delete_target = None;
        self.view = View::List;
    }

    pub fn next_field(&mut self) {
        self.form_field = match self.form_field {
            FormField::Platform => FormField::Username,
            FormField::Username => FormField::Password,
            FormField::Password => FormField::Url,
            FormField::Url => FormField::Notes,
            FormField::Notes => FormField::Platform,
        };
    }

    pub fn prev_field(&mut self) {
        self.form_field = match self.form_field {
            FormField::Platform => FormField::Notes,
            FormField::Username => FormField::Platform,
            FormField::Password => FormField::Username,
            FormField::Url => FormField::Password,
            FormField::Notes => FormField::Url,
        };
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.form_field {
            FormField::Platform => &mut self.form.platform,
            FormField::Username => &mut self.form.username,
            FormField::Password => &mut self.form.password,
            FormField::Url => &mut self.form.url,
            FormField::Notes => &mut self.form.notes,
        }
    }

    pub fn update_form_char(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    pub fn backspace_form(&mut self) {
        self.focused_mut().pop();
    }

    pub fn generate_password(&mut self) {
        self.form.password = generate_strong_password(self.generator_length);
        self.form_field = FormField::Password;
    }

    pub fn form_strength(&self) -> PasswordStrength {
        self.form.strength()
    }

    /// Validate the open form. Returns the write to perform, or `None` when
    /// validation or the strength gate blocked it (feedback is in the toast).
    pub fn submit(&mut self) -> Option<PendingAction> {
        if self.is_pending() {
            return None;
        }
        if !matches!(self.view, View::AddForm | View::EditForm) {
            return None;
        }
        if let Err(e) = self.form.validate() {
            self.toast(e.to_string());
            return None;
        }
        let action = match (self.view, self.editing_id.clone()) {
            (View::EditForm, Some(id)) => PendingAction::Update {
                id,
                form: self.form.clone(),
            },
            (View::EditForm, None) => {
                self.toast("Nothing selected to edit");
                return None;
            }
            _ => PendingAction::Insert(self.form.clone()),
        };
        self.pending = Some(action.clone());
        Some(action)
    }

    // ===== Delete =====

    pub fn request_delete(&mut self) {
        if self.is_pending() || self.view != View::List {
            return;
        }
        if let Some(id) = self.selected_credential().map(|c| c.id.clone()) {
            self.delete_target = Some(id);
            self.view = View::ConfirmDelete;
        }
    }

    pub fn delete_target(&self) -> Option<&Credential> {
        let id = self.delete_target.as_ref()?;
        self.credentials.iter().find(|c| &c.id == id)
    }

    /// Answer the yes/no prompt. Only "yes" produces a request.
    pub fn confirm_delete(&mut self, yes: bool) -> Option<PendingAction> {
        if self.view != View::ConfirmDelete || self.is_pending() {
            return None;
        }
        let target = self.delete_target.take();
        match (yes, target) {
            (true, Some(id)) => {
                let action = PendingAction::Delete(id);
                self.pending = Some(action.clone());
                Some(action)
            }
            _ => {
                self.view = View::List;
                None
            }
        }
    }

    // ===== Completion =====

    /// Report how the pending request went. Success returns to the list;
    /// failure restores the state the action started from.
    pub fn complete(&mut self, result: Result<(), String>) {
        let Some(action) = self.pending.take() else {
            return;
        };
        match result {
            Ok(()) => {
                let msg = match &action {
                    PendingAction::Insert(_) => "Credential saved",
                    PendingAction::Update { .. } => "Credential updated",
                    PendingAction::Delete(id) => {
                        self.revealed.remove(id);
                        "Credential deleted"
                    }
                };
                self.form.clear();
                self.editing_id = None;
                self.view = View::List;
                self.toast(msg);
            }
            Err(reason) => {
                if let PendingAction::Delete(_) = action {
                    self.view = View::List;
                }
                self.toast(failure_message(&reason));
            }
        }
    }
}
