//! Live copies of the owner's profile and the selected child's templates
//! and events, kept current through store subscriptions.

use crate::models::event::ScheduleEvent;
use crate::models::template::EventTemplate;
use crate::services::profile::{ProfileRecord, ProfileService};
use crate::services::schedule::ScheduleService;
use crate::services::store::{decode_snapshot, DocumentStore, Snapshot, StoreError, Subscription};
use crate::services::template::TemplateService;

#[derive(Default)]
pub struct LiveData {
    profile_subscription: Option<Subscription>,
    template_subscription: Option<Subscription>,
    event_subscription: Option<Subscription>,
    followed_child: Option<String>,
    pub profile: Option<ProfileRecord>,
    pub templates: Vec<EventTemplate>,
    pub events: Vec<ScheduleEvent>,
}

impl LiveData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe_profile(&mut self, store: &dyn DocumentStore) -> Result<(), StoreError> {
        if let Some(old) = self.profile_subscription.take() {
            store.unsubscribe(old);
        }
        self.profile_subscription = Some(store.subscribe(ProfileService::filter())?);
        Ok(())
    }

    /// Point the template and event subscriptions at `child_id`. Does
    /// nothing when that child is already followed.
    pub fn follow_child(
        &mut self,
        store: &dyn DocumentStore,
        child_id: Option<&str>,
    ) -> Result<(), StoreError> {
        if self.followed_child.as_deref() == child_id {
            return Ok(());
        }

        if let Some(old) = self.template_subscription.take() {
            store.unsubscribe(old);
        }
        if let Some(old) = self.event_subscription.take() {
            store.unsubscribe(old);
        }
        self.templates.clear();
        self.events.clear();
        self.followed_child = child_id.map(str::to_string);

        if let Some(child_id) = child_id {
            log::debug!("Following child {}", child_id);
            self.template_subscription =
                Some(store.subscribe(TemplateService::child_filter(child_id))?);
            self.event_subscription = Some(store.subscribe(ScheduleService::child_filter(child_id))?);
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn followed_child(&self) -> Option<&str> {
        self.followed_child.as_deref()
    }

    /// Applies the newest pending snapshot of every subscription. Returns
    /// whether anything changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;

        if let Some(snapshot) = self.profile_subscription.as_ref().and_then(Subscription::latest) {
            self.profile = decode_profile(&snapshot);
            changed = true;
        }
        if let Some(snapshot) = self.template_subscription.as_ref().and_then(Subscription::latest) {
            self.templates = decode_snapshot(&snapshot);
            changed = true;
        }
        if let Some(snapshot) = self.event_subscription.as_ref().and_then(Subscription::latest) {
            self.events = decode_snapshot(&snapshot);
            changed = true;
        }

        changed
    }
}

fn decode_profile(snapshot: &Snapshot) -> Option<ProfileRecord> {
    let document = snapshot.documents.first()?;
    match document.decode() {
        Ok(profile) => Some(ProfileRecord {
            id: document.id,
            profile,
        }),
        Err(e) => {
            log::error!("Malformed profile document {}: {}", document.id, e);
            None
        }
    }
}
