use anyhow::Result;
use uuid::Uuid;

use crate::model::event::{Event, EventDraft};
use crate::repository::EventRepository;
use crate::service::dto::Summary;
use crate::usecase::summary::SummaryUseCase;

pub struct EventService<R: EventRepository> {
    repo: R,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates the draft and stores the resulting event.
    ///
    /// A rejected draft surfaces as a [`crate::ValidationError`] inside the
    /// returned error and leaves the store untouched.
    pub fn add_event(&mut self, draft: &EventDraft) -> Result<Event> {
        let event = match draft.build_event() {
            Ok(event) => event,
            Err(e) => {
                log::debug!("Rejected event draft: {}", e);
                return Err(e.into());
            }
        };
        let created = self.repo.create(event)?;
        log::debug!(
            "Added event {} ({} / {}, {}h)",
            created.id,
            created.scenario,
            created.phase,
            created.hours
        );
        Ok(created)
    }

    /// Removes the event if present. Unknown ids are ignored.
    pub fn delete_event(&mut self, id: &Uuid) -> Result<bool> {
        let removed = self.repo.delete(id)?;
        if removed {
            log::debug!("Deleted event {}", id);
        } else {
            log::debug!("No event {} to delete", id);
        }
        Ok(removed)
    }

    pub fn list_events(&self) -> Result<Vec<Event>> {
        self.repo.list()
    }

    pub fn summary(&self) -> Result<Summary> {
        SummaryUseCase::new(&self.repo).get_summary()
    }
}
