use anyhow::Result;
use uuid::Uuid;

use crate::model::event::Event;
use crate::repository::traits::EventRepository;

/// Session-scoped event list. Nothing outlives the value.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventRepository {
    // Newest first.
    events: Vec<Event>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventRepository for InMemoryEventRepository {
    fn create(&mut self, event: Event) -> Result<Event> {
        self.events.insert(0, event.clone());
        Ok(event)
    }

    fn list(&self) -> Result<Vec<Event>> {
        Ok(self.events.clone())
    }

    fn delete(&mut self, id: &Uuid) -> Result<bool> {
        let initial_len = self.events.len();
        self.events.retain(|e| e.id != *id);
        Ok(self.events.len() != initial_len)
    }
}
