use crate::model::event::Event;
use anyhow::Result;
use uuid::Uuid;

pub trait EventRepository {
    fn create(&mut self, event: Event) -> Result<Event>;
    /// Events newest first.
    fn list(&self) -> Result<Vec<Event>>;
    /// Returns `false` when no event has the id.
    fn delete(&mut self, id: &Uuid) -> Result<bool>;
}
