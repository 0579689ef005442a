pub mod dto;
pub mod event_service;
