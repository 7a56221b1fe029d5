//! Session layer: persistence seams and serialised intent execution.

pub mod repository;
pub mod service;

pub use repository::{ContentStore, MemoryRepository, RepositoryError, StateRepository};
pub use service::{Intent, Rejection, Session, SessionError};
