use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::mentor::{Mentor, MentorFilter};
use super::session::{Session, SessionFilter};

pub const DEFAULT_LIMIT: usize = 20;

/// One page of a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
	pub items: Vec<T>,
	pub total: usize,
	pub limit: usize,
	pub offset: usize,
}

/// Paging parameters of a listing query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
pub struct Paging {
	pub limit: Option<usize>,
	pub offset: Option<usize>,
}

/// In-memory records of mentors and sessions.
#[derive(Debug, Default)]
pub struct Store {
	mentors: RwLock<HashMap<Uuid, Mentor>>,
	sessions: RwLock<HashMap<Uuid, Session>>,
}

fn paginate<T>(mut items: Vec<T>, paging: Paging, key: impl Fn(&T) -> (chrono::DateTime<chrono::Utc>, Uuid)) -> Page<T> {
	items.sort_by_key(|item| key(item));

	let total = items.len();
	let limit = paging.limit.unwrap_or(DEFAULT_LIMIT);
	let offset = paging.offset.unwrap_or_default();

	Page {
		items: items.into_iter().skip(offset).take(limit).collect(),
		total,
		limit,
		offset,
	}
}

impl Store {
	pub fn new() -> Self {
		Self::default()
	}

	pub async fn insert_mentor(&self, mentor: Mentor) -> Mentor {
		self.mentors.write().await.insert(mentor.id, mentor.clone());
		mentor
	}

	pub async fn mentor(&self, id: Uuid) -> Option<Mentor> {
		self.mentors.read().await.get(&id).cloned()
	}

	/// Applies `update` to the stored mentor and returns the result.
	pub async fn update_mentor(&self, id: Uuid, update: impl FnOnce(&mut Mentor)) -> Option<Mentor> {
		let mut mentors = self.mentors.write().await;
		let mentor = mentors.get_mut(&id)?;
		update(mentor);
		Some(mentor.clone())
	}

	pub async fn delete_mentor(&self, id: Uuid) -> Option<Mentor> {
		self.mentors.write().await.remove(&id)
	}

	pub async fn list_mentors(&self, filter: &MentorFilter, paging: Paging) -> Page<Mentor> {
		let matched = self
			.mentors
			.read()
			.await
			.values()
			.filter(|mentor| filter.matches(mentor))
			.cloned()
			.collect();

		paginate(matched, paging, |mentor: &Mentor| (mentor.created_at, mentor.id))
	}

	pub async fn insert_session(&self, session: Session) -> Session {
		self.sessions.write().await.insert(session.id, session.clone());
		session
	}

	pub async fn session(&self, id: Uuid) -> Option<Session> {
		self.sessions.read().await.get(&id).cloned()
	}

	/// Runs `update` against the stored session, returning `None` when the
	/// session does not exist.
	pub async fn update_session<T>(&self, id: Uuid, update: impl FnOnce(&mut Session) -> T) -> Option<T> {
		let mut sessions = self.sessions.write().await;
		sessions.get_mut(&id).map(update)
	}

	pub async fn delete_session(&self, id: Uuid) -> Option<Session> {
		self.sessions.write().await.remove(&id)
	}

	pub async fn list_sessions(&self, filter: &SessionFilter, paging: Paging) -> Page<Session> {
		let matched = self
			.sessions
			.read()
			.await
			.values()
			.filter(|session| filter.matches(session))
			.cloned()
			.collect();

		paginate(matched, paging, |session: &Session| (session.scheduled_at, session.id))
	}
}
