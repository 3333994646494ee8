use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Lifecycle label of a session. Any label may replace any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionStatus {
	#[default]
	Scheduled,
	InProgress,
	Completed,
	Cancelled,
	Upcoming,
	Live,
}

impl SessionStatus {
	/// Wire names of every status.
	pub const NAMES: &'static [&'static str] = &["scheduled", "in-progress", "completed", "cancelled", "upcoming", "live"];

	pub fn as_str(&self) -> &'static str {
		match self {
			SessionStatus::Scheduled => "scheduled",
			SessionStatus::InProgress => "in-progress",
			SessionStatus::Completed => "completed",
			SessionStatus::Cancelled => "cancelled",
			SessionStatus::Upcoming => "upcoming",
			SessionStatus::Live => "live",
		}
	}

	/// Whether new participants may still join.
	pub fn is_joinable(&self) -> bool {
		!matches!(self, SessionStatus::Completed | SessionStatus::Cancelled)
	}
}

pub const DEFAULT_MAX_PARTICIPANTS: u32 = 10;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
	pub id: Uuid,
	pub mentor_id: Option<Uuid>,
	pub title: String,
	pub description: Option<String>,
	pub topic: Option<String>,
	pub duration: u32,
	pub max_participants: u32,
	pub meeting_link: Option<String>,
	pub requirements: Vec<String>,
	pub objectives: Vec<String>,
	pub status: SessionStatus,
	pub scheduled_at: DateTime<Utc>,
	pub participants: Vec<Uuid>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

/// Fields shared by the create and update payloads.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDetails {
	pub description: Option<String>,
	pub topic: Option<String>,
	pub max_participants: Option<u32>,
	pub meeting_link: Option<String>,
	pub requirements: Option<Vec<String>>,
	pub objectives: Option<Vec<String>>,
	pub status: Option<SessionStatus>,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSession {
	pub title: String,
	pub duration: u32,
	pub scheduled_at: String,
	pub mentor_id: Option<Uuid>,
	#[serde(flatten)]
	pub details: SessionDetails,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSession {
	pub title: Option<String>,
	pub duration: Option<u32>,
	pub scheduled_at: Option<String>,
	#[serde(flatten)]
	pub details: SessionDetails,
}

impl Session {
	pub fn new(input: CreateSession, scheduled_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
		let details = input.details;

		Self {
			id: Uuid::new_v4(),
			mentor_id: input.mentor_id,
			title: input.title,
			description: details.description,
			topic: details.topic,
			duration: input.duration,
			max_participants: details.max_participants.unwrap_or(DEFAULT_MAX_PARTICIPANTS),
			meeting_link: details.meeting_link,
			requirements: details.requirements.unwrap_or_default(),
			objectives: details.objectives.unwrap_or_default(),
			status: details.status.unwrap_or_default(),
			scheduled_at,
			participants: Vec::new(),
			created_at: now,
			updated_at: now,
		}
	}

	pub fn apply(&mut self, input: UpdateSession, scheduled_at: Option<DateTime<Utc>>, now: DateTime<Utc>) {
		let details = input.details;

		if let Some(title) = input.title {
			self.title = title;
		}
		if let Some(duration) = input.duration {
			self.duration = duration;
		}
		if let Some(scheduled_at) = scheduled_at {
			self.scheduled_at = scheduled_at;
		}
		if details.description.is_some() {
			self.description = details.description;
		}
		if details.topic.is_some() {
			self.topic = details.topic;
		}
		if let Some(max_participants) = details.max_participants {
			self.max_participants = max_participants;
		}
		if details.meeting_link.is_some() {
			self.meeting_link = details.meeting_link;
		}
		if let Some(requirements) = details.requirements {
			self.requirements = requirements;
		}
		if let Some(objectives) = details.objectives {
			self.objectives = objectives;
		}
		if let Some(status) = details.status {
			self.status = status;
		}

		self.updated_at = now;
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum JoinError {
	#[error("session is {}", .0.as_str())]
	NotJoinable(SessionStatus),
	#[error("session is full")]
	Full,
}

impl Session {
	/// Adds a participant. Joining twice is a no-op.
	pub fn join(&mut self, user_id: Uuid, now: DateTime<Utc>) -> Result<(), JoinError> {
		if !self.status.is_joinable() {
			return Err(JoinError::NotJoinable(self.status));
		}

		if self.participants.contains(&user_id) {
			return Ok(());
		}

		if self.participants.len() >= self.max_participants as usize {
			return Err(JoinError::Full);
		}

		self.participants.push(user_id);
		self.updated_at = now;

		Ok(())
	}
}

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionFilter {
	pub status: Option<SessionStatus>,
	pub mentor_id: Option<Uuid>,
}

impl SessionFilter {
	pub fn matches(&self, session: &Session) -> bool {
		self.status.map_or(true, |status| session.status == status)
			&& self.mentor_id.map_or(true, |mentor_id| session.mentor_id == Some(mentor_id))
	}
}
