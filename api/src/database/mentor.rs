use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mentor {
	pub id: Uuid,
	pub user_id: Option<Uuid>,
	pub name: Option<String>,
	pub email: Option<String>,
	pub bio: Option<String>,
	pub experience: Option<u32>,
	pub hourly_rate: Option<f64>,
	pub specialties: Vec<String>,
	pub languages: Vec<String>,
	pub certifications: Vec<String>,
	pub avatar: Option<String>,
	pub profile_image_url: Option<String>,
	pub rating: f64,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

/// A validated mentor payload. On create every field is taken as is, on
/// update only the fields present replace the stored ones.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorInput {
	pub user_id: Option<Uuid>,
	pub name: Option<String>,
	pub email: Option<String>,
	pub bio: Option<String>,
	pub experience: Option<u32>,
	pub hourly_rate: Option<f64>,
	pub specialties: Option<Vec<String>>,
	pub languages: Option<Vec<String>>,
	pub certifications: Option<Vec<String>>,
	pub avatar: Option<String>,
	pub profile_image_url: Option<String>,
}

impl Mentor {
	pub fn new(input: MentorInput, now: DateTime<Utc>) -> Self {
		Self {
			id: Uuid::new_v4(),
			user_id: input.user_id,
			name: input.name,
			email: input.email,
			bio: input.bio,
			experience: input.experience,
			hourly_rate: input.hourly_rate,
			specialties: input.specialties.unwrap_or_default(),
			languages: input.languages.unwrap_or_default(),
			certifications: input.certifications.unwrap_or_default(),
			avatar: input.avatar,
			profile_image_url: input.profile_image_url,
			rating: 0.0,
			created_at: now,
			updated_at: now,
		}
	}

	pub fn apply(&mut self, input: MentorInput, now: DateTime<Utc>) {
		overwrite(&mut self.user_id, input.user_id);
		overwrite(&mut self.name, input.name);
		overwrite(&mut self.email, input.email);
		overwrite(&mut self.bio, input.bio);
		overwrite(&mut self.experience, input.experience);
		overwrite(&mut self.hourly_rate, input.hourly_rate);
		overwrite(&mut self.avatar, input.avatar);
		overwrite(&mut self.profile_image_url, input.profile_image_url);

		if let Some(specialties) = input.specialties {
			self.specialties = specialties;
		}
		if let Some(languages) = input.languages {
			self.languages = languages;
		}
		if let Some(certifications) = input.certifications {
			self.certifications = certifications;
		}

		self.updated_at = now;
	}
}

fn overwrite<T>(slot: &mut Option<T>, value: Option<T>) {
	if value.is_some() {
		*slot = value;
	}
}

/// Filters of the mentor listing.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorFilter {
	pub search: Option<String>,
	pub specialty: Option<String>,
	pub min_rating: Option<f64>,
}

impl MentorFilter {
	pub fn matches(&self, mentor: &Mentor) -> bool {
		let contains = |haystack: &Option<String>, needle: &str| {
			haystack
				.as_deref()
				.is_some_and(|haystack| haystack.to_lowercase().contains(needle))
		};

		let search = self.search.as_deref().map(str::to_lowercase);
		let search_ok = search
			.as_deref()
			.map_or(true, |needle| contains(&mentor.name, needle) || contains(&mentor.bio, needle));

		let specialty_ok = self.specialty.as_deref().map_or(true, |specialty| {
			mentor
				.specialties
				.iter()
				.any(|candidate| candidate.eq_ignore_ascii_case(specialty))
		});

		let rating_ok = self.min_rating.map_or(true, |min| mentor.rating >= min);

		search_ok && specialty_ok && rating_ok
	}
}
