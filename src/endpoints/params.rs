//! Parameter lowering shared by every endpoint.

// crates.io
use time::{Date, format_description::well_known::Rfc3339, macros::format_description};
// self
use crate::{_prelude::*, error::ConfigError};

/// Date or date-time argument accepted by date-bearing parameters.
///
/// Dates render as `YYYY-MM-DD` and date-times as RFC 3339. [`Timestamp::Text`] is passed
/// through verbatim for values the caller already formatted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Timestamp {
	/// Calendar date.
	Date(Date),
	/// Instant with offset.
	DateTime(OffsetDateTime),
	/// Pre-formatted value.
	Text(String),
}
impl Timestamp {
	/// Renders the value as ISO-8601.
	pub fn to_iso(&self, name: &'static str) -> Result<String, ConfigError> {
		match self {
			Self::Date(date) => date
				.format(format_description!("[year]-[month]-[day]"))
				.map_err(|source| ConfigError::InvalidTimestamp { name, source }),
			Self::DateTime(instant) => instant
				.format(&Rfc3339)
				.map_err(|source| ConfigError::InvalidTimestamp { name, source }),
			Self::Text(text) => Ok(text.trim().to_owned()),
		}
	}
}
impl From<Date> for Timestamp {
	fn from(date: Date) -> Self {
		Self::Date(date)
	}
}
impl From<OffsetDateTime> for Timestamp {
	fn from(instant: OffsetDateTime) -> Self {
		Self::DateTime(instant)
	}
}
impl From<&str> for Timestamp {
	fn from(text: &str) -> Self {
		Self::Text(text.to_owned())
	}
}
impl From<String> for Timestamp {
	fn from(text: String) -> Self {
		Self::Text(text)
	}
}

/// Validates a military time (`800` is 8:00am, `2230` is 10:30pm).
pub fn military_time(name: &str, value: u16) -> Result<u16, ConfigError> {
	if value > 2359 || value % 100 >= 60 {
		return Err(ConfigError::invalid_parameter(
			name,
			format!("{value} is not a military time between 0 and 2359"),
		));
	}

	Ok(value)
}

/// Named values with unset entries dropped, kept sorted by name.
///
/// Empty strings, `None`, `false` flags, and empty lists or objects are never inserted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Params(JsonMap<String, JsonValue>);
impl Params {
	/// Creates an empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts a string when it is present and non-empty.
	pub fn text(mut self, name: &str, value: Option<&str>) -> Self {
		if let Some(value) = value.filter(|value| !value.is_empty()) {
			self.0.insert(name.to_owned(), JsonValue::String(value.to_owned()));
		}

		self
	}

	/// Inserts a required string, rejecting blank values.
	pub fn required_text(self, name: &'static str, value: &str) -> Result<Self, ConfigError> {
		if value.trim().is_empty() {
			return Err(ConfigError::MissingParameter { name });
		}

		Ok(self.text(name, Some(value)))
	}

	/// Inserts a required timestamp, rejecting blank pre-formatted values.
	pub fn required_timestamp(
		self,
		name: &'static str,
		value: &Timestamp,
	) -> Result<Self, ConfigError> {
		let rendered = value.to_iso(name)?;

		self.required_text(name, &rendered)
	}

	/// Inserts a numeric or otherwise JSON-convertible value when present.
	pub fn value<V>(mut self, name: &str, value: Option<V>) -> Self
	where
		V: Into<JsonValue>,
	{
		if let Some(value) = value {
			self.0.insert(name.to_owned(), value.into());
		}

		self
	}

	/// Inserts `true` when the flag is set.
	pub fn flag(mut self, name: &str, value: bool) -> Self {
		if value {
			self.0.insert(name.to_owned(), JsonValue::Bool(true));
		}

		self
	}

	/// Inserts an ISO-8601 rendering of the timestamp when present.
	pub fn timestamp(
		self,
		name: &'static str,
		value: Option<&Timestamp>,
	) -> Result<Self, ConfigError> {
		let rendered = value.map(|value| value.to_iso(name)).transpose()?;

		Ok(self.text(name, rendered.as_deref()))
	}

	/// Inserts a validated military time when present.
	pub fn military_time(self, name: &str, value: Option<u16>) -> Result<Self, ConfigError> {
		let value = value.map(|value| military_time(name, value)).transpose()?;

		Ok(self.value(name, value))
	}

	/// Inserts a nested object unless it is empty.
	pub fn object(mut self, name: &str, value: Params) -> Self {
		if !value.is_empty() {
			self.0.insert(name.to_owned(), JsonValue::Object(value.0));
		}

		self
	}

	/// Inserts a list unless it is empty.
	pub fn list<I, V>(mut self, name: &str, values: I) -> Self
	where
		I: IntoIterator<Item = V>,
		V: Into<JsonValue>,
	{
		let values = values.into_iter().map(Into::into).collect::<Vec<_>>();

		if !values.is_empty() {
			self.0.insert(name.to_owned(), JsonValue::Array(values));
		}

		self
	}

	/// Returns `true` when nothing was inserted.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns the value stored under `name`.
	pub fn get(&self, name: &str) -> Option<&JsonValue> {
		self.0.get(name)
	}

	/// Lowers the set into query pairs (`true` flags render as `true`).
	pub fn into_query(self) -> Vec<(String, String)> {
		self.0
			.into_iter()
			.map(|(name, value)| {
				let value = match value {
					JsonValue::String(text) => text,
					other => other.to_string(),
				};

				(name, value)
			})
			.collect()
	}

	/// Lowers the set into a JSON object body.
	pub fn into_body(self) -> JsonValue {
		JsonValue::Object(self.0)
	}
}
