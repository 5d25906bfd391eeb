//! Resources: the people, rooms, or equipment that perform services.

// self
use crate::{
	_prelude::*,
	client::Client,
	dispatch::ResponseEnvelope,
	endpoints::{Operation, Params, Timestamp},
	error::ConfigError,
};

/// Notification channel for a resource.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NotificationType {
	/// Company default.
	#[default]
	Default,
	/// Email only.
	Email,
	/// SMS only.
	Sms,
	/// Email and SMS.
	EmailAndSms,
}
impl NotificationType {
	/// Numeric wire code.
	pub const fn code(self) -> u8 {
		match self {
			Self::Default => 0,
			Self::Email => 1,
			Self::Sms => 2,
			Self::EmailAndSms => 3,
		}
	}
}

/// Calendar system a resource's availability comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CalendarAvailability {
	/// OnSched calendar.
	#[default]
	OnSched,
	/// Google Calendar.
	Google,
	/// Outlook Calendar.
	Outlook,
}
impl CalendarAvailability {
	/// Numeric wire code.
	pub const fn code(self) -> u8 {
		match self {
			Self::OnSched => 0,
			Self::Google => 1,
			Self::Outlook => 2,
		}
	}
}

/// Preferred contact channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhoneType {
	/// Mobile phone.
	Mobile,
	/// Business phone.
	Business,
	/// Home phone.
	Home,
	/// Skype.
	Skype,
}
impl PhoneType {
	/// Lower-case wire label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Mobile => "mobile",
			Self::Business => "business",
			Self::Home => "home",
			Self::Skype => "skype",
		}
	}
}

/// Postal address; when any field is set, all six are sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Address {
	/// First address line.
	pub address_line1: Option<String>,
	/// Second address line.
	pub address_line2: Option<String>,
	/// City.
	pub city: Option<String>,
	/// State or province.
	pub state: Option<String>,
	/// Postal code.
	pub postal_code: Option<String>,
	/// Country.
	pub country: Option<String>,
}
impl Address {
	fn params(&self) -> Params {
		let fields = [
			("addressline1", &self.address_line1),
			("addressline2", &self.address_line2),
			("city", &self.city),
			("state", &self.state),
			("postalCode", &self.postal_code),
			("country", &self.country),
		];

		if fields.iter().all(|(_, value)| value.as_deref().is_none_or(str::is_empty)) {
			return Params::new();
		}

		fields.into_iter().fold(Params::new(), |params, (name, value)| {
			params.value(name, Some(value.clone().unwrap_or_default()))
		})
	}
}

/// Contact details.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Contact {
	/// Preferred channel.
	pub preferred_phone_type: Option<PhoneType>,
	/// Home phone.
	pub home_phone: Option<String>,
	/// Mobile phone.
	pub mobile_phone: Option<String>,
	/// Business phone.
	pub business_phone: Option<String>,
	/// Business phone extension.
	pub business_phone_ext: Option<String>,
	/// Skype username.
	pub skype_username: Option<String>,
}
impl Contact {
	fn params(&self) -> Params {
		Params::new()
			.text("preferredPhoneType", self.preferred_phone_type.map(PhoneType::as_str))
			.text("homePhone", self.home_phone.as_deref())
			.text("mobilePhone", self.mobile_phone.as_deref())
			.text("businessPhone", self.business_phone.as_deref())
			.text("businessPhoneExt", self.business_phone_ext.as_deref())
			.text("skypeUsername", self.skype_username.as_deref())
	}
}

/// Scheduling options.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceOptions {
	/// Instant the resource becomes available.
	pub effective_date: Option<Timestamp>,
	/// Notification channel.
	pub notification_type: Option<NotificationType>,
	/// Calendar color in the portal.
	pub display_color: Option<String>,
	/// Linked Google calendar.
	pub google_calendar_id: Option<String>,
	/// Linked Outlook calendar.
	pub outlook_calendar_id: Option<String>,
	/// Allow bookings outside business hours.
	pub ignore_business_hours: bool,
	/// Gender, for people.
	pub gender: Option<String>,
	/// Hourly rate.
	pub hourly: Option<u32>,
	/// Calendar system availability is read from.
	pub calendar_availability: Option<CalendarAvailability>,
	/// Sort key for resource lists.
	pub sort_key: Option<i32>,
	/// Link to more information.
	pub bio_link: Option<String>,
}
impl ResourceOptions {
	fn params(&self) -> Result<Params, ConfigError> {
		let params = Params::new()
			.timestamp("effectiveDate", self.effective_date.as_ref())?
			.value("notificationType", self.notification_type.map(NotificationType::code))
			.text("displayColor", self.display_color.as_deref())
			.text("googleCalendarId", self.google_calendar_id.as_deref())
			.text("outlookCalendarId", self.outlook_calendar_id.as_deref())
			.flag("ignoreBusinessHours", self.ignore_business_hours)
			.text("gender", self.gender.as_deref())
			.value("hourly", self.hourly)
			.value(
				"calendarAvailability",
				self.calendar_availability.map(CalendarAvailability::code),
			)
			.value("sortKey", self.sort_key)
			.text("bioLink", self.bio_link.as_deref());

		Ok(params)
	}
}

/// Fields for [`Client::create_resource`] and [`Client::update_resource`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceFields {
	/// Display name; required on create.
	pub name: Option<String>,
	/// Email.
	pub email: Option<String>,
	/// Description.
	pub description: Option<String>,
	/// Location the resource works at.
	pub location_id: Option<String>,
	/// Resource group.
	pub group_id: Option<String>,
	/// Time zone identifier.
	pub timezone_id: Option<String>,
	/// Postal address.
	pub address: Address,
	/// Contact details.
	pub contact: Contact,
	/// Scheduling options.
	pub options: ResourceOptions,
}
impl ResourceFields {
	/// Creates fields with the given name.
	pub fn named(name: impl Into<String>) -> Self {
		Self { name: Some(name.into()), ..Default::default() }
	}

	pub(crate) fn params(&self) -> Result<Params, ConfigError> {
		let params = Params::new()
			.text("name", self.name.as_deref())
			.text("email", self.email.as_deref())
			.text("description", self.description.as_deref())
			.text("locationId", self.location_id.as_deref())
			.text("groupId", self.group_id.as_deref())
			.text("timezoneId", self.timezone_id.as_deref())
			.object("address", self.address.params())
			.object("contact", self.contact.params())
			.object("options", self.options.params()?);

		Ok(params)
	}
}

impl Client {
	/// Creates a resource; `fields.name` is required.
	pub async fn create_resource(&self, fields: &ResourceFields) -> Result<ResponseEnvelope> {
		if fields.name.as_deref().is_none_or(|name| name.trim().is_empty()) {
			return Err(ConfigError::MissingParameter { name: "name" }.into());
		}

		self.submit(Operation::CreateResource, &[], fields.params()?.into_body()).await
	}

	/// Updates the set fields of a resource.
	pub async fn update_resource(
		&self,
		resource_id: &str,
		fields: &ResourceFields,
	) -> Result<ResponseEnvelope> {
		let body = fields.params()?.into_body();

		self.submit(Operation::UpdateResource, &[("id", resource_id)], body).await
	}

	/// Deletes a resource.
	pub async fn delete_resource(&self, resource_id: &str) -> Result<ResponseEnvelope> {
		self.query(Operation::DeleteResource, &[("id", resource_id)], Params::new()).await
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn partial_address_sends_every_field() {
		let fields = ResourceFields {
			address: Address { city: Some("Toronto".into()), ..Default::default() },
			..ResourceFields::named("Room A")
		};

		assert_eq!(
			fields.params().expect("Fields should lower.").into_body(),
			json!({
				"name": "Room A",
				"address": {
					"addressline1": "",
					"addressline2": "",
					"city": "Toronto",
					"state": "",
					"postalCode": "",
					"country": ""
				}
			})
		);
	}

	#[test]
	fn nested_objects_only_carry_set_fields() {
		let fields = ResourceFields {
			contact: Contact {
				preferred_phone_type: Some(PhoneType::Mobile),
				mobile_phone: Some("555-0100".into()),
				..Default::default()
			},
			options: ResourceOptions {
				notification_type: Some(NotificationType::EmailAndSms),
				calendar_availability: Some(CalendarAvailability::Google),
				ignore_business_hours: true,
				..Default::default()
			},
			..Default::default()
		};

		assert_eq!(
			fields.params().expect("Fields should lower.").into_body(),
			json!({
				"contact": { "preferredPhoneType": "mobile", "mobilePhone": "555-0100" },
				"options": {
					"notificationType": 3,
					"calendarAvailability": 1,
					"ignoreBusinessHours": true
				}
			})
		);
	}
}
