//! Appointment lifecycle: reserve, book, cancel, and search.
//!
//! An appointment is created in the initial (`IN`) state, which holds the slot; booking fills in
//! the customer details and moves it to `BK`.

// self
use crate::{
	_prelude::*,
	client::Client,
	dispatch::ResponseEnvelope,
	endpoints::{Operation, Params, Timestamp},
};

/// Appointment status codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentStatus {
	/// Initial: slot reserved, not yet booked.
	#[serde(rename = "IN")]
	Initial,
	/// Booked.
	#[serde(rename = "BK")]
	Booked,
	/// Cancelled.
	#[serde(rename = "CN")]
	Cancelled,
	/// Reserved.
	#[serde(rename = "RE")]
	Reserved,
	/// Rescheduled.
	#[serde(rename = "RS")]
	Rescheduled,
}
impl AppointmentStatus {
	/// Two-letter wire code.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Initial => "IN",
			Self::Booked => "BK",
			Self::Cancelled => "CN",
			Self::Reserved => "RE",
			Self::Rescheduled => "RS",
		}
	}
}
impl Display for AppointmentStatus {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Filters for [`Client::appointments`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppointmentsQuery {
	/// Location.
	pub location_id: Option<String>,
	/// Customer email.
	pub email: Option<String>,
	/// Customer last name.
	pub last_name: Option<String>,
	/// Service.
	pub service_id: Option<String>,
	/// Service allocation.
	pub service_allocation_id: Option<String>,
	/// Resource.
	pub resource_id: Option<String>,
	/// Customer.
	pub customer_id: Option<String>,
	/// Earliest appointment date.
	pub start_date: Option<Timestamp>,
	/// Latest appointment date.
	pub end_date: Option<Timestamp>,
	/// Status filter.
	pub status: Option<AppointmentStatus>,
	/// Who booked the appointment.
	pub booked_by: Option<String>,
}
impl AppointmentsQuery {
	pub(crate) fn params(&self) -> Result<Params> {
		let params = Params::new()
			.text("locationId", self.location_id.as_deref())
			.text("email", self.email.as_deref())
			.text("lastname", self.last_name.as_deref())
			.text("serviceId", self.service_id.as_deref())
			.text("serviceAllocationId", self.service_allocation_id.as_deref())
			.text("resourceId", self.resource_id.as_deref())
			.text("customerId", self.customer_id.as_deref())
			.timestamp("startDate", self.start_date.as_ref())?
			.timestamp("endDate", self.end_date.as_ref())?
			.text("status", self.status.map(AppointmentStatus::as_str))
			.text("bookedBy", self.booked_by.as_deref());

		Ok(params)
	}
}

/// Arguments for [`Client::create_appointment`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewAppointment {
	/// Service being booked.
	pub service_id: String,
	/// Appointment start.
	pub start_date_time: Timestamp,
	/// Appointment end.
	pub end_date_time: Timestamp,
	/// Resource performing the service.
	pub resource_id: Option<String>,
	/// Location.
	pub location_id: Option<String>,
	/// Existing customer.
	pub customer_id: Option<String>,
	/// Service allocation the slot belongs to.
	pub service_allocation_id: Option<String>,
	/// Who booked the appointment.
	pub booked_by: Option<String>,
}
impl NewAppointment {
	/// Creates an appointment request with the required fields.
	pub fn new(
		service_id: impl Into<String>,
		start_date_time: impl Into<Timestamp>,
		end_date_time: impl Into<Timestamp>,
	) -> Self {
		Self {
			service_id: service_id.into(),
			start_date_time: start_date_time.into(),
			end_date_time: end_date_time.into(),
			resource_id: None,
			location_id: None,
			customer_id: None,
			service_allocation_id: None,
			booked_by: None,
		}
	}

	/// Sets the resource.
	pub fn resource_id(mut self, resource_id: impl Into<String>) -> Self {
		self.resource_id = Some(resource_id.into());

		self
	}

	/// Sets the location.
	pub fn location_id(mut self, location_id: impl Into<String>) -> Self {
		self.location_id = Some(location_id.into());

		self
	}

	/// Sets the customer.
	pub fn customer_id(mut self, customer_id: impl Into<String>) -> Self {
		self.customer_id = Some(customer_id.into());

		self
	}

	pub(crate) fn params(&self) -> Result<Params> {
		let params = Params::new()
			.required_text("serviceId", &self.service_id)?
			.required_timestamp("startDateTime", &self.start_date_time)?
			.required_timestamp("endDateTime", &self.end_date_time)?
			.text("resourceId", self.resource_id.as_deref())
			.text("locationId", self.location_id.as_deref())
			.text("customerId", self.customer_id.as_deref())
			.text("serviceAllocationId", self.service_allocation_id.as_deref())
			.text("bookedBy", self.booked_by.as_deref());

		Ok(params)
	}
}

/// Custom booking field submitted as `{name, value}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingField {
	/// Field name configured in OnSched.
	pub name: String,
	/// Field value.
	pub value: String,
}
impl BookingField {
	/// Creates a booking field.
	pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self { name: name.into(), value: value.into() }
	}
}
impl From<&BookingField> for JsonValue {
	fn from(field: &BookingField) -> Self {
		serde_json::json!({ "name": field.name, "value": field.value })
	}
}

/// Customer details for [`Client::book_appointment`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookingDetails {
	/// Customer email.
	pub email: Option<String>,
	/// Customer name.
	pub name: Option<String>,
	/// Phone number.
	pub phone: Option<String>,
	/// Phone type label (e.g. `mobile`).
	pub phone_type: Option<String>,
	/// Phone extension.
	pub phone_ext: Option<String>,
	/// Message from the customer.
	pub customer_message: Option<String>,
	/// Internal notes.
	pub notes: Option<String>,
	/// Appointment-level custom fields.
	pub appointment_booking_fields: Vec<BookingField>,
	/// Customer-level custom fields.
	pub customer_booking_fields: Vec<BookingField>,
}
impl BookingDetails {
	pub(crate) fn params(&self) -> Params {
		Params::new()
			.text("email", self.email.as_deref())
			.text("name", self.name.as_deref())
			.text("phone", self.phone.as_deref())
			.text("phoneType", self.phone_type.as_deref())
			.text("phoneExt", self.phone_ext.as_deref())
			.text("customerMessage", self.customer_message.as_deref())
			.text("notes", self.notes.as_deref())
			.list("appointmentBookingFields", &self.appointment_booking_fields)
			.list("customerBookingFields", &self.customer_booking_fields)
	}
}

impl Client {
	/// Lists appointments matching the filters, following pagination.
	pub async fn appointments(&self, query: &AppointmentsQuery) -> Result<ResponseEnvelope> {
		self.query(Operation::Appointments, &[], query.params()?).await
	}

	/// Reserves a slot; the appointment stays in the initial state until booked.
	pub async fn create_appointment(
		&self,
		appointment: &NewAppointment,
	) -> Result<ResponseEnvelope> {
		self.submit(Operation::CreateAppointment, &[], appointment.params()?.into_body()).await
	}

	/// Completes an initial appointment with the customer's details.
	pub async fn book_appointment(
		&self,
		appointment_id: &str,
		details: &BookingDetails,
	) -> Result<ResponseEnvelope> {
		let body = details.params().into_body();

		self.submit(Operation::BookAppointment, &[("id", appointment_id)], body).await
	}

	/// Cancels a booked appointment.
	pub async fn cancel_appointment(&self, appointment_id: &str) -> Result<ResponseEnvelope> {
		let body = Params::new().into_body();

		self.submit(Operation::CancelAppointment, &[("id", appointment_id)], body).await
	}
}
