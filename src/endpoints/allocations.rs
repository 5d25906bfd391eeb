//! Service allocations: blocks of time a service is offered outside regular hours.

// self
use crate::{
	_prelude::*,
	client::Client,
	dispatch::ResponseEnvelope,
	endpoints::{Operation, Params, Timestamp},
};

/// Filters for [`Client::service_allocations`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AllocationsQuery {
	/// Location.
	pub location_id: Option<String>,
	/// Earliest allocation date.
	pub start_date: Option<Timestamp>,
	/// Latest allocation date.
	pub end_date: Option<Timestamp>,
}
impl AllocationsQuery {
	pub(crate) fn params(&self) -> Result<Params> {
		let params = Params::new()
			.text("locationId", self.location_id.as_deref())
			.timestamp("startDate", self.start_date.as_ref())?
			.timestamp("endDate", self.end_date.as_ref())?;

		Ok(params)
	}
}

/// Arguments for [`Client::create_service_allocation`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewServiceAllocation {
	/// First day of the allocation.
	pub start_date: Timestamp,
	/// Last day of the allocation.
	pub end_date: Timestamp,
	/// Daily start, as military time.
	pub start_time: Option<u16>,
	/// Daily end, as military time.
	pub end_time: Option<u16>,
	/// Location.
	pub location_id: Option<String>,
	/// Resource serving the allocation.
	pub resource_id: Option<String>,
	/// Purpose of the allocation.
	pub reason: Option<String>,
	/// Spans whole days.
	pub all_day: bool,
}
impl NewServiceAllocation {
	/// Creates an allocation request with the required dates.
	pub fn new(start_date: impl Into<Timestamp>, end_date: impl Into<Timestamp>) -> Self {
		Self {
			start_date: start_date.into(),
			end_date: end_date.into(),
			start_time: None,
			end_time: None,
			location_id: None,
			resource_id: None,
			reason: None,
			all_day: false,
		}
	}

	/// Sets the daily window as military times.
	pub fn hours(mut self, start_time: u16, end_time: u16) -> Self {
		self.start_time = Some(start_time);
		self.end_time = Some(end_time);

		self
	}

	pub(crate) fn params(&self) -> Result<Params> {
		let params = Params::new()
			.required_timestamp("startDate", &self.start_date)?
			.required_timestamp("endDate", &self.end_date)?
			.military_time("startTime", self.start_time)?
			.military_time("endTime", self.end_time)?
			.text("locationId", self.location_id.as_deref())
			.text("resourceId", self.resource_id.as_deref())
			.text("reason", self.reason.as_deref())
			.flag("allDay", self.all_day);

		Ok(params)
	}
}

impl Client {
	/// Lists the allocations of a service, following pagination.
	pub async fn service_allocations(
		&self,
		service_id: &str,
		query: &AllocationsQuery,
	) -> Result<ResponseEnvelope> {
		self.query(Operation::ServiceAllocations, &[("id", service_id)], query.params()?).await
	}

	/// Fetches a single service allocation.
	pub async fn service_allocation(&self, allocation_id: &str) -> Result<ResponseEnvelope> {
		self.query(Operation::ServiceAllocation, &[("id", allocation_id)], Params::new()).await
	}

	/// Creates an allocation for a service.
	pub async fn create_service_allocation(
		&self,
		service_id: &str,
		allocation: &NewServiceAllocation,
	) -> Result<ResponseEnvelope> {
		let body = allocation.params()?.into_body();

		self.submit(Operation::CreateServiceAllocation, &[("id", service_id)], body).await
	}
}
