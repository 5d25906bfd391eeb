//! Availability search for a service.
//!
//! Availability is expensive to compute upstream: search all resources for a single date, or a
//! single resource across a range.

// self
use crate::{
	_prelude::*,
	client::Client,
	dispatch::ResponseEnvelope,
	endpoints::{Operation, Params, Timestamp},
};

/// Optional filters for [`Client::availability`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AvailabilityQuery {
	/// Earliest time of day, as military time (`800` is 8:00am).
	pub start_time: Option<u16>,
	/// Latest time of day, as military time (`2230` is 10:30pm).
	pub end_time: Option<u16>,
	/// Business location; the API defaults to the first location.
	pub location_id: Option<String>,
	/// Single resource to search.
	pub resource_id: Option<String>,
	/// Resource group to search.
	pub resource_group_id: Option<String>,
	/// Several resources to search; sent comma-joined.
	pub resource_ids: Vec<String>,
	/// Duration in minutes when customers pick their own.
	pub duration: Option<u32>,
	/// Offset from GMT used to present the slots.
	pub tz_offset: Option<i32>,
	/// Number of days of day-level availability to return from the start date.
	pub day_availability: Option<u32>,
	/// With `day_availability`, return times for the first available day only.
	pub first_day_available: bool,
}
impl AvailabilityQuery {
	pub(crate) fn params(&self) -> Result<Params> {
		let resource_ids = self.resource_ids.iter().filter(|id| !id.is_empty()).cloned();
		let resource_ids = resource_ids.collect::<Vec<_>>().join(",");
		let params = Params::new()
			.military_time("startTime", self.start_time)?
			.military_time("endTime", self.end_time)?
			.text("locationId", self.location_id.as_deref())
			.text("resourceId", self.resource_id.as_deref())
			.text("resourceGroupId", self.resource_group_id.as_deref())
			.text("resourceIds", Some(resource_ids.as_str()))
			.value("duration", self.duration)
			.value("tzOffset", self.tz_offset)
			.value("dayAvailability", self.day_availability)
			.flag("firstDayAvailable", self.first_day_available);

		Ok(params)
	}
}

impl Client {
	/// Returns availability for `service_id` between `start_date` and `end_date`.
	pub async fn availability(
		&self,
		service_id: &str,
		start_date: impl Into<Timestamp>,
		end_date: impl Into<Timestamp>,
		query: &AvailabilityQuery,
	) -> Result<ResponseEnvelope> {
		let start_date = start_date.into().to_iso("startDate")?;
		let end_date = end_date.into().to_iso("endDate")?;
		let path_params = [
			("serviceId", service_id),
			("startDate", start_date.as_str()),
			("endDate", end_date.as_str()),
		];

		self.query(Operation::Availability, &path_params, query.params()?).await
	}
}
