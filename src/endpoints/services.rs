//! Services offered by a business.

// self
use crate::{
	_prelude::*,
	client::Client,
	dispatch::ResponseEnvelope,
	endpoints::{Operation, Params},
};

/// Filters for [`Client::services`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServicesQuery {
	/// Location offering the services.
	pub location_id: Option<String>,
	/// Service group.
	pub service_group: Option<String>,
	/// Only the default service.
	pub default_service: bool,
}
impl ServicesQuery {
	pub(crate) fn params(&self) -> Params {
		Params::new()
			.text("locationId", self.location_id.as_deref())
			.text("serviceGroup", self.service_group.as_deref())
			.flag("defaultService", self.default_service)
	}
}

/// Duration and padding options of a new service.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceOptions {
	/// Mark as the default service.
	pub default_service: bool,
	/// Customers may choose the duration.
	pub duration_select: bool,
	/// Step between selectable durations, in minutes.
	pub duration_interval: Option<u32>,
	/// Shortest selectable duration, in minutes.
	pub duration_min: Option<u32>,
	/// Longest selectable duration, in minutes.
	pub duration_max: Option<u32>,
	/// Padding between appointments, in minutes.
	pub padding: Option<u32>,
	/// Apply padding to consumer bookings.
	pub consumer_padding: bool,
}
impl ServiceOptions {
	fn params(&self) -> Params {
		Params::new()
			.flag("defaultService", self.default_service)
			.flag("durationSelect", self.duration_select)
			.value("durationInterval", self.duration_interval)
			.value("durationMin", self.duration_min)
			.value("durationMax", self.duration_max)
			.value("padding", self.padding)
			.flag("consumerPadding", self.consumer_padding)
	}
}

/// Fees charged for a new service.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ServiceFee {
	/// Booking fee.
	pub fee_amount: Option<f64>,
	/// Booking fee is taxable.
	pub fee_taxable: bool,
	/// Cancellation fee.
	pub cancellation_fee_amount: Option<f64>,
	/// Cancellation fee is taxable.
	pub cancellation_fee_taxable: bool,
	/// Fees are not refunded.
	pub non_refundable: bool,
}
impl ServiceFee {
	fn params(&self) -> Params {
		Params::new()
			.value("feeAmount", self.fee_amount)
			.flag("feeTaxable", self.fee_taxable)
			.value("cancellationFeeAmount", self.cancellation_fee_amount)
			.flag("cancellationFeeTaxable", self.cancellation_fee_taxable)
			.flag("nonRefundable", self.non_refundable)
	}
}

/// Arguments for [`Client::create_service`].
#[derive(Clone, Debug, PartialEq)]
pub struct NewService {
	/// Service name.
	pub name: String,
	/// Service description.
	pub description: String,
	/// Default duration in minutes.
	pub duration: Option<u32>,
	/// Location offering the service.
	pub location_id: Option<String>,
	/// Service group.
	pub service_group_id: Option<String>,
	/// Bookable by the public.
	pub public: bool,
	/// Duration and padding options.
	pub options: ServiceOptions,
	/// Fees.
	pub fee: ServiceFee,
}
impl NewService {
	/// Creates a service request with the required fields.
	pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			description: description.into(),
			duration: None,
			location_id: None,
			service_group_id: None,
			public: false,
			options: ServiceOptions::default(),
			fee: ServiceFee::default(),
		}
	}

	/// Sets the default duration in minutes.
	pub fn duration(mut self, minutes: u32) -> Self {
		self.duration = Some(minutes);

		self
	}

	pub(crate) fn params(&self) -> Result<Params> {
		let params = Params::new()
			.required_text("name", &self.name)?
			.required_text("description", &self.description)?
			.value("duration", self.duration)
			.text("locationId", self.location_id.as_deref())
			.text("serviceGroupId", self.service_group_id.as_deref())
			.flag("public", self.public)
			.object("options", self.options.params())
			.object("fee", self.fee.params());

		Ok(params)
	}
}

impl Client {
	/// Lists services matching the filters, following pagination.
	pub async fn services(&self, query: &ServicesQuery) -> Result<ResponseEnvelope> {
		self.query(Operation::Services, &[], query.params()).await
	}

	/// Creates a service.
	pub async fn create_service(&self, service: &NewService) -> Result<ResponseEnvelope> {
		self.submit(Operation::CreateService, &[], service.params()?.into_body()).await
	}

	/// Deletes a service.
	pub async fn delete_service(&self, service_id: &str) -> Result<ResponseEnvelope> {
		self.query(Operation::DeleteService, &[("id", service_id)], Params::new()).await
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;
	use crate::error::ConfigError;

	#[test]
	fn new_service_includes_fee_and_options_when_set() {
		let mut service = NewService::new("Haircut", "30 minute cut").duration(30);

		service.options.default_service = true;
		service.fee.fee_amount = Some(25.0);
		service.fee.fee_taxable = true;

		assert_eq!(
			service.params().expect("Required fields are present.").into_body(),
			json!({
				"name": "Haircut",
				"description": "30 minute cut",
				"duration": 30,
				"options": { "defaultService": true },
				"fee": { "feeAmount": 25.0, "feeTaxable": true }
			})
		);
	}

	#[test]
	fn new_service_requires_a_description() {
		let err = NewService::new("Haircut", " ").params().expect_err("Blank descriptions fail.");

		assert!(matches!(err, Error::Config(ConfigError::MissingParameter { name: "description" })));
	}

	#[test]
	fn default_service_filter_is_a_flag() {
		let query = ServicesQuery { default_service: true, ..Default::default() };

		assert_eq!(query.params().into_query(), vec![(
			"defaultService".to_owned(),
			"true".to_owned()
		)]);
	}
}
