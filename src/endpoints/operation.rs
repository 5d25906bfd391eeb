//! Fixed table of OnSched operations: verb, path template, and paging behavior.

// self
use crate::{
	_prelude::*,
	dispatch::{Method, RequestDescriptor},
	error::ConfigError,
};

/// Every API operation exposed by [`Client`](crate::Client).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// List appointments.
	Appointments,
	/// Query availability for a service between two dates.
	Availability,
	/// Finalize an initial appointment.
	BookAppointment,
	/// Cancel a booked appointment.
	CancelAppointment,
	/// Reserve a new appointment in the initial state.
	CreateAppointment,
	/// Create a resource.
	CreateResource,
	/// Create a service.
	CreateService,
	/// Create an allocation for a service.
	CreateServiceAllocation,
	/// List customers.
	Customers,
	/// Delete a resource.
	DeleteResource,
	/// Delete a service.
	DeleteService,
	/// Fetch a single location.
	Location,
	/// List locations.
	Locations,
	/// Fetch a single service allocation.
	ServiceAllocation,
	/// List the allocations of a service.
	ServiceAllocations,
	/// List services.
	Services,
	/// Update a resource.
	UpdateResource,
}
impl Operation {
	/// All operations in table order.
	pub const ALL: [Self; 17] = [
		Self::Appointments,
		Self::Availability,
		Self::BookAppointment,
		Self::CancelAppointment,
		Self::CreateAppointment,
		Self::CreateResource,
		Self::CreateService,
		Self::CreateServiceAllocation,
		Self::Customers,
		Self::DeleteResource,
		Self::DeleteService,
		Self::Location,
		Self::Locations,
		Self::ServiceAllocation,
		Self::ServiceAllocations,
		Self::Services,
		Self::UpdateResource,
	];

	/// Stable snake_case label used in spans and metrics.
	pub const fn name(self) -> &'static str {
		match self {
			Self::Appointments => "appointments",
			Self::Availability => "availability",
			Self::BookAppointment => "book_appointment",
			Self::CancelAppointment => "cancel_appointment",
			Self::CreateAppointment => "create_appointment",
			Self::CreateResource => "create_resource",
			Self::CreateService => "create_service",
			Self::CreateServiceAllocation => "create_service_allocation",
			Self::Customers => "customers",
			Self::DeleteResource => "delete_resource",
			Self::DeleteService => "delete_service",
			Self::Location => "location",
			Self::Locations => "locations",
			Self::ServiceAllocation => "service_allocation",
			Self::ServiceAllocations => "service_allocations",
			Self::Services => "services",
			Self::UpdateResource => "update_resource",
		}
	}

	/// HTTP verb.
	pub const fn method(self) -> Method {
		match self {
			Self::Appointments
			| Self::Availability
			| Self::Customers
			| Self::Location
			| Self::Locations
			| Self::ServiceAllocation
			| Self::ServiceAllocations
			| Self::Services => Method::Get,
			Self::CreateAppointment
			| Self::CreateResource
			| Self::CreateService
			| Self::CreateServiceAllocation => Method::Post,
			Self::BookAppointment | Self::CancelAppointment | Self::UpdateResource => Method::Put,
			Self::DeleteResource | Self::DeleteService => Method::Delete,
		}
	}

	/// Path template with `{name}` placeholders.
	pub const fn path_template(self) -> &'static str {
		match self {
			Self::Appointments | Self::CreateAppointment => "/consumer/v1/appointments",
			Self::Availability =>
				"/consumer/v1/availability/{serviceId}/{startDate}/{endDate}",
			Self::BookAppointment => "/consumer/v1/appointments/{id}/book",
			Self::CancelAppointment => "/consumer/v1/appointments/{id}/cancel",
			Self::CreateResource => "/setup/v1/resources",
			Self::CreateService => "/setup/v1/services",
			Self::CreateServiceAllocation => "/setup/v1/services/{id}/allocations",
			Self::Customers => "/consumer/v1/customers",
			Self::DeleteResource | Self::UpdateResource => "/setup/v1/resources/{id}",
			Self::DeleteService => "/setup/v1/services/{id}",
			Self::Location => "/consumer/v1/locations/{id}",
			Self::Locations => "/consumer/v1/locations",
			Self::ServiceAllocation => "/consumer/v1/services/allocations/{id}",
			Self::ServiceAllocations => "/consumer/v1/services/{id}/allocations",
			Self::Services => "/consumer/v1/services",
		}
	}

	/// Whether the operation walks `limit`/`offset` pages.
	pub const fn is_paged(self) -> bool {
		matches!(
			self,
			Self::Appointments
				| Self::Customers
				| Self::Locations
				| Self::ServiceAllocations
				| Self::Services
		)
	}

	/// Substitutes path parameters and returns a descriptor without query or body.
	pub fn descriptor(self, path_params: &[(&str, &str)]) -> Result<RequestDescriptor, ConfigError> {
		let path = render_path(self.path_template(), path_params)?;

		Ok(RequestDescriptor::new(self.method(), path, self.name()))
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.name())
	}
}

/// Substitutes `{name}` placeholders in `template`.
///
/// Values must be non-empty and free of `/`; percent-encoding happens when the dispatcher
/// resolves the URL.
pub fn render_path(template: &'static str, params: &[(&str, &str)]) -> Result<String, ConfigError> {
	let mut path = String::with_capacity(template.len());

	for segment in template.split('/').filter(|segment| !segment.is_empty()) {
		path.push('/');

		let Some(name) = segment.strip_prefix('{').and_then(|rest| rest.strip_suffix('}')) else {
			path.push_str(segment);

			continue;
		};
		let value = params
			.iter()
			.find_map(|(key, value)| (*key == name).then_some(*value))
			.ok_or(ConfigError::MissingParameter { name })?;

		if value.trim().is_empty() {
			return Err(ConfigError::MissingParameter { name });
		}
		if value.contains('/') {
			return Err(ConfigError::invalid_parameter(name, "path values must not contain `/`"));
		}
		// URL normalization would drop these segments and hit the parent resource.
		if matches!(value, "." | "..") {
			return Err(ConfigError::invalid_parameter(name, "path values must not be `.` or `..`"));
		}

		path.push_str(value);
	}

	Ok(path)
}
