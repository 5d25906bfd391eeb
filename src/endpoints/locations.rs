//! Business locations.

// self
use crate::{
	_prelude::*,
	client::Client,
	dispatch::ResponseEnvelope,
	endpoints::{Operation, Params},
};

impl Client {
	/// Lists every location, following pagination.
	pub async fn locations(&self) -> Result<ResponseEnvelope> {
		self.query(Operation::Locations, &[], Params::new()).await
	}

	/// Fetches a single location by id.
	pub async fn location(&self, location_id: &str) -> Result<ResponseEnvelope> {
		self.query(Operation::Location, &[("id", location_id)], Params::new()).await
	}
}
