//! Typed OnSched endpoints.
//!
//! Each endpoint is an inherent method on [`Client`](crate::Client). The fixed operation table
//! lives in [`Operation`]; per-operation option structs lower their fields into query pairs or a
//! JSON body through [`Params`], which drops unset values so omitted arguments never reach the
//! wire.

pub mod allocations;
pub mod appointments;
pub mod availability;
pub mod customers;
pub mod locations;
pub mod operation;
pub mod paging;
pub mod params;
pub mod resources;
pub mod services;

pub use allocations::*;
pub use appointments::*;
pub use availability::*;
pub use customers::*;
pub use operation::*;
pub use params::*;
pub use resources::*;
pub use services::*;

// self
use crate::{
	_prelude::*,
	client::Client,
	dispatch::{RequestDescriptor, ResponseEnvelope},
};

impl Client {
	/// Sends a query-only operation (GET or DELETE).
	async fn query(
		&self,
		operation: Operation,
		path_params: &[(&str, &str)],
		params: Params,
	) -> Result<ResponseEnvelope> {
		let descriptor = operation.descriptor(path_params)?.with_query(params.into_query());

		self.dispatch(operation, descriptor).await
	}

	/// Sends an operation with a JSON body (POST or PUT).
	async fn submit(
		&self,
		operation: Operation,
		path_params: &[(&str, &str)],
		body: JsonValue,
	) -> Result<ResponseEnvelope> {
		let descriptor = operation.descriptor(path_params)?.with_body(body);

		self.dispatch(operation, descriptor).await
	}

	async fn dispatch(
		&self,
		operation: Operation,
		descriptor: RequestDescriptor,
	) -> Result<ResponseEnvelope> {
		if operation.is_paged() {
			paging::collect_pages(&self.dispatcher, &descriptor, self.page_size).await
		} else {
			self.dispatcher.send(&descriptor).await
		}
	}
}
