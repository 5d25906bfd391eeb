//! Customer search.

// self
use crate::{
	_prelude::*,
	client::Client,
	dispatch::ResponseEnvelope,
	endpoints::{Operation, Params},
};

/// Filters for [`Client::customers`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomersQuery {
	/// Location the customers belong to.
	pub location_id: Option<String>,
	/// Customer group.
	pub group_id: Option<String>,
	/// Exact email match.
	pub email: Option<String>,
	/// Last name match.
	pub last_name: Option<String>,
	/// Include deleted customers.
	pub deleted: bool,
}
impl CustomersQuery {
	pub(crate) fn params(&self) -> Params {
		Params::new()
			.text("locationId", self.location_id.as_deref())
			.text("groupId", self.group_id.as_deref())
			.text("email", self.email.as_deref())
			.text("lastname", self.last_name.as_deref())
			.flag("deleted", self.deleted)
	}
}

impl Client {
	/// Lists customers matching the filters, following pagination.
	pub async fn customers(&self, query: &CustomersQuery) -> Result<ResponseEnvelope> {
		self.query(Operation::Customers, &[], query.params()).await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn only_set_filters_are_sent() {
		let query = CustomersQuery {
			email: Some("jane@example.com".into()),
			last_name: Some(String::new()),
			..Default::default()
		};

		assert_eq!(query.params().into_query(), vec![(
			"email".to_owned(),
			"jane@example.com".to_owned()
		)]);
	}
}
