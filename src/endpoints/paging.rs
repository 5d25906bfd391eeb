//! `limit`/`offset` pagination for list endpoints.
//!
//! List responses look like `{"count", "total", "hasMore", "data": [...]}`. Pages are requested
//! until `hasMore` is false; the `data` arrays are concatenated into the last page's envelope and
//! `count` is replaced by `total`. A `hasMore` page with no items ends the walk so a misbehaving
//! server cannot loop forever.

// self
use crate::{
	_prelude::*,
	dispatch::{RequestDescriptor, RequestDispatcher, ResponseEnvelope},
};

/// Fetches every page of a list operation and merges the results.
pub async fn collect_pages(
	dispatcher: &RequestDispatcher,
	descriptor: &RequestDescriptor,
	page_size: u32,
) -> Result<ResponseEnvelope> {
	let mut offset = 0_u64;
	let mut items: Option<Vec<JsonValue>> = None;

	loop {
		let page_descriptor = descriptor
			.clone()
			.with_query_pair("limit", page_size)
			.with_query_pair("offset", offset);
		let mut page = dispatcher.send(&page_descriptor).await?;
		let has_more = page.get("hasMore").and_then(JsonValue::as_bool).unwrap_or(false);
		let page_items = match page.get_mut("data") {
			Some(JsonValue::Array(data)) => Some(std::mem::take(data)),
			_ => None,
		};
		let exhausted = page_items.as_ref().is_none_or(Vec::is_empty);

		if let Some(new) = page_items {
			items.get_or_insert_with(Vec::new).extend(new);
		}

		if !has_more || exhausted {
			return Ok(merge(page, items));
		}

		offset += u64::from(page_size);
	}
}

fn merge(mut page: ResponseEnvelope, items: Option<Vec<JsonValue>>) -> ResponseEnvelope {
	if let (Some(items), JsonValue::Object(envelope)) = (items, &mut page) {
		if let Some(total) = envelope.get("total").cloned() {
			envelope.insert("count".into(), total);
		}

		envelope.insert("data".into(), JsonValue::Array(items));
	}

	page
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn merge_replaces_data_and_count() {
		let page = json!({ "count": 1, "total": 3, "hasMore": false, "data": [] });
		let merged = merge(page, Some(vec![json!(1), json!(2), json!(3)]));

		assert_eq!(merged, json!({ "count": 3, "total": 3, "hasMore": false, "data": [1, 2, 3] }));
	}

	#[test]
	fn merge_leaves_non_list_envelopes_untouched() {
		let page = json!({ "id": "abc" });

		assert_eq!(merge(page.clone(), None), page);
	}
}
