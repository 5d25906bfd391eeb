//! Credential material that never reaches logs in clear text.

// self
use crate::_prelude::*;

const REDACTED: &str = "<redacted>";

/// Client secret or access token. `Debug` and `Display` print `<redacted>` instead of the
/// value; serde sees the plain string so credentials can be loaded from config files.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);
impl Secret {
	/// Wraps `value`.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Clear-text value, for the token form body and the `Authorization` header only.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// `true` for an empty or whitespace-only value.
	pub fn is_blank(&self) -> bool {
		self.0.trim().is_empty()
	}
}
impl From<String> for Secret {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl Debug for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Secret({REDACTED})")
	}
}
impl Display for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(REDACTED)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn formatting_never_leaks_the_value() {
		let secret = Secret::new("super-secret");

		assert_eq!(format!("{secret:?}"), "Secret(<redacted>)");
		assert_eq!(secret.to_string(), "<redacted>");
		assert!(!format!("{:?}", Some(&secret)).contains("super-secret"));
	}

	#[test]
	fn serde_round_trips_the_plain_string() {
		let secret: Secret =
			serde_json::from_str("\"abc\"").expect("Secret should deserialize from a string.");

		assert_eq!(secret.expose(), "abc");
		assert_eq!(serde_json::to_string(&secret).expect("Secret should serialize."), "\"abc\"");
		assert!(Secret::from(String::from(" \t")).is_blank());
	}
}
