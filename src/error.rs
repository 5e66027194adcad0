use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PollerError {
	/// The session could not be established, or the server refused it.
	#[error("failed to connect to {address}: {reason}")]
	Connection { address: String, reason: String },
	/// A remote call failed or returned no data.
	#[error("remote call {procedure} failed: {reason}")]
	RemoteQuery { procedure: &'static str, reason: String },
	#[error("failed to write output: {0}")]
	Output(#[from] io::Error),
}

impl PollerError {
	pub fn connection(address: impl Into<String>, reason: impl ToString) -> Self {
		Self::Connection {
			address: address.into(),
			reason: reason.to_string(),
		}
	}

	pub fn remote_query(procedure: &'static str, reason: impl ToString) -> Self {
		Self::RemoteQuery {
			procedure,
			reason: reason.to_string(),
		}
	}

	pub fn is_connection(&self) -> bool {
		matches!(self, Self::Connection { .. })
	}

	pub fn is_remote_query(&self) -> bool {
		matches!(self, Self::RemoteQuery { .. })
	}
}
