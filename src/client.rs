use log::{debug, info};
use crate::{ClientId, PollerError, DEFAULT_ADDRESS, DEFAULT_RPC_PORT};
use crate::protocol::{Request, Response};
use crate::transport::{tcp::TcpClientTransport, ClientTransport};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionConfig {
	/// Shown by the server next to the session, may be empty.
	pub name: String,
	pub address: String,
	pub rpc_port: u16,
}

impl Default for ConnectionConfig {
	fn default() -> Self {
		Self {
			name: String::new(),
			address: DEFAULT_ADDRESS.to_string(),
			rpc_port: DEFAULT_RPC_PORT,
		}
	}
}

impl ConnectionConfig {
	pub fn endpoint(&self) -> String {
		format!("{}:{}", self.address, self.rpc_port)
	}
}

/// One session with the remote service. Never reconnects.
pub struct Connection {
	transport: Box<dyn ClientTransport>,
	id: ClientId,
	endpoint: String,
}

impl Connection {
	pub fn connect(config: &ConnectionConfig) -> Result<Self, PollerError> {
		let endpoint = config.endpoint();
		info!("connecting to {endpoint}");

		let transport = TcpClientTransport::new((config.address.as_str(), config.rpc_port))
			.map_err(|e| PollerError::connection(endpoint.as_str(), e))?;
		if let Ok(peer) = transport.peer_addr() {
			debug!("{endpoint} resolved to {peer}");
		}
		Self::with_transport(Box::new(transport), &config.name, endpoint)
	}

	/// Runs the handshake over an already opened transport.
	pub fn with_transport(mut transport: Box<dyn ClientTransport>, name: &str, endpoint: impl Into<String>) -> Result<Self, PollerError> {
		let endpoint = endpoint.into();
		let handshake = Request::Connect { client_name: name.to_string() };

		transport.send(&handshake).map_err(|e| PollerError::connection(endpoint.as_str(), e))?;
		let id = match transport.receive().map_err(|e| PollerError::connection(endpoint.as_str(), e))? {
			Response::Connected(id) => id,
			Response::ConnectionRefused(reason) => return Err(PollerError::connection(endpoint, format!("connection refused: {reason}"))),
			other => return Err(PollerError::connection(endpoint, format!("unexpected handshake reply {other:?}"))),
		};

		info!("connected to {endpoint} as client {id}");
		Ok(Self {
			transport,
			id,
			endpoint,
		})
	}

	pub fn id(&self) -> ClientId {
		self.id
	}

	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	/// One blocking round trip. Server side errors become `RemoteQuery` errors.
	pub fn call(&mut self, request: Request) -> Result<Response, PollerError> {
		let procedure = request.procedure();
		debug!("calling {procedure}");

		self.transport.send(&request).map_err(|e| PollerError::remote_query(procedure, e))?;
		match self.transport.receive().map_err(|e| PollerError::remote_query(procedure, e))? {
			Response::Error(reason) => Err(PollerError::remote_query(procedure, reason)),
			response => Ok(response),
		}
	}
}
