use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use log::{debug, error, info, warn};
use crate::{CelestialBody, ClientId, Orbit, Position, ReferenceFrame, RemoteObject, Vessel};
use crate::protocol::{Request, Response};
use crate::transport::{read_msg, write_msg};

pub const VESSEL: Vessel = Vessel(RemoteObject(1));
pub const ORBIT: Orbit = Orbit(RemoteObject(2));
pub const BODY: CelestialBody = CelestialBody(RemoteObject(3));
pub const FRAME: ReferenceFrame = ReferenceFrame(RemoteObject(4));

/// What happens once every scripted position was handed out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exhausted {
	/// start over from the first position
	Repeat,
	/// answer every further position query with an error
	Fail,
}

/// The answers a `ScriptedServer` gives. Nothing is simulated, positions are
/// replayed in order for every client.
#[derive(Clone, Debug)]
pub struct Script {
	pub active_vessel: bool,
	pub has_orbit: bool,
	pub positions: Vec<Position>,
	pub exhausted: Exhausted,
}

impl Script {
	pub fn new(positions: Vec<Position>) -> Self {
		Self {
			active_vessel: true,
			has_orbit: true,
			positions,
			exhausted: Exhausted::Fail,
		}
	}

	pub fn repeating(mut self) -> Self {
		self.exhausted = Exhausted::Repeat;
		self
	}

	pub fn without_active_vessel(mut self) -> Self {
		self.active_vessel = false;
		self
	}

	pub fn without_orbit(mut self) -> Self {
		self.has_orbit = false;
		self
	}

	fn position(&self, index: usize) -> Response {
		if let Some(position) = self.positions.get(index) {
			return Response::Vector3(*position);
		}
		match self.exhausted {
			Exhausted::Repeat if !self.positions.is_empty() => Response::Vector3(self.positions[index % self.positions.len()]),
			_ => Response::Error("position script exhausted".to_string()),
		}
	}

	fn answer(&self, request: &Request, position_index: &mut usize) -> Response {
		match request {
			Request::Connect { .. } => Response::Error("already connected".to_string()),
			Request::GetActiveVessel if self.active_vessel => Response::Object(VESSEL.0),
			Request::GetActiveVessel => Response::Error("no active vessel".to_string()),
			Request::VesselGetOrbit(vessel) if *vessel == VESSEL && self.has_orbit => Response::Object(ORBIT.0),
			Request::VesselGetOrbit(vessel) if *vessel == VESSEL => Response::Error("vessel has no orbit".to_string()),
			Request::OrbitGetBody(orbit) if *orbit == ORBIT => Response::Object(BODY.0),
			Request::BodyGetReferenceFrame(body) if *body == BODY => Response::Object(FRAME.0),
			Request::VesselPosition(vessel, frame) if *vessel == VESSEL && *frame == FRAME => {
				let response = self.position(*position_index);
				*position_index += 1;
				response
			},
			other => Response::Error(format!("unknown object in {}", other.procedure())),
		}
	}
}

impl Default for Script {
	fn default() -> Self {
		Self::new(Vec::new())
	}
}

struct SharedData {
	script: Script,
	next_id: ClientId,
	refusal: Option<String>,
	position_queries: usize,
}

impl SharedData {
	fn new(script: Script) -> Self {
		Self {
			script,
			next_id: 1,
			refusal: None,
			position_queries: 0,
		}
	}

	fn accept_client(&mut self) -> Response {
		if let Some(reason) = &self.refusal {
			return Response::ConnectionRefused(reason.clone());
		}

		let client_id = self.next_id;
		self.next_id += 1;
		Response::Connected(client_id)
	}
}

/// TCP test double for the remote service, answering from a `Script`.
pub struct ScriptedServer {
	local_addr: SocketAddr,
	shared_data: Arc<Mutex<SharedData>>,
}

impl ScriptedServer {
	pub fn bind<A>(addr: A, script: Script) -> io::Result<Self>
		where A: ToSocketAddrs
	{
		let listener = TcpListener::bind(addr)?;
		let local_addr = listener.local_addr()?;
		let shared_data = Arc::new(Mutex::new(SharedData::new(script)));

		let shared_data_clone = shared_data.clone();
		std::thread::Builder::new()
			.name("Scripted Server Listen Thread".to_string())
			.spawn(move || Self::listen_thread(listener, shared_data_clone))?;

		info!("scripted server listening on {local_addr}");
		Ok(Self {
			local_addr,
			shared_data,
		})
	}

	/// Binds an ephemeral port on localhost.
	pub fn bind_localhost(script: Script) -> io::Result<Self> {
		Self::bind(("127.0.0.1", 0), script)
	}

	pub fn local_addr(&self) -> SocketAddr {
		self.local_addr
	}

	/// Every handshake from now on is refused with `reason`.
	pub fn refuse_connections(&self, reason: impl Into<String>) {
		lock(&self.shared_data).refusal = Some(reason.into());
	}

	/// Position queries answered so far, across all clients.
	pub fn position_queries(&self) -> usize {
		lock(&self.shared_data).position_queries
	}

	fn listen_thread(listener: TcpListener, shared_data: Arc<Mutex<SharedData>>) {
		for stream in listener.incoming() {
			match stream {
				Ok(stream) => {
					let shared_data_clone = shared_data.clone();
					let spawned = std::thread::Builder::new()
						.name("Scripted Client Thread".to_string())
						.spawn(move || Self::handle_client_thread(stream, shared_data_clone));
					if let Err(e) = spawned {
						error!("failed to spawn client thread: {e}");
					}
				},
				Err(e) => warn!("error accepting connection: {e}"),
			}
		}
	}

	fn handle_client_thread(mut stream: TcpStream, shared_data: Arc<Mutex<SharedData>>) {
		let address = stream.peer_addr().map_or_else(|_| "<unknown>".to_string(), |a| a.to_string());

		if let Err(e) = Self::serve_client(&mut stream, &shared_data) {
			match e.kind() {
				io::ErrorKind::UnexpectedEof | io::ErrorKind::ConnectionAborted | io::ErrorKind::ConnectionReset =>
					debug!("client {address} disconnected"),
				_ => warn!("failed to serve client {address}: {e}"),
			}
		}
	}

	fn serve_client(stream: &mut TcpStream, shared_data: &Mutex<SharedData>) -> io::Result<()> {
		let handshake = match read_msg::<_, Request>(stream)? {
			Request::Connect { client_name } => {
				let response = lock(shared_data).accept_client();
				debug!("handshake from {client_name:?}: {response:?}");
				response
			},
			other => Response::Error(format!("expected a handshake, got {}", other.procedure())),
		};
		let accepted = matches!(handshake, Response::Connected(_));
		write_msg(stream, &handshake)?;
		if !accepted {
			return Ok(());
		}

		let mut position_index = 0;
		loop {
			let request: Request = read_msg(stream)?;
			let response = {
				let mut shared_data = lock(shared_data);
				if matches!(request, Request::VesselPosition(..)) {
					shared_data.position_queries += 1;
				}
				shared_data.script.answer(&request, &mut position_index)
			};
			write_msg(stream, &response)?;
		}
	}
}

fn lock(shared_data: &Mutex<SharedData>) -> MutexGuard<'_, SharedData> {
	shared_data.lock().unwrap_or_else(PoisonError::into_inner)
}
