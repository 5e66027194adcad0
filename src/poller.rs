use std::convert::Infallible;
use std::fmt;
use std::io::Write;
use log::{debug, error, info};
use crate::{Connection, ConnectionConfig, PollerError, ReferenceFrame, SpaceCenter, Vessel};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollerState {
	Start,
	Connected,
	VesselResolved,
	FrameResolved,
	Polling,
}

impl fmt::Display for PollerState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(self, f)
	}
}

/// Resolves the active vessel and its body's frame once, then prints the
/// vessel position forever.
pub struct Poller<S: SpaceCenter> {
	service: S,
	state: PollerState,
}

impl Poller<Connection> {
	pub fn connect(config: &ConnectionConfig) -> Result<Self, PollerError> {
		debug!("poller state: {}", PollerState::Start);
		match Connection::connect(config) {
			Ok(connection) => Ok(Self::new(connection)),
			Err(e) => {
				error!("poller stopped in state {}: {e}", PollerState::Start);
				Err(e)
			},
		}
	}
}

impl<S: SpaceCenter> Poller<S> {
	/// `service` must already be connected.
	pub fn new(service: S) -> Self {
		let poller = Self {
			service,
			state: PollerState::Connected,
		};
		debug!("poller state: {}", poller.state);
		poller
	}

	pub fn state(&self) -> PollerState {
		self.state
	}

	pub fn service(&self) -> &S {
		&self.service
	}

	pub fn into_inner(self) -> S {
		self.service
	}

	fn transition(&mut self, state: PollerState) {
		debug!("poller state: {} -> {}", self.state, state);
		self.state = state;
	}

	pub fn resolve_active_vessel(&mut self) -> Result<Vessel, PollerError> {
		let vessel = self.service.active_vessel()?;
		info!("active vessel is {}", vessel.id());
		self.transition(PollerState::VesselResolved);
		Ok(vessel)
	}

	/// Frame of the body the vessel is currently orbiting.
	pub fn resolve_reference_frame(&mut self, vessel: Vessel) -> Result<ReferenceFrame, PollerError> {
		let orbit = self.service.vessel_orbit(vessel)?;
		let body = self.service.orbit_body(orbit)?;
		let frame = self.service.body_reference_frame(body)?;
		info!("reference frame is {} (body {})", frame.id(), body.id());
		self.transition(PollerState::FrameResolved);
		Ok(frame)
	}

	/// Only returns on error. Neither handle is checked again once polling starts.
	pub fn poll_loop<W: Write>(&mut self, vessel: Vessel, frame: ReferenceFrame, mut out: W) -> Result<Infallible, PollerError> {
		self.transition(PollerState::Polling);
		loop {
			let position = self.service.vessel_position(vessel, frame)?;
			writeln!(out, "{position}")?;
			out.flush()?;
		}
	}

	pub fn run<W: Write>(mut self, out: W) -> Result<Infallible, PollerError> {
		let result = self.resolve_and_poll(out);
		if let Err(e) = &result {
			error!("poller stopped in state {}: {e}", self.state);
		}
		result
	}

	fn resolve_and_poll<W: Write>(&mut self, out: W) -> Result<Infallible, PollerError> {
		let vessel = self.resolve_active_vessel()?;
		let frame = self.resolve_reference_frame(vessel)?;
		self.poll_loop(vessel, frame, out)
	}
}
