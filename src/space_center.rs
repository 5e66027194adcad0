use crate::{CelestialBody, Connection, Orbit, PollerError, Position, ReferenceFrame, RemoteObject, Vessel};
use crate::protocol::{Request, Response};

/// The remote calls the poller needs. Every handle returned is a server side
/// reference and stays owned by the server.
pub trait SpaceCenter {
	fn active_vessel(&mut self) -> Result<Vessel, PollerError>;
	fn vessel_orbit(&mut self, vessel: Vessel) -> Result<Orbit, PollerError>;
	fn orbit_body(&mut self, orbit: Orbit) -> Result<CelestialBody, PollerError>;
	fn body_reference_frame(&mut self, body: CelestialBody) -> Result<ReferenceFrame, PollerError>;
	fn vessel_position(&mut self, vessel: Vessel, frame: ReferenceFrame) -> Result<Position, PollerError>;
}

impl Connection {
	fn call_object(&mut self, request: Request) -> Result<RemoteObject, PollerError> {
		let procedure = request.procedure();
		match self.call(request)? {
			Response::Object(object) if object.is_null() => Err(PollerError::remote_query(procedure, "returned null")),
			Response::Object(object) => Ok(object),
			other => Err(PollerError::remote_query(procedure, format!("expected an object, got {other:?}"))),
		}
	}
}

impl SpaceCenter for Connection {
	fn active_vessel(&mut self) -> Result<Vessel, PollerError> {
		self.call_object(Request::GetActiveVessel).map(Vessel)
	}

	fn vessel_orbit(&mut self, vessel: Vessel) -> Result<Orbit, PollerError> {
		self.call_object(Request::VesselGetOrbit(vessel)).map(Orbit)
	}

	fn orbit_body(&mut self, orbit: Orbit) -> Result<CelestialBody, PollerError> {
		self.call_object(Request::OrbitGetBody(orbit)).map(CelestialBody)
	}

	fn body_reference_frame(&mut self, body: CelestialBody) -> Result<ReferenceFrame, PollerError> {
		self.call_object(Request::BodyGetReferenceFrame(body)).map(ReferenceFrame)
	}

	fn vessel_position(&mut self, vessel: Vessel, frame: ReferenceFrame) -> Result<Position, PollerError> {
		let request = Request::VesselPosition(vessel, frame);
		let procedure = request.procedure();
		match self.call(request)? {
			Response::Vector3(position) => Ok(position),
			other => Err(PollerError::remote_query(procedure, format!("expected a vector, got {other:?}"))),
		}
	}
}
