use serde::{Deserialize, Serialize};
use crate::{CelestialBody, ClientId, Orbit, Position, ReferenceFrame, RemoteObject, Vessel};

/// These are actually sent over the network
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Request {
	/// first message of every session
	Connect { client_name: String },
	GetActiveVessel,
	VesselGetOrbit(Vessel),
	OrbitGetBody(Orbit),
	BodyGetReferenceFrame(CelestialBody),
	/// (vessel, frame the position is expressed in)
	VesselPosition(Vessel, ReferenceFrame),
}

impl Request {
	/// Name of the remote procedure, used in errors and logs.
	pub fn procedure(&self) -> &'static str {
		match self {
			Self::Connect { .. } => "KRPC.Connect",
			Self::GetActiveVessel => "SpaceCenter.get_ActiveVessel",
			Self::VesselGetOrbit(_) => "SpaceCenter.Vessel_get_Orbit",
			Self::OrbitGetBody(_) => "SpaceCenter.Orbit_get_Body",
			Self::BodyGetReferenceFrame(_) => "SpaceCenter.CelestialBody_get_ReferenceFrame",
			Self::VesselPosition(_, _) => "SpaceCenter.Vessel_Position",
		}
	}
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Response {
	Connected(ClientId),
	ConnectionRefused(String),
	Object(RemoteObject),
	Vector3(Position),
	Error(String),
}
