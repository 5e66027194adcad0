use std::fmt;
use serde::{Deserialize, Serialize};

pub mod client;
pub use client::{Connection, ConnectionConfig};
pub mod error;
pub use error::PollerError;
pub mod poller;
pub use poller::{Poller, PollerState};
pub mod protocol;
pub mod server;
pub use server::{Exhausted, Script, ScriptedServer};
pub mod space_center;
pub use space_center::SpaceCenter;
pub mod transport;

pub const DEFAULT_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_RPC_PORT: u16 = 50000;

pub type ClientId = u64;

/// Server side object id. `0` is the null object.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RemoteObject(pub u64);

impl RemoteObject {
	pub const NULL: Self = Self(0);

	pub fn is_null(&self) -> bool {
		self.0 == 0
	}
}

macro_rules! remote_handle {
	($($(#[$meta:meta])* $name:ident),* $(,)?) => {
		$(
			$(#[$meta])*
			#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
			pub struct $name(pub RemoteObject);

			impl $name {
				pub fn id(&self) -> u64 {
					(self.0).0
				}
			}
		)*
	};
}

remote_handle! {
	/// The vehicle currently selected in the simulation.
	Vessel,
	Orbit,
	CelestialBody,
	/// Coordinate system positions are expressed in.
	ReferenceFrame,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Position {
	pub x: f64,
	pub y: f64,
	pub z: f64,
}

impl Position {
	pub fn new(x: f64, y: f64, z: f64) -> Self {
		Self {
			x,
			y,
			z,
		}
	}
}

impl From<(f64, f64, f64)> for Position {
	fn from((x, y, z): (f64, f64, f64)) -> Self {
		Self::new(x, y, z)
	}
}

/// `(x, y, z)`, each component in shortest round-trip form (`1.0`, never `1`).
impl fmt::Display for Position {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({:?}, {:?}, {:?})", self.x, self.y, self.z)
	}
}
