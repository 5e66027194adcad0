//! Poller behaviour against an in-process mock of the remote service.

use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use vessel_poller::{
	CelestialBody, Orbit, Poller, PollerError, PollerState, Position, ReferenceFrame, RemoteObject, SpaceCenter, Vessel,
};

const VESSEL: Vessel = Vessel(RemoteObject(10));
const ORBIT: Orbit = Orbit(RemoteObject(11));
const BODY: CelestialBody = CelestialBody(RemoteObject(12));
const FRAME: ReferenceFrame = ReferenceFrame(RemoteObject(13));

struct MockSpaceCenter {
	active_vessel: bool,
	has_orbit: bool,
	positions: Vec<Position>,
	/// 1-based index of the position query that fails
	fail_at: Option<usize>,
	position_queries: Arc<AtomicUsize>,
}

impl MockSpaceCenter {
	fn new(positions: Vec<Position>) -> Self {
		Self {
			active_vessel: true,
			has_orbit: true,
			positions,
			fail_at: None,
			position_queries: Arc::new(AtomicUsize::new(0)),
		}
	}

	fn failing_at(mut self, query: usize) -> Self {
		self.fail_at = Some(query);
		self
	}
}

impl SpaceCenter for MockSpaceCenter {
	fn active_vessel(&mut self) -> Result<Vessel, PollerError> {
		if self.active_vessel {
			Ok(VESSEL)
		}
		else {
			Err(PollerError::remote_query("get_ActiveVessel", "no active vessel"))
		}
	}

	fn vessel_orbit(&mut self, vessel: Vessel) -> Result<Orbit, PollerError> {
		assert_eq!(vessel, VESSEL);
		if self.has_orbit {
			Ok(ORBIT)
		}
		else {
			Err(PollerError::remote_query("Vessel_get_Orbit", "vessel has no orbit"))
		}
	}

	fn orbit_body(&mut self, orbit: Orbit) -> Result<CelestialBody, PollerError> {
		assert_eq!(orbit, ORBIT);
		Ok(BODY)
	}

	fn body_reference_frame(&mut self, body: CelestialBody) -> Result<ReferenceFrame, PollerError> {
		assert_eq!(body, BODY);
		Ok(FRAME)
	}

	fn vessel_position(&mut self, vessel: Vessel, frame: ReferenceFrame) -> Result<Position, PollerError> {
		assert_eq!((vessel, frame), (VESSEL, FRAME));
		let query = self.position_queries.fetch_add(1, Ordering::SeqCst) + 1;
		if Some(query) == self.fail_at {
			return Err(PollerError::remote_query("Vessel_Position", "lost signal"));
		}
		Ok(self.positions[(query - 1) % self.positions.len()])
	}
}

/// Sends every flushed line down a channel, fails once the receiver is gone.
struct LineSender {
	pending: Vec<u8>,
	sender: Sender<String>,
}

impl LineSender {
	fn new() -> (Self, Receiver<String>) {
		let (sender, receiver) = mpsc::channel();
		(Self { pending: Vec::new(), sender }, receiver)
	}
}

impl Write for LineSender {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.pending.extend_from_slice(buf);
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		let line = String::from_utf8(std::mem::take(&mut self.pending)).map_err(io::Error::other)?;
		self.sender.send(line).map_err(|_| io::Error::from(io::ErrorKind::BrokenPipe))
	}
}

fn p(x: f64, y: f64, z: f64) -> Position {
	Position::new(x, y, z)
}

#[test]
fn emits_one_line_per_position_in_order() {
	let mock = MockSpaceCenter::new(vec![p(1.0, 2.0, 3.0), p(4.0, 5.0, 6.0), p(7.5, -8.0, 9.25)]).failing_at(4);
	let mut out = Vec::new();

	let err = Poller::new(mock).run(&mut out).unwrap_err();

	assert!(err.is_remote_query());
	assert_eq!(String::from_utf8(out).unwrap(), "(1.0, 2.0, 3.0)\n(4.0, 5.0, 6.0)\n(7.5, -8.0, 9.25)\n");
}

#[test]
fn nth_failure_leaves_n_minus_one_lines() {
	for n in 1..=5 {
		let mock = MockSpaceCenter::new(vec![p(0.0, 0.0, 1.0)]).failing_at(n);
		let queries = mock.position_queries.clone();
		let mut out = Vec::new();

		let err = Poller::new(mock).run(&mut out).unwrap_err();

		assert!(err.is_remote_query());
		assert_eq!(String::from_utf8(out).unwrap().lines().count(), n - 1);
		assert_eq!(queries.load(Ordering::SeqCst), n);
	}
}

#[test]
fn no_position_queries_without_active_vessel() {
	let mut mock = MockSpaceCenter::new(vec![p(1.0, 1.0, 1.0)]);
	mock.active_vessel = false;
	let queries = mock.position_queries.clone();
	let mut out = Vec::new();

	let err = Poller::new(mock).run(&mut out).unwrap_err();

	assert!(err.is_remote_query());
	assert!(out.is_empty());
	assert_eq!(queries.load(Ordering::SeqCst), 0);
}

#[test]
fn missing_orbit_fails_frame_resolution() {
	let mut mock = MockSpaceCenter::new(vec![p(1.0, 1.0, 1.0)]);
	mock.has_orbit = false;
	let queries = mock.position_queries.clone();
	let mut poller = Poller::new(mock);

	let vessel = poller.resolve_active_vessel().unwrap();
	assert_eq!(poller.state(), PollerState::VesselResolved);
	assert!(poller.resolve_reference_frame(vessel).unwrap_err().is_remote_query());
	assert_eq!(poller.state(), PollerState::VesselResolved);
	assert_eq!(queries.load(Ordering::SeqCst), 0);
}

#[test]
fn walks_through_states() {
	let mock = MockSpaceCenter::new(vec![p(1.0, 2.0, 3.0)]).failing_at(2);
	let mut poller = Poller::new(mock);
	assert_eq!(poller.state(), PollerState::Connected);

	let vessel = poller.resolve_active_vessel().unwrap();
	assert_eq!(vessel, VESSEL);
	let frame = poller.resolve_reference_frame(vessel).unwrap();
	assert_eq!(frame, FRAME);
	assert_eq!(poller.state(), PollerState::FrameResolved);

	let mut out = Vec::new();
	assert!(poller.poll_loop(vessel, frame, &mut out).is_err());
	assert_eq!(poller.state(), PollerState::Polling);
	assert_eq!(out, b"(1.0, 2.0, 3.0)\n");
	assert_eq!(poller.service().position_queries.load(Ordering::SeqCst), 2);

	let mock = poller.into_inner();
	assert_eq!(mock.position_queries.load(Ordering::SeqCst), 2);
}

#[test]
fn keeps_polling_while_queries_succeed() {
	let mock = MockSpaceCenter::new(vec![p(1.0, 2.0, 3.0), p(4.0, 5.0, 6.0)]);
	let (sink, lines) = LineSender::new();
	let handle = thread::spawn(move || Poller::new(mock).run(sink));

	for i in 0..1000 {
		let line = lines.recv_timeout(Duration::from_secs(5)).unwrap();
		let expected = if i % 2 == 0 { "(1.0, 2.0, 3.0)\n" } else { "(4.0, 5.0, 6.0)\n" };
		assert_eq!(line, expected);
	}
	assert!(!handle.is_finished());

	// the only way out is an error, here from the closed sink
	drop(lines);
	let err = handle.join().unwrap().unwrap_err();
	assert!(matches!(err, PollerError::Output(_)));
}
