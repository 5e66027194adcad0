use std::io;
use std::time::Duration;
use crate::protocol::{Request, Response};
use crate::transport::ClientTransport;

/// Delays every request by `latency` plus up to `jitter`, to mimic a slow link.
pub struct LatencySimulatorTransport<T: ClientTransport> {
	transport: T,
	latency: Duration,
	jitter: Duration,
}

impl<T: ClientTransport> LatencySimulatorTransport<T> {
	pub fn new(latency: Duration, jitter: Duration, transport: T) -> Self {
		Self {
			transport,
			latency,
			jitter,
		}
	}

	fn next_delay(&self) -> Duration {
		let zero_to_one = rand::random::<f64>();
		self.latency + self.jitter.mul_f64(zero_to_one)
	}

	pub fn into_inner(self) -> T {
		self.transport
	}
}

impl<T: ClientTransport> ClientTransport for LatencySimulatorTransport<T> {
	fn send(&mut self, request: &Request) -> io::Result<()> {
		std::thread::sleep(self.next_delay());
		self.transport.send(request)
	}

	fn receive(&mut self) -> io::Result<Response> {
		self.transport.receive()
	}
}
