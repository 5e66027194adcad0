use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::io;
use crate::protocol::{Request, Response};
use crate::transport::{read_msg, write_msg, ClientTransport};

pub struct TcpClientTransport {
	stream: TcpStream,
}

impl TcpClientTransport {
	pub fn new<A: ToSocketAddrs>(server_address: A) -> io::Result<Self> {
		let stream = TcpStream::connect(server_address)?;
		// every request waits on its reply, don't let Nagle hold it back
		stream.set_nodelay(true)?;

		Ok(Self {
			stream,
		})
	}

	pub fn peer_addr(&self) -> io::Result<SocketAddr> {
		self.stream.peer_addr()
	}
}

impl ClientTransport for TcpClientTransport {
	fn send(&mut self, request: &Request) -> io::Result<()> {
		write_msg(&mut self.stream, request)
	}

	fn receive(&mut self) -> io::Result<Response> {
		read_msg(&mut self.stream)
	}
}
