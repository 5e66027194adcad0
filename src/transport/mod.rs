use std::io::{self, Read, Write};
use bincode::Options;
use serde::{de::DeserializeOwned, Serialize};
use crate::protocol::{Request, Response};

/// Upper bound for a single encoded message, in both directions.
pub const MAX_MSG_SIZE: u64 = 65507;

pub mod simulator;
pub mod tcp;

/// A blocking, strictly request/response channel to the remote service.
pub trait ClientTransport {
	fn send(&mut self, request: &Request) -> io::Result<()>;
	/// Blocks until the reply to the last request arrives.
	fn receive(&mut self) -> io::Result<Response>;
}

impl<T: ClientTransport + ?Sized> ClientTransport for Box<T> {
	fn send(&mut self, request: &Request) -> io::Result<()> {
		(**self).send(request)
	}

	fn receive(&mut self) -> io::Result<Response> {
		(**self).receive()
	}
}

fn wire_options() -> impl Options {
	bincode::DefaultOptions::new()
		.with_fixint_encoding()
		.with_limit(MAX_MSG_SIZE)
}

fn into_io_error(e: bincode::Error) -> io::Error {
	match *e {
		bincode::ErrorKind::Io(e) => e,
		other => io::Error::new(io::ErrorKind::InvalidData, other),
	}
}

/// Writes one message. Messages carry their own length so no extra framing is needed.
pub fn write_msg<W: Write, T: Serialize>(writer: &mut W, msg: &T) -> io::Result<()> {
	let buffer = wire_options().serialize(msg).map_err(into_io_error)?;
	writer.write_all(&buffer)?;
	writer.flush()
}

pub fn read_msg<R: Read, T: DeserializeOwned>(reader: &mut R) -> io::Result<T> {
	wire_options().deserialize_from(reader).map_err(into_io_error)
}
