//! Listener setup.
//!
//! Every worker binds its own listener on the same port. `SO_REUSEPORT`
//! puts all of them in one kernel-level group, and the kernel distributes
//! incoming connections across the group. No userspace load balancing.

use std::net::SocketAddr;

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

const LISTEN_BACKLOG: i32 = 1024;

/// Bind a nonblocking TCP listener with `SO_REUSEADDR` and, on unix,
/// `SO_REUSEPORT` so sibling workers can bind the same address.
pub fn bind_reuseport(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(LISTEN_BACKLOG)?;
    TcpListener::from_std(socket.into())
}
