// Listener module
// Creates the TCP listener the accept loop runs on

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

/// Create a non-blocking `TcpListener` with `SO_REUSEADDR` and
/// `SO_REUSEPORT` enabled.
///
/// `SO_REUSEADDR` allows rebinding the port while it is still in
/// TIME_WAIT after a previous run; `SO_REUSEPORT` lets a replacement
/// process bind before the old one has fully exited.
pub fn create_listener(addr: std::net::SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_port(true)?;
    socket.set_reuse_address(true)?;

    // Non-blocking mode is required for tokio
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_same_port_can_be_bound_twice() {
        let first = create_listener("127.0.0.1:0".parse().expect("addr")).expect("bind");
        let addr = first.local_addr().expect("local addr");

        // SO_REUSEPORT allows a second live bind on the same port
        let second = create_listener(addr).expect("rebind with SO_REUSEPORT");
        assert_eq!(second.local_addr().expect("local addr").port(), addr.port());
    }
}
