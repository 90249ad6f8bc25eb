//! OS-ephemeral port reservation.

use std::time::Duration;

use tokio::net::TcpListener;

use crate::LaunchError;

/// Asks the OS for a free TCP port, then releases it for the worker.
///
/// Binding port 0 and reading back the assignment avoids hard-coded port
/// ranges colliding across concurrently starting rooms. The bind is bounded
/// by `timeout`: if the OS cannot supply a port promptly the launch fails
/// rather than wedging the caller.
pub async fn reserve_port(timeout: Duration) -> Result<u16, LaunchError> {
    let listener = tokio::time::timeout(timeout, TcpListener::bind(("0.0.0.0", 0)))
        .await
        .map_err(|_| LaunchError::PortTimeout)?
        .map_err(LaunchError::PortUnavailable)?;

    let port = listener
        .local_addr()
        .map_err(LaunchError::PortUnavailable)?
        .port();

    // Dropping the listener releases the binding; the worker claims it next.
    drop(listener);
    Ok(port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reserve_port_returns_usable_port() {
        let port = reserve_port(Duration::from_secs(2)).await.unwrap();
        assert!(port > 0);

        // The reservation is released: the port can be bound again.
        let rebound = TcpListener::bind(("0.0.0.0", port)).await;
        assert!(rebound.is_ok());
    }

    #[tokio::test]
    async fn test_reserve_port_twice_both_succeed() {
        let a = reserve_port(Duration::from_secs(2)).await.unwrap();
        let b = reserve_port(Duration::from_secs(2)).await.unwrap();
        assert!(a > 0 && b > 0);
    }
}
