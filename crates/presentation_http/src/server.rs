//! Server lifecycle
//!
//! Requests here are held open on purpose, so graceful shutdown gets a
//! deadline: once the shutdown signal fires, in-flight requests have
//! `drain_timeout` to finish before the server stops waiting for them.

use std::{future::IntoFuture, time::Duration};

use axum::Router;
use tokio::{net::TcpListener, sync::oneshot};
use tracing::{info, warn};

/// Serve `app` until `signal` completes, then drain for at most
/// `drain_timeout`
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    drain_timeout: Duration,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (signalled_tx, signalled_rx) = oneshot::channel();

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            signal.await;
            let _ = signalled_tx.send(());
        })
        .into_future();

    let deadline = async move {
        if signalled_rx.await.is_ok() {
            info!("⏳ Waiting up to {:?} for connections to close...", drain_timeout);
            tokio::time::sleep(drain_timeout).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = server => result,
        () = deadline => {
            warn!(?drain_timeout, "Drain timeout elapsed, dropping open connections");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::routing::get;
    use tokio::{io::AsyncWriteExt, net::TcpStream, sync::Notify};

    use super::*;

    /// Router whose only route never answers
    fn hanging_app(entered: Arc<Notify>) -> Router {
        Router::new().route(
            "/hang",
            get(move || {
                let entered = Arc::clone(&entered);
                async move {
                    entered.notify_one();
                    tokio::time::sleep(Duration::from_secs(3_600)).await;
                    "done"
                }
            }),
        )
    }

    #[tokio::test]
    async fn drain_timeout_bounds_shutdown() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let entered = Arc::new(Notify::new());
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        let server = tokio::spawn(serve(
            listener,
            hanging_app(Arc::clone(&entered)),
            async move {
                let _ = stop_rx.await;
            },
            Duration::from_millis(100),
        ));

        let mut client = TcpStream::connect(addr).await.unwrap();
        client
            .write_all(b"GET /hang HTTP/1.1\r\nHost: localhost\r\n\r\n")
            .await
            .unwrap();
        entered.notified().await;

        stop_tx.send(()).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .expect("server kept waiting on the open request");
        assert!(result.unwrap().is_ok());
    }

    #[tokio::test]
    async fn idle_server_stops_on_signal() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let entered = Arc::new(Notify::new());

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            serve(listener, hanging_app(entered), async {}, Duration::from_secs(60)),
        )
        .await
        .expect("idle server did not stop");
        assert!(result.is_ok());
    }
}
