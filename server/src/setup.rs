use tokio::signal;
use tracing::info;

pub async fn shutdown_signal() {
	let ctrl_c = async {
		if let Err(err) = signal::ctrl_c().await {
			tracing::error!("failed to install Ctrl+C handler - {:?}", err);
		}
	};

	#[cfg(unix)]
		let terminate = async {
		match signal::unix::signal(signal::unix::SignalKind::terminate()) {
			Ok(mut stream) => {
				stream.recv().await;
			}
			Err(err) => {
				tracing::error!("failed to install signal handler - {:?}", err);
				std::future::pending::<()>().await;
			}
		}
	};

	#[cfg(not(unix))]
		let terminate = std::future::pending::<()>();

	tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

	info!("signal received, starting graceful shutdown");
}
