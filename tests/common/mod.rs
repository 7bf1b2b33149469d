//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use scheduler_console::config::ConsoleConfig;
use scheduler_console::scheduler::{InMemoryScheduler, JobDetail, JobKey};
use scheduler_console::{HttpServer, Shutdown};
use tokio::net::TcpListener;

/// Scheduler with two groups and one running job.
pub fn seeded_scheduler() -> Arc<InMemoryScheduler> {
    let scheduler = InMemoryScheduler::new();
    for (group, name, description) in [
        ("reports", "daily", "Daily report"),
        ("reports", "weekly", "Weekly report"),
        ("DEFAULT", "cleanup", "Purge temp files"),
    ] {
        scheduler.add_job(JobDetail {
            key: JobKey::new(group, name),
            description: Some(description.to_string()),
            job_type: "ExampleJob".to_string(),
            interruptible: name == "cleanup",
        });
    }
    scheduler.start(&JobKey::new("reports", "daily"));
    Arc::new(scheduler)
}

/// Start the console on an ephemeral port.
pub async fn start_console(scheduler: Arc<InMemoryScheduler>) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(ConsoleConfig::default(), scheduler);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}

/// Client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
