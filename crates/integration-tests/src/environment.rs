//! Shared test environment: a `PostgreSQL` container and the POS service
//! running in-process on a random local port.
//!
//! One environment is started per test process and shared by every
//! scenario. Isolation between scenarios comes from [`TestEnvironment::reset`],
//! which deletes all POS entries through the service layer rather than
//! over HTTP.

use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use sqlx::PgPool;
use testcontainers::{
    ContainerAsync, GenericImage, ImageExt,
    core::{IntoContainerPort, WaitFor},
    runners::AsyncRunner,
};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use campus_coffee_api::services::PosService;
use campus_coffee_api::{AppState, db, router};

use crate::client::PosClient;
use crate::error::Result;

const POSTGRES_PORT: u16 = 5432;
const DEFAULT_POSTGRES_TAG: &str = "16";
const POSTGRES_USER: &str = "campus_coffee";
const POSTGRES_PASSWORD: &str = "campus_coffee";
const POSTGRES_DB: &str = "campus_coffee";
const CONNECT_ATTEMPTS: u32 = 30;
const CONNECT_DELAY: Duration = Duration::from_millis(500);

/// Install a test-friendly tracing subscriber once per process.
///
/// Honours `RUST_LOG`; later calls are no-ops.
pub fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "campus_coffee_acceptance=info,campus_coffee_api=warn".into());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_test_writer()
        .try_init();
}

/// Database container plus in-process POS service.
pub struct TestEnvironment {
    container: ContainerAsync<GenericImage>,
    pool: PgPool,
    pos: PosService,
    client: PosClient,
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    server: JoinHandle<std::io::Result<()>>,
}

impl fmt::Debug for TestEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestEnvironment")
            .field("container", &self.container.id())
            .field("addr", &self.addr)
            .finish_non_exhaustive()
    }
}

impl TestEnvironment {
    /// Start the database container, apply migrations and serve the POS API
    /// on `127.0.0.1` with an OS-assigned port.
    ///
    /// The image tag defaults to `16` and can be overridden with
    /// `POSTGRES_IMAGE_TAG`.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError` if the container, database or listener cannot
    /// be brought up.
    pub async fn start() -> Result<Self> {
        init_tracing();

        let tag = image_tag(std::env::var("POSTGRES_IMAGE_TAG").ok());
        tracing::info!(tag = %tag, "Starting PostgreSQL container");

        let container = postgres_image(&tag)
            .with_env_var("POSTGRES_USER", POSTGRES_USER)
            .with_env_var("POSTGRES_PASSWORD", POSTGRES_PASSWORD)
            .with_env_var("POSTGRES_DB", POSTGRES_DB)
            .with_startup_timeout(Duration::from_secs(60))
            .start()
            .await?;

        let host = container.get_host().await?;
        let port = container.get_host_port_ipv4(POSTGRES_PORT).await?;
        let database_url = SecretString::from(format!(
            "postgres://{POSTGRES_USER}:{POSTGRES_PASSWORD}@{host}:{port}/{POSTGRES_DB}"
        ));

        let pool = connect_with_retry(&database_url).await?;
        db::run_migrations(&pool).await?;

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = router(AppState::new(pool.clone()));

        let (shutdown, shutdown_rx) = oneshot::channel::<()>();
        let server = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        let client = PosClient::new(&format!("http://{addr}"))?;
        tracing::info!(%addr, "POS service started");

        Ok(Self {
            container,
            pos: PosService::new(pool.clone()),
            pool,
            client,
            addr,
            shutdown,
            server,
        })
    }

    /// HTTP client bound to the running service.
    #[must_use]
    pub const fn client(&self) -> &PosClient {
        &self.client
    }

    /// Delete every POS entry.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::Reset` if the delete fails.
    pub async fn reset(&self) -> Result<()> {
        let deleted = self.pos.clear().await?;
        tracing::debug!(deleted, "POS store reset");
        Ok(())
    }

    /// Stop the service, close the pool and remove the container.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::Container` if the container cannot be removed.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.client);
        let _ = self.shutdown.send(());
        match self.server.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!(error = %e, "POS service stopped with an error"),
            Err(e) => tracing::warn!(error = %e, "POS service task failed"),
        }

        self.pool.close().await;
        self.container.rm().await?;
        tracing::info!("Test environment shut down");
        Ok(())
    }

    /// Tear down an environment that was shared through an `Arc`.
    ///
    /// The last handle shuts down fully. While other handles remain, the
    /// store is reset and this handle dropped; the container is removed
    /// when the final handle goes away.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError` if the shutdown or reset fails.
    pub async fn teardown(env: Arc<Self>) -> Result<()> {
        match Arc::try_unwrap(env) {
            Ok(env) => env.shutdown().await,
            Err(shared) => {
                tracing::warn!(
                    handles = Arc::strong_count(&shared),
                    "Test environment still shared; resetting before release"
                );
                shared.reset().await
            }
        }
    }
}

fn image_tag(configured: Option<String>) -> String {
    configured
        .filter(|tag| !tag.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_POSTGRES_TAG.to_string())
}

fn postgres_image(tag: &str) -> GenericImage {
    // initdb runs a temporary server first; connect_with_retry covers the restart
    GenericImage::new("postgres", tag)
        .with_exposed_port(POSTGRES_PORT.tcp())
        .with_wait_for(WaitFor::message_on_stdout(
            "PostgreSQL init process complete; ready for start up.",
        ))
        .with_wait_for(WaitFor::message_on_stderr(
            "database system is ready to accept connections",
        ))
}

async fn connect_with_retry(database_url: &SecretString) -> Result<PgPool> {
    let mut attempt = 1;
    loop {
        match db::create_pool(database_url).await {
            Ok(pool) => return Ok(pool),
            Err(e) if attempt < CONNECT_ATTEMPTS => {
                tracing::debug!(attempt, error = %e, "Database not ready yet");
                attempt += 1;
                tokio::time::sleep(CONNECT_DELAY).await;
            }
            Err(e) => return Err(e.into()),
        }
    }
}
