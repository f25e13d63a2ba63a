use anyhow::Context as _;
use staybook::Config;
use std::sync::Arc;
use tokio::sync::OnceCell;

static SHARED: OnceCell<Arc<SharedTestResources>> = OnceCell::const_new();

pub struct SharedTestResources {
    pub base_config: Config,
}

pub async fn shared() -> anyhow::Result<Arc<SharedTestResources>> {
    SHARED
        .get_or_try_init(|| async {
            init_tracing();

            let mut config = Config::load().context("load Config for tests")?;
            if let Some(url) = &config.database.test_database_url {
                config.database.url = url.clone();
            }

            // Deterministic auth regardless of the developer's environment
            config.auth.jwt_secret = "staybook-test-secret".to_string();
            config.auth.secure_cookie = false;
            config.auth.cookie_name = "auth_token".to_string();

            config.database.pool_min_size = 0;
            config.database.pool_max_size = 5;
            config.database.pool_timeout_seconds = 30;

            Ok(Arc::new(SharedTestResources {
                base_config: config,
            }))
        })
        .await
        .cloned()
}

fn init_tracing() {
    use std::sync::OnceLock;
    use tracing_subscriber::prelude::*;
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "staybook=info,sqlx=warn".into()),
            )
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .try_init();
    });
}
