use std::{process, sync::Arc, time::Duration};

use prospecta::{
    application::{
        case_studies::CaseStudyService,
        error::AppError,
        events::EventQueue,
        identity::IdentityProvider,
        insights::InsightService,
        notify::Notifier,
        projects::ProjectService,
        proposals::ProposalService,
        stores::{CaseStudiesStore, InsightsStore, ProjectsStore, ProposalsStore},
    },
    cache::{CacheConfig, CollectionCaches},
    config,
    infra::{
        error::InfraError,
        http::{self, ApiState},
        memory::MemoryTables,
        rest::RestTables,
        telemetry,
        tokens::TokenRegistry,
    },
};
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
    }
}

struct Stores {
    projects: Arc<dyn ProjectsStore>,
    case_studies: Arc<dyn CaseStudiesStore>,
    insights: Arc<dyn InsightsStore>,
    proposals: Arc<dyn ProposalsStore>,
}

fn build_stores(settings: &config::Settings) -> Result<Stores, AppError> {
    match settings.store.backend {
        config::StoreBackend::Memory => {
            info!("using in-memory store backend");
            let tables = Arc::new(MemoryTables::new());
            Ok(Stores {
                projects: tables.clone(),
                case_studies: tables.clone(),
                insights: tables.clone(),
                proposals: tables,
            })
        }
        config::StoreBackend::Rest => {
            let base = settings
                .store
                .base_url
                .as_ref()
                .map(|url| url.as_str().to_string())
                .unwrap_or_default();
            info!(base_url = %base, "using hosted table store backend");
            let tables = Arc::new(RestTables::from_settings(&settings.store)?);
            Ok(Stores {
                projects: tables.clone(),
                case_studies: tables.clone(),
                insights: tables.clone(),
                proposals: tables,
            })
        }
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let stores = build_stores(&settings)?;

    let caches = Arc::new(CollectionCaches::new(&CacheConfig {
        enabled: settings.cache.enabled,
    }));
    let events = Arc::new(EventQueue::new());
    let notifier = Arc::new(Notifier::new(
        events.clone(),
        settings.notifications.feed_capacity,
    ));

    let registry = TokenRegistry::from_settings(&settings.auth);
    if registry.is_empty() {
        warn!("no auth tokens configured; all writes requiring identity will be rejected");
    }
    let identity: Arc<dyn IdentityProvider> = Arc::new(registry);

    let state = ApiState {
        projects: Arc::new(ProjectService::new(
            stores.projects.clone(),
            stores.insights.clone(),
            stores.proposals.clone(),
            caches.clone(),
            events.clone(),
        )),
        case_studies: Arc::new(CaseStudyService::new(
            stores.case_studies,
            caches.clone(),
            events.clone(),
        )),
        insights: Arc::new(InsightService::new(
            stores.insights,
            stores.projects.clone(),
            events.clone(),
        )),
        proposals: Arc::new(ProposalService::new(
            stores.proposals,
            stores.projects,
            events.clone(),
        )),
        notifier: notifier.clone(),
        identity,
    };

    // Drain operation events into the notification feed on a fixed cadence.
    let consume_interval = settings.notifications.consume_interval;
    let consumer_handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(consume_interval);
        interval.tick().await; // Skip the first immediate tick
        loop {
            interval.tick().await;
            notifier.consume();
        }
    });

    let result = serve_http(&settings, state).await;

    consumer_handle.abort();
    let _ = consumer_handle.await;

    result
}

async fn serve_http(settings: &config::Settings, state: ApiState) -> Result<(), AppError> {
    let router = http::build_router(state);

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(addr = %settings.server.addr, "listening");

    let graceful = settings.server.graceful_shutdown;
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal(graceful))
        .await
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    Ok(())
}

async fn shutdown_signal(graceful: Duration) {
    if tokio::signal::ctrl_c().await.is_err() {
        error!("failed to install shutdown signal handler");
        return;
    }
    info!(timeout_secs = graceful.as_secs(), "shutting down");
}
