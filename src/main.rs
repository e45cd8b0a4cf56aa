use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use std::sync::Arc;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use yardpay::config::Config;
use yardpay::modules::gateway::OzowClient;
use yardpay::modules::notifications::{MySqlNotifier, Notifier};
use yardpay::modules::payments::{
    LeaseStore, MySqlLeaseStore, MySqlPaymentStore, PaymentService, PaymentStateMachine,
    PaymentStore,
};
use yardpay::modules::{health, payments};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yardpay=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    config.validate().expect("Configuration validation failed");

    tracing::info!("Starting Yardpay payment service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Gateway endpoint: {}", config.ozow.post_url);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Create database connection pool
    let db_pool = config
        .database
        .create_pool()
        .await
        .expect("Failed to create database pool");

    tracing::info!(
        "Database pool initialized (up to {} connections)",
        config.database.max_connections
    );

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");

    // Wire up the payment flow
    let gateway = Arc::new(
        OzowClient::new(config.ozow.clone(), config.app.base_url.clone())
            .expect("Failed to configure payment gateway"),
    );

    let payment_store: Arc<dyn PaymentStore> = Arc::new(MySqlPaymentStore::new(
        db_pool.clone(),
        config.database.op_timeout(),
    ));
    let lease_store: Arc<dyn LeaseStore> = Arc::new(MySqlLeaseStore::new(db_pool.clone()));
    let notifier: Arc<dyn Notifier> = Arc::new(MySqlNotifier::new(db_pool.clone()));

    let payment_service = Arc::new(PaymentService::new(payment_store.clone(), gateway.clone()));
    let state_machine = Arc::new(PaymentStateMachine::new(
        payment_store,
        lease_store,
        notifier,
    ));

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let workers = config.server.workers;

    let mut server = HttpServer::new(move || {
        let payment_service = payment_service.clone();
        let state_machine = state_machine.clone();
        let gateway = gateway.clone();

        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(web::Data::new(db_pool.clone()))
            .configure(|cfg| {
                payments::controllers::configure(cfg, payment_service, state_machine, gateway)
            })
            .configure(health::controllers::configure)
    })
    .bind(&bind_address)?;

    if let Some(workers) = workers {
        server = server.workers(workers);
    }

    tracing::info!("Server started at http://{}", bind_address);

    server.run().await
}
