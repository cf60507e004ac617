use library_lending::{
    adapters::memory::{
        book_repository::BookRepository as InMemoryBookRepository,
        loan_repository::LoanRepository as InMemoryLoanRepository,
        member_repository::MemberRepository as InMemoryMemberRepository,
    },
    api::{handlers::AppState, router::create_router},
    application::lending::ServiceDependencies,
    config::AppConfig,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "library_lending=debug,tower_http=debug,axum=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    tracing::info!(
        fine_policy = config.fine_policy.as_str(),
        max_active_loans = config.lending_policy.max_active_loans,
        loan_duration_days = config.lending_policy.loan_duration_days,
        "Lending policy loaded"
    );

    // Initialize adapters
    let service_deps = ServiceDependencies {
        book_repository: Arc::new(InMemoryBookRepository::new()),
        member_repository: Arc::new(InMemoryMemberRepository::new()),
        loan_repository: Arc::new(InMemoryLoanRepository::new()),
        fine_strategy: Arc::new(config.fine_policy.strategy()),
        policy: config.lending_policy,
    };

    // Create application state
    let app_state = Arc::new(AppState { service_deps });

    // Create router
    let app = create_router(app_state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
