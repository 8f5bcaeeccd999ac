use gigboard::{
    Argon2PasswordHasher, Email, GigboardService, JwtTokenCodec, NotificationSender,
    PostgresAccountStore, PostgresAuditLog, PostgresJobStore, PostmarkEmailClient, Settings,
    configure_postgresql, init_tracing,
};
use reqwest::Client as HttpClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");

    // Pick up a local .env before the settings read the environment.
    dotenvy::dotenv().ok();
    let settings = Settings::load()?;

    let pg_pool = configure_postgresql(&settings).await;
    let accounts = PostgresAccountStore::new(pg_pool.clone());
    let jobs = PostgresJobStore::new(pg_pool.clone());
    let audit = PostgresAuditLog::new(pg_pool);

    let http_client = HttpClient::builder()
        .timeout(settings.email_client.timeout())
        .build()?;
    let email_client = PostmarkEmailClient::new(
        settings.email_client.base_url.clone(),
        Email::parse(&settings.email_client.sender)?,
        settings.email_client.auth_token.clone(),
        http_client,
    );
    let notifier = NotificationSender::new(
        email_client,
        settings.application.public_url.clone(),
        settings.application.frontend_url.clone(),
    );

    let codec = JwtTokenCodec::new(
        settings.auth.session_secret.clone(),
        settings.auth.verification_secret.clone(),
    );

    let service = GigboardService::new(
        accounts,
        jobs,
        audit,
        Argon2PasswordHasher,
        codec,
        notifier,
    );

    let listener = tokio::net::TcpListener::bind(settings.application.address()).await?;
    let allowed_origins = settings.application.allowed_origins();

    service.run(listener, allowed_origins).await?;

    Ok(())
}
