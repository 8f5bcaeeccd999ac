use axum::{
    Router,
    http::{HeaderValue, Method, header, request},
    routing::{get, patch, post, put},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use gigboard_adapters::AllowedOrigins;
use gigboard_application::NotificationSender;
use gigboard_axum::{
    SessionGate,
    routes::{
        create_job, delete_job, forgot_password, get_job, get_profile, list_jobs, list_proposals,
        login, register, resend_verification, reset_password, submit_proposal, update_job,
        update_job_status, update_profile, update_proposal_status, verify_email,
        verify_email_link, verify_session,
    },
};
use gigboard_core::{AccountStore, AuditLog, EmailClient, JobStore, PasswordHasher, TokenCodec};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// The assembled GigBoard API, one router with every route bound to its
/// dependencies.
pub struct GigboardService {
    router: Router,
}

impl GigboardService {
    /// Wire the routes. Each `with_state` call closes over exactly the
    /// dependencies the preceding routes need; routes that share a path
    /// must share a state tuple, which is why the public job reads carry
    /// the session gate they never consult.
    pub fn new<S, J, A, H, C, E>(
        accounts: S,
        jobs: J,
        audit: A,
        hasher: H,
        codec: C,
        notifier: NotificationSender<E>,
    ) -> Self
    where
        S: AccountStore + Clone + 'static,
        J: JobStore + Clone + 'static,
        A: AuditLog + Clone + 'static,
        H: PasswordHasher + Clone + 'static,
        C: TokenCodec + Clone + 'static,
        E: EmailClient + Clone + 'static,
    {
        let gate = SessionGate::new(accounts.clone(), codec.clone());
        let verified_redirect = format!("{}/login?verified=true", notifier.frontend_url());

        let router = Router::new()
            .route("/api/register", post(register::<S, H, C, E>))
            .with_state((
                accounts.clone(),
                hasher.clone(),
                codec.clone(),
                notifier.clone(),
            ))
            .route("/api/login", post(login::<S, A, H, C, E>))
            .with_state((
                accounts.clone(),
                audit,
                hasher.clone(),
                codec.clone(),
                notifier.clone(),
            ))
            .route("/api/verify-email", post(verify_email::<S, C>))
            .with_state((accounts.clone(), codec.clone()))
            .route("/api/verify-email/{token}", get(verify_email_link::<S, C>))
            .with_state((accounts.clone(), codec.clone(), verified_redirect))
            .route(
                "/api/resend-verification",
                post(resend_verification::<S, C, E>),
            )
            .with_state((accounts.clone(), codec, notifier.clone()))
            .route("/api/forgot-password", post(forgot_password::<S, H, E>))
            .route("/api/reset-password", post(reset_password::<S, H, E>))
            .with_state((accounts.clone(), hasher, notifier))
            .route("/api/login/verify", get(verify_session))
            .with_state(gate.clone())
            .route("/api/profile/{id}", get(get_profile::<S>))
            .with_state(accounts.clone())
            .route("/api/profile", put(update_profile::<S>))
            .with_state((gate.clone(), accounts.clone()))
            .route("/api/jobs", get(list_jobs::<J>).post(create_job::<J>))
            .route(
                "/api/jobs/{id}",
                get(get_job::<J>)
                    .put(update_job::<J>)
                    .delete(delete_job::<J>),
            )
            .route("/api/jobs/{id}/status", patch(update_job_status::<J>))
            .route(
                "/api/proposals/{id}/status",
                patch(update_proposal_status::<J>),
            )
            .with_state((gate.clone(), jobs.clone()))
            .route(
                "/api/jobs/{id}/proposals",
                get(list_proposals::<J, S>).post(submit_proposal::<J, S>),
            )
            .with_state((gate, jobs, accounts));

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// The finished router, with CORS applied when origins are configured.
    /// `None` leaves CORS off, which is what the API tests and same-origin
    /// deployments want.
    pub fn into_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        origin
                            .to_str()
                            .is_ok_and(|origin| allowed_origins.contains(origin))
                    },
                ));

            self.router = self.router.layer(cors);
        }

        self.with_trace_layer().router
    }

    pub async fn run(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        tracing::info!("GigBoard API listening on {}", listener.local_addr()?);

        let router = self.into_router(allowed_origins);
        axum::serve(listener, router).await
    }
}
