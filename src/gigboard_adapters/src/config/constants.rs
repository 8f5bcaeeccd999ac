pub mod env {
    pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
    pub const PORT_ENV_VAR: &str = "PORT";
    pub const JWT_SESSION_SECRET_ENV_VAR: &str = "JWT_SESSION_SECRET";
    pub const JWT_VERIFICATION_SECRET_ENV_VAR: &str = "JWT_VERIFICATION_SECRET";
    pub const POSTMARK_AUTH_TOKEN_ENV_VAR: &str = "POSTMARK_AUTH_TOKEN";
    pub const ALLOWED_ORIGINS_ENV_VAR: &str = "ALLOWED_ORIGINS";
    pub const APP_PUBLIC_URL_ENV_VAR: &str = "APP_PUBLIC_URL";
    pub const FRONTEND_URL_ENV_VAR: &str = "FRONTEND_URL";
}

pub mod prod {
    pub const APP_HOST: &str = "0.0.0.0";
    pub const APP_PORT: u16 = 3000;

    pub mod email_client {
        use std::time::Duration;

        pub const BASE_URL: &str = "https://api.postmarkapp.com/";
        pub const SENDER: &str = "no-reply@gigboard.io";
        pub const TIMEOUT: Duration = Duration::from_secs(10);
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";

    pub mod email_client {
        use std::time::Duration;

        pub const SENDER: &str = "test@email.com";
        pub const TIMEOUT: Duration = Duration::from_millis(200);
    }
}
