use std::env;

/// Process configuration, read once at startup and injected everywhere it is
/// needed. Request handlers never read environment variables directly.
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_port: u16,
    pub server_host: String,
}

impl Config {
    /// Loads configuration from the environment.
    ///
    /// `DATABASE_URL` and `JWT_SECRET` are mandatory; starting without either
    /// is a fatal configuration error. An empty `JWT_SECRET` is treated the
    /// same as a missing one so the token service can never sign with a
    /// trivial key.
    pub fn from_env() -> Self {
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");
        if jwt_secret.is_empty() {
            panic!("JWT_SECRET must not be empty");
        }

        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            jwt_secret,
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "7000".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
        }
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}
