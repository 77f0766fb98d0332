use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub sqlite_path: String,
    pub database_url: Option<String>,
    pub bcrypt_cost: u32,
    pub mail_from: String,
    pub superuser: Option<SuperuserSeed>,
}

/// Account created at startup when all three `SUPERUSER_*` variables are set.
#[derive(Clone, Debug)]
pub struct SuperuserSeed {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let sqlite_path = env::var("SQLITE_PATH").unwrap_or_else(|_| "./data/yamdb.sqlite".to_string());
        let database_url = env::var("DATABASE_URL").ok().filter(|v| !v.trim().is_empty());

        let bcrypt_cost = env::var("BCRYPT_COST")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(bcrypt::DEFAULT_COST);

        let mail_from = env::var("MAIL_FROM").unwrap_or_else(|_| "noreply@yamdb.local".to_string());

        let superuser = match (
            env::var("SUPERUSER_USERNAME"),
            env::var("SUPERUSER_EMAIL"),
            env::var("SUPERUSER_PASSWORD"),
        ) {
            (Ok(username), Ok(email), Ok(password)) => Some(SuperuserSeed { username, email, password }),
            _ => None,
        };

        Self {
            sqlite_path,
            database_url,
            bcrypt_cost,
            mail_from,
            superuser,
        }
    }

    /// In-memory SQLite with a cheap hash cost, for tests.
    pub fn in_memory() -> Self {
        Self {
            sqlite_path: String::new(),
            database_url: Some("sqlite::memory:".to_string()),
            bcrypt_cost: 4,
            mail_from: "noreply@yamdb.local".to_string(),
            superuser: None,
        }
    }

    pub fn database_url(&self) -> String {
        if let Some(url) = &self.database_url {
            return url.clone();
        }

        let path = self.sqlite_path.trim();
        if path.starts_with("sqlite:") || path.starts_with("file:") {
            return path.to_string();
        }
        format!("sqlite://{}?mode=rwc", path)
    }

    pub fn is_sqlite(&self) -> bool {
        self.database_url().starts_with("sqlite:") || self.database_url().starts_with("file:")
    }

    pub fn is_sqlite_memory(&self) -> bool {
        self.database_url().contains(":memory:")
    }
}
