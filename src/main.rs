use log::{error, info, warn};
use yamdb_models::config::AppConfig;
use yamdb_models::db::connect_db;
use yamdb_models::mail::LogMailer;
use yamdb_models::manager::{NewUser, UserManager};
use yamdb_models::store;
use yamdb_models::AppResult;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();
    if let Err(err) = run().await {
        error!("startup failed: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let config = AppConfig::from_env();
    let db = connect_db(&config).await?;

    if let Some(seed) = &config.superuser {
        if store::user::find_by_username(&db, &seed.username).await?.is_some() {
            warn!("superuser {} already exists, skipping", seed.username);
        } else {
            let mailer = LogMailer::new(config.mail_from.clone());
            let manager = UserManager::new(&db, &mailer).with_bcrypt_cost(config.bcrypt_cost);
            let new = NewUser::new(seed.username.clone(), seed.email.clone()).password(seed.password.clone());
            manager.create_superuser(new).await?;
        }
    }

    info!("database ready");
    Ok(())
}
