mod cli;

use anyhow::{anyhow, Context};
use application::query::dto::visible_album::ListAlbumsFilter;
use application::query::list_albums::AlbumView;
use application::reconcile::OwnerDriftReconciler;
use clap::Parser;
use cli::{Cli, Commands};
use domain::user::CurrentUser;
use domain::value::Owner;
use infra::config::AppConfigImpl;
use infra::repository::postgres::{
    PostgresAccessControl, PostgresAlbumSizeRepository, PostgresCatalog,
};
use log::{info, warn};
use log4rs::{
    append::{console::ConsoleAppender, file::FileAppender},
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, Statement};
use std::sync::Arc;
use std::time::Duration;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}";

/// 配置日志同时输出到控制台和文件
fn init_logging(log_file: &str) -> anyhow::Result<()> {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(log_file)
        .with_context(|| format!("cannot open log file {}", log_file))?;
    let console_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .appender(Appender::builder().build("stdout", Box::new(console_appender)))
        .build(
            Root::builder()
                .appender("file")
                .appender("stdout")
                .build(log_level.parse().unwrap_or(log::LevelFilter::Info)),
        )?;

    log4rs::init_config(config)?;
    Ok(())
}

async fn init_db(db_url: &str) -> anyhow::Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new(db_url.to_string());
    opt.max_connections(10)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(3))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(60))
        .sqlx_logging(false);

    let db = Database::connect(opt)
        .await
        .context("failed to connect to database")?;
    db.execute(Statement::from_string(
        DbBackend::Postgres,
        "SELECT 1".to_owned(),
    ))
    .await
    .context("failed to execute test query")?;

    info!("Database connection pool initialized successfully");
    Ok(db)
}

async fn reconcile(
    db: DatabaseConnection,
    cfg: &AppConfigImpl,
    owners: Vec<String>,
    fix: bool,
) -> anyhow::Result<()> {
    let reconcile_cfg = cfg.reconcile();
    let owners: Vec<Owner> = if owners.is_empty() {
        reconcile_cfg.owners
    } else {
        owners.into_iter().map(Owner::from).collect()
    };
    if owners.is_empty() {
        warn!("No owner to reconcile, pass --owner or set reconcile.owners");
        return Ok(());
    }

    let store = Arc::new(PostgresAlbumSizeRepository::new(db.clone()));
    let catalog = Arc::new(PostgresCatalog::new(db.clone()));
    let access = Arc::new(PostgresAccessControl::new(db));

    let mut builder =
        OwnerDriftReconciler::builder(catalog.clone(), access, catalog, store.clone());
    if fix || !reconcile_cfg.dry_run {
        builder = builder.with_synchronizer(store.clone(), store);
    }
    let reconciler = builder.build();

    reconciler.reconcile_owners(&owners).await?;
    info!(
        "Reconciled {} owner(s), dry run: {}",
        owners.len(),
        reconciler.is_dry_run()
    );
    Ok(())
}

async fn list_albums(
    db: DatabaseConnection,
    user: String,
    owner: Option<String>,
    only_owned: bool,
) -> anyhow::Result<()> {
    let store = Arc::new(PostgresAlbumSizeRepository::new(db.clone()));
    let catalog = Arc::new(PostgresCatalog::new(db.clone()));
    let access = Arc::new(PostgresAccessControl::new(db));

    let view = AlbumView::with_media_counts(store, catalog.clone(), access.clone(), access, catalog);
    let current_user = CurrentUser::new(user, owner.map(Owner::from));
    let filter = ListAlbumsFilter {
        only_directly_owned: only_owned,
    };

    for visible in view.list_albums(&current_user, &filter).await? {
        let album = &visible.album;
        println!(
            "{}  {}  {:<40}  {:>6}  {}",
            album.start.format("%Y-%m-%d"),
            album.end.format("%Y-%m-%d"),
            album.id,
            visible.media_count,
            if visible.owned_by_current_user {
                "owned"
            } else {
                "shared"
            }
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = AppConfigImpl::load().map_err(|e| anyhow!("failed to load configuration: {}", e))?;
    init_logging(&cfg.log_file())?;

    let db = init_db(&cfg.database_url()).await?;
    Migrator::up(&db, None).await?;

    match cli.command {
        Commands::Reconcile { owners, fix } => reconcile(db, &cfg, owners, fix).await,
        Commands::ListAlbums {
            user,
            owner,
            only_owned,
        } => list_albums(db, user, owner, only_owned).await,
    }
}
