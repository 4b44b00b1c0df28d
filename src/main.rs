use chrono::{Local, NaiveDate};
use clap::Parser;
use gaehwa::config::cli::{Command, LikesAction, RecommendArgs};
use gaehwa::core::ConfigProvider;
use gaehwa::core::dday::{dday, load_anniversary, resolve_anniversary, save_anniversary};
use gaehwa::core::profile::Profile;
use gaehwa::core::recommend::RecipientForm;
use gaehwa::core::selection::{Selection, MAX_SELECT};
use gaehwa::utils::error::ErrorSeverity;
use gaehwa::utils::{logger, validation::Validate};
use gaehwa::{
    AppState, Authenticator, CliConfig, GaehwaError, HttpAuthClient, HttpRecommendationClient,
    LocalStorage, Recommender, Result, Settings,
};

/// 選擇畫面的固定候選花束
const BOUQUET_CANDIDATES: [&str; 8] = ["1", "2", "3", "4", "5", "6", "7", "8"];

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let settings = match Settings::resolve(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    };

    // 初始化日誌
    if settings.json_logs {
        logger::init_json_logger(settings.verbose);
    } else {
        logger::init_cli_logger(settings.verbose);
    }
    tracing::debug!("Resolved settings: {:?}", settings);

    if let Err(e) = settings.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(exit_code(&e));
    }

    if let Err(e) = run(cli.command, &settings).await {
        tracing::error!(
            "Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(exit_code(&e));
    }
}

fn exit_code(e: &GaehwaError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 4,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

async fn run(command: Command, settings: &Settings) -> Result<()> {
    let storage = LocalStorage::new(settings.storage_dir().to_string());
    let secure = LocalStorage::secure(settings.secure_dir().to_string());

    match command {
        Command::Likes { action } => {
            let mut state = AppState::load(storage).await;
            match action {
                LikesAction::Toggle { id } => {
                    gaehwa::utils::validation::validate_non_empty_string("id", &id)?;
                    state.likes.toggle_and_save(&id).await;
                    if state.likes.is_liked(&id) {
                        println!("♥ {} liked", id);
                    } else {
                        println!("♡ {} unliked", id);
                    }
                }
                LikesAction::Check { id } => println!("{}", state.likes.is_liked(&id)),
                LikesAction::List => {
                    for id in state.likes.liked_ids() {
                        println!("{}", id);
                    }
                }
            }
        }
        Command::Dday { target } => {
            let today = Local::now().date_naive();
            let anniversary = match target {
                Some(raw) => {
                    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| {
                        GaehwaError::ValidationError {
                            message: format!("invalid date '{}': {}", raw, e),
                        }
                    })?;
                    if let Err(e) = save_anniversary(&storage, date).await {
                        tracing::warn!("Could not store anniversary: {}", e);
                    }
                    date
                }
                None => match load_anniversary(&storage).await {
                    Some(date) => date,
                    None => resolve_anniversary(None, today),
                },
            };
            println!("{} ({})", dday(today, anniversary), anniversary);
        }
        Command::Recommend(args) => recommend(args, settings).await?,
        Command::Select { ids } => {
            let selection = Selection::from_query(BOUQUET_CANDIDATES, MAX_SELECT, &ids.join(","));
            println!(
                "선택: {} ({}/{})",
                selection.to_query(),
                selection.selected().len(),
                selection.limit()
            );
            if !selection.can_proceed() {
                println!("총 {}개를 선택하면 다음으로 넘어갈 수 있어요.", MAX_SELECT);
            }
        }
        Command::Login { id_token } => {
            let auth = Authenticator::new(HttpAuthClient::new(settings)?, secure.clone());
            let session = auth.login(&id_token).await?;
            tracing::debug!("Session stored for {}", session.display_name);
            println!("✅ {}", Profile::load(&secure).await.greeting());
        }
        Command::Logout => {
            let auth = Authenticator::new(HttpAuthClient::new(settings)?, secure);
            auth.logout().await?;
            println!("👋 signed out");
        }
        Command::Profile => {
            println!("{}", Profile::load(&secure).await.greeting());
        }
    }

    Ok(())
}

async fn recommend(args: RecommendArgs, settings: &Settings) -> Result<()> {
    let form = RecipientForm {
        gender: Some(args.gender.parse()?),
        age: Some(args.age.parse()?),
        emotion: Some(args.emotion.parse()?),
    };

    let recommender = Recommender::new(HttpRecommendationClient::new(settings)?);
    let result = recommender.recommend(&form).await?;

    if let Some(notice) = result.notice() {
        eprintln!("⚠️ {}", notice);
    }
    for florist in &result.florists {
        println!(
            "{}\t{}\t★{:.1}\t{}",
            florist.id,
            florist.name,
            florist.rating.unwrap_or_default(),
            florist.tags.join(", ")
        );
    }
    Ok(())
}
