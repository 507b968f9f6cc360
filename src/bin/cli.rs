//! SympTrack CLI
//!
//! Command-line front end for the SympTrack backend:
//! - Sign in, register, sign out
//! - Dashboard, risk analysis and symptom prediction
//! - Community alerts, patient stories and comments
//! - Nearby hospitals
//! - Profile and health stats

use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use symptrack::api::{
    AlertFeed, ApiClient, ClientConfig, CollectionSource, FileCredentialStore, HistoryFeed,
    HospitalFeed, HospitalSearchFeed, ListController, SessionManager, UnauthorizedHandler, VlogFeed,
};
use symptrack::config::{generate_default_config, Config, LoggingConfig};
use symptrack::dto::{HospitalQuery, HospitalSearch};
use symptrack::filter::SEARCH_SLOT;
use symptrack::format::{
    compact_count, directions_url, miles, short_date, time_ago_str, EMERGENCY_CONTACTS,
    MEDICAL_DISCLAIMER,
};
use symptrack::forms::{validate_comment, LoginForm, NewVlogForm, PredictionForm, ProfileForm, RegisterForm};
use symptrack::models::{Alert, Comment, GeoPoint, Hospital, PredictionHistoryEntry, Vlog};
use symptrack::session::{gate, CredentialStore, GateDecision, Route};
use symptrack::{CommitOutcome, DisplayState, RiskLevel};

#[derive(Parser)]
#[command(name = "symptrack")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Track symptoms, community alerts and nearby care")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: user config dir, then ./symptrack.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend URL, overrides the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in; the password is read from stdin
    Login {
        email: String,
    },

    /// Create an account; the password is read from stdin twice
    Register {
        name: String,
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        age: Option<String>,
        #[arg(long)]
        gender: Option<String>,
    },

    /// Sign out and forget the stored token
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Health summary
    Dashboard {
        /// Include the detailed risk analysis
        #[arg(long)]
        risk: bool,
    },

    /// Analyze symptoms
    Predict {
        /// Free-text symptom description
        symptoms: String,
        #[arg(long)]
        age: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        lifestyle: Option<String>,
        #[arg(long)]
        medical_history: Option<String>,
    },

    /// Past predictions
    History {
        /// Only show entries at this risk level (low, medium, high)
        #[arg(long)]
        risk_level: Option<String>,
        /// Search symptom text
        #[arg(short, long)]
        search: Option<String>,
        /// Show at most this many entries
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },

    /// Community health alerts
    Alerts {
        /// Alert type (e.g. "Disease Outbreak", "Environmental")
        #[arg(short = 't', long = "type")]
        alert_type: Option<String>,
        /// Severity (low, medium, high, critical)
        #[arg(short = 'S', long)]
        severity: Option<String>,
        /// Search title, description and location
        #[arg(short, long)]
        search: Option<String>,
        /// Also print emergency contacts
        #[arg(long)]
        emergency: bool,
    },

    /// Patient stories
    Vlogs {
        /// Disease category
        #[arg(short, long)]
        disease: Option<String>,
        /// Search title, description and disease
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Share a story
    Share {
        title: String,
        description: String,
        /// Disease category
        #[arg(short, long)]
        disease: String,
        #[arg(long)]
        medicines: Option<String>,
        #[arg(long)]
        hospitals: Option<String>,
        #[arg(long)]
        recovery_timeline: Option<String>,
        #[arg(long)]
        video_url: Option<String>,
    },

    /// Like a story
    Like {
        vlog_id: String,
    },

    /// Comments on a story
    Comments {
        vlog_id: String,
    },

    /// Comment on a story
    Comment {
        vlog_id: String,
        text: String,
    },

    /// Hospitals near a location
    Hospitals {
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        lng: Option<f64>,
        /// Search radius in miles
        #[arg(short, long)]
        radius: Option<u32>,
        /// Specialty (e.g. Cardiology)
        #[arg(long)]
        specialty: Option<String>,
        /// Filter the fetched list by name, address or type
        #[arg(short, long)]
        search: Option<String>,
        /// Ask the backend to search instead of listing nearby
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Profile and health stats
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Show profile and health stats
    Show,

    /// Change profile fields; unspecified fields keep their value
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        age: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        medical_history: Option<String>,
        #[arg(long)]
        lifestyle: Option<String>,
        #[arg(long)]
        emergency_contact: Option<String>,
    },
}

impl Commands {
    /// Screen this command stands in for, used for session gating
    fn route(&self) -> Option<Route> {
        match self {
            Commands::Login { .. } => Some(Route::Login),
            Commands::Register { .. } => Some(Route::Register),
            Commands::Whoami | Commands::Dashboard { .. } => Some(Route::Dashboard),
            Commands::Predict { .. } | Commands::History { .. } => Some(Route::Predict),
            Commands::Alerts { .. } => Some(Route::Alerts),
            Commands::Vlogs { .. }
            | Commands::Share { .. }
            | Commands::Like { .. }
            | Commands::Comments { .. }
            | Commands::Comment { .. } => Some(Route::Vlogs),
            Commands::Hospitals { .. } => Some(Route::Hospitals),
            Commands::Profile { .. } => Some(Route::Profile),
            Commands::Logout | Commands::Config { .. } => None,
        }
    }
}

/// Tells the user to sign in again once a 401 has cleared the token
struct ReloginHint;

impl UnauthorizedHandler for ReloginHint {
    fn on_unauthorized(&self, entry: Route) {
        eprintln!("Session expired. Run `symptrack login <email>` to sign in again ({}).", entry);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_tracing(&config.logging);

    if let Commands::Config { output } = &cli.command {
        return write_default_config(output.as_ref());
    }

    let store = Arc::new(FileCredentialStore::new(&config.session.token_file));
    let client = ApiClient::new(ClientConfig::from(&config), store)?
        .with_unauthorized_handler(Arc::new(ReloginHint));
    let session = SessionManager::new(client);

    if let Some(route) = cli.command.route() {
        let status = session.init().await;
        match gate(&status, route) {
            GateDecision::Render => {}
            GateDecision::Redirect(Route::Login) | GateDecision::Placeholder => {
                bail!("Not signed in. Run `symptrack login <email>` first.")
            }
            GateDecision::Redirect(_) => {
                let email = status.user().map(|u| u.email.as_str()).unwrap_or("unknown");
                bail!("Already signed in as {}. Run `symptrack logout` first.", email)
            }
        }
    }

    run(cli.command, cli.format, &config, &session).await
}

async fn run(
    command: Commands,
    format: OutputFormat,
    config: &Config,
    session: &SessionManager,
) -> anyhow::Result<()> {
    let client = session.client().clone();

    match command {
        Commands::Login { email } => {
            let password = prompt("Password")?;
            let user = session
                .login(&LoginForm { email, password })
                .await
                .map_err(|e| anyhow::anyhow!(e.form_message("Login failed")))?;
            println!("Welcome back, {}!", user.first_name());
        }

        Commands::Register {
            name,
            email,
            phone,
            age,
            gender,
        } => {
            let password = prompt("Password")?;
            let confirm_password = prompt("Confirm password")?;
            let form = RegisterForm {
                name,
                email,
                password,
                confirm_password,
                phone: phone.unwrap_or_default(),
                age: age.unwrap_or_default(),
                gender: gender.unwrap_or_default(),
            };
            let user = session
                .register(&form)
                .await
                .map_err(|e| anyhow::anyhow!(e.form_message("Registration failed")))?;
            println!("Account created. Welcome, {}!", user.first_name());
        }

        Commands::Logout => {
            session.logout().await;
            println!("Signed out.");
        }

        Commands::Whoami => {
            let user = session.require_user().await?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&user)?),
                _ => {
                    println!("{} <{}>", user.name, user.email);
                    if let Some(phone) = &user.phone {
                        println!("Phone: {}", phone);
                    }
                    if let Some(age) = user.age {
                        println!("Age:   {}", age);
                    }
                }
            }
        }

        Commands::Dashboard { risk } => {
            let user = session.require_user().await?;
            let summary = session.checked(client.dashboard().await).await?;

            if format == OutputFormat::Json {
                if risk {
                    let analysis = session.checked(client.risk_analysis().await).await?;
                    let both = serde_json::json!({"summary": summary, "risk_analysis": analysis});
                    println!("{}", serde_json::to_string_pretty(&both)?);
                } else {
                    println!("{}", serde_json::to_string_pretty(&summary)?);
                }
                return Ok(());
            }

            println!("Welcome back, {}!", user.first_name());
            println!();
            match (summary.risk_score, summary.risk_level()) {
                (Some(score), Some(level)) => println!("Risk score:   {} ({})", score, level.meter_caption()),
                _ => println!("Risk score:   -"),
            }
            println!("Predictions:  {}", summary.prediction_count);
            println!("Alerts:       {}", summary.alerts_count);

            if !summary.health_trends.is_empty() {
                println!();
                println!("Health trend:");
                for point in &summary.health_trends {
                    println!("  {:<10} {:<20} {:.0}", point.label, bar(point.score, 100.0, 20), point.score);
                }
            }

            if !summary.recent_predictions.is_empty() {
                println!();
                println!("Recent predictions:");
                for entry in summary.recent_predictions.iter().take(5) {
                    println!("  {:<12} {}", short_date(entry.created_at.as_deref()), entry.symptoms);
                }
            }

            if risk {
                let analysis = session.checked(client.risk_analysis().await).await?;
                println!();
                println!(
                    "Risk analysis: {:.0} ({})",
                    analysis.current_risk_score,
                    analysis.level().meter_caption()
                );

                if !analysis.risk_factors.is_empty() {
                    println!();
                    println!("Risk factors:");
                    for (factor, value) in &analysis.risk_factors {
                        println!("  {:<20} {:<20} {:.0}%", factor, bar(*value, 100.0, 20), value);
                    }
                }

                if !analysis.health_categories.is_empty() {
                    println!();
                    println!("Categories:");
                    for category in &analysis.health_categories {
                        println!("  {:<20} {:<20} {:.0}%", category.name, bar(category.risk, 100.0, 20), category.risk);
                    }
                }

                if !analysis.predictions.is_empty() {
                    println!();
                    println!("Long-range outlook:");
                    for prediction in &analysis.predictions {
                        println!(
                            "  {:<24} {:>5.1}%  {:<8} {}",
                            prediction.condition,
                            prediction.probability,
                            prediction.band().as_str(),
                            prediction.timeline
                        );
                    }
                }
            }
        }

        Commands::Predict {
            symptoms,
            age,
            gender,
            lifestyle,
            medical_history,
        } => {
            let form = PredictionForm {
                symptoms,
                age: age.unwrap_or_default(),
                gender: gender.unwrap_or_default(),
                lifestyle: lifestyle.unwrap_or_default(),
                medical_history: medical_history.unwrap_or_default(),
            };
            let request = form.validate()?;
            let prediction = session.checked(client.predict(&request).await).await?;

            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&prediction)?);
                return Ok(());
            }

            let score = prediction.display_risk_score();
            println!(
                "Risk score: {} {} ({})",
                score,
                bar(f64::from(score), 100.0, 20),
                prediction.overall_level().meter_caption()
            );

            println!();
            if prediction.conditions.is_empty() {
                println!("No specific conditions identified.");
            } else {
                println!("Possible conditions:");
                for condition in &prediction.conditions {
                    println!(
                        "  {:<28} {:>5.1}%  {}",
                        condition.name,
                        condition.probability,
                        condition.risk_level.as_str()
                    );
                }
            }

            if !prediction.recommendations.is_empty() {
                println!();
                println!("Recommendations:");
                for recommendation in &prediction.recommendations {
                    println!("  - {}", recommendation);
                }
            }

            println!();
            println!("{}", MEDICAL_DISCLAIMER);
        }

        Commands::History {
            risk_level,
            search,
            limit,
        } => {
            if let Some(level) = &risk_level {
                level.parse::<RiskLevel>()?;
            }
            let history = ListController::new(HistoryFeed::new(client));
            history.set_filter("risk_level", risk_level.as_deref().unwrap_or_default()).await;
            history.set_search(search.as_deref().unwrap_or_default()).await;

            let entries = load(session, &history).await?;
            let entries: Vec<_> = entries.into_iter().take(limit).collect();
            print_records(&entries, format, "No predictions yet. Try `symptrack predict`.")?;
        }

        Commands::Alerts {
            alert_type,
            severity,
            search,
            emergency,
        } => {
            let alerts = ListController::new(AlertFeed::new(client));
            alerts.set_filter("type", alert_type.as_deref().unwrap_or_default()).await;
            alerts.set_filter("severity", severity.as_deref().unwrap_or_default()).await;
            alerts.set_search(search.as_deref().unwrap_or_default()).await;

            let visible = load(session, &alerts).await?;
            print_records(&visible, format, "No alerts found. Try changing your filters.")?;

            if format == OutputFormat::Table && !visible.is_empty() {
                println!();
                println!("Showing {} of {} alerts", visible.len(), alerts.source_len().await);
            }

            if emergency && format == OutputFormat::Table {
                println!();
                println!("Emergency contacts:");
                for (label, number) in EMERGENCY_CONTACTS {
                    println!("  {:<20} {}", label, number);
                }
            }
        }

        Commands::Vlogs { disease, search } => {
            let vlogs = ListController::new(VlogFeed::new(client));
            vlogs.set_filter("disease", disease.as_deref().unwrap_or_default()).await;
            vlogs.set_search(search.as_deref().unwrap_or_default()).await;

            let visible = load(session, &vlogs).await?;
            print_records(&visible, format, "No stories found. Share yours with `symptrack share`.")?;
        }

        Commands::Share {
            title,
            description,
            disease,
            medicines,
            hospitals,
            recovery_timeline,
            video_url,
        } => {
            let form = NewVlogForm {
                title,
                description,
                disease,
                medicines: medicines.unwrap_or_default(),
                hospitals: hospitals.unwrap_or_default(),
                recovery_timeline: recovery_timeline.unwrap_or_default(),
                video_url: video_url.unwrap_or_default(),
            };
            let vlog = form.validate()?;
            session.checked(client.create_vlog(&vlog).await).await?;
            println!("Story shared.");
        }

        Commands::Like { vlog_id } => {
            session.checked(client.like_vlog(&vlog_id).await).await?;
            println!("Liked {}.", vlog_id);
        }

        Commands::Comments { vlog_id } => {
            let comments = session.checked(client.comments(&vlog_id).await).await?;
            print_records(&comments, format, "No comments yet.")?;
        }

        Commands::Comment { vlog_id, text } => {
            let comment = validate_comment(&vlog_id, &text)?;
            session.checked(client.add_comment(&comment).await).await?;
            println!("Comment added.");
        }

        Commands::Hospitals {
            lat,
            lng,
            radius,
            specialty,
            search,
            query,
        } => {
            let origin = match (lat, lng) {
                (Some(lat), Some(lng)) => GeoPoint::new(lat, lng),
                (None, None) => config.location.origin(),
                _ => bail!("--lat and --lng must be given together"),
            };

            let visible = match query {
                Some(text) => {
                    let feed = HospitalSearchFeed::new(client, HospitalSearch { text, origin });
                    let hospitals = ListController::new(feed);
                    hospitals.set_filter(SEARCH_SLOT, search.as_deref().unwrap_or_default()).await;
                    load(session, &hospitals).await?
                }
                None => {
                    let query = HospitalQuery {
                        origin,
                        radius_miles: radius.unwrap_or(config.location.radius_miles),
                        specialty: specialty.unwrap_or_default(),
                    };
                    let hospitals = ListController::new(HospitalFeed::new(client, query));
                    hospitals.set_search(search.as_deref().unwrap_or_default()).await;
                    load(session, &hospitals).await?
                }
            };

            print_records(&visible, format, "No hospitals found. Try a larger radius.")?;
        }

        Commands::Profile { action } => match action {
            ProfileCommand::Show => {
                let profile = session.checked(client.profile().await).await?;
                let stats = session.checked(client.health_stats().await).await?;

                if format == OutputFormat::Json {
                    let both = serde_json::json!({"profile": profile, "stats": stats});
                    println!("{}", serde_json::to_string_pretty(&both)?);
                    return Ok(());
                }

                println!("Name:              {}", profile.name);
                println!("Email:             {}", profile.email);
                println!("Phone:             {}", profile.phone.as_deref().unwrap_or("-"));
                println!("Age:               {}", profile.age.map(|a| a.to_string()).unwrap_or_else(|| "-".into()));
                println!("Gender:            {}", profile.gender.as_deref().unwrap_or("-"));
                println!("Medical history:   {}", profile.medical_history.as_deref().unwrap_or("-"));
                println!("Lifestyle:         {}", profile.lifestyle.as_deref().unwrap_or("-"));
                println!("Emergency contact: {}", profile.emergency_contact.as_deref().unwrap_or("-"));
                println!();
                println!("Predictions made:  {}", stats.predictions_made);
                println!("Avg risk score:    {}", stats.avg_risk_score);
                println!("Stories shared:    {}", stats.vlogs_shared);
                println!("Community score:   {}", stats.community_score);
            }

            ProfileCommand::Update {
                name,
                email,
                phone,
                age,
                gender,
                medical_history,
                lifestyle,
                emergency_contact,
            } => {
                let current = session.checked(client.profile().await).await?;
                let mut form = ProfileForm::from(&current);
                overwrite(&mut form.name, name);
                overwrite(&mut form.email, email);
                overwrite(&mut form.phone, phone);
                overwrite(&mut form.age, age);
                overwrite(&mut form.gender, gender);
                overwrite(&mut form.medical_history, medical_history);
                overwrite(&mut form.lifestyle, lifestyle);
                overwrite(&mut form.emergency_contact, emergency_contact);

                let profile = form.validate()?;
                session
                    .checked(client.update_profile(&profile).await)
                    .await
                    .map_err(|e| anyhow::anyhow!(e.form_message("Failed to update profile")))?;
                println!("Profile updated.");
            }
        },

        Commands::Config { output } => write_default_config(output.as_ref())?,
    }

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("symptrack={}", logging.level).into());
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn write_default_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = generate_default_config();

    match output {
        Some(path) => {
            // Create parent directory if needed
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }

    Ok(())
}

/// Refresh a list screen and return its visible subset. A failed fetch is
/// an error here, since a CLI has no last-known list to fall back to.
async fn load<S>(session: &SessionManager, list: &ListController<S>) -> anyhow::Result<Vec<S::Record>>
where
    S: CollectionSource,
{
    let outcome = list.refresh().await;
    tracing::debug!(?outcome, "List refreshed");

    if list.display_state().await == DisplayState::Loading {
        bail!("Request was cancelled");
    }
    if outcome == CommitOutcome::Failed {
        if session.client().credentials().load()?.is_none() {
            bail!("Not signed in");
        }
        bail!("Could not load {} from {}", list.name(), session.client().base_url());
    }

    Ok(list.visible().await)
}

fn prompt(label: &str) -> anyhow::Result<String> {
    eprint!("{}: ", label);
    std::io::stderr().flush()?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn overwrite(slot: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn bar(value: f64, max: f64, width: usize) -> String {
    let filled = ((value / max).clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(width - filled))
}

// ============ Output ============

/// Records printable as a table or CSV
trait Tabular: Serialize {
    const HEADERS: &'static [&'static str];

    fn row(&self) -> Vec<String>;
}

impl Tabular for Alert {
    const HEADERS: &'static [&'static str] = &["Severity", "Type", "Title", "Location", "When"];

    fn row(&self) -> Vec<String> {
        vec![
            self.severity.style().label.to_string(),
            self.alert_type.clone(),
            self.title.clone(),
            self.location.clone().unwrap_or_default(),
            time_ago_str(self.created_at.as_deref(), Utc::now()),
        ]
    }
}

impl Tabular for Vlog {
    const HEADERS: &'static [&'static str] = &["ID", "Title", "Disease", "Author", "Likes", "Comments"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.title.clone(),
            self.disease.clone(),
            self.author_name.clone(),
            compact_count(self.likes),
            compact_count(self.comments),
        ]
    }
}

impl Tabular for Comment {
    const HEADERS: &'static [&'static str] = &["User", "Comment", "When"];

    fn row(&self) -> Vec<String> {
        vec![
            self.username.clone(),
            self.comment_text.clone(),
            time_ago_str(self.created_at.as_deref(), Utc::now()),
        ]
    }
}

impl Tabular for Hospital {
    const HEADERS: &'static [&'static str] = &["Name", "Rating", "Distance", "Phone", "Open", "Directions"];

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.rating.map(|r| format!("{:.1}", r)).unwrap_or_else(|| "-".into()),
            miles(self.distance_or_zero()),
            self.phone.clone().unwrap_or_default(),
            if self.is_open_24h() {
                "24/7".into()
            } else if self.appears_open() {
                "yes".into()
            } else {
                "-".into()
            },
            directions_url(self.location()),
        ]
    }
}

impl Tabular for PredictionHistoryEntry {
    const HEADERS: &'static [&'static str] = &["Date", "Risk", "Level", "Symptoms"];

    fn row(&self) -> Vec<String> {
        vec![
            short_date(self.created_at.as_deref()),
            self.risk_score.map(|s| format!("{:.0}", s)).unwrap_or_else(|| "-".into()),
            self.risk_level.map(|l| l.as_str().to_string()).unwrap_or_default(),
            self.symptoms.clone(),
        ]
    }
}

fn print_records<T: Tabular>(records: &[T], format: OutputFormat, empty: &str) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(records)?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(T::HEADERS)?;
            for record in records {
                writer.write_record(record.row())?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            if records.is_empty() {
                println!("{}", empty);
            } else {
                print_table(records);
            }
        }
    }

    Ok(())
}

fn print_table<T: Tabular>(records: &[T]) {
    let rows: Vec<Vec<String>> = records.iter().map(Tabular::row).collect();

    let mut widths: Vec<usize> = T::HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count()).min(40);
        }
    }

    let line = |cells: Vec<String>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", truncate(cell, *width), width = *width))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    println!("{}", line(T::HEADERS.iter().map(|h| h.to_string()).collect()));
    println!("{}", "-".repeat(widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1)));
    for row in rows {
        println!("{}", line(row));
    }
}

fn truncate(cell: &str, width: usize) -> String {
    if cell.chars().count() <= width {
        cell.to_string()
    } else {
        let kept: String = cell.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
