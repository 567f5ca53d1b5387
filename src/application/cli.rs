use std::io;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Password;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AuthGateway;
use crate::domain::models::AuthGatewayBox;
use crate::domain::models::ProfileUpdate;
use crate::domain::services::DiskSessionStore;
use crate::domain::services::SessionService;
use crate::infrastructure::api::ApiManager;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

fn prompt_password(prompt: &str) -> Result<String> {
    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact()?;

    return Ok(password.trim().to_string());
}

fn credentials(matches: &ArgMatches, password_prompt: &str) -> Result<(String, String)> {
    let username = matches
        .get_one::<String>("username")
        .map(|e| return e.trim().to_string())
        .unwrap_or_default();

    if username.is_empty() {
        bail!("A username is required.");
    }

    let password = prompt_password(password_prompt)?;
    if password.is_empty() {
        bail!("A password is required.");
    }

    return Ok((username, password));
}

async fn register(matches: &ArgMatches) -> Result<()> {
    let (username, password) = credentials(matches, "Password")?;

    let gateway = ApiManager::members();
    let member = gateway.register(&username, &password).await?;

    println!(
        "{} You can now sign in with {}.",
        Paint::green(format!("Registered {}.", member.username)),
        Paint::new(format!("samovar login {}", member.username)).bold()
    );

    return Ok(());
}

async fn login(matches: &ArgMatches) -> Result<()> {
    let (username, password) = credentials(matches, "Password")?;

    let gateway = ApiManager::members();
    let res = gateway.login(&username, &password).await?;

    let mut session_service = SessionService::new(Box::<DiskSessionStore>::default());
    session_service.login(res.token, res.member.clone()).await?;

    println!(
        "{}",
        Paint::green(format!("Signed in as {}.", res.member.username))
    );

    return Ok(());
}

async fn logout() -> Result<()> {
    let mut session_service = SessionService::new(Box::<DiskSessionStore>::default());
    session_service.logout().await?;

    println!("{}", Paint::green("Signed out."));

    return Ok(());
}

async fn profile(matches: &ArgMatches) -> Result<()> {
    let gateway: AuthGatewayBox = ApiManager::members();
    let mut session_service = SessionService::new(Box::<DiskSessionStore>::default());
    session_service.initialize(gateway.as_ref()).await?;

    if !session_service.session().is_authenticated() {
        println!(
            "You are signed out. Run {} first.",
            Paint::new("samovar login <USERNAME>").bold()
        );
        return Ok(());
    }

    let current_username = session_service
        .session()
        .member
        .as_ref()
        .map(|e| return e.username.to_string())
        .unwrap_or_default();

    let mut update = ProfileUpdate::default();
    if let Some(username) = matches.get_one::<String>("username") {
        let trimmed = username.trim();
        if !trimmed.is_empty() && trimmed != current_username {
            update.username = Some(trimmed.to_string());
        }
    }
    if matches.get_flag("password") {
        let password = prompt_password("New password")?;
        if !password.is_empty() {
            update.password = Some(password);
        }
    }

    if update.is_empty() {
        let member = session_service.session().member.clone().unwrap_or_default();
        println!("Username: {}", member.username);
        let joined = member.created_at_display();
        if !joined.is_empty() {
            println!("Joined: {joined}");
        }
        return Ok(());
    }

    let token = session_service.session().token.clone().unwrap_or_default();
    let member = gateway.update_profile(&token, &update).await?;
    session_service.update_profile(member.clone()).await?;

    println!(
        "{}",
        Paint::green(format!("Profile updated for {}.", member.username))
    );

    return Ok(());
}

pub fn build() -> Command {
    return Command::new("samovar")
        .about("Terminal client for a token-authenticated group chat server")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("completions")
                .long("completions")
                .help("Generates shell completions")
                .value_parser(value_parser!(Shell)),
        )
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("SAMOVAR_CONFIG_FILE")
                .num_args(1)
                .help(format!(
                    "Path to configuration file [default: {}]",
                    Config::default(ConfigKey::ConfigFile)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ServerURL.to_string())
                .short('s')
                .long(ConfigKey::ServerURL.to_string())
                .env("SAMOVAR_SERVER_URL")
                .num_args(1)
                .help(format!(
                    "URL of the chat server every request is sent to [default: {}]",
                    Config::default(ConfigKey::ServerURL)
                )),
        )
        .arg(
            Arg::new(ConfigKey::PollInterval.to_string())
                .long(ConfigKey::PollInterval.to_string())
                .env("SAMOVAR_POLL_INTERVAL")
                .num_args(1)
                .help(format!(
                    "How often the chat view refreshes the message list, in milliseconds [default: {}]",
                    Config::default(ConfigKey::PollInterval)
                )),
        )
        .arg(
            Arg::new(ConfigKey::StateDir.to_string())
                .long(ConfigKey::StateDir.to_string())
                .env("SAMOVAR_STATE_DIR")
                .num_args(1)
                .help(format!(
                    "Directory where the signed-in session is stored [default: {}]",
                    Config::default(ConfigKey::StateDir)
                )),
        )
        .subcommand(
            Command::new("register")
                .about("Creates a new member account")
                .arg(Arg::new("username").help("The username to register").num_args(1)),
        )
        .subcommand(
            Command::new("login")
                .about("Signs in and stores the session")
                .arg(Arg::new("username").help("The username to sign in with").num_args(1)),
        )
        .subcommand(Command::new("logout").about("Signs out and clears the stored session"))
        .subcommand(
            Command::new("profile")
                .about("Shows the profile, or updates it when flags are passed")
                .arg(
                    Arg::new("username")
                        .long("username")
                        .num_args(1)
                        .help("New username"),
                )
                .arg(
                    Arg::new("password")
                        .long("password")
                        .action(clap::ArgAction::SetTrue)
                        .help("Prompt for a new password"),
                ),
        )
        .subcommand(Command::new("config").about("Prints the default config file"));
}

/// Returns true when the chat view should start, false when a subcommand
/// already handled the run.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    if let Some(completions) = matches.get_one::<Shell>("completions") {
        let mut cmd = build();
        print_completions(*completions, &mut cmd);
    }

    Config::load(build(), vec![&matches]).await?;

    match matches.subcommand() {
        Some(("register", subcommand_matches)) => {
            register(subcommand_matches).await?;
            return Ok(false);
        }
        Some(("login", subcommand_matches)) => {
            login(subcommand_matches).await?;
            return Ok(false);
        }
        Some(("logout", _)) => {
            logout().await?;
            return Ok(false);
        }
        Some(("profile", subcommand_matches)) => {
            profile(subcommand_matches).await?;
            return Ok(false);
        }
        Some(("config", _)) => {
            println!("{}", Config::serialize_default(build()));
            return Ok(false);
        }
        _ => {
            return Ok(true);
        }
    }
}
