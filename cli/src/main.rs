//! `storefront`: drive the storefront session from a terminal.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every run builds one `AuthProvider` over a JSON state file, resolves the
//! session exactly once, then runs a single command. The state file holds the
//! cached identity and the bearer token, so consecutive runs behave like
//! reloads of the browser app.
//!
//! ERROR HANDLING
//! ==============
//! Sign-in and reset failures print the same messages the screens show and
//! exit non-zero. A failed session check is not an error: the run continues
//! as anonymous.


mod store;

use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use auth::config::{AuthConfig, ConfigError};
use auth::reset::{RESET_SUCCESS_MESSAGE, reset_password};
use auth::signin::{OAuthStart, Portal, SignInError, sign_in_with_oauth, sign_in_with_password};
use auth::{
    AuthProvider, AuthState, HostedIdentityClient, IdentityService, OAuthOptions, OAuthProvider, RemoteError,
    RouteOutcome, SessionCache, route,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::store::FileStore;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("identity service error: {0}")]
    Remote(#[from] RemoteError),
    #[error("{0}")]
    SignIn(String),
    #[error("{0}")]
    Reset(&'static str),
}

#[derive(Parser, Debug)]
#[command(name = "storefront", about = "Storefront session CLI")]
struct Cli {
    /// File holding the cached identity and session token between runs.
    #[arg(long, env = "STOREFRONT_STATE_FILE", default_value = ".storefront-session.json")]
    state_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the resolved session.
    Whoami,
    /// Sign in with email and password.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Sign in through the admin portal.
        #[arg(long, default_value_t = false)]
        admin: bool,
    },
    /// Print the provider consent URL to finish sign-in in a browser.
    OauthUrl {
        #[arg(long, default_value = "google")]
        provider: OAuthProvider,
        #[arg(long)]
        redirect_to: Option<String>,
        #[arg(long, default_value_t = false)]
        admin: bool,
    },
    Logout,
    /// Change the password of the signed-in user.
    ResetPassword {
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm: String,
    },
    /// Show what the app would do when navigating to `path`.
    Route { path: String },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    finish(execute(cli).await)
}

async fn execute(cli: Cli) -> Result<(), CliError> {
    let config = AuthConfig::from_env()?;

    let store = Rc::new(FileStore::new(&cli.state_file));
    tracing::debug!(path = %store.path().display(), "using state file");
    let client = HostedIdentityClient::new(config.hosted)?.with_token_store(Rc::clone(&store));
    let mut provider = AuthProvider::init(Rc::new(client), Rc::new(config.admin_ids), SessionCache::new(store));
    provider.resolve_session().await;

    run(&mut provider, cli.command).await
}

/// Print a failure as its plain message on stderr.
fn finish(result: Result<(), CliError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", failure_line(&e));
            ExitCode::FAILURE
        }
    }
}

fn failure_line(error: &CliError) -> String {
    format!("error: {error}")
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(provider: &mut AuthProvider, command: Command) -> Result<(), CliError> {
    match command {
        Command::Whoami => {
            for line in describe_state(provider.state()) {
                println!("{line}");
            }
            Ok(())
        }
        Command::Login { email, password, admin } => {
            let signed_in = sign_in_with_password(provider, portal(admin), &email, &password)
                .await
                .map_err(sign_in_failure)?;
            println!("signed in: {}", signed_in.classification);
            println!("next: {}", signed_in.destination);
            Ok(())
        }
        Command::OauthUrl { provider: oauth_provider, redirect_to, admin } => {
            let options = oauth_options(redirect_to);
            match sign_in_with_oauth(provider, portal(admin), oauth_provider, &options)
                .await
                .map_err(sign_in_failure)?
            {
                OAuthStart::Redirect(url) => println!("{url}"),
                OAuthStart::SignedIn(signed_in) => {
                    println!("signed in: {}", signed_in.classification);
                    println!("next: {}", signed_in.destination);
                }
            }
            Ok(())
        }
        Command::Logout => {
            if let Err(e) = provider.service().sign_out().await {
                tracing::warn!(error = %e, "remote sign-out failed");
            }
            provider.logout();
            println!("signed out");
            Ok(())
        }
        Command::ResetPassword { password, confirm } => {
            let service: Rc<dyn IdentityService> = provider.service();
            let next = reset_password(service.as_ref(), &password, &confirm)
                .await
                .map_err(|e| CliError::Reset(e.user_message()))?;
            println!("{RESET_SUCCESS_MESSAGE}");
            println!("next: {next}");
            Ok(())
        }
        Command::Route { path } => {
            println!("{}", describe_route(&route(provider.state(), &path)));
            Ok(())
        }
    }
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

fn portal(admin: bool) -> Portal {
    if admin { Portal::Admin } else { Portal::Storefront }
}

fn oauth_options(redirect_to: Option<String>) -> OAuthOptions {
    let options = OAuthOptions::offline_consent();
    match redirect_to {
        Some(url) => options.redirect_to(url),
        None => options,
    }
}

fn sign_in_failure(error: SignInError) -> CliError {
    match &error {
        SignInError::Invalid(fields) => {
            let message = [fields.email, fields.password]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join("; ");
            CliError::SignIn(message)
        }
        SignInError::Remote(_) => CliError::SignIn(error.user_message().unwrap_or_default().to_owned()),
    }
}

fn describe_state(state: &AuthState) -> Vec<String> {
    let mut lines = vec![format!("classification: {}", state.classification)];
    if let Some(user) = &state.user {
        lines.push(format!("id: {}", user.id));
        if let Some(email) = &user.email {
            lines.push(format!("email: {email}"));
        }
        if let Some(name) = user.display_name() {
            lines.push(format!("name: {name}"));
        }
    }
    lines
}

fn describe_route(outcome: &RouteOutcome) -> String {
    match outcome {
        RouteOutcome::Loading => "loading".to_owned(),
        RouteOutcome::NotFound => "not found".to_owned(),
        RouteOutcome::Render(screen) => format!("render {}", screen.path()),
        RouteOutcome::Redirect(nav) => format!("redirect {}", nav.to),
    }
}
