// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! The Mandate Countdown terminal application
//!

use clap::{Parser, Subcommand, ValueEnum, builder::PossibleValue};
use mandate_countdown_controller::{
    Config, Session, SessionEvent, countdown_line, window_summary,
};
use mandate_countdown_core::{Language, Message, RuleTable};
use mandate_countdown_wikidata::{WikidataClient, load_portrait};
use simplelog::{ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::io::Write;
use std::sync::Arc;

#[macro_use]
extern crate log;
extern crate simplelog;

/// Mandate Countdown entry point
///
/// One of:
/// - List the countries
/// - Show the current term of a country's head of state
/// - Watch the countdown to the end of that term
#[tokio::main]
async fn main() {
    let args = Cli::parse();

    // Setup logging (to stderr so that output can be piped)
    if let Err(error) = CombinedLogger::init(vec![TermLogger::new(
        args.log_level,
        log_config(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )]) {
        eprintln!("Could not set up logging: {error}");
    }

    // Load the config, then apply the command line overrides
    let mut config = match Config::ensure_setup() {
        Ok(config) => config,
        Err(error) => {
            warn!("Using the default config: {error}");
            Config::default()
        }
    };
    if let Some(language) = &args.lang {
        config.set_language(Some(language.0));
    }
    if let Some(endpoint) = &args.endpoint {
        config.set_endpoint(endpoint);
    }
    if args.no_fallback {
        config.set_fallback_query(false);
    }
    let language = config.language();

    let rules = match RuleTable::builtin() {
        Ok(rules) => rules,
        Err(error) => {
            eprintln!("Error: {error}");
            std::process::exit(1);
        }
    };

    match args.command {
        Command::List => list(&rules, language),
        Command::Show { country } => run(config, rules, &country, Mode::Show).await,
        Command::Watch { country } => run(config, rules, &country, Mode::Watch).await,
    }
}

/// Only log this binary & the project's library crates (not e.g. reqwest)
fn log_config() -> simplelog::Config {
    ConfigBuilder::new()
        .add_filter_allow_str(module_path!())
        .add_filter_allow_str("mandate_countdown")
        .build()
}

/// Whether to print the countdown once or keep it updated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Show,
    Watch,
}

/// Print the countries in the order they'd appear in a menu
fn list(rules: &RuleTable, language: Language) {
    println!("{}", language.translate(Message::CountrySelectPlaceholder));
    for rule in rules.sorted_for(language) {
        let term = match rule.term_kind().years() {
            Some(years) => format!("{years}"),
            None => String::from("-"),
        };
        println!(
            "{:<6} {:<3} {}",
            rule.country_id().as_str(),
            term,
            rule.name(language)
        );
    }
}

/// Resolve a country's window & print it & its countdown
async fn run(config: Config, rules: RuleTable, country: &str, mode: Mode) {
    let language = config.language();
    let client = match WikidataClient::new(config.client_settings()) {
        Ok(client) => Arc::new(client),
        Err(error) => {
            eprintln!("Error: {error}");
            std::process::exit(1);
        }
    };
    let http = client.http().clone();
    let mut session = Session::new(rules, client, language);

    if let Err(error) = session.select(Some(country)) {
        eprintln!("{}", error.message(language));
        std::process::exit(1);
    }

    println!("{}", language.translate(Message::Title));
    while let Some(event) = session.next_event().await {
        match event {
            SessionEvent::Resolved { country_id, window } => {
                let name = session
                    .rules()
                    .lookup(country_id.as_str())
                    .map(|rule| rule.name(language).to_string())
                    .unwrap_or_else(|_| country_id.to_string());
                let portrait = load_portrait(&http, window.portrait_url()).await;
                if portrait.is_fallback() {
                    info!("Using placeholder portrait for {country_id}");
                }
                println!("{}", window_summary(&name, &window, language));
                println!("{}", portrait.url());
            }
            SessionEvent::Failed { error, .. } => {
                eprintln!("{}", error.message(language));
                std::process::exit(1);
            }
            SessionEvent::Tick { countdown, .. } => {
                let line = countdown_line(&countdown, language);
                if mode == Mode::Show || countdown.is_final() {
                    println!("\r{line}");
                    break;
                }
                print!("\r{line}");
                let _ = std::io::stdout().flush();
            }
        }
    }
}

/// Mandate Countdown CLI args using [clap]
#[derive(Parser, Debug)]
#[command(
    version,
    about = "How long does the head of state have left?",
    after_help = "Term start dates come from Wikidata; later terms are projected from the \
                  most recent start date on record"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Language for messages & names (defaults to the config, then the
    /// environment)
    #[arg(long, global = true)]
    pub lang: Option<LanguageArg>,

    /// SPARQL endpoint to query
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Don't look for missing start dates in the holder's positions held
    #[arg(long, global = true)]
    pub no_fallback: bool,

    /// How much to log (to stderr)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: LevelFilter,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the countries
    List,

    /// Show the current term of a country's head of state
    Show {
        /// Wikidata ID of the country (e.g. Q142)
        country: String,
    },

    /// Show the current term & keep the countdown updated
    Watch {
        /// Wikidata ID of the country (e.g. Q142)
        country: String,
    },
}

/// A [`Language`] as a command line value
#[derive(Debug, Clone, Copy)]
pub struct LanguageArg(Language);

impl ValueEnum for LanguageArg {
    fn value_variants<'a>() -> &'a [Self] {
        &[LanguageArg(Language::English), LanguageArg(Language::French)]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self.0 {
            Language::English => Some(PossibleValue::new("en").help("English")),
            Language::French => Some(PossibleValue::new("fr").help("French")),
        }
    }
}
