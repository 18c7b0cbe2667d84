//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::{sample_org, Verifier};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{build_tree, stringify, OrgTree, Person, TreeDisplay};
use crate::infrastructure::load_roster;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!(?settings, "settings loaded");

    match &cli.command {
        Some(Commands::Check {
            rounds,
            seed,
            roster,
            expected,
        }) => {
            let verifier = verifier(roster.as_deref(), expected.as_deref(), &settings)?;
            check(
                &verifier,
                rounds.unwrap_or(settings.shuffle_rounds),
                seed.or(settings.seed),
            )
        }
        Some(Commands::Show { roster }) => show(roster.as_deref(), &settings),
        Some(Commands::Stringify { roster }) => stringify_cmd(roster.as_deref(), &settings),
        Some(Commands::Config { command }) => config_cmd(command, &settings),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

/// CEO name of a canonical string: everything before the first brace.
fn root_of(expected: &str) -> &str {
    expected.split('{').next().unwrap_or(expected)
}

/// Verifier for a roster, or for the sample org when no roster is given.
///
/// Without `expected`, a roster is checked against its own declared-order build.
fn verifier(
    roster: Option<&Path>,
    expected: Option<&str>,
    settings: &Settings,
) -> CliResult<Verifier> {
    let Some(path) = roster.or(settings.roster.as_deref()) else {
        return Ok(match expected {
            Some(expected) => Verifier::new(sample_org(), expected, root_of(expected)),
            None => Verifier::sample(),
        });
    };

    let people = load_roster(path)?;
    let expected = match expected {
        Some(expected) => expected.to_string(),
        None => stringify(&build_tree(&people)?)?,
    };
    let root = root_of(&expected).to_string();
    debug!(%expected, %root, "checking roster");
    Ok(Verifier::new(people, expected, root))
}

#[instrument(skip(verifier))]
fn check(verifier: &Verifier, rounds: u32, seed: Option<u64>) -> CliResult<()> {
    let outcome = verifier.run_seeded(rounds, seed);
    if outcome.success {
        output::passed("Test Passed!");
        return Ok(());
    }
    let message = outcome.message.unwrap_or_default();
    output::failed("Test Failed:", &message);
    Err(CliError::CheckFailed(message))
}

/// People from `--roster`, the configured roster, or the sample org.
fn load_people(roster: Option<&Path>, settings: &Settings) -> CliResult<Vec<Person>> {
    match roster.or(settings.roster.as_deref()) {
        Some(path) => Ok(load_roster(path)?),
        None => Ok(sample_org()),
    }
}

fn build(roster: Option<&Path>, settings: &Settings) -> CliResult<OrgTree> {
    let people = load_people(roster, settings)?;
    let tree = build_tree(&people)?;
    for person in tree.detached() {
        output::warning(&format!("not reachable from the CEO: {}", person.name()));
    }
    Ok(tree)
}

#[instrument(skip(settings))]
fn show(roster: Option<&Path>, settings: &Settings) -> CliResult<()> {
    let tree = build(roster, settings)?;
    output::info(&tree.to_display_tree());
    output::detail(&format!("{} people, depth {}", tree.len(), tree.depth()));
    Ok(())
}

#[instrument(skip(settings))]
fn stringify_cmd(roster: Option<&Path>, settings: &Settings) -> CliResult<()> {
    let tree = build(roster, settings)?;
    output::info(&stringify(&tree)?);
    Ok(())
}

fn config_cmd(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no config directory available"),
        },
        ConfigCommands::Init => output::info(&Settings::template()),
    }
    Ok(())
}
