//! CLI entry point for kitchen-kompanion.
//!
//! Manages the household recipe collection stored in the shared key-value
//! document: browse and search recipes, check them against household
//! allergies, and push missing ingredients to the grocery list.
//!
//! # Usage
//!
//! ```bash
//! kk [OPTIONS] <COMMAND>
//!
//! # Recipes safe for the active user
//! kk list --safe
//!
//! # Add a recipe
//! kk add --name Pancakes --tags breakfast --ingredient Flour="2 cups" --ingredient Eggs=2
//!
//! # Interactive TUI
//! kk --store ~/kitchen.json tui
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::io::{BufRead, Write};

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{WrapErr, bail};
use kk_core::{
    AllergenScope, AllergyFilter, Config, IngredientDraft, RecipeDetail, RecipeDraft,
    RecipeFilter, match_allergens,
};
use kk_store::{
    FileStore, KeyValueStore, RecipeRepository, StoreError, grocery_list, household, settings,
};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Household recipe manager with allergy warnings.
///
/// Reads and writes the shared household store: recipes, members and their
/// allergies, the inventory and the grocery list.
#[derive(Parser)]
#[command(name = "kk", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// Path to the store document.
    ///
    /// Defaults to `./kitchen-kompanion.json`, or the path in the config file.
    #[arg(short, long, global = true, env = "KK_STORE")]
    store: Option<Utf8PathBuf>,

    /// Path to a JSON configuration file.
    #[arg(short, long, global = true, env = "KK_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List recipes, optionally filtered.
    List {
        /// Only recipes whose name, description or tags contain this text.
        #[arg(short, long)]
        query: Option<String>,

        /// Hide recipes unsafe for the active user, regardless of the saved toggle.
        #[arg(long)]
        safe: bool,
    },

    /// Show a recipe with its allergy warnings.
    Show {
        /// Recipe name.
        name: String,
    },

    /// Add a recipe. An existing recipe with the same name is replaced.
    Add {
        /// Recipe name.
        #[arg(short, long)]
        name: String,

        #[command(flatten)]
        fields: RecipeFields,
    },

    /// Edit a recipe in place.
    Edit {
        /// Name of the recipe to edit.
        name: String,

        /// New name.
        #[arg(long = "name", value_name = "NEW_NAME")]
        rename: Option<String>,

        #[command(flatten)]
        fields: RecipeFields,
    },

    /// Delete a recipe.
    Delete {
        /// Recipe name.
        name: String,

        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete every recipe.
    DeleteAll {
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },

    /// Show allergy warnings for a recipe.
    Warnings {
        /// Recipe name.
        name: String,

        /// Check every household member, ignoring the active user.
        #[arg(long, conflicts_with = "user")]
        all_users: bool,

        /// Check a single member, ignoring the active user.
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Show or change whose allergies are checked.
    User {
        /// Member to select.
        name: Option<String>,

        /// Check the whole household again.
        #[arg(long, conflicts_with = "name")]
        clear: bool,
    },

    /// Show or change the saved allergy filter toggle.
    AllergyFilter {
        /// New state.
        #[arg(value_enum)]
        state: Option<Toggle>,
    },

    /// Add a recipe's missing ingredients to the grocery list.
    Shop {
        /// Recipe name.
        name: String,
    },

    /// Print the grocery list.
    Grocery,

    /// Start the interactive TUI.
    Tui,
}

/// Optional recipe fields shared by `add` and `edit`.
#[derive(Args)]
struct RecipeFields {
    /// Short description.
    #[arg(short, long)]
    description: Option<String>,

    /// Full description or instructions.
    #[arg(long)]
    full_description: Option<String>,

    /// Comma-separated tags.
    #[arg(short, long)]
    tags: Option<String>,

    /// Ingredient as NAME=SIZE. Repeat for each ingredient.
    #[arg(short, long = "ingredient", value_name = "NAME=SIZE", value_parser = parse_ingredient)]
    ingredients: Vec<IngredientDraft>,
}

impl RecipeFields {
    /// Overwrites the fields that were given on the command line.
    fn apply(self, draft: &mut RecipeDraft) {
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(full_description) = self.full_description {
            draft.full_description = full_description;
        }
        if let Some(tags) = self.tags {
            draft.tags = tags;
        }
        if !self.ingredients.is_empty() {
            draft.ingredients = self.ingredients;
        }
    }
}

/// On/off switch.
#[derive(Clone, Copy, ValueEnum)]
enum Toggle {
    /// Enable.
    On,
    /// Disable.
    Off,
}

fn parse_ingredient(value: &str) -> Result<IngredientDraft, String> {
    let (name, size) = value
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=SIZE, got '{value}'"))?;
    let (name, size) = (name.trim(), size.trim());
    if name.is_empty() || size.is_empty() {
        return Err(format!("ingredient name and size must both be set in '{value}'"));
    }
    Ok(IngredientDraft::new(name, size))
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `info` level by default (`warn`
/// while the TUI owns the screen). Logs go to stderr so command output stays
/// clean.
fn init_tracing(verbose: bool, no_color: bool, interactive: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match (verbose, interactive) {
            (true, _) => "debug",
            (false, true) => "warn",
            (false, false) => "info",
        };
        EnvFilter::new(format!("{level},mio=warn"))
    });

    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Builds a [`Config`] from defaults, the config file, then `--store`.
fn build_config(
    config_path: Option<&Utf8PathBuf>,
    store: Option<&Utf8PathBuf>,
) -> color_eyre::Result<Config> {
    let mut config = match config_path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(store) = store {
        config.store.path.clone_from(store);
    }

    config.validate()?;
    Ok(config)
}

fn open_repository(config: &Config) -> color_eyre::Result<RecipeRepository<FileStore>> {
    let store = FileStore::open(config.store.path.clone())?;
    Ok(RecipeRepository::open(store))
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

fn run_list<S: KeyValueStore>(
    repo: &RecipeRepository<S>,
    query: Option<String>,
    safe: bool,
) -> color_eyre::Result<()> {
    let store = repo.store();
    let profile = household::allergy_profile(store);
    let scope = settings::scope(store);
    let enabled = safe || settings::allergy_filter_enabled(store);

    let allergy = AllergyFilter::from_settings(&profile, enabled, scope.user());
    if safe && allergy.is_none() {
        warn!("No active member with allergies; --safe hides nothing");
    }

    let filter = RecipeFilter::new(query.unwrap_or_default()).with_allergy(allergy);
    let visible = filter.visible_indices(repo.recipes());

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    for &index in &visible {
        let Some(recipe) = repo.recipes().get(index) else {
            continue;
        };
        let marker = if match_allergens(&recipe.ingredients, &scope, &profile).is_empty() {
            "   "
        } else {
            "[!]"
        };
        if recipe.tags.trim().is_empty() {
            writeln!(handle, "{marker} {}", recipe.name)?;
        } else {
            writeln!(handle, "{marker} {}  ({})", recipe.name, recipe.tag_list().join(", "))?;
        }
    }

    writeln!(handle)?;
    writeln!(handle, "{} of {} recipes", visible.len(), repo.len())?;
    Ok(())
}

fn run_show<S: KeyValueStore>(repo: &RecipeRepository<S>, name: &str) -> color_eyre::Result<()> {
    let recipe = repo
        .get(name)
        .ok_or_else(|| StoreError::recipe_not_found(name))?;

    let store = repo.store();
    let warnings = match_allergens(
        &recipe.ingredients,
        &settings::scope(store),
        &household::allergy_profile(store),
    );
    let detail = RecipeDetail::build(recipe, &warnings);

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write!(handle, "{detail}")?;
    Ok(())
}

fn run_add<S: KeyValueStore>(
    repo: &mut RecipeRepository<S>,
    name: String,
    fields: RecipeFields,
) -> color_eyre::Result<()> {
    let mut draft = RecipeDraft {
        name,
        ..RecipeDraft::default()
    };
    fields.apply(&mut draft);

    let existed = repo.get(draft.name.trim()).is_some();
    let saved = repo.create(&draft)?.name.clone();

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    if existed {
        writeln!(handle, "Recipe updated: {saved}")?;
    } else {
        writeln!(handle, "Recipe saved: {saved}")?;
    }
    Ok(())
}

fn run_edit<S: KeyValueStore>(
    repo: &mut RecipeRepository<S>,
    name: &str,
    rename: Option<String>,
    fields: RecipeFields,
) -> color_eyre::Result<()> {
    let recipe = repo
        .get(name)
        .ok_or_else(|| StoreError::recipe_not_found(name))?;

    let mut draft = RecipeDraft::from(recipe);
    if let Some(new_name) = rename {
        draft.name = new_name;
    }
    fields.apply(&mut draft);

    let saved = repo.update(name, &draft)?.name.clone();

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "Recipe updated: {saved}")?;
    Ok(())
}

/// Asks a yes/no question on stderr and reads the answer from stdin.
fn confirm(question: &str) -> color_eyre::Result<bool> {
    let stderr = std::io::stderr();
    let mut handle = stderr.lock();
    write!(handle, "{question} [y/N] ")?;
    handle.flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

fn run_delete<S: KeyValueStore>(
    repo: &mut RecipeRepository<S>,
    name: &str,
    yes: bool,
) -> color_eyre::Result<()> {
    if repo.get(name).is_none() {
        bail!("Recipe not found!");
    }

    let stdout = std::io::stdout();
    if !yes && !confirm("Are you sure you want to delete this recipe?")? {
        writeln!(stdout.lock(), "Cancelled")?;
        return Ok(());
    }

    if !repo.delete(name)? {
        bail!("Recipe not found!");
    }
    writeln!(stdout.lock(), "Recipe deleted")?;
    Ok(())
}

fn run_delete_all<S: KeyValueStore>(
    repo: &mut RecipeRepository<S>,
    yes: bool,
) -> color_eyre::Result<()> {
    let stdout = std::io::stdout();
    if !yes && !confirm("Are you sure you want to delete all recipes?")? {
        writeln!(stdout.lock(), "Cancelled")?;
        return Ok(());
    }

    repo.delete_all()?;
    writeln!(stdout.lock(), "All recipes have been deleted.")?;
    Ok(())
}

fn run_warnings<S: KeyValueStore>(
    repo: &RecipeRepository<S>,
    name: &str,
    all_users: bool,
    user: Option<String>,
) -> color_eyre::Result<()> {
    let recipe = repo
        .get(name)
        .ok_or_else(|| StoreError::recipe_not_found(name))?;

    let store = repo.store();
    let profile = household::allergy_profile(store);
    let scope = if all_users {
        AllergenScope::AllUsers
    } else if let Some(user) = user {
        AllergenScope::SingleUser(user)
    } else {
        settings::scope(store)
    };

    if let Some(user) = scope.user() {
        if profile.member(user).is_none() {
            warn!(user, "Not a household member; no allergens apply");
        }
    }

    let warnings = match_allergens(&recipe.ingredients, &scope, &profile);

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "Checking {} for {scope}", recipe.name)?;
    if warnings.is_empty() {
        writeln!(handle, "No allergy warnings.")?;
    }
    for warning in &warnings {
        writeln!(handle, "  ! {warning}")?;
    }
    Ok(())
}

fn run_user<S: KeyValueStore>(
    repo: &mut RecipeRepository<S>,
    name: Option<String>,
    clear: bool,
) -> color_eyre::Result<()> {
    let profile = household::allergy_profile(repo.store());

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    if clear || name.is_some() {
        let user = if clear { None } else { name };
        if let Some(user) = &user {
            if profile.member(user).is_none() {
                warn!(user = %user, "Not a household member; no allergens will apply");
            }
        }
        settings::set_active_user(repo.store_mut(), user.as_deref())?;
        let scope = AllergenScope::from_active_user(user);
        writeln!(handle, "Showing allergy warnings for {scope}")?;
        return Ok(());
    }

    writeln!(handle, "Active: {}", settings::scope(repo.store()))?;
    if profile.members().is_empty() {
        writeln!(handle, "No household members")?;
    }
    for member in profile.members() {
        if member.has_allergies() {
            writeln!(handle, "  {}: {}", member.name, member.allergies.join(", "))?;
        } else {
            writeln!(handle, "  {}: no allergies", member.name)?;
        }
    }
    Ok(())
}

fn run_allergy_filter<S: KeyValueStore>(
    repo: &mut RecipeRepository<S>,
    state: Option<Toggle>,
) -> color_eyre::Result<()> {
    if let Some(state) = state {
        settings::set_allergy_filter_enabled(repo.store_mut(), matches!(state, Toggle::On))?;
    }

    let store = repo.store();
    let enabled = settings::allergy_filter_enabled(store);
    let applies = AllergyFilter::from_settings(
        &household::allergy_profile(store),
        enabled,
        settings::active_user(store).as_deref(),
    );

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    match (enabled, applies) {
        (false, _) => writeln!(handle, "Allergy filter off")?,
        (true, Some(filter)) => writeln!(
            handle,
            "Allergy filter on: showing recipes safe for {}",
            filter.user()
        )?,
        (true, None) => writeln!(
            handle,
            "Allergy filter on, but no active member with allergies; nothing is hidden"
        )?,
    }
    Ok(())
}

fn run_shop<S: KeyValueStore>(
    repo: &mut RecipeRepository<S>,
    name: &str,
) -> color_eyre::Result<()> {
    let ingredients = repo
        .get(name)
        .ok_or_else(|| StoreError::recipe_not_found(name))?
        .ingredients
        .to_vec();

    let outcome = grocery_list::add_missing(repo.store_mut(), &ingredients)?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    if outcome.added.is_empty() {
        writeln!(
            handle,
            "Nothing to add ({} in inventory, {} already listed)",
            outcome.in_inventory, outcome.already_listed
        )?;
        return Ok(());
    }

    writeln!(handle, "Added {} items to grocery list", outcome.added_count())?;
    for item in &outcome.added {
        writeln!(handle, "  - {item}")?;
    }
    Ok(())
}

fn run_grocery<S: KeyValueStore>(repo: &RecipeRepository<S>) -> color_eyre::Result<()> {
    let items = grocery_list::items(repo.store());

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    if items.is_empty() {
        writeln!(handle, "Grocery list is empty")?;
    }
    for item in &items {
        writeln!(handle, "- {}", item.name)?;
    }
    Ok(())
}

/// Runs the interactive TUI until the user quits or SIGTERM arrives.
async fn run_tui(config: Config, repo: RecipeRepository<FileStore>) -> color_eyre::Result<()> {
    info!(store = %config.store.path, recipes = repo.len(), "Starting TUI");

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigterm = signal(SignalKind::terminate())?;

        tokio::select! {
            result = kk_tui::run(config, repo) => {
                tui_result(result)?;
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down");
            }
        }
    }

    #[cfg(not(unix))]
    {
        tui_result(kk_tui::run(config, repo).await)?;
    }

    Ok(())
}

/// Wraps a TUI failure, keeping its cause chain for the report.
fn tui_result(result: Result<(), kk_tui::TuiError>) -> color_eyre::Result<()> {
    result.wrap_err("TUI error")
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    init_tracing(
        cli.verbose,
        cli.no_color,
        matches!(cli.command, Commands::Tui),
    );

    let config = build_config(cli.config.as_ref(), cli.store.as_ref())?;
    let mut repo = open_repository(&config)?;

    match cli.command {
        Commands::List { query, safe } => run_list(&repo, query, safe),
        Commands::Show { name } => run_show(&repo, &name),
        Commands::Add { name, fields } => run_add(&mut repo, name, fields),
        Commands::Edit {
            name,
            rename,
            fields,
        } => run_edit(&mut repo, &name, rename, fields),
        Commands::Delete { name, yes } => run_delete(&mut repo, &name, yes),
        Commands::DeleteAll { yes } => run_delete_all(&mut repo, yes),
        Commands::Warnings {
            name,
            all_users,
            user,
        } => run_warnings(&repo, &name, all_users, user),
        Commands::User { name, clear } => run_user(&mut repo, name, clear),
        Commands::AllergyFilter { state } => run_allergy_filter(&mut repo, state),
        Commands::Shop { name } => run_shop(&mut repo, &name),
        Commands::Grocery => run_grocery(&repo),
        Commands::Tui => run_tui(config, repo).await,
    }
}
