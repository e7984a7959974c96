use clap::{ArgAction, Parser, Subcommand};
use commands::{clear, favourites, movies, profile, session};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "myflix")]
#[command(about = "myFlix - browse the movie catalogue and keep your favourites in sync")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new myFlix account
    #[command(long_about = "Register a new account with the myFlix API. Prompts for any details not supplied as flags. Registration does not log you in; run 'myflix login' afterwards.")]
    Register {
        /// Username (if not provided, will prompt)
        #[arg(long)]
        username: Option<String>,

        /// Email address (if not provided, will prompt)
        #[arg(long)]
        email: Option<String>,

        /// Birthday in YYYY-MM-DD format (optional)
        #[arg(long)]
        birthday: Option<String>,
    },
    /// Log in and store the session
    #[command(long_about = "Log in to the myFlix API. On success the bearer token and your user profile are stored locally and reused by every other command until you log out.")]
    Login {
        /// Username (if not provided, will prompt)
        #[arg(long)]
        username: Option<String>,
    },
    /// Log out and forget the stored session
    Logout,
    /// Browse the movie catalogue
    #[command(long_about = "List the movie catalogue, or show the details of a single movie. Listing serves from the local catalogue cache when possible; use --refresh to force a fetch from the API.")]
    Movies {
        /// Fetch a fresh catalogue from the API instead of using the cache
        #[arg(long, action = ArgAction::SetTrue)]
        refresh: bool,

        #[command(subcommand)]
        cmd: Option<MoviesCommands>,
    },
    /// List the catalogue's genres
    Genres {
        /// Fetch fresh genres from the API instead of using the cache
        #[arg(long, action = ArgAction::SetTrue)]
        refresh: bool,
    },
    /// Manage your favourite movies
    #[command(long_about = "List, add, remove, or toggle favourite movies. Movies are referred to by title; titles are resolved against the catalogue cache, fetching it if needed. Running without a subcommand lists your favourites.")]
    Favourites {
        #[command(subcommand)]
        cmd: Option<FavouritesCommands>,
    },
    /// View or modify your user profile
    #[command(long_about = "Show, edit, or delete your user profile. Running without a subcommand shows the profile.")]
    Profile {
        #[command(subcommand)]
        cmd: Option<ProfileCommands>,
    },
    /// Clear cached data
    #[command(long_about = "Clear the local catalogue cache, the stored session, or both. Use --cache, --session, or --all.")]
    Clear {
        /// Clear both cache and session
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,

        /// Clear the catalogue cache
        #[arg(long, action = ArgAction::SetTrue)]
        cache: bool,

        /// Clear the stored session (same as logout)
        #[arg(long, action = ArgAction::SetTrue)]
        session: bool,
    },
}

#[derive(Subcommand)]
enum MoviesCommands {
    /// Show synopsis, genre, and director details for one movie
    Show {
        /// Movie title (case-insensitive)
        title: String,
    },
    /// Show a director's bio and dates
    Director {
        /// Director name
        name: String,
    },
}

#[derive(Subcommand)]
enum FavouritesCommands {
    /// List your favourite movies
    List,
    /// Add a movie to your favourites
    Add {
        /// Movie title (case-insensitive)
        title: String,
    },
    /// Remove a movie from your favourites
    Remove {
        /// Movie title (case-insensitive)
        title: String,
    },
    /// Add the movie if it is not a favourite, remove it if it is
    Toggle {
        /// Movie title (case-insensitive)
        title: String,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Show your profile
    Show,
    /// Edit profile fields
    #[command(long_about = "Edit profile fields. Fields given as flags are updated directly; with no flags an interactive prompt walks through each field, keeping the current value when left blank.")]
    Edit {
        /// New username
        #[arg(long)]
        username: Option<String>,

        /// Prompt for a new password
        #[arg(long, action = ArgAction::SetTrue)]
        password: bool,

        /// New email address
        #[arg(long)]
        email: Option<String>,

        /// New birthday in YYYY-MM-DD format
        #[arg(long)]
        birthday: Option<String>,
    },
    /// Delete your account permanently
    Delete {
        /// Skip the confirmation prompt
        #[arg(long, action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movies_refresh_flag_applies_to_show_subcommand() {
        let cli = Cli::try_parse_from(["myflix", "movies", "--refresh", "show", "Heat"]).unwrap();
        match cli.command {
            Commands::Movies { refresh, cmd } => {
                assert!(refresh);
                assert!(matches!(cmd, Some(MoviesCommands::Show { ref title }) if title == "Heat"));
            }
            _ => panic!("expected movies command"),
        }
    }

    #[test]
    fn test_movies_refresh_flag_defaults_off() {
        let cli = Cli::try_parse_from(["myflix", "movies"]).unwrap();
        match cli.command {
            Commands::Movies { refresh, cmd } => {
                assert!(!refresh);
                assert!(cmd.is_none());
            }
            _ => panic!("expected movies command"),
        }
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Register {
            username,
            email,
            birthday,
        } => session::run_register(username, email, birthday, &output).await,
        Commands::Login { username } => session::run_login(username, &output).await,
        Commands::Logout => session::run_logout(&output),
        Commands::Movies { refresh, cmd } => match cmd {
            None => movies::run_list(refresh, &output).await,
            Some(MoviesCommands::Show { title }) => {
                movies::run_show(&title, refresh, &output).await
            }
            Some(MoviesCommands::Director { name }) => movies::run_director(&name, &output).await,
        },
        Commands::Genres { refresh } => movies::run_genres(refresh, &output).await,
        Commands::Favourites { cmd } => match cmd.unwrap_or(FavouritesCommands::List) {
            FavouritesCommands::List => favourites::run_list(&output).await,
            FavouritesCommands::Add { title } => favourites::run_add(&title, &output).await,
            FavouritesCommands::Remove { title } => favourites::run_remove(&title, &output).await,
            FavouritesCommands::Toggle { title } => favourites::run_toggle(&title, &output).await,
        },
        Commands::Profile { cmd } => match cmd.unwrap_or(ProfileCommands::Show) {
            ProfileCommands::Show => profile::run_show(&output).await,
            ProfileCommands::Edit {
                username,
                password,
                email,
                birthday,
            } => profile::run_edit(username, password, email, birthday, &output).await,
            ProfileCommands::Delete { yes } => profile::run_delete(yes, &output).await,
        },
        Commands::Clear {
            all,
            cache,
            session,
        } => clear::run_clear(all, cache, session, &output),
    }
}
