//! Interactive command loop

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use pawmatch_client::SortOrder;
use pawmatch_core::{
    App, DogCard, MatchModal, MatchOutcome, PageDirection, ResultsHeader, SearchOutcome,
    SearchSession, View,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

pub const HELP: &str = "\
Commands:
  login <name> <email>   log in (the last word is the email)
  breeds                 list breeds
  breed <name>           add a breed filter
  unbreed <name>         remove a breed filter
  age-min <n|->          minimum age, '-' clears
  age-max <n|->          maximum age, '-' clears
  zip <code|->           zip code filter, '-' clears
  sort asc|desc          breed sort order
  search                 search from the first page
  next / prev            change page
  fav <id>               toggle a favorite on the current page
  favorites              list favorite ids
  match                  generate a match from your favorites
  close / show           close or reopen the match announcement
  logout                 log out
  help                   this text
  quit                   exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { name: String, email: String },
    Breeds,
    Breed { name: String, selected: bool },
    AgeMin(Option<u32>),
    AgeMax(Option<u32>),
    Zip(Option<String>),
    Sort(SortOrder),
    Search,
    Next,
    Prev,
    Favorite(String),
    Favorites,
    Match,
    Close,
    Show,
    Logout,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCommandError(String);

impl fmt::Display for ParseCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (type 'help' for commands)", self.0)
    }
}

impl std::error::Error for ParseCommandError {}

fn usage(text: &str) -> ParseCommandError {
    ParseCommandError(format!("usage: {}", text))
}

/// `-` clears the value
fn parse_age(arg: &str, text: &str) -> Result<Option<u32>, ParseCommandError> {
    match arg {
        "-" => Ok(None),
        v => v.parse().map(Some).map_err(|_| usage(text)),
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match (word, rest) {
            ("login", rest) => {
                let (name, email) = rest
                    .rsplit_once(char::is_whitespace)
                    .ok_or_else(|| usage("login <name> <email>"))?;
                Command::Login {
                    name: name.trim().to_string(),
                    email: email.to_string(),
                }
            }
            ("breeds", "") => Command::Breeds,
            ("breed", name) if !name.is_empty() => Command::Breed {
                name: name.to_string(),
                selected: true,
            },
            ("unbreed", name) if !name.is_empty() => Command::Breed {
                name: name.to_string(),
                selected: false,
            },
            ("breed" | "unbreed", _) => return Err(usage("breed|unbreed <name>")),
            ("age-min", arg) => Command::AgeMin(parse_age(arg, "age-min <n|->")?),
            ("age-max", arg) => Command::AgeMax(parse_age(arg, "age-max <n|->")?),
            ("zip", "") => return Err(usage("zip <code|->")),
            ("zip", "-") => Command::Zip(None),
            ("zip", code) => Command::Zip(Some(code.to_string())),
            ("sort", order) => Command::Sort(order.parse().map_err(|_| usage("sort asc|desc"))?),
            ("search", "") => Command::Search,
            ("next", "") => Command::Next,
            ("prev", "") => Command::Prev,
            ("fav", id) if !id.is_empty() => Command::Favorite(id.to_string()),
            ("fav", _) => return Err(usage("fav <id>")),
            ("favorites", "") => Command::Favorites,
            ("match", "") => Command::Match,
            ("close", "") => Command::Close,
            ("show", "") => Command::Show,
            ("logout", "") => Command::Logout,
            ("help", _) => Command::Help,
            ("quit" | "exit", "") => Command::Quit,
            _ => return Err(ParseCommandError(format!("unknown command: {}", line))),
        };
        Ok(command)
    }
}

/// Run the loop until `quit` or end of input
pub async fn run(app: &mut App) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", HELP);
    prompt(app);
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            prompt(app);
            continue;
        }

        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => {
                debug!("Running command: {:?}", command);
                execute(app, command).await;
            }
            Err(e) => println!("{}", e),
        }

        print_notifications(app);
        prompt(app);
    }
    Ok(())
}

/// Destructive notifications go to stderr, the rest to stdout
pub fn print_notifications(app: &mut App) {
    for notification in app.drain_notifications() {
        if notification.is_destructive() {
            eprintln!("{}", notification);
        } else {
            println!("{}", notification);
        }
    }
}

fn prompt(app: &App) {
    match app.view() {
        View::Login => print!("login> "),
        View::Search => print!("search> "),
    }
    let _ = std::io::stdout().flush();
}

async fn execute(app: &mut App, command: Command) {
    match command {
        Command::Login { name, email } => {
            if app.view() == View::Search {
                println!("Already logged in; 'logout' first.");
                return;
            }
            app.login(&name, &email).await;
            if let Some(session) = app.session() {
                print_results(session);
            }
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
        command => {
            if app.session().is_none() {
                println!("Log in first: login <name> <email>");
                return;
            }
            execute_search_command(app, command).await;
        }
    }
}

async fn execute_search_command(app: &mut App, command: Command) {
    match command {
        Command::Search => {
            if let Some(outcome) = app.search().await {
                report_search(app, outcome);
            }
        }
        Command::Next | Command::Prev => {
            let direction = if command == Command::Next {
                PageDirection::Next
            } else {
                PageDirection::Prev
            };
            if let Some(outcome) = app.turn_page(direction).await {
                report_search(app, outcome);
            }
        }
        Command::Match => match app.request_match().await {
            Some(MatchOutcome::Matched(_)) => {
                if let Some(session) = app.session() {
                    print_match(session);
                }
            }
            Some(MatchOutcome::Unresolved(id)) => {
                println!("Matched dog {} could not be loaded.", id)
            }
            _ => {}
        },
        Command::Logout => app.logout().await,
        command => {
            if let Some(session) = app.session() {
                edit_session(session, command);
            }
        }
    }
}

/// Commands that touch only local session state
fn edit_session(session: &SearchSession, command: Command) {
    match command {
        Command::Breeds => {
            let snapshot = session.snapshot();
            for breed in &snapshot.breeds {
                let mark = if snapshot.filters.breeds.contains(breed) { "x" } else { " " };
                println!("[{}] {}", mark, breed);
            }
        }
        Command::Breed { name, selected } => {
            session.set_breed(&name, selected);
            println!("Breeds: {}", join(session.filters().breeds.iter()));
        }
        Command::AgeMin(v) => session.set_age_min(v),
        Command::AgeMax(v) => session.set_age_max(v),
        Command::Zip(v) => session.set_zip_code(v.as_deref()),
        Command::Sort(order) => session.set_sort(order),
        Command::Favorite(id) => toggle_on_page(session, &id),
        Command::Favorites => {
            let favorites = session.favorites();
            println!("{} Favorites: {}", favorites.len(), join(favorites.iter()));
        }
        Command::Close => session.close_match_modal(),
        Command::Show => {
            if session.reopen_match_modal() {
                print_match(session);
            } else {
                println!("No match yet.");
            }
        }
        _ => {}
    }
}

fn join<S: AsRef<str>>(items: impl Iterator<Item = S>) -> String {
    items
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The heart button exists only on cards of the current page
fn toggle_on_page(session: &SearchSession, id: &str) {
    let dogs = session.dogs();
    let Some(dog) = dogs.iter().find(|d| d.id == id) else {
        println!("No dog {} on this page.", id);
        return;
    };

    let is_favorite = session.favorites().contains(&dog.id);
    let mut card = DogCard::new(dog, is_favorite, |id: &str| {
        session.toggle_favorite(id);
    });
    card.toggle_favorite();

    let is_favorite = session.favorites().contains(&dog.id);
    println!("{}", DogCard::new(dog, is_favorite, |_: &str| {}));
}

fn report_search(app: &App, outcome: SearchOutcome) {
    if matches!(outcome, SearchOutcome::Loaded { .. }) {
        if let Some(session) = app.session() {
            print_results(session);
        }
    } else if let Some(message) = search_message(&outcome) {
        println!("{}", message);
    }
}

/// Status line for outcomes that carry no results or notification
fn search_message(outcome: &SearchOutcome) -> Option<&'static str> {
    match outcome {
        SearchOutcome::NoPage => Some("No page in that direction."),
        // Expiry is silent; the prompt shows the return to login.
        SearchOutcome::SessionExpired
        | SearchOutcome::Stale
        | SearchOutcome::Loaded { .. }
        | SearchOutcome::Failed(_) => None,
    }
}

fn print_results(session: &SearchSession) {
    let snapshot = session.snapshot();
    let header = ResultsHeader {
        total: snapshot.total,
        page: snapshot.page,
        has_prev: snapshot.has_prev,
        has_next: snapshot.has_next,
        favorites: snapshot.favorites.len(),
    };
    println!("{}", header);

    if snapshot.dogs.is_empty() && !snapshot.loading {
        println!("{}", ResultsHeader::EMPTY_MESSAGE);
        return;
    }
    for dog in &snapshot.dogs {
        let card = DogCard::new(dog, snapshot.favorites.contains(&dog.id), |_: &str| {});
        println!("{}", card);
    }
}

fn print_match(session: &SearchSession) {
    let snapshot = session.snapshot();
    let Some(dog) = snapshot.matched.as_ref() else {
        return;
    };
    let modal = MatchModal::new(dog, snapshot.match_modal_open, || session.close_match_modal());
    if let Some(text) = modal.render() {
        println!("{}", text);
        println!("(type 'close' to keep browsing)");
    }
}
