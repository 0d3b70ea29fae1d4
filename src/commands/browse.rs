//! Interactive line-based storefront.
//!
//! Plain text is fed to the search box and applied after the debounce delay.
//! Lines starting with `:` are commands.

use std::path::Path;

use owo_colors::OwoColorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::{self, error::RecvError};

use super::open_catalog;
use crate::catalog::CatalogStore;
use crate::detail::DetailLoader;
use crate::display::{format_listing, format_product_detail};
use crate::error::{Result, StorefrontError};
use crate::events::{EventBus, StoreEvent};
use crate::paginator::PageControlKind;
use crate::remote::CatalogSource;
use crate::types::ProductId;

const HELP: &str = "\
Type to search by title. Commands:
  :n, :next          next page
  :p, :prev          previous page
  :first, :last      first / last page
  :page N            go to page N
  :clear             clear the search
  :retry             reload the catalog
  :open ID           show a product
  :img N             select image N in the product view
  :+, :-             change quantity
  :back              back to the listing
  :q, :quit          exit";

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    /// Redraw the current screen
    Refresh,
    Search(String),
    Page(PageControlKind),
    GoTo(usize),
    Clear,
    Retry,
    Open(ProductId),
    /// 1-based image number
    Image(usize),
    Quantity(i64),
    Back,
    Help,
    Quit,
}

/// Parse one line of input.
pub fn parse_browse_input(line: &str) -> Result<BrowseCommand> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(BrowseCommand::Refresh);
    }

    let Some(command) = line.strip_prefix(':') else {
        return Ok(BrowseCommand::Search(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    let cmd = match (name, arg) {
        ("n" | "next", None) => BrowseCommand::Page(PageControlKind::Next),
        ("p" | "prev", None) => BrowseCommand::Page(PageControlKind::Previous),
        ("first", None) => BrowseCommand::Page(PageControlKind::First),
        ("last", None) => BrowseCommand::Page(PageControlKind::Last),
        ("page", Some(n)) => BrowseCommand::GoTo(parse_arg(name, n)?),
        ("clear", None) => BrowseCommand::Clear,
        ("retry", None) => BrowseCommand::Retry,
        ("open", Some(id)) => BrowseCommand::Open(parse_arg(name, id)?),
        ("img", Some(n)) => match parse_arg::<usize>(name, n)? {
            0 => {
                return Err(StorefrontError::InvalidInput(
                    "images are numbered from 1".to_string(),
                ));
            }
            n => BrowseCommand::Image(n),
        },
        ("+", None) => BrowseCommand::Quantity(1),
        ("-", None) => BrowseCommand::Quantity(-1),
        ("back", None) => BrowseCommand::Back,
        ("h" | "help", None) => BrowseCommand::Help,
        ("q" | "quit", None) => BrowseCommand::Quit,
        _ => {
            return Err(StorefrontError::InvalidInput(format!(
                "unknown command ':{command}' (type :help)"
            )));
        }
    };
    Ok(cmd)
}

fn parse_arg<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| StorefrontError::InvalidInput(format!("invalid argument for :{name}: '{value}'")))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Listing,
    Detail,
}

/// Listing and detail stores of one interactive session
struct BrowseSession<S> {
    catalog: CatalogStore<S>,
    detail: DetailLoader<S>,
    screen: Screen,
}

impl<S: CatalogSource + Clone> BrowseSession<S> {
    fn new(catalog: CatalogStore<S>) -> Self {
        let detail = DetailLoader::new(catalog.source().clone());
        Self {
            catalog,
            detail,
            screen: Screen::Listing,
        }
    }

    fn with_events(mut self, events: EventBus) -> Self {
        self.catalog = self.catalog.with_events(events.clone());
        self.detail = self.detail.with_events(events);
        self
    }

    async fn reload(&mut self) {
        // The failure is shown through the listing's empty state
        if let Err(e) = self.catalog.load().await {
            tracing::debug!("catalog load failed: {e}");
        }
    }

    /// Apply a command. Returns false when the session should end.
    async fn handle(&mut self, command: BrowseCommand) -> bool {
        match command {
            BrowseCommand::Quit => return false,
            BrowseCommand::Refresh | BrowseCommand::Help => {}
            BrowseCommand::Search(text) => {
                self.screen = Screen::Listing;
                self.catalog.set_search_term(text);
            }
            BrowseCommand::Clear => {
                self.screen = Screen::Listing;
                self.catalog.clear_search();
            }
            BrowseCommand::Page(kind) => {
                self.screen = Screen::Listing;
                self.catalog.activate(kind);
            }
            BrowseCommand::GoTo(page) => {
                self.screen = Screen::Listing;
                self.catalog.set_page(page);
            }
            BrowseCommand::Retry => {
                self.screen = Screen::Listing;
                self.reload().await;
            }
            BrowseCommand::Open(id) => {
                self.screen = Screen::Detail;
                self.detail.open(id).await;
            }
            BrowseCommand::Image(n) => {
                if self.screen == Screen::Detail {
                    self.detail.select_image(n.saturating_sub(1));
                }
            }
            BrowseCommand::Quantity(delta) => {
                if self.screen == Screen::Detail {
                    self.detail.change_quantity(delta);
                }
            }
            BrowseCommand::Back => self.screen = Screen::Listing,
        }
        true
    }

    fn render(&self) -> String {
        match self.screen {
            Screen::Listing => format_listing(&self.catalog.view()),
            Screen::Detail => format_product_detail(&self.detail.view()),
        }
    }
}

/// Trace store events until the bus closes. Returns how many were logged.
async fn log_events(mut rx: broadcast::Receiver<StoreEvent>) -> usize {
    let mut logged = 0;
    loop {
        match rx.recv().await {
            Ok(event) => {
                tracing::debug!(?event, "store event");
                logged += 1;
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "event log fell behind");
            }
            Err(RecvError::Closed) => break,
        }
    }
    logged
}

fn redraw<S: CatalogSource + Clone>(session: &BrowseSession<S>) {
    println!("\n{}", "─".repeat(40).dimmed());
    println!("{}", session.render());
}

/// Browse the catalog interactively from stdin
pub async fn cmd_browse(fixture: Option<&Path>) -> Result<()> {
    let (config, catalog) = open_catalog(fixture)?;
    let events = EventBus::new();
    let store = CatalogStore::from_config(catalog, &config);
    let mut session = BrowseSession::new(store).with_events(events.clone());

    let event_log = tokio::spawn(log_events(events.subscribe()));

    let mut updates = session.catalog.search_updates();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", "Type to search, :help for commands".dimmed());
    session.reload().await;
    redraw(&session);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_browse_input(&line) {
                    Ok(BrowseCommand::Help) => println!("{HELP}"),
                    Ok(command) => {
                        let is_search = matches!(command, BrowseCommand::Search(_) | BrowseCommand::Clear);
                        if !session.handle(command).await {
                            break;
                        }
                        // Search results are drawn once the debounce settles
                        if !is_search {
                            redraw(&session);
                        }
                    }
                    Err(e) => eprintln!("{}", e.to_string().red()),
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let term = updates.borrow_and_update().clone();
                session.catalog.apply_search(term);
                if session.screen == Screen::Listing {
                    redraw(&session);
                }
            }
        }
    }

    event_log.abort();
    Ok(())
}
