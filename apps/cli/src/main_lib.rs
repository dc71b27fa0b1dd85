use std::sync::Arc;

use anyhow::Context;
use metafam_core::guilds::{GuildService, GuildServiceTrait, GuildType, NewGuild};
use metafam_core::links::{LinkService, LinkServiceTrait, LinkType, NewPlayerLink};
use metafam_core::search::{KeyPress, ResultSection, SearchOption, SearchSession};
use metafam_core::{Error, SearchBackend, SearchModal, SearchPhase, StoreState};
use metafam_graphql::{
    GraphQlClient, GraphQlGuildRepository, GraphQlLinkRepository, GraphQlSearchBackend,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false).with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

/// One line of terminal input.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    /// Same as pressing ⌘K.
    Toggle,
    Open,
    Close,
    Submit,
    Select(usize),
    SeeAll(usize),
    Links(String),
    AddLink(String, NewPlayerLink),
    DeleteLink(String),
    AddGuild(NewGuild),
    Help,
    Quit,
    /// Anything else replaces the search input.
    Input(String),
}

impl Command {
    fn parse(line: &str) -> Result<Command, String> {
        let Some(rest) = line.strip_prefix(':') else {
            return Ok(Command::Input(line.to_string()));
        };
        let mut parts = rest.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let mut arg = |name: &str| {
            parts
                .next()
                .map(str::to_string)
                .ok_or_else(|| format!("missing <{}>", name))
        };

        match command {
            "k" => Ok(Command::Toggle),
            "open" => Ok(Command::Open),
            "close" => Ok(Command::Close),
            "submit" => Ok(Command::Submit),
            "select" => index(&arg("n")?).map(Command::Select),
            "all" => index(&arg("n")?).map(Command::SeeAll),
            "links" => Ok(Command::Links(arg("player")?)),
            "addlink" => {
                let player = arg("player")?;
                let link_type = arg("type")?;
                let link_type = link_type
                    .parse::<LinkType>()
                    .map_err(|e| e.message().to_string())?;
                let url = arg("url").unwrap_or_default();
                let name = parts.collect::<Vec<_>>().join(" ");
                Ok(Command::AddLink(
                    player,
                    NewPlayerLink {
                        name,
                        url,
                        link_type: Some(link_type),
                    },
                ))
            }
            "rmlink" => Ok(Command::DeleteLink(arg("link")?)),
            "addguild" => {
                let guildname = arg("guildname")?;
                let guild_type = arg("type")?
                    .parse::<GuildType>()
                    .map_err(|e| e.message().to_string())?;
                let name = parts.collect::<Vec<_>>().join(" ");
                Ok(Command::AddGuild(NewGuild {
                    guildname,
                    name,
                    guild_type: Some(guild_type),
                    ..Default::default()
                }))
            }
            "help" => Ok(Command::Help),
            "q" | "quit" => Ok(Command::Quit),
            other => Err(format!("unknown command ':{}'", other)),
        }
    }
}

fn index(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("expected a number from 1, got '{}'", raw)),
    }
}

const HELP: &str = "\
Type to search. Commands:
  :k                      open or close the search modal
  :open | :close          show or hide the search modal
  :submit                 search page for the current input
  :select <n>             open the n-th result
  :all <n>                follow the n-th \"See all\" link
  :links <player>         list a player's links
  :addlink <player> <type> <url> [name]
  :rmlink <link>
  :addguild <guildname> <type> <name>
  :quit";

fn render_sections(sections: &[ResultSection]) -> String {
    if sections.is_empty() {
        return "No results".to_string();
    }
    let mut out = String::new();
    let mut n = 0;
    for section in sections {
        out.push_str(&format!("{}\n", section.title));
        for option in &section.options {
            n += 1;
            out.push_str(&format!("  {:>2}. {}  {}\n", n, option.text, option.href));
        }
        if let Some(see_all) = &section.see_all {
            out.push_str(&format!("      {} -> {}\n", see_all.label, see_all.href));
        }
    }
    out.trim_end().to_string()
}

fn nth_option(sections: &[ResultSection], n: usize) -> Option<SearchOption> {
    sections.iter().flat_map(|s| s.options.iter()).nth(n).cloned()
}

fn render_state(state: &StoreState, sections: &[ResultSection]) -> Option<String> {
    match state.phase {
        SearchPhase::Loading => Some("Searching...".to_string()),
        SearchPhase::Settled => Some(render_sections(sections)),
        SearchPhase::Idle | SearchPhase::Debouncing => None,
    }
}

async fn next_update(updates: &mut Option<watch::Receiver<StoreState>>) -> bool {
    match updates.as_mut() {
        Some(rx) => rx.changed().await.is_ok(),
        None => std::future::pending().await,
    }
}

fn describe(err: &Error) -> String {
    match err {
        Error::Validation(e) => format!("{}: {}", e.field(), e.message()),
        other => other.to_string(),
    }
}

pub async fn run(config: Config) -> anyhow::Result<()> {
    let client = GraphQlClient::with_options(
        config.graphql_url.as_str(),
        config.request_timeout,
        config.graphql_token.as_deref(),
    )
    .context("Failed to create GraphQL client")?;

    let backend: Arc<dyn SearchBackend> = Arc::new(GraphQlSearchBackend::new(client.clone()));
    let links = LinkService::new(Arc::new(GraphQlLinkRepository::new(client.clone())));
    let guilds = GuildService::new(Arc::new(GraphQlGuildRepository::new(client)));
    let mut modal = SearchModal::new(backend, config.search);
    let mut updates: Option<watch::Receiver<StoreState>> = None;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", HELP);
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let command = match Command::parse(line.trim_end()) {
                    Ok(command) => command,
                    Err(message) => {
                        println!("{}", message);
                        continue;
                    }
                };

                match command {
                    Command::Quit => break,
                    Command::Help => println!("{}", HELP),
                    Command::Toggle => {
                        modal.handle_key(KeyPress { key: 'k', meta: true, ctrl: false }).await;
                        updates = modal.session().map(SearchSession::subscribe);
                        println!("Search {}", if modal.is_open() { "opened" } else { "closed" });
                    }
                    Command::Open => {
                        if !modal.is_open() {
                            modal.open();
                            updates = modal.session().map(SearchSession::subscribe);
                        }
                        println!("Search opened");
                    }
                    Command::Close => {
                        modal.close().await;
                        updates = None;
                        println!("Search closed");
                    }
                    Command::Input(text) => {
                        if !modal.is_open() {
                            modal.open();
                            updates = modal.session().map(SearchSession::subscribe);
                        }
                        if let Err(e) = modal.input(&text) {
                            tracing::warn!("Search input dropped: {}", e);
                        }
                    }
                    Command::Submit => {
                        match modal.submit().await {
                            Some(route) => println!("-> {}", route),
                            None => println!("Nothing to submit"),
                        }
                        updates = None;
                    }
                    Command::Select(n) => match nth_option(&modal.sections(), n) {
                        Some(option) => {
                            println!("-> {}", modal.select(&option).await);
                            updates = None;
                        }
                        None => println!("No result #{}", n + 1),
                    },
                    Command::SeeAll(n) => {
                        let link = modal.sections().iter().filter_map(|s| s.see_all.clone()).nth(n);
                        match link {
                            Some(link) => {
                                println!("-> {}", modal.see_all(&link).await);
                                updates = None;
                            }
                            None => println!("No \"See all\" link #{}", n + 1),
                        }
                    }
                    Command::Links(player) => match links.get_links(&player).await {
                        Ok(found) if found.is_empty() => println!("No links"),
                        Ok(found) => {
                            for link in found {
                                println!("  [{}] {}  {}", link.id, link.display_name(), link.url);
                            }
                        }
                        Err(e) => println!("{}", describe(&e)),
                    },
                    Command::AddLink(player, input) => match links.add_link(&player, input).await {
                        Ok(link) => println!("Added link {}", link.id),
                        Err(e) => println!("{}", describe(&e)),
                    },
                    Command::DeleteLink(id) => match links.delete_link(&id).await {
                        Ok(()) => println!("Deleted link {}", id),
                        Err(e) => println!("{}", describe(&e)),
                    },
                    Command::AddGuild(input) => match guilds.submit_guild(input).await {
                        Ok(guild) => println!("Submitted guild {} for review", guild.guildname),
                        Err(e) => println!("{}", describe(&e)),
                    },
                }
            }
            alive = next_update(&mut updates) => {
                if !alive {
                    updates = None;
                    continue;
                }
                if let Some(state) = modal.state() {
                    if let Some(text) = render_state(&state, &modal.sections()) {
                        println!("{}", text);
                    }
                }
            }
        }
    }

    modal.close().await;
    Ok(())
}
