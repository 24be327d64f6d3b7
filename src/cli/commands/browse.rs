//! Interactive product list.
//!
//! Reads one command per line. `search` and `category` edits are debounced
//! like keystrokes in a filter box; the other commands act immediately.

use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;

use super::products::{load, print_list, show_route};
use super::{prompt, stdin_lines};
use crate::api::ProductFilter;
use crate::cli::Session;
use crate::router::Route;
use crate::store::products::selectors;
use crate::views::{
    self, debounce_filters, ConfirmDialog, FilterEdit, FilterForm, ListController,
};

const HELP: &str = "Commands: search <text>, category <name>, page <n>, next, prev, clear, show <id>, delete <id>, quit";

enum Command {
    Search(String),
    Category(String),
    Page(u32),
    Next,
    Prev,
    Clear,
    Show(String),
    Delete(String),
    Quit,
    Help,
}

fn parse(line: &str) -> Option<Command> {
    let line = line.trim();
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim().to_string();
    let command = match word {
        "search" => Command::Search(rest),
        "category" => Command::Category(rest),
        "page" => Command::Page(rest.parse().ok()?),
        "next" => Command::Next,
        "prev" => Command::Prev,
        "clear" => Command::Clear,
        "show" if !rest.is_empty() => Command::Show(rest),
        "delete" if !rest.is_empty() => Command::Delete(rest),
        "quit" | "exit" => Command::Quit,
        "help" | "" => Command::Help,
        _ => return None,
    };
    Some(command)
}

/// Print the list for a route the controller has already opened.
async fn render(session: &mut Session, route: Route) {
    println!("{route}");
    if let Err(e) = print_list(session).await {
        eprintln!("Error: {e}");
    }
}

pub async fn run(session: &mut Session) -> Result<()> {
    let start = Route::ProductList(ProductFilter::with_limit(session.config().catalog.page_size));
    let route = session.guard(&start.path())?;
    let controller = ListController::new(session.store().clone());
    controller.init();
    show_route(session, route).await?;
    println!("{HELP}");

    let period = Duration::from_millis(session.config().catalog.search_debounce_ms);
    let (edits_tx, edits_rx) = mpsc::unbounded_channel();
    let mut debounced = debounce_filters(edits_rx, period);
    let mut form = session
        .store()
        .select(|state| FilterForm::from_filter(selectors::products_filter(state)));
    let mut lines = stdin_lines();

    loop {
        tokio::select! {
            Some(applied) = debounced.recv() => {
                let route = controller.apply_filters(&applied);
                render(session, route).await;
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse(&line) {
                    Some(Command::Search(text)) => {
                        form.search = text;
                        let _ = edits_tx.send(FilterEdit::Edit(form.clone()));
                    }
                    Some(Command::Category(name)) => {
                        form.category = name;
                        let _ = edits_tx.send(FilterEdit::Edit(form.clone()));
                    }
                    Some(Command::Page(page)) => render(session, controller.change_page(page)).await,
                    Some(Command::Next) => render(session, controller.next_page()).await,
                    Some(Command::Prev) => render(session, controller.previous_page()).await,
                    Some(Command::Clear) => {
                        form = FilterForm::default();
                        let _ = edits_tx.send(FilterEdit::Reset(form.clone()));
                        render(session, controller.clear_filters()).await;
                    }
                    Some(Command::Show(id)) => match load(session, &id).await {
                        Ok(product) => println!("{}", views::product_detail(&product)),
                        Err(e) => eprintln!("Error: {e}"),
                    },
                    Some(Command::Delete(id)) => {
                        let product = match load(session, &id).await {
                            Ok(product) => product,
                            Err(e) => {
                                eprintln!("Error: {e}");
                                continue;
                            }
                        };
                        let dialog = ConfirmDialog::delete_product(&product);
                        let answer = prompt(&mut lines, &format!("{} ", dialog.prompt())).await?;
                        let confirmed = controller.delete(&product, |dialog| {
                            answer.as_deref().is_some_and(|a| dialog.accepts(a))
                        });
                        if confirmed {
                            session.settle().await.report().unwrap_or_else(|e| eprintln!("Error: {e}"));
                        } else {
                            println!("Cancelled");
                        }
                    }
                    Some(Command::Quit) => break,
                    Some(Command::Help) => println!("{HELP}"),
                    None => println!("Unknown command. {HELP}"),
                }
            }
        }
    }

    Ok(())
}
