use chrono::Utc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use translatorai_client::{Config, FormController, ResultBody, TranslationClient};

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Text(String),
    Lang(usize, String),
    Add,
    Remove(usize),
    Source(String),
    Submit,
    Show,
    DismissError,
    DismissSuccess,
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Result<Command, String> {
        let (head, rest) = match line.split_once(' ') {
            Some((h, r)) => (h, r.trim()),
            None => (line, ""),
        };

        match head {
            "text" => Ok(Command::Text(rest.to_string())),
            "lang" => {
                let (slot, value) = rest.split_once(' ').unwrap_or((rest, ""));
                Ok(Command::Lang(parse_slot(slot)?, value.trim().to_string()))
            }
            "add" => Ok(Command::Add),
            "remove" => Ok(Command::Remove(parse_slot(rest)?)),
            "source" => Ok(Command::Source(rest.to_string())),
            "submit" => Ok(Command::Submit),
            "show" => Ok(Command::Show),
            "dismiss" => match rest {
                "error" => Ok(Command::DismissError),
                "success" => Ok(Command::DismissSuccess),
                _ => Err("usage: dismiss error|success".to_string()),
            },
            "help" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(format!("unknown command: {}", head)),
        }
    }
}

/// Slots are numbered from 1 on the command line.
fn parse_slot(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("invalid slot number: {:?}", s)),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  text <value>          set the text to translate");
    println!("  lang <n> <value>      set target language slot n");
    println!("  add                   add a target language slot");
    println!("  remove <n>            remove target language slot n");
    println!("  source <value>        optional source language hint (blank clears)");
    println!("  submit                send the translation request");
    println!("  show                  print the form");
    println!("  dismiss error|success hide a notice");
    println!("  quit");
}

fn render(form: &FormController) {
    let state = form.state();

    println!();
    println!("Text: {:?}", state.text);
    if let Some(hint) = form.text_field_error() {
        println!("  ! {}", hint);
    }
    for (i, lang) in state.target_languages.iter().enumerate() {
        println!("{}: {:?}", FormController::slot_label(i), lang);
    }
    if let Some(source) = &state.source_language {
        println!("Source language: {}", source);
    }
    if form.is_loading() {
        println!("[translating...]");
    }
    if let Some(error) = &state.error {
        println!("[error] {}", error.message);
    }
    if let Some(success) = &state.success {
        println!("[ok] {}", success.message);
    }

    for view in form.results() {
        println!("--- {}", view.heading);
        match &view.body {
            ResultBody::Error(e) => println!("    (error) {}", e),
            body => println!("    {}", body.as_str()),
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    tracing::info!("Starting TranslatorAI client against {}", config.api_url);

    let client = TranslationClient::from_config(&config);
    let mut form = FormController::new();

    println!("TranslatorAI");
    print_help();
    render(&form);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(l)) => l,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Failed to read input: {}", e);
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command = match Command::parse(line) {
            Ok(c) => c,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            Command::Text(value) => form.set_text(value),
            Command::Lang(index, value) => form.set_target_language_at(index, value),
            Command::Add => form.add_target_language_slot(),
            Command::Remove(index) => form.remove_target_language_slot(index),
            Command::Source(value) => form.set_source_language(Some(value)),
            Command::Submit => {
                form.submit(&client).await;
            }
            Command::Show => {}
            Command::DismissError => form.dismiss_error(),
            Command::DismissSuccess => form.dismiss_success(),
            Command::Help => {
                print_help();
                continue;
            }
            Command::Quit => break,
        }

        form.expire_notices(Utc::now());
        render(&form);
    }

    tracing::info!("Client stopped");
}
