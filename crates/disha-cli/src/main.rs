//! `disha` — terminal front-end for the disha counseling server.
//!
//! # Usage
//!
//! ```
//! disha --url http://localhost:8080            # the seven-step wizard
//! disha --url http://localhost:8080 chat       # free-form chat
//! ```

mod client;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use disha_core::{
  llm::{ChatMessage, Role},
  wizard::{Fetch, Step, Wizard, WizardError},
};
use serde_json::{Value, json};

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "disha", about = "Career counseling wizard for Indian students")]
struct Args {
  /// Base URL of the disha server.
  #[arg(long, env = "DISHA_URL", default_value = "http://localhost:8080")]
  url: String,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Step through the seven-step counseling wizard (the default).
  Wizard,
  /// Free-form chat with the counseling assistant.
  Chat,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();
  let client = ApiClient::new(ApiConfig { base_url: args.url })?;

  match args.command.unwrap_or(Command::Wizard) {
    Command::Wizard => run_wizard(&client).await,
    Command::Chat => run_chat(&client).await,
  }
}

// ─── Wizard loop ──────────────────────────────────────────────────────────────

async fn run_wizard(client: &ApiClient) -> Result<()> {
  let mut wizard = Wizard::new();
  let first = wizard.initial_fetch();
  if let Err(e) = apply_fetch(client, &mut wizard, first).await {
    println!("request failed: {e:#}");
    println!("(enter r to retry)");
  }

  loop {
    render(&wizard);

    let Some(line) = read_line()? else { return Ok(()) };
    let line = line.trim().to_string();

    match line.to_ascii_lowercase().as_str() {
      "" => continue,
      "q" => return Ok(()),
      "p" => {
        if let Err(e) = wizard.previous() {
          println!("{e}");
        }
        continue;
      }
      "r" => {
        let fetch = wizard.start_over();
        if let Err(e) = apply_fetch(client, &mut wizard, fetch).await {
          println!("request failed: {e:#}");
          println!("(enter r to retry)");
        }
        continue;
      }
      _ => {}
    }

    if wizard.step() == Step::Done {
      println!("unrecognised command");
      continue;
    }

    let transition = if wizard.step().is_multi() {
      handle_multi(&mut wizard, &line)
    } else {
      handle_single(&mut wizard, &line)
    };
    match transition {
      Ok(fetch) => {
        // A failed request ends only this step. The snapshot pushed by the
        // transition stays, so p returns to the step as it was.
        if let Err(e) = apply_fetch(client, &mut wizard, fetch).await {
          println!("request failed: {e:#}");
          println!("(enter p to go back, or r to start over)");
        }
      }
      Err(e) => println!("{e}"),
    }
  }
}

/// Run a pending fetch and feed its result back into the machine.
async fn apply_fetch(
  client: &ApiClient,
  wizard: &mut Wizard,
  fetch: Fetch,
) -> Result<()> {
  match fetch {
    Fetch::Outcome { exam, college, course } => {
      println!("Looking up the cutoff and preparing your summary...");
      let cutoff = client
        .text(
          "cutoff",
          json!({ "exam": exam, "college": college, "course": course }),
        )
        .await?;
      let sel = wizard.selection().clone();
      let summary = client
        .text(
          "summary",
          json!({
            "group":    sel.group,
            "subjects": sel.subjects,
            "interest": sel.interests,
            "course":   sel.course,
            "college":  sel.college,
            "exam":     exam,
            "cutoff":   cutoff,
          }),
        )
        .await?;
      wizard.finish(cutoff, summary)?;
    }
    other => {
      let options = fetch_options(client, &other).await?;
      if options.is_empty() {
        println!("(no suggestions came back; you can still type your own)");
      }
      wizard.set_options(options);
    }
  }
  Ok(())
}

async fn fetch_options(client: &ApiClient, fetch: &Fetch) -> Result<Vec<String>> {
  match fetch {
    Fetch::SubjectGroups => client.list("subject_group", Value::Null).await,
    Fetch::Subjects { group } => client.list("subject", json!(group)).await,
    Fetch::Interests { subjects } => client.list("interest", json!(subjects)).await,
    Fetch::Courses { interests, group } => {
      client
        .list("course", json!({ "interest": interests, "group": group }))
        .await
    }
    Fetch::Colleges { course } => client.list("college", json!(course)).await,
    Fetch::Exams { college, course } => {
      client
        .list("exam", json!({ "college": college, "course": course }))
        .await
    }
    Fetch::Outcome { .. } => unreachable!("handled by apply_fetch"),
  }
}

/// A number picks the matching option; anything else is used verbatim.
fn handle_single(wizard: &mut Wizard, line: &str) -> Result<Fetch, WizardError> {
  let value = match line.parse::<usize>() {
    Ok(n) if n >= 1 && n <= wizard.options().len() => wizard.options()[n - 1].clone(),
    _ => line.to_string(),
  };
  wizard.choose(&value)
}

/// Comma-separated numbers toggle checkboxes; a non-numeric token becomes
/// the free-text entry (honored on the subjects step).
fn handle_multi(wizard: &mut Wizard, line: &str) -> Result<Fetch, WizardError> {
  let mut extra: Option<String> = None;
  for token in line.split(',').map(str::trim).filter(|t| !t.is_empty()) {
    match token.parse::<usize>() {
      Ok(0) => return Err(WizardError::OptionOutOfRange(0)),
      Ok(n) => wizard.toggle(n - 1)?,
      Err(_) => extra = Some(token.to_string()),
    }
  }
  wizard.advance_multi(extra.as_deref())
}

// ─── Rendering ────────────────────────────────────────────────────────────────

fn render(wizard: &Wizard) {
  println!();
  if wizard.step() == Step::Done {
    let sel = wizard.selection();
    println!("Your career path");
    println!("  Stream:    {}", sel.group);
    println!("  Subjects:  {}", sel.subjects.join(", "));
    println!("  Interests: {}", sel.interests.join(", "));
    println!("  Course:    {}", sel.course);
    println!("  College:   {}", sel.college);
    println!("  Exam:      {}", sel.exam);
    println!("  Cutoff:    {}", sel.cutoff);
    println!();
    println!("{}", sel.summary);
    println!();
    println!("[p] previous step  [r] start over  [q] quit");
  } else {
    println!("Step {} of 6: {}", wizard.step().index() + 1, step_title(wizard.step()));
    for (i, option) in wizard.options().iter().enumerate() {
      if wizard.step().is_multi() {
        let mark = if wizard.checked()[i] { 'x' } else { ' ' };
        println!("  [{mark}] {}. {option}", i + 1);
      } else {
        println!("  {}. {option}", i + 1);
      }
    }
    if wizard.step().is_multi() {
      println!("Enter comma-separated numbers, [p]revious, [r]estart, or [q]uit.");
    } else {
      println!("Enter a number or a value, [p]revious, [r]estart, or [q]uit.");
    }
  }
  print!("> ");
}

fn step_title(step: Step) -> &'static str {
  match step {
    Step::Group => "select your 12th-standard stream",
    Step::Subjects => "select your subjects (free text welcome)",
    Step::Interests => "select your career interests",
    Step::Course => "select a course",
    Step::College => "select a college",
    Step::Exam => "select an entrance exam",
    Step::Done => "your career path",
  }
}

/// Read one line from stdin; `None` on EOF.
fn read_line() -> Result<Option<String>> {
  use std::io::{self, BufRead as _, Write as _};
  io::stdout().flush().ok();
  let mut line = String::new();
  let n = io::stdin().lock().read_line(&mut line).context("reading stdin")?;
  if n == 0 {
    Ok(None)
  } else {
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
  }
}

// ─── Chat loop ────────────────────────────────────────────────────────────────

async fn run_chat(client: &ApiClient) -> Result<()> {
  let greeting = "Hello! How can I help you with your career questions today?";
  println!("{greeting}");
  println!("(type q to quit)");
  let mut history = vec![ChatMessage {
    role:    Role::Assistant,
    content: greeting.to_string(),
  }];

  loop {
    print!("> ");
    let Some(line) = read_line()? else { return Ok(()) };
    let line = line.trim();
    if line.is_empty() {
      continue;
    }
    if line.eq_ignore_ascii_case("q") {
      return Ok(());
    }

    history.push(ChatMessage { role: Role::User, content: line.to_string() });
    let reply = client.chat(&history).await?;
    println!("{reply}");
    history.push(ChatMessage { role: Role::Assistant, content: reply });
  }
}
