use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use fund_profiler::advisor::{
    self, AdviceProvider, AdviceRequest, AdvisorBackend, AdvisorConfig,
};
use fund_profiler::catalog::funds::{self, Fund};
use fund_profiler::catalog::questions::{section, QuestionKind};
use fund_profiler::config::Config;
use fund_profiler::quiz::{Action, AgeBracket, Experience, Session, Stage, View};
use fund_profiler::scoring::ScoreOutcome;
use fund_profiler::store::{Lead, LeadStore, LibSqlLeadStore};

type Reader = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = Config::from_env()?;

    eprintln!("🌱 Fund Profiler v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Database: {}", config.db_path.display());

    let store: Arc<dyn LeadStore> = Arc::new(LibSqlLeadStore::new_local(&config.db_path).await?);

    let advisor: Option<Arc<dyn AdviceProvider>> = match &config.api_key {
        Some(key) => {
            let advisor_config = AdvisorConfig {
                backend: AdvisorBackend::Anthropic,
                api_key: key.clone(),
                model: config.model.clone(),
            };
            match advisor::create_provider(&advisor_config) {
                Ok(provider) => {
                    eprintln!("   Advisor: {}", provider.model_name());
                    Some(provider)
                }
                Err(e) => {
                    tracing::warn!("Advisor unavailable, using fallback advice: {e}");
                    None
                }
            }
        }
        None => {
            eprintln!("   Advisor: none (fallback advice)");
            None
        }
    };

    eprintln!("   Commands: /admin  /reset  /quit\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut session = Session::new();
    // Advice for the current result, fetched once on entering the stage.
    let mut advice: Option<String> = None;

    loop {
        match session.view {
            View::Admin => {
                render_admin(store.as_ref()).await;
            }
            View::Quiz => match session.stage {
                Stage::Intro => render_intro(),
                Stage::Contact => render_contact(&session),
                Stage::Section { .. } => render_question(&session),
                Stage::Result => {
                    cache_advice(&mut advice, advisor.as_deref(), &session, &config).await;
                    render_result(&session, advice.as_deref());
                }
            },
        }

        eprint!("> ");
        let Some(input) = read_line(&mut lines).await else {
            break;
        };

        match input.as_str() {
            "/quit" => break,
            "/reset" => session.apply(Action::Reset),
            "/admin" => session.apply(Action::ToggleAdmin),
            other => {
                if session.view == View::Admin {
                    handle_admin_input(other, &mut session, store.as_ref()).await;
                } else {
                    handle_quiz_input(other, &mut session, store.as_ref()).await;
                }
            }
        }

        if !session.stage.is_result() {
            advice = None;
        }
    }

    eprintln!("Bye.");
    Ok(())
}

async fn read_line(lines: &mut Reader) -> Option<String> {
    match lines.next_line().await {
        Ok(Some(line)) => Some(line.trim().to_string()),
        Ok(None) => None, // EOF
        Err(e) => {
            tracing::error!("Error reading stdin: {}", e);
            None
        }
    }
}

// ── Quiz view ───────────────────────────────────────────────────────

fn render_intro() {
    println!("\nFind your investor personality.");
    println!("Three minutes, three sections, one tailored fund lineup.");
    println!("Press Enter to start the assessment.");
}

fn render_contact(session: &Session) {
    let c = &session.contact;
    println!("\n── A bit about you ──");
    println!("  name:       {}", show(&c.name));
    println!("  phone:      {}", show(&c.phone));
    println!("  email:      {}", show(&c.email));
    println!(
        "  age:        {}",
        c.age.map(|a| a.to_string()).unwrap_or_else(|| "-".into())
    );
    println!(
        "  experience: {}",
        c.experience
            .map(|e| e.to_string())
            .unwrap_or_else(|| "-".into())
    );
    println!("Set fields with `name <text>`, `phone <text>`, `email <text>`,");
    println!("`age <1-6>` ({}),", list_options(&AgeBracket::ALL));
    println!("`experience <1-4>` ({}).", list_options(&Experience::ALL));
    println!("Then `next` to continue (name, email and age are required).");
}

fn render_question(session: &Session) {
    let Stage::Section {
        section: section_id,
        index,
    } = session.stage
    else {
        return;
    };
    let sec = section(section_id);
    let q = &sec.questions[index];

    if index == 0 && !session.answers.contains_key(&q.id) {
        println!("\n══ {} ══", sec.title);
        println!("{}", sec.intro);
    }

    println!(
        "\n[{}/{}  answered {}]",
        index + 1,
        sec.len(),
        session.answered_in(section_id)
    );
    println!("{}", q.prompt);
    match q.kind {
        QuestionKind::Scale { .. } => {
            match session.answers.get(&q.id) {
                Some(v) => println!("(current answer: {v}. Enter to continue, 1-7 to change, `back` to go back)"),
                None => println!("(1 = strongly agree … 7 = strongly disagree, `back` to go back)"),
            }
        }
        QuestionKind::Binary { .. } => {
            println!("(y = yes, n = no, `back` to go back)");
        }
        QuestionKind::LabeledChoice { options } => {
            for (i, opt) in options.iter().enumerate() {
                println!("  {}. {}", i + 1, opt.label);
            }
            println!("(pick 1-{}, `back` to go back)", options.len());
        }
    }
}

async fn handle_quiz_input(input: &str, session: &mut Session, store: &dyn LeadStore) {
    match session.stage {
        Stage::Intro => session.apply(Action::Begin),
        Stage::Contact => handle_contact_input(input, session),
        Stage::Section { .. } => handle_question_input(input, session),
        Stage::Result => handle_result_input(input, session, store).await,
    }
}

fn handle_contact_input(input: &str, session: &mut Session) {
    let (field, rest) = match input.split_once(' ') {
        Some((f, r)) => (f, r.trim()),
        None => (input, ""),
    };
    match field {
        "name" => session.apply(Action::SetName(rest.to_string())),
        "phone" => session.apply(Action::SetPhone(rest.to_string())),
        "email" => session.apply(Action::SetEmail(rest.to_string())),
        "age" => match pick(rest, &AgeBracket::ALL) {
            Some(age) => session.apply(Action::SetAge(*age)),
            None => println!("Pick an age bracket 1-{}.", AgeBracket::ALL.len()),
        },
        "experience" => {
            match pick(rest, &Experience::ALL) {
                Some(exp) => session.apply(Action::SetExperience(*exp)),
                None => println!("Pick an experience level 1-{}.", Experience::ALL.len()),
            }
        }
        "next" | "" => {
            session.apply(Action::SubmitContact);
            if session.stage == Stage::Contact {
                println!("Name, email and an age bracket are required first.");
            }
        }
        _ => println!("Unknown field {field:?}."),
    }
}

fn handle_question_input(input: &str, session: &mut Session) {
    let Some(id) = session.stage.current_question() else {
        return;
    };
    let Some(kind) = fund_profiler::catalog::questions::question_by_id(id).map(|q| q.kind)
    else {
        return;
    };

    match input {
        "back" => session.apply(Action::Retreat),
        "" => {
            // Enter confirms a scale answer and moves on.
            session.apply(Action::Advance);
            if session.stage.current_question() == Some(id) {
                println!("Answer this question first.");
            }
        }
        other => {
            let value = match kind {
                QuestionKind::Scale { .. } => other.parse::<i32>().ok(),
                QuestionKind::Binary { .. } => match other {
                    "y" | "yes" => Some(1),
                    "n" | "no" => Some(7),
                    _ => None,
                },
                QuestionKind::LabeledChoice { options } => {
                    pick(other, options).map(|opt| opt.value)
                }
            };
            match value {
                Some(value) => session.apply(Action::Answer { id, value }),
                None => println!("Didn't catch that, try again."),
            }
        }
    }
}

// ── Result view ─────────────────────────────────────────────────────

fn render_result(session: &Session, advice: Option<&str>) {
    let Some(outcome) = &session.outcome else {
        return;
    };
    let persona = &outcome.persona;

    println!("\n════════════════════════════════════════");
    println!("  {}, your investor personality", persona.title);
    println!("  score {} · risk level {}/3", outcome.total, persona.risk_level);
    println!("════════════════════════════════════════");
    println!("{}\n", persona.description);

    if let Some(advice) = advice {
        println!("Advisor's note:\n{advice}\n");
    }

    let rec = funds::recommendations();
    println!("Core lineup (long-term growth):");
    for (i, fund) in rec.core.iter().enumerate() {
        print_fund(i + 1, fund, &session.cart);
    }
    println!("Satellite lineup (volatility offset):");
    for (i, fund) in rec.satellite.iter().enumerate() {
        print_fund(i + 4, fund, &session.cart);
    }
    println!(
        "\nCart: {} fund(s). `toggle <1-6>` to select, `checkout` to submit,"
        , session.cart.len()
    );
    println!("`retake` to redo the assessment.");
}

fn print_fund(pos: usize, fund: &Fund, cart: &[String]) {
    let mark = if cart.iter().any(|c| c == fund.code) {
        "[x]"
    } else {
        "[ ]"
    };
    println!(
        "  {mark} {pos}. {} ({}, {}, RR{})  1y +{}%",
        fund.name, fund.code, fund.currency, fund.risk, fund.perf.one_year
    );
}

/// Fill the advice cache if it is empty and a result is on screen.
///
/// A single fetch per assessment: re-renders of the result screen (cart
/// toggles, returning from the admin view) reuse the cached string instead
/// of awaiting the provider again.
async fn cache_advice(
    cache: &mut Option<String>,
    advisor: Option<&dyn AdviceProvider>,
    session: &Session,
    config: &Config,
) {
    if cache.is_some() {
        return;
    }
    let Some(outcome) = &session.outcome else {
        return;
    };
    *cache = Some(fetch_advice(advisor, outcome, session, config).await);
}

async fn fetch_advice(
    advisor: Option<&dyn AdviceProvider>,
    outcome: &ScoreOutcome,
    session: &Session,
    config: &Config,
) -> String {
    let fallback = advisor::fallback_advice(&outcome.persona);
    let Some(provider) = advisor else {
        return fallback;
    };

    let request = AdviceRequest {
        persona: &outcome.persona,
        contact: &session.contact,
        score: outcome.total,
    };
    match tokio::time::timeout(config.advice_timeout, provider.advise(request)).await {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            tracing::warn!("Advice generation failed, using fallback: {e}");
            fallback
        }
        Err(_) => {
            tracing::warn!(
                "Advice generation timed out after {:?}, using fallback",
                config.advice_timeout
            );
            fallback
        }
    }
}

async fn handle_result_input(input: &str, session: &mut Session, store: &dyn LeadStore) {
    match input {
        "retake" => session.apply(Action::Retake),
        "checkout" => {
            if session.cart.is_empty() {
                println!("Select at least one fund first.");
                return;
            }
            let Some(outcome) = session.outcome.clone() else {
                return;
            };
            let lead = Lead::new(
                session.contact.clone(),
                session.answers.clone(),
                &outcome,
                session.cart.clone(),
            );
            match store.record(lead).await {
                Ok(()) => {
                    println!("Thanks! Your lineup is saved. An advisor will be in touch.");
                    session.apply(Action::Reset);
                }
                Err(e) => {
                    tracing::error!("Failed to save lead: {e}");
                    println!("Saving failed, your selection is still on screen.");
                }
            }
        }
        other => {
            if let Some(rest) = other.strip_prefix("toggle ") {
                let rec = funds::recommendations();
                let lineup: Vec<&Fund> =
                    rec.core.iter().chain(rec.satellite.iter()).copied().collect();
                match pick(rest.trim(), &lineup) {
                    Some(fund) => session.apply(Action::ToggleCart(fund.code.to_string())),
                    None => println!("Pick a fund 1-{}.", lineup.len()),
                }
            } else {
                println!("Commands here: toggle <n>, checkout, retake.");
            }
        }
    }
}

// ── Admin view ──────────────────────────────────────────────────────

async fn render_admin(store: &dyn LeadStore) {
    println!("\n── Admin: collected leads ──");
    match store.load().await {
        Ok(leads) if leads.is_empty() => println!("(no assessments yet)"),
        Ok(leads) => {
            for lead in &leads {
                println!(
                    "  {}  {:<12} {:<22} {:<20} {:>3}  [{}]",
                    lead.submitted_at.format("%Y-%m-%d %H:%M"),
                    lead.contact.name,
                    lead.contact.email,
                    lead.persona,
                    lead.score,
                    lead.cart.join(", "),
                );
            }
        }
        Err(e) => {
            tracing::error!("Failed to load leads: {e}");
            println!("(lead store unavailable)");
        }
    }
    println!("`clear` wipes all leads, `back` returns to the quiz.");
}

async fn handle_admin_input(input: &str, session: &mut Session, store: &dyn LeadStore) {
    match input {
        "back" | "" => session.apply(Action::ToggleAdmin),
        "clear" => match store.clear().await {
            Ok(()) => println!("All leads cleared."),
            Err(e) => {
                tracing::error!("Failed to clear leads: {e}");
                println!("Clearing failed.");
            }
        },
        _ => println!("Commands here: clear, back."),
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

fn show(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

/// Resolve a 1-based menu selection.
fn pick<'a, T>(input: &str, options: &'a [T]) -> Option<&'a T> {
    let n: usize = input.parse().ok()?;
    if n == 0 {
        return None;
    }
    options.get(n - 1)
}

fn list_options<T: std::fmt::Display>(options: &[T]) -> String {
    options
        .iter()
        .enumerate()
        .map(|(i, o)| format!("{} = {}", i + 1, o))
        .collect::<Vec<_>>()
        .join(", ")
}
