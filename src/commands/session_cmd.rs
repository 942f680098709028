use tokio::io::{AsyncBufReadExt, BufReader};

use crate::commands::base_commands::Commands;
use crate::commands::report_cmd::{build_exporter, run_export};
use crate::commands::report_format::{format_estimate_report, format_headline};
use crate::domain::display::{Currency, Locale};
use crate::domain::inputs::InputField;
use crate::domain::lead::Contact;
use crate::services::app_config::AppConfig;
use crate::services::estimator::{EstimatorSession, coerce_flag};
use crate::services::report_export::ReportExporter;

const HELP: &str = "Commands:
  show                              print the full estimate
  fields                            list editable fields
  set <field> <value>               change an input
  advanced [on|off]                 show, hide or toggle advanced waste inputs
  locale <code>                     en-US, en-GB, de-DE, ar-AE
  currency <code>                   USD, EUR, AED, GBP, SAR, INR
  reset                             restore default inputs
  export <name> | <email> | <company>
                                    send your details and save the PDF report
  quit                              leave the session";

#[derive(Debug, PartialEq)]
enum SessionAction {
    Continue,
    Export(Contact),
    Quit,
}

pub async fn session_command(cmd: Commands, config: &AppConfig) {
    if let Commands::Session { inputs } = cmd {
        let mut session = match inputs.build_session(config) {
            Ok(session) => session,
            Err(e) => {
                eprintln!("Failed to load inputs: {e:?}");
                return;
            }
        };
        let exporter = build_exporter(config, &config.output_dir);

        println!("ROI estimator session. Type 'help' for commands.");
        println!("{}", format_headline(&session.view()));

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    eprintln!("Failed to read input: {e:?}");
                    break;
                }
            };
            let (action, reply) = handle_line(&mut session, &line);
            if !reply.is_empty() {
                println!("{reply}");
            }
            match action {
                SessionAction::Continue => {}
                SessionAction::Export(contact) => export(&exporter, &contact, &session).await,
                SessionAction::Quit => break,
            }
        }
    }
}

async fn export(exporter: &ReportExporter, contact: &Contact, session: &EstimatorSession) {
    run_export(exporter, contact, session.view()).await;
}

/// Applies one session command and returns the text to print.
fn handle_line(session: &mut EstimatorSession, line: &str) -> (SessionAction, String) {
    let line = line.trim();
    let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    match command {
        "" => (SessionAction::Continue, String::new()),
        "help" => (SessionAction::Continue, HELP.to_string()),
        "quit" | "exit" => (SessionAction::Quit, String::new()),
        "show" => (SessionAction::Continue, format_estimate_report(&session.view())),
        "fields" => {
            let fields = InputField::ALL
                .iter()
                .map(|field| format!("{} = {}  ({})", field.key(), session.inputs().value(*field), field.label()))
                .collect::<Vec<_>>()
                .join("\n");
            (SessionAction::Continue, fields)
        }
        "set" => {
            let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            match name.parse::<InputField>() {
                Ok(field) => {
                    let stored = session.set_field(field, value);
                    let reply = format!("{} = {}\n{}", field.key(), stored, format_headline(&session.view()));
                    (SessionAction::Continue, reply)
                }
                Err(e) => (SessionAction::Continue, e.to_string()),
            }
        }
        "advanced" => {
            if rest.is_empty() {
                session.toggle_advanced();
            } else {
                session.set_show_advanced(coerce_flag(rest));
            }
            let state = if session.inputs().show_advanced { "shown" } else { "hidden" };
            let reply = format!("Advanced waste inputs {state}\n{}", format_headline(&session.view()));
            (SessionAction::Continue, reply)
        }
        "locale" => match rest.parse::<Locale>() {
            Ok(locale) => {
                session.set_locale(locale);
                let reply = format!("Locale set to {} ({})\n{}", locale, locale.label(), format_headline(&session.view()));
                (SessionAction::Continue, reply)
            }
            Err(e) => (SessionAction::Continue, e),
        },
        "currency" => match rest.parse::<Currency>() {
            Ok(currency) => {
                session.set_currency(currency);
                (SessionAction::Continue, format_headline(&session.view()))
            }
            Err(e) => (SessionAction::Continue, e),
        },
        "reset" => {
            session.reset();
            (SessionAction::Continue, format!("Inputs reset\n{}", format_headline(&session.view())))
        }
        "export" => {
            let parts: Vec<&str> = rest.split('|').map(str::trim).collect();
            let contact = Contact::new(
                parts.first().copied().unwrap_or_default(),
                parts.get(1).copied().unwrap_or_default(),
                parts.get(2).copied().unwrap_or_default(),
            );
            if contact.is_complete() {
                (SessionAction::Export(contact), String::new())
            } else {
                (
                    SessionAction::Continue,
                    "Name, email and company are required to download the report.".to_string(),
                )
            }
        }
        other => (
            SessionAction::Continue,
            format!("Unknown command '{other}'. Type 'help' for commands."),
        ),
    }
}
