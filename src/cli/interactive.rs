use crate::cli::output::{
    format_text_report, print_copy_failure, print_copy_skipped, print_copy_success,
};
use crate::clipboard::{self, Clipboard};
use crate::converter::{ConversionDirection, Converter};
use crate::session::{CopyOutcome, OutputField, Session};
use crate::Config;
use anyhow::Result;
use colored::*;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Editor, Input, Select};
use std::time::Instant;

const DIRECTIONS: [ConversionDirection; 2] =
    [ConversionDirection::EmailToId, ConversionDirection::IdToEmail];

#[derive(Debug, Clone, Copy)]
enum MenuAction {
    Copy(OutputField),
    EditNotice,
    Show,
    NewConversion,
    Quit,
}

/// Prompt-driven session: fill the form, convert, then copy blocks until quit.
pub fn run(config: &Config, mut session: Session) -> Result<()> {
    let theme = ColorfulTheme::default();
    let converter = Converter::new(config.domain.as_str());
    let mut clipboard = clipboard::open(config.clipboard);

    fill_form(&theme, &mut session)?;
    convert_and_show(&mut session, &converter, config.color);

    loop {
        let actions = menu_actions(&session);
        let now = Instant::now();
        let labels: Vec<String> = actions
            .iter()
            .map(|action| action_label(&session, *action, now, config.color))
            .collect();

        let choice = Select::with_theme(&theme)
            .with_prompt("What next?")
            .items(&labels)
            .default(0)
            .interact_opt()?;

        match choice.map(|i| actions[i]) {
            Some(MenuAction::Copy(field)) => {
                copy_field(&mut session, field, clipboard.as_mut(), config.color)
            }
            Some(MenuAction::EditNotice) => {
                if let Some(edited) = Editor::new().extension(".md").edit(session.notice())? {
                    session.set_notice(edited.trim_end_matches('\n'));
                }
                println!("{}", session.notice());
            }
            Some(MenuAction::Show) => print!("\n{}\n", format_text_report(&session, config.color)),
            Some(MenuAction::NewConversion) => {
                fill_form(&theme, &mut session)?;
                convert_and_show(&mut session, &converter, config.color);
            }
            Some(MenuAction::Quit) | None => break,
        }
    }

    Ok(())
}

fn fill_form(theme: &ColorfulTheme, session: &mut Session) -> Result<()> {
    let current = DIRECTIONS
        .iter()
        .position(|d| *d == session.direction)
        .unwrap_or(0);
    let direction = Select::with_theme(theme)
        .with_prompt("Conversion")
        .items(&["Email → ID", "ID → Email"])
        .default(current)
        .interact()?;
    session.direction = DIRECTIONS[direction];

    let input_prompt = match session.direction {
        ConversionDirection::EmailToId => "Emails (separate with commas, semicolons or spaces)",
        ConversionDirection::IdToEmail => "IDs (separate with commas, semicolons or spaces)",
    };
    session.input = Input::<String>::with_theme(theme)
        .with_prompt(input_prompt)
        .with_initial_text(session.input.clone())
        .allow_empty(true)
        .interact_text()?;
    session.title = Input::<String>::with_theme(theme)
        .with_prompt("Title")
        .with_initial_text(session.title.clone())
        .allow_empty(true)
        .interact_text()?;
    session.description = Input::<String>::with_theme(theme)
        .with_prompt("Description")
        .with_initial_text(session.description.clone())
        .allow_empty(true)
        .interact_text()?;

    Ok(())
}

fn convert_and_show(session: &mut Session, converter: &Converter, colored: bool) {
    if session.convert(converter) {
        print!("\n{}\n", format_text_report(session, colored));
    }
}

fn menu_actions(session: &Session) -> Vec<MenuAction> {
    let mut actions = Vec::new();
    if !session.results().is_empty() {
        actions.extend(session.visible_fields().into_iter().map(MenuAction::Copy));
        actions.push(MenuAction::EditNotice);
        actions.push(MenuAction::Show);
    }
    actions.push(MenuAction::NewConversion);
    actions.push(MenuAction::Quit);
    actions
}

fn action_label(session: &Session, action: MenuAction, now: Instant, colored: bool) -> String {
    match action {
        MenuAction::Copy(field) if session.is_copied(field, now) => {
            let copied = if colored {
                "copied".green().to_string()
            } else {
                "copied".to_string()
            };
            format!("Copy {} ({})", field.label(), copied)
        }
        MenuAction::Copy(field) => format!("Copy {}", field.label()),
        MenuAction::EditNotice => "Edit notice".to_string(),
        MenuAction::Show => "Show results".to_string(),
        MenuAction::NewConversion => "New conversion".to_string(),
        MenuAction::Quit => "Quit".to_string(),
    }
}

fn copy_field(
    session: &mut Session,
    field: OutputField,
    clipboard: &mut dyn Clipboard,
    colored: bool,
) {
    match session.copy(field, clipboard, Instant::now()) {
        Ok(CopyOutcome::Copied) => print_copy_success(field, colored),
        Ok(CopyOutcome::Skipped) => print_copy_skipped(field, colored),
        Err(e) => {
            tracing::debug!(%field, error = %e, "clipboard write failed");
            print_copy_failure(field, &e, colored)
        }
    }
}
