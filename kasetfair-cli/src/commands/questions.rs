use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use client::{KasetFairClient, StoreApi, questions::QuestionnaireForm};
use shared::{
    config::client::ClientConfig,
    models::{QuestionType, StoreQuestionAnswer},
};

use super::session::Session;

type Form = QuestionnaireForm<KasetFairClient>;

#[derive(Subcommand, Debug)]
pub enum QuestionsCommand {
    /// List the questions with the saved answers
    List,
    /// Change answers and save all of them
    Answer(AnswerArgs),
}

#[derive(Args, Debug)]
pub struct AnswerArgs {
    /// Store to answer for; defaults to the current user's store
    #[arg(long)]
    pub store_id: Option<i64>,
    /// Text answer, as ID=TEXT
    #[arg(long = "text", value_name = "ID=TEXT", value_parser = parse_answer)]
    pub texts: Vec<(i64, String)>,
    /// Single-select answer, as ID=OPTION
    #[arg(long = "select", value_name = "ID=OPTION", value_parser = parse_answer)]
    pub selects: Vec<(i64, String)>,
    /// Adds or removes a multi-select option, as ID=OPTION
    #[arg(long = "toggle", value_name = "ID=OPTION", value_parser = parse_answer)]
    pub toggles: Vec<(i64, String)>,
}

fn parse_answer(raw: &str) -> Result<(i64, String), String> {
    let (id, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got `{raw}`"))?;
    let id = id
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("question id must be a number, got `{}`", id.trim()))?;
    Ok((id, value.trim().to_string()))
}

pub async fn run(config: &ClientConfig, action: QuestionsCommand) -> Result<()> {
    let session = Session::open(config)?;
    let mut form = QuestionnaireForm::new(session.api());
    form.load().await?;

    match action {
        QuestionsCommand::List => print_questions(&form),
        QuestionsCommand::Answer(args) => {
            let store_id = match args.store_id {
                Some(id) => id,
                None => form
                    .api()
                    .store_status()
                    .await
                    .map(|progress| progress.id)
                    .context("no store to answer for; pass --store-id")?,
            };
            for (id, text) in args.texts {
                if !form.set_text(id, text) {
                    bail!("no question with id {id}");
                }
            }
            for (id, value) in args.selects {
                form.select(id, &value)?;
            }
            for (id, value) in args.toggles {
                form.toggle(id, &value)?;
            }
            form.save(store_id).await?;
            if let Some(message) = form.success() {
                println!("{message}");
            }
            print_questions(&form);
        }
    }

    session.save()
}

fn print_questions(form: &Form) {
    if form.questions().is_empty() {
        println!("No questions.");
        return;
    }
    for question in form.questions() {
        print_question(form, question);
    }
}

fn print_question(form: &Form, question: &StoreQuestionAnswer) {
    let template = &question.template;
    println!("{}. {} ({})", template.id, template.label, template.question_type);
    if let Some(description) = &template.description {
        println!("    {description}");
    }
    let Some(draft) = form.draft(template.id) else {
        return;
    };
    match template.question_type {
        QuestionType::Text => println!("    answer: {}", draft.text),
        QuestionType::SingleSelect | QuestionType::MultiSelect | QuestionType::Other => {
            for option in &template.options {
                let chosen = if template.question_type == QuestionType::SingleSelect {
                    draft.value == option.value
                } else {
                    draft.values.contains(&option.value)
                };
                let marker = if chosen { "x" } else { " " };
                println!("    [{marker}] {} ({})", option.label, option.value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer() {
        assert_eq!(
            parse_answer("3 = gas").unwrap(),
            (3, "gas".to_string())
        );
        assert_eq!(
            parse_answer("1=a=b").unwrap(),
            (1, "a=b".to_string())
        );
        assert!(parse_answer("gas").unwrap_err().contains("ID=VALUE"));
        assert!(parse_answer("x=gas").unwrap_err().contains("must be a number"));
    }
}
