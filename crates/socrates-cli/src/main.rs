// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod runtime;

use anyhow::{Context, Result, anyhow, bail};
use config::Config;
use runtime::StdoutRuntime;
use socrates_app::{
    ChatId, ChatRuntime, GuidedPromptWidget, WidgetCommand, WidgetConfig, WidgetKind,
    spawn_text_import,
};
use socrates_llm::{SystemPromptConfig, compose_system_prompt, find_chat_model};
use std::env;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc;
use time::OffsetDateTime;
use tracing::{Level, debug, warn};
use tracing_subscriber::FmtSubscriber;
use uuid::Uuid;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `socrates --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let level = if options.verbose {
        Level::DEBUG
    } else {
        config.log_level()?
    };
    init_logging(level)?;

    if options.check_only {
        return Ok(());
    }

    let widget_config = options.widget.config();
    widget_config.validate()?;

    if options.list {
        print_widget_overview(&widget_config);
        return Ok(());
    }

    if options.print_system_prompt {
        let model = options.model.as_deref().unwrap_or(config.chat_model());
        if find_chat_model(model).is_none() {
            warn!(model, "model is not a known chat model");
        }
        let hints = config.request_hints();
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        print!(
            "{}",
            compose_system_prompt(&SystemPromptConfig {
                selected_model: model,
                request_hints: &hints,
                now,
            })
        );
        return Ok(());
    }

    let chat_id = options
        .chat_id
        .clone()
        .map(ChatId::from)
        .unwrap_or_else(|| ChatId::new(Uuid::new_v4().to_string()));
    let mut runtime = StdoutRuntime::new(chat_id, io::stdout().lock());
    dispatch_action(&options, &config, &mut runtime)
}

/// Fill the selected widget from the command line and send the prompt for
/// `--action` through `runtime`.
fn dispatch_action<R>(options: &CliOptions, config: &Config, runtime: &mut R) -> Result<()>
where
    R: ChatRuntime + ?Sized,
{
    let widget_config = options.widget.config();
    let action = options.action.as_deref().ok_or_else(|| {
        anyhow!(
            "--action is required; run `socrates --widget {} --list` to see actions",
            options.widget.as_str()
        )
    })?;
    if widget_config.actions.resolve(action).is_none() {
        bail!(
            "unknown action {action:?} for {}; expected one of: {}",
            options.widget.as_str(),
            widget_config.actions.ids().join(", ")
        );
    }

    let mut widget = GuidedPromptWidget::new(widget_config);
    apply_form_options(&mut widget, options);
    if let Some(path) = &options.text_file {
        import_student_text(&mut widget, path.clone(), config.import_max_bytes())?;
    }

    debug!(
        chat_id = %runtime.chat_id(),
        widget = options.widget.as_str(),
        action,
        "dispatching"
    );
    widget.trigger(action, runtime)
}

fn init_logging(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("install log subscriber")
}

fn apply_form_options(widget: &mut GuidedPromptWidget, options: &CliOptions) {
    let commands = [
        options.subject.clone().map(WidgetCommand::SelectSubject),
        options.grade.clone().map(WidgetCommand::SelectGrade),
        options.topic.clone().map(WidgetCommand::SetTopic),
        options.text.clone().map(WidgetCommand::SetStudentText),
    ];
    for command in commands.into_iter().flatten() {
        if widget.handle(command).is_empty() {
            warn!(
                widget = options.widget.as_str(),
                "option ignored; this widget has no student text field"
            );
        }
    }
}

fn import_student_text(
    widget: &mut GuidedPromptWidget,
    path: PathBuf,
    max_bytes: u64,
) -> Result<()> {
    if !widget.form().accepts_student_text() {
        bail!(
            "--text-file only applies to --widget {}",
            WidgetKind::StudentTextAssessor.as_str()
        );
    }
    let (tx, rx) = mpsc::channel();
    let _worker = spawn_text_import(path, max_bytes, tx);
    let outcome = rx.recv().context("text import worker stopped")?;
    widget.handle(WidgetCommand::ImportFinished(outcome));
    if let Some(status) = widget.status_line() {
        eprintln!("{status}");
    }
    Ok(())
}

fn print_widget_overview(config: &WidgetConfig) {
    println!("{} -- {}", config.title, config.subtitle);
    println!();
    println!("Ämne ({}):", config.subjects.name());
    for entry in config.subjects.entries() {
        println!("  {:<16} {}", entry.code, entry.label);
    }
    println!("Årskurs ({}):", config.grades.name());
    for entry in config.grades.entries() {
        println!("  {:<16} {}", entry.code, entry.label);
    }
    println!("{}: {}", config.topic_field.heading, config.topic_field.hint);
    if let Some(field) = config.text_field {
        println!("{}: {}", field.heading, field.hint);
    }
    println!("Åtgärder:");
    for action in config.actions.iter() {
        println!("  {:<16} {} [{}]", action.id, action.label, action.icon.as_str());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    widget: WidgetKind,
    action: Option<String>,
    subject: Option<String>,
    grade: Option<String>,
    topic: Option<String>,
    text: Option<String>,
    text_file: Option<PathBuf>,
    chat_id: Option<String>,
    model: Option<String>,
    print_system_prompt: bool,
    list: bool,
    verbose: bool,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        widget: WidgetKind::LessonPlanner,
        action: None,
        subject: None,
        grade: None,
        topic: None,
        text: None,
        text_file: None,
        chat_id: None,
        model: None,
        print_system_prompt: false,
        list: false,
        verbose: false,
        print_config_path: false,
        print_example: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        let flag = arg.as_ref();
        let mut value = || {
            iter.next()
                .map(|value| value.as_ref().to_owned())
                .ok_or_else(|| anyhow!("{flag} requires a value"))
        };
        match flag {
            "--config" => {
                options.config_path = PathBuf::from(value()?);
            }
            "--widget" => {
                let raw = value()?;
                options.widget = WidgetKind::parse(&raw).ok_or_else(|| {
                    anyhow!(
                        "unknown widget {raw:?}; expected one of: {}",
                        WidgetKind::ALL.map(WidgetKind::as_str).join(", ")
                    )
                })?;
            }
            "--action" => options.action = Some(value()?),
            "--subject" => options.subject = Some(value()?),
            "--grade" => options.grade = Some(value()?),
            "--topic" | "--assignment" => options.topic = Some(value()?),
            "--text" => options.text = Some(value()?),
            "--text-file" => options.text_file = Some(PathBuf::from(value()?)),
            "--chat-id" => options.chat_id = Some(value()?),
            "--model" => options.model = Some(value()?),
            "--system-prompt" => options.print_system_prompt = true,
            "--list" => options.list = true,
            "--verbose" | "-v" => options.verbose = true,
            "--print-config-path" => options.print_config_path = true,
            "--print-example-config" => options.print_example = true,
            "--check" => options.check_only = true,
            "--help" | "-h" => options.show_help = true,
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("socrates -- guided prompts for Swedish teachers");
    println!("  --widget <name>          lesson-planner (default), flashcards or assessor");
    println!("  --action <id>            Action to dispatch (see --list)");
    println!("  --subject <code>         Subject code, e.g. matematik");
    println!("  --grade <code>           Grade code, e.g. 5 or gymnasiet");
    println!("  --topic <text>           Topic (alias: --assignment for the assessor)");
    println!("  --text <text>            Student text (assessor only)");
    println!("  --text-file <path>       Load the student text from a UTF-8 file");
    println!("  --chat-id <id>           Chat session id (default: random)");
    println!("  --model <id>             Chat model for --system-prompt");
    println!("  --system-prompt          Print the composed system prompt");
    println!("  --list                   Show catalogs and actions for the widget");
    println!("  --verbose, -v            Log at debug level");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --check                  Validate config and exit");
    println!("  --help                   Show this help");
}

#[cfg(test)]
mod tests {
    use super::{CliOptions, dispatch_action, parse_cli_args};
    use crate::config::Config;
    use crate::runtime::StdoutRuntime;
    use anyhow::Result;
    use socrates_app::{ChatId, WidgetKind};
    use std::path::PathBuf;

    fn dispatch_to_lines(args: &[&str]) -> Result<Vec<serde_json::Value>> {
        let options = parse_cli_args(args.iter().copied(), default_options_path())?;
        let mut runtime = StdoutRuntime::new(ChatId::from("cli-test"), Vec::new());
        dispatch_action(&options, &Config::default(), &mut runtime)?;
        assert_eq!(runtime.location(), Some("/chat/cli-test"));
        let written = String::from_utf8(runtime.into_inner())?;
        written
            .lines()
            .map(|line| Ok(serde_json::from_str(line)?))
            .collect()
    }

    fn sent_text(value: &serde_json::Value) -> &str {
        value["parts"][0]["text"].as_str().unwrap_or_default()
    }

    fn default_options_path() -> PathBuf {
        PathBuf::from("/tmp/socrates-config.toml")
    }

    #[test]
    fn parse_cli_args_defaults_to_provided_config_path() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        assert_eq!(
            options,
            CliOptions {
                config_path: default_options_path(),
                widget: WidgetKind::LessonPlanner,
                action: None,
                subject: None,
                grade: None,
                topic: None,
                text: None,
                text_file: None,
                chat_id: None,
                model: None,
                print_system_prompt: false,
                list: false,
                verbose: false,
                print_config_path: false,
                print_example: false,
                check_only: false,
                show_help: false,
            }
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_reads_form_values() -> Result<()> {
        let options = parse_cli_args(
            vec![
                "--widget",
                "flashcards",
                "--action",
                "qa",
                "--subject",
                "no",
                "--grade",
                "vux",
                "--topic",
                "Celler",
                "--chat-id",
                "abc",
            ],
            default_options_path(),
        )?;
        assert_eq!(options.widget, WidgetKind::FlashcardMaker);
        assert_eq!(options.action.as_deref(), Some("qa"));
        assert_eq!(options.subject.as_deref(), Some("no"));
        assert_eq!(options.grade.as_deref(), Some("vux"));
        assert_eq!(options.topic.as_deref(), Some("Celler"));
        assert_eq!(options.chat_id.as_deref(), Some("abc"));
        Ok(())
    }

    #[test]
    fn parse_cli_args_treats_assignment_as_topic() -> Result<()> {
        let options = parse_cli_args(
            vec!["--widget", "assessor", "--assignment", "Skriv en novell"],
            default_options_path(),
        )?;
        assert_eq!(options.widget, WidgetKind::StudentTextAssessor);
        assert_eq!(options.topic.as_deref(), Some("Skriv en novell"));
        Ok(())
    }

    #[test]
    fn dispatch_sends_one_message_with_labels() -> Result<()> {
        let lines = dispatch_to_lines(&[
            "--action",
            "lesson-plan",
            "--subject",
            "matematik",
            "--grade",
            "5",
            "--topic",
            "Bråk",
        ])?;
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["role"], "user");
        let text = sent_text(&lines[0]);
        assert!(text.contains("Matematik"));
        assert!(text.contains("Årskurs 5"));
        assert!(text.contains("Bråk"));
        Ok(())
    }

    #[test]
    fn failed_text_file_still_dispatches_with_pasted_text() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("uppsats.docx");
        std::fs::write(&path, [0xd0, 0xcf, 0x11, 0xe0, 0xff])?;
        let path = path.to_string_lossy().into_owned();

        let lines = dispatch_to_lines(&[
            "--widget",
            "assessor",
            "--action",
            "assess",
            "--text",
            "Min text.",
            "--text-file",
            path.as_str(),
        ])?;
        assert_eq!(lines.len(), 1);
        let text = sent_text(&lines[0]);
        assert!(text.contains("\"Min text.\""), "{text}");
        assert!(!text.contains("[Ingen text angiven]"));
        Ok(())
    }

    #[test]
    fn text_file_feeds_the_assessor() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("elevtext.txt");
        std::fs::write(&path, "Hösten är fin.")?;
        let path = path.to_string_lossy().into_owned();

        let lines = dispatch_to_lines(&[
            "--widget",
            "assessor",
            "--action",
            "feedback",
            "--text-file",
            path.as_str(),
        ])?;
        assert_eq!(lines.len(), 1);
        assert!(sent_text(&lines[0]).contains("Hösten är fin."));
        Ok(())
    }

    #[test]
    fn text_file_is_rejected_for_lesson_planner() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("elevtext.txt");
        std::fs::write(&path, "text")?;
        let path = path.to_string_lossy().into_owned();

        let options = parse_cli_args(
            vec![
                "--widget",
                "lesson-planner",
                "--action",
                "lecture",
                "--text-file",
                path.as_str(),
            ],
            default_options_path(),
        )?;
        let mut runtime = StdoutRuntime::new(ChatId::from("cli-test"), Vec::new());
        let error = dispatch_action(&options, &Config::default(), &mut runtime)
            .expect_err("text file on the lesson planner should fail");
        assert!(error.to_string().contains("--text-file only applies to --widget assessor"));
        assert_eq!(runtime.location(), None);
        assert!(runtime.into_inner().is_empty());
        Ok(())
    }

    #[test]
    fn text_option_is_ignored_by_flashcards() -> Result<()> {
        let lines = dispatch_to_lines(&[
            "--widget",
            "flashcards",
            "--action",
            "qa",
            "--topic",
            "Celler",
            "--text",
            "ska inte synas",
        ])?;
        assert_eq!(lines.len(), 1);
        let text = sent_text(&lines[0]);
        assert!(text.contains("Celler"));
        assert!(!text.contains("ska inte synas"));
        Ok(())
    }

    #[test]
    fn dispatch_rejects_missing_and_unknown_actions() -> Result<()> {
        let mut runtime = StdoutRuntime::new(ChatId::from("cli-test"), Vec::new());

        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        let error = dispatch_action(&options, &Config::default(), &mut runtime)
            .expect_err("missing action should fail");
        assert!(error.to_string().contains("--action is required"));

        let options = parse_cli_args(vec!["--action", "qa"], default_options_path())?;
        let error = dispatch_action(&options, &Config::default(), &mut runtime)
            .expect_err("unknown action should fail");
        assert!(error.to_string().contains("expected one of: lesson-plan"));
        assert!(runtime.into_inner().is_empty());
        Ok(())
    }

    #[test]
    fn parse_cli_args_errors_for_missing_value() {
        let error = parse_cli_args(vec!["--action"], default_options_path())
            .expect_err("missing value should fail");
        assert!(error.to_string().contains("--action requires a value"));
    }

    #[test]
    fn parse_cli_args_errors_for_unknown_widget() {
        let error = parse_cli_args(vec!["--widget", "quiz"], default_options_path())
            .expect_err("unknown widget should fail");
        let message = error.to_string();
        assert!(message.contains("unknown widget"));
        assert!(message.contains("lesson-planner, flashcards, assessor"));
    }

    #[test]
    fn parse_cli_args_errors_for_unknown_argument() {
        let error = parse_cli_args(vec!["--wat"], default_options_path())
            .expect_err("unknown arg should fail");
        let message = error.to_string();
        assert!(message.contains("unknown argument"));
        assert!(message.contains("--help"));
    }

    #[test]
    fn parse_cli_args_sets_mode_flags() -> Result<()> {
        let options = parse_cli_args(
            vec!["--system-prompt", "--model", "chat-model-reasoning", "-v", "--check"],
            default_options_path(),
        )?;
        assert!(options.print_system_prompt);
        assert_eq!(options.model.as_deref(), Some("chat-model-reasoning"));
        assert!(options.verbose);
        assert!(options.check_only);
        assert!(!options.list);
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_help_flag_for_long_and_short_variants() -> Result<()> {
        let long = parse_cli_args(vec!["--help"], default_options_path())?;
        assert!(long.show_help);

        let short = parse_cli_args(vec!["-h"], default_options_path())?;
        assert!(short.show_help);
        Ok(())
    }
}
