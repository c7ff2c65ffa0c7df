//! Dialoguer front end: the mode screen, one prompt per question kind, and the
//! loop tying them to a `Kiosk`.

use branching_survey::{
    EngineError, Kiosk, Progress, QuestionKind, QuestionSpec, RespondentClass, ResponseValue,
    VoiceCapture, YesNo,
};
use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme};
use dialoguer::{FuzzySelect, Input, MultiSelect, Select};
use thiserror::Error;
use tokio::runtime::Handle;
use tracing::{debug, warn};

const PLACEHOLDER: &str = "-- Select --";

/// Dropdowns longer than this get type-to-filter.
const FUZZY_THRESHOLD: usize = 10;

/// Error type for the Dialoguer front end.
#[derive(Debug, Error)]
pub enum FrontendError {
    /// User cancelled: Ctrl+C on any prompt, or Escape on a list prompt.
    #[error("Survey cancelled by user")]
    Cancelled,

    /// A list prompt reported an item it was never given.
    #[error("Selection {0} is out of range")]
    OutOfRange(usize),

    /// An I/O error occurred during prompting.
    #[error("Dialoguer error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

impl FrontendError {
    /// Check if this error represents user cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Helper to check if a dialoguer error is a cancellation (Ctrl+C)
fn is_cancelled(err: &dialoguer::Error) -> bool {
    matches!(err, dialoguer::Error::IO(io_err) if io_err.kind() == std::io::ErrorKind::Interrupted)
}

fn interact<T>(result: Result<T, dialoguer::Error>) -> Result<T, FrontendError> {
    result.map_err(|e| {
        if is_cancelled(&e) {
            FrontendError::Cancelled
        } else {
            FrontendError::Dialoguer(e)
        }
    })
}

/// Like [`interact`], for prompts where Escape yields `None`.
fn interact_opt<T>(result: Result<Option<T>, dialoguer::Error>) -> Result<T, FrontendError> {
    interact(result)?.ok_or(FrontendError::Cancelled)
}

/// Choice made on the mode screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChoice {
    Start(RespondentClass),
    Quit,
}

/// How the respondent answered a question.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Value(ResponseValue),

    /// Asked to dictate instead of typing.
    Dictate,
}

/// The screens `run_kiosk` shows.
pub trait Prompter {
    /// Show the respondent counter and ask which survey to start.
    fn choose_mode(&self, completed: u64) -> Result<ModeChoice, FrontendError>;

    /// Ask one question. `voice` is true when dictation can be offered.
    fn ask(&self, question: &QuestionSpec, voice: bool) -> Result<Answer, FrontendError>;
}

/// Terminal prompts for the survey kiosk.
#[derive(Debug, Clone)]
pub struct DialoguerFrontend {
    /// Use colorful theme for prompts.
    colorful: bool,
}

impl Default for DialoguerFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl DialoguerFrontend {
    /// Create a front end with the colorful theme.
    pub fn new() -> Self {
        Self { colorful: true }
    }

    /// Create a front end with plain (no color) theme.
    pub fn plain() -> Self {
        Self { colorful: false }
    }

    pub fn is_colorful(&self) -> bool {
        self.colorful
    }

    fn theme(&self) -> Box<dyn Theme> {
        if self.colorful {
            Box::new(ColorfulTheme::default())
        } else {
            Box::new(SimpleTheme)
        }
    }

    fn ask_dropdown(&self, prompt: &str, options: &[String]) -> Result<Answer, FrontendError> {
        let mut items: Vec<&str> = vec![PLACEHOLDER];
        items.extend(options.iter().map(String::as_str));

        loop {
            let theme = self.theme();
            let selection = if options.len() > FUZZY_THRESHOLD {
                interact_opt(
                    FuzzySelect::with_theme(theme.as_ref())
                        .with_prompt(prompt)
                        .items(&items)
                        .default(0)
                        .interact_opt(),
                )?
            } else {
                interact_opt(
                    Select::with_theme(theme.as_ref())
                        .with_prompt(prompt)
                        .items(&items)
                        .default(0)
                        .interact_opt(),
                )?
            };

            match dropdown_choice(options, selection)? {
                Some(choice) => return Ok(Answer::Value(ResponseValue::from(choice))),
                None => println!("Error: Please choose an option"),
            }
        }
    }

    fn ask_yes_no(&self, prompt: &str) -> Result<Answer, FrontendError> {
        let items: Vec<&str> = YesNo::ALL.iter().map(|a| a.as_str()).collect();

        let theme = self.theme();
        let selection = interact_opt(
            Select::with_theme(theme.as_ref())
                .with_prompt(prompt)
                .items(&items)
                .default(0)
                .interact_opt(),
        )?;

        Ok(Answer::Value(yes_no_choice(selection)?.into()))
    }

    fn ask_text(&self, prompt: &str, voice: bool) -> Result<Answer, FrontendError> {
        let theme = self.theme();

        if voice {
            let how = interact_opt(
                Select::with_theme(theme.as_ref())
                    .with_prompt(prompt)
                    .items(&["Type", "Dictate"][..])
                    .default(0)
                    .interact_opt(),
            )?;
            if how == 1 {
                return Ok(Answer::Dictate);
            }
        }

        let text: String = interact(
            Input::with_theme(theme.as_ref())
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text(),
        )?;
        Ok(Answer::Value(ResponseValue::Text(text)))
    }

    fn ask_multi_select(&self, prompt: &str, options: &[String]) -> Result<Answer, FrontendError> {
        let theme = self.theme();
        let picked = interact_opt(
            MultiSelect::with_theme(theme.as_ref())
                .with_prompt(format!("{prompt} (space to toggle, enter to continue)"))
                .items(options)
                .interact_opt(),
        )?;

        let selections = picked
            .into_iter()
            .map(|i| options.get(i).cloned().ok_or(FrontendError::OutOfRange(i)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Answer::Value(ResponseValue::selections(selections)))
    }
}

impl Prompter for DialoguerFrontend {
    fn choose_mode(&self, completed: u64) -> Result<ModeChoice, FrontendError> {
        println!();
        println!("Respondents: {completed}");

        let mut items: Vec<&str> = RespondentClass::ALL.iter().map(|c| c.as_str()).collect();
        items.push("Quit");

        let theme = self.theme();
        let selection = interact_opt(
            Select::with_theme(theme.as_ref())
                .with_prompt("Choose respondent mode")
                .items(&items)
                .default(0)
                .interact_opt(),
        )?;

        mode_choice(selection)
    }

    fn ask(&self, question: &QuestionSpec, voice: bool) -> Result<Answer, FrontendError> {
        let prompt = question.prompt();
        match question.kind() {
            QuestionKind::Dropdown { options } => self.ask_dropdown(prompt, options),
            QuestionKind::YesNo => self.ask_yes_no(prompt),
            QuestionKind::Text => self.ask_text(prompt, voice),
            QuestionKind::MultiSelect { options } => self.ask_multi_select(prompt, options),
        }
    }
}

/// Mode screen items are the respondent classes followed by Quit.
fn mode_choice(selection: usize) -> Result<ModeChoice, FrontendError> {
    match RespondentClass::ALL.get(selection) {
        Some(class) => Ok(ModeChoice::Start(*class)),
        None if selection == RespondentClass::ALL.len() => Ok(ModeChoice::Quit),
        None => Err(FrontendError::OutOfRange(selection)),
    }
}

fn yes_no_choice(selection: usize) -> Result<YesNo, FrontendError> {
    YesNo::ALL
        .get(selection)
        .copied()
        .ok_or(FrontendError::OutOfRange(selection))
}

/// Dropdown items are the placeholder followed by the options. `None` means
/// the placeholder was chosen.
fn dropdown_choice(options: &[String], selection: usize) -> Result<Option<&str>, FrontendError> {
    match selection.checked_sub(1) {
        None => Ok(None),
        Some(i) => options
            .get(i)
            .map(|choice| Some(choice.as_str()))
            .ok_or(FrontendError::OutOfRange(selection)),
    }
}

/// Run the kiosk until the operator quits: mode screen, questions, completion,
/// and back to the mode screen. Returns the number of completed surveys.
///
/// Blocks on terminal input, so call it from a blocking thread of the runtime
/// behind `runtime` (persistence writes are spawned onto it).
pub fn run_kiosk(
    kiosk: &mut Kiosk,
    prompter: &dyn Prompter,
    voice: &dyn VoiceCapture,
    runtime: &Handle,
) -> Result<u64, FrontendError> {
    loop {
        let mode = match prompter.choose_mode(kiosk.completed_count()) {
            Ok(ModeChoice::Start(mode)) => mode,
            Ok(ModeChoice::Quit) => return Ok(kiosk.completed_count()),
            Err(e) if e.is_cancelled() => return Ok(kiosk.completed_count()),
            Err(e) => return Err(e),
        };

        kiosk.select_mode(mode);
        match take_survey(kiosk, prompter, voice, runtime) {
            Ok(()) => println!("Thank you! Your response has been recorded."),
            Err(e) if e.is_cancelled() => {
                debug!("Survey abandoned by respondent");
                println!("Survey discarded.");
            }
            Err(e) => return Err(e),
        }
    }
}

fn take_survey(
    kiosk: &mut Kiosk,
    prompter: &dyn Prompter,
    voice: &dyn VoiceCapture,
    runtime: &Handle,
) -> Result<(), FrontendError> {
    while let Some(question) = kiosk.current_question() {
        let question = question.clone();

        let progress = match prompter.ask(&question, voice.is_supported())? {
            Answer::Value(value) => match kiosk.submit_answer(question.id().as_str(), value) {
                Ok(progress) => progress,
                Err(EngineError::InvalidAnswer(e)) => {
                    println!("Error: {e}");
                    continue;
                }
                Err(e) => return Err(e.into()),
            },
            Answer::Dictate => match runtime.block_on(kiosk.capture_voice(voice)) {
                Ok(Some(progress)) => progress,
                Ok(None) => {
                    println!("Nothing was captured, please type your answer.");
                    continue;
                }
                Err(e) => {
                    warn!("Dictated answer rejected: {}", e);
                    println!("Error: {e}");
                    continue;
                }
            },
        };

        if let Progress::Completed { completed, .. } = progress {
            debug!("Survey {} completed", completed);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frontend_themes() {
        assert!(DialoguerFrontend::new().is_colorful());
        assert!(DialoguerFrontend::default().is_colorful());
        assert!(!DialoguerFrontend::plain().is_colorful());
    }

    #[test]
    fn error_types() {
        let err = FrontendError::Cancelled;
        assert_eq!(err.to_string(), "Survey cancelled by user");
        assert!(err.is_cancelled());

        let err = FrontendError::Engine(EngineError::NoActiveSurvey);
        assert_eq!(err.to_string(), "Engine error: No survey is in progress");
        assert!(!err.is_cancelled());
    }

    #[test]
    fn interrupted_io_is_cancellation() {
        let err = dialoguer::Error::IO(std::io::Error::from(std::io::ErrorKind::Interrupted));
        assert!(interact::<()>(Err(err)).unwrap_err().is_cancelled());

        let err = dialoguer::Error::IO(std::io::Error::from(std::io::ErrorKind::BrokenPipe));
        assert!(matches!(
            interact::<()>(Err(err)),
            Err(FrontendError::Dialoguer(_))
        ));
    }

    #[test]
    fn escape_is_cancellation() {
        assert!(interact_opt::<usize>(Ok(None)).unwrap_err().is_cancelled());
        assert_eq!(interact_opt(Ok(Some(2))).unwrap(), 2);
    }

    #[test]
    fn mode_screen_items() {
        assert_eq!(
            mode_choice(0).unwrap(),
            ModeChoice::Start(RespondentClass::Parent)
        );
        assert_eq!(
            mode_choice(1).unwrap(),
            ModeChoice::Start(RespondentClass::Student)
        );
        assert_eq!(mode_choice(2).unwrap(), ModeChoice::Quit);
        assert!(matches!(mode_choice(3), Err(FrontendError::OutOfRange(3))));
    }

    #[test]
    fn yes_no_out_of_range_is_an_error() {
        assert_eq!(yes_no_choice(0).unwrap(), YesNo::Yes);
        assert_eq!(yes_no_choice(1).unwrap(), YesNo::No);
        assert!(matches!(yes_no_choice(2), Err(FrontendError::OutOfRange(2))));
    }

    #[test]
    fn dropdown_placeholder_is_not_an_answer() {
        let options = vec!["16".to_string(), "17".to_string()];
        assert_eq!(dropdown_choice(&options, 0).unwrap(), None);
        assert_eq!(dropdown_choice(&options, 2).unwrap(), Some("17"));
        assert!(matches!(
            dropdown_choice(&options, 3),
            Err(FrontendError::OutOfRange(3))
        ));
    }
}
