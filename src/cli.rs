use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crate::message::MessageRequest;

#[derive(Parser, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default)]
#[command(
    name = "mailgun-send",
    author,
    version,
    about,
    long_about = "Send an email through Mailgun from the command line.\n\n\
        You will be prompted to enter your Mailgun API Key \
        [https://app.mailgun.com/app/account/security/api_keys] and Domain \
        [https://app.mailgun.com/app/sending/domains/] on your first use."
)]
pub struct Cli {
    /// Subject of Email
    #[arg(long, short, value_name = "VALUE")]
    pub subject: Option<String>,

    /// Email address of recipient of email
    #[arg(long, short, value_name = "VALUE")]
    pub to: Option<String>,

    /// Email address of email sender
    #[arg(long, short, value_name = "VALUE")]
    pub from: Option<String>,

    /// ReplyTo email address. Optional
    #[arg(long, short, value_name = "VALUE")]
    pub reply: Option<String>,

    /// Email address to CC. Optional
    #[arg(long, short, value_name = "VALUE")]
    pub cc: Option<String>,

    /// Email address to BCC. Optional
    #[arg(long, short, value_name = "VALUE")]
    pub bcc: Option<String>,

    /// Text to send as body of email. Must specify this or --htmlpath
    #[arg(long, short = 'T', value_name = "VALUE")]
    pub text: Option<String>,

    /// Path to HTML file to send as email. Must specify this or --text
    #[arg(long, short = 'H', value_name = "PATH")]
    pub htmlpath: Option<PathBuf>,

    /// Reset Mailgun API key and Domain. You will be prompted to enter these again
    #[arg(long, short = 'R')]
    pub reset: bool,

    /// Output more detailed information, such as message id
    #[arg(long, short)]
    pub verbose: bool,

    /// Specify config file to use
    ///
    /// If not specified the defaults are used (US region, 30 second timeout)
    #[arg(long = "config", value_name = "PATH")]
    pub config_filename: Option<PathBuf>,

    /// Set logging level to use
    #[arg(long, short, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,
}

impl Cli {
    pub fn message_request(&self) -> MessageRequest {
        MessageRequest {
            to: self.to.clone(),
            from: self.from.clone(),
            subject: self.subject.clone(),
            text: self.text.clone(),
            htmlpath: self.htmlpath.clone(),
            reply: self.reply.clone(),
            cc: self.cc.clone(),
            bcc: self.bcc.clone(),
            verbose: self.verbose,
        }
    }
}

/// Exists to provide better help messages variants copied from LevelFilter as
/// that's the type that is actually needed
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum LogLevel {
    /// Nothing emitted in this mode
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{error::ErrorKind, CommandFactory};
    use rstest::rstest;

    const ARGS: [&str; 17] = [
        "mailgun-send",
        "-t",
        "to@x.com",
        "-f",
        "from@x.com",
        "-s",
        "Subject line",
        "-T",
        "Body text",
        "-c",
        "cc@x.com",
        "-b",
        "bcc@x.com",
        "-r",
        "reply@x.com",
        "-H",
        "mail.html",
    ];

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn all_options_reach_request() {
        // Arrange
        let expected = MessageRequest {
            to: Some("to@x.com".into()),
            from: Some("from@x.com".into()),
            subject: Some("Subject line".into()),
            text: Some("Body text".into()),
            htmlpath: Some(PathBuf::from("mail.html")),
            reply: Some("reply@x.com".into()),
            cc: Some("cc@x.com".into()),
            bcc: Some("bcc@x.com".into()),
            verbose: false,
        };

        // Act
        let cli = Cli::try_parse_from(ARGS).unwrap();

        // Assert
        assert_eq!(cli.message_request(), expected);
        assert!(!cli.reset);
        assert_eq!(cli.log_level, LogLevel::Warn);
    }

    #[rstest]
    #[case("-v")]
    #[case("--verbose")]
    fn verbose_flag(#[case] flag: &str) {
        let cli = Cli::try_parse_from(ARGS.iter().copied().chain([flag])).unwrap();
        assert!(cli.message_request().verbose);
    }

    #[rstest]
    #[case("-R")]
    #[case("--reset")]
    fn reset_flag(#[case] flag: &str) {
        let cli = Cli::try_parse_from(ARGS.iter().copied().chain([flag])).unwrap();
        assert!(cli.reset);
    }

    #[test]
    fn unknown_option_rejected() {
        let actual = Cli::try_parse_from(ARGS.iter().copied().chain(["-W"])).unwrap_err();
        assert_eq!(actual.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn missing_value_rejected() {
        let actual = Cli::try_parse_from(ARGS[..ARGS.len() - 1].iter().copied()).unwrap_err();
        assert_eq!(actual.kind(), ErrorKind::InvalidValue);
    }

    #[rstest]
    #[case("-V", ErrorKind::DisplayVersion)]
    #[case("--version", ErrorKind::DisplayVersion)]
    #[case("-h", ErrorKind::DisplayHelp)]
    #[case("--help", ErrorKind::DisplayHelp)]
    fn help_and_version_exit_early(#[case] flag: &str, #[case] expected: ErrorKind) {
        let actual = Cli::try_parse_from(["mailgun-send", flag]).unwrap_err();
        assert_eq!(actual.kind(), expected);
    }

    #[test]
    fn help_shows_usage() {
        let help = Cli::command().render_help().to_string();
        assert!(help.contains("Usage: mailgun-send [OPTIONS]"), "{help}");
        assert!(help.contains("--htmlpath"));
    }

    #[test]
    fn nothing_required_by_parser() {
        let cli = Cli::try_parse_from(["mailgun-send"]).unwrap();
        assert_eq!(cli.message_request(), MessageRequest::default());
    }
}
